use super::ChannelError;
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelDescriptor {
    /// Lower band edge in Hz.
    pub lower: f64,
    /// Upper band edge in Hz.
    pub upper: f64,
    /// Maximum average transmit power in dBm.
    pub max_power: f64,
}

impl ChannelDescriptor {
    pub const fn new(lower: f64, upper: f64, max_power: f64) -> Self {
        Self {
            lower,
            upper,
            max_power,
        }
    }

    pub fn center(&self) -> f64 {
        (self.lower + self.upper) / 2.
    }

    /// One-sided bandwidth in Hz.
    pub fn bandwidth(&self) -> f64 {
        (self.upper - self.lower) / 2.
    }
}

/// Ordered channel plan. Ids run from 1 to `slots() - 2`; the first and last slots are reserved.
#[derive(Debug, Clone)]
pub struct ChannelTable {
    channels: Cow<'static, [ChannelDescriptor]>,
}

impl ChannelTable {
    pub const fn from_static(channels: &'static [ChannelDescriptor]) -> Self {
        Self {
            channels: Cow::Borrowed(channels),
        }
    }

    pub fn new(channels: Vec<ChannelDescriptor>) -> Self {
        Self {
            channels: Cow::Owned(channels),
        }
    }

    /// Number of slots including the two reserved ones.
    pub fn slots(&self) -> usize {
        self.channels.len() + 2
    }

    pub fn contains(&self, id: usize) -> bool {
        id >= 1 && id <= self.channels.len()
    }

    pub fn get(&self, id: usize) -> Result<&ChannelDescriptor, ChannelError> {
        if !self.contains(id) {
            return Err(ChannelError::InvalidChannel {
                id,
                slots: self.slots(),
            });
        }
        Ok(&self.channels[id - 1])
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &ChannelDescriptor)> {
        self.channels
            .iter()
            .enumerate()
            .map(|(index, channel)| (index + 1, channel))
    }

    /// Channels that may interfere with `id` without aliasing: every other channel whose centre
    /// frequency is at most twice the centre frequency of `id`.
    pub fn interferers(&self, id: usize) -> Result<Vec<usize>, ChannelError> {
        let center = self.get(id)?.center();
        Ok(self
            .iter()
            .filter(|(_, channel)| channel.center() <= 2. * center && channel.center() != center)
            .map(|(index, _)| index)
            .collect())
    }
}
