use super::{
    builtin::{
        CHANNEL_TABLE, DEFAULT_ETA, DEFAULT_MAX_DISTANCE, DEFAULT_SNR, INTERFERENCE_MEAN,
        INTERFERENCE_STD, PADDING_DURATION, SPEED_OF_SOUND,
    },
    ChannelDescriptor, ChannelError, ChannelTable,
};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelConfig {
    /// Transmitter signal to noise ratio in dB.
    pub snr: f64,
    /// Attenuation constant per metre.
    pub eta: f64,
    /// Upper bound of the uniformly drawn propagation distance in metres.
    pub max_distance: f64,
}

impl ChannelConfig {
    pub fn new(snr: f64, eta: f64, max_distance: f64) -> Result<Self, ChannelError> {
        if !snr.is_finite() {
            return Err(ChannelError::InvalidParameter(format!(
                "snr must be finite, got {}",
                snr
            )));
        }
        if !(eta.is_finite() && eta >= 0.) {
            return Err(ChannelError::InvalidParameter(format!(
                "eta must be non-negative, got {}",
                eta
            )));
        }
        if !(max_distance.is_finite() && max_distance >= 0.) {
            return Err(ChannelError::InvalidParameter(format!(
                "max distance must be non-negative, got {}",
                max_distance
            )));
        }

        Ok(Self {
            snr,
            eta,
            max_distance,
        })
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            snr: DEFAULT_SNR,
            eta: DEFAULT_ETA,
            max_distance: DEFAULT_MAX_DISTANCE,
        }
    }
}

/// Tone injected from a neighbouring channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interference {
    pub channel_id: usize,
    pub frequency: f64,
    pub amplitude: f64,
}

/// Random draws behind one simulated transmission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelRealization {
    pub distance: f64,
    /// Propagation delay in samples.
    pub delay: usize,
    pub gain: f64,
    pub noise_variance: f64,
    pub interference: Option<Interference>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChannelOutput {
    pub samples: Vec<f32>,
    pub realization: ChannelRealization,
}

pub fn delay_len(distance: f64, sample_rate: f64) -> usize {
    (distance / SPEED_OF_SOUND * sample_rate).round() as usize
}

pub fn attenuation(distance: f64, eta: f64) -> f64 {
    (-eta * distance).exp()
}

pub fn padding_len(sample_rate: f64) -> usize {
    (PADDING_DURATION * sample_rate).round() as usize
}

/// Delays `source` by the time of flight over `distance`, scales it by the path gain and appends
/// the trailing silence.
pub fn propagate(source: &[f32], sample_rate: f64, distance: f64, eta: f64) -> Vec<f32> {
    let delay = delay_len(distance, sample_rate);
    let gain = attenuation(distance, eta) as f32;

    let mut output = vec![0f32; delay + source.len() + padding_len(sample_rate)];
    output[delay..]
        .iter_mut()
        .zip(source)
        .for_each(|(item, sample)| *item = gain * sample);
    output
}

/// Per-sample variance of white noise that yields `snr` dB below the channel's maximum power
/// within its bandwidth.
pub fn noise_variance(channel: &ChannelDescriptor, snr: f64, sample_rate: f64) -> f64 {
    let power = 10f64.powf((channel.max_power - snr) / 10.) * 1e-3;
    power * sample_rate / (4. * channel.bandwidth())
}

pub fn tone(frequency: f64, amplitude: f64, sample_rate: f64, len: usize) -> Vec<f32> {
    (0..len)
        .map(|index| {
            let time = index as f64 / sample_rate;
            (amplitude * (2. * PI * frequency * time).sin()) as f32
        })
        .collect()
}

pub struct ChannelSimulator<'a, R: Rng> {
    config: ChannelConfig,
    table: &'a ChannelTable,
    rng: R,
}

impl<R: Rng> ChannelSimulator<'static, R> {
    pub fn new(config: ChannelConfig, rng: R) -> Self {
        Self::with_table(config, &CHANNEL_TABLE, rng)
    }
}

impl ChannelSimulator<'static, SmallRng> {
    pub fn seeded(config: ChannelConfig, seed: u64) -> Self {
        Self::new(config, SmallRng::seed_from_u64(seed))
    }

    pub fn from_entropy(config: ChannelConfig) -> Self {
        Self::new(config, SmallRng::from_entropy())
    }
}

impl<'a, R: Rng> ChannelSimulator<'a, R> {
    pub fn with_table(config: ChannelConfig, table: &'a ChannelTable, rng: R) -> Self {
        Self { config, table, rng }
    }

    /// Passes `source` through the channel `channel_id`.
    ///
    /// Draws, in order: the distance, one noise sample per output sample, the interfering
    /// channel and the interference amplitude. A fixed seed reproduces the output exactly.
    pub fn simulate(
        &mut self,
        source: &[f32],
        sample_rate: f64,
        channel_id: usize,
    ) -> Result<ChannelOutput, ChannelError> {
        if !(sample_rate.is_finite() && sample_rate > 0.) {
            return Err(ChannelError::InvalidParameter(format!(
                "sample rate must be positive, got {}",
                sample_rate
            )));
        }
        let channel = *self.table.get(channel_id)?;

        let distance = self.rng.gen::<f64>() * self.config.max_distance;
        let mut samples = propagate(source, sample_rate, distance, self.config.eta);

        let noise_variance = noise_variance(&channel, self.config.snr, sample_rate);
        let noise = Normal::new(0., noise_variance.sqrt())
            .map_err(|err| ChannelError::InvalidParameter(err.to_string()))?;
        for item in samples.iter_mut() {
            *item += noise.sample(&mut self.rng) as f32;
        }

        let interference = self.interference(channel_id)?;
        match interference {
            Some(interference) => {
                let len = samples.len();
                samples
                    .iter_mut()
                    .zip(tone(
                        interference.frequency,
                        interference.amplitude,
                        sample_rate,
                        len,
                    ))
                    .for_each(|(item, tone)| *item += tone);
            }
            None => log::warn!("No interfering channel available for channel {}", channel_id),
        }

        let realization = ChannelRealization {
            distance,
            delay: delay_len(distance, sample_rate),
            gain: attenuation(distance, self.config.eta),
            noise_variance,
            interference,
        };
        log::debug!(
            "Channel {}: distance {:.3} m, delay {} samples, noise variance {:.4}, interference {:?}",
            channel_id,
            realization.distance,
            realization.delay,
            realization.noise_variance,
            realization.interference
        );

        Ok(ChannelOutput {
            samples,
            realization,
        })
    }

    fn interference(&mut self, channel_id: usize) -> Result<Option<Interference>, ChannelError> {
        let candidates = self.table.interferers(channel_id)?;
        if candidates.is_empty() {
            return Ok(None);
        }

        let channel_id = candidates[self.rng.gen_range(0..candidates.len())];
        let frequency = self.table.get(channel_id)?.center();
        let amplitude = Normal::new(INTERFERENCE_MEAN, INTERFERENCE_STD)
            .map_err(|err| ChannelError::InvalidParameter(err.to_string()))?
            .sample(&mut self.rng);

        Ok(Some(Interference {
            channel_id,
            frequency,
            amplitude,
        }))
    }
}
