mod simulate;
mod table;

pub mod builtin;

pub use simulate::{
    attenuation, delay_len, noise_variance, padding_len, propagate, tone, ChannelConfig,
    ChannelOutput, ChannelRealization, ChannelSimulator, Interference,
};
pub use table::{ChannelDescriptor, ChannelTable};

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ChannelError {
    #[error("Invalid channel {id} (valid ids are 1 to {} of {slots} slots)", .slots - 2)]
    InvalidChannel { id: usize, slots: usize },
    #[error("Invalid channel parameter: {0}")]
    InvalidParameter(String),
}
