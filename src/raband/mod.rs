mod codec;
mod detect;
mod pulse;
mod received;
mod recover;
mod sync;

pub mod builtin;
pub mod encode;
pub mod signal;
pub mod stats;

pub use codec::{BasebandCodec, CodecConfig};
pub use detect::detect;
pub use pulse::{encode, symbol};
pub use received::ReceivedSignal;
pub use recover::{recover, RecoveredSymbol, SymbolProjections};
pub use sync::{locate, unwrap_bpsk};

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum BasebandError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("No transmission detected")]
    NoDetection,
    #[error("Synchronization offset {offset} is out of range for pulses of {pulse_len} samples")]
    SyncOutOfRange { offset: usize, pulse_len: usize },
}
