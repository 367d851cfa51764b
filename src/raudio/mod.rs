//! # Rawave Audio
//! WAV files as the hand-off point between the baseband codec and external modulators. Tracks
//! are stored as 32-bit float samples; mono tracks hold a real baseband waveform, stereo tracks
//! hold interleaved I/Q pairs from a demodulator.

mod track;

pub use track::{Track, TrackError};
