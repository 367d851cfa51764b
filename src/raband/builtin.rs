//! # Rawave Baseband
//! Rawave baseband turns bits into a rectangular pulse train and back. Every transmission starts
//! with a fixed preamble (PREAMBLE, 2 symbols) followed by the payload. Bits are mapped
//! antipodally: 1 becomes SYMBOL_ONE and 0 becomes SYMBOL_ZERO. Each symbol lasts
//! floor(symbol_duration * sample_rate) samples. The receiver flags samples whose windowed energy
//! rejects the noise-only hypothesis at DETECTION_CONFIDENCE and locks onto the preamble boundary.

pub const PREAMBLE: [bool; 2] = [true, false];

pub const SYMBOL_ONE: f32 = 1.0;
pub const SYMBOL_ZERO: f32 = -1.0;

pub const DETECTION_CONFIDENCE: f64 = 0.99;

pub const UNWRAP_THRESHOLD: f32 = std::f32::consts::PI / 8.0;
