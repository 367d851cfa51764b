pub mod raband;
pub mod rachan;
pub mod raudio;
