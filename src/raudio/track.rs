use anyhow::Result;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use num::complex::Complex32;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackError {
    #[error("Unsupported sample width of {0} bits")]
    UnsupportedWidth(u16),
    #[error("Expected {expected} channels, found {found}")]
    ChannelMismatch { expected: u16, found: u16 },
}

/// Interleaved float samples together with the WAV layout they are stored in.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    spec: WavSpec,
    buf: Vec<f32>,
}

fn float_spec(sample_rate: u32, channels: u16) -> WavSpec {
    WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    }
}

impl Track {
    pub fn mono(sample_rate: u32, buf: Vec<f32>) -> Self {
        Self {
            spec: float_spec(sample_rate, 1),
            buf,
        }
    }

    /// Stereo track carrying the in-phase component on the left and the quadrature component on
    /// the right.
    pub fn from_iq(sample_rate: u32, samples: &[Complex32]) -> Self {
        Self {
            spec: float_spec(sample_rate, 2),
            buf: samples.iter().flat_map(|item| [item.re, item.im]).collect(),
        }
    }

    /// Reads a WAV file. Integer samples are scaled into [-1, 1).
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let reader = WavReader::open(path)?;
        let spec = reader.spec();
        let buf = match spec.sample_format {
            SampleFormat::Float => reader.into_samples::<f32>().collect::<Result<Vec<_>, _>>()?,
            SampleFormat::Int => {
                if spec.bits_per_sample == 0 || spec.bits_per_sample > 32 {
                    return Err(TrackError::UnsupportedWidth(spec.bits_per_sample).into());
                }
                let scale = 1. / (1u64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .into_samples::<i32>()
                    .map(|item| item.map(|item| item as f32 * scale))
                    .collect::<Result<Vec<_>, _>>()?
            }
        };

        log::debug!(
            "Opened track with {} channels at {} Hz ({} samples)",
            spec.channels,
            spec.sample_rate,
            buf.len()
        );
        Ok(Self { spec, buf })
    }

    pub fn sample_rate(&self) -> u32 {
        self.spec.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.spec.channels
    }

    /// Interleaved samples.
    pub fn samples(&self) -> &[f32] {
        &self.buf
    }

    /// Samples of a single channel.
    pub fn channel(&self, index: u16) -> Vec<f32> {
        let channels = self.spec.channels.max(1) as usize;
        self.buf
            .iter()
            .skip(index as usize)
            .step_by(channels)
            .copied()
            .collect()
    }

    pub fn to_iq(&self) -> Result<Vec<Complex32>> {
        if self.spec.channels != 2 {
            return Err(TrackError::ChannelMismatch {
                expected: 2,
                found: self.spec.channels,
            }
            .into());
        }
        Ok(self
            .buf
            .chunks_exact(2)
            .map(|pair| Complex32::new(pair[0], pair[1]))
            .collect())
    }

    pub fn save_as(&self, path: impl AsRef<Path>) -> Result<()> {
        let spec = float_spec(self.spec.sample_rate, self.spec.channels);
        let mut writer = WavWriter::create(path, spec)?;

        for sample in &self.buf {
            writer.write_sample(*sample)?;
        }

        writer.finalize()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, fs, process};

    fn scratch(name: &str) -> std::path::PathBuf {
        env::temp_dir().join(format!("rawave-{}-{}.wav", process::id(), name))
    }

    #[test]
    fn test_mono_roundtrip() {
        let path = scratch("mono");
        let track = Track::mono(8000, vec![0., 0.5, -0.25, 1.]);
        track.save_as(&path).unwrap();

        let loaded = Track::open(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(loaded, track);
        assert_eq!(loaded.sample_rate(), 8000);
        assert_eq!(loaded.channels(), 1);
    }

    #[test]
    fn test_integer_samples() {
        let path = scratch("int");
        let spec = WavSpec {
            channels: 1,
            sample_rate: 1000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for sample in [0i16, 16384, -32768] {
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();

        let loaded = Track::open(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(loaded.samples(), &[0., 0.5, -1.]);
    }

    #[test]
    fn test_iq() {
        let samples = vec![Complex32::new(1., -1.), Complex32::new(0.5, 0.25)];
        let track = Track::from_iq(48000, &samples);
        assert_eq!(track.channels(), 2);
        assert_eq!(track.samples(), &[1., -1., 0.5, 0.25]);
        assert_eq!(track.channel(1), vec![-1., 0.25]);
        assert_eq!(track.to_iq().unwrap(), samples);
        assert!(Track::mono(48000, vec![1.]).to_iq().is_err());
    }
}
