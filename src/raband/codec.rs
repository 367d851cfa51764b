use super::{detect, encode, locate, recover, BasebandError, ReceivedSignal};
use bitvec::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CodecConfig {
    pub symbol_duration: f64,
    pub sample_rate: f64,
    pulse_len: usize,
}

impl CodecConfig {
    pub fn new(symbol_duration: f64, sample_rate: f64) -> Result<Self, BasebandError> {
        let width = symbol_duration * sample_rate;
        if !width.is_finite() || width < 1. {
            return Err(BasebandError::InvalidInput(format!(
                "pulses of {symbol_duration} s at {sample_rate} Hz are narrower than one sample"
            )));
        }

        Ok(Self {
            symbol_duration,
            sample_rate,
            pulse_len: width.floor() as usize,
        })
    }

    /// Samples per symbol.
    pub fn pulse_len(&self) -> usize {
        self.pulse_len
    }
}

pub struct BasebandCodec {
    config: CodecConfig,
}

impl BasebandCodec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn encode(&self, bits: &BitSlice) -> Vec<f32> {
        encode(bits, &self.config)
    }

    pub fn decode(&self, received: &ReceivedSignal) -> Result<BitVec, BasebandError> {
        let mask = detect(received.magnitude(), &self.config);
        let offset = locate(received.phase(), &mask, &self.config)?;
        recover(received, &mask, &self.config, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raband::encode::{decode_string, encode_string};
    use num::complex::Complex32;
    use rand::{rngs::SmallRng, Rng, SeedableRng};
    use std::f32::consts::PI;

    fn codec() -> BasebandCodec {
        BasebandCodec::new(CodecConfig::new(0.01, 1000.).unwrap())
    }

    fn rotate(samples: &[f32], angle: f32) -> ReceivedSignal {
        let iq = samples
            .iter()
            .map(|item| Complex32::new(0., -item / 2.) * Complex32::from_polar(1., angle))
            .collect::<Vec<_>>();
        ReceivedSignal::from_iq(&iq)
    }

    #[test]
    fn test_config() {
        let config = CodecConfig::new(0.01, 1000.).unwrap();
        assert_eq!(config.pulse_len(), 10);
        let config = CodecConfig::new(0.12, 35000.).unwrap();
        assert_eq!(config.pulse_len(), 4200);
        let config = CodecConfig::new(0.0015, 1000.).unwrap();
        assert_eq!(config.pulse_len(), 1);
    }

    #[test]
    fn test_config_narrow_pulse() {
        assert!(matches!(
            CodecConfig::new(0.0001, 1000.),
            Err(BasebandError::InvalidInput(_))
        ));
        assert!(CodecConfig::new(0.01, 0.).is_err());
        assert!(CodecConfig::new(-0.01, 1000.).is_err());
        assert!(CodecConfig::new(f64::NAN, 1000.).is_err());
    }

    #[test]
    fn test_roundtrip_string() {
        let codec = codec();
        let bits = encode_string("Hi").unwrap();
        assert_eq!(bits.len(), 16);

        let waveform = codec.encode(&bits);
        assert_eq!(waveform.len(), 180);

        let decoded = codec.decode(&ReceivedSignal::from_baseband(&waveform)).unwrap();
        assert_eq!(decoded, bits);
        assert_eq!(decode_string(&decoded), "Hi");
    }

    #[test]
    fn test_roundtrip_random_bits() {
        let codec = codec();
        let mut rng = SmallRng::seed_from_u64(7);
        for len in [1, 2, 3, 17, 100] {
            let bits = (0..len).map(|_| rng.gen::<bool>()).collect::<BitVec>();
            let waveform = codec.encode(&bits);
            let decoded = codec.decode(&ReceivedSignal::from_baseband(&waveform)).unwrap();
            assert_eq!(decoded, bits);
        }
    }

    #[test]
    fn test_roundtrip_with_silence() {
        let codec = codec();
        let bits = encode_string("Hello!").unwrap();
        let mut waveform = vec![0f32; 137];
        waveform.extend(codec.encode(&bits));
        waveform.extend(vec![0f32; 500]);

        let decoded = codec.decode(&ReceivedSignal::from_baseband(&waveform)).unwrap();
        assert_eq!(decode_string(&decoded), "Hello!");
    }

    #[test]
    fn test_roundtrip_rotated() {
        let codec = codec();
        let bits = encode_string("rotate").unwrap();
        let mut waveform = vec![0f32; 40];
        waveform.extend(codec.encode(&bits));
        waveform.extend(vec![0f32; 40]);

        for degrees in [-60f32, -30., 0., 30., 80.] {
            let received = rotate(&waveform, degrees * PI / 180.);
            let decoded = codec.decode(&received).unwrap();
            assert_eq!(decoded, bits, "rotation of {degrees} degrees");
        }
    }

    #[test]
    fn test_decode_silence() {
        let codec = codec();
        let received = ReceivedSignal::from_baseband(&[0f32; 200]);
        assert_eq!(codec.decode(&received), Err(BasebandError::NoDetection));
    }
}
