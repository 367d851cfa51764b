use super::{
    builtin::{PREAMBLE, SYMBOL_ONE, SYMBOL_ZERO},
    signal::moving_sum,
    CodecConfig,
};
use bitvec::slice::BitSlice;

pub fn symbol(bit: bool) -> f32 {
    if bit {
        SYMBOL_ONE
    } else {
        SYMBOL_ZERO
    }
}

/// Encodes `bits` behind the preamble into a pulse train of
/// `(PREAMBLE.len() + bits.len()) * pulse_len` samples.
pub fn encode(bits: &BitSlice, config: &CodecConfig) -> Vec<f32> {
    let pulse_len = config.pulse_len();
    let symbols = PREAMBLE
        .iter()
        .copied()
        .chain(bits.iter().by_vals())
        .map(symbol)
        .collect::<Vec<_>>();

    let mut impulses = vec![0f32; symbols.len() * pulse_len];
    for (i, item) in symbols.iter().enumerate() {
        impulses[i * pulse_len] = *item;
    }

    moving_sum(&impulses, pulse_len).into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raband::encode::encode_string;
    use bitvec::prelude::*;

    #[test]
    fn test_encode_len() {
        let config = CodecConfig::new(0.0125, 8000.).unwrap();
        for len in [0, 1, 7, 64] {
            let bits = bitvec![1; len];
            assert_eq!(encode(&bits, &config).len(), (len + 2) * 100);
        }
    }

    #[test]
    fn test_encode_string_waveform() {
        let config = CodecConfig::new(0.01, 1000.).unwrap();
        let bits = encode_string("Hi").unwrap();
        let waveform = encode(&bits, &config);
        assert_eq!(waveform.len(), 180);

        let expected = [true, false]
            .into_iter()
            .chain(bits.iter().by_vals())
            .flat_map(|bit| std::iter::repeat(symbol(bit)).take(10))
            .collect::<Vec<_>>();
        assert_eq!(waveform, expected);
    }

    #[test]
    fn test_encode_single_sample_pulse() {
        let config = CodecConfig::new(1e-3, 1000.).unwrap();
        let waveform = encode(bits![0, 1, 1], &config);
        assert_eq!(waveform, vec![1., -1., -1., 1., 1.]);
    }
}
