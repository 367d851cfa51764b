use super::{
    builtin::DETECTION_CONFIDENCE,
    signal::{moving_sum, variance},
    stats::ChiSquared,
    CodecConfig,
};
use bitvec::prelude::*;

/// Flags every sample whose windowed energy rejects the noise-only hypothesis.
///
/// The energy of the last `pulse_len` samples, normalized by the variance of the whole
/// recording, is approximately chi-squared with `2 * pulse_len` degrees of freedom when only
/// noise is present. A sample is flagged when the statistic exceeds the `DETECTION_CONFIDENCE`
/// quantile, which is the same as its cdf exceeding `DETECTION_CONFIDENCE`.
pub fn detect(magnitude: &[f32], config: &CodecConfig) -> BitVec {
    let pulse_len = config.pulse_len();
    let power = magnitude.iter().map(|item| item * item).collect::<Vec<_>>();
    let energy = moving_sum(&power, pulse_len);
    let var = variance(magnitude) as f64;
    let threshold = ChiSquared::new(2 * pulse_len).quantile(DETECTION_CONFIDENCE);

    // A flat recording has zero variance: positive energy divides to +inf and is flagged,
    // zero energy divides to NaN and is not.
    let mask = energy
        .iter()
        .map(|item| *item as f64 / var > threshold)
        .collect::<BitVec>();

    match mask.first_one() {
        Some(first) => log::debug!(
            "Transmission detected from sample {} ({} of {} samples flagged)",
            first,
            mask.count_ones(),
            mask.len()
        ),
        None => log::debug!("No transmission detected in {} samples", mask.len()),
    }

    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raband::{encode, encode::encode_string, ReceivedSignal};
    use rand::{rngs::SmallRng, SeedableRng};
    use rand_distr::{Distribution, Normal};

    #[test]
    fn test_detect_len() {
        let config = CodecConfig::new(0.01, 1000.).unwrap();
        for len in [0, 5, 10, 333] {
            assert_eq!(detect(&vec![0.3; len], &config).len(), len);
        }
    }

    #[test]
    fn test_detect_flat() {
        let config = CodecConfig::new(0.01, 1000.).unwrap();
        assert!(detect(&[0.5; 50], &config).all());
        assert!(detect(&[0.; 50], &config).not_any());
    }

    #[test]
    fn test_detect_transmission() {
        let config = CodecConfig::new(0.01, 1000.).unwrap();
        let bits = encode_string("Hi").unwrap();
        let mut waveform = vec![0f32; 200];
        waveform.extend(encode(&bits, &config));
        waveform.extend(vec![0f32; 200]);
        let received = ReceivedSignal::from_baseband(&waveform);

        let mask = detect(received.magnitude(), &config);
        assert_eq!(mask.len(), waveform.len());
        assert!(mask[..200].not_any());
        // Once a whole pulse is inside the window the transmission is flagged.
        assert!(mask[209..380].all());
        assert!(mask[389..].not_any());
    }

    #[test]
    fn test_detect_degrades_with_noise() {
        let config = CodecConfig::new(0.01, 1000.).unwrap();
        let mut clean = vec![0f32; 200];
        clean.extend(vec![1f32; 200]);
        clean.extend(vec![0f32; 200]);

        let mut rng = SmallRng::seed_from_u64(42);
        let fractions = [0.1f32, 0.4, 0.8]
            .iter()
            .map(|sigma| {
                let noise = Normal::new(0., *sigma).unwrap();
                let flagged = (0..20)
                    .map(|_| {
                        let noisy = clean
                            .iter()
                            .map(|item| item + noise.sample(&mut rng))
                            .collect::<Vec<_>>();
                        detect(&noisy, &config).count_ones()
                    })
                    .sum::<usize>();
                flagged as f32 / (20 * clean.len()) as f32
            })
            .collect::<Vec<_>>();

        assert!(fractions.windows(2).all(|pair| pair[0] >= pair[1]));
        assert!(fractions[0] > fractions[2]);
    }
}
