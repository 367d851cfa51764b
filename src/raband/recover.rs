use super::{
    signal::{dot_product, moving_sum},
    BasebandError, CodecConfig, ReceivedSignal,
};
use bitvec::prelude::*;

/// Receiver-side estimate of a symbol as its average projection on the cosine and sine
/// references over one pulse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecoveredSymbol([f32; 2]);

impl RecoveredSymbol {
    pub fn new(cos: f32, sin: f32) -> Self {
        Self([cos, sin])
    }

    pub fn cos(&self) -> f32 {
        self.0[0]
    }

    pub fn sin(&self) -> f32 {
        self.0[1]
    }

    pub fn project(&self, other: &RecoveredSymbol) -> f32 {
        dot_product(&self.0, &other.0)
    }
}

/// Per-sample averages of `cos(phase)` and `sin(phase)` over the last `pulse_len` samples.
pub struct SymbolProjections {
    cos: Box<[f32]>,
    sin: Box<[f32]>,
}

impl SymbolProjections {
    pub fn new(phase: &[f32], pulse_len: usize) -> Self {
        let scale = 1. / pulse_len as f32;
        let average = |source: Vec<f32>| {
            moving_sum(&source, pulse_len)
                .iter()
                .map(|item| item * scale)
                .collect::<Box<[f32]>>()
        };

        Self {
            cos: average(phase.iter().map(|item| item.cos()).collect()),
            sin: average(phase.iter().map(|item| item.sin()).collect()),
        }
    }

    pub fn len(&self) -> usize {
        self.cos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cos.is_empty()
    }

    pub fn at(&self, index: usize) -> Option<RecoveredSymbol> {
        Some(RecoveredSymbol::new(
            *self.cos.get(index)?,
            *self.sin.get(index)?,
        ))
    }
}

/// Recovers the payload bits following the preamble boundary at `offset`.
///
/// The pulse ending one symbol before `offset` is the reference for bit 1. Every later pulse
/// is projected onto it: a positive projection decodes to 1, anything else to 0. Pulses that end
/// on an undetected sample lie outside the transmission and are skipped.
pub fn recover(
    received: &ReceivedSignal,
    mask: &BitSlice,
    config: &CodecConfig,
    offset: usize,
) -> Result<BitVec, BasebandError> {
    let pulse_len = config.pulse_len();
    if mask.len() != received.len() {
        return Err(BasebandError::InvalidInput(format!(
            "received signal has {} samples but the detection mask has {}",
            received.len(),
            mask.len()
        )));
    }

    let projections = SymbolProjections::new(received.phase(), pulse_len);
    let out_of_range = BasebandError::SyncOutOfRange { offset, pulse_len };
    let one = offset
        .checked_sub(pulse_len)
        .and_then(|index| projections.at(index))
        .ok_or_else(|| out_of_range.clone())?;
    let zero = projections.at(offset).ok_or(out_of_range)?;

    // Only the reference for 1 drives the decision; the reference for 0 is checked for sanity.
    let separation = one.project(&zero);
    if separation >= 0. {
        log::warn!(
            "Reference symbols are not antipodal ({:.3}), the preamble may be misaligned",
            separation
        );
    }
    log::debug!("Reference symbol for 1: ({:.3}, {:.3})", one.cos(), one.sin());

    let bits = (offset + pulse_len..projections.len())
        .step_by(pulse_len)
        .filter(|&index| mask[index])
        .filter_map(|index| projections.at(index))
        .map(|symbol| one.project(&symbol) > 0.)
        .collect::<BitVec>();

    Ok(bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn config() -> CodecConfig {
        CodecConfig::new(0.004, 1000.).unwrap()
    }

    fn phases(symbols: &[f32]) -> Vec<f32> {
        symbols
            .iter()
            .flat_map(|item| std::iter::repeat(*item).take(4))
            .collect()
    }

    #[test]
    fn test_projections() {
        let projections = SymbolProjections::new(&phases(&[0., FRAC_PI_2]), 4);
        assert_eq!(projections.len(), 8);
        let first = projections.at(3).unwrap();
        assert!((first.cos() - 1.).abs() < 1e-6 && first.sin().abs() < 1e-6);
        let second = projections.at(7).unwrap();
        assert!(second.cos().abs() < 1e-6 && (second.sin() - 1.).abs() < 1e-6);
        let partial = projections.at(1).unwrap();
        assert!((partial.cos() - 0.5).abs() < 1e-6);
        assert!(projections.at(8).is_none());
    }

    #[test]
    fn test_recover() {
        // Preamble 1, 0 then payload 1, 1, 0, 1 with a 40 degree rotation.
        let rotation = 40f32.to_radians();
        let one = -FRAC_PI_2 + rotation;
        let zero = FRAC_PI_2 + rotation;
        let phase = phases(&[one, zero, one, one, zero, one]);
        let received = ReceivedSignal::new(vec![1.; phase.len()], phase).unwrap();
        let mask = bitvec![1; received.len()];

        let bits = recover(&received, &mask, &config(), 7).unwrap();
        assert_eq!(bits, bitvec![1, 1, 0, 1]);
    }

    #[test]
    fn test_recover_skips_undetected() {
        let one = -FRAC_PI_2;
        let zero = FRAC_PI_2;
        let phase = phases(&[one, zero, zero, one, one, zero]);
        let received = ReceivedSignal::new(vec![1.; phase.len()], phase).unwrap();
        let mut mask = bitvec![1; received.len()];
        mask.set(15, false);

        let bits = recover(&received, &mask, &config(), 7).unwrap();
        assert_eq!(bits, bitvec![0, 1, 0]);
    }

    #[test]
    fn test_recover_out_of_range() {
        let phase = phases(&[0., 0.]);
        let received = ReceivedSignal::new(vec![1.; 8], phase).unwrap();
        let mask = bitvec![1; 8];
        assert_eq!(
            recover(&received, &mask, &config(), 2),
            Err(BasebandError::SyncOutOfRange {
                offset: 2,
                pulse_len: 4
            })
        );
        assert!(recover(&received, &mask, &config(), 8).is_err());
    }
}
