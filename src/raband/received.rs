use super::BasebandError;
use num::complex::Complex32;

/// Magnitude and phase of an I/Q-demodulated recording. Phase lies in (-π, π].
#[derive(Debug, Clone, PartialEq)]
pub struct ReceivedSignal {
    magnitude: Vec<f32>,
    phase: Vec<f32>,
}

impl ReceivedSignal {
    pub fn new(magnitude: Vec<f32>, phase: Vec<f32>) -> Result<Self, BasebandError> {
        if magnitude.len() != phase.len() {
            return Err(BasebandError::InvalidInput(format!(
                "magnitude has {} samples but phase has {}",
                magnitude.len(),
                phase.len()
            )));
        }
        Ok(Self { magnitude, phase })
    }

    pub fn from_iq(samples: &[Complex32]) -> Self {
        let (magnitude, phase) = samples
            .iter()
            .map(|item| (item.norm(), item.arg()))
            .unzip();
        Self { magnitude, phase }
    }

    /// The baseband waveform as it leaves an ideal coherent demodulator for a sine carrier:
    /// the in-phase branch is empty and the quadrature branch carries `-x / 2`.
    pub fn from_baseband(samples: &[f32]) -> Self {
        let iq = samples
            .iter()
            .map(|item| Complex32::new(0., -item / 2.))
            .collect::<Vec<_>>();
        Self::from_iq(&iq)
    }

    pub fn magnitude(&self) -> &[f32] {
        &self.magnitude
    }

    pub fn phase(&self) -> &[f32] {
        &self.phase
    }

    pub fn len(&self) -> usize {
        self.magnitude.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitude.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_new_mismatch() {
        assert!(ReceivedSignal::new(vec![1.; 3], vec![0.; 3]).is_ok());
        assert!(matches!(
            ReceivedSignal::new(vec![1.; 3], vec![0.; 2]),
            Err(BasebandError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_from_baseband() {
        let received = ReceivedSignal::from_baseband(&[1., -1., 2.]);
        assert_eq!(received.len(), 3);
        assert_eq!(received.magnitude(), &[0.5, 0.5, 1.]);
        for (phase, expected) in received
            .phase()
            .iter()
            .zip([-FRAC_PI_2, FRAC_PI_2, -FRAC_PI_2])
        {
            assert!((phase - expected).abs() < 1e-6);
        }
    }
}
