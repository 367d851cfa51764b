use super::{
    builtin::{PREAMBLE, UNWRAP_THRESHOLD},
    pulse::symbol,
    signal::{moving_sum, sign, ArgMax},
    BasebandError, CodecConfig,
};
use bitvec::slice::BitSlice;
use std::f32::consts::PI;

/// Phase unwrapping for binary phase keying only. Samples just below `+π` are folded to just
/// below `-π` and everything is then rotated by `UNWRAP_THRESHOLD`, so the two antipodal phases
/// keep opposite signs across the ±π wrap.
pub fn unwrap_bpsk(phase: &[f32]) -> Box<[f32]> {
    phase
        .iter()
        .map(|&item| {
            let distance = PI - item;
            let item = if distance > 0. && distance < UNWRAP_THRESHOLD {
                item - 2. * PI
            } else {
                item
            };
            item + UNWRAP_THRESHOLD
        })
        .collect()
}

// Matched filter for the preamble pulses, evaluated for the first `len` samples. The impulse
// response is the time-reversed preamble, each symbol held for `pulse_len` samples and scaled
// by 1 / (PREAMBLE.len() * pulse_len), so it reduces to shifted moving sums.
fn correlate_preamble(estimate: &[f32], pulse_len: usize, len: usize) -> Box<[f32]> {
    let sums = moving_sum(estimate, pulse_len);
    let scale = 1. / (PREAMBLE.len() * pulse_len) as f32;
    (0..len)
        .map(|n| {
            PREAMBLE
                .iter()
                .rev()
                .enumerate()
                .filter_map(|(j, &bit)| n.checked_sub(j * pulse_len).map(|k| symbol(bit) * sums[k]))
                .sum::<f32>()
                * scale
        })
        .collect()
}

/// Locates the boundary between the two preamble symbols.
///
/// The search is limited to the first detected sample plus the preamble length, so later
/// payload patterns that mimic the preamble are never considered.
pub fn locate(
    phase: &[f32],
    mask: &BitSlice,
    config: &CodecConfig,
) -> Result<usize, BasebandError> {
    if phase.len() != mask.len() {
        return Err(BasebandError::InvalidInput(format!(
            "phase has {} samples but the detection mask has {}",
            phase.len(),
            mask.len()
        )));
    }
    let first = mask.first_one().ok_or(BasebandError::NoDetection)?;

    let pulse_len = config.pulse_len();
    let estimate = unwrap_bpsk(phase)
        .iter()
        .zip(mask.iter().by_vals())
        .map(|(item, present)| if present { sign(*item) } else { 0. })
        .collect::<Vec<_>>();

    let window = (first + PREAMBLE.len() * pulse_len).min(phase.len());
    let corr = correlate_preamble(&estimate, pulse_len, window)
        .iter()
        .map(|item| item.abs())
        .collect::<Vec<_>>();
    let (offset, peak) = corr.argmax();

    log::debug!(
        "Preamble boundary at sample {} (first detection {}, correlation {:.3})",
        offset,
        first,
        peak
    );

    Ok(offset)
}
