/// Causal moving sum over `window` samples with zero initial state, i.e. the output of a filter
/// whose impulse response is `window` ones.
pub fn moving_sum(source: &[f32], window: usize) -> Box<[f32]> {
    let mut acc = 0f64;
    source
        .iter()
        .enumerate()
        .map(|(i, item)| {
            acc += *item as f64;
            if i >= window {
                acc -= source[i - window] as f64;
            }
            acc as f32
        })
        .collect()
}

/// Population variance.
pub fn variance(source: &[f32]) -> f32 {
    if source.is_empty() {
        return 0.;
    }
    let len = source.len() as f64;
    let mean = source.iter().fold(0f64, |acc, item| acc + *item as f64) / len;
    let var = source.iter().fold(0f64, |acc, item| {
        let diff = *item as f64 - mean;
        acc + diff * diff
    }) / len;
    var as f32
}

/// Sign with `sign(0) == 0`.
pub fn sign(value: f32) -> f32 {
    if value > 0. {
        1.
    } else if value < 0. {
        -1.
    } else {
        0.
    }
}

pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).fold(0., |acc, (a, b)| acc + a * b)
}

pub trait ArgMax
where
    Self: AsRef<[f32]>,
{
    /// Index and value of the first maximum. Falls back to `(0, 0.)` when nothing is positive.
    fn argmax(&self) -> (usize, f32);
}

impl ArgMax for [f32] {
    fn argmax(&self) -> (usize, f32) {
        let (mut index, mut max) = (0, 0.);
        for (i, item) in self.iter().enumerate() {
            if *item > max {
                (index, max) = (i, *item);
            }
        }
        (index, max)
    }
}

impl ArgMax for Vec<f32> {
    fn argmax(&self) -> (usize, f32) {
        self.as_slice().argmax()
    }
}
