use std::f64::consts::PI;

const EPSILON: f64 = 1e-14;
const TINY: f64 = 1e-300;

/// Chi-squared distribution with `freedom` degrees of freedom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChiSquared {
    freedom: f64,
}

impl ChiSquared {
    pub fn new(freedom: usize) -> Self {
        Self {
            freedom: freedom.max(1) as f64,
        }
    }

    pub fn cdf(&self, x: f64) -> f64 {
        if x.is_nan() {
            f64::NAN
        } else if x <= 0. {
            0.
        } else if x.is_infinite() {
            1.
        } else {
            regularized_gamma(self.freedom / 2., x / 2.)
        }
    }

    /// Smallest `x` with `cdf(x) >= p`, found by bisection.
    pub fn quantile(&self, p: f64) -> f64 {
        if p <= 0. {
            return 0.;
        }
        if p >= 1. {
            return f64::INFINITY;
        }

        let (mut lo, mut hi) = (0., self.freedom);
        while self.cdf(hi) < p {
            (lo, hi) = (hi, hi * 2.);
        }
        for _ in 0..200 {
            let mid = 0.5 * (lo + hi);
            if self.cdf(mid) < p {
                lo = mid;
            } else {
                hi = mid;
            }
            if hi - lo <= EPSILON * hi {
                break;
            }
        }
        hi
    }
}

/// Regularized lower incomplete gamma function P(a, x).
pub fn regularized_gamma(a: f64, x: f64) -> f64 {
    if x <= 0. {
        return 0.;
    }
    // Both expansions need on the order of sqrt(a) terms near x = a.
    let max_iter = 200 + 20 * a.sqrt() as usize;
    let log_prefix = a * x.ln() - x - ln_gamma(a);
    if x < a + 1. {
        let (mut ap, mut del) = (a, 1. / a);
        let mut sum = del;
        for _ in 0..max_iter {
            ap += 1.;
            del *= x / ap;
            sum += del;
            if del.abs() < sum.abs() * EPSILON {
                break;
            }
        }
        (sum.ln() + log_prefix).exp().min(1.)
    } else {
        // Modified Lentz evaluation of the continued fraction for Q(a, x).
        let mut b = x + 1. - a;
        let mut c = 1. / TINY;
        let mut d = 1. / b;
        let mut h = d;
        for i in 1..=max_iter {
            let an = -(i as f64) * (i as f64 - a);
            b += 2.;
            d = an * d + b;
            if d.abs() < TINY {
                d = TINY;
            }
            c = b + an / c;
            if c.abs() < TINY {
                c = TINY;
            }
            d = 1. / d;
            let del = d * c;
            h *= del;
            if (del - 1.).abs() < EPSILON {
                break;
            }
        }
        (1. - (h.ln() + log_prefix).exp()).max(0.)
    }
}

/// Lanczos approximation (g = 7, n = 9) of ln Γ(x).
pub fn ln_gamma(x: f64) -> f64 {
    if x < 0.5 {
        // Reflection formula: Γ(x) = π / (sin(πx) · Γ(1-x))
        (PI / (PI * x).sin()).ln() - ln_gamma(1. - x)
    } else {
        let coefficients: [f64; 9] = [
            0.999_999_999_999_809_93,
            676.520_368_121_885_1,
            -1_259.139_216_722_402_8,
            771.323_428_777_653_13,
            -176.615_029_162_140_59,
            12.507_343_278_686_905,
            -0.138_571_095_265_720_12,
            9.984_369_578_019_571_6e-6,
            1.505_632_735_149_311_6e-7,
        ];
        let g = 7.;
        let z = x - 1.;
        let ag = coefficients
            .iter()
            .enumerate()
            .skip(1)
            .fold(coefficients[0], |acc, (i, c)| acc + c / (z + i as f64));
        let t = z + g + 0.5;
        0.5 * (2. * PI).ln() + (z + 0.5) * t.ln() - t + ag.ln()
    }
}
