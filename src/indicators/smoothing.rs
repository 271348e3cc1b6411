// =============================================================================
// Smoothing Recurrence — shared seed + step kernel
// =============================================================================
//
// Every indicator in this crate is a seeded recurrence:
//
//   out_seed = SMA of the first `period` defined values
//   out_t    = step(out_{t-1}, x_t)
//
// Two step rules are in use:
//   Exponential:  x * k + prev * (1 - k)         k = 2 / (period + 1)
//   Wilder:       (prev * (period - 1) + x) / period
//
// Missing observations (any non-finite value) are gaps:
//   - the output at a gap is NaN;
//   - before the seed is complete a gap restarts the seed window;
//   - after seeding a gap leaves the smoothed state untouched and the
//     recurrence resumes from it at the next defined value.
//
// A seed or step that overflows to a non-finite result is treated the same
// way as a gap at that index.
// =============================================================================

/// Step rule applied after the seed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Smoothing {
    /// Classic EMA weighting, factor `2 / (period + 1)`.
    Exponential,
    /// Wilder's running average, factor `1 / period`.
    Wilder,
}

impl Default for Smoothing {
    fn default() -> Self {
        Self::Exponential
    }
}

impl std::fmt::Display for Smoothing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exponential => write!(f, "Exponential"),
            Self::Wilder => write!(f, "Wilder"),
        }
    }
}

impl Smoothing {
    /// Advance the recurrence by one defined observation.
    pub fn step(self, prev: f64, value: f64, period: usize) -> f64 {
        let period_f = period as f64;
        match self {
            Self::Exponential => {
                let k = 2.0 / (period_f + 1.0);
                value * k + prev * (1.0 - k)
            }
            Self::Wilder => (prev * (period_f - 1.0) + value) / period_f,
        }
    }
}

/// Per-call recurrence state: O(1) regardless of the series length.
///
/// Callers must guarantee `period >= 1`; the public indicator functions
/// reject `period == 0` before constructing one.
#[derive(Debug, Clone)]
pub(crate) struct Recurrence {
    period: usize,
    smoothing: Smoothing,
    window_sum: f64,
    window_len: usize,
    value: Option<f64>,
}

impl Recurrence {
    pub(crate) fn new(period: usize, smoothing: Smoothing) -> Self {
        Self {
            period,
            smoothing,
            window_sum: 0.0,
            window_len: 0,
            value: None,
        }
    }

    /// Feed the next observation and return the output at this index
    /// (NaN during warm-up and at gaps).
    pub(crate) fn push(&mut self, x: f64) -> f64 {
        if !x.is_finite() {
            if self.value.is_none() {
                self.window_sum = 0.0;
                self.window_len = 0;
            }
            return f64::NAN;
        }

        match self.value {
            Some(prev) => {
                let next = self.smoothing.step(prev, x, self.period);
                if !next.is_finite() {
                    return f64::NAN;
                }
                self.value = Some(next);
                next
            }
            None => {
                self.window_sum += x;
                self.window_len += 1;
                if self.window_len < self.period {
                    return f64::NAN;
                }
                let seed = self.window_sum / self.period as f64;
                if !seed.is_finite() {
                    self.window_sum = 0.0;
                    self.window_len = 0;
                    return f64::NAN;
                }
                self.value = Some(seed);
                seed
            }
        }
    }
}

/// Run a fresh recurrence over `values`, producing one output per input.
pub(crate) fn smooth(values: &[f64], period: usize, smoothing: Smoothing) -> Vec<f64> {
    let mut rec = Recurrence::new(period, smoothing);
    values.iter().map(|&x| rec.push(x)).collect()
}
