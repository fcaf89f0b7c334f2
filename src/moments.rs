//! O(1) segment statistics backed by prefix sums.
//!
//! Built once per [`crate::splitter::StatSplitter::parse`] call and dropped
//! at the end of it.

/// A straight-line fit `current[t] ≈ alpha + beta * t` over some `[a, b)`,
/// plus the mean-square residual of that fit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearFit {
    pub alpha: f64,
    pub beta: f64,
    pub var_resid: f64,
}

/// Prefix-sum tables over a signal, giving O(1) mean/variance/regression
/// queries for any `[a, b)` range.
///
/// `cum[i]`, `cum2[i]` and (optionally) `cum_ct[i]` all sum over `k < i`, so
/// `cum.len() == signal.len() + 1` and a sum over `[a, b)` is always
/// `cum[b] - cum[a]` with no special-casing of `a == 0`.
///
/// Numeric cancellation in `cum_ct` requires double precision; this type is
/// `f64`-only for that reason (see DESIGN.md's Open Question resolution).
pub struct Moments {
    cum: Vec<f64>,
    cum2: Vec<f64>,
    cum_ct: Option<Vec<f64>>,
}

impl Moments {
    /// Builds the `cum`/`cum2` tables only (enough for the stepwise
    /// splitter and for plain mean/variance queries).
    ///
    /// - Time: `O(length)`
    pub fn new(signal: &[f64]) -> Moments {
        let mut cum = Vec::with_capacity(signal.len() + 1);
        let mut cum2 = Vec::with_capacity(signal.len() + 1);
        cum.push(0.0);
        cum2.push(0.0);
        for &x in signal {
            cum.push(cum.last().unwrap() + x);
            cum2.push(cum2.last().unwrap() + x * x);
        }
        Moments {
            cum,
            cum2,
            cum_ct: None,
        }
    }

    /// Builds `cum`/`cum2`/`cum_ct`, as needed by the slanted splitter's
    /// linear regression.
    ///
    /// - Time: `O(length)`
    pub fn with_trend(signal: &[f64]) -> Moments {
        let mut moments = Moments::new(signal);
        let mut cum_ct = Vec::with_capacity(signal.len() + 1);
        cum_ct.push(0.0);
        for (t, &x) in signal.iter().enumerate() {
            cum_ct.push(cum_ct.last().unwrap() + (t as f64) * x);
        }
        moments.cum_ct = Some(cum_ct);
        moments
    }

    /// Mean of `signal[a..b]`.
    ///
    /// - Time: `O(1)`
    pub fn mean(&self, a: usize, b: usize) -> f64 {
        if a >= b {
            return 0.0;
        }
        (self.cum[b] - self.cum[a]) / (b - a) as f64
    }

    /// Mean of `signal[a..b].powi(2)`.
    ///
    /// - Time: `O(1)`
    pub fn mean2(&self, a: usize, b: usize) -> f64 {
        if a >= b {
            return 0.0;
        }
        (self.cum2[b] - self.cum2[a]) / (b - a) as f64
    }

    /// Variance of `signal[a..b]`, floored at 0 to guard against tiny
    /// negative values from floating-point cancellation.
    ///
    /// - Time: `O(1)`
    pub fn var(&self, a: usize, b: usize) -> f64 {
        let mean = self.mean(a, b);
        (self.mean2(a, b) - mean * mean).max(0.0)
    }

    /// Mean of `t * signal[t]` over `t in [a, b)`.
    ///
    /// # Panics
    ///
    /// Panics if this `Moments` was built with [`Moments::new`] rather than
    /// [`Moments::with_trend`].
    ///
    /// - Time: `O(1)`
    pub fn mean_ct(&self, a: usize, b: usize) -> f64 {
        if a >= b {
            return 0.0;
        }
        let cum_ct = self.cum_ct.as_ref().expect("Moments built without trend table");
        (cum_ct[b] - cum_ct[a]) / (b - a) as f64
    }

    /// Mean of the index `t` itself, over `t in [a, b)`.
    ///
    /// - Time: `O(1)`
    pub fn mean_t(&self, a: usize, b: usize) -> f64 {
        a as f64 + (b as f64 - a as f64 - 1.0) / 2.0
    }

    /// Mean of `t * t`, over `t in [a, b)`.
    ///
    /// - Time: `O(1)`
    pub fn mean_t2(&self, a: usize, b: usize) -> f64 {
        let (a, b) = (a as f64, b as f64);
        (2.0 * b * b + b * (2.0 * a - 3.0) + 2.0 * a * a - 3.0 * a + 1.0) / 6.0
    }

    /// Ordinary-least-squares fit of `signal[t] ≈ alpha + beta * t` over
    /// `t in [a, b)`, plus the mean-square residual of that fit.
    ///
    /// - Time: `O(1)`
    pub fn lr(&self, a: usize, b: usize) -> LinearFit {
        let y_bar = self.mean(a, b);
        let y2_bar = self.mean2(a, b);
        let x_bar = self.mean_t(a, b);
        let x2_bar = self.mean_t2(a, b);
        let xy_bar = self.mean_ct(a, b);

        let beta = (xy_bar - x_bar * y_bar) / (x2_bar - x_bar * x_bar);
        let alpha = y_bar - beta * x_bar;
        let var_resid = y2_bar - 2.0 * alpha * y_bar - 2.0 * beta * xy_bar
            + alpha * alpha
            + 2.0 * alpha * beta * x_bar
            + beta * beta * x2_bar;

        LinearFit {
            alpha,
            beta,
            var_resid: var_resid.max(0.0),
        }
    }
}
