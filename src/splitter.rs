//! The recursive statistical splitter — the core of this crate.
//!
//! Given a signal range, finds interior breakpoints such that each resulting
//! segment is well-explained by a constant-mean ("stepwise") or
//! linear-trend-plus-noise ("slanted") Gaussian model, splits only when they
//! reduce the summed (optionally log-)variance by more than a configured
//! gain, and every segment's length lies in `[min_width, max_width]` except
//! possibly the first/last.

use crate::error::ConfigError;
use crate::moments::Moments;
use crate::parser::Parse;
use crate::segment::Segment;

/// The two segment models the splitter chooses between.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitterKind {
    /// Constant mean per segment.
    Stepwise,
    /// Linear trend plus Gaussian residual per segment.
    Slanted,
}

/// Configuration for [`StatSplitter`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplitterConfig {
    pub min_width: usize,
    pub max_width: usize,
    pub window_width: usize,
    pub min_gain_per_sample: f64,
    pub use_log: bool,
    pub kind: SplitterKind,
}

impl Default for SplitterConfig {
    fn default() -> SplitterConfig {
        SplitterConfig {
            min_width: 1000,
            max_width: 1_000_000,
            window_width: 10_000,
            min_gain_per_sample: 0.03,
            use_log: true,
            kind: SplitterKind::Stepwise,
        }
    }
}

impl SplitterConfig {
    /// Checks that the width parameters are internally consistent
    /// (`min_width >= 1`, `window_width >= 2 * min_width`,
    /// `max_width >= min_width`).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_width < 1 {
            return Err(ConfigError::MinWidthZero);
        }
        if self.window_width < 2 * self.min_width {
            return Err(ConfigError::WindowTooSmall {
                window_width: self.window_width,
                min_width: self.min_width,
            });
        }
        if self.max_width < self.min_width {
            return Err(ConfigError::MaxWidthTooSmall {
                max_width: self.max_width,
                min_width: self.min_width,
            });
        }
        Ok(())
    }
}

/// A non-positive variance/residual maps to this cost rather than `-inf`,
/// so the "split worse than whole" comparison reliably rejects it without
/// propagating a NaN.
const REJECT_COST: f64 = -1e300;

fn cost(variance: f64, use_log: bool) -> f64 {
    if use_log {
        if variance <= 0.0 {
            REJECT_COST
        } else {
            variance.ln()
        }
    } else {
        variance
    }
}

/// The stepwise/slanted recursive statistical splitter.
pub struct StatSplitter {
    config: SplitterConfig,
}

impl StatSplitter {
    /// Builds a splitter, validating the configuration up front.
    pub fn new(config: SplitterConfig) -> Result<StatSplitter, ConfigError> {
        config.validate()?;
        Ok(StatSplitter { config })
    }

    /// Segments the whole signal.
    pub fn parse(&self, signal: &[f64]) -> Vec<Segment> {
        self.parse_range(signal, 0, signal.len() as isize)
    }

    /// Segments `signal[start..end]`. Negative indices count from the end
    /// (matching slice-style negative indexing); out-of-range indices are
    /// clipped into `[0, signal.len()]`.
    pub fn parse_range(&self, signal: &[f64], start: isize, end: isize) -> Vec<Segment> {
        let n = signal.len() as isize;
        let clip = |v: isize| -> usize {
            let v = if v < 0 { v + n } else { v };
            v.clamp(0, n) as usize
        };
        let start = clip(start);
        let end = clip(end);
        if start >= end {
            return Vec::new();
        }

        let moments = match self.config.kind {
            SplitterKind::Stepwise => Moments::new(signal),
            SplitterKind::Slanted => Moments::with_trend(signal),
        };

        let breaks = self.segment_cumulative(&moments, start, end);

        let mut bounds = Vec::with_capacity(breaks.len() + 2);
        bounds.push(start);
        bounds.extend(breaks);
        bounds.push(end);

        bounds
            .windows(2)
            .map(|w| Segment::new(&signal[w[0]..w[1]], w[0]))
            .collect()
    }

    /// The best split point in `[a, b)`, dispatching on `self.config.kind`.
    fn best_split(&self, moments: &Moments, a: usize, b: usize) -> Option<(usize, f64)> {
        match self.config.kind {
            SplitterKind::Stepwise => self.best_split_with(moments, a, b, |m, x, y| m.var(x, y)),
            SplitterKind::Slanted => {
                self.best_split_with(moments, a, b, |m, x, y| m.lr(x, y).var_resid)
            }
        }
    }

    fn best_split_with<F>(&self, moments: &Moments, a: usize, b: usize, variance: F) -> Option<(usize, f64)>
    where
        F: Fn(&Moments, usize, usize) -> f64,
    {
        let min_width = self.config.min_width;
        if b - a < 2 * min_width {
            return None;
        }

        let use_log = self.config.use_log;
        let min_gain = self.config.min_gain_per_sample * self.config.window_width as f64;
        let cost_whole = (b - a) as f64 * cost(variance(moments, a, b), use_log);

        let mut best_gain = min_gain;
        let mut best_x = None;
        for x in (a + min_width)..=(b - min_width) {
            let gain = cost_whole
                - (x - a) as f64 * cost(variance(moments, a, x), use_log)
                - (b - x) as f64 * cost(variance(moments, x, b), use_log);
            if gain > best_gain {
                best_gain = gain;
                best_x = Some(x);
            }
        }

        best_x.map(|x| (x, best_gain))
    }

    /// Windowed recursion over `[start, end)`. The in-window forced split
    /// (cursor outruns `start + max_width` before any window yields a real
    /// split) recurses only on the suffix, leaving the scanned prefix as a
    /// terminal leaf; every other path — a real split, or the post-scan
    /// forced split — recurses on both sides.
    fn segment_cumulative(&self, moments: &Moments, start: usize, end: usize) -> Vec<usize> {
        let min_width = self.config.min_width;
        let max_width = self.config.max_width;
        let window_width = self.config.window_width;
        let stride = (window_width / 2).max(1);

        let mut split_pair: Option<(usize, f64)> = None;
        let mut cursor = start;
        while cursor < end.saturating_sub(2 * min_width) {
            if cursor > start + max_width {
                let split_at = (start + max_width).min(end - min_width);
                let mut out = vec![split_at];
                out.extend(self.segment_cumulative(moments, split_at, end));
                return out;
            }

            let window_end = end.min(cursor + window_width);
            split_pair = self.best_split(moments, cursor, window_end);
            if split_pair.is_some() {
                break;
            }
            cursor += stride;
        }

        let split_at = match split_pair {
            Some((x, _gain)) => x,
            None => {
                if end - start <= max_width {
                    return Vec::new();
                }
                (start + max_width).min(end - min_width)
            }
        };

        let mut breaks = self.segment_cumulative(moments, start, split_at);
        breaks.push(split_at);
        breaks.extend(self.segment_cumulative(moments, split_at, end));
        breaks
    }
}

impl Parse for StatSplitter {
    fn parse(&self, signal: &[f64]) -> Vec<Segment> {
        StatSplitter::parse(self, signal)
    }
}
