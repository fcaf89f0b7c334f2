//! Derivative-cumsum state detector.

use crate::merger::Merger;
use crate::parser::Parse;
use crate::segment::Segment;

/// Splits a signal into states by watching where a piecewise-restarting
/// cumulative sum of the absolute derivative exceeds `threshold`, then
/// merges adjacent states that don't pass `merger_thresh`.
#[derive(Clone, Copy, Debug)]
pub struct PeakToPeakParser {
    threshold: f64,
    merger_thresh: f64,
}

impl Default for PeakToPeakParser {
    fn default() -> PeakToPeakParser {
        PeakToPeakParser::new(1.5, 2.0)
    }
}

impl PeakToPeakParser {
    pub fn new(threshold: f64, merger_thresh: f64) -> PeakToPeakParser {
        PeakToPeakParser {
            threshold,
            merger_thresh,
        }
    }

    /// - Time: `O(length)`
    pub fn parse(&self, signal: &[f64]) -> Vec<Segment> {
        if signal.len() < 2 {
            return Vec::new();
        }

        let diff: Vec<f64> = signal.windows(2).map(|w| (w[1] - w[0]).abs()).collect();

        let mut low_tics = vec![0usize];
        low_tics.extend(
            diff.iter()
                .enumerate()
                .filter(|(_, &d)| d < 1e-3)
                .map(|(i, _)| i),
        );
        low_tics.push(diff.len());

        let mut cumsum = Vec::with_capacity(diff.len());
        for w in low_tics.windows(2) {
            let (a, b) = (w[0], w[1]);
            let mut running = 0.0;
            for &d in &diff[a..b] {
                running += d;
                cumsum.push(running);
            }
        }

        let above: Vec<u8> = cumsum.iter().map(|&c| (c > self.threshold) as u8).collect();
        let split_points: Vec<usize> = above
            .windows(2)
            .enumerate()
            .filter(|(_, w)| w[0] != w[1])
            .map(|(i, _)| i + 1)
            .collect();

        let merged = Merger::new(self.merger_thresh).merge(&split_points, signal);

        if merged.len() < 3 {
            return Vec::new();
        }

        let mut segments = Vec::new();
        let mut i = 1;
        while i + 1 < merged.len() {
            let (a, b) = (merged[i], merged[i + 1]);
            segments.push(Segment::new(&signal[a..b], a));
            i += 2;
        }
        segments
    }
}

impl Parse for PeakToPeakParser {
    fn parse(&self, signal: &[f64]) -> Vec<Segment> {
        PeakToPeakParser::parse(self, signal)
    }
}
