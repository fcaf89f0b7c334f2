//! Removes boundaries between statistically indistinguishable neighbors.
//!
//! Used by the peak-to-peak and dual-threshold parsers to prune candidate
//! boundaries that don't separate genuinely different states.

fn mean(slice: &[f64]) -> f64 {
    if slice.is_empty() {
        return 0.0;
    }
    slice.iter().sum::<f64>() / slice.len() as f64
}

fn std(slice: &[f64]) -> f64 {
    if slice.is_empty() {
        return 0.0;
    }
    let m = mean(slice);
    (slice.iter().map(|&x| (x - m).powi(2)).sum::<f64>() / slice.len() as f64)
        .max(0.0)
        .sqrt()
}

/// Merges adjacent regions of a tic-delimited signal that fail a
/// statistical-distinctness test.
pub struct Merger {
    threshold: f64,
}

impl Merger {
    pub fn new(threshold: f64) -> Merger {
        Merger { threshold }
    }

    /// Scans interior tic triples and marks boundary *indices* (not tic
    /// values) for deletion, then compacts the tic array once.
    ///
    /// `tics` is interpreted as alternating "off"/"on" region boundaries;
    /// `signal` is the underlying sample array those tics index into.
    ///
    /// - Time: `O(length of tics)`
    pub fn merge(&self, tics: &[usize], signal: &[f64]) -> Vec<usize> {
        let m = tics.len();
        let mut doomed = vec![false; m];

        if m >= 7 {
            let mut i = 3;
            while i <= m - 4 {
                let prev = &signal[tics[i - 2]..tics[i - 1]];
                let curr = &signal[tics[i]..tics[i + 1]];
                let next = &signal[tics[i + 2]..tics[i + 3]];

                let u = (mean(prev) - mean(curr)).abs() / (std(prev) * std(curr)).sqrt();
                let v = (mean(next) - mean(curr)).abs() / (std(next) * std(curr)).sqrt();

                if v <= self.threshold {
                    doomed[i + 1] = true;
                    doomed[i + 2] = true;
                }
                if u <= self.threshold {
                    doomed[i - 1] = true;
                    doomed[i] = true;
                }

                i += 2;
            }
        }

        tics
            .iter()
            .zip(doomed.iter())
            .filter(|(_, &dead)| !dead)
            .map(|(&t, _)| t)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_identical_neighboring_regions() {
        // Odd-indexed regions [100,200), [300,400), [500,600) are all 0.0;
        // even-indexed regions are 1.0, distinguishable from 0.0.
        let mut signal = vec![1.0; 700];
        for &(s, e) in &[(100, 200), (300, 400), (500, 600)] {
            for x in signal.iter_mut().take(e).skip(s) {
                *x = 0.0;
            }
        }
        let tics = vec![0, 100, 200, 300, 400, 500, 600];
        let merged = Merger::new(10.0).merge(&tics, &signal);

        // Interior boundaries separating identical regions collapse away.
        assert!(merged.len() < tics.len());
        assert_eq!(merged.first(), Some(&0));
        assert_eq!(merged.last(), Some(&600));
    }

    #[test]
    fn never_invents_new_tics() {
        let signal: Vec<f64> = (0..1000).map(|i| (i as f64 * 0.01).sin()).collect();
        let tics = vec![0, 100, 200, 300, 400, 500, 600, 700, 800, 900, 1000];
        let merged = Merger::new(1.5).merge(&tics, &signal);
        for t in &merged {
            assert!(tics.contains(t));
        }
    }

    #[test]
    fn short_tic_arrays_pass_through_unchanged() {
        let signal = vec![0.0; 10];
        let tics = vec![0, 5, 10];
        let merged = Merger::new(1.0).merge(&tics, &signal);
        assert_eq!(merged, tics);
    }
}
