//! Below-threshold masking plus rule-based filtering.

use std::fmt;
use std::sync::Arc;

use crate::parser::Parse;
use crate::segment::Segment;

/// A predicate over a candidate [`Segment`], kept only if every configured
/// rule returns `true`. Tagged variants keep the default rule set
/// introspectable and `Debug`-able; `Custom` is the escape hatch for
/// anything else.
#[derive(Clone)]
pub enum Rule {
    MinDuration(f64),
    MaxDuration(f64),
    MinCurrent(f64),
    MaxCurrent(f64),
    Custom(Arc<dyn Fn(&Segment) -> bool + Send + Sync>),
}

impl Rule {
    fn holds(&self, segment: &Segment) -> bool {
        match self {
            Rule::MinDuration(t) => segment.duration() > *t,
            Rule::MaxDuration(t) => segment.duration() < *t,
            Rule::MinCurrent(v) => segment.min() > *v,
            Rule::MaxCurrent(v) => segment.max() < *v,
            Rule::Custom(f) => f(segment),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::MinDuration(t) => f.debug_tuple("MinDuration").field(t).finish(),
            Rule::MaxDuration(t) => f.debug_tuple("MaxDuration").field(t).finish(),
            Rule::MinCurrent(v) => f.debug_tuple("MinCurrent").field(v).finish(),
            Rule::MaxCurrent(v) => f.debug_tuple("MaxCurrent").field(v).finish(),
            Rule::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// A rule-based event parser: segments are bounded by rising/falling edges
/// of a below-`threshold` mask, then kept only if every rule holds.
#[derive(Clone, Debug)]
pub struct ThresholdParser {
    threshold: f64,
    rules: Vec<Rule>,
}

impl Default for ThresholdParser {
    fn default() -> ThresholdParser {
        ThresholdParser::new(90.0, None)
    }
}

impl ThresholdParser {
    /// Builds a parser with `threshold` and an optional rule list; `None`
    /// installs the default rules (`duration > 1s`, `min > -0.5`,
    /// `max < threshold`).
    pub fn new(threshold: f64, rules: Option<Vec<Rule>>) -> ThresholdParser {
        let rules = rules.unwrap_or_else(|| {
            vec![
                Rule::MinDuration(1.0),
                Rule::MinCurrent(-0.5),
                Rule::MaxCurrent(threshold),
            ]
        });
        ThresholdParser { threshold, rules }
    }

    fn edges(&self, signal: &[f64]) -> Vec<usize> {
        let mask: Vec<u8> = signal.iter().map(|&x| (x < self.threshold) as u8).collect();
        mask.windows(2)
            .enumerate()
            .filter(|(_, w)| w[0] != w[1])
            .map(|(i, _)| i + 1)
            .collect()
    }

    /// Segments `signal` on below/above-`threshold` regions, keeping only
    /// segments for which every rule holds.
    ///
    /// - Time: `O(length)`
    pub fn parse(&self, signal: &[f64]) -> Vec<Segment> {
        if signal.is_empty() {
            return Vec::new();
        }

        let mut tics = Vec::with_capacity(self.edges(signal).len() + 2);
        tics.push(0);
        tics.extend(self.edges(signal));
        tics.push(signal.len());

        tics.windows(2)
            .map(|w| Segment::new(&signal[w[0]..w[1]], w[0]))
            .filter(|segment| self.rules.iter().all(|rule| rule.holds(segment)))
            .collect()
    }
}

impl Parse for ThresholdParser {
    fn parse(&self, signal: &[f64]) -> Vec<Segment> {
        ThresholdParser::parse(self, signal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_bracketed_below_threshold_run() {
        let mut signal = vec![100.0; 5];
        signal.extend(vec![50.0; 200_000]);
        signal.extend(vec![100.0; 5]);

        let parser = ThresholdParser::new(90.0, None);
        let segments = parser.parse(&signal);

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].start(), 5);
        assert_eq!(segments[0].end(), 200_005);
    }

    #[test]
    fn custom_rule_is_applied() {
        let signal = vec![1.0, 1.0, 1.0, 1.0, 1.0];
        let rules = vec![Rule::Custom(Arc::new(|s: &Segment| s.len() >= 3))];
        let parser = ThresholdParser::new(2.0, Some(rules));
        let segments = parser.parse(&signal);
        assert_eq!(segments.len(), 1);
    }

    #[test]
    fn empty_signal_has_no_segments() {
        assert!(ThresholdParser::default().parse(&[]).is_empty());
    }
}
