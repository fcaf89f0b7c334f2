//! A single capability, `parse: Signal -> [Segment]`, shared by every parser
//! in this crate, plus a tagged-union [`Parser`] for holding a
//! heterogeneous collection of configured parsers without dynamic dispatch.

use crate::dual_threshold::DualThresholdParser;
use crate::memory::MemoryParser;
use crate::peak_to_peak::PeakToPeakParser;
use crate::segment::Segment;
use crate::splitter::StatSplitter;
use crate::threshold::ThresholdParser;

/// The one mandatory operation every parser implements.
pub trait Parse {
    /// Decomposes `signal` into an ordered, non-overlapping list of
    /// segments according to this parser's model.
    fn parse(&self, signal: &[f64]) -> Vec<Segment>;
}

/// A tagged union over every parser kind in this crate, dispatching
/// statically to the wrapped parser's [`Parse`] implementation.
pub enum Parser {
    Stat(StatSplitter),
    Threshold(ThresholdParser),
    PeakToPeak(PeakToPeakParser),
    DualThreshold(DualThresholdParser),
    Memory(MemoryParser),
}

impl Parse for Parser {
    fn parse(&self, signal: &[f64]) -> Vec<Segment> {
        match self {
            Parser::Stat(p) => p.parse(signal),
            Parser::Threshold(p) => p.parse(signal),
            Parser::PeakToPeak(p) => p.parse(signal),
            Parser::DualThreshold(p) => p.parse(signal),
            Parser::Memory(p) => p.parse(signal),
        }
    }
}
