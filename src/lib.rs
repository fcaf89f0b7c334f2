//! Event and state parsers for fixed-rate ionic-current time series.
//!
//! A parser decomposes a signal — a slice of `f64` samples taken at
//! [`SAMPLE_RATE`] — into an ordered, non-overlapping list of [`Segment`]s.
//! Every parser in this crate implements [`Parse`]; [`Parser`] is a tagged
//! union over all of them for code that wants to hold a heterogeneous
//! collection without dynamic dispatch.
//!
//! - [`StatSplitter`] recursively splits a signal by minimizing a
//!   statistical cost function (constant-mean or linear-trend), backed by
//!   O(1) cumulative-moment queries ([`Moments`]).
//! - [`ThresholdParser`] brackets below-threshold runs and filters them
//!   through a configurable [`Rule`] set.
//! - [`PeakToPeakParser`] and [`DualThresholdParser`] both derive candidate
//!   boundaries from the signal's derivative and prune them with
//!   [`Merger`].
//! - [`MemoryParser`] replays a fixed list of index pairs.

mod dual_threshold;
mod error;
mod memory;
mod merger;
mod moments;
mod parser;
mod peak_to_peak;
mod segment;
mod splitter;
mod threshold;

/// Samples per second. Every [`Segment::duration`](Segment::duration) and
/// derivative computed in this crate assumes a fixed rate of acquisition at
/// this frequency.
pub const SAMPLE_RATE: f64 = 100_000.0;

pub use dual_threshold::DualThresholdParser;
pub use error::ConfigError;
pub use memory::MemoryParser;
pub use merger::Merger;
pub use moments::{LinearFit, Moments};
pub use parser::{Parse, Parser};
pub use peak_to_peak::PeakToPeakParser;
pub use segment::Segment;
pub use splitter::{SplitterConfig, SplitterKind, StatSplitter};
pub use threshold::{Rule, ThresholdParser};
