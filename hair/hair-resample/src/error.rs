//! Error types for strand resampling.

use thiserror::Error;

/// Errors that can occur while resampling a strand.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResampleError {
    /// The strand has too few points to define a curve.
    #[error("cannot resample strand with {got} points (need at least 2)")]
    TooFewPoints {
        /// Actual number of points.
        got: usize,
    },

    /// All points of the strand coincide.
    #[error("degenerate strand: all points coincide")]
    Degenerate,

    /// A per-point channel does not match the point count.
    #[error("{channel} channel has {got} samples but strand has {expected} points")]
    ChannelLengthMismatch {
        /// Name of the offending channel.
        channel: &'static str,
        /// Samples in the channel.
        got: usize,
        /// Points in the strand.
        expected: usize,
    },
}
