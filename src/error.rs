use thiserror::Error;

/// Failure conditions surfaced by range-taking and statistical operations.
///
/// Single-index access (`Column::get`/`Column::set`) never produces these:
/// it corrects the index silently. Everything that takes an explicit range,
/// window or pair of columns validates its input and fails loudly instead.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    /// An explicit `[start, start + count)` range exceeds the column bounds.
    #[error("range [{start}, {start}+{count}) out of bounds for column of length {len}")]
    OutOfRange {
        /// First index of the requested range.
        start: usize,
        /// Number of elements requested.
        count: usize,
        /// Length of the column the range was applied to.
        len: usize,
    },
    /// Two columns passed to an element-wise or pairwise operation differ in length.
    #[error("column lengths differ: {left} vs {right}")]
    LengthMismatch {
        /// Length of the left-hand column.
        left: usize,
        /// Length of the right-hand column.
        right: usize,
    },
    /// A statistic was requested on a column with no values.
    #[error("operation requires a non-empty column")]
    EmptyColumn,
    /// A statistic needs more values than the column holds.
    #[error("operation requires at least {needed} values, column has {len}")]
    InsufficientData {
        /// Minimum number of values the operation needs.
        needed: usize,
        /// Actual column length.
        len: usize,
    },
    /// Standardization or a moment ratio was requested on constant data.
    #[error("column has zero variance")]
    ZeroVariance,
    /// A rolling window does not fit the column.
    #[error("window {window} invalid for column of length {len}")]
    InvalidWindow {
        /// Requested window size.
        window: usize,
        /// Actual column length.
        len: usize,
    },
    /// An autocorrelation or differencing lag exceeds the column length.
    #[error("lag {lag} out of range for column of length {len}")]
    InvalidLag {
        /// Requested lag.
        lag: usize,
        /// Actual column length.
        len: usize,
    },
    /// A histogram was requested with zero bins or fewer than two borders.
    #[error("histogram requires at least one bin")]
    InvalidBins,
    /// A percentile argument lies outside `[0, 1]`.
    #[error("percentile {0} must lie in [0, 1]")]
    InvalidPercentile(f64),
}

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, Error>;
