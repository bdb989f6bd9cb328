#![doc = include_str!("../README.md")]
#![deny(
    unsafe_code,
    unused_imports,
    unused_variables,
    unused_must_use,
    missing_docs,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented
)]
#![allow(clippy::len_without_is_empty)]

pub(crate) type Kbn = compensated_summation::KahanBabuskaNeumaier<f64>;

mod error;
pub use error::{Error, Result};

mod header;
pub use header::{ColumnKind, Header};

mod ops;
pub use ops::{BinaryOp, UnaryOp};

mod column;
pub use column::Column;

mod describe;
pub use describe::{correlation, correlation_matrix, covariance, covariance_matrix};

mod rolling;

pub mod histogram;
pub use histogram::Histogram;

mod source;
pub use source::{SharedSource, UniformSource, seeded};

pub mod distributions;

pub mod generate;
