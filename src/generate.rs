//! Deterministic column generators plus the random-walk family.
//!
//! Spacing generators are pure formulas over the loop index. Generators
//! taking fewer than two points cannot place both endpoints and fail
//! with [`Error::InsufficientData`].

use core::f64::consts::TAU;

use crate::{
    Column, Header, UniformSource,
    error::{Error, Result},
};

fn spaced(name: &str, count: usize, value: impl Fn(usize) -> f64) -> Column {
    let values = (0..count).map(value).collect();
    Column::with_header(values, Header::new(name))
}

/// `count` evenly spaced points from `min` to `max`, endpoints inclusive.
///
/// # Errors
///
/// [`Error::InsufficientData`] when `count` is below two.
///
/// # Examples
///
/// ```
/// use col_stats::generate;
/// let col = generate::linspace("x", 5, 0.0, 1.0).unwrap();
/// assert_eq!(col.as_slice(), &[0.0, 0.25, 0.5, 0.75, 1.0]);
/// ```
pub fn linspace(name: &str, count: usize, min: f64, max: f64) -> Result<Column> {
    if count < 2 {
        return Err(Error::InsufficientData { needed: 2, len: count });
    }
    let step = (max - min) / (count - 1) as f64;
    Ok(spaced(name, count, |i| min + step * i as f64))
}

/// `count` points starting at `start`, advancing by `step`.
pub fn arange(name: &str, count: usize, start: f64, step: f64) -> Column {
    spaced(name, count, |i| start + step * i as f64)
}

/// `count` points evenly spaced in log10 between `min` and `max`,
/// endpoints inclusive.
///
/// # Errors
///
/// [`Error::InsufficientData`] when `count` is below two.
pub fn logspace(name: &str, count: usize, min: f64, max: f64) -> Result<Column> {
    if count < 2 {
        return Err(Error::InsufficientData { needed: 2, len: count });
    }
    let (lo, hi) = (min.log10(), max.log10());
    let step = (hi - lo) / (count - 1) as f64;
    Ok(spaced(name, count, |i| 10.0_f64.powf(lo + step * i as f64)))
}

/// `count` points evenly spaced in natural log between `min` and `max`,
/// endpoints inclusive.
///
/// # Errors
///
/// [`Error::InsufficientData`] when `count` is below two.
pub fn geomspace(name: &str, count: usize, min: f64, max: f64) -> Result<Column> {
    if count < 2 {
        return Err(Error::InsufficientData { needed: 2, len: count });
    }
    let (lo, hi) = (min.ln(), max.ln());
    let step = (hi - lo) / (count - 1) as f64;
    Ok(spaced(name, count, |i| (lo + step * i as f64).exp()))
}

/// A random walk of `count` steps from `start`, each increment drawn
/// uniformly from `[-step/2, step/2)`.
///
/// The first stored value already includes one increment; `start` itself
/// is never emitted.
pub fn random_walk(
    name: &str,
    count: usize,
    start: f64,
    step: f64,
    src: &mut impl UniformSource,
) -> Column {
    let mut value = start;
    let values = (0..count)
        .map(|_| {
            value += src.next_uniform() * step - step / 2.0;
            value
        })
        .collect();
    Column::with_header(values, Header::new(name))
}

/// A random walk starting at `min` whose step width is derived from the
/// span, `(max - min) / (count - 1)`.
///
/// The walk is not clamped; `min` and `max` size the steps rather than
/// bound the values.
///
/// # Errors
///
/// [`Error::InsufficientData`] when `count` is below two.
pub fn random_walk_bounded(
    name: &str,
    count: usize,
    min: f64,
    max: f64,
    src: &mut impl UniformSource,
) -> Result<Column> {
    if count < 2 {
        return Err(Error::InsufficientData { needed: 2, len: count });
    }
    let step = (max - min) / (count - 1) as f64;
    Ok(random_walk(name, count, min, step, src))
}

/// A sine wave sampled `count` times across one `period`.
///
/// The sample phase accumulates by `period / count` before each point,
/// so the first value sits one step past zero.
pub fn sine(
    name: &str,
    count: usize,
    period: f64,
    amplitude: f64,
    phase: f64,
    bias: f64,
) -> Column {
    let step = period / count as f64;
    let mut t = 0.0;
    let values = (0..count)
        .map(|_| {
            t += step;
            amplitude * (TAU * t / period + phase).sin() + bias
        })
        .collect();
    Column::with_header(values, Header::new(name))
}

/// A cosine wave of the given angular `frequency`, sampled `count` times
/// across one derived period `2π / frequency`.
///
/// Same phase-accumulation convention as [`sine`].
pub fn cosine(
    name: &str,
    count: usize,
    frequency: f64,
    amplitude: f64,
    phase: f64,
    bias: f64,
) -> Column {
    let period = TAU / frequency;
    let step = period / count as f64;
    let mut t = 0.0;
    let values = (0..count)
        .map(|_| {
            t += step;
            amplitude * (TAU * t / period + phase).cos() + bias
        })
        .collect();
    Column::with_header(values, Header::new(name))
}
