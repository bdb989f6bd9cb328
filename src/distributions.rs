//! Random samplers built on a [`UniformSource`].
//!
//! Every distribution is a stateless transform of uniform draws and comes
//! in four forms: a single draw from a caller-supplied source, a
//! `*_seeded` draw from a fresh isolated source, a `*_samples` batch from
//! the shared process-wide source, and a `*_column` batch wrapped in a
//! named [`Column`]. Calls against the shared source advance one global
//! sequence, so their results are order-dependent; seeded draws never
//! touch it.

use core::f64::consts::TAU;

use crate::{
    Column, UniformSource,
    source::{self, SharedSource},
};

/// One normally distributed sample via the Box-Muller transform.
///
/// Both uniforms are flipped to `1 - u` so the logarithm never sees zero.
pub fn normal(mean: f64, sd: f64, src: &mut impl UniformSource) -> f64 {
    let u1 = 1.0 - src.next_uniform();
    let u2 = 1.0 - src.next_uniform();
    mean + sd * ((-2.0 * u1.ln()).sqrt() * (TAU * u2).sin())
}

/// One uniformly distributed sample in `[min, max)`.
pub fn uniform(min: f64, max: f64, src: &mut impl UniformSource) -> f64 {
    min + (max - min) * src.next_uniform()
}

/// One exponentially distributed sample with the given mean, by
/// inverse CDF.
pub fn exponential(mean: f64, src: &mut impl UniformSource) -> f64 {
    -mean * (1.0 - src.next_uniform()).ln()
}

/// One log-normally distributed sample, `exp` of a normal draw.
///
/// `mean` and `sd` parameterize the underlying normal, not the
/// log-normal itself.
pub fn log_normal(mean: f64, sd: f64, src: &mut impl UniformSource) -> f64 {
    normal(mean, sd, src).exp()
}

/// One triangularly distributed sample over `[min, max]` peaking at
/// `mode`, by the piecewise inverse CDF split at
/// `c = (mode - min) / (max - min)`.
pub fn triangular(min: f64, max: f64, mode: f64, src: &mut impl UniformSource) -> f64 {
    let u = src.next_uniform();
    let c = (mode - min) / (max - min);
    if u <= c {
        min + (u * (max - min) * (mode - min)).sqrt()
    } else {
        max - ((1.0 - u) * (max - min) * (max - mode)).sqrt()
    }
}

// Shared by beta, gamma and weibull: a normalized ratio of powers of two
// uniforms. Only a correct sampler for the Beta distribution; kept as the
// gamma/weibull transform for compatibility with the original formulas.
fn ratio_of_powers(alpha: f64, beta: f64, src: &mut impl UniformSource) -> f64 {
    let u = src.next_uniform();
    let v = src.next_uniform();
    let w = u.powf(1.0 / alpha) * v.powf(1.0 / beta);
    w / (w + (1.0 - u).powf(1.0 / alpha) * (1.0 - v).powf(1.0 / beta))
}

/// One beta-distributed sample in `[0, 1]` with shape parameters
/// `alpha` and `beta`.
pub fn beta(alpha: f64, beta: f64, src: &mut impl UniformSource) -> f64 {
    ratio_of_powers(alpha, beta, src)
}

/// A gamma-labelled sample with parameters `alpha` and `beta`.
///
/// Uses the same ratio-of-powers transform as [`beta`], so the output
/// lies in `[0, 1]` and does not follow a true Gamma distribution;
/// preserved for formula compatibility.
pub fn gamma(alpha: f64, beta: f64, src: &mut impl UniformSource) -> f64 {
    ratio_of_powers(alpha, beta, src)
}

/// A weibull-labelled sample with parameters `alpha` and `beta`.
///
/// Same transform and caveat as [`gamma`].
pub fn weibull(alpha: f64, beta: f64, src: &mut impl UniformSource) -> f64 {
    ratio_of_powers(alpha, beta, src)
}

// Derives the seeded, batch and column forms from a single-draw sampler.
macro_rules! sampler_variants {
    ($($base:ident($($p:ident: $t:ty),*) => $seeded:ident, $samples:ident, $column:ident;)*) => {$(
        #[doc = concat!("[`", stringify!($base), "`] drawn from a fresh source seeded with `seed`.")]
        ///
        /// Isolated: never observes or advances the shared sequence.
        pub fn $seeded($($p: $t,)* seed: u64) -> f64 {
            // self:: keeps the call resolving to the sampler when a
            // parameter shares its name (beta's `beta: f64`).
            self::$base($($p,)* &mut source::seeded(seed))
        }

        #[doc = concat!("`count` [`", stringify!($base), "`] samples from the shared source.")]
        pub fn $samples(count: usize, $($p: $t),*) -> Vec<f64> {
            let mut src = SharedSource;
            (0..count).map(|_| self::$base($($p,)* &mut src)).collect()
        }

        #[doc = concat!("A named column of `count` [`", stringify!($base), "`] samples from the shared source.")]
        pub fn $column(name: &str, count: usize, $($p: $t),*) -> Column {
            Column::with_header($samples(count, $($p),*), crate::Header::new(name))
        }
    )*};
}

sampler_variants! {
    normal(mean: f64, sd: f64) => normal_seeded, normal_samples, normal_column;
    uniform(min: f64, max: f64) => uniform_seeded, uniform_samples, uniform_column;
    exponential(mean: f64) => exponential_seeded, exponential_samples, exponential_column;
    log_normal(mean: f64, sd: f64) => log_normal_seeded, log_normal_samples, log_normal_column;
    triangular(min: f64, max: f64, mode: f64) => triangular_seeded, triangular_samples, triangular_column;
    beta(alpha: f64, beta: f64) => beta_seeded, beta_samples, beta_column;
    gamma(alpha: f64, beta: f64) => gamma_seeded, gamma_samples, gamma_column;
    weibull(alpha: f64, beta: f64) => weibull_seeded, weibull_samples, weibull_column;
}
