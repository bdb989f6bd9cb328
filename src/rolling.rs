//! In-place sequence transforms: cumulative scans, differencing, rolling
//! windows, and serial-correlation measures.
//!
//! Rolling transforms rewrite the column in place. Positions `[0, window)`
//! keep their original values as a warm-up prefix; every later position
//! receives the statistic of the `window` original values ending at it.
//! The original values are snapshotted first, so a window never reads a
//! value the transform has already overwritten.

use crate::{
    Column, Kbn,
    error::{Error, Result},
};

impl Column {
    /// Replaces each value with the running sum of all values up to and
    /// including it, accumulated with compensated summation.
    ///
    /// # Examples
    ///
    /// ```
    /// use col_stats::Column;
    /// let mut col = Column::from_values(vec![1.0, 2.0, 3.0, 4.0]);
    /// col.cumulative_sum();
    /// assert_eq!(col.as_slice(), &[1.0, 3.0, 6.0, 10.0]);
    /// ```
    pub fn cumulative_sum(&mut self) {
        let mut sum = Kbn::default();
        for i in 0..self.len() {
            let i = i as isize;
            sum += self.get(i);
            self.set(i, sum.total());
        }
    }

    /// Replaces each value with the running product of all values up to
    /// and including it.
    pub fn cumulative_product(&mut self) {
        let mut product = 1.0;
        for i in 0..self.len() {
            let i = i as isize;
            product *= self.get(i);
            self.set(i, product);
        }
    }

    /// First difference: each value from position 1 onward becomes
    /// `x[i] - x[i - 1]`; the first value is left untouched. Equivalent
    /// to [`difference_lag(1)`](Self::difference_lag).
    pub fn difference(&mut self) {
        self.difference_lag(1);
    }

    /// Lagged difference: each value from position `lag` onward becomes
    /// `x[i] - x[i - lag]` over the original values; positions before
    /// `lag` keep their original values as a warm-up prefix.
    ///
    /// Computed back to front so each subtraction reads values not yet
    /// rewritten. A `lag` of zero zeroes the whole column (every value
    /// minus itself); a `lag` at or beyond the length leaves it
    /// untouched.
    pub fn difference_lag(&mut self, lag: usize) {
        let len = self.len();
        if lag >= len {
            return;
        }
        for i in (lag..len).rev() {
            let d = self.get(i as isize) - self.get((i - lag) as isize);
            self.set(i as isize, d);
        }
    }

    /// Rolling sum over windows of `window` original values.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidWindow`] when `window` is zero or exceeds the
    /// length.
    ///
    /// # Examples
    ///
    /// ```
    /// use col_stats::Column;
    /// let mut col = Column::from_values(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    /// col.rolling_sum(2).unwrap();
    /// assert_eq!(col.as_slice(), &[1.0, 2.0, 5.0, 7.0, 9.0]);
    /// ```
    pub fn rolling_sum(&mut self, window: usize) -> Result<()> {
        self.rolling_apply(window, 1, |values| {
            let mut sum = Kbn::default();
            for &v in values {
                sum += v;
            }
            sum.total()
        })
    }

    /// Rolling product over windows of `window` original values.
    ///
    /// # Errors
    ///
    /// Same conditions as [`rolling_sum`](Self::rolling_sum).
    pub fn rolling_product(&mut self, window: usize) -> Result<()> {
        self.rolling_apply(window, 1, |values| values.iter().product())
    }

    /// Rolling mean over windows of `window` original values.
    ///
    /// # Errors
    ///
    /// Same conditions as [`rolling_sum`](Self::rolling_sum).
    pub fn rolling_mean(&mut self, window: usize) -> Result<()> {
        self.rolling_apply(window, 1, |values| {
            let mut sum = Kbn::default();
            for &v in values {
                sum += v;
            }
            sum.total() / values.len() as f64
        })
    }

    /// Rolling sample variance over windows of `window` original values,
    /// with Bessel's correction.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidWindow`] when `window` exceeds the length,
    /// [`Error::InsufficientData`] when `window` is below two.
    pub fn rolling_variance(&mut self, window: usize) -> Result<()> {
        self.rolling_apply(window, 2, window_variance)
    }

    /// Rolling sample standard deviation.
    ///
    /// # Errors
    ///
    /// Same conditions as [`rolling_variance`](Self::rolling_variance).
    pub fn rolling_stddev(&mut self, window: usize) -> Result<()> {
        self.rolling_apply(window, 2, |values| window_variance(values).sqrt())
    }

    // Shared driver: validates the window, snapshots the original values,
    // writes the statistic over each full window ending at i >= window.
    fn rolling_apply(
        &mut self,
        window: usize,
        min_window: usize,
        stat: impl Fn(&[f64]) -> f64,
    ) -> Result<()> {
        let len = self.len();
        if window < min_window {
            return Err(if window == 0 {
                Error::InvalidWindow { window, len }
            } else {
                Error::InsufficientData { needed: min_window, len: window }
            });
        }
        if window > len {
            return Err(Error::InvalidWindow { window, len });
        }
        let snapshot = self.as_slice().to_vec();
        for i in window..len {
            self.set(i as isize, stat(&snapshot[i + 1 - window..=i]));
        }
        Ok(())
    }

    /// Autocorrelation at `lag`: the Pearson correlation between
    /// `x[lag..]` and `x[..len - lag]`, each truncated slice centered on
    /// its own mean. `autocorrelation(0)` is exactly one, and a linear
    /// trend correlates perfectly at every lag.
    ///
    /// Two passes over the `len - lag` pairs: one for the product and
    /// slice sums, one for the centered sums of squares that form the
    /// `√(Σdx²·Σdy²)` denominator.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLag`] when `lag` reaches the length,
    /// [`Error::EmptyColumn`] on an empty column,
    /// [`Error::ZeroVariance`] when either truncated slice is constant
    /// (including the single-pair case `lag == len - 1`).
    pub fn autocorrelation(&self, lag: usize) -> Result<f64> {
        let len = self.len();
        if len == 0 {
            return Err(Error::EmptyColumn);
        }
        if lag >= len {
            return Err(Error::InvalidLag { lag, len });
        }
        let values = self.as_slice();
        let n = (len - lag) as f64;
        let (mut prod, mut sx, mut sy) = (Kbn::default(), Kbn::default(), Kbn::default());
        for i in lag..len {
            let (x, y) = (values[i], values[i - lag]);
            prod += x * y;
            sx += x;
            sy += y;
        }
        let mean_x = sx.total() / n;
        let mean_y = sy.total() / n;
        let (mut ssx, mut ssy) = (Kbn::default(), Kbn::default());
        for i in lag..len {
            let (dx, dy) = (values[i] - mean_x, values[i - lag] - mean_y);
            ssx += dx * dx;
            ssy += dy * dy;
        }
        let denom = (ssx.total() * ssy.total()).sqrt();
        if denom == 0.0 {
            return Err(Error::ZeroVariance);
        }
        Ok((prod.total() - n * mean_x * mean_y) / denom)
    }

    /// Partial autocorrelation at `lag`.
    ///
    /// Currently computed identically to
    /// [`autocorrelation`](Self::autocorrelation); the Durbin-Levinson
    /// recursion that would remove the shorter-lag contributions is not
    /// implemented yet.
    ///
    /// # Errors
    ///
    /// Same conditions as [`autocorrelation`](Self::autocorrelation).
    pub fn partial_autocorrelation(&self, lag: usize) -> Result<f64> {
        self.autocorrelation(lag)
    }

    /// Autocorrelation function: a new column of
    /// [`autocorrelation`](Self::autocorrelation) values for lags
    /// `0..=max_lag`, named `acf`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`autocorrelation`](Self::autocorrelation) at
    /// `max_lag`.
    pub fn autocorrelation_fn(&self, max_lag: usize) -> Result<Column> {
        let mut acf = Column::named("acf");
        for lag in 0..=max_lag {
            acf.push(self.autocorrelation(lag)?);
        }
        Ok(acf)
    }

    /// Partial autocorrelation function for lags `0..=max_lag`, named
    /// `pacf`.
    ///
    /// # Errors
    ///
    /// Same conditions as
    /// [`autocorrelation_fn`](Self::autocorrelation_fn).
    pub fn partial_autocorrelation_fn(&self, max_lag: usize) -> Result<Column> {
        let mut pacf = Column::named("pacf");
        for lag in 0..=max_lag {
            pacf.push(self.partial_autocorrelation(lag)?);
        }
        Ok(pacf)
    }
}

fn window_variance(values: &[f64]) -> f64 {
    let mut s1 = Kbn::default();
    let mut s2 = Kbn::default();
    for &v in values {
        s1 += v;
        s2 += v * v;
    }
    let (s1, s2) = (s1.total(), s2.total());
    let n = values.len() as f64;
    (s2 - s1 * s1 / n) / (n - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn col(values: &[f64]) -> Column {
        Column::from_values(values.to_vec())
    }

    #[test]
    fn cumulative_scans() {
        let mut c = col(&[1.0, 2.0, 3.0, 4.0]);
        c.cumulative_sum();
        assert_eq!(c.as_slice(), &[1.0, 3.0, 6.0, 10.0]);

        let mut c = col(&[1.0, 2.0, 3.0, 4.0]);
        c.cumulative_product();
        assert_eq!(c.as_slice(), &[1.0, 2.0, 6.0, 24.0]);
    }

    #[test]
    fn difference_keeps_the_warmup_prefix() {
        let mut c = col(&[1.0, 4.0, 9.0, 16.0]);
        c.difference();
        assert_eq!(c.as_slice(), &[1.0, 3.0, 5.0, 7.0]);

        let mut c = col(&[1.0, 4.0, 9.0, 16.0]);
        c.difference_lag(2);
        assert_eq!(c.as_slice(), &[1.0, 4.0, 8.0, 12.0]);
    }

    #[test]
    fn difference_reads_original_values() {
        // x[i] - x[i - lag] over the pre-transform values, not the
        // partially rewritten ones.
        let mut c = col(&[1.0, 2.0, 4.0, 8.0, 16.0]);
        c.difference();
        assert_eq!(c.as_slice(), &[1.0, 1.0, 2.0, 4.0, 8.0]);
    }

    #[test]
    fn difference_degenerate_lags() {
        let mut c = col(&[1.0, 2.0, 3.0]);
        c.difference_lag(0);
        assert_eq!(c.as_slice(), &[0.0, 0.0, 0.0]);

        let mut c = col(&[1.0, 2.0, 3.0]);
        c.difference_lag(3);
        assert_eq!(c.as_slice(), &[1.0, 2.0, 3.0]);

        let mut c = col(&[1.0, 2.0, 3.0]);
        c.difference_lag(2);
        assert_eq!(c.as_slice(), &[1.0, 2.0, 2.0]);
    }

    #[test]
    fn rolling_sum_keeps_warmup_prefix() {
        let mut c = col(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        c.rolling_sum(2).unwrap();
        assert_eq!(c.as_slice(), &[1.0, 2.0, 5.0, 7.0, 9.0]);
    }

    #[test]
    fn rolling_windows_read_original_values() {
        // With a window much shorter than the column, each window must
        // still see pre-transform values only.
        let mut c = col(&[1.0; 8]);
        c.rolling_sum(2).unwrap();
        assert_eq!(c.as_slice(), &[1.0, 1.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0]);
    }

    #[test]
    fn rolling_mean_of_constant_is_constant() {
        let mut c = col(&[7.0; 6]);
        c.rolling_mean(3).unwrap();
        assert_eq!(c.as_slice(), &[7.0; 6]);
    }

    #[test]
    fn rolling_product_and_mean() {
        let mut c = col(&[1.0, 2.0, 3.0, 4.0]);
        c.rolling_product(2).unwrap();
        assert_eq!(c.as_slice(), &[1.0, 2.0, 6.0, 12.0]);

        let mut c = col(&[1.0, 2.0, 3.0, 4.0]);
        c.rolling_mean(2).unwrap();
        assert_eq!(c.as_slice(), &[1.0, 2.0, 2.5, 3.5]);
    }

    #[test]
    fn rolling_variance_and_stddev() {
        let mut c = col(&[1.0, 2.0, 4.0, 8.0]);
        c.rolling_variance(2).unwrap();
        // var([2, 4]) = 2, var([4, 8]) = 8
        assert_eq!(c.as_slice(), &[1.0, 2.0, 2.0, 8.0]);

        let mut c = col(&[1.0, 2.0, 4.0, 8.0]);
        c.rolling_stddev(2).unwrap();
        assert_approx_eq!(c.get(2), 2.0_f64.sqrt());
        assert_approx_eq!(c.get(3), 8.0_f64.sqrt());
    }

    #[test]
    fn rolling_rejects_bad_windows() {
        let mut c = col(&[1.0, 2.0, 3.0]);
        assert_eq!(
            c.rolling_sum(0),
            Err(Error::InvalidWindow { window: 0, len: 3 })
        );
        assert_eq!(
            c.rolling_sum(4),
            Err(Error::InvalidWindow { window: 4, len: 3 })
        );
        assert_eq!(
            c.rolling_variance(1),
            Err(Error::InsufficientData { needed: 2, len: 1 })
        );
    }

    #[test]
    fn autocorrelation_is_one_at_lag_zero() {
        let c = col(&[3.0, 1.0, 4.0, 1.0, 5.0, 9.0]);
        assert_approx_eq!(c.autocorrelation(0).unwrap(), 1.0);
    }

    #[test]
    fn autocorrelation_of_linear_trend_is_one() {
        // Shifting a linear trend keeps the pairs perfectly correlated,
        // so every lag gives exactly 1 under the truncated-pair Pearson.
        let c = col(&[1.0, 2.0, 3.0]);
        assert_approx_eq!(c.autocorrelation(1).unwrap(), 1.0);

        let c = col(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        for lag in 1..5 {
            assert_approx_eq!(c.autocorrelation(lag).unwrap(), 1.0);
        }
    }

    #[test]
    fn autocorrelation_of_alternating_series() {
        let c = col(&[1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0]);
        // Perfect alternation: each pair is its own negation at lag one
        // and identical at lag two.
        assert_approx_eq!(c.autocorrelation(1).unwrap(), -1.0);
        assert_approx_eq!(c.autocorrelation(2).unwrap(), 1.0);
    }

    #[test]
    fn autocorrelation_centers_each_slice_on_its_own_mean() {
        // [1, 2, 1, 3] at lag 1: pairs (2,1), (1,2), (3,1); slice means
        // 2 and 4/3; numerator 7 - 3*2*(4/3) = -1; denominator
        // sqrt(2 * 2/3), so r = -√3/2.
        let c = col(&[1.0, 2.0, 1.0, 3.0]);
        assert_approx_eq!(c.autocorrelation(1).unwrap(), -(3.0_f64.sqrt()) / 2.0);
    }

    #[test]
    fn autocorrelation_validates_input() {
        let c = col(&[1.0, 2.0, 3.0]);
        assert_eq!(
            c.autocorrelation(3),
            Err(Error::InvalidLag { lag: 3, len: 3 })
        );
        assert_eq!(Column::new().autocorrelation(0), Err(Error::EmptyColumn));
        assert_eq!(col(&[2.0, 2.0]).autocorrelation(1), Err(Error::ZeroVariance));
        // A single pair has no spread on either side.
        assert_eq!(col(&[1.0, 5.0]).autocorrelation(1), Err(Error::ZeroVariance));
    }

    #[test]
    fn acf_column_spans_all_lags() {
        let c = col(&[1.0, 3.0, 2.0, 5.0, 4.0, 6.0]);
        let acf = c.autocorrelation_fn(3).unwrap();
        assert_eq!(acf.len(), 4);
        assert_eq!(acf.header().name, "acf");
        assert_approx_eq!(acf.get(0), 1.0);
        for lag in 1..=3 {
            assert_approx_eq!(acf.get(lag), c.autocorrelation(lag as usize).unwrap());
        }
    }

    #[test]
    fn pacf_matches_acf_for_now() {
        let c = col(&[1.0, 3.0, 2.0, 5.0, 4.0, 6.0]);
        let acf = c.autocorrelation_fn(2).unwrap();
        let pacf = c.partial_autocorrelation_fn(2).unwrap();
        assert_eq!(acf.as_slice(), pacf.as_slice());
        assert_eq!(pacf.header().name, "pacf");
    }
}
