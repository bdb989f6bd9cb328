//! Descriptive statistics over a whole column, plus paired measures
//! between two columns.
//!
//! Moment-based statistics accumulate power sums with compensated
//! summation and expand the central moments algebraically from them, so
//! each statistic is a single pass over the data.

use crate::{
    Column, Kbn,
    error::{Error, Result},
};

impl Column {
    /// Returns the smallest value, or `None` on an empty column.
    pub fn min(&self) -> Option<f64> {
        self.min_with_index().map(|(v, _)| v)
    }

    /// Returns the largest value, or `None` on an empty column.
    pub fn max(&self) -> Option<f64> {
        self.max_with_index().map(|(v, _)| v)
    }

    /// Returns the smallest value and its position. Ties keep the first
    /// occurrence.
    pub fn min_with_index(&self) -> Option<(f64, usize)> {
        let mut best: Option<(f64, usize)> = None;
        for (i, &v) in self.iter().enumerate() {
            match best {
                Some((b, _)) if v >= b => {}
                _ => best = Some((v, i)),
            }
        }
        best
    }

    /// Returns the largest value and its position. Ties keep the first
    /// occurrence.
    pub fn max_with_index(&self) -> Option<(f64, usize)> {
        let mut best: Option<(f64, usize)> = None;
        for (i, &v) in self.iter().enumerate() {
            match best {
                Some((b, _)) if v <= b => {}
                _ => best = Some((v, i)),
            }
        }
        best
    }

    /// Returns the nearest-rank percentile for `p` in `[0, 1]`.
    ///
    /// The column is sorted into a scratch copy and the value at position
    /// `floor(p * (len - 1))` is returned, so the result is always an
    /// observed value, never an interpolation.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyColumn`] on an empty column,
    /// [`Error::InvalidPercentile`] when `p` is outside `[0, 1]` or NaN.
    pub fn percentile(&self, p: f64) -> Result<f64> {
        if !(0.0..=1.0).contains(&p) {
            return Err(Error::InvalidPercentile(p));
        }
        if self.is_empty() {
            return Err(Error::EmptyColumn);
        }
        let mut sorted = self.as_slice().to_vec();
        sorted.sort_by(f64::total_cmp);
        let rank = (p * (sorted.len() - 1) as f64).floor() as usize;
        Ok(sorted[rank])
    }

    /// Returns the median, taking the upper of the two middle values for
    /// even lengths.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyColumn`] on an empty column.
    pub fn median(&self) -> Result<f64> {
        if self.is_empty() {
            return Err(Error::EmptyColumn);
        }
        let mut sorted = self.as_slice().to_vec();
        sorted.sort_by(f64::total_cmp);
        Ok(sorted[sorted.len() / 2])
    }

    /// Returns the arithmetic mean.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyColumn`] on an empty column.
    ///
    /// # Examples
    ///
    /// ```
    /// use col_stats::Column;
    /// let col = Column::from_values(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    /// assert_eq!(col.mean().unwrap(), 3.0);
    /// ```
    pub fn mean(&self) -> Result<f64> {
        if self.is_empty() {
            return Err(Error::EmptyColumn);
        }
        let mut sum = Kbn::default();
        for &v in self.iter() {
            sum += v;
        }
        Ok(sum.total() / self.len() as f64)
    }

    /// Returns the sample variance with Bessel's correction, computed
    /// from power sums as `(Σx² - (Σx)²/n) / (n - 1)`.
    ///
    /// # Errors
    ///
    /// [`Error::InsufficientData`] when fewer than two values are present.
    pub fn variance(&self) -> Result<f64> {
        let n = self.len();
        if n < 2 {
            return Err(Error::InsufficientData { needed: 2, len: n });
        }
        let mut s1 = Kbn::default();
        let mut s2 = Kbn::default();
        for &v in self.iter() {
            s1 += v;
            s2 += v * v;
        }
        let (s1, s2) = (s1.total(), s2.total());
        let n = n as f64;
        Ok((s2 - s1 * s1 / n) / (n - 1.0))
    }

    /// Returns the sample standard deviation.
    ///
    /// # Errors
    ///
    /// Same conditions as [`variance`](Self::variance).
    pub fn stddev(&self) -> Result<f64> {
        Ok(self.variance()?.sqrt())
    }

    /// Returns the sample skewness, from the third central moment
    /// expanded over power sums and normalized by `sd³`.
    ///
    /// # Errors
    ///
    /// [`Error::InsufficientData`] with fewer than two values,
    /// [`Error::ZeroVariance`] when the standard deviation is zero.
    pub fn skewness(&self) -> Result<f64> {
        let n = self.len();
        if n < 2 {
            return Err(Error::InsufficientData { needed: 2, len: n });
        }
        let (mut s1, mut s2, mut s3) = (Kbn::default(), Kbn::default(), Kbn::default());
        for &v in self.iter() {
            s1 += v;
            s2 += v * v;
            s3 += v * v * v;
        }
        let (s1, s2, s3) = (s1.total(), s2.total(), s3.total());
        let n = n as f64;
        let mean = s1 / n;
        let sd = ((s2 - s1 * s1 / n) / (n - 1.0)).sqrt();
        if sd == 0.0 {
            return Err(Error::ZeroVariance);
        }
        Ok((s3 - 3.0 * mean * s2 + 2.0 * mean * mean * s1) / (n * sd * sd * sd))
    }

    /// Returns the sample excess kurtosis, from the fourth central moment
    /// expanded over power sums, normalized by `sd⁴`, minus 3.
    ///
    /// # Errors
    ///
    /// Same conditions as [`skewness`](Self::skewness).
    pub fn kurtosis(&self) -> Result<f64> {
        let n = self.len();
        if n < 2 {
            return Err(Error::InsufficientData { needed: 2, len: n });
        }
        let (mut s1, mut s2, mut s3, mut s4) =
            (Kbn::default(), Kbn::default(), Kbn::default(), Kbn::default());
        for &v in self.iter() {
            let v2 = v * v;
            s1 += v;
            s2 += v2;
            s3 += v2 * v;
            s4 += v2 * v2;
        }
        let (s1, s2, s3, s4) = (s1.total(), s2.total(), s3.total(), s4.total());
        let n = n as f64;
        let m = s1 / n;
        let sd = ((s2 - s1 * s1 / n) / (n - 1.0)).sqrt();
        if sd == 0.0 {
            return Err(Error::ZeroVariance);
        }
        let m2 = m * m;
        let fourth = s4 - 4.0 * m * s3 + 6.0 * m2 * s2 - 3.0 * m2 * m * s1;
        Ok(fourth / (n * sd * sd * sd * sd) - 3.0)
    }

    /// Standardizes the column in place to z-scores, `(x - mean) / sd`.
    ///
    /// Destructive: the column's own mean and stddev are computed first
    /// and then rewritten away; snapshot them beforehand if still needed.
    ///
    /// # Errors
    ///
    /// [`Error::InsufficientData`] with fewer than two values,
    /// [`Error::ZeroVariance`] on a constant column.
    ///
    /// # Examples
    ///
    /// ```
    /// use col_stats::Column;
    /// let mut col = Column::from_values(vec![1.0, 2.0, 3.0]);
    /// col.z_scores().unwrap();
    /// assert_eq!(col.as_slice(), &[-1.0, 0.0, 1.0]);
    /// ```
    pub fn z_scores(&mut self) -> Result<()> {
        let mean = self.mean()?;
        let sd = self.stddev()?;
        self.z_scores_with(mean, sd)
    }

    /// In-place z-scores against externally supplied parameters.
    ///
    /// # Errors
    ///
    /// [`Error::ZeroVariance`] when `sd` is zero.
    pub fn z_scores_with(&mut self, mean: f64, sd: f64) -> Result<()> {
        if sd == 0.0 {
            return Err(Error::ZeroVariance);
        }
        self.apply(|x| (x - mean) / sd);
        Ok(())
    }

    /// Standardizes the column in place to t-scores, the z-score scaled
    /// by `√n`. Destructive like [`z_scores`](Self::z_scores).
    ///
    /// # Errors
    ///
    /// Same conditions as [`z_scores`](Self::z_scores).
    pub fn t_scores(&mut self) -> Result<()> {
        let mean = self.mean()?;
        let sd = self.stddev()?;
        self.t_scores_with(mean, sd)
    }

    /// In-place t-scores against externally supplied parameters.
    ///
    /// # Errors
    ///
    /// [`Error::ZeroVariance`] when `sd` is zero.
    pub fn t_scores_with(&mut self, mean: f64, sd: f64) -> Result<()> {
        if sd == 0.0 {
            return Err(Error::ZeroVariance);
        }
        let scale = (self.len() as f64).sqrt();
        self.apply(|x| (x - mean) / sd * scale);
        Ok(())
    }
}

/// Sample covariance between two equal-length columns, with Bessel's
/// correction.
///
/// # Errors
///
/// [`Error::LengthMismatch`] on unequal lengths,
/// [`Error::InsufficientData`] with fewer than two pairs.
pub fn covariance(a: &Column, b: &Column) -> Result<f64> {
    if a.len() != b.len() {
        return Err(Error::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    let n = a.len();
    if n < 2 {
        return Err(Error::InsufficientData { needed: 2, len: n });
    }
    let (mut sx, mut sy, mut sxy) = (Kbn::default(), Kbn::default(), Kbn::default());
    for (&x, &y) in a.iter().zip(b.iter()) {
        sx += x;
        sy += y;
        sxy += x * y;
    }
    let n = n as f64;
    Ok((sxy.total() - sx.total() * sy.total() / n) / (n - 1.0))
}

/// Pearson correlation coefficient between two equal-length columns.
///
/// # Errors
///
/// The conditions of [`covariance`], plus [`Error::ZeroVariance`] when
/// either column is constant.
///
/// # Examples
///
/// ```
/// use col_stats::{Column, correlation};
/// let a = Column::from_values(vec![1.0, 2.0, 3.0]);
/// let b = Column::from_values(vec![2.0, 4.0, 6.0]);
/// assert!((correlation(&a, &b).unwrap() - 1.0).abs() < 1e-12);
/// ```
pub fn correlation(a: &Column, b: &Column) -> Result<f64> {
    let cov = covariance(a, b)?;
    let (sa, sb) = (a.stddev()?, b.stddev()?);
    if sa == 0.0 || sb == 0.0 {
        return Err(Error::ZeroVariance);
    }
    Ok(cov / (sa * sb))
}

/// Pairwise covariance matrix over a set of columns.
///
/// Entry `[i][j]` is `covariance(cols[i], cols[j])`; the matrix is
/// symmetric with per-column variances on the diagonal.
///
/// # Errors
///
/// The conditions of [`covariance`] applied to any pair.
pub fn covariance_matrix(cols: &[&Column]) -> Result<Vec<Vec<f64>>> {
    pairwise(cols, covariance)
}

/// Pairwise Pearson correlation matrix over a set of columns.
///
/// # Errors
///
/// The conditions of [`correlation`] applied to any pair.
pub fn correlation_matrix(cols: &[&Column]) -> Result<Vec<Vec<f64>>> {
    pairwise(cols, correlation)
}

fn pairwise(
    cols: &[&Column],
    measure: impl Fn(&Column, &Column) -> Result<f64>,
) -> Result<Vec<Vec<f64>>> {
    let mut matrix = Vec::with_capacity(cols.len());
    for a in cols {
        let mut row = Vec::with_capacity(cols.len());
        for b in cols {
            row.push(measure(a, b)?);
        }
        matrix.push(row);
    }
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn col(values: &[f64]) -> Column {
        Column::from_values(values.to_vec())
    }

    #[test]
    fn one_to_five_reference_values() {
        let c = col(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_approx_eq!(c.mean().unwrap(), 3.0);
        assert_approx_eq!(c.variance().unwrap(), 2.5);
        assert_approx_eq!(c.stddev().unwrap(), 2.5_f64.sqrt());
        assert_approx_eq!(c.skewness().unwrap(), 0.0);
        assert_eq!(c.median().unwrap(), 3.0);
        assert_eq!(c.min().unwrap(), 1.0);
        assert_eq!(c.max().unwrap(), 5.0);
        assert_eq!(c.percentile(0.0).unwrap(), 1.0);
        assert_eq!(c.percentile(1.0).unwrap(), 5.0);
    }

    #[test]
    fn extrema_keep_first_occurrence_on_ties() {
        let c = col(&[2.0, 1.0, 3.0, 1.0, 3.0]);
        assert_eq!(c.min_with_index().unwrap(), (1.0, 1));
        assert_eq!(c.max_with_index().unwrap(), (3.0, 2));
        assert_eq!(Column::new().min(), None);
    }

    #[test]
    fn percentile_is_nearest_rank() {
        let c = col(&[10.0, 20.0, 30.0, 40.0]);
        assert_eq!(c.percentile(0.0).unwrap(), 10.0);
        assert_eq!(c.percentile(0.5).unwrap(), 20.0);
        assert_eq!(c.percentile(1.0).unwrap(), 40.0);
        assert_eq!(c.percentile(1.5), Err(Error::InvalidPercentile(1.5)));
        assert_eq!(Column::new().percentile(0.5), Err(Error::EmptyColumn));
    }

    #[test]
    fn median_takes_upper_middle_for_even_lengths() {
        let c = col(&[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(c.median().unwrap(), 3.0);
    }

    #[test]
    fn moments_need_enough_data() {
        assert_eq!(Column::new().mean(), Err(Error::EmptyColumn));
        assert_eq!(
            col(&[1.0]).variance(),
            Err(Error::InsufficientData { needed: 2, len: 1 })
        );
        assert_eq!(col(&[5.0, 5.0, 5.0]).skewness(), Err(Error::ZeroVariance));
        assert_eq!(col(&[5.0, 5.0, 5.0]).kurtosis(), Err(Error::ZeroVariance));
    }

    #[test]
    fn skewness_detects_asymmetry() {
        // Long right tail.
        let c = col(&[1.0, 1.0, 1.0, 1.0, 10.0]);
        assert!(c.skewness().unwrap() > 0.0);
        // Long left tail.
        let c = col(&[-10.0, 1.0, 1.0, 1.0, 1.0]);
        assert!(c.skewness().unwrap() < 0.0);
    }

    #[test]
    fn kurtosis_of_two_point_distribution() {
        // Symmetric two-point data has the minimum excess kurtosis.
        let c = col(&[-1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0]);
        assert!(c.kurtosis().unwrap() < 0.0);
    }

    #[test]
    fn z_scores_standardize_in_place() {
        let mut c = col(&[2.0, 4.0, 6.0, 8.0]);
        c.z_scores().unwrap();
        assert_approx_eq!(c.mean().unwrap(), 0.0);
        assert_approx_eq!(c.stddev().unwrap(), 1.0);
    }

    #[test]
    fn scores_reject_zero_spread() {
        let mut c = col(&[3.0, 3.0, 3.0]);
        assert_eq!(c.z_scores(), Err(Error::ZeroVariance));
        assert_eq!(c.z_scores_with(3.0, 0.0), Err(Error::ZeroVariance));
        assert_eq!(c.t_scores(), Err(Error::ZeroVariance));
        // A failed standardization leaves the values untouched.
        assert_eq!(c.as_slice(), &[3.0, 3.0, 3.0]);
    }

    #[test]
    fn t_scores_scale_by_sqrt_n() {
        let mut z = col(&[1.0, 2.0, 3.0, 4.0]);
        let mut t = z.clone();
        z.z_scores().unwrap();
        t.t_scores().unwrap();
        let scale = 2.0; // sqrt(4)
        for i in 0..4 {
            assert_approx_eq!(t.get(i), z.get(i) * scale);
        }
    }

    #[test]
    fn covariance_and_correlation() {
        let a = col(&[1.0, 2.0, 3.0, 4.0]);
        let b = col(&[2.0, 4.0, 6.0, 8.0]);
        // cov(a, 2a) = 2 var(a)
        assert_approx_eq!(covariance(&a, &b).unwrap(), 2.0 * a.variance().unwrap());
        assert_approx_eq!(correlation(&a, &b).unwrap(), 1.0);

        let neg = -&b;
        assert_approx_eq!(correlation(&a, &neg).unwrap(), -1.0);
    }

    #[test]
    fn paired_measures_validate_inputs() {
        let a = col(&[1.0, 2.0]);
        let b = col(&[1.0, 2.0, 3.0]);
        assert_eq!(
            covariance(&a, &b),
            Err(Error::LengthMismatch { left: 2, right: 3 })
        );
        let flat = col(&[1.0, 1.0]);
        assert_eq!(correlation(&a, &flat), Err(Error::ZeroVariance));
    }

    #[test]
    fn matrices_are_symmetric_with_expected_diagonal() {
        let a = col(&[1.0, 2.0, 3.0]);
        let b = col(&[3.0, 1.0, 2.0]);
        let cov = covariance_matrix(&[&a, &b]).unwrap();
        assert_approx_eq!(cov[0][0], a.variance().unwrap());
        assert_approx_eq!(cov[1][1], b.variance().unwrap());
        assert_approx_eq!(cov[0][1], cov[1][0]);

        let corr = correlation_matrix(&[&a, &b]).unwrap();
        assert_approx_eq!(corr[0][0], 1.0);
        assert_approx_eq!(corr[1][1], 1.0);
        assert_approx_eq!(corr[0][1], corr[1][0]);
    }
}
