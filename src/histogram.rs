//! Equal-width histogram binning and the Sturges bin-count rule.

use crate::{
    Column,
    error::{Error, Result},
};

/// Bin counts paired with the bin borders that produced them.
///
/// For `k` bins there are `k + 1` borders; bin `i` covers
/// `[borders[i], borders[i + 1])`, with the last bin closed on both ends.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    counts: Vec<usize>,
    borders: Vec<f64>,
}

impl Histogram {
    /// Bins the column's values into `bins` equal-width bins over
    /// `[min, max]`.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyColumn`] on an empty column, [`Error::InvalidBins`]
    /// when `bins` is zero.
    pub fn new(column: &Column, bins: usize) -> Result<Self> {
        Ok(Self {
            counts: counts(column, bins)?,
            borders: borders(column, bins)?,
        })
    }

    /// Bins the column with the bin count chosen by
    /// [`sturges_bins`].
    ///
    /// # Errors
    ///
    /// Same conditions as [`new`](Self::new).
    pub fn sturges(column: &Column) -> Result<Self> {
        Self::new(column, sturges_bins(column.len()))
    }

    /// Bins the column against caller-supplied borders.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidBins`] when fewer than two borders are given.
    pub fn from_borders(column: &Column, borders: &[f64]) -> Result<Self> {
        let counts = counts_with_borders(column, borders)?;
        Ok(Self {
            counts,
            borders: borders.to_vec(),
        })
    }

    /// Per-bin occupancy counts.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Bin borders, one more than the number of bins.
    pub fn borders(&self) -> &[f64] {
        &self.borders
    }

    /// Number of bins.
    pub fn bins(&self) -> usize {
        self.counts.len()
    }
}

/// Number of bins suggested by Sturges' rule, `ceil(log2(n) + 1)`.
///
/// Returns one for an empty input so a degenerate histogram still has a
/// bin to land in.
///
/// # Examples
///
/// ```
/// use col_stats::histogram::sturges_bins;
/// assert_eq!(sturges_bins(1), 1);
/// assert_eq!(sturges_bins(100), 8);
/// ```
pub fn sturges_bins(len: usize) -> usize {
    if len == 0 {
        return 1;
    }
    ((len as f64).log2() + 1.0).ceil() as usize
}

/// Equal-width bin borders spanning the column's `[min, max]`.
///
/// Returns `bins + 1` values; the first equals the minimum and the last
/// the maximum. A constant column yields a zero-width span whose bins
/// all share one border value.
///
/// # Errors
///
/// [`Error::EmptyColumn`] on an empty column, [`Error::InvalidBins`]
/// when `bins` is zero.
pub fn borders(column: &Column, bins: usize) -> Result<Vec<f64>> {
    if bins == 0 {
        return Err(Error::InvalidBins);
    }
    let (min, max) = match (column.min(), column.max()) {
        (Some(min), Some(max)) => (min, max),
        _ => return Err(Error::EmptyColumn),
    };
    let step = (max - min) / bins as f64;
    let mut edges = Vec::with_capacity(bins + 1);
    for i in 0..bins {
        edges.push(min + step * i as f64);
    }
    edges.push(max);
    Ok(edges)
}

/// Borders with the bin count chosen by [`sturges_bins`].
///
/// # Errors
///
/// Same conditions as [`borders`].
pub fn borders_sturges(column: &Column) -> Result<Vec<f64>> {
    borders(column, sturges_bins(column.len()))
}

/// Bins the column into `bins` equal-width bins and returns the counts.
///
/// Values map to `floor((v - min) / step)`; the maximum value folds into
/// the last bin rather than opening a new one, so the counts always sum
/// to the column length.
///
/// # Errors
///
/// [`Error::EmptyColumn`] on an empty column, [`Error::InvalidBins`]
/// when `bins` is zero.
///
/// # Examples
///
/// ```
/// use col_stats::{Column, histogram};
/// let col = Column::from_values(vec![1.0, 1.0, 1.0, 5.0, 5.0, 5.0]);
/// assert_eq!(histogram::counts(&col, 2).unwrap(), vec![3, 3]);
/// ```
pub fn counts(column: &Column, bins: usize) -> Result<Vec<usize>> {
    if bins == 0 {
        return Err(Error::InvalidBins);
    }
    let (min, max) = match (column.min(), column.max()) {
        (Some(min), Some(max)) => (min, max),
        _ => return Err(Error::EmptyColumn),
    };
    let mut counts = vec![0; bins];
    if min == max {
        // Zero-width span: everything lands in the first bin.
        counts[0] = column.len();
        return Ok(counts);
    }
    let step = (max - min) / bins as f64;
    for &v in column.iter() {
        let mut idx = ((v - min) / step).floor() as usize;
        if idx >= bins {
            idx = bins - 1;
        }
        counts[idx] += 1;
    }
    Ok(counts)
}

/// Counts with the bin count chosen by [`sturges_bins`].
///
/// # Errors
///
/// Same conditions as [`counts`].
pub fn counts_sturges(column: &Column) -> Result<Vec<usize>> {
    counts(column, sturges_bins(column.len()))
}

/// Bins the column against explicit, ascending borders.
///
/// Each value takes the first bin whose upper border is at or above it,
/// so a value sitting exactly on an internal border stays in the lower
/// bin. Values below the first border clamp into the first bin and
/// values beyond the last border clamp into the last, so the counts sum
/// to the column length for any border set.
///
/// # Errors
///
/// [`Error::InvalidBins`] when fewer than two borders are given.
pub fn counts_with_borders(column: &Column, borders: &[f64]) -> Result<Vec<usize>> {
    if borders.len() < 2 {
        return Err(Error::InvalidBins);
    }
    let bins = borders.len() - 1;
    let mut counts = vec![0; bins];
    for &v in column.iter() {
        let idx = borders[1..bins]
            .iter()
            .position(|&b| v <= b)
            .unwrap_or(bins - 1);
        counts[idx] += 1;
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(values: &[f64]) -> Column {
        Column::from_values(values.to_vec())
    }

    #[test]
    fn two_cluster_split() {
        let c = col(&[1.0, 1.0, 1.0, 5.0, 5.0, 5.0]);
        assert_eq!(counts(&c, 2).unwrap(), vec![3, 3]);
    }

    #[test]
    fn maximum_folds_into_last_bin() {
        let c = col(&[0.0, 1.0, 2.0, 3.0, 4.0]);
        // 4.0 would index past the end; it belongs to the last bin.
        assert_eq!(counts(&c, 4).unwrap(), vec![1, 1, 1, 2]);
    }

    #[test]
    fn counts_sum_to_length() {
        let c = col(&[0.3, 1.7, 2.2, 2.9, 3.1, 4.4, 4.9, 0.1]);
        for bins in 1..6 {
            let total: usize = counts(&c, bins).unwrap().iter().sum();
            assert_eq!(total, c.len());
        }
    }

    #[test]
    fn constant_column_fills_first_bin() {
        let c = col(&[2.0, 2.0, 2.0]);
        assert_eq!(counts(&c, 3).unwrap(), vec![3, 0, 0]);
    }

    #[test]
    fn rejects_degenerate_input() {
        assert_eq!(counts(&Column::new(), 3), Err(Error::EmptyColumn));
        assert_eq!(counts(&col(&[1.0]), 0), Err(Error::InvalidBins));
        assert_eq!(
            counts_with_borders(&col(&[1.0]), &[0.0]),
            Err(Error::InvalidBins)
        );
        assert_eq!(borders(&Column::new(), 2), Err(Error::EmptyColumn));
    }

    #[test]
    fn sturges_rule_reference_points() {
        assert_eq!(sturges_bins(0), 1);
        assert_eq!(sturges_bins(1), 1);
        assert_eq!(sturges_bins(2), 2);
        assert_eq!(sturges_bins(64), 7);
        assert_eq!(sturges_bins(100), 8);
        assert_eq!(sturges_bins(1000), 11);
    }

    #[test]
    fn borders_span_min_to_max() {
        let c = col(&[0.0, 10.0, 5.0]);
        let edges = borders(&c, 2).unwrap();
        assert_eq!(edges, vec![0.0, 5.0, 10.0]);
    }

    #[test]
    fn explicit_borders_clamp_outliers() {
        let c = col(&[-5.0, 0.5, 1.5, 99.0]);
        // Bins: up to 1, then up to 2; out-of-span values clamp inward.
        assert_eq!(counts_with_borders(&c, &[0.0, 1.0, 2.0]).unwrap(), vec![2, 2]);
    }

    #[test]
    fn border_equal_value_stays_in_lower_bin() {
        let c = col(&[1.0]);
        assert_eq!(counts_with_borders(&c, &[0.0, 1.0, 2.0]).unwrap(), vec![1, 0]);

        let c = col(&[0.0, 1.0, 1.0, 2.0]);
        assert_eq!(counts_with_borders(&c, &[0.0, 1.0, 2.0]).unwrap(), vec![3, 1]);
    }

    #[test]
    fn histogram_struct_ties_counts_to_borders() {
        let c = col(&[1.0, 2.0, 3.0, 4.0]);
        let h = Histogram::new(&c, 3).unwrap();
        assert_eq!(h.bins(), 3);
        assert_eq!(h.borders().len(), 4);
        assert_eq!(h.counts().iter().sum::<usize>(), c.len());

        let h = Histogram::sturges(&c).unwrap();
        assert_eq!(h.bins(), sturges_bins(4));

        let h = Histogram::from_borders(&c, &[0.0, 2.5, 5.0]).unwrap();
        assert_eq!(h.counts(), &[2, 2]);
    }
}
