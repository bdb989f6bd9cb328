use core::ops::{Add, Div, Mul, Neg, Sub};

use ordered_float::OrderedFloat;

use crate::{
    BinaryOp, Header, UnaryOp,
    error::{Error, Result},
};

type ValueSet = hashbrown::HashSet<OrderedFloat<f64>, ahash::RandomState>;

/// An ordered, mutable sequence of `f64` observations with an attached
/// [`Header`].
///
/// Two access policies coexist deliberately and must not be unified:
///
/// - Single-index access ([`get`](Self::get)/[`set`](Self::set)) never
///   fails. Out-of-range indices clamp to the nearest valid index, and
///   negative indices address from the end (`-1` is the last element).
/// - Operations taking an explicit `[start, start + count)` range treat it
///   literally: a range that exceeds the bounds is a programmer error and
///   fails with [`Error::OutOfRange`] instead of being clamped.
///
/// A `Column` is exclusively owned; [`Clone`] produces a fully independent
/// deep copy.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Column {
    values: Vec<f64>,
    header: Header,
}

impl Column {
    /// Creates an empty column with a default header.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty column with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            values: Vec::new(),
            header: Header::new(name),
        }
    }

    /// Creates a column from existing values with a default header.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self {
            values,
            header: Header::default(),
        }
    }

    /// Creates a column from values and an explicit header.
    pub fn with_header(values: Vec<f64>, header: Header) -> Self {
        Self { values, header }
    }

    /// Returns the number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the column holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the metadata header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Returns the metadata header for modification.
    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    /// Returns the values as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Returns the values as a mutable slice.
    ///
    /// Direct writes bypass the index-correction policy; the slice cannot
    /// grow or shrink the column.
    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// Returns an iterator over the values.
    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.values.iter()
    }

    // Maps a possibly negative or out-of-range index to a valid position.
    // None only on an empty column, where no valid position exists.
    fn corrected_index(&self, index: isize) -> Option<usize> {
        if self.values.is_empty() {
            return None;
        }
        let len = self.values.len() as isize;
        let shifted = if index < 0 { len + index } else { index };
        Some(shifted.clamp(0, len - 1) as usize)
    }

    // Validates an explicit range against the current length.
    fn check_range(&self, start: usize, count: usize) -> Result<()> {
        let len = self.values.len();
        match start.checked_add(count) {
            Some(end) if end <= len => Ok(()),
            _ => Err(Error::OutOfRange { start, count, len }),
        }
    }

    /// Returns the value at `index` under the silent-correction policy.
    ///
    /// Non-negative indices clamp into `[0, len - 1]`; negative indices are
    /// offsets from the end (`-1` is the last element) and clamp after the
    /// shift. Never fails; on an empty column there is no valid index to
    /// clamp to and `NAN` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use col_stats::Column;
    /// let col = Column::from_values(vec![1.0, 2.0, 3.0]);
    /// assert_eq!(col.get(0), 1.0);
    /// assert_eq!(col.get(99), 3.0);
    /// assert_eq!(col.get(-1), 3.0);
    /// assert_eq!(col.get(-99), 1.0);
    /// ```
    pub fn get(&self, index: isize) -> f64 {
        match self.corrected_index(index) {
            Some(i) => self.values[i],
            None => f64::NAN,
        }
    }

    /// Writes `value` at `index` under the same correction policy as
    /// [`get`](Self::get). No-op on an empty column.
    pub fn set(&mut self, index: isize, value: f64) {
        if let Some(i) = self.corrected_index(index) {
            self.values[i] = value;
        }
    }

    /// Appends a value.
    pub fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    /// Appends all values from an iterator.
    pub fn extend(&mut self, values: impl IntoIterator<Item = f64>) {
        self.values.extend(values);
    }

    /// Appends `count` values of another column starting at `start`.
    ///
    /// The range is validated against the source column.
    pub fn append_column(&mut self, other: &Column, start: usize, count: usize) -> Result<()> {
        other.check_range(start, count)?;
        self.values.extend_from_slice(&other.values[start..start + count]);
        Ok(())
    }

    /// Removes and returns the value at an exact index.
    pub fn remove_at(&mut self, index: usize) -> Result<f64> {
        self.check_range(index, 1)?;
        Ok(self.values.remove(index))
    }

    /// Removes `count` values starting at `start`.
    pub fn remove_range(&mut self, start: usize, count: usize) -> Result<()> {
        self.check_range(start, count)?;
        self.values.drain(start..start + count);
        Ok(())
    }

    /// Removes every value from `start` to the end.
    pub fn remove_tail(&mut self, start: usize) -> Result<()> {
        let len = self.values.len();
        if start > len {
            return Err(Error::OutOfRange { start, count: 0, len });
        }
        self.values.truncate(start);
        Ok(())
    }

    /// Keeps only the values matching the predicate.
    pub fn retain(&mut self, mut pred: impl FnMut(f64) -> bool) {
        self.values.retain(|&v| pred(v));
    }

    /// Removes every value exactly equal to `value`.
    pub fn remove_value(&mut self, value: f64) {
        self.retain(|v| v != value);
    }

    /// Removes every value within `epsilon` of `value`.
    pub fn remove_value_approx(&mut self, value: f64, epsilon: f64) {
        self.retain(|v| (v - value).abs() >= epsilon);
    }

    /// Removes all values.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Returns the position of the first value exactly equal to `value`,
    /// or `None` if absent. Absence is a sentinel, never an error.
    pub fn index_of(&self, value: f64) -> Option<usize> {
        self.values.iter().position(|&v| v == value)
    }

    /// Like [`index_of`](Self::index_of) but restricted to
    /// `[start, start + count)`. The range itself is validated.
    pub fn index_of_in(&self, value: f64, start: usize, count: usize) -> Result<Option<usize>> {
        self.find_index_in(start, count, |v| v == value)
    }

    /// Returns the position of the last value exactly equal to `value`.
    pub fn last_index_of(&self, value: f64) -> Option<usize> {
        self.values.iter().rposition(|&v| v == value)
    }

    /// Returns the position of the first value matching the predicate.
    pub fn find_index(&self, pred: impl Fn(f64) -> bool) -> Option<usize> {
        self.values.iter().position(|&v| pred(v))
    }

    /// Like [`find_index`](Self::find_index) but restricted to
    /// `[start, start + count)`.
    pub fn find_index_in(
        &self,
        start: usize,
        count: usize,
        pred: impl Fn(f64) -> bool,
    ) -> Result<Option<usize>> {
        self.check_range(start, count)?;
        Ok(self.values[start..start + count]
            .iter()
            .position(|&v| pred(v))
            .map(|i| start + i))
    }

    /// Returns the position of the first value within `epsilon` of `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use col_stats::Column;
    /// let col = Column::from_values(vec![0.1, 0.2, 0.3001]);
    /// assert_eq!(col.find_index_approx(0.3, 1e-3), Some(2));
    /// assert_eq!(col.find_index_approx(0.5, 1e-3), None);
    /// ```
    pub fn find_index_approx(&self, value: f64, epsilon: f64) -> Option<usize> {
        self.find_index(|v| (v - value).abs() < epsilon)
    }

    /// Like [`find_index_approx`](Self::find_index_approx) but restricted
    /// to `[start, start + count)`.
    pub fn find_index_approx_in(
        &self,
        value: f64,
        epsilon: f64,
        start: usize,
        count: usize,
    ) -> Result<Option<usize>> {
        self.find_index_in(start, count, |v| (v - value).abs() < epsilon)
    }

    /// Overwrites the value at an exact, validated index.
    pub fn replace_at(&mut self, index: usize, value: f64) -> Result<()> {
        self.check_range(index, 1)?;
        self.values[index] = value;
        Ok(())
    }

    /// Replaces every occurrence of `old` in `[start, start + count)` with
    /// `new`, returning the number of replacements.
    pub fn replace_in(&mut self, old: f64, new: f64, start: usize, count: usize) -> Result<usize> {
        self.check_range(start, count)?;
        let mut replaced = 0;
        for v in &mut self.values[start..start + count] {
            if *v == old {
                *v = new;
                replaced += 1;
            }
        }
        Ok(replaced)
    }

    /// Replaces every occurrence of `old` with `new` over the whole column.
    pub fn replace(&mut self, old: f64, new: f64) -> usize {
        let len = self.values.len();
        // Whole-column range is always valid.
        self.replace_in(old, new, 0, len).unwrap_or(0)
    }

    /// Replaces every value within `epsilon` of `old` in
    /// `[start, start + count)` with `new`, returning the number of
    /// replacements.
    pub fn replace_approx_in(
        &mut self,
        old: f64,
        new: f64,
        epsilon: f64,
        start: usize,
        count: usize,
    ) -> Result<usize> {
        self.check_range(start, count)?;
        let mut replaced = 0;
        for v in &mut self.values[start..start + count] {
            if (*v - old).abs() < epsilon {
                *v = new;
                replaced += 1;
            }
        }
        Ok(replaced)
    }

    /// Replaces every value within `epsilon` of `old` over the whole column.
    pub fn replace_approx(&mut self, old: f64, new: f64, epsilon: f64) -> usize {
        let len = self.values.len();
        self.replace_approx_in(old, new, epsilon, 0, len).unwrap_or(0)
    }

    /// Applies a pure transform to every value in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use col_stats::Column;
    /// let mut col = Column::from_values(vec![1.0, 2.0, 3.0]);
    /// col.apply(|x| x * x);
    /// assert_eq!(col.as_slice(), &[1.0, 4.0, 9.0]);
    /// ```
    pub fn apply(&mut self, f: impl Fn(f64) -> f64) {
        for v in &mut self.values {
            *v = f(*v);
        }
    }

    /// Applies a pure transform over `[start, start + count)` in place.
    pub fn apply_in(&mut self, f: impl Fn(f64) -> f64, start: usize, count: usize) -> Result<()> {
        self.check_range(start, count)?;
        for v in &mut self.values[start..start + count] {
            *v = f(*v);
        }
        Ok(())
    }

    /// Applies a two-argument transform with a fixed scalar argument.
    pub fn apply_with(&mut self, f: impl Fn(f64, f64) -> f64, arg: f64) {
        for v in &mut self.values {
            *v = f(*v, arg);
        }
    }

    /// Range-restricted [`apply_with`](Self::apply_with).
    pub fn apply_with_in(
        &mut self,
        f: impl Fn(f64, f64) -> f64,
        arg: f64,
        start: usize,
        count: usize,
    ) -> Result<()> {
        self.check_range(start, count)?;
        for v in &mut self.values[start..start + count] {
            *v = f(*v, arg);
        }
        Ok(())
    }

    /// Applies a transform only to the values matching the predicate.
    pub fn apply_where(&mut self, f: impl Fn(f64) -> f64, pred: impl Fn(f64) -> bool) {
        for v in &mut self.values {
            if pred(*v) {
                *v = f(*v);
            }
        }
    }

    /// Range-restricted [`apply_where`](Self::apply_where).
    pub fn apply_where_in(
        &mut self,
        f: impl Fn(f64) -> f64,
        pred: impl Fn(f64) -> bool,
        start: usize,
        count: usize,
    ) -> Result<()> {
        self.check_range(start, count)?;
        for v in &mut self.values[start..start + count] {
            if pred(*v) {
                *v = f(*v);
            }
        }
        Ok(())
    }

    /// Applies a catalogued unary operation to every value.
    ///
    /// # Examples
    ///
    /// ```
    /// use col_stats::{Column, UnaryOp};
    /// let mut col = Column::from_values(vec![1.0, -2.0, 3.0]);
    /// col.apply_op(UnaryOp::Abs);
    /// assert_eq!(col.as_slice(), &[1.0, 2.0, 3.0]);
    /// ```
    pub fn apply_op(&mut self, op: UnaryOp) {
        self.apply(|x| op.eval(x));
    }

    /// Applies a catalogued unary operation over `[start, start + count)`.
    pub fn apply_op_in(&mut self, op: UnaryOp, start: usize, count: usize) -> Result<()> {
        self.apply_in(|x| op.eval(x), start, count)
    }

    /// Applies a catalogued binary operation with a scalar argument.
    pub fn apply_binary_op(&mut self, op: BinaryOp, arg: f64) {
        self.apply_with(|x, a| op.eval(x, a), arg);
    }

    /// Range-restricted [`apply_binary_op`](Self::apply_binary_op).
    pub fn apply_binary_op_in(
        &mut self,
        op: BinaryOp,
        arg: f64,
        start: usize,
        count: usize,
    ) -> Result<()> {
        self.apply_with_in(|x, a| op.eval(x, a), arg, start, count)
    }

    /// Combines two equal-length columns element-wise into a new column.
    ///
    /// The result carries this column's header. Unequal lengths fail with
    /// [`Error::LengthMismatch`]; values are never truncated to the shorter
    /// column.
    ///
    /// # Examples
    ///
    /// ```
    /// use col_stats::{BinaryOp, Column};
    /// let a = Column::from_values(vec![1.0, 2.0, 3.0]);
    /// let b = Column::from_values(vec![10.0, 20.0, 30.0]);
    /// let sum = a.zip_with(&b, BinaryOp::Add).unwrap();
    /// assert_eq!(sum.as_slice(), &[11.0, 22.0, 33.0]);
    /// ```
    pub fn zip_with(&self, other: &Column, op: BinaryOp) -> Result<Column> {
        if self.len() != other.len() {
            return Err(Error::LengthMismatch {
                left: self.len(),
                right: other.len(),
            });
        }
        let values = self
            .values
            .iter()
            .zip(&other.values)
            .map(|(&x, &y)| op.eval(x, y))
            .collect();
        Ok(Column {
            values,
            header: self.header.clone(),
        })
    }

    /// Returns a new column with every value raised to `exp`.
    pub fn powf(&self, exp: f64) -> Column {
        let mut result = self.clone();
        result.apply_binary_op(BinaryOp::Power, exp);
        result
    }

    /// Element-wise power of two equal-length columns.
    pub fn pow_elementwise(&self, other: &Column) -> Result<Column> {
        self.zip_with(other, BinaryOp::Power)
    }

    /// Returns a new column holding the distinct values in first-seen order.
    pub fn unique(&self) -> Column {
        let mut seen = ValueSet::default();
        let values = self
            .values
            .iter()
            .filter(|&&v| seen.insert(OrderedFloat(v)))
            .copied()
            .collect();
        Column {
            values,
            header: self.header.clone(),
        }
    }
}

impl From<Vec<f64>> for Column {
    fn from(values: Vec<f64>) -> Self {
        Self::from_values(values)
    }
}

impl Neg for &Column {
    type Output = Column;

    fn neg(self) -> Column {
        let mut result = self.clone();
        result.apply_op(UnaryOp::Negate);
        result
    }
}

impl Neg for Column {
    type Output = Column;

    fn neg(self) -> Column {
        -&self
    }
}

macro_rules! scalar_ops {
    ($($trait:ident, $method:ident, $op:expr;)*) => {$(
        impl $trait<f64> for &Column {
            type Output = Column;

            fn $method(self, arg: f64) -> Column {
                let mut result = self.clone();
                result.apply_binary_op($op, arg);
                result
            }
        }

        impl $trait<f64> for Column {
            type Output = Column;

            fn $method(self, arg: f64) -> Column {
                (&self).$method(arg)
            }
        }
    )*};
}

scalar_ops! {
    Add, add, BinaryOp::Add;
    Sub, sub, BinaryOp::Subtract;
    Mul, mul, BinaryOp::Multiply;
    Div, div, BinaryOp::Divide;
}

macro_rules! column_ops {
    ($($trait:ident, $method:ident, $op:expr, $what:literal;)*) => {$(
        impl $trait<&Column> for &Column {
            type Output = Column;

            /// Element-wise combination of two equal-length columns.
            ///
            /// # Panics
            ///
            /// Panics on a length mismatch; use
            /// [`Column::zip_with`] for the checked form.
            fn $method(self, rhs: &Column) -> Column {
                match self.zip_with(rhs, $op) {
                    Ok(column) => column,
                    Err(e) => panic!(concat!("column ", $what, ": {}"), e),
                }
            }
        }

        impl $trait<Column> for Column {
            type Output = Column;

            fn $method(self, rhs: Column) -> Column {
                (&self).$method(&rhs)
            }
        }
    )*};
}

column_ops! {
    Add, add, BinaryOp::Add, "addition";
    Sub, sub, BinaryOp::Subtract, "subtraction";
    Mul, mul, BinaryOp::Multiply, "multiplication";
    Div, div, BinaryOp::Divide, "division";
}
