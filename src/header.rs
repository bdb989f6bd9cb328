use core::fmt;
use std::time::SystemTime;

/// Declared element type of a column.
///
/// Purely descriptive: the stored values are always `f64`, the kind records
/// how they should be interpreted and formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnKind {
    /// Whole numbers stored as `f64`.
    Integer,
    /// Plain floating-point observations.
    #[default]
    Double,
    /// Points in time encoded as `f64`.
    Timestamp,
}

/// Metadata tag attached to a [`Column`](crate::Column).
///
/// A passive value object: the statistical engine never inspects it, it only
/// travels with the column. Two headers are equal iff all five fields match
/// exactly — the creation timestamp included, which makes header equality
/// time-sensitive by design.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    /// Column name.
    pub name: String,
    /// Declared element kind.
    pub kind: ColumnKind,
    /// Free-text description.
    pub description: String,
    /// Display-format hint.
    pub format: String,
    /// Creation timestamp.
    pub created_at: SystemTime,
}

impl Header {
    /// Creates a header with the given name, `Double` kind, empty
    /// description and format, and the current time as timestamp.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::default(),
            description: String::new(),
            format: String::new(),
            created_at: SystemTime::now(),
        }
    }

    /// Sets the element kind.
    #[must_use]
    pub fn with_kind(mut self, kind: ColumnKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the display-format hint.
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Sets an explicit creation timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, created_at: SystemTime) -> Self {
        self.created_at = created_at;
        self
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new("Column")
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:?} {} {}",
            self.name, self.kind, self.description, self.format
        )
    }
}
