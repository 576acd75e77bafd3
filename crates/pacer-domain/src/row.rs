//! Single-row tabular records exchanged with the regression artifact

use std::fmt;

/// Column holding the sex code
pub const SEX_COLUMN: &str = "Płeć";

/// Column holding the age in years
pub const AGE_COLUMN: &str = "Wiek";

/// Column holding the 5 km pace in minutes per kilometre
pub const PACE_COLUMN: &str = "5 km Tempo";

/// Column the predictor appends with its result (seconds)
pub const PREDICTION_COLUMN: &str = "prediction_label";

/// A single cell value
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Categorical or free-text value
    Text(String),

    /// Whole number
    Integer(i64),

    /// Real number
    Number(f64),
}

impl Cell {
    /// Numeric view of the cell, if it holds a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Integer(v) => Some(*v as f64),
            Cell::Number(v) => Some(*v),
            Cell::Text(_) => None,
        }
    }

    /// Text view of the cell, if it holds text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Integer(v) => write!(f, "{}", v),
            Cell::Number(v) => write!(f, "{}", v),
        }
    }
}

/// An ordered single-row record of named columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionRow {
    columns: Vec<(String, Cell)>,
}

impl PredictionRow {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column, replacing any existing value under the same name
    pub fn push(&mut self, column: impl Into<String>, value: Cell) {
        let column = column.into();
        match self.columns.iter_mut().find(|(name, _)| *name == column) {
            Some((_, existing)) => *existing = value,
            None => self.columns.push((column, value)),
        }
    }

    /// Look up a column by name
    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Iterate over columns in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the row has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Read the predicted value appended by a predictor
    pub fn prediction(&self) -> Option<f64> {
        self.get(PREDICTION_COLUMN).and_then(Cell::as_f64)
    }
}
