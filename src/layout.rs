//! Lengths for component dimensions

use std::fmt;

/// A width or height
///
/// Bare numbers are suffixed with the surface's length unit when they are
/// rendered; raw strings (`50%`, `calc(100% - 2em)`, `10vh`) pass through.
#[derive(Debug, Clone, PartialEq)]
pub enum Length {
    /// Number in the surface's native unit
    Number(f64),
    /// Pre-formatted length, passed through unchanged
    Raw(String),
}

impl Length {
    /// Render using `unit` for bare numbers
    pub fn render(&self, unit: &str) -> String {
        match self {
            Length::Number(n) => format!("{}{}", n, unit),
            Length::Raw(s) => s.clone(),
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Number(n) => write!(f, "{}", n),
            Length::Raw(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Length {
    fn from(n: f64) -> Self {
        Length::Number(n)
    }
}

impl From<u32> for Length {
    fn from(n: u32) -> Self {
        Length::Number(n.into())
    }
}

impl From<i32> for Length {
    fn from(n: i32) -> Self {
        Length::Number(n.into())
    }
}

impl From<&str> for Length {
    fn from(s: &str) -> Self {
        Length::Raw(s.to_string())
    }
}

impl From<String> for Length {
    fn from(s: String) -> Self {
        Length::Raw(s)
    }
}
