//! Style declarations
//!
//! Styles are kept as an ordered list of `property: value` declarations.
//! Setting a property that is already present replaces it in place. The list
//! is rendered to css text only when it is written to the surface.
//!
//! Property names and values are opaque: no cascade or validation happens here.

use std::fmt;

/// A single `property: value` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Declaration {
            property: property.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{};", self.property, self.value)
    }
}

/// Ordered collection of declarations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    declarations: Vec<Declaration>,
}

impl Style {
    /// Create an empty style
    pub fn new() -> Self {
        Style {
            declarations: Vec::new(),
        }
    }

    /// Parse css text such as `position:absolute; top:50%;`
    ///
    /// Fragments without a `:` are ignored.
    pub fn parse(css_text: &str) -> Self {
        let mut style = Style::new();
        for fragment in css_text.split(';') {
            if let Some((property, value)) = fragment.split_once(':') {
                let property = property.trim();
                if !property.is_empty() {
                    style.set(property, value.trim());
                }
            }
        }
        style
    }

    /// Builder form of [`Style::set`]
    pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    /// Set a property, replacing an existing declaration in place
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        let property = property.into();
        let value = value.into();
        match self
            .declarations
            .iter_mut()
            .find(|d| d.property == property)
        {
            Some(existing) => existing.value = value,
            None => self.declarations.push(Declaration { property, value }),
        }
    }

    /// Remove a property
    pub fn remove(&mut self, property: &str) -> Option<String> {
        let pos = self
            .declarations
            .iter()
            .position(|d| d.property == property)?;
        Some(self.declarations.remove(pos).value)
    }

    /// Get a property value
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|d| d.property == property)
            .map(|d| d.value.as_str())
    }

    /// Check if style has a property
    pub fn has(&self, property: &str) -> bool {
        self.get(property).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter()
    }

    /// Merge another style into this one (other takes precedence)
    pub fn merge(mut self, other: &Style) -> Self {
        for declaration in &other.declarations {
            self.set(declaration.property.clone(), declaration.value.clone());
        }
        self
    }

    /// Render as css text, e.g. `width:10px;height:20px;`
    pub fn to_css_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for declaration in &self.declarations {
            write!(f, "{}", declaration)?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Style {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut style = Style::new();
        for (property, value) in iter {
            style.set(property, value);
        }
        style
    }
}
