//! Inline `style` attribute handling.
//!
//! Declarations are kept in first-seen order. Setting an existing property
//! replaces its value in place; new properties are appended. Serialization
//! joins `prop: value` pairs with `"; "`.

use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    /// Parse a `style` attribute value. Declarations missing a property or
    /// a value are dropped; later duplicates overwrite earlier ones.
    pub fn parse(source: &str) -> Self {
        let mut style = InlineStyle::default();
        for rule in source.split(';') {
            if let Some((prop, value)) = rule.split_once(':') {
                let prop = prop.trim();
                let value = value.trim();
                if !prop.is_empty() && !value.is_empty() {
                    style.set(prop, value);
                }
            }
        }
        style
    }

    pub fn set(&mut self, property: &str, value: &str) {
        match self
            .declarations
            .iter_mut()
            .find(|(existing, _)| existing == property)
        {
            Some((_, current)) => *current = value.to_string(),
            None => self
                .declarations
                .push((property.to_string(), value.to_string())),
        }
    }

    /// Overlay every declaration of `patch`; patch values win.
    pub fn merge(&mut self, patch: &InlineStyle) {
        for (prop, value) in &patch.declarations {
            self.set(prop, value);
        }
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (prop, value)) in self.declarations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", prop, value)?;
        }
        Ok(())
    }
}

/// Apply a single property to an existing `style` attribute value.
pub fn overlay_property(existing: &str, property: &str, value: &str) -> String {
    let mut style = InlineStyle::parse(existing);
    style.set(property, value);
    style.to_string()
}

/// Apply a `prop: value; ...` patch to an existing `style` attribute value.
pub fn overlay_patch(existing: &str, patch: &str) -> String {
    let mut style = InlineStyle::parse(existing);
    style.merge(&InlineStyle::parse(patch));
    style.to_string()
}
