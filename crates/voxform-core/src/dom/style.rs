//! Minimal inline `style` attribute editing.

use std::fmt;

/// Ordered list of `property: value` declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    pub fn parse(source: &str) -> Self {
        let declarations = source
            .split(';')
            .filter_map(|declaration| {
                let (property, value) = declaration.split_once(':')?;
                let property = property.trim().to_ascii_lowercase();
                let value = value.trim();
                if property.is_empty() || value.is_empty() {
                    return None;
                }
                Some((property, value.to_string()))
            })
            .collect();
        Self { declarations }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(property))
            .map(|(_, value)| value.as_str())
    }

    /// Set a property; an empty value removes it, like `el.style.x = ''`.
    pub fn set(&mut self, property: &str, value: &str) {
        if value.trim().is_empty() {
            self.remove(property);
            return;
        }
        match self
            .declarations
            .iter_mut()
            .find(|(name, _)| name.eq_ignore_ascii_case(property))
        {
            Some((_, existing)) => *existing = value.trim().to_string(),
            None => self
                .declarations
                .push((property.to_ascii_lowercase(), value.trim().to_string())),
        }
    }

    pub fn remove(&mut self, property: &str) -> bool {
        let before = self.declarations.len();
        self.declarations
            .retain(|(name, _)| !name.eq_ignore_ascii_case(property));
        self.declarations.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (property, value)) in self.declarations.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}: {};", property, value)?;
        }
        Ok(())
    }
}
