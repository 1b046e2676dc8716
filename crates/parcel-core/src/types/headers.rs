//! Header bag passed to and returned from the signer
//!
//! Names compare case-insensitively. Inserting a name that is already present
//! replaces both its value and its spelling, so the most recent insert wins.
//! Iteration follows first-insertion order.

use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a header, replacing any existing value under the same name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(idx) => {
                let slot = &mut self.entries[idx];
                slot.0 = name;
                Some(std::mem::replace(&mut slot.1, value))
            }
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|idx| self.entries[idx].1.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.position(name).map(|idx| self.entries.remove(idx).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(name, value)` pairs with names spelled as inserted
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Merge `other` into `self`; entries from `other` win
    pub fn extend(&mut self, other: Headers) {
        for (name, value) in other.entries {
            self.insert(name, value);
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(name))
    }
}

impl<K, V> FromIterator<(K, V)> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (k, v) in iter {
            headers.insert(k, v);
        }
        headers
    }
}

impl IntoIterator for Headers {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl fmt::Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.entries {
            writeln!(f, "{}: {}", name, value)?;
        }
        Ok(())
    }
}
