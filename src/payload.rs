//! Serialization of generated keys into an XML fragment.

use std::fmt;
use std::str::FromStr;

use crate::error::HashDosError;

/// Where the generated keys are placed in the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacementMode {
    /// `attrN="key"`
    #[default]
    Attributes,
    /// `xmlns:nsN="key"`
    Namespaces,
}

impl PlacementMode {
    /// Append one declaration for `key` at position `index`.
    fn render(self, index: usize, key: &str, out: &mut String) {
        out.push_str(match self {
            Self::Attributes => "attr",
            Self::Namespaces => "xmlns:ns",
        });
        out.push_str(&index.to_string());
        out.push_str("=\"");
        out.push_str(key);
        out.push('"');
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Attributes => "attributes",
            Self::Namespaces => "namespaces",
        }
    }
}

impl fmt::Display for PlacementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlacementMode {
    type Err = HashDosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "attributes" | "attrs" => Ok(Self::Attributes),
            "namespaces" | "ns" => Ok(Self::Namespaces),
            other => Err(HashDosError::config(format!(
                "unknown placement mode '{other}'"
            ))),
        }
    }
}

/// Keys in render order, ready to be serialized once.
#[derive(Debug)]
pub struct PayloadFragment {
    mode: PlacementMode,
    keys: Vec<String>,
}

impl PayloadFragment {
    pub fn new(mode: PlacementMode, keys: Vec<String>) -> Self {
        Self { mode, keys }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Render all declarations separated by single spaces.
    pub fn serialize(self) -> String {
        let per_key = self.keys.first().map_or(0, |k| k.len() + 20);
        let mut out = String::with_capacity(self.keys.len() * per_key);
        for (index, key) in self.keys.iter().enumerate() {
            if index > 0 {
                out.push(' ');
            }
            self.mode.render(index, key, &mut out);
        }
        out
    }
}
