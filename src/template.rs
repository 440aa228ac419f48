//! Message templates with a single payload placeholder.

use std::fs;
use std::path::Path;

use crate::error::{HashDosError, Result};

/// Marker replaced by the generated payload unless a template says otherwise.
pub const DEFAULT_PLACEHOLDER: &str = "$$PAYLOADATTR$$";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    text: String,
    placeholder: String,
}

impl MessageTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }

    /// Use a custom marker. An empty marker would match everywhere and is
    /// rejected.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Result<Self> {
        let placeholder = placeholder.into();
        if placeholder.is_empty() {
            return Err(HashDosError::config("placeholder must not be empty"));
        }
        self.placeholder = placeholder;
        Ok(self)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(fs::read_to_string(path)?))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Occurrences of the marker, overlapping ones included.
    fn count_markers(&self) -> usize {
        let marker = self.placeholder.as_str();
        let mut found = 0;
        let mut from = 0;
        while let Some(pos) = self.text[from..].find(marker) {
            found += 1;
            let start = from + pos;
            // Step one char past the hit so shared prefixes/suffixes still match
            from = start + self.text[start..].chars().next().map_or(1, char::len_utf8);
        }
        found
    }

    /// Check that the marker appears exactly once.
    pub fn validate(&self) -> Result<()> {
        let found = self.count_markers();
        if found != 1 {
            return Err(HashDosError::Template {
                marker: self.placeholder.clone(),
                found,
            });
        }
        Ok(())
    }

    /// Replace the marker with `payload`.
    pub fn substitute(&self, payload: &str) -> Result<String> {
        self.validate()?;
        Ok(self.fill(payload))
    }

    /// Replace the first marker without checking the count. Callers must
    /// have run [`Self::validate`].
    pub(crate) fn fill(&self, payload: &str) -> String {
        self.text.replacen(self.placeholder.as_str(), payload, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute_custom_marker() {
        let template = MessageTemplate::new("<a>$$X$$</a>")
            .with_placeholder("$$X$$")
            .unwrap();
        let body = template.substitute(r#"attr0="k""#).unwrap();
        assert_eq!(body, r#"<a>attr0="k"</a>"#);
        assert!(!body.contains("$$X$$"));
    }

    #[test]
    fn test_default_marker() {
        let template = MessageTemplate::new("<e $$PAYLOADATTR$$/>");
        assert_eq!(template.substitute("a=\"b\"").unwrap(), "<e a=\"b\"/>");
    }

    #[test]
    fn test_missing_marker() {
        let err = MessageTemplate::new("<a/>").substitute("x").unwrap_err();
        assert!(matches!(err, HashDosError::Template { found: 0, .. }));
    }

    #[test]
    fn test_duplicate_marker() {
        let template = MessageTemplate::new("<a $$PAYLOADATTR$$><b $$PAYLOADATTR$$/></a>");
        let err = template.substitute("x").unwrap_err();
        assert!(matches!(err, HashDosError::Template { found: 2, .. }));
    }

    #[test]
    fn test_overlapping_markers_count_twice() {
        let template = MessageTemplate::new("<a $$PAYLOADATTR$$PAYLOADATTR$$/>");
        let err = template.substitute("X").unwrap_err();
        assert!(matches!(err, HashDosError::Template { found: 2, .. }));

        let template = MessageTemplate::new("aaa").with_placeholder("aa").unwrap();
        assert!(matches!(
            template.validate(),
            Err(HashDosError::Template { found: 2, .. })
        ));
    }

    #[test]
    fn test_marker_count_with_multibyte_text() {
        let template = MessageTemplate::new("<ä $$PAYLOADATTR$$ ö/>");
        assert_eq!(template.substitute("k").unwrap(), "<ä k ö/>");
    }

    #[test]
    fn test_payload_containing_marker_is_not_rescanned() {
        let template = MessageTemplate::new("[$$PAYLOADATTR$$]");
        assert_eq!(
            template.substitute("$$PAYLOADATTR$$").unwrap(),
            "[$$PAYLOADATTR$$]"
        );
    }

    #[test]
    fn test_empty_placeholder_rejected() {
        assert!(matches!(
            MessageTemplate::new("x").with_placeholder(""),
            Err(HashDosError::Configuration(_))
        ));
    }
}
