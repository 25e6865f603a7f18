use std::collections::BTreeSet;
use std::sync::LazyLock;

use chronolog_core::constants::{
    PLACEHOLDER_IDENTIFIER, PLACEHOLDER_PROBABILITY, PLACEHOLDER_TIMESTAMP,
};
use chronolog_core::errors::TemplateError;
use chronolog_core::traits::IFactTemplate;
use regex::Regex;

/// `p::identifier(t).`
pub const DEFAULT_FACT_FORMAT: &str = "{probability}::{identifier}({timestamp}).";

const REQUIRED: [&str; 3] = [
    PLACEHOLDER_PROBABILITY,
    PLACEHOLDER_IDENTIFIER,
    PLACEHOLDER_TIMESTAMP,
];

static PLACEHOLDER_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\{([^{}]*)\}").ok());

/// A fact family rendered from a format string with `{identifier}`,
/// `{timestamp}` and `{probability}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatFactTemplate {
    identifier: String,
    format: String,
}

impl FormatFactTemplate {
    /// Template using `DEFAULT_FACT_FORMAT`.
    pub fn new(identifier: impl Into<String>) -> Result<Self, TemplateError> {
        Self::with_format(identifier, DEFAULT_FACT_FORMAT)
    }

    pub fn with_format(
        identifier: impl Into<String>,
        format: impl Into<String>,
    ) -> Result<Self, TemplateError> {
        let identifier = identifier.into();
        let format = format.into();
        if identifier.trim().is_empty() {
            return Err(TemplateError::EmptyIdentifier);
        }
        validate_format(&format)?;
        Ok(Self { identifier, format })
    }

    pub fn format(&self) -> &str {
        &self.format
    }
}

/// Every required placeholder must appear, and nothing else may.
fn validate_format(format: &str) -> Result<(), TemplateError> {
    let found: BTreeSet<&str> = match PLACEHOLDER_RE.as_ref() {
        Some(re) => re
            .captures_iter(format)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect(),
        None => REQUIRED
            .iter()
            .copied()
            .filter(|p| format.contains(&format!("{{{p}}}")))
            .collect(),
    };

    if let Some(unknown) = found.iter().find(|p| !REQUIRED.contains(*p)) {
        return Err(TemplateError::UnknownPlaceholder {
            template: format.to_string(),
            placeholder: unknown.to_string(),
        });
    }
    if let Some(missing) = REQUIRED.iter().find(|p| !found.contains(*p)) {
        return Err(TemplateError::MissingPlaceholder {
            template: format.to_string(),
            placeholder: missing.to_string(),
        });
    }
    Ok(())
}

impl IFactTemplate for FormatFactTemplate {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn render(&self, timestamp: i64, probability: f64) -> String {
        self.format
            .replace(&format!("{{{PLACEHOLDER_IDENTIFIER}}}"), &self.identifier)
            .replace(&format!("{{{PLACEHOLDER_TIMESTAMP}}}"), &timestamp.to_string())
            .replace(&format!("{{{PLACEHOLDER_PROBABILITY}}}"), &probability.to_string())
    }
}
