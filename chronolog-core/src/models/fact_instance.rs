use std::fmt;
use std::sync::Arc;

use crate::constants::MOCK_PROBABILITY;
use crate::errors::TemplateError;
use crate::traits::IFactTemplate;

/// A fact template bound to concrete coordinates.
///
/// Used both as a compile-time declaration (rendered as a mock) and as a
/// query-time input event.
#[derive(Clone)]
pub struct FactInstance {
    template: Arc<dyn IFactTemplate>,
    timestamp: i64,
    probability: f64,
}

impl FactInstance {
    pub fn new(
        template: Arc<dyn IFactTemplate>,
        timestamp: i64,
        probability: f64,
    ) -> Result<Self, TemplateError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(TemplateError::InvalidProbability {
                identifier: template.identifier().to_string(),
                probability,
            });
        }
        Ok(Self {
            template,
            timestamp,
            probability,
        })
    }

    /// A compile-time declaration. Its probability is irrelevant because only
    /// the mock rendering is used.
    pub fn declaration(template: Arc<dyn IFactTemplate>, timestamp: i64) -> Self {
        Self {
            template,
            timestamp,
            probability: MOCK_PROBABILITY,
        }
    }

    pub fn identifier(&self) -> &str {
        self.template.identifier()
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn template(&self) -> &Arc<dyn IFactTemplate> {
        &self.template
    }

    pub fn instantiate(&self) -> String {
        self.template.render(self.timestamp, self.probability)
    }

    pub fn instantiate_mock(&self) -> String {
        self.template.render(self.timestamp, MOCK_PROBABILITY)
    }

    /// Render this fact moved `shift` steps back in time with the mock
    /// probability. This is the key used to match events against nodes.
    /// `None` when the moved timestamp does not fit in an `i64`.
    pub fn rebased_mock(&self, shift: i64) -> Option<String> {
        let timestamp = self.timestamp.checked_sub(shift)?;
        Some(self.template.render(timestamp, MOCK_PROBABILITY))
    }
}

impl fmt::Debug for FactInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactInstance")
            .field("identifier", &self.identifier())
            .field("timestamp", &self.timestamp)
            .field("probability", &self.probability)
            .finish()
    }
}

impl fmt::Display for FactInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.instantiate())
    }
}
