/// Fact/query template errors, raised at construction time.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TemplateError {
    #[error("template '{template}' is missing placeholder {{{placeholder}}}")]
    MissingPlaceholder { template: String, placeholder: String },

    #[error("template '{template}' uses unknown placeholder {{{placeholder}}}")]
    UnknownPlaceholder { template: String, placeholder: String },

    #[error("template identifier must not be empty")]
    EmptyIdentifier,

    #[error("probability {probability} for '{identifier}' is outside [0, 1]")]
    InvalidProbability { identifier: String, probability: f64 },
}
