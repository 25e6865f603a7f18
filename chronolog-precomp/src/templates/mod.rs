//! Concrete format-string templates.

mod fact_template;
mod feedback;
mod query_template;

pub use fact_template::{FormatFactTemplate, DEFAULT_FACT_FORMAT};
pub use feedback::ResultFeedback;
pub use query_template::FormatQueryTemplate;
