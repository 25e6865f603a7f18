use std::fmt;
use std::sync::Arc;

use crate::traits::IQueryTemplate;

/// A query template bound to a timestamp.
#[derive(Clone)]
pub struct QueryInstance {
    template: Arc<dyn IQueryTemplate>,
    timestamp: i64,
}

impl QueryInstance {
    pub fn new(template: Arc<dyn IQueryTemplate>, timestamp: i64) -> Self {
        Self {
            template,
            timestamp,
        }
    }

    pub fn identifier(&self) -> String {
        self.template.identifier()
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn template(&self) -> &Arc<dyn IQueryTemplate> {
        &self.template
    }

    pub fn render(&self) -> String {
        self.template.render_query(self.timestamp)
    }
}

impl fmt::Debug for QueryInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryInstance")
            .field("identifier", &self.identifier())
            .field("timestamp", &self.timestamp)
            .finish()
    }
}
