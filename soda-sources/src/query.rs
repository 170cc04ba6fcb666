//! SoQL fetch options
//!
//! Every option is optional. Expressions are passed to the remote verbatim;
//! nothing here parses or checks SoQL.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoqlQuery {
    pub select: Option<String>,
    pub where_clause: Option<String>,
    pub order: Option<String>,
    pub group: Option<String>,
    pub having: Option<String>,
    /// Full-text search (`$q`)
    pub search: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    /// Drop the `:id`, `:created_at`, `:updated_at` system fields
    pub exclude_system_fields: Option<bool>,
    /// Simple equality filters (`?field=value`), in insertion order
    pub filters: Vec<(String, String)>,
}

impl SoqlQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(mut self, columns: impl Into<String>) -> Self {
        self.select = Some(columns.into());
        self
    }

    pub fn where_clause(mut self, predicate: impl Into<String>) -> Self {
        self.where_clause = Some(predicate.into());
        self
    }

    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn having(mut self, having: impl Into<String>) -> Self {
        self.having = Some(having.into());
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn exclude_system_fields(mut self, exclude: bool) -> Self {
        self.exclude_system_fields = Some(exclude);
        self
    }

    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    /// Query parameters in a stable order: `$`-options first, then filters.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();

        let mut push = |key: &str, value: Option<String>| {
            if let Some(v) = value {
                params.push((key.to_string(), v));
            }
        };

        push("$select", self.select.clone());
        push("$where", self.where_clause.clone());
        push("$order", self.order.clone());
        push("$group", self.group.clone());
        push("$having", self.having.clone());
        push("$q", self.search.clone());
        push("$limit", self.limit.map(|l| l.to_string()));
        push("$offset", self.offset.map(|o| o.to_string()));
        push(
            "$$exclude_system_fields",
            self.exclude_system_fields.map(|e| e.to_string()),
        );

        params.extend(self.filters.iter().cloned());
        params
    }

    pub fn is_empty(&self) -> bool {
        self.to_params().is_empty()
    }
}
