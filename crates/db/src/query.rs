//! Filters, sort keys and projections understood by every store.

use serde_json::{Map, Value};

/// One field condition of a [`Filter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Field equals the value; an array field matches when any element does
    Eq { field: String, value: String },
    /// Same as `Eq`, comparing case-insensitively
    EqIgnoreCase { field: String, value: String },
}

impl Condition {
    pub fn field(&self) -> &str {
        match self {
            Condition::Eq { field, .. } | Condition::EqIgnoreCase { field, .. } => field,
        }
    }
}

/// Conjunction of field conditions. An empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    /// Filter matching every document
    pub fn all() -> Self {
        Self::default()
    }

    /// Field equals `value`. When the stored field is an array the condition
    /// holds if any element equals `value`.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.conditions.push(Condition::Eq {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// String field equals `value`, ignoring case
    pub fn eq_ignore_case(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.conditions.push(Condition::EqIgnoreCase {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }
}

/// Ascending single-field sort key; documents without the field come first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
}

impl Sort {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

/// Filter, optional sort and optional field projection for `find`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub filter: Filter,
    pub sort: Option<Sort>,
    pub projection: Option<Vec<String>>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Keep only the named fields in returned documents
    pub fn project(mut self, fields: &[&str]) -> Self {
        self.projection = Some(fields.iter().map(|f| f.to_string()).collect());
        self
    }

    /// Apply the projection to a document body
    pub fn shape(&self, body: Value) -> Value {
        match (&self.projection, body) {
            (Some(fields), Value::Object(map)) => {
                let projected: Map<String, Value> = map
                    .into_iter()
                    .filter(|(key, _)| fields.iter().any(|f| f == key))
                    .collect();
                Value::Object(projected)
            }
            (_, body) => body,
        }
    }
}
