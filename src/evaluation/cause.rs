//! Indeterminate cause trees
//!
//! When evaluation cannot complete, the engine never aborts: it produces an
//! indeterminate result carrying a tree of structured causes. Causes exist
//! for logging and debugging; combining algorithms pass them through
//! unchanged apart from attaching default descriptions at element
//! boundaries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of an indeterminate cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CauseCode {
    /// The element itself is malformed (missing body, unparseable predicate).
    SyntaxError,
    /// A well-formed element could not be evaluated to completion.
    ProcessingError,
}

impl fmt::Display for CauseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SyntaxError => "syntax_error",
            Self::ProcessingError => "processing_error",
        })
    }
}

/// One node of an indeterminate cause tree.
///
/// Trees are acyclic by construction: children are owned, and sharing is
/// replaced by copying when one cause feeds several parents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndeterminateCause {
    /// What went wrong.
    pub code: CauseCode,
    /// Short description; element boundaries overwrite this with the
    /// default `"<element> with id <id> has <code>"` form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Additional context, typically the predicate source that failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Nested causes, in evaluation order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_causes: Vec<IndeterminateCause>,
}

impl IndeterminateCause {
    pub fn new(code: CauseCode) -> Self {
        Self { code, description: None, content: None, sub_causes: Vec::new() }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_sub_causes(mut self, sub_causes: Vec<IndeterminateCause>) -> Self {
        self.sub_causes = sub_causes;
        self
    }

    /// Overwrites the description with the default
    /// `"<element> with id <id> has <code>"` form used at element
    /// boundaries.
    pub fn describe(&mut self, element: &str, id: &str) {
        self.description = Some(format!("{element} with id {id} has {}", self.code));
    }
}
