//! IAM policy documents and extraction of the roles they allow assuming.

pub mod resolver;

use serde::Deserialize;
use thiserror::Error;

pub use resolver::{resolve_encoded_policy, resolve_policy_document};

/// The action a statement must allow for its resources to count as assumable roles
pub const ASSUME_ROLE_ACTION: &str = "sts:AssumeRole";

/// IAM allows most policy elements to be a single value or a list of values
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Single(T),
    Multiple(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            Self::Single(value) => std::slice::from_ref(value).iter(),
            Self::Multiple(values) => values.iter(),
        }
    }
}

/// Policy statement, reduced to the elements relevant for role discovery
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    #[serde(default)]
    pub effect: Option<String>,
    #[serde(default)]
    pub action: Option<OneOrMany<String>>,
    #[serde(default)]
    pub resource: Option<OneOrMany<String>>,
}

impl Statement {
    /// A statement grants assume-role when it is not a deny and names
    /// `sts:AssumeRole` verbatim. An absent effect counts as allow.
    pub fn allows_assume_role(&self) -> bool {
        let allowed = self.effect.as_deref().map_or(true, |effect| effect == "Allow");
        allowed
            && self
                .action
                .as_ref()
                .is_some_and(|actions| actions.iter().any(|a| a == ASSUME_ROLE_ACTION))
    }
}

/// Policy document structure
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    #[serde(default)]
    pub version: Option<String>,
    pub statement: OneOrMany<Statement>,
}

#[derive(Error, Debug)]
pub enum PolicyDocumentError {
    #[error("Failed to URL decode policy document: invalid escape at byte {position}")]
    InvalidEscape { position: usize },
    #[error("Failed to URL decode policy document: {0}")]
    Decode(#[from] std::str::Utf8Error),
    #[error("Failed to parse policy document JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
