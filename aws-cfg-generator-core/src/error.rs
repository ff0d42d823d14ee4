//! Crate-level error type

use std::path::PathBuf;

use thiserror::Error;

use crate::aws::AwsError;
use crate::policy::PolicyDocumentError;

#[derive(Error, Debug)]
pub enum ConfigGeneratorError {
    #[error(transparent)]
    Aws(#[from] AwsError),

    #[error("Could not resolve roles from policy '{policy}': {source}")]
    Policy {
        policy: String,
        #[source]
        source: PolicyDocumentError,
    },

    #[error("Could not load config '{}': {message}", path.display())]
    ConfigLoad { path: PathBuf, message: String },

    #[error("Could not save config '{}': {source}", path.display())]
    ConfigSave {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Source profile section '[{0}]' not found")]
    MissingSourceProfile(String),
}

impl ConfigGeneratorError {
    pub fn policy(policy: impl Into<String>, source: PolicyDocumentError) -> Self {
        Self::Policy {
            policy: policy.into(),
            source,
        }
    }
}

pub type ConfigGeneratorResult<T> = Result<T, ConfigGeneratorError>;
