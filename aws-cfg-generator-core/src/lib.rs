//! This crate provides the core business logic for aws-cfg-generator:
//! - Discovery of the IAM roles a user may assume through their groups
//! - Account name resolution through AWS Organizations
//! - Profile naming and ordering
//! - Rendering of aws-vault and aws-extend-switch-roles configuration
//!

pub mod accounts;
pub mod aws;
pub mod commands;
pub mod discovery;
pub mod error;
pub mod order;
pub mod policy;
pub mod profile;
pub mod render;

#[cfg(test)]
mod test_utils;

// Re-exports for a small, focused public API
pub use accounts::AccountDirectory;
pub use aws::AwsError;
pub use commands::{ConfigGeneratorService, GenerateSummary, SwitchRolesOptions, VaultOptions};
pub use error::{ConfigGeneratorError, ConfigGeneratorResult};
pub use profile::Profile;
pub use render::switch_roles::{parse_color, DEFAULT_COLOR};
pub use render::vault::DEFAULT_SOURCE_PROFILE;
pub use render::ColorScheme;
