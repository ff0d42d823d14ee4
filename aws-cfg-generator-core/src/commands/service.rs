//! Config generator service layer
//!
//! The service holds the AWS clients for one run and exposes one operation per
//! output format. Argument parsing stays with the adapters (the CLI), the
//! service only sees already validated options.

use crate::aws::context::AwsContext;

/// Main service struct that holds the AWS clients and runs the generators
pub struct ConfigGeneratorService {
    pub(crate) context: AwsContext,
}

impl ConfigGeneratorService {
    /// Create a new service instance with AWS clients
    ///
    /// Credentials and region are resolved through the default provider chain,
    /// so `AWS_PROFILE`, `AWS_REGION` and friends apply as usual.
    pub async fn new() -> Self {
        Self {
            context: AwsContext::load().await,
        }
    }

    // generate_vault_config() is in vault.rs
    // generate_switch_roles_config() is in switch_roles.rs
}
