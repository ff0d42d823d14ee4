//! AWS SDK integration: client wrappers, the API traits discovery runs against,
//! and IAM role ARN parsing.

pub mod arn;
pub mod context;
pub mod iam_client;
pub mod organizations;
pub mod sts;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AwsError {
    #[error("IAM client error: {0}")]
    IamError(String),
    #[error("STS client error: {0}")]
    StsError(String),
    #[error("Organizations client error: {0}")]
    OrganizationsError(String),
    #[error("Principal resolution error: {0}")]
    PrincipalError(String),
}

pub type AwsResult<T> = Result<T, AwsError>;

/// One page of Organizations `ListAccounts`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountPage {
    /// `(account id, account name)` pairs in the order the API returned them
    pub accounts: Vec<(String, String)>,
    pub next_token: Option<String>,
}

/// The IAM calls needed to walk a user's groups and their policies.
///
/// Policy documents are returned exactly as IAM hands them out, i.e. still
/// percent-encoded.
#[async_trait]
pub trait IamApi: Send + Sync {
    async fn list_groups_for_user(&self, user_name: &str) -> AwsResult<Vec<String>>;

    async fn list_group_policies(&self, group_name: &str) -> AwsResult<Vec<String>>;

    async fn get_group_policy(&self, group_name: &str, policy_name: &str) -> AwsResult<String>;

    /// Returns the ARNs of the managed policies attached to the group.
    async fn list_attached_group_policies(&self, group_name: &str) -> AwsResult<Vec<String>>;

    /// Fetches the document of the policy's default version.
    async fn get_default_policy_document(&self, policy_arn: &str) -> AwsResult<String>;
}

#[async_trait]
pub trait StsApi: Send + Sync {
    /// ARN of the principal whose credentials are in use.
    async fn caller_arn(&self) -> AwsResult<String>;
}

#[async_trait]
pub trait OrganizationsApi: Send + Sync {
    async fn list_accounts(&self, next_token: Option<String>) -> AwsResult<AccountPage>;
}
