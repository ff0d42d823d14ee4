//! AWS STS client wrapper for resolving the calling principal

use async_trait::async_trait;
use aws_sdk_sts::error::DisplayErrorContext;
use aws_sdk_sts::Client as StsClient;

use crate::aws::{AwsError, AwsResult, StsApi};

pub struct AwsStsClient {
    client: StsClient,
}

impl AwsStsClient {
    pub fn new(client: StsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StsApi for AwsStsClient {
    /// Return the caller ARN using STS GetCallerIdentity.
    async fn caller_arn(&self) -> AwsResult<String> {
        let out = self
            .client
            .get_caller_identity()
            .send()
            .await
            .map_err(|e| {
                AwsError::StsError(format!(
                    "STS GetCallerIdentity failed: {}",
                    DisplayErrorContext(&e)
                ))
            })?;
        out.arn()
            .map(str::to_string)
            .ok_or_else(|| AwsError::StsError("STS GetCallerIdentity missing Arn".to_string()))
    }
}
