//! AWS IAM client wrapper for group and policy lookups

use crate::aws::{AwsError, AwsResult, IamApi};
use async_trait::async_trait;
use aws_sdk_iam::error::DisplayErrorContext;
use aws_sdk_iam::Client as IamClient;

pub struct AwsIamClient {
    client: IamClient,
}

impl AwsIamClient {
    pub fn new(client: IamClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IamApi for AwsIamClient {
    async fn list_groups_for_user(&self, user_name: &str) -> AwsResult<Vec<String>> {
        let groups = self
            .client
            .list_groups_for_user()
            .user_name(user_name)
            .into_paginator()
            .items()
            .send()
            .try_collect()
            .await
            .map_err(|e| {
                AwsError::IamError(format!(
                    "Failed to list groups for user '{user_name}': {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        Ok(groups
            .into_iter()
            .map(|group| group.group_name().to_string())
            .collect())
    }

    async fn list_group_policies(&self, group_name: &str) -> AwsResult<Vec<String>> {
        self.client
            .list_group_policies()
            .group_name(group_name)
            .into_paginator()
            .items()
            .send()
            .try_collect()
            .await
            .map_err(|e| {
                AwsError::IamError(format!(
                    "Failed to list inline policies of group '{group_name}': {}",
                    DisplayErrorContext(&e)
                ))
            })
    }

    async fn get_group_policy(&self, group_name: &str, policy_name: &str) -> AwsResult<String> {
        let response = self
            .client
            .get_group_policy()
            .group_name(group_name)
            .policy_name(policy_name)
            .send()
            .await
            .map_err(|e| {
                AwsError::IamError(format!(
                    "Failed to get policy '{policy_name}' of group '{group_name}': {}",
                    DisplayErrorContext(&e)
                ))
            })?;
        Ok(response.policy_document().to_string())
    }

    async fn list_attached_group_policies(&self, group_name: &str) -> AwsResult<Vec<String>> {
        let attached = self
            .client
            .list_attached_group_policies()
            .group_name(group_name)
            .into_paginator()
            .items()
            .send()
            .try_collect()
            .await
            .map_err(|e| {
                AwsError::IamError(format!(
                    "Failed to list attached policies of group '{group_name}': {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        Ok(attached
            .into_iter()
            .filter_map(|policy| policy.policy_arn().map(str::to_string))
            .collect())
    }

    async fn get_default_policy_document(&self, policy_arn: &str) -> AwsResult<String> {
        let policy = self
            .client
            .get_policy()
            .policy_arn(policy_arn)
            .send()
            .await
            .map_err(|e| {
                AwsError::IamError(format!(
                    "Failed to get policy '{policy_arn}': {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        let version_id = policy
            .policy()
            .and_then(|p| p.default_version_id())
            .ok_or_else(|| {
                AwsError::IamError(format!("Policy '{policy_arn}' has no default version"))
            })?;

        let version = self
            .client
            .get_policy_version()
            .policy_arn(policy_arn)
            .version_id(version_id)
            .send()
            .await
            .map_err(|e| {
                AwsError::IamError(format!(
                    "Failed to get version '{version_id}' of policy '{policy_arn}': {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        version
            .policy_version()
            .and_then(|v| v.document())
            .map(str::to_string)
            .ok_or_else(|| {
                AwsError::IamError(format!(
                    "Version '{version_id}' of policy '{policy_arn}' has no document"
                ))
            })
    }
}
