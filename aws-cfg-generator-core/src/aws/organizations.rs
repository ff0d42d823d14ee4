//! AWS Organizations client wrapper for listing member accounts

use async_trait::async_trait;
use aws_sdk_organizations::error::DisplayErrorContext;
use aws_sdk_organizations::Client as OrganizationsClient;

use crate::aws::{AccountPage, AwsError, AwsResult, OrganizationsApi};

pub struct AwsOrganizationsClient {
    client: OrganizationsClient,
}

impl AwsOrganizationsClient {
    pub fn new(client: OrganizationsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrganizationsApi for AwsOrganizationsClient {
    async fn list_accounts(&self, next_token: Option<String>) -> AwsResult<AccountPage> {
        let response = self
            .client
            .list_accounts()
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| {
                AwsError::OrganizationsError(format!(
                    "Failed to list organization member accounts: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        // accounts without an id or a name are of no use for naming profiles
        let accounts = response
            .accounts()
            .iter()
            .filter_map(|account| match (account.id(), account.name()) {
                (Some(id), Some(name)) => Some((id.to_string(), name.to_string())),
                _ => None,
            })
            .collect();

        Ok(AccountPage {
            accounts,
            next_token: response.next_token().map(str::to_string),
        })
    }
}
