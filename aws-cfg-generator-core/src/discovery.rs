//! Discovery of the roles the caller may assume.
//!
//! The caller's IAM groups are walked concurrently: every group fans out into
//! its inline and its attached policies, and every policy is fetched and
//! resolved concurrently as well. Each branch returns its own list of role
//! ARNs which the parent concatenates, so no state is shared between branches.
//! The first failing branch aborts its siblings and fails the whole discovery,
//! because a config generated from a partial view would silently miss roles.

use futures::future::try_join_all;
use log::{debug, info};

use crate::accounts::AccountDirectory;
use crate::aws::arn::{user_name_from_arn, RoleArn};
use crate::aws::{IamApi, OrganizationsApi, StsApi};
use crate::error::{ConfigGeneratorError, ConfigGeneratorResult};
use crate::policy::resolve_encoded_policy;

pub struct RoleDiscovery<'a> {
    iam: &'a dyn IamApi,
    sts: &'a dyn StsApi,
}

impl<'a> RoleDiscovery<'a> {
    pub fn new(iam: &'a dyn IamApi, sts: &'a dyn StsApi) -> Self {
        Self { iam, sts }
    }

    /// Collect the role ARNs granted through all groups of the calling IAM user.
    ///
    /// Order across groups and policies is unspecified; duplicates are kept.
    pub async fn discover(&self) -> ConfigGeneratorResult<Vec<String>> {
        debug!("getting caller identity");
        let caller_arn = self.sts.caller_arn().await?;
        info!("Found user {}", caller_arn);

        let user_name = user_name_from_arn(&caller_arn)?;
        let groups = self.iam.list_groups_for_user(&user_name).await?;
        debug!("Found {} groups for user {}", groups.len(), user_name);

        let per_group = try_join_all(groups.iter().map(|group| self.role_arns_for_group(group)))
            .await?;
        let role_arns: Vec<String> = per_group.into_iter().flatten().collect();

        info!("Found {} roles", role_arns.len());
        debug!("Roles: {:?}", role_arns);
        Ok(role_arns)
    }

    async fn role_arns_for_group(&self, group: &str) -> ConfigGeneratorResult<Vec<String>> {
        debug!("Finding roles for group {}", group);
        let (mut roles, attached) = futures::try_join!(
            self.role_arns_from_inline_policies(group),
            self.role_arns_from_attached_policies(group)
        )?;
        roles.extend(attached);
        Ok(roles)
    }

    async fn role_arns_from_inline_policies(
        &self,
        group: &str,
    ) -> ConfigGeneratorResult<Vec<String>> {
        debug!("finding roles from inline policies of group {}", group);
        let policy_names = self.iam.list_group_policies(group).await?;

        let per_policy = try_join_all(policy_names.iter().map(|policy_name| async move {
            debug!("Finding roles for inline policy {} of group {}", policy_name, group);
            let document = self.iam.get_group_policy(group, policy_name).await?;
            resolve_encoded_policy(&document)
                .map_err(|e| ConfigGeneratorError::policy(format!("{group}/{policy_name}"), e))
        }))
        .await?;

        Ok(per_policy.into_iter().flatten().collect())
    }

    async fn role_arns_from_attached_policies(
        &self,
        group: &str,
    ) -> ConfigGeneratorResult<Vec<String>> {
        debug!("finding roles from attached policies of group {}", group);
        let policy_arns = self.iam.list_attached_group_policies(group).await?;

        let per_policy = try_join_all(policy_arns.iter().map(|policy_arn| async move {
            debug!("Finding roles for attached policy {}", policy_arn);
            let document = self.iam.get_default_policy_document(policy_arn).await?;
            resolve_encoded_policy(&document)
                .map_err(|e| ConfigGeneratorError::policy(policy_arn.as_str(), e))
        }))
        .await?;

        Ok(per_policy.into_iter().flatten().collect())
    }
}

/// One `arn:aws:iam::<account>:role/<role_name>` per directory account, in account id order.
pub fn organization_role_arns(directory: &AccountDirectory, role_name: &str) -> Vec<String> {
    directory
        .account_ids()
        .map(|account_id| RoleArn::format(account_id, role_name))
        .collect()
}

/// Everything a renderer needs: account names and the roles to build profiles for
#[derive(Debug)]
pub struct DiscoveryResult {
    pub account_directory: AccountDirectory,
    pub role_arns: Vec<String>,
}

/// Run the account listing and role discovery concurrently and merge their results.
///
/// With `organization_role` set, a role ARN for that role is synthesised for every
/// known account and placed ahead of the discovered ones.
pub async fn discover(
    iam: &dyn IamApi,
    sts: &dyn StsApi,
    organizations: &dyn OrganizationsApi,
    organization_role: Option<&str>,
) -> ConfigGeneratorResult<DiscoveryResult> {
    let role_discovery = RoleDiscovery::new(iam, sts);
    let (account_directory, discovered) = futures::join!(
        AccountDirectory::fetch(organizations),
        role_discovery.discover()
    );
    let discovered = discovered?;

    let mut role_arns = match organization_role {
        Some(role_name) => organization_role_arns(&account_directory, role_name),
        None => Vec::new(),
    };
    role_arns.extend(discovered);

    Ok(DiscoveryResult {
        account_directory,
        role_arns,
    })
}
