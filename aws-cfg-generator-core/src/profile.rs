//! Turning role ARNs into named profiles.

use log::debug;

use crate::accounts::AccountDirectory;
use crate::aws::arn::RoleArn;

/// Section prefix used by aws-extend-switch-roles: section name is the profile name
pub const SWITCH_ROLES_SECTION_PREFIX: &str = "";

/// Section prefix used by the AWS CLI config file for every profile except `default`
pub const VAULT_SECTION_PREFIX: &str = "profile ";

/// One generated profile, i.e. one assumable role in one account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub role_arn: String,
    /// Role name without the leading `role/`
    pub role_name: String,
    /// Section name for the profile, including the section prefix
    pub profile_name: String,
    pub account_id: String,
}

impl Profile {
    fn from_role_arn(
        directory: &AccountDirectory,
        role_arn: &str,
        parsed: RoleArn,
        use_role_name: bool,
        section_prefix: &str,
    ) -> Self {
        let account_name = directory.name(&parsed.account_id).unwrap_or(&parsed.account_id);
        let profile_name = if use_role_name {
            format!("{section_prefix}{account_name}_{}", parsed.role_name)
        } else {
            format!("{section_prefix}{account_name}")
        };

        Self {
            role_arn: role_arn.to_string(),
            role_name: parsed.role_name,
            profile_name,
            account_id: parsed.account_id,
        }
    }
}

/// Build one profile per valid role ARN, in input order.
///
/// Entries that are not IAM role ARNs (`*`, wildcard accounts, other services)
/// are skipped. Profiles are not deduplicated.
pub fn build_profiles(
    directory: &AccountDirectory,
    role_arns: &[String],
    use_role_name: bool,
    section_prefix: &str,
) -> Vec<Profile> {
    role_arns
        .iter()
        .filter_map(|role_arn| match RoleArn::parse(role_arn) {
            Some(parsed) => Some(Profile::from_role_arn(
                directory,
                role_arn,
                parsed,
                use_role_name,
                section_prefix,
            )),
            None => {
                debug!("skipping {} as it is not a valid role ARN", role_arn);
                None
            }
        })
        .collect()
}
