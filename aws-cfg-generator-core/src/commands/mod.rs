//! Commands module - service layer for the config generators

mod service;
mod switch_roles;
mod vault;

use std::path::PathBuf;

use log::{info, warn};

use crate::aws::{IamApi, OrganizationsApi, StsApi};
use crate::discovery::discover;
use crate::error::ConfigGeneratorResult;
use crate::order::order_profiles;
use crate::profile::build_profiles;
use crate::render::ConfigRenderer;

pub use service::ConfigGeneratorService;
pub use switch_roles::SwitchRolesOptions;
pub use vault::VaultOptions;

/// Outcome of a generator run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSummary {
    pub profiles_written: usize,
    pub output_path: PathBuf,
    /// Number of accounts whose name could be resolved
    pub accounts_known: usize,
    /// `false` when account names could only be partially resolved
    pub account_listing_complete: bool,
}

/// Which profiles end up in the rendered file and how they are named
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ProfileSelection<'a> {
    pub(crate) organization_role: Option<&'a str>,
    pub(crate) use_role_name: bool,
    pub(crate) ordered: bool,
}

/// Discover roles, build profiles and write them with the given renderer.
pub(crate) async fn generate<R: ConfigRenderer>(
    iam: &dyn IamApi,
    sts: &dyn StsApi,
    organizations: &dyn OrganizationsApi,
    selection: ProfileSelection<'_>,
    renderer: &R,
) -> ConfigGeneratorResult<GenerateSummary> {
    let discovered = discover(iam, sts, organizations, selection.organization_role).await?;
    let directory = discovered.account_directory;

    let mut profiles = build_profiles(
        &directory,
        &discovered.role_arns,
        selection.use_role_name,
        R::SECTION_PREFIX,
    );
    if selection.ordered {
        profiles = order_profiles(profiles);
    }

    renderer.write(&profiles)?;

    let output_path = renderer.output_path().to_path_buf();
    info!(
        "Wrote {} profiles to {}",
        profiles.len(),
        output_path.display()
    );
    if let Some(e) = directory.listing_error() {
        warn!(
            "account names are incomplete, profiles for unknown accounts are named after the account id: {}",
            e
        );
    }

    Ok(GenerateSummary {
        profiles_written: profiles.len(),
        output_path,
        accounts_known: directory.len(),
        account_listing_complete: directory.is_complete(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::{AccountPage, AwsError};
    use crate::render::{ColorScheme, SwitchRolesRenderer, VaultRenderer};
    use crate::test_utils::{assume_role_policy, FakeIam, FakeOrganizations, FakeSts};
    use ini::Ini;

    fn iam() -> FakeIam {
        FakeIam::default().with_group("alice", "developers").with_inline_policy(
            "developers",
            "assume",
            assume_role_policy(&[
                "arn:aws:iam::111:role/dev",
                "arn:aws:iam::222:role/dev",
                "arn:aws:iam::*:role/dev",
                "arn:aws:iam::333:role/dev",
            ]),
        )
    }

    fn sts() -> FakeSts {
        FakeSts {
            caller_arn: "arn:aws:iam::123456789012:user/alice".to_string(),
        }
    }

    fn organizations() -> FakeOrganizations {
        FakeOrganizations::new(vec![Ok(AccountPage {
            accounts: vec![
                ("111".to_string(), "shop.prd".to_string()),
                ("222".to_string(), "tools".to_string()),
                ("333".to_string(), "cookies".to_string()),
            ],
            next_token: None,
        })])
    }

    #[tokio::test]
    async fn test_generate_switch_roles_ordered() {
        let dir = tempfile::tempdir().expect("tempdir");
        let renderer = SwitchRolesRenderer {
            output_file: dir.path().join("switch-roles.ini"),
            colors: ColorScheme::default(),
        };
        let selection = ProfileSelection {
            ordered: true,
            ..ProfileSelection::default()
        };

        let summary = generate(&iam(), &sts(), &organizations(), selection, &renderer)
            .await
            .expect("generate");

        assert_eq!(summary.profiles_written, 3);
        assert_eq!(summary.accounts_known, 3);
        assert!(summary.account_listing_complete);

        let written = Ini::load_from_file(&summary.output_path).expect("load");
        let sections: Vec<&str> = written.sections().flatten().collect();
        assert_eq!(sections, vec!["cookies", "tools", "shop.prd"]);
    }

    #[tokio::test]
    async fn test_generate_vault_with_partial_account_names() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config");
        std::fs::write(&path, "[default]\nregion = eu-west-1\n").expect("write config");
        let renderer = VaultRenderer {
            config_path: path.clone(),
            source_profile: "default".to_string(),
            region: None,
            keep_custom_config: true,
        };
        let organizations = FakeOrganizations::new(vec![
            Ok(AccountPage {
                accounts: vec![("111".to_string(), "shop.prd".to_string())],
                next_token: Some("next".to_string()),
            }),
            Err(AwsError::OrganizationsError("TooManyRequestsException".to_string())),
        ]);

        let summary = generate(
            &iam(),
            &sts(),
            &organizations,
            ProfileSelection::default(),
            &renderer,
        )
        .await
        .expect("generate");

        assert_eq!(summary.profiles_written, 3);
        assert_eq!(summary.accounts_known, 1);
        assert_eq!(summary.output_path, path);
        assert!(!summary.account_listing_complete);

        let written = Ini::load_from_file(&path).expect("load");
        assert!(written.section(Some("profile shop.prd")).is_some());
        assert!(written.section(Some("profile 222")).is_some());
        let fallback = written.section(Some("profile 333")).expect("fallback profile");
        assert_eq!(fallback.get("role_arn"), Some("arn:aws:iam::333:role/dev"));
        assert_eq!(
            written.section(Some("default")).and_then(|s| s.get("region")),
            Some("eu-west-1")
        );
    }

    #[tokio::test]
    async fn test_generate_does_not_write_when_discovery_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let renderer = SwitchRolesRenderer {
            output_file: dir.path().join("switch-roles.ini"),
            colors: ColorScheme::default(),
        };
        let sts = FakeSts {
            caller_arn: "arn:aws:sts::123456789012:assumed-role/admin/session".to_string(),
        };

        let result = generate(
            &iam(),
            &sts,
            &organizations(),
            ProfileSelection::default(),
            &renderer,
        )
        .await;

        assert!(result.is_err());
        assert!(!renderer.output_file.exists());
    }
}
