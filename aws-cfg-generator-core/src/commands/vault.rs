//! aws-vault config generation

use std::path::PathBuf;

use log::debug;

use super::{generate, GenerateSummary, ProfileSelection};
use crate::error::ConfigGeneratorResult;
use crate::render::VaultRenderer;

#[derive(Debug, Clone)]
pub struct VaultOptions {
    /// Role to synthesise for every organization account, in addition to the discovered ones
    pub organization_role: Option<String>,
    pub config_path: PathBuf,
    pub source_profile: String,
    pub region: Option<String>,
    pub keep_custom_config: bool,
    pub use_role_name_in_profile: bool,
}

impl super::service::ConfigGeneratorService {
    /// Merge a profile per assumable role into the AWS CLI config file used by aws-vault.
    pub async fn generate_vault_config(
        &self,
        options: VaultOptions,
    ) -> ConfigGeneratorResult<GenerateSummary> {
        debug!("generating aws-vault config with {:?}", options);
        let renderer = VaultRenderer {
            config_path: options.config_path,
            source_profile: options.source_profile,
            region: options.region,
            keep_custom_config: options.keep_custom_config,
        };
        let selection = ProfileSelection {
            organization_role: options.organization_role.as_deref(),
            use_role_name: options.use_role_name_in_profile,
            ordered: false,
        };

        generate(
            self.context.iam(),
            self.context.sts(),
            self.context.organizations(),
            selection,
            &renderer,
        )
        .await
    }
}
