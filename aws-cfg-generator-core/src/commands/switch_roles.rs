//! aws-extend-switch-roles config generation

use std::path::PathBuf;

use log::debug;

use super::{generate, GenerateSummary, ProfileSelection};
use crate::error::ConfigGeneratorResult;
use crate::render::{ColorScheme, SwitchRolesRenderer};

#[derive(Debug, Clone)]
pub struct SwitchRolesOptions {
    /// Role to synthesise for every organization account, in addition to the discovered ones
    pub organization_role: Option<String>,
    pub output_file: PathBuf,
    pub colors: ColorScheme,
    pub use_role_name_in_profile: bool,
    /// Standalone accounts first, then staged ones, each sorted by name
    pub ordered: bool,
}

impl super::service::ConfigGeneratorService {
    /// Write a fresh aws-extend-switch-roles config with a profile per assumable role.
    pub async fn generate_switch_roles_config(
        &self,
        options: SwitchRolesOptions,
    ) -> ConfigGeneratorResult<GenerateSummary> {
        debug!("generating switch-roles config with {:?}", options);
        let renderer = SwitchRolesRenderer {
            output_file: options.output_file,
            colors: options.colors,
        };
        let selection = ProfileSelection {
            organization_role: options.organization_role.as_deref(),
            use_role_name: options.use_role_name_in_profile,
            ordered: options.ordered,
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
