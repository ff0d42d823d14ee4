//! Profiles for aws-vault, merged into an existing AWS CLI config file

use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::document::ConfigDocument;
use super::{load_config, parse_config, ConfigRenderer};
use crate::error::{ConfigGeneratorError, ConfigGeneratorResult};
use crate::profile::{Profile, VAULT_SECTION_PREFIX};

pub const DEFAULT_SOURCE_PROFILE: &str = "default";

#[derive(Debug, Clone)]
pub struct VaultRenderer {
    /// Config file that is read as the merge base and overwritten with the result
    pub config_path: PathBuf,
    /// Profile holding the long-lived credentials the generated profiles assume roles from
    pub source_profile: String,
    pub region: Option<String>,
    /// Keep sections, keys and comments not written by the generator
    pub keep_custom_config: bool,
}

impl VaultRenderer {
    /// The default profile is `[default]`, every other one `[profile <name>]`.
    pub fn source_section_name(&self) -> String {
        if self.source_profile == DEFAULT_SOURCE_PROFILE {
            self.source_profile.clone()
        } else {
            format!("{VAULT_SECTION_PREFIX}{}", self.source_profile)
        }
    }

    /// Add the generated profiles to the contents of an existing config file.
    ///
    /// Only `role_arn`, `source_profile`, `include_profile` and `region` of the
    /// generated sections are rewritten. Everything else is kept line for line,
    /// unless custom config is discarded.
    pub fn merge(&self, existing: &str, profiles: &[Profile]) -> ConfigGeneratorResult<String> {
        let parsed = parse_config(existing, &self.config_path)?;
        let source_section = self.source_section_name();
        if parsed.section(Some(source_section.as_str())).is_none() {
            return Err(ConfigGeneratorError::MissingSourceProfile(source_section));
        }

        let mut document = ConfigDocument::parse(existing);
        if !self.keep_custom_config {
            let discarded = parsed
                .sections()
                .flatten()
                .filter(|section| *section != source_section)
                .count();
            if discarded > 0 {
                warn!(
                    "discarding {} sections besides [{}] from {}",
                    discarded,
                    source_section,
                    self.config_path.display()
                );
            }
            document.retain_only(&source_section);
        }

        let region = self.region.as_deref().filter(|region| !region.is_empty());
        for profile in profiles {
            debug!("writing profile [{}]", profile.profile_name);
            let section = profile.profile_name.as_str();
            document.set(section, "role_arn", &profile.role_arn);
            document.set(section, "source_profile", &self.source_profile);
            document.set(section, "include_profile", &self.source_profile);
            if let Some(region) = region {
                document.set(section, "region", region);
            }
        }

        Ok(document.render())
    }
}

impl ConfigRenderer for VaultRenderer {
    const SECTION_PREFIX: &'static str = VAULT_SECTION_PREFIX;

    fn output_path(&self) -> &Path {
        &self.config_path
    }

    fn render(&self, profiles: &[Profile]) -> ConfigGeneratorResult<String> {
        let existing = load_config(&self.config_path)?;
        self.merge(&existing, profiles)
    }
}
