//! Config for the aws-extend-switch-roles browser extension

use std::path::{Path, PathBuf};

use ini::Ini;

use super::{ini_to_string, ConfigRenderer};
use crate::error::{ConfigGeneratorError, ConfigGeneratorResult};
use crate::profile::{Profile, SWITCH_ROLES_SECTION_PREFIX};

pub const DEFAULT_COLOR: &str = "00ff7f";

/// Profile colors, optionally varying by environment tier.
///
/// Tier colors that are not set fall back to the default color, so a scheme
/// without tier colors paints every profile the same.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorScheme {
    pub default: String,
    pub dev: Option<String>,
    pub int: Option<String>,
    pub prd: Option<String>,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::flat(DEFAULT_COLOR)
    }
}

impl ColorScheme {
    pub fn flat(color: impl Into<String>) -> Self {
        Self {
            default: color.into(),
            dev: None,
            int: None,
            prd: None,
        }
    }

    /// Pick the color by case-insensitive profile name suffix:
    /// `dev`/`poc`, then `int`/`stg`, then `prd`/`global`.
    pub fn color_for(&self, profile_name: &str) -> &str {
        let name = profile_name.to_ascii_lowercase();
        let ends_with_any = |suffixes: &[&str]| suffixes.iter().any(|s| name.ends_with(s));

        let tier = if ends_with_any(&["dev", "poc"]) {
            self.dev.as_deref()
        } else if ends_with_any(&["int", "stg"]) {
            self.int.as_deref()
        } else if ends_with_any(&["prd", "global"]) {
            self.prd.as_deref()
        } else {
            None
        };

        tier.unwrap_or(&self.default)
    }
}

/// Normalize a hex color as the extension expects it: six hex digits, no `#`.
pub fn parse_color(value: &str) -> Result<String, String> {
    let color = value.trim().trim_start_matches('#');
    if color.len() == 6 && color.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(color.to_ascii_lowercase())
    } else {
        Err(format!(
            "'{value}' is not a hex color, expected six hex digits like 00ff7f"
        ))
    }
}

#[derive(Debug, Clone)]
pub struct SwitchRolesRenderer {
    pub output_file: PathBuf,
    pub colors: ColorScheme,
}

impl ConfigRenderer for SwitchRolesRenderer {
    const SECTION_PREFIX: &'static str = SWITCH_ROLES_SECTION_PREFIX;

    fn output_path(&self) -> &Path {
        &self.output_file
    }

    fn render(&self, profiles: &[Profile]) -> ConfigGeneratorResult<String> {
        let mut config = Ini::new();

        for profile in profiles {
            config
                .with_section(Some(profile.profile_name.as_str()))
                .set("aws_account_id", profile.account_id.as_str())
                .set("role_name", profile.role_name.as_str())
                .set("color", self.colors.color_for(&profile.profile_name));
        }

        ini_to_string(&config).map_err(|source| ConfigGeneratorError::ConfigSave {
            path: self.output_file.clone(),
            source,
        })
    }
}
