//! INI rendering for the supported credential-switching tools
//!
//! Both renderers take the built profiles and produce the complete file
//! contents which are then written to disk in one go.

mod document;
pub mod switch_roles;
pub mod vault;

use std::fs;
use std::path::Path;

use ini::{EscapePolicy, Ini, ParseOption, WriteOption};

use crate::error::{ConfigGeneratorError, ConfigGeneratorResult};
use crate::profile::Profile;

pub use switch_roles::{ColorScheme, SwitchRolesRenderer};
pub use vault::VaultRenderer;

/// Common contract of the output formats
pub trait ConfigRenderer {
    /// Prefix the format expects in front of every generated section name
    const SECTION_PREFIX: &'static str;

    /// File the rendered config is written to
    fn output_path(&self) -> &Path;

    /// Complete contents of the output file
    fn render(&self, profiles: &[Profile]) -> ConfigGeneratorResult<String>;

    /// Render and write the whole file at once.
    fn write(&self, profiles: &[Profile]) -> ConfigGeneratorResult<()> {
        let contents = self.render(profiles)?;
        save_config(&contents, self.output_path())
    }
}

pub(crate) fn load_config(path: &Path) -> ConfigGeneratorResult<String> {
    fs::read_to_string(path).map_err(|e| ConfigGeneratorError::ConfigLoad {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Parse without quote or escape processing, so values read back exactly as written.
pub(crate) fn parse_config(text: &str, path: &Path) -> ConfigGeneratorResult<Ini> {
    let options = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    };
    Ini::load_from_str_opt(text, options).map_err(|e| ConfigGeneratorError::ConfigLoad {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

pub(crate) fn ini_to_string(config: &Ini) -> std::io::Result<String> {
    let options = WriteOption {
        escape_policy: EscapePolicy::Nothing,
        kv_separator: " = ",
        ..Default::default()
    };
    let mut buffer = Vec::new();
    config.write_to_opt(&mut buffer, options)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

pub(crate) fn save_config(contents: &str, path: &Path) -> ConfigGeneratorResult<()> {
    fs::write(path, contents).map_err(|source| ConfigGeneratorError::ConfigSave {
        path: path.to_path_buf(),
        source,
    })
}
