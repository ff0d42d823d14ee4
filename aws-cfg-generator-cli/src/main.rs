//! aws-cfg-generator
//!
//! Writes aws-vault and aws-extend-switch-roles configuration for every IAM
//! role the calling user may assume through their groups.
//!
//! # Usage
//! ```bash
//! # Merge profiles into ~/.aws/config, assuming from the `default` profile
//! aws-cfg-generator vault --vault-config-path ~/.aws/config
//!
//! # Write an ordered switch-roles config with tier colors
//! aws-cfg-generator switch-roles --output-file roles.ini --ordered --prd-color ff0000
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use aws_cfg_generator_core::{
    parse_color, ColorScheme, ConfigGeneratorService, GenerateSummary, SwitchRolesOptions,
    VaultOptions, DEFAULT_COLOR, DEFAULT_SOURCE_PROFILE,
};
use clap::{ArgAction, Parser, Subcommand};
use log::{debug, info, LevelFilter};

#[derive(Parser, Debug)]
#[command(name = "aws-cfg-generator")]
#[command(about = "Generate aws-vault and aws-extend-switch-roles configs from the roles you may assume", long_about = None)]
#[command(version)]
struct Cli {
    /// Set the log level to debug
    #[arg(long, global = true)]
    debug: bool,

    /// Also generate a profile with this role for every account in the organization
    #[arg(long, global = true)]
    role: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a config for aws-vault
    Vault {
        /// Where to load and save the config
        #[arg(long, env = "AWS_CONFIG_FILE")]
        vault_config_path: PathBuf,

        /// The profile that your credentials should come from
        #[arg(long, default_value = DEFAULT_SOURCE_PROFILE)]
        source_profile: String,

        /// Override the region configured with your source profile
        #[arg(long)]
        region: Option<String>,

        /// Retain custom profiles and settings. Set to false to remove everything
        /// except the source profile and the generated profiles
        #[arg(long, action = ArgAction::Set, default_value_t = true)]
        keep_custom_config: bool,

        /// Append the role name to the profile name
        #[arg(long)]
        use_role_name_in_profile: bool,
    },

    /// Generate a config for aws-extend-switch-roles
    SwitchRoles {
        /// Where to save the config
        #[arg(long)]
        output_file: PathBuf,

        /// Hex color for every profile without a matching tier color
        #[arg(long, default_value = DEFAULT_COLOR, value_parser = parse_color)]
        color: String,

        /// Hex color for profiles ending in dev or poc
        #[arg(long, value_parser = parse_color)]
        dev_color: Option<String>,

        /// Hex color for profiles ending in int or stg
        #[arg(long, value_parser = parse_color)]
        int_color: Option<String>,

        /// Hex color for profiles ending in prd or global
        #[arg(long, value_parser = parse_color)]
        prd_color: Option<String>,

        /// Append the role name to the profile name
        #[arg(long)]
        use_role_name_in_profile: bool,

        /// Sort profiles by name, standalone accounts before staged ones
        #[arg(long)]
        ordered: bool,
    },
}

fn init_logging(debug: bool) {
    let default_level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .format_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<GenerateSummary> {
    let service = ConfigGeneratorService::new().await;

    match cli.command {
        Commands::Vault {
            vault_config_path,
            source_profile,
            region,
            keep_custom_config,
            use_role_name_in_profile,
        } => {
            let options = VaultOptions {
                organization_role: cli.role,
                config_path: vault_config_path,
                source_profile,
                region,
                keep_custom_config,
                use_role_name_in_profile,
            };
            service
                .generate_vault_config(options)
                .await
                .context("Failed to generate the aws-vault config")
        }
        Commands::SwitchRoles {
            output_file,
            color,
            dev_color,
            int_color,
            prd_color,
            use_role_name_in_profile,
            ordered,
        } => {
            let options = SwitchRolesOptions {
                organization_role: cli.role,
                output_file,
                colors: ColorScheme {
                    default: color,
                    dev: dev_color,
                    int: int_color,
                    prd: prd_color,
                },
                use_role_name_in_profile,
                ordered,
            };
            service
                .generate_switch_roles_config(options)
                .await
                .context("Failed to generate the switch-roles config")
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.debug);
    debug!("parsed arguments: {:?}", cli);

    match run(cli).await {
        Ok(summary) => {
            if !summary.account_listing_complete {
                info!(
                    "Only {} account names could be resolved",
                    summary.accounts_known
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_switch_roles_defaults() {
        let cli = Cli::try_parse_from([
            "aws-cfg-generator",
            "switch-roles",
            "--output-file",
            "out.ini",
        ])
        .expect("parses");
        match cli.command {
            Commands::SwitchRoles {
                color,
                dev_color,
                ordered,
                ..
            } => {
                assert_eq!(color, DEFAULT_COLOR);
                assert_eq!(dev_color, None);
                assert!(!ordered);
            }
            Commands::Vault { .. } => panic!("expected switch-roles"),
        }
        assert!(!cli.debug);
        assert_eq!(cli.role, None);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "aws-cfg-generator",
            "switch-roles",
            "--output-file",
            "out.ini",
            "--role",
            "OrganizationAccountAccessRole",
            "--debug",
            "--prd-color",
            "#FF0000",
        ])
        .expect("parses");
        assert!(cli.debug);
        assert_eq!(cli.role.as_deref(), Some("OrganizationAccountAccessRole"));
        match cli.command {
            Commands::SwitchRoles { prd_color, .. } => {
                assert_eq!(prd_color.as_deref(), Some("ff0000"));
            }
            Commands::Vault { .. } => panic!("expected switch-roles"),
        }
    }

    #[test]
    fn test_keep_custom_config_takes_a_value() {
        let cli = Cli::try_parse_from([
            "aws-cfg-generator",
            "vault",
            "--vault-config-path",
            "config",
            "--keep-custom-config",
            "false",
        ])
        .expect("parses");
        match cli.command {
            Commands::Vault {
                keep_custom_config,
                source_profile,
                ..
            } => {
                assert!(!keep_custom_config);
                assert_eq!(source_profile, DEFAULT_SOURCE_PROFILE);
            }
            Commands::SwitchRoles { .. } => panic!("expected vault"),
        }
    }
}
