use crate::cli::parser::Commands;
use crate::config::Config;
use crate::config::migrate::{migrate_config, missing_fields};
use crate::core::config::ConfigLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            println!("📄 Current configuration:\n");
            if path.exists() {
                ConfigLogic::print(&path)?;
            } else {
                info("No configuration file yet, showing defaults.");
                println!("{}", serde_yaml::to_string(cfg)?);
            }
        }

        if *check {
            let missing = missing_fields(&path)?;
            if missing.is_empty() {
                success("Configuration file is up to date.");
            } else {
                warning(format!("Missing fields: {}", missing.join(", ")));
                info("Run `rfocuslog config --migrate` to add them.");
            }
        }

        if *migrate {
            let added = migrate_config(&path)?;
            if added.is_empty() {
                info("Nothing to migrate.");
            } else {
                success(format!("Added fields: {}", added.join(", ")));
            }
        }

        if *edit_config {
            ConfigLogic::edit(&path, editor.as_deref())?;
        }
    }

    Ok(())
}
