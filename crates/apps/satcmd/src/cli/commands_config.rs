use anyhow::{bail, Result};
use serde::Serialize;

use crate::cli::app::{ConfigAction, ConfigCommand, RuntimeContext};
use crate::cli::config::{save_settings, Settings};

#[derive(Debug, Serialize)]
struct ConfigReport<'a> {
    path: String,
    exists: bool,
    settings: &'a Settings,
}

pub fn run(ctx: &RuntimeContext, command: &ConfigCommand) -> Result<()> {
    match &command.action {
        ConfigAction::Show => ctx.output.emit_status(&ConfigReport {
            path: ctx.config_path.display().to_string(),
            exists: ctx.config_path.exists(),
            settings: &ctx.settings,
        }),
        ConfigAction::Init {
            reference_millivolts,
            force,
        } => {
            if ctx.config_path.exists() && !force {
                bail!(
                    "{} already exists (use --force to overwrite)",
                    ctx.config_path.display()
                );
            }
            let mut settings = Settings::default();
            if let Some(reference) = reference_millivolts {
                settings.reference_millivolts = *reference;
            }
            save_settings(&ctx.config_path, &settings)?;
            ctx.output
                .emit_message(format!("wrote {}", ctx.config_path.display()));
            Ok(())
        }
    }
}
