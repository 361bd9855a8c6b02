//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use dialoguer::Confirm;

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");

    ctx.output.info("[catalog]");
    ctx.output.kv(
        "path",
        ctx.config.catalog.path.as_deref().unwrap_or("(not set)"),
    );

    ctx.output.info("[query]");
    ctx.output.kv("page_size", &ctx.config.query.page_size.to_string());
    ctx.output.kv("default_sort", &ctx.config.query.default_sort);

    ctx.output.info("[search]");
    ctx.output.kv("token_mode", ctx.config.search.token_mode.as_str());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let path = ctx.cwd.join(CONFIG_NAMES[0]);

    if path.exists() && !force {
        let overwrite = Confirm::new()
            .with_prompt(format!("{} already exists. Overwrite?", path.display()))
            .default(false)
            .interact()?;
        if !overwrite {
            ctx.output.info("Keeping existing configuration.");
            return Ok(());
        }
    }

    fs::write(&path, generate_default_config())?;
    ctx.output
        .success(&format!("Wrote default configuration to {}", path.display()));
    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.config.validate()?;

    if let Some(path) = &ctx.config.catalog.path {
        let full = ctx.cwd.join(path);
        if !full.exists() {
            bail!("catalog.path does not exist: {}", full.display());
        }
    }

    ctx.output.success("Configuration is valid.");
    Ok(())
}
