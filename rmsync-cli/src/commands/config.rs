//! `rmsync config show` and `rmsync config init`

use anyhow::{Context, Result};
use clap::Subcommand;

use rmsync_core::config;

use crate::AppContext;

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the config in effect (file contents or defaults).
    Show,

    /// Write ~/.rmsync/config.yaml unless it already exists.
    ///
    /// `--host` sets the stored address (defaults to the USB address).
    Init,
}

pub fn run(cmd: ConfigCommand, ctx: &AppContext) -> Result<()> {
    match cmd {
        ConfigCommand::Show => show(ctx),
        ConfigCommand::Init => init(ctx),
    }
}

fn show(ctx: &AppContext) -> Result<()> {
    let path = config::config_path_at(&ctx.home);
    if path.exists() {
        println!("# {}", path.display());
    } else {
        println!("# defaults (no file at {})", path.display());
    }
    let yaml = serde_yaml::to_string(&ctx.config).context("failed to serialize config")?;
    print!("{yaml}");
    Ok(())
}

fn init(ctx: &AppContext) -> Result<()> {
    let (config, created) = config::init_at(&ctx.home, ctx.globals.host.clone())
        .context("failed to write config")?;
    let path = config::config_path_at(&ctx.home);

    if created {
        println!("✓ Wrote {}", path.display());
    } else {
        println!("Config already exists at {}", path.display());
    }
    println!("  host: {}", config.host);
    Ok(())
}
