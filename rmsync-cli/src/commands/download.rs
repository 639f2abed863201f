//! `rmsync download [PATTERN]...`: one reconciliation pass against the tablet.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use rmsync_core::SyncOptions;
use rmsync_device::{DeviceClient, DeviceSettings};
use rmsync_sync::{
    pipeline::{self, SyncRequest},
    DocumentAction, OrphanResult, SkipReason, SubstringMatcher, SyncError, SyncReport,
};

use crate::AppContext;

/// Arguments for `rmsync download`.
#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Case-insensitive name fragments; omit to sync every document.
    pub patterns: Vec<String>,

    /// Local directory mirroring the tablet's folders.
    #[arg(long, short = 'C', default_value = ".")]
    pub dir: PathBuf,

    /// Show what would be downloaded and deleted without changing anything.
    #[arg(long)]
    pub dry_run: bool,
}

impl DownloadArgs {
    pub fn run(self, ctx: &AppContext) -> Result<()> {
        let options = self.options(ctx);
        let host = ctx
            .globals
            .host
            .clone()
            .unwrap_or_else(|| ctx.config.host.clone());

        if !self.dry_run {
            std::fs::create_dir_all(&self.dir)
                .with_context(|| format!("cannot create '{}'", self.dir.display()))?;
        }

        let mut client = DeviceClient::new(&DeviceSettings::new(host));
        let files = client
            .read_files()
            .with_context(|| format!("failed to list documents from {}", client.base_url()))?;
        tracing::debug!(count = files.len(), "device listing complete");

        let request = SyncRequest {
            root: &self.dir,
            patterns: &self.patterns,
            options: options.clone(),
        };
        let report = match pipeline::run(&files, &request, &SubstringMatcher, &mut client) {
            Ok(report) => report,
            Err(SyncError::NothingSelected { unmatched }) => {
                print_unmatched(&unmatched);
                anyhow::bail!("nothing to search for");
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("sync into '{}' failed", self.dir.display()));
            }
        };

        print_report(&report, &options);
        Ok(())
    }

    fn options(&self, ctx: &AppContext) -> SyncOptions {
        let mut options = ctx.config.sync_options();
        if ctx.globals.overwrite {
            options.overwrite_protection = false;
        }
        if ctx.globals.no_pdf {
            options.download_enabled = false;
        }
        options.debug |= ctx.globals.debug;
        options.dry_run = self.dry_run;
        options
    }
}

fn print_unmatched(patterns: &[String]) {
    for pattern in patterns {
        println!("no matching items found for '{pattern}'");
    }
}

fn print_report(report: &SyncReport, options: &SyncOptions) {
    let prefix = if options.dry_run { "[dry-run] " } else { "" };
    print_unmatched(&report.unmatched_patterns);

    for action in &report.documents {
        match action {
            DocumentAction::Downloaded { path, .. } => println!("  ↓  {}", path.display()),
            DocumentAction::WouldDownload { path, .. } => println!("  ~  {}", path.display()),
            DocumentAction::Skipped { path, reason, .. } if options.debug => {
                let why = match reason {
                    SkipReason::UpToDate => "up to date",
                    SkipReason::DownloadsDisabled => "downloads disabled",
                };
                println!("  ·  {} ({why})", path.display());
            }
            DocumentAction::Skipped { .. } => {}
        }
    }

    for orphan in &report.orphans {
        match orphan {
            OrphanResult::Removed { path } => println!("  ✗  {}", path.display()),
            OrphanResult::WouldRemove { path } => println!("  ~✗ {}", path.display()),
            OrphanResult::Failed { path, error } => println!(
                "  {}  {}: {error}",
                "!".yellow().bold(),
                path.display()
            ),
        }
    }

    for dir in &report.pruned {
        println!("  ⌫  {}/", dir.display());
    }
    if let Some(err) = &report.prune_error {
        println!("error deleting empty directories: {err}");
    }

    println!(
        "{prefix}✓ {} selected: {} downloaded, {} up to date, {} deleted, {} empty dirs removed",
        report.selected,
        report.downloaded(),
        report.up_to_date(),
        report.removed(),
        report.pruned.len(),
    );
    let failed = report.failed_removals().len();
    if failed > 0 {
        println!("{failed} local file(s) could not be deleted");
    }
    if report.not_downloaded() > 0 {
        println!(
            "{} new or changed document(s) not downloaded (--no-pdf)",
            report.not_downloaded()
        );
    }
}
