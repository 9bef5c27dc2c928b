//! Command handlers for the CLI.
//!
//! Both commands merge the exports first, so a broken export fails the run
//! before anything is written or sent.

use std::path::Path;

use anyhow::Context;
use laone_core::{AppConfig, Catalog};
use laone_sheets::{
    plan_tabs, publish_catalog, PublishOptions, PublishReport, SheetsClient, TabLayout,
};

fn merge_catalog(config: &AppConfig) -> anyhow::Result<Catalog> {
    let catalog = laone_catalog::merge_files(
        &config.assortment_path,
        &config.stocks_path,
        &config.category_rules,
    )?;
    tracing::info!(
        categories = catalog.len(),
        products = catalog.product_count(),
        "catalog merged"
    );
    Ok(catalog)
}

/// Merge the exports and dump the catalog as pretty JSON.
///
/// Writes to `output`, or to `config.refined_path` when no output is given.
/// With `to_stdout` the JSON is printed instead.
///
/// # Errors
///
/// Returns an error if the merge fails or the dump cannot be written.
pub(crate) fn run_merge(
    config: &AppConfig,
    output: Option<&Path>,
    to_stdout: bool,
) -> anyhow::Result<()> {
    let catalog = merge_catalog(config)?;

    if to_stdout {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    let path = output.unwrap_or(config.refined_path.as_path());
    write_catalog_json(&catalog, path)?;
    println!(
        "wrote {} products in {} categories to {}",
        catalog.product_count(),
        catalog.len(),
        path.display()
    );
    Ok(())
}

pub(crate) fn write_catalog_json(catalog: &Catalog, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(catalog)?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// One line per planned tab, as printed by `publish --dry-run`.
pub(crate) fn describe_plan(tabs: &[TabLayout]) -> Vec<String> {
    tabs.iter()
        .map(|tab| {
            if tab.groups.is_empty() {
                format!("{}: {} rows", tab.title, tab.grid_rows())
            } else {
                format!(
                    "{}: {} rows, {} groups",
                    tab.title,
                    tab.grid_rows(),
                    tab.groups.len()
                )
            }
        })
        .collect()
}

/// Merge the exports and publish them into a new spreadsheet.
///
/// # Errors
///
/// Returns an error if the merge fails, no access token is configured, the
/// spreadsheet cannot be created, or any later publish step failed. Failed
/// steps do not stop the remaining ones.
pub(crate) async fn run_publish(
    config: &AppConfig,
    title_override: Option<&str>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let catalog = merge_catalog(config)?;
    let title = title_override.unwrap_or(config.spreadsheet_title.as_str());

    if dry_run {
        println!("[dry-run] would publish \"{title}\" with {} tabs:", catalog.len());
        for line in describe_plan(&plan_tabs(&catalog)) {
            println!("  {line}");
        }
        return Ok(());
    }

    let token = config
        .sheets_access_token
        .as_deref()
        .context("GOOGLE_SHEETS_ACCESS_TOKEN must be set to publish")?;
    let client = SheetsClient::with_base_url(
        token,
        config.sheets_request_timeout_secs,
        &config.sheets_base_url,
    )?;

    let report = publish_catalog(
        &client,
        &catalog,
        PublishOptions {
            title,
            locale: &config.spreadsheet_locale,
        },
    )
    .await
    .context("failed to create spreadsheet")?;

    print_report(&report);
    if !report.is_complete() {
        anyhow::bail!(
            "{} publish step(s) failed for spreadsheet {}",
            report.failures.len(),
            report.spreadsheet_id
        );
    }
    Ok(())
}

fn print_report(report: &PublishReport) {
    println!(
        "spreadsheet {}: {} tabs, {} cells updated",
        report.spreadsheet_id,
        report.tabs.len(),
        report.updated_cells
    );
    for failure in &report.failures {
        match &failure.tab {
            Some(tab) => println!("  FAILED {} [{tab}]: {}", failure.step, failure.error),
            None => println!("  FAILED {}: {}", failure.step, failure.error),
        }
    }
}

#[cfg(test)]
#[path = "commands_test.rs"]
mod tests;
