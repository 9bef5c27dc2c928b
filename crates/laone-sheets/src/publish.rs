//! Publishes a [`Catalog`] into a new spreadsheet, one tab per category.
//!
//! Only spreadsheet creation is fatal. Every later call is independent: a
//! failure is logged, recorded in the [`PublishReport`], and the run moves on.
//! Tabs already created stay in place, so a run can end partially published.

use laone_core::Catalog;

use crate::client::SheetsClient;
use crate::error::SheetsError;
use crate::layout::{layout_tab, TabLayout};
use crate::requests::{
    add_row_groups, add_sheet, collapse_row_groups, delete_sheet, format_tab, DEFAULT_SHEET_ID,
};
use crate::types::ValueRange;

/// Step of a publish run, used to label failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStep {
    AddTab,
    FormatTab,
    GroupRows,
    CollapseGroups,
    WriteValues,
    DeleteDefaultTab,
}

impl std::fmt::Display for PublishStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PublishStep::AddTab => write!(f, "add tab"),
            PublishStep::FormatTab => write!(f, "format tab"),
            PublishStep::GroupRows => write!(f, "group rows"),
            PublishStep::CollapseGroups => write!(f, "collapse groups"),
            PublishStep::WriteValues => write!(f, "write values"),
            PublishStep::DeleteDefaultTab => write!(f, "delete default tab"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishFailure {
    pub step: PublishStep,
    /// Tab the step was working on, `None` for spreadsheet-wide steps.
    pub tab: Option<String>,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedTab {
    pub title: String,
    pub sheet_id: i64,
    pub grid_rows: usize,
}

/// Outcome of [`publish_catalog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub spreadsheet_id: String,
    pub tabs: Vec<PublishedTab>,
    pub updated_cells: u64,
    pub failures: Vec<PublishFailure>,
}

impl PublishReport {
    /// `true` when every step succeeded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, step: PublishStep, tab: Option<&str>, err: &SheetsError) {
        tracing::error!(
            spreadsheet_id = %self.spreadsheet_id,
            step = %step,
            tab = tab.unwrap_or("-"),
            error = %err,
            "publish step failed"
        );
        self.failures.push(PublishFailure {
            step,
            tab: tab.map(str::to_owned),
            error: err.to_string(),
        });
    }
}

/// Spreadsheet-level settings for a publish run.
#[derive(Debug, Clone, Copy)]
pub struct PublishOptions<'a> {
    pub title: &'a str,
    pub locale: &'a str,
}

/// Lays out every category in catalog order.
#[must_use]
pub fn plan_tabs(catalog: &Catalog) -> Vec<TabLayout> {
    catalog
        .iter()
        .map(|(category, bucket)| layout_tab(category, bucket))
        .collect()
}

/// Creates a spreadsheet and fills it with `catalog`.
///
/// Tabs are created and formatted one at a time in catalog order; all cell
/// values are written in a single batch once every tab exists; finally the
/// empty default tab is removed.
///
/// # Errors
///
/// Returns an error only if the spreadsheet itself cannot be created. Later
/// failures are reported through [`PublishReport::failures`].
pub async fn publish_catalog(
    client: &SheetsClient,
    catalog: &Catalog,
    options: PublishOptions<'_>,
) -> Result<PublishReport, SheetsError> {
    let spreadsheet_id = client
        .create_spreadsheet(options.title, options.locale)
        .await?;
    tracing::info!(%spreadsheet_id, title = options.title, "spreadsheet created");

    let mut report = PublishReport {
        spreadsheet_id: spreadsheet_id.clone(),
        tabs: Vec::new(),
        updated_cells: 0,
        failures: Vec::new(),
    };
    let mut data: Vec<ValueRange> = Vec::new();

    for layout in plan_tabs(catalog) {
        let Some(sheet_id) = create_tab(client, &spreadsheet_id, &mut report, &layout).await
        else {
            continue;
        };
        set_up_tab(client, &spreadsheet_id, &mut report, &layout, sheet_id).await;
        let grid_rows = layout.grid_rows();
        report.tabs.push(PublishedTab {
            title: layout.title,
            sheet_id,
            grid_rows,
        });
        data.extend(layout.values);
    }

    if !data.is_empty() {
        match client.batch_update_values(&spreadsheet_id, &data).await {
            Ok(cells) => {
                report.updated_cells = cells;
                tracing::info!(updated_cells = cells, ranges = data.len(), "cell values written");
            }
            Err(e) => report.record(PublishStep::WriteValues, None, &e),
        }
    }

    // A spreadsheet must keep at least one tab.
    if report.tabs.is_empty() {
        tracing::warn!(
            %spreadsheet_id,
            "no tabs were created; keeping the default tab"
        );
    } else if let Err(e) = client
        .batch_update(&spreadsheet_id, &[delete_sheet(DEFAULT_SHEET_ID)])
        .await
    {
        report.record(PublishStep::DeleteDefaultTab, None, &e);
    }

    Ok(report)
}

async fn create_tab(
    client: &SheetsClient,
    spreadsheet_id: &str,
    report: &mut PublishReport,
    layout: &TabLayout,
) -> Option<i64> {
    let result = client
        .batch_update(
            spreadsheet_id,
            &[add_sheet(&layout.title, layout.grid_rows())],
        )
        .await
        .and_then(|resp| {
            resp.added_sheet_id().ok_or_else(|| SheetsError::MissingReply {
                context: format!("addSheet \"{}\"", layout.title),
            })
        });

    match result {
        Ok(sheet_id) => {
            tracing::debug!(tab = %layout.title, sheet_id, rows = layout.grid_rows(), "tab created");
            Some(sheet_id)
        }
        Err(e) => {
            report.record(PublishStep::AddTab, Some(&layout.title), &e);
            None
        }
    }
}

async fn set_up_tab(
    client: &SheetsClient,
    spreadsheet_id: &str,
    report: &mut PublishReport,
    layout: &TabLayout,
    sheet_id: i64,
) {
    if let Err(e) = client
        .batch_update(spreadsheet_id, &format_tab(sheet_id, layout.body_rows))
        .await
    {
        report.record(PublishStep::FormatTab, Some(&layout.title), &e);
    }

    if layout.groups.is_empty() {
        return;
    }

    // Groups must exist before they can be collapsed, so the two run as
    // separate batches and a failed add skips the collapse.
    if let Err(e) = client
        .batch_update(spreadsheet_id, &add_row_groups(sheet_id, &layout.groups))
        .await
    {
        report.record(PublishStep::GroupRows, Some(&layout.title), &e);
        return;
    }
    if let Err(e) = client
        .batch_update(
            spreadsheet_id,
            &collapse_row_groups(sheet_id, &layout.groups),
        )
        .await
    {
        report.record(PublishStep::CollapseGroups, Some(&layout.title), &e);
    }
}
