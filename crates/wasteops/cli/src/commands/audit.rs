//! Termination batch audit

use crate::error::{CliError, CliResult};
use crate::output::{self, OutputFormat};
use std::io::Read;
use tabled::Tabled;
use wasteops_lifecycle::{decode_batch, ReviewOptions, Reviewer, TerminationReview};
use wasteops_types::ContractSnapshot;

#[derive(Tabled)]
struct ClosedRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Contract")]
    contract: String,
    #[tabled(rename = "New end date")]
    new_end_date: String,
    #[tabled(rename = "Original (t)")]
    original: String,
    #[tabled(rename = "Adjusted (t)")]
    adjusted: String,
    #[tabled(rename = "Released (t)")]
    released: String,
}

#[derive(Tabled)]
struct IssueRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Contract")]
    contract: String,
    #[tabled(rename = "Issue")]
    issue: String,
}

/// Audit arguments
#[derive(Debug, Clone)]
pub struct AuditArgs {
    /// Batch file, `-` for stdin
    pub batch: String,

    /// Optional contract snapshots file (JSON array)
    pub contracts: Option<String>,

    pub strict_dates: bool,
}

fn read_source(path: &str) -> CliResult<String> {
    if path == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

fn read_snapshots(path: &str) -> CliResult<Vec<ContractSnapshot>> {
    let value: serde_json::Value = serde_json::from_str(&read_source(path)?)?;
    if !value.is_array() {
        return Err(CliError::InvalidInput(format!(
            "{}: contract snapshots must be a JSON array",
            path
        )));
    }
    Ok(serde_json::from_value(value)?)
}

fn tonnes(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "-".into())
}

/// Review a termination batch and print the outcome
pub fn execute(args: AuditArgs, format: OutputFormat) -> CliResult<()> {
    let decoded = decode_batch(&read_source(&args.batch)?)?;

    let mut reviewer = Reviewer::new().with_options(ReviewOptions {
        strict_dates: args.strict_dates,
    });
    if let Some(path) = &args.contracts {
        let snapshots = read_snapshots(path)?;
        tracing::debug!(count = snapshots.len(), "contract snapshots loaded");
        reviewer = reviewer.with_snapshots(snapshots);
    }

    let review = reviewer.review_decoded(&decoded);

    match format {
        OutputFormat::Table => print_review(&review),
        _ => output::print_single(&review, format)?,
    }
    Ok(())
}

fn print_review(review: &TerminationReview) {
    if !review.message.is_empty() {
        output::print_info(&review.message);
    }

    if !review.is_displayable() {
        output::print_info("No contracts were closed");
    } else {
        let rows = review
            .closed
            .iter()
            .map(|c| ClosedRow {
                position: c.position,
                contract: c.contract_number.clone(),
                new_end_date: c.new_end_date.clone(),
                original: tonnes(c.quantity.map(|q| q.original_quantity)),
                adjusted: tonnes(c.quantity.map(|q| q.adjusted_quantity)),
                released: tonnes(c.quantity.map(|q| q.delta)),
            })
            .collect();
        output::print_table(rows);
        output::print_success(&format!(
            "{} contract(s) closed, {:.2} t released",
            review.success_count(),
            review.total_quantity_released()
        ));
    }

    if !review.failed.is_empty() {
        output::print_warning(&format!("{} termination(s) failed", review.failed.len()));
        let rows = review
            .failed
            .iter()
            .map(|f| IssueRow {
                position: f.position,
                contract: f.contract_number.clone(),
                issue: "termination failed".into(),
            })
            .collect();
        output::print_table(rows);
    }

    if review.has_flags() {
        output::print_warning(&format!(
            "{} malformed record(s) excluded",
            review.flagged.len()
        ));
        let rows = review
            .flagged
            .iter()
            .map(|f| IssueRow {
                position: f.position,
                contract: f.contract_number.clone().unwrap_or_else(|| "-".into()),
                issue: f.defect.to_string(),
            })
            .collect();
        output::print_table(rows);
    }
}
