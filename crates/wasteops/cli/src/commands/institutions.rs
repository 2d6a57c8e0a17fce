//! Institution reference list validation

use crate::error::CliResult;
use crate::output::{self, OutputFormat};
use tabled::Tabled;
use wasteops_types::InstitutionDirectory;

#[derive(Tabled)]
struct InstitutionRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Label")]
    label: String,
}

/// Validate a directory file and list its selector entries
pub fn execute(path: &str, format: OutputFormat) -> CliResult<()> {
    let contents = std::fs::read_to_string(path)?;
    let directory = InstitutionDirectory::from_json(&contents)?;
    let options = directory.options();

    match format {
        OutputFormat::Table => {
            let rows = options
                .into_iter()
                .map(|o| InstitutionRow {
                    id: o.value.value(),
                    label: o.label,
                })
                .collect();
            output::print_table(rows);
            output::print_success(&format!("{} institution(s), ids unique", directory.len()));
            Ok(())
        }
        _ => output::print_single(&options, format),
    }
}
