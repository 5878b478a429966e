//! Descriptor validation command

use crate::error::{CliError, CliResult};
use crate::output::{self, print_success, print_warning, OutputFormat};
use ecosystem_types::{Descriptor, DescriptorError, ValidationReport};
use serde::Serialize;
use std::path::Path;

/// Machine-readable validation outcome
#[derive(Debug, Serialize)]
struct ValidationSummary<'a> {
    file: String,
    valid: bool,
    apps: usize,
    #[serde(flatten)]
    report: &'a ValidationReport,
}

/// Execute the validate command
pub fn execute(file: &Path, format: OutputFormat) -> CliResult<()> {
    match Descriptor::load_with_report(file) {
        Ok((descriptor, report)) => {
            match format {
                OutputFormat::Table => {
                    print_success(&format!(
                        "{} is valid ({} {})",
                        file.display(),
                        descriptor.len(),
                        if descriptor.len() == 1 { "app" } else { "apps" }
                    ));
                    for warning in &report.warnings {
                        print_warning(&warning.to_string());
                    }
                }
                _ => output::print_single(
                    &ValidationSummary {
                        file: file.display().to_string(),
                        valid: true,
                        apps: descriptor.len(),
                        report: &report,
                    },
                    format,
                )?,
            }
            Ok(())
        }
        Err(DescriptorError::Validation(report)) => {
            if !matches!(format, OutputFormat::Table) {
                output::print_single(
                    &ValidationSummary {
                        file: file.display().to_string(),
                        valid: false,
                        apps: 0,
                        report: &report,
                    },
                    format,
                )?;
            }
            Err(CliError::Descriptor(DescriptorError::Validation(report)))
        }
        Err(err) => Err(err.into()),
    }
}
