//! App inspection commands

use crate::error::{CliError, CliResult};
use crate::output::{self, OutputFormat};
use colored::*;
use ecosystem_types::{AppLaunchSpec, Descriptor};
use serde::Serialize;
use std::path::Path;
use tabled::Tabled;

/// Table row for app display
#[derive(Debug, Serialize, Tabled)]
struct AppRow {
    /// App name
    name: String,
    /// Command
    command: String,
    /// Arguments
    args: String,
    /// Declared deployment modes
    modes: String,
    /// Base PORT value
    port: String,
}

impl From<&AppLaunchSpec> for AppRow {
    fn from(app: &AppLaunchSpec) -> Self {
        let modes: Vec<&str> = app.modes().collect();
        Self {
            name: app.name.clone(),
            command: app.command.clone(),
            args: app.args.clone(),
            modes: if modes.is_empty() { "-".into() } else { modes.join(",") },
            port: app.environment.get("PORT").cloned().unwrap_or_else(|| "-".into()),
        }
    }
}

fn find<'a>(descriptor: &'a Descriptor, name: &str) -> CliResult<&'a AppLaunchSpec> {
    descriptor
        .get(name)
        .ok_or_else(|| CliError::NotFound(name.to_string()))
}

/// List declared apps
pub fn list(file: &Path, format: OutputFormat) -> CliResult<()> {
    let descriptor = Descriptor::load(file)?;
    let rows: Vec<AppRow> = descriptor.apps().iter().map(AppRow::from).collect();
    output::print_output(rows, format)
}

/// Show an app's launch plan
pub fn show(file: &Path, name: &str, mode: Option<String>, format: OutputFormat) -> CliResult<()> {
    let descriptor = Descriptor::load(file)?;
    let plan = find(&descriptor, name)?.launch_plan(mode.as_deref());

    match format {
        OutputFormat::Table => {
            println!("{}     {}", "App:".bold(), plan.name);
            println!("{} {}", "Command:".bold(), plan.command_line());
            if let Some(cwd) = &plan.cwd {
                println!("{}     {}", "Cwd:".bold(), cwd.display());
            }
            println!(
                "{}    {}",
                "Mode:".bold(),
                plan.mode.as_deref().unwrap_or("(base)")
            );
            if let Some(port) = plan.port() {
                println!("{}    {}", "Port:".bold(), port);
            }
            println!("{}", "Environment:".bold());
            for (key, value) in &plan.env {
                println!("  {}={}", key, value);
            }
            Ok(())
        }
        _ => output::print_single(&plan, format),
    }
}

/// Print an app's resolved environment
pub fn env(file: &Path, name: &str, mode: Option<String>, format: OutputFormat) -> CliResult<()> {
    let descriptor = Descriptor::load(file)?;
    let env = find(&descriptor, name)?.resolve_environment(mode.as_deref());

    match format {
        OutputFormat::Table => {
            for (key, value) in &env {
                println!("{}={}", key, value);
            }
            Ok(())
        }
        _ => output::print_single(&env, format),
    }
}
