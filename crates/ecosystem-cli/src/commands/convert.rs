//! Descriptor format conversion

use crate::error::CliResult;
use ecosystem_types::{Descriptor, Format};
use std::path::Path;

/// Target format for conversion
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum TargetFormat {
    Json,
    Yaml,
    Toml,
}

impl From<TargetFormat> for Format {
    fn from(target: TargetFormat) -> Self {
        match target {
            TargetFormat::Json => Format::Json,
            TargetFormat::Yaml => Format::Yaml,
            TargetFormat::Toml => Format::Toml,
        }
    }
}

/// Execute the convert command
pub fn execute(file: &Path, to: TargetFormat) -> CliResult<()> {
    let descriptor = Descriptor::load(file)?;
    let text = descriptor.to_string_as(to.into())?;
    print!("{}", text);
    if !text.ends_with('\n') {
        println!();
    }
    Ok(())
}
