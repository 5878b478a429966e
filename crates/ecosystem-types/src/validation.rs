//! Descriptor validation
//!
//! Validation collects every problem in a descriptor instead of stopping at
//! the first one, so an operator can fix a file in a single pass. Errors make
//! the descriptor unloadable; warnings are reported but do not block loading.

use crate::spec::{parse_port, AppLaunchSpec, EnvMap, PORT_VAR};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Issue codes
pub mod codes {
    pub const MISSING_FIELD: &str = "MISSING_FIELD";
    pub const EMPTY_FIELD: &str = "EMPTY_FIELD";
    pub const DUPLICATE_NAME: &str = "DUPLICATE_NAME";
    pub const EMPTY_ENV_KEY: &str = "EMPTY_ENV_KEY";
    pub const NON_STRING_ENV_VALUE: &str = "NON_STRING_ENV_VALUE";
    pub const EMPTY_MODE_NAME: &str = "EMPTY_MODE_NAME";

    pub const INVALID_PORT: &str = "INVALID_PORT";
    pub const EMPTY_MODE: &str = "EMPTY_MODE";
    pub const NO_APPS: &str = "NO_APPS";
}

/// Result of descriptor validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Validation errors (if any)
    pub errors: Vec<ValidationError>,

    /// Validation warnings (non-fatal)
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// Create an empty (passing) report
    pub fn pass() -> Self {
        Self::default()
    }

    /// Whether validation passed
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn with_error(mut self, error: ValidationError) -> Self {
        self.errors.push(error);
        self
    }

    /// Add a warning
    pub fn with_warning(mut self, warning: ValidationWarning) -> Self {
        self.warnings.push(warning);
        self
    }

    /// Merge another report
    pub fn merge(mut self, other: ValidationReport) -> Self {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self
    }

    /// Whether any error carries `code`
    pub fn has_error(&self, code: &str) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }

    /// Whether any warning carries `code`
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.errors.len() == 1 { "error" } else { "errors" };
        write!(f, "{} {}", self.errors.len(), noun)?;
        for (i, error) in self.errors.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{}{}", sep, error)?;
        }
        Ok(())
    }
}

/// Validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error code
    pub code: String,

    /// Error message
    pub message: String,

    /// Field path that caused the error (e.g. `apps[0].environment.PORT`)
    pub field: Option<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
        }
    }

    /// Set the field
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{}: {} [{}]", field, self.message, self.code),
            None => write!(f, "{} [{}]", self.message, self.code),
        }
    }
}

/// Validation warning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationWarning {
    /// Warning code
    pub code: String,

    /// Warning message
    pub message: String,

    /// Field path that caused the warning (if applicable)
    pub field: Option<String>,
}

impl ValidationWarning {
    /// Create a new validation warning
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
        }
    }

    /// Set the field
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{}: {} [{}]", field, self.message, self.code),
            None => write!(f, "{} [{}]", self.message, self.code),
        }
    }
}

/// Path of the `index`th app
pub(crate) fn app_path(index: usize) -> String {
    format!("apps[{}]", index)
}

/// Validate a list of typed launch specs
pub fn validate_apps(apps: &[AppLaunchSpec]) -> ValidationReport {
    let mut report = ValidationReport::pass();

    if apps.is_empty() {
        report = report.with_warning(
            ValidationWarning::new(codes::NO_APPS, "Descriptor declares no apps").with_field("apps"),
        );
    }

    for (index, app) in apps.iter().enumerate() {
        report = report.merge(validate_app(index, app));
    }

    report.merge(validate_unique_names(apps))
}

/// Validate a single app's fields
fn validate_app(index: usize, app: &AppLaunchSpec) -> ValidationReport {
    let path = app_path(index);
    let mut report = ValidationReport::pass();

    if app.name.trim().is_empty() {
        report = report.with_error(
            ValidationError::new(codes::EMPTY_FIELD, "App name cannot be empty")
                .with_field(format!("{}.name", path)),
        );
    }

    if app.command.trim().is_empty() {
        report = report.with_error(
            ValidationError::new(codes::EMPTY_FIELD, "Command cannot be empty")
                .with_field(format!("{}.command", path)),
        );
    }

    report = report.merge(validate_env(&app.environment, &format!("{}.environment", path)));

    for (mode, env) in &app.environment_by_mode {
        let mode_path = format!("{}.environment_by_mode.{}", path, mode);

        if mode.trim().is_empty() {
            report = report.with_error(
                ValidationError::new(codes::EMPTY_MODE_NAME, "Deployment mode name cannot be empty")
                    .with_field(format!("{}.environment_by_mode", path)),
            );
        }

        if env.is_empty() {
            report = report.with_warning(
                ValidationWarning::new(
                    codes::EMPTY_MODE,
                    format!("Mode `{}` overrides nothing", mode),
                )
                .with_field(mode_path.clone()),
            );
        }

        report = report.merge(validate_env(env, &mode_path));
    }

    report
}

/// Validate the keys and well-known values of one environment mapping
fn validate_env(env: &EnvMap, path: &str) -> ValidationReport {
    let mut report = ValidationReport::pass();

    for (key, value) in env {
        if key.is_empty() {
            report = report.with_error(
                ValidationError::new(codes::EMPTY_ENV_KEY, "Environment variable name cannot be empty")
                    .with_field(path),
            );
        }

        if key == PORT_VAR && parse_port(value).is_none() {
            report = report.with_warning(
                ValidationWarning::new(
                    codes::INVALID_PORT,
                    format!("`{}` is not a port number in 1..=65535", value),
                )
                .with_field(format!("{}.{}", path, key)),
            );
        }
    }

    report
}

/// Reject app names declared more than once
fn validate_unique_names(apps: &[AppLaunchSpec]) -> ValidationReport {
    let mut report = ValidationReport::pass();
    let mut first_seen: HashMap<&str, usize> = HashMap::new();

    for (index, app) in apps.iter().enumerate() {
        if app.name.trim().is_empty() {
            continue;
        }
        if let Some(first) = first_seen.get(app.name.as_str()) {
            report = report.with_error(
                ValidationError::new(
                    codes::DUPLICATE_NAME,
                    format!(
                        "Duplicate app name `{}` (first declared at {})",
                        app.name,
                        app_path(*first)
                    ),
                )
                .with_field(format!("{}.name", app_path(index))),
            );
        } else {
            first_seen.insert(app.name.as_str(), index);
        }
    }

    report
}

/// Convert an untyped environment mapping, rejecting non-string values
pub(crate) fn string_env(
    raw: BTreeMap<String, serde_json::Value>,
    path: &str,
    report: &mut ValidationReport,
) -> EnvMap {
    let mut env = EnvMap::new();

    for (key, value) in raw {
        match value {
            serde_json::Value::String(s) => {
                env.insert(key, s);
            }
            other => {
                report.errors.push(
                    ValidationError::new(
                        codes::NON_STRING_ENV_VALUE,
                        format!(
                            "Environment values must be strings, found {} `{}`",
                            json_kind(&other),
                            other
                        ),
                    )
                    .with_field(format!("{}.{}", path, key)),
                );
            }
        }
    }

    env
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
