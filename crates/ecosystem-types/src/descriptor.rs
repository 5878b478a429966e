//! Ecosystem descriptor loading
//!
//! A descriptor file is parsed into a permissive raw shape first, then
//! converted into typed [`AppLaunchSpec`]s while every problem is recorded
//! in a [`ValidationReport`]. Unknown keys are rejected by the parser.

use crate::error::{DescriptorError, LoadError, Result};
use crate::format::Format;
use crate::spec::{AppLaunchSpec, EnvMap};
use crate::validation::{self, app_path, codes, ValidationError, ValidationReport};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Validated, immutable list of launch specs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Descriptor {
    apps: Vec<AppLaunchSpec>,
}

impl Descriptor {
    /// Build a descriptor from already-typed specs
    pub fn new(apps: Vec<AppLaunchSpec>) -> Result<Self> {
        let report = validation::validate_apps(&apps);
        Self::finish(apps, report).map(|(descriptor, _)| descriptor)
    }

    /// Parse and validate descriptor content
    pub fn parse(content: &str, format: Format) -> Result<Self> {
        Self::parse_with_report(content, format).map(|(descriptor, _)| descriptor)
    }

    /// Parse and validate, returning the warnings alongside the descriptor
    pub fn parse_with_report(content: &str, format: Format) -> Result<(Self, ValidationReport)> {
        let raw: RawDescriptor = format.decode(content)?;
        let mut report = ValidationReport::pass();

        let apps = match raw.apps {
            Some(apps) => apps
                .into_iter()
                .enumerate()
                .map(|(index, app)| app.into_spec(index, &mut report))
                .collect(),
            None => {
                report = report.with_error(
                    ValidationError::new(codes::MISSING_FIELD, "Missing required field `apps`")
                        .with_field("apps"),
                );
                Vec::new()
            }
        };

        let report = report.merge(validation::validate_apps(&apps));
        Self::finish(apps, report)
    }

    /// Read, parse and validate a descriptor file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_report(path).map(|(descriptor, _)| descriptor)
    }

    /// Read, parse and validate a descriptor file, returning the warnings too
    pub fn load_with_report(path: impl AsRef<Path>) -> Result<(Self, ValidationReport)> {
        let path = path.as_ref();
        let format = Format::from_path(path)
            .ok_or_else(|| LoadError::UnsupportedFormat(path.to_path_buf()))?;

        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), %format, "Loading descriptor");
        let (descriptor, report) = Self::parse_with_report(&content, format)?;
        tracing::info!(
            path = %path.display(),
            apps = descriptor.len(),
            warnings = report.warnings.len(),
            "Descriptor loaded"
        );

        Ok((descriptor, report))
    }

    fn finish(apps: Vec<AppLaunchSpec>, report: ValidationReport) -> Result<(Self, ValidationReport)> {
        for warning in &report.warnings {
            tracing::debug!(
                code = %warning.code,
                field = warning.field.as_deref().unwrap_or("-"),
                "{}",
                warning.message
            );
        }

        if !report.is_valid() {
            tracing::debug!(errors = report.errors.len(), "Descriptor rejected");
            return Err(DescriptorError::Validation(report));
        }

        Ok((Self { apps }, report))
    }

    /// Serialize back to text in the given format
    pub fn to_string_as(&self, format: Format) -> Result<String> {
        Ok(format.encode(self)?)
    }

    /// Launch specs in declaration order
    pub fn apps(&self) -> &[AppLaunchSpec] {
        &self.apps
    }

    /// Look up an app by name
    pub fn get(&self, name: &str) -> Option<&AppLaunchSpec> {
        self.apps.iter().find(|app| app.name == name)
    }

    /// App names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.apps.iter().map(|app| app.name.as_str())
    }

    /// Every deployment mode declared by any app
    pub fn modes(&self) -> BTreeSet<&str> {
        self.apps.iter().flat_map(|app| app.modes()).collect()
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

/// Top-level document as written on disk
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDescriptor {
    apps: Option<Vec<RawApp>>,
}

/// One app entry before type checks on its environment values
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawApp {
    name: Option<String>,
    command: Option<String>,
    #[serde(default)]
    args: Option<String>,
    #[serde(default)]
    cwd: Option<PathBuf>,
    #[serde(default)]
    environment: UniqueMap<serde_json::Value>,
    #[serde(default)]
    environment_by_mode: UniqueMap<UniqueMap<serde_json::Value>>,
}

impl RawApp {
    fn into_spec(self, index: usize, report: &mut ValidationReport) -> AppLaunchSpec {
        let path = app_path(index);

        let name = required(self.name, &format!("{}.name", path), report);
        let command = required(self.command, &format!("{}.command", path), report);
        let environment =
            validation::string_env(self.environment.0, &format!("{}.environment", path), report);

        let environment_by_mode = self
            .environment_by_mode
            .0
            .into_iter()
            .map(|(mode, env)| {
                let mode_path = format!("{}.environment_by_mode.{}", path, mode);
                let env: EnvMap = validation::string_env(env.0, &mode_path, report);
                (mode, env)
            })
            .collect();

        AppLaunchSpec {
            name,
            command,
            args: self.args.unwrap_or_default(),
            cwd: self.cwd,
            environment,
            environment_by_mode,
        }
    }
}

/// String-keyed map that rejects repeated keys.
///
/// JSON and YAML parsers keep the last value for a repeated key; descriptors
/// must fail instead.
#[derive(Debug)]
struct UniqueMap<V>(BTreeMap<String, V>);

impl<V> Default for UniqueMap<V> {
    fn default() -> Self {
        UniqueMap(BTreeMap::new())
    }
}

mod unique_map {
    use super::UniqueMap;
    use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
    use std::collections::BTreeMap;
    use std::fmt;
    use std::marker::PhantomData;

    impl<'de, V: Deserialize<'de>> Deserialize<'de> for UniqueMap<V> {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_map(UniqueMapVisitor(PhantomData))
        }
    }

    struct UniqueMapVisitor<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for UniqueMapVisitor<V> {
        type Value = UniqueMap<V>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map with unique keys")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut map = BTreeMap::new();
            while let Some(key) = access.next_key::<String>()? {
                if map.contains_key(&key) {
                    return Err(de::Error::custom(format_args!("duplicate key `{}`", key)));
                }
                let value = access.next_value()?;
                map.insert(key, value);
            }
            Ok(UniqueMap(map))
        }
    }
}

/// Unwrap a required string field, recording it as missing otherwise
fn required(value: Option<String>, field: &str, report: &mut ValidationReport) -> String {
    value.unwrap_or_else(|| {
        let name = field.rsplit('.').next().unwrap_or(field);
        report.errors.push(
            ValidationError::new(codes::MISSING_FIELD, format!("Missing required field `{}`", name))
                .with_field(field),
        );
        String::new()
    })
}
