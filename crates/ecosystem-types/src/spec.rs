//! Application launch specifications
//!
//! An AppLaunchSpec defines what the process manager starts - the command,
//! its arguments, and the environment handed to the process.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Flat environment mapping (variable name to value)
pub type EnvMap = BTreeMap<String, String>;

/// Environment variable carrying the port the process binds to
pub const PORT_VAR: &str = "PORT";

/// Launch description for a single application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppLaunchSpec {
    /// Unique application name
    pub name: String,

    /// Executable or package-manager verb to invoke
    pub command: String,

    /// Arguments passed to the command
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub args: String,

    /// Working directory for the launched process
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,

    /// Base environment
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub environment: EnvMap,

    /// Per-mode overrides of the base environment
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub environment_by_mode: BTreeMap<String, EnvMap>,
}

impl AppLaunchSpec {
    /// Create a new launch spec with an empty environment
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            args: String::new(),
            cwd: None,
            environment: EnvMap::new(),
            environment_by_mode: BTreeMap::new(),
        }
    }

    pub fn with_args(mut self, args: impl Into<String>) -> Self {
        self.args = args.into();
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.insert(key.into(), value.into());
        self
    }

    pub fn with_mode_env(
        mut self,
        mode: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.environment_by_mode
            .entry(mode.into())
            .or_default()
            .insert(key.into(), value.into());
        self
    }

    /// Deployment modes this spec declares
    pub fn modes(&self) -> impl Iterator<Item = &str> {
        self.environment_by_mode.keys().map(String::as_str)
    }

    /// Whether this spec declares an override block for `mode`
    pub fn has_mode(&self, mode: &str) -> bool {
        self.environment_by_mode.contains_key(mode)
    }

    /// Resolve the environment for a deployment mode.
    ///
    /// Mode values override base values key by key. An undeclared mode falls
    /// back to the base environment.
    pub fn resolve_environment(&self, mode: Option<&str>) -> EnvMap {
        let mut env = self.environment.clone();
        let Some(mode) = mode else {
            return env;
        };

        match self.environment_by_mode.get(mode) {
            Some(overrides) => {
                env.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
            None => {
                tracing::warn!(
                    app = %self.name,
                    mode,
                    "Mode not declared for app, using base environment"
                );
            }
        }

        env
    }

    /// Split `args` into an argument vector
    pub fn arg_vec(&self) -> Vec<String> {
        self.args.split_ascii_whitespace().map(str::to_owned).collect()
    }

    /// Resolve this spec into what the process manager would execute
    pub fn launch_plan(&self, mode: Option<&str>) -> LaunchPlan {
        LaunchPlan {
            name: self.name.clone(),
            program: self.command.clone(),
            args: self.arg_vec(),
            cwd: self.cwd.clone(),
            mode: mode.filter(|m| self.has_mode(m)).map(str::to_owned),
            env: self.resolve_environment(mode),
        }
    }
}

/// A launch spec resolved for one deployment mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchPlan {
    pub name: String,
    pub program: String,
    pub args: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
    /// Active mode, if one was requested and declared
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    pub env: EnvMap,
}

impl LaunchPlan {
    /// Port the process is told to bind, if `PORT` is set and valid
    pub fn port(&self) -> Option<u16> {
        self.env.get(PORT_VAR).and_then(|v| parse_port(v))
    }

    /// Program and arguments joined for display
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Parse a decimal port number in 1..=65535
pub fn parse_port(value: &str) -> Option<u16> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse::<u16>().ok().filter(|port| *port != 0)
}
