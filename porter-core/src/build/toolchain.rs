//! External tool adapters: which commands test and build the target project

use crate::pipeline::ConversionConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TEST_COMMAND: &[&str] = &["npx", "vitest", "run", "--coverage"];
pub const DEFAULT_BUILD_COMMAND: &[&str] = &["npx", "vite", "build"];
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// One subprocess invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
    pub timeout: Duration,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            working_dir: PathBuf::from("."),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Program and arguments from an argv list; `None` when it is empty
    pub fn from_argv<S: AsRef<str>>(argv: &[S]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self::new(program.as_ref(), args.iter().map(|a| a.as_ref().to_string())))
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// The target ecosystem's test runner and build tool.
pub trait ToolchainAdapter: Send + Sync {
    fn name(&self) -> &str;

    fn test_command(&self) -> CommandSpec;

    fn build_command(&self) -> CommandSpec;
}

/// vitest for tests, vite for production builds
#[derive(Debug, Clone)]
pub struct ViteToolchain {
    project_root: PathBuf,
    timeout: Duration,
    test: CommandSpec,
    build: CommandSpec,
}

impl ViteToolchain {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let (program, args) = (DEFAULT_TEST_COMMAND[0], &DEFAULT_TEST_COMMAND[1..]);
        let test = CommandSpec::new(program, args.iter().copied());
        let (program, args) = (DEFAULT_BUILD_COMMAND[0], &DEFAULT_BUILD_COMMAND[1..]);
        let build = CommandSpec::new(program, args.iter().copied());
        Self { project_root: project_root.into(), timeout: DEFAULT_TIMEOUT, test, build }
    }

    /// Defaults overridden by any non-empty command in `config`
    pub fn from_config(config: &ConversionConfig) -> Self {
        let mut toolchain = Self::new(&config.project_root).with_timeout(config.build_timeout());
        if let Some(test) = config.test_command.as_deref().and_then(CommandSpec::from_argv) {
            toolchain.test = test;
        }
        if let Some(build) = config.build_command.as_deref().and_then(CommandSpec::from_argv) {
            toolchain.build = build;
        }
        toolchain
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn spec(&self, command: &CommandSpec) -> CommandSpec {
        command.clone().with_working_dir(&self.project_root).with_timeout(self.timeout)
    }
}

impl ToolchainAdapter for ViteToolchain {
    fn name(&self) -> &str {
        "vite"
    }

    fn test_command(&self) -> CommandSpec {
        self.spec(&self.test)
    }

    fn build_command(&self) -> CommandSpec {
        self.spec(&self.build)
    }
}
