use std::collections::HashMap;
use std::path::PathBuf;
use std::process::{Command, Output};

use crate::errors::GemorderError;

/// Output of a finished external command, decoded as UTF-8.
#[derive(Debug, Clone)]
pub struct Captured {
    /// Whether the command exited with status zero.
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl Captured {
    /// Stdout followed by stderr, the way a `cmd > file 2>&1` redirect
    /// would roughly interleave them for line-oriented tools.
    pub fn combined(&self) -> String {
        let mut text = self.stdout.clone();
        text.push_str(&self.stderr);
        text
    }
}

/// Builder for constructing and executing external processes.
///
/// Provides a fluent API for setting program, arguments, environment
/// variables, and working directory. All execution is synchronous and
/// blocks until the child exits.
pub struct CommandBuilder {
    program: String,
    args: Vec<String>,
    env: HashMap<String, String>,
    cwd: Option<PathBuf>,
}

impl CommandBuilder {
    /// Create a new builder for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: HashMap::new(),
            cwd: None,
        }
    }

    /// Append a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable for the child process.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Set the working directory for the child process.
    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Execute the command and return its raw output.
    pub fn exec(&self) -> Result<Output, GemorderError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        for (k, v) in &self.env {
            cmd.env(k, v);
        }
        if let Some(ref dir) = self.cwd {
            cmd.current_dir(dir);
        }
        cmd.output().map_err(GemorderError::from)
    }

    /// Execute the command and capture its output as UTF-8 text.
    ///
    /// A non-zero exit status is not an error here; it is reported via
    /// [`Captured::success`] so callers can decide how to react.
    pub fn capture(&self) -> Result<Captured, GemorderError> {
        let output = self.exec()?;
        Ok(Captured {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
