//! Thin client around the local `gem` executable.

use gemorder_util::errors::GemorderError;
use gemorder_util::process::{Captured, CommandBuilder};

/// Whether a name is a well-formed gem name.
///
/// Path separators are rejected outright (reserved for namespacing and a
/// sure sign the name refers to something other than a gem).
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.contains('/') && !name.contains('\\')
}

/// Invokes `gem` subcommands and captures their output.
///
/// Every call blocks until the subprocess exits; there is no timeout.
/// Callers needing bounded latency must wrap invocations externally.
#[derive(Debug, Clone)]
pub struct GemClient {
    program: String,
}

impl Default for GemClient {
    fn default() -> Self {
        Self::new("gem")
    }
}

impl GemClient {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run `gem dependency <name>` and capture the version/dependency
    /// listing. A non-zero exit usually means the gem is not installed
    /// locally; that is reported via [`Captured::success`], not an error.
    pub fn dependency(&self, name: &str) -> Result<Captured, GemorderError> {
        CommandBuilder::new(&self.program)
            .arg("dependency")
            .arg(name)
            .capture()
    }

    /// Run `gem install <name> [-v <requirement>]`.
    pub fn install(
        &self,
        name: &str,
        requirement: Option<&str>,
    ) -> Result<Captured, GemorderError> {
        let mut builder = CommandBuilder::new(&self.program).arg("install").arg(name);
        if let Some(requirement) = requirement {
            builder = builder.arg("-v").arg(requirement);
        }
        builder.capture()
    }

    /// Run `gem fetch <name>` in the given working directory, leaving any
    /// downloaded `.gem` file there.
    pub fn fetch(&self, name: &str, cwd: &std::path::Path) -> Result<Captured, GemorderError> {
        CommandBuilder::new(&self.program)
            .arg("fetch")
            .arg(name)
            .cwd(cwd)
            .capture()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_validation() {
        assert!(is_valid_name("rails"));
        assert!(is_valid_name("rspec-core"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("pkg/with/slash"));
        assert!(!is_valid_name("pkg\\backslash"));
    }

    #[test]
    fn dependency_invocation_shape() {
        // Use `echo` to observe exactly what the client would run.
        let client = GemClient::new("echo");
        let captured = client.dependency("rails").unwrap();
        assert!(captured.success);
        assert_eq!(captured.stdout.trim(), "dependency rails");
    }

    #[test]
    fn install_passes_single_requirement() {
        let client = GemClient::new("echo");
        let captured = client.install("rake", Some(">=1.0")).unwrap();
        assert_eq!(captured.stdout.trim(), "install rake -v >=1.0");

        let captured = client.install("rake", None).unwrap();
        assert_eq!(captured.stdout.trim(), "install rake");
    }

    #[test]
    fn fetch_runs_in_given_directory() {
        let tmp = tempfile::TempDir::new().unwrap();
        let client = GemClient::new("pwd");
        let captured = client.fetch("rails", tmp.path()).unwrap();
        assert!(captured.success);
        assert!(!captured.stdout.trim().is_empty());
    }

    #[test]
    fn missing_program_is_an_io_error() {
        let client = GemClient::new("gem_program_that_does_not_exist_xyz");
        assert!(client.dependency("rails").is_err());
    }
}
