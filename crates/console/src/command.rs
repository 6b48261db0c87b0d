//! Console commands operating on introspection paths.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::completion::CompletionResult;
use crate::error::CompletionError;
use crate::paths::PathCompletion;

/// Output side of the console shell.
pub trait ConsoleShell {
	fn write_line(&mut self, line: &str);
	fn write_error(&mut self, line: &str);
}

/// Base for commands whose single argument is an introspection path.
///
/// Implementors get path completion for free through
/// [`PathCommand::complete`].
#[async_trait]
pub trait PathCommand: Send + Sync {
	fn name(&self) -> &'static str;
	fn description(&self) -> &'static str;
	fn help(&self) -> &'static str;

	fn completion(&self) -> &PathCompletion;

	fn execute(&self, shell: &mut dyn ConsoleShell, args: &[String]);

	async fn complete(&self, args: &[String], cancel: &CancellationToken) -> Result<CompletionResult, CompletionError> {
		self.completion().complete(args, cancel).await
	}
}

/// `vv <path>`: prints the current value at a local path.
pub struct ViewPathCommand {
	completion: PathCompletion,
}

impl ViewPathCommand {
	pub fn new(completion: PathCompletion) -> Self {
		Self { completion }
	}
}

#[async_trait]
impl PathCommand for ViewPathCommand {
	fn name(&self) -> &'static str {
		"vv"
	}

	fn description(&self) -> &'static str {
		"Prints the value at an introspection path."
	}

	fn help(&self) -> &'static str {
		"vv <path>"
	}

	fn completion(&self) -> &PathCompletion {
		&self.completion
	}

	fn execute(&self, shell: &mut dyn ConsoleShell, args: &[String]) {
		let [path] = args else {
			shell.write_error(&format!("usage: {}", self.help()));
			return;
		};

		let Some(local) = self.completion.local_path(path) else {
			shell.write_error(&format!("{path}: server-side paths are read on the server"));
			return;
		};

		let Some(loc) = self.completion.local().resolve_path(local) else {
			shell.write_error(&format!("{path}: no such path"));
			return;
		};

		match loc.get() {
			Some(value) => shell.write_line(&format!("{path}: {value:?}")),
			None => shell.write_line(&format!("{path}: <none>")),
		}
	}
}
