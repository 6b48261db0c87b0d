//! Path completion shared by every console command taking an introspection
//! path.

use std::sync::Arc;

use lens_registry::{Location, ViewVariables};
use parking_lot::RwLock;
use tokio_util::sync::CancellationToken;

use crate::completion::{CompletionOption, CompletionResult};
use crate::config::ConsoleConfig;
use crate::error::CompletionError;
use crate::net::NetManager;

/// Read access to the local path tree.
pub trait LocalPaths: Send + Sync {
	fn list_path(&self, partial: &str) -> Vec<String>;
	fn resolve_path(&self, path: &str) -> Option<Location>;
}

impl LocalPaths for RwLock<ViewVariables> {
	fn list_path(&self, partial: &str) -> Vec<String> {
		self.read().list_path(partial)
	}

	fn resolve_path(&self, path: &str) -> Option<Location> {
		self.read().resolve_path(path)
	}
}

/// Produces path completion candidates from the local tree or a remote peer.
///
/// On a client, paths starting with the client prefix address the local tree
/// and everything else addresses the server. Elsewhere all paths are local.
#[derive(Clone)]
pub struct PathCompletion {
	local: Arc<dyn LocalPaths>,
	net: Arc<dyn NetManager>,
	config: ConsoleConfig,
}

impl PathCompletion {
	pub fn new(local: Arc<dyn LocalPaths>, net: Arc<dyn NetManager>) -> Self {
		Self::with_config(local, net, ConsoleConfig::default())
	}

	pub fn with_config(local: Arc<dyn LocalPaths>, net: Arc<dyn NetManager>, config: ConsoleConfig) -> Self {
		Self { local, net, config }
	}

	pub fn local(&self) -> &dyn LocalPaths {
		self.local.as_ref()
	}

	pub fn net(&self) -> &dyn NetManager {
		self.net.as_ref()
	}

	pub fn config(&self) -> &ConsoleConfig {
		&self.config
	}

	/// Strips the client prefix when it selects the local tree.
	///
	/// Returns `None` for paths that address the server.
	pub fn local_path<'a>(&self, path: &'a str) -> Option<&'a str> {
		if !self.net.is_client() {
			return Some(path);
		}
		path.strip_prefix(self.config.client_prefix.as_str())
	}

	/// Completes the single path argument in `args`.
	///
	/// Any other argument count yields an empty result. Only the remote query
	/// can be cancelled; its failure degrades to no remote candidates.
	pub async fn complete(&self, args: &[String], cancel: &CancellationToken) -> Result<CompletionResult, CompletionError> {
		let [path] = args else {
			return Ok(CompletionResult::empty());
		};

		if let Some(local) = self.local_path(path) {
			let prefix = if self.net.is_client() {
				self.config.client_prefix.as_str()
			} else {
				""
			};
			let options = self
				.local
				.list_path(local)
				.into_iter()
				.map(|p| CompletionOption::partial(format!("{prefix}{p}")));
			return Ok(CompletionResult::from_options(options));
		}

		let remote = tokio::select! {
			biased;
			_ = cancel.cancelled() => return Err(CompletionError::Cancelled),
			result = self.net.list_remote_path(path) => result,
		};
		let remote = remote.unwrap_or_else(|e| {
			tracing::warn!(path = %path, error = %e, "remote path listing failed");
			Vec::new()
		});

		let client = CompletionOption::partial(self.config.client_prefix.as_str()).with_hint(self.config.client_hint.as_str());
		Ok(CompletionResult::from_options(
			remote
				.into_iter()
				.map(CompletionOption::partial)
				.chain(std::iter::once(client)),
		))
	}
}
