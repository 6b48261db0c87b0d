//! Boundary to the networking layer.

use async_trait::async_trait;

use crate::error::RemoteError;

/// What the completion front-end needs from the network manager.
#[async_trait]
pub trait NetManager: Send + Sync {
	/// Whether this process is the client half of a client/server session.
	fn is_client(&self) -> bool;

	/// Asks the server for completion candidates of `path`.
	async fn list_remote_path(&self, path: &str) -> Result<Vec<String>, RemoteError>;
}

/// A process with no peer. Always completes locally.
#[derive(Debug, Default, Clone, Copy)]
pub struct Standalone;

#[async_trait]
impl NetManager for Standalone {
	fn is_client(&self) -> bool {
		false
	}

	async fn list_remote_path(&self, _path: &str) -> Result<Vec<String>, RemoteError> {
		Err(RemoteError::Unavailable)
	}
}
