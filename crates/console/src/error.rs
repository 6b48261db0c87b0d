/// Failure of a completion request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompletionError {
	/// The caller cancelled the request while it was waiting on a peer.
	#[error("completion cancelled")]
	Cancelled,
}

/// Failure of a remote path listing. Never surfaced past the completion
/// front-end.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RemoteError {
	#[error("no remote peer connected")]
	Unavailable,
	#[error("remote listing failed: {0}")]
	Failed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("invalid console config: {0}")]
	Parse(#[from] toml::de::Error),
	#[error("client_prefix must not be empty")]
	EmptyClientPrefix,
}
