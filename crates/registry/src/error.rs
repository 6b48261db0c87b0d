use std::error::Error as StdError;

/// Registration and removal failures.
///
/// These are programming errors in the registering module and are always
/// surfaced to the caller synchronously.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
	/// A static path with this name is already registered for the type.
	#[error("duplicate path: type={type_name} path={path:?}")]
	DuplicatePath { type_name: &'static str, path: String },
	/// No dynamic handler pair matched the one passed for removal.
	#[error("handler not found: type={type_name}")]
	HandlerNotFound { type_name: &'static str },
}

/// Failure writing through a [`Location`](crate::Location).
#[derive(Debug, thiserror::Error)]
pub enum SetError {
	/// The location has no setter attached.
	#[error("location is read-only: type={type_name}")]
	ReadOnly { type_name: &'static str },
	/// The written value is not of the location's declared type.
	#[error("type mismatch: expected={expected} found={found}")]
	TypeMismatch { expected: &'static str, found: &'static str },
	/// The object the setter writes into is gone (component removed, owner
	/// deleted). Property paths log and drop this one.
	#[error("target unavailable: {reason}")]
	TargetUnavailable { reason: String },
	/// Any other setter failure.
	#[error(transparent)]
	Failed(#[from] Box<dyn StdError + Send + Sync>),
}

impl SetError {
	/// Shorthand for [`SetError::TargetUnavailable`].
	pub fn unavailable(reason: impl Into<String>) -> Self {
		Self::TargetUnavailable { reason: reason.into() }
	}

	/// Wraps an arbitrary error as [`SetError::Failed`].
	pub fn failed(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
		Self::Failed(err.into())
	}
}
