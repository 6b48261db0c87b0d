//! Console front-end for introspection paths.
//!
//! * [`PathCompletion`] - completion of path arguments, locally or through a
//!   remote peer.
//! * [`PathCommand`] - base trait for commands taking a path argument, with
//!   [`ViewPathCommand`] (`vv`) as the stock implementation.
//! * [`NetManager`] - what this crate needs from the networking layer.
//! * [`ConsoleConfig`] - client prefix settings, loadable from TOML.

pub mod command;
pub mod completion;
pub mod config;
pub mod error;
pub mod net;
pub mod paths;

pub use command::{ConsoleShell, PathCommand, ViewPathCommand};
pub use completion::{CompletionOption, CompletionOptionFlags, CompletionResult};
pub use config::ConsoleConfig;
pub use error::{CompletionError, ConfigError, RemoteError};
pub use net::{NetManager, Standalone};
pub use paths::{LocalPaths, PathCompletion};
