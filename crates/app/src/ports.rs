//! Port definitions: the capability contract every backend implements.
//!
//! The contract is split into capability groups so each can be faked on its
//! own; [`Backend`] composes them into the single surface the dispatcher
//! forwards to. [`CommandRunner`] is the outbound port concrete backends use
//! to reach platform tooling.

pub mod app_lifecycle;
pub mod backend;
pub mod command;
pub mod element_query;
pub mod file_transfer;
pub mod gesture;
pub mod navigation;

pub use app_lifecycle::AppLifecycle;
pub use backend::Backend;
pub use command::{CommandOutput, CommandRunner, ProcessError};
pub use element_query::ElementQuery;
pub use file_transfer::FileTransfer;
pub use gesture::Gestures;
pub use navigation::Navigation;
