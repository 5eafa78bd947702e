//! # appdriver-app
//!
//! Application layer: the capability contract (**port traits**) and the
//! driver that dispatches it.
//!
//! ## Responsibilities
//! - Define the **capability traits** every backend implements:
//!   `Navigation`, `ElementQuery`, `Gestures`, `AppLifecycle`,
//!   `FileTransfer`, composed into `Backend`
//! - Define the **`CommandRunner`** port backends use to reach device tools
//! - Map platforms to backend factories (`BackendRegistry`)
//! - Load configuration files and build drivers (`AppDriverBuilder`)
//! - Forward every contract call to the selected backend (`AppDriver`)
//!
//! ## Dependency rule
//! Depends on `appdriver-domain` only (plus `tokio::process` for the system
//! command runner). Never imports adapter crates. Adapters depend on *this*
//! crate, not the reverse.

pub mod builder;
pub mod config_file;
pub mod driver;
pub mod ports;
pub mod process;
pub mod registry;

#[cfg(test)]
pub(crate) mod testing;
