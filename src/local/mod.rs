//! Local Git repository discovery and remote URL parsing.

mod discovery;
mod error;
mod remote;

pub use discovery::discover_repository;
pub use error::LocalDiscoveryError;
pub use remote::{RemoteRepo, parse_remote_url};
