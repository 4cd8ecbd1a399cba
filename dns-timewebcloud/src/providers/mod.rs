//! DNS provider API clients

/// Shared utilities used by provider clients.
pub mod common;

mod timewebcloud;

pub(crate) use timewebcloud::PROVIDER_NAME;
pub use timewebcloud::{AccountStatus, AccountStatusResponse, ClientConfig, TimewebClient};
