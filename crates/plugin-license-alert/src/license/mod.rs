//! License usage lookup against the workspace API.

pub mod usage;

pub use usage::{LicenseUsage, WorkspaceCredentials, fetch_usage};
