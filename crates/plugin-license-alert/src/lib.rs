//! License seat alert plugin for SeatWatch.
//!
//! When a user account is created, this plugin asks the workspace licensing
//! API how many seats are in use. If usage is at or above the configured
//! threshold it alerts a designated user by direct message, broadcasts to
//! designated rooms, and POSTs to an external endpoint, each independently.

pub mod error;
pub mod hooks;
pub mod license;
pub mod message;
pub mod notifier;
pub mod plugin;
pub mod settings;
pub mod targets;
pub mod webhook;

pub use error::LicenseAlertError;
pub use notifier::{AlertOutcome, Notifier};
pub use plugin::LicenseAlertPlugin;
