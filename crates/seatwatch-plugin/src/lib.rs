//! # seatwatch-plugin
//!
//! Plugin framework for SeatWatch. Provides:
//!
//! - Plugin lifecycle management (load, start, stop, unload)
//! - Hook registry with priority-ordered registration
//! - Hook dispatcher with Continue/Halt semantics and a per-handler timeout
//! - Settings descriptors and the store that serves them back to plugins
//! - Plugin API context exposing the host's settings, messaging, and HTTP
//!   services to plugin code

pub mod api;
pub mod hooks;
pub mod manager;
pub mod registry;

pub use api::context::PluginContext;
pub use hooks::definitions::{HookAction, HookPayload, HookPoint, HookResult};
pub use hooks::dispatcher::HookDispatcher;
pub use hooks::registry::{HookHandler, HookRegistry};
pub use manager::PluginManager;
pub use registry::{Plugin, PluginInfo, PluginRegistry};
