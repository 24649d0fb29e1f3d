//! Plugin API: context and services exposed to plugin code.

pub mod context;
pub mod http;
pub mod messaging;
pub mod services;
pub mod settings;

pub use context::PluginContext;
