//! # seatwatch-core
//!
//! Core crate for SeatWatch. Contains the host configuration schema,
//! typed chat identifiers, domain events, tracing setup, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other SeatWatch crates.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
