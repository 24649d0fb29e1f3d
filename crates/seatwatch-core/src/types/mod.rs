//! Core type definitions used across the SeatWatch workspace.

pub mod id;

pub use id::*;
