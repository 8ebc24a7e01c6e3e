//! Core domain models for Clowder
//!
//! This crate contains the shared data structures used across storage
//! and transport: Cat, User, and the request payloads.

pub mod models;

pub use models::*;
