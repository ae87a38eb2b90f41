//! # courier-core
//!
//! Core types, traits, the offset-tracking update stream, configuration,
//! and error handling for Courier.

pub mod config;
pub mod error;
pub mod message;
pub mod offset;
pub mod stream;
pub mod traits;
