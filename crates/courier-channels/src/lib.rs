//! # courier-channels
//!
//! Messaging platform integrations for Courier.

pub mod telegram;
