//! Outbound HTTP helpers.

pub mod client;
