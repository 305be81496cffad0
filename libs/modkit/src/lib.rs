//! # ModKit - module system for the SyncUp server
//!
//! Modules are plain structs implementing [`Module`] plus any capability
//! traits they need. The binary lists them explicitly in a
//! [`ModuleRegistry`], and the runner drives the phases:
//! init → db → rest → start → wait → stop.

pub use anyhow::Result;
pub use async_trait::async_trait;

pub mod contracts;
pub use crate::contracts::*;

pub mod context;
pub use context::{ConfigProvider, ModuleCtx, ModuleCtxBuilder};

pub mod client_hub;
pub mod registry;
pub use client_hub::ClientHub;
pub use registry::{ModuleEntry, ModuleRegistry, RegistryBuilder};

pub mod api;
pub use api::problem::{not_found, unauthorized, Problem, ProblemResponse, ValidationError};
pub use api::OpenApiRegistry;

pub mod http;
pub use http::client::TracedClient;

pub mod security;
pub use security::AuthSubject;

pub mod runtime;
pub use runtime::{run, RunOptions, ShutdownOptions};
