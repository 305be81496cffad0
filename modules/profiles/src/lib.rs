// === PUBLIC CONTRACT ===
// Other modules consume profiles only through `contract`.
pub mod contract;
pub use contract::{client, error, model};

// === MODULE DEFINITION ===
pub mod module;
pub use module::{module_entry, Profiles, MODULE_NAME};

// === INTERNAL MODULES ===
// Exposed for integration tests; not a stable API.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod gateways;
#[doc(hidden)]
pub mod infra;

/// `HH:MM` serde helpers shared with modules that render class times.
pub mod serde_hhmm;
