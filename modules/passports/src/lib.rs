// === PUBLIC CONTRACT ===
// Consumers depend on the contract module only
pub mod contract;

pub use contract::{client, error, model};

// === ERROR CATALOG ===
pub mod errors;

// === MODULE DEFINITION ===
pub mod module;
pub use module::Passports;

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
