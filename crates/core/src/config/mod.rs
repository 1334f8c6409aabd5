//! Configuration loading and schema definitions
//!
//! Optional TOML file controlling where the platform tree lives and which
//! plugin versions get injected.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
