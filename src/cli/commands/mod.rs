//! CLI command implementations.

mod artifacts;
mod config;
mod doctor;
mod generate;
mod serve;

pub use artifacts::run_artifacts;
pub use config::run_config;
pub use doctor::run_doctor;
pub use generate::{run_generate, KeyArgs};
pub use serve::{router, run_serve, AppState};
