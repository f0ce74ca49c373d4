// CarePal Backend Core
// "The Companion" - Orchestrator of Care Actors

pub mod actors;
pub mod brain;
pub mod config;
pub mod error;
pub mod models;
pub mod reminder;
pub mod telemetry;

#[cfg(test)]
mod tests;

pub use actors::SupervisorHandle;
pub use config::CoreConfig;
pub use error::AppError;
pub use models::ResponseEnvelope;
