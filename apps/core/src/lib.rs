//! BizDesk core: the local chat assistant and the reminders scan behind the
//! business dashboard.
//!
//! ## Modules
//! - `assistant`: rule-based intent classifier and reply synthesis
//! - `chat`: request validation around the assistant
//! - `reminders`: due-date / follow-up scan over loaded records
//! - `config`: environment configuration
//! - `telemetry`: tracing subscriber setup
//! - `error`: application error type

pub mod assistant;
pub mod chat;
pub mod config;
pub mod error;
pub mod reminders;
pub mod telemetry;

#[cfg(test)]
mod tests;

pub use assistant::{process_message, AiResponse, LocalAssistant};
pub use error::AppError;
