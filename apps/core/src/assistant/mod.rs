//! # Assistant Module
//!
//! Rule-based chat assistant for BizDesk. Maps free text to an
//! application action without any model or external service.
//!
//! ## Components
//! - `normalize`: lowercase / punctuation stripping
//! - `intent`: ordered regex patterns and keyword fallbacks
//! - `modules`: canonical modules and the keyword lookup table
//! - `resolver`: target phrase -> module
//! - `response`: `AiResponse` and the per-intent reply policy
//! - `suggest`: "did you mean" hints
//! - `processor`: guarded entry point

pub mod intent;
pub mod modules;
pub mod normalize;
pub mod processor;
pub mod resolver;
pub mod response;
pub mod suggest;

pub use intent::{extract_intent, ExtractedIntent, IntentExtractor, IntentKind};
pub use modules::Module;
pub use normalize::normalize;
pub use processor::{process_message, LocalAssistant, TROUBLE_MESSAGE};
pub use resolver::resolve_module;
pub use response::{
    synthesize, AiResponse, ModalKind, ResponseAction, ResponseSynthesizer, SearchData,
};
pub use suggest::suggest_corrections;
