//! Local assistant entry point.
//!
//! Runs extraction and synthesis inside a guarded scope: whatever goes wrong
//! internally, the caller gets a well-formed `respond` reply.

use std::panic::{self, AssertUnwindSafe};
use std::sync::LazyLock;
use tracing::{debug, error, warn};

use super::intent::IntentExtractor;
use super::response::{AiResponse, ResponseSynthesizer};
use super::suggest::suggest_corrections;
use crate::error::AppError;

/// Reply used when classification fails internally
pub const TROUBLE_MESSAGE: &str = "I'm having trouble understanding that request. Try asking me to navigate to a specific module, create a new record, or search for information.";

struct Engine {
    extractor: IntentExtractor,
    synthesizer: ResponseSynthesizer,
}

impl Engine {
    fn load() -> Result<Self, AppError> {
        Ok(Self {
            extractor: IntentExtractor::new()?,
            synthesizer: ResponseSynthesizer::new()?,
        })
    }

    fn classify(&self, message: &str) -> AiResponse {
        let intent = self.extractor.extract(message);
        debug!(
            action = %intent.action,
            target = %intent.target,
            context = ?intent.context,
            "AI intent"
        );

        let response = self.synthesizer.synthesize(&intent, message);
        debug!(
            action = %response.action,
            module = ?response.module,
            message = %response.message,
            "AI response"
        );

        response
    }
}

/// Rule-based chat assistant: message in, UI action out
pub struct LocalAssistant {
    engine: Result<Engine, AppError>,
}

impl Default for LocalAssistant {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalAssistant {
    /// Create an assistant over the shared pattern tables.
    ///
    /// Never fails: a table that did not compile is reported on each call
    /// and answered with the generic trouble reply.
    pub fn new() -> Self {
        let engine = Engine::load();
        if let Err(e) = &engine {
            warn!("Assistant tables unavailable: {}", e);
        }
        Self { engine }
    }

    /// Classify a chat message and build the reply. Never fails.
    pub fn process_message(&self, message: &str) -> AiResponse {
        guarded(|| match &self.engine {
            Ok(engine) => Ok(engine.classify(message)),
            Err(e) => Err(e.clone()),
        })
    }

    /// Keyword hints for a message the assistant did not understand
    pub fn suggest_corrections(&self, message: &str) -> Vec<String> {
        suggest_corrections(message)
    }
}

/// Run `classify`, turning an error or a panic into the trouble reply.
fn guarded<F>(classify: F) -> AiResponse
where
    F: FnOnce() -> Result<AiResponse, AppError>,
{
    match panic::catch_unwind(AssertUnwindSafe(classify)) {
        Ok(Ok(response)) => response,
        Ok(Err(e)) => {
            error!("AI processing error: {}", e);
            AiResponse::respond(TROUBLE_MESSAGE)
        }
        Err(_) => {
            error!("AI processing error: classification panicked");
            AiResponse::respond(TROUBLE_MESSAGE)
        }
    }
}

static SHARED_ASSISTANT: LazyLock<LocalAssistant> = LazyLock::new(LocalAssistant::new);

/// Classify `message` with the process-wide assistant
pub fn process_message(message: &str) -> AiResponse {
    SHARED_ASSISTANT.process_message(message)
}
