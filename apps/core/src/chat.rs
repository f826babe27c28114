//! Chat request handling around the local assistant.

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};
use validator::Validate;

use crate::assistant::{AiResponse, LocalAssistant, ResponseAction};
use crate::error::AppError;

/// Body returned when a chat request is rejected
pub const MESSAGE_REQUIRED: &str = "Message is required";

/// Inbound chat request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(required, length(min = 1))]
    pub message: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

/// Error body mirrored back to the caller for rejected requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl From<&AppError> for ErrorBody {
    fn from(err: &AppError) -> Self {
        let message = match err {
            AppError::Validation(msg) => msg.clone(),
            other => other.to_string(),
        };
        Self { message }
    }
}

/// Validate a chat request and run it through the assistant.
///
/// Rejects a missing or empty message; every accepted message gets an
/// [`AiResponse`], internal classifier failures included.
pub fn handle_chat(assistant: &LocalAssistant, request: &ChatRequest) -> Result<AiResponse, AppError> {
    request
        .validate()
        .map_err(|_| AppError::Validation(MESSAGE_REQUIRED.to_string()))?;
    let message = request
        .message
        .as_deref()
        .ok_or_else(|| AppError::Validation(MESSAGE_REQUIRED.to_string()))?;

    let message = message.trim();
    info!("Chat message received ({} chars)", message.chars().count());

    let response = assistant.process_message(message);
    if response.action == ResponseAction::Respond {
        let hints = assistant.suggest_corrections(message);
        if !hints.is_empty() {
            debug!(?hints, "Unresolved chat message");
        }
    }
    Ok(response)
}

/// Read one request line, decoding invalid UTF-8 lossily.
///
/// Returns `None` at end of input. The line terminator (`\n` or `\r\n`) is
/// stripped.
pub async fn read_request_line<R>(reader: &mut R, buf: &mut Vec<u8>) -> Result<Option<String>, AppError>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    if reader.read_until(b'\n', buf).await? == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(Some(String::from_utf8_lossy(buf).into_owned()))
}

/// Parse a request line: JSON when it opens with `{`, plain message text otherwise.
pub fn parse_request(line: &str) -> Result<ChatRequest, serde_json::Error> {
    if line.trim_start().starts_with('{') {
        serde_json::from_str(line)
    } else {
        Ok(ChatRequest::new(line))
    }
}

/// Answer one request line with one JSON line: the reply, or an error body.
pub fn reply_line(assistant: &LocalAssistant, line: &str) -> Result<String, AppError> {
    let body = match parse_request(line) {
        Ok(request) => match handle_chat(assistant, &request) {
            Ok(response) => serde_json::to_string(&response)?,
            Err(e) => {
                warn!("Chat request rejected: {}", e);
                serde_json::to_string(&ErrorBody::from(&e))?
            }
        },
        Err(e) => {
            warn!("Malformed chat request: {}", e);
            serde_json::to_string(&ErrorBody {
                message: format!("Invalid request: {}", e),
            })?
        }
    };
    Ok(body)
}
