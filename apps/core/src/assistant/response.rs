//! Response synthesis: turns an extracted intent into the UI action the
//! chat frontend should perform.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use super::intent::{ExtractedIntent, IntentKind};
use super::modules::{Module, MODULE_KEYWORDS};
use super::resolver::resolve_module;
use crate::error::AppError;

const NAVIGATE_OPTIONS: &str = "I can help you navigate to: Dashboard, Leads, Tickets, Deals, Projects, Tasks, Emails, Users, or Companies. Which would you like to visit?";
const CREATE_OPTIONS: &str = "I can help you create: Leads, Tickets, Deals, Projects, Tasks, Emails, Users, or Companies. What would you like to create?";
const SEARCH_OPTIONS: &str = "I can search through: Leads, Tickets, Deals, Projects, Tasks, Emails, Users, or Companies. What would you like to search for?";
const UPDATE_HINT: &str = "To update records, please navigate to the specific module and select the item you want to modify. I can help you navigate there if you tell me what you want to update.";
const DELETE_HINT: &str = "To delete records, please navigate to the specific module and select the item you want to remove. I can help you navigate there if you tell me what you want to delete.";
const ASSIGN_HINT: &str = "To assign items, please navigate to the specific module (Leads, Tickets, Deals, Projects, or Tasks) and select the item you want to assign. I can help you navigate there.";
const DASHBOARD_OVERVIEW: &str = "Showing dashboard with current statistics and overview.";
const SYSTEM_STATUS: &str = "Showing overall system status and statistics.";
const HELP_SUMMARY: &str = "I can help you with: Navigate (go to any module), Create (add new records), Search (find specific items), View status (see dashboard), and manage all your business data. What would you like to do?";
const BUSINESS_STATS: &str = "Showing your business statistics and key metrics.";
const GENERIC_FALLBACK: &str = "I understand you want to work with your business data. I can help you navigate to different modules, create new records, search for information, or show statistics. Try saying something like 'show me leads', 'create a new ticket', or 'go to dashboard'.";

/// UI action requested from the frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseAction {
    /// Switch to `module`
    Navigate,
    /// Switch to `module` and open the form named by `type`
    OpenModal,
    /// Only show `message`
    Respond,
}

impl fmt::Display for ResponseAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ResponseAction::Navigate => "navigate",
            ResponseAction::OpenModal => "open_modal",
            ResponseAction::Respond => "respond",
        };
        write!(f, "{}", label)
    }
}

/// Form opened alongside `open_modal`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalKind {
    Create,
}

/// Search filter handed to the target module's list view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchData {
    pub search: String,
}

/// Structured assistant reply consumed by the chat frontend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiResponse {
    pub action: ResponseAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<Module>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ModalKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<SearchData>,
    /// User-displayable text, always present
    pub message: String,
}

impl AiResponse {
    pub fn respond(message: impl Into<String>) -> Self {
        Self {
            action: ResponseAction::Respond,
            module: None,
            kind: None,
            data: None,
            message: message.into(),
        }
    }

    pub fn navigate(module: Module, message: impl Into<String>) -> Self {
        Self {
            action: ResponseAction::Navigate,
            module: Some(module),
            kind: None,
            data: None,
            message: message.into(),
        }
    }

    pub fn open_create_form(module: Module) -> Self {
        Self {
            action: ResponseAction::OpenModal,
            module: Some(module),
            kind: Some(ModalKind::Create),
            data: None,
            message: format!("Opening form to create a new {}.", module.entity_name()),
        }
    }

    pub fn search(module: Module, term: String) -> Self {
        let message = if term.is_empty() {
            format!("Showing all {}.", module)
        } else {
            format!("Searching for \"{}\" in {}.", term, module)
        };
        Self {
            action: ResponseAction::Navigate,
            module: Some(module),
            kind: None,
            data: Some(SearchData { search: term }),
            message,
        }
    }
}

fn compile_keyword_stripper() -> Result<Regex, AppError> {
    let alternation = MODULE_KEYWORDS
        .iter()
        .map(|(key, _)| regex::escape(key))
        .collect::<Vec<_>>()
        .join("|");
    Ok(Regex::new(&format!("(?i){}", alternation))?)
}

static KEYWORD_STRIPPER: LazyLock<Result<Regex, AppError>> =
    LazyLock::new(compile_keyword_stripper);

/// Builds [`AiResponse`]s from extracted intents
pub struct ResponseSynthesizer {
    keyword_stripper: &'static Regex,
}

impl ResponseSynthesizer {
    pub fn new() -> Result<Self, AppError> {
        let keyword_stripper = KEYWORD_STRIPPER.as_ref().map_err(Clone::clone)?;
        Ok(Self { keyword_stripper })
    }

    /// Search term for a search intent: the explicit filter capture, or the
    /// target with every module keyword substring removed.
    fn search_term(&self, intent: &ExtractedIntent) -> String {
        match intent.context.first() {
            Some(term) if !term.is_empty() => term.clone(),
            _ => self
                .keyword_stripper
                .replace_all(&intent.target, "")
                .trim()
                .to_string(),
        }
    }

    /// Build the reply for `intent`; `original_message` is the raw chat text.
    pub fn synthesize(&self, intent: &ExtractedIntent, original_message: &str) -> AiResponse {
        let module = resolve_module(&intent.target);

        match intent.action {
            IntentKind::Navigation => match module {
                Some(module) => {
                    AiResponse::navigate(module, format!("Navigating to {} module.", module))
                }
                None => AiResponse::respond(NAVIGATE_OPTIONS),
            },
            IntentKind::Create => match module {
                Some(module) => AiResponse::open_create_form(module),
                None => AiResponse::respond(CREATE_OPTIONS),
            },
            IntentKind::Search => match module {
                Some(module) => AiResponse::search(module, self.search_term(intent)),
                None => AiResponse::respond(SEARCH_OPTIONS),
            },
            IntentKind::Update => AiResponse::respond(UPDATE_HINT),
            IntentKind::Delete => AiResponse::respond(DELETE_HINT),
            IntentKind::Status => {
                let wants_overview =
                    intent.target.contains("overview") || intent.target.contains("summary");
                match module {
                    Some(Module::Dashboard) => {
                        AiResponse::navigate(Module::Dashboard, DASHBOARD_OVERVIEW)
                    }
                    _ if wants_overview => {
                        AiResponse::navigate(Module::Dashboard, DASHBOARD_OVERVIEW)
                    }
                    Some(module) => AiResponse::navigate(
                        module,
                        format!("Showing {} status and information.", module),
                    ),
                    None => AiResponse::navigate(Module::Dashboard, SYSTEM_STATUS),
                }
            }
            IntentKind::Assign => AiResponse::respond(ASSIGN_HINT),
            IntentKind::Respond => {
                let lowered = original_message.to_lowercase();
                if lowered.contains("help") {
                    AiResponse::respond(HELP_SUMMARY)
                } else if lowered.contains("stats") || lowered.contains("numbers") {
                    AiResponse::navigate(Module::Dashboard, BUSINESS_STATS)
                } else {
                    AiResponse::respond(GENERIC_FALLBACK)
                }
            }
        }
    }
}

/// Build the reply for `intent` with the shared keyword table
pub fn synthesize(intent: &ExtractedIntent, original_message: &str) -> Result<AiResponse, AppError> {
    Ok(ResponseSynthesizer::new()?.synthesize(intent, original_message))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent(action: IntentKind, target: &str, context: &[&str]) -> ExtractedIntent {
        ExtractedIntent {
            action,
            target: target.to_string(),
            context: context.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_create_form() {
        let synth = ResponseSynthesizer::new().unwrap();
        let response = synth.synthesize(&intent(IntentKind::Create, "new ticket", &[]), "");
        assert_eq!(response.action, ResponseAction::OpenModal);
        assert_eq!(response.module, Some(Module::Tickets));
        assert_eq!(response.kind, Some(ModalKind::Create));
        assert_eq!(response.message, "Opening form to create a new ticket.");
    }

    #[test]
    fn test_search_uses_context_first() {
        let synth = ResponseSynthesizer::new().unwrap();
        let response = synth.synthesize(&intent(IntentKind::Search, "leads", &["acme"]), "");
        assert_eq!(response.data, Some(SearchData { search: "acme".to_string() }));
        assert_eq!(response.message, "Searching for \"acme\" in leads.");
    }

    #[test]
    fn test_search_strips_keywords() {
        let synth = ResponseSynthesizer::new().unwrap();

        let response = synth.synthesize(&intent(IntentKind::Search, "acme customer", &[]), "");
        assert_eq!(response.module, Some(Module::Leads));
        assert_eq!(response.data, Some(SearchData { search: "acme".to_string() }));

        let response = synth.synthesize(&intent(IntentKind::Search, "ticket", &[]), "");
        assert_eq!(response.data, Some(SearchData { search: String::new() }));
        assert_eq!(response.message, "Showing all tickets.");
    }

    #[test]
    fn test_status_branches() {
        let synth = ResponseSynthesizer::new().unwrap();

        let response = synth.synthesize(&intent(IntentKind::Status, "summary", &[]), "");
        assert_eq!(response.module, Some(Module::Dashboard));
        assert_eq!(response.message, DASHBOARD_OVERVIEW);

        let response = synth.synthesize(&intent(IntentKind::Status, "deals overview", &[]), "");
        assert_eq!(response.module, Some(Module::Dashboard));
        assert_eq!(response.message, DASHBOARD_OVERVIEW);

        let response = synth.synthesize(&intent(IntentKind::Status, "tickets", &[]), "");
        assert_eq!(response.module, Some(Module::Tickets));
        assert_eq!(response.message, "Showing tickets status and information.");

        let response = synth.synthesize(&intent(IntentKind::Status, "things", &[]), "");
        assert_eq!(response.action, ResponseAction::Navigate);
        assert_eq!(response.module, Some(Module::Dashboard));
        assert_eq!(response.message, SYSTEM_STATUS);
    }

    #[test]
    fn test_default_branch_order() {
        let synth = ResponseSynthesizer::new().unwrap();
        let fallback = intent(IntentKind::Respond, "", &[]);

        let response = synth.synthesize(&fallback, "HELP with stats");
        assert_eq!(response.message, HELP_SUMMARY);

        let response = synth.synthesize(&fallback, "numbers");
        assert_eq!(response.module, Some(Module::Dashboard));
        assert_eq!(response.message, BUSINESS_STATS);

        let response = synth.synthesize(&fallback, "");
        assert_eq!(response.action, ResponseAction::Respond);
        assert_eq!(response.message, GENERIC_FALLBACK);
    }

    #[test]
    fn test_json_shape_omits_absent_fields() {
        let json = serde_json::to_value(AiResponse::respond("hi")).unwrap();
        assert_eq!(json, serde_json::json!({"action": "respond", "message": "hi"}));

        let json = serde_json::to_value(AiResponse::open_create_form(Module::Deals)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "action": "open_modal",
                "module": "deals",
                "type": "create",
                "message": "Opening form to create a new deal."
            })
        );
    }
}
