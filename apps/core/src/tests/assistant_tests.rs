//! Assistant Tests
//!
//! End-to-end behaviour of the local assistant: message in, reply out.

use crate::assistant::{
    extract_intent, normalize, process_message, resolve_module, AiResponse, IntentKind,
    LocalAssistant, ModalKind, Module, ResponseAction, SearchData,
};

const GENERIC_PREFIX: &str = "I understand you want to work with your business data.";

#[cfg(test)]
mod reply_tests {
    use super::*;

    #[test]
    fn test_show_me_leads_navigates() {
        let response = process_message("show me leads");
        assert_eq!(
            response,
            AiResponse {
                action: ResponseAction::Navigate,
                module: Some(Module::Leads),
                kind: None,
                data: None,
                message: "Navigating to leads module.".to_string(),
            }
        );
    }

    #[test]
    fn test_create_a_new_ticket_opens_form() {
        let response = process_message("create a new ticket");
        assert_eq!(response.action, ResponseAction::OpenModal);
        assert_eq!(response.module, Some(Module::Tickets));
        assert_eq!(response.kind, Some(ModalKind::Create));
        assert_eq!(response.message, "Opening form to create a new ticket.");
    }

    #[test]
    fn test_find_projects_with_budget() {
        let response = process_message("find projects with budget over 10000");
        assert_eq!(response.action, ResponseAction::Navigate);
        assert_eq!(response.module, Some(Module::Projects));

        let search = response.data.expect("search data").search;
        assert!(!search.is_empty());
        // keyword substrings are stripped, leaving the plural tail
        assert_eq!(search, "s with budget over 10000");
        assert_eq!(
            response.message,
            "Searching for \"s with budget over 10000\" in projects."
        );
    }

    #[test]
    fn test_display_with_filter() {
        let response = process_message("Display all deals matching Acme Corp");
        assert_eq!(response.module, Some(Module::Deals));
        assert_eq!(
            response.data,
            Some(SearchData {
                search: "acme corp".to_string()
            })
        );
        assert_eq!(response.message, "Searching for \"acme corp\" in deals.");
    }

    #[test]
    fn test_unknown_phrase_falls_back() {
        let response = process_message("xyzzy plugh");
        assert_eq!(response.action, ResponseAction::Respond);
        assert!(response.module.is_none());
        assert!(response.message.starts_with(GENERIC_PREFIX));
    }

    #[test]
    fn test_empty_message() {
        assert_eq!(normalize(""), "");
        let response = process_message("");
        assert_eq!(response.action, ResponseAction::Respond);
        assert!(response.message.starts_with(GENERIC_PREFIX));
    }

    #[test]
    fn test_help_and_stats() {
        let response = process_message("help");
        assert_eq!(response.action, ResponseAction::Respond);
        assert!(response.message.starts_with("I can help you with:"));

        let response = process_message("numbers please");
        assert_eq!(response.action, ResponseAction::Navigate);
        assert_eq!(response.module, Some(Module::Dashboard));
        assert_eq!(
            response.message,
            "Showing your business statistics and key metrics."
        );
    }

    #[test]
    fn test_status_questions() {
        let response = process_message("How many tickets are there?");
        assert_eq!(response.action, ResponseAction::Navigate);
        assert_eq!(response.module, Some(Module::Tickets));
        assert_eq!(response.message, "Showing tickets status and information.");

        let response = process_message("what is the status of deals");
        assert_eq!(response.module, Some(Module::Deals));
    }

    #[test]
    fn test_navigation_without_module() {
        let response = process_message("go to the moon");
        assert_eq!(response.action, ResponseAction::Respond);
        assert!(response.message.starts_with("I can help you navigate to:"));
    }

    #[test]
    fn test_manual_only_actions() {
        let response = process_message("update lead status");
        assert_eq!(response.action, ResponseAction::Respond);
        assert!(response.message.starts_with("To update records"));

        let response = process_message("delete ticket 42");
        assert_eq!(response.action, ResponseAction::Respond);
        assert!(response.message.starts_with("To delete records"));

        let response = process_message("give the escalation to maria");
        assert_eq!(response.action, ResponseAction::Respond);
        assert!(response.message.starts_with("To assign items"));
    }

    #[test]
    fn test_create_without_module() {
        let response = process_message("make something nice");
        assert_eq!(response.action, ResponseAction::Respond);
        assert!(response.message.starts_with("I can help you create:"));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;

    fn corpus() -> Vec<String> {
        let mut inputs: Vec<String> = vec![
            "show me leads",
            "create a new ticket",
            "find projects with budget over 10000",
            "",
            "   ",
            "!!!",
            "help",
            "Go to the Dashboard page",
            "switch to reports view",
            "I would like to see emails",
            "register a company",
            "close ticket 9",
            "set owner of deal to bob",
            "task owner to alice",
            "Привет, покажи сделки",
            "显示所有客户",
            "\u{0000}\u{001b}[31mred\u{001b}[0m",
            "tab\tseparated\nnew line",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        inputs.push("lead ".repeat(5_000));
        inputs.push("x".repeat(100_000));
        inputs
    }

    #[test]
    fn test_every_reply_is_well_formed() {
        for input in corpus() {
            let response = process_message(&input);
            assert!(!response.message.is_empty(), "empty message for {:?}", input);
            if let Some(kind) = response.kind {
                assert_eq!(kind, ModalKind::Create);
                assert_eq!(response.action, ResponseAction::OpenModal);
            }
            if response.action == ResponseAction::OpenModal {
                assert!(response.module.is_some());
            }
        }
    }

    #[test]
    fn test_replies_are_deterministic() {
        let assistant = LocalAssistant::new();
        for input in corpus() {
            assert_eq!(
                assistant.process_message(&input),
                assistant.process_message(&input)
            );
        }
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in corpus() {
            let once = normalize(&input);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_reply_json_contract() {
        for input in corpus() {
            let json = serde_json::to_value(process_message(&input)).unwrap();
            let action = json["action"].as_str().unwrap();
            assert!(["navigate", "open_modal", "respond"].contains(&action));
            assert!(json["message"].is_string());
            if let Some(module) = json.get("module") {
                let module = module.as_str().unwrap();
                assert!(Module::ALL.iter().any(|m| m.as_str() == module));
            }
            if let Some(data) = json.get("data") {
                assert!(data["search"].is_string());
            }
        }
    }

    #[test]
    fn test_resolver_leftmost_priority() {
        assert_eq!(resolve_module("ticket lead"), Some(Module::Tickets));
        assert_eq!(resolve_module("florp blarg"), None);
    }

    #[test]
    fn test_intent_declaration_order() {
        // navigation is checked before search, so "show me" navigates
        assert_eq!(extract_intent("show me deals").unwrap().action, IntentKind::Navigation);
        // "display" only exists in the search group
        assert_eq!(extract_intent("display deals").unwrap().action, IntentKind::Search);
    }
}
