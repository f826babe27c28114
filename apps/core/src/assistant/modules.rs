//! Canonical application modules and the keyword table that folds
//! user vocabulary onto them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Application section the assistant can navigate to or create records in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Module {
    Leads,
    Tickets,
    Deals,
    Projects,
    Tasks,
    Emails,
    Users,
    Companies,
    Dashboard,
    Reports,
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Module {
    /// Every module, in sidebar order.
    pub const ALL: [Module; 10] = [
        Module::Leads,
        Module::Tickets,
        Module::Deals,
        Module::Projects,
        Module::Tasks,
        Module::Emails,
        Module::Users,
        Module::Companies,
        Module::Dashboard,
        Module::Reports,
    ];

    /// Returns the identifier used by the frontend router
    pub fn as_str(&self) -> &'static str {
        match self {
            Module::Leads => "leads",
            Module::Tickets => "tickets",
            Module::Deals => "deals",
            Module::Projects => "projects",
            Module::Tasks => "tasks",
            Module::Emails => "emails",
            Module::Users => "users",
            Module::Companies => "companies",
            Module::Dashboard => "dashboard",
            Module::Reports => "reports",
        }
    }

    /// Entity name used in "create a new ..." replies.
    ///
    /// Drops the final character of the identifier, so `companies` reads
    /// `companie`; the chat frontend has always shown it that way.
    pub fn entity_name(&self) -> &'static str {
        let id = self.as_str();
        let mut chars = id.char_indices();
        match chars.next_back() {
            Some((idx, _)) => &id[..idx],
            None => id,
        }
    }
}

/// Keyword -> module table, in declaration order.
///
/// Order matters: the search-term stripper builds a leftmost-first
/// alternation from these keys, so `lead` is tried before `leads`.
/// Keys are unique; `analytics` sits with the dashboard words but
/// belongs to reports.
pub const MODULE_KEYWORDS: &[(&str, Module)] = &[
    // CRM
    ("lead", Module::Leads),
    ("leads", Module::Leads),
    ("customer", Module::Leads),
    ("customers", Module::Leads),
    ("prospect", Module::Leads),
    ("prospects", Module::Leads),
    ("contact", Module::Leads),
    ("contacts", Module::Leads),
    ("client", Module::Leads),
    ("clients", Module::Leads),
    // Helpdesk
    ("ticket", Module::Tickets),
    ("tickets", Module::Tickets),
    ("support", Module::Tickets),
    ("issue", Module::Tickets),
    ("issues", Module::Tickets),
    ("bug", Module::Tickets),
    ("bugs", Module::Tickets),
    ("problem", Module::Tickets),
    ("problems", Module::Tickets),
    ("help", Module::Tickets),
    // Sales
    ("deal", Module::Deals),
    ("deals", Module::Deals),
    ("sale", Module::Deals),
    ("sales", Module::Deals),
    ("opportunity", Module::Deals),
    ("opportunities", Module::Deals),
    ("revenue", Module::Deals),
    ("pipeline", Module::Deals),
    // Projects
    ("project", Module::Projects),
    ("projects", Module::Projects),
    ("work", Module::Projects),
    ("job", Module::Projects),
    ("jobs", Module::Projects),
    // Tasks
    ("task", Module::Tasks),
    ("tasks", Module::Tasks),
    ("todo", Module::Tasks),
    ("todos", Module::Tasks),
    ("assignment", Module::Tasks),
    ("assignments", Module::Tasks),
    ("action", Module::Tasks),
    ("actions", Module::Tasks),
    // Email
    ("email", Module::Emails),
    ("emails", Module::Emails),
    ("message", Module::Emails),
    ("messages", Module::Emails),
    ("mail", Module::Emails),
    ("communication", Module::Emails),
    ("correspondence", Module::Emails),
    // Users
    ("user", Module::Users),
    ("users", Module::Users),
    ("employee", Module::Users),
    ("employees", Module::Users),
    ("staff", Module::Users),
    ("team", Module::Users),
    ("member", Module::Users),
    ("members", Module::Users),
    ("person", Module::Users),
    ("people", Module::Users),
    // Companies
    ("company", Module::Companies),
    ("companies", Module::Companies),
    ("business", Module::Companies),
    ("businesses", Module::Companies),
    ("organization", Module::Companies),
    ("organizations", Module::Companies),
    ("firm", Module::Companies),
    ("firms", Module::Companies),
    // Dashboard
    ("dashboard", Module::Dashboard),
    ("home", Module::Dashboard),
    ("overview", Module::Dashboard),
    ("summary", Module::Dashboard),
    ("stats", Module::Dashboard),
    ("statistics", Module::Dashboard),
    ("metrics", Module::Dashboard),
    ("analytics", Module::Reports),
    // Reports
    ("report", Module::Reports),
    ("reports", Module::Reports),
    ("insights", Module::Reports),
    ("data", Module::Reports),
    ("analysis", Module::Reports),
];

static KEYWORD_INDEX: LazyLock<HashMap<&'static str, Module>> =
    LazyLock::new(|| MODULE_KEYWORDS.iter().copied().collect());

/// Look up a single lowercase keyword.
pub fn lookup(keyword: &str) -> Option<Module> {
    KEYWORD_INDEX.get(keyword).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keywords_are_unique_and_lowercase() {
        let mut seen = HashSet::new();
        for (key, _) in MODULE_KEYWORDS {
            assert!(seen.insert(*key), "duplicate keyword '{}'", key);
            assert_eq!(*key, key.to_lowercase());
        }
    }

    #[test]
    fn test_entity_names() {
        assert_eq!(Module::Tickets.entity_name(), "ticket");
        assert_eq!(Module::Leads.entity_name(), "lead");
        assert_eq!(Module::Companies.entity_name(), "companie");
    }

    #[test]
    fn test_lookup_synonyms() {
        assert_eq!(lookup("prospects"), Some(Module::Leads));
        assert_eq!(lookup("pipeline"), Some(Module::Deals));
        assert_eq!(lookup("analytics"), Some(Module::Reports));
        assert_eq!(lookup("help"), Some(Module::Tickets));
        assert_eq!(lookup("Leads"), None);
        assert_eq!(lookup("constructor"), None);
    }

    #[test]
    fn test_serialized_ids_match_as_str() {
        for module in Module::ALL {
            let json = serde_json::to_string(&module).unwrap();
            assert_eq!(json, format!("\"{}\"", module.as_str()));
        }
    }
}
