//! Maps an extracted target phrase onto a canonical module.

use super::modules::{lookup, Module};

/// Return the module of the leftmost recognised word in `target`.
///
/// First match, not best match: "ticket lead" resolves to tickets.
pub fn resolve_module(target: &str) -> Option<Module> {
    target.split_whitespace().find_map(lookup)
}
