//! Formatting heuristics that are conventions of the documented library, not
//! of the formatter itself, lifted into configuration.

use serde::{Deserialize, Serialize};

/// Tunable conventions used by the property formatter and type renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormatPolicy {
    /// Prop names that always get a detailed (expanded) type view.
    pub detail_prop_names: Vec<String>,
    /// Name prefixes (followed by an uppercase letter) that always get detail,
    /// e.g. `on` for event handlers and `get` for accessors.
    pub detail_name_prefixes: Vec<String>,
    /// Name suffixes that always get detail, e.g. `Ref`.
    pub detail_name_suffixes: Vec<String>,
    /// Unions with at least this many members get detail.
    pub detail_union_members: usize,
    /// Rendered types at least this long get detail.
    pub detail_type_length: usize,
    /// Rendered types at least this long get a short-type table label.
    pub short_type_width: usize,
    /// Print-width hint passed to the code pretty-printer.
    pub print_width: usize,
    /// Name prefix that marks an export as a hook.
    pub hook_prefix: String,
    /// Namespace whose members are never remapped through the canonical
    /// name map.
    pub framework_namespace: String,
}

impl Default for FormatPolicy {
    fn default() -> Self {
        Self {
            detail_prop_names: vec!["className".to_string(), "render".to_string()],
            detail_name_prefixes: vec!["on".to_string(), "get".to_string()],
            detail_name_suffixes: vec!["Ref".to_string()],
            detail_union_members: 3,
            detail_type_length: 30,
            short_type_width: 40,
            print_width: 80,
            hook_prefix: "use".to_string(),
            framework_namespace: "React".to_string(),
        }
    }
}

impl FormatPolicy {
    /// Whether the field name alone warrants a detailed type view.
    pub fn wants_detail_for_name(&self, name: &str) -> bool {
        if self.detail_prop_names.iter().any(|n| n == name) {
            return true;
        }
        if self.detail_name_suffixes.iter().any(|s| name.ends_with(s.as_str())) {
            return true;
        }
        self.detail_name_prefixes.iter().any(|prefix| {
            name.strip_prefix(prefix.as_str())
                .and_then(|rest| rest.chars().next())
                .is_some_and(|c| c.is_uppercase())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_handler_prefixes_need_uppercase_follow() {
        let policy = FormatPolicy::default();
        assert!(policy.wants_detail_for_name("onOpenChange"));
        assert!(policy.wants_detail_for_name("getItems"));
        assert!(!policy.wants_detail_for_name("onset"));
        assert!(!policy.wants_detail_for_name("once"));
    }

    #[test]
    fn listed_names_and_suffixes_match() {
        let policy = FormatPolicy::default();
        assert!(policy.wants_detail_for_name("className"));
        assert!(policy.wants_detail_for_name("render"));
        assert!(policy.wants_detail_for_name("scrollRef"));
        assert!(!policy.wants_detail_for_name("disabled"));
    }
}
