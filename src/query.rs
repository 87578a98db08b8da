//! Lossy reduction of JQL and CQL into the flat filters a custom backend
//! can understand.
//!
//! This is pattern matching, not parsing. Boolean structure is discarded,
//! and any clause that does not match a recognized shape is dropped without
//! notice. Callers must treat the output as a hint.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

pub type Filters = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryDialect {
    Jql,
    Cql,
}

const JQL_FIELDS: [&str; 3] = ["project", "status", "assignee"];

static JQL_CLAUSES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    JQL_FIELDS
        .iter()
        .map(|field| {
            let pattern = format!(
                r#"(?i)\b{field}\s*=\s*(?:"([^"]*)"|'([^']*)'|([A-Za-z_]\w*\(\))|([^\s()"']+))"#
            );
            let regex = Regex::new(&pattern).unwrap_or_else(|e| panic!("invalid JQL pattern: {e}"));
            (*field, regex)
        })
        .collect()
});

static CQL_LOGICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:and|or|not)\b").unwrap_or_else(|e| panic!("{e}")));

static CQL_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(?:space|type|title|text)\s*[=~]\s*(?:"([^"]*)"|'([^']*)'|(\S+))"#)
        .unwrap_or_else(|e| panic!("{e}"))
});

/// Extract `project`, `status` and `assignee` equality clauses from JQL.
///
/// Only the first occurrence of each field is kept. `currentUser()` is
/// rewritten to `me`.
pub fn degrade_jql(jql: &str) -> Filters {
    let mut filters = Filters::new();

    for (field, regex) in JQL_CLAUSES.iter() {
        let Some(captures) = regex.captures(jql) else {
            continue;
        };
        let Some(value) = (1..=4).find_map(|group| captures.get(group)) else {
            continue;
        };
        let value = value.as_str().trim();
        if value.is_empty() {
            continue;
        }

        let value = if value.eq_ignore_ascii_case("currentUser()") {
            "me"
        } else {
            value
        };
        filters.insert((*field).to_string(), value.to_string());
    }

    filters
}

/// Reduce CQL to whitespace separated search terms of three or more
/// characters.
pub fn degrade_cql(cql: &str) -> String {
    let without_logic = CQL_LOGICAL.replace_all(cql, " ");
    let without_fields = CQL_CLAUSE.replace_all(&without_logic, |captures: &regex::Captures| {
        (1..=3)
            .find_map(|group| captures.get(group))
            .map(|value| format!(" {} ", value.as_str()))
            .unwrap_or_default()
    });

    without_fields
        .split_whitespace()
        .filter(|term| term.chars().count() > 2)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Degrade a query of either dialect into key/value filters. CQL terms are
/// returned under `q`.
pub fn degrade(query: &str, dialect: QueryDialect) -> Filters {
    match dialect {
        QueryDialect::Jql => degrade_jql(query),
        QueryDialect::Cql => {
            let terms = degrade_cql(query);
            let mut filters = Filters::new();
            if !terms.is_empty() {
                filters.insert("q".to_string(), terms);
            }
            filters
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filters(pairs: &[(&str, &str)]) -> Filters {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn jql_extracts_project_and_quoted_status() {
        let result = degrade_jql(r#"project = DEMO AND status = "Open""#);

        assert_eq!(result, filters(&[("project", "DEMO"), ("status", "Open")]));
    }

    #[test]
    fn jql_rewrites_current_user() {
        assert_eq!(
            degrade_jql("assignee = currentUser()"),
            filters(&[("assignee", "me")])
        );
        assert_eq!(
            degrade_jql("ASSIGNEE=CURRENTUSER()"),
            filters(&[("assignee", "me")])
        );
    }

    #[test]
    fn jql_fields_are_case_insensitive_and_accept_single_quotes() {
        let result = degrade_jql("Project='WEB' and Status = 'In Progress'");

        assert_eq!(
            result,
            filters(&[("project", "WEB"), ("status", "In Progress")])
        );
    }

    #[test]
    fn jql_drops_unrecognized_clauses() {
        let result = degrade_jql(
            "priority = High AND status in (Open, Done) OR NOT labels = ui ORDER BY created DESC",
        );

        assert!(result.is_empty());
    }

    #[test]
    fn jql_ignores_similar_field_names() {
        let result = degrade_jql("statusCategory = Done AND subproject = X AND project != Y");

        assert!(result.is_empty());
    }

    #[test]
    fn jql_value_stops_at_parenthesis() {
        let result = degrade_jql("(project = OPS) AND assignee = alice");

        assert_eq!(
            result,
            filters(&[("assignee", "alice"), ("project", "OPS")])
        );
    }

    #[test]
    fn cql_reduces_clauses_to_terms() {
        let result = degrade_cql(r#"space = DEV AND type = page AND title = "Release notes""#);

        assert_eq!(result, "DEV page Release notes");
    }

    #[test]
    fn cql_drops_short_tokens_and_logic() {
        let result = degrade_cql(r#"text ~ "go to deploy" OR NOT title = ab"#);

        assert_eq!(result, "deploy");
    }

    #[test]
    fn cql_free_text_passes_through() {
        assert_eq!(degrade_cql("kubernetes upgrade guide"), "kubernetes upgrade guide");
    }

    #[test]
    fn degrade_cql_dialect_wraps_terms() {
        assert_eq!(
            degrade("title = Onboarding", QueryDialect::Cql),
            filters(&[("q", "Onboarding")])
        );
        assert!(degrade("a or b", QueryDialect::Cql).is_empty());
    }

    #[test]
    fn degrade_jql_dialect_matches_degrade_jql() {
        let jql = "project = DEMO";

        assert_eq!(degrade(jql, QueryDialect::Jql), degrade_jql(jql));
    }
}
