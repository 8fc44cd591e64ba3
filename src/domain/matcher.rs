//! Store-name matching across independently sourced datasets.
//!
//! Raw names show up in three shapes:
//!
//! - the canonical name itself (`갤러리아진주`)
//! - a channel prefix with the store in brackets (`29CM(롯데본점)`)
//! - a venue spelling used by an external dataset (`더현대 서울`)
//!
//! Matching is exact on the bracketed segment, exact on the whole name
//! otherwise, then retried against the alias table. Substring containment is
//! an opt-in last resort because short canonical names are substrings of
//! unrelated names.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// How a raw name was matched to a canonical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// The bracketed segment equals the canonical name.
    Bracket,
    /// The raw name equals the canonical name.
    Exact,
    /// Matched through an alias spelling.
    Alias,
    /// Loose substring containment.
    Containment,
}

/// Canonical store name to alternate spellings used by external datasets.
///
/// Injected into the matcher rather than held globally so tests and
/// deployments can supply their own table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasTable(HashMap<String, Vec<String>>);

impl AliasTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Venue spellings seen in the competitor rankings sheet.
    #[must_use]
    pub fn venue_defaults() -> Self {
        let mut table = Self::new();
        table.insert(
            "더현대서울",
            ["더현대서울", "더현대 서울", "현대서울", "더현대"],
        );
        table.insert("더현대울산", ["더현대울산", "더현대 울산", "현대울산"]);
        table.insert("갤러리아광교", ["갤러리아광교", "갤러리아 광교"]);
        table
    }

    /// Add or replace the aliases for a canonical name.
    pub fn insert<I, S>(&mut self, canonical: impl Into<String>, aliases: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0
            .insert(canonical.into(), aliases.into_iter().map(Into::into).collect());
    }

    /// Aliases registered for a canonical name.
    #[must_use]
    pub fn aliases(&self, canonical: &str) -> &[String] {
        self.0.get(canonical).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Canonical name followed by its aliases, without duplicates.
    #[must_use]
    pub fn search_names(&self, canonical: &str) -> Vec<String> {
        let mut names = vec![canonical.to_string()];
        for alias in self.aliases(canonical) {
            if !names.contains(alias) {
                names.push(alias.clone());
            }
        }
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, Vec<String>>> for AliasTable {
    fn from(map: HashMap<String, Vec<String>>) -> Self {
        Self(map)
    }
}

/// Extract the segment inside the first `(...)` pair, trimmed.
#[must_use]
pub fn bracket_segment(raw: &str) -> Option<&str> {
    let open = raw.find('(')?;
    let rest = &raw[open + 1..];
    let close = rest.find(')')?;
    let inner = rest[..close].trim();
    (!inner.is_empty()).then_some(inner)
}

/// Strict match of one raw name against one canonical spelling.
fn direct_match(raw: &str, canonical: &str) -> Option<MatchKind> {
    if raw == canonical {
        return Some(MatchKind::Exact);
    }
    match bracket_segment(raw) {
        Some(inner) if inner == canonical => Some(MatchKind::Bracket),
        _ => None,
    }
}

fn containment_match(raw: &str, canonical: &str) -> bool {
    raw.contains(canonical) || canonical.contains(raw)
}

/// Bracket/exact match, then the same against each alias.
fn strict_classify(raw: &str, canonical: &str, aliases: Option<&AliasTable>) -> Option<MatchKind> {
    let raw = raw.trim();
    let canonical = canonical.trim();
    if raw.is_empty() || canonical.is_empty() {
        return None;
    }

    if let Some(kind) = direct_match(raw, canonical) {
        return Some(kind);
    }

    aliases?
        .aliases(canonical)
        .iter()
        .map(|alias| alias.trim())
        .filter(|alias| !alias.is_empty() && *alias != canonical)
        .find(|alias| direct_match(raw, alias).is_some())
        .map(|_| MatchKind::Alias)
}

/// Whether `raw` names the store `canonical`.
///
/// Exact on the bracketed segment when there is one, exact on the whole name
/// otherwise, then retried against each alias when a table is supplied.
/// Never panics; blank names never match.
#[must_use]
pub fn matches(raw: &str, canonical: &str, aliases: Option<&AliasTable>) -> bool {
    strict_classify(raw, canonical, aliases).is_some()
}

/// Name predicate with an injected alias table.
#[derive(Debug, Clone, Default)]
pub struct NameMatcher {
    aliases: AliasTable,
    containment_fallback: bool,
}

impl NameMatcher {
    #[must_use]
    pub fn new(aliases: AliasTable) -> Self {
        Self {
            aliases,
            containment_fallback: false,
        }
    }

    /// Enable substring containment as a last resort.
    ///
    /// Every containment hit is logged at `warn`.
    #[must_use]
    pub fn with_containment_fallback(mut self, enabled: bool) -> Self {
        self.containment_fallback = enabled;
        self
    }

    #[must_use]
    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    #[must_use]
    pub fn containment_fallback(&self) -> bool {
        self.containment_fallback
    }

    /// Whether `raw` names the store `canonical`.
    #[must_use]
    pub fn matches(&self, raw: &str, canonical: &str) -> bool {
        self.classify(raw, canonical).is_some()
    }

    /// Match without the containment step, regardless of configuration.
    #[must_use]
    pub fn classify_strict(&self, raw: &str, canonical: &str) -> Option<MatchKind> {
        strict_classify(raw, canonical, Some(&self.aliases))
    }

    /// Classify how `raw` matches `canonical`, if at all.
    #[must_use]
    pub fn classify(&self, raw: &str, canonical: &str) -> Option<MatchKind> {
        if let Some(kind) = self.classify_strict(raw, canonical) {
            return Some(kind);
        }
        if !self.containment_fallback {
            return None;
        }

        let raw = raw.trim();
        let canonical = canonical.trim();
        if raw.is_empty() || canonical.is_empty() {
            return None;
        }
        if containment_match(raw, canonical) {
            warn!(raw, canonical, "store name matched by containment fallback");
            return Some(MatchKind::Containment);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracket_segment_must_equal_canonical() {
        assert!(matches("29CM(롯데본점)", "롯데본점", None));
        assert!(!matches("29CM(신세계강남)", "롯데본점", None));
    }

    #[test]
    fn bracket_excludes_whole_name_equality() {
        // A bracketed raw name is judged only by its bracket.
        assert!(!matches("롯데본점(팝업)", "롯데본점", None));
    }

    #[test]
    fn plain_names_require_equality() {
        assert!(matches("갤러리아진주", "갤러리아진주", None));
        assert!(matches("  갤러리아진주 ", "갤러리아진주", None));
        assert!(!matches("갤러리아진주점", "갤러리아진주", None));
    }

    #[test]
    fn blank_names_never_match() {
        assert!(!matches("", "롯데본점", None));
        assert!(!matches("롯데본점", "", None));
        assert!(!matches("()", "", None));
    }

    #[test]
    fn unclosed_bracket_is_plain_name() {
        assert_eq!(bracket_segment("29CM(롯데본점"), None);
        assert!(matches("29CM(롯데본점", "29CM(롯데본점", None));
    }

    #[test]
    fn alias_table_retries_each_spelling() {
        let aliases = AliasTable::venue_defaults();
        assert!(matches("더현대 서울", "더현대서울", Some(&aliases)));
        assert!(matches("무신사(현대서울)", "더현대서울", Some(&aliases)));
        assert!(!matches("더현대 서울", "더현대서울", None));
        assert!(!matches("더현대 대구", "더현대서울", Some(&aliases)));
    }

    #[test]
    fn classify_reports_kind() {
        let matcher = NameMatcher::new(AliasTable::venue_defaults());
        assert_eq!(
            matcher.classify("29CM(롯데본점)", "롯데본점"),
            Some(MatchKind::Bracket)
        );
        assert_eq!(matcher.classify("롯데본점", "롯데본점"), Some(MatchKind::Exact));
        assert_eq!(
            matcher.classify("현대서울", "더현대서울"),
            Some(MatchKind::Alias)
        );
        assert_eq!(matcher.classify("롯데본점점", "롯데본점"), None);
    }

    #[test]
    fn containment_is_opt_in() {
        let strict = NameMatcher::default();
        assert!(!strict.matches("롯데본점 아울렛", "롯데본점"));

        let loose = NameMatcher::default().with_containment_fallback(true);
        assert_eq!(
            loose.classify("롯데본점 아울렛", "롯데본점"),
            Some(MatchKind::Containment)
        );
        assert_eq!(
            loose.classify("롯데", "롯데본점"),
            Some(MatchKind::Containment)
        );
        assert_eq!(loose.classify("신세계강남", "롯데본점"), None);
    }

    #[test]
    fn strict_ranks_ahead_of_containment() {
        let loose = NameMatcher::default().with_containment_fallback(true);
        assert_eq!(
            loose.classify("29CM(롯데본점)", "롯데본점"),
            Some(MatchKind::Bracket)
        );
    }

    #[test]
    fn search_names_start_with_canonical() {
        let aliases = AliasTable::venue_defaults();
        let names = aliases.search_names("더현대울산");
        assert_eq!(names[0], "더현대울산");
        assert_eq!(names.len(), 3);
        assert_eq!(aliases.search_names("롯데본점"), vec!["롯데본점".to_string()]);
    }
}
