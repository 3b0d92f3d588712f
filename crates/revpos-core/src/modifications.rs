//! # Modification Grammar
//!
//! Parser for the free-text, comma-separated modification list attached to
//! an order line ("no onion, extra cheese, add bacon").
//!
//! ## Grammar
//! ```text
//! list      := token ("," token)*
//! token     := removal | addition | <anything else>
//! removal   := ("no" | "remove" | "without") WS target
//! addition  := ("add" | "extra") WS target
//! target    := ingredient name, matched case-insensitively
//! ```
//!
//! Tokens are trimmed and matched case-insensitively. A token that fits
//! neither form is not an error: it is collected verbatim so the resolver
//! can surface it as a warning while the order still goes through. Kitchen
//! staff type things like "well done" that have no inventory meaning.

// =============================================================================
// Modification
// =============================================================================

/// A single parsed modification token.
///
/// The carried string is the normalized (lowercased, trimmed) target name;
/// the resolver matches it against recipe and catalog names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modification {
    /// Add one unit of the named ingredient on top of the recipe.
    Add(String),
    /// Remove the named ingredient from the recipe entirely.
    Remove(String),
}

impl Modification {
    /// Returns the normalized target ingredient name.
    pub fn target(&self) -> &str {
        match self {
            Modification::Add(name) | Modification::Remove(name) => name,
        }
    }

    /// Checks whether this is a removal.
    pub fn is_removal(&self) -> bool {
        matches!(self, Modification::Remove(_))
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Keywords that start a removal token.
const REMOVAL_KEYWORDS: [&str; 3] = ["no", "remove", "without"];

/// Keywords that start an addition token.
const ADDITION_KEYWORDS: [&str; 2] = ["add", "extra"];

/// The outcome of parsing a raw modification string.
#[derive(Debug, Clone, Default)]
pub struct ParsedModifications {
    /// Recognized tokens, in input order. Order matters: the resolver applies
    /// them left to right against a working ingredient list.
    pub modifications: Vec<Modification>,

    /// Tokens that matched neither grammar form, verbatim as entered.
    pub unrecognized: Vec<String>,
}

impl ParsedModifications {
    /// Checks whether nothing was recognized or collected.
    pub fn is_empty(&self) -> bool {
        self.modifications.is_empty() && self.unrecognized.is_empty()
    }
}

/// Parses a raw comma-separated modification string.
///
/// Never fails: malformed tokens land in `unrecognized` instead of aborting
/// the order.
///
/// ## Example
/// ```
/// use revpos_core::modifications::{parse_modifications, Modification};
///
/// let parsed = parse_modifications("No Onion, extra cheese, well done");
/// assert_eq!(
///     parsed.modifications,
///     vec![
///         Modification::Remove("onion".to_string()),
///         Modification::Add("cheese".to_string()),
///     ]
/// );
/// assert_eq!(parsed.unrecognized, vec!["well done".to_string()]);
/// ```
pub fn parse_modifications(raw: &str) -> ParsedModifications {
    let mut parsed = ParsedModifications::default();

    for token in raw.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        let lowered = token.to_lowercase();
        match split_keyword(&lowered) {
            Some((keyword, target)) if REMOVAL_KEYWORDS.contains(&keyword) => {
                parsed
                    .modifications
                    .push(Modification::Remove(target.to_string()));
            }
            Some((keyword, target)) if ADDITION_KEYWORDS.contains(&keyword) => {
                parsed
                    .modifications
                    .push(Modification::Add(target.to_string()));
            }
            _ => parsed.unrecognized.push(token.to_string()),
        }
    }

    parsed
}

/// Splits a lowered token into (keyword, target), if it has that shape.
fn split_keyword(lowered: &str) -> Option<(&str, &str)> {
    let (keyword, rest) = lowered.split_once(char::is_whitespace)?;
    let target = rest.trim();
    if target.is_empty() {
        return None;
    }
    Some((keyword, target))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_removals() {
        let parsed = parse_modifications("no onion, remove tomato, without pickles");
        assert_eq!(
            parsed.modifications,
            vec![
                Modification::Remove("onion".to_string()),
                Modification::Remove("tomato".to_string()),
                Modification::Remove("pickles".to_string()),
            ]
        );
        assert!(parsed.unrecognized.is_empty());
    }

    #[test]
    fn test_parse_additions() {
        let parsed = parse_modifications("add bacon, extra cheese");
        assert_eq!(
            parsed.modifications,
            vec![
                Modification::Add("bacon".to_string()),
                Modification::Add("cheese".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let parsed = parse_modifications("NO Onion, EXTRA Cheese");
        assert_eq!(
            parsed.modifications,
            vec![
                Modification::Remove("onion".to_string()),
                Modification::Add("cheese".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_collects_unrecognized() {
        let parsed = parse_modifications("well done, no onion, cut in half");
        assert_eq!(
            parsed.modifications,
            vec![Modification::Remove("onion".to_string())]
        );
        assert_eq!(
            parsed.unrecognized,
            vec!["well done".to_string(), "cut in half".to_string()]
        );
    }

    #[test]
    fn test_parse_multiword_target() {
        let parsed = parse_modifications("add beef patty");
        assert_eq!(
            parsed.modifications,
            vec![Modification::Add("beef patty".to_string())]
        );
    }

    #[test]
    fn test_parse_skips_empty_tokens() {
        let parsed = parse_modifications("no onion, , ,, add cheese");
        assert_eq!(parsed.modifications.len(), 2);
        assert!(parsed.unrecognized.is_empty());
    }

    #[test]
    fn test_parse_empty_string() {
        let parsed = parse_modifications("");
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_bare_keyword_is_unrecognized() {
        // "no" with no target names nothing; keep it visible as a warning.
        let parsed = parse_modifications("no, add");
        assert!(parsed.modifications.is_empty());
        assert_eq!(parsed.unrecognized, vec!["no".to_string(), "add".to_string()]);
    }

    #[test]
    fn test_parse_preserves_order() {
        let parsed = parse_modifications("no cheese, add cheese");
        assert_eq!(
            parsed.modifications,
            vec![
                Modification::Remove("cheese".to_string()),
                Modification::Add("cheese".to_string()),
            ]
        );
    }
}
