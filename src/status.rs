//! Binary "in force" classification of the free-text status column.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::text::fold;

// Negation must be checked before affirmation: the affirmative stems are
// substrings of the negated phrasings ("nao vigente" contains "vigente").
static NEGATIVE: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\bnao\s+vigent\w*\b",
        r"\bnao\s+esta\s+vigent\w*\b",
        r"\bnao\s+esta\s+em\s+vigor\b",
        r"\bnao\s+assinado\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("status negation pattern"))
    .collect()
});

static POSITIVE: Lazy<Vec<Regex>> = Lazy::new(|| {
    [r"\bvigent\w*\b", r"\bem\s+vigor\b", r"\bassinad\w*\b"]
        .iter()
        .map(|p| Regex::new(p).expect("status pattern"))
        .collect()
});

/// True when the status text indicates an agreement currently in force.
/// Total: blank, missing, or unrecognized text is "not in force".
pub fn is_in_force(raw: &str) -> bool {
    if raw.trim().is_empty() {
        return false;
    }
    let s = fold(raw);

    if NEGATIVE.iter().any(|re| re.is_match(&s)) {
        return false;
    }
    POSITIVE.iter().any(|re| re.is_match(&s))
}
