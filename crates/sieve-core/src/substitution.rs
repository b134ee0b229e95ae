use std::collections::{BTreeSet, HashMap};

/// What to do with a candidate term before it is searched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Substitution {
    Keep,
    Replace(String),
    /// Drop the term from the search entirely
    Suppress,
}

static KEEP: Substitution = Substitution::Keep;

impl Substitution {
    /// Replacement value that means "suppress" in the user's list
    pub const SUPPRESS_MARKER: &'static str = "x";

    /// Interpret the replacement column of a `term,replacement` row.
    ///
    /// Returns `None` for rows that carry no usable replacement.
    pub fn parse(term: &str, replacement: &str) -> Option<Self> {
        let term = term.trim();
        let replacement = replacement.trim();
        if term.is_empty() || replacement.is_empty() {
            return None;
        }
        Some(if replacement == Self::SUPPRESS_MARKER {
            Substitution::Suppress
        } else if replacement == term {
            Substitution::Keep
        } else {
            Substitution::Replace(replacement.to_string())
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct SubstitutionMap {
    entries: HashMap<String, Substitution>,
}

/// Result of rewriting one candidate set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substituted {
    pub terms: BTreeSet<String>,
    /// Input terms mapped to `Suppress`
    pub suppressed: BTreeSet<String>,
    /// Number of input terms rewritten to another term
    pub replaced: usize,
}

impl SubstitutionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw `(term, replacement)` pairs; later rows win
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut map = Self::new();
        for (term, replacement) in pairs {
            if let Some(sub) = Substitution::parse(term.as_ref(), replacement.as_ref()) {
                map.insert(term.as_ref().trim(), sub);
            }
        }
        map
    }

    pub fn insert(&mut self, term: impl Into<String>, substitution: Substitution) {
        self.entries.insert(term.into(), substitution);
    }

    /// `Keep` for terms the map does not mention
    pub fn get(&self, term: &str) -> &Substitution {
        self.entries.get(term).unwrap_or(&KEEP)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rewrite every term once. Replacements are not chained.
    pub fn apply<I, S>(&self, terms: I) -> Substituted
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out = Substituted::default();
        for term in terms {
            let term = term.into();
            match self.get(&term) {
                Substitution::Keep => {
                    out.terms.insert(term);
                }
                Substitution::Replace(replacement) => {
                    tracing::debug!(from = %term, to = %replacement, "substituted term");
                    out.terms.insert(replacement.clone());
                    out.replaced += 1;
                }
                Substitution::Suppress => {
                    out.suppressed.insert(term);
                }
            }
        }
        out
    }
}
