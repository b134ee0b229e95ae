use std::collections::{BTreeSet, HashSet};

/// Terms the user never wants searched
#[derive(Debug, Clone, Default)]
pub struct OmitSet {
    terms: HashSet<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Omitted {
    /// Candidates that go on to the resolver
    pub remaining: BTreeSet<String>,
    /// Candidates found in the omit set
    pub omitted: BTreeSet<String>,
}

impl OmitSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, term: impl Into<String>) {
        self.terms.insert(term.into());
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Split candidates into `candidates - omit` and `candidates ∩ omit`
    pub fn partition(&self, candidates: BTreeSet<String>) -> Omitted {
        let (omitted, remaining) = candidates
            .into_iter()
            .partition(|term| self.terms.contains(term));
        Omitted { remaining, omitted }
    }
}

impl<S: Into<String>> FromIterator<S> for OmitSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().map(Into::into).collect(),
        }
    }
}
