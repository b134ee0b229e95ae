//! Layered resolution of candidate terms.
//!
//! Terms flow through an ordered chain of lookup sources. Each enabled layer
//! takes the terms still pending, moves the ones it can define into its
//! matched list and hands the rest to the next layer. Whatever is left after
//! the last layer becomes an orphan.

use std::collections::{BTreeSet, HashSet};

use crate::dictionary::{Definition, LookupSource};
use crate::error::{Result, SieveError};

/// One slot of the lookup chain
pub struct Layer<'a> {
    pub name: String,
    pub title: String,
    source: Option<&'a dyn LookupSource>,
}

impl<'a> Layer<'a> {
    pub fn enabled(
        name: impl Into<String>,
        title: impl Into<String>,
        source: &'a dyn LookupSource,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            source: Some(source),
        }
    }

    /// A slot switched off in preferences; its input passes through untouched
    pub fn disabled(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            source: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.source.is_some()
    }
}

/// Which key produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKey {
    Key,
    Reading,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// The candidate as searched
    pub term: String,
    pub definition: Definition,
    pub via: MatchKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerOutcome {
    pub name: String,
    pub title: String,
    pub enabled: bool,
    /// Matches in lookup order
    pub matched: Vec<Match>,
    /// Terms still pending after this layer, sorted
    pub remaining: Vec<String>,
}

/// Working state of a resolution run
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    pending: BTreeSet<String>,
    kana_only: HashSet<String>,
    layers: Vec<LayerOutcome>,
}

impl CandidateSet {
    /// `kana_only` marks which terms may be retried by reading
    pub fn new<I, K>(terms: I, kana_only: K) -> Self
    where
        I: IntoIterator<Item = String>,
        K: IntoIterator<Item = String>,
    {
        Self {
            pending: terms.into_iter().collect(),
            kana_only: kana_only.into_iter().collect(),
            layers: Vec::new(),
        }
    }

    pub fn pending(&self) -> &BTreeSet<String> {
        &self.pending
    }

    pub fn layers(&self) -> &[LayerOutcome] {
        &self.layers
    }

    /// Run one layer over the pending terms
    pub fn advance(self, layer: &Layer<'_>) -> Result<Self> {
        match layer.source {
            Some(source) => self.search(layer, source),
            None => Ok(self.skip(layer)),
        }
    }

    fn skip(mut self, layer: &Layer<'_>) -> Self {
        tracing::info!(layer = %layer.name, "layer disabled, passing terms through");
        self.layers.push(LayerOutcome {
            name: layer.name.clone(),
            title: layer.title.clone(),
            enabled: false,
            matched: Vec::new(),
            remaining: self.pending.iter().cloned().collect(),
        });
        self
    }

    fn search(mut self, layer: &Layer<'_>, source: &dyn LookupSource) -> Result<Self> {
        let unavailable = |e| SieveError::source_unavailable(layer.name.clone(), e);

        let mut matched = Vec::new();
        let mut unresolved = BTreeSet::new();

        for term in std::mem::take(&mut self.pending) {
            match source.lookup_by_key(&term).map_err(unavailable)? {
                Some(definition) => {
                    tracing::debug!(layer = %layer.name, term = %term, "matched by key");
                    matched.push(Match {
                        term,
                        definition,
                        via: MatchKey::Key,
                    });
                }
                None => {
                    unresolved.insert(term);
                }
            }
        }

        // Only kana-only candidates get a second chance by reading
        if source.supports_reading() {
            let (kana, rest): (BTreeSet<String>, BTreeSet<String>) = unresolved
                .into_iter()
                .partition(|term| self.kana_only.contains(term));
            unresolved = rest;

            for term in kana {
                match source.lookup_by_reading(&term).map_err(unavailable)? {
                    Some(definition) => {
                        tracing::debug!(layer = %layer.name, term = %term, "matched by reading");
                        matched.push(Match {
                            term,
                            definition,
                            via: MatchKey::Reading,
                        });
                    }
                    None => {
                        unresolved.insert(term);
                    }
                }
            }
        }

        tracing::info!(
            layer = %layer.name,
            matched = matched.len(),
            remaining = unresolved.len(),
            "layer searched"
        );

        self.layers.push(LayerOutcome {
            name: layer.name.clone(),
            title: layer.title.clone(),
            enabled: true,
            matched,
            remaining: unresolved.iter().cloned().collect(),
        });
        self.pending = unresolved;
        Ok(self)
    }

    /// Everything still pending becomes an orphan
    pub fn finish(self) -> Resolution {
        Resolution {
            layers: self.layers,
            orphans: self.pending.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// One outcome per chain slot, disabled slots included
    pub layers: Vec<LayerOutcome>,
    pub orphans: Vec<String>,
}

impl Resolution {
    /// Layers that were actually consulted
    pub fn searched_layers(&self) -> impl Iterator<Item = &LayerOutcome> {
        self.layers.iter().filter(|layer| layer.enabled)
    }

    /// Every match across layers, in match order
    pub fn matches(&self) -> impl Iterator<Item = &Match> {
        self.layers.iter().flat_map(|layer| layer.matched.iter())
    }

    pub fn matched_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.matched.len()).sum()
    }

    /// Tab separated `headword reading gloss` rows, one per match
    pub fn flashcards(&self) -> String {
        self.matches()
            .map(|m| format!("{}\n", m.definition.flashcard_row()))
            .collect()
    }

    /// Newline separated orphan terms, reusable as a word list
    pub fn orphan_list(&self) -> String {
        self.orphans.join("\n")
    }
}

/// Run `candidates` through every layer of `chain` in order
pub fn resolve(candidates: CandidateSet, chain: &[Layer<'_>]) -> Result<Resolution> {
    let mut state = candidates;
    for layer in chain {
        state = state.advance(layer)?;
    }
    Ok(state.finish())
}
