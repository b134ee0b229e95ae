use std::path::Path;

use sieve_config::{Preferences, SourceKind};
use sieve_core::SieveError;
use sieve_core::dictionary::LookupSource;
use sieve_core::language::Tokenizer;
use sieve_core::report::ReportOptions;
use sieve_core::resolver::Layer;
use sieve_lang_japanese::{KanjiSieve, ScriptRunTokenizer, VibratoTokenizer};

/// Sources opened for one run, in chain order
pub struct OpenSources {
    slots: Vec<(SourceKind, Option<Box<dyn LookupSource>>)>,
}

impl OpenSources {
    /// Resolution chain borrowing the opened sources
    pub fn layers(&self) -> Vec<Layer<'_>> {
        self.slots
            .iter()
            .map(|(kind, source)| match source {
                Some(source) => Layer::enabled(kind.as_str(), kind.title(), source.as_ref()),
                None => Layer::disabled(kind.as_str(), kind.title()),
            })
            .collect()
    }

    pub fn enabled(&self) -> usize {
        self.slots.iter().filter(|(_, s)| s.is_some()).count()
    }
}

/// Builds the pipeline pieces for one run from a preferences value
pub struct SieveController<'p> {
    prefs: &'p Preferences,
}

impl<'p> SieveController<'p> {
    pub fn new(prefs: &'p Preferences) -> Self {
        Self { prefs }
    }

    pub fn prefs(&self) -> &Preferences {
        self.prefs
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            link: self.prefs.link,
            show_orphans: self.prefs.output.show_orphans,
        }
    }

    /// Vibrato when a dictionary is configured and loads, the script-run segmenter otherwise
    pub fn tokenizer(&self) -> Box<dyn Tokenizer> {
        let Some(dictionary) = &self.prefs.tokenizer.dictionary else {
            tracing::debug!("no tokenizer dictionary configured, using script runs");
            return Box::new(ScriptRunTokenizer::new());
        };
        match VibratoTokenizer::from_path(&self.prefs.data_path(dictionary)) {
            Ok(tokenizer) => Box::new(tokenizer),
            Err(e) => {
                tracing::warn!(error = %e, "falling back to script-run tokenizer");
                Box::new(ScriptRunTokenizer::new())
            }
        }
    }

    /// Open every enabled source. Any enabled source that fails to open aborts the run.
    pub fn open_sources(&self) -> sieve_core::Result<OpenSources> {
        let mut slots = Vec::new();
        for (kind, config) in self.prefs.sources.chain() {
            if !config.enabled {
                tracing::debug!(source = %kind, "source disabled");
                slots.push((kind, None));
                continue;
            }
            let path = self.prefs.source_path(kind);
            let source = sieve_dictionary::open_source(kind, &path)
                .map_err(|e| SieveError::source_unavailable(kind.as_str(), e))?;
            slots.push((kind, Some(source)));
        }
        Ok(OpenSources { slots })
    }

    /// Sieve configured with the user lists and toggles
    pub fn sieve(&self) -> KanjiSieve {
        let substitutions = sieve_io::load_substitutions(&self.prefs.data_path(&self.prefs.substitutions));
        let omissions = sieve_io::load_omissions(&self.prefs.data_path(&self.prefs.omissions));

        KanjiSieve::new(self.tokenizer())
            .with_substitutions(substitutions)
            .with_omissions(omissions)
            .with_grades(self.prefs.output.classify_by_grade)
            .with_normalization(self.prefs.tokenizer.normalize)
    }

    pub fn output_dir(&self) -> &Path {
        Path::new(&self.prefs.output.output_dir)
    }
}
