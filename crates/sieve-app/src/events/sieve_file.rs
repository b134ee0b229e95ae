use std::path::{Path, PathBuf};

use sieve_core::{SieveError, report};

use super::{document, read_input, stem_of, timestamp};
use crate::controller::SieveController;

/// What one sieve run produced.
///
/// The rendered report survives a failed write so it can still be shown.
#[derive(Debug)]
pub struct SieveArtifacts {
    pub markdown: String,
    pub report: Result<PathBuf, SieveError>,
    pub flashcards: Option<Result<PathBuf, SieveError>>,
    pub orphans: Option<Result<PathBuf, SieveError>>,
}

impl SieveArtifacts {
    pub fn written(&self) -> impl Iterator<Item = &PathBuf> {
        std::iter::once(&self.report)
            .chain(self.flashcards.iter())
            .chain(self.orphans.iter())
            .filter_map(|result| result.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &SieveError> {
        std::iter::once(&self.report)
            .chain(self.flashcards.iter())
            .chain(self.orphans.iter())
            .filter_map(|result| result.as_ref().err())
    }
}

pub fn handle_sieve_file(
    file: &Path,
    controller: &SieveController<'_>,
) -> anyhow::Result<SieveArtifacts> {
    let text = read_input(file)?;
    let stem = stem_of(file);
    let prefs = controller.prefs();

    let sources = controller.open_sources()?;
    tracing::info!(enabled = sources.enabled(), "sources opened");
    let outcome = controller.sieve().run(&text, &sources.layers())?;

    let stamp = timestamp();
    let markdown = document(
        &stem,
        &stamp,
        None,
        &outcome.report(controller.report_options()).to_markdown(),
    );
    let report = sieve_io::write_new(
        controller.output_dir(),
        &format!("{stem}_{}_笊.md", prefs.link),
        &markdown,
    );

    let flashcards = prefs.output.emit_flashcards.then(|| {
        sieve_io::write_new(
            Path::new(&prefs.output.flashcard_dir),
            &format!("{stem}_flashcards.tsv"),
            &outcome.flashcards(),
        )
    });

    let orphans = &outcome.resolution.orphans;
    let orphans = (prefs.output.emit_orphans_file && !orphans.is_empty()).then(|| {
        let links = report::orphan_links(orphans, prefs.link);
        sieve_io::append(
            &controller.output_dir().join("orphans.md"),
            &format!("\n\n{stem}  \n{stamp}  \n{links}"),
        )?;
        sieve_io::write_new(
            controller.output_dir(),
            &format!("{stem}_orphans.csv"),
            &format!("{}\n", outcome.orphan_list()),
        )
    });

    let artifacts = SieveArtifacts {
        markdown,
        report,
        flashcards,
        orphans,
    };
    for error in artifacts.failures() {
        tracing::error!(%error, "output not written");
    }
    Ok(artifacts)
}
