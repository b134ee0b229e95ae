//! Markdown rendering of a finished run.

use sieve_config::LinkScheme;
use sieve_types::{CharacterCount, GradeBreakdown, KanjiStats};

use crate::resolver::{LayerOutcome, Resolution};

/// Separator between report sections
pub const RULE: &str = "----------------";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionKind {
    Text,
    Statistics,
    Grades,
    Searched,
    /// Named after the layer it describes
    Layer(String),
    Orphans,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub body: String,
}

impl Section {
    fn new(kind: SectionKind, body: String) -> Self {
        Self { kind, body }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub sections: Vec<Section>,
}

impl Report {
    pub fn section(&self, kind: &SectionKind) -> Option<&Section> {
        self.sections.iter().find(|section| &section.kind == kind)
    }

    pub fn to_markdown(&self) -> String {
        let separator = format!("\n\n{RULE}\n\n");
        let mut out = self
            .sections
            .iter()
            .map(|section| section.body.trim_end())
            .collect::<Vec<_>>()
            .join(&separator);
        out.push('\n');
        out
    }
}

/// Everything a sieve report is built from
pub struct ReportInput<'a> {
    pub text: &'a str,
    pub stats: &'a KanjiStats,
    /// `None` when grade classification is switched off
    pub grades: Option<&'a GradeBreakdown>,
    pub searched: &'a [String],
    pub omitted: &'a [String],
    pub resolution: &'a Resolution,
}

#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub link: LinkScheme,
    pub show_orphans: bool,
}

pub fn assemble(input: &ReportInput<'_>, options: ReportOptions) -> Report {
    let mut sections = vec![
        Section::new(SectionKind::Text, input.text.trim_end().to_string()),
        statistics_section(input.text, input.stats),
    ];
    if let Some(grades) = input.grades {
        sections.push(grades_section(grades));
    }
    sections.push(searched_section(input.searched, input.omitted));
    sections.extend(layer_sections(input.resolution, options.link));
    if options.show_orphans {
        sections.push(orphan_section(&input.resolution.orphans, options.link));
    }
    Report { sections }
}

/// Report for a plain word list: layers and orphans only
pub fn assemble_glossary(resolution: &Resolution, options: ReportOptions) -> Report {
    let mut sections: Vec<Section> = layer_sections(resolution, options.link).collect();
    if options.show_orphans {
        sections.push(orphan_section(&resolution.orphans, options.link));
    }
    Report { sections }
}

/// `字(3) 本(2)`
pub fn pretty_counts(counts: &[CharacterCount]) -> String {
    counts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn join_terms<S: AsRef<str>>(terms: &[S]) -> String {
    terms
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}

/// One `[term](url) :` line per orphan, ready for manual lookup
pub fn orphan_links<S: AsRef<str>>(orphans: &[S], link: LinkScheme) -> String {
    orphans
        .iter()
        .map(|term| {
            let term = term.as_ref();
            format!("[{term}]({}) :  \n", link.url_for(term))
        })
        .collect()
}

fn statistics_section(text: &str, stats: &KanjiStats) -> Section {
    let body = format!(
        "__characters in text:__ {}  \n\n__kanji in text:__ {}  \n__discrete kanji in text:__ {}  \n\n{}",
        text.chars().count(),
        stats.kanji_total,
        stats.discrete(),
        pretty_counts(&stats.counts)
    );
    Section::new(SectionKind::Statistics, body)
}

fn grades_section(grades: &GradeBreakdown) -> Section {
    let body = grades
        .iter()
        .enumerate()
        .map(|(i, (bucket, counts))| {
            format!(
                "{}.  __{}:__ {}  \n\n{}",
                i + 1,
                bucket.label(),
                counts.len(),
                pretty_counts(counts)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");
    Section::new(SectionKind::Grades, body)
}

fn searched_section(searched: &[String], omitted: &[String]) -> Section {
    let body = format!(
        "__words or word fragments searched in text:__ {}  \n\n{}  \n\n__omitted from search:__ {}  \n\n{}",
        searched.len(),
        join_terms(searched),
        omitted.len(),
        join_terms(omitted)
    );
    Section::new(SectionKind::Searched, body)
}

fn layer_sections(
    resolution: &Resolution,
    link: LinkScheme,
) -> impl Iterator<Item = Section> + '_ {
    resolution
        .searched_layers()
        .map(move |layer| layer_section(layer, link))
}

fn layer_section(layer: &LayerOutcome, link: LinkScheme) -> Section {
    let entries: String = layer
        .matched
        .iter()
        .map(|m| format!("{}  \n", m.definition.render(link)))
        .collect();
    let body = format!(
        "__{}:__  \n\n{}\n__remaining words:__ {}  \n\n{}",
        layer.title,
        entries,
        layer.remaining.len(),
        join_terms(&layer.remaining)
    );
    Section::new(SectionKind::Layer(layer.name.clone()), body)
}

fn orphan_section(orphans: &[String], link: LinkScheme) -> Section {
    let body = format!(
        "__orphans:__ {}  \n\n{}",
        orphans.len(),
        orphan_links(orphans, link)
    );
    Section::new(SectionKind::Orphans, body)
}
