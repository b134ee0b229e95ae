//! Removes furigana lines from OCR output.
//!
//! OCR of vertical or ruby text tends to emit the readings as short lines of
//! their own. A line is kept when it has an ideograph, ideographic
//! punctuation, or is close to the typical line width; everything else is
//! treated as furigana. Kept lines much shorter than the typical width end a
//! paragraph, the rest are joined to the next line.

use std::collections::HashMap;

use sieve_core::InputError;

use crate::script::{is_cjk_punctuation, is_kanji};

/// Lines at least this much shorter than typical end a paragraph
const PARAGRAPH_MARGIN: isize = 4;
/// Lines within this margin of typical are text even without kanji
const TEXT_MARGIN: isize = 2;

fn width(line: &str) -> usize {
    line.replace(' ', "").trim().chars().count()
}

/// Most common width among the longest fifth of the lines
pub fn typical_width(text: &str) -> usize {
    let mut widths: Vec<usize> = text.lines().map(width).collect();
    widths.sort_unstable();
    let top = &widths[widths.len() * 4 / 5..];

    let mut frequency: HashMap<usize, usize> = HashMap::new();
    for w in top {
        *frequency.entry(*w).or_default() += 1;
    }
    // ties resolve to the narrower width
    frequency
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
        .map(|(w, _)| w)
        .unwrap_or_default()
}

fn is_text_line(line: &str, typical: isize) -> bool {
    line.chars().any(|c| is_kanji(c) || is_cjk_punctuation(c))
        || width(line) as isize >= typical - TEXT_MARGIN
}

pub fn strip_furigana(text: &str) -> Result<String, InputError> {
    if text.trim().is_empty() {
        return Err(InputError::Empty);
    }
    let typical = typical_width(text) as isize;
    tracing::debug!(typical, "typical line width");

    let mut out = String::with_capacity(text.len());
    let mut dropped = 0usize;
    for line in text.split_inclusive('\n') {
        if !is_text_line(line, typical) {
            dropped += 1;
            continue;
        }
        if typical - PARAGRAPH_MARGIN >= line.trim().chars().count() as isize {
            out.push_str(line);
        } else {
            out.push_str(line.trim());
        }
    }
    tracing::info!(dropped, "furigana lines removed");
    Ok(out)
}
