//! Readers for the user maintained CSV lists.
//!
//! Lines that are blank, start with `#` or contain `//` are comments. A file
//! that does not exist is an empty list; a file that cannot be read is an
//! empty list plus a warning. Neither stops a run.

use std::io;
use std::path::Path;

use sieve_core::omission::OmitSet;
use sieve_core::substitution::SubstitutionMap;

fn data_lines(text: &str) -> impl Iterator<Item = &str> {
    text.trim_start_matches('\u{feff}')
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.contains("//"))
}

fn first_field(line: &str) -> &str {
    line.split(',').next().unwrap_or_default().trim()
}

/// `term,replacement` rows; `x` as replacement suppresses the term
pub fn parse_substitutions(text: &str) -> SubstitutionMap {
    let pairs = data_lines(text).filter_map(|line| {
        let mut fields = line.split(',');
        match (fields.next(), fields.next()) {
            (Some(term), Some(replacement)) => Some((term, replacement)),
            _ => {
                tracing::debug!(line, "substitution row without replacement");
                None
            }
        }
    });
    SubstitutionMap::from_pairs(pairs)
}

/// One term per row, first field only
pub fn parse_omissions(text: &str) -> OmitSet {
    data_lines(text)
        .map(first_field)
        .filter(|term| !term.is_empty())
        .collect()
}

/// Terms for a glossary run, in file order, duplicates removed
pub fn parse_word_list(text: &str) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    for term in data_lines(text).map(first_field) {
        if !term.is_empty() && !words.iter().any(|w| w == term) {
            words.push(term.to_string());
        }
    }
    words
}

fn read_optional(path: &Path, what: &str) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no {what} file, using an empty list");
            None
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read {what} file, using an empty list");
            None
        }
    }
}

pub fn load_substitutions(path: &Path) -> SubstitutionMap {
    let map = read_optional(path, "substitution")
        .map(|text| parse_substitutions(&text))
        .unwrap_or_default();
    tracing::info!(entries = map.len(), "substitutions loaded");
    map
}

pub fn load_omissions(path: &Path) -> OmitSet {
    let set = read_optional(path, "omission")
        .map(|text| parse_omissions(&text))
        .unwrap_or_default();
    tracing::info!(entries = set.len(), "omissions loaded");
    set
}

/// Unlike the lists above, a missing word list is an error
pub fn load_word_list(path: &Path) -> io::Result<Vec<String>> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_word_list(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sieve_core::substitution::Substitution;

    #[test]
    fn substitution_rows() {
        let text = "\u{feff}// term,replacement\n言っ,言う\n本,x\n\n# note\n猫\n犬, 犬\n";
        let map = parse_substitutions(text);

        assert_eq!(map.len(), 3);
        assert_eq!(map.get("言っ"), &Substitution::Replace("言う".into()));
        assert_eq!(map.get("本"), &Substitution::Suppress);
        assert_eq!(map.get("犬"), &Substitution::Keep);
        assert_eq!(map.get("猫"), &Substitution::Keep);
    }

    #[test]
    fn omission_rows_use_first_field() {
        let set = parse_omissions("する,verb\n居る\n//comment,x\n ,\n");
        assert_eq!(set.len(), 2);
        assert!(set.contains("する"));
        assert!(set.contains("居る"));
    }

    #[test]
    fn word_list_keeps_order() {
        let words = parse_word_list("猫\n犬,dog\n猫\n\n本\n");
        assert_eq!(words, vec!["猫", "犬", "本"]);
    }

    #[test]
    fn missing_files_are_empty_lists() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_substitutions(&dir.path().join("sub.csv")).is_empty());
        assert!(load_omissions(&dir.path().join("omit.csv")).is_empty());
        assert!(load_word_list(&dir.path().join("words.csv")).is_err());
    }

    #[test]
    fn unreadable_file_is_an_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("omit.csv");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        assert!(load_omissions(&path).is_empty());
    }

    #[test]
    fn lists_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("omit.csv");
        std::fs::write(&path, "する\n").unwrap();
        assert!(load_omissions(&path).contains("する"));
    }
}
