//! Character classes used by extraction and the fallback tokenizer.

/// CJK unified ideographs, extension A and the compatibility block
pub fn is_kanji(c: char) -> bool {
    matches!(c, '\u{3400}'..='\u{4DB5}' | '\u{4E00}'..='\u{9FCB}' | '\u{F900}'..='\u{FA6A}')
}

/// Printable ASCII, space included
pub fn is_ascii_printable(c: char) -> bool {
    matches!(c, ' '..='~')
}

pub fn is_hiragana(c: char) -> bool {
    matches!(c, '\u{3041}'..='\u{309F}')
}

/// Full width katakana with the prolonged sound mark, phonetic extensions and half width forms
pub fn is_katakana(c: char) -> bool {
    matches!(c, '\u{30A0}'..='\u{30FF}' | '\u{31F0}'..='\u{31FF}' | '\u{FF66}'..='\u{FF9F}')
}

/// Ideographic punctuation block (、。「」 and friends)
pub fn is_cjk_punctuation(c: char) -> bool {
    matches!(c, '\u{3001}'..='\u{303F}')
}

pub fn contains_kanji(s: &str) -> bool {
    s.chars().any(is_kanji)
}

pub fn contains_ascii(s: &str) -> bool {
    s.chars().any(is_ascii_printable)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptClass {
    Kanji,
    Hiragana,
    Katakana,
    Ascii,
    Whitespace,
    Punctuation,
    Other,
}

impl ScriptClass {
    pub fn of(c: char) -> Self {
        // iteration and closing marks read as part of an ideograph run
        if is_kanji(c) || matches!(c, '々' | '〆' | 'ヶ') {
            ScriptClass::Kanji
        } else if is_hiragana(c) {
            ScriptClass::Hiragana
        } else if is_katakana(c) {
            ScriptClass::Katakana
        } else if c.is_whitespace() {
            ScriptClass::Whitespace
        } else if c.is_ascii_alphanumeric() {
            ScriptClass::Ascii
        } else if is_cjk_punctuation(c) || c.is_ascii_punctuation() || is_fullwidth_punctuation(c) {
            ScriptClass::Punctuation
        } else {
            ScriptClass::Other
        }
    }
}

fn is_fullwidth_punctuation(c: char) -> bool {
    matches!(c, '\u{FF01}'..='\u{FF0F}' | '\u{FF1A}'..='\u{FF20}' | '\u{FF3B}'..='\u{FF40}' | '\u{FF5B}'..='\u{FF65}')
}
