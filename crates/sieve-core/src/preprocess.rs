use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default: keep the text as read, minus a byte order mark
    fn process(&self, text: &str) -> String {
        text.trim_start_matches('\u{feff}').to_string()
    }
}

/// Leaves the text untouched apart from a leading BOM
pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}

/// NFKC folds half-width katakana and full-width ASCII before analysis
pub struct NfkcPreprocessor;

impl Preprocessor for NfkcPreprocessor {
    fn process(&self, text: &str) -> String {
        text.trim_start_matches('\u{feff}').nfkc().collect()
    }
}

pub fn preprocessor(normalize: bool) -> Box<dyn Preprocessor> {
    if normalize {
        Box::new(NfkcPreprocessor)
    } else {
        Box::new(DefaultPreprocessor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nfkc_folds_half_width_katakana() {
        assert_eq!(NfkcPreprocessor.process("ｶﾀｶﾅ"), "カタカナ");
        assert_eq!(DefaultPreprocessor.process("ｶﾀｶﾅ"), "ｶﾀｶﾅ");
    }

    #[test]
    fn bom_is_stripped() {
        assert_eq!(preprocessor(false).process("\u{feff}日本"), "日本");
        assert_eq!(preprocessor(true).process("\u{feff}日本"), "日本");
    }
}
