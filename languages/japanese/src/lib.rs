pub mod extractor;
pub mod furigana;
pub mod grade;
pub mod processor;
pub mod script;
pub mod tokenizer;

pub use extractor::{Candidates, count_kanji, extract};
pub use furigana::strip_furigana;
pub use grade::{classify, grade_of};
pub use processor::{KanjiSieve, SieveOutcome, glossary};
pub use tokenizer::{ScriptRunTokenizer, TokenizerError, VibratoTokenizer};
