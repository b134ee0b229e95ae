/// Word segmentation backend.
///
/// Implementations must be deterministic for a given input and return
/// segments in text order.
pub trait Tokenizer {
    /// Backend identifier for logs
    fn name(&self) -> &str;

    /// Break text into ordered segments
    fn tokenize(&self, text: &str) -> Vec<String>;
}

impl<T: Tokenizer + ?Sized> Tokenizer for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        (**self).tokenize(text)
    }
}
