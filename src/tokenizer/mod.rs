mod error;
mod ext;
pub mod vocab;
mod word;

pub use error::*;
pub use ext::*;
pub use vocab::{AddedToken, MergePolicy, ModelSection, TokenizerFile};
pub use word::*;

pub type Token = String;
pub type TokenId = u64;

/// Conversion between text and token ids.
///
/// Neither direction fails: words and ids missing from the vocabulary are
/// dropped from the output.
pub trait Tokenizer: Send + Sync {
    fn encode(&self, string: &str) -> Vec<TokenId>;
    fn decode(&self, tokens: &[TokenId]) -> String;
    fn vocab_size(&self) -> usize;
}
