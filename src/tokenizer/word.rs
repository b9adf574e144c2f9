use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info, warn};

use super::{LoadError, MergePolicy, Token, TokenId, Tokenizer, TokenizerFile, VocabExt};

pub const TOKENIZER_FILE_NAME: &str = "tokenizer.json";

/// Ids produced by [`WordTokenizer::encode_with_misses`] together with the
/// words that had no vocabulary entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Encoding {
    pub ids: Vec<TokenId>,
    pub misses: Vec<String>,
}

/// Word-level tokenizer over a fixed vocabulary.
///
/// Text is split on whitespace and every word is looked up as a whole; there is
/// no subword segmentation. Words and ids outside the vocabulary are dropped
/// rather than mapped to a placeholder, so `encode` may return fewer ids than
/// the input has words.
#[derive(Debug, Clone, Default)]
pub struct WordTokenizer {
    token_to_id: HashMap<Token, TokenId>,
    id_to_token: HashMap<TokenId, Token>,
}

impl WordTokenizer {
    pub fn new(token_to_id: HashMap<Token, TokenId>) -> Self {
        let id_to_token = token_to_id.inverted();
        Self {
            token_to_id,
            id_to_token,
        }
    }

    pub fn from_tokenizer_file(
        file: &TokenizerFile,
        policy: MergePolicy,
    ) -> Result<Self, LoadError> {
        let tokenizer = Self::new(file.vocabulary(policy)?);
        info!(
            vocab_size = tokenizer.vocab_size(),
            added_tokens = file.added_tokens.len(),
            ?policy,
            "tokenizer loaded"
        );
        Ok(tokenizer)
    }

    pub fn from_bytes(bytes: &[u8], policy: MergePolicy) -> Result<Self, LoadError> {
        Self::from_tokenizer_file(&TokenizerFile::from_slice(bytes)?, policy)
    }

    pub fn from_file(path: impl AsRef<Path>, policy: MergePolicy) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = TokenizerFile::from_file(path)?;
        Self::from_tokenizer_file(&file, policy).map_err(|e| e.with_path(path))
    }

    /// Loads `tokenizer.json` from `dir`.
    pub fn from_dir(dir: impl AsRef<Path>, policy: MergePolicy) -> Result<Self, LoadError> {
        let path = dir.as_ref().join(TOKENIZER_FILE_NAME);
        if !path.is_file() {
            return Err(LoadError::missing_resource(path));
        }
        Self::from_file(path, policy)
    }

    pub fn encode_with_misses(&self, text: &str) -> Encoding {
        let mut encoding = Encoding::default();
        for word in text.split_whitespace() {
            match self.token_to_id.get(word) {
                Some(&id) => encoding.ids.push(id),
                None => {
                    warn!(word, "token not found in vocabulary");
                    encoding.misses.push(word.to_string());
                }
            }
        }
        encoding
    }

    pub fn token_to_id(&self, token: &str) -> Option<TokenId> {
        self.token_to_id.get(token).copied()
    }

    pub fn id_to_token(&self, id: TokenId) -> Option<&str> {
        self.id_to_token.get(&id).map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.token_to_id.contains_key(token)
    }
}

impl Tokenizer for WordTokenizer {
    fn encode(&self, string: &str) -> Vec<TokenId> {
        self.encode_with_misses(string).ids
    }

    fn decode(&self, tokens: &[TokenId]) -> String {
        let mut words = Vec::with_capacity(tokens.len());
        for id in tokens {
            match self.id_to_token.get(id) {
                Some(token) => words.push(token.as_str()),
                None => debug!(id, "token id not found in vocabulary"),
            }
        }
        words.join(" ")
    }

    fn vocab_size(&self) -> usize {
        self.token_to_id.len()
    }
}
