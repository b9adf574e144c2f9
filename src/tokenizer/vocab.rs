//! `tokenizer.json` schema and vocabulary assembly.
//!
//! The document carries a base vocabulary under `model.vocab` and a list of
//! `added_tokens` (special tokens such as `<|begin_of_text|>`). How the two are
//! combined is decided by [`MergePolicy`].

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{LoadError, Token, TokenId};

/// How `added_tokens` and the base `model.vocab` are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergePolicy {
    /// Base vocabulary plus added tokens; an added token's id wins when its
    /// content is also a base entry.
    #[default]
    OverrideBase,
    /// Added tokens only. `model` is not consulted and may be absent.
    AddedOnly,
}

#[derive(new, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedToken {
    pub id: TokenId,
    pub content: String,
    #[new(default)]
    #[serde(default)]
    pub single_word: bool,
    #[new(default)]
    #[serde(default)]
    pub lstrip: bool,
    #[new(default)]
    #[serde(default)]
    pub rstrip: bool,
    #[new(default)]
    #[serde(default)]
    pub normalized: bool,
    #[new(default)]
    #[serde(default)]
    pub special: bool,
}

#[derive(new, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSection {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub vocab: HashMap<Token, TokenId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenizerFile {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub truncation: Option<serde_json::Value>,
    #[serde(default)]
    pub padding: Option<serde_json::Value>,
    #[serde(default)]
    pub added_tokens: Vec<AddedToken>,
    #[serde(default)]
    pub model: Option<ModelSection>,
}

impl TokenizerFile {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, LoadError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| LoadError::from(e).with_path(path))?;
        debug!(path = %path.display(), "reading tokenizer file");

        Self::from_reader(BufReader::new(file)).map_err(|e| e.with_path(path))
    }

    /// Tokens flagged `special` in `added_tokens`, in file order.
    pub fn special_tokens(&self) -> impl Iterator<Item = &AddedToken> {
        self.added_tokens.iter().filter(|t| t.special)
    }

    /// Assembles the token -> id map.
    pub fn vocabulary(&self, policy: MergePolicy) -> Result<HashMap<Token, TokenId>, LoadError> {
        let mut token_to_id: HashMap<Token, TokenId> = self
            .added_tokens
            .iter()
            .map(|token| (token.content.clone(), token.id))
            .collect();

        if policy == MergePolicy::AddedOnly {
            return Ok(token_to_id);
        }

        let model = self
            .model
            .as_ref()
            .ok_or_else(|| LoadError::schema_mismatch("missing field `model`"))?;

        let mut overridden = 0usize;
        for (token, &id) in &model.vocab {
            match token_to_id.get(token) {
                Some(&added) if added != id => overridden += 1,
                Some(_) => {}
                None => {
                    token_to_id.insert(token.clone(), id);
                }
            }
        }
        if overridden > 0 {
            debug!(overridden, "added tokens override base vocabulary ids");
        }

        Ok(token_to_id)
    }
}

impl FromStr for TokenizerFile {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(serde_json::from_str(s)?)
    }
}
