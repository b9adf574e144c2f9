use std::collections::hash_map::Entry;
use std::collections::HashMap;

use extend::ext;
use tracing::warn;

use super::{Token, TokenId};

#[ext(pub, name = VocabExt)]
impl HashMap<Token, TokenId> {
    /// Builds the id -> token map.
    ///
    /// A well-formed vocabulary never maps two tokens to one id. When a
    /// malformed one does, the lexicographically smallest token is kept so
    /// every load of the same file decodes the same way.
    fn inverted(&self) -> HashMap<TokenId, Token> {
        let mut inverse: HashMap<TokenId, Token> = HashMap::with_capacity(self.len());
        for (token, &id) in self {
            match inverse.entry(id) {
                Entry::Vacant(slot) => {
                    slot.insert(token.clone());
                }
                Entry::Occupied(mut slot) => {
                    let kept: &Token = slot.get();
                    warn!(
                        id,
                        first = %kept,
                        second = %token,
                        "token id is shared by several tokens"
                    );
                    if token < kept {
                        slot.insert(token.clone());
                    }
                }
            }
        }
        inverse
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn vocab(entries: &[(&str, TokenId)]) -> HashMap<Token, TokenId> {
        entries
            .iter()
            .map(|(token, id)| (token.to_string(), *id))
            .collect()
    }

    #[test]
    pub fn inverts_unique_ids() {
        let inverse = vocab(&[("a", 1), ("b", 2)]).inverted();
        assert_eq!(inverse.len(), 2);
        assert_eq!(inverse[&1], "a");
        assert_eq!(inverse[&2], "b");
    }

    #[test]
    pub fn shared_id_keeps_smallest_token() {
        let inverse = vocab(&[("zeta", 7), ("alpha", 7), ("mid", 7)]).inverted();
        assert_eq!(inverse.len(), 1);
        assert_eq!(inverse[&7], "alpha");
    }
}
