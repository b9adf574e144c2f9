//! Property tests for `WordTokenizer` over generated vocabularies.

use std::collections::HashMap;

use proptest::prelude::*;
use vocab_tokenizer::tokenizer::{Token, TokenId, Tokenizer, WordTokenizer};

fn vocabulary() -> impl Strategy<Value = HashMap<Token, TokenId>> {
    prop::collection::hash_map("[a-zA-Z0-9<|>_.,!?]{1,12}", 0u64..500, 0..40)
}

proptest! {
    /// Every whitespace-free member decodes back to itself.
    #[test]
    fn member_round_trips(vocab in vocabulary()) {
        let tokenizer = WordTokenizer::new(vocab.clone());
        for (token, id) in &vocab {
            let ids = tokenizer.encode(token);
            prop_assert_eq!(&ids, &vec![*id]);
            // a shared id decodes to whichever token the inverse kept
            let decoded = tokenizer.decode(&ids);
            prop_assert_eq!(tokenizer.token_to_id(&decoded), Some(*id));
        }
    }

    /// The inverse map only holds pairs present in the forward map.
    #[test]
    fn inverse_is_consistent(vocab in vocabulary()) {
        let tokenizer = WordTokenizer::new(vocab.clone());
        for &id in vocab.values() {
            let token = tokenizer.id_to_token(id);
            prop_assert!(token.is_some());
            prop_assert_eq!(tokenizer.token_to_id(token.unwrap()), Some(id));
        }
    }

    /// Encoding never yields more ids than there are words, and misses
    /// account for the difference.
    #[test]
    fn encode_drops_only_misses(
        vocab in vocabulary(),
        words in prop::collection::vec("[a-z]{1,4}", 0..20),
    ) {
        let tokenizer = WordTokenizer::new(vocab);
        let text = words.join(" ");
        let encoding = tokenizer.encode_with_misses(&text);
        prop_assert_eq!(encoding.ids.len() + encoding.misses.len(), words.len());
        for miss in &encoding.misses {
            prop_assert!(!tokenizer.contains(miss));
        }
    }

    /// Decoded text never has leading, trailing or doubled spaces.
    #[test]
    fn decode_is_single_spaced(
        vocab in vocabulary(),
        ids in prop::collection::vec(0u64..600, 0..30),
    ) {
        let tokenizer = WordTokenizer::new(vocab);
        let text = tokenizer.decode(&ids);
        prop_assert!(!text.starts_with(' '));
        prop_assert!(!text.ends_with(' '));
        prop_assert!(!text.contains("  "));
    }
}
