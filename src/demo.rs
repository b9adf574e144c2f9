use derive_new::new;

use crate::tokenizer::{TokenId, Tokenizer, WordTokenizer};

pub const DEFAULT_PROMPT: &str = "<|begin_of_text|> Hello world <|end_of_text|>";

/// Result of pushing a prompt through encode and then decode.
#[derive(new, Debug, Clone, PartialEq, Eq)]
pub struct RoundTrip {
    pub prompt: String,
    pub ids: Vec<TokenId>,
    pub decoded: String,
    pub misses: Vec<String>,
}

impl RoundTrip {
    /// Whether every word of the prompt survived the round trip.
    pub fn is_lossless(&self) -> bool {
        self.misses.is_empty()
    }
}

pub fn round_trip(tokenizer: &WordTokenizer, prompt: &str) -> RoundTrip {
    let encoding = tokenizer.encode_with_misses(prompt);
    let decoded = tokenizer.decode(&encoding.ids);

    RoundTrip::new(prompt.to_string(), encoding.ids, decoded, encoding.misses)
}

pub fn print_round_trip(round_trip: &RoundTrip) {
    println!("prompt  = {:?}", round_trip.prompt);
    println!("ids     = {:?}", round_trip.ids);
    println!("decoded = {:?}", round_trip.decoded);
    if !round_trip.is_lossless() {
        println!("missing = {:?}", round_trip.misses);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    fn special_and_words() -> WordTokenizer {
        WordTokenizer::new(HashMap::from([
            ("<|begin_of_text|>".to_string(), 128000),
            ("<|end_of_text|>".to_string(), 128001),
            ("Hello".to_string(), 9906),
            ("world".to_string(), 1917),
        ]))
    }

    #[test]
    pub fn default_prompt_is_lossless() {
        let result = round_trip(&special_and_words(), DEFAULT_PROMPT);
        assert_eq!(result.ids, vec![128000, 9906, 1917, 128001]);
        assert_eq!(result.decoded, DEFAULT_PROMPT);
        assert!(result.is_lossless());
    }

    #[test]
    pub fn misses_are_reported() {
        let result = round_trip(&special_and_words(), "Hello there world");
        assert_eq!(result.decoded, "Hello world");
        assert_eq!(result.misses, vec!["there"]);
        assert!(!result.is_lossless());
    }
}
