pub mod demo;
pub mod tokenizer;
