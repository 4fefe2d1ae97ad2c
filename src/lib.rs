//! # lexitok
//!
//! An interactive lexical tokenizer. Text is split into lexemes, each lexeme
//! is classified into a token category using a persistent dictionary, and
//! lexemes the dictionary does not know are resolved by a human (or a
//! fallback rule) and learned for subsequent documents.
//!
//! The library lives under [`lexicon`]; the `lexitok` binary is a thin shell
//! over [`lexicon::session::Session`].

pub mod lexicon;
