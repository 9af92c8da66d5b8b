//! Tokenizer, post-processor contract, and LALR driver: the runtime half
//! of a compiled grammar, sitting between the grammar database and a
//! consuming application's parse loop.

pub mod driver;
pub mod parser;
pub mod post_processor;
pub mod tokenizer;

pub use parser::Parser;
pub use post_processor::{AstNode, AstPostProcessor, ObjectStore, PostProcessor, SyntaxCheckPostProcessor};
pub use tokenizer::Tokenizer;
