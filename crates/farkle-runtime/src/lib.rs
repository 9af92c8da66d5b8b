//! # farkle_runtime
//!
//! Dependency-light value types shared by the grammar database
//! (`farkle_core`) and the parsing engine (`farkle_parser`). Nothing in this
//! crate knows how a grammar is built; it only defines the immutable shapes
//! that flow between the tokenizer, the LALR driver, and the table builder.

pub mod bitset;
pub mod char_stream;
pub mod error;
pub mod model;
pub mod position;

pub use bitset::BitSet;
pub use char_stream::{CharStream, CharStreamError, ParserInput};
pub use error::{BuildDiagnostic, ExpectedSymbol, FarkleError, ParseErrorKind, PostProcessorError};
pub use model::{
  Action,
  DFAEdge,
  DFAState,
  DFASymbol,
  Group,
  GroupAdvanceMode,
  GroupEnd,
  GroupEndingMode,
  LALRState,
  Nonterminal,
  Production,
  Symbol,
  Terminal,
  Token,
};
pub use position::{Position, PositionTracker};
