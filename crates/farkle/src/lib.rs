//! Facade crate: re-exports the public surface of `farkle_runtime`,
//! `farkle_core`, and `farkle_parser` under one name, so a consumer only
//! ever needs one dependency.
//!
//! A typical consumer only needs this crate: implement
//! [`AbstractSyntaxProvider`] for their grammar, call [`Grammar::build`]
//! with its DFA and group tables, then drive it with a [`Parser`] and a
//! [`PostProcessor`].

pub use farkle_core::build::conflict::{ConflictResolver, Decision, NoConflictResolver};
pub use farkle_core::build::syntax::AbstractSyntaxProvider;
pub use farkle_core::build::{build_lalr_tables, BuildConfig, CancellationToken};
pub use farkle_core::grammar::{Grammar, SharedGrammar};
pub use farkle_core::optimized::{GroupScan, OptimizedOperations};

pub use farkle_parser::{AstNode, AstPostProcessor, ObjectStore, Parser, PostProcessor, SyntaxCheckPostProcessor, Tokenizer};

pub use farkle_runtime::{
  Action,
  BuildDiagnostic,
  CharStream,
  CharStreamError,
  DFAEdge,
  DFAState,
  DFASymbol,
  ExpectedSymbol,
  FarkleError,
  Group,
  GroupAdvanceMode,
  GroupEnd,
  GroupEndingMode,
  LALRState,
  Nonterminal,
  ParseErrorKind,
  ParserInput,
  Position,
  PositionTracker,
  PostProcessorError,
  Production,
  Symbol,
  Terminal,
  Token,
};
