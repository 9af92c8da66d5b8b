//! Closed error sum (§6, §7): parse errors carry a [`Position`]; build
//! errors carry a list of diagnostics collected during table construction.

use std::collections::BTreeSet;

use crate::{model::Terminal, position::Position};

/// Top-level error returned by a parse or by a failed grammar build.
#[derive(Debug, thiserror::Error)]
pub enum FarkleError {
  #[error("parse error at {position}: {kind}")]
  ParseError { position: Position, kind: ParseErrorKind },

  #[error("grammar build failed with {} diagnostic(s)", diagnostics.len())]
  BuildError { diagnostics: Vec<BuildDiagnostic> },
}

/// The set of things that can go fatally wrong during tokenization or
/// parsing. Every variant is terminal: none of these are retried or
/// recovered from (§1 Non-goals: error-recovery parsing).
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
  #[error("unexpected end of input")]
  UnexpectedEndOfInput,

  #[error("unrecognized character {0:?}")]
  LexicalError(char),

  #[error("syntax error: expected {expected:?}, found {actual:?}")]
  SyntaxError { expected: BTreeSet<ExpectedSymbol>, actual: ExpectedSymbol },

  #[error("unexpected end of group marker {0:?}")]
  UnexpectedGroupEnd(String),

  #[error("unexpected end of input inside group {0:?}")]
  UnexpectedEndOfInputInGroup(String),

  #[error("{0}")]
  UserError(String),
}

/// A terminal or the end-of-input sentinel, as it appears in a
/// [`ParseErrorKind::SyntaxError`]'s `expected`/`actual` sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExpectedSymbol {
  Terminal(Terminal),
  EndOfInput,
}

/// One entry in a failed grammar build's diagnostic list. A flat list of
/// these rather than a single first-error return, since a malformed
/// grammar usually has more than one thing wrong with it worth reporting
/// at once.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct BuildDiagnostic {
  pub message:  String,
  pub position: Option<Position>,
}

impl BuildDiagnostic {
  pub fn new(message: impl Into<String>) -> Self {
    Self { message: message.into(), position: None }
  }

  pub fn at(message: impl Into<String>, position: Position) -> Self {
    Self { message: message.into(), position: Some(position) }
  }
}

/// Errors a [`crate::model`] post-processor callback (`fuse`) can surface.
/// A user-thrown [`PostProcessorError::Application`] becomes
/// `ParseErrorKind::UserError`; anything else escaping `fuse` (a panic) is
/// caught at the driver boundary and rewrapped as
/// [`PostProcessorError::Panic`] (§7).
#[derive(Debug, thiserror::Error)]
pub enum PostProcessorError {
  #[error("{message}")]
  Application { position: Option<Position>, message: String },

  #[error("post-processor panicked: {0}")]
  Panic(String),
}
