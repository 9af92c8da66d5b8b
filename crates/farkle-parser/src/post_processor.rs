//! Post-processor interface (C8): the two user callbacks the tokenizer and
//! driver invoke to turn lexemes and reductions into semantic values, plus
//! two prebuilt implementations.

use std::any::Any;
use std::collections::HashMap;

use farkle_runtime::{Position, PostProcessorError, Production, Terminal};

/// The per-parse, string-keyed scratch store a [`PostProcessor::fuse`] call
/// may read or write, mirroring [`farkle_runtime::CharStream::object_store`]
/// (§9 "Hidden mutable object-store").
pub type ObjectStore = HashMap<String, Box<dyn Any>>;

/// User-supplied semantic actions (§4.3, §6 "Post-processor contract").
/// `transform` never fails — a lexeme always has a value, even if that
/// value is just the lexeme's own text; `fuse` may reject a reduction with
/// [`PostProcessorError::Application`], and may panic, which the driver
/// catches at its boundary and rewraps as
/// [`PostProcessorError::Panic`].
pub trait PostProcessor {
  type Value;

  /// Turns a lexed terminal's span into a semantic value.
  fn transform(&mut self, terminal: Terminal, span: &[char], position: Position) -> Self::Value;

  /// Turns a completed production's child values into one semantic value.
  fn fuse(&mut self, production: &Production, members: Vec<Self::Value>, store: &mut ObjectStore) -> Result<Self::Value, PostProcessorError>;

  /// The out-of-band sentinel value carried by an EOF token (§3 "Token").
  fn eof(&mut self) -> Self::Value;
}

/// A post-processor that discards every semantic value, useful for
/// validating that an input matches the grammar without building anything.
#[derive(Debug, Default)]
pub struct SyntaxCheckPostProcessor;

impl PostProcessor for SyntaxCheckPostProcessor {
  type Value = ();

  fn transform(&mut self, _terminal: Terminal, _span: &[char], _position: Position) {}

  fn fuse(&mut self, _production: &Production, _members: Vec<()>, _store: &mut ObjectStore) -> Result<(), PostProcessorError> {
    Ok(())
  }

  fn eof(&mut self) {}
}

/// A generic concrete-syntax tree: leaves are lexed terminals, interior
/// nodes are reductions. Useful as a default when a grammar doesn't need a
/// hand-written AST type.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
  Leaf { terminal: Terminal, text: String, position: Position },
  Node { production: u32, children: Vec<AstNode> },
}

#[derive(Debug, Default)]
pub struct AstPostProcessor;

impl PostProcessor for AstPostProcessor {
  type Value = AstNode;

  fn transform(&mut self, terminal: Terminal, span: &[char], position: Position) -> AstNode {
    AstNode::Leaf { terminal, text: span.iter().collect(), position }
  }

  fn fuse(&mut self, production: &Production, members: Vec<AstNode>, _store: &mut ObjectStore) -> Result<AstNode, PostProcessorError> {
    Ok(AstNode::Node { production: production.index, children: members })
  }

  fn eof(&mut self) -> AstNode {
    AstNode::Leaf { terminal: Terminal(u32::MAX), text: String::new(), position: Position::START }
  }
}
