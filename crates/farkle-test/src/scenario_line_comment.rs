//! Scenario 3: `S -> id id` with a `//`-to-end-of-line comment group
//! sitting between the two tokens.

use std::cell::RefCell;

use farkle_core::build::conflict::NoConflictResolver;
use farkle_core::grammar::Grammar;
use farkle_parser::{ObjectStore, Parser, PostProcessor};
use farkle_runtime::{Position, Production, Terminal};

use crate::grammars::{line_comment_dfa, line_comment_groups, LineCommentGrammar};

/// Records each lexed terminal's position, in order, without building any
/// value of its own.
#[derive(Default)]
struct PositionCapturingPostProcessor {
  positions: RefCell<Vec<Position>>,
}

impl PostProcessor for PositionCapturingPostProcessor {
  type Value = ();

  fn transform(&mut self, _terminal: Terminal, _span: &[char], position: Position) {
    self.positions.borrow_mut().push(position);
  }

  fn fuse(&mut self, _production: &Production, _members: Vec<()>, _store: &mut ObjectStore) -> Result<(), farkle_runtime::PostProcessorError> {
    Ok(())
  }

  fn eof(&mut self) {}
}

fn parser() -> Parser {
  let grammar =
    Grammar::build(&LineCommentGrammar, line_comment_dfa(), line_comment_groups(), &NoConflictResolver, None).expect("grammar builds");
  Parser::new(grammar)
}

#[test]
fn a_line_comment_between_two_ids_is_skipped() {
  let parser = parser();
  let mut pp = PositionCapturingPostProcessor::default();
  parser.parse("a // comment\nb", &mut pp).expect("the comment is noise, not a third token");
  assert_eq!(*pp.positions.borrow(), vec![Position::new(1, 1, 0), Position::new(2, 1, 13)]);
}

#[test]
fn an_unterminated_line_comment_at_eof_is_still_accepted() {
  // `is_ended_by_newline` groups close implicitly at end-of-input (§4.2),
  // so a file that ends mid-comment isn't a lexical error.
  let parser = parser();
  let mut pp = PositionCapturingPostProcessor::default();
  parser.parse("a b //", &mut pp).expect("trailing unterminated line comment still accepts");
  assert_eq!(*pp.positions.borrow(), vec![Position::new(1, 1, 0), Position::new(1, 3, 2)]);
}
