//! Scenario 6: `S -> id id` across a `\r\n` pair, which must count as
//! exactly one line break.

use std::cell::RefCell;

use farkle_core::build::conflict::NoConflictResolver;
use farkle_core::grammar::Grammar;
use farkle_parser::{ObjectStore, Parser, PostProcessor};
use farkle_runtime::{Position, Production, Terminal};

use crate::grammars::{crlf_dfa, CrlfGrammar};

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
  let grammar = Grammar::build(&CrlfGrammar, crlf_dfa(), vec![], &NoConflictResolver, None).expect("grammar builds");
  Parser::new(grammar)
}

#[test]
fn a_crlf_pair_counts_as_a_single_line_break() {
  let parser = parser();
  let mut pp = PositionCapturingPostProcessor::default();
  parser.parse("a\r\nb", &mut pp).expect("a\\r\\nb parses as two ids");
  assert_eq!(*pp.positions.borrow(), vec![Position::new(1, 1, 0), Position::new(2, 1, 3)]);
}
