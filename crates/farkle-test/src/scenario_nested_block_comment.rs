//! Scenario 4: `S -> x` with a self-nesting `/* ... */` block comment
//! group, so a comment inside a comment still closes cleanly at the
//! matching `*/`.

use farkle_core::build::conflict::NoConflictResolver;
use farkle_core::grammar::Grammar;
use farkle_parser::{Parser, SyntaxCheckPostProcessor};
use farkle_runtime::{FarkleError, ParseErrorKind};

use crate::grammars::{block_comment_dfa, block_comment_groups, BlockCommentGrammar};

fn parser() -> Parser {
  let grammar =
    Grammar::build(&BlockCommentGrammar, block_comment_dfa(), block_comment_groups(), &NoConflictResolver, None).expect("grammar builds");
  Parser::new(grammar)
}

#[test]
fn a_nested_block_comment_closes_at_its_matching_end_marker() {
  let parser = parser();
  let mut pp = SyntaxCheckPostProcessor;
  parser.parse("/* /* inner */ outer */x", &mut pp).expect("the inner */ closes only the inner comment");
}

#[test]
fn an_unclosed_outer_block_comment_is_an_error_at_eof() {
  let parser = parser();
  let mut pp = SyntaxCheckPostProcessor;
  let err = parser.parse("/* /* */", &mut pp).unwrap_err();
  match err {
    FarkleError::ParseError { kind: ParseErrorKind::UnexpectedEndOfInputInGroup(_), .. } => {}
    other => panic!("expected an unclosed-group error, got {other:?}"),
  }
}
