//! Scenario 2: `S -> ( S ) | ε`.

use farkle_core::build::conflict::NoConflictResolver;
use farkle_core::grammar::Grammar;
use farkle_parser::{Parser, SyntaxCheckPostProcessor};
use farkle_runtime::{ExpectedSymbol, FarkleError, ParseErrorKind, Position, Terminal};

use crate::grammars::{balanced_parens_dfa, BalancedParensGrammar};

fn parser() -> Parser {
  let grammar =
    Grammar::build(&BalancedParensGrammar, balanced_parens_dfa(), vec![], &NoConflictResolver, None).expect("grammar builds");
  Parser::new(grammar)
}

#[test]
fn balanced_input_is_accepted() {
  let parser = parser();
  let mut pp = SyntaxCheckPostProcessor;
  parser.parse("(())", &mut pp).expect("(()) is balanced");
}

#[test]
fn an_unclosed_paren_errors_at_eof_expecting_a_close() {
  let parser = parser();
  let mut pp = SyntaxCheckPostProcessor;
  let err = parser.parse("(()", &mut pp).unwrap_err();
  match err {
    FarkleError::ParseError { kind: ParseErrorKind::SyntaxError { expected, actual }, .. } => {
      assert_eq!(actual, ExpectedSymbol::EndOfInput);
      assert!(expected.contains(&ExpectedSymbol::Terminal(Terminal(1))));
    }
    other => panic!("expected a syntax error at eof, got {other:?}"),
  }
}

#[test]
fn an_extra_close_paren_errors_mid_input() {
  // "())" fully reduces its first balanced pair by the third character,
  // landing back at the augmented start state `S' -> S .`, whose only
  // action is Accept on end-of-input — so the lone valid continuation at
  // that point is EOF, not another '(' (this grammar has no production
  // that repeats S at the top level).
  let parser = parser();
  let mut pp = SyntaxCheckPostProcessor;
  let err = parser.parse("())", &mut pp).unwrap_err();
  match err {
    FarkleError::ParseError { position, kind: ParseErrorKind::SyntaxError { expected, actual } } => {
      assert_eq!(position, Position::new(1, 3, 2));
      assert_eq!(actual, ExpectedSymbol::Terminal(Terminal(1)));
      assert_eq!(expected, [ExpectedSymbol::EndOfInput].into_iter().collect());
    }
    other => panic!("expected a syntax error at (1,3), got {other:?}"),
  }
}
