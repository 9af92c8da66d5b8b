//! Scenario 5: `E -> E + E | E * E | n`, resolved by conventional `%left`
//! precedence (`*` binds tighter than `+`, both left-associative) instead
//! of being left ambiguous.

use farkle_core::build::conflict::{ConflictResolver, Decision};
use farkle_core::grammar::Grammar;
use farkle_parser::{AstNode, AstPostProcessor, Parser};
use farkle_runtime::Terminal;

use crate::grammars::{precedence_dfa, PrecedenceGrammar};

/// `resolve_shift_reduce`'s `ChooseOption1`/`ChooseOption2` mean "prefer
/// shift" / "prefer reduce" respectively, independent of which action the
/// table builder happened to insert first. Reduce/reduce never fires for
/// this grammar, so that half of the trait is unreachable here.
struct PrecedenceResolver;

fn terminal_precedence(terminal: Terminal) -> u8 {
  match terminal.0 {
    0 => 1, // +
    1 => 2, // *
    _ => 0,
  }
}

fn production_precedence(production: u32) -> u8 {
  match production {
    1 => 1, // E -> E + E
    2 => 2, // E -> E * E
    _ => 0,
  }
}

impl ConflictResolver for PrecedenceResolver {
  fn resolve_shift_reduce(&self, terminal: Terminal, production: u32) -> Decision {
    if terminal_precedence(terminal) > production_precedence(production) { Decision::ChooseOption1 } else { Decision::ChooseOption2 }
  }

  fn resolve_reduce_reduce(&self, _p1: u32, _p2: u32) -> Decision {
    Decision::CannotChoose
  }
}

fn parser() -> Parser {
  let grammar = Grammar::build(&PrecedenceGrammar, precedence_dfa(), vec![], &PrecedenceResolver, None).expect("grammar builds");
  Parser::new(grammar)
}

/// The production-index skeleton of an [`AstNode`], with leaf text and
/// position erased — what these tests actually care about is which
/// operator bound to which operands.
#[derive(Debug, PartialEq)]
enum Shape {
  Leaf,
  Node(u32, Vec<Shape>),
}

fn shape_of(node: &AstNode) -> Shape {
  match node {
    AstNode::Leaf { .. } => Shape::Leaf,
    AstNode::Node { production, children } => Shape::Node(*production, children.iter().map(shape_of).collect()),
  }
}

#[test]
fn multiplication_binds_tighter_than_addition() {
  let parser = parser();
  let mut pp = AstPostProcessor;
  let tree = parser.parse("1+2*3", &mut pp).expect("1+2*3 parses");

  // (1 + (2 * 3))
  let expected = Shape::Node(1, vec![Shape::Leaf, Shape::Node(2, vec![Shape::Leaf, Shape::Leaf])]);
  assert_eq!(shape_of(&tree), expected);
}

#[test]
fn addition_is_left_associative() {
  let parser = parser();
  let mut pp = AstPostProcessor;
  let tree = parser.parse("1+2+3", &mut pp).expect("1+2+3 parses");

  // ((1 + 2) + 3)
  let expected = Shape::Node(1, vec![Shape::Node(1, vec![Shape::Leaf, Shape::Leaf]), Shape::Leaf]);
  assert_eq!(shape_of(&tree), expected);
}

#[test]
fn multiplication_is_left_associative() {
  let parser = parser();
  let mut pp = AstPostProcessor;
  let tree = parser.parse("1*2*3", &mut pp).expect("1*2*3 parses");

  // ((1 * 2) * 3)
  let expected = Shape::Node(2, vec![Shape::Node(2, vec![Shape::Leaf, Shape::Leaf]), Shape::Leaf]);
  assert_eq!(shape_of(&tree), expected);
}
