//! Immutable grammar data types (C4 — the "shape" half; the builder that
//! fills them in lives in `farkle_core::build`). These are shared between
//! `farkle_core` (which constructs them) and `farkle_parser` (which only
//! reads them), so they live in the dependency-free runtime crate.

use std::ops::Range;

use crate::position::Position;

/// Opaque index of a terminal symbol: a small integer id into the
/// grammar's terminal table rather than a name, so table lookups stay
/// array indexing instead of string comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Terminal(pub u32);

/// Opaque index of a nonterminal symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Nonterminal(pub u32);

/// A symbol appearing in a production's handle: either a terminal or a
/// nonterminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
  Terminal(Terminal),
  Nonterminal(Nonterminal),
}

impl Symbol {
  pub fn is_terminal(&self) -> bool {
    matches!(self, Symbol::Terminal(_))
  }

  pub fn is_nonterminal(&self) -> bool {
    matches!(self, Symbol::Nonterminal(_))
  }
}

/// A grammar production: `head -> handle[0] handle[1] ... handle[n-1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
  pub index:  u32,
  pub head:   Nonterminal,
  pub handle: Vec<Symbol>,
}

/// A lexed token. An EOF token carries `is_eof = true` and an out-of-band
/// sentinel `data`; every other field is meaningful only when `is_eof` is
/// `false` (§3).
#[derive(Debug, Clone)]
pub struct Token<T> {
  pub position: Position,
  pub symbol:   Terminal,
  pub data:     T,
  pub is_eof:   bool,
}

/// One of the four lexical classifications a DFA accepting state can carry
/// (§3). `GroupStart`/`GroupEnd` drive the tokenizer's group stack (§4.2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DFASymbol {
  Terminal { id: Terminal, name: String },
  Noise { name: String },
  GroupStart { literal: String, group_index: usize },
  GroupEnd { literal: String },
}

/// One outgoing edge of a [`DFAState`]: an inclusive character range and
/// the state it transitions to, or `None` if the range has no transition
/// (a dead edge, which is never emitted by a well-formed DFA but is valid
/// to represent).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DFAEdge {
  pub range:      Range<char>,
  pub next_state: Option<u32>,
}

/// A single DFA state (C4). `edges` is sorted by `range.start` so the
/// non-ASCII fallback path in `farkle_core::optimized` can binary-search it.
#[derive(Debug, Clone, Default)]
pub struct DFAState {
  pub edges:          Vec<DFAEdge>,
  pub anything_else:  Option<u32>,
  pub accept_symbol:  Option<DFASymbol>,
}

/// Whether a character-mode group consumes the group body one *token* at a
/// time (re-entering the DFA) or one *character* at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupAdvanceMode {
  Token,
  Character,
}

/// Whether a group's end literal is consumed (`Closed`) or left for the
/// containing context to see again (`Open`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupEndingMode {
  Open,
  Closed,
}

/// Whether a group is terminated by an explicit end literal or by a bare
/// newline (line comments).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupEnd {
  Literal(String),
  Newline,
}

/// A lexical group (comment, string, ...) whose contents bypass the main
/// DFA until the end marker is encountered (§3, §4.2).
#[derive(Debug, Clone)]
pub struct Group {
  pub index:              usize,
  pub start_literal:       String,
  pub end:                 GroupEnd,
  /// The terminal/noise symbol produced once the outermost instance of
  /// this group closes.
  pub container:           DFASymbol,
  /// Group indices that may be nested inside this one.
  pub nesting:             Vec<usize>,
  pub advance_mode:        GroupAdvanceMode,
  pub ending_mode:         GroupEndingMode,
  pub is_ended_by_newline: bool,
}

impl Group {
  pub fn container_is_noise(&self) -> bool {
    matches!(self.container, DFASymbol::Noise { .. })
  }
}

/// A shift/reduce/accept action attached to an `(LALRState, Terminal)` pair
/// (§3). A closed, `Copy` tagged union so the driver's action dispatch is a
/// single match with no allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
  Shift(u32),
  Reduce(u32),
  Accept,
}

/// One state of the LALR automaton: per-terminal actions, per-nonterminal
/// goto targets, and an optional EOF action.
#[derive(Debug, Clone, Default)]
pub struct LALRState {
  pub index:      u32,
  pub actions:    Vec<(Terminal, Action)>,
  pub goto:       Vec<(Nonterminal, u32)>,
  pub eof_action: Option<Action>,
}

impl LALRState {
  pub fn action_for(&self, terminal: Terminal) -> Option<Action> {
    self.actions.iter().find(|(t, _)| *t == terminal).map(|(_, a)| *a)
  }

  pub fn goto_for(&self, nonterminal: Nonterminal) -> Option<u32> {
    self.goto.iter().find(|(n, _)| *n == nonterminal).map(|(_, s)| *s)
  }
}
