//! Optimized operations (C5): precomputed per-grammar lookup tables that
//! turn the tokenizer's and driver's hot paths into array indexing instead
//! of linear scans. Computed once in `Grammar::build` and shared by every
//! parse through the grammar's `Arc` (§4.4).

use std::sync::{Arc, OnceLock};

use farkle_runtime::{Action, DFAState, Group, LALRState, Nonterminal, Terminal};

const ASCII_LIMIT: usize = 128;

/// A 128-entry flat table mapping an ASCII code point to the DFA state it
/// transitions to from some source state, falling back to `anything_else`.
/// `None` means the transition is absent (a dead edge).
pub type AsciiTransitionTable = Arc<[Option<u32>; ASCII_LIMIT]>;

fn empty_ascii_table() -> AsciiTransitionTable {
  static EMPTY: OnceLock<AsciiTransitionTable> = OnceLock::new();
  EMPTY.get_or_init(|| Arc::new([None; ASCII_LIMIT])).clone()
}

/// The group-content scan strategy precomputed once per character-mode
/// group (§4.2, §9 "Group decision-point string").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupScan {
  /// Nesting-starts ∪ {group-end} reduces to a single character: scan for
  /// that one character.
  SingleChar(char),
  /// Scan for the first occurrence of any of these characters (the first
  /// character of each permitted nesting group-start, plus the group-end's
  /// first character).
  AnyOf(Vec<char>),
  /// The group cannot be nested and its end marker is a fixed multi-byte
  /// literal: scan for the whole literal directly.
  FullLiteral(String),
}

impl GroupScan {
  /// Returns the offset (in characters, from `haystack`'s start) of the
  /// next position a full DFA re-entry is required, or `haystack.len()` if
  /// none is found before the end of the resident buffer.
  pub fn scan(&self, haystack: &[char]) -> usize {
    match self {
      GroupScan::SingleChar(c) => haystack.iter().position(|ch| ch == c).unwrap_or(haystack.len()),
      GroupScan::AnyOf(chars) => haystack.iter().position(|ch| chars.contains(ch)).unwrap_or(haystack.len()),
      GroupScan::FullLiteral(literal) => {
        let needle: Vec<char> = literal.chars().collect();
        if needle.is_empty() || needle.len() > haystack.len() {
          return haystack.len();
        }
        for start in 0..=(haystack.len() - needle.len()) {
          if haystack[start..start + needle.len()] == needle[..] {
            return start;
          }
        }
        haystack.len()
      }
    }
  }
}

/// All C5 caches for a single grammar. Attached to the grammar's `Arc` so
/// it is reclaimed with the grammar rather than tracked separately — there
/// is exactly one grammar per `Arc` here, so co-location is simpler than a
/// weak-reference cache keyed by grammar id.
pub struct OptimizedOperations {
  ascii_tables: Vec<AsciiTransitionTable>,
  actions:      Vec<Vec<Option<Action>>>,
  goto:         Vec<Vec<Option<u32>>>,
  group_scans:  Vec<GroupScan>,
}

impl OptimizedOperations {
  pub fn compute(
    dfa_states: &[DFAState],
    lalr_states: &[LALRState],
    groups: &[Group],
    terminal_count: usize,
    nonterminal_count: usize,
  ) -> Self {
    Self {
      ascii_tables: dfa_states.iter().map(build_ascii_table).collect(),
      actions:      build_action_table(lalr_states, terminal_count),
      goto:         build_goto_table(lalr_states, nonterminal_count),
      group_scans:  groups.iter().map(|g| build_group_scan(g, groups)).collect(),
    }
  }

  pub fn ascii_next_state(&self, dfa_state: u32, byte: u8) -> Option<u32> {
    self.ascii_tables[dfa_state as usize][byte as usize]
  }

  pub fn action(&self, state: u32, terminal: Terminal) -> Option<Action> {
    self.actions[state as usize][terminal.0 as usize]
  }

  pub fn goto(&self, state: u32, nonterminal: Nonterminal) -> Option<u32> {
    self.goto[state as usize][nonterminal.0 as usize]
  }

  pub fn group_scan(&self, group_index: usize) -> &GroupScan {
    &self.group_scans[group_index]
  }
}

fn build_ascii_table(state: &DFAState) -> AsciiTransitionTable {
  if state.edges.is_empty() && state.anything_else.is_none() {
    return empty_ascii_table();
  }

  let mut table = [None; ASCII_LIMIT];
  for byte in 0..ASCII_LIMIT as u8 {
    let ch = byte as char;
    let mut next = state.anything_else;
    for edge in &state.edges {
      if edge.range.contains(&ch) {
        next = edge.next_state;
        break;
      }
    }
    table[byte as usize] = next;
  }
  Arc::new(table)
}

fn build_action_table(lalr_states: &[LALRState], terminal_count: usize) -> Vec<Vec<Option<Action>>> {
  lalr_states
    .iter()
    .map(|state| {
      let mut row = vec![None; terminal_count];
      for (terminal, action) in &state.actions {
        row[terminal.0 as usize] = Some(*action);
      }
      row
    })
    .collect()
}

fn build_goto_table(lalr_states: &[LALRState], nonterminal_count: usize) -> Vec<Vec<Option<u32>>> {
  lalr_states
    .iter()
    .map(|state| {
      let mut row = vec![None; nonterminal_count];
      for (nonterminal, target) in &state.goto {
        row[nonterminal.0 as usize] = Some(*target);
      }
      row
    })
    .collect()
}

fn build_group_scan(group: &Group, all_groups: &[Group]) -> GroupScan {
  let end_chars: Vec<char> = match &group.end {
    farkle_runtime::GroupEnd::Literal(lit) => lit.chars().take(1).collect(),
    farkle_runtime::GroupEnd::Newline => vec!['\n'],
  };

  let can_nest = !group.nesting.is_empty();
  let end_is_multichar = matches!(&group.end, farkle_runtime::GroupEnd::Literal(lit) if lit.chars().count() > 1);

  if !can_nest && end_is_multichar {
    if let farkle_runtime::GroupEnd::Literal(lit) = &group.end {
      return GroupScan::FullLiteral(lit.clone());
    }
  }

  let mut alphabet = end_chars;
  for &nested_index in &group.nesting {
    if let Some(nested) = all_groups.get(nested_index) {
      if let Some(first) = nested.start_literal.chars().next() {
        alphabet.push(first);
      }
    }
  }
  alphabet.sort_unstable();
  alphabet.dedup();

  if alphabet.len() == 1 {
    GroupScan::SingleChar(alphabet[0])
  } else {
    GroupScan::AnyOf(alphabet)
  }
}
