//! LR(0) state machine construction (§4.5(a)): BFS from the closure of the
//! start production, kernel-item-set deduplication, and the splitting of
//! nonterminal-triggered transitions into GOTO records.

use indexmap::{IndexMap, IndexSet};
use std::collections::VecDeque;

use farkle_runtime::{Nonterminal, Symbol, Terminal};

use super::syntax::AbstractSyntaxProvider;

/// An LR(0) item: a production together with a dot position. A dot
/// position of `0` means nothing has been shifted over yet; a dot position
/// equal to the handle's length marks a complete item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Item {
  pub production: u32,
  pub dot:        u32,
}

/// A kernel item set, canonically sorted — two states are the same state
/// iff their kernels are structurally equal once sorted (§9
/// "Kernel-item-set dedup").
pub type Kernel = Vec<Item>;

#[derive(Debug, Clone)]
pub struct Lr0State {
  pub index:  u32,
  pub kernel: Kernel,
}

/// A GOTO record: the parser is in `from_state`, shifts over nonterminal
/// `nonterminal`, and lands in `to_state`. `index` is this GOTO's position
/// in the automaton's flat GOTO list, used by later stages as a stable
/// dependency-graph node id.
#[derive(Debug, Clone, Copy)]
pub struct GotoEdge {
  pub index:       usize,
  pub from_state:  u32,
  pub to_state:    u32,
  pub nonterminal: Nonterminal,
}

#[derive(Debug)]
pub struct Lr0Automaton {
  pub states: Vec<Lr0State>,
  /// Direct terminal transitions: `(from_state, terminal) -> to_state`.
  pub shifts: Vec<(u32, Terminal, u32)>,
  pub gotos:  Vec<GotoEdge>,
}

impl Lr0Automaton {
  pub fn goto_from(&self, from_state: u32, nonterminal: Nonterminal) -> Option<&GotoEdge> {
    self.gotos.iter().find(|g| g.from_state == from_state && g.nonterminal == nonterminal)
  }
}

fn symbol_at_dot(item: Item, syntax: &dyn AbstractSyntaxProvider) -> Option<Symbol> {
  syntax.production_members(item.production).get(item.dot as usize).copied()
}

/// The closure of a kernel item set: iterate items, and whenever the dot
/// sits before a nonterminal, enqueue that nonterminal's productions at
/// dot position `0` (§4.5(a)).
fn closure(kernel: &Kernel, syntax: &dyn AbstractSyntaxProvider) -> Vec<Item> {
  let mut seen: IndexSet<Item> = kernel.iter().copied().collect();
  let mut queue: VecDeque<Item> = kernel.iter().copied().collect();

  while let Some(item) = queue.pop_front() {
    if let Some(Symbol::Nonterminal(nt)) = symbol_at_dot(item, syntax) {
      for &production in syntax.nonterminal_productions(nt) {
        let new_item = Item { production, dot: 0 };
        if seen.insert(new_item) {
          queue.push_back(new_item);
        }
      }
    }
  }

  seen.into_iter().collect()
}

fn canonical_kernel(mut items: Vec<Item>) -> Kernel {
  items.sort_unstable();
  items.dedup();
  items
}

/// Builds the LR(0) automaton via BFS from the augmented start production.
pub fn build_lr0_automaton(syntax: &dyn AbstractSyntaxProvider) -> Lr0Automaton {
  let start_kernel = canonical_kernel(vec![Item { production: syntax.start_production(), dot: 0 }]);

  let mut states = vec![Lr0State { index: 0, kernel: start_kernel.clone() }];
  let mut kernel_lookup: IndexMap<Kernel, u32> = IndexMap::new();
  kernel_lookup.insert(start_kernel, 0);

  let mut shifts = Vec::new();
  let mut gotos = Vec::new();
  let mut queue: VecDeque<u32> = VecDeque::from([0]);

  while let Some(state_index) = queue.pop_front() {
    let kernel = states[state_index as usize].kernel.clone();
    let closed = closure(&kernel, syntax);

    // Group outgoing transitions by the symbol at the dot. Sorting by
    // symbol gives a deterministic processing (and thus state-numbering)
    // order, per §4.5(a).
    let mut by_symbol: IndexMap<Symbol, Vec<Item>> = IndexMap::new();
    for item in closed {
      if let Some(symbol) = symbol_at_dot(item, syntax) {
        by_symbol.entry(symbol).or_default().push(Item { production: item.production, dot: item.dot + 1 });
      }
    }
    by_symbol.sort_keys();

    for (symbol, advanced_items) in by_symbol {
      let new_kernel = canonical_kernel(advanced_items);
      let to_state = *kernel_lookup.entry(new_kernel.clone()).or_insert_with(|| {
        let index = states.len() as u32;
        states.push(Lr0State { index, kernel: new_kernel });
        queue.push_back(index);
        index
      });

      match symbol {
        Symbol::Terminal(terminal) => shifts.push((state_index, terminal, to_state)),
        Symbol::Nonterminal(nonterminal) => {
          gotos.push(GotoEdge { index: gotos.len(), from_state: state_index, to_state, nonterminal })
        }
      }
    }
  }

  Lr0Automaton { states, shifts, gotos }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::build::fixtures::BalancedParens;

  #[test]
  fn builds_a_small_automaton() {
    let grammar = BalancedParens::new();
    let automaton = build_lr0_automaton(&grammar);
    // State 0 kernel is the augmented item; closure pulls in both S
    // productions, so state 0 has a goto on S and a shift on `(`.
    assert!(automaton.goto_from(0, Nonterminal(1)).is_some());
    assert!(automaton.shifts.iter().any(|(from, t, _)| *from == 0 && *t == Terminal(0)));
  }

  #[test]
  fn kernel_sets_are_deduplicated() {
    let grammar = BalancedParens::new();
    let automaton = build_lr0_automaton(&grammar);
    let mut kernels: Vec<Kernel> = automaton.states.iter().map(|s| s.kernel.clone()).collect();
    let before = kernels.len();
    kernels.sort();
    kernels.dedup();
    assert_eq!(kernels.len(), before);
  }
}
