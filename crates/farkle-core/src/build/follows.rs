//! Initial follow sets (§4.5(e)) and two-pass fixpoint propagation
//! (§4.5(f)).

use farkle_runtime::BitSet;

use super::goto_deps::{DependencyKind, GotoDependency};
use super::lr0::Lr0Automaton;
use super::syntax::AbstractSyntaxProvider;
use super::{cancelled, CancellationToken};

/// Direct follows of every GOTO: the set of terminals that have a shift
/// action in the GOTO's destination state, plus the end symbol for the
/// augmented start GOTO (identified as the GOTO whose destination state has
/// no incoming kernel other than the start item — in practice, the GOTO
/// whose `from_state` is the automaton's initial state and whose production
/// set includes the start production).
pub fn initial_follows(automaton: &Lr0Automaton, syntax: &dyn AbstractSyntaxProvider) -> Vec<BitSet> {
  automaton
    .gotos
    .iter()
    .map(|g| {
      let mut follow: BitSet = automaton
        .shifts
        .iter()
        .filter(|(from, _, _)| *from == g.to_state)
        .map(|(_, terminal, _)| terminal.0 as usize)
        .collect();

      if g.from_state == 0 {
        follow.insert(syntax.end_symbol().0 as usize);
      }

      follow
    })
    .collect()
}

/// Runs the two mandated fixpoint passes over `deps`, mutating `follows` in
/// place. Pass one activates successor ∪ internal edges; pass two activates
/// internal ∪ predecessor edges. Each pass iterates to a fixpoint before the
/// next begins, per §4.5(f)'s ordering requirement. `cancellation` is
/// polled once per outer iteration of each pass's loop.
pub fn propagate_follows(follows: &mut [BitSet], deps: &[GotoDependency], cancellation: Option<&CancellationToken>) {
  let pass = |follows: &mut [BitSet], active: &[&GotoDependency]| loop {
    if cancelled(cancellation) {
      break;
    }

    let mut changed = false;
    for dep in active {
      let target = follows[dep.target].clone();
      if follows[dep.source].union_with(&target) {
        changed = true;
      }
    }
    if !changed {
      break;
    }
  };

  let pass_one: Vec<&GotoDependency> =
    deps.iter().filter(|d| matches!(d.kind, DependencyKind::Successor | DependencyKind::Internal)).collect();
  pass(follows, &pass_one);

  let pass_two: Vec<&GotoDependency> =
    deps.iter().filter(|d| matches!(d.kind, DependencyKind::Internal | DependencyKind::Predecessor)).collect();
  pass(follows, &pass_two);
}
