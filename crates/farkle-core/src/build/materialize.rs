//! Table materialization (§4.5(h)): turns the LR(0) automaton plus the
//! computed reduction lookaheads into the dense [`LALRState`] list the
//! runtime drives against, consulting the [`ConflictResolver`] whenever a
//! terminal would otherwise receive two competing actions.

use std::collections::HashSet;

use farkle_runtime::{Action, BuildDiagnostic, FarkleError, LALRState, Terminal};

use super::conflict::{ConflictResolver, Decision};
use super::lookaheads::ReductionLookaheads;
use super::lr0::Lr0Automaton;
use super::syntax::AbstractSyntaxProvider;

/// Tries to place `candidate` at `terminal` in `actions`, consulting
/// `resolver` if a conflicting action is already present. Ambiguities that
/// the resolver can't settle are appended to `diagnostics` rather than
/// returned immediately, so a single build reports every conflicting state
/// at once. Once a terminal has been suppressed via
/// [`Decision::ChooseNeither`] it stays suppressed for the rest of this
/// state's construction — `suppressed` is what makes that permanent rather
/// than just clearing whatever happened to occupy the slot at the time.
fn place_action(
  actions: &mut Vec<(Terminal, Action)>,
  suppressed: &mut HashSet<Terminal>,
  terminal: Terminal,
  candidate: Action,
  resolver: &dyn ConflictResolver,
  state_index: u32,
  diagnostics: &mut Vec<BuildDiagnostic>,
) {
  if suppressed.contains(&terminal) {
    return;
  }

  if let Some(slot) = actions.iter_mut().find(|(t, _)| *t == terminal) {
    let existing = slot.1;
    if existing == candidate {
      return;
    }

    let decision = match (existing, candidate) {
      (Action::Shift(_), Action::Reduce(p)) => resolver.resolve_shift_reduce(terminal, p),
      (Action::Reduce(p), Action::Shift(_)) => {
        // Flip so "option2" is consistently the shift side from the
        // resolver's point of view, then flip the decision back.
        match resolver.resolve_shift_reduce(terminal, p) {
          Decision::ChooseOption1 => Decision::ChooseOption2,
          Decision::ChooseOption2 => Decision::ChooseOption1,
          other => other,
        }
      }
      (Action::Reduce(p1), Action::Reduce(p2)) => resolver.resolve_reduce_reduce(p1, p2),
      _ => Decision::CannotChoose,
    };

    match decision {
      Decision::ChooseOption1 => {}
      Decision::ChooseOption2 => slot.1 = candidate,
      Decision::ChooseNeither => {
        actions.retain(|(t, _)| *t != terminal);
        suppressed.insert(terminal);
      }
      Decision::CannotChoose => diagnostics.push(BuildDiagnostic::new(format!(
        "ambiguous action in state {state_index} on terminal {}: {:?} vs {:?}",
        terminal.0, existing, candidate
      ))),
    }
  } else {
    actions.push((terminal, candidate));
  }
}

/// Builds the final `LALRState` table. Returns a [`FarkleError::BuildError`]
/// carrying every unresolved conflict if any remain after consulting
/// `resolver`.
pub fn materialize_states(
  automaton: &Lr0Automaton,
  syntax: &dyn AbstractSyntaxProvider,
  lookaheads: &ReductionLookaheads,
  resolver: &dyn ConflictResolver,
) -> Result<Vec<LALRState>, FarkleError> {
  let end_symbol = syntax.end_symbol();
  let start_production = syntax.start_production();
  let mut diagnostics = Vec::new();

  let states = automaton
    .states
    .iter()
    .map(|state| {
      let mut actions: Vec<(Terminal, Action)> = Vec::new();
      let mut eof_candidates: Vec<(Terminal, Action)> = Vec::new();
      let mut suppressed: HashSet<Terminal> = HashSet::new();
      let mut eof_suppressed: HashSet<Terminal> = HashSet::new();

      for &(from, terminal, to) in automaton.shifts.iter().filter(|(from, _, _)| *from == state.index) {
        place_action(&mut actions, &mut suppressed, terminal, Action::Shift(to), resolver, from, &mut diagnostics);
      }

      for (&(reduce_state, production), lookahead) in lookaheads.iter().filter(|((s, _), _)| *s == state.index) {
        let action = if production == start_production { Action::Accept } else { Action::Reduce(production) };
        for terminal_id in lookahead.iter() {
          let terminal = Terminal(terminal_id as u32);
          if terminal == end_symbol {
            place_action(&mut eof_candidates, &mut eof_suppressed, terminal, action, resolver, reduce_state, &mut diagnostics);
          } else {
            place_action(&mut actions, &mut suppressed, terminal, action, resolver, reduce_state, &mut diagnostics);
          }
        }
      }

      let goto = automaton.gotos.iter().filter(|g| g.from_state == state.index).map(|g| (g.nonterminal, g.to_state)).collect();

      LALRState { index: state.index, actions, goto, eof_action: eof_candidates.first().map(|(_, a)| *a) }
    })
    .collect();

  if diagnostics.is_empty() {
    Ok(states)
  } else {
    Err(FarkleError::BuildError { diagnostics })
  }
}
