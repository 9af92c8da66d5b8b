//! GOTO follow-set dependency graph (§4.5(d)): classifies, for every pair of
//! GOTO records, whether one GOTO's eventual follow set must flow into
//! another's.

use farkle_runtime::Symbol;

use super::lr0::Lr0Automaton;
use super::syntax::AbstractSyntaxProvider;

/// The three dependency shapes a GOTO pair can have. Propagation (§4.5(f))
/// runs two passes that each activate a different subset of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
  Successor,
  Internal,
  Predecessor,
}

/// A directed edge `source -> target` meaning: once `target`'s follow set is
/// known, OR it into `source`'s. `source`/`target` are indices into
/// [`Lr0Automaton::gotos`].
#[derive(Debug, Clone, Copy)]
pub struct GotoDependency {
  pub source: usize,
  pub target: usize,
  pub kind:   DependencyKind,
}

/// Finds the state reached by following `symbols` in order from `from_state`,
/// or `None` if any step has no transition (which would indicate a
/// malformed automaton, since every symbol considered here was derived from
/// an actual production handle reachable from `from_state`).
pub(crate) fn follow_symbols(automaton: &Lr0Automaton, from_state: u32, symbols: &[Symbol]) -> Option<u32> {
  let mut state = from_state;
  for &symbol in symbols {
    state = match symbol {
      Symbol::Terminal(t) => automaton.shifts.iter().find(|(from, term, _)| *from == state && *term == t)?.2,
      Symbol::Nonterminal(n) => automaton.goto_from(state, n)?.to_state,
    };
  }
  Some(state)
}

/// Builds the full dependency list for every GOTO in `automaton`.
pub fn compute_goto_dependencies(
  automaton: &Lr0Automaton,
  syntax: &dyn AbstractSyntaxProvider,
  nullable: &[bool],
  production_nullable_starts: &[u32],
) -> Vec<GotoDependency> {
  let mut deps = Vec::new();

  for g in &automaton.gotos {
    // Successor: nonterminal transitions out of S triggering a nullable
    // nonterminal. g depends on that transition's own GOTO.
    for g2 in &automaton.gotos {
      if g2.from_state == g.to_state && nullable[g2.nonterminal.0 as usize] {
        deps.push(GotoDependency { source: g.index, target: g2.index, kind: DependencyKind::Successor });
      }
    }

    // Includes: every production P headed by g's nonterminal, scanned for a
    // nonterminal B with a nullable suffix beyond it.
    for &production in syntax.nonterminal_productions(g.nonterminal) {
      let handle = syntax.production_members(production);
      let suffix_start = production_nullable_starts[production as usize] as usize;

      for (i, &symbol) in handle.iter().enumerate() {
        let Symbol::Nonterminal(b) = symbol else { continue };
        if suffix_start > i + 1 {
          continue; // β (handle[i+1..]) is not entirely nullable.
        }

        let alpha = &handle[..i];
        let Some(state_after_alpha) = follow_symbols(automaton, g.from_state, alpha) else { continue };
        let Some(g_prime) = automaton.goto_from(state_after_alpha, b) else { continue };

        let kind = if alpha.is_empty() || g_prime.from_state == g.from_state {
          DependencyKind::Internal
        } else {
          DependencyKind::Predecessor
        };
        deps.push(GotoDependency { source: g_prime.index, target: g.index, kind });
      }
    }
  }

  deps
}
