//! Hand-built grammars for the end-to-end scenario tests. Each one pairs
//! an [`AbstractSyntaxProvider`] with the DFA states and groups
//! `Grammar::build` needs — lexical-table construction is a given input
//! here rather than something the builder derives from a regex surface.

use farkle_core::build::syntax::AbstractSyntaxProvider;
use farkle_runtime::{DFAEdge, DFAState, DFASymbol, Group, GroupAdvanceMode, GroupEnd, GroupEndingMode, Nonterminal, Symbol, Terminal};

/// `S' -> Number` — scenario 1, "JSON number": accepts `-?\d+(\.\d+)?`.
pub struct JsonNumberGrammar;

impl AbstractSyntaxProvider for JsonNumberGrammar {
  fn terminal_count(&self) -> usize { 1 }
  fn nonterminal_count(&self) -> usize { 1 }
  fn production_count(&self) -> usize { 1 }
  fn start_production(&self) -> u32 { 0 }
  fn end_symbol(&self) -> Terminal { Terminal(1) }
  fn production_head(&self, _production: u32) -> Nonterminal { Nonterminal(0) }
  fn production_members(&self, _production: u32) -> &[Symbol] {
    static MEMBERS: [Symbol; 1] = [Symbol::Terminal(Terminal(0))];
    &MEMBERS
  }
  fn nonterminal_productions(&self, _nonterminal: Nonterminal) -> &[u32] {
    static PRODUCTIONS: [u32; 1] = [0];
    &PRODUCTIONS
  }
}

/// DFA for `-?\d+(\.\d+)?`, state 0 the start state. Digit ranges are
/// encoded as `'0'..':'` (the half-open range whose only members are
/// `'0'`..=`'9'`, since `':'` is the next code point after `'9'`) to match
/// [`farkle_runtime::DFAEdge`]'s exclusive-end convention.
pub fn json_number_dfa() -> Vec<DFAState> {
  let number = || Some(DFASymbol::Terminal { id: Terminal(0), name: "Number".into() });
  vec![
    // 0: start
    DFAState {
      edges: vec![DFAEdge { range: '-'..'.', next_state: Some(1) }, DFAEdge { range: '0'..':', next_state: Some(2) }],
      anything_else: None,
      accept_symbol: None,
    },
    // 1: after a leading '-'
    DFAState { edges: vec![DFAEdge { range: '0'..':', next_state: Some(2) }], anything_else: None, accept_symbol: None },
    // 2: accepting integer part
    DFAState {
      edges: vec![DFAEdge { range: '0'..':', next_state: Some(2) }, DFAEdge { range: '.'..'/', next_state: Some(3) }],
      anything_else: None,
      accept_symbol: number(),
    },
    // 3: after '.', not yet accepting
    DFAState { edges: vec![DFAEdge { range: '0'..':', next_state: Some(4) }], anything_else: None, accept_symbol: None },
    // 4: accepting fractional part
    DFAState { edges: vec![DFAEdge { range: '0'..':', next_state: Some(4) }], anything_else: None, accept_symbol: number() },
  ]
}

/// `S' -> S`, `S -> ( S ) | ε` — scenario 2, "balanced parens".
pub struct BalancedParensGrammar;

impl AbstractSyntaxProvider for BalancedParensGrammar {
  fn terminal_count(&self) -> usize { 2 }
  fn nonterminal_count(&self) -> usize { 2 }
  fn production_count(&self) -> usize { 3 }
  fn start_production(&self) -> u32 { 0 }
  fn end_symbol(&self) -> Terminal { Terminal(2) }
  fn production_head(&self, production: u32) -> Nonterminal {
    if production == 0 { Nonterminal(0) } else { Nonterminal(1) }
  }
  fn production_members(&self, production: u32) -> &[Symbol] {
    static START: [Symbol; 1] = [Symbol::Nonterminal(Nonterminal(1))];
    static WRAPPED: [Symbol; 3] =
      [Symbol::Terminal(Terminal(0)), Symbol::Nonterminal(Nonterminal(1)), Symbol::Terminal(Terminal(1))];
    static EMPTY: [Symbol; 0] = [];
    match production {
      0 => &START,
      1 => &WRAPPED,
      _ => &EMPTY,
    }
  }
  fn nonterminal_productions(&self, nonterminal: Nonterminal) -> &[u32] {
    static FIRST: [u32; 1] = [0];
    static S: [u32; 2] = [1, 2];
    if nonterminal.0 == 0 { &FIRST } else { &S }
  }
}

pub fn balanced_parens_dfa() -> Vec<DFAState> {
  vec![
    DFAState {
      edges: vec![
        DFAEdge { range: '('..')', next_state: Some(1) },
        DFAEdge { range: ')'..'*', next_state: Some(2) },
      ],
      anything_else: None,
      accept_symbol: None,
    },
    DFAState { edges: vec![], anything_else: None, accept_symbol: Some(DFASymbol::Terminal { id: Terminal(0), name: "(".into() }) },
    DFAState { edges: vec![], anything_else: None, accept_symbol: Some(DFASymbol::Terminal { id: Terminal(1), name: ")".into() }) },
  ]
}

/// `S' -> S`, `S -> id id` — scenario 3, "line comment group". `id` is a
/// single lowercase letter for brevity; the group is the interesting part.
pub struct LineCommentGrammar;

impl AbstractSyntaxProvider for LineCommentGrammar {
  fn terminal_count(&self) -> usize { 1 }
  fn nonterminal_count(&self) -> usize { 2 }
  fn production_count(&self) -> usize { 2 }
  fn start_production(&self) -> u32 { 0 }
  fn end_symbol(&self) -> Terminal { Terminal(1) }
  fn production_head(&self, production: u32) -> Nonterminal {
    if production == 0 { Nonterminal(0) } else { Nonterminal(1) }
  }
  fn production_members(&self, production: u32) -> &[Symbol] {
    static START: [Symbol; 1] = [Symbol::Nonterminal(Nonterminal(1))];
    static BODY: [Symbol; 2] = [Symbol::Terminal(Terminal(0)), Symbol::Terminal(Terminal(0))];
    if production == 0 { &START } else { &BODY }
  }
  fn nonterminal_productions(&self, nonterminal: Nonterminal) -> &[u32] {
    static FIRST: [u32; 1] = [0];
    static SECOND: [u32; 1] = [1];
    if nonterminal.0 == 0 { &FIRST } else { &SECOND }
  }
}

/// DFA recognizing a single lowercase letter as `id`, or the two-character
/// literal `//` as the line comment's group start.
pub fn line_comment_dfa() -> Vec<DFAState> {
  vec![
    // 0: start
    DFAState {
      edges: vec![
        DFAEdge { range: 'a'..'{', next_state: Some(1) },
        DFAEdge { range: '/'..'0', next_state: Some(2) },
      ],
      anything_else: None,
      accept_symbol: None,
    },
    // 1: accepting id
    DFAState { edges: vec![], anything_else: None, accept_symbol: Some(DFASymbol::Terminal { id: Terminal(0), name: "id".into() }) },
    // 2: after one '/'
    DFAState { edges: vec![DFAEdge { range: '/'..'0', next_state: Some(3) }], anything_else: None, accept_symbol: None },
    // 3: accepting the "//" group start
    DFAState {
      edges: vec![],
      anything_else: None,
      accept_symbol: Some(DFASymbol::GroupStart { literal: "//".into(), group_index: 0 }),
    },
  ]
}

pub fn line_comment_groups() -> Vec<Group> {
  vec![Group {
    index: 0,
    start_literal: "//".into(),
    end: GroupEnd::Newline,
    container: DFASymbol::Noise { name: "line_comment".into() },
    nesting: vec![],
    advance_mode: GroupAdvanceMode::Character,
    ending_mode: GroupEndingMode::Open,
    is_ended_by_newline: true,
  }]
}

/// `S' -> S`, `S -> x` — scenario 4, "nested block comment". The group
/// nests into itself, so `/* /* inner */ outer */` closes cleanly.
pub struct BlockCommentGrammar;

impl AbstractSyntaxProvider for BlockCommentGrammar {
  fn terminal_count(&self) -> usize { 1 }
  fn nonterminal_count(&self) -> usize { 2 }
  fn production_count(&self) -> usize { 2 }
  fn start_production(&self) -> u32 { 0 }
  fn end_symbol(&self) -> Terminal { Terminal(1) }
  fn production_head(&self, production: u32) -> Nonterminal {
    if production == 0 { Nonterminal(0) } else { Nonterminal(1) }
  }
  fn production_members(&self, production: u32) -> &[Symbol] {
    static START: [Symbol; 1] = [Symbol::Nonterminal(Nonterminal(1))];
    static BODY: [Symbol; 1] = [Symbol::Terminal(Terminal(0))];
    if production == 0 { &START } else { &BODY }
  }
  fn nonterminal_productions(&self, nonterminal: Nonterminal) -> &[u32] {
    static FIRST: [u32; 1] = [0];
    static SECOND: [u32; 1] = [1];
    if nonterminal.0 == 0 { &FIRST } else { &SECOND }
  }
}

pub fn block_comment_dfa() -> Vec<DFAState> {
  vec![
    // 0: start
    DFAState {
      edges: vec![
        DFAEdge { range: 'x'..'y', next_state: Some(1) },
        DFAEdge { range: '/'..'0', next_state: Some(2) },
      ],
      anything_else: None,
      accept_symbol: None,
    },
    // 1: accepting x
    DFAState { edges: vec![], anything_else: None, accept_symbol: Some(DFASymbol::Terminal { id: Terminal(0), name: "x".into() }) },
    // 2: after '/'
    DFAState { edges: vec![DFAEdge { range: '*'..'+', next_state: Some(3) }], anything_else: None, accept_symbol: None },
    // 3: accepting the "/*" group start
    DFAState {
      edges: vec![],
      anything_else: None,
      accept_symbol: Some(DFASymbol::GroupStart { literal: "/*".into(), group_index: 0 }),
    },
  ]
}

pub fn block_comment_groups() -> Vec<Group> {
  vec![Group {
    index: 0,
    start_literal: "/*".into(),
    end: GroupEnd::Literal("*/".into()),
    container: DFASymbol::Noise { name: "block_comment".into() },
    nesting: vec![0],
    advance_mode: GroupAdvanceMode::Character,
    ending_mode: GroupEndingMode::Closed,
    is_ended_by_newline: false,
  }]
}

/// `E' -> E`, `E -> E + E | E * E | n` — scenario 5, "shift/reduce by
/// precedence". Terminals: 0 = `+`, 1 = `*`, 2 = `n`.
pub struct PrecedenceGrammar;

impl AbstractSyntaxProvider for PrecedenceGrammar {
  fn terminal_count(&self) -> usize { 3 }
  fn nonterminal_count(&self) -> usize { 2 }
  fn production_count(&self) -> usize { 4 }
  fn start_production(&self) -> u32 { 0 }
  fn end_symbol(&self) -> Terminal { Terminal(3) }
  fn production_head(&self, production: u32) -> Nonterminal {
    if production == 0 { Nonterminal(0) } else { Nonterminal(1) }
  }
  fn production_members(&self, production: u32) -> &[Symbol] {
    static START: [Symbol; 1] = [Symbol::Nonterminal(Nonterminal(1))];
    static PLUS: [Symbol; 3] = [Symbol::Nonterminal(Nonterminal(1)), Symbol::Terminal(Terminal(0)), Symbol::Nonterminal(Nonterminal(1))];
    static STAR: [Symbol; 3] = [Symbol::Nonterminal(Nonterminal(1)), Symbol::Terminal(Terminal(1)), Symbol::Nonterminal(Nonterminal(1))];
    static N: [Symbol; 1] = [Symbol::Terminal(Terminal(2))];
    match production {
      0 => &START,
      1 => &PLUS,
      2 => &STAR,
      _ => &N,
    }
  }
  fn nonterminal_productions(&self, nonterminal: Nonterminal) -> &[u32] {
    static FIRST: [u32; 1] = [0];
    static E: [u32; 3] = [1, 2, 3];
    if nonterminal.0 == 0 { &FIRST } else { &E }
  }
}

pub fn precedence_dfa() -> Vec<DFAState> {
  vec![DFAState {
    edges: vec![
      DFAEdge { range: '+'..',', next_state: Some(1) },
      DFAEdge { range: '*'..'+', next_state: Some(2) },
      DFAEdge { range: '0'..':', next_state: Some(3) },
    ],
    anything_else: None,
    accept_symbol: None,
  },
  DFAState { edges: vec![], anything_else: None, accept_symbol: Some(DFASymbol::Terminal { id: Terminal(0), name: "+".into() }) },
  DFAState { edges: vec![], anything_else: None, accept_symbol: Some(DFASymbol::Terminal { id: Terminal(1), name: "*".into() }) },
  DFAState { edges: vec![], anything_else: None, accept_symbol: Some(DFASymbol::Terminal { id: Terminal(2), name: "n".into() }) }]
}

/// `S' -> S`, `S -> id id` — scenario 6, "CRLF line counting". Shares the
/// shape of [`LineCommentGrammar`] but without the group, so the only
/// thing under test is position tracking across a `\r\n` pair.
pub struct CrlfGrammar;

impl AbstractSyntaxProvider for CrlfGrammar {
  fn terminal_count(&self) -> usize { 1 }
  fn nonterminal_count(&self) -> usize { 2 }
  fn production_count(&self) -> usize { 2 }
  fn start_production(&self) -> u32 { 0 }
  fn end_symbol(&self) -> Terminal { Terminal(1) }
  fn production_head(&self, production: u32) -> Nonterminal {
    if production == 0 { Nonterminal(0) } else { Nonterminal(1) }
  }
  fn production_members(&self, production: u32) -> &[Symbol] {
    static START: [Symbol; 1] = [Symbol::Nonterminal(Nonterminal(1))];
    static BODY: [Symbol; 2] = [Symbol::Terminal(Terminal(0)), Symbol::Terminal(Terminal(0))];
    if production == 0 { &START } else { &BODY }
  }
  fn nonterminal_productions(&self, nonterminal: Nonterminal) -> &[u32] {
    static FIRST: [u32; 1] = [0];
    static SECOND: [u32; 1] = [1];
    if nonterminal.0 == 0 { &FIRST } else { &SECOND }
  }
}

pub fn crlf_dfa() -> Vec<DFAState> {
  vec![
    DFAState {
      edges: vec![DFAEdge { range: 'a'..'{', next_state: Some(1) }],
      anything_else: None,
      accept_symbol: None,
    },
    DFAState { edges: vec![], anything_else: None, accept_symbol: Some(DFASymbol::Terminal { id: Terminal(0), name: "id".into() }) },
  ]
}
