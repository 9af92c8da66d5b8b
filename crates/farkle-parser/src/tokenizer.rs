//! DFA runner + lexical group state machine (C6): returns one [`Token`] per
//! call to [`Tokenizer::next_token`], per the classification table in §4.2.

use farkle_core::grammar::Grammar;
use farkle_runtime::{
  CharStream,
  CharStreamError,
  DFASymbol,
  FarkleError,
  GroupAdvanceMode,
  GroupEnd,
  GroupEndingMode,
  ParseErrorKind,
  Position,
  Token,
};

use crate::post_processor::PostProcessor;

/// DFA runner + group stack over one [`CharStream`]. Holds no state between
/// parses beyond the group stack, which always returns to empty at EOF on
/// a well-formed input (an unclosed group is a fatal lexical error, never a
/// silently-dropped one).
pub struct Tokenizer {
  group_stack: Vec<usize>,
}

enum Step<V> {
  Continue,
  Emit(Token<V>),
}

impl Tokenizer {
  pub fn new() -> Self {
    Self { group_stack: Vec::new() }
  }

  /// Lexes and returns the next token, invoking `post_processor.transform`
  /// exactly once per emitted (non-noise) token.
  pub fn next_token<PP: PostProcessor>(
    &mut self,
    stream: &mut CharStream,
    grammar: &Grammar,
    post_processor: &mut PP,
  ) -> Result<Token<PP::Value>, FarkleError> {
    loop {
      let in_character_mode_group =
        self.group_stack.last().map(|&g| grammar.groups[g].advance_mode == GroupAdvanceMode::Character).unwrap_or(false);

      let step = if in_character_mode_group {
        self.step_character_mode_group(stream, grammar, post_processor)?
      } else {
        self.step_dfa(stream, grammar, post_processor)?
      };

      match step {
        Step::Continue => continue,
        Step::Emit(token) => return Ok(token),
      }
    }
  }

  fn step_dfa<PP: PostProcessor>(
    &mut self,
    stream: &mut CharStream,
    grammar: &Grammar,
    post_processor: &mut PP,
  ) -> Result<Step<PP::Value>, FarkleError> {
    let position = stream.current_position();
    let scan = run_dfa(stream, grammar, position)?;

    let Some((length, symbol)) = scan else {
      if !resident(stream, 0, position)? {
        return self.on_end_of_input(stream, grammar, post_processor, position);
      }
      let bad_char = stream.character_buffer()[0];
      return Err(FarkleError::ParseError { position, kind: ParseErrorKind::LexicalError(bad_char) });
    };

    self.apply_classification(stream, grammar, post_processor, length, symbol, position)
  }

  /// Applies §4.2's classification table for one DFA-matched lexeme, given
  /// whether we're outside any group or inside the top group's Token-mode
  /// re-entry.
  fn apply_classification<PP: PostProcessor>(
    &mut self,
    stream: &mut CharStream,
    grammar: &Grammar,
    post_processor: &mut PP,
    length: usize,
    symbol: DFASymbol,
    position: Position,
  ) -> Result<Step<PP::Value>, FarkleError> {
    let inside_group = self.group_stack.last().copied();

    match symbol {
      DFASymbol::Terminal { id, .. } => {
        if inside_group.is_some() {
          // Advance by the token's length, appending it to the group's
          // (implicitly pinned) draft span.
          stream.advance_by(length, false);
          Ok(Step::Continue)
        } else {
          stream.advance_by(length, false);
          let value = stream.create_token(|span, start, _end| post_processor.transform(id, span, start));
          Ok(Step::Emit(Token { position, symbol: id, data: value, is_eof: false }))
        }
      }

      DFASymbol::Noise { .. } => {
        // Outside a group, noise is immediately reclaimable. Inside one,
        // the pin must hold until the group's container token is created.
        stream.advance_by(length, inside_group.is_none());
        Ok(Step::Continue)
      }

      DFASymbol::GroupStart { group_index, .. } => {
        match inside_group {
          Some(parent_index) if grammar.groups[parent_index].nesting.contains(&group_index) => {
            stream.advance_by(length, false);
            self.group_stack.push(group_index);
          }
          Some(_) => {
            // Not a permitted nesting here: just more content of the
            // enclosing group.
            stream.advance_by(length, false);
          }
          None => {
            let unpin = grammar.groups[group_index].container_is_noise();
            stream.advance_by(length, unpin);
            self.group_stack.push(group_index);
          }
        }
        Ok(Step::Continue)
      }

      DFASymbol::GroupEnd { literal } => {
        let Some(group_index) = inside_group else {
          return Err(FarkleError::ParseError { position, kind: ParseErrorKind::UnexpectedGroupEnd(literal) });
        };

        let closes_current_group = matches!(&grammar.groups[group_index].end, GroupEnd::Literal(text) if *text == literal);
        if !closes_current_group {
          stream.advance_by(length, false);
          return Ok(Step::Continue);
        }

        self.close_top_group(stream, grammar, post_processor, length, position)
      }
    }
  }

  fn close_top_group<PP: PostProcessor>(
    &mut self,
    stream: &mut CharStream,
    grammar: &Grammar,
    post_processor: &mut PP,
    end_literal_len: usize,
    position: Position,
  ) -> Result<Step<PP::Value>, FarkleError> {
    let group_index = self.group_stack.pop().expect("close_top_group called with a non-empty group stack");
    let group = &grammar.groups[group_index];

    if group.ending_mode == GroupEndingMode::Closed {
      let unpin = self.group_stack.is_empty() && group.container_is_noise();
      stream.advance_by(end_literal_len, unpin);
    }
    // Open: leave the end literal for the containing context to see again.

    self.finish_group_if_outermost(stream, grammar, post_processor, group_index, position)
  }

  fn finish_group_if_outermost<PP: PostProcessor>(
    &mut self,
    stream: &mut CharStream,
    grammar: &Grammar,
    post_processor: &mut PP,
    group_index: usize,
    position: Position,
  ) -> Result<Step<PP::Value>, FarkleError> {
    if !self.group_stack.is_empty() {
      return Ok(Step::Continue);
    }

    match grammar.groups[group_index].container.clone() {
      DFASymbol::Terminal { id, .. } => {
        let value = stream.create_token(|span, start, _end| post_processor.transform(id, span, start));
        Ok(Step::Emit(Token { position, symbol: id, data: value, is_eof: false }))
      }
      DFASymbol::Noise { .. } => {
        stream.create_token(|_, _, _| ());
        Ok(Step::Continue)
      }
      other => unreachable!("group container must be Terminal or Noise, got {other:?}"),
    }
  }

  fn on_end_of_input<PP: PostProcessor>(
    &mut self,
    stream: &mut CharStream,
    grammar: &Grammar,
    post_processor: &mut PP,
    position: Position,
  ) -> Result<Step<PP::Value>, FarkleError> {
    let Some(&group_index) = self.group_stack.last() else {
      let data = post_processor.eof();
      return Ok(Step::Emit(Token { position, symbol: grammar.end_symbol, data, is_eof: true }));
    };

    if grammar.groups[group_index].is_ended_by_newline {
      self.group_stack.pop();
      return self.finish_group_if_outermost(stream, grammar, post_processor, group_index, position);
    }

    Err(FarkleError::ParseError {
      position,
      kind: ParseErrorKind::UnexpectedEndOfInputInGroup(format!("group {group_index}")),
    })
  }

  /// The character-mode group inner loop (§4.2): skip ahead via the
  /// group's precomputed scan alphabet instead of re-entering the DFA per
  /// character.
  fn step_character_mode_group<PP: PostProcessor>(
    &mut self,
    stream: &mut CharStream,
    grammar: &Grammar,
    post_processor: &mut PP,
  ) -> Result<Step<PP::Value>, FarkleError> {
    let group_index = *self.group_stack.last().expect("only called with a non-empty group stack");
    let position = stream.current_position();

    if !resident(stream, 0, position)? {
      return self.on_end_of_input(stream, grammar, post_processor, position);
    }

    let group = &grammar.groups[group_index];
    let scan = grammar.optimized.group_scan(group_index);
    let haystack = stream.character_buffer();
    let boundary = scan.scan(haystack);

    if boundary == haystack.len() {
      // Nothing interesting in the resident window yet; force the stream
      // to pull more input (or discover EOF) before trying again.
      if !resident(stream, haystack.len(), position)? {
        return self.on_end_of_input(stream, grammar, post_processor, position);
      }
      return Ok(Step::Continue);
    }

    if boundary > 0 {
      stream.advance_by(boundary, false);
    }

    let haystack = stream.character_buffer();
    if matches!(&group.end, GroupEnd::Newline) && haystack.first() == Some(&'\n') {
      stream.advance_by(1, true);
      self.group_stack.pop();
      return self.finish_group_if_outermost(stream, grammar, post_processor, group_index, position);
    }

    if let GroupEnd::Literal(end_literal) = &group.end {
      if matches_literal_at(haystack, 0, end_literal) {
        return self.close_top_group(stream, grammar, post_processor, end_literal.chars().count(), position);
      }
    }

    for &nested_index in &group.nesting {
      let start_literal = grammar.groups[nested_index].start_literal.clone();
      if matches_literal_at(haystack, 0, &start_literal) {
        stream.advance_by(start_literal.chars().count(), false);
        self.group_stack.push(nested_index);
        return Ok(Step::Continue);
      }
    }

    // A false positive from the scan alphabet: not actually a boundary.
    // Treat the one character as ordinary content and keep scanning.
    stream.advance_by(1, false);
    Ok(Step::Continue)
  }
}

impl Default for Tokenizer {
  fn default() -> Self {
    Self::new()
  }
}

fn matches_literal_at(haystack: &[char], start: usize, literal: &str) -> bool {
  let needle: Vec<char> = literal.chars().collect();
  start + needle.len() <= haystack.len() && haystack[start..start + needle.len()] == needle[..]
}

fn resident(stream: &mut CharStream, offset: usize, position: Position) -> Result<bool, FarkleError> {
  stream.try_expand_past_offset(offset).map_err(|err| io_error(err, position))
}

fn io_error(err: CharStreamError, position: Position) -> FarkleError {
  FarkleError::ParseError { position, kind: ParseErrorKind::UserError(err.to_string()) }
}

/// Runs the DFA from state 0, tracking the last accepting state seen.
/// Returns `None` if no acceptance was ever seen — a lexical error, unless
/// input had already ended.
fn run_dfa(stream: &mut CharStream, grammar: &Grammar, position: Position) -> Result<Option<(usize, DFASymbol)>, FarkleError> {
  let mut state = 0u32;
  let mut offset = 0usize;
  let mut last_accept: Option<(usize, DFASymbol)> = None;

  loop {
    if !resident(stream, offset, position)? {
      break;
    }

    let ch = stream.character_buffer()[offset];
    let next = if ch.is_ascii() {
      grammar.optimized.ascii_next_state(state, ch as u8)
    } else {
      non_ascii_next_state(grammar, state, ch)
    };

    let Some(next_state) = next else { break };
    state = next_state;
    offset += 1;

    if let Some(symbol) = &grammar.dfa_states[state as usize].accept_symbol {
      last_accept = Some((offset, symbol.clone()));
    }
  }

  Ok(last_accept)
}

fn non_ascii_next_state(grammar: &Grammar, state: u32, ch: char) -> Option<u32> {
  let dfa_state = &grammar.dfa_states[state as usize];
  dfa_state.edges.iter().find(|edge| edge.range.contains(&ch)).and_then(|edge| edge.next_state).or(dfa_state.anything_else)
}
