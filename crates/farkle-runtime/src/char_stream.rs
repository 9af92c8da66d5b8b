//! Buffered, rewindable character stream (C2). A `CharStream` owns either a
//! contiguous immutable buffer or a growable window fed by a pull-based
//! reader, and exposes the pinning/expand/advance operations §4.1
//! describes.

use std::any::Any;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::position::{Position, PositionTracker};

/// Failure modes specific to the character stream. Reader I/O errors
/// surface through this type; callers typically fold them into
/// `FarkleError::ParseError` at the driver boundary.
#[derive(Debug, thiserror::Error)]
pub enum CharStreamError {
  #[error("offset {offset} is out of bounds (resident through {buffered_end})")]
  OffsetOutOfBounds { offset: usize, buffered_end: usize },

  #[error("stream was already closed")]
  StreamClosed,

  #[error("reader I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("input was not valid UTF-8")]
  InvalidUtf8,
}

/// Anything that can be turned into a [`CharStream`]. Implemented for the
/// four input shapes `Parser::parse` accepts (§6): a string, an in-memory
/// char slice, a reader, or a file path.
pub trait ParserInput {
  fn into_char_stream(self) -> Result<CharStream, CharStreamError>;
}

impl ParserInput for &str {
  fn into_char_stream(self) -> Result<CharStream, CharStreamError> {
    Ok(CharStream::from_static(self.chars().collect()))
  }
}

impl ParserInput for String {
  fn into_char_stream(self) -> Result<CharStream, CharStreamError> {
    Ok(CharStream::from_static(self.chars().collect()))
  }
}

impl ParserInput for &[char] {
  fn into_char_stream(self) -> Result<CharStream, CharStreamError> {
    Ok(CharStream::from_static(self.to_vec()))
  }
}

impl ParserInput for &Path {
  fn into_char_stream(self) -> Result<CharStream, CharStreamError> {
    let file = std::fs::File::open(self)?;
    Ok(CharStream::from_reader(Box::new(file), false))
  }
}

/// A boxed reader plus the bookkeeping a growable window needs: how much of
/// the reader has been decoded into `window`, and whether the reader should
/// be released (dropped) when the stream is disposed.
struct DynamicSource {
  reader:     Option<Box<dyn Read>>,
  leave_open: bool,
  /// UTF-8 bytes read from `reader` but not yet decoded into whole
  /// characters (a partial multi-byte sequence at the end of a read).
  pending_bytes: Vec<u8>,
  exhausted:  bool,
}

enum Source {
  /// A fully-resident, read-only slice: `buffered_end` is always its
  /// length and `try_expand_past_offset` is a pure bounds check.
  Static,
  Dynamic(DynamicSource),
}

/// Owns a per-parse character input. Invariants this type upholds:
/// `starting_index <= current_index <=
/// buffered_end`, with everything in `[starting_index, buffered_end)`
/// resident and everything before `starting_index` eligible for reclaim.
pub struct CharStream {
  source:          Source,
  /// The resident character window. For `Source::Static` this holds the
  /// entire input; for `Source::Dynamic` it holds only
  /// `[window_start, window_start + buffer.len())`.
  buffer:          Vec<char>,
  /// Global index of `buffer[0]`. Always `0` for `Source::Static`.
  window_start:    usize,
  starting_index:  usize,
  current_index:   usize,
  /// Global index one past the last resident character.
  buffered_end:    usize,
  tracker:         PositionTracker,
  token_start_pos: Position,
  object_store:    Option<HashMap<String, Box<dyn Any>>>,
  closed:          bool,
}

impl CharStream {
  pub fn from_static(chars: Vec<char>) -> Self {
    let len = chars.len();
    Self {
      source:          Source::Static,
      buffer:          chars,
      window_start:    0,
      starting_index:  0,
      current_index:   0,
      buffered_end:    len,
      tracker:         PositionTracker::new(),
      token_start_pos: Position::START,
      object_store:    None,
      closed:          false,
    }
  }

  pub fn from_reader(reader: Box<dyn Read>, leave_open: bool) -> Self {
    Self {
      source: Source::Dynamic(DynamicSource {
        reader: Some(reader),
        leave_open,
        pending_bytes: Vec::new(),
        exhausted: false,
      }),
      buffer: Vec::new(),
      window_start: 0,
      starting_index: 0,
      current_index: 0,
      buffered_end: 0,
      tracker: PositionTracker::new(),
      token_start_pos: Position::START,
      object_store: None,
      closed: false,
    }
  }

  /// The per-parse, string-keyed scratch store a post-processor's
  /// `TransformContext` exposes (§9 "Hidden mutable object-store"),
  /// lazily created on first use and cleared when the stream is dropped.
  pub fn object_store(&mut self) -> &mut HashMap<String, Box<dyn Any>> {
    self.object_store.get_or_insert_with(HashMap::new)
  }

  pub fn current_position(&self) -> Position {
    self.tracker.position()
  }

  pub fn token_start_position(&self) -> Position {
    self.token_start_pos
  }

  /// Ensures the character at `current_index + offset` is resident.
  /// Returns `false` iff input ends before that point.
  pub fn try_expand_past_offset(&mut self, offset: usize) -> Result<bool, CharStreamError> {
    if self.closed {
      return Err(CharStreamError::StreamClosed);
    }

    let target = self.current_index + offset;

    match &mut self.source {
      Source::Static => Ok(target < self.buffered_end),
      Source::Dynamic(dynamic) => {
        while target >= self.buffered_end {
          if dynamic.exhausted {
            return Ok(false);
          }
          Self::pull_more(dynamic, &mut self.buffer, &mut self.window_start, self.starting_index, &mut self.buffered_end)?;
        }
        Ok(true)
      }
    }
  }

  /// Reads one more chunk from the reader, compacting the resident window
  /// (dropping everything before `starting_index`) before growing it if
  /// there is little free capacity, reusing allocated capacity before
  /// doubling it.
  fn pull_more(
    dynamic: &mut DynamicSource,
    buffer: &mut Vec<char>,
    window_start: &mut usize,
    starting_index: usize,
    buffered_end: &mut usize,
  ) -> Result<(), CharStreamError> {
    if starting_index > *window_start {
      let drop_count = starting_index - *window_start;
      buffer.drain(0..drop_count);
      *window_start = starting_index;
    } else if buffer.capacity() == buffer.len() {
      buffer.reserve(buffer.capacity().max(256));
    }

    let reader = dynamic.reader.as_mut().ok_or(CharStreamError::StreamClosed)?;
    let mut chunk = vec![0u8; 4096];
    let bytes_read = reader.read(&mut chunk)?;

    if bytes_read == 0 {
      dynamic.exhausted = true;
      if !dynamic.pending_bytes.is_empty() {
        return Err(CharStreamError::InvalidUtf8);
      }
      return Ok(());
    }

    dynamic.pending_bytes.extend_from_slice(&chunk[..bytes_read]);

    let (decoded, consumed) = decode_utf8_prefix(&dynamic.pending_bytes)?;
    buffer.extend(decoded);
    dynamic.pending_bytes.drain(0..consumed);
    *buffered_end = *window_start + buffer.len();

    Ok(())
  }

  /// All resident characters from `current_index` onward.
  pub fn character_buffer(&self) -> &[char] {
    let local_start = self.current_index - self.window_start;
    &self.buffer[local_start..]
  }

  /// Valid only when `[start_index, start_index + length)` is resident.
  pub fn span_for_range(&self, start_index: usize, length: usize) -> &[char] {
    let local_start = start_index - self.window_start;
    &self.buffer[local_start..local_start + length]
  }

  /// Peek-only projection of the tracker `offset` characters ahead of
  /// `current_index`; does not mutate the stream.
  pub fn get_position_at_offset(&self, offset: usize) -> Position {
    let local_start = self.current_index - self.window_start;
    self.tracker.peek_ahead(self.buffer[local_start..local_start + offset].iter().copied())
  }

  /// Moves `current_index` forward by `count` positions, which must
  /// already be resident. If `unpin` is `true`, `starting_index` is
  /// advanced to match, freeing the characters before it for the next
  /// compaction.
  pub fn advance_by(&mut self, count: usize, unpin: bool) {
    let local_start = self.current_index - self.window_start;
    let span = &self.buffer[local_start..local_start + count];
    self.tracker.advance_span(span.iter().copied());
    self.current_index += count;
    if unpin {
      self.starting_index = self.current_index;
    }
  }

  pub fn starting_index(&self) -> usize {
    self.starting_index
  }

  pub fn current_index(&self) -> usize {
    self.current_index
  }

  /// Invokes `transform` over the span consumed since the last
  /// `create_token` (or the start of the parse), then resets
  /// `starting_index` to `current_index`. Must be called at most once per
  /// token.
  pub fn create_token<T>(&mut self, mut transform: impl FnMut(&[char], Position, Position) -> T) -> T {
    let span = self.span_for_range(self.starting_index, self.current_index - self.starting_index);
    let result = transform(span, self.token_start_pos, self.tracker.position());
    self.starting_index = self.current_index;
    self.token_start_pos = self.tracker.position();
    result
  }
}

impl Drop for CharStream {
  fn drop(&mut self) {
    self.closed = true;
    if let Source::Dynamic(dynamic) = &mut self.source {
      if !dynamic.leave_open {
        dynamic.reader.take();
      }
    }
    self.object_store.take();
  }
}

/// Decodes as many whole UTF-8 characters as possible from the front of
/// `bytes`, returning them along with the number of bytes consumed. Any
/// trailing partial multi-byte sequence is left for the next read.
fn decode_utf8_prefix(bytes: &[u8]) -> Result<(Vec<char>, usize), CharStreamError> {
  match std::str::from_utf8(bytes) {
    Ok(text) => Ok((text.chars().collect(), bytes.len())),
    Err(err) => {
      let valid_len = err.valid_up_to();
      if err.error_len().is_some() {
        return Err(CharStreamError::InvalidUtf8);
      }
      let text = std::str::from_utf8(&bytes[..valid_len]).map_err(|_| CharStreamError::InvalidUtf8)?;
      Ok((text.chars().collect(), valid_len))
    }
  }
}
