//! Character-level scanner.
//!
//! The scanner is a small state machine: [`step`] consumes one character and
//! returns the next state together with a completed component, if the
//! character closed one. Components are raw text; turning them into
//! [`Token`](crate::Token)s is the tokenizer's job.

/// Scanner state between two characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanState {
    /// Text of the component being built.
    pub accumulator: String,
    /// Inside a `"…"` literal outside any bracket region.
    pub in_quote: bool,
    /// Inside a `[…]` region.
    pub in_bracket: bool,
    /// Nesting depth of `[…]`.
    pub bracket_level: usize,
    /// Inside a `"…"` literal within a bracket region; brackets are literal.
    pub quote_in_bracket: bool,
}

impl ScanState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spaces are part of the component rather than separators.
    pub fn expects_space(&self) -> bool {
        self.in_quote || self.in_bracket
    }

    /// The accumulator holds a finished `"…"` literal.
    fn holds_complete_quote(&self) -> bool {
        self.accumulator.len() > 1
            && self.accumulator.starts_with('"')
            && self.accumulator.ends_with('"')
    }

    fn flush(&mut self) -> Option<String> {
        if self.accumulator.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.accumulator))
        }
    }

    /// Completes the component left over at the end of input.
    pub fn finish(mut self) -> Option<String> {
        self.flush()
    }
}

/// Advances the scanner by one character.
pub fn step(mut state: ScanState, ch: char) -> (ScanState, Option<String>) {
    let component = match ch {
        '"' if state.in_bracket => {
            state.accumulator.push(ch);
            state.quote_in_bracket = !state.quote_in_bracket;
            None
        }
        '"' => {
            state.accumulator.push(ch);
            if state.in_quote && state.holds_complete_quote() {
                state.in_quote = false;
                state.flush()
            } else {
                state.in_quote = !state.in_quote;
                None
            }
        }
        '[' if state.in_quote || state.quote_in_bracket => {
            state.accumulator.push(ch);
            None
        }
        '[' => {
            state.bracket_level += 1;
            state.in_bracket = true;
            state.accumulator.push(ch);
            None
        }
        ']' if state.in_bracket && !state.quote_in_bracket => {
            state.accumulator.push(ch);
            state.bracket_level -= 1;
            if state.bracket_level == 0 {
                state.in_bracket = false;
                state.flush()
            } else {
                None
            }
        }
        ' ' if state.expects_space() => {
            state.accumulator.push(ch);
            None
        }
        ' ' => state.flush(),
        // `:` included: it marks a keyword but never ends a component
        _ => {
            state.accumulator.push(ch);
            None
        }
    };
    (state, component)
}
