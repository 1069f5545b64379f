// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tokenization of the state machine DSL.
//!
//! Two interchangeable lexers produce the same token stream: [`FsmLexer`], a
//! streaming character automaton, and [`pattern::PatternLexer`], a regex-driven
//! line lexer. Both push tokens into a [`TokenCollector`] as they are found;
//! nothing is buffered and lexing never fails, malformed characters become
//! `error` callbacks.

pub mod pattern;

#[cfg(test)]
mod tests;

/// Sink for the token stream. The parser implements this.
///
/// `line` is 1-based. `pos` is the column the token starts at; see each lexer
/// for its column convention.
pub trait TokenCollector {
    fn open_brace(&mut self, line: i32, pos: i32);
    fn closed_brace(&mut self, line: i32, pos: i32);
    fn open_paren(&mut self, line: i32, pos: i32);
    fn closed_paren(&mut self, line: i32, pos: i32);
    fn open_angle(&mut self, line: i32, pos: i32);
    fn closed_angle(&mut self, line: i32, pos: i32);
    fn dash(&mut self, line: i32, pos: i32);
    fn colon(&mut self, line: i32, pos: i32);
    fn name(&mut self, name: &str, line: i32, pos: i32);
    fn error(&mut self, line: i32, pos: i32);
}

pub trait Lexer {
    fn lex(&mut self, input: &str, collector: &mut dyn TokenCollector);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    NewToken,
    Name,
    Slash,
    Comment,
    Eof,
}

/// Streaming lexer: one pass over the characters, a handful of states.
///
/// Single-character tokens are emitted at their 1-based column. A name token
/// is emitted when the first non-name character arrives, at the column of its
/// first character, and that terminating character is then re-dispatched so
/// `fsm:fsm` lexes as name, colon, name. End of input is modeled as a
/// synthetic NUL so a trailing name still flushes.
pub struct FsmLexer {
    state: LexState,
    line: i32,
    line_pos: i32,
    total_pos: usize,
    name_start: usize,
    name_col: i32,
}

impl FsmLexer {
    pub fn new() -> Self {
        Self {
            state: LexState::NewToken,
            line: 1,
            line_pos: 0,
            total_pos: 0,
            name_start: 0,
            name_col: 0,
        }
    }

    fn is_name_char(ch: char) -> bool {
        ch.is_alphanumeric() || ch == '_'
    }

    fn handle_event(&mut self, input: &str, event: char, collector: &mut dyn TokenCollector) {
        match self.state {
            LexState::NewToken => self.new_token_event(event, collector),
            LexState::Name => self.name_event(input, event, collector),
            LexState::Slash => match event {
                '/' => {
                    self.state = LexState::Comment;
                    self.line_pos += 1;
                }
                _ => self.error_event(collector),
            },
            LexState::Comment => match event {
                '\n' => {
                    self.state = LexState::NewToken;
                    self.line += 1;
                    self.line_pos = 0;
                }
                _ => self.line_pos += 1,
            },
            LexState::Eof => {}
        }
    }

    fn new_token_event(&mut self, event: char, collector: &mut dyn TokenCollector) {
        match event {
            '\n' => {
                self.line += 1;
                self.line_pos = 0;
            }
            '{' => self.single_char(collector, |c, l, p| c.open_brace(l, p)),
            '}' => self.single_char(collector, |c, l, p| c.closed_brace(l, p)),
            '(' => self.single_char(collector, |c, l, p| c.open_paren(l, p)),
            ')' => self.single_char(collector, |c, l, p| c.closed_paren(l, p)),
            '<' => self.single_char(collector, |c, l, p| c.open_angle(l, p)),
            '>' => self.single_char(collector, |c, l, p| c.closed_angle(l, p)),
            '-' | '*' => self.single_char(collector, |c, l, p| c.dash(l, p)),
            ':' => self.single_char(collector, |c, l, p| c.colon(l, p)),
            '/' => {
                self.state = LexState::Slash;
                self.line_pos += 1;
            }
            '\0' => self.state = LexState::Eof,
            ch if ch.is_whitespace() => self.line_pos += 1,
            ch if Self::is_name_char(ch) => {
                self.state = LexState::Name;
                self.name_start = self.total_pos;
                self.line_pos += 1;
                self.name_col = self.line_pos;
            }
            _ => self.error_event(collector),
        }
    }

    fn name_event(&mut self, input: &str, event: char, collector: &mut dyn TokenCollector) {
        if Self::is_name_char(event) {
            self.line_pos += 1;
        } else {
            self.state = LexState::NewToken;
            let name = &input[self.name_start..self.total_pos];
            collector.name(name, self.line, self.name_col);
            self.handle_event(input, event, collector);
        }
    }

    fn single_char(
        &mut self,
        collector: &mut dyn TokenCollector,
        emit: impl FnOnce(&mut dyn TokenCollector, i32, i32),
    ) {
        self.line_pos += 1;
        emit(collector, self.line, self.line_pos);
    }

    fn error_event(&mut self, collector: &mut dyn TokenCollector) {
        self.state = LexState::NewToken;
        self.line_pos += 1;
        collector.error(self.line, self.line_pos);
    }
}

impl Default for FsmLexer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexer for FsmLexer {
    fn lex(&mut self, input: &str, collector: &mut dyn TokenCollector) {
        self.state = LexState::NewToken;
        self.line = 1;
        self.line_pos = 0;
        for (offset, ch) in input.char_indices() {
            self.total_pos = offset;
            self.handle_event(input, ch, collector);
        }
        self.total_pos = input.len();
        self.handle_event(input, '\0', collector);
    }
}
