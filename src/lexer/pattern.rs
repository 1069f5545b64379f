// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Regex-driven line lexer.

use regex::Regex;

use crate::lexer::{Lexer, TokenCollector};

/// Lexes line by line with anchored patterns: whitespace and `//` comments
/// are skipped, then single-character tokens, then `\w+` names.
///
/// Token columns are 0-based byte offsets into the line; error columns are
/// 1-based. The parser's reported positions depend on this convention, so it
/// stays even though [`crate::lexer::FsmLexer`] reports 1-based columns.
pub struct PatternLexer {
    whitespace: Regex,
    comment: Regex,
    name: Regex,
}

impl PatternLexer {
    pub fn new() -> Self {
        Self {
            whitespace: Regex::new(r"^\s+").expect("whitespace pattern"),
            comment: Regex::new(r"^//.*$").expect("comment pattern"),
            name: Regex::new(r"^\w+").expect("name pattern"),
        }
    }

    fn lex_line(&self, line: &str, line_number: i32, collector: &mut dyn TokenCollector) {
        let mut position = 0usize;
        while position < line.len() {
            if !self.find_token(line, &mut position, line_number, collector) {
                collector.error(line_number, position as i32 + 1);
                position += line[position..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }

    fn find_token(
        &self,
        line: &str,
        position: &mut usize,
        line_number: i32,
        collector: &mut dyn TokenCollector,
    ) -> bool {
        self.find_white_space(line, position)
            || Self::find_single_char(line, position, line_number, collector)
            || self.find_name(line, position, line_number, collector)
    }

    fn find_white_space(&self, line: &str, position: &mut usize) -> bool {
        for pattern in [&self.whitespace, &self.comment] {
            if let Some(found) = pattern.find(&line[*position..]) {
                *position += found.end();
                return true;
            }
        }
        false
    }

    fn find_single_char(
        line: &str,
        position: &mut usize,
        line_number: i32,
        collector: &mut dyn TokenCollector,
    ) -> bool {
        let pos = *position as i32;
        let emit: fn(&mut dyn TokenCollector, i32, i32) = match line.as_bytes()[*position] {
            b'{' => |c: &mut dyn TokenCollector, l, p| c.open_brace(l, p),
            b'}' => |c: &mut dyn TokenCollector, l, p| c.closed_brace(l, p),
            b'(' => |c: &mut dyn TokenCollector, l, p| c.open_paren(l, p),
            b')' => |c: &mut dyn TokenCollector, l, p| c.closed_paren(l, p),
            b'<' => |c: &mut dyn TokenCollector, l, p| c.open_angle(l, p),
            b'>' => |c: &mut dyn TokenCollector, l, p| c.closed_angle(l, p),
            b'-' | b'*' => |c: &mut dyn TokenCollector, l, p| c.dash(l, p),
            b':' => |c: &mut dyn TokenCollector, l, p| c.colon(l, p),
            _ => return false,
        };
        emit(collector, line_number, pos);
        *position += 1;
        true
    }

    fn find_name(
        &self,
        line: &str,
        position: &mut usize,
        line_number: i32,
        collector: &mut dyn TokenCollector,
    ) -> bool {
        if let Some(found) = self.name.find(&line[*position..]) {
            collector.name(found.as_str(), line_number, *position as i32);
            *position += found.end();
            return true;
        }
        false
    }
}

impl Default for PatternLexer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexer for PatternLexer {
    fn lex(&mut self, input: &str, collector: &mut dyn TokenCollector) {
        let mut line_number = 1;
        for line in input.split('\n') {
            self.lex_line(line, line_number, collector);
            line_number += 1;
        }
    }
}
