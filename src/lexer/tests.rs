// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::rstest;

use crate::lexer::pattern::PatternLexer;
use crate::lexer::{FsmLexer, Lexer, TokenCollector};

#[derive(Default)]
struct TokenRecorder {
    tokens: String,
}

impl TokenRecorder {
    fn add(&mut self, token: &str) {
        if !self.tokens.is_empty() {
            self.tokens.push(',');
        }
        self.tokens.push_str(token);
    }
}

impl TokenCollector for TokenRecorder {
    fn open_brace(&mut self, _line: i32, _pos: i32) {
        self.add("OB");
    }
    fn closed_brace(&mut self, _line: i32, _pos: i32) {
        self.add("CB");
    }
    fn open_paren(&mut self, _line: i32, _pos: i32) {
        self.add("OP");
    }
    fn closed_paren(&mut self, _line: i32, _pos: i32) {
        self.add("CP");
    }
    fn open_angle(&mut self, _line: i32, _pos: i32) {
        self.add("OA");
    }
    fn closed_angle(&mut self, _line: i32, _pos: i32) {
        self.add("CA");
    }
    fn dash(&mut self, _line: i32, _pos: i32) {
        self.add("D");
    }
    fn colon(&mut self, _line: i32, _pos: i32) {
        self.add("C");
    }
    fn name(&mut self, name: &str, _line: i32, _pos: i32) {
        self.add(&format!("#{name}#"));
    }
    fn error(&mut self, line: i32, pos: i32) {
        self.add(&format!("E{line}/{pos}"));
    }
}

fn lex_with(lexer: &mut dyn Lexer, input: &str) -> String {
    let mut recorder = TokenRecorder::default();
    lexer.lex(input, &mut recorder);
    recorder.tokens
}

/// Both lexers must produce the same token stream for the same input.
fn assert_lex(input: &str, expected: &str) {
    assert_eq!(lex_with(&mut FsmLexer::new(), input), expected, "FsmLexer on {input:?}");
    assert_eq!(lex_with(&mut PatternLexer::new(), input), expected, "PatternLexer on {input:?}");
}

#[rstest]
#[case::open_brace("{", "OB")]
#[case::closed_brace("}", "CB")]
#[case::open_paren("(", "OP")]
#[case::closed_paren(")", "CP")]
#[case::open_angle("<", "OA")]
#[case::closed_angle(">", "CA")]
#[case::dash("-", "D")]
#[case::star_as_dash("*", "D")]
#[case::colon(":", "C")]
#[case::simple_name("name", "#name#")]
#[case::complex_name("Abc_Ebb", "#Abc_Ebb#")]
#[case::unknown_char_is_error(".", "E1/1")]
#[case::just_one_whitespace(" ", "")]
#[case::whitespace_before_token("  \t\n \r  -", "D")]
fn single_tokens(#[case] input: &str, #[case] expected: &str) {
    assert_lex(input, expected);
}

#[rstest]
#[case::comment_after_token("-//comment\n", "D")]
#[case::comment_lines("//comment 1\n-//comment 2\n//comment 3\n-//comment 4", "D,D")]
fn comments_are_ignored(#[case] input: &str, #[case] expected: &str) {
    assert_lex(input, expected);
}

#[rstest]
#[case::simple_sequence("{}", "OB,CB")]
#[case::complex_sequence("FSM:fsm{this}", "#FSM#,C,#fsm#,OB,#this#,CB")]
#[case::all_tokens("{}()<>-: name .", "OB,CB,OP,CP,OA,CA,D,C,#name#,E1/15")]
#[case::multiple_lines("FSM:fsm.\n{bob-.}", "#FSM#,C,#fsm#,E1/8,OB,#bob#,D,E2/6,CB")]
fn multiple_tokens(#[case] input: &str, #[case] expected: &str) {
    assert_lex(input, expected);
}

#[test]
fn name_column_is_one_based_in_streaming_lexer() {
    struct NamePos(Vec<(String, i32, i32)>);
    impl TokenCollector for NamePos {
        fn open_brace(&mut self, _line: i32, _pos: i32) {}
        fn closed_brace(&mut self, _line: i32, _pos: i32) {}
        fn open_paren(&mut self, _line: i32, _pos: i32) {}
        fn closed_paren(&mut self, _line: i32, _pos: i32) {}
        fn open_angle(&mut self, _line: i32, _pos: i32) {}
        fn closed_angle(&mut self, _line: i32, _pos: i32) {}
        fn dash(&mut self, _line: i32, _pos: i32) {}
        fn colon(&mut self, _line: i32, _pos: i32) {}
        fn name(&mut self, name: &str, line: i32, pos: i32) {
            self.0.push((name.to_string(), line, pos));
        }
        fn error(&mut self, _line: i32, _pos: i32) {}
    }

    let mut names = NamePos(Vec::new());
    FsmLexer::new().lex("fsm:one\n  two", &mut names);
    assert_eq!(
        names.0,
        [("fsm".to_string(), 1, 1), ("one".to_string(), 1, 5), ("two".to_string(), 2, 3)]
    );
}
