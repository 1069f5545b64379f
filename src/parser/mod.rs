// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Table-driven parser for the DSL grammar:
//!
//! ```text
//! <FSM> ::= <header>* <logic>
//! <header> ::= "Actions:" <name> | "FSM:" <name> | "Initial:" <name>
//!
//! <logic> ::= "{" <transition>* "}"
//!
//! <transition> ::= <state-spec> <subtransition>
//!              |   <state-spec> "{" <subtransition>* "}"
//!
//! <subtransition>   ::= <event-spec> <next-state> <action-spec>
//! <action-spec>     ::= <action> | "{" <action>* "}" | "-"
//! <state-spec>      ::= <state> <state-modifiers>
//! <state-modifiers> ::= "" | <state-modifier> | <state-modifier> <state-modifiers>
//! <state-modifier>  ::= ":" <state>
//!                   |   "<" <action-spec>
//!                   |   ">" <action-spec>
//!
//! <next-state> ::= <state> | "-"
//! <event-spec> ::= <event> | "-"
//! <action> ::= <name>
//! <state> ::= <name>
//! <event> ::= <name>
//! ```
//!
//! The parser is a [`TokenCollector`], so a lexer drives it directly. Each
//! (state, token) pair maps to a next state plus a [`Builder`] action; a pair
//! with no table row reports an error for the current grammar region and
//! leaves the state unchanged, which resynchronizes on the next token that
//! fits.

mod builder;
pub mod syntax;


use std::fmt;

pub use builder::{Builder, SyntaxBuilder};
pub use syntax::{FsmSyntax, SyntaxError};

use crate::lexer::TokenCollector;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    Header,
    HeaderColon,
    HeaderValue,
    StateSpec,
    SuperStateName,
    SuperStateClose,
    StateModifier,
    EntryAction,
    MultipleEntryActions,
    ExitAction,
    MultipleExitActions,
    StateBase,
    SingleEvent,
    SingleNextState,
    SingleActionGroup,
    SingleActionGroupName,
    SubtransitionGroup,
    GroupEvent,
    GroupNextState,
    GroupActionGroup,
    GroupActionGroupName,
    End,
}

impl fmt::Display for ParserState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Header => "HEADER",
            Self::HeaderColon => "HEADER_COLON",
            Self::HeaderValue => "HEADER_VALUE",
            Self::StateSpec => "STATE_SPEC",
            Self::SuperStateName => "SUPER_STATE_NAME",
            Self::SuperStateClose => "SUPER_STATE_CLOSE",
            Self::StateModifier => "STATE_MODIFIER",
            Self::EntryAction => "ENTRY_ACTION",
            Self::MultipleEntryActions => "MULTIPLE_ENTRY_ACTIONS",
            Self::ExitAction => "EXIT_ACTION",
            Self::MultipleExitActions => "MULTIPLE_EXIT_ACTIONS",
            Self::StateBase => "STATE_BASE",
            Self::SingleEvent => "SINGLE_EVENT",
            Self::SingleNextState => "SINGLE_NEXT_STATE",
            Self::SingleActionGroup => "SINGLE_ACTION_GROUP",
            Self::SingleActionGroupName => "SINGLE_ACTION_GROUP_NAME",
            Self::SubtransitionGroup => "SUBTRANSITION_GROUP",
            Self::GroupEvent => "GROUP_EVENT",
            Self::GroupNextState => "GROUP_NEXT_STATE",
            Self::GroupActionGroup => "GROUP_ACTION_GROUP",
            Self::GroupActionGroupName => "GROUP_ACTION_GROUP_NAME",
            Self::End => "END",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserEvent {
    OpenBrace,
    ClosedBrace,
    OpenParen,
    ClosedParen,
    OpenAngle,
    ClosedAngle,
    Dash,
    Colon,
    Name,
    Eof,
}

impl fmt::Display for ParserEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::OpenBrace => "OPEN_BRACE",
            Self::ClosedBrace => "CLOSED_BRACE",
            Self::OpenParen => "OPEN_PAREN",
            Self::ClosedParen => "CLOSED_PAREN",
            Self::OpenAngle => "OPEN_ANGLE",
            Self::ClosedAngle => "CLOSED_ANGLE",
            Self::Dash => "DASH",
            Self::Colon => "COLON",
            Self::Name => "NAME",
            Self::Eof => "EOF",
        })
    }
}

type BuilderAction = fn(&mut dyn Builder);

fn nothing(_: &mut dyn Builder) {}

use ParserEvent::*;
use ParserState::*;

#[rustfmt::skip]
static TRANSITIONS: &[(ParserState, ParserEvent, ParserState, BuilderAction)] = &[
    (Header,                Name,        HeaderColon,           |b| b.new_header_with_name()),
    (Header,                OpenBrace,   StateSpec,             nothing),
    (HeaderColon,           Colon,       HeaderValue,           nothing),
    (HeaderValue,           Name,        Header,                |b| b.add_header_with_value()),
    (StateSpec,             OpenParen,   SuperStateName,        nothing),
    (StateSpec,             Name,        StateModifier,         |b| b.set_state_name()),
    (StateSpec,             ClosedBrace, End,                   |b| b.done()),
    (SuperStateName,        Name,        SuperStateClose,       |b| b.set_super_state_name()),
    (SuperStateClose,       ClosedParen, StateModifier,         nothing),
    (StateModifier,         OpenAngle,   EntryAction,           nothing),
    (StateModifier,         ClosedAngle, ExitAction,            nothing),
    (StateModifier,         Colon,       StateBase,             nothing),
    (StateModifier,         Name,        SingleEvent,           |b| b.set_event()),
    (StateModifier,         Dash,        SingleEvent,           |b| b.set_null_event()),
    (StateModifier,         OpenBrace,   SubtransitionGroup,    nothing),
    (EntryAction,           Name,        StateModifier,         |b| b.set_entry_action()),
    (EntryAction,           OpenBrace,   MultipleEntryActions,  nothing),
    (MultipleEntryActions,  Name,        MultipleEntryActions,  |b| b.set_entry_action()),
    (MultipleEntryActions,  ClosedBrace, StateModifier,         nothing),
    (ExitAction,            Name,        StateModifier,         |b| b.set_exit_action()),
    (ExitAction,            OpenBrace,   MultipleExitActions,   nothing),
    (MultipleExitActions,   Name,        MultipleExitActions,   |b| b.set_exit_action()),
    (MultipleExitActions,   ClosedBrace, StateModifier,         nothing),
    (StateBase,             Name,        StateModifier,         |b| b.set_state_base()),
    (SingleEvent,           Name,        SingleNextState,       |b| b.set_next_state()),
    (SingleEvent,           Dash,        SingleNextState,       |b| b.set_null_next_state()),
    (SingleNextState,       Name,        StateSpec,             |b| b.transition_with_action()),
    (SingleNextState,       Dash,        StateSpec,             |b| b.transition_with_null_action()),
    (SingleNextState,       OpenBrace,   SingleActionGroup,     nothing),
    (SingleActionGroup,     Name,        SingleActionGroupName, |b| b.add_action()),
    (SingleActionGroup,     ClosedBrace, StateSpec,             |b| b.transition_with_null_action()),
    (SingleActionGroupName, Name,        SingleActionGroupName, |b| b.add_action()),
    (SingleActionGroupName, ClosedBrace, StateSpec,             |b| b.transition_with_actions()),
    (SubtransitionGroup,    ClosedBrace, StateSpec,             nothing),
    (SubtransitionGroup,    Name,        GroupEvent,            |b| b.set_event()),
    (SubtransitionGroup,    Dash,        GroupEvent,            |b| b.set_null_event()),
    (GroupEvent,            Name,        GroupNextState,        |b| b.set_next_state()),
    (GroupEvent,            Dash,        GroupNextState,        |b| b.set_null_next_state()),
    (GroupNextState,        Name,        SubtransitionGroup,    |b| b.transition_with_action()),
    (GroupNextState,        Dash,        SubtransitionGroup,    |b| b.transition_with_null_action()),
    (GroupNextState,        OpenBrace,   GroupActionGroup,      nothing),
    (GroupActionGroup,      Name,        GroupActionGroupName,  |b| b.add_action()),
    (GroupActionGroup,      ClosedBrace, SubtransitionGroup,    |b| b.transition_with_null_action()),
    (GroupActionGroupName,  Name,        GroupActionGroupName,  |b| b.add_action()),
    (GroupActionGroupName,  ClosedBrace, SubtransitionGroup,    |b| b.transition_with_actions()),
    (End,                   Eof,         End,                   nothing),
];

pub struct Parser<B: Builder> {
    state: ParserState,
    builder: B,
}

impl<B: Builder> Parser<B> {
    pub fn new(builder: B) -> Self {
        Self { state: ParserState::Header, builder }
    }

    pub fn into_builder(self) -> B {
        self.builder
    }

    pub fn handle_event(&mut self, event: ParserEvent, line: i32, pos: i32) {
        for (current, on, next, action) in TRANSITIONS {
            if *current == self.state && *on == event {
                self.state = *next;
                action(&mut self.builder);
                return;
            }
        }
        self.handle_event_error(event, line, pos);
    }

    // The state is left unchanged so parsing resynchronizes on the next
    // token the current region accepts.
    fn handle_event_error(&mut self, event: ParserEvent, line: i32, pos: i32) {
        match self.state {
            Header | HeaderColon | HeaderValue => {
                self.builder.header_error(self.state, event, line, pos);
            }
            StateSpec | SuperStateName | SuperStateClose | StateModifier | ExitAction
            | EntryAction | MultipleEntryActions | MultipleExitActions | StateBase => {
                self.builder.state_spec_error(self.state, event, line, pos);
            }
            SingleEvent | SingleNextState | SingleActionGroup | SingleActionGroupName => {
                self.builder.transition_error(self.state, event, line, pos);
            }
            SubtransitionGroup | GroupEvent | GroupNextState | GroupActionGroup
            | GroupActionGroupName => {
                self.builder.transition_group_error(self.state, event, line, pos);
            }
            End => self.builder.end_error(self.state, event, line, pos),
        }
    }
}

impl<B: Builder> TokenCollector for Parser<B> {
    fn open_brace(&mut self, line: i32, pos: i32) {
        self.handle_event(OpenBrace, line, pos);
    }

    fn closed_brace(&mut self, line: i32, pos: i32) {
        self.handle_event(ClosedBrace, line, pos);
    }

    fn open_paren(&mut self, line: i32, pos: i32) {
        self.handle_event(OpenParen, line, pos);
    }

    fn closed_paren(&mut self, line: i32, pos: i32) {
        self.handle_event(ClosedParen, line, pos);
    }

    fn open_angle(&mut self, line: i32, pos: i32) {
        self.handle_event(OpenAngle, line, pos);
    }

    fn closed_angle(&mut self, line: i32, pos: i32) {
        self.handle_event(ClosedAngle, line, pos);
    }

    fn dash(&mut self, line: i32, pos: i32) {
        self.handle_event(Dash, line, pos);
    }

    fn colon(&mut self, line: i32, pos: i32) {
        self.handle_event(Colon, line, pos);
    }

    fn name(&mut self, name: &str, line: i32, pos: i32) {
        self.builder.set_name(name);
        self.handle_event(Name, line, pos);
    }

    fn error(&mut self, line: i32, pos: i32) {
        self.builder.syntax_error(line, pos);
    }
}
