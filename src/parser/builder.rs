// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use smol_str::SmolStr;

use crate::parser::syntax::{
    FsmSyntax, Header, StateSpec, SubTransition, SyntaxError, SyntaxErrorKind, Transition,
};
use crate::parser::{ParserEvent, ParserState};

/// Callback surface driven by the parser table. One method per builder
/// action named in the table, plus `set_name` (called before every name
/// event) and the per-region error reporters.
pub trait Builder {
    fn set_name(&mut self, name: &str);
    fn new_header_with_name(&mut self);
    fn add_header_with_value(&mut self);
    fn set_state_name(&mut self);
    fn set_super_state_name(&mut self);
    fn set_event(&mut self);
    fn set_null_event(&mut self);
    fn set_entry_action(&mut self);
    fn set_exit_action(&mut self);
    fn set_state_base(&mut self);
    fn set_next_state(&mut self);
    fn set_null_next_state(&mut self);
    fn add_action(&mut self);
    fn transition_with_action(&mut self);
    fn transition_with_null_action(&mut self);
    fn transition_with_actions(&mut self);
    fn done(&mut self);
    fn syntax_error(&mut self, line: i32, pos: i32);
    fn header_error(&mut self, state: ParserState, event: ParserEvent, line: i32, pos: i32);
    fn state_spec_error(&mut self, state: ParserState, event: ParserEvent, line: i32, pos: i32);
    fn transition_error(&mut self, state: ParserState, event: ParserEvent, line: i32, pos: i32);
    fn transition_group_error(&mut self, state: ParserState, event: ParserEvent, line: i32, pos: i32);
    fn end_error(&mut self, state: ParserState, event: ParserEvent, line: i32, pos: i32);
}

/// Assembles an [`FsmSyntax`] from builder callbacks.
///
/// The table only invokes value-consuming actions after the productions that
/// establish their targets, so the pending-slot accesses use `if let` and
/// simply drop a callback that arrives with nothing pending (which can only
/// happen after a syntax error put the parser into resync).
#[derive(Default)]
pub struct SyntaxBuilder {
    fsm: FsmSyntax,
    parsed_name: SmolStr,
    header_name: SmolStr,
    sub_transition: Option<SubTransition>,
}

impl SyntaxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_fsm(self) -> FsmSyntax {
        self.fsm
    }

    fn push_error(&mut self, kind: SyntaxErrorKind, msg: String, line: i32, pos: i32) {
        self.fsm.errors.push(SyntaxError { kind, msg, line, pos });
    }

    fn region_error(
        &mut self,
        kind: SyntaxErrorKind,
        state: ParserState,
        event: ParserEvent,
        line: i32,
        pos: i32,
    ) {
        self.push_error(kind, format!("{state}|{event}"), line, pos);
    }

    fn current_transition(&mut self) -> Option<&mut Transition> {
        self.fsm.logic.last_mut()
    }

    fn finish_sub_transition(&mut self) {
        if let Some(sub) = self.sub_transition.take() {
            if let Some(transition) = self.fsm.logic.last_mut() {
                transition.sub_transitions.push(sub);
            }
        }
    }
}

impl Builder for SyntaxBuilder {
    fn set_name(&mut self, name: &str) {
        self.parsed_name = SmolStr::new(name);
    }

    fn new_header_with_name(&mut self) {
        self.header_name = self.parsed_name.clone();
    }

    fn add_header_with_value(&mut self) {
        self.fsm.headers.push(Header {
            name: self.header_name.clone(),
            value: self.parsed_name.clone(),
        });
    }

    fn set_state_name(&mut self) {
        self.fsm.logic.push(Transition {
            state: StateSpec::new(self.parsed_name.clone()),
            sub_transitions: Vec::new(),
        });
    }

    fn set_super_state_name(&mut self) {
        self.set_state_name();
        if let Some(transition) = self.current_transition() {
            transition.state.abstract_state = true;
        }
    }

    fn set_event(&mut self) {
        self.sub_transition = Some(SubTransition::new(Some(self.parsed_name.clone())));
    }

    fn set_null_event(&mut self) {
        self.sub_transition = Some(SubTransition::new(None));
    }

    fn set_entry_action(&mut self) {
        let name = self.parsed_name.clone();
        if let Some(transition) = self.current_transition() {
            transition.state.entry_actions.push(name);
        }
    }

    fn set_exit_action(&mut self) {
        let name = self.parsed_name.clone();
        if let Some(transition) = self.current_transition() {
            transition.state.exit_actions.push(name);
        }
    }

    fn set_state_base(&mut self) {
        let name = self.parsed_name.clone();
        if let Some(transition) = self.current_transition() {
            transition.state.super_states.push(name);
        }
    }

    fn set_next_state(&mut self) {
        let name = self.parsed_name.clone();
        if let Some(sub) = &mut self.sub_transition {
            sub.next_state = Some(name);
        }
    }

    fn set_null_next_state(&mut self) {
        if let Some(sub) = &mut self.sub_transition {
            sub.next_state = None;
        }
    }

    fn add_action(&mut self) {
        let name = self.parsed_name.clone();
        if let Some(sub) = &mut self.sub_transition {
            sub.actions.push(name);
        }
    }

    fn transition_with_action(&mut self) {
        let name = self.parsed_name.clone();
        if let Some(sub) = &mut self.sub_transition {
            sub.actions.push(name);
        }
        self.finish_sub_transition();
    }

    fn transition_with_null_action(&mut self) {
        self.finish_sub_transition();
    }

    fn transition_with_actions(&mut self) {
        self.finish_sub_transition();
    }

    fn done(&mut self) {
        self.fsm.done = true;
    }

    fn syntax_error(&mut self, line: i32, pos: i32) {
        self.push_error(SyntaxErrorKind::Syntax, String::new(), line, pos);
    }

    fn header_error(&mut self, state: ParserState, event: ParserEvent, line: i32, pos: i32) {
        self.region_error(SyntaxErrorKind::Header, state, event, line, pos);
    }

    fn state_spec_error(&mut self, state: ParserState, event: ParserEvent, line: i32, pos: i32) {
        self.region_error(SyntaxErrorKind::State, state, event, line, pos);
    }

    fn transition_error(&mut self, state: ParserState, event: ParserEvent, line: i32, pos: i32) {
        self.region_error(SyntaxErrorKind::Transition, state, event, line, pos);
    }

    fn transition_group_error(&mut self, state: ParserState, event: ParserEvent, line: i32, pos: i32) {
        self.region_error(SyntaxErrorKind::TransitionGroup, state, event, line, pos);
    }

    fn end_error(&mut self, state: ParserState, event: ParserEvent, line: i32, pos: i32) {
        self.region_error(SyntaxErrorKind::End, state, event, line, pos);
    }
}
