// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Raw syntax tree produced by parsing, before any semantic checks.

use std::fmt;

use smallvec::SmallVec;
use smol_str::SmolStr;

/// Parsed source, structurally faithful to the text: headers in file order,
/// one [`Transition`] per state occurrence (the same state may appear many
/// times), errors appended as they were found.
///
/// `Display` renders a canonical form of the tree that the parser tests
/// assert against.
#[derive(Debug, Clone, Default)]
pub struct FsmSyntax {
    pub headers: Vec<Header>,
    pub logic: Vec<Transition>,
    pub errors: Vec<SyntaxError>,
    pub done: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: SmolStr,
    pub value: SmolStr,
}

#[derive(Debug, Clone)]
pub struct Transition {
    pub state: StateSpec,
    pub sub_transitions: Vec<SubTransition>,
}

#[derive(Debug, Clone)]
pub struct StateSpec {
    pub name: SmolStr,
    pub super_states: Vec<SmolStr>,
    pub entry_actions: Vec<SmolStr>,
    pub exit_actions: Vec<SmolStr>,
    pub abstract_state: bool,
}

impl StateSpec {
    pub fn new(name: SmolStr) -> Self {
        Self {
            name,
            super_states: Vec::new(),
            entry_actions: Vec::new(),
            exit_actions: Vec::new(),
            abstract_state: false,
        }
    }
}

/// One `event next-state actions` clause. `None` for event or next state is
/// the dash: a null event, or a self transition.
#[derive(Debug, Clone)]
pub struct SubTransition {
    pub event: Option<SmolStr>,
    pub next_state: Option<SmolStr>,
    pub actions: SmallVec<[SmolStr; 4]>,
}

impl SubTransition {
    pub fn new(event: Option<SmolStr>) -> Self {
        Self { event, next_state: None, actions: SmallVec::new() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    Header,
    State,
    Transition,
    TransitionGroup,
    End,
    Syntax,
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Header => "HEADER",
            Self::State => "STATE",
            Self::Transition => "TRANSITION",
            Self::TransitionGroup => "TRANSITION_GROUP",
            Self::End => "END",
            Self::Syntax => "SYNTAX",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub msg: String,
    pub line: i32,
    pub pos: i32,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Syntax error: {}. {}. line {}, position {}.",
            self.kind, self.msg, self.line, self.pos
        )
    }
}

impl FsmSyntax {
    /// First recorded error, formatted, or the empty string.
    pub fn error_string(&self) -> String {
        match self.errors.first() {
            Some(error) => format!("{error}\n"),
            None => String::new(),
        }
    }

    fn format_headers(&self, out: &mut String) {
        for header in &self.headers {
            out.push_str(&format!("{}:{}\n", header.name, header.value));
        }
    }

    fn format_logic(&self, out: &mut String) {
        if self.logic.is_empty() {
            return;
        }
        out.push_str("{\n");
        for transition in &self.logic {
            out.push_str(&format!(
                "  {} {}\n",
                Self::format_state_name(&transition.state),
                Self::format_sub_transitions(transition)
            ));
        }
        out.push_str("}\n");
    }

    fn format_state_name(state: &StateSpec) -> String {
        let mut name = if state.abstract_state {
            format!("({})", state.name)
        } else {
            state.name.to_string()
        };
        for super_state in &state.super_states {
            name.push_str(&format!(":{super_state}"));
        }
        for entry in &state.entry_actions {
            name.push_str(&format!(" <{entry}"));
        }
        for exit in &state.exit_actions {
            name.push_str(&format!(" >{exit}"));
        }
        name
    }

    fn format_sub_transitions(transition: &Transition) -> String {
        if transition.sub_transitions.len() == 1 {
            return Self::format_sub_transition(&transition.sub_transitions[0]);
        }
        let mut out = String::from("{\n");
        for sub in &transition.sub_transitions {
            out.push_str(&format!("    {}\n", Self::format_sub_transition(sub)));
        }
        out.push_str("  }");
        out
    }

    fn format_sub_transition(sub: &SubTransition) -> String {
        format!(
            "{} {} {}",
            name_or_null(&sub.event),
            name_or_null(&sub.next_state),
            Self::format_actions(sub)
        )
    }

    fn format_actions(sub: &SubTransition) -> String {
        if sub.actions.len() == 1 {
            return sub.actions[0].to_string();
        }
        let mut out = String::from("{");
        let mut first = true;
        for action in &sub.actions {
            if !first {
                out.push(' ');
            }
            out.push_str(action);
            first = false;
        }
        out.push('}');
        out
    }
}

fn name_or_null(name: &Option<SmolStr>) -> &str {
    name.as_deref().unwrap_or("null")
}

impl fmt::Display for FsmSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.format_headers(&mut out);
        self.format_logic(&mut out);
        if self.done {
            out.push_str(".\n");
        }
        out.push_str(&self.error_string());
        f.write_str(&out)
    }
}
