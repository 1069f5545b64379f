// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Semantic model of a state machine and the analysis that builds it.

mod analyzer;


use std::collections::BTreeMap;
use std::fmt;

use smol_str::SmolStr;

pub use analyzer::analyze;

use crate::names::NameSet;

/// Handle into the state arena of a [`SemanticStateMachine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StateId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorId {
    NoFsm,
    NoInitial,
    InvalidHeader,
    ExtraHeaderIgnored,
    UndefinedState,
    UndefinedSuperState,
    UnusedState,
    DuplicateTransition,
    AbstractStateUsedAsNextState,
    InconsistentAbstraction,
    StateActionsMultiplyDefined,
    ConflictingSuperstates,
    CyclicSuperState,
}

impl fmt::Display for ErrorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoFsm => "NO_FSM",
            Self::NoInitial => "NO_INITIAL",
            Self::InvalidHeader => "INVALID_HEADER",
            Self::ExtraHeaderIgnored => "EXTRA_HEADER_IGNORED",
            Self::UndefinedState => "UNDEFINED_STATE",
            Self::UndefinedSuperState => "UNDEFINED_SUPER_STATE",
            Self::UnusedState => "UNUSED_STATE",
            Self::DuplicateTransition => "DUPLICATE_TRANSITION",
            Self::AbstractStateUsedAsNextState => "ABSTRACT_STATE_USED_AS_NEXT_STATE",
            Self::InconsistentAbstraction => "INCONSISTENT_ABSTRACTION",
            Self::StateActionsMultiplyDefined => "STATE_ACTIONS_MULTIPLY_DEFINED",
            Self::ConflictingSuperstates => "CONFLICTING_SUPERSTATES",
            Self::CyclicSuperState => "CYCLIC_SUPER_STATE",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisError {
    pub id: ErrorId,
    pub extra: Option<String>,
}

impl AnalysisError {
    pub fn new(id: ErrorId) -> Self {
        Self { id, extra: None }
    }

    pub fn with(id: ErrorId, extra: impl Into<String>) -> Self {
        Self { id, extra: Some(extra.into()) }
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Semantic error: {}({})", self.id, self.extra.as_deref().unwrap_or(""))
    }
}

#[derive(Debug, Clone)]
pub struct SemanticTransition {
    pub event: Option<SmolStr>,
    pub next_state: StateId,
    pub actions: Vec<SmolStr>,
}

#[derive(Debug, Clone)]
pub struct SemanticState {
    pub name: SmolStr,
    pub entry_actions: Vec<SmolStr>,
    pub exit_actions: Vec<SmolStr>,
    pub abstract_state: bool,
    /// Sorted by the referenced state's name, no duplicates.
    pub super_states: Vec<StateId>,
    pub transitions: Vec<SemanticTransition>,
}

impl SemanticState {
    fn new(name: SmolStr) -> Self {
        Self {
            name,
            entry_actions: Vec::new(),
            exit_actions: Vec::new(),
            abstract_state: false,
            super_states: Vec::new(),
            transitions: Vec::new(),
        }
    }
}

/// The analyzed machine: a name-keyed arena of states plus the header
/// values, the event and action lists in declaration order, and every error
/// and warning the analysis found.
///
/// State links (`super_states`, `next_state`) are only populated when the
/// analysis finished without errors; the error lists are meaningful either
/// way.
#[derive(Debug, Clone, Default)]
pub struct SemanticStateMachine {
    pub errors: Vec<AnalysisError>,
    pub warnings: Vec<AnalysisError>,
    states: Vec<SemanticState>,
    by_name: BTreeMap<SmolStr, StateId>,
    pub events: NameSet,
    pub actions: NameSet,
    pub initial_state: Option<StateId>,
    pub fsm_name: Option<SmolStr>,
    pub actions_class: Option<SmolStr>,
}

impl SemanticStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, error: AnalysisError) {
        self.errors.push(error);
    }

    /// Looks up `name`, creating an empty state for it if needed.
    pub fn intern_state(&mut self, name: &str) -> StateId {
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }
        let id = StateId(self.states.len());
        let name = SmolStr::new(name);
        self.states.push(SemanticState::new(name.clone()));
        self.by_name.insert(name, id);
        id
    }

    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.by_name.get(name).copied()
    }

    pub fn contains_state(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn state(&self, id: StateId) -> &SemanticState {
        &self.states[id.0]
    }

    pub fn state_mut(&mut self, id: StateId) -> &mut SemanticState {
        &mut self.states[id.0]
    }

    /// All states, sorted by name.
    pub fn state_ids(&self) -> Vec<StateId> {
        self.by_name.values().copied().collect()
    }

    pub fn state_names(&self) -> Vec<&str> {
        self.by_name.keys().map(|n| n.as_str()).collect()
    }

    /// Links `super_id` as a super state of `id`, keeping the list sorted by
    /// name and free of duplicates.
    pub fn add_super_state(&mut self, id: StateId, super_id: StateId) {
        if self.states[id.0].super_states.contains(&super_id) {
            return;
        }
        let super_name = self.states[super_id.0].name.clone();
        let existing = self.states[id.0].super_states.clone();
        let insert_at = existing
            .iter()
            .position(|s| self.states[s.0].name > super_name)
            .unwrap_or(existing.len());
        self.states[id.0].super_states.insert(insert_at, super_id);
    }

    pub fn states_to_string(&self) -> String {
        let mut out = String::from("{");
        for id in self.state_ids() {
            out.push_str(&self.state_to_string(id));
        }
        out.push_str("}\n");
        out
    }

    fn state_to_string(&self, id: StateId) -> String {
        let state = self.state(id);
        let mut out = format!("\n  {} {{\n", self.adorned_name(state));
        for transition in &state.transitions {
            let event = transition.event.as_deref().unwrap_or("null");
            let next = self.state(transition.next_state).name.as_str();
            let mut actions = String::new();
            for (i, action) in transition.actions.iter().enumerate() {
                if i > 0 {
                    actions.push(' ');
                }
                actions.push_str(action);
            }
            out.push_str(&format!("    {event} {next} {{{actions}}}\n"));
        }
        out.push_str("  }\n");
        out
    }

    fn adorned_name(&self, state: &SemanticState) -> String {
        let mut name = if state.abstract_state {
            format!("({})", state.name)
        } else {
            state.name.to_string()
        };
        for super_id in &state.super_states {
            name.push_str(&format!(" :{}", self.state(*super_id).name));
        }
        for entry in &state.entry_actions {
            name.push_str(&format!(" <{entry}"));
        }
        for exit in &state.exit_actions {
            name.push_str(&format!(" >{exit}"));
        }
        name
    }
}

impl fmt::Display for SemanticStateMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let initial = self
            .initial_state
            .map(|id| self.state(id).name.as_str())
            .unwrap_or("");
        write!(
            f,
            "Actions: {}\nFSM: {}\nInitial: {}{}",
            self.actions_class.as_deref().unwrap_or(""),
            self.fsm_name.as_deref().unwrap_or(""),
            initial,
            self.states_to_string()
        )
    }
}
