// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use smol_str::SmolStr;

use crate::parser::syntax::{FsmSyntax, Header, Transition};
use crate::semantics::{
    AnalysisError, ErrorId, SemanticStateMachine, SemanticTransition, StateId,
};

/// Checks an [`FsmSyntax`] and builds the semantic machine from it.
///
/// Checks run in a fixed order so error lists are reproducible: headers,
/// undefined and unused states, duplicate transitions, abstract-target and
/// abstraction-consistency checks, multiply defined state actions. The state
/// graph is only wired up when all of those passed; the superclass crawl
/// then validates transition inheritance per concrete state.
pub fn analyze(fsm: &FsmSyntax) -> SemanticStateMachine {
    Analysis::new(fsm).run()
}

struct Analysis<'a> {
    fsm: &'a FsmSyntax,
    machine: SemanticStateMachine,
    fsm_header: Option<&'a Header>,
    actions_header: Option<&'a Header>,
    initial_header: Option<&'a Header>,
}

impl<'a> Analysis<'a> {
    fn new(fsm: &'a FsmSyntax) -> Self {
        Self {
            fsm,
            machine: SemanticStateMachine::new(),
            fsm_header: None,
            actions_header: None,
            initial_header: None,
        }
    }

    fn run(mut self) -> SemanticStateMachine {
        self.analyze_headers();
        self.check_semantic_validity();
        self.produce_state_machine();
        check_super_class_transitions(&mut self.machine);
        self.machine
    }

    fn analyze_headers(&mut self) {
        for header in &self.fsm.headers {
            if header.name.eq_ignore_ascii_case("fsm") {
                Self::set_header(&mut self.fsm_header, header, &mut self.machine);
            } else if header.name.eq_ignore_ascii_case("actions") {
                Self::set_header(&mut self.actions_header, header, &mut self.machine);
            } else if header.name.eq_ignore_ascii_case("initial") {
                Self::set_header(&mut self.initial_header, header, &mut self.machine);
            } else {
                self.machine
                    .add_error(AnalysisError::with(ErrorId::InvalidHeader, header_string(header)));
            }
        }
        if self.fsm_header.is_none() {
            self.machine.add_error(AnalysisError::new(ErrorId::NoFsm));
        }
        if self.initial_header.is_none() {
            self.machine.add_error(AnalysisError::new(ErrorId::NoInitial));
        }
    }

    // First definition wins; repeats are reported and ignored.
    fn set_header(
        slot: &mut Option<&'a Header>,
        header: &'a Header,
        machine: &mut SemanticStateMachine,
    ) {
        if slot.is_none() {
            *slot = Some(header);
        } else {
            machine.add_error(AnalysisError::with(
                ErrorId::ExtraHeaderIgnored,
                header_string(header),
            ));
        }
    }

    fn check_semantic_validity(&mut self) {
        self.create_state_event_and_action_lists();
        self.check_undefined_states();
        self.check_for_unused_states();
        self.check_for_duplicate_transitions();
        self.check_that_abstract_states_are_not_targets();
        self.check_for_inconsistent_abstraction();
        self.check_for_multiply_defined_state_actions();
    }

    fn create_state_event_and_action_lists(&mut self) {
        for t in &self.fsm.logic {
            self.machine.intern_state(&t.state.name);
        }
        for t in &self.fsm.logic {
            for action in t.state.entry_actions.iter().chain(&t.state.exit_actions) {
                self.machine.actions.insert(action.clone());
            }
        }
        for t in &self.fsm.logic {
            for sub in &t.sub_transitions {
                if let Some(event) = &sub.event {
                    self.machine.events.insert(event.clone());
                }
            }
        }
        for t in &self.fsm.logic {
            for sub in &t.sub_transitions {
                for action in &sub.actions {
                    self.machine.actions.insert(action.clone());
                }
            }
        }
    }

    fn check_undefined_states(&mut self) {
        for t in &self.fsm.logic {
            for super_state in &t.state.super_states {
                if !self.machine.contains_state(super_state) {
                    self.machine.add_error(AnalysisError::with(
                        ErrorId::UndefinedSuperState,
                        super_state.as_str(),
                    ));
                }
            }
            for sub in &t.sub_transitions {
                if let Some(next) = &sub.next_state {
                    if !self.machine.contains_state(next) {
                        self.machine
                            .add_error(AnalysisError::with(ErrorId::UndefinedState, next.as_str()));
                    }
                }
            }
        }
        if let Some(initial) = self.initial_header {
            if !self.machine.contains_state(&initial.value) {
                self.machine.add_error(AnalysisError::with(
                    ErrorId::UndefinedState,
                    format!("initial: {}", initial.value),
                ));
            }
        }
    }

    fn check_for_unused_states(&mut self) {
        let mut used: BTreeSet<SmolStr> = BTreeSet::new();
        if let Some(initial) = self.initial_header {
            used.insert(initial.value.clone());
        }
        for t in &self.fsm.logic {
            used.extend(t.state.super_states.iter().cloned());
            for sub in &t.sub_transitions {
                used.insert(sub.next_state.clone().unwrap_or_else(|| t.state.name.clone()));
            }
        }
        let unused: Vec<SmolStr> = self
            .machine
            .state_names()
            .into_iter()
            .filter(|name| !used.contains(*name))
            .map(SmolStr::new)
            .collect();
        for name in unused {
            self.machine.add_error(AnalysisError::with(ErrorId::UnusedState, name.as_str()));
        }
    }

    fn check_for_duplicate_transitions(&mut self) {
        let mut keys: BTreeSet<String> = BTreeSet::new();
        for t in &self.fsm.logic {
            for sub in &t.sub_transitions {
                let key = format!("{}({})", t.state.name, sub.event.as_deref().unwrap_or("null"));
                if !keys.insert(key.clone()) {
                    self.machine.add_error(AnalysisError::with(ErrorId::DuplicateTransition, key));
                }
            }
        }
    }

    fn abstract_state_names(&self) -> BTreeSet<SmolStr> {
        self.fsm
            .logic
            .iter()
            .filter(|t| t.state.abstract_state)
            .map(|t| t.state.name.clone())
            .collect()
    }

    fn check_that_abstract_states_are_not_targets(&mut self) {
        let abstract_states = self.abstract_state_names();
        for t in &self.fsm.logic {
            for sub in &t.sub_transitions {
                if let Some(next) = &sub.next_state {
                    if abstract_states.contains(next) {
                        self.machine.add_error(AnalysisError::with(
                            ErrorId::AbstractStateUsedAsNextState,
                            format!(
                                "{}({})->{}",
                                t.state.name,
                                sub.event.as_deref().unwrap_or("null"),
                                next
                            ),
                        ));
                    }
                }
            }
        }
    }

    fn check_for_inconsistent_abstraction(&mut self) {
        let abstract_states = self.abstract_state_names();
        for t in &self.fsm.logic {
            if !t.state.abstract_state && abstract_states.contains(&t.state.name) {
                self.machine.warnings.push(AnalysisError::with(
                    ErrorId::InconsistentAbstraction,
                    t.state.name.as_str(),
                ));
            }
        }
    }

    fn check_for_multiply_defined_state_actions(&mut self) {
        let mut first_actions: BTreeMap<SmolStr, String> = BTreeMap::new();
        for t in &self.fsm.logic {
            if t.state.entry_actions.is_empty() && t.state.exit_actions.is_empty() {
                continue;
            }
            let key = actions_key(t);
            match first_actions.get(&t.state.name) {
                Some(previous) if *previous != key => {
                    self.machine.add_error(AnalysisError::with(
                        ErrorId::StateActionsMultiplyDefined,
                        t.state.name.as_str(),
                    ));
                }
                Some(_) => {}
                None => {
                    first_actions.insert(t.state.name.clone(), key);
                }
            }
        }
    }

    fn produce_state_machine(&mut self) {
        if !self.machine.errors.is_empty() {
            return;
        }
        self.compile_headers();
        for t in &self.fsm.logic {
            let id = self
                .machine
                .state_id(&t.state.name)
                .expect("state interned during list creation");
            self.compile_state(t, id);
            self.compile_transitions(t, id);
        }
    }

    fn compile_headers(&mut self) {
        self.machine.initial_state = self
            .initial_header
            .and_then(|header| self.machine.state_id(&header.value));
        self.machine.actions_class = self.actions_header.map(|header| header.value.clone());
        self.machine.fsm_name = self.fsm_header.map(|header| header.value.clone());
    }

    fn compile_state(&mut self, t: &Transition, id: StateId) {
        let super_ids: Vec<StateId> = t
            .state
            .super_states
            .iter()
            .map(|name| self.machine.state_id(name).expect("super state checked as defined"))
            .collect();
        let state = self.machine.state_mut(id);
        state.entry_actions.extend(t.state.entry_actions.iter().cloned());
        state.exit_actions.extend(t.state.exit_actions.iter().cloned());
        state.abstract_state = state.abstract_state || t.state.abstract_state;
        for super_id in super_ids {
            self.machine.add_super_state(id, super_id);
        }
    }

    fn compile_transitions(&mut self, t: &Transition, id: StateId) {
        for sub in &t.sub_transitions {
            let next_state = match &sub.next_state {
                Some(name) => {
                    self.machine.state_id(name).expect("next state checked as defined")
                }
                None => id,
            };
            self.machine.state_mut(id).transitions.push(SemanticTransition {
                event: sub.event.clone(),
                next_state,
                actions: sub.actions.to_vec(),
            });
        }
    }
}

fn header_string(header: &Header) -> String {
    format!("{}: {}", header.name, header.value)
}

fn actions_key(t: &Transition) -> String {
    let mut parts: Vec<&str> = Vec::new();
    parts.extend(t.state.entry_actions.iter().map(|a| a.as_str()));
    parts.extend(t.state.exit_actions.iter().map(|a| a.as_str()));
    parts.join(",")
}

#[derive(Clone, PartialEq, Eq)]
struct TransitionTuple {
    current_state: SmolStr,
    next_state: SmolStr,
    actions: Vec<SmolStr>,
}

/// Walks each concrete state's super state hierarchy and checks that no two
/// unrelated states define the same event with different outcomes. A state
/// overriding its own ancestor's transition is fine; two sibling super
/// states disagreeing is a conflict. Cycles in the super state graph are
/// reported and do not recurse forever.
fn check_super_class_transitions(machine: &mut SemanticStateMachine) {
    let mut new_errors: Vec<AnalysisError> = Vec::new();
    let mut cyclic: BTreeSet<SmolStr> = BTreeSet::new();

    for concrete in machine.state_ids() {
        if machine.state(concrete).abstract_state {
            continue;
        }
        let mut tuples: BTreeMap<SmolStr, TransitionTuple> = BTreeMap::new();
        let mut visiting: Vec<StateId> = Vec::new();
        let mut visited: BTreeSet<StateId> = BTreeSet::new();
        crawl_state(
            machine,
            concrete,
            concrete,
            &mut tuples,
            &mut visiting,
            &mut visited,
            &mut new_errors,
            &mut cyclic,
        );
    }

    machine.errors.extend(new_errors);
    for name in cyclic {
        machine.errors.push(AnalysisError::with(ErrorId::CyclicSuperState, name.as_str()));
    }
}

#[allow(clippy::too_many_arguments)]
fn crawl_state(
    machine: &SemanticStateMachine,
    concrete: StateId,
    current: StateId,
    tuples: &mut BTreeMap<SmolStr, TransitionTuple>,
    visiting: &mut Vec<StateId>,
    visited: &mut BTreeSet<StateId>,
    new_errors: &mut Vec<AnalysisError>,
    cyclic: &mut BTreeSet<SmolStr>,
) {
    if visiting.contains(&current) {
        cyclic.insert(machine.state(current).name.clone());
        return;
    }
    if !visited.insert(current) {
        return;
    }
    visiting.push(current);
    let supers = machine.state(current).super_states.clone();
    for super_id in supers {
        crawl_state(machine, concrete, super_id, tuples, visiting, visited, new_errors, cyclic);
    }
    visiting.pop();
    check_previously_defined(machine, concrete, current, tuples, new_errors);
}

fn check_previously_defined(
    machine: &SemanticStateMachine,
    concrete: StateId,
    current: StateId,
    tuples: &mut BTreeMap<SmolStr, TransitionTuple>,
    new_errors: &mut Vec<AnalysisError>,
) {
    let state = machine.state(current);
    for transition in &state.transitions {
        let event: SmolStr = transition
            .event
            .clone()
            .unwrap_or_else(|| SmolStr::new("null"));
        let this_tuple = TransitionTuple {
            current_state: state.name.clone(),
            next_state: machine.state(transition.next_state).name.clone(),
            actions: transition.actions.clone(),
        };
        match tuples.get(&event) {
            None => {
                tuples.insert(event, this_tuple);
            }
            Some(previous) if same_outcome(previous, &this_tuple) => {}
            Some(previous) => {
                let defining = machine
                    .state_id(&previous.current_state)
                    .expect("defining state is in the arena");
                if is_super_state_of(machine, defining, current) {
                    tuples.insert(event, this_tuple);
                } else {
                    new_errors.push(AnalysisError::with(
                        ErrorId::ConflictingSuperstates,
                        format!("{}|{}", machine.state(concrete).name, event),
                    ));
                }
            }
        }
    }
}

fn same_outcome(a: &TransitionTuple, b: &TransitionTuple) -> bool {
    a.next_state == b.next_state && a.actions == b.actions
}

fn is_super_state_of(machine: &SemanticStateMachine, possible: StateId, state: StateId) -> bool {
    let mut visited: BTreeSet<StateId> = BTreeSet::new();
    fn walk(
        machine: &SemanticStateMachine,
        possible: StateId,
        state: StateId,
        visited: &mut BTreeSet<StateId>,
    ) -> bool {
        if state == possible {
            return true;
        }
        if !visited.insert(state) {
            return false;
        }
        machine
            .state(state)
            .super_states
            .iter()
            .any(|super_id| walk(machine, possible, *super_id, visited))
    }
    walk(machine, possible, state, &mut visited)
}
