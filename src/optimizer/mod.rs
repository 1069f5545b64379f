// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Flattening of the state hierarchy into a plain transition table.
//!
//! Abstract states disappear. Each concrete state collects the transitions of
//! its whole super state hierarchy, nearest definition winning, and each
//! flattened transition carries the full action sequence: exit actions from
//! the source state outward, entry actions from the root down to the target,
//! then the declared actions.


use std::collections::BTreeSet;
use std::fmt;

use smol_str::SmolStr;

use crate::semantics::{SemanticStateMachine, StateId};

#[derive(Debug, Clone, Default)]
pub struct OptimizedStateMachine {
    pub states: Vec<SmolStr>,
    pub events: Vec<SmolStr>,
    pub actions: Vec<SmolStr>,
    pub header: Header,
    pub transitions: Vec<Transition>,
}

#[derive(Debug, Clone, Default)]
pub struct Header {
    pub initial: SmolStr,
    pub fsm: SmolStr,
    pub actions: Option<SmolStr>,
}

#[derive(Debug, Clone)]
pub struct Transition {
    pub current_state: SmolStr,
    pub sub_transitions: Vec<SubTransition>,
}

#[derive(Debug, Clone)]
pub struct SubTransition {
    pub event: SmolStr,
    pub next_state: SmolStr,
    pub actions: Vec<SmolStr>,
}

impl fmt::Display for SubTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  {} {} {{{}}}\n", self.event, self.next_state, self.actions.join(" "))
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{\n", self.current_state)?;
        for sub in &self.sub_transitions {
            write!(f, "{sub}")?;
        }
        f.write_str("}\n")
    }
}

impl OptimizedStateMachine {
    pub fn transitions_to_string(&self) -> String {
        self.transitions.iter().map(Transition::to_string).collect()
    }
}

impl fmt::Display for OptimizedStateMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut transitions = self.transitions_to_string().replace('\n', "\n  ");
        transitions.truncate(transitions.len().saturating_sub(2));
        write!(
            f,
            "Initial: {}\nFSM: {}\nActions:{}\n{{\n  {}}}\n",
            self.header.initial,
            self.header.fsm,
            self.header.actions.as_deref().unwrap_or(""),
            transitions
        )
    }
}

/// Flattens an analyzed machine. The input must have analyzed cleanly; state
/// links are not populated otherwise.
pub fn optimize(machine: &SemanticStateMachine) -> OptimizedStateMachine {
    let mut optimized = OptimizedStateMachine {
        header: Header {
            initial: machine
                .initial_state
                .map(|id| machine.state(id).name.clone())
                .unwrap_or_default(),
            fsm: machine.fsm_name.clone().unwrap_or_default(),
            actions: machine.actions_class.clone(),
        },
        ..Default::default()
    };

    for id in machine.state_ids() {
        if !machine.state(id).abstract_state {
            optimized.states.push(machine.state(id).name.clone());
        }
    }
    optimized.events = machine.events.to_vec();
    optimized.actions = machine.actions.to_vec();

    for id in machine.state_ids() {
        if !machine.state(id).abstract_state {
            optimized.transitions.push(flatten_state(machine, id));
        }
    }
    optimized
}

fn flatten_state(machine: &SemanticStateMachine, current: StateId) -> Transition {
    let mut transition = Transition {
        current_state: machine.state(current).name.clone(),
        sub_transitions: Vec::new(),
    };
    let mut claimed: BTreeSet<SmolStr> = BTreeSet::new();

    // Leaf first: the state's own transitions shadow inherited ones.
    let mut hierarchy = root_first_hierarchy(machine, current);
    hierarchy.reverse();
    for state_in_hierarchy in hierarchy {
        for semantic in &machine.state(state_in_hierarchy).transitions {
            let Some(event) = &semantic.event else { continue };
            if !claimed.insert(event.clone()) {
                continue;
            }
            transition.sub_transitions.push(SubTransition {
                event: event.clone(),
                next_state: machine.state(semantic.next_state).name.clone(),
                actions: flattened_actions(machine, current, semantic.next_state, semantic),
            });
        }
    }
    transition
}

fn flattened_actions(
    machine: &SemanticStateMachine,
    exit_state: StateId,
    entry_state: StateId,
    semantic: &crate::semantics::SemanticTransition,
) -> Vec<SmolStr> {
    let mut actions: Vec<SmolStr> = Vec::new();
    let mut exit_hierarchy = root_first_hierarchy(machine, exit_state);
    exit_hierarchy.reverse();
    for id in exit_hierarchy {
        actions.extend(machine.state(id).exit_actions.iter().cloned());
    }
    for id in root_first_hierarchy(machine, entry_state) {
        actions.extend(machine.state(id).entry_actions.iter().cloned());
    }
    actions.extend(semantic.actions.iter().cloned());
    actions
}

// Super states come before the states they abstract; the state itself is
// last. Shared ancestors appear once.
fn root_first_hierarchy(machine: &SemanticStateMachine, id: StateId) -> Vec<StateId> {
    let mut hierarchy = Vec::new();
    let mut visited = BTreeSet::new();
    push_hierarchy(machine, id, &mut hierarchy, &mut visited);
    hierarchy
}

fn push_hierarchy(
    machine: &SemanticStateMachine,
    id: StateId,
    hierarchy: &mut Vec<StateId>,
    visited: &mut BTreeSet<StateId>,
) {
    if !visited.insert(id) {
        return;
    }
    for super_id in &machine.state(id).super_states {
        push_hierarchy(machine, *super_id, hierarchy, visited);
    }
    hierarchy.push(id);
}
