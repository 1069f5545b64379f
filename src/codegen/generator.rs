// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::codegen::{
    CaseNode, DefaultCaseNode, EnumNode, EnumeratorNode, EventDelegatorsNode, FsmClassNode,
    FunctionCallNode, HandleEventNode, NscNode, StatePropertyNode, SwitchCaseNode,
};
use crate::optimizer::{OptimizedStateMachine, SubTransition};

/// Lowers a flattened machine into the nested switch/case tree. The outer
/// switch dispatches on the current state, the inner one on the event; each
/// event case sets the next state and then invokes the declared actions.
pub fn generate(machine: &OptimizedStateMachine) -> FsmClassNode {
    let mut state_switch = SwitchCaseNode { variable_name: "state".into(), cases: Vec::new() };

    for transition in &machine.transitions {
        let mut event_switch =
            SwitchCaseNode { variable_name: "event".into(), cases: Vec::new() };
        for sub in &transition.sub_transitions {
            event_switch.cases.push(event_case(sub));
        }
        event_switch.cases.push(NscNode::DefaultCase(DefaultCaseNode {
            state: transition.current_state.clone(),
        }));

        state_switch.cases.push(NscNode::Case(Box::new(CaseNode {
            switch_name: "State".into(),
            case_name: transition.current_state.clone(),
            body: vec![NscNode::SwitchCase(event_switch)],
        })));
    }

    FsmClassNode {
        class_name: machine.header.fsm.clone(),
        actions_name: machine.header.actions.clone(),
        actions: machine.actions.clone(),
        delegators: EventDelegatorsNode { events: machine.events.clone() },
        state_enum: EnumNode { name: "State".into(), enumerators: machine.states.clone() },
        event_enum: EnumNode { name: "Event".into(), enumerators: machine.events.clone() },
        state_property: StatePropertyNode { initial_state: machine.header.initial.clone() },
        handle_event: HandleEventNode { switch_case: state_switch },
    }
}

fn event_case(sub: &SubTransition) -> NscNode {
    let mut body = vec![NscNode::FunctionCall(FunctionCallNode {
        function_name: "setState".into(),
        argument: Some(Box::new(NscNode::Enumerator(EnumeratorNode {
            enumeration: "State".into(),
            enumerator: sub.next_state.clone(),
        }))),
    })];
    for action in &sub.actions {
        body.push(NscNode::FunctionCall(FunctionCallNode {
            function_name: action.clone(),
            argument: None,
        }));
    }
    NscNode::Case(Box::new(CaseNode {
        switch_name: "Event".into(),
        case_name: sub.event.clone(),
        body,
    }))
}
