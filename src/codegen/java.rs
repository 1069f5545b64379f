// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use crate::codegen::{
    CaseNode, DefaultCaseNode, EnumNode, EnumeratorNode, EventDelegatorsNode, FsmClassNode,
    FunctionCallNode, HandleEventNode, NscVisitor, OutputFile, RenderError, StatePropertyNode,
    SwitchCaseNode, TargetRenderer,
};

/// Emits a single abstract Java class implementing the actions interface.
/// The `package` flag, when present and non-empty, prefixes the file with a
/// package declaration.
pub struct JavaRenderer;

impl TargetRenderer for JavaRenderer {
    fn target(&self) -> &'static str {
        "java"
    }

    fn render(
        &self,
        fsm: &FsmClassNode,
        flags: &BTreeMap<String, String>,
    ) -> Result<Vec<OutputFile>, RenderError> {
        if fsm.actions_name.is_none() {
            return Err(RenderError::NoActionsClass);
        }
        let mut visitor = JavaVisitor {
            output: String::new(),
            java_package: flags.get("package").filter(|p| !p.is_empty()).cloned(),
        };
        visitor.visit_fsm_class(fsm);
        Ok(vec![OutputFile {
            name: format!("{}.java", fsm.class_name),
            content: visitor.output,
        }])
    }
}

struct JavaVisitor {
    output: String,
    java_package: Option<String>,
}

impl NscVisitor for JavaVisitor {
    fn visit_switch_case(&mut self, node: &SwitchCaseNode) {
        self.output.push_str(&format!("switch({}) {{\n", node.variable_name));
        node.generate_cases(self);
        self.output.push_str("}\n");
    }

    fn visit_case(&mut self, node: &CaseNode) {
        self.output.push_str(&format!("case {}:\n", node.case_name));
        node.generate_body(self);
        self.output.push_str("break;\n");
    }

    fn visit_function_call(&mut self, node: &FunctionCallNode) {
        self.output.push_str(&format!("{}(", node.function_name));
        if let Some(argument) = &node.argument {
            argument.accept(self);
        }
        self.output.push_str(");\n");
    }

    fn visit_enum(&mut self, node: &EnumNode) {
        let enumerators = node.enumerators.join(",");
        self.output.push_str(&format!("private enum {} {{{enumerators}}}\n", node.name));
    }

    fn visit_state_property(&mut self, node: &StatePropertyNode) {
        self.output.push_str(&format!(
            "private State state = State.{};\nprivate void setState(State s) {{state = s;}}\n",
            node.initial_state
        ));
    }

    fn visit_event_delegators(&mut self, node: &EventDelegatorsNode) {
        for event in &node.events {
            self.output
                .push_str(&format!("public void {event}() {{handleEvent(Event.{event});}}\n"));
        }
    }

    fn visit_fsm_class(&mut self, node: &FsmClassNode) {
        let Some(actions_name) = &node.actions_name else { return };

        if let Some(package) = self.java_package.clone() {
            self.output.push_str(&format!("package {package};\n"));
        }
        self.output.push_str(&format!(
            "public abstract class {} implements {actions_name} {{\n",
            node.class_name
        ));
        self.output
            .push_str("public abstract void unhandledTransition(String state, String event);\n");
        self.visit_enum(&node.state_enum);
        self.visit_enum(&node.event_enum);
        self.visit_state_property(&node.state_property);
        self.visit_event_delegators(&node.delegators);
        self.visit_handle_event(&node.handle_event);
        self.output.push_str("}\n");
    }

    fn visit_handle_event(&mut self, node: &HandleEventNode) {
        self.output.push_str("private void handleEvent(Event event) {\n");
        self.visit_switch_case(&node.switch_case);
        self.output.push_str("}\n");
    }

    fn visit_enumerator(&mut self, node: &EnumeratorNode) {
        self.output.push_str(&format!("{}.{}", node.enumeration, node.enumerator));
    }

    fn visit_default_case(&mut self, _node: &DefaultCaseNode) {
        self.output
            .push_str("default: unhandledTransition(state.name(), event.name()); break;\n");
    }
}
