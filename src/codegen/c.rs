// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use smol_str::SmolStr;

use crate::codegen::{
    CaseNode, DefaultCaseNode, EnumNode, EnumeratorNode, EventDelegatorsNode, FsmClassNode,
    FunctionCallNode, HandleEventNode, NscVisitor, OutputFile, RenderError, StatePropertyNode,
    SwitchCaseNode, TargetRenderer,
};

/// Emits a C header/implementation pair. The machine is an opaque struct
/// holding the current state and a pointer to the user's actions struct;
/// events are delegated through free functions named `{fsm}_{event}`.
pub struct CRenderer;

impl TargetRenderer for CRenderer {
    fn target(&self) -> &'static str {
        "c"
    }

    fn render(
        &self,
        fsm: &FsmClassNode,
        _flags: &BTreeMap<String, String>,
    ) -> Result<Vec<OutputFile>, RenderError> {
        if fsm.actions_name.is_none() {
            return Err(RenderError::NoActionsClass);
        }
        let mut visitor = CVisitor {
            header: String::new(),
            implementation: String::new(),
            fsm_name: SmolStr::default(),
            actions_name: SmolStr::default(),
        };
        visitor.visit_fsm_class(fsm);
        let file_name = fsm.class_name.to_lowercase();
        Ok(vec![
            OutputFile { name: format!("{file_name}.h"), content: visitor.header },
            OutputFile { name: format!("{file_name}.c"), content: visitor.implementation },
        ])
    }
}

struct CVisitor {
    header: String,
    implementation: String,
    fsm_name: SmolStr,
    actions_name: SmolStr,
}

impl NscVisitor for CVisitor {
    fn visit_switch_case(&mut self, node: &SwitchCaseNode) {
        self.implementation.push_str(&format!("switch ({}) {{\n", node.variable_name));
        node.generate_cases(self);
        self.implementation.push_str("}\n");
    }

    fn visit_case(&mut self, node: &CaseNode) {
        self.implementation.push_str(&format!("case {}:\n", node.case_name));
        node.generate_body(self);
        self.implementation.push_str("break;\n\n");
    }

    fn visit_function_call(&mut self, node: &FunctionCallNode) {
        self.implementation.push_str(&format!("{}(fsm", node.function_name));
        if let Some(argument) = &node.argument {
            self.implementation.push_str(", ");
            argument.accept(self);
        }
        self.implementation.push_str(");\n");
    }

    fn visit_enum(&mut self, node: &EnumNode) {
        let enumerators = node.enumerators.join(",");
        self.implementation.push_str(&format!("enum {} {{{enumerators}}};\n", node.name));
    }

    fn visit_state_property(&mut self, node: &StatePropertyNode) {
        let fsm = self.fsm_name.clone();
        let actions = self.actions_name.clone();
        self.implementation.push_str(&format!(
            "struct {fsm} *make_{fsm}(struct {actions}* actions) {{\n\
             \tstruct {fsm} *fsm = malloc(sizeof(struct {fsm}));\n\
             \tfsm->actions = actions;\n\
             \tfsm->state = {};\n\
             \treturn fsm;\n\
             }}\n\n",
            node.initial_state
        ));
        self.implementation.push_str(&format!(
            "static void setState(struct {fsm} *fsm, enum State state) {{\n\
             \tfsm->state = state;\n\
             }}\n\n"
        ));
    }

    fn visit_event_delegators(&mut self, node: &EventDelegatorsNode) {
        let fsm = self.fsm_name.clone();
        for event in &node.events {
            self.header.push_str(&format!("void {fsm}_{event}(struct {fsm}*);\n"));
            self.implementation.push_str(&format!(
                "void {fsm}_{event}(struct {fsm}* fsm) {{\n\
                 \tprocessEvent(fsm->state, {event}, fsm, \"{event}\");\n\
                 }}\n"
            ));
        }
    }

    fn visit_fsm_class(&mut self, node: &FsmClassNode) {
        let Some(actions_name) = &node.actions_name else { return };
        self.actions_name = actions_name.clone();
        self.fsm_name = node.class_name.clone();
        let fsm = self.fsm_name.clone();
        let actions = self.actions_name.clone();

        self.implementation.push_str(&format!(
            "#include <stdlib.h>\n#include \"{actions}.h\"\n#include \"{fsm}.h\"\n\n"
        ));
        self.visit_enum(&node.event_enum);
        self.visit_enum(&node.state_enum);

        self.implementation.push_str(&format!(
            "\nstruct {fsm} {{\n\
             \tenum State state;\n\
             \tstruct {actions} *actions;\n\
             }};\n\n"
        ));

        self.visit_state_property(&node.state_property);

        for action in &node.actions {
            self.implementation.push_str(&format!(
                "static void {action}(struct {fsm} *fsm) {{\n\
                 \tfsm->actions->{action}();\n\
                 }}\n\n"
            ));
        }
        self.visit_handle_event(&node.handle_event);

        let include_guard = fsm.to_uppercase();
        self.header
            .push_str(&format!("#ifndef {include_guard}_H\n#define {include_guard}_H\n\n"));
        self.header.push_str(&format!("struct {actions};\n"));
        self.header.push_str(&format!("struct {fsm};\n"));
        self.header.push_str(&format!("struct {fsm} *make_{fsm}(struct {actions}*);\n"));
        self.visit_event_delegators(&node.delegators);
        self.header.push_str("#endif\n");
    }

    fn visit_handle_event(&mut self, node: &HandleEventNode) {
        self.implementation.push_str(&format!(
            "static void processEvent(enum State state, enum Event event, struct {} *fsm, char *event_name) {{\n",
            self.fsm_name
        ));
        self.visit_switch_case(&node.switch_case);
        self.implementation.push_str("}\n\n");
    }

    fn visit_enumerator(&mut self, node: &EnumeratorNode) {
        self.implementation.push_str(&node.enumerator);
    }

    fn visit_default_case(&mut self, node: &DefaultCaseNode) {
        self.implementation.push_str(&format!(
            "default:\n(fsm->actions->unexpected_transition)(\"{}\", event_name);\nbreak;\n",
            node.state
        ));
    }
}
