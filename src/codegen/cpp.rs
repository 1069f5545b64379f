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

/// Emits a single C++ header. The machine is a class deriving from the
/// actions class; enum members are prefixed with the enum name to keep the
/// plain enums from colliding.
pub struct CppRenderer;

impl TargetRenderer for CppRenderer {
    fn target(&self) -> &'static str {
        "cpp"
    }

    fn render(
        &self,
        fsm: &FsmClassNode,
        _flags: &BTreeMap<String, String>,
    ) -> Result<Vec<OutputFile>, RenderError> {
        if fsm.actions_name.is_none() {
            return Err(RenderError::NoActionsClass);
        }
        let mut visitor = CppVisitor { output: String::new(), fsm_name: SmolStr::default() };
        visitor.visit_fsm_class(fsm);
        Ok(vec![OutputFile { name: format!("{}.h", fsm.class_name), content: visitor.output }])
    }
}

struct CppVisitor {
    output: String,
    fsm_name: SmolStr,
}

impl NscVisitor for CppVisitor {
    fn visit_switch_case(&mut self, node: &SwitchCaseNode) {
        self.output.push_str(&format!("switch ({}) {{\n", node.variable_name));
        node.generate_cases(self);
        self.output.push_str("}\n");
    }

    fn visit_case(&mut self, node: &CaseNode) {
        self.output.push_str(&format!("case {}_{}:\n", node.switch_name, node.case_name));
        node.generate_body(self);
        self.output.push_str("break;\n\n");
    }

    fn visit_function_call(&mut self, node: &FunctionCallNode) {
        self.output.push_str(&format!("{}(", node.function_name));
        if let Some(argument) = &node.argument {
            argument.accept(self);
        }
        self.output.push_str(");\n");
    }

    fn visit_enum(&mut self, node: &EnumNode) {
        let enumerators: Vec<String> =
            node.enumerators.iter().map(|e| format!("{}_{e}", node.name)).collect();
        self.output
            .push_str(&format!("\tenum {} {{{}}};\n", node.name, enumerators.join(",")));
    }

    fn visit_state_property(&mut self, node: &StatePropertyNode) {
        self.output.push_str(&format!("State_{}", node.initial_state));
    }

    fn visit_event_delegators(&mut self, node: &EventDelegatorsNode) {
        for event in &node.events {
            self.output.push_str(&format!(
                "\tvoid {event}() {{processEvent(Event_{event}, \"{event}\");}}\n"
            ));
        }
    }

    fn visit_fsm_class(&mut self, node: &FsmClassNode) {
        let Some(actions_name) = &node.actions_name else { return };

        self.fsm_name = node.class_name.clone();
        let fsm = self.fsm_name.clone();
        let include_guard = fsm.to_uppercase();
        self.output
            .push_str(&format!("#ifndef {include_guard}_H\n#define {include_guard}_H\n\n"));
        self.output.push_str(&format!("#include \"{actions_name}.h\"\n"));

        self.output.push_str(&format!("\nclass {fsm} : public {actions_name} {{\npublic:\n"));
        self.output.push_str(&format!("\t{fsm}()\n\t: state("));
        self.visit_state_property(&node.state_property);
        self.output.push_str(")\n\t{}\n\n");

        self.visit_event_delegators(&node.delegators);
        self.output.push_str("\nprivate:\n");
        self.visit_enum(&node.state_enum);
        self.output.push_str("\tState state;\n\tvoid setState(State s) {state=s;}\n");
        self.visit_enum(&node.event_enum);
        self.visit_handle_event(&node.handle_event);

        self.output.push_str("};\n\n#endif\n");
    }

    fn visit_handle_event(&mut self, node: &HandleEventNode) {
        self.output.push_str("\tvoid processEvent(Event event, const char* eventName) {\n");
        self.visit_switch_case(&node.switch_case);
        self.output.push_str("}\n\n");
    }

    fn visit_enumerator(&mut self, node: &EnumeratorNode) {
        self.output.push_str(&format!("{}_{}", node.enumeration, node.enumerator));
    }

    fn visit_default_case(&mut self, node: &DefaultCaseNode) {
        self.output.push_str(&format!(
            "default:\nunexpected_transition(\"{}\", eventName);\nbreak;\n",
            node.state
        ));
    }
}
