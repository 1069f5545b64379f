// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use rstest::rstest;

use crate::codegen::{
    generate, renderer_for, CaseNode, DefaultCaseNode, EnumNode, EnumeratorNode,
    EventDelegatorsNode, FsmClassNode, FunctionCallNode, HandleEventNode, NscVisitor, OutputFile,
    RenderError, StatePropertyNode, SwitchCaseNode,
};
use crate::lexer::{FsmLexer, Lexer};
use crate::optimizer::{optimize, OptimizedStateMachine};
use crate::parser::{Parser, ParserEvent, SyntaxBuilder};
use crate::semantics::analyze;

fn produce_state_machine(source: &str) -> OptimizedStateMachine {
    let mut parser = Parser::new(SyntaxBuilder::new());
    FsmLexer::new().lex(source, &mut parser);
    parser.handle_event(ParserEvent::Eof, -1, -1);
    let ast = analyze(&parser.into_builder().into_fsm());
    optimize(&ast)
}

fn compress_whitespace(s: &str) -> String {
    let collapsed = regex::Regex::new(r"\n+").unwrap().replace_all(s, "\n");
    let spaced = regex::Regex::new(r"[\t ]+").unwrap().replace_all(&collapsed, " ");
    regex::Regex::new(r" *\n *").unwrap().replace_all(&spaced, "\n").into_owned()
}

fn assert_whitespace_equivalent(generated: &str, expected: &str) {
    assert_eq!(compress_whitespace(generated), compress_whitespace(expected));
}

mod generator {
    use super::*;

    fn generate_from(logic: &str) -> FsmClassNode {
        generate(&produce_state_machine(&format!("Initial: I FSM:f Actions:acts {logic}")))
    }

    // Records the switch/case shape of the generated tree as a one line
    // sketch; every other node kind is ignored.
    #[derive(Default)]
    struct SketchVisitor {
        output: String,
    }

    impl NscVisitor for SketchVisitor {
        fn visit_switch_case(&mut self, node: &SwitchCaseNode) {
            self.output.push_str(&format!("s {} {{", node.variable_name));
            node.generate_cases(self);
            self.output.push('}');
        }

        fn visit_case(&mut self, node: &CaseNode) {
            self.output.push_str(&format!("case {} {{", node.case_name));
            node.generate_body(self);
            self.output.push('}');
        }

        fn visit_function_call(&mut self, node: &FunctionCallNode) {
            self.output.push_str(&format!("{}(", node.function_name));
            if let Some(argument) = &node.argument {
                argument.accept(self);
            }
            self.output.push_str(") ");
        }

        fn visit_enum(&mut self, _node: &EnumNode) {}
        fn visit_state_property(&mut self, _node: &StatePropertyNode) {}
        fn visit_event_delegators(&mut self, _node: &EventDelegatorsNode) {}

        fn visit_fsm_class(&mut self, node: &FsmClassNode) {
            self.visit_handle_event(&node.handle_event);
        }

        fn visit_handle_event(&mut self, node: &HandleEventNode) {
            self.visit_switch_case(&node.switch_case);
        }

        fn visit_enumerator(&mut self, node: &EnumeratorNode) {
            self.output.push_str(&format!("{}.{}", node.enumeration, node.enumerator));
        }

        fn visit_default_case(&mut self, node: &DefaultCaseNode) {
            self.output.push_str(&format!(" default({});", node.state));
        }
    }

    fn assert_generated(logic: &str, sketch: &str) {
        let fsm = generate_from(logic);
        let mut visitor = SketchVisitor::default();
        visitor.visit_fsm_class(&fsm);
        assert_eq!(visitor.output, sketch, "logic {logic:?}");
    }

    #[test]
    fn one_transition() {
        assert_generated(
            "{I e I a}",
            "s state {case I {s event {case e {setState(State.I) a() } default(I);}}}",
        );
    }

    #[test]
    fn two_transitions() {
        assert_generated(
            "{I e1 S a1 S e2 I a2}",
            "s state {\
             case I {s event {case e1 {setState(State.S) a1() } default(I);}}\
             case S {s event {case e2 {setState(State.I) a2() } default(S);}}\
             }",
        );
    }

    #[test]
    fn two_states_two_events_four_actions() {
        assert_generated(
            concat!(
                "{\n",
                "  I e1 S a1\n",
                "  I e2 - a2\n",
                "  S e1 I a3\n",
                "  S e2 - a4\n",
                "}",
            ),
            "s state {\
             case I {s event {case e1 {setState(State.S) a1() }\
             case e2 {setState(State.I) a2() } default(I);}}\
             case S {s event {case e1 {setState(State.I) a3() }\
             case e2 {setState(State.S) a4() } default(S);}}\
             }",
        );
    }

    #[test]
    fn enums_hold_states_and_events() {
        let fsm = generate_from("{I e1 S a1 I e2 - a2 S e1 I a3 S e2 - a4}");
        assert_eq!(fsm.state_enum.name, "State");
        assert_eq!(fsm.state_enum.enumerators, ["I", "S"]);
        assert_eq!(fsm.event_enum.name, "Event");
        assert_eq!(fsm.event_enum.enumerators, ["e1", "e2"]);
    }

    #[test]
    fn state_property_holds_initial_state() {
        let fsm = generate_from("{I e I a}");
        assert_eq!(fsm.state_property.initial_state, "I");
    }

    #[test]
    fn delegators_cover_every_event() {
        let fsm = generate_from("{I e1 S a1 I e2 - a2 S e1 I a3 S e2 - a4}");
        assert_eq!(fsm.delegators.events, ["e1", "e2"]);
    }

    #[test]
    fn class_node_carries_header_and_actions() {
        let fsm = generate_from("{I e I a}");
        assert_eq!(fsm.class_name, "f");
        assert_eq!(fsm.actions_name.as_deref(), Some("acts"));
        assert_eq!(fsm.actions, ["a"]);
    }
}

mod renderers {
    use super::*;

    const ONE_TRANSITION: &str = "Initial: I\nFSM: fsm\nActions: acts\n{  I E I A}";
    const ONE_TRANSITION_NO_ACTIONS: &str = "Initial: I\nFSM: fsm\n{  I E I A}";

    fn render(target: &str, source: &str) -> Result<Vec<OutputFile>, RenderError> {
        let fsm = generate(&produce_state_machine(source));
        renderer_for(target)
            .expect("known target")
            .render(&fsm, &BTreeMap::new())
    }

    #[rstest]
    #[case("java")]
    #[case("c")]
    #[case("cpp")]
    fn missing_actions_class_is_an_error(#[case] target: &str) {
        assert_eq!(
            render(target, ONE_TRANSITION_NO_ACTIONS),
            Err(RenderError::NoActionsClass)
        );
    }

    #[rstest]
    #[case("Java")]
    #[case("JAVA")]
    #[case("Cpp")]
    #[case("C")]
    fn lookup_is_case_insensitive(#[case] target: &str) {
        assert!(renderer_for(target).is_some());
    }

    #[test]
    fn unknown_target_has_no_renderer() {
        assert!(renderer_for("cobol").is_none());
    }

    #[test]
    fn java_one_transition_with_package() {
        let fsm = generate(&produce_state_machine(ONE_TRANSITION));
        let mut flags = BTreeMap::new();
        flags.insert("package".to_string(), "thePackage".to_string());
        let files = renderer_for("java").expect("known target").render(&fsm, &flags).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "fsm.java");
        assert_whitespace_equivalent(
            &files[0].content,
            concat!(
                "package thePackage;\n",
                "public abstract class fsm implements acts {\n",
                "  public abstract void unhandledTransition(String state, String event);\n",
                "  private enum State {I}\n",
                "  private enum Event {E}\n",
                "  private State state = State.I;\n",
                "  private void setState(State s) {state = s;}\n",
                "  public void E() {handleEvent(Event.E);}\n",
                "  private void handleEvent(Event event) {\n",
                "    switch(state) {\n",
                "      case I:\n",
                "        switch(event) {\n",
                "          case E:\n",
                "            setState(State.I);\n",
                "            A();\n",
                "            break;\n",
                "          default: unhandledTransition(state.name(), event.name()); break;\n",
                "        }\n",
                "        break;\n",
                "    }\n",
                "  }\n",
                "}\n",
            ),
        );
    }

    #[test]
    fn java_one_transition_without_package() {
        let files = render("java", ONE_TRANSITION).unwrap();
        assert!(files[0].content.starts_with("public abstract class fsm implements acts {\n"));
    }

    #[test]
    fn c_one_transition() {
        let files = render("c", ONE_TRANSITION).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].name, "fsm.h");
        assert_eq!(files[1].name, "fsm.c");

        assert_whitespace_equivalent(
            &files[0].content,
            concat!(
                "#ifndef FSM_H\n",
                "#define FSM_H\n",
                "struct acts;\n",
                "struct fsm;\n",
                "struct fsm *make_fsm(struct acts*);\n",
                "void fsm_E(struct fsm*);\n",
                "#endif\n",
            ),
        );

        assert_whitespace_equivalent(
            &files[1].content,
            concat!(
                "#include <stdlib.h>\n",
                "#include \"acts.h\"\n",
                "#include \"fsm.h\"\n",
                "enum Event {E};\n",
                "enum State {I};\n",
                "struct fsm {\n",
                "  enum State state;\n",
                "  struct acts *actions;\n",
                "};\n",
                "struct fsm *make_fsm(struct acts* actions) {\n",
                "  struct fsm *fsm = malloc(sizeof(struct fsm));\n",
                "  fsm->actions = actions;\n",
                "  fsm->state = I;\n",
                "  return fsm;\n",
                "}\n",
                "static void setState(struct fsm *fsm, enum State state) {\n",
                "  fsm->state = state;\n",
                "}\n",
                "static void A(struct fsm *fsm) {\n",
                "  fsm->actions->A();\n",
                "}\n",
                "static void processEvent(enum State state, enum Event event, struct fsm *fsm, char *event_name) {\n",
                "  switch (state) {\n",
                "    case I:\n",
                "      switch (event) {\n",
                "        case E:\n",
                "          setState(fsm, I);\n",
                "          A(fsm);\n",
                "          break;\n",
                "        default:\n",
                "          (fsm->actions->unexpected_transition)(\"I\", event_name);\n",
                "          break;\n",
                "      }\n",
                "      break;\n",
                "  }\n",
                "}\n",
                "void fsm_E(struct fsm* fsm) {\n",
                "  processEvent(fsm->state, E, fsm, \"E\");\n",
                "}\n",
            ),
        );
    }

    #[test]
    fn cpp_one_transition() {
        let files = render("cpp", ONE_TRANSITION).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "fsm.h");

        assert_whitespace_equivalent(
            &files[0].content,
            concat!(
                "#ifndef FSM_H\n",
                "#define FSM_H\n",
                "#include \"acts.h\"\n",
                "class fsm : public acts {\n",
                "public:\n",
                "  fsm()\n",
                "  : state(State_I)\n",
                "  {}\n",
                "  void E() {processEvent(Event_E, \"E\");}\n",
                "private:\n",
                "  enum State {State_I};\n",
                "  State state;\n",
                "  void setState(State s) {state=s;}\n",
                "  enum Event {Event_E};\n",
                "  void processEvent(Event event, const char* eventName) {\n",
                "    switch (state) {\n",
                "      case State_I:\n",
                "        switch (event) {\n",
                "          case Event_E:\n",
                "            setState(State_I);\n",
                "            A();\n",
                "            break;\n",
                "          default:\n",
                "            unexpected_transition(\"I\", eventName);\n",
                "            break;\n",
                "        }\n",
                "        break;\n",
                "    }\n",
                "  }\n",
                "};\n",
                "#endif\n",
            ),
        );
    }
}
