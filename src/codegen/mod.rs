// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Code generation: the language-neutral nested switch/case tree and the
//! target renderers that turn it into source text.
//!
//! [`generate`] lowers an optimized machine into an [`FsmClassNode`]. Each
//! renderer walks that tree with an [`NscVisitor`] and accumulates plain
//! strings; nothing here touches the filesystem. Rendering fails with
//! [`RenderError::NoActionsClass`] when the machine declared no `Actions`
//! header, because every backend binds the generated code to that class; in
//! that case no files are produced at all.

mod c;
mod cpp;
mod generator;
mod java;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::fmt;

use smol_str::SmolStr;

pub use c::CRenderer;
pub use cpp::CppRenderer;
pub use generator::generate;
pub use java::JavaRenderer;

/// One node of the nested switch/case tree. The set is closed: renderers
/// match on it exhaustively, so a new node kind forces every renderer to
/// decide how to emit it.
#[derive(Debug, Clone)]
pub enum NscNode {
    SwitchCase(SwitchCaseNode),
    Case(Box<CaseNode>),
    FunctionCall(FunctionCallNode),
    Enum(EnumNode),
    StateProperty(StatePropertyNode),
    EventDelegators(EventDelegatorsNode),
    FsmClass(Box<FsmClassNode>),
    HandleEvent(Box<HandleEventNode>),
    Enumerator(EnumeratorNode),
    DefaultCase(DefaultCaseNode),
}

impl NscNode {
    pub fn accept(&self, visitor: &mut dyn NscVisitor) {
        match self {
            Self::SwitchCase(node) => visitor.visit_switch_case(node),
            Self::Case(node) => visitor.visit_case(node),
            Self::FunctionCall(node) => visitor.visit_function_call(node),
            Self::Enum(node) => visitor.visit_enum(node),
            Self::StateProperty(node) => visitor.visit_state_property(node),
            Self::EventDelegators(node) => visitor.visit_event_delegators(node),
            Self::FsmClass(node) => visitor.visit_fsm_class(node),
            Self::HandleEvent(node) => visitor.visit_handle_event(node),
            Self::Enumerator(node) => visitor.visit_enumerator(node),
            Self::DefaultCase(node) => visitor.visit_default_case(node),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SwitchCaseNode {
    pub variable_name: SmolStr,
    pub cases: Vec<NscNode>,
}

impl SwitchCaseNode {
    pub fn generate_cases(&self, visitor: &mut dyn NscVisitor) {
        for case in &self.cases {
            case.accept(visitor);
        }
    }
}

#[derive(Debug, Clone)]
pub struct CaseNode {
    pub switch_name: SmolStr,
    pub case_name: SmolStr,
    pub body: Vec<NscNode>,
}

impl CaseNode {
    pub fn generate_body(&self, visitor: &mut dyn NscVisitor) {
        for node in &self.body {
            node.accept(visitor);
        }
    }
}

#[derive(Debug, Clone)]
pub struct FunctionCallNode {
    pub function_name: SmolStr,
    pub argument: Option<Box<NscNode>>,
}

#[derive(Debug, Clone)]
pub struct EnumNode {
    pub name: SmolStr,
    pub enumerators: Vec<SmolStr>,
}

#[derive(Debug, Clone)]
pub struct StatePropertyNode {
    pub initial_state: SmolStr,
}

#[derive(Debug, Clone)]
pub struct EventDelegatorsNode {
    pub events: Vec<SmolStr>,
}

#[derive(Debug, Clone)]
pub struct HandleEventNode {
    pub switch_case: SwitchCaseNode,
}

#[derive(Debug, Clone)]
pub struct EnumeratorNode {
    pub enumeration: SmolStr,
    pub enumerator: SmolStr,
}

#[derive(Debug, Clone)]
pub struct DefaultCaseNode {
    pub state: SmolStr,
}

/// Root of the generated tree: everything a renderer needs to emit one
/// complete FSM class.
#[derive(Debug, Clone)]
pub struct FsmClassNode {
    pub class_name: SmolStr,
    pub actions_name: Option<SmolStr>,
    pub actions: Vec<SmolStr>,
    pub delegators: EventDelegatorsNode,
    pub state_enum: EnumNode,
    pub event_enum: EnumNode,
    pub state_property: StatePropertyNode,
    pub handle_event: HandleEventNode,
}

/// One visit method per node kind; renderers keep their emission state in
/// `self`.
pub trait NscVisitor {
    fn visit_switch_case(&mut self, node: &SwitchCaseNode);
    fn visit_case(&mut self, node: &CaseNode);
    fn visit_function_call(&mut self, node: &FunctionCallNode);
    fn visit_enum(&mut self, node: &EnumNode);
    fn visit_state_property(&mut self, node: &StatePropertyNode);
    fn visit_event_delegators(&mut self, node: &EventDelegatorsNode);
    fn visit_fsm_class(&mut self, node: &FsmClassNode);
    fn visit_handle_event(&mut self, node: &HandleEventNode);
    fn visit_enumerator(&mut self, node: &EnumeratorNode);
    fn visit_default_case(&mut self, node: &DefaultCaseNode);
}

/// A rendered source file, named relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderError {
    NoActionsClass,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoActionsClass => {
                f.write_str("no Actions header; generated code cannot be bound to an actions class")
            }
        }
    }
}

impl std::error::Error for RenderError {}

/// A code generation backend for one target language.
pub trait TargetRenderer: Sync {
    fn target(&self) -> &'static str;

    fn render(
        &self,
        fsm: &FsmClassNode,
        flags: &BTreeMap<String, String>,
    ) -> Result<Vec<OutputFile>, RenderError>;
}

/// Looks up a backend by target name, case-insensitively.
pub fn renderer_for(target: &str) -> Option<&'static dyn TargetRenderer> {
    static RENDERERS: [&(dyn TargetRenderer); 3] = [&JavaRenderer, &CRenderer, &CppRenderer];
    RENDERERS
        .iter()
        .copied()
        .find(|renderer| renderer.target().eq_ignore_ascii_case(target))
}
