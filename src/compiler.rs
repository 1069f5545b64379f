// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The end-to-end compilation pipeline.
//!
//! [`compile`] runs lex, parse, semantic analysis, hierarchy flattening, and
//! rendering in sequence. Each phase gates the next: syntax errors stop the
//! pipeline before analysis, semantic errors stop it before code generation,
//! and a renderer failure yields no files at all. Warnings never gate; a
//! clean compile reports them alongside the rendered files.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::codegen::{generate, renderer_for, OutputFile, RenderError};
use crate::lexer::{FsmLexer, Lexer};
use crate::optimizer::optimize;
use crate::parser::{FsmSyntax, Parser, ParserEvent, SyntaxBuilder, SyntaxError};
use crate::semantics::{analyze, AnalysisError};

/// Compiler settings, deserializable from a JSON config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Where rendered files go; the current directory when absent.
    #[serde(default)]
    pub output_directory: Option<PathBuf>,
    /// Target language, matched case-insensitively.
    #[serde(default = "default_target")]
    pub target: String,
    /// Renderer-specific flags, such as `package` for Java.
    #[serde(default)]
    pub flags: BTreeMap<String, String>,
}

fn default_target() -> String {
    "java".to_string()
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self { output_directory: None, target: default_target(), flags: BTreeMap::new() }
    }
}

/// The outcome of a clean compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileReport {
    pub files: Vec<OutputFile>,
    pub warnings: Vec<AnalysisError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    Syntax(Vec<SyntaxError>),
    Semantic { errors: Vec<AnalysisError>, warnings: Vec<AnalysisError> },
    UnknownTarget(String),
    Render(RenderError),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax(errors) => {
                let plural = if errors.len() == 1 { "" } else { "s" };
                writeln!(f, "Compiled with {} syntax error{plural}", errors.len())?;
                for error in errors {
                    writeln!(f, "{error}")?;
                }
                Ok(())
            }
            Self::Semantic { errors, .. } => {
                let plural = if errors.len() == 1 { "" } else { "s" };
                writeln!(f, "Compiled with {} semantic error{plural}", errors.len())?;
                for error in errors {
                    writeln!(f, "{error}")?;
                }
                Ok(())
            }
            Self::UnknownTarget(target) => write!(f, "Unknown target language: {target}"),
            Self::Render(error) => write!(f, "Implementation error: {error}"),
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(error) => Some(error),
            _ => None,
        }
    }
}

/// Lexes and parses a source text into the syntax tree, errors included.
pub fn parse(source: &str) -> FsmSyntax {
    let mut parser = Parser::new(SyntaxBuilder::new());
    FsmLexer::new().lex(source, &mut parser);
    parser.handle_event(ParserEvent::Eof, -1, -1);
    parser.into_builder().into_fsm()
}

/// Compiles a source text to rendered files for the configured target.
pub fn compile(source: &str, config: &CompilerConfig) -> Result<CompileReport, CompileError> {
    let fsm = parse(source);
    if !fsm.errors.is_empty() {
        return Err(CompileError::Syntax(fsm.errors.clone()));
    }

    let machine = analyze(&fsm);
    if !machine.errors.is_empty() {
        return Err(CompileError::Semantic {
            errors: machine.errors.clone(),
            warnings: machine.warnings.clone(),
        });
    }

    let renderer = renderer_for(&config.target)
        .ok_or_else(|| CompileError::UnknownTarget(config.target.clone()))?;
    let class = generate(&optimize(&machine));
    let files = renderer.render(&class, &config.flags).map_err(CompileError::Render)?;
    Ok(CompileReport { files, warnings: machine.warnings.clone() })
}
