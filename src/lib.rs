// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Proteus — a finite state machine compiler.
//!
//! Proteus compiles a small state transition table language into nested
//! switch/case implementations for Java, C, and C++. The pipeline is
//! lexing, table-driven parsing, semantic analysis, hierarchy flattening,
//! and target rendering; [`compiler::compile`] runs the whole thing.

pub mod codegen;
pub mod compiler;
pub mod lexer;
pub mod names;
pub mod optimizer;
pub mod parser;
pub mod semantics;
