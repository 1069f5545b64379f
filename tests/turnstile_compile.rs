// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::path::{Path, PathBuf};

use proteus::compiler::{compile, CompilerConfig};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join("turnstiles")
}

fn read_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("failed to read {path:?}: {err}"))
}

fn config_for(target: &str) -> CompilerConfig {
    CompilerConfig { target: target.to_string(), ..Default::default() }
}

#[test]
fn one_coin_turnstile_compiles_for_every_target() {
    let source = read_fixture("one_coin.sm");

    let java = compile(&source, &config_for("java")).expect("java compile");
    assert_eq!(java.files.len(), 1);
    assert_eq!(java.files[0].name, "OneCoinTurnstile.java");
    assert!(java.files[0]
        .content
        .starts_with("public abstract class OneCoinTurnstile implements Turnstile {\n"));
    assert!(java.files[0].content.contains("private enum State {Locked,Unlocked}\n"));
    assert!(java.files[0].content.contains("private enum Event {Coin,Pass}\n"));

    let c = compile(&source, &config_for("c")).expect("c compile");
    let names: Vec<&str> = c.files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["onecointurnstile.h", "onecointurnstile.c"]);
    assert!(c.files[0].content.starts_with("#ifndef ONECOINTURNSTILE_H\n"));
    assert!(c.files[1]
        .content
        .contains("struct OneCoinTurnstile *make_OneCoinTurnstile(struct Turnstile* actions) {\n"));

    let cpp = compile(&source, &config_for("cpp")).expect("cpp compile");
    assert_eq!(cpp.files.len(), 1);
    assert_eq!(cpp.files[0].name, "OneCoinTurnstile.h");
    assert!(cpp.files[0].content.contains("class OneCoinTurnstile : public Turnstile {\n"));
}

#[test]
fn two_coin_turnstile_super_states_are_flattened_into_generated_code() {
    let source = read_fixture("two_coin_super.sm");
    let report = compile(&source, &config_for("java")).expect("java compile");
    let content = &report.files[0].content;

    // The abstract Base state disappears; its Reset transition is inherited.
    assert!(!content.contains("case Base:"));
    assert!(content.contains("private enum State {Alarming,FirstCoin,Locked,Unlocked}\n"));
    assert!(content.contains("private enum Event {Reset,Pass,Coin}\n"));
    assert!(content.contains("case Reset:\n"));

    // Alarming's entry and exit actions ride along on the flattened paths.
    assert!(content.contains("alarmOn();\n"));
    assert!(content.contains("alarmOff();\n"));
}

#[test]
fn semantic_warnings_do_not_block_compilation() {
    // b is declared both abstract and concrete, which warns but still compiles.
    let source = "Actions: a\nFSM: f\nInitial: i\n{(b) e1 i -\nb e2 i -\ni:b e3 i -}";
    let report = compile(source, &config_for("java")).expect("warnings only");
    assert!(!report.warnings.is_empty());
    assert_eq!(report.files.len(), 1);
}
