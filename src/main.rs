// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Proteus CLI entrypoint.
//!
//! Compiles one state transition table file and writes the generated source
//! files next to the current directory, or under `--output`.

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use proteus::compiler::{compile, CompilerConfig};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--output <dir>] [--target <java|c|cpp>] [--flag <name=value>]... <source-file>\n  {program} --config <config.json> <source-file>\n\nThe default target is java. --flag may be repeated; for the java target,\n--flag package=<name> selects the package. --config reads the same settings\nfrom a JSON file; explicit options override it."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    output: Option<String>,
    target: Option<String>,
    flags: Vec<(String, String)>,
    config: Option<String>,
    source: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--output" => {
                if options.output.is_some() {
                    return Err(());
                }
                options.output = Some(args.next().ok_or(())?);
            }
            "--target" => {
                if options.target.is_some() {
                    return Err(());
                }
                options.target = Some(args.next().ok_or(())?);
            }
            "--flag" => {
                let raw = args.next().ok_or(())?;
                let (name, value) = raw.split_once('=').ok_or(())?;
                options.flags.push((name.to_string(), value.to_string()));
            }
            "--config" => {
                if options.config.is_some() {
                    return Err(());
                }
                options.config = Some(args.next().ok_or(())?);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.source.is_some() {
                    return Err(());
                }
                options.source = Some(arg);
            }
        }
    }

    if options.source.is_none() {
        return Err(());
    }

    Ok(options)
}

fn build_config(options: &CliOptions) -> Result<CompilerConfig, Box<dyn Error>> {
    let mut config = match &options.config {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => CompilerConfig::default(),
    };

    if let Some(output) = &options.output {
        config.output_directory = Some(PathBuf::from(output));
    }
    if let Some(target) = &options.target {
        config.target = target.clone();
    }
    config
        .flags
        .extend(options.flags.iter().map(|(name, value)| (name.clone(), value.clone())));
    Ok(config)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "proteus".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let config = build_config(&options)?;
        let source_file = options.source.as_deref().unwrap_or_default();
        let source = fs::read_to_string(source_file)?;

        let report = match compile(&source, &config) {
            Ok(report) => report,
            Err(error) => {
                eprintln!("{error}");
                std::process::exit(1);
            }
        };

        for warning in &report.warnings {
            eprintln!("Warning: {warning}");
        }

        if let Some(dir) = &config.output_directory {
            fs::create_dir_all(dir)?;
        }
        for file in &report.files {
            let path = match &config.output_directory {
                Some(dir) => dir.join(&file.name),
                None => PathBuf::from(&file.name),
            };
            fs::write(&path, &file.content)?;
            println!("{}", path.display());
        }
        Ok(())
    })();

    if let Err(error) = result {
        eprintln!("proteus: {error}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliOptions, ()> {
        parse_options(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn source_file_is_required() {
        assert_eq!(parse(&[]), Err(()));
        assert_eq!(parse(&["--target", "c"]), Err(()));
    }

    #[test]
    fn options_are_collected() {
        let options = parse(&[
            "--output",
            "out",
            "--target",
            "java",
            "--flag",
            "package=com.example",
            "turnstile.sm",
        ])
        .unwrap();
        assert_eq!(options.output.as_deref(), Some("out"));
        assert_eq!(options.target.as_deref(), Some("java"));
        assert_eq!(options.flags, [("package".to_string(), "com.example".to_string())]);
        assert_eq!(options.source.as_deref(), Some("turnstile.sm"));
    }

    #[test]
    fn duplicate_and_unknown_options_are_rejected() {
        assert_eq!(parse(&["--target", "c", "--target", "java", "f.sm"]), Err(()));
        assert_eq!(parse(&["--verbose", "f.sm"]), Err(()));
        assert_eq!(parse(&["--flag", "noequals", "f.sm"]), Err(()));
        assert_eq!(parse(&["a.sm", "b.sm"]), Err(()));
    }

    #[test]
    fn cli_options_override_config_file_defaults() {
        let options = CliOptions {
            target: Some("cpp".to_string()),
            flags: vec![("package".to_string(), "p".to_string())],
            source: Some("f.sm".to_string()),
            ..Default::default()
        };
        let config = build_config(&options).unwrap();
        assert_eq!(config.target, "cpp");
        assert_eq!(config.flags.get("package").map(String::as_str), Some("p"));
        assert!(config.output_directory.is_none());
    }
}
