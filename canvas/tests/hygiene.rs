//! Source hygiene checks for the canvas library.
//!
//! Scans `src/` (test modules excluded) for patterns the library must not ship:
//! anything that can panic on a host, errors dropped on the floor, and ad hoc
//! console output that bypasses `tracing`. Every budget is zero.

use std::fs;
use std::path::Path;

struct SourceFile {
    path: String,
    content: String,
}

struct Rule {
    pattern: &'static str,
    budget: usize,
    why: &'static str,
}

const PANICS: &[Rule] = &[
    Rule { pattern: ".unwrap()", budget: 0, why: "propagate or handle the error" },
    Rule { pattern: ".expect(", budget: 0, why: "propagate or handle the error" },
    Rule { pattern: "panic!(", budget: 0, why: "hosts embed this crate in a render loop" },
    Rule { pattern: "unreachable!(", budget: 0, why: "model the state so it cannot occur" },
    Rule { pattern: "todo!(", budget: 0, why: "unfinished code path" },
    Rule { pattern: "unimplemented!(", budget: 0, why: "unfinished code path" },
];

const DISCARDS: &[Rule] = &[
    Rule { pattern: "let _ =", budget: 0, why: "inspect the value or log it" },
    Rule { pattern: ".ok()", budget: 0, why: "match on the error instead" },
];

const OUTPUT: &[Rule] = &[
    Rule { pattern: "println!(", budget: 0, why: "use tracing" },
    Rule { pattern: "eprintln!(", budget: 0, why: "use tracing" },
    Rule { pattern: "dbg!(", budget: 0, why: "leftover debugging" },
];

const STRUCTURE: &[Rule] = &[Rule { pattern: "#[allow(dead_code)]", budget: 0, why: "delete unused code" }];

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if path.extension().is_none_or(|e| e != "rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

/// Lines matching `pattern`, skipping `//` comments so docs may name the pattern.
fn hits(files: &[SourceFile], pattern: &str) -> Vec<String> {
    files
        .iter()
        .flat_map(|file| {
            file.content
                .lines()
                .enumerate()
                .filter(|(_, line)| !line.trim_start().starts_with("//") && line.contains(pattern))
                .map(|(i, line)| format!("  {}:{}: {}", file.path, i + 1, line.trim()))
        })
        .collect()
}

fn check(rules: &[Rule]) {
    let files = source_files();
    assert!(!files.is_empty(), "no sources found; run from the crate root");

    let mut failures = Vec::new();
    for rule in rules {
        let found = hits(&files, rule.pattern);
        if found.len() > rule.budget {
            failures.push(format!(
                "`{}` budget exceeded: found {}, max {} ({}).\n{}",
                rule.pattern,
                found.len(),
                rule.budget,
                rule.why,
                found.join("\n")
            ));
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n\n"));
}

#[test]
fn no_panicking_calls() {
    check(PANICS);
}

#[test]
fn no_silent_discards() {
    check(DISCARDS);
}

#[test]
fn no_console_output() {
    check(OUTPUT);
}

#[test]
fn no_dead_code_allowances() {
    check(STRUCTURE);
}
