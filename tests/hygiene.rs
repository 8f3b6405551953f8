//! Hygiene — production sources stay free of panics and swallowed errors.
//!
//! Scans `src/` (skipping `*_test.rs` files and the unit-test fixtures) and
//! fails when a pattern exceeds its budget. Budgets only ever go down.

use std::fs;
use std::path::{Path, PathBuf};

/// (pattern, budget, why it is banned)
const BUDGETS: &[(&str, usize, &str)] = &[
    (".unwrap()", 0, "panics on error"),
    (".expect(", 0, "panics on error"),
    ("panic!(", 0, "panics"),
    ("unreachable!(", 0, "panics"),
    ("todo!(", 0, "unfinished code"),
    ("unimplemented!(", 0, "unfinished code"),
    ("let _ =", 0, "discards a result without looking at it"),
    (".ok()", 0, "drops the error"),
    ("#[allow(dead_code)]", 0, "hides unused code"),
];

struct SourceFile {
    path: PathBuf,
    content: String,
}

fn is_production(path: &Path) -> bool {
    let name = path.file_name().unwrap_or_default().to_string_lossy();
    path.extension().is_some_and(|e| e == "rs") && !name.ends_with("_test.rs") && name != "test_helpers.rs"
}

fn collect(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(&path, out);
        } else if is_production(&path) {
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path, content });
            }
        }
    }
}

fn production_sources() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect(Path::new("src"), &mut files);
    files
}

#[test]
fn sources_are_found() {
    assert!(production_sources().iter().any(|f| f.path.ends_with("lib.rs")));
}

#[test]
fn pattern_budgets_hold() {
    let files = production_sources();
    let mut report = Vec::new();

    for (pattern, budget, why) in BUDGETS {
        let hits: Vec<String> = files
            .iter()
            .filter_map(|file| {
                let count = file.content.lines().filter(|line| line.contains(pattern)).count();
                (count > 0).then(|| format!("    {}: {count}", file.path.display()))
            })
            .collect();
        let total: usize = files
            .iter()
            .map(|f| f.content.lines().filter(|line| line.contains(pattern)).count())
            .sum();
        if total > *budget {
            report.push(format!("  `{pattern}` ({why}): found {total}, max {budget}\n{}", hits.join("\n")));
        }
    }

    assert!(report.is_empty(), "hygiene budgets exceeded:\n{}", report.join("\n"));
}

#[test]
fn every_module_with_logic_has_unit_tests() {
    let missing: Vec<String> = production_sources()
        .into_iter()
        .filter(|file| file.content.contains("fn "))
        .filter(|file| !file.path.ends_with("lib.rs") && !file.path.ends_with("mod.rs"))
        .filter(|file| {
            let stem = file.path.file_stem().unwrap_or_default().to_string_lossy().to_string();
            !file.path.with_file_name(format!("{stem}_test.rs")).exists()
        })
        .map(|file| file.path.display().to_string())
        .collect();

    assert!(missing.is_empty(), "modules without a sibling _test.rs:\n  {}", missing.join("\n  "));
}
