//! Hygiene: source-level budgets for patterns the crate keeps out of `src/`.
//!
//! Each budget is a ceiling (ideally zero). Test files (`*_test.rs`) are not
//! scanned. If a budget has to grow, remove an existing hit first.

use std::fs;
use std::path::Path;

struct Budget {
    pattern: &'static str,
    max: usize,
    note: &'static str,
}

// Panics.
const UNWRAP: Budget = Budget { pattern: ".unwrap()", max: 0, note: "propagate or match instead" };
const EXPECT: Budget = Budget { pattern: ".expect(", max: 0, note: "propagate or match instead" };
const PANIC: Budget = Budget { pattern: "panic!(", max: 0, note: "input handlers must not crash the page" };
const UNREACHABLE: Budget = Budget { pattern: "unreachable!(", max: 0, note: "make the state unrepresentable" };
const TODO: Budget = Budget { pattern: "todo!(", max: 0, note: "no stubs in shipped code" };
const UNIMPLEMENTED: Budget = Budget { pattern: "unimplemented!(", max: 0, note: "no stubs in shipped code" };

// Silent loss.
const SILENT_DISCARD: Budget = Budget { pattern: "let _ =", max: 0, note: "inspect the value" };
const DOT_OK: Budget = Budget { pattern: ".ok()", max: 0, note: "handle the error" };

// Output goes through `tracing`.
const PRINTLN: Budget = Budget { pattern: "println!(", max: 0, note: "use tracing" };
const DBG: Budget = Budget { pattern: "dbg!(", max: 0, note: "use tracing" };

// Structure.
const ALLOW_DEAD_CODE: Budget = Budget { pattern: "#[allow(dead_code)]", max: 0, note: "delete unused code" };

/// Production `.rs` files under `src/` as `(path, content)`.
fn source_files() -> Vec<(String, String)> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<(String, String)>) {
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
        if !path_str.ends_with(".rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push((path_str, content));
        }
    }
}

fn check(budget: &Budget) {
    let hits: Vec<(String, usize)> = source_files()
        .into_iter()
        .filter_map(|(path, content)| {
            let count = content.lines().filter(|line| line.contains(budget.pattern)).count();
            (count > 0).then_some((path, count))
        })
        .collect();
    let count: usize = hits.iter().map(|(_, c)| c).sum();
    let listing = hits
        .iter()
        .map(|(path, c)| format!("  {path}: {c}"))
        .collect::<Vec<_>>()
        .join("\n");
    assert!(
        count <= budget.max,
        "`{}` budget exceeded: found {count}, max {} ({}).\n{listing}",
        budget.pattern,
        budget.max,
        budget.note
    );
}

#[test]
fn sources_are_found() {
    assert!(source_files().iter().any(|(path, _)| path.ends_with("engine.rs")));
}

#[test]
fn unwrap_budget() {
    check(&UNWRAP);
}

#[test]
fn expect_budget() {
    check(&EXPECT);
}

#[test]
fn panic_budget() {
    check(&PANIC);
}

#[test]
fn unreachable_budget() {
    check(&UNREACHABLE);
}

#[test]
fn todo_budget() {
    check(&TODO);
}

#[test]
fn unimplemented_budget() {
    check(&UNIMPLEMENTED);
}

#[test]
fn silent_discard_budget() {
    check(&SILENT_DISCARD);
}

#[test]
fn dot_ok_budget() {
    check(&DOT_OK);
}

#[test]
fn println_budget() {
    check(&PRINTLN);
}

#[test]
fn dbg_budget() {
    check(&DBG);
}

#[test]
fn allow_dead_code_budget() {
    check(&ALLOW_DEAD_CODE);
}
