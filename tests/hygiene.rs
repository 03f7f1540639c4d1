//! Hygiene checks over the library and binary sources.
//!
//! Production code under `src/` (test files excluded) is scanned for patterns
//! that crash, silently drop errors, or bypass tracing. Each budget is zero.
#![allow(clippy::absurd_extreme_comparisons)]

use std::fs;
use std::path::Path;

// Panics.
const MAX_UNWRAP: usize = 0;
const MAX_EXPECT: usize = 0;
const MAX_PANIC: usize = 0;
const MAX_UNREACHABLE: usize = 0;
const MAX_TODO: usize = 0;
const MAX_UNIMPLEMENTED: usize = 0;

// Silent loss.
const MAX_SILENT_DISCARD: usize = 0;
const MAX_DOT_OK: usize = 0;

// Output goes through tracing or the JSON writer.
const MAX_PRINTLN: usize = 0;

const MAX_ALLOW_DEAD_CODE: usize = 0;

struct SourceFile {
    path: String,
    content: String,
}

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
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            if path_str.ends_with("_test.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

/// Per-file count of lines containing any of `patterns`.
fn count_in_source(files: &[SourceFile], patterns: &[&str]) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file
                .content
                .lines()
                .filter(|line| patterns.iter().any(|p| line.contains(p)))
                .count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

fn check(patterns: &[&str], max: usize) {
    let files = source_files();
    assert!(!files.is_empty(), "no sources found under src/");
    let hits = count_in_source(&files, patterns);
    let count: usize = hits.iter().map(|(_, c)| c).sum();
    let listing = hits
        .iter()
        .map(|(path, count)| format!("  {path}: {count}"))
        .collect::<Vec<_>>()
        .join("\n");
    assert!(count <= max, "{patterns:?} budget exceeded: found {count}, max {max}.\n{listing}");
}

#[test]
fn unwrap_budget() {
    check(&[".unwrap()"], MAX_UNWRAP);
}

#[test]
fn expect_budget() {
    check(&[".expect("], MAX_EXPECT);
}

#[test]
fn panic_budget() {
    check(&["panic!("], MAX_PANIC);
}

#[test]
fn unreachable_budget() {
    check(&["unreachable!("], MAX_UNREACHABLE);
}

#[test]
fn todo_budget() {
    check(&["todo!("], MAX_TODO);
}

#[test]
fn unimplemented_budget() {
    check(&["unimplemented!("], MAX_UNIMPLEMENTED);
}

#[test]
fn silent_discard_budget() {
    check(&["let _ ="], MAX_SILENT_DISCARD);
}

#[test]
fn dot_ok_budget() {
    check(&[".ok()"], MAX_DOT_OK);
}

#[test]
fn println_budget() {
    check(&["println!(", "print!("], MAX_PRINTLN);
}

#[test]
fn allow_dead_code_budget() {
    check(&["#[allow(dead_code)]"], MAX_ALLOW_DEAD_CODE);
}
