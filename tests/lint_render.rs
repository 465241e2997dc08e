//! Lint: every `[K]` key label drawn by a `render.rs` must be tappable.
//!
//! A line pushed with `cl.push(...)` is drawn but gets no click target, so a
//! `[K]` label on it works from the keyboard but not on touch screens. Such
//! lines must go through `push_clickable(line, key)` instead.

use std::fs;
use std::path::Path;

/// True if `s` contains a one-character key label like `[P]`, `[+]` or `[-]`.
fn contains_key_label(s: &str) -> bool {
    s.as_bytes().windows(3).any(|w| {
        w[0] == b'[' && w[2] == b']' && (w[1].is_ascii_alphanumeric() || b"+-=".contains(&w[1]))
    })
}

/// `(line_number, line)` for each non-clickable `push(` carrying a key label.
fn find_untappable_labels(source: &str) -> Vec<(usize, String)> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let trimmed = line.trim_start();
            !trimmed.starts_with("//")
                && contains_key_label(line)
                && line.contains(".push(")
                && !line.contains("push_clickable(")
        })
        .map(|(i, line)| (i + 1, line.trim().to_string()))
        .collect()
}

fn visit_render_files(dir: &Path, violations: &mut Vec<(String, usize, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            visit_render_files(&path, violations);
        } else if path.file_name().is_some_and(|n| n == "render.rs") {
            let Ok(source) = fs::read_to_string(&path) else {
                continue;
            };
            for (line_num, line) in find_untappable_labels(&source) {
                violations.push((path.display().to_string(), line_num, line));
            }
        }
    }
}

#[test]
fn no_key_labels_in_non_clickable_push() {
    let src_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut violations = Vec::new();
    visit_render_files(&src_dir, &mut violations);

    if !violations.is_empty() {
        let mut msg = String::from(
            "Found [K] key labels in non-clickable push() calls; use push_clickable().\n\n",
        );
        for (file, line_num, line) in &violations {
            msg.push_str(&format!("  {}:{}: {}\n", file, line_num, line));
        }
        panic!("{}", msg);
    }
}

#[test]
fn render_file_is_scanned() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/pencil/render.rs");
    let source = fs::read_to_string(path).expect("render.rs should exist");
    assert!(source.contains("push_clickable("));
}

#[test]
fn detects_label_in_plain_push() {
    let source = r#"cl.push(Line::from(" [X] Sell"));"#;
    assert_eq!(find_untappable_labels(source).len(), 1);
}

#[test]
fn allows_push_clickable() {
    let source = r#"cl.push_clickable(Line::from(" [X] Sell"), 'x');"#;
    assert!(find_untappable_labels(source).is_empty());
}

#[test]
fn ignores_comments() {
    let source = r#"// cl.push(Line::from(" [P] Make pencil"));"#;
    assert!(find_untappable_labels(source).is_empty());
}

#[test]
fn key_label_detection() {
    assert!(contains_key_label("[P]"));
    assert!(contains_key_label(" [+] Raise price"));
    assert!(contains_key_label("[-]"));
    assert!(!contains_key_label("[]"));
    assert!(!contains_key_label("[PP]"));
    assert!(!contains_key_label("[{}]"));
    assert!(!contains_key_label("ab"));
}
