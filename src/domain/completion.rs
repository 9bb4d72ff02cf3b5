//! Post-processing of raw model output.

use std::sync::LazyLock;

use regex::Regex;

static REASONING_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<think>.*?</think>").expect("reasoning pattern is valid"));

static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("blank line pattern is valid"));

/// Strip `<think>...</think>` reasoning traces, collapse blank-line runs, and trim.
pub fn clean_completion(text: &str) -> String {
    let without_reasoning = REASONING_BLOCK.replace_all(text, "");
    let collapsed = BLANK_LINES.replace_all(&without_reasoning, "\n");
    collapsed.trim().to_string()
}
