//! Candidate module-name heuristics.
//!
//! A plugin's declared name rarely matches its configuration module exactly
//! (`nvim-treesitter` is usually configured by `treesitter.lua`), so the
//! resolver probes a small, ordered family of spellings derived from the
//! name. The derivation is pure string work and deliberately reproduced
//! character-for-character, double suffixes included, because existing
//! configurations may rely on the exact variants it emits.

use std::collections::HashSet;

/// Generate the ordered, deduplicated candidate basenames for `name`.
///
/// Raw candidates, in order, before a stable first-occurrence dedup:
/// 1. the name with every `.` replaced by `-` (the base),
/// 2. the base with a trailing `[.-]n?vim` suffix removed, then a leading
///    `n?vim-` prefix removed from the result,
/// 3. the base again,
/// 4. the base with `-nvim` appended.
pub fn candidates(name: &str) -> Vec<String> {
    let base = name.replace('.', "-");
    let stripped = strip_vim_prefix(strip_vim_suffix(&base)).to_string();
    let raw = [
        base.clone(),
        stripped,
        base.clone(),
        format!("{base}-nvim"),
    ];

    let mut seen = HashSet::new();
    raw.into_iter()
        .filter(|candidate| seen.insert(candidate.clone()))
        .collect()
}

/// Remove one trailing `[.-]n?vim` suffix, case-sensitive.
///
/// The `n` variants are checked first so `-nvim` is not half-stripped to a
/// dangling `-n`.
fn strip_vim_suffix(name: &str) -> &str {
    for suffix in ["-nvim", ".nvim", "-vim", ".vim"] {
        if let Some(stem) = name.strip_suffix(suffix) {
            return stem;
        }
    }
    name
}

/// Remove one leading `n?vim-` prefix, case-sensitive.
fn strip_vim_prefix(name: &str) -> &str {
    name.strip_prefix("nvim-")
        .or_else(|| name.strip_prefix("vim-"))
        .unwrap_or(name)
}
