use std::io::Write;

use crossterm::{queue, style};

/// Split a key hint like `"[p] paint"` into (is_key, text) runs.
///
/// Bracketed parts are keys. An unterminated `[` makes the rest plain text.
pub fn hint_runs(item: &str) -> Vec<(bool, &str)> {
    let mut runs = Vec::new();
    let mut rest = item;
    while let Some(open) = rest.find('[') {
        let Some(len) = rest[open..].find(']') else {
            break;
        };
        if open > 0 {
            runs.push((false, &rest[..open]));
        }
        runs.push((true, &rest[open..=open + len]));
        rest = &rest[open + len + 1..];
    }
    if !rest.is_empty() {
        runs.push((false, rest));
    }
    runs
}

/// Queue a key hint: keys bold, labels dim unless `active`.
pub fn print_hint<W: Write>(out: &mut W, item: &str, active: bool) -> anyhow::Result<()> {
    for (is_key, text) in hint_runs(item) {
        let attr = if is_key || active {
            style::Attribute::Bold
        } else {
            style::Attribute::Dim
        };
        queue!(
            out,
            style::SetAttribute(attr),
            style::Print(text),
            style::SetAttribute(style::Attribute::Reset),
        )?;
    }
    Ok(())
}
