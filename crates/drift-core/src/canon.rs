//! Text canonicalization for content comparison and hashing.
//!
//! The upstream plan document is free text rewritten at will by an AI
//! agent, and different renderers disagree about line endings and
//! indentation. Everything that compares or hashes step content goes
//! through [`normalize`] first so cosmetic re-formatting never registers
//! as a content change.

/// Normalizes free-form text for comparison and hashing.
///
/// - `\r\n` and lone `\r` become `\n`
/// - runs of spaces and tabs collapse to a single space
/// - any whitespace run containing a newline collapses to a single newline
/// - leading and trailing whitespace is trimmed
///
/// Total over any input; normalizing an empty string yields an empty
/// string, and the function is idempotent.
pub fn normalize(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut out = String::with_capacity(unified.len());
    let mut pending_space = false;
    let mut pending_newline = false;

    for ch in unified.chars() {
        match ch {
            ' ' | '\t' => pending_space = true,
            // A newline dominates any horizontal whitespace around it.
            '\n' => {
                pending_newline = true;
                pending_space = false;
            }
            _ => {
                if !out.is_empty() {
                    if pending_newline {
                        out.push('\n');
                    } else if pending_space {
                        out.push(' ');
                    }
                }
                pending_newline = false;
                pending_space = false;
                out.push(ch);
            }
        }
    }

    out
}
