//! In-place rewriting of dotenv-style files.
//!
//! The token utility binaries persist refreshed OAuth credentials by
//! rewriting the matching `KEY=value` lines of the local `.env` file.
//! Unrelated lines and comments are preserved; keys that do not exist yet
//! are appended at the end.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

/// Replace the values for the given keys in a dotenv-style file.
///
/// Every matching `KEY=...` line is rewritten; comment lines (leading `#`)
/// are never touched. Keys without an existing line are appended. A missing
/// file is treated as empty and created.
pub fn update_values(path: &Path, updates: &[(&str, &str)]) -> io::Result<()> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e),
    };

    let mut seen: HashSet<&str> = HashSet::new();
    let mut new_lines: Vec<String> = Vec::new();

    for line in contents.lines() {
        if line.contains('=') && !line.trim_start().starts_with('#') {
            let key = line.split('=').next().unwrap_or("").trim();
            if let Some((k, value)) = updates.iter().find(|(k, _)| *k == key) {
                new_lines.push(format!("{}={}", k, value));
                seen.insert(*k);
                continue;
            }
        }
        new_lines.push(line.to_string());
    }

    for (key, value) in updates {
        if !seen.contains(key) {
            new_lines.push(format!("{}={}", key, value));
        }
    }

    let mut output = new_lines.join("\n");
    output.push('\n');
    fs::write(path, output)
}
