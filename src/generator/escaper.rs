//! Escaping of raw bytes for placement inside a double-quoted C string literal.
//!
//! Only `\`, `"` and newline are rewritten. Every other byte, including other control
//! characters and NUL, passes through untouched. Content containing such bytes may not
//! survive as a string literal, which is why [Embedding](crate::config::Embedding) can
//! choose a byte array instead.

/// Escape `input` so it can be placed between double quotes.
pub fn escape(input: &[u8]) -> Vec<u8> {
    let mut escaped = Vec::with_capacity(input.len());
    for &byte in input {
        match byte {
            b'"' | b'\\' => {
                escaped.push(b'\\');
                escaped.push(byte);
            }
            b'\n' => escaped.extend_from_slice(b"\\n"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Escape a string. Only ascii bytes are rewritten, so the lossy conversion never
/// replaces anything.
pub fn escape_str(input: &str) -> String {
    String::from_utf8_lossy(&escape(input.as_bytes())).into_owned()
}

/// Checks whether `content` can be embedded as a string literal without relying on bytes
/// the escaper leaves alone.
pub fn is_literal_safe(content: &[u8]) -> bool {
    match std::str::from_utf8(content) {
        Ok(text) => text
            .chars()
            .all(|c| c == '\n' || c == '\t' || !c.is_control()),
        Err(_) => false,
    }
}
