//! Canonical content-hash format.
//!
//! Every hash stored in the registry and every hash a client submits must be
//! a SHA-256 digest encoded as exactly 64 lowercase hexadecimal characters
//! (`^[a-f0-9]{64}$`). Uppercase hex is rejected, not folded.

/// Length of a hex-encoded SHA-256 digest.
pub const SHA256_HEX_LEN: usize = 64;

/// Return true if `s` matches `^[a-f0-9]{64}$`.
pub fn is_sha256_hex(s: &str) -> bool {
    s.len() == SHA256_HEX_LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Explain why `s` is not a canonical hash, or `None` if it is one.
pub fn hash_format_problem(s: &str) -> Option<String> {
    if s.len() != SHA256_HEX_LEN {
        return Some(format!(
            "expected {SHA256_HEX_LEN} characters, found {}",
            s.len()
        ));
    }
    s.char_indices()
        .find(|(_, c)| !matches!(c, '0'..='9' | 'a'..='f'))
        .map(|(idx, c)| format!("character {c:?} at offset {idx} is not lowercase hex"))
}
