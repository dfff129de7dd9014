//! Fixed credential rule used in place of a real identity store.
//!
//! Any non-blank username is accepted together with the shared demo
//! passphrase. The passphrase is compared through BLAKE3 digests, whose
//! equality check runs in constant time.

/// Shared passphrase accepted for every username.
pub const DEMO_PASSPHRASE: &str = "password";

/// Check a submitted username/password pair.
///
/// Never fails: empty or whitespace-only input is simply invalid.
pub fn validate(username: &str, password: &str) -> bool {
    if username.trim().is_empty() || password.is_empty() {
        return false;
    }

    blake3::hash(password.as_bytes()) == blake3::hash(DEMO_PASSPHRASE.as_bytes())
}
