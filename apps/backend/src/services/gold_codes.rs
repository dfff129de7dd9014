//! Gold code list served to authorized callers.
//!
//! Two real codes are mixed with freshly generated decoys on every call.
//! Access control lives in the `gold_codes:read` scope check, not in where the
//! real codes sit in the list.

use std::collections::HashSet;

use rand::Rng;

/// The two genuine codes. Constant across calls.
pub const REAL_CODES: [&str; 2] = ["HWCK827UG6", "SVSI2SL0YM"];

/// Total number of codes returned.
pub const CODE_COUNT: usize = 10;

/// Length of each generated decoy.
pub const DECOY_LEN: usize = 10;

/// Slots the real codes occupy.
const REAL_CODE_SLOTS: [usize; 2] = [6, 8];

const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// One random uppercase base-36 decoy code.
pub fn decoy_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..DECOY_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Build the ten-code list using `rng` for the decoys.
///
/// Decoys never repeat each other or a real code.
pub fn gold_codes_with<R: Rng + ?Sized>(rng: &mut R) -> Vec<String> {
    let mut seen: HashSet<String> = REAL_CODES.iter().map(|c| c.to_string()).collect();
    let mut decoys = Vec::with_capacity(CODE_COUNT - REAL_CODES.len());

    while decoys.len() < CODE_COUNT - REAL_CODES.len() {
        let candidate = decoy_code(rng);
        if seen.insert(candidate.clone()) {
            decoys.push(candidate);
        }
    }

    let mut decoys = decoys.into_iter();
    let mut real = REAL_CODES.iter();
    (0..CODE_COUNT)
        .map(|slot| {
            let code = if REAL_CODE_SLOTS.contains(&slot) {
                real.next().map(|c| c.to_string())
            } else {
                decoys.next()
            };
            code.unwrap_or_default()
        })
        .collect()
}

/// Build the ten-code list with the thread-local RNG.
pub fn gold_codes() -> Vec<String> {
    gold_codes_with(&mut rand::rng())
}
