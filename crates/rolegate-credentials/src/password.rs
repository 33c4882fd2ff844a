//! Random password generation.

use rand::seq::SliceRandom;
use rand::Rng;

/// Characters a generated password is drawn from.
///
/// Letters and digits that are easily confused when read off a terminal
/// (`i`, `j`, `l`, `o` in either case, `0`, `1`) are left out.
pub const ALPHABET: &[u8] = b"abcdefghkmnpqrstuvwxyzABCDEFGHKMNPQRSTUVWXYZ23456789";

/// Length of every generated password.
pub const PASSWORD_LENGTH: usize = 16;

/// Generates a password from the thread-local random source.
pub fn generate_password() -> String {
    generate_password_with(&mut rand::thread_rng())
}

/// Generates a password from `rng`.
pub fn generate_password_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..PASSWORD_LENGTH)
        .filter_map(|_| ALPHABET.choose(&mut *rng))
        .map(|&b| char::from(b))
        .collect()
}
