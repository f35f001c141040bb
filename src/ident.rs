//! Short identifier generation for pastes.

use rand::Rng;

/// Identifiers shorter than this make collisions a practical concern.
pub const MIN_ID_LENGTH: usize = 4;

// Alphanumeric minus the lookalikes (0/O/o, 1/l/I), since ids end up in
// share URLs that get read aloud and retyped.
const ID_ALPHABET: &[u8] = b"23456789abcdefghijkmnpqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ";

/// Generator for collision-resistant short paste identifiers.
///
/// The identifier space is large enough that collisions against the live key
/// set are negligible; the caller still retries on a duplicate insert.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    length: usize,
}

impl IdGenerator {
    /// Create a generator producing ids of the given length.
    ///
    /// Lengths below [`MIN_ID_LENGTH`] are raised to it.
    pub fn new(length: usize) -> Self {
        Self {
            length: length.max(MIN_ID_LENGTH),
        }
    }

    /// Draw a fresh random identifier.
    pub fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.length)
            .map(|_| {
                let idx = rng.gen_range(0..ID_ALPHABET.len());
                ID_ALPHABET[idx] as char
            })
            .collect()
    }
}
