//! Random text generation for the producer.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// A random ASCII alphanumeric string of `len` characters.
pub fn random_text<R: Rng>(rng: &mut R, len: usize) -> String {
    rng.sample_iter(Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Between `min` and `max` (inclusive) random texts of `len` characters.
pub fn random_batch<R: Rng>(rng: &mut R, min: usize, max: usize, len: usize) -> Vec<String> {
    let size = rng.gen_range(min..=max.max(min));
    (0..size).map(|_| random_text(rng, len)).collect()
}
