use crate::constants::{HUD_SCRAMBLE_ALPHABET, HUD_SEPARATORS};
use crate::rng::RandomSource;

#[inline]
pub fn is_separator(c: char) -> bool {
    HUD_SEPARATORS.contains(&c)
}

#[inline]
pub fn is_scramble_symbol(c: char) -> bool {
    HUD_SCRAMBLE_ALPHABET.contains(c)
}

/// Replace every non-separator character of `text` with a random symbol.
///
/// The result has the same number of characters as `text`, and separators
/// stay where they were, so the glitch keeps the shape of the value.
pub fn scramble(text: &str, rng: &mut dyn RandomSource) -> String {
    let alphabet: Vec<char> = HUD_SCRAMBLE_ALPHABET.chars().collect();
    text.chars()
        .map(|c| {
            if is_separator(c) {
                c
            } else {
                alphabet[rng.index(alphabet.len())]
            }
        })
        .collect()
}
