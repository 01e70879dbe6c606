//! Trigram similarity compatible with Postgres `pg_trgm`.
//!
//! Text is lowercased and split into words of alphanumeric characters. Each
//! word is padded with two spaces in front and one behind, and every run of
//! three characters in the padded word is a trigram. Similarity is the number
//! of shared trigrams divided by the size of the union.

use std::collections::BTreeSet;

pub type Trigrams = BTreeSet<[char; 3]>;

pub fn trigrams(text: &str) -> Trigrams {
    let mut set = Trigrams::new();

    for word in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
    {
        let padded: Vec<char> = "  "
            .chars()
            .chain(word.chars().flat_map(char::to_lowercase))
            .chain(std::iter::once(' '))
            .collect();

        for window in padded.windows(3) {
            set.insert([window[0], window[1], window[2]]);
        }
    }

    set
}

/// Similarity of two trigram sets in `[0, 1]`; zero when either is empty.
pub fn set_similarity(a: &Trigrams, b: &Trigrams) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let shared = a.intersection(b).count();
    shared as f32 / (a.len() + b.len() - shared) as f32
}

pub fn similarity(a: &str, b: &str) -> f32 {
    set_similarity(&trigrams(a), &trigrams(b))
}
