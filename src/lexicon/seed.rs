//! Predefined vocabulary used to bootstrap an empty dictionary

use super::category::{ADJECTIVE, ADVERB, ARTICLE, LEXICAL_ERROR, NOUN, OTHER, VERB};

/// Seed lexemes per category, in registration order. `LEXICAL_ERROR` starts
/// as an empty bucket.
pub const SEED_VOCABULARY: &[(&str, &[&str])] = &[
    (
        ARTICLE,
        &["el", "la", "los", "las", "un", "una", "unos", "unas"],
    ),
    (NOUN, &["Nietzsche", "temas", "libro", "mundo", "persona"]),
    (
        VERB,
        &[
            "escribir", "leer", "ser", "haber", "ir", "escribió", "escriben",
        ],
    ),
    (
        ADJECTIVE,
        &["grande", "pequeño", "bueno", "malo", "nuevo", "viejo"],
    ),
    (
        ADVERB,
        &[
            "rápidamente",
            "lentamente",
            "bien",
            "mal",
            "cerca",
            "lejos",
        ],
    ),
    (
        OTHER,
        &["sobre", "con", "sin", "en", "por", "para", "y", "o", "a", "de"],
    ),
    (LEXICAL_ERROR, &[]),
];

/// Total number of seed lexemes
pub fn seed_size() -> usize {
    SEED_VOCABULARY.iter().map(|(_, lexemes)| lexemes.len()).sum()
}
