// src/application/ports/util.rs
pub trait SlugGenerator: Send + Sync {
    /// Canonicalizes `input`: lowercase, transliterate to ASCII, strip
    /// non-alphanumerics, collapse runs into single separators, trim leading
    /// and trailing separators. Empty output is a legal slug.
    fn slugify(&self, input: &str, separator: &str) -> String;
}
