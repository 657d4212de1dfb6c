//! Language name to code resolution.

/// The base language; translation is the identity for it.
pub const BASE_LANGUAGE: &str = "en";

/// Known language names and their two-letter codes.
const LANGUAGE_TABLE: &[(&str, &str)] = &[
    ("english", "en"),
    ("german", "de"),
    ("french", "fr"),
    ("spanish", "es"),
    ("hindi", "hi"),
    ("albanian", "sq"),
    ("afrikaans", "af"),
    ("amharic", "am"),
    ("arabic", "ar"),
    ("bengali", "bn"),
    ("chinese", "zh"),
    ("japanese", "ja"),
    ("korean", "ko"),
    ("russian", "ru"),
    ("turkish", "tr"),
    ("urdu", "ur"),
];

/// Resolves a language name (or code) to a two-letter code.
///
/// Unknown names fall back to the base language. A value that already
/// looks like a known code is passed through.
pub fn language_code(name: &str) -> &'static str {
    let lowered = name.trim().to_lowercase();
    if let Some((_, code)) = LANGUAGE_TABLE.iter().find(|(n, _)| *n == lowered) {
        return code;
    }
    if let Some((_, code)) = LANGUAGE_TABLE.iter().find(|(_, c)| *c == lowered) {
        return code;
    }
    BASE_LANGUAGE
}

/// Whether the given name or code resolves to the base language.
pub fn is_base_language(name: &str) -> bool {
    language_code(name) == BASE_LANGUAGE
}
