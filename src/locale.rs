//! Locale presentation overrides

/// Reorder a language preference list so Chinese locales come first.
///
/// Returns a new list; the input is never mutated and nothing is persisted.
/// Chinese tags keep their relative order, and `zh-CN` is prepended when no
/// Chinese tag is present.
pub fn prioritize_chinese(languages: &[String]) -> Vec<String> {
    if languages.iter().any(|lang| lang.starts_with("zh")) {
        let (chinese, rest): (Vec<String>, Vec<String>) = languages
            .iter()
            .cloned()
            .partition(|lang| lang.starts_with("zh"));
        chinese.into_iter().chain(rest).collect()
    } else {
        std::iter::once("zh-CN".to_string())
            .chain(languages.iter().cloned())
            .collect()
    }
}
