//! Language registry — user-facing language names to Judge0 language ids.
//!
//! The only place that knows the execution backend's identifier scheme.
//! Supporting another language is one more entry in `LANGUAGES`.

/// One supported language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageEntry {
    /// Name shown to users and in error messages.
    pub display_name: &'static str,
    /// Other accepted spellings (matched case-insensitively, like the display name).
    pub aliases: &'static [&'static str],
    /// Judge0 `language_id`.
    pub backend_id: u32,
    /// Markdown code-fence tag used when quoting source to the assistant.
    pub fence: &'static str,
}

/// The supported set. Ids are Judge0 CE's.
pub const LANGUAGES: &[LanguageEntry] = &[
    LanguageEntry {
        display_name: "C++",
        aliases: &["cpp", "c++17", "g++"],
        backend_id: 54,
        fence: "cpp",
    },
    LanguageEntry {
        display_name: "Java",
        aliases: &[],
        backend_id: 62,
        fence: "java",
    },
    LanguageEntry {
        display_name: "Python",
        aliases: &["python3", "py"],
        backend_id: 71,
        fence: "python",
    },
    LanguageEntry {
        display_name: "JavaScript",
        aliases: &["js", "node"],
        backend_id: 63,
        fence: "javascript",
    },
];

/// Look up the registry entry for a language name.
pub fn lookup(name: &str) -> Option<&'static LanguageEntry> {
    let name = name.trim();
    LANGUAGES.iter().find(|entry| {
        entry.display_name.eq_ignore_ascii_case(name)
            || entry.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    })
}

/// Resolve a language name to its Judge0 id.
pub fn resolve(name: &str) -> Option<u32> {
    lookup(name).map(|entry| entry.backend_id)
}

/// Display names of every supported language, in table order.
pub fn supported() -> Vec<&'static str> {
    LANGUAGES.iter().map(|entry| entry.display_name).collect()
}
