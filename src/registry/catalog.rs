use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Compilers the service advertises but has set up incorrectly.
pub const DEFAULT_BROKEN_COMPILERS: &[&str] = &["ghc-head"];

/// Languages withheld from the catalog as a whole, by lower-cased name.
pub const DEFAULT_BROKEN_LANGUAGES: &[&str] = &["cpp"];

/// One language/compiler pair from the remote catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerEntry {
    pub language: String,
    pub compiler_id: String,
}

impl CompilerEntry {
    pub fn new(language: impl Into<String>, compiler_id: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            compiler_id: compiler_id.into(),
        }
    }
}

/// Compiler identifiers, and whole languages, that are never admitted into
/// a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenyList {
    compilers: HashSet<String>,
    languages: HashSet<String>,
}

impl DenyList {
    pub fn new<I, S>(compilers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            compilers: compilers.into_iter().map(Into::into).collect(),
            languages: HashSet::new(),
        }
    }

    pub fn empty() -> Self {
        Self {
            compilers: HashSet::new(),
            languages: HashSet::new(),
        }
    }

    /// Also deny every compiler of these languages. Matching ignores case.
    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.languages = languages
            .into_iter()
            .map(|l| l.as_ref().to_lowercase())
            .collect();
        self
    }

    pub fn contains(&self, compiler_id: &str) -> bool {
        self.compilers.contains(compiler_id)
    }

    pub fn contains_language(&self, language: &str) -> bool {
        self.languages.contains(&language.to_lowercase())
    }

    /// Whether `entry` must be left out of a catalog.
    pub fn denies(&self, entry: &CompilerEntry) -> bool {
        self.contains(&entry.compiler_id) || self.contains_language(&entry.language)
    }

    pub fn len(&self) -> usize {
        self.compilers.len() + self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compilers.is_empty() && self.languages.is_empty()
    }
}

impl Default for DenyList {
    fn default() -> Self {
        Self::new(DEFAULT_BROKEN_COMPILERS.iter().copied())
            .with_languages(DEFAULT_BROKEN_LANGUAGES.iter().copied())
    }
}

/// A language and its compilers, in service preference order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Language {
    /// Language name as first reported by the service, e.g. `C++`.
    pub name: String,
    pub compilers: Vec<String>,
}

impl Language {
    pub fn default_compiler(&self) -> &str {
        // never constructed without at least one compiler
        &self.compilers[0]
    }
}

/// Immutable language -> compilers mapping built from one catalog fetch.
///
/// Keys are lower-cased language names. Languages are ordered by their first
/// admitted entry (an entry the deny-list rejects does not place its
/// language), and each compiler list keeps service order, so the first
/// compiler of a language is the service's default. A language only exists
/// once at least one of its compilers survives the deny-list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    languages: Vec<Language>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn from_entries<I>(entries: I, deny_list: &DenyList) -> Self
    where
        I: IntoIterator<Item = CompilerEntry>,
    {
        let mut catalog = Catalog::default();

        for entry in entries {
            if deny_list.denies(&entry) {
                continue;
            }

            let key = entry.language.to_lowercase();
            let slot = match catalog.index.get(&key) {
                Some(&slot) => slot,
                None => {
                    catalog.languages.push(Language {
                        name: entry.language,
                        compilers: Vec::new(),
                    });
                    let slot = catalog.languages.len() - 1;
                    catalog.index.insert(key, slot);
                    slot
                }
            };

            catalog.languages[slot].compilers.push(entry.compiler_id);
        }

        catalog
    }

    /// Case-insensitive language lookup.
    pub fn get_compilers(&self, language: &str) -> Option<&[String]> {
        self.language(language).map(|l| l.compilers.as_slice())
    }

    pub fn language(&self, language: &str) -> Option<&Language> {
        self.index
            .get(&language.to_lowercase())
            .map(|&slot| &self.languages[slot])
    }

    pub fn has_language(&self, language: &str) -> bool {
        self.index.contains_key(&language.to_lowercase())
    }

    pub fn default_compiler(&self, language: &str) -> Option<&str> {
        self.language(language).map(Language::default_compiler)
    }

    /// Linear scan; the catalog holds at most a few hundred compilers.
    pub fn is_valid_compiler(&self, compiler_id: &str) -> bool {
        self.languages
            .iter()
            .any(|l| l.compilers.iter().any(|c| c == compiler_id))
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    pub fn language_count(&self) -> usize {
        self.languages.len()
    }

    pub fn compiler_count(&self) -> usize {
        self.languages.iter().map(|l| l.compilers.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entries() -> Vec<CompilerEntry> {
        vec![
            CompilerEntry::new("Python", "cpython-3.8.2"),
            CompilerEntry::new("Haskell", "ghc-head"),
            CompilerEntry::new("C++", "gcc-head"),
            CompilerEntry::new("Python", "cpython-2.7.18"),
            CompilerEntry::new("Haskell", "ghc-9.0.1"),
            CompilerEntry::new("C++", "clang-head"),
        ]
    }

    #[test]
    fn test_groups_by_lowercase_language_in_service_order() {
        let catalog = Catalog::from_entries(sample_entries(), &DenyList::default());

        assert_eq!(catalog.language_count(), 3);
        assert_eq!(
            catalog.get_compilers("python").unwrap(),
            &["cpython-3.8.2", "cpython-2.7.18"]
        );
        assert_eq!(
            catalog.get_compilers("c++").unwrap(),
            &["gcc-head", "clang-head"]
        );

        let names: Vec<&str> = catalog.languages().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Python", "C++", "Haskell"]);
    }

    #[test]
    fn test_denied_language_is_excluded() {
        let deny_list = DenyList::new(["ghc-head"]).with_languages(["C++"]);
        let catalog = Catalog::from_entries(sample_entries(), &deny_list);

        assert!(!catalog.has_language("c++"));
        assert!(!catalog.is_valid_compiler("gcc-head"));
        assert!(!catalog.is_valid_compiler("clang-head"));
        assert_eq!(catalog.language_count(), 2);
    }

    #[test]
    fn test_default_deny_list_withholds_cpp_language() {
        let entries = vec![
            CompilerEntry::new("cpp", "cpp-preprocessor"),
            CompilerEntry::new("C++", "gcc-head"),
        ];
        let catalog = Catalog::from_entries(entries, &DenyList::default());

        assert!(!catalog.has_language("cpp"));
        assert_eq!(catalog.default_compiler("c++"), Some("gcc-head"));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = Catalog::from_entries(sample_entries(), &DenyList::default());
        assert_eq!(catalog.get_compilers("PYTHON"), catalog.get_compilers("python"));
        assert_eq!(catalog.default_compiler("Python"), Some("cpython-3.8.2"));
    }

    #[test]
    fn test_deny_listed_compiler_is_excluded() {
        let catalog = Catalog::from_entries(sample_entries(), &DenyList::default());

        assert_eq!(catalog.get_compilers("haskell").unwrap(), &["ghc-9.0.1"]);
        assert!(!catalog.is_valid_compiler("ghc-head"));
        assert_eq!(catalog.compiler_count(), 5);
    }

    #[test]
    fn test_language_with_only_denied_compilers_is_absent() {
        let entries = vec![
            CompilerEntry::new("Haskell", "ghc-head"),
            CompilerEntry::new("Rust", "rust-head"),
        ];
        let catalog = Catalog::from_entries(entries, &DenyList::default());

        assert!(catalog.get_compilers("haskell").is_none());
        assert!(!catalog.has_language("haskell"));
        assert_eq!(catalog.language_count(), 1);
    }

    #[test]
    fn test_is_valid_compiler() {
        let catalog = Catalog::from_entries(sample_entries(), &DenyList::default());

        assert!(catalog.is_valid_compiler("cpython-3.8.2"));
        assert!(catalog.is_valid_compiler("clang-head"));
        assert!(!catalog.is_valid_compiler("python"));
        assert!(!catalog.is_valid_compiler("nonexistent-1.0"));
    }

    #[test]
    fn test_unknown_language() {
        let catalog = Catalog::from_entries(sample_entries(), &DenyList::empty());
        assert!(catalog.get_compilers("cobol").is_none());
        assert!(catalog.default_compiler("cobol").is_none());
    }

    #[test]
    fn test_empty_deny_list_keeps_everything() {
        let catalog = Catalog::from_entries(sample_entries(), &DenyList::empty());
        assert!(catalog.is_valid_compiler("ghc-head"));
        assert_eq!(catalog.compiler_count(), 6);
    }
}
