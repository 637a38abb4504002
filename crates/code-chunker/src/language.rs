use crate::error::{ChunkerError, Result};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use tree_sitter::Parser;

/// Bare file names (matched case-insensitively) that name a language
const STANDARD_FILE_NAMES: &[(&str, &str)] = &[("dockerfile", "Dockerfile")];

/// Lowercased extension → language name
const STANDARD_EXTENSIONS: &[(&str, &str)] = &[
    ("bash", "bash"),
    ("cc", "cpp"),
    ("cl", "commonlisp"),
    ("c", "c"),
    ("cpp", "cpp"),
    ("cs", "c_sharp"),
    ("csm", "scheme"),
    ("css", "css"),
    ("el", "elisp"),
    ("ex", "elixir"),
    ("elm", "elm"),
    ("et", "embedded_template"),
    ("erl", "erlang"),
    ("gomod", "gomod"),
    ("go", "go"),
    ("hack", "hack"),
    ("hcl", "hcl"),
    ("hs", "haskell"),
    ("html", "html"),
    ("java", "java"),
    ("jl", "julia"),
    ("js", "javascript"),
    ("json", "json"),
    ("jsx", "javascript"),
    ("kt", "kotlin"),
    ("lua", "lua"),
    ("mjs", "javascript"),
    ("mk", "make"),
    ("ml", "ocaml"),
    ("m", "objc"),
    ("php", "php"),
    ("pl", "perl"),
    ("py", "python"),
    ("ql", "ql"),
    ("r", "r"),
    ("regex", "regex"),
    ("rst", "rst"),
    ("rb", "ruby"),
    ("rs", "rust"),
    ("scala", "scala"),
    ("sql", "sql"),
    ("sqlite", "sqlite"),
    ("toml", "toml"),
    ("ts", "typescript"),
    ("tsx", "typescript"),
    ("yaml", "yaml"),
];

/// A tree-sitter grammar that can be turned into a ready parser
#[derive(Clone)]
pub struct Grammar {
    language: tree_sitter::Language,
}

impl Grammar {
    pub fn new(language: impl Into<tree_sitter::Language>) -> Self {
        Self {
            language: language.into(),
        }
    }

    /// Create a parser for this grammar.
    ///
    /// Parsers are not shared; each call gets its own.
    pub fn parser(&self) -> Result<Parser> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ChunkerError::tree_sitter(format!("Failed to set language: {e}")))?;
        Ok(parser)
    }
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar").finish_non_exhaustive()
    }
}

/// Outcome of resolving a path against a [`LanguageRegistry`]
#[derive(Debug, Clone)]
pub struct ResolvedLanguage {
    /// Language name from the registry tables
    pub name: String,

    /// Grammar, when one is wired for the language
    pub grammar: Option<Grammar>,
}

/// Immutable lookup tables from file names and extensions to grammars.
///
/// Built once and handed to the [`Chunker`](crate::Chunker); tests swap in
/// their own tables through the `with_*` builders.
#[derive(Debug, Clone, Default)]
pub struct LanguageRegistry {
    file_names: HashMap<String, String>,
    extensions: HashMap<String, String>,
    grammars: HashMap<String, Grammar>,
}

impl LanguageRegistry {
    /// Empty registry that recognizes nothing
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in extension table and the bundled grammars
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for (name, language) in STANDARD_FILE_NAMES {
            registry = registry.with_file_name(*name, *language);
        }
        for (ext, language) in STANDARD_EXTENSIONS {
            registry = registry.with_extension(*ext, *language);
        }

        registry
            .with_grammar("bash", tree_sitter_bash::LANGUAGE)
            .with_grammar("c_sharp", tree_sitter_c_sharp::LANGUAGE)
            .with_grammar("css", tree_sitter_css::LANGUAGE)
            .with_grammar("go", tree_sitter_go::LANGUAGE)
            .with_grammar("html", tree_sitter_html::LANGUAGE)
            .with_grammar("java", tree_sitter_java::LANGUAGE)
            .with_grammar("javascript", tree_sitter_javascript::LANGUAGE)
            .with_grammar("python", tree_sitter_python::LANGUAGE)
            .with_grammar("rust", tree_sitter_rust::LANGUAGE)
            .with_grammar("typescript", tree_sitter_typescript::LANGUAGE_TYPESCRIPT)
    }

    /// Builder: map a bare file name (case-insensitive) to a language
    #[must_use]
    pub fn with_file_name(mut self, file_name: &str, language: &str) -> Self {
        self.file_names
            .insert(file_name.to_lowercase(), language.to_string());
        self
    }

    /// Builder: map an extension (with or without the leading dot) to a language
    #[must_use]
    pub fn with_extension(mut self, ext: &str, language: &str) -> Self {
        self.extensions.insert(
            ext.trim_start_matches('.').to_lowercase(),
            language.to_string(),
        );
        self
    }

    /// Builder: wire a grammar for a language name
    #[must_use]
    pub fn with_grammar(
        mut self,
        language: &str,
        grammar: impl Into<tree_sitter::Language>,
    ) -> Self {
        self.grammars
            .insert(language.to_string(), Grammar::new(grammar));
        self
    }

    /// Language name registered for an extension
    pub fn language_for_extension(&self, ext: &str) -> Option<&str> {
        self.extensions
            .get(&ext.trim_start_matches('.').to_lowercase())
            .map(String::as_str)
    }

    /// Check if a grammar is wired for this language name
    pub fn has_grammar(&self, language: &str) -> bool {
        self.grammars.contains_key(language)
    }

    /// Names of the languages with a wired grammar, sorted
    pub fn supported_languages(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.grammars.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Map a path to its language.
    ///
    /// Bare file names are checked first and may resolve without a grammar.
    /// Otherwise the lowercased extension must be in the table
    /// (`UnrecognizedFiletype`) and have a grammar (`UnsupportedLanguage`).
    pub fn resolve(&self, path: impl AsRef<Path>) -> Result<ResolvedLanguage> {
        let path = path.as_ref();

        if let Some(file_name) = path.file_name().and_then(|name| name.to_str()) {
            if let Some(language) = self.file_names.get(&file_name.to_lowercase()) {
                return Ok(ResolvedLanguage {
                    name: language.clone(),
                    grammar: self.grammars.get(language).cloned(),
                });
            }
        }

        let ext = extension_of(path);

        let Some(language) = self.extensions.get(&ext) else {
            return Err(ChunkerError::unrecognized_filetype(
                path.display().to_string(),
            ));
        };

        match self.grammars.get(language) {
            Some(grammar) => Ok(ResolvedLanguage {
                name: language.clone(),
                grammar: Some(grammar.clone()),
            }),
            None => Err(ChunkerError::unsupported_language(language.clone())),
        }
    }
}

/// Lowercased text after the last `.` of the file name.
///
/// Unlike `Path::extension`, a dotfile such as `.py` yields `py`.
fn extension_of(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve_name(path: &str) -> Result<String> {
        LanguageRegistry::standard()
            .resolve(path)
            .map(|resolved| resolved.name)
    }

    #[test]
    fn test_resolve_wired_languages() {
        assert_eq!(resolve_name("script.py").unwrap(), "python");
        assert_eq!(resolve_name("app.js").unwrap(), "javascript");
        assert_eq!(resolve_name("main.go").unwrap(), "go");
        assert_eq!(resolve_name("component.tsx").unwrap(), "typescript");
        assert_eq!(resolve_name("src/lib.rs").unwrap(), "rust");
        assert_eq!(resolve_name("Program.cs").unwrap(), "c_sharp");
        assert_eq!(resolve_name("build.bash").unwrap(), "bash");
    }

    #[test]
    fn test_resolve_case_insensitive_extension() {
        let resolved = LanguageRegistry::standard().resolve("Style.CSS").unwrap();
        assert_eq!(resolved.name, "css");
        assert!(resolved.grammar.is_some());
    }

    #[test]
    fn test_dotfile_name_uses_text_after_dot() {
        assert_eq!(resolve_name(".py").unwrap(), "python");
        assert_eq!(resolve_name("scripts/.RS").unwrap(), "rust");
        assert_eq!(extension_of(Path::new("archive.tar.gz")), "gz");
        assert_eq!(extension_of(Path::new("Makefile")), "");
    }

    #[test]
    fn test_dockerfile_has_no_grammar() {
        for path in ["Dockerfile", "deploy/dockerfile", "DOCKERFILE"] {
            let resolved = LanguageRegistry::standard().resolve(path).unwrap();
            assert_eq!(resolved.name, "Dockerfile");
            assert!(resolved.grammar.is_none());
        }
    }

    #[test]
    fn test_unrecognized_filetypes() {
        for path in ["notes.txt", "unknown.xyz", "Makefile"] {
            assert!(
                matches!(resolve_name(path), Err(ChunkerError::UnrecognizedFiletype(_))),
                "{path}"
            );
        }
    }

    #[test]
    fn test_known_but_unwired_language() {
        match resolve_name("query.sql") {
            Err(ChunkerError::UnsupportedLanguage(name)) => assert_eq!(name, "sql"),
            other => panic!("expected UnsupportedLanguage, got {other:?}"),
        }
        assert!(matches!(
            resolve_name("lib.rb"),
            Err(ChunkerError::UnsupportedLanguage(_))
        ));
    }

    #[test]
    fn test_every_grammar_builds_a_parser() {
        let registry = LanguageRegistry::standard();
        assert_eq!(
            registry.supported_languages(),
            vec![
                "bash",
                "c_sharp",
                "css",
                "go",
                "html",
                "java",
                "javascript",
                "python",
                "rust",
                "typescript"
            ]
        );
        for language in registry.supported_languages() {
            assert!(registry.grammars[language].parser().is_ok(), "{language}");
        }
    }

    #[test]
    fn test_every_grammar_is_reachable_by_extension() {
        let registry = LanguageRegistry::standard();
        for language in registry.supported_languages() {
            assert!(
                STANDARD_EXTENSIONS.iter().any(|(_, name)| *name == language),
                "{language} has no extension"
            );
        }
    }

    #[test]
    fn test_substitute_tables() {
        let registry = LanguageRegistry::new()
            .with_extension(".RSX", "rust")
            .with_file_name("Justfile", "just")
            .with_grammar("rust", tree_sitter_rust::LANGUAGE);

        assert_eq!(registry.language_for_extension("rsx"), Some("rust"));
        assert_eq!(registry.resolve("view.rsx").unwrap().name, "rust");
        assert_eq!(registry.resolve("justfile").unwrap().name, "just");
        assert!(registry.resolve("main.rs").is_err());
        assert!(registry.has_grammar("rust"));
        assert!(!registry.has_grammar("python"));
    }
}
