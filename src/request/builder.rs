use crate::registry::Catalog;
use serde::{Serialize, Serializer};

/// How a request's compiler identifier was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The target named a catalog language; its default compiler was used.
    Language(String),
    /// The target was passed through as a compiler identifier, unvalidated.
    Passthrough,
}

/// Immutable description of one compilation, serialized as the body of the
/// service's compile call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompileRequest {
    code: String,
    #[serde(rename = "compiler")]
    compiler_id: String,
    stdin: String,
    save: bool,
    #[serde(rename = "compiler-option-raw", serialize_with = "join_options")]
    compiler_options_raw: Vec<String>,
    #[serde(skip)]
    resolution: Resolution,
}

impl CompileRequest {
    pub fn builder() -> CompileRequestBuilder {
        CompileRequestBuilder::new()
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn compiler_id(&self) -> &str {
        &self.compiler_id
    }

    pub fn stdin(&self) -> &str {
        &self.stdin
    }

    pub fn save(&self) -> bool {
        self.save
    }

    pub fn compiler_options_raw(&self) -> &[String] {
        &self.compiler_options_raw
    }

    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Catalog language the compiler was resolved from, if any.
    pub fn language(&self) -> Option<&str> {
        match &self.resolution {
            Resolution::Language(language) => Some(language),
            Resolution::Passthrough => None,
        }
    }
}

/// The service expects options as one newline-separated string.
fn join_options<S: Serializer>(options: &[String], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&options.join("\n"))
}

#[derive(Debug, Clone, Default)]
pub struct CompileRequestBuilder {
    code: String,
    target: String,
    stdin: String,
    save: bool,
    options: String,
}

impl CompileRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn code(mut self, code: &str) -> Self {
        self.code = code.to_string();
        self
    }

    /// Language name or compiler identifier.
    pub fn target(mut self, target: &str) -> Self {
        self.target = target.to_string();
        self
    }

    pub fn stdin(mut self, stdin: &str) -> Self {
        self.stdin = stdin.to_string();
        self
    }

    pub fn save(mut self, save: bool) -> Self {
        self.save = save;
        self
    }

    /// Space-separated compiler options, e.g. `-O2 -Wall`.
    pub fn options(mut self, options: &str) -> Self {
        self.options = options.to_string();
        self
    }

    /// Resolve the target against `catalog` and freeze the request.
    ///
    /// A target naming a catalog language selects that language's first
    /// compiler. Anything else is lower-cased and used verbatim as the
    /// compiler identifier; an unknown identifier surfaces as a failure from
    /// the service, not here.
    pub fn build(self, catalog: &Catalog) -> CompileRequest {
        let target = self.target.to_lowercase();
        let (compiler_id, resolution) = match catalog.default_compiler(&target) {
            Some(compiler) => (compiler.to_string(), Resolution::Language(target)),
            None => (target, Resolution::Passthrough),
        };

        // split on single spaces: empty tokens are kept so the joined wire
        // value matches the input exactly
        let compiler_options_raw = self.options.split(' ').map(str::to_string).collect();

        CompileRequest {
            code: self.code,
            compiler_id,
            stdin: self.stdin,
            save: self.save,
            compiler_options_raw,
            resolution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{CompilerEntry, DenyList};

    fn python_catalog() -> Catalog {
        Catalog::from_entries(
            vec![
                CompilerEntry::new("Python", "cpython-3.8.2"),
                CompilerEntry::new("Python", "cpython-2.7.18"),
            ],
            &DenyList::default(),
        )
    }

    #[test]
    fn test_language_resolves_to_default_compiler() {
        let request = CompileRequest::builder()
            .code("print(1)")
            .target("Python")
            .stdin("")
            .save(false)
            .options("")
            .build(&python_catalog());

        assert_eq!(request.compiler_id(), "cpython-3.8.2");
        assert_eq!(request.language(), Some("python"));
        assert_eq!(request.resolution(), &Resolution::Language("python".to_string()));
    }

    #[test]
    fn test_unknown_target_passes_through() {
        let request = CompileRequest::builder()
            .code("int main() {}")
            .target("gcc-head")
            .options("-O2 -Wall")
            .build(&python_catalog());

        assert_eq!(request.compiler_id(), "gcc-head");
        assert_eq!(request.resolution(), &Resolution::Passthrough);
        assert_eq!(request.compiler_options_raw(), &["-O2", "-Wall"]);
    }

    #[test]
    fn test_passthrough_is_lowercased() {
        let request = CompileRequest::builder()
            .target("GCC-Head")
            .build(&python_catalog());
        assert_eq!(request.compiler_id(), "gcc-head");
    }

    #[test]
    fn test_compiler_id_matching_a_catalog_entry_is_still_passthrough() {
        let request = CompileRequest::builder()
            .target("cpython-2.7.18")
            .build(&python_catalog());
        assert_eq!(request.compiler_id(), "cpython-2.7.18");
        assert_eq!(request.language(), None);
    }

    #[test]
    fn test_wire_format() {
        let request = CompileRequest::builder()
            .code("print(input())")
            .target("python")
            .stdin("hello")
            .save(true)
            .options("-O2 -Wall")
            .build(&python_catalog());

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "code": "print(input())",
                "compiler": "cpython-3.8.2",
                "stdin": "hello",
                "save": true,
                "compiler-option-raw": "-O2\n-Wall",
            })
        );
    }

    #[test]
    fn test_options_split_on_single_spaces() {
        let request = CompileRequest::builder()
            .target("gcc-head")
            .options("-O2  -g")
            .build(&python_catalog());

        assert_eq!(request.compiler_options_raw(), &["-O2", "", "-g"]);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["compiler-option-raw"], "-O2\n\n-g");
    }

    #[test]
    fn test_empty_options_serialize_to_empty_string() {
        let request = CompileRequest::builder().target("python").build(&python_catalog());
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["compiler-option-raw"], "");
    }
}
