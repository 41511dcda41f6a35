//! Target profiles: read-only configuration of a target language's conventions.
//!
//! A profile starts from the per-language defaults and can be overridden by a YAML or JSON
//! file; fields missing from the file keep their defaults.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::diagnostics::TranslateError;
use crate::err_msg;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
    Cpp,
    #[value(name = "csharp")]
    CSharp,
}

impl TargetLanguage {
    /// Extension of the file holding the type declaration, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            TargetLanguage::Cpp => "h",
            TargetLanguage::CSharp => "cs",
        }
    }

    /// Extension of the separate file holding method definitions, for targets that have one.
    pub fn source_extension(&self) -> Option<&'static str> {
        match self {
            TargetLanguage::Cpp => Some("cpp"),
            TargetLanguage::CSharp => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetLanguage::Cpp => "cpp",
            TargetLanguage::CSharp => "csharp",
        }
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marker emitted after reference types in declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerStyle {
    Star,
    Caret,
    None,
}

impl PointerStyle {
    pub fn marker(&self) -> &'static str {
        match self {
            PointerStyle::Star => "*",
            PointerStyle::Caret => "^",
            PointerStyle::None => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetProfile {
    pub language: TargetLanguage,
    pub pointer_style: PointerStyle,
    pub preferred_indent: usize,
    pub source_tab_stop: usize,
    pub expand_tabs: bool,
    /// Java primitive keyword to target type.
    pub primitive_types: BTreeMap<String, String>,
    /// Java class name to target type name.
    pub type_renames: BTreeMap<String, String>,
}

/// A profile file: every field optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProfileOverrides {
    language: Option<TargetLanguage>,
    pointer_style: Option<PointerStyle>,
    preferred_indent: Option<usize>,
    source_tab_stop: Option<usize>,
    expand_tabs: Option<bool>,
    #[serde(default)]
    primitive_types: BTreeMap<String, String>,
    #[serde(default)]
    type_renames: BTreeMap<String, String>,
}

fn table(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl TargetProfile {
    pub fn for_language(language: TargetLanguage) -> Self {
        match language {
            TargetLanguage::Cpp => Self::cpp(),
            TargetLanguage::CSharp => Self::csharp(),
        }
    }

    pub fn cpp() -> Self {
        Self {
            language: TargetLanguage::Cpp,
            pointer_style: PointerStyle::Star,
            preferred_indent: 4,
            source_tab_stop: 4,
            expand_tabs: false,
            primitive_types: table(&[
                ("boolean", "bool"),
                ("byte", "char"),
                ("char", "wchar_t"),
                ("short", "short"),
                ("int", "int"),
                ("long", "long long"),
                ("float", "float"),
                ("double", "double"),
                ("void", "void"),
            ]),
            type_renames: BTreeMap::new(),
        }
    }

    pub fn csharp() -> Self {
        Self {
            language: TargetLanguage::CSharp,
            pointer_style: PointerStyle::None,
            preferred_indent: 4,
            source_tab_stop: 4,
            expand_tabs: false,
            primitive_types: table(&[
                ("boolean", "bool"),
                ("byte", "sbyte"),
                ("char", "char"),
                ("short", "short"),
                ("int", "int"),
                ("long", "long"),
                ("float", "float"),
                ("double", "double"),
                ("void", "void"),
            ]),
            type_renames: table(&[("String", "string"), ("Object", "object")]),
        }
    }

    /// Target spelling of a Java primitive keyword.
    pub fn primitive_type<'a>(&'a self, keyword: &'a str) -> &'a str {
        self.primitive_types
            .get(keyword)
            .map(String::as_str)
            .unwrap_or(keyword)
    }

    /// Rename for a Java class name, looked up by the dotted name first and then by its last
    /// segment. `None` means the name is written as it stands.
    pub fn renamed_type(&self, dotted: &str) -> Option<&str> {
        let last = dotted.rsplit('.').next().unwrap_or(dotted);
        self.type_renames
            .get(dotted)
            .or_else(|| self.type_renames.get(last))
            .map(String::as_str)
    }

    pub fn pointer_marker(&self) -> &'static str {
        self.pointer_style.marker()
    }

    fn apply(mut self, overrides: ProfileOverrides) -> Result<Self, TranslateError> {
        if let Some(language) = overrides.language {
            if language != self.language {
                return Err(err_msg!(
                    Config,
                    "profile is for `{}` but the target is `{}`",
                    language,
                    self.language
                ));
            }
        }
        if let Some(style) = overrides.pointer_style {
            self.pointer_style = style;
        }
        if let Some(indent) = overrides.preferred_indent {
            if indent == 0 {
                return Err(err_msg!(Config, "preferred_indent must be at least 1"));
            }
            self.preferred_indent = indent;
        }
        if let Some(tab_stop) = overrides.source_tab_stop {
            if tab_stop == 0 {
                return Err(err_msg!(Config, "source_tab_stop must be at least 1"));
            }
            self.source_tab_stop = tab_stop;
        }
        if let Some(expand) = overrides.expand_tabs {
            self.expand_tabs = expand;
        }
        self.primitive_types.extend(overrides.primitive_types);
        self.type_renames.extend(overrides.type_renames);
        Ok(self)
    }

    pub fn from_yaml_str(language: TargetLanguage, text: &str) -> Result<Self, TranslateError> {
        let overrides: ProfileOverrides = if text.trim().is_empty() {
            ProfileOverrides::default()
        } else {
            serde_yaml::from_str(text).map_err(|e| err_msg!(Config, "invalid profile: {}", e))?
        };
        Self::for_language(language).apply(overrides)
    }

    pub fn from_json_str(language: TargetLanguage, text: &str) -> Result<Self, TranslateError> {
        let overrides: ProfileOverrides =
            serde_json::from_str(text).map_err(|e| err_msg!(Config, "invalid profile: {}", e))?;
        Self::for_language(language).apply(overrides)
    }

    /// Loads a profile file; `.json` files are read as JSON, anything else as YAML.
    pub fn load(language: TargetLanguage, path: &Path) -> Result<Self, TranslateError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            TranslateError::io(format!("cannot read profile {}", path.display()), e)
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(language, &text),
            _ => Self::from_yaml_str(language, &text),
        }
    }

    pub fn to_yaml(&self) -> Result<String, TranslateError> {
        serde_yaml::to_string(self).map_err(|e| err_msg!(Config, "cannot serialize profile: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ErrorType;

    #[test]
    fn defaults_per_language() {
        let cpp = TargetProfile::cpp();
        assert_eq!(cpp.pointer_marker(), "*");
        assert_eq!(cpp.primitive_type("boolean"), "bool");
        assert_eq!(cpp.renamed_type("String"), None);
        let cs = TargetProfile::csharp();
        assert_eq!(cs.pointer_marker(), "");
        assert_eq!(cs.renamed_type("String"), Some("string"));
        assert_eq!(cs.renamed_type("java.lang.String"), Some("string"));
        assert_eq!(cs.primitive_type("int"), "int");
    }

    #[test]
    fn yaml_overrides_keep_missing_defaults() {
        let yaml = "pointer_style: caret\nexpand_tabs: true\ntype_renames:\n  List: Vector\n";
        let profile = TargetProfile::from_yaml_str(TargetLanguage::Cpp, yaml).unwrap();
        assert_eq!(profile.pointer_marker(), "^");
        assert!(profile.expand_tabs);
        assert_eq!(profile.preferred_indent, 4);
        assert_eq!(profile.renamed_type("List"), Some("Vector"));
        assert_eq!(profile.primitive_type("long"), "long long");
    }

    #[test]
    fn json_profile_parses() {
        let json = r#"{"language": "csharp", "preferred_indent": 2}"#;
        let profile = TargetProfile::from_json_str(TargetLanguage::CSharp, json).unwrap();
        assert_eq!(profile.preferred_indent, 2);
    }

    #[test]
    fn mismatched_language_is_config_error() {
        let err = TargetProfile::from_yaml_str(TargetLanguage::Cpp, "language: csharp").unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Config);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = TargetProfile::from_yaml_str(TargetLanguage::Cpp, "indent: 3").unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Config);
    }

    #[test]
    fn profile_serializes_to_yaml() {
        let yaml = TargetProfile::csharp().to_yaml().unwrap();
        assert!(yaml.contains("language: csharp"));
        assert!(yaml.contains("pointer_style: none"));
    }
}
