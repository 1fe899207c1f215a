//! Manifest entities - the generated API surface of a library
//!
//! Shaped after the custom elements manifest format. The document is
//! rebuilt from scratch on every generation pass; post-processing walks the
//! typed tree rather than the serialized text so that a path rewrite can
//! never touch an unrelated string field.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::BuildResult;

/// Schema version written into every manifest
pub const MANIFEST_SCHEMA_VERSION: &str = "1.0.0";

/// Root of the manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestDocument {
    pub schema_version: String,
    #[serde(default)]
    pub readme: String,
    #[serde(default)]
    pub modules: Vec<ModuleDoc>,
}

impl Default for ManifestDocument {
    fn default() -> Self {
        Self {
            schema_version: MANIFEST_SCHEMA_VERSION.to_string(),
            readme: String::new(),
            modules: Vec::new(),
        }
    }
}

impl ManifestDocument {
    pub fn new(modules: Vec<ModuleDoc>) -> Self {
        Self {
            modules,
            ..Self::default()
        }
    }

    /// Visit every path-bearing field in the document.
    ///
    /// Covers module paths, export declaration modules and superclass
    /// modules. Package references are not paths and are left alone.
    pub fn visit_paths_mut(&mut self, mut f: impl FnMut(&mut String)) {
        for module in &mut self.modules {
            f(&mut module.path);
            for declaration in &mut module.declarations {
                if let Some(module_ref) = declaration
                    .superclass
                    .as_mut()
                    .and_then(|r| r.module.as_mut())
                {
                    f(module_ref);
                }
            }
            for export in &mut module.exports {
                if let Some(module_ref) = export.declaration.module.as_mut() {
                    f(module_ref);
                }
            }
        }
    }

    /// Collect every path-bearing field, in document order
    pub fn paths(&self) -> Vec<String> {
        let mut copy = self.clone();
        let mut out = Vec::new();
        copy.visit_paths_mut(|p| out.push(p.clone()));
        out
    }

    /// Pretty JSON, two-space indent, trailing newline
    pub fn to_json_string(&self) -> BuildResult<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

/// One analyzed source module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDoc {
    pub kind: String,
    pub path: String,
    #[serde(default)]
    pub declarations: Vec<DeclarationDoc>,
    #[serde(default)]
    pub exports: Vec<ExportDoc>,
}

impl ModuleDoc {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            kind: "javascript-module".to_string(),
            path: path.into(),
            declarations: Vec::new(),
            exports: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    Class,
    Function,
    Variable,
}

/// A top-level declaration of a module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationDoc {
    pub kind: DeclarationKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<MemberDoc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub custom_element: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slots: Vec<NamedDoc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<NamedDoc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub css_properties: Vec<NamedDoc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub css_parts: Vec<NamedDoc>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<CommandDoc>,
}

impl DeclarationDoc {
    pub fn new(kind: DeclarationKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            description: String::new(),
            members: Vec::new(),
            superclass: None,
            tag_name: None,
            custom_element: false,
            slots: Vec::new(),
            events: Vec::new(),
            css_properties: Vec::new(),
            css_parts: Vec::new(),
            metadata: BTreeMap::new(),
            commands: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Field,
    Method,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Privacy {
    Public,
    Private,
    Protected,
}

/// Class field, accessor or method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDoc {
    pub kind: MemberKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy: Option<Privacy>,
    #[serde(rename = "static", default, skip_serializing_if = "std::ops::Not::not")]
    pub is_static: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// Name plus optional description (slots, events, CSS properties)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedDoc {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// Entry of a declaration's `commands` list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDoc {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportKind {
    Js,
    CustomElementDefinition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDoc {
    pub kind: ExportKind,
    pub name: String,
    pub declaration: Reference,
}

/// Pointer to a declaration in a module or an external package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
}

impl Reference {
    pub fn in_module(name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: Some(module.into()),
            package: None,
        }
    }

    pub fn in_package(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: None,
            package: Some(package.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ManifestDocument {
        let mut class = DeclarationDoc::new(DeclarationKind::Class, "Alert");
        class.superclass = Some(Reference::in_module("BaseElement", "src/base.ts"));
        class.commands.push(CommandDoc {
            name: "close".to_string(),
            description: "close the alert".to_string(),
        });

        let mut module = ModuleDoc::new("src/alert/element.ts");
        module.declarations.push(class);
        module.exports.push(ExportDoc {
            kind: ExportKind::Js,
            name: "Alert".to_string(),
            declaration: Reference::in_module("Alert", "src/alert/element.ts"),
        });
        ManifestDocument::new(vec![module])
    }

    #[test]
    fn visit_paths_reaches_every_path_field() {
        let doc = sample();
        assert_eq!(
            doc.paths(),
            vec!["src/alert/element.ts", "src/base.ts", "src/alert/element.ts"]
        );
    }

    #[test]
    fn visit_paths_skips_package_references() {
        let mut doc = sample();
        doc.modules[0].declarations[0].superclass = Some(Reference::in_package("LitElement", "lit"));
        let mut seen = Vec::new();
        doc.visit_paths_mut(|p| seen.push(p.clone()));
        assert!(!seen.iter().any(|p| p == "lit"));
    }

    #[test]
    fn json_uses_camel_case_and_trailing_newline() {
        let json = sample().to_json_string().unwrap();
        assert!(json.starts_with("{\n  \"schemaVersion\": \"1.0.0\""));
        assert!(json.ends_with("}\n"));
        assert!(!json.contains("tagName"));
        assert!(json.contains("\"kind\": \"javascript-module\""));
    }

    #[test]
    fn json_round_trips() {
        let doc = sample();
        let json = doc.to_json_string().unwrap();
        let back: ManifestDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }
}
