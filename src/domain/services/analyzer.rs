//! Declaration analyzer
//!
//! Walks the token stream of one module and produces its [`ModuleDoc`]:
//! classes with their members and JSDoc-derived metadata, exported functions
//! and variables, and the module's exports including `customElements.define`
//! registrations. Paths in the result are relative to the project root with
//! the authoring extension intact; canonicalization happens later over the
//! whole document.

use std::collections::HashMap;
use std::path::Path;

use crate::domain::entities::{
    CommandDoc, DeclarationDoc, DeclarationKind, ExportDoc, ExportKind, MemberDoc, MemberKind,
    ModuleDoc, NamedDoc, Privacy, Reference,
};
use crate::domain::services::doc_comment::{split_name_description, split_named_entry, DocBlock};
use crate::domain::services::lexer::{SourceTokens, TokenKind};
use crate::domain::value_objects::{is_relative_specifier, join_specifier, path_to_slash};
use crate::error::BuildResult;

/// Tags copied into a declaration's `metadata` map by default
pub const DEFAULT_METADATA_TAGS: &[&str] = &["docs", "spec", "status", "since", "example"];

/// Tag whose entries populate `commands`
pub const DEFAULT_COMMAND_TAG: &str = "command";

/// Which doc tags the analyzer extracts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerOptions {
    pub metadata_tags: Vec<String>,
    pub command_tag: String,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            metadata_tags: DEFAULT_METADATA_TAGS.iter().map(|t| t.to_string()).collect(),
            command_tag: DEFAULT_COMMAND_TAG.to_string(),
        }
    }
}

/// Analyze one module.
///
/// `module_path` is the slash path recorded in the manifest; relative import
/// specifiers are resolved against it. `file` is only used in errors.
pub fn analyze_module(
    source: &str,
    file: &Path,
    module_path: &str,
    options: &AnalyzerOptions,
) -> BuildResult<ModuleDoc> {
    let tokens = SourceTokens::new(source, file)?;
    let mut analyzer = Analyzer {
        tokens: &tokens,
        module_path,
        options,
        imports: collect_import_bindings(&tokens),
        module: ModuleDoc::new(module_path),
        local_exports: Vec::new(),
    };
    analyzer.run();
    Ok(analyzer.finish())
}

/// Binding introduced by an import statement
#[derive(Debug, Clone, PartialEq, Eq)]
struct ImportBinding {
    imported: String,
    specifier: String,
}

/// Collect `local name -> (imported name, specifier)` from static imports
fn collect_import_bindings(tokens: &SourceTokens<'_>) -> HashMap<String, ImportBinding> {
    let mut bindings = HashMap::new();
    let mut i = 0;
    while i < tokens.len() {
        let is_import = tokens.is_ident(i, "import")
            && !(i > 0 && tokens.is_punct(i - 1, b'.'))
            && !tokens.is_punct(i + 1, b'(')
            && !tokens.is_punct(i + 1, b'.');
        if !is_import {
            i += 1;
            continue;
        }

        // find the `from '<spec>'` that closes the clause
        let mut end = i + 1;
        while end < tokens.len() && !tokens.is_punct(end, b';') {
            if tokens.is_ident(end, "from")
                && tokens.get(end + 1).map(|t| t.kind) == Some(TokenKind::Str)
            {
                break;
            }
            end += 1;
        }
        let Some(specifier) = tokens
            .get(end + 1)
            .filter(|_| tokens.is_ident(end, "from"))
            .and_then(|t| t.string_value(tokens.source))
        else {
            i = end + 1;
            continue;
        };

        let mut j = i + 1;
        if tokens.is_ident(j, "type") && !tokens.is_ident(j + 1, "from") {
            j += 1;
        }
        while j < end {
            match tokens.get(j).map(|t| t.kind) {
                Some(TokenKind::Ident) if tokens.is_punct(j + 1, b',') || j + 1 == end => {
                    // default import
                    bindings.insert(
                        tokens.text(j).to_string(),
                        ImportBinding {
                            imported: "default".to_string(),
                            specifier: specifier.clone(),
                        },
                    );
                    j += 1;
                }
                Some(TokenKind::Punct(b'*')) if tokens.is_ident(j + 1, "as") => {
                    bindings.insert(
                        tokens.text(j + 2).to_string(),
                        ImportBinding {
                            imported: "*".to_string(),
                            specifier: specifier.clone(),
                        },
                    );
                    j += 3;
                }
                Some(TokenKind::Punct(b'{')) => {
                    let close = tokens.skip_group(j) - 1;
                    for (imported, local) in named_list(tokens, j + 1, close) {
                        bindings.insert(
                            local,
                            ImportBinding {
                                imported,
                                specifier: specifier.clone(),
                            },
                        );
                    }
                    j = close + 1;
                }
                _ => j += 1,
            }
        }
        i = end + 2;
    }
    bindings
}

/// Parse `a, b as c, type d` between braces into `(original, alias)` pairs
fn named_list(tokens: &SourceTokens<'_>, from: usize, to: usize) -> Vec<(String, String)> {
    let mut out = Vec::new();
    let mut i = from;
    while i < to {
        if tokens.is_punct(i, b',') {
            i += 1;
            continue;
        }
        if tokens.is_ident(i, "type") && tokens.get(i + 1).map(|t| t.kind) == Some(TokenKind::Ident) && !tokens.is_ident(i + 1, "as") {
            i += 1;
        }
        let original = name_of(tokens, i);
        if tokens.is_ident(i + 1, "as") {
            out.push((original, name_of(tokens, i + 2)));
            i += 3;
        } else {
            out.push((original.clone(), original));
            i += 1;
        }
    }
    out
}

/// Identifier text, or the cooked value of a string name (`export { "a-b" }`)
fn name_of(tokens: &SourceTokens<'_>, index: usize) -> String {
    tokens
        .get(index)
        .and_then(|t| t.string_value(tokens.source))
        .unwrap_or_else(|| tokens.text(index).to_string())
}

/// Words that may precede a class member name
const MEMBER_MODIFIERS: &[&str] = &[
    "static",
    "public",
    "private",
    "protected",
    "readonly",
    "accessor",
    "async",
    "declare",
    "override",
    "abstract",
    "get",
    "set",
];

struct Analyzer<'a> {
    tokens: &'a SourceTokens<'a>,
    module_path: &'a str,
    options: &'a AnalyzerOptions,
    imports: HashMap<String, ImportBinding>,
    module: ModuleDoc,
    /// `export { a as b }` without a source, resolved after the walk
    local_exports: Vec<(String, String)>,
}

impl Analyzer<'_> {
    fn run(&mut self) {
        let tokens = self.tokens;
        let mut i = 0;
        // first token of the statement being read (decorator or `export`)
        let mut statement_start: Option<usize> = None;

        while i < tokens.len() {
            let token = tokens.code[i];
            match token.kind {
                TokenKind::Punct(b'@') => {
                    statement_start.get_or_insert(i);
                    i = self.skip_decorator(i);
                    continue;
                }
                TokenKind::Punct(b'(' | b'[' | b'{') => {
                    statement_start = None;
                    i = tokens.skip_group(i);
                    continue;
                }
                TokenKind::Punct(b';') => {
                    statement_start = None;
                }
                TokenKind::Ident => {
                    if i > 0 && tokens.is_punct(i - 1, b'.') {
                        i += 1;
                        continue;
                    }
                    match tokens.text(i) {
                        "export" => {
                            statement_start.get_or_insert(i);
                            if let Some(next) = self.read_export_clause(i) {
                                statement_start = None;
                                i = next;
                                continue;
                            }
                        }
                        "class" if self.class_position(i) => {
                            let start = statement_start.take().unwrap_or(i);
                            i = self.read_class(start, i);
                            continue;
                        }
                        "function" => {
                            let start = statement_start.take().unwrap_or(i);
                            if self.is_exported(start, i) {
                                self.read_function(start, i);
                            }
                        }
                        "const" | "let" | "var" => {
                            let start = statement_start.take().unwrap_or(i);
                            if self.is_exported(start, i) {
                                self.read_variable(start, i);
                            }
                        }
                        "customElements" => {
                            self.read_define(i);
                        }
                        "default" | "abstract" | "declare" | "async" => {}
                        _ => {
                            if !self.is_exported_default_ident(i) {
                                statement_start = None;
                            }
                        }
                    }
                }
                _ => {}
            }
            i += 1;
        }
    }

    fn finish(mut self) -> ModuleDoc {
        for (local, exported) in std::mem::take(&mut self.local_exports) {
            let declaration = self.reference_for(&local);
            self.module.exports.push(ExportDoc {
                kind: ExportKind::Js,
                name: exported,
                declaration,
            });
        }
        self.module
    }

    /// `export default Name;`
    fn is_exported_default_ident(&mut self, i: usize) -> bool {
        let t = self.tokens;
        if i >= 2 && t.is_ident(i - 1, "default") && t.is_ident(i - 2, "export") {
            let name = t.text(i).to_string();
            self.local_exports.push((name, "default".to_string()));
            return true;
        }
        false
    }

    /// `class` starting a declaration rather than a class expression
    fn class_position(&self, i: usize) -> bool {
        if i == 0 {
            return true;
        }
        let t = self.tokens;
        match t.get(i - 1).map(|p| p.kind) {
            Some(TokenKind::Punct(b'=' | b'(' | b',' | b':' | b'?' | b'[' | b'!' | b'|' | b'&')) => false,
            Some(TokenKind::Ident) => !matches!(t.text(i - 1), "return" | "new" | "typeof" | "yield" | "await"),
            _ => true,
        }
    }

    fn is_exported(&self, start: usize, keyword: usize) -> bool {
        (start..keyword).any(|k| self.tokens.is_ident(k, "export"))
    }

    fn is_default(&self, start: usize, keyword: usize) -> bool {
        (start..keyword).any(|k| self.tokens.is_ident(k, "default"))
    }

    /// Skip `@name`, `@a.b` and `@name(...)`, returning the index after it
    fn skip_decorator(&self, at: usize) -> usize {
        let t = self.tokens;
        let mut i = at + 1;
        while i < t.len() {
            if t.get(i).map(|x| x.kind) == Some(TokenKind::Ident) {
                i += 1;
                if t.is_punct(i, b'.') {
                    i += 1;
                    continue;
                }
                if t.is_punct(i, b'(') {
                    i = t.skip_group(i);
                }
                break;
            }
            break;
        }
        i
    }

    /// Decorators `@customElement('tag')` between `start` and `end`
    fn decorator_tag_name(&self, start: usize, end: usize) -> Option<String> {
        let t = self.tokens;
        (start..end).find_map(|k| {
            let named = t.is_punct(k, b'@') && t.is_ident(k + 1, "customElement");
            if named && t.is_punct(k + 2, b'(') {
                t.get(k + 3).and_then(|s| s.string_value(t.source))
            } else {
                None
            }
        })
    }

    fn doc_for(&self, index: usize) -> Option<DocBlock> {
        self.tokens
            .leading_docs
            .get(index)
            .copied()
            .flatten()
            .map(|c| DocBlock::parse(c.text(self.tokens.source)))
    }

    fn read_class(&mut self, start: usize, keyword: usize) -> usize {
        let t = self.tokens;
        let mut i = keyword + 1;
        let name = if t.get(i).map(|x| x.kind) == Some(TokenKind::Ident)
            && !t.is_ident(i, "extends")
            && !t.is_ident(i, "implements")
        {
            i += 1;
            t.text(i - 1).to_string()
        } else {
            "default".to_string()
        };

        let mut declaration = DeclarationDoc::new(DeclarationKind::Class, name.clone());

        // header: generics, extends, implements
        while i < t.len() && !t.is_punct(i, b'{') {
            if t.is_ident(i, "extends") {
                declaration.superclass = self.superclass_after(i + 1);
            }
            if t.is_punct(i, b'(') || t.is_punct(i, b'[') {
                i = t.skip_group(i);
                continue;
            }
            i += 1;
        }
        let body_end = t.skip_group(i);
        if i < t.len() {
            declaration.members = self.read_members(i + 1, body_end.saturating_sub(1));
        }

        if let Some(doc) = self.doc_for(start) {
            self.apply_class_doc(&mut declaration, &doc);
        }
        if declaration.tag_name.is_none() {
            if let Some(tag) = self.decorator_tag_name(start, keyword) {
                declaration.tag_name = Some(tag);
                declaration.custom_element = true;
            }
        }

        if self.is_exported(start, keyword) {
            let export_name = if self.is_default(start, keyword) {
                "default".to_string()
            } else {
                name.clone()
            };
            self.module.exports.push(ExportDoc {
                kind: ExportKind::Js,
                name: export_name,
                declaration: Reference::in_module(name, self.module_path),
            });
        }
        self.module.declarations.push(declaration);
        body_end
    }

    /// Superclass reference for `extends X`, `extends a.X` or `extends Mixin(X)`
    fn superclass_after(&self, at: usize) -> Option<Reference> {
        let t = self.tokens;
        let mut i = at;
        let mut name = None;
        while i < t.len() {
            match t.get(i).map(|x| x.kind) {
                Some(TokenKind::Ident) => {
                    name = Some(t.text(i).to_string());
                    if t.is_punct(i + 1, b'.') {
                        i += 2;
                        continue;
                    }
                    break;
                }
                _ => return None,
            }
        }
        let name = name?;
        Some(self.reference_for(&name))
    }

    /// Where a name used in this module is declared
    fn reference_for(&self, name: &str) -> Reference {
        if let Some(binding) = self.imports.get(name) {
            let imported = if binding.imported == "default" {
                name.to_string()
            } else {
                binding.imported.clone()
            };
            return self.reference_to_specifier(imported, &binding.specifier);
        }
        if name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
            && !self.declares(name)
            && is_platform_global(name)
        {
            return Reference::in_package(name, "global:");
        }
        Reference::in_module(name, self.module_path)
    }

    fn reference_to_specifier(&self, name: String, specifier: &str) -> Reference {
        if is_relative_specifier(specifier) {
            let resolved = join_specifier(Path::new(self.module_path), specifier);
            Reference::in_module(name, path_to_slash(&resolved))
        } else {
            Reference::in_package(name, specifier)
        }
    }

    fn declares(&self, name: &str) -> bool {
        self.module.declarations.iter().any(|d| d.name == name)
    }

    fn apply_class_doc(&self, declaration: &mut DeclarationDoc, doc: &DocBlock) {
        declaration.description = doc.description.clone();
        for tag in &doc.tags {
            match tag.name.as_str() {
                "element" | "tag" | "customElement" => {
                    let tag_name = tag.body.split_whitespace().next().unwrap_or("");
                    if !tag_name.is_empty() {
                        declaration.tag_name = Some(tag_name.to_string());
                    }
                    declaration.custom_element = true;
                }
                "slot" => declaration.slots.push(named(&tag.body)),
                "event" | "fires" => declaration.events.push(named(&tag.body)),
                "cssprop" | "cssproperty" => declaration.css_properties.push(named(&tag.body)),
                "csspart" => declaration.css_parts.push(named(&tag.body)),
                _ => {}
            }
            if tag.name == self.options.command_tag {
                let (name, description) = split_name_description(&tag.body);
                declaration.commands.push(CommandDoc { name, description });
            }
            if self.options.metadata_tags.iter().any(|t| *t == tag.name) {
                declaration
                    .metadata
                    .insert(tag.name.clone(), tag.body.clone());
            }
        }
    }

    /// Members between the class braces (exclusive)
    fn read_members(&self, from: usize, to: usize) -> Vec<MemberDoc> {
        let t = self.tokens;
        let mut members: Vec<MemberDoc> = Vec::new();
        let mut i = from;

        while i < to {
            if t.is_punct(i, b';') {
                i += 1;
                continue;
            }
            if t.is_ident(i, "static") && t.is_punct(i + 1, b'{') {
                // static initialization block
                i = t.skip_group(i + 1);
                continue;
            }
            let member_start = i;
            while t.is_punct(i, b'@') {
                i = self.skip_decorator(i);
            }

            let mut is_static = false;
            let mut privacy = None;
            let mut accessor_like = false;
            while let Some(word) = t.get(i).filter(|x| x.kind == TokenKind::Ident).map(|_| t.text(i)) {
                let next_is_name = matches!(
                    t.get(i + 1).map(|x| x.kind),
                    Some(TokenKind::Ident | TokenKind::PrivateName | TokenKind::Str | TokenKind::Punct(b'[' | b'*'))
                );
                if !MEMBER_MODIFIERS.contains(&word) || !next_is_name {
                    break;
                }
                match word {
                    "static" => is_static = true,
                    "private" => privacy = Some(Privacy::Private),
                    "protected" => privacy = Some(Privacy::Protected),
                    "public" => privacy = Some(Privacy::Public),
                    "get" | "set" | "accessor" => accessor_like = true,
                    _ => {}
                }
                i += 1;
            }
            if t.is_punct(i, b'*') {
                i += 1;
            }

            let name_token = i;
            let name = match t.get(i).map(|x| x.kind) {
                Some(TokenKind::Ident) => Some(t.text(i).to_string()),
                Some(TokenKind::Str) => t.get(i).and_then(|x| x.string_value(t.source)),
                Some(TokenKind::Punct(b'[')) => {
                    i = t.skip_group(i) - 1;
                    None
                }
                _ => None,
            };
            let private_name = t.get(name_token).map(|x| x.kind) == Some(TokenKind::PrivateName);
            i += 1;

            // optional `?` / `!` / generic parameters
            while t.is_punct(i, b'?') || t.is_punct(i, b'!') {
                i += 1;
            }
            if t.is_punct(i, b'<') {
                while i < to && !t.is_punct(i, b'(') {
                    i += 1;
                }
            }

            let is_method = t.is_punct(i, b'(');
            let end = if is_method {
                self.method_end(i, to)
            } else {
                self.field_end(i, to)
            };

            let skip = private_name || name.as_deref() == Some("constructor") || name.is_none();
            if !skip {
                let name = name.unwrap_or_default();
                let kind = if is_method && !accessor_like {
                    MemberKind::Method
                } else {
                    MemberKind::Field
                };
                let duplicate = members
                    .iter()
                    .any(|m| m.name == name && m.is_static == is_static);
                if !duplicate {
                    let description = self
                        .doc_for(member_start)
                        .map(|d| d.description)
                        .unwrap_or_default();
                    members.push(MemberDoc {
                        kind,
                        name,
                        privacy,
                        is_static,
                        description,
                    });
                }
            }
            i = end.max(member_start + 1);
        }
        members
    }

    /// End of a method starting at its parameter list
    fn method_end(&self, params: usize, to: usize) -> usize {
        let t = self.tokens;
        let mut i = t.skip_group(params);
        while i < to {
            if t.is_punct(i, b'{') {
                return t.skip_group(i);
            }
            if t.is_punct(i, b';') {
                return i + 1;
            }
            if t.is_punct(i, b'(') || t.is_punct(i, b'[') {
                i = t.skip_group(i);
                continue;
            }
            if self.newline_before(i) && !continues_expression(t, i) && self.starts_member(i) {
                return i;
            }
            i += 1;
        }
        to
    }

    /// End of a field: `;`, the class end, or a line break that ends the
    /// expression by automatic semicolon insertion.
    fn field_end(&self, from: usize, to: usize) -> usize {
        let t = self.tokens;
        let mut i = from;
        while i < to {
            if t.is_punct(i, b';') {
                return i + 1;
            }
            if t.is_punct(i, b'(') || t.is_punct(i, b'[') || t.is_punct(i, b'{') {
                i = t.skip_group(i);
                continue;
            }
            if i > from && self.newline_before(i) && !continues_expression(t, i) {
                return i;
            }
            i += 1;
        }
        to
    }

    fn newline_before(&self, i: usize) -> bool {
        let t = self.tokens;
        if i == 0 {
            return false;
        }
        let prev_end = t.code[i - 1].end;
        let start = t.code[i].start;
        t.source[prev_end..start].contains('\n')
    }

    fn starts_member(&self, i: usize) -> bool {
        matches!(
            self.tokens.get(i).map(|x| x.kind),
            Some(TokenKind::Ident | TokenKind::PrivateName | TokenKind::Punct(b'@'))
        )
    }

    fn read_function(&mut self, start: usize, keyword: usize) {
        let t = self.tokens;
        let mut i = keyword + 1;
        if t.is_punct(i, b'*') {
            i += 1;
        }
        let name = if t.get(i).map(|x| x.kind) == Some(TokenKind::Ident) {
            t.text(i).to_string()
        } else {
            "default".to_string()
        };
        let mut declaration = DeclarationDoc::new(DeclarationKind::Function, name.clone());
        if let Some(doc) = self.doc_for(start) {
            declaration.description = doc.description;
        }
        let export_name = if self.is_default(start, keyword) {
            "default".to_string()
        } else {
            name.clone()
        };
        let duplicate = self.module.declarations.iter().any(|d| d.name == name);
        if !duplicate {
            self.module.declarations.push(declaration);
            self.module.exports.push(ExportDoc {
                kind: ExportKind::Js,
                name: export_name,
                declaration: Reference::in_module(name, self.module_path),
            });
        }
    }

    fn read_variable(&mut self, start: usize, keyword: usize) {
        let t = self.tokens;
        let doc = self.doc_for(start);
        let mut i = keyword + 1;
        // `export const a = 1, b = 2;`
        loop {
            if t.get(i).map(|x| x.kind) != Some(TokenKind::Ident) {
                break;
            }
            let name = t.text(i).to_string();
            let mut declaration = DeclarationDoc::new(DeclarationKind::Variable, name.clone());
            if let Some(doc) = &doc {
                declaration.description = doc.description.clone();
            }
            self.module.declarations.push(declaration);
            self.module.exports.push(ExportDoc {
                kind: ExportKind::Js,
                name: name.clone(),
                declaration: Reference::in_module(name, self.module_path),
            });

            // skip initializer to the next top-level comma
            i += 1;
            while i < t.len() && !t.is_punct(i, b',') && !t.is_punct(i, b';') {
                if t.is_punct(i, b'(') || t.is_punct(i, b'[') || t.is_punct(i, b'{') {
                    i = t.skip_group(i);
                    continue;
                }
                if self.newline_before(i) && !continues_expression(t, i) {
                    return;
                }
                i += 1;
            }
            if !t.is_punct(i, b',') {
                break;
            }
            i += 1;
        }
    }

    /// `export { ... } [from '...']` and `export * [as ns] from '...'`.
    ///
    /// Returns the index after the statement, `None` for other exports.
    fn read_export_clause(&mut self, at: usize) -> Option<usize> {
        let t = self.tokens;
        let mut i = at + 1;
        if t.is_ident(i, "type") && (t.is_punct(i + 1, b'{') || t.is_punct(i + 1, b'*')) {
            // type-only exports carry no runtime declaration
            let end = t.skip_group(i + 1);
            return Some(end.max(i + 2));
        }

        if t.is_punct(i, b'*') {
            i += 1;
            let mut name = "*".to_string();
            if t.is_ident(i, "as") {
                name = name_of(t, i + 1);
                i += 2;
            }
            if t.is_ident(i, "from") {
                let specifier = t.get(i + 1).and_then(|s| s.string_value(t.source))?;
                let declaration = self.reference_to_specifier("*".to_string(), &specifier);
                self.module.exports.push(ExportDoc {
                    kind: ExportKind::Js,
                    name,
                    declaration,
                });
                return Some(i + 2);
            }
            return None;
        }

        if t.is_punct(i, b'{') {
            let close = t.skip_group(i) - 1;
            let pairs = named_list(t, i + 1, close);
            let after = close + 1;
            if t.is_ident(after, "from") {
                let specifier = t.get(after + 1).and_then(|s| s.string_value(t.source))?;
                for (original, exported) in pairs {
                    let declaration = self.reference_to_specifier(original, &specifier);
                    self.module.exports.push(ExportDoc {
                        kind: ExportKind::Js,
                        name: exported,
                        declaration,
                    });
                }
                return Some(after + 2);
            }
            self.local_exports.extend(pairs);
            return Some(after);
        }
        None
    }

    /// `customElements.define('tag', Class)`
    fn read_define(&mut self, at: usize) {
        let t = self.tokens;
        let is_define = t.is_punct(at + 1, b'.')
            && t.is_ident(at + 2, "define")
            && t.is_punct(at + 3, b'(');
        if !is_define {
            return;
        }
        let Some(tag) = t.get(at + 4).and_then(|s| s.string_value(t.source)) else {
            return;
        };
        if !t.is_punct(at + 5, b',') || t.get(at + 6).map(|x| x.kind) != Some(TokenKind::Ident) {
            return;
        }
        let class_name = t.text(at + 6).to_string();
        let declaration = self.reference_for(&class_name);

        if let Some(local) = self
            .module
            .declarations
            .iter_mut()
            .find(|d| d.name == class_name && d.kind == DeclarationKind::Class)
        {
            if local.tag_name.is_none() {
                local.tag_name = Some(tag.clone());
            }
            local.custom_element = true;
        }

        self.module.exports.push(ExportDoc {
            kind: ExportKind::CustomElementDefinition,
            name: tag,
            declaration,
        });
    }
}

fn named(body: &str) -> NamedDoc {
    let (name, description) = split_named_entry(body);
    NamedDoc { name, description }
}

/// Whether the token at `i` continues the expression of the previous line
fn continues_expression(t: &SourceTokens<'_>, i: usize) -> bool {
    let prev = t.code[i - 1].kind;
    let next = t.code[i].kind;
    let operator = |k: TokenKind| {
        matches!(
            k,
            TokenKind::Punct(
                b'=' | b',' | b'|' | b'&' | b':' | b'?' | b'.' | b'+' | b'-' | b'*' | b'/' | b'%' | b'<' | b'>'
            )
        )
    };
    operator(prev) || operator(next)
}

/// Browser globals commonly used as base classes
fn is_platform_global(name: &str) -> bool {
    name.starts_with("HTML") || name.starts_with("SVG") || matches!(name, "Element" | "EventTarget" | "Node")
}
