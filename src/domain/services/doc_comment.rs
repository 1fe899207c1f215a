//! JSDoc block parsing
//!
//! Splits a `/** ... */` comment into its free-text description and its
//! `@tag body` entries. Only tags at the start of a line count; an `@` in
//! the middle of prose is text. Continuation lines belong to the preceding
//! tag.

/// One `@name body` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocTag {
    pub name: String,
    /// Tag body, trimmed; empty when the tag has no body
    pub body: String,
}

/// Parsed documentation comment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocBlock {
    pub description: String,
    /// Tags in source order
    pub tags: Vec<DocTag>,
}

impl DocBlock {
    /// Parse the raw comment text, delimiters included
    pub fn parse(comment: &str) -> Self {
        let inner = comment
            .strip_prefix("/**")
            .unwrap_or(comment)
            .strip_suffix("*/")
            .unwrap_or_else(|| comment.strip_prefix("/**").unwrap_or(comment));

        let mut description: Vec<&str> = Vec::new();
        let mut tags: Vec<(String, Vec<&str>)> = Vec::new();

        for raw in inner.lines() {
            let line = strip_gutter(raw);
            if let Some(rest) = line.strip_prefix('@') {
                let (name, body) = match rest.find(char::is_whitespace) {
                    Some(at) => (&rest[..at], rest[at..].trim()),
                    None => (rest, ""),
                };
                if !name.is_empty() {
                    tags.push((name.to_string(), vec![body]));
                    continue;
                }
            }
            match tags.last_mut() {
                Some((_, lines)) => lines.push(line),
                None => description.push(line),
            }
        }

        Self {
            description: join_lines(&description),
            tags: tags
                .into_iter()
                .map(|(name, lines)| DocTag {
                    name,
                    body: join_lines(&lines),
                })
                .collect(),
        }
    }

    /// Tags named `name`, in source order
    pub fn tags_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a DocTag> + 'a {
        self.tags.iter().filter(move |t| t.name == name)
    }

    /// Body of the last tag named `name`
    pub fn last_tag(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .rev()
            .find(|t| t.name == name)
            .map(|t| t.body.as_str())
    }
}

/// Drop leading whitespace, one `*` gutter and the space after it
fn strip_gutter(line: &str) -> &str {
    let trimmed = line.trim_start();
    let without_star = trimmed.strip_prefix('*').unwrap_or(trimmed);
    without_star.strip_prefix(' ').unwrap_or(without_star).trim_end()
}

fn join_lines(lines: &[&str]) -> String {
    lines.join("\n").trim().to_string()
}

/// Split a `name - description` body.
///
/// Only the first ` - ` separates; any later occurrence stays part of the
/// description. A body without the separator is all name.
pub fn split_name_description(body: &str) -> (String, String) {
    match body.split_once(" - ") {
        Some((name, description)) => (name.trim().to_string(), description.trim().to_string()),
        None => (body.trim().to_string(), String::new()),
    }
}

/// Split a `@slot`-style body: `- text` (unnamed), `name - text` or `name text`
pub fn split_named_entry(body: &str) -> (String, String) {
    let body = body.trim();
    if body == "-" {
        return (String::new(), String::new());
    }
    if let Some(rest) = body.strip_prefix('-') {
        // `--name` is a custom property name, not the unnamed form
        if rest.starts_with(char::is_whitespace) {
            return (String::new(), rest.trim().to_string());
        }
    }
    if body.contains(" - ") {
        return split_name_description(body);
    }
    match body.split_once(char::is_whitespace) {
        Some((name, description)) => (name.to_string(), description.trim().to_string()),
        None => (body.to_string(), String::new()),
    }
}
