//! Lexical analyzer for JavaScript and TypeScript source text.
//!
//! Produces a flat token stream good enough for import scanning, declaration
//! analysis and comment stripping. It is not a parser: punctuation is emitted
//! one byte at a time and keywords are plain identifiers. Template literal
//! expressions are lexed recursively so nested strings and braces never leak
//! into the outer stream.
//!
//! Unterminated strings, templates, comments and regular expressions, and
//! unbalanced brackets are reported as [`BuildError::Parse`].

use std::path::Path;

use crate::error::{BuildError, BuildResult};

/// Kind of a lexed token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier or keyword
    Ident,
    /// `#name` private class member
    PrivateName,
    /// Single punctuation byte
    Punct(u8),
    /// Single- or double-quoted string literal
    Str,
    /// Template literal; `interpolated` is set when it has `${...}` parts
    Template { interpolated: bool },
    /// Regular expression literal
    Regex,
    /// Numeric literal
    Number,
    /// `// ...`
    LineComment,
    /// `/* ... */`, including `/** ... */` doc blocks
    BlockComment,
}

/// A token with its byte range in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }

    pub fn is_punct(&self, c: u8) -> bool {
        self.kind == TokenKind::Punct(c)
    }

    pub fn is_ident(&self, source: &str, name: &str) -> bool {
        self.kind == TokenKind::Ident && self.text(source) == name
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.kind, TokenKind::LineComment | TokenKind::BlockComment)
    }

    /// `/** ... */` but not the empty `/**/`
    pub fn is_doc_comment(&self, source: &str) -> bool {
        self.kind == TokenKind::BlockComment && {
            let text = self.text(source);
            text.starts_with("/**") && text.len() > 4
        }
    }

    /// Cooked value of a string literal or a template without interpolation
    pub fn string_value(&self, source: &str) -> Option<String> {
        let text = self.text(source);
        match self.kind {
            TokenKind::Str | TokenKind::Template { interpolated: false } if text.len() >= 2 => {
                Some(unescape(&text[1..text.len() - 1]))
            }
            _ => None,
        }
    }
}

/// Lex `source` into tokens, comments included.
pub fn tokenize(source: &str, file: &Path) -> BuildResult<Vec<Token>> {
    let mut lexer = Lexer {
        source: source.as_bytes(),
        text: source,
        pos: 0,
        file,
        prev: None,
        operand: false,
        operand_before_prev: false,
    };
    lexer.lex_all()
}

/// Byte ranges of the literal text of a template token, without the
/// backticks and without any `${...}` substitution
pub fn template_chunks(
    source: &str,
    token: &Token,
    file: &Path,
) -> BuildResult<Vec<std::ops::Range<usize>>> {
    let mut lexer = Lexer {
        source: source.as_bytes(),
        text: source,
        pos: token.start + 1,
        file,
        prev: None,
        operand: false,
        operand_before_prev: false,
    };
    let mut chunks = Vec::new();
    let mut chunk_start = lexer.pos;
    loop {
        if lexer.pos >= token.end {
            return Err(lexer.error(token.start, "unterminated template literal"));
        }
        match lexer.peek() {
            b'\\' => lexer.pos = (lexer.pos + 2).min(lexer.source.len()),
            b'`' => {
                chunks.push(chunk_start..lexer.pos);
                return Ok(chunks);
            }
            b'$' if lexer.peek_at(1) == b'{' => {
                chunks.push(chunk_start..lexer.pos);
                lexer.pos += 2;
                lexer.lex_substitution(token.start)?;
                chunk_start = lexer.pos;
            }
            _ => lexer.pos += 1,
        }
    }
}

/// Token stream split into code tokens and the doc comment directly
/// preceding each of them.
#[derive(Debug, Clone)]
pub struct SourceTokens<'a> {
    pub source: &'a str,
    pub code: Vec<Token>,
    pub leading_docs: Vec<Option<Token>>,
}

impl<'a> SourceTokens<'a> {
    pub fn new(source: &'a str, file: &Path) -> BuildResult<Self> {
        let tokens = tokenize(source, file)?;
        let mut code = Vec::with_capacity(tokens.len());
        let mut leading_docs = Vec::with_capacity(tokens.len());
        let mut pending_doc = None;
        for token in tokens {
            if token.is_comment() {
                if token.is_doc_comment(source) {
                    pending_doc = Some(token);
                }
                continue;
            }
            code.push(token);
            leading_docs.push(pending_doc.take());
        }
        Ok(Self {
            source,
            code,
            leading_docs,
        })
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.code.get(index)
    }

    pub fn text(&self, index: usize) -> &'a str {
        self.code
            .get(index)
            .map(|t| t.text(self.source))
            .unwrap_or("")
    }

    pub fn is_punct(&self, index: usize, c: u8) -> bool {
        self.code.get(index).is_some_and(|t| t.is_punct(c))
    }

    pub fn is_ident(&self, index: usize, name: &str) -> bool {
        self.code
            .get(index)
            .is_some_and(|t| t.is_ident(self.source, name))
    }

    /// Index just past the bracket group opened at `open`.
    ///
    /// Brackets are balanced after a successful tokenize, so an unmatched
    /// group only happens on a slice; the end of the stream is returned then.
    pub fn skip_group(&self, open: usize) -> usize {
        let mut depth = 0usize;
        let mut i = open;
        while i < self.code.len() {
            match self.code[i].kind {
                TokenKind::Punct(b'(' | b'[' | b'{') => depth += 1,
                TokenKind::Punct(b')' | b']' | b'}') => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return i + 1;
                    }
                }
                _ => {}
            }
            i += 1;
        }
        self.code.len()
    }
}

/// 1-based line and column of a byte offset
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let before = &source[..offset.min(source.len())];
    let line = before.bytes().filter(|&b| b == b'\n').count() + 1;
    let column = before
        .rfind('\n')
        .map(|nl| before.len() - nl)
        .unwrap_or(before.len() + 1);
    (line, column)
}

/// Keywords after which a `/` starts a regular expression
const REGEX_PRECEDING_KEYWORDS: &[&str] = &[
    "return",
    "typeof",
    "instanceof",
    "in",
    "of",
    "new",
    "delete",
    "void",
    "throw",
    "case",
    "do",
    "else",
    "yield",
    "await",
];

struct Lexer<'a> {
    source: &'a [u8],
    text: &'a str,
    pos: usize,
    file: &'a Path,
    prev: Option<Token>,
    /// `prev` ends an operand, so a following `/` divides
    operand: bool,
    /// Same flag for the token before `prev`
    operand_before_prev: bool,
}

impl Lexer<'_> {
    fn lex_all(&mut self) -> BuildResult<Vec<Token>> {
        let mut tokens = Vec::new();
        let mut brackets: Vec<(u8, usize)> = Vec::new();

        if self.source.starts_with(b"#!") {
            self.skip_line();
        }

        while let Some(token) = self.next_token()? {
            if let TokenKind::Punct(c) = token.kind {
                match c {
                    b'(' | b'[' | b'{' => brackets.push((c, token.start)),
                    b')' | b']' | b'}' => {
                        let expected = match c {
                            b')' => b'(',
                            b']' => b'[',
                            _ => b'{',
                        };
                        match brackets.pop() {
                            Some((open, _)) if open == expected => {}
                            _ => {
                                return Err(self.error(
                                    token.start,
                                    &format!("unexpected '{}'", c as char),
                                ))
                            }
                        }
                    }
                    _ => {}
                }
            }
            tokens.push(token);
        }

        if let Some((open, start)) = brackets.pop() {
            return Err(self.error(start, &format!("unclosed '{}'", open as char)));
        }
        Ok(tokens)
    }

    fn peek(&self) -> u8 {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> u8 {
        let idx = self.pos + offset;
        if idx < self.source.len() {
            self.source[idx]
        } else {
            0
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn error(&self, offset: usize, message: &str) -> BuildError {
        let (line, column) = line_col(self.text, offset);
        BuildError::Parse {
            file: self.file.to_path_buf(),
            line,
            column,
            message: message.to_string(),
        }
    }

    fn skip_line(&mut self) {
        while !self.at_end() && self.peek() != b'\n' {
            self.pos += 1;
        }
    }

    fn skip_whitespace(&mut self) {
        while !self.at_end() && self.peek().is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    /// Next token including comments, `None` at end of input
    fn next_token(&mut self) -> BuildResult<Option<Token>> {
        self.skip_whitespace();
        if self.at_end() {
            return Ok(None);
        }

        let start = self.pos;
        let c = self.peek();
        let kind = match c {
            b'/' if self.peek_at(1) == b'/' => {
                self.skip_line();
                TokenKind::LineComment
            }
            b'/' if self.peek_at(1) == b'*' => {
                self.pos += 2;
                loop {
                    if self.at_end() {
                        return Err(self.error(start, "unterminated block comment"));
                    }
                    if self.peek() == b'*' && self.peek_at(1) == b'/' {
                        self.pos += 2;
                        break;
                    }
                    self.pos += 1;
                }
                TokenKind::BlockComment
            }
            b'/' if self.regex_allowed() => {
                self.lex_regex(start)?;
                TokenKind::Regex
            }
            b'\'' | b'"' => {
                self.lex_string(start, c)?;
                TokenKind::Str
            }
            b'`' => {
                let interpolated = self.lex_template(start)?;
                TokenKind::Template { interpolated }
            }
            b'#' if is_ident_start(self.peek_at(1)) => {
                self.pos += 1;
                self.lex_ident_tail();
                TokenKind::PrivateName
            }
            b'0'..=b'9' => {
                self.lex_number(start);
                TokenKind::Number
            }
            b'.' if self.peek_at(1).is_ascii_digit() => {
                self.lex_number(start);
                TokenKind::Number
            }
            c if is_ident_start(c) => {
                self.lex_ident_tail();
                TokenKind::Ident
            }
            c => {
                self.pos += 1;
                TokenKind::Punct(c)
            }
        };

        let token = Token {
            kind,
            start,
            end: self.pos,
        };
        if !token.is_comment() {
            let operand = self.ends_operand(&token);
            self.operand_before_prev = self.operand;
            self.operand = operand;
            self.prev = Some(token);
        }
        Ok(Some(token))
    }

    fn regex_allowed(&self) -> bool {
        !self.operand
    }

    /// Whether `token` closes an operand, given the tokens before it
    fn ends_operand(&self, token: &Token) -> bool {
        match token.kind {
            TokenKind::Punct(b')' | b']') => true,
            // second half of a postfix `++` or `--`
            TokenKind::Punct(c @ (b'+' | b'-')) => match self.prev {
                Some(prev) => {
                    prev.kind == TokenKind::Punct(c)
                        && prev.end == token.start
                        && self.operand_before_prev
                }
                None => false,
            },
            // TypeScript non-null assertion
            TokenKind::Punct(b'!') => self.operand,
            TokenKind::Punct(_) => false,
            TokenKind::Ident => !REGEX_PRECEDING_KEYWORDS.contains(&token.text(self.text)),
            TokenKind::LineComment | TokenKind::BlockComment => self.operand,
            _ => true,
        }
    }

    fn lex_ident_tail(&mut self) {
        while !self.at_end() && is_ident_continue(self.peek()) {
            self.pos += 1;
        }
    }

    fn lex_number(&mut self, start: usize) {
        while !self.at_end() {
            let c = self.peek();
            if c.is_ascii_alphanumeric() || c == b'_' || c == b'.' {
                self.pos += 1;
            } else if (c == b'+' || c == b'-')
                && matches!(self.source[self.pos - 1], b'e' | b'E')
                && !self.text[start..self.pos].starts_with("0x")
            {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn lex_string(&mut self, start: usize, quote: u8) -> BuildResult<()> {
        self.pos += 1;
        loop {
            if self.at_end() {
                return Err(self.error(start, "unterminated string literal"));
            }
            match self.peek() {
                b'\\' => self.pos = (self.pos + 2).min(self.source.len()),
                b'\n' => return Err(self.error(start, "unterminated string literal")),
                c if c == quote => {
                    self.pos += 1;
                    return Ok(());
                }
                _ => self.pos += 1,
            }
        }
    }

    /// Returns whether the template had `${...}` substitutions
    fn lex_template(&mut self, start: usize) -> BuildResult<bool> {
        self.pos += 1;
        let mut interpolated = false;
        loop {
            if self.at_end() {
                return Err(self.error(start, "unterminated template literal"));
            }
            match self.peek() {
                b'\\' => self.pos = (self.pos + 2).min(self.source.len()),
                b'`' => {
                    self.pos += 1;
                    return Ok(interpolated);
                }
                b'$' if self.peek_at(1) == b'{' => {
                    interpolated = true;
                    self.pos += 2;
                    self.prev = None;
                    self.operand = false;
                    self.lex_substitution(start)?;
                }
                _ => self.pos += 1,
            }
        }
    }

    /// Consume tokens of a `${ ... }` expression up to its closing brace
    fn lex_substitution(&mut self, template_start: usize) -> BuildResult<()> {
        let mut depth = 0usize;
        loop {
            let Some(token) = self.next_token()? else {
                return Err(self.error(template_start, "unterminated template literal"));
            };
            match token.kind {
                TokenKind::Punct(b'{') => depth += 1,
                TokenKind::Punct(b'}') if depth == 0 => return Ok(()),
                TokenKind::Punct(b'}') => depth -= 1,
                _ => {}
            }
        }
    }

    fn lex_regex(&mut self, start: usize) -> BuildResult<()> {
        self.pos += 1;
        let mut in_class = false;
        loop {
            if self.at_end() {
                return Err(self.error(start, "unterminated regular expression"));
            }
            match self.peek() {
                b'\\' => self.pos = (self.pos + 2).min(self.source.len()),
                b'\n' => return Err(self.error(start, "unterminated regular expression")),
                b'[' => {
                    in_class = true;
                    self.pos += 1;
                }
                b']' => {
                    in_class = false;
                    self.pos += 1;
                }
                b'/' if !in_class => {
                    self.pos += 1;
                    self.lex_ident_tail();
                    return Ok(());
                }
                _ => self.pos += 1,
            }
        }
    }
}

fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_' || c == b'$' || c >= 0x80
}

fn is_ident_continue(c: u8) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}

/// Resolve the common escape sequences of a string literal body
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('\n') => {}
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Token> {
        tokenize(source, Path::new("test.ts")).unwrap()
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).into_iter().map(|t| t.kind).collect()
    }

    fn lex_err(source: &str) -> String {
        tokenize(source, Path::new("test.ts"))
            .unwrap_err()
            .to_string()
    }

    #[test]
    fn empty_input() {
        assert!(lex("").is_empty());
        assert!(lex("  \n\t ").is_empty());
    }

    #[test]
    fn import_statement() {
        assert_eq!(
            kinds("import a from './a.js';"),
            vec![
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::Str,
                TokenKind::Punct(b';'),
            ]
        );
    }

    #[test]
    fn comments_are_tokens() {
        let source = "// line\n/** doc */\nclass A {}";
        let tokens = lex(source);
        assert_eq!(tokens[0].kind, TokenKind::LineComment);
        assert!(tokens[1].is_doc_comment(source));
        assert!(tokens[2].is_ident(source, "class"));
    }

    #[test]
    fn empty_block_comment_is_not_doc() {
        let source = "/**/ a";
        let tokens = lex(source);
        assert!(!tokens[0].is_doc_comment(source));
    }

    #[test]
    fn regex_vs_division() {
        assert_eq!(
            kinds("a / b"),
            vec![TokenKind::Ident, TokenKind::Punct(b'/'), TokenKind::Ident]
        );
        assert_eq!(
            kinds("x = /a[/]b/g"),
            vec![TokenKind::Ident, TokenKind::Punct(b'='), TokenKind::Regex]
        );
        assert_eq!(
            kinds("return /x/"),
            vec![TokenKind::Ident, TokenKind::Regex]
        );
        assert_eq!(
            kinds("f(a) / 2"),
            vec![
                TokenKind::Ident,
                TokenKind::Punct(b'('),
                TokenKind::Ident,
                TokenKind::Punct(b')'),
                TokenKind::Punct(b'/'),
                TokenKind::Number,
            ]
        );
    }

    #[test]
    fn postfix_operators_end_an_operand() {
        let k = kinds("const h = rect.height! / 2 / 1;");
        assert!(!k.contains(&TokenKind::Regex), "{:?}", k);
        assert!(!kinds("y = a++ / 2 / 1;").contains(&TokenKind::Regex));
        assert!(!kinds("y = a-- / total / 2;").contains(&TokenKind::Regex));
        assert!(!kinds("y = f(a)! / 2 / 1;").contains(&TokenKind::Regex));
        assert!(!kinds("y = a[0]! / 2 / 1;").contains(&TokenKind::Regex));
    }

    #[test]
    fn prefix_operators_still_allow_regex() {
        assert_eq!(
            kinds("x = !/a/.test(s)")[..3],
            [TokenKind::Ident, TokenKind::Punct(b'='), TokenKind::Punct(b'!')]
        );
        assert!(kinds("x = !/a/.test(s)").contains(&TokenKind::Regex));
        assert!(kinds("x = a + +/1/.source").contains(&TokenKind::Regex));
        assert!(kinds("x = a++ + /b/.source.length").contains(&TokenKind::Regex));
        assert!(kinds("if (a != /b/) {}").contains(&TokenKind::Regex));
    }

    #[test]
    fn template_with_nested_braces_and_strings() {
        let source = "`a ${ {x: '}'}[`y${1}`] } b`;";
        let tokens = lex(source);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::Template { interpolated: true });
        assert!(tokens[1].is_punct(b';'));
    }

    #[test]
    fn plain_template_has_string_value() {
        let source = "`./a.css`";
        let tokens = lex(source);
        assert_eq!(tokens[0].kind, TokenKind::Template { interpolated: false });
        assert_eq!(tokens[0].string_value(source).as_deref(), Some("./a.css"));
    }

    #[test]
    fn string_value_unescapes() {
        let source = r#"'it\'s' "a\\b""#;
        let tokens = lex(source);
        assert_eq!(tokens[0].string_value(source).as_deref(), Some("it's"));
        assert_eq!(tokens[1].string_value(source).as_deref(), Some("a\\b"));
    }

    #[test]
    fn private_names_and_decorators() {
        let source = "@property() #close() {}";
        let k = kinds(source);
        assert_eq!(k[0], TokenKind::Punct(b'@'));
        assert_eq!(k[1], TokenKind::Ident);
        assert_eq!(k[4], TokenKind::PrivateName);
    }

    #[test]
    fn numbers() {
        assert_eq!(
            kinds("1 0x1F 1e-3 .5 10n 1_000"),
            vec![TokenKind::Number; 6]
        );
    }

    #[test]
    fn unterminated_constructs_are_errors() {
        assert!(lex_err("const a = 'abc").contains("unterminated string literal"));
        assert!(lex_err("const a = `abc").contains("unterminated template literal"));
        assert!(lex_err("/* abc").contains("unterminated block comment"));
        assert!(lex_err("x = /abc\n").contains("unterminated regular expression"));
        assert!(lex_err("`${ a`").contains("unterminated template literal"));
    }

    #[test]
    fn unbalanced_brackets_are_errors() {
        assert!(lex_err("class A {").contains("unclosed '{'"));
        assert!(lex_err("f(]").contains("unexpected ']'"));
    }

    #[test]
    fn template_chunks_skip_substitutions() {
        let source = "html`<p>${a ? `x${b}` : '}'}</p>`";
        let tokens = lex(source);
        let chunks = template_chunks(source, &tokens[1], Path::new("test.ts")).unwrap();
        let texts: Vec<_> = chunks.iter().map(|r| &source[r.clone()]).collect();
        assert_eq!(texts, vec!["<p>", "</p>"]);
    }

    #[test]
    fn error_reports_line_and_column() {
        let err = lex_err("a\n  'oops");
        assert!(err.starts_with("test.ts:2:3:"), "{err}");
    }

    #[test]
    fn source_tokens_attach_leading_docs() {
        let source = "/** Alert */\nexport class Alert {}\nclass B {}";
        let tokens = SourceTokens::new(source, Path::new("a.ts")).unwrap();
        assert!(tokens.is_ident(0, "export"));
        assert!(tokens.leading_docs[0].is_some());
        assert!(tokens.leading_docs[1].is_none());
        let class_b = tokens
            .code
            .iter()
            .rposition(|t| t.is_ident(source, "class"))
            .unwrap();
        assert!(tokens.leading_docs[class_b].is_none());
    }

    #[test]
    fn skip_group_jumps_past_matching_bracket() {
        let source = "f(a, (b), [c]) ;";
        let tokens = SourceTokens::new(source, Path::new("a.ts")).unwrap();
        let end = tokens.skip_group(1);
        assert!(tokens.is_punct(end, b';'));
    }

    #[test]
    fn line_col_counts_from_one() {
        assert_eq!(line_col("abc", 0), (1, 1));
        assert_eq!(line_col("a\nbc", 3), (2, 2));
    }
}
