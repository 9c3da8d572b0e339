//! Placeholder templates for generated functions
//!
//! Grammar: `{{name}}` substitutes a field, `{{#name}}...{{/name}}` keeps its
//! body only when the field is truthy. Names are ASCII letters, digits and
//! underscores. Anything else, including unknown placeholders, is copied
//! through untouched.

use std::fmt;

use indexmap::IndexMap;

/// A field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateValue {
    Text(String),
    Flag(bool),
}

impl TemplateValue {
    /// Empty text and `false` are falsy
    pub fn is_truthy(&self) -> bool {
        match self {
            TemplateValue::Text(text) => !text.is_empty(),
            TemplateValue::Flag(flag) => *flag,
        }
    }
}

impl fmt::Display for TemplateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateValue::Text(text) => f.write_str(text),
            TemplateValue::Flag(flag) => write!(f, "{flag}"),
        }
    }
}

impl From<String> for TemplateValue {
    fn from(text: String) -> Self {
        TemplateValue::Text(text)
    }
}

impl From<&str> for TemplateValue {
    fn from(text: &str) -> Self {
        TemplateValue::Text(text.to_string())
    }
}

impl From<bool> for TemplateValue {
    fn from(flag: bool) -> Self {
        TemplateValue::Flag(flag)
    }
}

/// Flat record a template is rendered against
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateFields {
    values: IndexMap<String, TemplateValue>,
}

impl TemplateFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<TemplateValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<TemplateValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&TemplateValue> {
        self.values.get(name)
    }

    fn is_truthy(&self, name: &str) -> bool {
        self.get(name).is_some_and(TemplateValue::is_truthy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'t> {
    Literal(&'t str),
    /// `{{name}}`; `raw` is the tag as written
    Variable { name: &'t str, raw: &'t str },
    SectionOpen { name: &'t str, raw: &'t str },
    SectionClose { name: &'t str, raw: &'t str },
}

impl<'t> Token<'t> {
    fn raw(&self) -> &'t str {
        match *self {
            Token::Literal(text) => text,
            Token::Variable { raw, .. }
            | Token::SectionOpen { raw, .. }
            | Token::SectionClose { raw, .. } => raw,
        }
    }
}

fn tokenize(template: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut literal_start = 0;
    let mut cursor = 0;

    while let Some(offset) = template[cursor..].find("{{") {
        let start = cursor + offset;
        match parse_tag(template, start) {
            Some((token, end)) => {
                if literal_start < start {
                    tokens.push(Token::Literal(&template[literal_start..start]));
                }
                tokens.push(token);
                literal_start = end;
                cursor = end;
            }
            // Not a tag: the brace stays literal and scanning resumes right after it
            None => cursor = start + 1,
        }
    }

    if literal_start < template.len() {
        tokens.push(Token::Literal(&template[literal_start..]));
    }
    tokens
}

/// Tag starting at `start` (which points at `{{`) and the offset just past it
fn parse_tag(template: &str, start: usize) -> Option<(Token<'_>, usize)> {
    let inner = &template[start + 2..];
    let (sigil, rest) = match inner.as_bytes().first()? {
        b'#' => (Some('#'), &inner[1..]),
        b'/' => (Some('/'), &inner[1..]),
        _ => (None, inner),
    };

    let name_len = rest
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count();
    if name_len == 0 || !rest[name_len..].starts_with("}}") {
        return None;
    }

    let name = &rest[..name_len];
    let end = start + 2 + sigil.map_or(0, |_| 1) + name_len + 2;
    let raw = &template[start..end];
    let token = match sigil {
        Some('#') => Token::SectionOpen { name, raw },
        Some(_) => Token::SectionClose { name, raw },
        None => Token::Variable { name, raw },
    };
    Some((token, end))
}

/// A template split into tokens, reusable across renders
#[derive(Debug, Clone)]
pub struct CompiledTemplate<'t> {
    tokens: Vec<Token<'t>>,
}

impl<'t> CompiledTemplate<'t> {
    pub fn parse(template: &'t str) -> Self {
        Self {
            tokens: tokenize(template),
        }
    }

    /// Evaluate against `fields`.
    ///
    /// A section runs to the first close tag with the same name. Sections
    /// are not nested: inside a kept section only variables are substituted
    /// and any other tag is copied as written. An open tag without a close,
    /// or a close without an open, is literal text.
    pub fn render(&self, fields: &TemplateFields) -> String {
        let mut output = String::new();
        let mut index = 0;

        while index < self.tokens.len() {
            match self.tokens[index] {
                Token::SectionOpen { name, raw } => match self.closing(name, index + 1) {
                    Some(close) => {
                        if fields.is_truthy(name) {
                            for token in &self.tokens[index + 1..close] {
                                write_token(&mut output, token, fields);
                            }
                        }
                        index = close + 1;
                        continue;
                    }
                    None => output.push_str(raw),
                },
                ref token => write_token(&mut output, token, fields),
            }
            index += 1;
        }
        output
    }

    fn closing(&self, name: &str, from: usize) -> Option<usize> {
        self.tokens[from..]
            .iter()
            .position(|token| matches!(token, Token::SectionClose { name: n, .. } if *n == name))
            .map(|offset| from + offset)
    }
}

fn write_token(output: &mut String, token: &Token<'_>, fields: &TemplateFields) {
    match token {
        Token::Variable { name, raw } => match fields.get(name) {
            Some(value) => output.push_str(&value.to_string()),
            None => output.push_str(raw),
        },
        other => output.push_str(other.raw()),
    }
}

/// Parse and render in one step
pub fn render(template: &str, fields: &TemplateFields) -> String {
    CompiledTemplate::parse(template).render(fields)
}
