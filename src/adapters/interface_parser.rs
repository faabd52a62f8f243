//! Parser for the restricted interface-definition grammar.
//!
//! Input is a single `interface Name { field: Type; ... }` block. Parsing is lenient
//! throughout: entries that do not look like `name?: Type` are skipped, a missing
//! header yields [`UNKNOWN_INTERFACE`], and type tokens that are not recognized are
//! treated as strings. Nothing here returns an error for odd text.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::domain::interface::UNKNOWN_INTERFACE;
use crate::domain::{ParsedInterface, Properties, StringFormat, TypeInfo, TypeKind};

static BLOCK_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
static LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)//.*$").unwrap());
static INTERFACE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"interface\s+(\w+)").unwrap());
static FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)(\w+)(\?)?\s*:\s*(.+?);?$").unwrap());
static FIELD_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\w+\??\s*:").unwrap());

/// Keyword rules for string format inference. Order is significant: the first
/// category with a matching keyword wins, so `companyId` is a company and not a uuid.
const FORMAT_RULES: &[(StringFormat, &[&str])] = &[
    (StringFormat::Email, &["email"]),
    (StringFormat::Url, &["url", "uri"]),
    (StringFormat::Phone, &["phone"]),
    (StringFormat::Name, &["name"]),
    (StringFormat::Address, &["address"]),
    (StringFormat::Company, &["company"]),
    (StringFormat::Uuid, &["uuid", "id"]),
];

/// Parse one interface block into its structural model.
pub fn parse_interface(source: &str) -> ParsedInterface {
    let cleaned = strip_comments(source);
    let cleaned = cleaned.trim_start();
    let (header, rest) = match cleaned.split_once('\n') {
        Some((header, rest)) => (header.trim(), rest),
        None => (cleaned.trim(), ""),
    };

    let name = INTERFACE_NAME
        .captures(header)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN_INTERFACE.to_string());

    let body = interface_body(header, rest);
    let mut properties = Properties::new();

    for entry in body_entries(&body) {
        let entry = entry.trim();
        if entry.is_empty() || entry == "{" || entry == "}" {
            continue;
        }
        match parse_field(entry) {
            Some((field, info)) => {
                properties.insert(field, info);
            }
            None => debug!(interface = %name, entry, "Skipping unrecognized interface entry"),
        }
    }

    debug!(interface = %name, fields = properties.len(), "Parsed interface");
    ParsedInterface { name, properties }
}

/// Classify a field's type expression.
///
/// `field_name` only feeds string format inference; the kind comes from the
/// expression alone.
pub fn parse_type_info(type_expr: &str, is_optional: bool, field_name: &str) -> TypeInfo {
    let clean = type_expr.trim();
    let clean = clean.strip_suffix(';').unwrap_or(clean).trim_end();
    let (base, is_array) = match clean.strip_suffix("[]") {
        Some(element) => (element.trim_end(), true),
        None => (clean, false),
    };

    let mut info = match classify(base) {
        TypeKind::Object => TypeInfo::object(parse_object_literal(base)),
        TypeKind::String => TypeInfo::string(infer_string_format(field_name, clean)),
        kind => TypeInfo::new(kind),
    };
    info.is_array = is_array;
    info.is_optional = is_optional;
    info
}

/// Case-insensitive keyword search over the field name and its type expression.
///
/// The `id` keyword is broad on purpose and also matches names such as `video`
/// or `guide`.
pub fn infer_string_format(field_name: &str, type_expr: &str) -> Option<StringFormat> {
    let haystack = format!("{field_name} {type_expr}").to_lowercase();
    FORMAT_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| haystack.contains(k)))
        .map(|(format, _)| *format)
}

/// Substring rules in order, except that an expression opening with `{` is always
/// an object literal. Checking `string` first would turn `{ street: string }` into a
/// plain string and lose the nested fields.
fn classify(base: &str) -> TypeKind {
    if base.starts_with('{') {
        TypeKind::Object
    } else if base.contains("string") {
        TypeKind::String
    } else if base.contains("number") {
        TypeKind::Number
    } else if base.contains("boolean") {
        TypeKind::Boolean
    } else if base.contains("Date") {
        TypeKind::Date
    } else if base.contains('{') {
        TypeKind::Object
    } else {
        TypeKind::String
    }
}

fn parse_field(entry: &str) -> Option<(String, TypeInfo)> {
    let caps = FIELD.captures(entry)?;
    let name = caps.get(1)?.as_str();
    let type_expr = caps.get(3)?.as_str();
    let info = parse_type_info(type_expr, caps.get(2).is_some(), name);
    Some((name.to_string(), info))
}

/// Members of an inline `{ ... }` literal, between the first `{` and its match.
fn parse_object_literal(expr: &str) -> Properties {
    let mut properties = Properties::new();
    let Some(open) = expr.find('{') else {
        return properties;
    };
    let inner = &expr[open + 1..];
    let content = match closing_brace(inner) {
        Some(end) => &inner[..end],
        None => inner,
    };

    for entry in split_top_level(content, &[',', ';', '\n']) {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        match parse_field(entry) {
            Some((field, info)) => {
                properties.insert(field, info);
            }
            None => debug!(entry, "Skipping unrecognized object member"),
        }
    }
    properties
}

fn strip_comments(source: &str) -> String {
    let without_blocks = BLOCK_COMMENT.replace_all(source, "");
    LINE_COMMENT.replace_all(&without_blocks, "").into_owned()
}

/// Text between the interface's opening brace and its matching close.
///
/// The header line may carry the opening brace, or it may sit alone on the next
/// line. Without any brace the remaining text is used as is.
fn interface_body(header: &str, rest: &str) -> String {
    let opened = match header.find('{') {
        Some(idx) => format!("{}\n{}", &header[idx + 1..], rest),
        None => {
            let rest = rest.trim_start();
            rest.strip_prefix('{').unwrap_or(rest).to_string()
        }
    };
    match closing_brace(&opened) {
        Some(end) => opened[..end].to_string(),
        None => opened,
    }
}

/// Byte offset of the first `}` that closes an already-open brace.
fn closing_brace(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, ch) in text.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' if depth == 0 => return Some(idx),
            '}' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Group body lines into field entries.
///
/// Only a line that starts like a field (`name?:`) may carry an open bracket onto the
/// following lines, so a stray `foo(` or `@Decorator({` stays on its own line. A
/// literal still open at the end of the body is read back line by line.
fn body_entries(body: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut start: Option<usize> = None;
    let mut depth = 0usize;
    let mut offset = 0;

    for line in body.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();
        let first = *start.get_or_insert(line_start);
        depth = bracket_depth(line, depth);

        if depth > 0 && FIELD_START.is_match(&body[first..]) {
            continue;
        }
        entries.extend(split_top_level(&body[first..offset], &[';']));
        start = None;
        depth = 0;
    }

    if let Some(first) = start {
        for line in body[first..].lines() {
            entries.extend(split_top_level(line, &[';']));
        }
    }
    entries
}

fn bracket_depth(text: &str, depth: usize) -> usize {
    text.chars().fold(depth, |depth, ch| match ch {
        '{' | '(' | '[' => depth + 1,
        '}' | ')' | ']' => depth.saturating_sub(1),
        _ => depth,
    })
}

/// Split on any of `separators` that appear outside brackets.
fn split_top_level<'a>(text: &'a str, separators: &[char]) -> Vec<&'a str> {
    let mut entries = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (idx, ch) in text.char_indices() {
        match ch {
            '{' | '(' | '[' => depth += 1,
            '}' | ')' | ']' => depth = depth.saturating_sub(1),
            c if depth == 0 && separators.contains(&c) => {
                entries.push(&text[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    entries.push(&text[start..]);
    entries
}
