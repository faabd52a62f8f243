//! Structural model produced by the interface parser.
//!
//! A [`ParsedInterface`] is plain derived data: it is built fresh from source text,
//! never mutated by generation, and cheap to clone if a caller wants to cache it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::error::ParseError;

/// Ordered field map. Key order follows declaration order in the source text.
pub type Properties = IndexMap<String, TypeInfo>;

/// Name assigned when the header line does not declare an interface.
pub const UNKNOWN_INTERFACE: &str = "UnknownInterface";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    String,
    Number,
    Boolean,
    Date,
    Object,
}

/// Semantic hint used to produce realistic strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StringFormat {
    Email,
    Url,
    Phone,
    Name,
    Address,
    Company,
    Uuid,
}

/// Shape of a single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeInfo {
    pub kind: TypeKind,
    #[serde(default)]
    pub is_array: bool,
    #[serde(default)]
    pub is_optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_format: Option<StringFormat>,
    /// Only set for [`TypeKind::Object`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
}

impl TypeInfo {
    pub fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            is_array: false,
            is_optional: false,
            string_format: None,
            properties: None,
        }
    }

    pub fn string(format: Option<StringFormat>) -> Self {
        Self {
            string_format: format,
            ..Self::new(TypeKind::String)
        }
    }

    pub fn object(properties: Properties) -> Self {
        Self {
            properties: Some(properties),
            ..Self::new(TypeKind::Object)
        }
    }

    pub fn array(mut self) -> Self {
        self.is_array = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }
}

/// Parse result for one `interface Name { ... }` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedInterface {
    pub name: String,
    pub properties: Properties,
}

impl ParsedInterface {
    /// Parses interface source text. Never fails: odd input yields the fallback
    /// name and/or fewer fields.
    pub fn parse(source: &str) -> Self {
        crate::adapters::interface_parser::parse_interface(source)
    }

    /// Parses raw request bytes. Input that is not text is the only parse error.
    pub fn from_utf8(bytes: &[u8]) -> Result<Self, ParseError> {
        let source = std::str::from_utf8(bytes).map_err(ParseError::InvalidInput)?;
        Ok(Self::parse(source))
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
