//! Recognized primitive type tags.
//!
//! Field types in a schema are free-form strings. A handful of short tags are
//! recognized and mapped to Python type expressions; anything else is treated
//! as a direct reference to another generated model (or a typing construct
//! such as `Optional[List[str]]`) and emitted verbatim.

use strum::{Display, EnumIter, EnumString};

/// Import line registered by the temporal tags.
pub const DATETIME_IMPORT: &str = "import datetime as dt";

/// Import line registered by the `uuid` tag.
pub const UUID_IMPORT: &str = "import uuid";

/// A recognized primitive type tag.
///
/// ## Examples
///
/// ```
/// use pydantic_gen_define::PrimitiveType;
///
/// let tag = PrimitiveType::from_tag("datetime").unwrap();
/// assert_eq!(tag, PrimitiveType::Datetime);
/// assert_eq!(tag.python_type(), "dt.datetime");
/// assert_eq!(tag.required_import(), Some("import datetime as dt"));
///
/// assert!(PrimitiveType::from_tag("GeneratedSchema1").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum PrimitiveType {
    Str,
    Int,
    Float,
    Bool,
    Bytes,
    Date,
    Datetime,
    Time,
    Uuid,
}

impl PrimitiveType {
    /// Parses an exact type tag. Returns `None` for anything unrecognized.
    pub fn from_tag(tag: &str) -> Option<Self> {
        tag.parse().ok()
    }

    /// Whether a default for this type is rendered as a quoted string.
    pub fn quotes_default(self) -> bool {
        matches!(self, Self::Str | Self::Date | Self::Datetime | Self::Time)
    }

    /// The Python type expression this tag resolves to.
    pub fn python_type(self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Bytes => "bytes",
            Self::Date => "dt.date",
            Self::Datetime => "dt.datetime",
            Self::Time => "dt.time",
            Self::Uuid => "uuid.UUID",
        }
    }

    /// The module import the resolved type needs, if any.
    pub fn required_import(self) -> Option<&'static str> {
        match self {
            Self::Date | Self::Datetime | Self::Time => Some(DATETIME_IMPORT),
            Self::Uuid => Some(UUID_IMPORT),
            _ => None,
        }
    }
}
