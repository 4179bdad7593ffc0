//! Shared behaviour of listable resource records.
//!
//! Courses and schools are both "resource records": items with an identity, an
//! optional category identifier and a fixed set of searchable text fields. The
//! [`Resource`] trait captures exactly what the filter needs to know about a record,
//! so filtering stays independent of the concrete record type.

use serde::{Deserialize, Deserializer};
use std::fmt;

/// The collection a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Training courses (ILT, VILT, self-paced).
    Courses,
    /// Partner schools.
    Schools,
}

impl ResourceKind {
    /// Lowercase plural noun used in log fields and status messages.
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Courses => "courses",
            Self::Schools => "schools",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// A record that can be listed, filtered by category and searched.
///
/// Implementations must be cheap to clone; the filter returns owned copies of the
/// records that pass so the view state never borrows from the controller.
pub trait Resource: Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Collection this record type is fetched from.
    const KIND: ResourceKind;

    /// Identity of the record. Uniqueness is expected but not enforced.
    fn id(&self) -> &str;

    /// Category identifier compared against the selected category.
    ///
    /// `None` means the record type has no category-bearing field, so it only passes
    /// the `"all"` category.
    fn category(&self) -> Option<&str>;

    /// Text fields searched by the free-text criterion.
    fn search_fields(&self) -> Vec<&str>;
}

/// Deserializes an identifier given either as a JSON string or number.
///
/// Missing or `null` identifiers decode to an empty string so a single bad record
/// does not reject the whole collection.
pub(crate) fn lenient_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Deserializes an optional string, treating `null` and non-string values as absent.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        _ => String::new(),
    })
}

/// Deserializes an optional string field, dropping `null`, empty and non-string values.
pub(crate) fn lenient_opt_string<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    })
}

/// Deserializes an optional non-negative count given as a number or numeric string.
pub(crate) fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Deserializes a list of tags, keeping only string entries in their original order.
pub(crate) fn lenient_tags<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}
