//! Course domain model.
//!
//! A course is a training offering returned by the catalogue API. Its delivery type
//! (instructor-led, virtual instructor-led, self-paced) is the category identifier
//! used by the category filter.

use super::record::{lenient_id, lenient_opt_string, lenient_string, lenient_tags, Resource, ResourceKind};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Delivery type of a course.
///
/// Identifiers outside the known set are preserved verbatim in
/// [`CourseType::Unknown`], so category matching remains an exact comparison on
/// whatever the API sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CourseType {
    /// Instructor-led training (`"ILT"`).
    Ilt,
    /// Virtual instructor-led training (`"VILT"`).
    Vilt,
    /// Self-paced e-learning (`"Self-paced"`).
    SelfPaced,
    /// Any other identifier.
    Unknown(String),
}

impl CourseType {
    /// Wire identifier of the type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ilt => "ILT",
            Self::Vilt => "VILT",
            Self::SelfPaced => "Self-paced",
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<&str> for CourseType {
    fn from(raw: &str) -> Self {
        match raw {
            "ILT" => Self::Ilt,
            "VILT" => Self::Vilt,
            "Self-paced" => Self::SelfPaced,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for CourseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CourseType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

fn lenient_course_type<'de, D>(deserializer: D) -> std::result::Result<Option<CourseType>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(CourseType::from(s.as_str())),
        _ => None,
    })
}

/// A course as returned by the catalogue API.
///
/// Every field decodes leniently: a record missing its title or summary still
/// decodes, and the rendering layer substitutes fallback display values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireCourse")]
pub struct Course {
    pub id: String,

    /// Display title. Taken from `fullname` on the wire when `title` is absent.
    pub title: String,

    /// Summary, possibly containing HTML markup.
    pub summary: String,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub course_type: Option<CourseType>,

    pub tags: Vec<String>,
}

/// Wire shape of a course. `title` and `fullname` are separate keys so a payload
/// carrying both still decodes.
#[derive(Deserialize)]
struct WireCourse {
    #[serde(default, deserialize_with = "lenient_id")]
    id: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    fullname: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    summary: String,
    #[serde(default, rename = "type", deserialize_with = "lenient_course_type")]
    course_type: Option<CourseType>,
    #[serde(default, deserialize_with = "lenient_tags")]
    tags: Vec<String>,
}

impl From<WireCourse> for Course {
    fn from(wire: WireCourse) -> Self {
        Self {
            id: wire.id,
            title: wire.title.or(wire.fullname).unwrap_or_default(),
            summary: wire.summary,
            course_type: wire.course_type,
            tags: wire.tags,
        }
    }
}

impl Course {
    /// Creates a course with an id and title and no type, summary or tags.
    ///
    /// # Examples
    ///
    /// ```
    /// use edu_listing::domain::{Course, CourseType};
    ///
    /// let course = Course::new("1", "Classroom Management").with_type(CourseType::Ilt);
    /// assert_eq!(course.course_type, Some(CourseType::Ilt));
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            summary: String::new(),
            course_type: None,
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_type(mut self, course_type: CourseType) -> Self {
        self.course_type = Some(course_type);
        self
    }

    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

impl Resource for Course {
    const KIND: ResourceKind = ResourceKind::Courses;

    fn id(&self) -> &str {
        &self.id
    }

    fn category(&self) -> Option<&str> {
        self.course_type.as_ref().map(CourseType::as_str)
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = Vec::with_capacity(1 + self.tags.len());
        fields.push(self.title.as_str());
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }
}
