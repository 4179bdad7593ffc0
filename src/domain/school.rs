//! School domain model.

use super::record::{
    lenient_count, lenient_id, lenient_opt_string, lenient_string, Resource, ResourceKind,
};
use serde::{Deserialize, Deserializer, Serialize};

/// Whether a partner school is currently active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchoolStatus {
    #[default]
    Active,
    Inactive,
}

impl SchoolStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

fn lenient_status<'de, D>(deserializer: D) -> std::result::Result<SchoolStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value.as_str() {
        Some("inactive") => SchoolStatus::Inactive,
        _ => SchoolStatus::Active,
    })
}

/// A partner school.
///
/// Search matches against `name`, `short_name` and `city`. Schools carry no category
/// field, so they only pass the `"all"` category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "WireSchool")]
pub struct School {
    pub id: String,

    pub name: String,

    /// Short identifier such as `"JES"`. Taken from `shortname` when `shortName`
    /// is absent.
    pub short_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Logo URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_count: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_count: Option<u32>,

    pub status: SchoolStatus,
}

/// Wire shape of a school; `shortName` and `shortname` decode independently.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireSchool {
    #[serde(default, deserialize_with = "lenient_id")]
    id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    name: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    short_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    shortname: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    city: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    country: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    logo: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    user_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    course_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient_status")]
    status: SchoolStatus,
}

impl From<WireSchool> for School {
    fn from(wire: WireSchool) -> Self {
        Self {
            id: wire.id,
            name: wire.name,
            short_name: wire.short_name.or(wire.shortname).unwrap_or_default(),
            description: wire.description,
            city: wire.city,
            country: wire.country,
            logo: wire.logo,
            user_count: wire.user_count,
            course_count: wire.course_count,
            status: wire.status,
        }
    }
}

impl School {
    /// Creates an active school with only identity, name and short name set.
    ///
    /// # Examples
    ///
    /// ```
    /// use edu_listing::domain::School;
    ///
    /// let school = School::new("3", "Jeddah Excellence School", "JES").with_location("Jeddah", "Saudi Arabia");
    /// assert_eq!(school.city.as_deref(), Some("Jeddah"));
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            short_name: short_name.into(),
            description: None,
            city: None,
            country: None,
            logo: None,
            user_count: None,
            course_count: None,
            status: SchoolStatus::Active,
        }
    }

    #[must_use]
    pub fn with_location(mut self, city: impl Into<String>, country: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self.country = Some(country.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_counts(mut self, user_count: u32, course_count: u32) -> Self {
        self.user_count = Some(user_count);
        self.course_count = Some(course_count);
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: SchoolStatus) -> Self {
        self.status = status;
        self
    }
}

impl Resource for School {
    const KIND: ResourceKind = ResourceKind::Schools;

    fn id(&self) -> &str {
        &self.id
    }

    fn category(&self) -> Option<&str> {
        None
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.short_name.as_str()];
        if let Some(city) = &self.city {
            fields.push(city);
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_camel_and_lowercase_short_names() {
        let camel: School =
            serde_json::from_str(r#"{"id": "2", "name": "Dubai Modern Academy", "shortName": "DMA"}"#)
                .unwrap();
        let lower: School =
            serde_json::from_str(r#"{"id": "2", "name": "Dubai Modern Academy", "shortname": "DMA"}"#)
                .unwrap();

        assert_eq!(camel.short_name, "DMA");
        assert_eq!(camel, lower);
    }

    #[test]
    fn both_short_name_spellings_decode() {
        let school: School = serde_json::from_str(
            r#"{"id": "3", "name": "Jeddah Excellence School", "shortName": "JES", "shortname": "jes"}"#,
        )
        .unwrap();
        assert_eq!(school.short_name, "JES");

        let decoded = crate::loader::decode_collection::<School>(
            "schools",
            serde_json::json!([{"id": 3, "shortName": "", "shortname": "JES"}]),
        )
        .unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].short_name, "JES");
    }

    #[test]
    fn missing_status_defaults_to_active() {
        let school: School = serde_json::from_str(r#"{"id": "4", "name": "Abu Dhabi Future School"}"#).unwrap();
        assert_eq!(school.status, SchoolStatus::Active);

        let inactive: School = serde_json::from_str(r#"{"id": "4", "status": "inactive"}"#).unwrap();
        assert_eq!(inactive.status, SchoolStatus::Inactive);
    }

    #[test]
    fn counts_and_location_decode() {
        let school: School = serde_json::from_str(
            r#"{"id": 1, "name": "Al Riyadh International School", "shortname": "ARIS",
                "city": "Riyadh", "country": "Saudi Arabia", "userCount": 150, "courseCount": "25"}"#,
        )
        .unwrap();

        assert_eq!(school.user_count, Some(150));
        assert_eq!(school.course_count, Some(25));
        assert_eq!(school.search_fields(), vec!["Al Riyadh International School", "ARIS", "Riyadh"]);
    }

    #[test]
    fn schools_have_no_category() {
        assert_eq!(School::new("1", "A", "B").category(), None);
    }
}
