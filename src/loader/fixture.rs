//! Built-in demo catalogue.
//!
//! Used when no API base URL is configured, so the listings can be exercised
//! without a backend.

use super::source::DataSource;
use crate::domain::{Course, CourseType, Result, School, SchoolStatus};
use async_trait::async_trait;

/// In-memory data source returning fixed collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureSource {
    courses: Vec<Course>,
    schools: Vec<School>,
}

impl FixtureSource {
    /// A source returning exactly the given collections.
    #[must_use]
    pub const fn new(courses: Vec<Course>, schools: Vec<School>) -> Self {
        Self { courses, schools }
    }

    /// The demo catalogue: four partner schools and a handful of courses.
    #[must_use]
    pub fn demo() -> Self {
        Self::new(demo_courses(), demo_schools())
    }
}

impl Default for FixtureSource {
    fn default() -> Self {
        Self::demo()
    }
}

#[async_trait]
impl DataSource for FixtureSource {
    async fn fetch_courses(&self) -> Result<Vec<Course>> {
        Ok(self.courses.clone())
    }

    async fn fetch_schools(&self) -> Result<Vec<School>> {
        Ok(self.schools.clone())
    }
}

/// Partner schools shown by the demo catalogue.
#[must_use]
pub fn demo_schools() -> Vec<School> {
    vec![
        School::new("1", "Al Riyadh International School", "ARIS")
            .with_description("Leading educational institution in Riyadh")
            .with_location("Riyadh", "Saudi Arabia")
            .with_counts(150, 25),
        School::new("2", "Dubai Modern Academy", "DMA")
            .with_description("Innovation-focused learning environment")
            .with_location("Dubai", "UAE")
            .with_counts(200, 30),
        School::new("3", "Jeddah Excellence School", "JES")
            .with_description("Excellence in education and character building")
            .with_location("Jeddah", "Saudi Arabia")
            .with_counts(120, 20),
        School::new("4", "Abu Dhabi Future School", "ADFS")
            .with_description("Preparing students for the future")
            .with_location("Abu Dhabi", "UAE")
            .with_counts(180, 28)
            .with_status(SchoolStatus::Inactive),
    ]
}

/// Courses shown by the demo catalogue.
#[must_use]
pub fn demo_courses() -> Vec<Course> {
    vec![
        Course::new("101", "Classroom Management Essentials")
            .with_type(CourseType::Ilt)
            .with_summary("<p>Practical routines for calm, focused classrooms.</p>")
            .with_tags(["teaching", "classroom"]),
        Course::new("102", "Designing Formative Assessment")
            .with_type(CourseType::Vilt)
            .with_summary("<p>Use evidence of learning to adapt instruction.</p>")
            .with_tags(["assessment"]),
        Course::new("103", "Instructional Leadership")
            .with_type(CourseType::Ilt)
            .with_tags(["leadership"]),
        Course::new("104", "Digital Tools for Teachers")
            .with_type(CourseType::SelfPaced)
            .with_summary("Getting started with the school LMS and collaborative documents.")
            .with_tags(["technology", "lms"]),
        Course::new("105", "Differentiated Instruction")
            .with_type(CourseType::Vilt)
            .with_tags(["teaching"]),
        Course::new("106", "Data-Informed School Improvement").with_tags(["leadership", "data"]),
        Course::new("107", "Blended Learning Design")
            .with_type(CourseType::SelfPaced)
            .with_tags(["technology"]),
    ]
}
