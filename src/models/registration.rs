use crate::entities::CourseDay;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegistrationRequest {
    pub student_id: i64,
    pub course_id: i64,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RegistrationQuery {
    pub student_id: Option<i64>,
    pub course_id: Option<i64>,
    pub day: Option<CourseDay>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegistrationResponse {
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub student_number: String,
    pub course_id: i64,
    pub course_title: String,
    pub course_day: CourseDay,
    pub course_credits: i32,
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentRegistrationsResponse {
    pub student: String,
    pub student_number: String,
    pub total_courses: u64,
    pub total_credits: i64,
    pub registrations: Vec<RegistrationResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PopularCourse {
    pub course_id: i64,
    pub title: String,
    pub student_count: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegistrationSummaryResponse {
    pub total_registrations: u64,
    pub total_students: u64,
    pub total_courses: u64,
    pub most_popular_course: Option<PopularCourse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BulkRegisterRequest {
    pub student_id: i64,
    pub course_ids: Vec<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BulkRegisteredCourse {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub day: CourseDay,
    pub credits: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BulkFailedCourse {
    pub course_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub reason: String,
}

/// Partial-success result: failures do not abort the remaining courses.
#[derive(Debug, Serialize, ToSchema)]
pub struct BulkRegisterResponse {
    pub student: String,
    pub registered_count: u64,
    pub failed_count: u64,
    pub registered: Vec<BulkRegisteredCourse>,
    pub failed: Vec<BulkFailedCourse>,
}
