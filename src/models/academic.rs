use crate::entities::{CourseDay, programs};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProgramRequest {
    #[schema(example = "Digital Business Technology")]
    pub name: String,
    #[schema(example = "Dr. Susanti")]
    pub head: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProgramResponse {
    pub id: i64,
    pub name: String,
    pub head: String,
}

impl From<programs::Model> for ProgramResponse {
    fn from(p: programs::Model) -> Self {
        Self {
            id: p.id,
            name: p.name,
            head: p.head,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProgramStudentsResponse {
    pub program: String,
    pub student_count: u64,
    pub students: Vec<StudentResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProgramCoursesResponse {
    pub program: String,
    pub course_count: u64,
    pub courses: Vec<CourseResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StudentRequest {
    #[schema(example = "Andi Pratama")]
    pub name: String,
    #[schema(example = "2021001")]
    pub student_number: String,
    pub program_id: i64,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct StudentQuery {
    pub program_id: Option<i64>,
    /// Case-insensitive substring match.
    pub name: Option<String>,
    pub student_number: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StudentResponse {
    pub id: i64,
    pub name: String,
    pub student_number: String,
    pub program_id: i64,
    pub program_name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentDetailResponse {
    pub id: i64,
    pub name: String,
    pub student_number: String,
    pub program: ProgramResponse,
    pub registrations: Vec<super::RegistrationResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CourseRequest {
    #[schema(example = "Web Engineering")]
    pub title: String,
    pub program_id: i64,
    pub day: CourseDay,
    #[schema(example = 3)]
    pub credits: i32,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CourseQuery {
    pub program_id: Option<i64>,
    pub day: Option<CourseDay>,
    /// Case-insensitive substring match.
    pub title: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CourseResponse {
    pub id: i64,
    pub title: String,
    pub program_id: i64,
    pub program_name: String,
    pub day: CourseDay,
    pub credits: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseDetailResponse {
    pub id: i64,
    pub title: String,
    pub program: ProgramResponse,
    pub day: CourseDay,
    pub credits: i32,
    pub student_count: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RosterEntry {
    pub id: i64,
    pub name: String,
    pub student_number: String,
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseRosterResponse {
    pub course: String,
    pub day: CourseDay,
    pub credits: i32,
    pub student_count: u64,
    pub students: Vec<RosterEntry>,
}
