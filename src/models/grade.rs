use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateGradeRequest {
    pub student_id: i64,
    #[schema(example = "Web Engineering")]
    pub course_name: String,
    #[schema(example = "88.50")]
    pub grade: Decimal,
    #[schema(example = "2025/2026-1")]
    pub semester: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateGradeRequest {
    pub course_name: String,
    pub grade: Decimal,
    pub semester: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GradeResponse {
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub instructor_id: i64,
    pub instructor_name: String,
    pub course_name: String,
    pub grade: Decimal,
    pub semester: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Instructor-facing directory entry for student users.
#[derive(Debug, Serialize, ToSchema)]
pub struct StudentAccountResponse {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub major: Option<String>,
}
