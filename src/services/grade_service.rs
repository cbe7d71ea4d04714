use crate::entities::{Role, grades, users};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::permissions::{Action, can};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use std::collections::HashMap;

#[derive(Clone)]
pub struct GradeService {
    pool: DatabaseConnection,
}

impl GradeService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Students see grades given to them, instructors those they gave.
    pub async fn list_grades(&self, user_id: i64, role: Role) -> AppResult<Vec<GradeResponse>> {
        let column = match role {
            Role::Student => grades::Column::StudentId,
            Role::Instructor => grades::Column::InstructorId,
        };
        let rows = grades::Entity::find()
            .filter(column.eq(user_id))
            .order_by_desc(grades::Column::CreatedAt)
            .all(&self.pool)
            .await?;

        self.build_responses(rows).await
    }

    /// A grade is visible to its student and to the instructor who
    /// entered it; anyone else's id reads as missing.
    pub async fn get_grade(
        &self,
        user_id: i64,
        role: Role,
        grade_id: i64,
    ) -> AppResult<GradeResponse> {
        let grade = grades::Entity::find_by_id(grade_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Grade {grade_id} not found")))?;

        let visible = match role {
            Role::Student => grade.student_id == user_id,
            Role::Instructor => grade.instructor_id == user_id,
        };
        if !visible {
            return Err(AppError::NotFound(format!("Grade {grade_id} not found")));
        }

        self.build_response(grade).await
    }

    pub async fn create_grade(
        &self,
        user_id: i64,
        role: Role,
        req: CreateGradeRequest,
    ) -> AppResult<GradeResponse> {
        if !can(role, Action::CreateGrade) {
            return Err(AppError::Forbidden(
                "Only instructors can create grades".to_string(),
            ));
        }
        validate_grade_value(req.grade)?;
        if req.course_name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Course name must not be empty".to_string(),
            ));
        }

        let student = users::Entity::find_by_id(req.student_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Student {} not found", req.student_id)))?;
        if student.role != Role::Student {
            return Err(AppError::ValidationError(
                "Grades can only be given to student accounts".to_string(),
            ));
        }

        let now = Utc::now();
        let grade = grades::ActiveModel {
            student_id: Set(req.student_id),
            instructor_id: Set(user_id),
            course_name: Set(req.course_name),
            grade: Set(req.grade),
            semester: Set(req.semester),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        self.build_response(grade).await
    }

    pub async fn update_grade(
        &self,
        user_id: i64,
        role: Role,
        grade_id: i64,
        req: UpdateGradeRequest,
    ) -> AppResult<GradeResponse> {
        if !can(role, Action::UpdateGrade) {
            return Err(AppError::Forbidden(
                "Only instructors can update grades".to_string(),
            ));
        }
        validate_grade_value(req.grade)?;

        let grade = self.find_owned_grade(user_id, grade_id).await?;
        let mut model = grade.into_active_model();
        model.course_name = Set(req.course_name);
        model.grade = Set(req.grade);
        model.semester = Set(req.semester);
        model.updated_at = Set(Utc::now());
        let updated = model.update(&self.pool).await?;

        self.build_response(updated).await
    }

    pub async fn delete_grade(&self, user_id: i64, role: Role, grade_id: i64) -> AppResult<()> {
        if !can(role, Action::DeleteGrade) {
            return Err(AppError::Forbidden(
                "Only instructors can delete grades".to_string(),
            ));
        }

        let grade = self.find_owned_grade(user_id, grade_id).await?;
        grades::Entity::delete_by_id(grade.id)
            .exec(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn list_students(&self, role: Role) -> AppResult<Vec<StudentAccountResponse>> {
        if !can(role, Action::ListStudents) {
            return Err(AppError::Forbidden(
                "Only instructors can list students".to_string(),
            ));
        }

        let rows = users::Entity::find()
            .filter(users::Column::Role.eq(Role::Student))
            .order_by_asc(users::Column::FullName)
            .all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|u| StudentAccountResponse {
                id: u.id,
                email: u.email,
                username: u.username,
                full_name: u.full_name,
                major: u.major,
            })
            .collect())
    }

    /// Instructors may only touch grades they entered themselves.
    async fn find_owned_grade(&self, user_id: i64, grade_id: i64) -> AppResult<grades::Model> {
        let grade = grades::Entity::find_by_id(grade_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Grade {grade_id} not found")))?;
        if grade.instructor_id != user_id {
            return Err(AppError::Forbidden(
                "Grade belongs to another instructor".to_string(),
            ));
        }
        Ok(grade)
    }

    async fn build_response(&self, grade: grades::Model) -> AppResult<GradeResponse> {
        self.build_responses(vec![grade])
            .await?
            .pop()
            .ok_or_else(|| AppError::InternalError("Grade row missing after write".to_string()))
    }

    async fn build_responses(&self, rows: Vec<grades::Model>) -> AppResult<Vec<GradeResponse>> {
        let mut user_ids: Vec<i64> = rows
            .iter()
            .flat_map(|g| [g.student_id, g.instructor_id])
            .collect();
        user_ids.sort_unstable();
        user_ids.dedup();

        let mut names: HashMap<i64, String> = HashMap::new();
        if !user_ids.is_empty() {
            let users = users::Entity::find()
                .filter(users::Column::Id.is_in(user_ids))
                .all(&self.pool)
                .await?;
            for u in users {
                names.insert(u.id, u.full_name);
            }
        }

        Ok(rows
            .into_iter()
            .map(|g| GradeResponse {
                id: g.id,
                student_id: g.student_id,
                student_name: names.get(&g.student_id).cloned().unwrap_or_default(),
                instructor_id: g.instructor_id,
                instructor_name: names.get(&g.instructor_id).cloned().unwrap_or_default(),
                course_name: g.course_name,
                grade: g.grade,
                semester: g.semester,
                created_at: g.created_at,
                updated_at: g.updated_at,
            })
            .collect())
    }
}

fn validate_grade_value(grade: Decimal) -> AppResult<()> {
    if grade < Decimal::ZERO || grade > Decimal::from(100) {
        return Err(AppError::ValidationError(
            "Grade must be between 0 and 100".to_string(),
        ));
    }
    Ok(())
}
