use crate::entities::{courses, registrations, students};
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr,
};
use std::collections::HashMap;

#[derive(Clone)]
pub struct RegistrationService {
    pool: DatabaseConnection,
}

impl RegistrationService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list_registrations(
        &self,
        query: &RegistrationQuery,
    ) -> AppResult<Vec<RegistrationResponse>> {
        let mut select = registrations::Entity::find();

        if let Some(student_id) = query.student_id {
            select = select.filter(registrations::Column::StudentId.eq(student_id));
        }
        if let Some(course_id) = query.course_id {
            select = select.filter(registrations::Column::CourseId.eq(course_id));
        }

        let regs = select
            .order_by_desc(registrations::Column::RegisteredAt)
            .all(&self.pool)
            .await?;

        let student_ids: Vec<i64> = regs.iter().map(|r| r.student_id).collect();
        let course_ids: Vec<i64> = regs.iter().map(|r| r.course_id).collect();

        let students: HashMap<i64, students::Model> = students::Entity::find()
            .filter(students::Column::Id.is_in(student_ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();
        let courses: HashMap<i64, courses::Model> = courses::Entity::find()
            .filter(courses::Column::Id.is_in(course_ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        let mut result = Vec::with_capacity(regs.len());
        for reg in regs {
            let (Some(student), Some(course)) =
                (students.get(&reg.student_id), courses.get(&reg.course_id))
            else {
                continue;
            };
            if let Some(day) = query.day
                && course.day != day
            {
                continue;
            }
            result.push(RegistrationResponse {
                id: reg.id,
                student_id: student.id,
                student_name: student.name.clone(),
                student_number: student.student_number.clone(),
                course_id: course.id,
                course_title: course.title.clone(),
                course_day: course.day,
                course_credits: course.credits,
                registered_at: reg.registered_at,
            });
        }
        Ok(result)
    }

    /// Registers a single (student, course) pair. The unique index is the
    /// final arbiter; the pre-check exists only for a friendlier message.
    pub async fn create_registration(
        &self,
        req: RegistrationRequest,
    ) -> AppResult<RegistrationResponse> {
        let student = self.find_student(req.student_id).await?;
        let course = self.find_course(req.course_id).await?;

        let exists = registrations::Entity::find()
            .filter(registrations::Column::StudentId.eq(student.id))
            .filter(registrations::Column::CourseId.eq(course.id))
            .count(&self.pool)
            .await?
            > 0;
        if exists {
            return Err(AppError::Conflict(
                "Student is already registered for this course".to_string(),
            ));
        }

        let reg = self.insert_registration(student.id, course.id).await?;

        Ok(Self::to_response(reg, student, course))
    }

    pub async fn get_registration(&self, id: i64) -> AppResult<RegistrationResponse> {
        let reg = self.find_registration(id).await?;
        let student = self.find_student(reg.student_id).await?;
        let course = self.find_course(reg.course_id).await?;
        Ok(Self::to_response(reg, student, course))
    }

    /// Moves a registration to another student or course. The unique
    /// index still applies, so moving onto an existing pair is a 409.
    pub async fn update_registration(
        &self,
        id: i64,
        req: RegistrationRequest,
    ) -> AppResult<RegistrationResponse> {
        let reg = self.find_registration(id).await?;
        let student = self.find_student(req.student_id).await?;
        let course = self.find_course(req.course_id).await?;

        let mut model = reg.into_active_model();
        model.student_id = Set(student.id);
        model.course_id = Set(course.id);
        let updated = model.update(&self.pool).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::Conflict(
                "Student is already registered for this course".to_string(),
            ),
            _ => e.into(),
        })?;

        Ok(Self::to_response(updated, student, course))
    }

    pub async fn delete_registration(&self, id: i64) -> AppResult<()> {
        let res = registrations::Entity::delete_by_id(id)
            .exec(&self.pool)
            .await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Registration {id} not found")));
        }
        Ok(())
    }

    pub async fn summary(&self) -> AppResult<RegistrationSummaryResponse> {
        let total_registrations = registrations::Entity::find().count(&self.pool).await?;
        let total_students = students::Entity::find().count(&self.pool).await?;
        let total_courses = courses::Entity::find().count(&self.pool).await?;

        let regs = registrations::Entity::find().all(&self.pool).await?;
        let mut per_course: HashMap<i64, u64> = HashMap::new();
        for reg in &regs {
            *per_course.entry(reg.course_id).or_insert(0) += 1;
        }

        let most_popular_course = match per_course.iter().max_by_key(|(_, count)| **count) {
            Some((&course_id, &student_count)) => courses::Entity::find_by_id(course_id)
                .one(&self.pool)
                .await?
                .map(|c| PopularCourse {
                    course_id: c.id,
                    title: c.title,
                    student_count,
                }),
            None => None,
        };

        Ok(RegistrationSummaryResponse {
            total_registrations,
            total_students,
            total_courses,
            most_popular_course,
        })
    }

    /// Registers one student into many courses with partial-success
    /// semantics: courses are processed in request order and a failure
    /// never aborts the rest of the batch.
    pub async fn bulk_register(&self, req: BulkRegisterRequest) -> AppResult<BulkRegisterResponse> {
        if req.course_ids.is_empty() {
            return Err(AppError::ValidationError(
                "course_ids must not be empty".to_string(),
            ));
        }

        let student = self.find_student(req.student_id).await?;

        let mut registered = Vec::new();
        let mut failed = Vec::new();

        for course_id in req.course_ids {
            let course = match courses::Entity::find_by_id(course_id).one(&self.pool).await? {
                Some(course) => course,
                None => {
                    failed.push(BulkFailedCourse {
                        course_id,
                        title: None,
                        reason: "Course not found".to_string(),
                    });
                    continue;
                }
            };

            let exists = registrations::Entity::find()
                .filter(registrations::Column::StudentId.eq(student.id))
                .filter(registrations::Column::CourseId.eq(course_id))
                .count(&self.pool)
                .await?
                > 0;
            if exists {
                failed.push(BulkFailedCourse {
                    course_id,
                    title: Some(course.title),
                    reason: "Already registered".to_string(),
                });
                continue;
            }

            match self.insert_registration(student.id, course_id).await {
                Ok(reg) => registered.push(BulkRegisteredCourse {
                    id: reg.id,
                    course_id,
                    title: course.title,
                    day: course.day,
                    credits: course.credits,
                }),
                Err(AppError::Conflict(_)) => failed.push(BulkFailedCourse {
                    course_id,
                    title: Some(course.title),
                    reason: "Already registered".to_string(),
                }),
                Err(e) => return Err(e),
            }
        }

        Ok(BulkRegisterResponse {
            student: student.name,
            registered_count: registered.len() as u64,
            failed_count: failed.len() as u64,
            registered,
            failed,
        })
    }

    async fn insert_registration(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> AppResult<registrations::Model> {
        let insert = registrations::ActiveModel {
            student_id: Set(student_id),
            course_id: Set(course_id),
            registered_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await;

        insert.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::Conflict(
                "Student is already registered for this course".to_string(),
            ),
            _ => e.into(),
        })
    }

    fn to_response(
        reg: registrations::Model,
        student: students::Model,
        course: courses::Model,
    ) -> RegistrationResponse {
        RegistrationResponse {
            id: reg.id,
            student_id: student.id,
            student_name: student.name,
            student_number: student.student_number,
            course_id: course.id,
            course_title: course.title,
            course_day: course.day,
            course_credits: course.credits,
            registered_at: reg.registered_at,
        }
    }

    async fn find_registration(&self, id: i64) -> AppResult<registrations::Model> {
        registrations::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Registration {id} not found")))
    }

    async fn find_student(&self, id: i64) -> AppResult<students::Model> {
        students::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Student {id} not found")))
    }

    async fn find_course(&self, id: i64) -> AppResult<courses::Model> {
        courses::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Course {id} not found")))
    }
}
