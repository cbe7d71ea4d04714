use crate::entities::{courses, programs, registrations, students};
use crate::error::{AppError, AppResult};
use crate::models::*;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

#[derive(Clone)]
pub struct AcademicService {
    pool: DatabaseConnection,
}

impl AcademicService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    // --- programs ---

    pub async fn list_programs(&self) -> AppResult<Vec<ProgramResponse>> {
        let programs = programs::Entity::find().all(&self.pool).await?;
        Ok(programs.into_iter().map(ProgramResponse::from).collect())
    }

    pub async fn create_program(&self, req: ProgramRequest) -> AppResult<ProgramResponse> {
        let program = programs::ActiveModel {
            name: Set(req.name),
            head: Set(req.head),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;
        Ok(ProgramResponse::from(program))
    }

    pub async fn get_program(&self, id: i64) -> AppResult<ProgramResponse> {
        Ok(ProgramResponse::from(self.find_program(id).await?))
    }

    pub async fn update_program(&self, id: i64, req: ProgramRequest) -> AppResult<ProgramResponse> {
        let program = self.find_program(id).await?;
        let mut model = program.into_active_model();
        model.name = Set(req.name);
        model.head = Set(req.head);
        Ok(ProgramResponse::from(model.update(&self.pool).await?))
    }

    pub async fn delete_program(&self, id: i64) -> AppResult<()> {
        let res = programs::Entity::delete_by_id(id).exec(&self.pool).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Program {id} not found")));
        }
        Ok(())
    }

    pub async fn program_students(&self, id: i64) -> AppResult<ProgramStudentsResponse> {
        let program = self.find_program(id).await?;
        let students = students::Entity::find()
            .filter(students::Column::ProgramId.eq(id))
            .all(&self.pool)
            .await?;

        let students: Vec<StudentResponse> = students
            .into_iter()
            .map(|s| StudentResponse {
                id: s.id,
                name: s.name,
                student_number: s.student_number,
                program_id: s.program_id,
                program_name: program.name.clone(),
            })
            .collect();

        Ok(ProgramStudentsResponse {
            program: program.name,
            student_count: students.len() as u64,
            students,
        })
    }

    pub async fn program_courses(&self, id: i64) -> AppResult<ProgramCoursesResponse> {
        let program = self.find_program(id).await?;
        let courses = courses::Entity::find()
            .filter(courses::Column::ProgramId.eq(id))
            .all(&self.pool)
            .await?;

        let courses: Vec<CourseResponse> = courses
            .into_iter()
            .map(|c| CourseResponse {
                id: c.id,
                title: c.title,
                program_id: c.program_id,
                program_name: program.name.clone(),
                day: c.day,
                credits: c.credits,
            })
            .collect();

        Ok(ProgramCoursesResponse {
            program: program.name,
            course_count: courses.len() as u64,
            courses,
        })
    }

    // --- students ---

    pub async fn list_students(&self, query: &StudentQuery) -> AppResult<Vec<StudentResponse>> {
        let mut select = students::Entity::find();

        if let Some(program_id) = query.program_id {
            select = select.filter(students::Column::ProgramId.eq(program_id));
        }
        if let Some(name) = &query.name {
            select = select.filter(students::Column::Name.contains(name));
        }
        if let Some(number) = &query.student_number {
            select = select.filter(students::Column::StudentNumber.contains(number));
        }

        let rows = select
            .find_also_related(programs::Entity)
            .all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(s, p)| StudentResponse {
                id: s.id,
                name: s.name,
                student_number: s.student_number,
                program_id: s.program_id,
                program_name: p.map(|p| p.name).unwrap_or_default(),
            })
            .collect())
    }

    pub async fn create_student(&self, req: StudentRequest) -> AppResult<StudentResponse> {
        let program = self.find_program(req.program_id).await?;
        self.validate_student_number(&req.student_number)?;

        let insert = students::ActiveModel {
            name: Set(req.name),
            student_number: Set(req.student_number),
            program_id: Set(req.program_id),
            ..Default::default()
        }
        .insert(&self.pool)
        .await;

        let student = match insert {
            Ok(student) => student,
            Err(e) => {
                return Err(match e.sql_err() {
                    Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => {
                        AppError::Conflict("Student number already exists".to_string())
                    }
                    _ => e.into(),
                });
            }
        };

        Ok(StudentResponse {
            id: student.id,
            name: student.name,
            student_number: student.student_number,
            program_id: student.program_id,
            program_name: program.name,
        })
    }

    pub async fn get_student(&self, id: i64) -> AppResult<StudentDetailResponse> {
        let student = self.find_student(id).await?;
        let program = self.find_program(student.program_id).await?;
        let registrations = self.student_registration_rows(&student).await?;

        Ok(StudentDetailResponse {
            id: student.id,
            name: student.name,
            student_number: student.student_number,
            program: ProgramResponse::from(program),
            registrations,
        })
    }

    pub async fn update_student(&self, id: i64, req: StudentRequest) -> AppResult<StudentResponse> {
        let student = self.find_student(id).await?;
        let program = self.find_program(req.program_id).await?;
        self.validate_student_number(&req.student_number)?;

        let mut model = student.into_active_model();
        model.name = Set(req.name);
        model.student_number = Set(req.student_number);
        model.program_id = Set(req.program_id);
        let student = model.update(&self.pool).await?;

        Ok(StudentResponse {
            id: student.id,
            name: student.name,
            student_number: student.student_number,
            program_id: student.program_id,
            program_name: program.name,
        })
    }

    pub async fn delete_student(&self, id: i64) -> AppResult<()> {
        let res = students::Entity::delete_by_id(id).exec(&self.pool).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Student {id} not found")));
        }
        Ok(())
    }

    /// Registrations of one student with the total course/credit rollup.
    pub async fn student_registrations(
        &self,
        id: i64,
    ) -> AppResult<StudentRegistrationsResponse> {
        let student = self.find_student(id).await?;
        let registrations = self.student_registration_rows(&student).await?;
        let total_credits = registrations
            .iter()
            .map(|r| r.course_credits as i64)
            .sum();

        Ok(StudentRegistrationsResponse {
            student: student.name,
            student_number: student.student_number,
            total_courses: registrations.len() as u64,
            total_credits,
            registrations,
        })
    }

    // --- courses ---

    pub async fn list_courses(&self, query: &CourseQuery) -> AppResult<Vec<CourseResponse>> {
        let mut select = courses::Entity::find();

        if let Some(program_id) = query.program_id {
            select = select.filter(courses::Column::ProgramId.eq(program_id));
        }
        if let Some(day) = query.day {
            select = select.filter(courses::Column::Day.eq(day));
        }
        if let Some(title) = &query.title {
            select = select.filter(courses::Column::Title.contains(title));
        }

        let rows = select
            .find_also_related(programs::Entity)
            .all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(c, p)| CourseResponse {
                id: c.id,
                title: c.title,
                program_id: c.program_id,
                program_name: p.map(|p| p.name).unwrap_or_default(),
                day: c.day,
                credits: c.credits,
            })
            .collect())
    }

    pub async fn create_course(&self, req: CourseRequest) -> AppResult<CourseResponse> {
        let program = self.find_program(req.program_id).await?;
        validate_credits(req.credits)?;

        let course = courses::ActiveModel {
            title: Set(req.title),
            program_id: Set(req.program_id),
            day: Set(req.day),
            credits: Set(req.credits),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(CourseResponse {
            id: course.id,
            title: course.title,
            program_id: course.program_id,
            program_name: program.name,
            day: course.day,
            credits: course.credits,
        })
    }

    pub async fn get_course(&self, id: i64) -> AppResult<CourseDetailResponse> {
        let course = self.find_course(id).await?;
        let program = self.find_program(course.program_id).await?;
        let student_count = registrations::Entity::find()
            .filter(registrations::Column::CourseId.eq(id))
            .count(&self.pool)
            .await?;

        Ok(CourseDetailResponse {
            id: course.id,
            title: course.title,
            program: ProgramResponse::from(program),
            day: course.day,
            credits: course.credits,
            student_count,
        })
    }

    pub async fn update_course(&self, id: i64, req: CourseRequest) -> AppResult<CourseResponse> {
        let course = self.find_course(id).await?;
        let program = self.find_program(req.program_id).await?;
        validate_credits(req.credits)?;

        let mut model = course.into_active_model();
        model.title = Set(req.title);
        model.program_id = Set(req.program_id);
        model.day = Set(req.day);
        model.credits = Set(req.credits);
        let course = model.update(&self.pool).await?;

        Ok(CourseResponse {
            id: course.id,
            title: course.title,
            program_id: course.program_id,
            program_name: program.name,
            day: course.day,
            credits: course.credits,
        })
    }

    pub async fn delete_course(&self, id: i64) -> AppResult<()> {
        let res = courses::Entity::delete_by_id(id).exec(&self.pool).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Course {id} not found")));
        }
        Ok(())
    }

    pub async fn course_roster(&self, id: i64) -> AppResult<CourseRosterResponse> {
        let course = self.find_course(id).await?;

        let rows = registrations::Entity::find()
            .filter(registrations::Column::CourseId.eq(id))
            .find_also_related(students::Entity)
            .order_by_desc(registrations::Column::RegisteredAt)
            .all(&self.pool)
            .await?;

        let students: Vec<RosterEntry> = rows
            .into_iter()
            .filter_map(|(reg, student)| {
                student.map(|s| RosterEntry {
                    id: s.id,
                    name: s.name,
                    student_number: s.student_number,
                    registered_at: reg.registered_at,
                })
            })
            .collect();

        Ok(CourseRosterResponse {
            course: course.title,
            day: course.day,
            credits: course.credits,
            student_count: students.len() as u64,
            students,
        })
    }

    // --- helpers ---

    async fn find_program(&self, id: i64) -> AppResult<programs::Model> {
        programs::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Program {id} not found")))
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

    fn validate_student_number(&self, number: &str) -> AppResult<()> {
        if number.len() < 5 {
            return Err(AppError::ValidationError(
                "Student number must be at least 5 characters".to_string(),
            ));
        }
        Ok(())
    }

    async fn student_registration_rows(
        &self,
        student: &students::Model,
    ) -> AppResult<Vec<RegistrationResponse>> {
        let rows = registrations::Entity::find()
            .filter(registrations::Column::StudentId.eq(student.id))
            .find_also_related(courses::Entity)
            .order_by_desc(registrations::Column::RegisteredAt)
            .all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(reg, course)| {
                course.map(|c| RegistrationResponse {
                    id: reg.id,
                    student_id: student.id,
                    student_name: student.name.clone(),
                    student_number: student.student_number.clone(),
                    course_id: c.id,
                    course_title: c.title,
                    course_day: c.day,
                    course_credits: c.credits,
                    registered_at: reg.registered_at,
                })
            })
            .collect())
    }
}

fn validate_credits(credits: i32) -> AppResult<()> {
    if !(1..=6).contains(&credits) {
        return Err(AppError::ValidationError(
            "Credits must be between 1 and 6".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_credits() {
        assert!(validate_credits(1).is_ok());
        assert!(validate_credits(6).is_ok());
        assert!(validate_credits(0).is_err());
        assert!(validate_credits(7).is_err());
    }
}
