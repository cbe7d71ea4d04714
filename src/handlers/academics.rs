use actix_web::{HttpResponse, ResponseError, Result, web};

use crate::models::*;
use crate::services::AcademicService;

#[utoipa::path(
    get,
    path = "/programs",
    tag = "academics",
    responses((status = 200, description = "All study programs", body = [ProgramResponse]))
)]
pub async fn list_programs(academic_service: web::Data<AcademicService>) -> Result<HttpResponse> {
    match academic_service.list_programs().await {
        Ok(programs) => Ok(HttpResponse::Ok().json(ApiResponse::success(programs))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/programs",
    tag = "academics",
    request_body = ProgramRequest,
    responses((status = 200, description = "Program created", body = ProgramResponse))
)]
pub async fn create_program(
    academic_service: web::Data<AcademicService>,
    request: web::Json<ProgramRequest>,
) -> Result<HttpResponse> {
    match academic_service.create_program(request.into_inner()).await {
        Ok(program) => Ok(HttpResponse::Ok().json(ApiResponse::success(program))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/programs/{id}",
    tag = "academics",
    params(("id" = i64, Path, description = "Program id")),
    responses(
        (status = 200, description = "Program", body = ProgramResponse),
        (status = 404, description = "Program not found")
    )
)]
pub async fn get_program(
    academic_service: web::Data<AcademicService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match academic_service.get_program(path.into_inner()).await {
        Ok(program) => Ok(HttpResponse::Ok().json(ApiResponse::success(program))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/programs/{id}",
    tag = "academics",
    params(("id" = i64, Path, description = "Program id")),
    request_body = ProgramRequest,
    responses(
        (status = 200, description = "Program updated", body = ProgramResponse),
        (status = 404, description = "Program not found")
    )
)]
pub async fn update_program(
    academic_service: web::Data<AcademicService>,
    path: web::Path<i64>,
    request: web::Json<ProgramRequest>,
) -> Result<HttpResponse> {
    match academic_service
        .update_program(path.into_inner(), request.into_inner())
        .await
    {
        Ok(program) => Ok(HttpResponse::Ok().json(ApiResponse::success(program))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/programs/{id}",
    tag = "academics",
    params(("id" = i64, Path, description = "Program id")),
    responses(
        (status = 200, description = "Program deleted"),
        (status = 404, description = "Program not found")
    )
)]
pub async fn delete_program(
    academic_service: web::Data<AcademicService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match academic_service.delete_program(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::message("Program deleted"))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/programs/{id}/students",
    tag = "academics",
    params(("id" = i64, Path, description = "Program id")),
    responses(
        (status = 200, description = "Students enrolled in the program", body = ProgramStudentsResponse),
        (status = 404, description = "Program not found")
    )
)]
pub async fn program_students(
    academic_service: web::Data<AcademicService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match academic_service.program_students(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/programs/{id}/courses",
    tag = "academics",
    params(("id" = i64, Path, description = "Program id")),
    responses(
        (status = 200, description = "Courses the program offers", body = ProgramCoursesResponse),
        (status = 404, description = "Program not found")
    )
)]
pub async fn program_courses(
    academic_service: web::Data<AcademicService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match academic_service.program_courses(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/students",
    tag = "academics",
    params(
        ("program_id" = Option<i64>, Query, description = "Filter by program"),
        ("name" = Option<String>, Query, description = "Substring filter on name"),
        ("student_number" = Option<String>, Query, description = "Substring filter on student number")
    ),
    responses((status = 200, description = "Matching students", body = [StudentResponse]))
)]
pub async fn list_students(
    academic_service: web::Data<AcademicService>,
    query: web::Query<StudentQuery>,
) -> Result<HttpResponse> {
    match academic_service.list_students(&query).await {
        Ok(students) => Ok(HttpResponse::Ok().json(ApiResponse::success(students))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/students",
    tag = "academics",
    request_body = StudentRequest,
    responses(
        (status = 200, description = "Student created", body = StudentResponse),
        (status = 400, description = "Invalid student data"),
        (status = 404, description = "Program not found"),
        (status = 409, description = "Student number already exists")
    )
)]
pub async fn create_student(
    academic_service: web::Data<AcademicService>,
    request: web::Json<StudentRequest>,
) -> Result<HttpResponse> {
    match academic_service.create_student(request.into_inner()).await {
        Ok(student) => Ok(HttpResponse::Ok().json(ApiResponse::success(student))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/students/{id}",
    tag = "academics",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student with program and registrations", body = StudentDetailResponse),
        (status = 404, description = "Student not found")
    )
)]
pub async fn get_student(
    academic_service: web::Data<AcademicService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match academic_service.get_student(path.into_inner()).await {
        Ok(student) => Ok(HttpResponse::Ok().json(ApiResponse::success(student))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/students/{id}",
    tag = "academics",
    params(("id" = i64, Path, description = "Student id")),
    request_body = StudentRequest,
    responses(
        (status = 200, description = "Student updated", body = StudentResponse),
        (status = 404, description = "Student not found"),
        (status = 409, description = "Student number already exists")
    )
)]
pub async fn update_student(
    academic_service: web::Data<AcademicService>,
    path: web::Path<i64>,
    request: web::Json<StudentRequest>,
) -> Result<HttpResponse> {
    match academic_service
        .update_student(path.into_inner(), request.into_inner())
        .await
    {
        Ok(student) => Ok(HttpResponse::Ok().json(ApiResponse::success(student))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/students/{id}",
    tag = "academics",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student and their registrations deleted"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn delete_student(
    academic_service: web::Data<AcademicService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match academic_service.delete_student(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::message("Student deleted"))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/students/{id}/registrations",
    tag = "academics",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student's registrations with credit total", body = StudentRegistrationsResponse),
        (status = 404, description = "Student not found")
    )
)]
pub async fn student_registrations(
    academic_service: web::Data<AcademicService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match academic_service
        .student_registrations(path.into_inner())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/courses",
    tag = "academics",
    params(
        ("program_id" = Option<i64>, Query, description = "Filter by program"),
        ("day" = Option<String>, Query, description = "Filter by weekday"),
        ("title" = Option<String>, Query, description = "Substring filter on title")
    ),
    responses((status = 200, description = "Matching courses", body = [CourseResponse]))
)]
pub async fn list_courses(
    academic_service: web::Data<AcademicService>,
    query: web::Query<CourseQuery>,
) -> Result<HttpResponse> {
    match academic_service.list_courses(&query).await {
        Ok(courses) => Ok(HttpResponse::Ok().json(ApiResponse::success(courses))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/courses",
    tag = "academics",
    request_body = CourseRequest,
    responses(
        (status = 200, description = "Course created", body = CourseResponse),
        (status = 400, description = "Credits out of range"),
        (status = 404, description = "Program not found")
    )
)]
pub async fn create_course(
    academic_service: web::Data<AcademicService>,
    request: web::Json<CourseRequest>,
) -> Result<HttpResponse> {
    match academic_service.create_course(request.into_inner()).await {
        Ok(course) => Ok(HttpResponse::Ok().json(ApiResponse::success(course))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/courses/{id}",
    tag = "academics",
    params(("id" = i64, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course with enrollment count", body = CourseDetailResponse),
        (status = 404, description = "Course not found")
    )
)]
pub async fn get_course(
    academic_service: web::Data<AcademicService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match academic_service.get_course(path.into_inner()).await {
        Ok(course) => Ok(HttpResponse::Ok().json(ApiResponse::success(course))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/courses/{id}",
    tag = "academics",
    params(("id" = i64, Path, description = "Course id")),
    request_body = CourseRequest,
    responses(
        (status = 200, description = "Course updated", body = CourseResponse),
        (status = 404, description = "Course not found")
    )
)]
pub async fn update_course(
    academic_service: web::Data<AcademicService>,
    path: web::Path<i64>,
    request: web::Json<CourseRequest>,
) -> Result<HttpResponse> {
    match academic_service
        .update_course(path.into_inner(), request.into_inner())
        .await
    {
        Ok(course) => Ok(HttpResponse::Ok().json(ApiResponse::success(course))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/courses/{id}",
    tag = "academics",
    params(("id" = i64, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course and its registrations deleted"),
        (status = 404, description = "Course not found")
    )
)]
pub async fn delete_course(
    academic_service: web::Data<AcademicService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match academic_service.delete_course(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::message("Course deleted"))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/courses/{id}/students",
    tag = "academics",
    params(("id" = i64, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course roster", body = CourseRosterResponse),
        (status = 404, description = "Course not found")
    )
)]
pub async fn course_roster(
    academic_service: web::Data<AcademicService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match academic_service.course_roster(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn academic_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/programs")
            .route("", web::get().to(list_programs))
            .route("", web::post().to(create_program))
            .route("/{id}", web::get().to(get_program))
            .route("/{id}", web::put().to(update_program))
            .route("/{id}", web::delete().to(delete_program))
            .route("/{id}/students", web::get().to(program_students))
            .route("/{id}/courses", web::get().to(program_courses)),
    )
    .service(
        web::scope("/students")
            .route("", web::get().to(list_students))
            .route("", web::post().to(create_student))
            .route("/{id}", web::get().to(get_student))
            .route("/{id}", web::put().to(update_student))
            .route("/{id}", web::delete().to(delete_student))
            .route("/{id}/registrations", web::get().to(student_registrations)),
    )
    .service(
        web::scope("/courses")
            .route("", web::get().to(list_courses))
            .route("", web::post().to(create_course))
            .route("/{id}", web::get().to(get_course))
            .route("/{id}", web::put().to(update_course))
            .route("/{id}", web::delete().to(delete_course))
            .route("/{id}/students", web::get().to(course_roster)),
    );
}
