use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};

use crate::error::AppError;
use crate::middlewares::CurrentUser;
use crate::models::*;
use crate::services::GradeService;

fn current_user(req: &HttpRequest) -> Result<CurrentUser, AppError> {
    req.extensions()
        .get::<CurrentUser>()
        .copied()
        .ok_or_else(|| AppError::AuthError("Authentication required".to_string()))
}

#[utoipa::path(
    get,
    path = "/grades",
    tag = "grades",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own grades for students, authored grades for instructors", body = [GradeResponse]),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_grades(
    grade_service: web::Data<GradeService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match grade_service.list_grades(user.id, user.role).await {
        Ok(grades) => Ok(HttpResponse::Ok().json(ApiResponse::success(grades))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/grades/{id}",
    tag = "grades",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Grade id")),
    responses(
        (status = 200, description = "Grade detail", body = GradeResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Grade not found or not visible to the caller")
    )
)]
pub async fn get_grade(
    grade_service: web::Data<GradeService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match grade_service
        .get_grade(user.id, user.role, path.into_inner())
        .await
    {
        Ok(grade) => Ok(HttpResponse::Ok().json(ApiResponse::success(grade))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/grades",
    tag = "grades",
    security(("bearer_auth" = [])),
    request_body = CreateGradeRequest,
    responses(
        (status = 200, description = "Grade created", body = GradeResponse),
        (status = 400, description = "Grade out of range or target not a student"),
        (status = 403, description = "Caller is not an instructor"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn create_grade(
    grade_service: web::Data<GradeService>,
    req: HttpRequest,
    request: web::Json<CreateGradeRequest>,
) -> Result<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match grade_service
        .create_grade(user.id, user.role, request.into_inner())
        .await
    {
        Ok(grade) => Ok(HttpResponse::Ok().json(ApiResponse::success(grade))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/grades/{id}",
    tag = "grades",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Grade id")),
    request_body = UpdateGradeRequest,
    responses(
        (status = 200, description = "Grade updated", body = GradeResponse),
        (status = 403, description = "Not the instructor who entered it"),
        (status = 404, description = "Grade not found")
    )
)]
pub async fn update_grade(
    grade_service: web::Data<GradeService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UpdateGradeRequest>,
) -> Result<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match grade_service
        .update_grade(user.id, user.role, path.into_inner(), request.into_inner())
        .await
    {
        Ok(grade) => Ok(HttpResponse::Ok().json(ApiResponse::success(grade))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/grades/{id}",
    tag = "grades",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Grade id")),
    responses(
        (status = 200, description = "Grade deleted"),
        (status = 403, description = "Not the instructor who entered it"),
        (status = 404, description = "Grade not found")
    )
)]
pub async fn delete_grade(
    grade_service: web::Data<GradeService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match grade_service
        .delete_grade(user.id, user.role, path.into_inner())
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::message("Grade deleted"))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/grades/students",
    tag = "grades",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Directory of student accounts", body = [StudentAccountResponse]),
        (status = 403, description = "Caller is not an instructor")
    )
)]
pub async fn list_student_accounts(
    grade_service: web::Data<GradeService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match grade_service.list_students(user.role).await {
        Ok(students) => Ok(HttpResponse::Ok().json(ApiResponse::success(students))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn grade_config(cfg: &mut web::ServiceConfig) {
    // Literal segment before /{id} so "students" is not parsed as an id
    cfg.service(
        web::scope("/grades")
            .route("/students", web::get().to(list_student_accounts))
            .route("", web::get().to(list_grades))
            .route("", web::post().to(create_grade))
            .route("/{id}", web::get().to(get_grade))
            .route("/{id}", web::put().to(update_grade))
            .route("/{id}", web::delete().to(delete_grade)),
    );
}
