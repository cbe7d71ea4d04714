use actix_web::{HttpResponse, ResponseError, Result, web};

use crate::models::*;
use crate::services::RegistrationService;

#[utoipa::path(
    get,
    path = "/registrations",
    tag = "registrations",
    params(
        ("student_id" = Option<i64>, Query, description = "Filter by student"),
        ("course_id" = Option<i64>, Query, description = "Filter by course"),
        ("day" = Option<String>, Query, description = "Filter by course weekday")
    ),
    responses((status = 200, description = "Matching registrations", body = [RegistrationResponse]))
)]
pub async fn list_registrations(
    registration_service: web::Data<RegistrationService>,
    query: web::Query<RegistrationQuery>,
) -> Result<HttpResponse> {
    match registration_service.list_registrations(&query).await {
        Ok(registrations) => Ok(HttpResponse::Ok().json(ApiResponse::success(registrations))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/registrations",
    tag = "registrations",
    request_body = RegistrationRequest,
    responses(
        (status = 200, description = "Registration created", body = RegistrationResponse),
        (status = 404, description = "Student or course not found"),
        (status = 409, description = "Student already registered for the course")
    )
)]
pub async fn create_registration(
    registration_service: web::Data<RegistrationService>,
    request: web::Json<RegistrationRequest>,
) -> Result<HttpResponse> {
    match registration_service
        .create_registration(request.into_inner())
        .await
    {
        Ok(registration) => Ok(HttpResponse::Ok().json(ApiResponse::success(registration))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/registrations/{id}",
    tag = "registrations",
    params(("id" = i64, Path, description = "Registration id")),
    responses(
        (status = 200, description = "Registration detail", body = RegistrationResponse),
        (status = 404, description = "Registration not found")
    )
)]
pub async fn get_registration(
    registration_service: web::Data<RegistrationService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match registration_service.get_registration(path.into_inner()).await {
        Ok(registration) => Ok(HttpResponse::Ok().json(ApiResponse::success(registration))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/registrations/{id}",
    tag = "registrations",
    params(("id" = i64, Path, description = "Registration id")),
    request_body = RegistrationRequest,
    responses(
        (status = 200, description = "Registration updated", body = RegistrationResponse),
        (status = 404, description = "Registration, student or course not found"),
        (status = 409, description = "Student already registered for the course")
    )
)]
pub async fn update_registration(
    registration_service: web::Data<RegistrationService>,
    path: web::Path<i64>,
    request: web::Json<RegistrationRequest>,
) -> Result<HttpResponse> {
    match registration_service
        .update_registration(path.into_inner(), request.into_inner())
        .await
    {
        Ok(registration) => Ok(HttpResponse::Ok().json(ApiResponse::success(registration))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/registrations/{id}",
    tag = "registrations",
    params(("id" = i64, Path, description = "Registration id")),
    responses(
        (status = 200, description = "Registration dropped"),
        (status = 404, description = "Registration not found")
    )
)]
pub async fn delete_registration(
    registration_service: web::Data<RegistrationService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match registration_service
        .delete_registration(path.into_inner())
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::message("Registration deleted"))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/registrations/summary",
    tag = "registrations",
    responses((status = 200, description = "Registration totals and the busiest course", body = RegistrationSummaryResponse))
)]
pub async fn registration_summary(
    registration_service: web::Data<RegistrationService>,
) -> Result<HttpResponse> {
    match registration_service.summary().await {
        Ok(summary) => Ok(HttpResponse::Ok().json(ApiResponse::success(summary))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/registrations/bulk",
    tag = "registrations",
    request_body = BulkRegisterRequest,
    responses(
        (status = 200, description = "Per-course results; failures do not abort the rest", body = BulkRegisterResponse),
        (status = 400, description = "Empty course list"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn bulk_register(
    registration_service: web::Data<RegistrationService>,
    request: web::Json<BulkRegisterRequest>,
) -> Result<HttpResponse> {
    match registration_service.bulk_register(request.into_inner()).await {
        Ok(result) => Ok(HttpResponse::Ok().json(ApiResponse::success(result))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn registration_config(cfg: &mut web::ServiceConfig) {
    // Literal segments before /{id} so "summary" is not parsed as an id
    cfg.service(
        web::scope("/registrations")
            .route("/summary", web::get().to(registration_summary))
            .route("/bulk", web::post().to(bulk_register))
            .route("", web::get().to(list_registrations))
            .route("", web::post().to(create_registration))
            .route("/{id}", web::get().to(get_registration))
            .route("/{id}", web::put().to(update_registration))
            .route("/{id}", web::delete().to(delete_registration)),
    );
}
