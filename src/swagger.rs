use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{CourseDay, OrderStatus, Role, TransactionKind};
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::refresh,
        handlers::auth::me,
        handlers::accounts::list_accounts,
        handlers::accounts::create_account,
        handlers::accounts::get_account,
        handlers::accounts::update_account,
        handlers::accounts::delete_account,
        handlers::accounts::list_transactions,
        handlers::accounts::create_transaction,
        handlers::accounts::delete_transaction,
        handlers::academics::list_programs,
        handlers::academics::create_program,
        handlers::academics::get_program,
        handlers::academics::update_program,
        handlers::academics::delete_program,
        handlers::academics::program_students,
        handlers::academics::program_courses,
        handlers::academics::list_students,
        handlers::academics::create_student,
        handlers::academics::get_student,
        handlers::academics::update_student,
        handlers::academics::delete_student,
        handlers::academics::student_registrations,
        handlers::academics::list_courses,
        handlers::academics::create_course,
        handlers::academics::get_course,
        handlers::academics::update_course,
        handlers::academics::delete_course,
        handlers::academics::course_roster,
        handlers::registrations::list_registrations,
        handlers::registrations::create_registration,
        handlers::registrations::get_registration,
        handlers::registrations::update_registration,
        handlers::registrations::delete_registration,
        handlers::registrations::registration_summary,
        handlers::registrations::bulk_register,
        handlers::news::list_articles,
        handlers::news::create_article,
        handlers::news::get_article,
        handlers::news::update_article,
        handlers::news::delete_article,
        handlers::news::list_comments,
        handlers::news::create_comment,
        handlers::news::get_comment,
        handlers::news::update_comment,
        handlers::news::delete_comment,
        handlers::products::list_products,
        handlers::products::create_product,
        handlers::products::get_product,
        handlers::products::update_product,
        handlers::products::delete_product,
        handlers::cart::get_cart,
        handlers::cart::add_item,
        handlers::cart::update_item,
        handlers::cart::remove_item,
        handlers::cart::clear_cart,
        handlers::orders::checkout,
        handlers::orders::list_orders,
        handlers::orders::get_order,
        handlers::grades::list_grades,
        handlers::grades::get_grade,
        handlers::grades::create_grade,
        handlers::grades::update_grade,
        handlers::grades::delete_grade,
        handlers::grades::list_student_accounts,
    ),
    components(
        schemas(
            ApiError,
            Role,
            RegisterRequest,
            LoginRequest,
            UserResponse,
            AuthResponse,
            TransactionKind,
            AccountRequest,
            AccountResponse,
            AccountDetailResponse,
            CreateTransactionRequest,
            TransactionResponse,
            ProgramRequest,
            ProgramResponse,
            ProgramStudentsResponse,
            ProgramCoursesResponse,
            StudentRequest,
            StudentResponse,
            StudentDetailResponse,
            CourseDay,
            CourseRequest,
            CourseResponse,
            CourseDetailResponse,
            RosterEntry,
            CourseRosterResponse,
            RegistrationRequest,
            RegistrationResponse,
            StudentRegistrationsResponse,
            PopularCourse,
            RegistrationSummaryResponse,
            BulkRegisterRequest,
            BulkRegisterResponse,
            BulkRegisteredCourse,
            BulkFailedCourse,
            ArticleRequest,
            ArticleResponse,
            ArticleDetailResponse,
            CommentRequest,
            CommentResponse,
            ProductRequest,
            ProductResponse,
            AddCartItemRequest,
            UpdateCartItemRequest,
            CartItemResponse,
            CartResponse,
            OrderStatus,
            CreateOrderRequest,
            OrderItemResponse,
            OrderResponse,
            CreateGradeRequest,
            UpdateGradeRequest,
            GradeResponse,
            StudentAccountResponse,
            PaginationInfo,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration, login and token refresh"),
        (name = "accounts", description = "Bank accounts with transaction-derived balances"),
        (name = "academics", description = "Programs, students and courses"),
        (name = "registrations", description = "Course registrations"),
        (name = "news", description = "Articles and comments"),
        (name = "store", description = "Products, cart and orders"),
        (name = "grades", description = "Role-gated grade records"),
    ),
    info(
        title = "Campus Backend API",
        version = "1.0.0",
        description = "Campus services REST API documentation"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
