mod common;

use campus_backend::entities::Role;
use campus_backend::error::AppError;
use campus_backend::models::*;
use campus_backend::services::{AuthService, GradeService};
use campus_backend::utils::JwtService;
use rust_decimal_macros::dec;
use sea_orm::DatabaseConnection;

fn auth_service(pool: DatabaseConnection) -> AuthService {
    let jwt = JwtService::new("test-secret", 3600, 86400);
    AuthService::new(pool, jwt)
}

fn register_request(email: &str, role: Role) -> RegisterRequest {
    RegisterRequest {
        email: email.to_string(),
        username: "jane".to_string(),
        full_name: "Jane Holloway".to_string(),
        password: "Password123".to_string(),
        role: Some(role),
        major: Some("Digital Business Technology".to_string()),
    }
}

#[tokio::test]
async fn register_then_login_round_trip() {
    let pool = common::setup().await;
    let auth = auth_service(pool);

    let registered = auth
        .register(register_request("jane@example.edu", Role::Student))
        .await
        .unwrap();
    assert_eq!(registered.user.role, Role::Student);
    assert!(!registered.access_token.is_empty());

    let logged_in = auth
        .login(LoginRequest {
            email: "jane@example.edu".to_string(),
            password: "Password123".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(logged_in.user.id, registered.user.id);

    let me = auth.me(registered.user.id).await.unwrap();
    assert_eq!(me.email, "jane@example.edu");
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let pool = common::setup().await;
    let auth = auth_service(pool);

    auth.register(register_request("jane@example.edu", Role::Student))
        .await
        .unwrap();

    let err = auth
        .login(LoginRequest {
            email: "jane@example.edu".to_string(),
            password: "WrongPassword1".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AuthError(_)));

    let err = auth
        .login(LoginRequest {
            email: "nobody@example.edu".to_string(),
            password: "Password123".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AuthError(_)));
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let pool = common::setup().await;
    let auth = auth_service(pool);

    auth.register(register_request("jane@example.edu", Role::Student))
        .await
        .unwrap();
    let err = auth
        .register(register_request("jane@example.edu", Role::Instructor))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn register_validates_email_and_password() {
    let pool = common::setup().await;
    let auth = auth_service(pool);

    let bad_email = register_request("not-an-email", Role::Student);
    let err = auth.register(bad_email).await.unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    let mut weak = register_request("weak@example.edu", Role::Student);
    weak.password = "short".to_string();
    let err = auth.register(weak).await.unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn refresh_issues_a_new_token_pair() {
    let pool = common::setup().await;
    let auth = auth_service(pool);

    let registered = auth
        .register(register_request("jane@example.edu", Role::Student))
        .await
        .unwrap();

    let refreshed = auth.refresh(&registered.refresh_token).await.unwrap();
    assert_eq!(refreshed.user.id, registered.user.id);
    assert!(!refreshed.access_token.is_empty());

    // An access token is not a refresh token
    let err = auth.refresh(&registered.access_token).await.unwrap_err();
    assert!(matches!(err, AppError::AuthError(_)));
}

#[tokio::test]
async fn only_instructors_manage_grades() {
    let pool = common::setup().await;
    let auth = auth_service(pool.clone());
    let grades = GradeService::new(pool);

    let instructor = auth
        .register(register_request("prof@example.edu", Role::Instructor))
        .await
        .unwrap()
        .user;
    let student = auth
        .register(register_request("jane@example.edu", Role::Student))
        .await
        .unwrap()
        .user;

    let err = grades
        .create_grade(
            student.id,
            Role::Student,
            CreateGradeRequest {
                student_id: student.id,
                course_name: "Web Engineering".to_string(),
                grade: dec!(90.00),
                semester: "2025/2026-1".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let grade = grades
        .create_grade(
            instructor.id,
            Role::Instructor,
            CreateGradeRequest {
                student_id: student.id,
                course_name: "Web Engineering".to_string(),
                grade: dec!(88.50),
                semester: "2025/2026-1".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(grade.student_name, "Jane Holloway");
    assert_eq!(grade.instructor_id, instructor.id);

    // Students read their own grades only
    let own = grades.list_grades(student.id, Role::Student).await.unwrap();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].grade, dec!(88.50));

    let err = grades.list_students(Role::Student).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
    let directory = grades.list_students(Role::Instructor).await.unwrap();
    assert_eq!(directory.len(), 1);
    assert_eq!(directory[0].id, student.id);
}

#[tokio::test]
async fn instructors_only_touch_their_own_grades() {
    let pool = common::setup().await;
    let auth = auth_service(pool.clone());
    let grades = GradeService::new(pool);

    let owner = auth
        .register(register_request("prof@example.edu", Role::Instructor))
        .await
        .unwrap()
        .user;
    let rival = auth
        .register(register_request("rival@example.edu", Role::Instructor))
        .await
        .unwrap()
        .user;
    let student = auth
        .register(register_request("jane@example.edu", Role::Student))
        .await
        .unwrap()
        .user;

    let grade = grades
        .create_grade(
            owner.id,
            Role::Instructor,
            CreateGradeRequest {
                student_id: student.id,
                course_name: "Databases".to_string(),
                grade: dec!(75.00),
                semester: "2025/2026-1".to_string(),
            },
        )
        .await
        .unwrap();

    let err = grades
        .update_grade(
            rival.id,
            Role::Instructor,
            grade.id,
            UpdateGradeRequest {
                course_name: "Databases".to_string(),
                grade: dec!(10.00),
                semester: "2025/2026-1".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let err = grades
        .delete_grade(rival.id, Role::Instructor, grade.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let updated = grades
        .update_grade(
            owner.id,
            Role::Instructor,
            grade.id,
            UpdateGradeRequest {
                course_name: "Databases".to_string(),
                grade: dec!(80.00),
                semester: "2025/2026-1".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.grade, dec!(80.00));

    grades
        .delete_grade(owner.id, Role::Instructor, grade.id)
        .await
        .unwrap();
    assert!(
        grades
            .list_grades(owner.id, Role::Instructor)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn grades_are_bounded_and_student_only() {
    let pool = common::setup().await;
    let auth = auth_service(pool.clone());
    let grades = GradeService::new(pool);

    let instructor = auth
        .register(register_request("prof@example.edu", Role::Instructor))
        .await
        .unwrap()
        .user;
    let other_prof = auth
        .register(register_request("prof2@example.edu", Role::Instructor))
        .await
        .unwrap()
        .user;
    let student = auth
        .register(register_request("jane@example.edu", Role::Student))
        .await
        .unwrap()
        .user;

    let err = grades
        .create_grade(
            instructor.id,
            Role::Instructor,
            CreateGradeRequest {
                student_id: student.id,
                course_name: "Databases".to_string(),
                grade: dec!(101.00),
                semester: "2025/2026-1".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    // Grading another instructor is rejected
    let err = grades
        .create_grade(
            instructor.id,
            Role::Instructor,
            CreateGradeRequest {
                student_id: other_prof.id,
                course_name: "Databases".to_string(),
                grade: dec!(90.00),
                semester: "2025/2026-1".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn a_grade_is_readable_only_by_its_student_and_instructor() {
    let pool = common::setup().await;
    let auth = auth_service(pool.clone());
    let grades = GradeService::new(pool);

    let instructor = auth
        .register(register_request("prof@example.edu", Role::Instructor))
        .await
        .unwrap()
        .user;
    let other_instructor = auth
        .register(register_request("rival@example.edu", Role::Instructor))
        .await
        .unwrap()
        .user;
    let student = auth
        .register(register_request("jane@example.edu", Role::Student))
        .await
        .unwrap()
        .user;
    let other_student = auth
        .register(register_request("budi@example.edu", Role::Student))
        .await
        .unwrap()
        .user;

    let grade = grades
        .create_grade(
            instructor.id,
            Role::Instructor,
            CreateGradeRequest {
                student_id: student.id,
                course_name: "Web Engineering".to_string(),
                grade: dec!(88.50),
                semester: "2025/2026-1".to_string(),
            },
        )
        .await
        .unwrap();

    let seen = grades
        .get_grade(student.id, Role::Student, grade.id)
        .await
        .unwrap();
    assert_eq!(seen.grade, dec!(88.50));
    let seen = grades
        .get_grade(instructor.id, Role::Instructor, grade.id)
        .await
        .unwrap();
    assert_eq!(seen.id, grade.id);

    // Everyone else reads it as missing
    let err = grades
        .get_grade(other_student.id, Role::Student, grade.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    let err = grades
        .get_grade(other_instructor.id, Role::Instructor, grade.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    let err = grades
        .get_grade(student.id, Role::Student, 9999)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
