mod common;

use campus_backend::entities::CourseDay;
use campus_backend::error::AppError;
use campus_backend::models::*;
use campus_backend::services::{AcademicService, RegistrationService};
use sea_orm::DatabaseConnection;

async fn seed_program(service: &AcademicService) -> ProgramResponse {
    service
        .create_program(ProgramRequest {
            name: "Digital Business Technology".to_string(),
            head: "Dr. Susanti".to_string(),
        })
        .await
        .unwrap()
}

async fn seed_student(
    service: &AcademicService,
    program_id: i64,
    number: &str,
) -> StudentResponse {
    service
        .create_student(StudentRequest {
            name: "Andi Pratama".to_string(),
            student_number: number.to_string(),
            program_id,
        })
        .await
        .unwrap()
}

async fn seed_course(service: &AcademicService, program_id: i64, title: &str) -> CourseResponse {
    service
        .create_course(CourseRequest {
            title: title.to_string(),
            program_id,
            day: CourseDay::Monday,
            credits: 3,
        })
        .await
        .unwrap()
}

fn services(pool: DatabaseConnection) -> (AcademicService, RegistrationService) {
    (
        AcademicService::new(pool.clone()),
        RegistrationService::new(pool),
    )
}

#[tokio::test]
async fn duplicate_student_number_conflicts() {
    let pool = common::setup().await;
    let (academics, _) = services(pool);

    let program = seed_program(&academics).await;
    seed_student(&academics, program.id, "2021001").await;

    let err = academics
        .create_student(StudentRequest {
            name: "Budi Santoso".to_string(),
            student_number: "2021001".to_string(),
            program_id: program.id,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let all = academics.list_students(&StudentQuery::default()).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn course_credits_must_be_in_range() {
    let pool = common::setup().await;
    let (academics, _) = services(pool);
    let program = seed_program(&academics).await;

    for credits in [0, 7] {
        let err = academics
            .create_course(CourseRequest {
                title: "Web Engineering".to_string(),
                program_id: program.id,
                day: CourseDay::Tuesday,
                credits,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}

#[tokio::test]
async fn duplicate_registration_conflicts_without_a_second_row() {
    let pool = common::setup().await;
    let (academics, registrations) = services(pool);

    let program = seed_program(&academics).await;
    let student = seed_student(&academics, program.id, "2021002").await;
    let course = seed_course(&academics, program.id, "Web Engineering").await;

    registrations
        .create_registration(RegistrationRequest {
            student_id: student.id,
            course_id: course.id,
        })
        .await
        .unwrap();

    let err = registrations
        .create_registration(RegistrationRequest {
            student_id: student.id,
            course_id: course.id,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let rows = registrations
        .list_registrations(&RegistrationQuery::default())
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn bulk_register_is_partial_success() {
    let pool = common::setup().await;
    let (academics, registrations) = services(pool);

    let program = seed_program(&academics).await;
    let student = seed_student(&academics, program.id, "2021003").await;
    let taken = seed_course(&academics, program.id, "Databases").await;
    let open_a = seed_course(&academics, program.id, "Web Engineering").await;
    let open_b = seed_course(&academics, program.id, "Algorithms").await;

    registrations
        .create_registration(RegistrationRequest {
            student_id: student.id,
            course_id: taken.id,
        })
        .await
        .unwrap();

    let result = registrations
        .bulk_register(BulkRegisterRequest {
            student_id: student.id,
            course_ids: vec![open_a.id, taken.id, 9999, open_b.id],
        })
        .await
        .unwrap();

    assert_eq!(result.registered_count, 2);
    assert_eq!(result.failed_count, 2);
    assert_eq!(result.registered[0].course_id, open_a.id);
    assert_eq!(result.registered[1].course_id, open_b.id);
    assert_eq!(result.failed[0].reason, "Already registered");
    assert_eq!(result.failed[1].reason, "Course not found");

    // The pre-existing registration plus the two new ones
    let rows = registrations
        .list_registrations(&RegistrationQuery::default())
        .await
        .unwrap();
    assert_eq!(rows.len(), 3);
}

#[tokio::test]
async fn bulk_register_rejects_empty_course_list() {
    let pool = common::setup().await;
    let (academics, registrations) = services(pool);

    let program = seed_program(&academics).await;
    let student = seed_student(&academics, program.id, "2021004").await;

    let err = registrations
        .bulk_register(BulkRegisterRequest {
            student_id: student.id,
            course_ids: vec![],
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn summary_reports_the_most_popular_course() {
    let pool = common::setup().await;
    let (academics, registrations) = services(pool);

    let program = seed_program(&academics).await;
    let a = seed_student(&academics, program.id, "2021005").await;
    let b = seed_student(&academics, program.id, "2021006").await;
    let popular = seed_course(&academics, program.id, "Web Engineering").await;
    let niche = seed_course(&academics, program.id, "Compilers").await;

    for (student_id, course_id) in [(a.id, popular.id), (b.id, popular.id), (a.id, niche.id)] {
        registrations
            .create_registration(RegistrationRequest {
                student_id,
                course_id,
            })
            .await
            .unwrap();
    }

    let summary = registrations.summary().await.unwrap();
    assert_eq!(summary.total_registrations, 3);
    assert_eq!(summary.total_students, 2);
    assert_eq!(summary.total_courses, 2);
    let top = summary.most_popular_course.unwrap();
    assert_eq!(top.course_id, popular.id);
    assert_eq!(top.student_count, 2);
}

#[tokio::test]
async fn student_detail_lists_registrations_and_credits() {
    let pool = common::setup().await;
    let (academics, registrations) = services(pool);

    let program = seed_program(&academics).await;
    let student = seed_student(&academics, program.id, "2021007").await;
    let first = seed_course(&academics, program.id, "Web Engineering").await;
    let second = seed_course(&academics, program.id, "Databases").await;

    for course_id in [first.id, second.id] {
        registrations
            .create_registration(RegistrationRequest {
                student_id: student.id,
                course_id,
            })
            .await
            .unwrap();
    }

    let detail = academics.student_registrations(student.id).await.unwrap();
    assert_eq!(detail.total_courses, 2);
    assert_eq!(detail.total_credits, 6);

    let roster = academics.course_roster(first.id).await.unwrap();
    assert_eq!(roster.student_count, 1);
    assert_eq!(roster.students[0].student_number, "2021007");
}

#[tokio::test]
async fn student_filters_compose() {
    let pool = common::setup().await;
    let (academics, _) = services(pool);

    let program = seed_program(&academics).await;
    let other = academics
        .create_program(ProgramRequest {
            name: "Information Systems".to_string(),
            head: "Dr. Wijaya".to_string(),
        })
        .await
        .unwrap();

    seed_student(&academics, program.id, "2021008").await;
    academics
        .create_student(StudentRequest {
            name: "Citra Lestari".to_string(),
            student_number: "2022001".to_string(),
            program_id: other.id,
        })
        .await
        .unwrap();

    let filtered = academics
        .list_students(&StudentQuery {
            program_id: Some(other.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "Citra Lestari");

    let by_name = academics
        .list_students(&StudentQuery {
            name: Some("citra".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].program_name, "Information Systems");
}

#[tokio::test]
async fn a_registration_can_be_fetched_and_moved() {
    let pool = common::setup().await;
    let (academics, registrations) = services(pool);

    let program = seed_program(&academics).await;
    let student = seed_student(&academics, program.id, "2021001").await;
    let algebra = seed_course(&academics, program.id, "Linear Algebra").await;
    let statistics = seed_course(&academics, program.id, "Statistics").await;

    let reg = registrations
        .create_registration(RegistrationRequest {
            student_id: student.id,
            course_id: algebra.id,
        })
        .await
        .unwrap();

    let fetched = registrations.get_registration(reg.id).await.unwrap();
    assert_eq!(fetched.course_title, "Linear Algebra");
    assert_eq!(fetched.student_number, "2021001");

    let moved = registrations
        .update_registration(
            reg.id,
            RegistrationRequest {
                student_id: student.id,
                course_id: statistics.id,
            },
        )
        .await
        .unwrap();
    assert_eq!(moved.id, reg.id);
    assert_eq!(moved.course_title, "Statistics");

    let err = registrations.get_registration(9999).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn moving_a_registration_onto_an_existing_one_conflicts() {
    let pool = common::setup().await;
    let (academics, registrations) = services(pool);

    let program = seed_program(&academics).await;
    let student = seed_student(&academics, program.id, "2021001").await;
    let algebra = seed_course(&academics, program.id, "Linear Algebra").await;
    let statistics = seed_course(&academics, program.id, "Statistics").await;

    registrations
        .create_registration(RegistrationRequest {
            student_id: student.id,
            course_id: algebra.id,
        })
        .await
        .unwrap();
    let second = registrations
        .create_registration(RegistrationRequest {
            student_id: student.id,
            course_id: statistics.id,
        })
        .await
        .unwrap();

    let err = registrations
        .update_registration(
            second.id,
            RegistrationRequest {
                student_id: student.id,
                course_id: algebra.id,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // The failed move leaves both rows as they were
    let all = registrations
        .list_registrations(&RegistrationQuery::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
    let stats_reg = all.iter().find(|r| r.id == second.id).unwrap();
    assert_eq!(stats_reg.course_title, "Statistics");
}
