use crate::entities::Role;

/// Role-gated actions in the grades area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateGrade,
    UpdateGrade,
    DeleteGrade,
    ReadOwnGrades,
    ListStudents,
}

/// Single place permission decisions are made. Roles are explicit enum
/// values; ownership checks (an instructor may only touch rows they
/// created) stay in the service layer.
pub fn can(role: Role, action: Action) -> bool {
    match (role, action) {
        (Role::Instructor, Action::CreateGrade)
        | (Role::Instructor, Action::UpdateGrade)
        | (Role::Instructor, Action::DeleteGrade)
        | (Role::Instructor, Action::ListStudents) => true,
        (_, Action::ReadOwnGrades) => true,
        (Role::Student, _) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instructor_permissions() {
        assert!(can(Role::Instructor, Action::CreateGrade));
        assert!(can(Role::Instructor, Action::UpdateGrade));
        assert!(can(Role::Instructor, Action::DeleteGrade));
        assert!(can(Role::Instructor, Action::ListStudents));
        assert!(can(Role::Instructor, Action::ReadOwnGrades));
    }

    #[test]
    fn test_student_permissions() {
        assert!(can(Role::Student, Action::ReadOwnGrades));
        assert!(!can(Role::Student, Action::CreateGrade));
        assert!(!can(Role::Student, Action::UpdateGrade));
        assert!(!can(Role::Student, Action::DeleteGrade));
        assert!(!can(Role::Student, Action::ListStudents));
    }
}
