use crate::models::domain::{Role, User};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// Creates a teacher with password "password"
    pub fn test_teacher() -> User {
        User::new("teacher1", "password", Role::Teacher).unwrap()
    }

    /// Creates a student with a custom userid and password "password"
    pub fn test_student(userid: &str) -> User {
        User::new(userid, "password", Role::Student).unwrap()
    }

    /// One user per role
    pub fn test_users() -> Vec<User> {
        vec![
            User::new("stu1", "password", Role::Student).unwrap(),
            User::new("teacher1", "password", Role::Teacher).unwrap(),
            User::new("root", "password", Role::Admin).unwrap(),
        ]
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_fixtures_test_teacher() {
        let user = test_teacher();
        assert_eq!(user.userid, "teacher1");
        assert_eq!(user.role, Role::Teacher);
        assert!(user.check_password("password"));
    }

    #[test]
    fn test_fixtures_test_student() {
        let user = test_student("custom");
        assert_eq!(user.userid, "custom");
        assert_eq!(user.role, Role::Student);
    }

    #[test]
    fn test_fixtures_test_users() {
        let users = test_users();
        let roles: Vec<Role> = users.iter().map(|u| u.role).collect();
        assert_eq!(roles, vec![Role::Student, Role::Teacher, Role::Admin]);
    }
}
