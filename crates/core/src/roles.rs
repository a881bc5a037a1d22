//! Well-known role name constants.
//!
//! These must match the `chk_users_role` constraint in
//! `20260301000001_create_users_table.sql`.

pub const ROLE_ADMIN: &str = "Admin";
pub const ROLE_USER: &str = "User";

/// Collapse a stored role value onto one of the two known roles.
///
/// Anything other than [`ROLE_ADMIN`] is treated as a regular user, so a
/// corrupted or unexpected value never grants elevated access.
pub fn normalize_role(role: &str) -> &'static str {
    if role == ROLE_ADMIN {
        ROLE_ADMIN
    } else {
        ROLE_USER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_is_preserved() {
        assert_eq!(normalize_role("Admin"), ROLE_ADMIN);
    }

    #[test]
    fn unknown_roles_fall_back_to_user() {
        assert_eq!(normalize_role("User"), ROLE_USER);
        assert_eq!(normalize_role("admin"), ROLE_USER);
        assert_eq!(normalize_role(""), ROLE_USER);
    }
}
