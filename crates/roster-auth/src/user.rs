use std::collections::BTreeSet;

use crate::claims::Claims;
use crate::roles::Role;

/// Caller identity extracted from a verified token. Lives in request
/// extensions for the duration of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub username: String,
    pub roles: BTreeSet<String>,
}

impl AuthenticatedUser {
    pub fn new<I, S>(username: impl Into<String>, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            username: username.into(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    /// Case-insensitive role membership.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.iter().any(|r| r.eq_ignore_ascii_case(role.as_str()))
    }

    pub fn has_any_role(&self, required: &BTreeSet<Role>) -> bool {
        required.iter().any(|role| self.has_role(*role))
    }
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self::new(claims.sub, claims.roles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_check_ignores_case() {
        let user = AuthenticatedUser::new("super", ["USER", "Admin"]);
        assert!(user.has_role(Role::User));
        assert!(user.has_role(Role::Admin));
    }

    #[test]
    fn test_has_any_role() {
        let user = AuthenticatedUser::new("user", ["user"]);
        assert!(user.has_any_role(&BTreeSet::from([Role::User, Role::Admin])));
        assert!(!user.has_any_role(&BTreeSet::from([Role::Admin])));
        assert!(!user.has_any_role(&BTreeSet::new()));
    }
}
