//! Roles and per-route access requirements.
//!
//! Every route in the table declares a [`RouteAccess`]. `Public` routes skip
//! authentication and authorization entirely; `Roles` routes admit a caller
//! holding at least one of the listed roles.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::User, Role::Admin];

    /// Name as stored in the `roles` table.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("USER"),
            Role::Admin => f.write_str("ADMIN"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RouteAccess {
    #[default]
    Public,
    Roles(BTreeSet<Role>),
}

impl RouteAccess {
    pub fn public() -> Self {
        RouteAccess::Public
    }

    /// An empty role list collapses to [`RouteAccess::Public`].
    pub fn roles<I>(roles: I) -> Self
    where
        I: IntoIterator<Item = Role>,
    {
        let set: BTreeSet<Role> = roles.into_iter().collect();
        if set.is_empty() {
            RouteAccess::Public
        } else {
            RouteAccess::Roles(set)
        }
    }

    pub fn is_open(&self) -> bool {
        match self {
            RouteAccess::Public => true,
            RouteAccess::Roles(set) => set.is_empty(),
        }
    }

    pub fn required_roles(&self) -> Option<&BTreeSet<Role>> {
        match self {
            RouteAccess::Public => None,
            RouteAccess::Roles(set) => Some(set),
        }
    }

    /// Role names for the route overview; `["ANYONE"]` for open routes.
    pub fn role_names(&self) -> Vec<String> {
        match self.required_roles() {
            Some(set) if !set.is_empty() => set.iter().map(ToString::to_string).collect(),
            _ => vec!["ANYONE".to_string()],
        }
    }
}

impl fmt::Display for RouteAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.required_roles() {
            Some(set) if !set.is_empty() => f.write_str(&format_role_set(set)),
            _ => f.write_str("ANYONE"),
        }
    }
}

/// Renders a role collection as `[a, b]`.
pub fn format_role_set<I, T>(roles: I) -> String
where
    I: IntoIterator<Item = T>,
    T: fmt::Display,
{
    let names: Vec<String> = roles.into_iter().map(|r| r.to_string()).collect();
    format!("[{}]", names.join(", "))
}
