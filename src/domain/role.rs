//! Role reference data and signup role resolution.
//!
//! Roles are canonical, pre-seeded reference rows. The request flow only
//! ever resolves labels against them; it never creates roles.

use std::collections::BTreeSet;

/// Canonical role names seeded into the role reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RoleName {
    User,
    Admin,
    Delivery,
}

impl RoleName {
    /// Every canonical role, in seed order.
    pub const ALL: [RoleName; 3] = [RoleName::User, RoleName::Admin, RoleName::Delivery];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::User => "ROLE_USER",
            RoleName::Admin => "ROLE_ADMIN",
            RoleName::Delivery => "ROLE_DELIVERY",
        }
    }
}

impl core::fmt::Display for RoleName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Map one requested label to its canonical role.
///
/// Total on strings: "admin" and "delivery" select the privileged roles,
/// every other label (case-sensitive) falls back to the default role.
fn label_to_role(label: &str) -> RoleName {
    match label {
        "admin" => RoleName::Admin,
        "delivery" => RoleName::Delivery,
        _ => RoleName::User,
    }
}

/// Resolve the role labels of a signup request into canonical roles.
///
/// An absent label set defaults to `ROLE_USER`. An empty set is treated the
/// same way, so an account always ends up with at least one role. Duplicate
/// labels collapse.
pub fn resolve_role_labels(labels: Option<&[String]>) -> Vec<RoleName> {
    let labels = match labels {
        Some(labels) if !labels.is_empty() => labels,
        _ => return vec![RoleName::User],
    };

    let resolved: BTreeSet<RoleName> = labels.iter().map(|l| label_to_role(l)).collect();
    resolved.into_iter().collect()
}

// ── Tests ──────────────────────────────────────────────────────
