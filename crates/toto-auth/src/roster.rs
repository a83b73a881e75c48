use std::collections::HashSet;
use toto_core::ExternalId;

/// Static authorization sets, loaded once at startup and never mutated.
///
/// Authorized and admin membership are independent tests: admin status
/// neither implies nor requires authorized status.
pub struct Roster {
    authorized: HashSet<ExternalId>,
    admins: HashSet<ExternalId>,
}

impl Roster {
    pub fn new(
        authorized: impl IntoIterator<Item = ExternalId>,
        admins: impl IntoIterator<Item = ExternalId>,
    ) -> Self {
        Self {
            authorized: authorized.into_iter().collect(),
            admins: admins.into_iter().collect(),
        }
    }
    /// Parses comma-separated `AUTHORIZED_USERS` and `ADMIN_USERS`.
    pub fn from_env() -> Self {
        Self::new(ids_from_env("AUTHORIZED_USERS"), ids_from_env("ADMIN_USERS"))
    }
    pub fn is_authorized(&self, id: ExternalId) -> bool {
        self.authorized.contains(&id)
    }
    pub fn is_admin(&self, id: ExternalId) -> bool {
        self.admins.contains(&id)
    }
}

fn ids_from_env(var: &str) -> Vec<ExternalId> {
    std::env::var(var)
        .unwrap_or_default()
        .split(',')
        .filter_map(|id| id.trim().parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_tests_are_independent() {
        let roster = Roster::new([1, 2], [2, 3]);
        assert!(roster.is_authorized(1) && !roster.is_admin(1));
        assert!(roster.is_authorized(2) && roster.is_admin(2));
        assert!(!roster.is_authorized(3) && roster.is_admin(3));
        assert!(!roster.is_authorized(4) && !roster.is_admin(4));
    }
}
