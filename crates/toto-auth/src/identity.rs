use super::*;
use toto_core::ExternalId;

/// Platform identity claimed by a verified launch payload.
///
/// This is the claim presented for punter lookup or creation, not the
/// persisted record itself. Extract only after [`Verifier::verify`]
/// has accepted the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    external: ExternalId,
    name: String,
    profile: serde_json::Value,
}

impl Identity {
    /// Parses the `user` field of a launch payload.
    ///
    /// Re-parses the pair structure independently of verification.
    /// Returns `None` when the payload is malformed, the `user` value is
    /// not JSON, or it carries no numeric `id`.
    pub fn parse(init_data: &str) -> Option<Self> {
        let pairs = initdata::fields(init_data)?;
        let user = pairs.into_iter().rev().find(|(k, _)| k == "user")?.1;
        let profile: serde_json::Value = serde_json::from_str(&user)
            .inspect_err(|e| log::warn!("unparseable user field in launch payload: {}", e))
            .ok()?;
        let external = profile.get("id")?.as_i64()?;
        let first = profile.get("first_name").and_then(|v| v.as_str()).unwrap_or("");
        let last = profile.get("last_name").and_then(|v| v.as_str()).unwrap_or("");
        let name = format!("{} {}", first, last).trim().to_string();
        Some(Self {
            external,
            name,
            profile,
        })
    }
    pub fn external(&self) -> ExternalId {
        self.external
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn profile(&self) -> &serde_json::Value {
        &self.profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_user_field() {
        let identity =
            Identity::parse("user=%7B%22id%22%3A42%2C%22first_name%22%3A%22Ann%22%7D&auth_date=1")
                .unwrap();
        assert_eq!(identity.external(), 42);
        assert_eq!(identity.name(), "Ann");
        assert_eq!(identity.profile()["id"], 42);
    }

    #[test]
    fn assembles_display_name() {
        let identity = Identity::parse(
            "user=%7B%22id%22%3A7%2C%22first_name%22%3A%22Ann%22%2C%22last_name%22%3A%22Lee%22%7D",
        )
        .unwrap();
        assert_eq!(identity.name(), "Ann Lee");
    }

    #[test]
    fn none_without_user_field() {
        assert_eq!(Identity::parse("auth_date=1700000000&hash=ff"), None);
    }

    #[test]
    fn none_on_unparseable_user_json() {
        assert_eq!(Identity::parse("user=notjson"), None);
    }

    #[test]
    fn none_without_numeric_id() {
        assert_eq!(Identity::parse("user=%7B%22first_name%22%3A%22Ann%22%7D"), None);
    }
}
