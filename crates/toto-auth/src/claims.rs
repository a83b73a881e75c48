use super::*;
use toto_core::ExternalId;

/// Signed session claims: a copy of the platform identity plus expiry.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct Claims {
    pub sub: ExternalId,
    pub usr: String,
    pub raw: serde_json::Value,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(identity: &Identity) -> Self {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time")
            .as_secs() as i64;
        Self {
            sub: identity.external(),
            usr: identity.name().to_string(),
            raw: identity.profile().clone(),
            iat: now,
            exp: now + Crypto::duration().as_secs() as i64,
        }
    }
    pub fn expired(&self) -> bool {
        self.exp
            < std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("time")
                .as_secs() as i64
    }
    pub fn external(&self) -> ExternalId {
        self.sub
    }
    pub fn name(&self) -> &str {
        &self.usr
    }
    pub fn profile(&self) -> &serde_json::Value {
        &self.raw
    }
}
