use super::*;

const ACCESS_TOKEN_DURATION: std::time::Duration = std::time::Duration::from_secs(15 * 60);

/// JWT signing and verification with a symmetric server-held secret.
///
/// Tokens are stateless: no session store exists, and a token stays
/// valid until its expiry. The short TTL bounds the exposure window.
pub struct Crypto {
    encoding: jsonwebtoken::EncodingKey,
    decoding: jsonwebtoken::DecodingKey,
}

impl Crypto {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: jsonwebtoken::EncodingKey::from_secret(secret),
            decoding: jsonwebtoken::DecodingKey::from_secret(secret),
        }
    }
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| String::default())
                .as_bytes(),
        )
    }
    /// Issues a token carrying the identity's claims, expiring after the TTL.
    pub fn issue(&self, identity: &Identity) -> Result<String, jsonwebtoken::errors::Error> {
        self.encode(&Claims::new(identity))
    }
    /// Validates signature and expiry.
    ///
    /// Bad signature, malformed structure, and expiry all collapse to
    /// `None`; callers answer "unauthenticated" without learning which.
    pub fn validate(&self, token: &str) -> Option<Claims> {
        self.decode(token).ok().filter(|claims| !claims.expired())
    }
    pub fn encode(&self, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        jsonwebtoken::encode(&jsonwebtoken::Header::default(), claims, &self.encoding)
    }
    pub fn decode(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &jsonwebtoken::Validation::default())
            .map(|data| data.claims)
    }
    pub const fn duration() -> std::time::Duration {
        ACCESS_TOKEN_DURATION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity::parse(
            "user=%7B%22id%22%3A42%2C%22first_name%22%3A%22Ann%22%2C%22last_name%22%3A%22Lee%22%7D",
        )
        .unwrap()
    }

    #[test]
    fn issued_token_round_trips_claims() {
        let crypto = Crypto::new(b"unit-test-secret");
        let token = crypto.issue(&identity()).unwrap();
        let claims = crypto.validate(&token).unwrap();
        assert_eq!(claims.external(), 42);
        assert_eq!(claims.name(), "Ann Lee");
        assert_eq!(claims.profile(), identity().profile());
        assert_eq!(claims.exp - claims.iat, Crypto::duration().as_secs() as i64);
    }

    #[test]
    fn expired_token_validates_to_none() {
        let crypto = Crypto::new(b"unit-test-secret");
        let mut claims = Claims::new(&identity());
        claims.iat -= 2 * Crypto::duration().as_secs() as i64;
        claims.exp -= 2 * Crypto::duration().as_secs() as i64;
        let token = crypto.encode(&claims).unwrap();
        assert!(crypto.validate(&token).is_none());
    }

    #[test]
    fn token_one_second_past_expiry_validates_to_none() {
        let crypto = Crypto::new(b"unit-test-secret");
        let mut claims = Claims::new(&identity());
        claims.exp = claims.iat - 1;
        let token = crypto.encode(&claims).unwrap();
        assert!(crypto.validate(&token).is_none());
    }

    #[test]
    fn tampered_token_validates_to_none() {
        let crypto = Crypto::new(b"unit-test-secret");
        let token = crypto.issue(&identity()).unwrap();
        for i in 0..token.len() {
            let mut bytes = token.clone().into_bytes();
            bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
            let Ok(mangled) = String::from_utf8(bytes) else {
                continue;
            };
            if mangled == token {
                continue;
            }
            assert!(crypto.validate(&mangled).is_none(), "byte {} survived", i);
        }
    }

    #[test]
    fn foreign_secret_validates_to_none() {
        let token = Crypto::new(b"one-secret").issue(&identity()).unwrap();
        assert!(Crypto::new(b"another-secret").validate(&token).is_none());
    }
}
