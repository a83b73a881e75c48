use std::collections::BTreeMap;

type Hmac256 = hmac::Hmac<sha2::Sha256>;

/// Key the platform uses to derive the payload-signing secret from a bot token.
const KEY_DERIVATION: &[u8] = b"WebAppData";

/// Splits a launch payload into percent-decoded key-value pairs.
///
/// Pairs are `&`-separated; only the first `=` splits key from value, so
/// values may themselves contain `=`. Returns `None` if any pair has no
/// `=` or a value that is not valid UTF-8 once decoded.
pub(crate) fn fields(init_data: &str) -> Option<Vec<(String, String)>> {
    init_data
        .split('&')
        .map(|pair| {
            pair.split_once('=').and_then(|(k, v)| {
                percent_encoding::percent_decode_str(v)
                    .decode_utf8()
                    .ok()
                    .map(|v| (k.to_string(), v.into_owned()))
            })
        })
        .collect()
}

/// Verifies the authenticity of launch payloads against the bot's secret.
///
/// Holds the derived signing key, computed once at construction:
/// HMAC-SHA256 of the bot token keyed by the platform constant.
pub struct Verifier {
    key: Vec<u8>,
}

impl Verifier {
    pub fn new(token: &str) -> Self {
        use hmac::Mac;
        let mut mac = Hmac256::new_from_slice(KEY_DERIVATION).expect("hmac accepts any key length");
        mac.update(token.as_bytes());
        Self {
            key: mac.finalize().into_bytes().to_vec(),
        }
    }
    /// Reads the bot token from the file named by `BOT_TOKEN_PATH`.
    pub fn from_env() -> Self {
        let path = std::env::var("BOT_TOKEN_PATH").expect("BOT_TOKEN_PATH must be set");
        let token = std::fs::read_to_string(&path).expect("read bot token file");
        Self::new(token.trim())
    }
    /// Checks a launch payload's detached HMAC signature.
    ///
    /// The check-string is the payload's decoded pairs minus `hash`,
    /// sorted by key and joined as `key=value` lines. Any parse failure
    /// or mismatch yields `false`; this never panics on untrusted input.
    pub fn verify(&self, init_data: &str) -> bool {
        use hmac::Mac;
        use subtle::ConstantTimeEq;
        let Some(pairs) = fields(init_data) else {
            log::warn!("launch payload rejected: malformed pair structure");
            return false;
        };
        // last occurrence of a repeated key wins
        let mut data: BTreeMap<String, String> = pairs.into_iter().collect();
        let Some(received) = data.remove("hash") else {
            log::warn!("launch payload rejected: no hash field");
            return false;
        };
        let check = data
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("\n");
        let Ok(mut mac) = Hmac256::new_from_slice(&self.key) else {
            return false;
        };
        mac.update(check.as_bytes());
        let expected = hex::encode(mac.finalize().into_bytes());
        if bool::from(expected.as_bytes().ct_eq(received.as_bytes())) {
            log::debug!("launch payload verified");
            true
        } else {
            log::warn!("launch payload rejected: hash mismatch");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hmac::Mac;

    const TOKEN: &str = "7000000001:AAG-testbottoken-for-unit-tests";

    fn encode(v: &str) -> String {
        percent_encoding::utf8_percent_encode(v, percent_encoding::NON_ALPHANUMERIC).to_string()
    }

    /// Signs fields the way the platform does: hash over the sorted,
    /// decoded check-string, appended to the percent-encoded payload.
    fn sign(fields: &[(&str, &str)], token: &str) -> String {
        let mut sorted = fields.to_vec();
        sorted.sort();
        let check = sorted
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("\n");
        let mut mac = Hmac256::new_from_slice(KEY_DERIVATION).unwrap();
        mac.update(token.as_bytes());
        let key = mac.finalize().into_bytes();
        let mut mac = Hmac256::new_from_slice(&key).unwrap();
        mac.update(check.as_bytes());
        let hash = hex::encode(mac.finalize().into_bytes());
        let mut pairs = fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, encode(v)))
            .collect::<Vec<_>>();
        pairs.push(format!("hash={}", hash));
        pairs.join("&")
    }

    #[test]
    fn accepts_valid_payload() {
        let payload = sign(
            &[
                ("user", r#"{"id":42,"first_name":"Ann"}"#),
                ("auth_date", "1700000000"),
            ],
            TOKEN,
        );
        assert!(Verifier::new(TOKEN).verify(&payload));
    }

    #[test]
    fn rejects_wrong_secret() {
        let payload = sign(&[("auth_date", "1700000000")], TOKEN);
        assert!(!Verifier::new("other-token").verify(&payload));
    }

    #[test]
    fn rejects_tampered_hash() {
        let payload = sign(&[("auth_date", "1700000000")], TOKEN);
        let (head, tail) = payload.split_at(payload.len() - 1);
        let flipped = if tail == "0" { "1" } else { "0" };
        assert!(!Verifier::new(TOKEN).verify(&format!("{}{}", head, flipped)));
    }

    #[test]
    fn rejects_tampered_field() {
        let payload = sign(&[("auth_date", "1700000000")], TOKEN);
        let tampered = payload.replace("auth_date=1700000000", "auth_date=1700000001");
        assert_ne!(payload, tampered);
        assert!(!Verifier::new(TOKEN).verify(&tampered));
    }

    #[test]
    fn order_of_fields_is_irrelevant() {
        let fields = [
            ("user", r#"{"id":42}"#),
            ("auth_date", "1700000000"),
            ("query_id", "AAF9tT0cAAAAAH21PRwJ"),
        ];
        let payload = sign(&fields, TOKEN);
        let hash = payload.split("hash=").nth(1).unwrap();
        let reordered = format!(
            "query_id={}&auth_date=1700000000&user={}&hash={}",
            encode("AAF9tT0cAAAAAH21PRwJ"),
            encode(r#"{"id":42}"#),
            hash,
        );
        assert!(Verifier::new(TOKEN).verify(&reordered));
    }

    #[test]
    fn value_may_contain_equals() {
        let payload = sign(&[("start_param", "a=b=c"), ("auth_date", "1700000000")], TOKEN);
        assert!(Verifier::new(TOKEN).verify(&payload));
    }

    #[test]
    fn rejects_missing_hash() {
        assert!(!Verifier::new(TOKEN).verify("auth_date=1700000000"));
    }

    #[test]
    fn rejects_pair_without_equals() {
        let payload = sign(&[("auth_date", "1700000000")], TOKEN);
        assert!(!Verifier::new(TOKEN).verify(&format!("{}&loose", payload)));
    }

    #[test]
    fn splits_on_first_equals_only() {
        let pairs = fields("start_param=a%3Db&auth_date=1").unwrap();
        assert_eq!(pairs[0], ("start_param".to_string(), "a=b".to_string()));
    }
}
