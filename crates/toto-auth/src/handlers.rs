use super::*;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::web;

/// Launch endpoint: verifies the payload, derives the identity, and
/// issues a session token for users on the authorized roster. Unlisted
/// users stay viewable as platform-authenticated but receive no token.
pub async fn launch(
    verifier: web::Data<Verifier>,
    tokens: web::Data<Crypto>,
    roster: web::Data<Roster>,
    req: web::Json<LaunchRequest>,
) -> impl Responder {
    let Some(init_data) = req.init_data.as_deref().filter(|d| !d.is_empty()) else {
        log::warn!("launch request without initData");
        return HttpResponse::BadRequest().body("no initData provided");
    };
    if !verifier.verify(init_data) {
        return HttpResponse::Unauthorized().body("invalid launch data");
    }
    let Some(identity) = Identity::parse(init_data) else {
        log::warn!("verified launch payload with unusable user field");
        return HttpResponse::Unauthorized().body("invalid user data");
    };
    let authorized = roster.is_authorized(identity.external());
    let token = match authorized {
        false => None,
        true => match tokens.issue(&identity) {
            Ok(token) => Some(token),
            Err(e) => {
                log::error!("token issuance failed: {}", e);
                return HttpResponse::InternalServerError().body(e.to_string());
            }
        },
    };
    log::debug!("launch complete for user {}", identity.external());
    HttpResponse::Ok().json(LaunchResponse {
        status: "success",
        authenticated: authorized,
        token,
        is_admin: roster.is_admin(identity.external()),
        user_data: identity.profile().clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::App;
    use actix_web::test;
    use hmac::Mac;

    const TOKEN: &str = "7000000001:AAG-testbottoken-for-unit-tests";

    type Hmac256 = hmac::Hmac<sha2::Sha256>;

    /// Platform-side signing of a payload carrying one `user` field.
    fn signed(user: &str) -> String {
        let check = format!("auth_date=1700000000\nuser={}", user);
        let mut mac = Hmac256::new_from_slice(b"WebAppData").unwrap();
        mac.update(TOKEN.as_bytes());
        let key = mac.finalize().into_bytes();
        let mut mac = Hmac256::new_from_slice(&key).unwrap();
        mac.update(check.as_bytes());
        let hash = hex::encode(mac.finalize().into_bytes());
        format!(
            "user={}&auth_date=1700000000&hash={}",
            percent_encoding::utf8_percent_encode(user, percent_encoding::NON_ALPHANUMERIC),
            hash,
        )
    }

    macro_rules! launch_app {
        ($roster:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(Verifier::new(TOKEN)))
                    .app_data(web::Data::new(Crypto::new(b"launch-test-secret")))
                    .app_data(web::Data::new($roster))
                    .route("/init", web::post().to(launch)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn authorized_user_receives_token() {
        let app = launch_app!(Roster::new([42], []));
        let req = test::TestRequest::post()
            .uri("/init")
            .set_json(serde_json::json!({ "initData": signed(r#"{"id":42}"#) }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["authenticated"], true);
        assert!(body["token"].is_string());
        assert_eq!(body["is_admin"], false);
        assert_eq!(body["user_data"]["id"], 42);
    }

    #[actix_web::test]
    async fn unlisted_user_gets_no_token() {
        let app = launch_app!(Roster::new([1], []));
        let req = test::TestRequest::post()
            .uri("/init")
            .set_json(serde_json::json!({ "initData": signed(r#"{"id":42}"#) }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["authenticated"], false);
        assert!(body["token"].is_null());
    }

    #[actix_web::test]
    async fn admin_flag_follows_roster() {
        let app = launch_app!(Roster::new([42], [42]));
        let req = test::TestRequest::post()
            .uri("/init")
            .set_json(serde_json::json!({ "initData": signed(r#"{"id":42}"#) }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["is_admin"], true);
    }

    #[actix_web::test]
    async fn forged_payload_is_unauthorized() {
        let app = launch_app!(Roster::new([42], []));
        let forged = signed(r#"{"id":42}"#).replace("auth_date=1700000000", "auth_date=1700000009");
        let req = test::TestRequest::post()
            .uri("/init")
            .set_json(serde_json::json!({ "initData": forged }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn missing_init_data_is_bad_request() {
        let app = launch_app!(Roster::new([], []));
        let req = test::TestRequest::post()
            .uri("/init")
            .set_json(serde_json::json!({}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
