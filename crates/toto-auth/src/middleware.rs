use super::*;
use toto_core::ExternalId;
use actix_web::FromRequest;
use actix_web::HttpRequest;
use actix_web::dev::Payload;
use actix_web::web;
use std::future::Future;
use std::pin::Pin;

/// Extractor for authenticated requests.
///
/// Validates the bearer token; every token failure answers the same way,
/// so callers never learn whether a signature or the expiry failed.
pub struct Auth(pub Claims);

impl Auth {
    pub fn claims(&self) -> &Claims {
        &self.0
    }
    pub fn external(&self) -> ExternalId {
        self.0.external()
    }
}

impl FromRequest for Auth {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;
    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let tokens = req.app_data::<web::Data<Crypto>>().cloned();
        let auth_header = req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .map(|s| s.to_owned());
        Box::pin(async move {
            let header = auth_header.ok_or_else(|| {
                actix_web::error::ErrorUnauthorized("missing authorization header")
            })?;
            let token = header.strip_prefix("Bearer ").ok_or_else(|| {
                actix_web::error::ErrorUnauthorized("invalid authorization format")
            })?;
            let tokens = tokens.ok_or_else(|| {
                actix_web::error::ErrorInternalServerError("token service not configured")
            })?;
            let claims = tokens.validate(token).ok_or_else(|| {
                log::warn!("rejected bearer token");
                actix_web::error::ErrorUnauthorized("invalid or expired token")
            })?;
            Ok(Auth(claims))
        })
    }
}

/// Extractor for admin requests: a valid token whose subject is on the
/// admin roster.
pub struct Admin(pub Claims);

impl Admin {
    pub fn claims(&self) -> &Claims {
        &self.0
    }
    pub fn external(&self) -> ExternalId {
        self.0.external()
    }
}

impl FromRequest for Admin {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;
    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let roster = req.app_data::<web::Data<Roster>>().cloned();
        let auth = Auth::from_request(req, payload);
        Box::pin(async move {
            let Auth(claims) = auth.await?;
            let roster = roster.ok_or_else(|| {
                actix_web::error::ErrorInternalServerError("roster not configured")
            })?;
            if roster.is_admin(claims.external()) {
                Ok(Admin(claims))
            } else {
                log::warn!("user {} denied admin access", claims.external());
                Err(actix_web::error::ErrorForbidden("admin access required"))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::App;
    use actix_web::HttpResponse;
    use actix_web::Responder;
    use actix_web::http::StatusCode;
    use actix_web::test;

    const SECRET: &[u8] = b"middleware-test-secret";

    async fn whoami(auth: Auth) -> impl Responder {
        HttpResponse::Ok().body(auth.external().to_string())
    }

    async fn restricted(admin: Admin) -> impl Responder {
        HttpResponse::Ok().body(admin.external().to_string())
    }

    fn token(id: ExternalId) -> String {
        let init_data = format!("user=%7B%22id%22%3A{}%7D", id);
        Crypto::new(SECRET)
            .issue(&Identity::parse(&init_data).unwrap())
            .unwrap()
    }

    macro_rules! guarded_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(Crypto::new(SECRET)))
                    .app_data(web::Data::new(Roster::new([], [9])))
                    .route("/me", web::get().to(whoami))
                    .route("/admin", web::get().to(restricted)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn missing_header_is_unauthorized() {
        let app = guarded_app!();
        let req = test::TestRequest::get().uri("/me").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn garbage_token_is_unauthorized() {
        let app = guarded_app!();
        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", "Bearer not.a.token"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn valid_token_passes() {
        let app = guarded_app!();
        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", format!("Bearer {}", token(42))))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(&body[..], b"42");
    }

    #[actix_web::test]
    async fn non_admin_is_forbidden() {
        let app = guarded_app!();
        let req = test::TestRequest::get()
            .uri("/admin")
            .insert_header(("Authorization", format!("Bearer {}", token(42))))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn admin_passes() {
        let app = guarded_app!();
        let req = test::TestRequest::get()
            .uri("/admin")
            .insert_header(("Authorization", format!("Bearer {}", token(9))))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
