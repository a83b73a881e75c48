use crate::dto::*;
use crate::fault;
use toto_auth::Auth;
use toto_auth::policy;
use toto_core::ID;
use toto_core::Unique;
use toto_records::*;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::web;
use std::sync::Arc;
use tokio_postgres::Client;

pub async fn tournaments(db: web::Data<Arc<Client>>) -> impl Responder {
    match db.tournaments().await {
        Ok(tournaments) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "tournaments": tournaments.into_iter().map(TournamentDto::from).collect::<Vec<_>>(),
        })),
        Err(e) => fault("listing tournaments", e),
    }
}

pub async fn teams(db: web::Data<Arc<Client>>) -> impl Responder {
    match db.teams().await {
        Ok(teams) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "teams": teams.into_iter().map(TeamDto::from).collect::<Vec<_>>(),
        })),
        Err(e) => fault("listing teams", e),
    }
}

/// Tournaments the caller has not yet asked to enter.
pub async fn available(db: web::Data<Arc<Client>>, auth: Auth) -> impl Responder {
    let punter = match db.punter(auth.external()).await {
        Ok(Some(punter)) => punter,
        Ok(None) => return HttpResponse::NotFound().body("user not found"),
        Err(e) => return fault("looking up punter", e),
    };
    match db.open_tournaments(punter.id()).await {
        Ok(tournaments) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "tournaments": tournaments.into_iter().map(TournamentDto::from).collect::<Vec<_>>(),
        })),
        Err(e) => fault("listing open tournaments", e),
    }
}

/// Entry request. Registers the punter on first contact, then files an
/// unapproved entry for an admin to review.
pub async fn participate(
    db: web::Data<Arc<Client>>,
    auth: Auth,
    req: web::Json<ParticipateRequest>,
) -> impl Responder {
    let Some(tournament_id) = req.tournament_id else {
        return HttpResponse::BadRequest().body("tournament ID is required");
    };
    match db.tournament(ID::from(tournament_id)).await {
        Ok(Some(_)) => {}
        Ok(None) => return HttpResponse::NotFound().body("tournament not found"),
        Err(e) => return fault("looking up tournament", e),
    }
    let punter = match db.find_or_create(auth.external(), auth.claims().name()).await {
        Ok(punter) => punter,
        Err(e) => return fault("registering punter", e),
    };
    match db.entered(punter.id(), ID::from(tournament_id)).await {
        Ok(false) => {}
        Ok(true) => {
            return HttpResponse::BadRequest().body("already participating in this tournament");
        }
        Err(e) => return fault("checking existing entry", e),
    }
    let entry = Entry::new(ID::default(), punter.id(), ID::from(tournament_id));
    match db.enroll(&entry).await {
        Ok(()) => {
            log::info!("user {} requested entry {}", auth.external(), entry.id());
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "message": "participation request submitted",
            }))
        }
        Err(e) => fault("filing entry", e),
    }
}

/// The caller's fixtures: approved tournaments only, own bets attached.
pub async fn mine(db: web::Data<Arc<Client>>, auth: Auth) -> impl Responder {
    match db.cards(auth.external()).await {
        Ok(cards) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "matches": cards.into_iter().map(MatchDto::from).collect::<Vec<_>>(),
        })),
        Err(e) => fault("listing punter fixtures", e),
    }
}

/// Every scheduled fixture, names resolved.
pub async fn slate(db: web::Data<Arc<Client>>, _auth: Auth) -> impl Responder {
    match db.slate().await {
        Ok(cards) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "matches": cards.into_iter().map(MatchDto::from).collect::<Vec<_>>(),
        })),
        Err(e) => fault("listing fixtures", e),
    }
}

/// Bet placement. Violations map to distinct rejections: missing fields
/// and closed windows are bad requests, an unknown fixture is not found,
/// and a punter without an approved entry is forbidden.
pub async fn place(
    db: web::Data<Arc<Client>>,
    auth: Auth,
    req: web::Json<PlaceBetRequest>,
) -> impl Responder {
    let (Some(match_id), Some(score_1), Some(score_2)) = (req.match_id, req.score_1, req.score_2)
    else {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": "missing required fields",
        }));
    };
    let fixture = match db.fixture(ID::from(match_id)).await {
        Ok(Some(fixture)) => fixture,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "success": false,
                "error": "match not found",
            }));
        }
        Err(e) => return fault("looking up fixture", e),
    };
    let now = std::time::SystemTime::now();
    if policy::started(now, fixture.kickoff()) {
        log::debug!("user {} bet after kickoff of {}", auth.external(), fixture.id());
        return HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": "cannot place bet on started match",
        }));
    }
    let punter = match db.punter(auth.external()).await {
        Ok(punter) => punter,
        Err(e) => return fault("looking up punter", e),
    };
    let approved = match punter {
        None => false,
        Some(ref punter) => match db.approved(punter.id(), fixture.tournament()).await {
            Ok(approved) => approved,
            Err(e) => return fault("checking entry approval", e),
        },
    };
    let (Some(punter), true) = (punter, policy::may_place(now, fixture.kickoff(), approved))
    else {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "success": false,
            "error": "user is not participating in this tournament",
        }));
    };
    let bet = Bet::new(ID::default(), punter.id(), fixture.id(), (score_1, score_2));
    match db.place(&bet).await {
        Ok(()) => {
            log::debug!("user {} placed bet on {}", auth.external(), fixture.id());
            HttpResponse::Ok().json(serde_json::json!({ "success": true }))
        }
        Err(e) => fault("placing bet", e),
    }
}
