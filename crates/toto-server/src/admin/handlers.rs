use crate::dto::*;
use crate::fault;
use toto_auth::Admin;
use toto_core::ID;
use toto_core::Unique;
use toto_records::*;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::web;
use std::sync::Arc;
use tokio_postgres::Client;

pub async fn add_tournament(
    db: web::Data<Arc<Client>>,
    admin: Admin,
    req: web::Json<NameRequest>,
) -> impl Responder {
    let Some(name) = req.name.as_deref().filter(|n| !n.is_empty()) else {
        return HttpResponse::BadRequest().body("tournament name is required");
    };
    let tournament = Tournament::new(ID::default(), name.to_string());
    match db.create_tournament(&tournament).await {
        Ok(()) => {
            log::info!("admin {} added tournament {}", admin.external(), tournament.id());
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "tournament_id": tournament.id().to_string(),
            }))
        }
        Err(e) => fault("adding tournament", e),
    }
}

pub async fn add_team(
    db: web::Data<Arc<Client>>,
    admin: Admin,
    req: web::Json<NameRequest>,
) -> impl Responder {
    let Some(name) = req.name.as_deref().filter(|n| !n.is_empty()) else {
        return HttpResponse::BadRequest().body("team name is required");
    };
    let team = Team::new(ID::default(), name.to_string());
    match db.create_team(&team).await {
        Ok(()) => {
            log::info!("admin {} added team {}", admin.external(), team.id());
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "team_id": team.id().to_string(),
            }))
        }
        Err(e) => fault("adding team", e),
    }
}

pub async fn add_fixture(
    db: web::Data<Arc<Client>>,
    admin: Admin,
    req: web::Json<AddFixtureRequest>,
) -> impl Responder {
    let (Some(tournament_id), Some(team_1), Some(team_2), Some(date)) = (
        req.tournament_id,
        req.team_1_id,
        req.team_2_id,
        req.date.as_deref(),
    ) else {
        return HttpResponse::BadRequest().body("all fields are required");
    };
    let Ok(kickoff) =
        time::OffsetDateTime::parse(date, &time::format_description::well_known::Rfc3339)
    else {
        return HttpResponse::BadRequest().body("invalid date format");
    };
    match db.tournament(ID::from(tournament_id)).await {
        Ok(Some(_)) => {}
        Ok(None) => return HttpResponse::NotFound().body("tournament not found"),
        Err(e) => return fault("looking up tournament", e),
    }
    match db.team(ID::from(team_1)).await {
        Ok(Some(_)) => {}
        Ok(None) => return HttpResponse::NotFound().body("team 1 not found"),
        Err(e) => return fault("looking up team 1", e),
    }
    match db.team(ID::from(team_2)).await {
        Ok(Some(_)) => {}
        Ok(None) => return HttpResponse::NotFound().body("team 2 not found"),
        Err(e) => return fault("looking up team 2", e),
    }
    let fixture = Fixture::new(
        ID::default(),
        ID::from(tournament_id),
        ID::from(team_1),
        ID::from(team_2),
        std::time::SystemTime::from(kickoff),
    );
    match db.create_fixture(&fixture).await {
        Ok(()) => {
            log::info!("admin {} scheduled fixture {}", admin.external(), fixture.id());
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "match_id": fixture.id().to_string(),
            }))
        }
        Err(e) => fault("scheduling fixture", e),
    }
}

pub async fn pending(db: web::Data<Arc<Client>>, _admin: Admin) -> impl Responder {
    match db.pending_entries().await {
        Ok(entries) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "participations": entries.into_iter().map(PendingDto::from).collect::<Vec<_>>(),
        })),
        Err(e) => fault("listing pending entries", e),
    }
}

pub async fn approve(
    db: web::Data<Arc<Client>>,
    admin: Admin,
    req: web::Json<ApproveRequest>,
) -> impl Responder {
    let Some(id) = req.participation_id else {
        return HttpResponse::BadRequest().body("participation ID is required");
    };
    match db.approve(ID::from(id)).await {
        Ok(true) => {
            log::info!("admin {} approved entry {}", admin.external(), id);
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "message": "participation approved",
            }))
        }
        Ok(false) => HttpResponse::NotFound().body("participation not found"),
        Err(e) => fault("approving entry", e),
    }
}
