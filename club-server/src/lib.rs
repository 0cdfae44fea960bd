use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use warp::Filter;
use warp::http::StatusCode;
use warp::reply::Reply;

use crate::auth::AuthService;
use crate::chat::ConnectionManager;
use club_core::{
    AuthGate, ConversationTimings, FinanceKind, GateDecision, InboxQuery, SquadQuery, datasets,
    finance_breakdown, inbox_view, squad_view,
};
use club_persistence::repositories::SaveRepository;
use club_types::{ManagerForm, ValidationError};

pub mod auth;
pub mod chat;
pub mod config;

#[derive(Deserialize)]
struct CredentialsRequest {
    email: String,
    password: String,
}

#[derive(Deserialize)]
struct CreateSaveRequest {
    save_name: String,
    form: ManagerForm,
}

pub fn create_routes(
    connection_manager: Arc<ConnectionManager>,
    auth_service: Arc<AuthService>,
    save_repository: Arc<SaveRepository>,
    timings: ConversationTimings,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    // Clone for filters
    let connection_manager_filter = warp::any().map({
        let connection_manager = connection_manager.clone();
        move || connection_manager.clone()
    });

    let auth_filter = warp::any().map({
        let auth_service = auth_service.clone();
        move || auth_service.clone()
    });

    let save_repository_filter = warp::any().map({
        let save_repository = save_repository.clone();
        move || save_repository.clone()
    });

    let timings_filter = warp::any().map({
        let timings = timings.clone();
        move || timings.clone()
    });

    // Chat endpoint
    let websocket = warp::path("ws")
        .and(warp::ws())
        .and(connection_manager_filter.clone())
        .and(auth_filter.clone())
        .and(timings_filter.clone())
        .map(
            |ws: warp::ws::Ws, conn_mgr, auth, timings: ConversationTimings| {
                ws.on_upgrade(move |socket| chat::handle_connection(socket, conn_mgr, auth, timings))
            },
        );

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", StatusCode::OK));

    let sign_in = warp::path!("api" / "auth" / "signin")
        .and(warp::post())
        .and(warp::body::json())
        .and(auth_filter.clone())
        .and_then(handle_sign_in);

    let sign_up = warp::path!("api" / "auth" / "signup")
        .and(warp::post())
        .and(warp::body::json())
        .and(auth_filter.clone())
        .and_then(handle_sign_up);

    let sign_out = warp::path!("api" / "auth" / "signout")
        .and(warp::post())
        .and(warp::header::optional::<String>("authorization"))
        .and(auth_filter.clone())
        .and_then(handle_sign_out);

    let list_saves = warp::path!("api" / "saves")
        .and(warp::get())
        .and(warp::header::optional::<String>("authorization"))
        .and(auth_filter.clone())
        .and(save_repository_filter.clone())
        .and_then(handle_list_saves);

    let create_save = warp::path!("api" / "saves")
        .and(warp::post())
        .and(warp::header::optional::<String>("authorization"))
        .and(warp::body::json())
        .and(auth_filter.clone())
        .and(save_repository_filter.clone())
        .and_then(handle_create_save);

    let open_save = warp::path!("api" / "saves" / Uuid / "open")
        .and(warp::post())
        .and(warp::header::optional::<String>("authorization"))
        .and(auth_filter.clone())
        .and(save_repository_filter.clone())
        .and_then(handle_open_save);

    let squad = warp::path!("api" / "squad")
        .and(warp::get())
        .and(warp::query::<SquadQuery>())
        .and_then(handle_squad);

    let finances = warp::path!("api" / "finances" / String)
        .and(warp::get())
        .and_then(handle_finances);

    let inbox = warp::path!("api" / "inbox")
        .and(warp::get())
        .and(warp::query::<InboxQuery>())
        .and_then(handle_inbox);

    // Page routes, guarded at the route level
    let dashboard_page = page_route("dashboard", AuthGate::protected(), auth_filter.clone());
    let saves_page = page_route("saves", AuthGate::protected(), auth_filter.clone());
    let create_manager_page =
        page_route("create-manager", AuthGate::protected(), auth_filter.clone());
    let login_page = page_route("login", AuthGate::public_only(), auth_filter.clone());
    let signup_page = page_route("signup", AuthGate::public_only(), auth_filter.clone());

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type", "authorization"])
        .allow_methods(vec!["GET", "POST", "DELETE"]);

    websocket
        .or(health)
        .or(sign_in)
        .or(sign_up)
        .or(sign_out)
        .or(list_saves)
        .or(create_save)
        .or(open_save)
        .or(squad)
        .or(finances)
        .or(inbox)
        .or(dashboard_page)
        .or(saves_page)
        .or(create_manager_page)
        .or(login_page)
        .or(signup_page)
        .with(cors)
        .with(warp::log("boardroom"))
}

fn page_route(
    name: &'static str,
    gate: AuthGate,
    auth_filter: impl Filter<Extract = (Arc<AuthService>,), Error = std::convert::Infallible>
    + Clone
    + Send
    + Sync,
) -> impl Filter<Extract = (warp::reply::Response,), Error = warp::Rejection> + Clone {
    warp::path(name)
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::header::optional::<String>("authorization"))
        .and(auth_filter)
        .and_then(move |auth_header, auth_service| {
            let gate = gate.clone();
            handle_page(name, gate, auth_header, auth_service)
        })
}

fn bearer_token(auth_header: &Option<String>) -> Option<&str> {
    auth_header
        .as_deref()
        .map(|h| h.strip_prefix("Bearer ").unwrap_or(h))
}

async fn handle_page(
    name: &'static str,
    gate: AuthGate,
    auth_header: Option<String>,
    auth_service: Arc<AuthService>,
) -> Result<warp::reply::Response, warp::Rejection> {
    let session = auth_service.session_state(bearer_token(&auth_header)).await;

    let reply = match gate.evaluate(&session) {
        GateDecision::Render => warp::reply::with_status(
            warp::reply::json(&serde_json::json!({ "page": name })),
            StatusCode::OK,
        )
        .into_response(),
        GateDecision::Redirect(location) => warp::reply::with_header(
            warp::reply::with_status(warp::reply(), StatusCode::SEE_OTHER),
            "location",
            location,
        )
        .into_response(),
        // Sessions resolve synchronously on the server, but the gate
        // contract still includes the pending case.
        GateDecision::Wait => {
            warp::reply::with_status(warp::reply(), StatusCode::NO_CONTENT).into_response()
        }
    };

    Ok(reply)
}

async fn handle_sign_in(
    credentials: CredentialsRequest,
    auth_service: Arc<AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match auth_service
        .sign_in(&credentials.email, &credentials.password)
        .await
    {
        Ok(session) => Ok(warp::reply::with_status(
            warp::reply::json(&session),
            StatusCode::OK,
        )),
        Err(e) => Ok(warp::reply::with_status(
            warp::reply::json(&serde_json::json!({ "error": e.to_string() })),
            StatusCode::UNAUTHORIZED,
        )),
    }
}

async fn handle_sign_up(
    credentials: CredentialsRequest,
    auth_service: Arc<AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match auth_service
        .sign_up(&credentials.email, &credentials.password)
        .await
    {
        Ok(session) => Ok(warp::reply::with_status(
            warp::reply::json(&session),
            StatusCode::CREATED,
        )),
        Err(e) => Ok(warp::reply::with_status(
            warp::reply::json(&serde_json::json!({ "error": e.to_string() })),
            StatusCode::BAD_REQUEST,
        )),
    }
}

async fn handle_sign_out(
    auth_header: Option<String>,
    auth_service: Arc<AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let Some(token) = bearer_token(&auth_header) else {
        return Ok(warp::reply::with_status(
            warp::reply::json(&serde_json::json!({ "error": "Authentication required" })),
            StatusCode::UNAUTHORIZED,
        ));
    };

    match auth_service.sign_out(token).await {
        Ok(()) => Ok(warp::reply::with_status(
            warp::reply::json(&serde_json::json!({ "signed_out": true })),
            StatusCode::OK,
        )),
        Err(e) => Ok(warp::reply::with_status(
            warp::reply::json(&serde_json::json!({ "error": e.to_string() })),
            StatusCode::UNAUTHORIZED,
        )),
    }
}

async fn handle_list_saves(
    auth_header: Option<String>,
    auth_service: Arc<AuthService>,
    save_repository: Arc<SaveRepository>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let session = auth_service.session_state(bearer_token(&auth_header)).await;
    let Some(user) = session.user() else {
        return Ok(warp::reply::with_status(
            warp::reply::json(&serde_json::json!({ "error": "Authentication required" })),
            StatusCode::UNAUTHORIZED,
        ));
    };

    match save_repository.list_saves(user.id).await {
        Ok(saves) => Ok(warp::reply::with_status(
            warp::reply::json(&saves),
            StatusCode::OK,
        )),
        Err(e) => {
            tracing::error!("Failed to list saves for {}: {}", user.id, e);
            Ok(warp::reply::with_status(
                warp::reply::json(&serde_json::json!({ "error": "Failed to load saves" })),
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

fn validate_manager_form(form: &ManagerForm) -> Result<(), ValidationError> {
    if form.first_name.trim().is_empty() {
        return Err(ValidationError::FirstNameRequired);
    }
    if form.last_name.trim().is_empty() {
        return Err(ValidationError::LastNameRequired);
    }
    if form.selected_club.is_none() && !form.unemployed {
        return Err(ValidationError::ClubOrUnemployedRequired);
    }
    Ok(())
}

async fn handle_create_save(
    auth_header: Option<String>,
    request: CreateSaveRequest,
    auth_service: Arc<AuthService>,
    save_repository: Arc<SaveRepository>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let session = auth_service.session_state(bearer_token(&auth_header)).await;
    let Some(user) = session.user() else {
        return Ok(warp::reply::with_status(
            warp::reply::json(&serde_json::json!({ "error": "Authentication required" })),
            StatusCode::UNAUTHORIZED,
        ));
    };

    if let Err(e) = validate_manager_form(&request.form) {
        return Ok(warp::reply::with_status(
            warp::reply::json(&serde_json::json!({ "error": e.message() })),
            StatusCode::BAD_REQUEST,
        ));
    }

    match save_repository
        .create_manager_and_save(user.id, &request.save_name, &request.form)
        .await
    {
        Ok((save, manager_info)) => Ok(warp::reply::with_status(
            warp::reply::json(&serde_json::json!({
                "save": save,
                "manager_info": manager_info,
            })),
            StatusCode::CREATED,
        )),
        Err(e) => {
            tracing::error!("Failed to create save for {}: {}", user.id, e);
            Ok(warp::reply::with_status(
                warp::reply::json(&serde_json::json!({ "error": "Failed to create save" })),
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

async fn handle_open_save(
    save_id: Uuid,
    auth_header: Option<String>,
    auth_service: Arc<AuthService>,
    save_repository: Arc<SaveRepository>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let session = auth_service.session_state(bearer_token(&auth_header)).await;
    if session.user().is_none() {
        return Ok(warp::reply::with_status(
            warp::reply::json(&serde_json::json!({ "error": "Authentication required" })),
            StatusCode::UNAUTHORIZED,
        ));
    }

    // Bumping the timestamp is best-effort; opening proceeds either way.
    if let Err(e) = save_repository.touch_save(save_id).await {
        tracing::warn!("Failed to update last-opened for save {}: {}", save_id, e);
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({ "opened": save_id })),
        StatusCode::OK,
    ))
}

async fn handle_squad(query: SquadQuery) -> Result<impl warp::Reply, warp::Rejection> {
    let squad = datasets::squad_players();
    let view = squad_view(&squad, &query);
    Ok(warp::reply::with_status(
        warp::reply::json(&view),
        StatusCode::OK,
    ))
}

async fn handle_inbox(query: InboxQuery) -> Result<impl warp::Reply, warp::Rejection> {
    let mailbox = datasets::inbox_messages();
    let view = inbox_view(&mailbox, &query);
    Ok(warp::reply::with_status(
        warp::reply::json(&view),
        StatusCode::OK,
    ))
}

async fn handle_finances(kind: String) -> Result<impl warp::Reply, warp::Rejection> {
    let kind = match kind.as_str() {
        "income" => FinanceKind::Income,
        "expenditure" => FinanceKind::Expenditure,
        _ => {
            return Ok(warp::reply::with_status(
                warp::reply::json(&serde_json::json!({ "error": "Unknown ledger" })),
                StatusCode::NOT_FOUND,
            ));
        }
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&finance_breakdown(kind)),
        StatusCode::OK,
    ))
}
