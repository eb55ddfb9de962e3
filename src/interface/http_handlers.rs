use crate::application::dialog::{RoleDialog, RoleEditor};
use crate::application::role_screen::{RoleScreenController, ScreenError};
use crate::domain::role::Role;
use crate::domain::token::AuthToken;
use crate::infrastructure::role_gateway::AUTH_TOKEN_HEADER;
use crate::interface::app_state::AppState;
use crate::interface::{ErrorResponse, NotificationDto, RoleDto, ScreenView};
use async_trait::async_trait;
use axum::extract::{FromRequestParts, Path, State};
use axum::http::{StatusCode, request::Parts};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use std::convert::Infallible;
use std::sync::Arc;

/// `Auth-Token` header of the incoming request, if any. When present it
/// replaces the screen's credential before the action runs.
pub struct ForwardedAuthToken(pub Option<AuthToken>);

impl<S> FromRequestParts<S> for ForwardedAuthToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;
    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTH_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(AuthToken::new);
        Ok(ForwardedAuthToken(token))
    }
}

impl ForwardedAuthToken {
    fn apply(self, screen: &mut RoleScreenController) {
        if let Some(token) = self.0 {
            screen.set_auth_token(token);
        }
    }
}

/// Dialog stand-in: the request body is what the user confirmed.
struct SubmittedRole(RoleDto);

#[async_trait]
impl RoleEditor for SubmittedRole {
    async fn open(&self, dialog: RoleDialog) -> Option<Role> {
        Some(self.0.apply_to(dialog.role))
    }
}

fn view(screen: &RoleScreenController) -> Response {
    Json(ScreenView::from(screen)).into_response()
}

fn error_response(error: &ScreenError) -> Response {
    let status = match error {
        ScreenError::Gateway(e) => StatusCode::from_u16(e.status())
            .ok()
            .filter(|s| s.is_client_error() || s.is_server_error())
            .unwrap_or(StatusCode::BAD_GATEWAY),
        ScreenError::UnknownRole(_) => StatusCode::NOT_FOUND,
    };
    (
        status,
        Json(ErrorResponse {
            status: status.as_u16(),
            error: error.to_string(),
        }),
    )
        .into_response()
}

fn respond(screen: &RoleScreenController, result: Result<(), ScreenError>) -> Response {
    match result {
        Ok(()) => view(screen),
        Err(e) => error_response(&e),
    }
}

#[utoipa::path(
    get,
    path = "/v1/roles-screen",
    responses((status = 200, description = "Current screen", body = ScreenView)),
    tags = ["Roles Screen"],
    description = "Returns the current view model of the roles screen."
)]
pub async fn get_screen_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let screen = state.screen.lock().await;
    view(&screen)
}

#[axum::debug_handler]
#[utoipa::path(
    post,
    path = "/v1/roles-screen/load",
    responses(
        (status = 200, description = "Roles loaded", body = ScreenView),
        (status = 502, description = "Backend failure", body = ErrorResponse),
    ),
    tags = ["Roles Screen"],
    description = "Reloads all roles from the backend and clears the checked rows."
)]
pub async fn load_roles_handler(
    State(state): State<Arc<AppState>>,
    token: ForwardedAuthToken,
) -> impl IntoResponse {
    let mut screen = state.screen.lock().await;
    token.apply(&mut screen);
    let result = screen.load_roles().await;
    respond(&screen, result)
}

#[axum::debug_handler]
#[utoipa::path(
    post,
    path = "/v1/roles-screen/roles",
    request_body = RoleDto,
    responses(
        (status = 200, description = "Role added", body = ScreenView),
        (status = 409, description = "Role already exists", body = ErrorResponse),
    ),
    tags = ["Roles Screen"],
    description = "Creates a role from the submitted create dialog and appends it to the list."
)]
pub async fn add_role_handler(
    State(state): State<Arc<AppState>>,
    token: ForwardedAuthToken,
    Json(payload): Json<RoleDto>,
) -> impl IntoResponse {
    let mut screen = state.screen.lock().await;
    token.apply(&mut screen);
    let result = screen.add_role(&SubmittedRole(payload)).await;
    respond(&screen, result)
}

#[axum::debug_handler]
#[utoipa::path(
    put,
    path = "/v1/roles-screen/roles/{name}",
    params(("name" = String, Path, description = "Role name")),
    request_body = RoleDto,
    responses(
        (status = 200, description = "Role saved and list reloaded", body = ScreenView),
        (status = 400, description = "Name in body does not match path", body = ErrorResponse),
        (status = 404, description = "Role not on screen", body = ErrorResponse),
    ),
    tags = ["Roles Screen"],
    description = "Saves the submitted edit dialog of an existing role, then reloads the list."
)]
pub async fn edit_role_handler(
    State(state): State<Arc<AppState>>,
    token: ForwardedAuthToken,
    Path(name): Path<String>,
    Json(payload): Json<RoleDto>,
) -> impl IntoResponse {
    if payload.name != name {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                status: StatusCode::BAD_REQUEST.as_u16(),
                error: format!("Role name {} does not match {}", payload.name, name),
            }),
        )
            .into_response();
    }
    let mut screen = state.screen.lock().await;
    token.apply(&mut screen);
    let result = screen.edit_role(&name, &SubmittedRole(payload)).await;
    respond(&screen, result)
}

#[axum::debug_handler]
#[utoipa::path(
    delete,
    path = "/v1/roles-screen/checked-roles",
    responses(
        (status = 200, description = "Checked roles deleted, or nothing checked", body = ScreenView),
        (status = 404, description = "Backend could not find a role", body = ErrorResponse),
    ),
    tags = ["Roles Screen"],
    description = "Deletes all checked roles in one backend request and reloads the list."
)]
pub async fn delete_checked_roles_handler(
    State(state): State<Arc<AppState>>,
    token: ForwardedAuthToken,
) -> impl IntoResponse {
    let mut screen = state.screen.lock().await;
    token.apply(&mut screen);
    let result = screen.delete_role().await;
    respond(&screen, result)
}

#[utoipa::path(
    post,
    path = "/v1/roles-screen/roles/{name}/check",
    params(("name" = String, Path, description = "Role name")),
    responses((status = 200, description = "Checkbox toggled", body = ScreenView)),
    tags = ["Roles Screen"],
    description = "Toggles the checkbox of a role row."
)]
pub async fn check_role_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    let mut screen = state.screen.lock().await;
    screen.on_role_checked(&name);
    view(&screen)
}

#[utoipa::path(
    post,
    path = "/v1/roles-screen/roles/{name}/select",
    params(("name" = String, Path, description = "Role name")),
    responses(
        (status = 200, description = "Role selected, first grants page shown", body = ScreenView),
        (status = 404, description = "Role not on screen", body = ErrorResponse),
    ),
    tags = ["Roles Screen"],
    description = "Selects a role and shows the first page of its grants."
)]
pub async fn select_role_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    let mut screen = state.screen.lock().await;
    let result = screen.on_role_selected(&name).map(|_| ());
    respond(&screen, result)
}

#[utoipa::path(
    post,
    path = "/v1/roles-screen/grants/next",
    responses((status = 200, description = "Next grants page", body = ScreenView)),
    tags = ["Roles Screen"]
)]
pub async fn next_grants_page_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut screen = state.screen.lock().await;
    screen.next_grants_page();
    view(&screen)
}

#[utoipa::path(
    post,
    path = "/v1/roles-screen/grants/previous",
    responses((status = 200, description = "Previous grants page", body = ScreenView)),
    tags = ["Roles Screen"]
)]
pub async fn previous_grants_page_handler(
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let mut screen = state.screen.lock().await;
    screen.previous_grants_page();
    view(&screen)
}

#[utoipa::path(
    get,
    path = "/v1/roles-screen/notifications",
    responses((status = 200, description = "Pending notifications", body = [NotificationDto])),
    tags = ["Roles Screen"],
    description = "Returns and clears the pending toasts."
)]
pub async fn notifications_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let notifications: Vec<NotificationDto> = state
        .notifications
        .drain()
        .into_iter()
        .map(NotificationDto::from)
        .collect();
    Json(notifications)
}

/// Router of the roles screen API.
pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/roles-screen", get(get_screen_handler))
        .route("/v1/roles-screen/load", post(load_roles_handler))
        .route("/v1/roles-screen/roles", post(add_role_handler))
        .route("/v1/roles-screen/roles/{name}", put(edit_role_handler))
        .route("/v1/roles-screen/roles/{name}/check", post(check_role_handler))
        .route("/v1/roles-screen/roles/{name}/select", post(select_role_handler))
        .route(
            "/v1/roles-screen/checked-roles",
            delete(delete_checked_roles_handler),
        )
        .route("/v1/roles-screen/grants/next", post(next_grants_page_handler))
        .route(
            "/v1/roles-screen/grants/previous",
            post(previous_grants_page_handler),
        )
        .route("/v1/roles-screen/notifications", get(notifications_handler))
        .with_state(state)
}
