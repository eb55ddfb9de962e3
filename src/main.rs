use dotenvy::dotenv;
use roles_console::interface::{
    ButtonDto, ErrorResponse, GrantDto, NotificationDto, RoleDto, RoleRowDto, ScreenView, routes,
};
use roles_console::{AppConfig, AppError, ConsoleBuilder};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(utoipa::OpenApi)]
#[openapi(
    paths(
        roles_console::interface::http_handlers::get_screen_handler,
        roles_console::interface::http_handlers::load_roles_handler,
        roles_console::interface::http_handlers::add_role_handler,
        roles_console::interface::http_handlers::edit_role_handler,
        roles_console::interface::http_handlers::delete_checked_roles_handler,
        roles_console::interface::http_handlers::check_role_handler,
        roles_console::interface::http_handlers::select_role_handler,
        roles_console::interface::http_handlers::next_grants_page_handler,
        roles_console::interface::http_handlers::previous_grants_page_handler,
        roles_console::interface::http_handlers::notifications_handler,
    ),
    components(schemas(
        ScreenView, RoleRowDto, RoleDto, GrantDto, ButtonDto, NotificationDto, ErrorResponse
    )),
    tags(
        (name = "Roles Screen", description = "Roles management screen of the warehouse console")
    )
)]
pub struct ApiDoc;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Load environment variables
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    let state = ConsoleBuilder::new().with_config(config.clone()).build()?;

    let app = routes(state)
        .merge(SwaggerUi::new("/swagger").url("/openapi.json", ApiDoc::openapi()));

    let http_addr = config.http_address();
    let listener = TcpListener::bind(&http_addr).await?;
    info!(backend = %config.root_url, "Roles console running at http://{http_addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
