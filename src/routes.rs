// routes.rs - Router assembly
//
// Layer order, outermost first:
// trace -> cors -> demo write guard -> timeout -> gateway identity -> unified response -> handler

use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::Settings;
use crate::error::ApiError;
use crate::handlers::{self, admin, front};
use crate::middleware::{disallow_modify, gateway_identity, request_timeout, unified_resp};
use crate::state::AppState;

/// Build the application with every route and layer attached.
pub fn router(state: AppState) -> Router {
    let mut app = Router::new()
        .route("/api/health", get(handlers::health))
        .merge(admin_routes())
        .merge(front_routes())
        .fallback(not_found);

    if state.settings.enabled_static {
        app = app
            .nest_service(&state.settings.static_path, ServeDir::new(&state.settings.static_directory))
            .nest_service(&state.settings.upload_prefix, ServeDir::new(&state.settings.upload_directory));
    }

    app.layer(middleware::from_fn_with_state(state.clone(), unified_resp))
        .layer(middleware::from_fn_with_state(state.clone(), gateway_identity))
        .layer(middleware::from_fn_with_state(state.clone(), request_timeout))
        .layer(middleware::from_fn_with_state(state.clone(), disallow_modify))
        .layer(cors_layer(&state.settings))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        // User management
        .route("/api/user/list", get(admin::user_list))
        .route("/api/user/detail", get(admin::user_detail))
        .route("/api/user/edit", post(admin::user_edit))
        // Decoration
        .route("/api/decorate/tabbar/detail", get(admin::tabbar_detail))
        .route("/api/decorate/tabbar/save", post(admin::tabbar_save))
}

fn front_routes() -> Router<AppState> {
    Router::new()
        .route("/front/register", post(front::register))
        .route("/front/user/center", get(front::user_center))
        .route("/front/user/info", get(front::user_info))
        .route("/front/user/edit", post(front::user_edit))
        .route("/front/user/changePwd", post(front::user_change_pwd))
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// `*` allows any origin; otherwise only the listed ones.
fn cors_layer(settings: &Settings) -> CorsLayer {
    if settings.cors_allow_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = settings
        .cors_allow_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
