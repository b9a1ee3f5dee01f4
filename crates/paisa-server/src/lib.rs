//! REST API server for the Paisa expense tracker.
//!
//! Exposes auth, expense CRUD, statistics, suggestions, and report/export
//! endpoints over HTTP. All expense routes are scoped to the authenticated
//! user; auth can be disabled for local single-user setups.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use paisa_core::{models::User, Database};

pub mod handlers;

#[cfg(test)]
mod tests;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to.
    pub bind: String,
    /// Whether bearer-token auth is required on expense routes.
    pub require_auth: bool,
    /// Secret used to sign and verify tokens. Must be non-empty when
    /// `require_auth` is set.
    pub jwt_secret: String,
    /// Token lifetime in hours.
    pub token_ttl_hours: i64,
    /// Allowed CORS origins. Empty means same-origin only.
    pub allowed_origins: Vec<String>,
    /// Email of the user all requests act as when auth is disabled.
    pub dev_user: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".to_string(),
            require_auth: true,
            jwt_secret: String::new(),
            token_ttl_hours: 24 * 7,
            allowed_origins: Vec::new(),
            dev_user: None,
        }
    }
}

impl ServerConfig {
    /// Reads the signing secret from `PAISA_JWT_SECRET` if present.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(secret) = std::env::var("PAISA_JWT_SECRET") {
            config.jwt_secret = secret;
        }
        config
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(db: Database, config: ServerConfig) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// The authenticated user, inserted into request extensions by the auth
/// middleware and extracted by handlers.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
}

/// Token claims. `sub` is the user id.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: i64,
    email: String,
    exp: i64,
}

/// Signs a token for the given user.
pub fn issue_token(user: &User, config: &ServerConfig) -> Result<String, AppError> {
    let exp = chrono::Utc::now() + chrono::Duration::hours(config.token_ttl_hours);
    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        exp: exp.timestamp(),
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| {
        tracing::error!("token signing failed: {e}");
        AppError::internal("failed to issue token")
    })
}

fn decode_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("invalid or expired token"))
}

/// Auth middleware for expense routes.
///
/// With auth enabled, expects `Authorization: Bearer <token>` and resolves
/// the token subject against the users table. With auth disabled, resolves
/// the configured dev user instead.
async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = if state.config.require_auth {
        let token = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| AppError::unauthorized("missing bearer token"))?;
        let claims = decode_token(token, &state.config.jwt_secret)?;
        state
            .db
            .get_user(claims.sub)?
            .ok_or_else(|| AppError::unauthorized("user no longer exists"))?
    } else {
        let email = state
            .config
            .dev_user
            .as_deref()
            .ok_or_else(|| AppError::unauthorized("auth is disabled but no dev user is configured"))?;
        state
            .db
            .get_user_by_email(email)?
            .ok_or_else(|| AppError::unauthorized("configured dev user does not exist"))?
    };

    request.extensions_mut().insert(AuthUser {
        id: user.id,
        email: user.email,
    });
    Ok(next.run(request).await)
}

/// API error with an HTTP status and a client-safe message.
///
/// Internal errors are logged with full detail but return a generic body
/// so database paths and SQL never leak to clients.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<paisa_core::Error> for AppError {
    fn from(err: paisa_core::Error) -> Self {
        match err {
            paisa_core::Error::NotFound(msg) => Self::not_found(msg),
            paisa_core::Error::Conflict(msg) => Self::conflict(msg),
            paisa_core::Error::InvalidData(msg) => Self::bad_request(msg),
            other => {
                tracing::error!("internal error: {other}");
                Self::internal("internal server error")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

/// Builds the API router with all routes and middleware layers.
pub fn create_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/auth/signup", post(handlers::signup))
        .route("/auth/login", post(handlers::login));

    let protected = Router::new()
        .route("/auth/me", get(handlers::me))
        .route(
            "/expenses",
            get(handlers::list_expenses).post(handlers::create_expense),
        )
        .route("/expenses/stats", get(handlers::stats))
        .route("/expenses/suggestions", get(handlers::suggestions))
        .route("/expenses/report", get(handlers::report))
        .route("/expenses/export", get(handlers::export))
        .route(
            "/expenses/:id",
            get(handlers::get_expense)
                .put(handlers::update_expense)
                .delete(handlers::delete_expense),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let cors = if state.config.allowed_origins.is_empty() {
        CorsLayer::new()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
    };

    Router::new()
        .nest("/api", public.merge(protected))
        .route("/health", get(|| async { "ok" }))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
}

/// Runs the server until interrupted.
pub async fn serve(db: Database, config: ServerConfig) -> anyhow::Result<()> {
    if config.require_auth && config.jwt_secret.is_empty() {
        anyhow::bail!(
            "auth is enabled but no signing secret is set; \
             set PAISA_JWT_SECRET or run with --no-auth"
        );
    }
    if !config.require_auth {
        tracing::warn!("auth is disabled; all requests act as the configured dev user");
    }

    let bind = config.bind.clone();
    let state = AppState::new(db, config);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!("listening on {bind}");
    axum::serve(listener, app).await?;
    Ok(())
}
