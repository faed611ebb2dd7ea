use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect};
use axum::routing::{get, post};
use axum::{Json, Router};
use maud::{DOCTYPE, Markup, html};
use tower_http::cors::CorsLayer;

use mealwheel_core::MenuSession;

use crate::render::{BLW_TIP, Household, PLACEHOLDER, row_cells};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: msg.into(),
        }
    }

    pub fn internal(err: anyhow::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("{err:#}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// One menu session shared by every request; regenerations run one at a time.
pub struct ServeState {
    session: Mutex<MenuSession>,
    household: Household,
}

pub type SharedState = Arc<ServeState>;

impl ServeState {
    pub fn new(session: MenuSession, household: Household) -> SharedState {
        Arc::new(Self {
            session: Mutex::new(session),
            household,
        })
    }

    fn session(&self) -> Result<MutexGuard<'_, MenuSession>, AppError> {
        self.session
            .lock()
            .map_err(|_| AppError::internal(anyhow::anyhow!("menu session lock poisoned")))
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/generate", post(generate_form))
        .route("/api/week", get(get_week).post(post_week))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub async fn run_serve(state: SharedState, bind: &str, port: u16) -> Result<()> {
    let app = build_router(state);
    let addr: SocketAddr = format!("{bind}:{port}").parse()?;
    tracing::info!("mealwheel serve listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("mealwheel serve shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn index(State(state): State<SharedState>) -> Result<Markup, AppError> {
    let session = state.session()?;
    let warning = session.warning().map(ToString::to_string);

    Ok(html! {
        (DOCTYPE)
        html {
            head { title { "mealwheel" } }
            body {
                h1 { "Weekly family menu" }
                @if let Some(warning) = warning {
                    p class="warning" { (warning) }
                }
                form method="post" action="/generate" {
                    button type="submit" { "Generate week" }
                }
                @match session.current() {
                    None => {
                        p { (PLACEHOLDER) }
                    }
                    Some(week) => {
                        table {
                            tr {
                                @for header in state.household.headers() {
                                    th { (header) }
                                }
                            }
                            @for day in week.days() {
                                tr {
                                    @for cell in row_cells(day) {
                                        td { (cell) }
                                    }
                                }
                            }
                        }
                        p { em { (BLW_TIP) } }
                    }
                }
            }
        }
    })
}

/// Form target of the "Generate week" button: regenerate, then show the page.
async fn generate_form(
    State(state): State<SharedState>,
) -> Result<axum::response::Response, AppError> {
    state.session()?.regenerate();
    Ok(Redirect::to("/").into_response())
}

async fn get_week(State(state): State<SharedState>) -> Result<axum::response::Response, AppError> {
    let session = state.session()?;
    let week = session
        .current()
        .ok_or_else(|| AppError::not_found("no week generated yet"))?;
    Ok(Json(week).into_response())
}

async fn post_week(State(state): State<SharedState>) -> Result<axum::response::Response, AppError> {
    let mut session = state.session()?;
    if let Some(warning) = session.warning() {
        return Err(AppError::unavailable(warning.to_string()));
    }
    let week = session
        .regenerate()
        .ok_or_else(|| AppError::unavailable("generation disabled"))?;
    Ok(Json(week).into_response())
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use tower::ServiceExt;

    use mealwheel_core::{KeywordSet, MenuGenerator};
    use mealwheel_data::schema::{BREAKFAST_SHEET, CARBOHYDRATE, PROTEIN};
    use mealwheel_data::{IngredientRepository, SourceConfig};
    use mealwheel_test_utils::per_meal_fixture;

    use super::*;

    // -----------------------------------------------------------------------
    // HTTP helpers
    // -----------------------------------------------------------------------

    fn state_for(path: PathBuf) -> SharedState {
        let repo = Arc::new(IngredientRepository::new(SourceConfig::new(path)));
        let session = MenuSession::new(repo, KeywordSet::default(), MenuGenerator::seeded(21));
        ServeState::new(session, Household::new("Matias", "Agustin"))
    }

    async fn send_request(
        state: SharedState,
        method: Method,
        uri: &str,
    ) -> axum::response::Response {
        let app = build_router(state);
        app.oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), 1_048_576)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        serde_json::from_str(&body_string(response).await).unwrap()
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn test_index_shows_placeholder_before_generation() {
        let (_dir, path) = per_meal_fixture().write_temp();
        let state = state_for(path);

        let resp = send_request(state, Method::GET, "/").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp
            .headers()
            .get("content-type")
            .expect("should have content-type header")
            .to_str()
            .unwrap()
            .to_string();
        assert!(
            content_type.contains("text/html"),
            "content-type should contain text/html, got: {content_type}"
        );
        let html = body_string(resp).await;
        assert!(html.contains("Generate week"));
        assert!(html.contains(PLACEHOLDER));
        assert!(!html.contains("<table>"));
    }

    #[tokio::test]
    async fn test_get_week_before_generation_is_404() {
        let (_dir, path) = per_meal_fixture().write_temp();
        let resp = send_request(state_for(path), Method::GET, "/api/week").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_post_week_generates_and_get_returns_it() {
        let (_dir, path) = per_meal_fixture().write_temp();
        let state = state_for(path);

        let resp = send_request(state.clone(), Method::POST, "/api/week").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let generated = body_json(resp).await;
        let days = generated.as_array().expect("week should be an array");
        assert_eq!(days.len(), 7);
        assert_eq!(days[0]["day"], "Monday");
        assert_eq!(days[6]["day"], "Sunday");

        let resp = send_request(state, Method::GET, "/api/week").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, generated);
    }

    #[tokio::test]
    async fn test_generate_form_redirects_and_renders_table() {
        let (_dir, path) = per_meal_fixture().write_temp();
        let state = state_for(path);

        let resp = send_request(state.clone(), Method::POST, "/generate").await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");

        let html = body_string(send_request(state, Method::GET, "/").await).await;
        assert!(html.contains("<th>Toddler (Matias)</th>"));
        assert!(html.contains("<th>Infant (Agustin, BLW)</th>"));
        assert!(html.contains("<td>Thursday</td>"));
        assert!(html.contains(BLW_TIP));
    }

    #[tokio::test]
    async fn test_disabled_session_returns_503_and_warns() {
        let tmp = tempfile::TempDir::new().unwrap();
        let state = state_for(tmp.path().join("family_menu.xlsx"));

        let resp = send_request(state.clone(), Method::POST, "/api/week").await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = body_json(resp).await;
        assert!(
            json["error"].as_str().unwrap().contains("not found"),
            "unexpected error body: {json}"
        );

        let resp = send_request(state.clone(), Method::POST, "/generate").await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        let html = body_string(send_request(state, Method::GET, "/").await).await;
        assert!(html.contains("class=\"warning\""));
        assert!(html.contains(PLACEHOLDER));
    }

    #[tokio::test]
    async fn test_health() {
        let (_dir, path) = per_meal_fixture().write_temp();
        let resp = send_request(state_for(path), Method::GET, "/health").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_index_escapes_workbook_text() {
        let (_dir, path) = per_meal_fixture()
            .without_sheet(BREAKFAST_SHEET)
            .sheet(BREAKFAST_SHEET)
            .column(PROTEIN, &["Ham & <b>eggs</b>"])
            .column(CARBOHYDRATE, &["Toast"])
            .write_temp();
        let state = state_for(path);

        send_request(state.clone(), Method::POST, "/generate").await;
        let html = body_string(send_request(state, Method::GET, "/").await).await;
        assert!(html.contains("HAM &amp; &lt;B&gt;EGGS&lt;/B&gt; + TOAST"), "got: {html}");
        assert!(!html.contains("<B>"));
    }
}
