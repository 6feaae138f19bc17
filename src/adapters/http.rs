use crate::content::Catalog;
use crate::core::submission::{FormKind, SubmissionEngine};
use crate::domain::model::{
    Attachment, Client, ContactSubmission, Course, JobApplication, Position, Testimonial,
    TestimonialKind,
};
use crate::utils::error::{Result, SiteError};
use crate::utils::validation;
use axum::{
    body::Bytes,
    extract::{
        multipart::{Multipart, MultipartError, MultipartRejection},
        DefaultBodyLimit, Path, Query, State,
    },
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Room for the text fields and multipart framing around the resume.
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    engine: Arc<SubmissionEngine>,
    catalog: &'static Catalog,
}

impl AppState {
    pub fn new(engine: SubmissionEngine) -> Self {
        Self {
            engine: Arc::new(engine),
            catalog: Catalog::builtin(),
        }
    }
}

/// A failed submission together with the form it came from, so transport
/// failures can be answered with that form's generic message.
#[derive(Debug)]
pub struct FormError {
    kind: FormKind,
    error: SiteError,
}

impl FormError {
    fn new(kind: FormKind, error: SiteError) -> Self {
        Self { kind, error }
    }
}

impl IntoResponse for FormError {
    fn into_response(self) -> Response {
        let (status, message) = if self.error.is_client_error() {
            (StatusCode::BAD_REQUEST, self.error.user_friendly_message())
        } else {
            tracing::error!("❌ {} form delivery failed: {}", self.kind.as_str(), self.error);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                self.kind.failure_message().to_string(),
            )
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub fn build_router(state: AppState, allowed_origins: &[String]) -> Router {
    let upload_limit = state.engine.config().max_resume_bytes() + FORM_OVERHEAD_BYTES;

    let router = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/contact", post(submit_contact))
        .route(
            "/api/careers",
            post(submit_application).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/careers/positions", get(list_positions))
        .route("/api/careers/positions/{title}", get(find_position))
        .route("/api/clients", get(list_clients))
        .route("/api/testimonials", get(list_testimonials))
        .route("/api/academy/courses", get(list_courses))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if allowed_origins.is_empty() {
        router
    } else {
        router.layer(cors_layer(allowed_origins))
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin.trim_end_matches('/')).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn submit_contact(
    State(state): State<AppState>,
    body: Bytes,
) -> std::result::Result<Json<Value>, FormError> {
    let submission: ContactSubmission = serde_json::from_slice(&body).map_err(|e| {
        FormError::new(
            FormKind::Contact,
            SiteError::InvalidPayload {
                message: e.to_string(),
            },
        )
    })?;

    state
        .engine
        .submit(&submission)
        .await
        .map_err(|e| FormError::new(FormKind::Contact, e))?;

    Ok(Json(json!({ "success": true })))
}

async fn submit_application(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> std::result::Result<Json<Value>, FormError> {
    let max_resume_bytes = state.engine.config().max_resume_bytes();

    let application = match multipart {
        Ok(multipart) => read_application(multipart, max_resume_bytes).await,
        Err(rejection) => Err(SiteError::InvalidPayload {
            message: rejection.body_text(),
        }),
    }
    .map_err(|e| FormError::new(FormKind::Careers, e))?;

    state
        .engine
        .submit(&application)
        .await
        .map_err(|e| FormError::new(FormKind::Careers, e))?;

    Ok(Json(json!({ "success": true })))
}

async fn read_application(mut multipart: Multipart, max_resume_bytes: usize) -> Result<JobApplication> {
    let multipart_error = |e: MultipartError| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            validation::file_too_large("resume", max_resume_bytes)
        } else {
            SiteError::InvalidPayload {
                message: e.body_text(),
            }
        }
    };

    let mut application = JobApplication::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        if name == "resume" {
            let filename = field.file_name().unwrap_or("resume").to_string();
            let content_type = field.content_type().map(str::to_string);
            let content = field.bytes().await.map_err(multipart_error)?;
            application.resume = Some(Attachment {
                filename,
                content_type,
                content: content.to_vec(),
            });
            continue;
        }

        let slot = match name.as_str() {
            "name" => &mut application.name,
            "email" => &mut application.email,
            "phone" => &mut application.phone,
            "position" => &mut application.position,
            "experience" => &mut application.experience,
            "coverLetter" => &mut application.cover_letter,
            other => {
                tracing::debug!("Ignoring unknown application field: {}", other);
                continue;
            }
        };
        *slot = Some(field.text().await.map_err(multipart_error)?);
    }

    Ok(application)
}

async fn list_clients(State(state): State<AppState>) -> Json<Vec<Client>> {
    Json(state.catalog.clients.clone())
}

#[derive(Debug, Deserialize)]
struct TestimonialQuery {
    kind: Option<TestimonialKind>,
}

async fn list_testimonials(
    State(state): State<AppState>,
    Query(query): Query<TestimonialQuery>,
) -> Json<Vec<Testimonial>> {
    Json(state.catalog.testimonials_of(query.kind))
}

async fn list_positions(State(state): State<AppState>) -> Json<Vec<Position>> {
    Json(state.catalog.positions.clone())
}

async fn find_position(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> std::result::Result<Json<Position>, (StatusCode, Json<Value>)> {
    state
        .catalog
        .position(&title)
        .cloned()
        .map(Json)
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Position not found" })),
            )
        })
}

async fn list_courses(State(state): State<AppState>) -> Json<Vec<Course>> {
    Json(state.catalog.courses.clone())
}

/// Serves the router until ctrl-c.
pub async fn serve(listener: tokio::net::TcpListener, router: Router) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("🚀 Listening on http://{}", addr);
    }

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install ctrl-c handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
