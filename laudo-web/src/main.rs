//! Servidor web Axum para inspecionar a limpeza e a segmentação de laudos

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use laudo_core::{clean, text_to_document, Collection, Loader, SentenceSplitter};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Endereço padrão quando `LAUDO_WEB_ADDR` não está definido.
const DEFAULT_ADDR: &str = "0.0.0.0:3000";

/// Estado compartilhado da aplicação
struct AppState {
    splitter: SentenceSplitter,
}

#[derive(Deserialize)]
struct TextRequest {
    text: String,
    #[serde(default)]
    id: Option<String>,
}

#[derive(Serialize)]
struct CleanResponse {
    cleaned: String,
}

#[derive(Deserialize)]
struct LoadRequest {
    path: PathBuf,
    #[serde(default)]
    batch: Option<usize>,
    #[serde(default)]
    extract_impression: bool,
}

#[derive(Serialize)]
struct LoadResponse {
    total: usize,
    reports: Vec<String>,
    collection: Collection,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let state = Arc::new(AppState {
        splitter: SentenceSplitter::new(false),
    });

    let addr = std::env::var("LAUDO_WEB_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Servidor de laudos iniciado em http://{addr}");
    axum::serve(listener, app(state)).await
}

fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/clean", post(clean_handler))
        .route("/sentences", post(sentences_handler))
        .route("/load", post(load_handler))
        .layer(cors)
        .with_state(state)
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let message: String = message.into();
    (status, Json(serde_json::json!({"error": message}))).into_response()
}

/// Retorna a página principal HTML
async fn index_handler() -> impl IntoResponse {
    Html(include_str!("templates/index.html"))
}

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

/// Limpeza de um texto avulso
async fn clean_handler(Json(req): Json<TextRequest>) -> Response {
    if req.text.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Texto vazio");
    }
    Json(CleanResponse {
        cleaned: clean(&req.text),
    })
    .into_response()
}

/// Limpeza + segmentação em sentenças de um texto avulso
async fn sentences_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TextRequest>,
) -> Response {
    if req.text.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Texto vazio");
    }
    let id = req.id.unwrap_or_else(|| "0".to_string());
    let document = state.splitter.split_doc(text_to_document(id, clean(&req.text)));
    Json(document).into_response()
}

/// Carga de um arquivo de laudos do servidor
async fn load_handler(Json(req): Json<LoadRequest>) -> Response {
    info!(path = %req.path.display(), batch = ?req.batch, "carga solicitada");

    // A carga é síncrona e lê disco: roda fora do runtime
    let result = tokio::task::spawn_blocking(move || {
        let mut loader = Loader::new(req.path, req.extract_impression);
        loader.load(req.batch).map(|()| loader.into_parts())
    })
    .await;

    match result {
        Ok(Ok((reports, collection))) => Json(LoadResponse {
            total: collection.len(),
            reports,
            collection,
        })
        .into_response(),
        Ok(Err(err)) => {
            warn!(error = %err, "carga falhou");
            error_response(StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
        }
        Err(err) => error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use std::io::Write;
    use tower::ServiceExt;

    fn test_app() -> Router {
        app(Arc::new(AppState {
            splitter: SentenceSplitter::new(false),
        }))
    }

    async fn post_json(uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_index_page() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_clean_endpoint() {
        let (status, body) = post_json("/clean", serde_json::json!({"text": "Foo,Bar e/ou A/B"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cleaned"], "foo, bar ou a ou b");
    }

    #[tokio::test]
    async fn test_clean_rejects_empty_text() {
        let (status, body) = post_json("/clean", serde_json::json!({"text": "   "})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Texto vazio");
    }

    #[tokio::test]
    async fn test_sentences_endpoint() {
        let (status, body) = post_json(
            "/sentences",
            serde_json::json!({"text": "Coração normal. Pulmões limpos.", "id": "42"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "42");
        let sentences = body["passages"][0]["sentences"].as_array().unwrap();
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[1]["text"], "pulmões limpos.");
    }

    #[tokio::test]
    async fn test_load_endpoint() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Coração normal.").unwrap();
        writeln!(file, "Pulmões limpos.").unwrap();

        let (status, body) = post_json("/load", serde_json::json!({"path": file.path()})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 2);
        assert_eq!(body["reports"][1], "Pulmões limpos.");
        assert_eq!(body["collection"]["documents"][1]["id"], "1");
    }

    #[tokio::test]
    async fn test_load_endpoint_reports_loader_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "laudo sem marcador.").unwrap();

        let (status, body) = post_json(
            "/load",
            serde_json::json!({"path": file.path(), "extract_impression": true}),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().unwrap().contains("CONCLUSAO:"));
    }
}
