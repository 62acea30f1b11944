use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use lexiq_core::{flatten, search, Error, TrainingArtifact};
use lexiq_storage::ArtifactStore;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

#[derive(Deserialize)]
struct SessionQuery {
    #[serde(rename = "sessionId")]
    session_id: Option<String>,
}

#[derive(Deserialize)]
struct SearchRequest {
    query: String,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(store: Arc<ArtifactStore>, port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(store.clone()))
                .route("/", web::get().to(index))
                .route("/api/train", web::post().to(train))
                .route("/api/search", web::post().to(search_records))
                .route("/api/check-training", web::get().to(check_training))
                .route("/api/status", web::get().to(status))
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

/// All errors surface as a structured failure body; none are fatal.
fn error_response(error: Error) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::BadRequest().json(serde_json::json!({
        "success": false,
        "error": error.to_string()
    })))
}

async fn index() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "service": "lexiq",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": ["/api/train", "/api/search", "/api/check-training", "/api/status"]
    })))
}

async fn train(
    store: web::Data<Arc<ArtifactStore>>,
    query: web::Query<SessionQuery>,
    body: web::Json<serde_json::Value>,
) -> ActixResult<HttpResponse> {
    let records = flatten(&body);

    let artifact = match TrainingArtifact::build(records) {
        Ok(artifact) => artifact,
        Err(e) => return error_response(e),
    };

    let stats = (
        artifact.record_count(),
        artifact.field_count(),
        artifact.word_count(),
    );

    match store.store(query.into_inner().session_id, artifact) {
        Ok(session_id) => {
            info!(
                session_id = session_id.as_str(),
                records = stats.0,
                fields = stats.1,
                words = stats.2,
                "training succeeded"
            );
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "sessionId": session_id,
                "message": "model trained successfully",
                "stats": {
                    "recordCount": stats.0,
                    "fieldCount": stats.1,
                    "wordCount": stats.2,
                    "savedTo": store.artifact_path().display().to_string()
                }
            })))
        }
        Err(e) => error_response(e),
    }
}

async fn search_records(
    store: web::Data<Arc<ArtifactStore>>,
    query: web::Query<SessionQuery>,
    req: web::Json<SearchRequest>,
) -> ActixResult<HttpResponse> {
    let session_id = query.into_inner().session_id;

    let artifact = match store.resolve(session_id.as_deref()) {
        Ok(artifact) => artifact,
        Err(e) => return error_response(e),
    };

    let result = search(&artifact, &req.query);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "sessionId": session_id,
        "query": req.query,
        "interpretation": result.interpretation,
        "action": result.action,
        "resultCount": result.result_count(),
        "results": result.results
    })))
}

async fn check_training(store: web::Data<Arc<ArtifactStore>>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(store.check_training()))
}

async fn status(
    store: web::Data<Arc<ArtifactStore>>,
    query: web::Query<SessionQuery>,
) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(store.status(query.session_id.as_deref())))
}
