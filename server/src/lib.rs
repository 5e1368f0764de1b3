use anyhow::Result;
use axum::extract::{Query, State};
use axum::http::{HeaderValue, Method};
use axum::{routing::get, Json, Router};
use cinematch_core::{load_csv, Corpus, EncoderConfig, Recommendation, Recommender, DEFAULT_TOP_N, NO_MATCH_MESSAGE};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct RecommendParams {
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize { DEFAULT_TOP_N.get() }

#[derive(Serialize)]
pub struct RecommendResponse {
    pub query: String,
    pub took_s: f64,
    pub matched: bool,
    pub threshold: Option<f64>,
    pub message: Option<String>,
    pub results: Vec<RecommendHit>,
}

#[derive(Serialize)]
pub struct RecommendHit {
    pub doc_id: u32,
    pub title: String,
    pub score: f64,
    pub genres: String,
    pub overview: String,
}

#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
}

/// Load the catalog, fit it once, and build the router.
pub fn build_app<P: AsRef<Path>>(data: P, config: EncoderConfig) -> Result<Router> {
    let corpus = load_csv(data)?;
    Ok(build_app_from_corpus(corpus, config))
}

pub fn build_app_from_corpus(corpus: Corpus, config: EncoderConfig) -> Router {
    let recommender = Arc::new(Recommender::new(corpus, config));
    tracing::info!(
        num_docs = recommender.corpus().len(),
        num_terms = recommender.encoder().vocabulary().len(),
        "recommender ready"
    );

    let cors = cors_layer(std::env::var("CORS_ALLOW_ORIGIN").ok().as_deref());

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/recommend", get(recommend_handler))
        .with_state(AppState { recommender })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Browser access policy. `origins` is a comma-separated allow-list; when it
/// is unset or holds no valid origin, any origin may call the service.
pub fn cors_layer(origins: Option<&str>) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .into_iter()
        .flat_map(|list| list.split(','))
        .filter_map(|origin| HeaderValue::from_str(origin.trim()).ok())
        .filter(|origin| !origin.is_empty())
        .collect();
    let origin = if allowed.is_empty() { AllowOrigin::any() } else { AllowOrigin::list(allowed) };
    CorsLayer::new().allow_origin(origin).allow_methods([Method::GET]).allow_headers(Any)
}

pub async fn recommend_handler(State(state): State<AppState>, Query(params): Query<RecommendParams>) -> Json<RecommendResponse> {
    let start = std::time::Instant::now();
    let top_n = NonZeroUsize::new(params.k.clamp(1, 100)).unwrap_or(NonZeroUsize::MIN);
    let rec = state.recommender.recommend(&params.q, top_n);

    let (matched, threshold, message, results) = match rec {
        Recommendation::Matches { threshold, hits } => {
            let results = hits
                .into_iter()
                .map(|h| RecommendHit {
                    doc_id: h.doc_id,
                    title: h.document.title.clone(),
                    score: h.score,
                    genres: h.document.genres.clone(),
                    overview: h.document.overview.clone(),
                })
                .collect();
            (true, Some(threshold), None, results)
        }
        Recommendation::NoMatch => (false, None, Some(NO_MATCH_MESSAGE.to_string()), vec![]),
    };

    let elapsed = start.elapsed();
    tracing::debug!(query = %params.q, matched, hits = results.len(), "recommend");
    Json(RecommendResponse { query: params.q, took_s: elapsed.as_secs_f64(), matched, threshold, message, results })
}
