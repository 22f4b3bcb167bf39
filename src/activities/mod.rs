pub mod models;
pub mod utils;

use actix_web::{post, web, HttpResponse};
use models::{ActivityRecord, RunLogEntry};
use serde_json::Value;
use tracing::info;
use validator::Validate;

use crate::config::SummaryConfig;
use crate::error::ApiError;
use crate::summary::models::SummaryQuery;
use crate::summary::utils::resolve_config;

#[utoipa::path(
    post,
    path = "/activities/runs",
    params(SummaryQuery),
    request_body(content = Vec<ActivityRecord>, description = "Activities as returned by the provider", content_type = "application/json"),
    responses(
        (status = 200, description = "Qualifying runs, newest first", body = [RunLogEntry]),
        (status = 400, description = "Input is not a list of activity records")
    ),
    tag = "Activities"
)]
#[post("/activities/runs")]
pub async fn post_run_log(
    config: web::Data<SummaryConfig>,
    query: web::Query<SummaryQuery>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    query.validate()?;

    let (config, _) = resolve_config(config.get_ref(), &query)?;
    let parsed = utils::parse_activities(&body)?;
    let runs = utils::run_log(&parsed.records, &config);

    info!(
        "Listing {} runs ({} malformed records skipped)",
        runs.len(),
        parsed.skipped
    );

    Ok(HttpResponse::Ok().json(runs))
}
