pub mod models;
pub mod utils;

use actix_web::{post, web, HttpResponse};
use models::{PosterData, SummaryQuery};
use serde_json::Value;
use tracing::info;
use validator::Validate;

use crate::activities::models::ActivityRecord;
use crate::aggregate::{models::SummaryStatistics, summarize_report};
use crate::config::SummaryConfig;
use crate::error::ApiError;

fn summarize_request(
    config: &SummaryConfig,
    query: &SummaryQuery,
    body: &Value,
) -> Result<SummaryStatistics, ApiError> {
    query.validate()?;

    let (config, today) = utils::resolve_config(config, query)?;

    let report = summarize_report(body, &config, today)?;

    report.statistics.ok_or(ApiError::NoRuns {
        skipped: report.skipped_records,
    })
}

#[utoipa::path(
    post,
    path = "/summary",
    params(SummaryQuery),
    request_body(content = Vec<ActivityRecord>, description = "Activities as returned by the provider", content_type = "application/json"),
    responses(
        (status = 200, description = "Running statistics", body = SummaryStatistics),
        (status = 400, description = "Input is not a list of activity records"),
        (status = 404, description = "No running activities found")
    ),
    tag = "Summary"
)]
#[post("/summary")]
pub async fn post_summary(
    config: web::Data<SummaryConfig>,
    query: web::Query<SummaryQuery>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let summary = summarize_request(config.get_ref(), &query, &body)?;

    info!(
        total_count = summary.total_count,
        skipped = summary.skipped_records,
        "Summary computed"
    );

    Ok(HttpResponse::Ok().json(summary))
}

#[utoipa::path(
    post,
    path = "/summary/poster",
    params(SummaryQuery),
    request_body(content = Vec<ActivityRecord>, description = "Activities as returned by the provider", content_type = "application/json"),
    responses(
        (status = 200, description = "Poster payload", body = PosterData),
        (status = 400, description = "Input is not a list of activity records"),
        (status = 404, description = "No running activities found")
    ),
    tag = "Summary"
)]
#[post("/summary/poster")]
pub async fn post_poster(
    config: web::Data<SummaryConfig>,
    query: web::Query<SummaryQuery>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let summary = summarize_request(config.get_ref(), &query, &body)?;
    let poster = utils::build_poster(query.athlete.as_deref(), &summary);

    Ok(HttpResponse::Ok().json(poster))
}
