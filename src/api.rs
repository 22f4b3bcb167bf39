use crate::activities::{
    self,
    models::{ActivityRecord, RunLogEntry},
};
use crate::aggregate::models::{MonthlyStats, RunHighlight, SummaryStatistics};
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::summary::{self, models::PosterData};
use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::middleware::{NormalizePath, TrailingSlash};
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::io;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        summary::post_summary,
        summary::post_poster,
        activities::post_run_log,
    ),
    components(schemas(
        ActivityRecord,
        RunLogEntry,
        SummaryStatistics,
        MonthlyStats,
        RunHighlight,
        PosterData
    )),
    tags(
        (name = "Summary", description = "Running statistics endpoints"),
        (name = "Activities", description = "Activity listing endpoints")
    )
)]
pub struct ApiDoc;

/// Upper bound for a posted activity history.
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Registers every route on an app. Shared by the server and tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .limit(MAX_BODY_BYTES)
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into());

    let query_config = web::QueryConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into());

    cfg.app_data(json_config)
        .app_data(query_config)
        .service(summary::post_summary)
        .service(summary::post_poster)
        .service(activities::post_run_log);
}

pub async fn run_api(config: AppConfig) -> io::Result<()> {
    info!(host = %config.host, port = config.port, "Starting server...");

    let governor_conf = GovernorConfigBuilder::default()
        .seconds_per_request(config.rate_limit_seconds)
        .burst_size(config.rate_limit_burst)
        .finish()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "invalid rate limit"))?;

    let summary_config = web::Data::new(config.summary.clone());

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(NormalizePath::new(TrailingSlash::Trim))
            .wrap(
                actix_web::middleware::DefaultHeaders::new()
                    .add((
                        header::STRICT_TRANSPORT_SECURITY,
                        "max-age=63072000; includeSubDomains; preload",
                    ))
                    .add((header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
                    .add((header::X_FRAME_OPTIONS, "DENY"))
                    .add((header::X_XSS_PROTECTION, "1; mode=block")),
            )
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST"])
                    .allowed_header(header::CONTENT_TYPE)
                    .max_age(3600),
            )
            .wrap(Governor::new(&governor_conf))
            .app_data(summary_config.clone())
            .configure(configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
