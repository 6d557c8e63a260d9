//! Log ingestion and listing endpoints

use everylog_application::NewLogRecord;
use everylog_domain::entities::LogRecord;
use everylog_infrastructure::AppContext;
use rocket::serde::json::Json;
use rocket::{State, get, post};

use super::run_blocking;
use crate::error::ApiError;
use crate::guards::{ApiKeyHeader, CallerId, Session};
use crate::models::{CreateLogRequest, IdResponse, LogQuery, validated};

/// `POST /log` - write a record with a project API key
#[post("/log", format = "json", data = "<request>")]
pub async fn create_log(
    caller: CallerId,
    api_key: ApiKeyHeader,
    request: Json<CreateLogRequest>,
    context: &State<AppContext>,
) -> Result<Json<IdResponse>, ApiError> {
    let record: NewLogRecord = validated(request.into_inner())?.into();
    let CallerId(user_id) = caller;
    let ApiKeyHeader(key) = api_key;
    let created = run_blocking(context, move |ctx| {
        ctx.logs().create_log(&user_id, &key, &record)
    })
    .await?;
    Ok(Json(IdResponse { id: created.id }))
}

/// `GET /log` - the caller's records, narrowed by query parameters
#[get("/log?<query..>")]
pub async fn list_logs(
    session: Session,
    query: LogQuery,
    context: &State<AppContext>,
) -> Result<Json<Vec<LogRecord>>, ApiError> {
    let filter = query.into_filter()?;
    let records = run_blocking(context, move |ctx| {
        ctx.logs().list_logs(&session.user_id, &filter)
    })
    .await?;
    Ok(Json(records))
}
