use axum::response::Html;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::Utc;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::models::{LogRow, Record};
use crate::{db, thingspeak, AppContext};

pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .route("/update_count", post(update_count))
        .route("/dashboard_data", get(dashboard_data))
        .route("/dashboard", get(dashboard))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(Extension(ctx))
}

#[derive(Deserialize)]
pub struct UpdateCountBody {
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub capacity: i64,
}

pub async fn update_count(
    ctx: Extension<AppContext>,
    body: Json<Value>,
) -> (StatusCode, Json<Value>) {
    let Ok(body) = serde_json::from_value::<UpdateCountBody>(body.0) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"status": "error", "message": "bad payload"})),
        );
    };

    let ts = Utc::now().timestamp();
    if let Err(e) = db::insert_log(&ctx.pool, ts, body.count, body.capacity).await {
        tracing::error!(error = %e, "failed to store reading");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"status": "error", "message": "storage failure"})),
        );
    }

    if let Some(thingspeak) = ctx.config.thingspeak.clone() {
        thingspeak::spawn_push(thingspeak, body.count, body.capacity);
    }

    (StatusCode::OK, Json(json!({"status": "ok"})))
}

// TODO: cache responses instead of hitting sqlite on every poll
pub async fn dashboard_data(ctx: Extension<AppContext>) -> Result<Json<Vec<Record>>, StatusCode> {
    let rows = recent(&ctx).await?;
    Ok(Json(rows.into_iter().map(LogRow::into_record).collect()))
}

pub async fn dashboard(ctx: Extension<AppContext>) -> Result<Html<String>, StatusCode> {
    let rows = recent(&ctx).await?;

    let mut html = String::from("<h2>Bus Occupancy Dashboard</h2>");
    html.push_str("<p>Latest readings (time, count, capacity)</p>");
    html.push_str(
        "<table border='1' cellpadding='6'><tr><th>Time</th><th>Count</th><th>Capacity</th></tr>",
    );
    for record in rows.into_iter().map(LogRow::into_record) {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            record.time, record.count, record.capacity
        ));
    }
    html.push_str("</table>");
    html.push_str(
        "<p>Generate readings with the simulate binary or POST them to /update_count.</p>",
    );

    Ok(Html(html))
}

async fn recent(ctx: &AppContext) -> Result<Vec<LogRow>, StatusCode> {
    db::recent_logs(&ctx.pool, db::DASHBOARD_LIMIT)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to load readings");
            StatusCode::INTERNAL_SERVER_ERROR
        })
}
