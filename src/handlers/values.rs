use axum::{Json, extract::Path, http::StatusCode};

// Business routes - only here to sit behind the rate limiter

pub async fn list_values() -> Json<Vec<&'static str>> {
    Json(vec!["value1", "value2"])
}

pub async fn get_value(Path(id): Path<i32>) -> Json<String> {
    Json(format!("value{}", id))
}

// writes are accepted and discarded, the payload is never read
pub async fn create_value() -> StatusCode {
    StatusCode::OK
}

pub async fn update_value(Path(_id): Path<i32>) -> StatusCode {
    StatusCode::OK
}

pub async fn delete_value(Path(_id): Path<i32>) -> StatusCode {
    StatusCode::OK
}
