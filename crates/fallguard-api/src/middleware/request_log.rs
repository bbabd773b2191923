use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Logs every API request as a structured `tracing` event with its outcome.
/// Bodies are never logged; lead submissions carry contact details.
pub async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = std::time::Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis() as u64;
    if response.status().is_server_error() {
        tracing::warn!(method = %method, path = %path, status, elapsed_ms, "api_request");
    } else {
        tracing::info!(method = %method, path = %path, status, elapsed_ms, "api_request");
    }

    response
}
