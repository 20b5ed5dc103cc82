use reqwest::Response;

/// Read the body of a failed response for use in an error message.
///
/// The body is only detail on top of the status, so a read failure is
/// logged and yields an empty string.
pub async fn error_body_text(response: Response) -> String {
    let url = response.url().clone();
    match response.text().await {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!(%url, "Failed to read error response body: {}", e);
            String::new()
        }
    }
}
