use axum::response::Response;
use http_body_util::BodyExt;

/// Parse response body to JSON
pub async fn parse_response_body(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// The sanitized filename part of a key: everything after the random token
pub fn filename_part<'a>(key: &'a str, prefix: &str, user_id: &str) -> &'a str {
    let rest = key
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix(user_id))
        .and_then(|rest| rest.strip_prefix('-'))
        .expect("key does not start with prefix and user id");
    // Skip the 36-character UUID token and its trailing hyphen
    &rest[37..]
}
