use super::*;

#[test]
fn from_response_prefers_message_field() {
    let err = ApiError::from_response(401, r#"{"message":"Invalid credentials"}"#);
    assert_eq!(
        err,
        ApiError::Status { status: 401, message: "Invalid credentials".to_owned() }
    );
    assert_eq!(err.to_string(), "Invalid credentials");
}

#[test]
fn from_response_falls_back_to_error_field() {
    let err = ApiError::from_response(409, r#"{"error":"User already exists"}"#);
    assert_eq!(err.to_string(), "User already exists");
}

#[test]
fn from_response_uses_plain_text_body() {
    let err = ApiError::from_response(502, "Bad Gateway");
    assert_eq!(err.to_string(), "Bad Gateway");
}

#[test]
fn from_response_empty_body_uses_status_line() {
    let err = ApiError::from_response(500, "   ");
    assert_eq!(err.to_string(), "request failed with status code 500");
    assert_eq!(err.status(), Some(500));
}

#[test]
fn from_response_json_without_message_uses_status_line() {
    let err = ApiError::from_response(400, r#"{"code":17}"#);
    assert_eq!(err.to_string(), "request failed with status code 400");
}

#[test]
fn transport_error_has_no_status() {
    assert_eq!(ApiError::Transport("offline".to_owned()).status(), None);
}

#[test]
fn session_error_is_transparent() {
    let err: SessionError = ValidationError::MissingPassword.into();
    assert_eq!(err.to_string(), "Password is required.");
    let err: SessionError = ApiError::from_response(401, r#"{"message":"nope"}"#).into();
    assert_eq!(err.to_string(), "nope");
}
