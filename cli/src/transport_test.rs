use super::*;

#[test]
fn methods_map_one_to_one() {
    assert_eq!(to_reqwest(Method::Get), reqwest::Method::GET);
    assert_eq!(to_reqwest(Method::Post), reqwest::Method::POST);
    assert_eq!(to_reqwest(Method::Put), reqwest::Method::PUT);
    assert_eq!(to_reqwest(Method::Patch), reqwest::Method::PATCH);
    assert_eq!(to_reqwest(Method::Delete), reqwest::Method::DELETE);
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let err = ReqwestTransport::new()
        .send(ApiRequest {
            method: Method::Get,
            url: "http://127.0.0.1:9/api/projects".to_owned(),
            headers: vec![],
            body: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
