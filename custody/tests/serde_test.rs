//! Deserialization of gateway payloads into the REST types.

use custody::types::*;

#[test]
fn test_login_data_keeps_unknown_fields() {
    let json = r#"{
        "customer": {
            "id": 4182,
            "email": "a@b.com",
            "custodial_wallet": "9n4nbM75f5Ui33ZbPYXn59EwSgE8CGsHtAeTH5YFeJ9E",
            "avatar": null
        },
        "token": "4182|Yx7cKpQ",
        "expires_in": 31536000
    }"#;

    let data = LoginData::from_value(serde_json::from_str(json).unwrap()).unwrap();
    assert_eq!(
        data.customer.custodial_wallet,
        "9n4nbM75f5Ui33ZbPYXn59EwSgE8CGsHtAeTH5YFeJ9E"
    );
    assert_eq!(data.token, "4182|Yx7cKpQ");
    assert_eq!(data.raw["customer"]["id"], 4182);
    assert_eq!(data.raw["expires_in"], 31536000);
}

#[test]
fn test_login_data_requires_wallet_and_token() {
    let no_token = serde_json::json!({ "customer": { "custodial_wallet": "Addr123" } });
    assert!(LoginData::from_value(no_token).is_err());

    let no_wallet = serde_json::json!({ "customer": {}, "token": "t" });
    assert!(LoginData::from_value(no_wallet).is_err());
}

#[test]
fn test_login_request_body_and_debug() {
    let req = LoginRequest {
        email: "a@b.com".into(),
        password: "hunter2".into(),
    };
    let body = serde_json::to_value(&req).unwrap();
    assert_eq!(body, serde_json::json!({ "email": "a@b.com", "password": "hunter2" }));
    assert!(!format!("{req:?}").contains("hunter2"));
}

#[test]
fn test_sign_response_data_optional() {
    let ok: SignResponse = serde_json::from_str(r#"{"data":["AQ==","Ag=="]}"#).unwrap();
    assert_eq!(ok.data.unwrap(), vec!["AQ==", "Ag=="]);

    let missing: SignResponse = serde_json::from_str(r#"{"success":false}"#).unwrap();
    assert!(missing.data.is_none());
}

#[test]
fn test_api_error_body() {
    let body: ApiErrorBody = serde_json::from_str(r#"{"message":"Unauthenticated."}"#).unwrap();
    assert_eq!(body.message.as_deref(), Some("Unauthenticated."));

    let empty: ApiErrorBody = serde_json::from_str("{}").unwrap();
    assert!(empty.message.is_none());
}
