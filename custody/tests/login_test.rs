//! Integration tests for login, logout and wallet selection through
//! [`SocialConnector`], against a mocked gateway and a temporary data dir.

use std::sync::Arc;

use custody::wire::encode_transaction;
use custody::{
    ConnectorConfig, CustodyError, KeypairWallet, NotifyKind, RecordingNotifier, SessionStore,
    SocialConnector, WalletAdapter,
};
use serde_json::json;
use solana_sdk::hash::Hash;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::message::Message;
use solana_sdk::signature::{Keypair, Signer};
use solana_sdk::transaction::Transaction;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn connector(server: &MockServer, dir: &TempDir) -> (SocialConnector, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    let connector = SocialConnector::new(
        ConnectorConfig::with_base_url(&server.uri()).unwrap(),
        SessionStore::open(dir.path()),
        notifier.clone(),
    )
    .unwrap();
    (connector, notifier)
}

async fn mount_login(server: &MockServer, wallet: &str, token: &str) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "email": "a@b.com", "password": "x" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "customer": { "custodial_wallet": wallet, "name": "Gary" },
                "token": token
            }
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_login_persists_session() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_login(&server, "Addr123", "tok1").await;

    let (mut connector, notifier) = connector(&server, &dir);
    let session = connector.login("a@b.com", "x").await.unwrap();
    assert_eq!(session.address, "Addr123");

    // A fresh store on the same directory sees the login.
    let loaded = SessionStore::open(dir.path()).load().unwrap();
    assert_eq!(loaded.address, "Addr123");
    assert_eq!(loaded.token.expose(), "tok1");

    let profile = connector.profile().unwrap();
    assert_eq!(profile["customer"]["name"], "Gary");

    let notes = notifier.notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].kind, NotifyKind::Success);
    assert_eq!(notes[0].message, "Authorized");
}

#[tokio::test]
async fn test_login_with_malformed_wallet_address_cannot_sign() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_login(&server, "Addr123", "tok1").await;

    let (mut connector, _) = connector(&server, &dir);
    connector.login("a@b.com", "x").await.unwrap();

    assert!(matches!(
        connector.custodial_signer(),
        Err(CustodyError::InvalidAddress(_))
    ));
}

#[tokio::test]
async fn test_login_requires_email_and_password() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let (mut connector, notifier) = connector(&server, &dir);

    assert!(matches!(
        connector.login("", "x").await,
        Err(CustodyError::Validation(_))
    ));
    assert!(matches!(
        connector.login("a@b.com", "").await,
        Err(CustodyError::Validation(_))
    ));

    let messages: Vec<String> = notifier.errors().into_iter().map(|n| n.message).collect();
    assert_eq!(messages, vec!["Email is required", "Password is required"]);
}

#[tokio::test]
async fn test_rejected_login_surfaces_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let (mut connector, notifier) = connector(&server, &dir);

    let err = connector.login("a@b.com", "wrong").await.unwrap_err();
    assert!(matches!(err, CustodyError::Login(ref m) if m == "Invalid credentials"));
    assert_eq!(notifier.errors()[0].message, "Invalid credentials");
    assert!(connector.session().is_none());
    assert!(SessionStore::open(dir.path()).load().is_none());
}

#[tokio::test]
async fn test_logout_clears_everything() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let custodial = Keypair::new();
    mount_login(&server, &custodial.pubkey().to_string(), "tok1").await;

    let (mut connector, _) = connector(&server, &dir);
    connector.login("a@b.com", "x").await.unwrap();
    assert!(connector.active_wallet(None, None).unwrap().is_some());

    connector.logout().unwrap();
    connector.logout().unwrap();
    assert!(connector.session().is_none());
    assert!(connector.profile().is_none());
    assert!(connector.active_wallet(None, None).unwrap().is_none());

    // Next run starts unresolved too.
    let (restarted, _) = self::connector(&server, &dir);
    assert!(restarted.session().is_none());
}

#[tokio::test]
async fn test_custodial_session_replaces_connected_wallet() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let custodial = Keypair::new();
    mount_login(&server, &custodial.pubkey().to_string(), "tok1").await;

    let (mut connector, _) = connector(&server, &dir);
    connector.login("a@b.com", "x").await.unwrap();

    let ix = Instruction {
        program_id: "MemoSq4gqABAXKb96qnH8TysNcWxMyWCqXgDLGmfcHr".parse().unwrap(),
        accounts: vec![AccountMeta::new_readonly(custodial.pubkey(), true)],
        data: b"vote".to_vec(),
    };
    let tx = Transaction::new_unsigned(Message::new(&[ix], Some(&custodial.pubkey())));
    let mut signed = tx.clone();
    signed.sign(&[&custodial], Hash::default());

    Mock::given(method("POST"))
        .and(path("/solana/sign-transaction-bearer-react"))
        .and(header("authorization", "Bearer tok1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": [encode_transaction(&signed).unwrap()] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let browser_wallet: Box<dyn WalletAdapter> = Box::new(KeypairWallet::new(Keypair::new()));
    let wallet = connector
        .active_wallet(None, Some(browser_wallet))
        .unwrap()
        .unwrap();

    assert!(wallet.is_custodial());
    assert_eq!(wallet.public_key(), Some(custodial.pubkey()));
    assert_eq!(wallet.sign_transaction(&tx).await.unwrap(), vec![signed]);
}

#[tokio::test]
async fn test_view_as_without_session() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let (connector, _) = connector(&server, &dir);

    let viewed = Keypair::new().pubkey();
    let wallet = connector
        .active_wallet(Some(viewed.to_string().as_str()), None)
        .unwrap()
        .unwrap();
    assert!(!wallet.is_custodial());
    assert_eq!(wallet.public_key(), Some(viewed));
    assert!(wallet.sign_message(b"gm").await.is_err());

    assert!(matches!(
        connector.active_wallet(Some("not-a-key"), None),
        Err(CustodyError::InvalidAddress(_))
    ));
}
