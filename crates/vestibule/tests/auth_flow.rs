//! End-to-end pipeline tests: request in, result out, identity persisted.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use pretty_assertions::assert_eq;

use vestibule::identifier::resolver::{Combinator, ConditionValue, Conditions, Resolver};
use vestibule::request::{AUTH_PW, AUTH_USER};
use vestibule::{
    Argon2Hasher, ArgonConfig, AuthenticationService, Credentials, Error, FormAuthenticator,
    HttpBasicAuthenticator, Identified, Identifier, MemorySession, PasswordHasher,
    PasswordIdentifier, Record, Request, SessionAuthenticator, SessionStorage, Status, Storage,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("vestibule=debug")
        .with_test_writer()
        .try_init();
}

/// One-user resolver with an observable call count
struct UserTable {
    username: String,
    password_hash: String,
    calls: AtomicUsize,
}

impl UserTable {
    fn new(username: &str, password_hash: &str) -> Self {
        Self {
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Resolver for UserTable {
    async fn find(
        &self,
        conditions: &Conditions,
        _combinator: Combinator,
    ) -> vestibule::Result<Option<Record>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let matched = conditions.iter().any(|(_, value)| match value {
            ConditionValue::One(value) => value == &self.username,
            ConditionValue::In(values) => values.contains(&self.username),
        });

        Ok(matched.then(|| {
            Record::new()
                .with("id", 42)
                .with("username", self.username.as_str())
                .with("password", self.password_hash.as_str())
        }))
    }
}

fn test_hasher() -> Arc<dyn PasswordHasher> {
    Arc::new(
        Argon2Hasher::new(ArgonConfig {
            memory_cost: 8,
            time_cost: 1,
            parallelism: 1,
        })
        .unwrap(),
    )
}

fn password_service(resolver: Arc<UserTable>, hasher: Arc<dyn PasswordHasher>) -> AuthenticationService {
    AuthenticationService::builder()
        .identifier("password", Arc::new(PasswordIdentifier::new(resolver, hasher)))
        .authenticator("form", Arc::new(FormAuthenticator::new().login_url("/login")))
        .authenticator("basic", Arc::new(HttpBasicAuthenticator::new().realm("app")))
        .build()
        .unwrap()
}

#[tokio::test]
async fn form_login_succeeds_and_persists_identity() {
    init_tracing();
    let hasher = test_hasher();
    let hash = hasher.hash("s3cret").unwrap();
    let users = Arc::new(UserTable::new("ada", &hash));
    let service = password_service(users.clone(), hasher);

    let request = Request::builder()
        .path("/login")
        .body_field("username", "ada")
        .body_field("password", "s3cret")
        .build();

    let result = service.authenticate(&request).await.unwrap();
    assert!(result.is_valid());
    let identity = result.identity().unwrap();
    assert_eq!(identity.get_str("username"), Some("ada"));
    assert!(!identity.contains("password"));

    let storage = SessionStorage::new(MemorySession::new());
    service.persist(&storage, &result).unwrap();
    assert_eq!(service.identity(&storage).unwrap(), result.into_identity());
    assert_eq!(storage.session().renewals(), 1);

    service.clear(&storage).unwrap();
    assert!(service.identity(&storage).unwrap().is_none());
    assert_eq!(storage.session().renewals(), 2);
}

#[tokio::test]
async fn basic_credentials_reach_the_same_chain() {
    init_tracing();
    let hasher = test_hasher();
    let hash = hasher.hash("s3cret").unwrap();
    let users = Arc::new(UserTable::new("ada", &hash));
    let service = password_service(users, hasher);

    let request = Request::builder()
        .path("/api/things")
        .server_param(AUTH_USER, "ada")
        .server_param(AUTH_PW, "s3cret")
        .build();

    let result = service.authenticate(&request).await.unwrap();
    assert!(result.is_valid());
}

#[tokio::test]
async fn incomplete_credentials_never_touch_the_backend() {
    init_tracing();
    let hasher = test_hasher();
    let users = Arc::new(UserTable::new("ada", "irrelevant"));
    let service = password_service(users.clone(), hasher);

    // no credentials on any surface, wrong path for the form strategy
    let request = Request::builder().path("/login").build();

    let err = service.authenticate(&request).await.unwrap_err();
    assert!(matches!(err, Error::AuthenticationRequired { .. }));
    assert_eq!(users.calls(), 0);
}

#[tokio::test]
async fn wrong_password_is_identity_not_found_with_challenge() {
    init_tracing();
    let hasher = test_hasher();
    let hash = hasher.hash("s3cret").unwrap();
    let users = Arc::new(UserTable::new("ada", &hash));
    let service = password_service(users.clone(), hasher);

    let request = Request::builder()
        .path("/login")
        .body_field("username", "ada")
        .body_field("password", "wrong")
        .build();

    // the form strategy fails, basic has no credentials, so the challenge fires
    let err = service.authenticate(&request).await.unwrap_err();
    match err {
        Error::AuthenticationRequired {
            www_authenticate,
            result,
        } => {
            assert_eq!(www_authenticate, "Basic realm=\"app\"");
            // the last strategy's verdict travels with the challenge
            assert_eq!(result.status(), Status::IdentityNotFound);
        }
        other => panic!("expected challenge, got {other:?}"),
    }
    assert_eq!(users.calls(), 1);
}

#[tokio::test]
async fn persisted_session_resumes_without_credentials() {
    init_tracing();
    let hasher = test_hasher();
    let hash = hasher.hash("s3cret").unwrap();
    let users = Arc::new(UserTable::new("ada", &hash));
    let storage = Arc::new(SessionStorage::new(MemorySession::new()));

    let service = AuthenticationService::builder()
        .identifier(
            "password",
            Arc::new(PasswordIdentifier::new(users.clone(), hasher)),
        )
        .authenticator(
            "session",
            Arc::new(SessionAuthenticator::new(storage.clone())),
        )
        .authenticator("form", Arc::new(FormAuthenticator::new().login_url("/login")))
        .build()
        .unwrap();

    let login = Request::builder()
        .path("/login")
        .body_field("username", "ada")
        .body_field("password", "s3cret")
        .build();
    let result = service.authenticate(&login).await.unwrap();
    assert!(result.is_valid());
    service.persist(storage.as_ref(), &result).unwrap();
    let calls_after_login = users.calls();

    // the follow-up request carries no credentials at all
    let follow_up = Request::builder().path("/api/things").build();
    let resumed = service.authenticate(&follow_up).await.unwrap();
    assert!(resumed.is_valid());
    assert_eq!(resumed.identity().unwrap().get_str("username"), Some("ada"));
    assert_eq!(users.calls(), calls_after_login);

    // logout closes the loop
    service.clear(storage.as_ref()).unwrap();
    let after_logout = service.authenticate(&follow_up).await.unwrap();
    assert!(!after_logout.is_valid());
}

#[tokio::test]
async fn faulty_backend_does_not_stop_the_chain() {
    init_tracing();

    struct Faulty;

    #[async_trait]
    impl Identifier for Faulty {
        async fn identify(
            &self,
            _credentials: &Credentials,
        ) -> vestibule::Result<Option<Identified>> {
            Err(Error::Resolver("connection refused".to_string()))
        }
    }

    let hasher = test_hasher();
    let hash = hasher.hash("s3cret").unwrap();
    let users = Arc::new(UserTable::new("ada", &hash));

    let service = AuthenticationService::builder()
        .identifier("ldap", Arc::new(Faulty))
        .identifier("orm", Arc::new(PasswordIdentifier::new(users, hasher)))
        .authenticator("form", Arc::new(FormAuthenticator::new()))
        .build()
        .unwrap();

    let request = Request::builder()
        .body_field("username", "ada")
        .body_field("password", "s3cret")
        .build();

    let result = service.authenticate(&request).await.unwrap();
    assert!(result.is_valid());
}

#[tokio::test]
async fn diagnostics_from_faulty_backends_surface_on_failure() {
    init_tracing();

    struct Faulty;

    #[async_trait]
    impl Identifier for Faulty {
        async fn identify(
            &self,
            _credentials: &Credentials,
        ) -> vestibule::Result<Option<Identified>> {
            Err(Error::Resolver("connection refused".to_string()))
        }
    }

    let service = AuthenticationService::builder()
        .identifier("ldap", Arc::new(Faulty))
        .authenticator("form", Arc::new(FormAuthenticator::new()))
        .build()
        .unwrap();

    let request = Request::builder()
        .body_field("username", "ada")
        .body_field("password", "s3cret")
        .build();

    let result = service.authenticate(&request).await.unwrap();
    assert_eq!(result.status(), Status::IdentityNotFound);
    assert_eq!(result.errors().len(), 1);
    assert!(result.errors()[0].contains("connection refused"));
}
