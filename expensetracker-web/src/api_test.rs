//! Tests for the API client against an in-process mock backend.
//!
//! The mock speaks the same routes and JSON shapes as the real service and
//! only accepts `Bearer tok-alice`.

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::{Arc, Mutex};

    use axum::{
        Json, Router,
        extract::{Path, State},
        http::{HeaderMap, StatusCode, header::AUTHORIZATION},
        response::{IntoResponse, Response},
        routing::{delete, get, post, put},
    };
    use shared::editor::{Submission, TransactionEditor};
    use shared::models::{
        LoginRequest, NewTransaction, RegisterRequest, Transaction, TransactionUpdate,
    };
    use shared::validation::{Field, TransactionDraft};
    use yew::Callback;
    use yewdux::{Context, Dispatch};

    use crate::api::{ApiError, ExpenseClient};
    use crate::config::ClientConfig;
    use crate::session::{MemoryStorage, SessionStorage, SessionStore, TOKEN_KEY};

    const VALID_TOKEN: &str = "tok-alice";

    #[derive(Clone, Default)]
    struct Backend {
        transactions: Arc<Mutex<Vec<Transaction>>>,
        next_id: Arc<Mutex<i64>>,
        expire_sessions: Arc<Mutex<bool>>,
        requests: Arc<Mutex<Vec<SeenRequest>>>,
    }

    /// Route and `Authorization` header of a request the backend received.
    #[derive(Debug, Clone, PartialEq)]
    struct SeenRequest {
        route: &'static str,
        authorization: Option<String>,
    }

    impl Backend {
        fn record(&self, route: &'static str, headers: &HeaderMap) {
            let authorization = headers
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            self.requests.lock().unwrap().push(SeenRequest {
                route,
                authorization,
            });
        }

        fn requests(&self) -> Vec<SeenRequest> {
            self.requests.lock().unwrap().clone()
        }

        fn last_request(&self, route: &str) -> Option<SeenRequest> {
            self.requests()
                .into_iter()
                .rev()
                .find(|seen| seen.route == route)
        }

        fn authorized(&self, headers: &HeaderMap) -> bool {
            let bearer = format!("Bearer {VALID_TOKEN}");
            !*self.expire_sessions.lock().unwrap()
                && headers
                    .get(AUTHORIZATION)
                    .and_then(|value| value.to_str().ok())
                    == Some(bearer.as_str())
        }

        fn expire(&self) {
            *self.expire_sessions.lock().unwrap() = true;
        }

        fn len(&self) -> usize {
            self.transactions.lock().unwrap().len()
        }
    }

    fn unauthorized() -> Response {
        (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
    }

    async fn login(
        State(backend): State<Backend>,
        headers: HeaderMap,
        Json(request): Json<LoginRequest>,
    ) -> Response {
        backend.record("login", &headers);
        if request.password == "secret1" {
            Json(serde_json::json!({"token": VALID_TOKEN, "username": request.username}))
                .into_response()
        } else {
            (StatusCode::UNAUTHORIZED, "Invalid username or password").into_response()
        }
    }

    async fn register(
        State(backend): State<Backend>,
        headers: HeaderMap,
        Json(request): Json<RegisterRequest>,
    ) -> Response {
        backend.record("register", &headers);
        if request.username == "taken" {
            (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({"status": 400, "message": "Username already exists"})),
            )
                .into_response()
        } else {
            "User registered successfully".into_response()
        }
    }

    async fn list(State(backend): State<Backend>, headers: HeaderMap) -> Response {
        backend.record("list", &headers);
        if !backend.authorized(&headers) {
            return unauthorized();
        }
        Json(backend.transactions.lock().unwrap().clone()).into_response()
    }

    async fn create(
        State(backend): State<Backend>,
        headers: HeaderMap,
        Json(body): Json<NewTransaction>,
    ) -> Response {
        backend.record("create", &headers);
        if !backend.authorized(&headers) {
            return unauthorized();
        }
        let id = {
            let mut next = backend.next_id.lock().unwrap();
            *next += 1;
            *next
        };
        let created = Transaction {
            id,
            user_id: 1,
            name: body.name,
            description: body.description,
            amount: body.amount,
            currency: body.currency,
            is_expense: body.is_expense,
        };
        backend.transactions.lock().unwrap().push(created.clone());
        Json(created).into_response()
    }

    async fn update(
        State(backend): State<Backend>,
        headers: HeaderMap,
        Path(id): Path<i64>,
        Json(body): Json<TransactionUpdate>,
    ) -> Response {
        backend.record("update", &headers);
        if !backend.authorized(&headers) {
            return unauthorized();
        }
        let mut transactions = backend.transactions.lock().unwrap();
        let Some(existing) = transactions.iter_mut().find(|t| t.id == id) else {
            return (StatusCode::NOT_FOUND, "Expense not found").into_response();
        };
        existing.name = body.name;
        existing.description = body.description;
        existing.amount = body.amount;
        existing.currency = body.currency;
        existing.is_expense = body.is_expense;
        StatusCode::OK.into_response()
    }

    async fn remove(
        State(backend): State<Backend>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Response {
        backend.record("delete", &headers);
        if !backend.authorized(&headers) {
            return unauthorized();
        }
        backend.transactions.lock().unwrap().retain(|t| t.id != id);
        StatusCode::NO_CONTENT.into_response()
    }

    async fn spawn_backend() -> (String, Backend) {
        let backend = Backend::default();
        let app = Router::new()
            .route("/api/users/login", post(login))
            .route("/api/users/register", post(register))
            .route("/api/expense/all", get(list))
            .route("/api/expense/create", post(create))
            .route("/api/expense/update/{id}", put(update))
            .route("/api/expense/delete/{id}", delete(remove))
            .with_state(backend.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}/api/"), backend)
    }

    struct Harness {
        client: ExpenseClient,
        storage: Rc<MemoryStorage>,
        redirected: Rc<Cell<u32>>,
        backend: Backend,
    }

    async fn harness() -> Harness {
        let (base_url, backend) = spawn_backend().await;
        let storage = Rc::new(MemoryStorage::new());
        let cx = Context::new();
        let session = SessionStore::new(Dispatch::new(&cx), storage.clone());
        let redirected = Rc::new(Cell::new(0));
        let on_unauthorized = {
            let redirected = redirected.clone();
            Callback::from(move |()| redirected.set(redirected.get() + 1))
        };
        let config = ClientConfig {
            api_base_url: base_url,
        };
        Harness {
            client: ExpenseClient::new(&config, session, on_unauthorized),
            storage,
            redirected,
            backend,
        }
    }

    async fn logged_in() -> Harness {
        let harness = harness().await;
        harness
            .client
            .login(&LoginRequest {
                username: "alice".into(),
                password: "secret1".into(),
            })
            .await
            .unwrap();
        harness
    }

    fn draft(name: &str, amount: &str, is_expense: bool) -> TransactionDraft {
        TransactionDraft {
            name: name.into(),
            description: format!("{name} description"),
            amount: amount.into(),
            is_expense,
        }
    }

    #[tokio::test]
    async fn test_login_starts_session() {
        let harness = logged_in().await;
        let session = harness.client.session().session().unwrap();
        assert_eq!(session.token, VALID_TOKEN);
        assert_eq!(session.username, "alice");
        assert_eq!(harness.storage.read(TOKEN_KEY).as_deref(), Some(VALID_TOKEN));
    }

    #[tokio::test]
    async fn test_failed_login_reports_server_message_without_redirect() {
        let harness = harness().await;
        let err = harness
            .client
            .login(&LoginRequest {
                username: "alice".into(),
                password: "wrong-password".into(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(reqwest::StatusCode::UNAUTHORIZED));
        assert_eq!(
            err.user_message("Failed to login"),
            "Invalid username or password"
        );
        assert_eq!(harness.redirected.get(), 0);
        assert!(!harness.client.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_register_returns_backend_text() {
        let harness = harness().await;
        let request = RegisterRequest {
            username: "bob".into(),
            email: "bob@example.com".into(),
            password: "secret1".into(),
        };
        let body = harness.client.register(&request).await.unwrap();
        assert_eq!(body, "User registered successfully");
        assert!(!harness.client.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_register_conflict_surfaces_json_message() {
        let harness = harness().await;
        let request = RegisterRequest {
            username: "taken".into(),
            email: "taken@example.com".into(),
            password: "secret1".into(),
        };
        let err = harness.client.register(&request).await.unwrap_err();
        assert_eq!(
            err.user_message("An error occurred during registration"),
            "Username already exists"
        );
    }

    #[tokio::test]
    async fn test_create_then_refetch_grows_list_by_one() {
        let harness = logged_in().await;
        let before = harness.client.list_transactions().await.unwrap();
        assert!(before.is_empty());

        let mut editor = TransactionEditor::new();
        editor.open_create().unwrap();
        editor.update_draft(draft("Salary", "2500", false)).unwrap();
        let submission = editor.submit().unwrap();
        harness.client.submit(&submission).await.unwrap();
        editor.submit_succeeded().unwrap();

        let after = harness.client.list_transactions().await.unwrap();
        assert_eq!(after.len(), before.len() + 1);
        let created = after.last().unwrap();
        assert_eq!(created.name, "Salary");
        assert_eq!(created.description, "Salary description");
        assert!((created.amount - 2500.0).abs() < f64::EPSILON);
        assert!(!created.is_expense);
        assert_eq!(created.currency, "USD");
    }

    #[tokio::test]
    async fn test_update_changes_refetched_record() {
        let harness = logged_in().await;
        let Submission::Create(body) = ({
            let mut editor = TransactionEditor::new();
            editor.open_create().unwrap();
            editor.update_draft(draft("Rent", "1000", true)).unwrap();
            editor.submit().unwrap()
        }) else {
            panic!("expected a create submission");
        };
        harness.client.create_transaction(&body).await.unwrap();
        let existing = harness.client.list_transactions().await.unwrap().remove(0);

        let mut editor = TransactionEditor::new();
        editor.open_edit(&existing).unwrap();
        editor.update_draft(draft("Rent", "1100", true)).unwrap();
        let submission = editor.submit().unwrap();
        assert!(matches!(submission, Submission::Update(id, _) if id == existing.id));
        harness.client.submit(&submission).await.unwrap();

        let refetched = harness.client.list_transactions().await.unwrap();
        assert_eq!(refetched.len(), 1);
        assert!((refetched[0].amount - 1100.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_delete_removes_id_from_refetched_list() {
        let harness = logged_in().await;
        for (name, amount) in [("Coffee", "3.5"), ("Lunch", "12")] {
            let input = draft(name, amount, true).validate().unwrap();
            harness
                .client
                .create_transaction(&NewTransaction::from(input))
                .await
                .unwrap();
        }
        let listed = harness.client.list_transactions().await.unwrap();
        let doomed = listed[0].clone();

        let mut editor = TransactionEditor::new();
        editor.request_delete(&doomed).unwrap();
        let id = editor.confirm_delete().unwrap();
        harness.client.delete_transaction(id).await.unwrap();
        editor.delete_finished().unwrap();

        let refetched = harness.client.list_transactions().await.unwrap();
        assert_eq!(refetched.len(), 1);
        assert!(refetched.iter().all(|t| t.id != doomed.id));
        assert_eq!(harness.backend.len(), 1);
    }

    #[tokio::test]
    async fn test_unauthorized_clears_session_and_redirects() {
        let harness = logged_in().await;
        harness.backend.expire();

        let err = harness.client.list_transactions().await.unwrap_err();

        assert!(matches!(err, ApiError::Unauthorized));
        assert!(!harness.client.session().is_authenticated());
        assert_eq!(harness.storage.read(TOKEN_KEY), None);
        assert_eq!(harness.redirected.get(), 1);
    }

    #[tokio::test]
    async fn test_request_without_session_is_rejected() {
        let harness = harness().await;
        let err = harness.client.list_transactions().await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
        assert_eq!(harness.redirected.get(), 1);
    }

    #[tokio::test]
    async fn test_missing_record_propagates_status() {
        let harness = logged_in().await;
        let input = draft("Ghost", "1", true).validate().unwrap();
        let err = harness
            .client
            .update_transaction(404, &TransactionUpdate::from(input))
            .await
            .unwrap_err();

        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
                assert_eq!(message, "Expense not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(harness.client.session().is_authenticated());
        assert_eq!(harness.redirected.get(), 0);
    }

    #[tokio::test]
    async fn test_network_failure_propagates() {
        let storage = Rc::new(MemoryStorage::new());
        let cx = Context::new();
        let session = SessionStore::new(Dispatch::new(&cx), storage);
        let config = ClientConfig {
            api_base_url: "http://127.0.0.1:9/api".into(),
        };
        let client = ExpenseClient::new(&config, session, Callback::noop());

        let err = client.list_transactions().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[tokio::test]
    async fn test_invalid_amount_issues_no_request() {
        let harness = logged_in().await;
        let seen_before = harness.backend.requests().len();

        for amount in ["0", "-5", "abc"] {
            let mut editor = TransactionEditor::new();
            editor.open_create().unwrap();
            editor.update_draft(draft("Broken", amount, true)).unwrap();
            if let Ok(submission) = editor.submit() {
                harness.client.submit(&submission).await.unwrap();
            }
            assert!(editor.errors().is_some_and(|errors| errors.contains(Field::Amount)));
        }

        assert_eq!(harness.backend.requests().len(), seen_before);
        assert_eq!(harness.backend.len(), 0);
    }

    #[tokio::test]
    async fn test_auth_calls_never_carry_the_session() {
        let harness = logged_in().await;
        assert!(harness.client.session().is_authenticated());

        harness
            .client
            .register(&RegisterRequest {
                username: "bob".into(),
                email: "bob@example.com".into(),
                password: "secret1".into(),
            })
            .await
            .unwrap();
        harness
            .client
            .login(&LoginRequest {
                username: "alice".into(),
                password: "secret1".into(),
            })
            .await
            .unwrap();

        let register = harness.backend.last_request("register").unwrap();
        assert_eq!(register.authorization, None);
        let requests = harness.backend.requests();
        let logins: Vec<_> = requests.iter().filter(|seen| seen.route == "login").collect();
        assert_eq!(logins.len(), 2);
        assert!(logins.iter().all(|seen| seen.authorization.is_none()));
    }

    #[tokio::test]
    async fn test_session_calls_carry_bearer_token() {
        let harness = logged_in().await;
        harness.client.list_transactions().await.unwrap();

        let list = harness.backend.last_request("list").unwrap();
        assert_eq!(
            list.authorization.as_deref(),
            Some(format!("Bearer {VALID_TOKEN}").as_str())
        );
    }
}
