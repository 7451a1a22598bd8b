//! End-to-end tests over the assembled router: lazy feature modules, entity
//! CRUD flows, alert headers, authentication and the navigation listing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use bank_api::config::{Account, AppConfig};
use bank_api::routing::{entity_routes, EntityRoute, FeatureModule, LoadError, RouteTable};
use bank_api::state::AppState;
use bank_api::{app, app_with_routes};
use bank_core::Authority;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

// -- Helpers -------------------------------------------------------------

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn merge_patch(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("PATCH")
        .uri(uri)
        .header("content-type", "application/merge-patch+json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn with_token(mut request: Request<Body>, token: &str) -> Request<Body> {
    request.headers_mut().insert(
        "authorization",
        format!("Bearer {token}").parse().unwrap(),
    );
    request
}

async fn body_json(resp: Response) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn header<'a>(resp: &'a Response, name: &str) -> &'a str {
    resp.headers()
        .get(name)
        .unwrap_or_else(|| panic!("missing header {name}"))
        .to_str()
        .unwrap()
}

fn secured_config() -> AppConfig {
    AppConfig {
        accounts: vec![
            Account {
                token: "t-admin".to_string(),
                login: "admin".to_string(),
                authorities: vec![Authority::Admin, Authority::User],
            },
            Account {
                token: "t-advisor".to_string(),
                login: "advisor1".to_string(),
                authorities: vec![Authority::User, Authority::Advisor],
            },
            Account {
                token: "t-manager".to_string(),
                login: "manager1".to_string(),
                authorities: vec![Authority::User, Authority::Manager],
            },
        ],
        ..AppConfig::default()
    }
}

// -- Entity flows ----------------------------------------------------------

#[tokio::test]
async fn advisor_crud_flow() {
    let app = app(AppState::new()).unwrap();

    let resp = send(
        &app,
        json_request(
            "POST",
            "/api/advisor",
            json!({
                "gender": "FEMALE",
                "telephone": "0607080910",
                "user": {"id": 3, "login": "advisor1"},
                "agency": null,
            }),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(header(&resp, "location"), "/api/advisor/1");
    assert_eq!(
        header(&resp, "x-bankadviceapp-alert"),
        "bankAdviceApp.advisor.created"
    );
    assert_eq!(header(&resp, "x-bankadviceapp-params"), "1");
    let created = body_json(resp).await;
    assert_eq!(created["id"], 1);
    assert_eq!(created["gender"], "FEMALE");
    assert!(created["agency"].is_null());
    assert!(created.get("appointments").is_none());

    let resp = send(&app, get("/api/advisor/1")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["telephone"], "0607080910");

    let resp = send(
        &app,
        json_request(
            "PUT",
            "/api/advisor/1",
            json!({"id": 1, "telephone": "0102030405", "user": {"login": "advisor1"}}),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        header(&resp, "x-bankadviceapp-alert"),
        "bankAdviceApp.advisor.updated"
    );
    let updated = body_json(resp).await;
    assert_eq!(updated["telephone"], "0102030405");
    assert!(updated.get("gender").is_none());

    let resp = send(&app, Request::delete("/api/advisor/1").body(Body::empty()).unwrap()).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        header(&resp, "x-bankadviceapp-alert"),
        "bankAdviceApp.advisor.deleted"
    );

    let resp = send(&app, get("/api/advisor/1")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_is_ordered_by_id() {
    let app = app(AppState::new()).unwrap();
    for name in ["Plateau", "Almadies", "Medina"] {
        let resp = send(&app, json_request("POST", "/api/agency", json!({"name": name}))).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }
    let resp = send(&app, get("/api/agency")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let agencies = body_json(resp).await;
    let ids: Vec<i64> = agencies
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(agencies[1]["name"], "Almadies");
}

#[tokio::test]
async fn identifier_rules_raise_bad_request_alerts() {
    let app = app(AppState::new()).unwrap();
    send(&app, json_request("POST", "/api/enterprise", json!({"name": "Baamtu"}))).await;

    let cases = [
        ("POST", "/api/enterprise", json!({"id": 4, "name": "X"}), "idexists"),
        ("PUT", "/api/enterprise/1", json!({"name": "X"}), "idnull"),
        ("PUT", "/api/enterprise/1", json!({"id": 2, "name": "X"}), "idinvalid"),
        ("PUT", "/api/enterprise/9", json!({"id": 9, "name": "X"}), "idnotfound"),
    ];
    for (method, uri, body, key) in cases {
        let resp = send(&app, json_request(method, uri, body)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{method} {uri}");
        assert_eq!(header(&resp, "x-bankadviceapp-error"), format!("error.{key}"));
        assert_eq!(header(&resp, "x-bankadviceapp-params"), "enterprise");
        let body = body_json(resp).await;
        assert_eq!(body["error"]["details"]["errorKey"], key);
    }
}

#[tokio::test]
async fn missing_required_field_is_422() {
    let app = app(AppState::new()).unwrap();
    let resp = send(
        &app,
        json_request("POST", "/api/advisor", json!({"user": {"login": "advisor1"}})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unknown_gender_is_422() {
    let app = app(AppState::new()).unwrap();
    let resp = send(
        &app,
        json_request(
            "POST",
            "/api/manager",
            json!({"telephone": "0102030405", "gender": "UNKNOWN", "user": {"login": "m1"}}),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(resp).await;
    let message = body["error"]["message"].as_str().unwrap();
    assert!(message.contains("unknown gender"), "{message}");
}

#[tokio::test]
async fn merge_patch_updates_only_given_fields() {
    let app = app(AppState::new()).unwrap();
    send(
        &app,
        json_request(
            "POST",
            "/api/manager",
            json!({
                "gender": "MALE",
                "telephone": "0102030405",
                "user": {"login": "manager1"},
                "agency": {"id": 2, "name": "Plateau"},
            }),
        ),
    )
    .await;

    let resp = send(
        &app,
        merge_patch(
            "/api/manager/1",
            json!({"id": 1, "gender": null, "telephone": null, "appointments": []}),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        header(&resp, "x-bankadviceapp-alert"),
        "bankAdviceApp.manager.updated"
    );
    let manager = body_json(resp).await;
    assert!(manager["gender"].is_null());
    assert_eq!(manager["telephone"], "0102030405");
    assert_eq!(manager["agency"]["name"], "Plateau");
    assert_eq!(manager["appointments"], json!([]));

    let resp = send(&app, merge_patch("/api/manager/5", json!({"id": 5}))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(header(&resp, "x-bankadviceapp-error"), "error.idnotfound");

    let resp = send(&app, json_request("PATCH", "/api/manager/1", json!({"id": 1}))).await;
    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn appointments_by_advisor_and_manager() {
    let app = app(AppState::new()).unwrap();
    let advisor = json!({"id": 1, "telephone": "0102030405", "user": {"login": "advisor1"}});
    let manager = json!({"id": 2, "telephone": "0102030406", "user": {"login": "manager1"}});
    let bodies = [
        json!({"date": "2022-03-14T09:30:00Z", "reason": "Loan", "advisor": advisor, "manager": manager}),
        json!({"date": "2022-03-15T10:00:00Z", "reason": "Savings", "advisor": advisor}),
        json!({"date": "2022-03-16T11:00:00Z", "manager": manager}),
    ];
    for body in bodies {
        let resp = send(&app, json_request("POST", "/api/appointment", body)).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let by_advisor = body_json(send(&app, get("/api/appointment/advisor/1")).await).await;
    let ids: Vec<i64> = by_advisor
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2]);

    let by_manager = body_json(send(&app, get("/api/appointment/manager/2")).await).await;
    let ids: Vec<i64> = by_manager
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 3]);
}

// -- Authentication --------------------------------------------------------

#[tokio::test]
async fn auth_enabled_requires_bearer_token() {
    let app = app(AppState::with_config(secured_config())).unwrap();

    let resp = send(&app, get("/api/agency")).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = send(&app, with_token(get("/api/agency"), "wrong")).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = send(&app, with_token(get("/api/agency"), "t-admin")).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(&app, get("/health/liveness")).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn current_user_lookups() {
    let app = app(AppState::with_config(secured_config())).unwrap();
    let resp = send(
        &app,
        with_token(
            json_request(
                "POST",
                "/api/advisor",
                json!({"telephone": "0102030405", "user": {"login": "advisor1"}}),
            ),
            "t-admin",
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = send(&app, with_token(get("/api/advisor/user"), "t-advisor")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["user"]["login"], "advisor1");

    let resp = send(&app, with_token(get("/api/advisor/user"), "t-manager")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(&app, with_token(get("/api/manager/user"), "t-manager")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn current_user_lookup_with_auth_disabled() {
    let app = app(AppState::new()).unwrap();
    let resp = send(
        &app,
        json_request(
            "POST",
            "/api/advisor",
            json!({"telephone": "0102030405", "user": {"login": "system"}}),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = send(&app, get("/api/advisor/user")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["user"]["login"], "system");

    let resp = send(&app, get("/api/manager/user")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// -- Route composer --------------------------------------------------------

#[tokio::test]
async fn entity_routes_listing() {
    let app = app(AppState::new()).unwrap();
    let resp = send(&app, get("/api/entity-routes")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let routes = body_json(resp).await;
    let paths: Vec<&str> = routes
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["path"].as_str().unwrap())
        .collect();
    assert_eq!(
        paths,
        vec!["agency", "enterprise", "advisor", "manager", "appointment"]
    );
    assert_eq!(routes[2]["pageTitle"], "bankAdviceApp.advisor.home.title");
    assert_eq!(routes[2]["title"], "Advisors");
}

fn counting_table(counters: &[(&'static str, Arc<AtomicUsize>)]) -> RouteTable {
    RouteTable::new(counters.iter().map(|(segment, counter)| {
        let counter = counter.clone();
        let inner = entity_routes().unwrap();
        let segment = *segment;
        EntityRoute::entity(segment, move || {
            let counter = counter.clone();
            let route = inner.get(segment).cloned();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                match route {
                    Some(route) => route.load().await,
                    None => Err(LoadError {
                        segment: segment.to_string(),
                        reason: "not declared".to_string(),
                    }),
                }
            }
        })
    }))
    .unwrap()
}

#[tokio::test]
async fn navigation_loads_only_the_matching_module_once() {
    let counters: Vec<(&'static str, Arc<AtomicUsize>)> = ["agency", "advisor", "manager"]
        .into_iter()
        .map(|segment| (segment, Arc::new(AtomicUsize::new(0))))
        .collect();
    let app = app_with_routes(AppState::new(), counting_table(&counters));

    let resp = send(&app, get("/api/entity-routes")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(counters.iter().all(|(_, c)| c.load(Ordering::SeqCst) == 0));

    for _ in 0..3 {
        let resp = send(&app, get("/api/advisor")).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
    let loads: Vec<usize> = counters
        .iter()
        .map(|(_, c)| c.load(Ordering::SeqCst))
        .collect();
    assert_eq!(loads, vec![0, 1, 0]);

    let resp = send(&app, get("/api/loan")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let total: usize = counters.iter().map(|(_, c)| c.load(Ordering::SeqCst)).sum();
    assert_eq!(total, 1);
}

#[tokio::test]
async fn failed_module_load_is_503() {
    let table = RouteTable::new([EntityRoute::entity("agency", || async {
        Err::<FeatureModule, _>(LoadError {
            segment: "agency".to_string(),
            reason: "network error".to_string(),
        })
    })])
    .unwrap();
    let app = app_with_routes(AppState::new(), table);

    let resp = send(&app, get("/api/agency")).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(resp).await["error"]["code"], "SERVICE_UNAVAILABLE");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = app(AppState::new()).unwrap();
    let resp = send(&app, get("/api/openapi.json")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let doc = body_json(resp).await;
    assert!(doc["paths"]["/api/appointment/advisor/{advisor_id}"].is_object());
}
