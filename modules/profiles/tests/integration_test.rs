use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveTime;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tower::ServiceExt;

use modkit::{AuthSubject, OpenApiRegistry};
use profiles::{
    api::rest::{dto::ProfileDto, routes},
    contract::{
        client::ProfilesApi,
        error::ProfilesError,
        model::{ClassSchedule, ProfilePatch},
    },
    domain::{
        error::DomainError,
        repo::ProfilesRepository,
        service::{Service, ServiceConfig},
    },
    gateways::local::ProfilesLocalClient,
    infra::storage::{migrations::Migrator, InMemoryProfilesRepository, SeaOrmProfilesRepository},
};

async fn create_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to test database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

fn memory_service() -> Arc<Service> {
    Arc::new(Service::new(
        Arc::new(InMemoryProfilesRepository::new()),
        ServiceConfig::default(),
    ))
}

async fn sqlite_service() -> Arc<Service> {
    let repo: Arc<dyn ProfilesRepository> =
        Arc::new(SeaOrmProfilesRepository::new(create_test_db().await));
    Arc::new(Service::new(repo, ServiceConfig::default()))
}

fn subject(id: &str, email: &str) -> AuthSubject {
    AuthSubject::new(id, format!("User {id}"), email)
}

fn class(day: u8) -> ClassSchedule {
    ClassSchedule {
        id: "cs180".into(),
        name: "CS 180".into(),
        day_of_week: day,
        start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
        location: Some("LWSN".into()),
    }
}

struct NoopRegistry;

impl OpenApiRegistry for NoopRegistry {
    fn register_doc(&self, _doc: utoipa::openapi::OpenApi) {}

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

fn router(service: Arc<Service>) -> Router {
    routes::register_routes(Router::new(), &NoopRegistry, service).unwrap()
}

fn authed(method: &str, uri: &str, user: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-auth-subject", user)
        .header("x-auth-name", format!("User {user}"))
        .header("x-auth-email", format!("{user}@purdue.edu"));
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(resp: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn exercise_lifecycle(service: Arc<Service>) {
    let created = service
        .get_or_create(&subject("u1", "ada@purdue.edu"))
        .await
        .unwrap();
    assert_eq!(created.email, "ada@purdue.edu");
    assert!(created.schedule.is_empty());

    // Second access returns the stored profile untouched.
    let again = service
        .get_or_create(&subject("u1", "changed@purdue.edu"))
        .await
        .unwrap();
    assert_eq!(again.email, "ada@purdue.edu");
    assert_eq!(again.created_at, created.created_at);

    let updated = service
        .update(
            "u1",
            ProfilePatch {
                interests: Some(vec!["chess".into(), "hiking".into()]),
                schedule: Some(vec![class(1)]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "User u1");
    assert_eq!(updated.interests, vec!["chess", "hiking"]);
    assert_eq!(updated.schedule, vec![class(1)]);

    let reloaded = service.get("u1").await.unwrap();
    assert_eq!(reloaded, updated);
}

#[tokio::test]
async fn profile_lifecycle_in_memory() {
    exercise_lifecycle(memory_service()).await;
}

#[tokio::test]
async fn profile_lifecycle_sqlite() {
    exercise_lifecycle(sqlite_service().await).await;
}

#[tokio::test]
async fn update_rejects_out_of_range_weekday_before_lookup() {
    let service = memory_service();
    let err = service
        .update(
            "missing",
            ProfilePatch {
                schedule: Some(vec![class(1), class(7)]),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidWeekday { index: 1, value: 7 }));
}

#[tokio::test]
async fn update_unknown_profile_is_not_found() {
    let err = memory_service()
        .update("ghost", ProfilePatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ProfileNotFound { .. }));
}

#[tokio::test]
async fn buddies_are_added_by_email_case_insensitively() {
    let service = sqlite_service().await;
    service
        .get_or_create(&subject("u1", "ada@purdue.edu"))
        .await
        .unwrap();
    service
        .get_or_create(&subject("u2", "Grace@Purdue.edu"))
        .await
        .unwrap();

    let p = service
        .add_buddy_by_email("u1", " grace@purdue.edu ")
        .await
        .unwrap();
    assert_eq!(p.buddies, vec!["u2"]);
    // Only the caller's list changes; the buddy's profile is not written.
    let grace = service.get("u2").await.unwrap();
    assert!(grace.buddies.is_empty());
    assert_eq!(grace.updated_at, grace.created_at);

    // Repeating the add and adding oneself are no-ops.
    let p = service
        .add_buddy_by_email("u1", "grace@purdue.edu")
        .await
        .unwrap();
    assert_eq!(p.buddies, vec!["u2"]);
    let p = service
        .add_buddy_by_email("u1", "ada@purdue.edu")
        .await
        .unwrap();
    assert_eq!(p.buddies, vec!["u2"]);

    let err = service
        .add_buddy_by_email("u1", "nobody@purdue.edu")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::BuddyNotFound { .. }));

    let p = service.remove_buddy("u1", "u2").await.unwrap();
    assert!(p.buddies.is_empty());
}

#[tokio::test]
async fn directory_is_ordered_and_capped() {
    let service = Arc::new(Service::new(
        Arc::new(InMemoryProfilesRepository::new()),
        ServiceConfig { directory_limit: 2 },
    ));
    for id in ["a", "b", "c"] {
        service
            .get_or_create(&subject(id, &format!("{id}@purdue.edu")))
            .await
            .unwrap();
    }
    let users = service.list_users().await.unwrap();
    let ids: Vec<&str> = users.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[tokio::test]
async fn local_client_maps_errors_to_contract() {
    let client: Arc<dyn ProfilesApi> = Arc::new(ProfilesLocalClient::new(memory_service()));
    let err = client.get_profile("ghost").await.unwrap_err();
    assert_eq!(err, ProfilesError::not_found("ghost"));

    let p = client
        .get_or_create(&subject("u1", "ada@purdue.edu"))
        .await
        .unwrap();
    assert_eq!(client.get_profile("u1").await.unwrap(), p);
}

#[tokio::test]
async fn rest_profile_requires_identity() {
    let resp = router(memory_service())
        .oneshot(Request::get("/profile").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        resp.headers()["content-type"],
        "application/problem+json"
    );
}

#[tokio::test]
async fn rest_get_then_update_profile() {
    let app = router(memory_service());

    let resp = app
        .clone()
        .oneshot(authed("GET", "/profile", "u1", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let dto: ProfileDto = serde_json::from_value(json_body(resp).await).unwrap();
    assert_eq!(dto.email, "u1@purdue.edu");

    let resp = app
        .clone()
        .oneshot(authed(
            "PUT",
            "/profile",
            "u1",
            Some(serde_json::json!({
                "majors": ["Computer Science"],
                "schedule": [{
                    "id": "c1",
                    "name": "MA 261",
                    "day_of_week": 3,
                    "start_time": "13:30",
                    "end_time": "14:20"
                }]
            })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["majors"][0], "Computer Science");
    assert_eq!(body["schedule"][0]["start_time"], "13:30");
}

#[tokio::test]
async fn rest_invalid_weekday_is_problem_with_pointer() {
    let app = router(memory_service());
    app.clone()
        .oneshot(authed("GET", "/profile", "u1", None))
        .await
        .unwrap();

    let resp = app
        .oneshot(authed(
            "PUT",
            "/profile",
            "u1",
            Some(serde_json::json!({
                "schedule": [{
                    "id": "c1",
                    "name": "Lab",
                    "day_of_week": 9,
                    "start_time": "08:00",
                    "end_time": "09:00"
                }]
            })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert_eq!(body["code"], "PROFILES_VALIDATION");
    assert_eq!(body["instance"], "/profile");
    assert_eq!(body["errors"][0]["pointer"], "/schedule/0/day_of_week");
}

#[tokio::test]
async fn rest_buddies_and_directory() {
    let app = router(memory_service());
    for user in ["u1", "u2"] {
        app.clone()
            .oneshot(authed("GET", "/profile", user, None))
            .await
            .unwrap();
    }

    let resp = app
        .clone()
        .oneshot(authed(
            "POST",
            "/profile/buddies",
            "u1",
            Some(serde_json::json!({ "email": "u2@purdue.edu" })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["buddies"][0], "u2");

    let resp = app
        .clone()
        .oneshot(authed(
            "POST",
            "/profile/buddies",
            "u1",
            Some(serde_json::json!({ "email": "nobody@purdue.edu" })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(resp).await["code"], "PROFILES_BUDDY_NOT_FOUND");

    let resp = app
        .clone()
        .oneshot(authed("DELETE", "/profile/buddies/u2", "u1", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["buddies"], serde_json::json!([]));

    let resp = app
        .oneshot(authed("GET", "/users", "u1", None))
        .await
        .unwrap();
    let body = json_body(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}
