// route-level tests driving the router with tower's oneshot

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use integration_testing::port_fakes::{
    contestant, event_id, interval_event, interval_format, make_core_with_fakes, raceclass,
};
use race_core::{Core, SpRaces};
use server::{AppState, build_router};
use std::sync::Arc;
use tower::ServiceExt;

fn app(core: Arc<Core>) -> Router {
    build_router(AppState { core })
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, "Bearer secret")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_ping_and_ready_answer_ok() {
    let (core, _store, _events, _auth) = make_core_with_fakes();
    let app = app(core);

    for uri in ["/ping", "/ready"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"OK");
    }
}

#[tokio::test]
async fn test_generate_raceplan_creates_and_links() {
    let (core, _store, events, _auth) = make_core_with_fakes();
    events.seed_event(interval_event());
    events.seed_format(interval_format());
    events.seed_raceclasses(vec![raceclass("G16", 1, 1, 16)]);
    let app = app(core);

    let response = app
        .clone()
        .oneshot(post_json(
            "/raceplans/generate-raceplan-for-event",
            serde_json::json!({ "event_id": event_id() }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get(header::LOCATION)
        .expect("201 must carry a Location header")
        .to_str()
        .unwrap()
        .to_string();
    assert!(location.starts_with("/raceplans/"));

    // the location resolves to the raceplan
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(&location)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let raceplan = body_json(response).await;
    assert_eq!(raceplan["event_id"], serde_json::json!(event_id()));

    // and the races reference it
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/races?eventId={}", event_id()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let races = body_json(response).await;
    assert_eq!(races.as_array().unwrap().len(), 1);
    assert_eq!(races[0]["raceplan_id"], raceplan["id"]);
    assert_eq!(races[0]["datatype"], "interval_start");
}

#[tokio::test]
async fn test_mutations_without_authorization_are_rejected() {
    let (core, _store, _events, auth) = make_core_with_fakes();
    auth.respond_with(401);
    let app = app(core);

    let response = app
        .oneshot(post_json(
            "/raceplans/generate-raceplan-for-event",
            serde_json::json!({ "event_id": event_id() }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_insufficient_role_yields_forbidden() {
    let (core, _store, _events, auth) = make_core_with_fakes();
    auth.respond_with(403);
    let app = app(core);

    let response = app
        .oneshot(post_json(
            "/startlists/generate-startlist-for-event",
            serde_json::json!({ "event_id": event_id() }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_raceplan_is_not_found() {
    let (core, _store, _events, _auth) = make_core_with_fakes();
    let app = app(core);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/raceplans/{}", uuid::Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_put_with_mismatched_id_is_unprocessable() {
    let (core, _store, events, _auth) = make_core_with_fakes();
    events.seed_event(interval_event());
    events.seed_format(interval_format());
    events.seed_raceclasses(vec![raceclass("G16", 1, 1, 16)]);
    let raceplan_id = core
        .generate_raceplan_for_event("token", event_id())
        .await
        .unwrap();
    let mut raceplan = core.get_raceplan(raceplan_id).await.unwrap();
    raceplan.id = uuid::Uuid::new_v4();
    let app = app(core);

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/raceplans/{raceplan_id}"))
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, "Bearer secret")
                .body(Body::from(serde_json::to_string(&raceplan).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_startlist_documents_cannot_be_put() {
    let (core, _store, _events, _auth) = make_core_with_fakes();
    let app = app(core);

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/startlists/{}", uuid::Uuid::new_v4()))
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, "Bearer secret")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_time_event_flow_over_http() {
    // Arrange a race with two starters through the commands
    let (core, store, events, auth) = make_core_with_fakes();
    events.seed_event(interval_event());
    events.seed_format(interval_format());
    events.seed_raceclasses(vec![raceclass("G16", 1, 1, 2)]);
    events.seed_contestants(vec![contestant(1, "G16 years"), contestant(2, "G16 years")]);
    core.generate_raceplan_for_event("token", event_id())
        .await
        .unwrap();
    core.generate_startlist_for_event("token", event_id())
        .await
        .unwrap();
    let races = store.get_races_by_event_id(event_id()).await.unwrap();
    let race_id = races[0].id();
    let app = app(core);

    let draft = serde_json::json!({
        "event_id": event_id(),
        "race_id": race_id,
        "bib": 1,
        "timing_point": "Finish",
        "registration_time": "12:00:01"
    });

    // first registration is created
    let response = app
        .clone()
        .oneshot(post_json("/time-events", draft.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(response.headers().contains_key(header::LOCATION));
    let created = body_json(response).await;
    assert_eq!(created["status"], "OK");
    assert_eq!(created["rank"], 1);
    // timing clients are allowed in with their own role
    assert!(
        auth.asked_roles()
            .last()
            .unwrap()
            .contains(&"timing-admin".to_string())
    );

    // repeating it verbatim is a duplicate
    let response = app
        .clone()
        .oneshot(post_json("/time-events", draft))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let problem = body_json(response).await;
    assert!(problem["detail"].as_str().unwrap().contains("duplicate"));

    // the race result still ranks exactly one finisher
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/races/{race_id}/race-results?timingPoint=Finish"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let results = body_json(response).await;
    assert_eq!(results[0]["no_of_contestants"], 1);
    assert_eq!(
        results[0]["ranking_sequence"].as_array().unwrap().len(),
        1
    );
}
