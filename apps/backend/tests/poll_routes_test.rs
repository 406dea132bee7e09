mod common;
use common::assert_problem_details_structure;

use actix_web::{test, web, App};
use backend::routes;
use backend::services::estimation;
use backend::{AppState, RequestTrace};
use serde_json::{json, Value};
use uuid::Uuid;

fn test_state() -> (AppState, web::Data<AppState>) {
    let state = AppState::new();
    let data = web::Data::new(state.clone());
    (state, data)
}

#[actix_web::test]
async fn get_task_defaults_to_the_empty_round() {
    let (_state, data) = test_state();
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(data)
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/getTask").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"question": "", "isClosed": false}));
}

#[actix_web::test]
async fn get_task_reflects_the_active_round() {
    let (state, data) = test_state();
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(data)
            .configure(routes::configure),
    )
    .await;

    estimation::start_round(&state, "Story-12");

    let req = test::TestRequest::get().uri("/getTask").to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body, json!({"question": "Story-12", "isClosed": false}));

    estimation::close_round(&state);

    let req = test::TestRequest::get().uri("/getTask").to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body, json!({"question": "Story-12", "isClosed": true}));
}

#[actix_web::test]
async fn get_estimations_without_a_seated_host_is_forbidden() {
    let (_state, data) = test_state();
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(data)
            .configure(routes::configure),
    )
    .await;

    // No hostId at all
    let req = test::TestRequest::get().uri("/getEstimations").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 403, "FORBIDDEN").await;

    // Empty hostId matches nothing while unseated
    let req = test::TestRequest::get()
        .uri("/getEstimations?hostId=")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 403, "FORBIDDEN").await;
}

#[actix_web::test]
async fn get_estimations_requires_the_matching_host_id() {
    let (state, data) = test_state();
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(data)
            .configure(routes::configure),
    )
    .await;

    estimation::claim_host(&state, Uuid::new_v4(), "host-42").unwrap();
    estimation::start_round(&state, "Story-12");
    estimation::add_estimation(&state, "Alice", 5.0);
    estimation::add_estimation(&state, "Bob", 3.0);

    let req = test::TestRequest::get()
        .uri("/getEstimations?hostId=wrong")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 403, "FORBIDDEN").await;

    let req = test::TestRequest::get()
        .uri("/getEstimations?hostId=host-42")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"Alice": 5.0, "Bob": 3.0}));
}

#[actix_web::test]
async fn polling_survives_a_full_round_lifecycle() {
    let (state, data) = test_state();
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(data)
            .configure(routes::configure),
    )
    .await;

    estimation::claim_host(&state, Uuid::new_v4(), "host-42").unwrap();
    estimation::start_round(&state, "Story-12");
    estimation::add_estimation(&state, "Alice", 5.0);
    estimation::close_round(&state);
    // Discarded: the round is closed
    estimation::add_estimation(&state, "Bob", 3.0);

    let req = test::TestRequest::get()
        .uri("/getEstimations?hostId=host-42")
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body, json!({"Alice": 5.0}));

    estimation::clear_round(&state);

    let req = test::TestRequest::get()
        .uri("/getEstimations?hostId=host-42")
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body, json!({}));

    let req = test::TestRequest::get().uri("/getTask").to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body, json!({"question": "", "isClosed": false}));
}
