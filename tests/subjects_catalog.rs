use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::json;

use attendanced::config::Subject;
use attendanced::db;
use attendanced::http::{self, AppState};

fn test_state() -> web::Data<AppState> {
    let conn = db::open_in_memory().expect("open in-memory db");
    let catalog = vec![
        Subject {
            id: "path_theory".to_string(),
            name: "PATHOLOGY/THEORY".to_string(),
        },
        Subject {
            id: "micro_theory".to_string(),
            name: "MICROBIOLOGY/THEORY".to_string(),
        },
        Subject {
            id: "skill_lab".to_string(),
            name: "Skill Lab".to_string(),
        },
    ];
    web::Data::new(AppState::new(conn, catalog))
}

#[actix_web::test]
async fn subjects_are_served_in_configured_order() {
    let app = test::init_service(App::new().app_data(test_state()).configure(http::configure)).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/subjects").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let subjects: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        subjects,
        json!([
            { "id": "path_theory", "name": "PATHOLOGY/THEORY" },
            { "id": "micro_theory", "name": "MICROBIOLOGY/THEORY" },
            { "id": "skill_lab", "name": "Skill Lab" }
        ])
    );
}
