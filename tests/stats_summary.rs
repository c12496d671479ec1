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
            id: "pharm_theory".to_string(),
            name: "PHARMACOLOGY/THEORY".to_string(),
        },
        Subject {
            id: "pharm_prac".to_string(),
            name: "PHARMACOLOGY/PRACTICAL".to_string(),
        },
    ];
    web::Data::new(AppState::new(conn, catalog))
}

#[actix_web::test]
async fn stats_distinguish_monthly_from_cumulative() {
    let app = test::init_service(App::new().app_data(test_state()).configure(http::configure)).await;

    let seeds = [
        ("pharm_theory", "2024-01-01", "present"),
        ("pharm_theory", "2024-01-02", "absent"),
        ("pharm_theory", "2024-01-03", "abandoned"),
        ("pharm_theory", "2024-02-01", "present"),
        ("pharm_prac", "2024-01-01", "absent"),
    ];
    for (subject_id, date, status) in seeds {
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/attendance")
                .set_json(json!({
                    "subjectId": subject_id,
                    "subjectName": "PHARMACOLOGY",
                    "date": date,
                    "status": status
                }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED, "seed {} {}", subject_id, date);
    }

    // January only: abandoned counts toward total, so 1/3 -> 33%.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/attendance/stats?subject=pharm_theory&month=2024-01")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let monthly: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        monthly,
        json!({ "total": 3, "present": 1, "absent": 1, "percent": 33 })
    );

    // No month: cumulative across everything recorded for the subject.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/attendance/stats?subject=pharm_theory")
            .to_request(),
    )
    .await;
    let cumulative: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        cumulative,
        json!({ "total": 4, "present": 2, "absent": 1, "percent": 50 })
    );
}

#[actix_web::test]
async fn stats_for_an_unmarked_subject_are_all_zero() {
    let app = test::init_service(App::new().app_data(test_state()).configure(http::configure)).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/attendance/stats?subject=pharm_prac")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let stats: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        stats,
        json!({ "total": 0, "present": 0, "absent": 0, "percent": 0 })
    );
}
