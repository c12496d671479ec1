use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::json;

use attendanced::config::Subject;
use attendanced::db;
use attendanced::http::{self, AppState};

fn test_state() -> web::Data<AppState> {
    let conn = db::open_in_memory().expect("open in-memory db");
    let catalog = vec![Subject {
        id: "obg_clinic".to_string(),
        name: "OBG/CLINIC".to_string(),
    }];
    web::Data::new(AppState::new(conn, catalog))
}

#[actix_web::test]
async fn export_emits_one_row_per_day_with_blanks_for_gaps() {
    let app = test::init_service(App::new().app_data(test_state()).configure(http::configure)).await;

    for (date, status) in [
        ("2024-02-01", "present"),
        ("2024-02-14", "absent"),
        ("2024-02-29", "abandoned"),
    ] {
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/attendance")
                .set_json(json!({
                    "subjectId": "obg_clinic",
                    "subjectName": "OBG/CLINIC",
                    "date": date,
                    "status": status
                }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/attendance/export?subject=obg_clinic&month=2024-02")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp
        .headers()
        .get("Content-Type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(content_type.starts_with("text/csv"), "got {}", content_type);
    let disposition = resp
        .headers()
        .get("Content-Disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(
        disposition.contains("obg_clinic_2024-02.csv"),
        "got {}",
        disposition
    );

    let body = test::read_body(resp).await;
    let csv = std::str::from_utf8(&body).expect("utf-8 csv");
    let lines: Vec<&str> = csv.lines().collect();
    // Header plus all 29 days of the leap-year February, marked or not.
    assert_eq!(lines.len(), 30);
    assert_eq!(lines[0], "date,status");
    assert_eq!(lines[1], "2024-02-01,present");
    assert_eq!(lines[2], "2024-02-02,");
    assert_eq!(lines[14], "2024-02-14,absent");
    assert_eq!(lines[29], "2024-02-29,abandoned");
}

#[actix_web::test]
async fn export_with_malformed_month_is_rejected() {
    let app = test::init_service(App::new().app_data(test_state()).configure(http::configure)).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/attendance/export?subject=obg_clinic&month=feb")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
