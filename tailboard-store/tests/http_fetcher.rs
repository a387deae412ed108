use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tailboard_core::{CreateError, CreateKind, FetchError, ResourceFetcher, ResourceKind};
use tailboard_shared::{AlertKind, NewCrew, NewFlight, Qualifications};
use tailboard_store::HttpResourceFetcher;
use tokio::net::TcpListener;

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn backend() -> Router {
    Router::new()
        .route(
            "/aircraft",
            get(|| async {
                Json(json!([{
                    "tail_number": "VT-ABC",
                    "subtype": "A320",
                    "capacity": 180,
                    "fuel_efficiency": 2.5,
                    "current_location": "Delhi",
                    "available_from": "2025-03-01T05:00:00",
                    "hours_flown": 21.5,
                    "total_flights": 9
                }]))
            }),
        )
        .route(
            "/aircraft/{tail}",
            get(|Path(tail): Path<String>| async move {
                if tail == "VT-ABC" {
                    (
                        StatusCode::OK,
                        Json(json!({
                            "tail_number": "VT-ABC",
                            "subtype": "A320",
                            "capacity": 180,
                            "fuel_efficiency": 2.5,
                            "current_location": "Mumbai",
                            "available_from": "2025-03-01T10:45:00",
                            "trips": [{
                                "flight_id": "AI101",
                                "route": "DEL-BOM",
                                "dep_time": "2025-03-01T08:00:00",
                                "arr_time": "2025-03-01T10:00:00",
                                "co2_emitted": 2565.0
                            }]
                        })),
                    )
                } else {
                    (StatusCode::NOT_FOUND, Json(json!({"error": "Aircraft not found"})))
                }
            }),
        )
        .route(
            "/crews",
            get(|| async {
                Json(json!([{
                    "crew_id": "C1",
                    "qualifications": "A320, B737",
                    "current_location": "Delhi",
                    "available_from": "2025-03-01 05:00:00"
                }]))
            })
            .post(|Json(body): Json<Value>| async move {
                if body["crew_id"] == "C1" {
                    (StatusCode::BAD_REQUEST, Json(json!({"error": "Crew already exists"})))
                } else {
                    (StatusCode::CREATED, Json(json!({"message": "Crew added successfully"})))
                }
            }),
        )
        .route(
            "/assignments",
            get(|| async {
                Json(json!({
                    "assignments": [],
                    "alerts": [{"type": "crew", "message": "Crew shortage"}, "Solver warm start"],
                    "unassigned_flights": ["FL100"]
                }))
            }),
        )
        .route(
            "/flights",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }).post(
                |Json(_): Json<Value>| async move {
                    (
                        StatusCode::CREATED,
                        Json(json!({
                            "assignments": [{
                                "flight_id": "AI101",
                                "tail_number": "VT-ABC",
                                "crew_id": "C1",
                                "route": "DEL-BOM",
                                "dep_time": "2025-03-01T08:00:00",
                                "arr_time": "2025-03-01T10:00:00",
                                "co2_emitted": 2565.0
                            }],
                            "alerts": [],
                            "unassigned_flights": []
                        })),
                    )
                },
            ),
        )
        .route(
            "/flights/{id}",
            get(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
        )
        .route("/statistics", get(|| async { "not json" }))
}

fn new_flight() -> NewFlight {
    serde_json::from_value(json!({
        "flight_id": "AI101",
        "route": "DEL-BOM",
        "origin": "Delhi",
        "destination": "Mumbai",
        "distance": 1140.0,
        "dep_time": "2025-03-01T08:00:00Z",
        "arr_time": "2025-03-01T10:00:00Z",
        "required_subtype": "A320",
        "passengers": 150
    }))
    .unwrap()
}

#[tokio::test]
async fn test_list_fetches_decode_backend_shapes() {
    let base = serve(backend()).await;
    let fetcher = HttpResourceFetcher::new(base, None).unwrap();

    let aircraft = fetcher.fetch_aircraft().await.unwrap();
    assert_eq!(aircraft.len(), 1);
    assert!(aircraft[0].requires_maintenance());

    let crews = fetcher.fetch_crews().await.unwrap();
    assert_eq!(crews[0].qualifications, Qualifications::new(["A320", "B737"]));

    let bundle = fetcher.fetch_assignments().await.unwrap();
    assert_eq!(bundle.alerts.len(), 2);
    assert_eq!(bundle.alerts[0].kind, AlertKind::Crew);
    assert_eq!(bundle.unassigned_flights, vec!["FL100".to_string()]);
}

#[tokio::test]
async fn test_failures_carry_resource() {
    let base = serve(backend()).await;
    let fetcher = HttpResourceFetcher::new(format!("{}/", base), None).unwrap();

    match fetcher.fetch_flights().await {
        Err(FetchError::Http { resource, status, message }) => {
            assert_eq!(resource, ResourceKind::Flights);
            assert_eq!(status, 500);
            assert_eq!(message, None);
        }
        other => panic!("expected HTTP error, got {:?}", other),
    }

    let err = fetcher.fetch_statistics().await.unwrap_err();
    assert!(matches!(err, FetchError::Decode { resource: ResourceKind::Statistics, .. }));
}

#[tokio::test]
async fn test_detail_fetch_and_not_found() {
    let base = serve(backend()).await;
    let fetcher = HttpResourceFetcher::new(base, None).unwrap();

    let detail = fetcher.fetch_aircraft_detail("VT-ABC").await.unwrap();
    assert_eq!(detail.trips.len(), 1);
    assert_eq!(detail.current_location, "Mumbai");

    let err = fetcher.fetch_aircraft_detail("VT-NOPE").await.unwrap_err();
    assert_eq!(
        err,
        FetchError::NotFound {
            resource: ResourceKind::Aircraft,
            key: "VT-NOPE".to_string(),
            message: Some("Aircraft not found".to_string()),
        }
    );
    assert_eq!(err.user_message(), "Aircraft not found");

    let err = fetcher.fetch_flight_detail("AI101").await.unwrap_err();
    assert_eq!(
        err,
        FetchError::NotFound {
            resource: ResourceKind::Flights,
            key: "AI101".to_string(),
            message: None,
        }
    );
    assert_eq!(err.user_message(), "Flight not found");
}

#[tokio::test]
async fn test_creates() {
    let base = serve(backend()).await;
    let fetcher = HttpResourceFetcher::new(base, None).unwrap();

    let bundle = fetcher.create_flight(&new_flight()).await.unwrap();
    assert_eq!(bundle.assignments[0].flight_id, "AI101");

    let mut crew = NewCrew {
        crew_id: "C1".to_string(),
        qualifications: Qualifications::new(["A320"]),
        current_location: "Delhi".to_string(),
        available_from: new_flight().dep_time,
    };
    let err = fetcher.create_crew(&crew).await.unwrap_err();
    assert_eq!(
        err,
        CreateError::Rejected {
            kind: CreateKind::Crew,
            status: 400,
            message: "Crew already exists".to_string(),
        }
    );

    crew.crew_id = "C2".to_string();
    let ack = fetcher.create_crew(&crew).await.unwrap();
    assert_eq!(ack.message.as_deref(), Some("Crew added successfully"));
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let fetcher = HttpResourceFetcher::new(format!("http://{}", addr), None).unwrap();
    let err = fetcher.fetch_crews().await.unwrap_err();
    assert!(matches!(err, FetchError::Transport { resource: ResourceKind::Crews, .. }));
    assert_eq!(err.user_message(), "Failed to fetch crews");

    let err = fetcher.create_flight(&new_flight()).await.unwrap_err();
    assert_eq!(err.user_message(), "Failed to add flight");
}
