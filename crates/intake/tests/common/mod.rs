use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Form, Json, Router};
use reqwest::Url;
use serde_json::{json, Value};

use admissions_core::enquiry::EnquiryRecord;

/// Bodies received by the stub, one map per request.
pub type Received = Arc<Mutex<Vec<HashMap<String, String>>>>;

/// The enquiry used throughout the intake tests.
pub fn sample_record() -> EnquiryRecord {
    EnquiryRecord {
        parent_name: "A".into(),
        student_name: "B".into(),
        class_seeking: "5".into(),
        mobile_number: "9999999999".into(),
        email: "a@b.com".into(),
        locality: "X".into(),
    }
}

/// Start a local intake stub and return its base URL plus the request log.
///
/// | Route           | Behaviour                                      |
/// |-----------------|------------------------------------------------|
/// | `/multipart`    | reads multipart fields, acknowledges success   |
/// | `/form`         | reads URL-encoded fields, acknowledges success |
/// | `/reject`       | `{"result":"error","message":"Sheet locked"}`  |
/// | `/reject-bare`  | `{"result":"error"}`                           |
/// | `/html`         | 200 with a non-JSON body                       |
/// | `/server-error` | 500                                            |
pub async fn spawn_stub() -> (Url, Received) {
    let received: Received = Arc::default();

    let app = Router::new()
        .route("/multipart", post(multipart_ok))
        .route("/form", post(form_ok))
        .route(
            "/reject",
            post(|| async { Json(json!({"result": "error", "message": "Sheet locked"})) }),
        )
        .route("/reject-bare", post(|| async { Json(json!({"result": "error"})) }))
        .route("/html", post(|| async { "<html>Moved</html>" }))
        .route(
            "/server-error",
            post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
        .with_state(Arc::clone(&received));

    let addr = serve(app).await;
    let base = Url::parse(&format!("http://{addr}/")).unwrap();
    (base, received)
}

/// URL of a port that nothing is listening on.
pub async fn closed_port_url() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}/exec")).unwrap()
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn multipart_ok(State(received): State<Received>, mut multipart: Multipart) -> Json<Value> {
    let mut fields = HashMap::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let value = field.text().await.unwrap();
        fields.insert(name, value);
    }
    received.lock().unwrap().push(fields);
    Json(json!({"result": "success"}))
}

async fn form_ok(
    State(received): State<Received>,
    Form(fields): Form<HashMap<String, String>>,
) -> Json<Value> {
    received.lock().unwrap().push(fields);
    Json(json!({"result": "success"}))
}
