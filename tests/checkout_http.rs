//! Integration tests for the HTTP API.
//!
//! Drive the full router (auth middleware, extractors, error mapping) with
//! `tower::ServiceExt::oneshot` over in-memory adapters.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use secrecy::SecretString;
use serde_json::{json, Value};
use tower::ServiceExt;

use learnhub::adapters::http::{
    api_router, ApiState, CheckoutAppState, HttpSettings, ProgressAppState,
};
use learnhub::adapters::{
    InMemoryCourseCatalog, InMemoryEnrollmentJournal, InMemoryProgressRepository,
    InMemoryStudentDirectory, MockPaymentGateway, MockSessionValidator, RecordingDispatcher,
    RecordingMailer,
};
use learnhub::application::{
    CreateOrderHandler, EnrollmentEngine, GetCourseProgressHandler, SendPaymentReceiptHandler,
    UpdateCourseProgressHandler, VerifyPaymentHandler,
};
use learnhub::domain::catalog::{Course, StudentProfile, SubSection};
use learnhub::domain::checkout::{compute_signature, Currency, SignatureVerifier};
use learnhub::domain::foundation::{AccountType, CourseId, SubSectionId, UserId};

const KEY_SECRET: &str = "rzp_test_key_secret";
const STUDENT_TOKEN: &str = "student-token";
const INSTRUCTOR_TOKEN: &str = "instructor-token";

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestApp {
    router: Router,
    mailer: Arc<RecordingMailer>,
}

async fn test_app() -> TestApp {
    let catalog = Arc::new(InMemoryCourseCatalog::new());
    catalog
        .insert_course(Course::new(CourseId::new("X").unwrap(), "Rust Basics", 10))
        .await;
    catalog
        .insert_course(Course::new(CourseId::new("Y").unwrap(), "Async Rust", 15))
        .await;
    catalog
        .insert_sub_section(SubSection {
            id: SubSectionId::new("lecture-1").unwrap(),
            title: "Ownership".to_string(),
        })
        .await;

    let directory = Arc::new(InMemoryStudentDirectory::new());
    directory
        .insert_student(StudentProfile::new(
            UserId::new("stu-1").unwrap(),
            "Uma",
            "Iyer",
            "uma@example.com",
        ))
        .await;

    let progress = Arc::new(InMemoryProgressRepository::new());
    let mailer = Arc::new(RecordingMailer::new());

    let engine = Arc::new(EnrollmentEngine::new(
        catalog.clone(),
        directory.clone(),
        Arc::new(RecordingDispatcher::new()),
        Duration::from_secs(5),
    ));

    let validator = MockSessionValidator::new()
        .with_test_student(STUDENT_TOKEN, "stu-1")
        .with_test_user(INSTRUCTOR_TOKEN, "teach-1", AccountType::Instructor);

    let state = ApiState {
        checkout: CheckoutAppState {
            create_order: Arc::new(CreateOrderHandler::new(
                catalog.clone(),
                Arc::new(MockPaymentGateway::new()),
                Currency::inr(),
                Duration::from_secs(5),
            )),
            verify_payment: Arc::new(VerifyPaymentHandler::new(
                SignatureVerifier::new(SecretString::new(KEY_SECRET.to_string())),
                engine,
                Arc::new(InMemoryEnrollmentJournal::new()),
            )),
            send_receipt: Arc::new(SendPaymentReceiptHandler::new(
                directory,
                mailer.clone(),
            )),
        },
        progress: ProgressAppState {
            update_progress: Arc::new(UpdateCourseProgressHandler::new(
                catalog,
                progress.clone(),
            )),
            get_progress: Arc::new(GetCourseProgressHandler::new(progress)),
        },
        auth: Arc::new(validator),
    };

    TestApp {
        router: api_router(state, &HttpSettings::default()),
        mailer,
    }
}

impl TestApp {
    async fn post(&self, path: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        let mut request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        let request = request.body(Body::from(body.to_string())).unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn health_needs_no_token() {
    let app = test_app().await;
    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn payment_routes_require_a_token() {
    let app = test_app().await;
    let (status, body) = app
        .post("/api/v1/payment/capturePayment", None, json!({"courses": ["X"]}))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn unknown_token_is_rejected() {
    let app = test_app().await;
    let (status, _) = app
        .post(
            "/api/v1/payment/capturePayment",
            Some("forged"),
            json!({"courses": ["X"]}),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn payment_routes_are_student_only() {
    let app = test_app().await;
    let (status, body) = app
        .post(
            "/api/v1/payment/capturePayment",
            Some(INSTRUCTOR_TOKEN),
            json!({"courses": ["X"]}),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "This route is restricted to Student accounts");
}

// =============================================================================
// Checkout
// =============================================================================

#[tokio::test]
async fn capture_payment_returns_order_for_widget() {
    let app = test_app().await;
    let (status, body) = app
        .post(
            "/api/v1/payment/capturePayment",
            Some(STUDENT_TOKEN),
            json!({"courses": ["X", "Y"]}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["amount"], 2500);
    assert_eq!(body["currency"], "INR");
    assert_eq!(body["key"], "rzp_test_mock");
    assert!(body["orderId"].as_str().unwrap().starts_with("order_"));
}

#[tokio::test]
async fn capture_payment_without_courses_is_400() {
    let app = test_app().await;
    let (status, body) = app
        .post("/api/v1/payment/capturePayment", Some(STUDENT_TOKEN), json!({}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorCode"], "VALIDATION_FAILED");
    assert_eq!(body["message"], "Please provide an array of course IDs");
}

#[tokio::test]
async fn capture_payment_for_unknown_course_is_404() {
    let app = test_app().await;
    let (status, body) = app
        .post(
            "/api/v1/payment/capturePayment",
            Some(STUDENT_TOKEN),
            json!({"courses": ["X", "nope"]}),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Course with ID nope not found");
}

#[tokio::test]
async fn verify_payment_with_bad_signature_is_400() {
    let app = test_app().await;
    let (status, body) = app
        .post(
            "/api/v1/payment/verifyPayment",
            Some(STUDENT_TOKEN),
            json!({
                "razorpay_order_id": "order_1",
                "razorpay_payment_id": "pay_1",
                "razorpay_signature": "deadbeef",
                "courses": ["X"]
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorCode"], "SIGNATURE_MISMATCH");
    assert_eq!(body["message"], "Invalid payment signature");
}

#[tokio::test]
async fn verify_payment_with_missing_course_is_partial_200() {
    let app = test_app().await;
    let signature = compute_signature(KEY_SECRET, "order_1", "pay_1");
    let (status, body) = app
        .post(
            "/api/v1/payment/verifyPayment",
            Some(STUDENT_TOKEN),
            json!({
                "razorpay_order_id": "order_1",
                "razorpay_payment_id": "pay_1",
                "razorpay_signature": signature,
                "courses": ["X", "missing", "Y"]
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["status"], "partial");
    assert_eq!(body["enrolled"], json!(["X", "Y"]));
    assert_eq!(body["failed"][0]["courseId"], "missing");
    assert_eq!(body["failed"][0]["code"], "COURSE_NOT_FOUND");

    // Bought courses cannot be ordered again.
    let (status, body) = app
        .post(
            "/api/v1/payment/capturePayment",
            Some(STUDENT_TOKEN),
            json!({"courses": ["Y"]}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorCode"], "ALREADY_ENROLLED");
}

#[tokio::test]
async fn payment_success_email_is_sent() {
    let app = test_app().await;
    let (status, body) = app
        .post(
            "/api/v1/payment/sendPaymentSuccessEmail",
            Some(STUDENT_TOKEN),
            json!({"orderId": "order_1", "paymentId": "pay_1", "amount": 2500}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let sent = app.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "uma@example.com");
    assert_eq!(sent[0].subject, "Payment Received");
}

#[tokio::test]
async fn payment_success_email_needs_every_field() {
    let app = test_app().await;
    let (status, body) = app
        .post(
            "/api/v1/payment/sendPaymentSuccessEmail",
            Some(STUDENT_TOKEN),
            json!({"orderId": "order_1", "paymentId": "pay_1"}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please provide all the fields");
    assert!(app.mailer.sent().is_empty());
}

// =============================================================================
// Course Progress
// =============================================================================

#[tokio::test]
async fn progress_update_then_fetch() {
    let app = test_app().await;

    let (status, body) = app
        .post(
            "/api/v1/course/updateCourseProgress",
            Some(STUDENT_TOKEN),
            json!({"courseId": "X", "subsectionId": "lecture-1"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Course progress created and updated successfully");

    let (status, body) = app
        .post(
            "/api/v1/course/updateCourseProgress",
            Some(STUDENT_TOKEN),
            json!({"courseId": "X", "subsectionId": "lecture-1"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Subsection already completed");

    let (status, body) = app
        .post(
            "/api/v1/course/getCourseProgress",
            Some(STUDENT_TOKEN),
            json!({"courseId": "X"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["completedVideos"], json!(["lecture-1"]));
}

#[tokio::test]
async fn progress_for_unknown_lecture_is_404() {
    let app = test_app().await;
    let (status, body) = app
        .post(
            "/api/v1/course/updateCourseProgress",
            Some(STUDENT_TOKEN),
            json!({"courseId": "X", "subsectionId": "lecture-404"}),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Invalid subsection");
}

#[tokio::test]
async fn empty_progress_is_not_an_error() {
    let app = test_app().await;
    let (status, body) = app
        .post(
            "/api/v1/course/getCourseProgress",
            Some(INSTRUCTOR_TOKEN),
            json!({"courseId": "Y"}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "No progress found");
    assert_eq!(body["data"]["completedVideos"], json!([]));
}

// =============================================================================
// Malformed Bodies
// =============================================================================

async fn assert_bad_body(path: &str, body: Value) {
    let app = test_app().await;
    let (status, body) = app.post(path, Some(STUDENT_TOKEN), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST, "{}", path);
    assert_eq!(body["success"], false);
    assert_eq!(body["errorCode"], "VALIDATION_FAILED");
    assert_eq!(body["message"], "Invalid request body");
}

#[tokio::test]
async fn capture_payment_with_string_courses_is_400() {
    assert_bad_body("/api/v1/payment/capturePayment", json!({"courses": "X"})).await;
}

#[tokio::test]
async fn verify_payment_with_numeric_order_id_is_400() {
    assert_bad_body(
        "/api/v1/payment/verifyPayment",
        json!({
            "razorpay_order_id": 1,
            "razorpay_payment_id": "pay_1",
            "razorpay_signature": "deadbeef",
            "courses": ["X"]
        }),
    )
    .await;
}

#[tokio::test]
async fn payment_email_with_string_amount_is_400() {
    let app = test_app().await;
    let (status, body) = app
        .post(
            "/api/v1/payment/sendPaymentSuccessEmail",
            Some(STUDENT_TOKEN),
            json!({"orderId": "order_1", "paymentId": "pay_1", "amount": "2500"}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorCode"], "VALIDATION_FAILED");
    assert!(app.mailer.sent().is_empty());
}

#[tokio::test]
async fn progress_update_with_numeric_course_id_is_400() {
    assert_bad_body(
        "/api/v1/course/updateCourseProgress",
        json!({"courseId": 5, "subsectionId": "lecture-1"}),
    )
    .await;
}

#[tokio::test]
async fn progress_fetch_with_numeric_course_id_is_400() {
    assert_bad_body("/api/v1/course/getCourseProgress", json!({"courseId": 5})).await;
}

#[tokio::test]
async fn non_json_body_is_400() {
    let app = test_app().await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/payment/capturePayment")
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {}", STUDENT_TOKEN))
        .body(Body::from("courses=X"))
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
