use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use dealerdesk_backend::auth::jwt::sign_token;
use dealerdesk_backend::build_app;
use dealerdesk_backend::config::Config;
use dealerdesk_backend::state::AppState;

const SECRET: &str = "integration-secret";

fn test_app() -> Router {
    let config = Config::from_lookup(|key| match key {
        "DATABASE_URL" => Some("postgres://unused".to_string()),
        "JWT_SECRET" => Some(SECRET.to_string()),
        "BCRYPT_COST" => Some("4".to_string()),
        _ => None,
    })
    .unwrap();
    build_app(AppState::in_memory(config))
}

fn token(role: &str) -> String {
    sign_token(1, role, "tester", SECRET, 1).unwrap()
}

async fn send(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

async fn create_dealer(app: &Router, token: &str, name: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/backend/dealers",
        Some(token),
        Some(json!({
            "dealerName": name,
            "products": [
                { "productName": "Rice", "productPrice": "100" },
                { "name": "Dal", "price": 50 }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

async fn create_sale(app: &Router, token: &str, dealer_id: i64, date: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/backend/sales",
        Some(token),
        Some(json!({
            "date": date,
            "dealerId": dealer_id,
            "products": [
                { "productName": "Rice", "productPrice": 100, "quantity": 2 },
                { "productName": "Dal", "productPrice": "50", "quantity": "3" },
                { "productName": "Oil", "productPrice": 80, "quantity": 0 }
            ],
            "surcharges": { "delivery": 30 },
            "totalAmount": 9999
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

#[tokio::test]
async fn health_and_banner_are_open() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".into()));

    let (status, _) = send(&app, Method::GET, "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn backend_requires_a_valid_token() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/backend/sales", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Missing Authorization header" }));

    let forged = sign_token(1, "admin", "tester", "other-secret", 1).unwrap();
    let (status, _) = send(&app, Method::GET, "/backend/sales", Some(&forged), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn dealer_crud_and_sale_template() {
    let app = test_app();
    let staff = token("staff");
    let id = create_dealer(&app, &staff, "Acme Traders").await;

    let (status, template) = send(&app, Method::GET, &format!("/backend/dealers/{id}/sale-template"), Some(&staff), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(template["dealer"]["dealerName"], "Acme Traders");
    assert_eq!(template["items"].as_array().unwrap().len(), 2);
    assert_eq!(template["items"][0]["quantity"], 0);
    assert_eq!(template["items"][0]["unitPrice"].as_f64(), Some(100.0));
    assert_eq!(template["finalTotal"].as_f64(), Some(0.0));

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/backend/dealers/{id}/edit"),
        Some(&staff),
        Some(json!({ "name": "Acme Wholesale", "products": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["dealerName"], "Acme Wholesale");

    create_dealer(&app, &staff, "Balaji Stores").await;
    let (_, listed) = send(&app, Method::GET, "/backend/dealers?search=%20WHOLESALE%20", Some(&staff), None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (_, numeric) = send(&app, Method::GET, "/backend/dealers?search=0", Some(&staff), None).await;
    assert!(numeric.as_array().unwrap().is_empty());

    let (status, _) = send(&app, Method::GET, "/backend/dealers/999", Some(&staff), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::POST,
        "/backend/dealers",
        Some(&staff),
        Some(json!({ "dealerName": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sale_totals_are_computed_by_the_server() {
    let app = test_app();
    let staff = token("staff");
    let dealer = create_dealer(&app, &staff, "Acme").await;

    let sale = create_sale(&app, &staff, dealer, "2024-01-15").await;
    assert_eq!(sale["items"].as_array().unwrap().len(), 2);
    assert_eq!(sale["items"][1]["lineTotal"].as_f64(), Some(150.0));
    assert_eq!(sale["productTotal"].as_f64(), Some(350.0));
    assert_eq!(sale["surchargeTotal"].as_f64(), Some(30.0));
    assert_eq!(sale["finalTotal"].as_f64(), Some(380.0));
    assert_eq!(sale["dealer"]["dealerName"], "Acme");

    let id = sale["id"].as_i64().unwrap();
    let (status, fetched) = send(&app, Method::GET, &format!("/backend/sales/{id}"), Some(&staff), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["finalTotal"].as_f64(), Some(380.0));
}

#[tokio::test]
async fn sale_validation() {
    let app = test_app();
    let staff = token("staff");
    let dealer = create_dealer(&app, &staff, "Acme").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/backend/sales",
        Some(&staff),
        Some(json!({
            "date": "2024-01-15",
            "dealerId": dealer,
            "items": [{ "name": "Rice", "unitPrice": 100, "quantity": 0 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/backend/sales",
        Some(&staff),
        Some(json!({
            "date": "2024-01-15",
            "dealerId": 4242,
            "items": [{ "name": "Rice", "unitPrice": 100, "quantity": 1 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sales_list_filters_by_search_and_date_range() {
    let app = test_app();
    let staff = token("staff");
    let acme = create_dealer(&app, &staff, "Acme").await;
    let balaji = create_dealer(&app, &staff, "Balaji").await;
    create_sale(&app, &staff, acme, "2024-01-15").await;
    create_sale(&app, &staff, balaji, "2024-02-10").await;

    let (_, all) = send(&app, Method::GET, "/backend/sales", Some(&staff), None).await;
    let all = all.as_array().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0]["date"], "2024-02-10");

    let (_, by_name) = send(&app, Method::GET, "/backend/sales?search=bal", Some(&staff), None).await;
    assert_eq!(by_name.as_array().unwrap().len(), 1);

    let (_, by_date) = send(&app, Method::GET, "/backend/sales?search=2024-01", Some(&staff), None).await;
    assert_eq!(by_date[0]["dealer"]["dealerName"], "Acme");

    let (_, by_total) = send(&app, Method::GET, "/backend/sales?search=380", Some(&staff), None).await;
    assert_eq!(by_total.as_array().unwrap().len(), 2);

    // Reversed bounds are swapped.
    let (_, ranged) = send(
        &app,
        Method::GET,
        "/backend/sales?startDate=2024-01-31&endDate=2024-01-01",
        Some(&staff),
        None,
    )
    .await;
    let ranged = ranged.as_array().unwrap();
    assert_eq!(ranged.len(), 1);
    assert_eq!(ranged[0]["date"], "2024-01-15");

    let (_, half_range) = send(&app, Method::GET, "/backend/sales?startDate=2024-02-01", Some(&staff), None).await;
    assert_eq!(half_range.as_array().unwrap().len(), 2);

    let (status, _) = send(&app, Method::GET, "/backend/sales?startDate=15-01-2024&endDate=2024-02-01", Some(&staff), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn preview_computes_without_saving() {
    let app = test_app();
    let staff = token("staff");
    let (status, preview) = send(
        &app,
        Method::POST,
        "/backend/sales/preview",
        Some(&staff),
        Some(json!({
            "items": [
                { "name": "Rice", "unitPrice": "abc", "quantity": 2 },
                { "name": "Dal", "unitPrice": 50, "quantity": "3" }
            ],
            "surcharges": { "packing": "10", "bogus": -5 }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(preview["items"][0]["lineTotal"].as_f64(), Some(0.0));
    assert_eq!(preview["productTotal"].as_f64(), Some(150.0));
    assert_eq!(preview["finalTotal"].as_f64(), Some(160.0));

    let (_, sales) = send(&app, Method::GET, "/backend/sales", Some(&staff), None).await;
    assert!(sales.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn only_admins_delete() {
    let app = test_app();
    let staff = token("staff");
    let admin = token("admin");
    let dealer = create_dealer(&app, &staff, "Acme").await;
    let id = create_sale(&app, &staff, dealer, "2024-01-15").await["id"].as_i64().unwrap();

    let (status, body) = send(&app, Method::DELETE, &format!("/backend/sales/{id}/delete"), Some(&staff), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["error"].as_str().unwrap().contains("admin"));

    let (status, _) = send(&app, Method::DELETE, &format!("/backend/sales/{id}/delete"), Some(&admin), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &format!("/backend/sales/{id}"), Some(&staff), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &format!("/backend/sales/{id}/delete"), Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn referenced_dealer_cannot_be_deleted() {
    let app = test_app();
    let admin = token("admin");
    let dealer = create_dealer(&app, &admin, "Acme").await;
    let sale = create_sale(&app, &admin, dealer, "2024-01-15").await["id"].as_i64().unwrap();

    let uri = format!("/backend/dealers/{dealer}/delete");
    let (status, _) = send(&app, Method::DELETE, &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    send(&app, Method::DELETE, &format!("/backend/sales/{sale}/delete"), Some(&admin), None).await;
    let (status, _) = send(&app, Method::DELETE, &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn online_orders_search_extra_fields() {
    let app = test_app();
    let staff = token("staff");
    let (status, order) = send(
        &app,
        Method::POST,
        "/backend/online-order",
        Some(&staff),
        Some(json!({
            "orderDate": "2024-03-02",
            "customerName": " Priya ",
            "phoneNo": "9876500000",
            "courier": "BlueDart",
            "orderSource": "WhatsApp",
            "items": [{ "name": "Ghee", "unitPrice": 400, "quantity": 1 }],
            "surcharges": { "shipping": 60 }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{order}");
    assert_eq!(order["customerName"], "Priya");
    assert_eq!(order["finalTotal"].as_f64(), Some(460.0));

    let (_, found) = send(&app, Method::GET, "/backend/online-order?search=bluedart", Some(&staff), None).await;
    assert_eq!(found.as_array().unwrap().len(), 1);
    let (_, found) = send(&app, Method::GET, "/backend/online-order?search=98765", Some(&staff), None).await;
    assert_eq!(found.as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        Method::POST,
        "/backend/online-order",
        Some(&staff),
        Some(json!({ "orderDate": "2024-03-02", "customerName": "", "items": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn payments_and_expenses() {
    let app = test_app();
    let staff = token("staff");
    let dealer = create_dealer(&app, &staff, "Acme").await;

    let (status, payment) = send(
        &app,
        Method::POST,
        "/backend/payment",
        Some(&staff),
        Some(json!({ "orderDate": "2024-01-20", "dealerId": dealer, "totalAmount": "500", "paymentMode": "UPI" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{payment}");
    assert_eq!(payment["amount"].as_f64(), Some(500.0));
    assert_eq!(payment["dealer"]["dealerName"], "Acme");

    let (_, by_mode) = send(&app, Method::GET, "/backend/payment?search=upi", Some(&staff), None).await;
    assert_eq!(by_mode.as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        Method::POST,
        "/backend/payment",
        Some(&staff),
        Some(json!({ "date": "2024-01-20", "dealerId": dealer, "amount": "abc", "paymentMode": "Cash" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, expense) = send(
        &app,
        Method::POST,
        "/backend/expense",
        Some(&staff),
        Some(json!({ "date": "2024-01-21", "desc": "Fuel", "amount": 120.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = expense["id"].as_i64().unwrap();

    let (status, edited) = send(
        &app,
        Method::PUT,
        &format!("/backend/expense/{id}/edit"),
        Some(&staff),
        Some(json!({ "date": "2024-01-22", "description": "Diesel", "amount": 130 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(edited["description"], "Diesel");
}

#[tokio::test]
async fn dashboard_reports() {
    let app = test_app();
    let staff = token("staff");
    let acme = create_dealer(&app, &staff, "Acme").await;
    let balaji = create_dealer(&app, &staff, "Balaji").await;
    create_sale(&app, &staff, acme, "2024-01-05").await;
    create_sale(&app, &staff, acme, "2024-01-25").await;
    create_sale(&app, &staff, balaji, "2024-01-10").await;
    create_sale(&app, &staff, balaji, "2024-02-10").await;

    let (status, breakdown) = send(&app, Method::GET, "/backend/dashboard/dealer-sales?month=1&year=2024", Some(&staff), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(breakdown["total"].as_f64(), Some(1140.0));
    assert_eq!(breakdown["dealers"][0]["party"], "Acme");
    assert_eq!(breakdown["dealers"][0]["total"].as_f64(), Some(760.0));
    assert_eq!(breakdown["dealers"][1]["party"], "Balaji");

    let (status, _) = send(&app, Method::GET, "/backend/dashboard/dealer-sales?month=13&year=2024", Some(&staff), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, totals) = send(
        &app,
        Method::GET,
        "/backend/dashboard/totals?startDate=2024-01-01&endDate=2024-01-31",
        Some(&staff),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(totals["sales"]["count"], 3);
    assert_eq!(totals["sales"]["total"].as_f64(), Some(1140.0));
    assert_eq!(totals["expenses"]["count"], 0);

    for date in ["2024-01-03", "2024-03-09", "2024-01-28"] {
        send(
            &app,
            Method::POST,
            "/backend/online-order",
            Some(&staff),
            Some(json!({
                "orderDate": date,
                "customerName": "Priya",
                "items": [{ "name": "Ghee", "unitPrice": 100, "quantity": 1 }]
            })),
        )
        .await;
    }
    let (status, trend) = send(&app, Method::GET, "/backend/dashboard/monthly-orders", Some(&staff), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        trend,
        json!([
            { "month": "2024-01", "label": "Jan 2024", "total": 200.0 },
            { "month": "2024-03", "label": "Mar 2024", "total": 100.0 }
        ])
    );
}

#[tokio::test]
async fn register_login_and_profile() {
    let app = test_app();
    let registration = json!({
        "username": "ravi",
        "email": "ravi@example.com",
        "password": "secret123",
        "mobileNo": "9000000000"
    });

    let (status, user) = send(&app, Method::POST, "/register", None, Some(registration.clone())).await;
    assert_eq!(status, StatusCode::CREATED, "{user}");
    assert_eq!(user["role"], "staff");
    assert!(user.get("passwordHash").is_none());

    let (status, _) = send(&app, Method::POST, "/register", None, Some(registration)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({ "employeeId": "ravi", "password": "wrong-pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, login) = send(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({ "employeeId": "ravi@example.com", "password": "secret123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(login["tokenType"], "Bearer");
    assert_eq!(login["expiresInSeconds"], 8 * 60 * 60);

    let token = login["accessToken"].as_str().unwrap();
    let (status, me) = send(&app, Method::GET, "/users/me", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], "ravi");

    let (status, _) = send(&app, Method::GET, "/backend/dealers", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
}
