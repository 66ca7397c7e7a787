use std::sync::Arc;

use abc_retail_api::{
    models::{Customer, Product},
    routes::create_app,
    services::{FunctionsApi, InMemoryFunctionsApi},
    state::AppState,
};
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

const BOUNDARY: &str = "retail-test-boundary";

async fn seeded_app() -> anyhow::Result<Router> {
    let api = InMemoryFunctionsApi::new();
    api.create_customer(Customer {
        id: "C1".into(),
        name: "Thandi".into(),
        surname: "Mokoena".into(),
        username: "thandim".into(),
        email: "thandi@example.com".into(),
        shipping_address: "14 Long Street".into(),
    })
    .await?;
    api.create_product(
        Product {
            id: "P1".into(),
            product_name: "Ferris Mug".into(),
            description: "Coffee tastes better with Ferris".into(),
            price: Decimal::new(1000, 2),
            stock_available: 20,
            image_url: None,
        },
        None,
    )
    .await?;
    Ok(create_app(AppState::new(Arc::new(api))))
}

async fn send(app: &Router, request: Request<Body>) -> anyhow::Result<(StatusCode, Vec<u8>)> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok((status, bytes.to_vec()))
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn multipart_request(
    method: Method,
    uri: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((name, file_name, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn parse(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("json body")
}

#[tokio::test]
async fn place_order_then_ship_it() -> anyhow::Result<()> {
    let app = seeded_app().await?;

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/orders",
            serde_json::json!({ "customerId": "C1", "productId": "P1", "quantity": 3 }),
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    let order = parse(&body);
    assert_eq!(order["quantity"], 3);
    assert_eq!(order["unitPrice"].as_f64(), Some(10.0));
    assert_eq!(order["status"], "Submitted");
    assert_eq!(order["productName"], "Ferris Mug");
    let id = order["id"].as_str().expect("order id").to_string();

    let (status, body) = send(
        &app,
        json_request(
            Method::PATCH,
            &format!("/api/orders/{id}/status"),
            serde_json::json!({ "status": "Shipped" }),
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["status"], "Shipped");

    let (status, body) = send(&app, empty_request(Method::GET, &format!("/api/orders/{id}"))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["status"], "Shipped");

    let (status, body) = send(&app, empty_request(Method::GET, "/api/orders")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body).as_array().map(Vec::len), Some(1));

    let (status, body) = send(&app, empty_request(Method::GET, "/api/products/P1")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["stockAvailable"], 17);

    Ok(())
}

#[tokio::test]
async fn order_with_unknown_references_is_rejected() -> anyhow::Result<()> {
    let app = seeded_app().await?;

    let (status, _) = send(
        &app,
        json_request(
            Method::POST,
            "/api/orders",
            serde_json::json!({ "customerId": "C404", "productId": "P1", "quantity": 1 }),
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Request::builder()
            .method(Method::POST)
            .uri("/api/orders")
            .body(Body::from("{\"customerId\":"))
            .unwrap(),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, empty_request(Method::GET, "/api/orders/missing")).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn delete_product_then_get_is_not_found() -> anyhow::Result<()> {
    let app = seeded_app().await?;

    let (status, _) = send(&app, empty_request(Method::DELETE, "/api/products/P1")).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, empty_request(Method::GET, "/api/products/P1")).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, empty_request(Method::DELETE, "/api/products/P1")).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn customer_crud_over_json() -> anyhow::Result<()> {
    let app = seeded_app().await?;
    let payload = serde_json::json!({
        "name": "Pieter",
        "surname": "van Wyk",
        "username": "pieterv",
        "email": "pieter@example.com",
        "shippingAddress": "3 Church Road",
    });

    let (status, body) = send(&app, json_request(Method::POST, "/api/customers", payload.clone())).await?;
    assert_eq!(status, StatusCode::CREATED);
    let created = parse(&body);
    let id = created["id"].as_str().expect("customer id").to_string();
    assert_eq!(created["shippingAddress"], "3 Church Road");

    let mut changed = payload.clone();
    changed["email"] = Value::from("pvw@example.com");
    let (status, body) = send(
        &app,
        json_request(Method::PUT, &format!("/api/customers/{id}"), changed.clone()),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["email"], "pvw@example.com");

    let (status, _) = send(&app, json_request(Method::PUT, "/api/customers/ghost", changed)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, empty_request(Method::GET, "/api/customers")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body).as_array().map(Vec::len), Some(2));

    let (status, _) = send(&app, empty_request(Method::DELETE, &format!("/api/customers/{id}"))).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, empty_request(Method::GET, &format!("/api/customers/{id}"))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn product_multipart_create_and_update() -> anyhow::Result<()> {
    let app = seeded_app().await?;

    let (status, body) = send(
        &app,
        multipart_request(
            Method::POST,
            "/api/products",
            &[
                ("ProductName", "Rust Sticker Pack"),
                ("Description", "Decorate your laptop"),
                ("Price", "49.50"),
                ("StockAvailable", "200"),
            ],
            Some(("ImageFile", "stickers.png", b"\x89PNG")),
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    let created = parse(&body);
    assert_eq!(created["imageUrl"], "stickers.png");
    assert_eq!(created["price"].as_f64(), Some(49.5));
    let id = created["id"].as_str().expect("product id").to_string();

    let (status, body) = send(
        &app,
        multipart_request(
            Method::PUT,
            &format!("/api/products/{id}"),
            &[
                ("ProductName", "Rust Sticker Pack XL"),
                ("Price", "59.00"),
                ("StockAvailable", "150"),
            ],
            None,
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let updated = parse(&body);
    assert_eq!(updated["productName"], "Rust Sticker Pack XL");
    assert_eq!(updated["stockAvailable"], 150);
    assert_eq!(updated["imageUrl"], "stickers.png");

    let (status, _) = send(
        &app,
        multipart_request(
            Method::POST,
            "/api/products",
            &[("ProductName", "Broken"), ("Price", "ten"), ("StockAvailable", "1")],
            None,
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        multipart_request(
            Method::POST,
            "/api/products",
            &[("ProductName", "Refund"), ("Price", "-1"), ("StockAvailable", "1")],
            None,
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn proof_of_payment_upload_echoes_file_name() -> anyhow::Result<()> {
    let app = seeded_app().await?;

    let (status, body) = send(
        &app,
        multipart_request(
            Method::POST,
            "/api/uploads/proof-of-payment",
            &[("OrderId", "O-1"), ("CustomerName", "Thandi")],
            Some(("ProofOfPayment", "receipt.pdf", b"%PDF-1.7")),
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["fileName"], "receipt.pdf");

    let (status, _) = send(
        &app,
        multipart_request(
            Method::POST,
            "/api/uploads/proof-of-payment",
            &[("OrderId", "O-1")],
            None,
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn unknown_route_gets_json_404() -> anyhow::Result<()> {
    let app = seeded_app().await?;
    let (status, body) = send(&app, empty_request(Method::GET, "/api/nowhere")).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(parse(&body)["path"], "/api/nowhere");
    Ok(())
}

#[tokio::test]
async fn overflowing_order_total_is_rejected_and_stock_is_kept() -> anyhow::Result<()> {
    let api = InMemoryFunctionsApi::new();
    api.create_customer(Customer {
        id: "C1".into(),
        name: "Thandi".into(),
        surname: "Mokoena".into(),
        username: "thandim".into(),
        email: "thandi@example.com".into(),
        shipping_address: "14 Long Street".into(),
    })
    .await?;
    api.create_product(
        Product {
            id: "P-MAX".into(),
            product_name: "Priceless".into(),
            description: "Costs everything".into(),
            price: Decimal::MAX,
            stock_available: 10,
            image_url: None,
        },
        None,
    )
    .await?;
    let app = create_app(AppState::new(Arc::new(api)));

    let (status, _) = send(
        &app,
        json_request(
            Method::POST,
            "/api/orders",
            serde_json::json!({ "customerId": "C1", "productId": "P-MAX", "quantity": 2 }),
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, empty_request(Method::GET, "/api/products/P-MAX")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["stockAvailable"], 10);

    let (_, body) = send(&app, empty_request(Method::GET, "/api/orders")).await?;
    assert_eq!(parse(&body).as_array().map(Vec::len), Some(0));

    Ok(())
}

#[tokio::test]
async fn unknown_status_update_is_rejected() -> anyhow::Result<()> {
    let app = seeded_app().await?;

    let (_, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/orders",
            serde_json::json!({ "customerId": "C1", "productId": "P1", "quantity": 1 }),
        ),
    )
    .await?;
    let id = parse(&body)["id"].as_str().expect("order id").to_string();

    let uri = format!("/api/orders/{id}/status");
    let (status, _) = send(&app, json_request(Method::PATCH, &uri, serde_json::json!({ "status": "Shipped" }))).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, json_request(Method::PATCH, &uri, serde_json::json!({ "status": "teleported" }))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, empty_request(Method::GET, &format!("/api/orders/{id}"))).await?;
    assert_eq!(parse(&body)["status"], "Shipped");

    Ok(())
}
