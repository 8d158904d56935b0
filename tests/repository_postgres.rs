//! Repository tests against a real PostgreSQL database.
//!
//! Run with `DATABASE_URL` pointing at a server where the test user may create
//! databases: `cargo test --test repository_postgres -- --ignored`.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;

use storefront_api::domain::entities::{NewAuditLog, OrderStatus};
use storefront_api::domain::shipping::price_rates;
use storefront_api::domain::repositories::{
    AuditLogFilter, AuditRepository, CatalogRepository, CheckoutRepository, DiscountFilter,
    NewApiToken, StorefrontRepository, TokenRepository,
};
use storefront_api::infrastructure::persistence::{
    PgAuditRepository, PgCatalogRepository, PgCheckoutRepository, PgStorefrontRepository,
    PgTokenRepository,
};

async fn insert_category(pool: &PgPool, slug: &str, parent_id: Option<i64>) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO product_categories (name, slug, parent_id) VALUES ($1, $1, $2) RETURNING id",
    )
    .bind(slug)
    .bind(parent_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn insert_product(pool: &PgPool, slug: &str, category_id: Option<i64>) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO products (name, slug, category_id, price, is_published)
         VALUES ($1, $1, $2, 100, TRUE) RETURNING id",
    )
    .bind(slug)
    .bind(category_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn insert_offer(pool: &PgPool, product_id: i64, price: i64, discount: Option<i64>) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO vendor_offers (product_id, vendor_name, price, discount_price)
         VALUES ($1, 'vendor', $2, $3) RETURNING id",
    )
    .bind(product_id)
    .bind(Decimal::from(price))
    .bind(discount.map(Decimal::from))
    .fetch_one(pool)
    .await
    .unwrap()
}

fn new_log(
    path: &str,
    status_code: i32,
    user: Option<(&str, &str)>,
    minutes_ago: i64,
) -> NewAuditLog {
    NewAuditLog {
        occurred_at: Utc::now() - Duration::minutes(minutes_ago),
        user_id: user.map(|(id, _)| id.to_string()),
        user_name: user.map(|(_, name)| name.to_string()),
        method: "GET".to_string(),
        path: path.to_string(),
        query_string: None,
        status_code,
        duration_ms: 3,
        ip: Some("10.1.2.3".to_string()),
        user_agent: Some("curl/8.0".to_string()),
    }
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_discounted_products_best_offer_and_category_scope(pool: PgPool) {
    let root = insert_category(&pool, "electronics", None).await;
    let child = insert_category(&pool, "phones", Some(root)).await;
    let other = insert_category(&pool, "garden", None).await;

    let phone = insert_product(&pool, "phone", Some(child)).await;
    insert_offer(&pool, phone, 100, Some(90)).await;
    let best = insert_offer(&pool, phone, 100, Some(60)).await;

    let shovel = insert_product(&pool, "shovel", Some(other)).await;
    insert_offer(&pool, shovel, 100, Some(80)).await;

    let plain = insert_product(&pool, "plain", Some(other)).await;
    insert_offer(&pool, plain, 100, None).await;

    let repo = PgCatalogRepository::new(Arc::new(pool));

    let all = repo
        .discounted_products(DiscountFilter::new(Utc::now(), 10))
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].product_id, phone);
    assert_eq!(all[0].offer_id, best);

    let scoped = repo
        .discounted_products(DiscountFilter::new(Utc::now(), 10).with_categories(vec![root]))
        .await
        .unwrap();
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].product_id, phone);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_best_sellers_count_sold_statuses_only(pool: PgPool) {
    let a = insert_product(&pool, "a", None).await;
    let b = insert_product(&pool, "b", None).await;

    for (status, product_id, quantity) in [
        ("delivered", a, 3),
        ("shipped", b, 2),
        ("cancelled", b, 10),
        ("pending", b, 10),
    ] {
        let order_id: i64 =
            sqlx::query_scalar("INSERT INTO orders (user_id, status) VALUES ('u', $1) RETURNING id")
                .bind(status)
                .fetch_one(&pool)
                .await
                .unwrap();
        sqlx::query(
            "INSERT INTO order_items (order_id, product_id, quantity, unit_price) VALUES ($1, $2, $3, 100)",
        )
        .bind(order_id)
        .bind(product_id)
        .bind(quantity)
        .execute(&pool)
        .await
        .unwrap();
    }

    let repo = PgCatalogRepository::new(Arc::new(pool));
    let best = repo
        .best_sellers(OrderStatus::SOLD.to_vec(), 10)
        .await
        .unwrap();

    assert_eq!(best.len(), 2);
    assert_eq!(best[0].product_id, a);
    assert_eq!(best[0].total_sold, 3);
    assert_eq!(best[1].total_sold, 2);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_store_settings_absent(pool: PgPool) {
    let repo = PgStorefrontRepository::new(Arc::new(pool));

    assert!(repo.store_settings().await.unwrap().is_none());
    assert!(repo.home_sections().await.unwrap().is_empty());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_find_address_checks_owner(pool: PgPool) {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO addresses (user_id, recipient_name, country_code, line1)
         VALUES ('u-1', 'Ann', 'IR', 'Street 1') RETURNING id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    let repo = PgCheckoutRepository::new(Arc::new(pool));

    assert!(repo.find_address(id, "u-1").await.unwrap().is_some());
    assert!(repo.find_address(id, "u-2").await.unwrap().is_none());
    assert!(repo.cart_lines("u-1").await.unwrap().is_empty());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_cart_lines_skip_deleted_items_and_offers(pool: PgPool) {
    let product = insert_product(&pool, "kettle", None).await;
    let live_offer = insert_offer(&pool, product, 100, None).await;
    let dead_offer = insert_offer(&pool, product, 90, None).await;
    sqlx::query("UPDATE vendor_offers SET is_deleted = TRUE WHERE id = $1")
        .bind(dead_offer)
        .execute(&pool)
        .await
        .unwrap();

    let cart_id: i64 =
        sqlx::query_scalar("INSERT INTO carts (user_id) VALUES ('u-1') RETURNING id")
            .fetch_one(&pool)
            .await
            .unwrap();

    for (offer_id, is_deleted) in [(live_offer, false), (live_offer, true), (dead_offer, false)] {
        sqlx::query(
            "INSERT INTO cart_items (cart_id, vendor_offer_id, quantity, is_deleted)
             VALUES ($1, $2, 1, $3)",
        )
        .bind(cart_id)
        .bind(offer_id)
        .bind(is_deleted)
        .execute(&pool)
        .await
        .unwrap();
    }

    let repo = PgCheckoutRepository::new(Arc::new(pool));
    let lines = repo.cart_lines("u-1").await.unwrap();

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].offer.id, live_offer);
    assert!(repo.cart_lines("u-2").await.unwrap().is_empty());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_active_zones_skip_inactive_and_deleted(pool: PgPool) {
    let mut ids = Vec::new();
    for (name, sort_order, is_active, is_deleted) in [
        ("national", 10, true, false),
        ("paused", 0, false, false),
        ("retired", 0, true, true),
        ("capital", 5, true, false),
    ] {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO shipping_zones (name, country_code, sort_order, is_active, is_deleted)
             VALUES ($1, 'IR', $2, $3, $4) RETURNING id",
        )
        .bind(name)
        .bind(sort_order)
        .bind(is_active)
        .bind(is_deleted)
        .fetch_one(&pool)
        .await
        .unwrap();
        ids.push(id);
    }

    let repo = PgCheckoutRepository::new(Arc::new(pool));
    let zones = repo.active_zones().await.unwrap();

    let names: Vec<&str> = zones.iter().map(|z| z.name.as_str()).collect();
    assert_eq!(names, vec!["capital", "national"]);
    assert!(zones.iter().all(|z| z.id != ids[1] && z.id != ids[2]));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_zone_rates_report_deleted_methods(pool: PgPool) {
    let zone_id: i64 =
        sqlx::query_scalar("INSERT INTO shipping_zones (name) VALUES ('everywhere') RETURNING id")
            .fetch_one(&pool)
            .await
            .unwrap();

    for (code, method_deleted, rate_deleted) in [
        ("standard", false, false),
        ("legacy", true, false),
        ("express", false, true),
    ] {
        let method_id: i64 = sqlx::query_scalar(
            "INSERT INTO shipping_methods (name, code, is_deleted) VALUES ($1, $1, $2) RETURNING id",
        )
        .bind(code)
        .bind(method_deleted)
        .fetch_one(&pool)
        .await
        .unwrap();

        sqlx::query(
            "INSERT INTO shipping_rates (zone_id, method_id, price, is_deleted) VALUES ($1, $2, 10, $3)",
        )
        .bind(zone_id)
        .bind(method_id)
        .bind(rate_deleted)
        .execute(&pool)
        .await
        .unwrap();
    }

    let repo = PgCheckoutRepository::new(Arc::new(pool));
    let rates = repo.zone_rates(zone_id).await.unwrap();
    assert_eq!(rates.len(), 3);

    let legacy = rates.iter().find(|r| r.method_code == "legacy").unwrap();
    assert!(legacy.method_is_deleted);
    let express = rates.iter().find(|r| r.method_code == "express").unwrap();
    assert!(express.is_deleted);

    let options = price_rates(&rates, Decimal::from(100));
    let codes: Vec<&str> = options.iter().map(|o| o.method_code.as_str()).collect();
    assert_eq!(codes, vec!["standard"]);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_audit_list_filters_and_reports(pool: PgPool) {
    let repo = PgAuditRepository::new(Arc::new(pool));

    repo.record(new_log("/api/public/settings", 200, None, 5))
        .await
        .unwrap();
    repo.record(new_log("/api/public/settings", 200, None, 4))
        .await
        .unwrap();
    repo.record(new_log("/api/checkout/shipping-options", 400, Some(("u-1", "Ann")), 3))
        .await
        .unwrap();
    repo.record(new_log("/api/public/100%_off", 404, None, 60 * 48))
        .await
        .unwrap();

    let newest = repo.list(AuditLogFilter::new(0, 10)).await.unwrap();
    assert_eq!(newest.len(), 4);
    assert_eq!(newest[0].path, "/api/checkout/shipping-options");

    let literal = AuditLogFilter::new(0, 10).with_search(Some("100%_".to_string()));
    assert_eq!(repo.count(literal).await.unwrap(), 1);

    let errors = AuditLogFilter::new(0, 10).with_status_code(Some(400));
    assert_eq!(repo.count(errors).await.unwrap(), 1);

    let since = Utc::now() - Duration::hours(24);
    let counts = repo.request_counts(since).await.unwrap();
    assert_eq!(counts.total, 3);
    assert_eq!(counts.errors, 1);

    let paths = repo.top_paths(since, 8).await.unwrap();
    assert_eq!(paths[0].key, "/api/public/settings");
    assert_eq!(paths[0].count, 2);

    let users = repo.top_users(since, 8).await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].key, "Ann");

    let first = newest.last().unwrap();
    let found = repo.find_by_id(first.id).await.unwrap().unwrap();
    assert_eq!(found.status_code, 404);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_token_lifecycle(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));

    let token = repo
        .create_token(NewApiToken {
            name: "ops".to_string(),
            token_hash: "hash-1".to_string(),
            user_id: "u-1".to_string(),
            user_name: "Ann".to_string(),
            permissions: vec!["reports.read".to_string()],
        })
        .await
        .unwrap();

    let active = repo.find_active("hash-1").await.unwrap().unwrap();
    assert_eq!(active.permissions, vec!["reports.read".to_string()]);

    repo.update_last_used("hash-1").await.unwrap();
    assert!(
        repo.find_by_name("ops")
            .await
            .unwrap()
            .unwrap()
            .last_used_at
            .is_some()
    );

    repo.revoke_token(token.id).await.unwrap();
    assert!(repo.find_active("hash-1").await.unwrap().is_none());
    assert!(repo.revoke_token(token.id).await.is_err());
}
