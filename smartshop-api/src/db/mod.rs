//! Store layer: product catalog queries and order creation

use chrono::Utc;
use smartshop_common::api::{OrderRequest, ProductMatch, ProductVariant};
use smartshop_common::db::models::{ProductRow, ProductVariantRow};
use smartshop_common::Result;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

/// Quantity options offered for any catalog product
const CATALOG_QUANTITIES: [i64; 6] = [1, 2, 3, 4, 5, 10];

/// Quantity options offered on the fallback product
const FALLBACK_QUANTITIES: [i64; 5] = [1, 2, 3, 4, 5];

const SEARCH_LIMIT: i64 = 10;

const PRODUCT_COLUMNS: &str =
    "id, product_id, brand, name, description, image_url, category, is_active";

/// Search active products by brand and/or name (case-insensitive substring
/// match, OR across the two fields). With neither criterion set this lists
/// products unconditionally. Results capped at 10.
pub async fn search_products(
    pool: &SqlitePool,
    brand: Option<&str>,
    name: Option<&str>,
    quantity: Option<&str>,
) -> Result<Vec<ProductMatch>> {
    let brand_pattern = brand
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("%{}%", s.to_lowercase()));
    let name_pattern = name
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("%{}%", s.to_lowercase()));

    let products: Vec<ProductRow> = match (&brand_pattern, &name_pattern) {
        (Some(b), Some(n)) => {
            sqlx::query_as(&format!(
                "SELECT {PRODUCT_COLUMNS} FROM products
                 WHERE is_active = 1 AND (lower(brand) LIKE ? OR lower(name) LIKE ?)
                 LIMIT ?"
            ))
            .bind(b)
            .bind(n)
            .bind(SEARCH_LIMIT)
            .fetch_all(pool)
            .await?
        }
        (Some(b), None) => {
            sqlx::query_as(&format!(
                "SELECT {PRODUCT_COLUMNS} FROM products
                 WHERE is_active = 1 AND lower(brand) LIKE ?
                 LIMIT ?"
            ))
            .bind(b)
            .bind(SEARCH_LIMIT)
            .fetch_all(pool)
            .await?
        }
        (None, Some(n)) => {
            sqlx::query_as(&format!(
                "SELECT {PRODUCT_COLUMNS} FROM products
                 WHERE is_active = 1 AND lower(name) LIKE ?
                 LIMIT ?"
            ))
            .bind(n)
            .bind(SEARCH_LIMIT)
            .fetch_all(pool)
            .await?
        }
        (None, None) => {
            sqlx::query_as(&format!(
                "SELECT {PRODUCT_COLUMNS} FROM products WHERE is_active = 1 LIMIT ?"
            ))
            .bind(SEARCH_LIMIT)
            .fetch_all(pool)
            .await?
        }
    };

    let mut matches = Vec::with_capacity(products.len());
    for product in products {
        matches.push(product_to_match(pool, product).await?);
    }

    info!(
        "Found {} products for brand={:?}, name={:?}, quantity={:?}",
        matches.len(),
        brand,
        name,
        quantity
    );
    Ok(matches)
}

/// List active products, capped at `limit`
pub async fn get_all_products(pool: &SqlitePool, limit: i64) -> Result<Vec<ProductMatch>> {
    let products: Vec<ProductRow> = sqlx::query_as(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE is_active = 1 LIMIT ?"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    let mut matches = Vec::with_capacity(products.len());
    for product in products {
        matches.push(product_to_match(pool, product).await?);
    }
    Ok(matches)
}

/// Convert a product row plus its variants into the API match shape.
/// Products without variants get a default Standard / 99.0 INR variant.
async fn product_to_match(pool: &SqlitePool, product: ProductRow) -> Result<ProductMatch> {
    let variant_rows: Vec<ProductVariantRow> = sqlx::query_as(
        "SELECT id, product_id, size, price, currency, stock
         FROM product_variants WHERE product_id = ? ORDER BY id",
    )
    .bind(product.id)
    .fetch_all(pool)
    .await?;

    let mut variants: Vec<ProductVariant> = variant_rows
        .into_iter()
        .map(|v| ProductVariant {
            size: v.size,
            price: v.price,
            currency: v.currency,
        })
        .collect();

    if variants.is_empty() {
        variants.push(ProductVariant {
            size: "Standard".to_string(),
            price: 99.0,
            currency: "INR".to_string(),
        });
    }

    let available_sizes = variants.iter().map(|v| v.size.clone()).collect();

    Ok(ProductMatch {
        product_id: product.product_id,
        brand: product.brand,
        name: product.name,
        description: product.description,
        image_url: product.image_url,
        available_sizes,
        available_quantities: CATALOG_QUANTITIES.to_vec(),
        variants,
    })
}

/// Synthetic product returned when a search finds nothing
pub fn fallback_product(
    brand: Option<&str>,
    name: Option<&str>,
    quantity: Option<&str>,
) -> ProductMatch {
    let size = quantity.unwrap_or("Standard").to_string();

    ProductMatch {
        product_id: "fallback-001".to_string(),
        brand: brand.unwrap_or("Unknown").to_string(),
        name: name.unwrap_or("Unknown Product").to_string(),
        description: Some("Product details not found in database".to_string()),
        image_url: None,
        available_sizes: vec![size.clone()],
        available_quantities: FALLBACK_QUANTITIES.to_vec(),
        variants: vec![ProductVariant {
            size,
            price: 99.0,
            currency: "INR".to_string(),
        }],
    }
}

/// Create an order with its items in one transaction.
/// Returns the generated order ID (`ORD-YYYYMMDD-XXXXXX`).
pub async fn create_order(pool: &SqlitePool, request: &OrderRequest) -> Result<String> {
    let suffix = Uuid::new_v4().simple().to_string()[..6].to_uppercase();
    let order_id = format!("ORD-{}-{}", Utc::now().format("%Y%m%d"), suffix);

    let mut tx = pool.begin().await?;

    let order_row_id: i64 = sqlx::query_scalar(
        "INSERT INTO orders (order_id, total_amount, currency, status)
         VALUES (?, ?, ?, 'confirmed')
         RETURNING id",
    )
    .bind(&order_id)
    .bind(request.total_amount)
    .bind(&request.currency)
    .fetch_one(&mut *tx)
    .await?;

    for item in &request.items {
        sqlx::query(
            "INSERT INTO order_items (order_id, product_id, size, quantity, unit_price, line_total)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(order_row_id)
        .bind(&item.product_id)
        .bind(&item.size)
        .bind(item.quantity)
        .bind(item.unit_price)
        .bind(item.unit_price * item.quantity as f64)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    info!("Order created: {}, total: {}", order_id, request.total_amount);
    Ok(order_id)
}
