//! Sample product catalog seeding
//!
//! Inserted into newly created databases so product search returns useful
//! results before any real catalog is loaded.

use crate::Result;
use sqlx::SqlitePool;

struct SeedProduct {
    product_id: &'static str,
    brand: &'static str,
    name: &'static str,
    description: &'static str,
    category: &'static str,
    variants: &'static [(&'static str, f64)],
}

const SAMPLE_PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        product_id: "PROD-001",
        brand: "Amul",
        name: "Full Cream Milk",
        description: "Fresh full cream milk from Amul",
        category: "Dairy",
        variants: &[("500ml", 30.0), ("1L", 58.0)],
    },
    SeedProduct {
        product_id: "PROD-002",
        brand: "Amul",
        name: "Toned Milk",
        description: "Low fat toned milk",
        category: "Dairy",
        variants: &[("500ml", 26.0), ("1L", 50.0)],
    },
    SeedProduct {
        product_id: "PROD-003",
        brand: "Parle",
        name: "Marie Gold",
        description: "Classic Marie biscuits",
        category: "Biscuits",
        variants: &[("100g", 20.0), ("200g", 38.0), ("500g", 85.0)],
    },
    SeedProduct {
        product_id: "PROD-004",
        brand: "Parle",
        name: "Hide & Seek",
        description: "Chocolate chip cookies",
        category: "Biscuits",
        variants: &[("100g", 35.0), ("200g", 65.0)],
    },
    SeedProduct {
        product_id: "PROD-005",
        brand: "Tata",
        name: "Tea Gold",
        description: "Premium black tea",
        category: "Beverages",
        variants: &[("250g", 125.0), ("500g", 240.0), ("1kg", 450.0)],
    },
    SeedProduct {
        product_id: "PROD-006",
        brand: "Britannia",
        name: "Good Day",
        description: "Butter cookies",
        category: "Biscuits",
        variants: &[("100g", 25.0), ("200g", 48.0)],
    },
    SeedProduct {
        product_id: "PROD-007",
        brand: "Nestle",
        name: "Maggi Noodles",
        description: "2-minute instant noodles",
        category: "Instant Food",
        variants: &[("70g", 14.0), ("140g", 28.0), ("280g", 52.0)],
    },
    SeedProduct {
        product_id: "PROD-008",
        brand: "Haldiram",
        name: "Aloo Bhujia",
        description: "Crispy potato snack",
        category: "Snacks",
        variants: &[("150g", 50.0), ("400g", 120.0)],
    },
    SeedProduct {
        product_id: "PROD-009",
        brand: "Coca-Cola",
        name: "Coca-Cola",
        description: "Refreshing cola drink",
        category: "Beverages",
        variants: &[("250ml", 20.0), ("500ml", 40.0), ("1.25L", 75.0), ("2L", 95.0)],
    },
    SeedProduct {
        product_id: "PROD-010",
        brand: "Lays",
        name: "Classic Salted",
        description: "Crispy potato chips",
        category: "Snacks",
        variants: &[("25g", 10.0), ("52g", 20.0), ("95g", 40.0)],
    },
];

/// Insert the sample catalog. Skips products whose `product_id` already
/// exists, so calling this twice does not duplicate rows.
/// Returns the number of products inserted.
pub async fn seed_sample_products(pool: &SqlitePool) -> Result<usize> {
    let mut inserted = 0;

    let mut tx = pool.begin().await?;

    for product in SAMPLE_PRODUCTS {
        let existing: Option<i64> =
            sqlx::query_scalar("SELECT id FROM products WHERE product_id = ?")
                .bind(product.product_id)
                .fetch_optional(&mut *tx)
                .await?;

        if existing.is_some() {
            continue;
        }

        let product_row_id: i64 = sqlx::query_scalar(
            "INSERT INTO products (product_id, brand, name, description, category)
             VALUES (?, ?, ?, ?, ?)
             RETURNING id",
        )
        .bind(product.product_id)
        .bind(product.brand)
        .bind(product.name)
        .bind(product.description)
        .bind(product.category)
        .fetch_one(&mut *tx)
        .await?;

        for (size, price) in product.variants {
            sqlx::query(
                "INSERT INTO product_variants (product_id, size, price) VALUES (?, ?, ?)",
            )
            .bind(product_row_id)
            .bind(size)
            .bind(price)
            .execute(&mut *tx)
            .await?;
        }

        inserted += 1;
    }

    tx.commit().await?;
    Ok(inserted)
}
