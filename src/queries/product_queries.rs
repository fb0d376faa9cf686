use sqlx::PgPool;

use crate::{
    error::Result,
    models::{NewProduct, Product},
};

pub async fn find_all(pool: &PgPool) -> Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(products)
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(product)
}

pub async fn create_product(pool: &PgPool, req: &NewProduct) -> Result<Product> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products (
            name, description, brand, price, category, release_date,
            product_available, stock_quantity, image_name, image_type, image_data
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(&req.name)
    .bind(&req.description)
    .bind(&req.brand)
    .bind(req.price)
    .bind(&req.category)
    .bind(req.release_date)
    .bind(req.product_available)
    .bind(req.stock_quantity)
    .bind(&req.image_name)
    .bind(&req.image_type)
    .bind(&req.image_data)
    .fetch_one(pool)
    .await?;

    Ok(product)
}

/// Full overwrite of the row; `None` when no row carries `id`.
pub async fn update_product(pool: &PgPool, id: i32, req: &NewProduct) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        UPDATE products
        SET
            name = $1,
            description = $2,
            brand = $3,
            price = $4,
            category = $5,
            release_date = $6,
            product_available = $7,
            stock_quantity = $8,
            image_name = $9,
            image_type = $10,
            image_data = $11
        WHERE id = $12
        RETURNING *
        "#,
    )
    .bind(&req.name)
    .bind(&req.description)
    .bind(&req.brand)
    .bind(req.price)
    .bind(&req.category)
    .bind(req.release_date)
    .bind(req.product_available)
    .bind(req.stock_quantity)
    .bind(&req.image_name)
    .bind(&req.image_type)
    .bind(&req.image_data)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(product)
}

pub async fn delete_product(pool: &PgPool, id: i32) -> Result<u64> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Wraps `keyword` for `ILIKE ... ESCAPE '\'` so it matches literally.
pub fn like_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in keyword.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

pub async fn search_products(pool: &PgPool, keyword: &str) -> Result<Vec<Product>> {
    let pattern = like_pattern(keyword);

    let products = sqlx::query_as::<_, Product>(
        r#"
        SELECT * FROM products
        WHERE name ILIKE $1 ESCAPE '\'
           OR description ILIKE $1 ESCAPE '\'
           OR brand ILIKE $1 ESCAPE '\'
           OR category ILIKE $1 ESCAPE '\'
        ORDER BY id
        "#,
    )
    .bind(pattern)
    .fetch_all(pool)
    .await?;

    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn plain_keyword_is_wrapped() {
        assert_eq!(like_pattern("pen"), "%pen%");
        assert_eq!(like_pattern(""), "%%");
    }

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(like_pattern("%"), r"%\%%");
        assert_eq!(like_pattern("a_b"), r"%a\_b%");
        assert_eq!(like_pattern(r"c:\dir"), r"%c:\\dir%");
    }
}
