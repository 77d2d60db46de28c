//! Database queries for saved quotations

use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{QuotationInput, QuotationRecord, SubmittedBy};

const RETURNING: &str = r#"
    RETURNING
        id, client, request, language, currency, total_cost,
        submitted_by_email, submitted_by_name,
        created_at, updated_at, deleted, deleted_by, deleted_at
"#;

/// Insert a new quotation
pub async fn insert_quotation(
    pool: &PgPool,
    input: &QuotationInput,
    submitted_by: &SubmittedBy,
) -> Result<QuotationRecord> {
    let sql = format!(
        r#"
        INSERT INTO quotations (
            id, client, request, language, currency, total_cost,
            submitted_by_email, submitted_by_name
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        {RETURNING}
        "#
    );

    let record = sqlx::query_as::<_, QuotationRecord>(&sql)
        .bind(Uuid::new_v4())
        .bind(Json(&input.client))
        .bind(Json(&input.request))
        .bind(input.language.code())
        .bind(input.currency.code())
        .bind(input.total_cost)
        .bind(&submitted_by.email)
        .bind(&submitted_by.full_name)
        .fetch_one(pool)
        .await?;

    Ok(record)
}

/// List quotations, newest first.
///
/// `submitted_by` restricts the list to one user's quotations and `search`
/// to clients whose full name contains the term, ignoring case. Soft-deleted
/// rows are only included on request.
pub async fn list_quotations(
    pool: &PgPool,
    submitted_by: Option<&str>,
    search: Option<&str>,
    include_deleted: bool,
) -> Result<Vec<QuotationRecord>> {
    let quotations = sqlx::query_as::<_, QuotationRecord>(
        r#"
        SELECT
            id, client, request, language, currency, total_cost,
            submitted_by_email, submitted_by_name,
            created_at, updated_at, deleted, deleted_by, deleted_at
        FROM quotations
        WHERE ($1::text IS NULL OR lower(submitted_by_email) = lower($1))
          AND ($2::text IS NULL
               OR (coalesce(client->>'first_name', '') || ' ' || coalesce(client->>'last_name', ''))
                  ILIKE $2)
          AND ($3 OR deleted = false)
        ORDER BY created_at DESC
        "#,
    )
    .bind(submitted_by)
    .bind(search.map(name_pattern))
    .bind(include_deleted)
    .fetch_all(pool)
    .await?;

    Ok(quotations)
}

/// `ILIKE` pattern matching `term` anywhere, with wildcards in it escaped
fn name_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Get a quotation by id, deleted or not
pub async fn get_quotation(pool: &PgPool, id: Uuid) -> Result<QuotationRecord> {
    let quotation = sqlx::query_as::<_, QuotationRecord>(
        r#"
        SELECT
            id, client, request, language, currency, total_cost,
            submitted_by_email, submitted_by_name,
            created_at, updated_at, deleted, deleted_by, deleted_at
        FROM quotations
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(quotation)
}

/// Replace the contents of a live quotation
pub async fn update_quotation(
    pool: &PgPool,
    id: Uuid,
    input: &QuotationInput,
) -> Result<QuotationRecord> {
    let sql = format!(
        r#"
        UPDATE quotations
        SET client = $2,
            request = $3,
            language = $4,
            currency = $5,
            total_cost = $6,
            updated_at = NOW()
        WHERE id = $1
          AND deleted = false
        {RETURNING}
        "#
    );

    let record = sqlx::query_as::<_, QuotationRecord>(&sql)
        .bind(id)
        .bind(Json(&input.client))
        .bind(Json(&input.request))
        .bind(input.language.code())
        .bind(input.currency.code())
        .bind(input.total_cost)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(record)
}

/// Mark a quotation deleted, recording who did it
pub async fn soft_delete_quotation(
    pool: &PgPool,
    id: Uuid,
    deleted_by: &str,
) -> Result<QuotationRecord> {
    let sql = format!(
        r#"
        UPDATE quotations
        SET deleted = true,
            deleted_by = $2,
            deleted_at = NOW(),
            updated_at = NOW()
        WHERE id = $1
          AND deleted = false
        {RETURNING}
        "#
    );

    let record = sqlx::query_as::<_, QuotationRecord>(&sql)
        .bind(id)
        .bind(deleted_by)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(record)
}

/// Bring a soft-deleted quotation back
pub async fn restore_quotation(pool: &PgPool, id: Uuid) -> Result<QuotationRecord> {
    let sql = format!(
        r#"
        UPDATE quotations
        SET deleted = false,
            deleted_by = NULL,
            deleted_at = NULL,
            updated_at = NOW()
        WHERE id = $1
          AND deleted = true
        {RETURNING}
        "#
    );

    let record = sqlx::query_as::<_, QuotationRecord>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(record)
}

/// Remove a quotation for good
pub async fn delete_quotation_permanently(pool: &PgPool, id: Uuid) -> Result<()> {
    let result = sqlx::query("DELETE FROM quotations WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(())
}
