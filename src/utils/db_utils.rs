use axum::http::StatusCode;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{ColumnTrait, DbErr, SqlErr};

use crate::utils::api_response::ServiceError;

/// Classifies a storage error. Unique violations become 409s, the rest 500s.
/// Nothing is retried here.
pub fn map_db_err(err: DbErr, context: &str) -> ServiceError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::warn!("{}: unique constraint violated: {}", context, detail);
            if detail.contains("slug") {
                (
                    StatusCode::CONFLICT,
                    "SLUG_CONFLICT",
                    "A record with this slug already exists".to_string(),
                )
            } else {
                (
                    StatusCode::CONFLICT,
                    "DUPLICATE",
                    "A record with these values already exists".to_string(),
                )
            }
        }
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            tracing::warn!("{}: foreign key violated: {}", context, detail);
            (
                StatusCode::BAD_REQUEST,
                "INVALID_REFERENCE",
                "Referenced record does not exist".to_string(),
            )
        }
        _ => {
            tracing::error!("{}: {}", context, err);
            (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERR", format!("{} failed", context))
        }
    }
}

/// Case-insensitive substring match, `LOWER(col) LIKE '%needle%'`.
/// Plain `LIKE` is case-sensitive on Postgres.
pub fn icontains<C: ColumnTrait>(column: C, needle: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col((column.entity_name(), column))))
        .like(format!("%{}%", needle.to_lowercase()))
}
