//! Postgres "exists" lookups against the foreign aggregate tables.
//!
//! One gateway per aggregate type, each a thin wrapper over the same
//! `id = ANY($1)` query. The table name is fixed per type, never
//! caller-supplied.

use async_trait::async_trait;
use kino_core::ids::{CastMemberId, CategoryId, GenreId};
use kino_core::{AppError, ExistenceGateway};
use sqlx::PgPool;

async fn existing_ids(pool: &PgPool, sql: &str, ids: Vec<String>) -> Result<Vec<String>, AppError> {
    sqlx::query_scalar::<_, String>(sql)
        .bind(&ids)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}

macro_rules! pg_existence_gateway {
    ($(#[$doc:meta])* $gateway:ident, $id:ident, $sql:literal) => {
        $(#[$doc])*
        #[derive(Clone)]
        pub struct $gateway {
            pool: PgPool,
        }

        impl $gateway {
            pub fn new(pool: PgPool) -> Self {
                Self { pool }
            }
        }

        #[async_trait]
        impl ExistenceGateway<$id> for $gateway {
            async fn exists_by_ids(&self, ids: &[$id]) -> Result<Vec<$id>, AppError> {
                let raw: Vec<String> = ids.iter().map(|i| i.as_str().to_string()).collect();
                let found = existing_ids(&self.pool, $sql, raw).await?;
                Ok(found.into_iter().map($id::from).collect())
            }
        }
    };
}

pg_existence_gateway!(
    /// Category existence lookup.
    PgCategoryGateway,
    CategoryId,
    "SELECT id FROM categories WHERE id = ANY($1)"
);
pg_existence_gateway!(
    /// Genre existence lookup.
    PgGenreGateway,
    GenreId,
    "SELECT id FROM genres WHERE id = ANY($1)"
);
pg_existence_gateway!(
    /// Cast member existence lookup.
    PgCastMemberGateway,
    CastMemberId,
    "SELECT id FROM cast_members WHERE id = ANY($1)"
);
