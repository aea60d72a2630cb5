//! Postgres-backed implementation of the [`VideoRepository`] contract.

use async_trait::async_trait;
use kino_core::ids::VideoId;
use kino_core::models::Video;
use kino_core::{AppError, VideoRepository};
use sqlx::{PgPool, Postgres};

use crate::row::VideoRow;

fn db_err(err: sqlx::Error) -> AppError {
    AppError::Database(err.to_string())
}

#[derive(Clone)]
pub struct PgVideoRepository {
    pool: PgPool,
}

impl PgVideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoRepository for PgVideoRepository {
    async fn create(&self, video: &Video) -> Result<Video, AppError> {
        let row = VideoRow::from_video(video)?;
        let inserted: VideoRow = sqlx::query_as::<Postgres, VideoRow>(
            r#"
            INSERT INTO videos (
                id, title, description, launch_year, duration, rating,
                opened, published, created_at, updated_at,
                video, trailer, banner, thumbnail, thumbnail_half,
                categories, genres, cast_members
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            RETURNING *
            "#,
        )
        .bind(&row.id)
        .bind(&row.title)
        .bind(&row.description)
        .bind(row.launch_year)
        .bind(row.duration)
        .bind(&row.rating)
        .bind(row.opened)
        .bind(row.published)
        .bind(row.created_at)
        .bind(row.updated_at)
        .bind(&row.video)
        .bind(&row.trailer)
        .bind(&row.banner)
        .bind(&row.thumbnail)
        .bind(&row.thumbnail_half)
        .bind(&row.categories)
        .bind(&row.genres)
        .bind(&row.cast_members)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        tracing::debug!(video_id = %video.id(), "Inserted video row");
        inserted.into_video()
    }

    async fn update(&self, video: &Video) -> Result<Video, AppError> {
        let row = VideoRow::from_video(video)?;
        let updated: Option<VideoRow> = sqlx::query_as::<Postgres, VideoRow>(
            r#"
            UPDATE videos SET
                title = $2, description = $3, launch_year = $4, duration = $5,
                rating = $6, opened = $7, published = $8, updated_at = $9,
                video = $10, trailer = $11, banner = $12, thumbnail = $13,
                thumbnail_half = $14, categories = $15, genres = $16, cast_members = $17
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(&row.id)
        .bind(&row.title)
        .bind(&row.description)
        .bind(row.launch_year)
        .bind(row.duration)
        .bind(&row.rating)
        .bind(row.opened)
        .bind(row.published)
        .bind(row.updated_at)
        .bind(&row.video)
        .bind(&row.trailer)
        .bind(&row.banner)
        .bind(&row.thumbnail)
        .bind(&row.thumbnail_half)
        .bind(&row.categories)
        .bind(&row.genres)
        .bind(&row.cast_members)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        match updated {
            Some(r) => r.into_video(),
            None => Err(AppError::NotFound(format!(
                "Video with ID {} was not found",
                video.id()
            ))),
        }
    }

    async fn find_by_id(&self, id: &VideoId) -> Result<Option<Video>, AppError> {
        let row: Option<VideoRow> =
            sqlx::query_as::<Postgres, VideoRow>("SELECT * FROM videos WHERE id = $1")
                .bind(id.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err)?;

        row.map(VideoRow::into_video).transpose()
    }

    async fn delete_by_id(&self, id: &VideoId) -> Result<(), AppError> {
        sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
