use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row};
use tracing::debug;
use weddy_core::domain::venue::VenueRow;
use weddy_core::errors::ApplicationError;
use weddy_core::recommend::{QueryValue, VenueQuery, VenueSource};

use super::RepositoryError;
use crate::DbPool;

/// Runs composed venue queries against `tb_wedding_hall`.
#[derive(Clone)]
pub struct SqlVenueSource {
    pool: DbPool,
}

impl SqlVenueSource {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    async fn fetch_rows(&self, sql: &str, query: &VenueQuery) -> Result<Vec<VenueRow>, RepositoryError> {
        let mut statement = sqlx::query(sql);
        for (_, value) in query.params.iter() {
            statement = match value {
                QueryValue::Int(number) => statement.bind(*number),
                QueryValue::Text(text) => statement.bind(text.clone()),
            };
        }

        let rows = statement.fetch_all(&self.pool).await?;
        rows.iter().map(venue_from_row).collect()
    }
}

#[async_trait]
impl VenueSource for SqlVenueSource {
    async fn fetch(&self, query: &VenueQuery) -> Result<Vec<VenueRow>, ApplicationError> {
        let sql = query.to_numbered()?;
        debug!(
            event_name = "venue.source.fetch",
            sql = %sql,
            param_count = query.params.len(),
            "executing venue query"
        );
        Ok(self.fetch_rows(&sql, query).await?)
    }
}

fn venue_from_row(row: &SqliteRow) -> Result<VenueRow, RepositoryError> {
    Ok(VenueRow {
        name: row.try_get("name")?,
        venue_type: row.try_get("venueType")?,
        parking: row.try_get("parking")?,
        address: row.try_get("address")?,
        phone: row.try_get("phone")?,
        image_url: row.try_get("imageUrl")?,
    })
}
