use sqlx::Executor;
use weddy_core::domain::venue::VenueType;

use crate::connection::DbPool;
use crate::repositories::RepositoryError;

/// Ids present in the seed file, one per row.
const SEED_VENUE_IDS: &[i64] = &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

/// Regions the dataset must cover for the end-to-end scenarios.
const SEED_REGIONS: &[&str] = &["서울", "부산", "경기", "제주", "대구"];

/// Deterministic venue catalogue used by the CLI `seed` command and by
/// database-backed tests. Every venue type appears at least once.
pub struct WeddingHallSeed;

impl WeddingHallSeed {
    pub const SQL: &str = include_str!("../../../config/fixtures/wedding_hall_seed.sql");

    /// Loads the catalogue in a single transaction. Reloading replaces rows
    /// with the same ids.
    pub async fn load(pool: &DbPool) -> Result<SeedResult, RepositoryError> {
        let mut tx = pool.begin().await?;

        tx.execute(sqlx::query(Self::SQL)).await?;
        tx.commit().await?;

        Ok(SeedResult { venues_seeded: SEED_VENUE_IDS.len() })
    }

    pub async fn verify(pool: &DbPool) -> Result<VerificationResult, RepositoryError> {
        let mut checks = Vec::new();

        let ids = SEED_VENUE_IDS.iter().map(i64::to_string).collect::<Vec<_>>().join(", ");
        let existing: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(1) FROM tb_wedding_hall WHERE id IN ({ids})"))
                .fetch_one(pool)
                .await?;
        checks.push(("seed-rows", existing == SEED_VENUE_IDS.len() as i64));

        for venue_type in VenueType::ALL {
            let present: i64 = sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM tb_wedding_hall WHERE venueType = ?1)",
            )
            .bind(venue_type.code())
            .fetch_one(pool)
            .await?;
            checks.push((venue_type.code(), present == 1));
        }

        for region in SEED_REGIONS {
            let present: i64 = sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM tb_wedding_hall WHERE address LIKE ?1)",
            )
            .bind(format!("%{region}%"))
            .fetch_one(pool)
            .await?;
            checks.push((*region, present == 1));
        }

        let all_present = checks.iter().all(|(_, ok)| *ok);
        Ok(VerificationResult { all_present, checks })
    }
}

#[derive(Debug)]
pub struct SeedResult {
    pub venues_seeded: usize,
}

#[derive(Debug)]
pub struct VerificationResult {
    pub all_present: bool,
    pub checks: Vec<(&'static str, bool)>,
}
