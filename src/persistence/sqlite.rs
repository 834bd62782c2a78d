//! SQLite-backed [`DataContext`] built on a `sqlx` connection pool.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{Sqlite, SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::{DataContext, StoreError};
use crate::domain::Activity;

/// Schema migrations, embedded at compile time from `migrations/`.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Relational persistence for activities.
///
/// A connection is checked out of the pool per operation and returned when the
/// operation completes, so concurrent requests never share a connection.
#[derive(Clone)]
pub struct SqliteContext {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct ActivityRow {
    id: Uuid,
    title: String,
    date: Option<DateTime<Utc>>,
    description: Option<String>,
    category: Option<String>,
    city: Option<String>,
    venue: Option<String>,
}

impl From<ActivityRow> for Activity {
    fn from(row: ActivityRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            date: row.date,
            description: row.description,
            category: row.category,
            city: row.city,
            venue: row.venue,
        }
    }
}

impl SqliteContext {
    /// Opens a pool for `url`, creating the database file if it is missing.
    ///
    /// In-memory URLs (`sqlite::memory:`) are pinned to a single connection that is
    /// never reaped; the database disappears with its last connection.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let in_memory = url.contains(":memory:") || url.contains("mode=memory");

        let pool = if in_memory {
            SqlitePoolOptions::new()
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(max_connections)
                .connect_with(options)
                .await?
        };

        info!(url, in_memory, "Opened SQLite pool");
        Ok(Self { pool })
    }
}

async fn insert_row<'e, E>(executor: E, activity: &Activity) -> Result<(), StoreError>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        INSERT INTO activities (id, title, date, description, category, city, venue)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(activity.id)
    .bind(&activity.title)
    .bind(activity.date)
    .bind(&activity.description)
    .bind(&activity.category)
    .bind(&activity.city)
    .bind(&activity.venue)
    .execute(executor)
    .await;

    match result {
        Ok(_) => Ok(()),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            Err(StoreError::Conflict(activity.id))
        }
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl DataContext for SqliteContext {
    #[instrument(skip(self))]
    async fn migrate(&self) -> Result<(), StoreError> {
        MIGRATOR.run(&self.pool).await?;
        info!("Migrations applied");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Activity>, StoreError> {
        let rows = sqlx::query_as::<_, ActivityRow>(
            r#"
            SELECT id, title, date, description, category, city, venue
            FROM activities
            ORDER BY date, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        debug!(count = rows.len(), "Listed activities");
        Ok(rows.into_iter().map(Activity::from).collect())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Activity>, StoreError> {
        let row = sqlx::query_as::<_, ActivityRow>(
            r#"
            SELECT id, title, date, description, category, city, venue
            FROM activities
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Activity::from))
    }

    async fn insert(&self, activity: &Activity) -> Result<(), StoreError> {
        insert_row(&self.pool, activity).await
    }

    #[instrument(skip_all, fields(count = activities.len()))]
    async fn insert_all(&self, activities: &[Activity]) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        for activity in activities {
            insert_row(&mut *tx, activity).await?;
        }
        tx.commit().await?;
        debug!("Batch committed");
        Ok(())
    }

    async fn update(&self, activity: &Activity) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE activities
            SET title = ?, date = ?, description = ?, category = ?, city = ?, venue = ?
            WHERE id = ?
            "#,
        )
        .bind(&activity.title)
        .bind(activity.date)
        .bind(&activity.description)
        .bind(&activity.category)
        .bind(&activity.city)
        .bind(&activity.venue)
        .bind(activity.id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM activities WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM activities")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ActivityForm;
    use chrono::TimeZone;

    async fn migrated() -> SqliteContext {
        let ctx = SqliteContext::connect("sqlite::memory:", 1).await.unwrap();
        ctx.migrate().await.unwrap();
        ctx
    }

    #[tokio::test]
    async fn insert_then_find_round_trips_every_field() {
        let ctx = migrated().await;
        let mut activity = Activity::new(Uuid::new_v4(), "Past Activity 1");
        activity.apply(ActivityForm {
            title: "Past Activity 1".into(),
            date: Some(Utc.with_ymd_and_hms(2021, 3, 1, 18, 30, 0).unwrap()),
            description: Some("Activity 2 months ago".into()),
            category: Some("drinks".into()),
            city: Some("London".into()),
            venue: Some("Pub".into()),
        });

        ctx.insert(&activity).await.unwrap();
        let found = ctx.find(activity.id).await.unwrap().unwrap();
        assert_eq!(found, activity);
    }

    #[tokio::test]
    async fn duplicate_id_is_a_conflict() {
        let ctx = migrated().await;
        let id = Uuid::new_v4();
        ctx.insert(&Activity::new(id, "Run")).await.unwrap();

        let err = ctx.insert(&Activity::new(id, "Walk")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(ctx.find(id).await.unwrap().unwrap().title, "Run");
        assert_eq!(ctx.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn failed_batch_rolls_back() {
        let ctx = migrated().await;
        let taken = Activity::new(Uuid::new_v4(), "Taken");
        ctx.insert(&taken).await.unwrap();

        let batch = vec![
            Activity::new(Uuid::new_v4(), "First"),
            Activity::new(Uuid::new_v4(), "Second"),
            Activity::new(taken.id, "Clash"),
        ];
        let err = ctx.insert_all(&batch).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(id) if id == taken.id));
        assert_eq!(ctx.count().await.unwrap(), 1);
        assert!(ctx.find(batch[0].id).await.unwrap().is_none());

        ctx.insert_all(&batch[..2]).await.unwrap();
        assert_eq!(ctx.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn update_and_remove_affect_only_existing_rows() {
        let ctx = migrated().await;
        let mut activity = Activity::new(Uuid::new_v4(), "Run");
        assert!(!ctx.update(&activity).await.unwrap());

        ctx.insert(&activity).await.unwrap();
        activity.title = "Run 5k".into();
        assert!(ctx.update(&activity).await.unwrap());
        assert_eq!(ctx.find(activity.id).await.unwrap().unwrap().title, "Run 5k");

        assert!(ctx.remove(activity.id).await.unwrap());
        assert!(!ctx.remove(activity.id).await.unwrap());
        assert!(ctx.find(activity.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn migrate_is_repeatable() {
        let ctx = migrated().await;
        ctx.migrate().await.unwrap();
        assert_eq!(ctx.count().await.unwrap(), 0);
    }
}
