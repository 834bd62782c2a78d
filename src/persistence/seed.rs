//! Demonstration data loaded into an empty store at startup.

use chrono::{DateTime, Duration, Utc};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{DataContext, StoreError};
use crate::domain::Activity;

/// (title, months from now, description, category, city, venue)
const SEED: [(&str, i64, &str, &str, &str, &str); 10] = [
    ("Past Activity 1", -2, "Activity 2 months ago", "drinks", "London", "Pub"),
    ("Past Activity 2", -1, "Activity 1 month ago", "culture", "Paris", "Louvre"),
    ("Future Activity 1", 1, "Activity 1 month in future", "culture", "London", "Natural History Museum"),
    ("Future Activity 2", 2, "Activity 2 months in future", "music", "London", "O2 Arena"),
    ("Future Activity 3", 3, "Activity 3 months in future", "drinks", "London", "Another pub"),
    ("Future Activity 4", 4, "Activity 4 months in future", "drinks", "London", "Yet another pub"),
    ("Future Activity 5", 5, "Activity 5 months in future", "drinks", "London", "Just another pub"),
    ("Future Activity 6", 6, "Activity 6 months in future", "music", "London", "Roundhouse Camden"),
    ("Future Activity 7", 7, "Activity 7 months in future", "travel", "London", "Somewhere on the Thames"),
    ("Future Activity 8", 8, "Activity 8 months in future", "film", "London", "Cinema"),
];

/// Builds the seed records with dates relative to `now`.
pub fn seed_activities(now: DateTime<Utc>) -> Vec<Activity> {
    SEED.iter()
        .map(|&(title, months, description, category, city, venue)| Activity {
            id: Uuid::new_v4(),
            title: title.to_string(),
            date: Some(now + Duration::days(30 * months)),
            description: Some(description.to_string()),
            category: Some(category.to_string()),
            city: Some(city.to_string()),
            venue: Some(venue.to_string()),
        })
        .collect()
}

/// Inserts the seed records unless the store already holds activities.
///
/// The records go in as one batch, so a failure leaves the store empty and the
/// next startup seeds again. Returns the number of records inserted, so
/// repeated startups report `0`.
#[instrument(skip(ctx))]
pub async fn seed_data(ctx: &dyn DataContext) -> Result<usize, StoreError> {
    let existing = ctx.count().await?;
    if existing > 0 {
        info!(existing, "Store already seeded");
        return Ok(0);
    }

    let activities = seed_activities(Utc::now());
    ctx.insert_all(&activities).await?;
    info!(inserted = activities.len(), "Seeded activities");
    Ok(activities.len())
}
