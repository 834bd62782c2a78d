use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Represents a scheduled activity.
///
/// # Persistence
/// Instances are owned by the [`DataContext`](crate::persistence::DataContext); the copies
/// that travel through the mediator belong to the single request that built them.
///
/// See [`NewActivity`] and [`ActivityForm`] for the request payloads that produce it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Activity {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
}

impl Activity {
    /// Creates an Activity with only a title set.
    ///
    /// # Arguments
    /// * `id` - The identifier, fixed for the lifetime of the record
    /// * `title` - Display title
    pub fn new(id: Uuid, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            date: None,
            description: None,
            category: None,
            city: None,
            venue: None,
        }
    }

    /// Builds an Activity from descriptive fields and an identifier chosen elsewhere.
    pub fn from_form(id: Uuid, form: ActivityForm) -> Self {
        Self {
            id,
            title: form.title,
            date: form.date,
            description: form.description,
            category: form.category,
            city: form.city,
            venue: form.venue,
        }
    }

    /// Overwrites every descriptive field, leaving `id` untouched.
    pub fn apply(&mut self, form: ActivityForm) {
        self.title = form.title;
        self.date = form.date;
        self.description = form.description;
        self.category = form.category;
        self.city = form.city;
        self.venue = form.venue;
    }

    /// Splits the descriptive fields back out.
    pub fn form(&self) -> ActivityForm {
        ActivityForm {
            title: self.title.clone(),
            date: self.date,
            description: self.description.clone(),
            category: self.category.clone(),
            city: self.city.clone(),
            venue: self.venue.clone(),
        }
    }
}

/// Descriptive fields of an activity (PUT body).
///
/// Carries no identifier: on edit the id comes from the route, and serde drops
/// any `id` member present in the JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ActivityForm {
    pub title: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
}

impl ActivityForm {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            date: None,
            description: None,
            category: None,
            city: None,
            venue: None,
        }
    }

    /// Checks the fields that every stored activity must satisfy.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("title must not be empty".to_string());
        }
        Ok(())
    }
}

/// Payload for creating an activity (POST body).
///
/// The caller may choose the identifier; otherwise a v4 UUID is generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewActivity {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(flatten)]
    pub form: ActivityForm,
}

impl NewActivity {
    /// Resolves the identifier and produces the full Activity.
    pub fn into_activity(self) -> Activity {
        let id = self.id.unwrap_or_else(Uuid::new_v4);
        Activity::from_form(id, self.form)
    }
}

/// Acknowledgement returned by the write operations. Serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Ack {}
