use utoipa::OpenApi;

use super::activities;
use super::error::ErrorBody;
use crate::domain::{Ack, Activity, ActivityForm, NewActivity};

#[derive(OpenApi)]
#[openapi(
    info(title = "API", version = "v1"),
    paths(
        activities::list_activities,
        activities::get_activity,
        activities::create_activity,
        activities::edit_activity,
        activities::delete_activity,
    ),
    components(schemas(Activity, ActivityForm, NewActivity, Ack, ErrorBody)),
    tags((name = "activities", description = "Activity CRUD"))
)]
pub struct ApiDoc;
