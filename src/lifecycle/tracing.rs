//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging with the `tracing` crate.
//!
//! ## Configuration
//!
//! Output uses the compact format without module targets (`with_target(false)`);
//! the structured fields (`id`, `kind`, `count`) carry the context instead.
//! Verbosity comes from `RUST_LOG` and defaults to `info`.
//!
//! ## What Gets Traced
//!
//! - **Bootstrap**: Pool opened, migrations applied or failed, seed outcome
//! - **Mediator**: Start, shutdown, every dispatched message kind
//! - **Handlers**: Created / Updated / Deleted with the activity id, misses as warnings
//! - **HTTP**: One span per request from `tower_http::trace::TraceLayer`
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs (default)
//! RUST_LOG=info cargo run
//!
//! # Show payloads and dispatch
//! RUST_LOG=debug cargo run
//!
//! # Request spans from the HTTP layer as well
//! RUST_LOG=activities_api=debug,tower_http=debug cargo run
//! ```
//!
//! With `RUST_LOG=debug`, an edit shows the whole path:
//!
//! ```text
//! DEBUG edit_activity: edit_activity called activity=Activity { id: 5f0c..., title: "Run 5k", .. }
//! DEBUG Dispatch kind="Edit"
//! DEBUG Edit id=5f0c... existing=Activity { .. }
//! INFO  Updated id=5f0c...
//! ```

use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
