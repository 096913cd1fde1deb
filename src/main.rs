#![allow(clippy::result_large_err)]

use chrono::Utc;
use dotenvy::dotenv;
use planwed::{
    config::{database, storage, templates},
    core::report,
    errors::Result,
    planner::Planner,
    store::views::{UPCOMING_WINDOW_DAYS, upcoming_events},
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Templates offered to the forms
    let templates = templates::load_default_templates()
        .inspect_err(|e| error!("Failed to load templates: {}", e))?;
    info!(
        "Templates ready: {} budget categories, {} tasks, {} events",
        templates.budget_categories.len(),
        templates.tasks.len(),
        templates.events.len()
    );

    // 4. Backend database
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Restore the local session and load the remembered wedding
    let mut planner = Planner::new(db, storage::restore_store());
    match planner.resume().await {
        Ok(Some(wedding)) => info!("Resumed wedding {}", wedding.title),
        Ok(None) => {
            info!("No wedding selected; sign in to start planning");
            return Ok(());
        }
        Err(e) => {
            warn!("Could not load the remembered wedding: {}", e);
            return Ok(());
        }
    }

    // 6. Dashboard summary
    let store = planner.store();
    let now = Utc::now();
    if let Some(wedding) = store.current_wedding() {
        let stats = store.dashboard(now.date_naive());
        info!("\n{}", report::format_dashboard(&wedding.title, &stats));
    }
    for category in store.budget_categories() {
        info!("{}", report::format_category_line(category));
    }
    for event in upcoming_events(store.calendar_events(), now, UPCOMING_WINDOW_DAYS) {
        info!("Upcoming: {} at {}", event.title, event.start_date);
    }

    Ok(())
}
