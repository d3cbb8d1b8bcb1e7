//! Shadowtables Engine - Main entry point.
//!
//! Loads the configured monster catalog and previews one encounter table.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shadowtables_domain::FilterCriteria;
use shadowtables_engine::infrastructure::{
    catalog::MonsterCatalog, memory::InMemoryMonsterRepo, settings::EngineSettings,
};
use shadowtables_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the binary may run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shadowtables_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Shadowtables Engine");

    let settings = EngineSettings::from_env();
    tracing::info!(
        catalog = ?settings.catalog_path,
        fetch_oversample = settings.fetch_oversample,
        slug_attempts = settings.slug_attempts,
        "Engine settings loaded"
    );

    let monsters = match &settings.catalog_path {
        Some(path) => MonsterCatalog::load(path).await?.into_repo(),
        None => {
            tracing::warn!("No monster catalog configured, starting with an empty catalog");
            InMemoryMonsterRepo::new()
        }
    };

    let die_size = settings.preview_die_size;
    let app = Arc::new(App::in_memory(monsters, settings));

    match app
        .use_cases
        .encounter_table
        .preview
        .execute(None, die_size, &FilterCriteria::default())
        .await
    {
        Ok(entries) => {
            for entry in &entries {
                let snapshot = &entry.monster_snapshot;
                tracing::info!(
                    roll = entry.roll_number,
                    monster = %snapshot.name,
                    level = snapshot.challenge_level,
                    "Preview entry"
                );
            }
        }
        Err(e) => {
            tracing::warn!(die_size, error = %e, "{}", e.user_message());
        }
    }

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
