//! Engine binary for the Atelier project engine.
//!
//! Wires together configuration, an editing session, the organism
//! population, the AI generation boundary, and the auto-save loop, then
//! walks a small demonstration session against an in-memory backend.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `atelier.yaml`
//! 3. Open a demo project in a fresh session
//! 4. Start the auto-save task
//! 5. Drive a short editing session and log the results

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use atelier_ai::{apply_generation, materialize_trails, parse_response};
use atelier_bindings::upsert_binding;
use atelier_engine::{EngineConfig, EngineError, Session, run_autosave};
use atelier_organisms::PopulationManager;
use atelier_store::{Archive, MemoryStore, add_component};
use atelier_types::{Component, ComponentType, Project};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tokio::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Path of the engine configuration file, relative to the working directory.
const CONFIG_PATH: &str = "atelier.yaml";

/// A canned generation response standing in for the external generator.
const DEMO_GENERATION: &str = r#"{
    "components": [
        {"type": "card", "name": "Hero",
         "props": {"title": "Welcome", "elevated": true}},
        {"type": "button", "name": "Get started",
         "props": {"label": "Get started", "role": "button"}}
    ],
    "reasoning": "A landing page needs a hero section and a call to action."
}"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    let config = load_config();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .with_target(true)
        .init();

    info!(
        history_window = config.history.window,
        autosave_seconds = config.autosave.interval_seconds,
        population_cap = config.population.max_active,
        "atelier-engine starting"
    );

    // 2. Open a demo project.
    let mut session = Session::new(&config);
    session.open(Project::new("Landing page"));

    // 3. Drive a short editing session.
    run_demo_edits(&mut session)?;

    // 4. Persist the result and the organism population.
    let archive = Archive::new(MemoryStore::new());
    persist_state(&archive, &session, &config).await?;

    // 5. Hand the session to the auto-save loop and let it take one tick.
    let shared = Arc::new(Mutex::new(session));
    let autosave = tokio::spawn(run_autosave(
        Arc::clone(&shared),
        Duration::from_secs(config.autosave.interval_seconds),
    ));
    tokio::time::sleep(Duration::from_millis(50)).await;
    autosave.abort();

    let session = shared.lock().await;
    info!(
        snapshots = session.history().len(),
        problems = session.problems().len(),
        "demo session complete"
    );
    Ok(())
}

/// Load configuration, falling back to defaults when the file is absent.
fn load_config() -> EngineConfig {
    let path = Path::new(CONFIG_PATH);
    if path.exists() {
        match EngineConfig::from_file(path) {
            Ok(config) => return config,
            Err(e) => {
                eprintln!("failed to load {CONFIG_PATH}, using defaults: {e}");
            }
        }
    }
    EngineConfig::default()
}

/// Walk the main edit paths once: manual edits, an AI batch, layout
/// solving, and an undo/redo pair.
fn run_demo_edits(session: &mut Session) -> Result<(), EngineError> {
    let base = session
        .project()
        .cloned()
        .ok_or(EngineError::NoProject)?;

    let with_input = add_component(&base, Component::new(ComponentType::Input, "Email"))?;
    session.apply(with_input, "add email input")?;

    match parse_response(DEMO_GENERATION) {
        Ok(response) => {
            let current = session.project().cloned().ok_or(EngineError::NoProject)?;
            match apply_generation(&current, &response) {
                Ok(next) => {
                    session.apply(next, "apply generation batch")?;
                    let trails = materialize_trails(&response);
                    info!(trails = trails.len(), "generation trails materialized");
                }
                Err(e) => warn!(error = %e, "generation batch rejected"),
            }
        }
        Err(e) => warn!(error = %e, "generation response rejected"),
    }

    // Bind the newest component's label to the email input's value.
    let current = session.project().cloned().ok_or(EngineError::NoProject)?;
    let input_id = current
        .components
        .iter()
        .find(|c| c.component_type == ComponentType::Input)
        .map(|c| c.id);
    let target_id = current.components.last().map(|c| c.id);
    if let (Some(input_id), Some(target_id)) = (input_id, target_id) {
        let expression = format!("Welcome, ${{{input_id}.value}}");
        match upsert_binding(&current, target_id, "label", &expression) {
            Ok(bound) => {
                session.apply(bound, "bind label to email value")?;
            }
            Err(e) => warn!(error = %e, "binding rejected"),
        }
    }

    session.solve_layout()?;
    session.undo()?;
    session.redo()?;

    info!(
        components = session.project().map_or(0, |p| p.components.len()),
        problems = session.problems().len(),
        "demo edits applied"
    );
    Ok(())
}

/// Persist the current project and a small organism population.
async fn persist_state(
    archive: &Archive<MemoryStore>,
    session: &Session,
    config: &EngineConfig,
) -> Result<(), EngineError> {
    if let Some(project) = session.project() {
        archive.save_current_project(project).await?;
        archive.save_project_list(std::slice::from_ref(project)).await?;
    }

    let mut rng = SmallRng::from_os_rng();
    let mut population = PopulationManager::with_capacity(config.population.max_active);
    for _ in 0..3 {
        match population.create_in_range(&mut rng, config.population.seed_range()) {
            Ok(id) => info!(organism = %id, "organism seeded"),
            Err(e) => warn!(error = %e, "organism creation rejected"),
        }
    }
    let organisms: Vec<_> = population.organisms().cloned().collect();
    archive.save_enrichment(&organisms).await?;

    info!(organisms = organisms.len(), "state persisted");
    Ok(())
}
