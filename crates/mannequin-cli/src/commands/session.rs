//! Session command implementation
//!
//! Runs a headless viewer session: picks the generator for the configured
//! gender, loads external models in the background while frames keep
//! running, and reports the avatars attached along the way.

use anyhow::{Context, Result};
use colored::Colorize;
use mannequin_backend_model::ScaleStrategy;
use mannequin_spec::{BackendError, CustomizationParams, Gender};
use mannequin_viewer::{AvatarSession, FsModelLoader, RecordingBackend, SessionEvent, ViewerConfig};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

use super::json_output::{error_codes, CommandOutput, JsonError, JsonWarning};
use super::reporting;
use crate::input::{resolve_params, ParamOverrides};

/// Session command options.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Viewer config file; defaults when absent.
    pub config: Option<PathBuf>,
    pub male_model: Option<PathBuf>,
    pub female_model: Option<PathBuf>,
    pub strategy: Option<ScaleStrategy>,
    pub frames: usize,
    pub delta_secs: f32,
    /// Frame at which the gender flips, demonstrating a strategy switch.
    pub switch_gender_at: Option<usize>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            config: None,
            male_model: None,
            female_model: None,
            strategy: None,
            frames: 60,
            delta_secs: 1.0 / 60.0,
            switch_gender_at: None,
        }
    }
}

/// One session event in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SessionEventJson {
    pub kind: &'static str,
    pub message: String,
}

impl From<&SessionEvent> for SessionEventJson {
    fn from(event: &SessionEvent) -> Self {
        let (kind, message) = match event {
            SessionEvent::Clamped(notes) => (
                "clamped",
                notes
                    .iter()
                    .map(|n| n.to_string())
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            SessionEvent::Attached {
                source,
                parts,
                fingerprint,
            } => (
                "attached",
                format!("{} ({} parts, {})", source, parts, short(fingerprint)),
            ),
            SessionEvent::LoadStarted { path, generation } => (
                "load_started",
                format!("{} (generation {})", path.display(), generation),
            ),
            SessionEvent::LoadDiscarded { path, generation } => (
                "load_discarded",
                format!("{} (generation {})", path.display(), generation),
            ),
            SessionEvent::LoadFailed(err) => {
                ("load_failed", format!("[{}] {}", err.code(), err.message()))
            }
        };
        Self { kind, message }
    }
}

fn short(fingerprint: &str) -> &str {
    fingerprint.get(..16).unwrap_or(fingerprint)
}

/// Render-side counters at the end of a session.
#[derive(Debug, Clone, Serialize)]
pub struct BackendStats {
    pub frames: usize,
    pub attached: usize,
    pub adds: usize,
    pub removes: usize,
    pub disposals: usize,
    pub live_geometries: usize,
    pub live_materials: usize,
    pub camera_position: Option<[f32; 3]>,
}

impl From<&RecordingBackend> for BackendStats {
    fn from(b: &RecordingBackend) -> Self {
        Self {
            frames: b.frames,
            attached: b.attached,
            adds: b.adds,
            removes: b.removes,
            disposals: b.disposals,
            live_geometries: b.live.geometries,
            live_materials: b.live.materials,
            camera_position: b.camera.map(|c| c.position.to_array()),
        }
    }
}

/// Summary of a finished session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResult {
    /// Source of the avatar attached at the end, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub parts: usize,
    pub animated: bool,
    pub yaw: f32,
    pub generation: u64,
    pub events: Vec<SessionEventJson>,
    pub backend: BackendStats,
}

/// Builds the viewer config from a file plus command-line overrides.
pub fn load_config(options: &SessionOptions) -> Result<ViewerConfig> {
    let mut config = match &options.config {
        Some(path) => ViewerConfig::from_file(path)?,
        None => ViewerConfig::default(),
    };
    if let Some(path) = &options.male_model {
        config.models.set(Gender::Male, Some(path.clone()));
    }
    if let Some(path) = &options.female_model {
        config.models.set(Gender::Female, Some(path.clone()));
    }
    if let Some(strategy) = options.strategy {
        config.scale_strategy = strategy;
    }
    Ok(config)
}

/// Drives a session to completion and summarizes it.
pub async fn drive(
    config: ViewerConfig,
    params: CustomizationParams,
    options: &SessionOptions,
) -> SessionResult {
    let mut session = AvatarSession::new(config, RecordingBackend::default(), FsModelLoader);
    session.set_params(params.clone());

    let mut events: Vec<SessionEventJson> = Vec::new();
    for frame in 0..options.frames {
        if options.switch_gender_at == Some(frame) {
            let gender = match session.params().gender {
                Gender::Male => Gender::Female,
                Gender::Female => Gender::Male,
            };
            tracing::info!(frame, %gender, "switching gender");
            session.set_params(session.params().clone().with_gender(gender));
        }
        session.frame(options.delta_secs);
        events.extend(session.take_events().iter().map(SessionEventJson::from));
        tokio::task::yield_now().await;
    }

    if session.is_loading() {
        session.settle().await;
        session.frame(options.delta_secs);
        events.extend(session.take_events().iter().map(SessionEventJson::from));
    }

    let current = session.scene().current();
    SessionResult {
        source: current.map(|a| a.source.to_string()),
        parts: current.map_or(0, |a| a.hierarchy.part_count()),
        animated: current.is_some_and(|a| a.player.is_some()),
        yaw: session.scene().yaw(),
        generation: session.generation(),
        events,
        backend: BackendStats::from(session.backend()),
    }
}

/// Run the session command
///
/// # Arguments
/// * `overrides` - Parameter file and flag overrides
/// * `options` - Config, model paths and frame-loop settings
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 when an avatar is attached at the end, 1 otherwise
pub fn run(overrides: &ParamOverrides, options: &SessionOptions, json_output: bool) -> Result<ExitCode> {
    let setup = resolve_params(overrides).and_then(|r| Ok((r, load_config(options)?)));
    let (resolved, config) = match setup {
        Ok(setup) => setup,
        Err(e) if json_output => {
            let error = JsonError::new(error_codes::CONFIG, format!("{:#}", e));
            CommandOutput::<SessionResult>::failure(vec![error], vec![]).print()?;
            return Ok(ExitCode::from(1));
        }
        Err(e) => return Err(e),
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let result = runtime.block_on(drive(config, resolved.params, options));
    let attached = result.source.is_some();

    if json_output {
        let warnings: Vec<JsonWarning> = resolved.notes.iter().map(JsonWarning::from).collect();
        let mut output = CommandOutput::success(result, warnings);
        output.success = attached;
        output.print()?;
    } else {
        print_human(&result, &resolved.notes);
    }

    Ok(if attached {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn print_human(result: &SessionResult, notes: &[mannequin_spec::ClampNote]) {
    println!("{}", "Session:".cyan().bold());
    reporting::print_clamp_notes(notes);
    for event in &result.events {
        let kind = match event.kind {
            "attached" => event.kind.green(),
            "load_failed" => event.kind.red(),
            "load_discarded" | "clamped" => event.kind.yellow(),
            _ => event.kind.dimmed(),
        };
        println!("  {} {}", kind, event.message);
    }

    let b = &result.backend;
    println!(
        "{} {} frames, {} adds, {} disposals, {} attached",
        "Backend:".dimmed(),
        b.frames,
        b.adds,
        b.disposals,
        b.attached
    );
    println!(
        "{} {:.3} rad{}",
        "Yaw:".dimmed(),
        result.yaw,
        if result.animated { " (animated)" } else { "" }
    );

    match &result.source {
        Some(source) => println!(
            "\n{} {} avatar, {} parts",
            "SUCCESS".green().bold(),
            source,
            result.parts
        ),
        None => println!("\n{} No avatar attached", "FAILED".red().bold()),
    }
}
