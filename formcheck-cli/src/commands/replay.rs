use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use formcheck::models::{CounterState, ExerciseKind, Side};
use formcheck::services::{
    ExerciseSession, NormalizationPolicy, RecordedPoseSource, SessionStats, TickOutcome,
};
use formcheck::SessionConfig;

use crate::config::Config;
use crate::ui;

#[derive(Args)]
pub struct ReplayCommand {
    /// Landmark recording in JSON Lines format, one frame per line
    file: PathBuf,

    /// Exercise to track: upper or lower
    #[arg(short, long)]
    exercise: Option<ExerciseKind>,

    /// Body side to track: left or right
    #[arg(short, long)]
    side: Option<Side>,

    /// Repetitions per set
    #[arg(long)]
    reps: Option<u32>,

    /// Number of sets
    #[arg(long)]
    sets: Option<u32>,

    /// Minimum landmark visibility, exclusive
    #[arg(long)]
    threshold: Option<f32>,

    /// Angle normalization policy: interior or unbounded
    #[arg(long)]
    policy: Option<NormalizationPolicy>,

    /// Delay between frames in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Emit one JSON object per frame plus a final summary
    #[arg(long)]
    json: bool,
}

/// Line written per frame and at the end in `--json` mode
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ReplayRecord<'a> {
    Tick(&'a TickOutcome),
    Summary {
        stats: &'a SessionStats,
        state: CounterState,
    },
}

impl ReplayCommand {
    /// Apply command line overrides on top of the configured session
    fn session_config(&self, mut config: SessionConfig) -> SessionConfig {
        if let Some(exercise) = self.exercise {
            config.exercise = exercise;
        }
        if let Some(side) = self.side {
            config.side = side;
        }
        if let Some(reps) = self.reps {
            config.target_reps_per_set = reps;
        }
        if let Some(sets) = self.sets {
            config.target_sets = sets;
        }
        if let Some(threshold) = self.threshold {
            config.visibility_threshold = threshold;
        }
        if let Some(policy) = self.policy {
            config.normalization = policy;
        }
        config
    }

    pub async fn execute(self, config_path: Option<&Path>) -> Result<()> {
        let config = Config::load(config_path)?;
        if !config.ui.color {
            ui::disable_colors();
        }

        let session_config = self.session_config(config.session.clone());
        let tick_ms = self.tick_ms.unwrap_or(config.replay.tick_ms);

        let source = RecordedPoseSource::new(&self.file);
        let mut session = ExerciseSession::new(source, session_config.clone())
            .context("Invalid session settings")?;

        if !self.json {
            println!("{}", ui::render_header(&session_config));
            println!();
        }

        session
            .start()
            .with_context(|| format!("Failed to open recording {}", self.file.display()))?;
        tracing::info!(file = %self.file.display(), tick_ms, "Replaying recording");

        let mut interval = (tick_ms > 0).then(|| tokio::time::interval(Duration::from_millis(tick_ms)));

        loop {
            if let Some(interval) = interval.as_mut() {
                interval.tick().await;
            }

            let outcome = session
                .tick()
                .with_context(|| format!("Failed to replay {}", self.file.display()))?;
            let Some(outcome) = outcome else {
                break;
            };

            if self.json {
                println!("{}", serde_json::to_string(&ReplayRecord::Tick(&outcome))?);
                continue;
            }

            if config.ui.show_frames {
                println!("{}", ui::render_tick(&outcome));
            }
            for event in &outcome.events {
                println!("{}", ui::render_event(event));
            }
        }

        let state = session.snapshot();
        if self.json {
            let summary = ReplayRecord::Summary {
                stats: session.stats(),
                state,
            };
            println!("{}", serde_json::to_string(&summary)?);
        } else {
            println!("{}", ui::render_summary(session.stats(), &state));
        }

        Ok(())
    }
}
