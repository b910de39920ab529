// Plain-terminal rendering for replay output

use colored::{ColoredString, Colorize};
use formcheck::models::{CounterEvent, CounterState};
use formcheck::services::{FormFeedback, SessionStats, TickOutcome};
use formcheck::SessionConfig;

/// Turn colors off for this process, e.g. when `ui.color = false`
pub fn disable_colors() {
    colored::control::set_override(false);
}

fn paint(feedback: &FormFeedback, text: &str) -> ColoredString {
    let rgb = feedback.color();
    text.truecolor(rgb.0, rgb.1, rgb.2)
}

pub fn format_angle(angle: Option<f32>) -> String {
    match angle {
        Some(angle) => format!("{:>6.1}°", angle),
        None => format!("{:>7}", "--"),
    }
}

pub fn render_header(config: &SessionConfig) -> String {
    let range = config.ranges.range_for(config.exercise, config.side);
    format!(
        "{}\n{}\nExercise: {} ({})  Target range: {}  Goal: {} sets × {} reps",
        "Form Check Replay".bold(),
        "────────────────────────────────",
        config.exercise,
        config.side,
        range,
        config.target_sets,
        config.target_reps_per_set,
    )
}

/// One line per tick: frame, angle, counter position and feedback
pub fn render_tick(outcome: &TickOutcome) -> String {
    let state = &outcome.state;
    format!(
        "#{:<5} {}  set {}/{}  reps {:>2}/{}  {}",
        outcome.frame_index,
        format_angle(outcome.angle),
        state.current_set(),
        state.target_sets,
        state.reps,
        state.target_reps_per_set,
        paint(&outcome.feedback, &outcome.feedback.message()),
    )
}

pub fn render_event(event: &CounterEvent) -> String {
    match event {
        CounterEvent::RepetitionCompleted { reps, set } => {
            format!("  ✓ Rep {} (set {})", reps, set).green().to_string()
        }
        CounterEvent::SetCompleted { set, sets_remaining } => format!(
            "  ★ Set {} complete, {} remaining",
            set, sets_remaining
        )
        .cyan()
        .bold()
        .to_string(),
        CounterEvent::SessionCompleted { sets } => {
            format!("  🏁 Session complete: {} sets", sets)
                .yellow()
                .bold()
                .to_string()
        }
    }
}

pub fn render_summary(stats: &SessionStats, state: &CounterState) -> String {
    let mut lines = vec![
        String::new(),
        "Session Summary".bold().to_string(),
        "────────────────────────────────".to_string(),
        format!("Session:        {}", stats.session_id),
        format!("Status:         {:?}", state.status),
        format!("Frames:         {}", stats.frames),
        format!("Not visible:    {}", stats.unavailable_frames),
        format!("In range:       {:.0}%", stats.in_range_ratio() * 100.0),
        format!("Repetitions:    {}", stats.total_reps),
        format!(
            "Sets completed: {}/{}",
            state.sets_completed(),
            state.target_sets
        ),
    ];

    if let (Some(min), Some(max)) = (stats.min_angle, stats.max_angle) {
        lines.push(format!("Angle span:     {:.1}° – {:.1}°", min, max));
    }
    if let Some(seconds) = stats.duration_seconds() {
        lines.push(format!("Duration:       {}s", seconds));
    }

    lines.join("\n")
}
