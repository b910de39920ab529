use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::Path;

use crate::config::Config;

#[derive(Args)]
pub struct RangesCommand {
    /// Print the table as JSON
    #[arg(long)]
    json: bool,
}

impl RangesCommand {
    pub async fn execute(self, config_path: Option<&Path>) -> Result<()> {
        let config = Config::load(config_path)?;
        let entries = config.session.ranges.entries();

        if self.json {
            let rows: Vec<_> = entries
                .iter()
                .map(|(kind, side, range)| {
                    serde_json::json!({
                        "exercise": kind,
                        "side": side,
                        "min": range.min(),
                        "max": range.max(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
            return Ok(());
        }

        println!("{}", "Target Angle Ranges".bold());
        println!("────────────────────────────────");
        println!("{:<10} {:<8} {}", "Exercise", "Side", "Range (°)");
        for (kind, side, range) in entries {
            let marker = if kind == config.session.exercise && side == config.session.side {
                "*"
            } else {
                ""
            };
            println!("{:<10} {:<8} {} {}", kind.to_string(), side.to_string(), range, marker);
        }

        Ok(())
    }
}
