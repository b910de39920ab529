use anyhow::{Context, Result};
use clap::Args;
use std::path::Path;

use formcheck::models::Point2D;
use formcheck::services::{compute_interior_angle, NormalizationPolicy};

use crate::config::Config;

#[derive(Args)]
pub struct AngleCommand {
    /// Proximal point as X,Y (e.g. shoulder)
    #[arg(value_parser = parse_point, allow_hyphen_values = true)]
    proximal: Point2D,

    /// Vertex point as X,Y (the joint being measured)
    #[arg(value_parser = parse_point, allow_hyphen_values = true)]
    vertex: Point2D,

    /// Distal point as X,Y (e.g. wrist)
    #[arg(value_parser = parse_point, allow_hyphen_values = true)]
    distal: Point2D,

    /// Normalization policy: interior or unbounded
    #[arg(long)]
    policy: Option<NormalizationPolicy>,
}

/// Parse an `X,Y` pair
pub fn parse_point(value: &str) -> Result<Point2D> {
    let (x, y) = value
        .split_once(',')
        .with_context(|| format!("Expected X,Y but got '{}'", value))?;
    let x: f32 = x.trim().parse().with_context(|| format!("Invalid X in '{}'", value))?;
    let y: f32 = y.trim().parse().with_context(|| format!("Invalid Y in '{}'", value))?;
    Ok(Point2D::new(x, y))
}

impl AngleCommand {
    pub async fn execute(self, config_path: Option<&Path>) -> Result<()> {
        let policy = match self.policy {
            Some(policy) => policy,
            None => Config::load(config_path)?.session.normalization,
        };

        let angle = compute_interior_angle(self.proximal, self.vertex, self.distal, policy);
        tracing::debug!(?policy, angle, "Computed angle");

        println!("{:.2}", angle);
        Ok(())
    }
}
