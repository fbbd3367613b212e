//! Explain command implementation

use anyhow::Result;
use clap::Args;

use super::utils::LayoutArgs;
use crate::domain::Outcome;
use crate::merge::PathRewriter;
use crate::utils::normalize_separators;

#[derive(Args)]
pub struct ExplainArgs {
    /// Record paths to classify
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<String>,

    #[command(flatten)]
    pub layout: LayoutArgs,
}

pub fn run(args: ExplainArgs) -> Result<()> {
    let config = args.layout.resolve(false)?;
    let rewriter = PathRewriter::new(&config.layout());

    let mut dropped = 0usize;
    for raw in &args.paths {
        let path = if config.normalize_separators {
            normalize_separators(raw).into_owned()
        } else {
            raw.clone()
        };

        let decision = rewriter.decide(&path);
        if decision.is_dropped() {
            dropped += 1;
        }
        match &decision.outcome {
            Outcome::Unchanged => println!("{:<20} {}", decision.rule, path),
            Outcome::Relocated(new_path) => {
                println!("{:<20} {} -> {}", decision.rule, path, new_path)
            }
            Outcome::Dropped => println!("{:<20} {} (dropped)", decision.rule, path),
        }
    }

    if dropped > 0 {
        println!("\n{} of {} paths would be dropped", dropped, args.paths.len());
    }
    Ok(())
}
