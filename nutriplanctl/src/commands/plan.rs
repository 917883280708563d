use std::path::PathBuf;

use clap::Args;

use super::profile::ProfileArgs;

#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    #[command(flatten)]
    pub profile: ProfileArgs,
    /// Seed for reproducible plans (overrides planner.seed)
    #[arg(long)]
    pub seed: Option<u64>,
    /// Number of days to plan (overrides planner.days)
    #[arg(long)]
    pub days: Option<usize>,
    /// Write the plan as CSV into the export directory
    #[arg(long, default_value_t = false)]
    pub export: bool,
    /// Explicit CSV path (implies --export)
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,
    /// Append general health tips to the report
    #[arg(long, default_value_t = false)]
    pub tips: bool,
}
