use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};

use crate::merges::ProjectMergesQuery;

#[derive(Parser)]
#[command(name = "snoop")]
#[command(about = "Gather merge request and commit metrics from GitLab")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone, Debug)]
pub struct CommonArgs {
    #[arg(short, long, global = true, env = "SNOOP_SERVER", help = "GitLab server host or URL")]
    pub server: Option<String>,

    #[arg(
        short,
        long,
        global = true,
        env = "SNOOP_TOKEN",
        hide_env_values = true,
        help = "Auth token"
    )]
    pub token: Option<String>,

    #[arg(short, long, global = true, action = ArgAction::Count, help = "More log output (repeatable)")]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Get merge info
    Merge {
        #[arg(help = "Project id")]
        project_id: u64,

        #[arg(help = "Merge request id (iid within the project)")]
        merge_id: u64,
    },
    /// Get merge commits grouped by work day
    #[command(name = "merge_commits")]
    MergeCommits {
        #[arg(help = "Project id")]
        project_id: u64,

        #[arg(help = "Merge request id (iid within the project)")]
        merge_id: u64,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Get project merge requests by ISO week
    #[command(name = "project_merges")]
    ProjectMerges {
        #[arg(help = "Project id")]
        project_id: u64,

        #[arg(short, long, help = "Number of weeks to go back")]
        weeks: Option<u32>,

        #[arg(short, long, help = "Target branch of merge requests")]
        branch: Option<String>,

        #[arg(long, help = "Output as JSON (no chart)")]
        json: bool,

        #[arg(long, help = "Skip writing the chart")]
        no_chart: bool,
    },
    /// List merge requests across all projects, drafts excluded
    Merges {
        #[arg(long, default_value = "opened", help = "Merge request state")]
        state: String,
    },
    /// List all projects
    Projects,
}

impl Cli {
    pub fn log_filter(&self) -> &'static str {
        match self.common.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Merge { project_id, merge_id } => {
                crate::merges::exec_merge(self.common, project_id, merge_id)
            }
            Commands::MergeCommits { project_id, merge_id, json } => {
                crate::commits::exec(self.common, project_id, merge_id, json)
            }
            Commands::ProjectMerges { project_id, weeks, branch, json, no_chart } => {
                let query = ProjectMergesQuery {
                    project_id,
                    weeks,
                    branch,
                    json,
                    chart: !no_chart && !json,
                };
                crate::merges::exec_project_merges(self.common, query)
            }
            Commands::Merges { state } => crate::merges::exec_list(self.common, state),
            Commands::Projects => crate::projects::exec(self.common),
        }
    }
}
