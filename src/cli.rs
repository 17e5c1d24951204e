use clap::{Args, Parser, Subcommand};
use llm_cost_calculator::config::UsageOverrides;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "llm-cost", version, about = "LLM API monthly cost calculator")]
pub struct Cli {
    /// Configuration file path (optional, defaults apply when missing)
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Usage assumptions shared by every calculating command
#[derive(Args, Debug, Clone, Default)]
pub struct UsageArgs {
    /// Number of users
    #[arg(short, long)]
    pub users: Option<u32>,

    /// Requests per user per month
    #[arg(short, long)]
    pub requests: Option<f64>,

    /// Average tokens used in input
    #[arg(long)]
    pub input_tokens: Option<f64>,

    /// Average tokens used in output
    #[arg(long)]
    pub output_tokens: Option<f64>,

    /// Print JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

impl UsageArgs {
    pub fn overrides(&self) -> UsageOverrides {
        UsageOverrides {
            num_users: self.users,
            requests_per_month: self.requests,
            avg_tokens_input: self.input_tokens,
            avg_tokens_output: self.output_tokens,
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Full cost analysis: comparison, user evolution, selected model (default)
    Report {
        /// Model to detail (defaults to the configured model)
        #[arg(short, long)]
        model: Option<String>,

        #[command(flatten)]
        usage: UsageArgs,
    },

    /// Estimate monthly cost for one model
    Estimate {
        /// Model name as listed by `models`
        #[arg(short, long)]
        model: Option<String>,

        #[command(flatten)]
        usage: UsageArgs,
    },

    /// Compare monthly cost across all catalog models
    Compare {
        #[command(flatten)]
        usage: UsageArgs,
    },

    /// Cost of every model across a range of user counts
    Sweep {
        /// First user count
        #[arg(long)]
        start: Option<u32>,

        /// Last user count (inclusive)
        #[arg(long)]
        end: Option<u32>,

        /// Step between user counts
        #[arg(long)]
        step: Option<u32>,

        #[command(flatten)]
        usage: UsageArgs,
    },

    /// List the price catalog
    Models {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Serve the calculator as a JSON API
    Serve {
        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Test configuration file validity
    Test,

    /// Show version information
    Version,
}

impl Cli {
    /// Get the command to execute, defaulting to Report if none provided
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Report {
            model: None,
            usage: UsageArgs::default(),
        })
    }
}
