use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(name = "tsa-checker-server")]
#[command(version, about = "Check whether an item may travel in carry-on or checked luggage", long_about = None)]
pub struct Cli {
    /// Configuration file path (optional; defaults apply when missing)
    #[arg(short, long, default_value = "config.yaml")]
    pub config: String,

    /// Listen address
    #[arg(short = 'l', long)]
    pub listen: Option<String>,

    /// Listen port
    #[arg(short = 'P', long, env = "PORT")]
    pub port: Option<u16>,

    /// Completion API base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Model identifier sent to the completion API
    #[arg(short, long)]
    pub model: Option<String>,

    /// Completion API key (wrapped in a secret as soon as the config is built)
    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
