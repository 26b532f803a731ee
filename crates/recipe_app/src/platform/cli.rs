use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use recipe_engine::{FetchSettings, Latency, SourceConfig, DEFAULT_API_BASE_URL};

use super::logging::LogDestination;

#[derive(Debug, Parser)]
#[command(name = "recipe_app")]
#[command(version, about = "Browse, search and favorite recipes")]
pub struct Args {
    /// Serve the bundled recipe dataset instead of calling the API.
    #[arg(long, env = "RECIPE_USE_MOCK", default_value_t = true, action = ArgAction::Set)]
    pub use_mock: bool,

    #[arg(long, env = "RECIPE_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    /// Per-request timeout in milliseconds.
    #[arg(long, env = "RECIPE_REQUEST_TIMEOUT_MS", default_value_t = 8000)]
    pub request_timeout_ms: u64,

    /// Directory holding `.recipe_state.ron` (favorites and last search).
    #[arg(long, env = "RECIPE_STATE_DIR", default_value = ".")]
    pub state_dir: PathBuf,

    /// Search text applied after start-up.
    #[arg(long, short)]
    pub query: Option<String>,

    /// Required tag; repeat for several (all must match).
    #[arg(long = "tag", short = 't')]
    pub tags: Vec<String>,

    /// Accepted cuisine; repeat for several (any may match).
    #[arg(long = "cuisine", short = 'c')]
    pub cuisines: Vec<String>,

    /// Recipe id to show in detail.
    #[arg(long)]
    pub open: Option<String>,

    /// Recipe id whose favorite flag is flipped; may be repeated.
    #[arg(long = "toggle-favorite")]
    pub toggle_favorites: Vec<String>,

    /// Read further commands from stdin after the first render.
    #[arg(long, short)]
    pub interactive: bool,

    #[arg(long, value_enum, default_value = "file")]
    pub log: LogDestination,
}

impl Args {
    pub fn source_config(&self) -> SourceConfig {
        SourceConfig {
            use_mock: self.use_mock,
            api_base_url: self.api_base_url.clone(),
            fetch: FetchSettings {
                request_timeout: Duration::from_millis(self.request_timeout_ms),
                ..FetchSettings::default()
            },
            mock_latency: Latency::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_repeated_filters() {
        let args = Args::try_parse_from([
            "recipe_app",
            "--tag",
            "Vegetarian",
            "-t",
            "Quick",
            "--cuisine",
            "Indian",
            "--toggle-favorite",
            "chana-masala",
            "--use-mock",
            "false",
            "--request-timeout-ms",
            "1500",
        ])
        .unwrap();
        assert_eq!(args.tags, vec!["Vegetarian", "Quick"]);
        assert_eq!(args.cuisines, vec!["Indian"]);
        assert_eq!(args.toggle_favorites, vec!["chana-masala"]);

        let config = args.source_config();
        assert!(!config.use_mock);
        assert_eq!(config.fetch.request_timeout, Duration::from_millis(1500));
    }
}
