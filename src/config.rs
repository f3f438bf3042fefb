// Command line and runtime configuration

use clap::Parser;
use std::path::PathBuf;

const APP_DIR: &str = "ytjam";
const LOG_FILE_NAME: &str = "ytjam.log";

#[derive(Debug, Parser)]
#[command(name = "ytjam")]
#[command(about = "Paste YouTube links, queue them, play them one after another", long_about = None)]
#[command(version)]
pub struct Cli {
    /// YouTube links to queue on startup
    pub urls: Vec<String>,

    /// Print the resolved queue as JSON and exit instead of opening the UI
    #[arg(long)]
    pub print: bool,

    /// Where to write the log (default: <data dir>/ytjam/ytjam.log)
    #[arg(long, env = "YTJAM_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub seed_urls: Vec<String>,
    pub print_only: bool,
    pub log_file: PathBuf,
}

impl AppConfig {
    pub fn from_cli(cli: Cli) -> Self {
        AppConfig {
            seed_urls: cli.urls,
            print_only: cli.print,
            log_file: cli.log_file.unwrap_or_else(default_log_file),
        }
    }
}

// Falls back to the temp dir on platforms without a data directory
fn default_log_file() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
        .join(LOG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_urls_and_flags() {
        let cli = Cli::parse_from([
            "ytjam",
            "--print",
            "--log-file",
            "/tmp/jam.log",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
        ]);
        let config = AppConfig::from_cli(cli);

        assert!(config.print_only);
        assert_eq!(config.log_file, PathBuf::from("/tmp/jam.log"));
        assert_eq!(config.seed_urls.len(), 2);
    }

    #[test]
    fn default_log_file_lives_in_app_dir() {
        let path = default_log_file();
        assert!(path.ends_with("ytjam/ytjam.log"));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
