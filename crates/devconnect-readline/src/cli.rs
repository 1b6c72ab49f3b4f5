use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "devconnect")]
#[command(about = "Dev Connect - find a developer to build with and chat with them", long_about = None)]
#[command(version)]
pub struct Args {
    /// Gemini API key (overrides secret.json and GEMINI_API_KEY / GOOGLE_API_KEY)
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Model to use; skips model discovery
    #[arg(long)]
    pub model: Option<String>,

    /// Directory holding config.toml, secret.json and logs/
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "devconnect_interaction=trace" (defaults to RUST_LOG, then "info")
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Use the configured default model without listing models first
    #[arg(long)]
    pub no_discovery: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["devconnect"]).unwrap();
        assert!(args.api_key.is_none());
        assert!(args.model.is_none());
        assert!(args.config_dir.is_none());
        assert!(!args.no_discovery);
    }

    #[test]
    fn test_all_flags() {
        let args = Args::try_parse_from([
            "devconnect",
            "--api-key",
            "k",
            "--model",
            "gemini-pro",
            "--config-dir",
            "/tmp/dc",
            "--log-level",
            "debug",
            "--no-discovery",
        ])
        .unwrap();
        assert_eq!(args.api_key.as_deref(), Some("k"));
        assert_eq!(args.model.as_deref(), Some("gemini-pro"));
        assert_eq!(args.config_dir, Some(PathBuf::from("/tmp/dc")));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(args.no_discovery);
    }
}
