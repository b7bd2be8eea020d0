use std::path::PathBuf;

use clap::Parser;

/// BlurkitTool: a native window around the bundled Blurkit web server.
#[derive(Parser, Debug)]
#[command(name = "blurkit", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log filter override (e.g. `debug`, `blurkit=trace`).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Write a commented default config file and exit.
    #[arg(long)]
    pub init_config: bool,

    /// Print the effective config as JSON and exit.
    #[arg(long)]
    pub print_config: bool,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_is_plain_launch() {
        let args = Args::try_parse_from(["blurkit"]).unwrap();
        assert!(args.config.is_none());
        assert!(args.log_level.is_none());
        assert!(!args.init_config);
        assert!(!args.print_config);
    }

    #[test]
    fn overrides_are_parsed() {
        let args = Args::try_parse_from([
            "blurkit",
            "--config",
            "/tmp/blurkit.toml",
            "--log-level",
            "blurkit=debug",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/tmp/blurkit.toml")));
        assert_eq!(args.log_level.as_deref(), Some("blurkit=debug"));
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Args::try_parse_from(["blurkit", "--no-browser"]).is_err());
    }
}
