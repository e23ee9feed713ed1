use crate::analytics_client::{Fid, DEFAULT_TOP_POSTS_LIMIT};
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:4000";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Farcaster account to show; blank falls back to the default account
    #[arg(short, long)]
    pub fid: Option<String>,

    /// Dashboard link whose `fid` query parameter selects the account
    #[arg(long)]
    pub launch_url: Option<String>,

    #[arg(long, env = "ANALYTICS_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    /// Number of top posts to request
    #[arg(short, long, default_value_t = DEFAULT_TOP_POSTS_LIMIT)]
    pub limit: u32,

    /// Shell command run once the first frame has been drawn
    #[arg(long, env = "ANALYTICS_READY_COMMAND")]
    pub ready_command: Option<String>,

    #[arg(long, env = "ANALYTICS_LOG_FILE", default_value = "farcaster-analytics.log")]
    pub log_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub fid: Fid,
    pub api_base_url: Url,
    pub top_posts_limit: u32,
    pub ready_command: Option<String>,
    pub log_file: PathBuf,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self> {
        let api_base_url = Url::parse(&args.api_base_url)
            .with_context(|| format!("Invalid API base URL `{}`", args.api_base_url))?;

        if args.limit == 0 {
            return Err(anyhow!("--limit must be at least 1"));
        }

        // NB: an explicit --fid wins over the launch link; blank values fall through
        let explicit = args.fid.as_deref().filter(|fid| !fid.trim().is_empty());
        let fid = match (explicit, &args.launch_url) {
            (Some(fid), _) => Fid::parse_or_default(Some(fid)),
            (None, Some(launch_url)) => {
                let launch_url = Url::parse(launch_url)
                    .with_context(|| format!("Invalid launch URL `{launch_url}`"))?;
                Fid::from_launch_url(&launch_url).unwrap_or_default()
            }
            (None, None) => Fid::default(),
        };

        let ready_command = args
            .ready_command
            .filter(|command| !command.trim().is_empty());

        Ok(Self {
            fid,
            api_base_url,
            top_posts_limit: args.limit,
            ready_command,
            log_file: args.log_file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(argv: &[&str]) -> Result<Config> {
        let mut full = vec!["farcaster-analytics"];
        full.extend_from_slice(argv);
        Config::from_args(Args::try_parse_from(full)?)
    }

    #[test]
    fn test_default_fid() {
        let config = config(&[]).unwrap();
        assert_eq!(config.fid.as_str(), "774643");
        assert_eq!(config.top_posts_limit, 5);
    }

    #[test]
    fn test_fid_sources() {
        assert_eq!(config(&["--fid", "3"]).unwrap().fid.as_str(), "3");
        assert_eq!(
            config(&["--launch-url", "https://dash.example/?fid=99"])
                .unwrap()
                .fid
                .as_str(),
            "99"
        );
        assert_eq!(
            config(&["--fid", " ", "--launch-url", "https://dash.example/?fid=99"])
                .unwrap()
                .fid
                .as_str(),
            "99"
        );
        assert_eq!(
            config(&["--launch-url", "https://dash.example/?fid="])
                .unwrap()
                .fid
                .as_str(),
            "774643"
        );
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(config(&["--api-base-url", "not a url"]).is_err());
        assert!(config(&["--limit", "0"]).is_err());
    }
}
