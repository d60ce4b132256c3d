use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{ensure, Context};
use regex::Regex;
use serde::Deserialize;
use url::Url;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PrwatchConfig {
    /// Base URL used to build links to pull requests
    pub github_url: Url,
    /// Markers and authors the classifier looks for in comments
    pub rules: ClassifierRules,
}

impl PrwatchConfig {
    /// Reads and validates the YAML configuration at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let config_file =
            File::open(path).with_context(|| format!("couldn't open {}:", path.display()))?;
        let config: PrwatchConfig = serde_yaml::from_reader(BufReader::new(config_file))
            .context("couldn't parse config file")?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.rules.phase_pattern.captures_len() > 1,
            "phase_pattern `{}` needs a capture group for the phase",
            self.rules.phase_pattern
        );

        Ok(())
    }

    /// Link to pull request `number` of `full_name`. Neither part is validated, missing parts
    /// render as empty segments.
    pub fn pr_url(&self, full_name: Option<&str>, number: Option<u64>) -> String {
        format!(
            "{}/{}/pull/{}",
            self.github_url.as_str().trim_end_matches('/'),
            full_name.unwrap_or_default(),
            number.map(|n| n.to_string()).unwrap_or_default()
        )
    }
}

impl Default for PrwatchConfig {
    fn default() -> Self {
        Self {
            github_url: Url::parse("https://github.com/").expect("this should never fail"),
            rules: ClassifierRules::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierRules {
    /// Tag asking for a review notification
    pub review_tag: String,
    /// Sentinel posted once every phase is done
    pub completion_marker: String,
    /// Only comments from this login may signal completion
    pub completion_author: String,
    /// Edited comments only need a review once they contain this
    pub finished_marker: String,
    /// First capture group is reported as the phase. `\d` matches any Unicode digit, spell out
    /// `[0-9]` to only accept ASCII ones
    #[serde(with = "serde_regex")]
    pub phase_pattern: Regex,
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self {
            review_tag: "@claude-review-needed".to_owned(),
            completion_marker: "【PHASE4_COMPLETE】".to_owned(),
            completion_author: "claude[bot]".to_owned(),
            finished_marker: "Claude finished".to_owned(),
            phase_pattern: Regex::new(r"Phase ([0-9])").expect("this should never fail"),
        }
    }
}
