use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::{AppContext, InitArgs};
use crate::core::catalog::MarkerCatalog;
use crate::core::inject::Directive;
use crate::core::transform::Rules;
use crate::error::MendError;

/// Config file names searched in the batch root, first hit wins
pub const CONFIG_FILES: [&str; 4] = [
    "promptmend.toml",
    ".promptmend.toml",
    "promptmend.yaml",
    "promptmend.json",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config
{
    /// Prompt directory, relative to the batch root
    pub prompt_dir: PathBuf,

    /// Extension of candidate files (without the dot)
    pub extension: String,

    /// Ordered marker catalog; first match per line is reported
    pub markers: Vec<String>,

    /// Line injected after the first line of every prompt
    pub directive: Option<DirectiveConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectiveConfig
{
    pub text: String,

    /// Substring that marks the directive as already present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragment: Option<String>,
}

impl Default for Config
{
    fn default() -> Self
    {
        Self {
            prompt_dir: PathBuf::from("prompts"),
            extension: "txt".to_string(),
            markers: Vec::new(),
            directive: None,
        }
    }
}

impl Config
{
    /// Example written by `pmend init`.
    pub fn example() -> Self
    {
        Self {
            markers: vec!["[[draft]]".to_string(), "INTERNAL NOTE:".to_string()],
            directive: Some(DirectiveConfig {
                text: "Keep responses concise and cite file paths when referring to code."
                    .to_string(),
                fragment: Some("Keep responses concise".to_string()),
            }),
            ..Self::default()
        }
    }

    /// Validate and compile catalog + directive.
    pub fn rules(&self) -> Result<Rules, MendError>
    {
        let catalog = MarkerCatalog::new(self.markers.iter().cloned())?;

        let directive = self
            .directive
            .as_ref()
            .ok_or_else(|| MendError::InvalidConfig("no directive configured".into()))?;
        let directive = Directive::new(directive.text.clone(), directive.fragment.clone())?;

        Rules::new(catalog, directive)
    }
}

/// Load config from `explicit` or the first known file under `root`,
/// then overlay `PROMPTMEND_*` environment variables.
pub fn load_config(
    root: &Path,
    explicit: Option<&Path>,
) -> Result<Config>
{
    let mut builder = config::Config::builder();

    if let Some(path) = explicit
    {
        builder = builder.add_source(config::File::from(path).required(true));
        tracing::debug!(path = %path.display(), "using explicit config");
    }
    else
    {
        for name in &CONFIG_FILES
        {
            let candidate = root.join(name);
            if candidate.is_file()
            {
                tracing::debug!(path = %candidate.display(), "using config");
                builder = builder.add_source(config::File::from(candidate.as_path()));
                break;
            }
        }
    }

    // Add environment variables with PROMPTMEND_ prefix
    builder = builder.add_source(
        config::Environment::with_prefix("PROMPTMEND")
            .prefix_separator("_")
            .separator("__"),
    );

    let cfg = builder
        .build()
        .context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}

pub fn init(
    args: InitArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config_path = args
        .path
        .join(CONFIG_FILES[0]);

    if config_path.exists() && !args.force
    {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let body =
        toml::to_string_pretty(&Config::example()).context("Failed to serialize example config")?;
    let text = format!(
        "# promptmend configuration\n\
         # Lines containing any marker are removed (first marker listed wins in reports).\n\
         # The directive is inserted after line 1 unless its fragment is already present.\n\n{body}"
    );

    std::fs::write(&config_path, text).context("Failed to write config file")?;

    if !ctx.quiet
    {
        println!("Created config file at {}", config_path.display());
    }
    Ok(())
}
