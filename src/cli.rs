use crate::model::PretrainedModel;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about = "Builds Cellpose segmentation command lines")]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
  /// Print the Cellpose invocation for a directory of images.
  Args {
    /// Directory holding the images to segment.
    #[arg(long)]
    dir: String,

    /// How to print the invocation.
    #[arg(long, value_enum, default_value_t = OutputFormat::Lines)]
    format: OutputFormat,

    /// Fail instead of warning when the settings do not validate.
    #[arg(long)]
    strict: bool,

    #[command(flatten)]
    settings: SettingsArgs,
  },

  /// Print the resolved settings as TOML.
  Settings {
    #[command(flatten)]
    settings: SettingsArgs,
  },

  /// List the pretrained models.
  Models,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
  /// One token per line, executable first.
  Lines,
  /// A JSON object with `command` and `args`.
  Json,
}

/// Settings sources shared by every subcommand that resolves settings.
///
/// Flags win over `CELLPOSE_*` environment variables, which win over the
/// settings file, which wins over the defaults.
#[derive(Debug, Default, Clone, Args)]
pub struct SettingsArgs {
  /// TOML (or `.json`) settings file.
  #[arg(long, env = "CELLPOSE_CONFIG")]
  pub config: Option<PathBuf>,

  /// Python interpreter or Cellpose executable.
  #[arg(long)]
  pub executable: Option<String>,

  /// Channel to segment.
  #[arg(long, allow_hyphen_values = true)]
  pub chan: Option<i32>,

  /// Optional second channel. Negative drops it.
  #[arg(long, allow_hyphen_values = true)]
  pub chan2: Option<i32>,

  #[arg(long, value_enum)]
  pub model: Option<PretrainedModel>,

  /// Weights file used with `--model custom`.
  #[arg(long)]
  pub custom_model: Option<String>,

  /// Expected object diameter in pixels. 0 or less auto-detects.
  #[arg(long, allow_hyphen_values = true)]
  pub diameter: Option<f64>,

  #[arg(long)]
  pub use_gpu: Option<bool>,

  #[arg(long)]
  pub simplify_contours: Option<bool>,

  #[arg(long, allow_hyphen_values = true)]
  pub flow_threshold: Option<f64>,

  #[arg(long, allow_hyphen_values = true)]
  pub cellprob_threshold: Option<f64>,

  /// Test-time augmentation.
  #[arg(long)]
  pub augment: Option<bool>,
}
