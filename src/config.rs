use crate::cli::SettingsArgs;
use crate::error::ConfigError;
use crate::model::PretrainedModel;
use crate::settings::CellposeSettings;
use figment::Figment;
use figment::providers::Env;
use figment::providers::Format;
use figment::providers::Json;
use figment::providers::Serialized;
use figment::providers::Toml;
use serde::Serialize;
use std::path::Path;

/// Prefix of the environment variables that override settings.
pub const ENV_PREFIX: &str = "CELLPOSE_";

/// Keys a settings file or `CELLPOSE_*` variable may set. Other variables
/// sharing the prefix, such as `CELLPOSE_LOG_FILE`, are left alone.
pub const SETTINGS_KEYS: &[&str] = &[
  "executable_path",
  "channel1",
  "channel2",
  "model",
  "custom_model_path",
  "diameter",
  "use_gpu",
  "simplify_contours",
  "flow_threshold",
  "cellprob_threshold",
  "augment",
];

/// Settings given explicitly on the command line. `None` leaves the value
/// from the lower layers untouched.
#[derive(Debug, Default, Clone, Serialize)]
pub struct SettingsOverrides {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub executable_path: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub channel1: Option<i32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub channel2: Option<i32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub model: Option<PretrainedModel>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub custom_model_path: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub diameter: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub use_gpu: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub simplify_contours: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub flow_threshold: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub cellprob_threshold: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub augment: Option<bool>,
}

/// Resolves settings from, lowest priority first: the defaults, `file`
/// (TOML, or JSON when the extension is `.json`), `CELLPOSE_*` environment
/// variables, then `overrides`.
///
/// Unknown keys in `file` are an error.
pub fn load_settings(
  file: Option<&Path>,
  overrides: &SettingsOverrides,
) -> Result<CellposeSettings, ConfigError> {
  let mut figment = Figment::from(Serialized::defaults(CellposeSettings::default()));

  if let Some(path) = file {
    if !path.exists() {
      return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    tracing::debug!(path = %path.display(), "Reading settings file");
    figment = if path.extension().is_some_and(|ext| ext == "json") {
      figment.merge(Json::file(path))
    } else {
      figment.merge(Toml::file(path))
    };
  }

  let settings: CellposeSettings = figment
    .merge(Env::prefixed(ENV_PREFIX).only(SETTINGS_KEYS))
    .merge(Serialized::defaults(overrides))
    .extract()?;

  tracing::debug!(?settings, "Resolved settings");
  Ok(settings)
}

impl From<&SettingsArgs> for SettingsOverrides {
  fn from(args: &SettingsArgs) -> Self {
    SettingsOverrides {
      executable_path: args.executable.clone(),
      channel1: args.chan,
      channel2: args.chan2,
      model: args.model,
      custom_model_path: args.custom_model.clone(),
      diameter: args.diameter,
      use_gpu: args.use_gpu,
      simplify_contours: args.simplify_contours,
      flow_threshold: args.flow_threshold,
      cellprob_threshold: args.cellprob_threshold,
      augment: args.augment,
    }
  }
}

impl TryFrom<SettingsArgs> for CellposeSettings {
  type Error = ConfigError;

  fn try_from(args: SettingsArgs) -> Result<Self, Self::Error> {
    let overrides = SettingsOverrides::from(&args);
    load_settings(args.config.as_deref(), &overrides)
  }
}
