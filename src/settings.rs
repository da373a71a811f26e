// Copyright 2025 Chisomo Makombo Sakala
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
use crate::error::SettingsError;
use crate::model::PretrainedModel;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use std::sync::LazyLock;

/// Conda-style interpreter used when no executable is configured.
pub const DEFAULT_EXECUTABLE_PATH: &str = "/opt/anaconda3/envs/cellpose/bin/python";

/// Settings built from defaults only.
pub static DEFAULT: LazyLock<CellposeSettings> = LazyLock::new(CellposeSettings::default);

/// Every tunable parameter of one Cellpose segmentation run.
///
/// Values are immutable once built. Use [`CellposeSettings::builder`] to
/// create one, or [`CellposeSettings::to_builder`] to derive a variant.
///
/// Two fields keep the sentinels the Cellpose command line understands:
/// a negative `channel2` means "no second channel" and a `diameter` that is
/// not positive means "let Cellpose estimate it".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CellposeSettings {
  /// Python interpreter or standalone Cellpose executable.
  #[serde(deserialize_with = "scalar_to_string")]
  executable_path: String,

  channel1: i32,

  channel2: i32,

  model: PretrainedModel,

  /// Only read when `model` is `Custom`.
  #[serde(deserialize_with = "scalar_to_string")]
  custom_model_path: String,

  diameter: f64,

  use_gpu: bool,

  /// Post-processing hint for whoever consumes the masks. Never emitted.
  simplify_contours: bool,

  flow_threshold: f64,

  cellprob_threshold: f64,

  augment: bool,
}

/// Environment values arrive typed, so a path such as `2024` or `true` is
/// read back as the text it was written as.
fn scalar_to_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Scalar {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Bool(bool),
  }

  Ok(match Scalar::deserialize(deserializer)? {
    Scalar::Text(s) => s,
    Scalar::Unsigned(n) => n.to_string(),
    Scalar::Signed(n) => n.to_string(),
    Scalar::Float(n) => n.to_string(),
    Scalar::Bool(b) => b.to_string(),
  })
}

impl Default for CellposeSettings {
  fn default() -> Self {
    CellposeSettingsBuilder::default().build()
  }
}

impl CellposeSettings {
  pub fn builder() -> CellposeSettingsBuilder {
    CellposeSettingsBuilder::default()
  }

  /// Returns a builder seeded with this value's fields.
  pub fn to_builder(&self) -> CellposeSettingsBuilder {
    CellposeSettingsBuilder {
      inner: self.clone(),
    }
  }

  pub fn executable_path(&self) -> &str {
    &self.executable_path
  }

  pub fn channel1(&self) -> i32 {
    self.channel1
  }

  pub fn channel2(&self) -> i32 {
    self.channel2
  }

  /// The second channel, or `None` when the sentinel marks it absent.
  pub fn second_channel(&self) -> Option<i32> {
    (self.channel2 >= 0).then_some(self.channel2)
  }

  pub fn model(&self) -> PretrainedModel {
    self.model
  }

  pub fn custom_model_path(&self) -> &str {
    &self.custom_model_path
  }

  pub fn diameter(&self) -> f64 {
    self.diameter
  }

  /// True when Cellpose should estimate the object diameter itself.
  pub fn auto_diameter(&self) -> bool {
    !(self.diameter > 0.0)
  }

  pub fn use_gpu(&self) -> bool {
    self.use_gpu
  }

  pub fn simplify_contours(&self) -> bool {
    self.simplify_contours
  }

  pub fn flow_threshold(&self) -> f64 {
    self.flow_threshold
  }

  pub fn cellprob_threshold(&self) -> f64 {
    self.cellprob_threshold
  }

  pub fn augment(&self) -> bool {
    self.augment
  }

  /// Checks the combinations Cellpose would reject or misread.
  ///
  /// Translation does not depend on this; a custom model with an empty path
  /// still translates to `--pretrained_model ""`.
  pub fn validate(&self) -> Result<(), SettingsError> {
    if self.channel1 < 0 {
      return Err(SettingsError::NegativeChannel(self.channel1));
    }
    if self.model == PretrainedModel::Custom && self.custom_model_path.is_empty() {
      return Err(SettingsError::MissingCustomModelPath);
    }
    Ok(())
  }
}

/// Accumulates overrides on top of the default settings.
///
/// Setters never validate. [`build`](Self::build) can be called any number of
/// times; the builder keeps its state.
#[derive(Debug, Clone)]
pub struct CellposeSettingsBuilder {
  inner: CellposeSettings,
}

impl Default for CellposeSettingsBuilder {
  fn default() -> Self {
    Self {
      inner: CellposeSettings {
        executable_path: DEFAULT_EXECUTABLE_PATH.to_string(),
        channel1: 0,
        channel2: -1,
        model: PretrainedModel::Cyto,
        custom_model_path: String::new(),
        diameter: 30.0,
        use_gpu: true,
        simplify_contours: true,
        flow_threshold: 0.4,
        cellprob_threshold: 0.0,
        augment: false,
      },
    }
  }
}

impl CellposeSettingsBuilder {
  pub fn executable_path(&mut self, path: impl Into<String>) -> &mut Self {
    self.inner.executable_path = path.into();
    self
  }

  pub fn channel1(&mut self, channel: i32) -> &mut Self {
    self.inner.channel1 = channel;
    self
  }

  /// Pass a negative value to drop the second channel.
  pub fn channel2(&mut self, channel: i32) -> &mut Self {
    self.inner.channel2 = channel;
    self
  }

  pub fn model(&mut self, model: PretrainedModel) -> &mut Self {
    self.inner.model = model;
    self
  }

  pub fn custom_model(&mut self, path: impl Into<String>) -> &mut Self {
    self.inner.custom_model_path = path.into();
    self
  }

  /// Zero or negative lets Cellpose estimate the diameter.
  pub fn diameter(&mut self, diameter: f64) -> &mut Self {
    self.inner.diameter = diameter;
    self
  }

  pub fn use_gpu(&mut self, use_gpu: bool) -> &mut Self {
    self.inner.use_gpu = use_gpu;
    self
  }

  pub fn simplify_contours(&mut self, simplify: bool) -> &mut Self {
    self.inner.simplify_contours = simplify;
    self
  }

  pub fn flow_threshold(&mut self, threshold: f64) -> &mut Self {
    self.inner.flow_threshold = threshold;
    self
  }

  pub fn cellprob_threshold(&mut self, threshold: f64) -> &mut Self {
    self.inner.cellprob_threshold = threshold;
    self
  }

  pub fn augment(&mut self, augment: bool) -> &mut Self {
    self.inner.augment = augment;
    self
  }

  pub fn build(&self) -> CellposeSettings {
    self.inner.clone()
  }
}
