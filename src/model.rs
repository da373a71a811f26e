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
use clap::ValueEnum;
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/// The pretrained weights Cellpose segments with.
///
/// Every variant carries a human-readable label and the identifier Cellpose
/// expects after `--pretrained_model`. `Custom` has no identifier; the
/// settings' custom model path is passed instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum PretrainedModel {
  #[serde(rename = "cyto")]
  #[value(name = "cyto")]
  Cyto,

  #[serde(rename = "nuclei")]
  #[value(name = "nuclei")]
  Nuclei,

  #[serde(rename = "cyto2")]
  #[value(name = "cyto2")]
  Cyto2,

  #[serde(rename = "custom")]
  #[value(name = "custom")]
  Custom,
}

impl PretrainedModel {
  /// All models, in declaration order.
  pub const ALL: [PretrainedModel; 4] = [
    PretrainedModel::Cyto,
    PretrainedModel::Nuclei,
    PretrainedModel::Cyto2,
    PretrainedModel::Custom,
  ];

  /// Spelling used by `--model` and settings files.
  pub fn key(self) -> &'static str {
    match self {
      PretrainedModel::Custom => "custom",
      other => other.cellpose_name(),
    }
  }

  /// Human-readable name, as shown in listings.
  pub fn label(self) -> &'static str {
    match self {
      PretrainedModel::Cyto => "Cytoplasm",
      PretrainedModel::Nuclei => "Nucleus",
      PretrainedModel::Cyto2 => "Cytoplasm 2.0",
      PretrainedModel::Custom => "Custom",
    }
  }

  /// Identifier passed to `--pretrained_model`. Empty for `Custom`.
  pub fn cellpose_name(self) -> &'static str {
    match self {
      PretrainedModel::Cyto => "cyto",
      PretrainedModel::Nuclei => "nuclei",
      PretrainedModel::Cyto2 => "cyto2",
      PretrainedModel::Custom => "",
    }
  }
}

impl fmt::Display for PretrainedModel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}
