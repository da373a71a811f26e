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
use crate::model::PretrainedModel;
use crate::settings::CellposeSettings;
use serde::Deserialize;
use serde::Serialize;
use std::path::PathBuf;
use std::process::Command;

/// Python module run when the executable is an interpreter.
pub const CELLPOSE_MODULE: &str = "custom-cellpose";

/// Holds the executable and arguments of one Cellpose invocation.
///
/// This is what gets handed to the process launcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandArgs {
  /// The program to execute (e.g., "/usr/bin/python3" or "/opt/cellpose/cellpose").
  pub command: PathBuf,

  /// Everything after the program, in order.
  #[serde(default)]
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub args: Vec<String>,
}

impl CommandArgs {
  /// Builds an unspawned [`Command`] for this invocation.
  pub fn to_command(&self) -> Command {
    let mut cmd = Command::new(&self.command);
    cmd.args(&self.args);
    cmd
  }
}

impl CellposeSettings {
  /// Translates these settings into the full Cellpose command line for the
  /// images in `images_dir`.
  ///
  /// The first token is the executable. This never fails and never touches
  /// the filesystem.
  pub fn to_cmd_line(&self, images_dir: &str) -> Vec<String> {
    let exe = self.executable_path();
    let mut cmd = vec![exe.to_string()];
    if invokes_python(exe) {
      cmd.push("-m".to_string());
      cmd.push(CELLPOSE_MODULE.to_string());
    }

    cmd.push("--dir".to_string());
    cmd.push(images_dir.to_string());

    cmd.push("--chan".to_string());
    cmd.push(self.channel1().to_string());

    if let Some(chan2) = self.second_channel() {
      cmd.push("--chan2".to_string());
      cmd.push(chan2.to_string());
    }

    if self.use_gpu() {
      cmd.push("--use_gpu".to_string());
    }

    cmd.push("--diameter".to_string());
    cmd.push(if self.auto_diameter() {
      "0".to_string()
    } else {
      format_decimal(self.diameter())
    });

    cmd.push("--flow_threshold".to_string());
    cmd.push(format_decimal(self.flow_threshold()));

    cmd.push("--cellprob_threshold".to_string());
    cmd.push(format_decimal(self.cellprob_threshold()));

    if self.augment() {
      cmd.push("--augment".to_string());
    }

    cmd.push("--pretrained_model".to_string());
    cmd.push(match self.model() {
      PretrainedModel::Custom => self.custom_model_path().to_string(),
      model => model.cellpose_name().to_string(),
    });

    cmd.push("--save_png".to_string());
    cmd.push("--no_npy".to_string());
    cmd.push("--fast_mode".to_string());

    cmd
  }

  /// Same as [`to_cmd_line`](Self::to_cmd_line), split into program and arguments.
  pub fn to_command_args(&self, images_dir: &str) -> CommandArgs {
    let mut tokens = self.to_cmd_line(images_dir).into_iter();
    let command = PathBuf::from(tokens.next().unwrap_or_default());
    CommandArgs {
      command,
      args: tokens.collect(),
    }
  }
}

/// Whether `exe` names a Python interpreter rather than a Cellpose binary.
///
/// Backslashes count as separators. Trailing empty segments are skipped, so
/// `/env/bin/python/` still reads as `python`.
pub fn invokes_python(exe: &str) -> bool {
  let normalized = exe.replace('\\', "/");
  let last = normalized
    .rsplit('/')
    .find(|segment| !segment.is_empty())
    .unwrap_or("");
  last.to_lowercase().starts_with("python")
}

/// Renders a float the way the JVM's `Double.toString` does, which is the
/// format Cellpose has always been driven with: `30.0`, `0.4`, `1.0E-4`.
pub fn format_decimal(value: f64) -> String {
  if value.is_nan() {
    return "NaN".to_string();
  }
  if value.is_infinite() {
    return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
  }
  if value == 0.0 {
    return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
  }

  let magnitude = value.abs();
  if (1e-3..1e7).contains(&magnitude) {
    let plain = value.to_string();
    if plain.contains('.') {
      plain
    } else {
      format!("{plain}.0")
    }
  } else {
    let sci = format!("{value:e}");
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    if mantissa.contains('.') {
      format!("{mantissa}E{exponent}")
    } else {
      format!("{mantissa}.0E{exponent}")
    }
  }
}
