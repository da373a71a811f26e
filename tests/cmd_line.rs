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
use cellpose_cmd::model::PretrainedModel;
use cellpose_cmd::settings::CellposeSettings;
use cellpose_cmd::settings::DEFAULT;
use std::path::PathBuf;

/// Value following `flag`, if the flag is present.
fn value_of<'a>(cmd: &'a [String], flag: &str) -> Option<&'a str> {
  let pos = cmd.iter().position(|t| t == flag)?;
  cmd.get(pos + 1).map(String::as_str)
}

fn has_flag(cmd: &[String], flag: &str) -> bool {
  cmd.iter().any(|t| t == flag)
}

#[test]
fn test_default_command_line() {
  let cmd = DEFAULT.to_cmd_line("/data/images");

  assert_eq!(
    cmd,
    [
      "/opt/anaconda3/envs/cellpose/bin/python",
      "-m",
      "custom-cellpose",
      "--dir",
      "/data/images",
      "--chan",
      "0",
      "--use_gpu",
      "--diameter",
      "30.0",
      "--flow_threshold",
      "0.4",
      "--cellprob_threshold",
      "0.0",
      "--pretrained_model",
      "cyto",
      "--save_png",
      "--no_npy",
      "--fast_mode",
    ]
  );
}

#[test]
fn test_second_channel_follows_first() {
  let cmd = CellposeSettings::builder()
    .channel1(2)
    .channel2(1)
    .build()
    .to_cmd_line("imgs");

  let chan = cmd.iter().position(|t| t == "--chan").unwrap();
  assert_eq!(cmd[chan + 1], "2");
  assert_eq!(cmd[chan + 2], "--chan2");
  assert_eq!(cmd[chan + 3], "1");

  let zero = CellposeSettings::builder().channel2(0).build().to_cmd_line("imgs");
  assert_eq!(value_of(&zero, "--chan2"), Some("0"));
}

#[test]
fn test_absent_second_channel_is_omitted() {
  for chan2 in [-1, -7] {
    let cmd = CellposeSettings::builder()
      .channel2(chan2)
      .build()
      .to_cmd_line("imgs");
    assert!(!has_flag(&cmd, "--chan2"), "chan2 = {chan2}");
  }
}

#[test]
fn test_non_positive_diameter_means_auto() {
  for diameter in [0.0, -0.0, -12.5, f64::NAN] {
    let cmd = CellposeSettings::builder()
      .diameter(diameter)
      .build()
      .to_cmd_line("imgs");
    assert_eq!(value_of(&cmd, "--diameter"), Some("0"), "diameter = {diameter}");
  }

  let cmd = CellposeSettings::builder().diameter(17.25).build().to_cmd_line("imgs");
  assert_eq!(value_of(&cmd, "--diameter"), Some("17.25"));
}

#[test]
fn test_python_interpreter_prefix() {
  let cmd = CellposeSettings::builder()
    .executable_path("/usr/bin/python3")
    .build()
    .to_cmd_line("imgs");
  assert_eq!(&cmd[..4], ["/usr/bin/python3", "-m", "custom-cellpose", "--dir"]);

  let cmd = CellposeSettings::builder()
    .executable_path(r"C:\Users\me\miniconda3\envs\cellpose\PYTHON.EXE")
    .build()
    .to_cmd_line("imgs");
  assert_eq!(cmd[1], "-m");
}

#[test]
fn test_native_binary_prefix() {
  let cmd = CellposeSettings::builder()
    .executable_path("/opt/cellpose/cellpose")
    .build()
    .to_cmd_line("imgs");
  assert_eq!(&cmd[..2], ["/opt/cellpose/cellpose", "--dir"]);

  // A bare name has no separator and is its own last segment.
  let cmd = CellposeSettings::builder()
    .executable_path("cellpose")
    .build()
    .to_cmd_line("imgs");
  assert_eq!(&cmd[..2], ["cellpose", "--dir"]);

  let cmd = CellposeSettings::builder()
    .executable_path("")
    .build()
    .to_cmd_line("imgs");
  assert_eq!(&cmd[..2], ["", "--dir"]);
}

#[test]
fn test_pretrained_model_argument() {
  let custom = CellposeSettings::builder()
    .model(PretrainedModel::Custom)
    .custom_model("/models/mymodel")
    .build()
    .to_cmd_line("imgs");
  assert_eq!(value_of(&custom, "--pretrained_model"), Some("/models/mymodel"));

  let nuclei = CellposeSettings::builder()
    .model(PretrainedModel::Nuclei)
    .custom_model("/models/ignored")
    .build()
    .to_cmd_line("imgs");
  assert_eq!(value_of(&nuclei, "--pretrained_model"), Some("nuclei"));

  let cyto2 = CellposeSettings::builder()
    .model(PretrainedModel::Cyto2)
    .build()
    .to_cmd_line("imgs");
  assert_eq!(value_of(&cyto2, "--pretrained_model"), Some("cyto2"));
}

#[test]
fn test_custom_model_without_path_emits_empty_argument() {
  let cmd = CellposeSettings::builder()
    .model(PretrainedModel::Custom)
    .build()
    .to_cmd_line("imgs");
  assert_eq!(value_of(&cmd, "--pretrained_model"), Some(""));
  assert_eq!(cmd.last().map(String::as_str), Some("--fast_mode"));
}

#[test]
fn test_optional_flags_order() {
  let cmd = CellposeSettings::builder()
    .executable_path("/opt/cellpose/cellpose")
    .channel2(3)
    .use_gpu(true)
    .augment(true)
    .flow_threshold(0.6)
    .cellprob_threshold(-1.5)
    .build()
    .to_cmd_line("d");

  assert_eq!(
    cmd,
    [
      "/opt/cellpose/cellpose",
      "--dir",
      "d",
      "--chan",
      "0",
      "--chan2",
      "3",
      "--use_gpu",
      "--diameter",
      "30.0",
      "--flow_threshold",
      "0.6",
      "--cellprob_threshold",
      "-1.5",
      "--augment",
      "--pretrained_model",
      "cyto",
      "--save_png",
      "--no_npy",
      "--fast_mode",
    ]
  );
}

#[test]
fn test_disabled_flags_are_absent() {
  let cmd = CellposeSettings::builder()
    .use_gpu(false)
    .augment(false)
    .simplify_contours(false)
    .build()
    .to_cmd_line("d");
  assert!(!has_flag(&cmd, "--use_gpu"));
  assert!(!has_flag(&cmd, "--augment"));
  assert!(!cmd.iter().any(|t| t.contains("simplify")));
  assert!(!cmd.iter().any(|t| t == "true" || t == "false"));
}

#[test]
fn test_translation_is_deterministic() {
  let settings = CellposeSettings::builder()
    .channel2(1)
    .augment(true)
    .build();
  assert_eq!(settings.to_cmd_line("dir"), settings.to_cmd_line("dir"));
}

#[test]
fn test_command_args_split() {
  let args = DEFAULT.to_command_args("/data");
  assert_eq!(
    args.command,
    PathBuf::from("/opt/anaconda3/envs/cellpose/bin/python")
  );
  assert_eq!(args.args[..2], ["-m", "custom-cellpose"]);
  assert_eq!(args.args.len() + 1, DEFAULT.to_cmd_line("/data").len());

  let command = args.to_command();
  assert_eq!(command.get_program(), "/opt/anaconda3/envs/cellpose/bin/python");
  assert_eq!(command.get_args().count(), args.args.len());
}

#[test]
fn test_command_args_json_shape() {
  let args = CellposeSettings::builder()
    .executable_path("/opt/cellpose/cellpose")
    .build()
    .to_command_args("d");
  let json: serde_json::Value = serde_json::to_value(&args).unwrap();

  assert_eq!(json["command"], "/opt/cellpose/cellpose");
  assert_eq!(json["args"][0], "--dir");
  assert_eq!(json["args"][1], "d");
}
