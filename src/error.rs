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
use std::path::PathBuf;
use thiserror::Error;

/// Settings combinations Cellpose cannot run with (src/settings.rs).
#[derive(Error, Debug, PartialEq)]
pub enum SettingsError {
  #[error("Model is 'custom' but no custom model path is set")]
  MissingCustomModelPath,

  #[error("Channel must be 0 or greater, got {0}")]
  NegativeChannel(i32),
}

/// Errors related to resolving layered settings (src/config.rs).
#[derive(Error, Debug)]
pub enum ConfigError {
  #[error("Settings file not found: {0}")]
  FileNotFound(PathBuf),

  #[error("Failed to resolve settings")]
  Extract(#[from] figment::Error),
}
