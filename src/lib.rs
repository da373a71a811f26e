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

//! # cellpose-cmd
//!
//! `cellpose-cmd` turns a set of Cellpose segmentation settings into the
//! command line that runs Cellpose on a directory of images, either as a
//! Python module (`python -m custom-cellpose ...`) or as a standalone binary.
//!
//! The library never spawns anything. Callers hand the resulting
//! [`command::CommandArgs`] to whatever launches and monitors the process.
//!
//! ```
//! use cellpose_cmd::model::PretrainedModel;
//! use cellpose_cmd::settings::CellposeSettings;
//!
//! let settings = CellposeSettings::builder()
//!   .executable_path("/usr/bin/python3")
//!   .model(PretrainedModel::Nuclei)
//!   .diameter(17.5)
//!   .build();
//!
//! let cmd = settings.to_cmd_line("/data/images");
//! assert_eq!(&cmd[..3], ["/usr/bin/python3", "-m", "custom-cellpose"]);
//! assert!(cmd.windows(2).any(|w| w == ["--diameter", "17.5"]));
//! ```
//!
//! ## Core Modules
//!
//! * [`settings`]: The immutable `CellposeSettings` value, its builder and
//!   the `DEFAULT` instance.
//! * [`command`]: Translates settings into the ordered argument list.
//! * [`model`]: The pretrained models and their Cellpose identifiers.
//! * [`config`]: Layers defaults, a settings file, `CELLPOSE_*` environment
//!   variables and CLI flags into one `CellposeSettings`.
//! * [`cli`]: Defines the `clap`-based command-line interface.
//! * [`error`]: Defines the custom error types for the library.
//! * [`logging`]: Provides the `setup_tracing` utility.

pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod settings;
