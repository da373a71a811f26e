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
use Commands::Args;
use Commands::Models;
use Commands::Settings;
use anyhow::Context;
use anyhow::Result;
use cellpose_cmd::cli::Cli;
use cellpose_cmd::cli::Commands;
use cellpose_cmd::cli::OutputFormat;
use cellpose_cmd::logging::setup_tracing;
use cellpose_cmd::model::PretrainedModel;
use cellpose_cmd::settings::CellposeSettings;
use clap::Parser;

fn main() -> Result<()> {
  let _log_guard = setup_tracing()?;

  let Cli { command } = Cli::parse();
  let main_span = tracing::info_span!("cellpose_cmd");
  let _enter = main_span.enter();

  match command {
    Args {
      dir,
      format,
      strict,
      settings,
    } => {
      let settings =
        CellposeSettings::try_from(settings).context("Failed to resolve Cellpose settings")?;

      if let Err(e) = settings.validate() {
        if strict {
          return Err(e).context("Settings rejected in strict mode");
        }
        tracing::warn!(error = %e, "Settings do not validate; emitting the command line anyway");
      }

      let cmd = settings.to_cmd_line(&dir);
      tracing::info!(
        exe = %settings.executable_path(),
        tokens = cmd.len(),
        "Built Cellpose command line"
      );
      tracing::debug!(?cmd);

      match format {
        OutputFormat::Lines => {
          for token in &cmd {
            println!("{token}");
          }
        }
        OutputFormat::Json => {
          let json = serde_json::to_string(&settings.to_command_args(&dir))
            .context("Failed to serialize command")?;
          println!("{json}");
        }
      }
    }
    Settings { settings } => {
      let settings =
        CellposeSettings::try_from(settings).context("Failed to resolve Cellpose settings")?;
      let toml = toml::to_string_pretty(&settings).context("Failed to serialize settings")?;
      print!("{toml}");
    }
    Models => {
      for model in PretrainedModel::ALL {
        println!("{}\t{}", model.key(), model);
      }
    }
  }

  Ok(())
}
