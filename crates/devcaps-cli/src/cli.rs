// Copyright 2025 eraflo
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

//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Enumerates graphics adapters and the device configurations they support.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Replay a recorded JSON hardware profile instead of querying wgpu.
    #[arg(long, global = true, value_name = "FILE")]
    pub profile: Option<PathBuf>,

    /// TOML file overriding the enumeration settings.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print every adapter, device and combo found.
    List,
    /// Resolve the best device settings for a request.
    Select(SelectArgs),
}

#[derive(Args, Debug)]
pub struct SelectArgs {
    /// Require a fullscreen configuration.
    #[arg(long)]
    pub fullscreen: bool,

    /// Require this adapter ordinal.
    #[arg(long, value_name = "ORDINAL")]
    pub adapter: Option<u32>,

    /// Preferred back-buffer width.
    #[arg(long, requires = "height")]
    pub width: Option<u32>,

    /// Preferred back-buffer height.
    #[arg(long, requires = "width")]
    pub height: Option<u32>,

    /// Preferred fullscreen refresh rate in Hz.
    #[arg(long, value_name = "HZ")]
    pub refresh: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_select_parses_resolution() {
        let cli = Cli::try_parse_from([
            "devcaps",
            "select",
            "--fullscreen",
            "--width",
            "1024",
            "--height",
            "768",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Command::Select(args) => {
                assert!(args.fullscreen);
                assert_eq!((args.width, args.height), (Some(1024), Some(768)));
            }
            Command::List => panic!("expected the select subcommand"),
        }
    }

    #[test]
    fn test_width_requires_height() {
        assert!(Cli::try_parse_from(["devcaps", "select", "--width", "800"]).is_err());
    }
}
