// Copyright 2026 The Matrix.org Foundation C.I.C.
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

//! # autoformat CLI
//!
//! Type into a stored document from the terminal and watch the markup
//! triggers fire.
//!
//! Logging goes to stderr and is configured with `RUST_LOG`, e.g.
//! `RUST_LOG=autoformat=debug` to see every trigger.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

#[derive(Parser)]
#[command(name = "autoformat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the saved document
    #[arg(long, env = "AUTOFORMAT_STORE_DIR", default_value = ".")]
    store_dir: PathBuf,

    /// Path to a YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Type text into the saved document and print the result
    Type {
        /// Characters to type; a newline starts a new block
        text: String,

        /// Save the document afterwards
        #[arg(long)]
        save: bool,
    },

    /// Print the saved document
    Show {
        /// Output format
        #[arg(long, value_enum, default_value_t = ShowFormat::Html)]
        format: ShowFormat,
    },

    /// Discard the saved document
    Reset,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ShowFormat {
    Html,
    Plain,
    Json,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(console_layer).init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Type { text, save } => {
            commands::type_text(&cli.store_dir, config, &text, save)
        }
        Commands::Show { format } => {
            commands::show(&cli.store_dir, config, format)
        }
        Commands::Reset => commands::reset(&cli.store_dir, config),
    }
}
