// IntentC: Intent-to-configuration compiler for BGP networks
// Copyright (C) 2024-2026 The IntentC developers
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use intentc::assemble;
use intentc::deploy::{self, DeployOptions};
use intentc::intent::IntentDocument;
use intentc::topology::Topology;

/// Compile a declarative network intent into per-router configurations, and deploy them into a
/// GNS3 project.
#[derive(Debug, Parser)]
#[clap(version, about)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate one configuration file per router from the intent document.
    Generate {
        /// Path to the intent document.
        #[clap(long = "intent", short = 'i', default_value = "intent.json")]
        intent: PathBuf,
        /// Output directory. Defaults to `project_settings.output_folder` of the intent.
        #[clap(long = "output", short = 'o')]
        output: Option<PathBuf>,
    },
    /// Copy the generated configurations over the startup-configs of a GNS3 project.
    Deploy {
        /// Path of the GNS3 project directory (the one containing the `.gns3` file).
        #[clap(long = "project", short = 'p')]
        project: PathBuf,
        /// Directory containing the generated configuration files.
        #[clap(long = "generated", short = 'g', default_value = "output")]
        generated: PathBuf,
        /// Extension of the generated configuration files.
        #[clap(long = "ext", default_value = ".cfg")]
        ext: String,
        /// Keep a timestamped backup of each replaced startup-config.
        #[clap(long = "backup", short = 'b')]
        backup: bool,
        /// Report what would be copied without writing anything.
        #[clap(long = "dry-run")]
        dry_run: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    match Cli::parse().command {
        Command::Generate { intent, output } => generate(intent, output),
        Command::Deploy {
            project,
            generated,
            ext,
            backup,
            dry_run,
        } => {
            let summary = deploy::deploy(
                &project,
                &DeployOptions {
                    generated,
                    ext,
                    backup,
                    dry_run,
                },
            )?;
            log::info!("deployed: {}", summary.deployed.len());
            for name in &summary.missing_generated {
                log::warn!("no generated config for {name}");
            }
            for name in &summary.missing_node_dir {
                log::warn!("node directory not found for {name}");
            }
            for name in &summary.missing_startup {
                log::warn!("no startup-config found for {name}");
            }
            Ok(())
        }
    }
}

/// Compile every router and write the artifacts. One failing router does not block the
/// remaining ones; its artifact is simply not produced.
fn generate(intent: PathBuf, output: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let document = IntentDocument::from_json(&fs::read_to_string(&intent)?)?;
    let output = output
        .unwrap_or_else(|| PathBuf::from(&document.project_settings.output_folder));
    fs::create_dir_all(&output)?;

    let topo = Topology::new(&document)?;
    topo.validate()?;

    let mut failures = 0usize;
    for name in document.router_names() {
        match assemble::compile_router(&topo, name) {
            Ok(cfg) => {
                let path = output.join(format!("{name}.cfg"));
                fs::write(&path, cfg)?;
                log::info!("generated configuration for {name}");
            }
            Err(e) => {
                failures += 1;
                log::error!("cannot compile {name}: {e}");
            }
        }
    }

    if failures > 0 {
        return Err(format!("{failures} router(s) failed to compile").into());
    }
    log::info!("all configurations written to {}", output.display());
    Ok(())
}
