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

//! Deployment of generated configurations into a GNS3 project.
//!
//! A GNS3 project stores each node's startup configuration somewhere below
//! `project-files/<family>/<node_id>/`. This module locates those files via the project's
//! `.gns3` descriptor and replaces them with the freshly generated text, optionally keeping a
//! timestamped backup of the previous content.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Error thrown by the deployment tool.
#[derive(Debug, Error)]
pub enum DeployError {
    /// Underlying filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The project descriptor cannot be parsed.
    #[error("Cannot parse the project file: {0}")]
    Json(#[from] serde_json::Error),
    /// The project directory contains no `.gns3` descriptor.
    #[error("No .gns3 project file found in {0}")]
    ProjectFileNotFound(PathBuf),
    /// The project descriptor lists no nodes.
    #[error("The project file contains no nodes")]
    NoNodes,
}

/// Options of a deployment run.
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// The directory containing the generated `<router><ext>` files.
    pub generated: PathBuf,
    /// The extension of the generated files, including the dot.
    pub ext: String,
    /// Keep a timestamped backup of every replaced startup-config.
    pub backup: bool,
    /// Report what would be copied without writing anything.
    pub dry_run: bool,
}

/// Outcome of a deployment run, grouped by what happened per node.
#[derive(Debug, Default)]
pub struct DeploySummary {
    /// Nodes whose startup-config was replaced (or would have been, on a dry run).
    pub deployed: Vec<(String, PathBuf)>,
    /// Nodes without a generated configuration file.
    pub missing_generated: Vec<String>,
    /// Nodes whose directory was not found below `project-files/`.
    pub missing_node_dir: Vec<String>,
    /// Nodes without a recognizable startup-config file.
    pub missing_startup: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ProjectFile {
    #[serde(default)]
    topology: ProjectTopology,
}

#[derive(Debug, Default, Deserialize)]
struct ProjectTopology {
    #[serde(default)]
    nodes: Vec<ProjectNode>,
}

#[derive(Debug, Deserialize)]
struct ProjectNode {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    node_id: Option<String>,
}

/// Deploy all generated configurations into the given GNS3 project directory.
pub fn deploy(project: &Path, opts: &DeployOptions) -> Result<DeploySummary, DeployError> {
    let descriptor = find_project_file(project)?;
    log::info!("using project file {}", descriptor.display());

    let parsed: ProjectFile = serde_json::from_str(&fs::read_to_string(&descriptor)?)?;
    if parsed.topology.nodes.is_empty() {
        return Err(DeployError::NoNodes);
    }

    let mut summary = DeploySummary::default();
    for node in &parsed.topology.nodes {
        let (Some(name), Some(node_id)) = (&node.name, &node.node_id) else {
            continue;
        };

        let src = opts.generated.join(format!("{}{}", name, opts.ext));
        if !src.exists() {
            summary.missing_generated.push(name.clone());
            continue;
        }

        let Some(node_dir) = find_node_dir(project, node_id) else {
            summary.missing_node_dir.push(name.clone());
            continue;
        };

        let Some(dst) = find_startup_config(&node_dir)? else {
            summary.missing_startup.push(name.clone());
            continue;
        };

        if opts.dry_run {
            log::info!("[dry-run] copy {} -> {}", src.display(), dst.display());
        } else {
            if opts.backup && dst.exists() {
                let backup = backup_path(&dst);
                fs::copy(&dst, &backup)?;
                log::info!("backup: {}", backup.display());
            }
            fs::copy(&src, &dst)?;
            log::info!("deployed {} -> {}", name, dst.display());
        }
        summary.deployed.push((name.clone(), dst));
    }

    Ok(summary)
}

/// Find the `.gns3` descriptor in the project directory. If several exist, take the first in
/// lexicographic order.
fn find_project_file(project: &Path) -> Result<PathBuf, DeployError> {
    let mut candidates: Vec<PathBuf> = fs::read_dir(project)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| {
            p.extension()
                .map(|ext| ext.eq_ignore_ascii_case("gns3"))
                .unwrap_or(false)
        })
        .collect();
    candidates.sort();
    candidates
        .into_iter()
        .next()
        .ok_or_else(|| DeployError::ProjectFileNotFound(project.to_path_buf()))
}

/// Find the node directory `project-files/<family>/<node_id>` for any family (dynamips, qemu,
/// iou, ...).
fn find_node_dir(project: &Path, node_id: &str) -> Option<PathBuf> {
    let project_files = project.join("project-files");
    let families = fs::read_dir(project_files).ok()?;
    for family in families.filter_map(|entry| entry.ok()) {
        if !family.path().is_dir() {
            continue;
        }
        let candidate = family.path().join(node_id);
        if candidate.is_dir() {
            return Some(candidate);
        }
    }
    None
}

/// Find the startup-config below a node directory. Depending on the platform the file may be
/// `configs/i1_startup-config.cfg`, `startup-config.cfg`, or similar; candidates inside a
/// `configs/` directory win, then shorter paths.
pub fn find_startup_config(node_dir: &Path) -> Result<Option<PathBuf>, DeployError> {
    let mut hits = Vec::new();
    collect_startup_configs(node_dir, &mut hits)?;
    hits.sort_by_key(|p| {
        let in_configs = p
            .parent()
            .and_then(|d| d.file_name())
            .map(|d| d == "configs")
            .unwrap_or(false);
        (!in_configs, p.as_os_str().len())
    });
    Ok(hits.into_iter().next())
}

fn collect_startup_configs(dir: &Path, hits: &mut Vec<PathBuf>) -> Result<(), DeployError> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_startup_configs(&path, hits)?;
        } else if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            let name = name.to_ascii_lowercase();
            if name.contains("startup-config") && name.ends_with(".cfg") {
                hits.push(path);
            }
        }
    }
    Ok(())
}

/// The backup destination for a startup-config: the same path with a timestamp suffix.
fn backup_path(path: &Path) -> PathBuf {
    let now = time::OffsetDateTime::now_utc();
    let mut name = path.as_os_str().to_os_string();
    name.push(format!(
        ".bak-{:04}{:02}{:02}-{:02}{:02}{:02}",
        now.year(),
        u8::from(now.month()),
        now.day(),
        now.hour(),
        now.minute(),
        now.second()
    ));
    PathBuf::from(name)
}
