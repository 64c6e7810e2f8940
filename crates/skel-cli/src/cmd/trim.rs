use crate::output::Renderable;
use anyhow::{Context, Result};
use serde::Serialize;
use skel_core::config::{load_file_config, resolve_config, user_config_path, CliOverrides};
use skel_core::io::{read_skeleton, write_skeleton};
use skel_trim::trim_skeleton;
use std::path::{Path, PathBuf};

pub struct Args {
    pub input: PathBuf,
    pub output: PathBuf,
    pub config: Option<PathBuf>,
    pub dust_threshold: Option<f64>,
    pub tick_threshold: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub input_vertices: usize,
    pub input_edges: usize,
    pub output_vertices: usize,
    pub output_edges: usize,
    pub dust_threshold: f64,
    pub tick_threshold: f64,
    pub output_path: String,
}

impl Renderable for Report {
    fn render_text(&self) -> String {
        format!(
            "trimmed {} -> {} vertices, {} -> {} edges (dust={}, tick={})\nwrote {}",
            self.input_vertices,
            self.output_vertices,
            self.input_edges,
            self.output_edges,
            self.dust_threshold,
            self.tick_threshold,
            self.output_path
        )
    }
}

pub fn run(args: &Args) -> Result<Report> {
    let skeleton = read_skeleton(&args.input)
        .with_context(|| format!("reading skeleton from {}", args.input.display()))?;
    skeleton
        .validate()
        .with_context(|| format!("validating skeleton from {}", args.input.display()))?;

    let file_config = match &args.config {
        Some(path) => Some(load_file_config(path)?),
        None => {
            let repo_local = Path::new("trim.toml");
            if repo_local.exists() {
                Some(load_file_config(repo_local)?)
            } else if let Some(user_path) = user_config_path().filter(|p| p.exists()) {
                Some(load_file_config(&user_path)?)
            } else {
                None
            }
        }
    };

    let config = resolve_config(
        file_config,
        CliOverrides {
            dust_threshold: args.dust_threshold,
            tick_threshold: args.tick_threshold,
        },
    )?;

    let trimmed = trim_skeleton(&skeleton, config);

    write_skeleton(&args.output, &trimmed, true)
        .with_context(|| format!("writing trimmed skeleton to {}", args.output.display()))?;

    Ok(Report {
        input_vertices: skeleton.vertices.len(),
        input_edges: skeleton.edges.len(),
        output_vertices: trimmed.vertices.len(),
        output_edges: trimmed.edges.len(),
        dust_threshold: config.dust_threshold,
        tick_threshold: config.tick_threshold,
        output_path: args.output.display().to_string(),
    })
}
