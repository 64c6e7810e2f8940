use crate::output::Renderable;
use anyhow::{Context, Result};
use serde::Serialize;
use skel_core::io::read_skeleton;
use skel_trim::diagnostics::analyze;
use std::path::PathBuf;

pub struct Args {
    pub input: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub component_count: usize,
    pub cable_length_nm: f64,
    pub terminal_count: usize,
    pub branch_count: usize,
    pub max_degree: u32,
    pub cycle_count: usize,
}

impl Renderable for Report {
    fn render_text(&self) -> String {
        format!(
            "vertices: {}\nedges: {}\ncomponents: {}\ncable length: {:.1}nm\nterminals: {}\nbranches: {}\nmax degree: {}\ncycles: {}",
            self.vertex_count,
            self.edge_count,
            self.component_count,
            self.cable_length_nm,
            self.terminal_count,
            self.branch_count,
            self.max_degree,
            self.cycle_count
        )
    }
}

pub fn run(args: &Args) -> Result<Report> {
    let skeleton = read_skeleton(&args.input)
        .with_context(|| format!("reading skeleton from {}", args.input.display()))?;
    let stats = analyze(&skeleton);

    Ok(Report {
        vertex_count: stats.vertex_count,
        edge_count: stats.edge_count,
        component_count: stats.component_count,
        cable_length_nm: stats.cable_length,
        terminal_count: stats.terminal_count,
        branch_count: stats.branch_count,
        max_degree: stats.max_degree,
        cycle_count: stats.cycle_count,
    })
}
