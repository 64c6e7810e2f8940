use crate::output::Renderable;
use anyhow::{Context, Result};
use serde::Serialize;
use skel_core::io::read_skeleton;
use skel_trim::diagnostics::{critical_points, find_cycles};
use std::path::PathBuf;

pub struct Args {
    pub input: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub terminal_count: usize,
    pub branch_count: usize,
    pub cycle_count: usize,
    pub terminals: Vec<u32>,
    pub branches: Vec<u32>,
}

impl Renderable for Report {
    fn render_text(&self) -> String {
        format!(
            "{} terminal(s), {} branch point(s), {} cycle(s) found\nterminals: {:?}\nbranches: {:?}",
            self.terminal_count, self.branch_count, self.cycle_count, self.terminals, self.branches
        )
    }
}

pub fn run(args: &Args) -> Result<Report> {
    let skeleton = read_skeleton(&args.input)
        .with_context(|| format!("reading skeleton from {}", args.input.display()))?;

    let cp = critical_points(&skeleton);
    let cycles = find_cycles(&skeleton);

    Ok(Report {
        terminal_count: cp.terminals.len(),
        branch_count: cp.branches.len(),
        cycle_count: cycles.len(),
        terminals: cp.terminals,
        branches: cp.branches,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use skel_core::io::write_skeleton;
    use skel_core::model::{Edge, Skeleton};

    #[test]
    fn reports_a_triangle_as_one_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.json");

        let skeleton = Skeleton {
            id: 1,
            vertices: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            edges: vec![Edge(0, 1), Edge(1, 2), Edge(2, 0)],
            radii: vec![1.0, 1.0, 1.0],
            vertex_types: None,
        };
        write_skeleton(&path, &skeleton, true).unwrap();

        let report = run(&Args { input: path }).unwrap();
        assert_eq!(report.cycle_count, 1);
        assert_eq!(report.branch_count, 0);
    }
}
