#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use skel_core::config::TrimConfig;
use skel_core::model::{Edge, Skeleton};
use skel_trim::trim_skeleton;

#[derive(Debug, Arbitrary)]
struct Input {
    vertices: Vec<[i16; 3]>,
    edges: Vec<(u8, u8)>,
    radii: Vec<u16>,
    dust_threshold: u16,
    tick_threshold: u16,
}

fuzz_target!(|input: Input| {
    let vertex_count = input.vertices.len();
    if vertex_count == 0 || vertex_count > 256 {
        return;
    }

    let vertices: Vec<[f64; 3]> = input
        .vertices
        .iter()
        .map(|p| [f64::from(p[0]), f64::from(p[1]), f64::from(p[2])])
        .collect();

    let mut radii: Vec<f64> = input.radii.iter().map(|&r| f64::from(r)).collect();
    radii.resize(vertex_count, 1.0);

    let edges: Vec<Edge> = input
        .edges
        .iter()
        .map(|&(a, b)| (u32::from(a) % vertex_count as u32, u32::from(b) % vertex_count as u32))
        .filter(|(a, b)| a != b)
        .map(|(a, b)| Edge(a, b))
        .collect();

    let skeleton = Skeleton {
        id: 1,
        vertices,
        edges,
        radii,
        vertex_types: None,
    };

    if skeleton.validate().is_err() {
        return;
    }

    let config = TrimConfig {
        dust_threshold: f64::from(input.dust_threshold),
        tick_threshold: f64::from(input.tick_threshold),
    };

    let trimmed = trim_skeleton(&skeleton, config);
    assert!(trimmed.validate().is_ok(), "trim_skeleton produced an invalid skeleton");
    assert!(
        trimmed.vertices.len() <= skeleton.vertices.len(),
        "trim_skeleton must never add vertices"
    );
});
