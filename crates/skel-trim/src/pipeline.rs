//! The public `trim_skeleton` entry point: dust removal, loop removal,
//! piece connection, and tick removal, run in that fixed order.

use crate::connect::connect_pieces;
use crate::dust::remove_dust;
use crate::loops::remove_loops;
use crate::ticks::remove_ticks;
use skel_core::config::TrimConfig;
use skel_core::model::Skeleton;
use tracing::instrument;

/// Run the full post-processing pipeline over `skeleton` using `config`'s
/// thresholds. Passes run in a fixed order — dust, loops, connect,
/// ticks — because each later pass assumes the invariants the earlier
/// ones establish (in particular, tick removal's distance-supergraph walk
/// assumes a cycle-free component, which only holds after loop removal).
#[must_use]
#[instrument(skip(skeleton), fields(id = skeleton.id, vertices = skeleton.vertices.len()))]
pub fn trim_skeleton(skeleton: &Skeleton, config: TrimConfig) -> Skeleton {
    let skeleton = remove_dust(skeleton, config.dust_threshold);
    let skeleton = remove_loops(&skeleton);
    let skeleton = connect_pieces(&skeleton);
    remove_ticks(&skeleton, config.tick_threshold)
}
