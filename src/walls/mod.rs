//! Wall vectorization: turn a colored trace overlay into clean polylines.
//!
//! Pipeline
//! - Segment trace-colored pixels in HSV, then close and open the mask.
//! - Dilate slightly and thin to a one-pixel skeleton.
//! - Walk the 8-connected skeleton graph into raw pixel polylines.
//! - Simplify with Ramer–Douglas–Peucker.
//! - Bridge gaps: endpoint merging to a fixed point, then one pass of
//!   T-junction snapping.
//! - Prune short stubs, drop near-collinear vertices and remove parallel
//!   duplicates.
//!
//! Each stage is also exported as a free function so callers can run or
//! inspect them individually.

pub mod cleanup;
pub mod connect;
pub mod export;
pub mod morph;
pub mod params;
pub mod polyline;
pub mod render;
pub mod segment;
pub mod simplify;
pub mod skeleton;
pub mod trace;
mod vectorizer;

pub use cleanup::{prune_short, remove_parallel_duplicates};
pub use connect::connect_polylines;
pub use export::WallExport;
pub use morph::{close, dilate, open};
pub use params::{HueBand, TraceColor, WallParams};
pub use polyline::{arc_length, Polyline};
pub use render::save_debug_artifacts;
pub use segment::segment_trace;
pub use simplify::{remove_collinear, simplify_rdp};
pub use skeleton::{thin, Skeleton};
pub use trace::trace_polylines;
pub use vectorizer::{StageCounts, WallReport, WallVectorizer};
