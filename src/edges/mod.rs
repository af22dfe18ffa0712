//! Edge signal extraction: per-axis local-contrast fields.
//!
//! The grid detector needs to know where intensity changes *along* each axis,
//! not a full gradient direction, so this module computes two independent
//! central-difference magnitude fields:
//!
//! - `h_edges`: contrast between the rows above and below a pixel, shape
//!   `(H-2) × W`. Strong where a horizontal grid line crosses.
//! - `v_edges`: contrast between the columns left and right of a pixel, shape
//!   `H × (W-2)`. Strong where a vertical grid line crosses.
//!
//! Each magnitude is averaged over the three color channels. Images shorter
//! than 3 px along an axis yield an empty field for that axis.

pub mod central;

pub use central::{extract_edge_fields, EdgeFields};
