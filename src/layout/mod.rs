//! Two-axis flow layout over the control tree.
//!
//! Rows are chains of `left`/`right` links, columns are chains of row heads
//! linked by `top`/`bottom`. Each axis stretches at most one element to absorb
//! the container's slack and records which edges must follow later resizes in
//! the nodes' [`Autoresize`](crate::Autoresize) flags.

pub(crate) mod column;
pub(crate) mod line;
pub(crate) mod resize;
