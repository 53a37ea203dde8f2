//! HTML renderer: the per-render execution state
//!
//! A `Rendering` owns the output buffer and the visible context frame. Tag
//! and attribute emission live in `html`, lifecycle, scoping and symbol
//! invocation in `rendering`.

mod html;
mod rendering;

pub use rendering::Rendering;
