//! # Shimmer Engine
//!
//! `shimmer-engine` renders an animated light-sweep ("shimmer") mask over the
//! static content of a host widget.
//!
//! It provides the [`MaskSpecs`] configuration object and the
//! [`ShimmerEngine`], which owns the cached gradient-mask raster, the sweep
//! driver and the per-frame compositing step. The host owns the event loop
//! and drives the engine through explicit hooks (`on_layout`, `on_detached`,
//! `advance`), then calls [`ShimmerEngine::composite`] at the end of each
//! render pass, after its own content has been drawn.

pub mod animation;
pub mod engine;
pub mod errors;
pub mod mask;
pub mod specs;

pub use engine::ShimmerEngine;
pub use errors::ShimmerError;
pub use specs::{MaskMode, MaskSpecs, ShimmerConfig};

use skia_safe::Canvas;

/// The rendering host the engine shimmers over.
///
/// The engine never registers itself with the host; the host invokes the
/// engine's hooks and the engine calls back through this trait for content
/// and repaint scheduling.
pub trait ShimmerHost: Send + Sync {
    /// Whether the host currently has displayable content.
    /// `false` makes [`ShimmerEngine::start`] a no-op.
    fn has_content(&self) -> bool;

    /// Renders the host's normal content. Must be repeatable and
    /// deterministic against an arbitrary target canvas.
    fn render_content(&self, canvas: &Canvas);

    /// Asks the host to schedule a redraw.
    fn request_repaint(&self);
}
