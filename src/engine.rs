use std::sync::Arc;

use skia_safe::{BlendMode, Canvas, ClipOp, Color, Image, Paint, Rect, Surface};

use crate::animation::{EasingType, SweepAnimation};
use crate::errors::ShimmerError;
use crate::mask::{alloc_surface, build_gradient_mask};
use crate::specs::MaskSpecs;
use crate::ShimmerHost;

/// Animation lifecycle states.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum EngineState {
    /// Not animating; no rasters held.
    Stopped,
    /// Start requested before the host reported a layout.
    PendingLayout,
    /// Sweep driver active.
    Running,
}

/// Owns the sweep animation, the cached gradient mask and the per-frame
/// composite target for one host widget.
///
/// All operations are expected to run on the single thread that owns the
/// host's rendering loop; the engine never blocks and never spawns.
pub struct ShimmerEngine {
    host: Arc<dyn ShimmerHost>,
    specs: MaskSpecs,
    /// Blend mode cached from the specs, refreshed on reset.
    blend_mode: BlendMode,
    state: EngineState,
    sweep: Option<SweepAnimation>,
    sweep_offset: f32,
    width: i32,
    height: i32,
    gradient_mask: Option<Image>,
    composite_target: Option<Surface>,
}

impl ShimmerEngine {
    pub fn new(host: Arc<dyn ShimmerHost>) -> Self {
        let specs = MaskSpecs::default();
        let blend_mode = specs.mask_mode.to_blend_mode();
        Self {
            host,
            specs,
            blend_mode,
            state: EngineState::Stopped,
            sweep: None,
            sweep_offset: 0.0,
            width: 0,
            height: 0,
            gradient_mask: None,
            composite_target: None,
        }
    }

    pub fn with_specs(host: Arc<dyn ShimmerHost>, specs: MaskSpecs) -> Result<Self, ShimmerError> {
        specs.validate()?;
        let mut engine = Self::new(host);
        engine.blend_mode = specs.mask_mode.to_blend_mode();
        engine.specs = specs;
        Ok(engine)
    }

    pub fn mask_specs(&self) -> &MaskSpecs {
        &self.specs
    }

    /// Replaces the active specs wholesale and resets the animation, so a
    /// configuration change restarts the sweep from its beginning instead of
    /// jumping mid-cycle.
    pub fn set_mask_specs(&mut self, specs: MaskSpecs) -> Result<(), ShimmerError> {
        specs.validate()?;
        self.specs = specs;
        self.reset();
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    /// Current horizontal translation of the sweep window.
    pub fn sweep_offset(&self) -> f32 {
        self.sweep_offset
    }

    /// Starts the sweep.
    ///
    /// No-op while already started, and while the host has nothing to
    /// shimmer over. When the geometry is not yet known the start is
    /// deferred until the first [`Self::on_layout`].
    pub fn start(&mut self) {
        if self.state != EngineState::Stopped {
            return;
        }
        if !self.host.has_content() {
            return;
        }
        if !self.is_laid_out() {
            self.state = EngineState::PendingLayout;
            return;
        }
        self.begin_sweep();
    }

    /// Cancels the driver, releases both cached rasters and requests a
    /// final repaint. Idempotent.
    pub fn stop(&mut self) {
        self.sweep = None;
        self.state = EngineState::Stopped;
        self.sweep_offset = 0.0;
        self.gradient_mask = None;
        self.composite_target = None;
        self.host.request_repaint();
    }

    /// Host signal: layout completed with the given pixel size.
    pub fn on_layout(&mut self, width: i32, height: i32) {
        let changed = width != self.width || height != self.height;
        self.width = width;
        self.height = height;
        if changed {
            self.reset();
        } else if self.state == EngineState::PendingLayout {
            // Size unchanged but now confirmed; the deferred start proceeds.
            self.begin_sweep();
        }
    }

    /// Host signal: removed from the active render tree.
    pub fn on_detached(&mut self) {
        self.stop();
    }

    /// Advances the sweep clock by `dt` seconds. Each tick moves the sweep
    /// offset and asks the host to repaint.
    pub fn advance(&mut self, dt: f64) {
        if self.state != EngineState::Running {
            return;
        }
        if let Some(sweep) = &mut self.sweep {
            self.sweep_offset = sweep.advance(dt) as f32;
            self.host.request_repaint();
        }
    }

    /// Composites the shimmer layer onto `output`.
    ///
    /// Must be called once per render pass, after the host's normal content
    /// has been drawn. No-op unless running. A failed raster allocation
    /// skips the shimmer for this frame; the next frame retries.
    ///
    /// The mask is never drawn directly onto `output`: blend modes act on
    /// the destination regardless of source alpha, so the mask is stamped
    /// into a scratch raster clipped to exactly the sweep window, and only
    /// that layer (carrying its own alpha) is drawn onto the real output.
    pub fn composite(&mut self, output: &Canvas) {
        if self.state != EngineState::Running {
            return;
        }

        let Some(mask) = self.obtain_gradient_mask() else {
            return;
        };
        let host = self.host.clone();
        let offset = self.sweep_offset;
        let blend_mode = self.blend_mode;
        let Some(target) = self.obtain_composite_target() else {
            return;
        };

        let canvas = target.canvas();
        canvas.clear(Color::TRANSPARENT);
        canvas.save();
        canvas.clip_rect(
            Rect::new(
                offset,
                0.0,
                offset + mask.width() as f32,
                mask.height() as f32,
            ),
            ClipOp::Intersect,
            false,
        );
        // Re-render the host content into the clipped scratch so the sweep
        // only ever reveals the already-visible image.
        host.render_content(canvas);

        let mut paint = Paint::default();
        paint.set_anti_alias(true);
        paint.set_blend_mode(blend_mode);
        canvas.draw_image(&mask, (offset, 0.0), Some(&paint));
        canvas.restore();

        let shimmer_layer = target.image_snapshot();
        output.draw_image(&shimmer_layer, (0, 0), None);
    }

    /// Stops, refreshes the cached blend mode and, when the engine was
    /// active, starts again so the sweep restarts from its beginning.
    fn reset(&mut self) {
        let was_active = self.state != EngineState::Stopped;
        self.stop();
        self.blend_mode = self.specs.mask_mode.to_blend_mode();
        if was_active {
            self.start();
        }
    }

    /// Builds and starts the sweep driver. Callers guarantee a laid-out
    /// geometry and validated specs.
    fn begin_sweep(&mut self) {
        let width = self.width;
        let lead_in =
            width + (self.specs.start_delayed / self.specs.animation_duration) as i32;
        let total = self.specs.animation_duration + self.specs.start_delayed;
        let sweep = SweepAnimation::new(-(lead_in + width), width, total, EasingType::EaseOut);
        self.sweep_offset = sweep.start_value() as f32;
        self.sweep = Some(sweep);
        self.state = EngineState::Running;
        self.host.request_repaint();
    }

    /// Cached gradient mask, lazily rebuilt after invalidation (stop,
    /// geometry or specs change).
    fn obtain_gradient_mask(&mut self) -> Option<Image> {
        if self.gradient_mask.is_none() {
            self.gradient_mask = build_gradient_mask(&self.specs, self.width, self.height);
        }
        self.gradient_mask.clone()
    }

    fn obtain_composite_target(&mut self) -> Option<&mut Surface> {
        if self.composite_target.is_none() {
            self.composite_target = alloc_surface(self.width, self.height);
        }
        self.composite_target.as_mut()
    }

    fn is_laid_out(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}
