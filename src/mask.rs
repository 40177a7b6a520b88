use skia_safe::{
    color_filters, gradient_shader, AlphaType, BlendMode, Color, ColorSpace, ColorType, Image,
    ImageInfo, Paint, Point, Rect, Surface, TileMode,
};

use crate::specs::MaskSpecs;

/// Allocates a premultiplied RGBA raster surface.
///
/// Returns `None` when the allocation fails under memory pressure; callers
/// skip the shimmer for the frame and retry on the next one.
pub(crate) fn alloc_surface(width: i32, height: i32) -> Option<Surface> {
    if width <= 0 || height <= 0 {
        return None;
    }
    let info = ImageInfo::new(
        (width, height),
        ColorType::RGBA8888,
        AlphaType::Premul,
        Some(ColorSpace::new_srgb()),
    );
    skia_safe::surfaces::raster(&info, None, None)
}

/// Builds the reusable gradient mask: a horizontal
/// transparent-opaque-opaque-transparent ramp across the full width, tinted
/// to the mask color so only the gradient's alpha survives.
pub(crate) fn build_gradient_mask(specs: &MaskSpecs, width: i32, height: i32) -> Option<Image> {
    let mut surface = alloc_surface(width, height)?;

    let positions = specs.gradient_positions();
    let colors = [
        Color::TRANSPARENT,
        Color::BLACK,
        Color::BLACK,
        Color::TRANSPARENT,
    ];
    let shader = gradient_shader::linear(
        (Point::new(width as f32, 0.0), Point::new(0.0, 0.0)),
        colors.as_slice(),
        Some(&positions[..]),
        TileMode::Clamp,
        None,
        None,
    )?;

    let mut paint = Paint::default();
    paint.set_anti_alias(true);
    paint.set_shader(shader);
    paint.set_color_filter(color_filters::blend(
        Color::new(specs.mask_color),
        BlendMode::SrcIn,
    ));

    let canvas = surface.canvas();
    canvas.draw_rect(Rect::from_wh(width as f32, height as f32), &paint);
    Some(surface.image_snapshot())
}
