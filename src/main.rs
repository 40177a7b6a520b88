use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use shimmer_engine::{MaskMode, ShimmerConfig, ShimmerEngine, ShimmerHost};
use skia_safe::{surfaces, Canvas, Color, Color4f, EncodedImageFormat, Paint, Rect};

const WIDTH: i32 = 480;
const HEIGHT: i32 = 270;
const FPS: u32 = 30;

/// Stand-in for the image widget: a static scene drawn with plain Skia
/// calls, so the demo needs no window framework.
struct DemoHost;

impl ShimmerHost for DemoHost {
    fn has_content(&self) -> bool {
        true
    }

    fn render_content(&self, canvas: &Canvas) {
        canvas.clear(Color::new(0xFF10_2030));

        let mut paint = Paint::new(Color4f::new(0.9, 0.55, 0.2, 1.0), None);
        paint.set_anti_alias(true);
        for i in 0..5 {
            let x = 40.0 + i as f32 * 88.0;
            canvas.draw_rect(Rect::from_xywh(x, 60.0, 56.0, 150.0), &paint);
        }

        let mut band = Paint::new(Color4f::new(0.25, 0.65, 0.5, 1.0), None);
        band.set_anti_alias(true);
        canvas.draw_rect(Rect::from_xywh(0.0, 230.0, WIDTH as f32, 24.0), &band);
    }

    // The demo repaints every frame regardless.
    fn request_repaint(&self) {}
}

fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            let text =
                fs::read_to_string(&path).with_context(|| format!("reading config {path}"))?;
            serde_json::from_str::<ShimmerConfig>(&text).context("parsing shimmer config")?
        }
        None => ShimmerConfig {
            start_animation: true,
            ..ShimmerConfig::default()
        },
    };

    let host = Arc::new(DemoHost);
    let mut engine = ShimmerEngine::with_specs(host.clone(), config.to_mask_specs()?)?;

    engine.on_layout(WIDTH, HEIGHT);
    if config.start_animation {
        engine.start();
    }
    if !engine.is_running() {
        println!("Shimmer not started (start_animation = false); nothing to render.");
        return Ok(());
    }

    let out_dir = PathBuf::from("shimmer_frames");
    fs::create_dir_all(&out_dir).context("creating output directory")?;

    let mut surface =
        surfaces::raster_n32_premul((WIDTH, HEIGHT)).context("creating render surface")?;

    let total_frames = (FPS * 3) as usize;
    let dt = 1.0 / FPS as f64;
    let mut written = 0;

    for frame in 0..total_frames {
        // Halfway through, swap the blend mode to show a configuration
        // change restarting the sweep.
        if frame == total_frames / 2 {
            let mut specs = engine.mask_specs().clone();
            specs.mask_mode = MaskMode::Screen;
            engine.set_mask_specs(specs)?;
            println!("Switched mask mode to screen; sweep restarted");
        }

        engine.advance(dt);

        let canvas = surface.canvas();
        host.render_content(canvas);
        engine.composite(canvas);

        if frame % 6 == 0 {
            let image = surface.image_snapshot();
            if let Some(data) = image.encode(None, EncodedImageFormat::PNG, 100) {
                let path = out_dir.join(format!("frame_{frame:03}.png"));
                fs::write(&path, data.as_bytes())
                    .with_context(|| format!("writing {}", path.display()))?;
                written += 1;
            }
        }
    }

    engine.stop();
    println!("Rendered {written} frames to {}/", out_dir.display());
    Ok(())
}
