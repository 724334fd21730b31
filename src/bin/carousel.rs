//! Carousel: a horizontal strip of consecutive artifacts, fading out
//! with distance from the selected one.

use std::error::Error;
use std::path::Path;

use tracing::{error, warn};

use artifactor::export::{export_bmp, ExportError};
use artifactor::gallery::GridCache;
use artifactor::shell::{Key, Shell};
use artifactor::{font, render, GENERATED_SIZE};

const WINDOW_WIDTH: u32 = 480;
const WINDOW_HEIGHT: u32 = 120;
const SCALE: u32 = 6;
const SPAN: u32 = GENERATED_SIZE as u32 * SCALE;
const STRIDE: u32 = SPAN + 4;
// how far to each side the strip stays visible
const DEPTH: u32 = 4;

// brightness by distance from the selected artifact
const FADE: [u8; DEPTH as usize + 1] = [255, 140, 77, 42, 23];

const COLOR_WHITE: [u8; 3] = [255, 255, 255];

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut shell = Shell::new(WINDOW_WIDTH, WINDOW_HEIGHT, "Artifactor carousel")?;
    let mut cache = GridCache::new();
    let mut selected: u32 = 0;

    shell.run(|ctx, pixels| {
        if ctx.is_key_just_pressed(Key::Right) || ctx.is_key_just_pressed(Key::D) {
            selected = selected.saturating_add(1);
        }
        if ctx.is_key_just_pressed(Key::Left) || ctx.is_key_just_pressed(Key::A) {
            selected = selected.saturating_sub(1);
        }
        if ctx.is_key_just_pressed(Key::X) {
            match export_bmp(cache.get(selected), Path::new("."), selected) {
                Ok(_) => {}
                Err(err @ ExportError::AlreadyExists(_)) => warn!(id = selected, "{err}"),
                Err(err) => error!(id = selected, "{err}"),
            }
        }
        if ctx.is_key_just_pressed(Key::Q) || ctx.is_key_just_pressed(Key::Escape) {
            ctx.exit();
        }

        cache.refresh(
            selected.saturating_sub(DEPTH + 1)..=selected.saturating_add(DEPTH + 1),
        );

        let (width, height) = ctx.dimensions();
        render::clear(pixels, [0, 0, 0]);

        let center_x = ((width - SPAN) / 2) as i32;
        let y = ((height - SPAN) / 2) as i32;

        for offset in -(DEPTH as i32)..=DEPTH as i32 {
            let depth = offset.unsigned_abs();
            let Some(id) = selected.checked_add_signed(offset) else {
                continue;
            };
            render::blit_grid(
                pixels,
                width,
                height,
                cache.get(id),
                center_x + offset * STRIDE as i32,
                y,
                SCALE,
                FADE[depth as usize],
            );
        }

        render::outline_rect(
            pixels,
            width,
            height,
            center_x - 1,
            y - 1,
            SPAN + 2,
            SPAN + 2,
            COLOR_WHITE,
        );

        font::draw_text(
            pixels,
            width,
            height,
            1,
            1,
            1,
            COLOR_WHITE,
            &selected.to_string(),
        );
    });

    Ok(())
}
