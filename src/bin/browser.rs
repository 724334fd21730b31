//! Gallery browser: scroll an infinite grid of artifacts, jump to an id
//! by typing it, save the selected one with X.

use std::error::Error;
use std::path::Path;

use tracing::{error, info, warn};

use artifactor::export::{export_bmp, ExportError};
use artifactor::gallery::{Gallery, GridCache};
use artifactor::input::{Feedback, IdEntry};
use artifactor::shell::{Key, Shell};
use artifactor::{font, render, GENERATED_SIZE};

const WINDOW_SIZE: u32 = 480;
const SCALE: u32 = 6;
// artifact plus 1px spacing per slot; the /(..+2) keeps a border margin
const SLOT: u32 = GENERATED_SIZE as u32 * SCALE + 1;
const COLS: u32 = WINDOW_SIZE / (GENERATED_SIZE as u32 * SCALE + 2);
const ROWS: u32 = COLS;

const COLOR_WHITE: [u8; 3] = [255, 255, 255];
const COLOR_RED: [u8; 3] = [245, 0, 0];
const COLOR_GREEN: [u8; 3] = [0, 245, 0];

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut shell = Shell::new(WINDOW_SIZE, WINDOW_SIZE, "Artifactor")?;
    let mut gallery = Gallery::new(COLS, ROWS);
    let mut cache = GridCache::new();
    let mut entry = IdEntry::new();

    let xoff = ((WINDOW_SIZE - SLOT * COLS) / 2) as i32;
    let yoff = xoff;

    shell.run(|ctx, pixels| {
        let now = ctx.current_frame();

        // cursor movement
        if ctx.is_key_just_pressed(Key::Right) || ctx.is_key_just_pressed(Key::D) {
            gallery.move_right();
        }
        if ctx.is_key_just_pressed(Key::Left) || ctx.is_key_just_pressed(Key::A) {
            gallery.move_left();
        }
        if ctx.is_key_just_pressed(Key::Down) || ctx.is_key_just_pressed(Key::S) {
            gallery.move_down();
        }
        if ctx.is_key_just_pressed(Key::Up) || ctx.is_key_just_pressed(Key::W) {
            gallery.move_up();
        }

        // jump-to-id entry
        for key in Key::DIGITS {
            if ctx.is_key_just_pressed(key) {
                entry.push_digit(key.digit().unwrap(), now);
            }
        }
        if ctx.is_key_just_pressed(Key::Backspace) {
            entry.backspace(now);
        }
        if ctx.is_key_just_pressed(Key::Enter) {
            if let Some(id) = entry.submit(now) {
                info!(id, "jumping");
                gallery.jump(id);
            }
        }

        if ctx.is_key_just_pressed(Key::X) {
            let id = gallery.selected_id();
            match export_bmp(cache.get(id), Path::new("."), id) {
                Ok(_) => {}
                Err(err @ ExportError::AlreadyExists(_)) => warn!(id, "{err}"),
                Err(err) => error!(id, "{err}"),
            }
        }

        if ctx.is_key_just_pressed(Key::Q) || ctx.is_key_just_pressed(Key::Escape) {
            ctx.exit();
        }

        cache.refresh(gallery.prefetch_band());

        let (width, height) = ctx.dimensions();
        render::clear(pixels, [0, 0, 0]);

        // artifact grid
        for vy in 0..gallery.rows() {
            for vx in 0..gallery.cols() {
                let Some(id) = gallery.id_at(vx, vy) else {
                    continue;
                };
                render::blit_grid(
                    pixels,
                    width,
                    height,
                    cache.get(id),
                    xoff + (vx * SLOT) as i32,
                    yoff + (vy * SLOT) as i32,
                    SCALE,
                    255,
                );
            }
        }

        // selection cursor
        let (cx, cy) = gallery.cursor_screen();
        render::outline_rect(
            pixels,
            width,
            height,
            xoff + (cx * SLOT) as i32 - 1,
            yoff + (cy * SLOT) as i32 - 1,
            SLOT + 1,
            SLOT + 1,
            COLOR_WHITE,
        );

        // selected id, top-left
        font::draw_text(
            pixels,
            width,
            height,
            1,
            1,
            1,
            COLOR_WHITE,
            &gallery.selected_id().to_string(),
        );

        // jump entry overlay, centered
        if let Some(brightness) = entry.brightness(now) {
            let color = match entry.feedback() {
                Feedback::Typing => COLOR_WHITE,
                Feedback::Accepted => COLOR_GREEN,
                Feedback::Rejected => COLOR_RED,
            };
            let color = color.map(|c| (c as f32 * brightness) as u8);
            let text_width = font::measure(entry.text(), 2);
            font::draw_text(
                pixels,
                width,
                height,
                ((width.saturating_sub(text_width)) / 2) as i32,
                ((height - font::GLYPH_HEIGHT * 2) / 2) as i32,
                2,
                color,
                entry.text(),
            );
        }
    });

    Ok(())
}
