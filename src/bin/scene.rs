//! Tile-map scene: a drifting backdrop of artifact sprites with one
//! focal artifact enlarged at the center. Down picks the next focal
//! artifact, Up saves it.

use std::error::Error;
use std::path::Path;

use tracing::{error, warn};

use artifactor::export::{export_bmp, ExportError};
use artifactor::generator::{generate, Grid};
use artifactor::shell::{Key, Shell};
use artifactor::{render, GENERATED_SIZE};

const WINDOW_SIZE: u32 = 160;
const TILE: u32 = GENERATED_SIZE as u32;
const FOCAL_SCALE: u32 = 6;
const BACKDROP_BRIGHTNESS: u8 = 90;

// fixed ids for the backdrop tile sprites
const BACKDROP_IDS: [u32; 4] = [3, 12, 27, 58];

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut shell = Shell::new(WINDOW_SIZE, WINDOW_SIZE, "Artifactor scene")?;

    let backdrops: Vec<Grid> = BACKDROP_IDS.iter().map(|&id| generate(id)).collect();
    let mut focal_id: u32 = 0;
    let mut focal = generate(focal_id);

    shell.run(|ctx, pixels| {
        if ctx.is_key_just_pressed(Key::Down) {
            focal_id = focal_id.wrapping_add(1);
            focal = generate(focal_id);
        }
        if ctx.is_key_just_pressed(Key::Up) {
            match export_bmp(&focal, Path::new("."), focal_id) {
                Ok(_) => {}
                Err(err @ ExportError::AlreadyExists(_)) => warn!(id = focal_id, "{err}"),
                Err(err) => error!(id = focal_id, "{err}"),
            }
        }
        if ctx.is_key_just_pressed(Key::Q) || ctx.is_key_just_pressed(Key::Escape) {
            ctx.exit();
        }

        let (width, height) = ctx.dimensions();
        render::clear(pixels, [0, 0, 0]);

        // backdrop drifts one pixel per frame
        let scroll = ctx.current_frame();
        let shift = (scroll % u64::from(TILE)) as i32;
        let first_tile = scroll / u64::from(TILE);
        let tiles_across = WINDOW_SIZE / TILE + 1;
        for ty in 0..WINDOW_SIZE / TILE {
            for tx in 0..tiles_across {
                let world_x = first_tile + u64::from(tx);
                let sprite = ((world_x * 7 + u64::from(ty) * 13) % 4) as usize;
                render::blit_grid(
                    pixels,
                    width,
                    height,
                    &backdrops[sprite],
                    (tx * TILE) as i32 - shift,
                    (ty * TILE) as i32,
                    1,
                    BACKDROP_BRIGHTNESS,
                );
            }
        }

        // focal artifact
        let span = GENERATED_SIZE as u32 * FOCAL_SCALE;
        render::blit_grid(
            pixels,
            width,
            height,
            &focal,
            ((width - span) / 2) as i32,
            ((height - span) / 2) as i32,
            FOCAL_SCALE,
            255,
        );
    });

    Ok(())
}
