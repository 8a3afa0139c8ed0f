use crate::{camera::Camera, player::Player, raycaster::column_heights, world::World};

#[inline]
pub const fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    // 0RGB, the layout softbuffer expects
    (b as u32) | ((g as u32) << 8) | ((r as u32) << 16)
}

pub const BACKGROUND: u32 = pack_rgb(0, 0, 0);
pub const FOREGROUND: u32 = pack_rgb(255, 255, 255);

/// Draws one full frame: top-down map, one wall slice per column, then the
/// player square on the map. Output depends only on the arguments.
pub fn render_frame(
    buf: &mut [u32],
    width: usize,
    height: usize,
    world: &World,
    player: &Player,
    camera: &Camera,
    tile_size: i32,
) {
    buf[..width * height].fill(BACKGROUND);

    draw_map(buf, width, height, world, tile_size);

    let heights = column_heights(world, camera, player, tile_size, width, height);
    let mid = height as i32 / 2;
    for (x, &h) in heights.iter().enumerate() {
        fill_rect(buf, width, height, x as i32, mid - h / 2, 1, h, FOREGROUND);
    }

    fill_rect(
        buf, width, height, player.x, player.y, tile_size, tile_size, FOREGROUND,
    );
}

fn draw_map(buf: &mut [u32], width: usize, height: usize, world: &World, tile_size: i32) {
    for (row, column) in world.walls() {
        let x = column as i32 * tile_size;
        let y = row as i32 * tile_size;
        fill_rect(buf, width, height, x, y, tile_size, tile_size, FOREGROUND);
    }
}

/// Fills a rectangle, clipped to the buffer.
#[allow(clippy::too_many_arguments)]
pub fn fill_rect(
    buf: &mut [u32],
    width: usize,
    height: usize,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    color: u32,
) {
    if w <= 0 || h <= 0 {
        return;
    }
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = x.saturating_add(w).min(width as i32);
    let y1 = y.saturating_add(h).min(height as i32);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    for yi in y0..y1 {
        let row = yi as usize * width;
        buf[row + x0 as usize..row + x1 as usize].fill(color);
    }
}
