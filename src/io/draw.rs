//! Drawing primitives applied to the VRAM plane by the drawing-consumer task.

pub const VRAM_WIDTH: usize = 64;
pub const VRAM_HEIGHT: usize = 36;

/// A queued drawing command, captured from DRAW_METHOD and DRAW_ARG1..4 at
/// the instant the method register was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawInstruction {
    pub method: u8,
    pub a1: u8,
    pub a2: u8,
    pub a3: u8,
    pub a4: u8,
}

/// Apply a queued instruction to the VRAM plane, using the given body/outline colors.
///
/// `brush_body`/`brush_outline` are set by the brush-set-body/outline method
/// codes rather than drawn; the caller persists them across calls.
pub fn apply(
    instr: DrawInstruction,
    vram: &mut [u8],
    brush_body: &mut u8,
    brush_outline: &mut u8,
) {
    use crate::config::draw;
    match instr.method {
        draw::RECTANGLE => {
            draw_rectangle(vram, instr.a1, instr.a2, instr.a3, instr.a4, *brush_body, *brush_outline)
        }
        draw::SQUARE => {
            draw_rectangle(vram, instr.a1, instr.a2, instr.a3, instr.a3, *brush_body, *brush_outline)
        }
        draw::DOT => put_pixel(vram, instr.a1, instr.a2, *brush_body),
        draw::LINE => draw_line(vram, instr.a1, instr.a2, instr.a3, instr.a4, *brush_body),
        draw::BRUSH_BODY => *brush_body = instr.a1,
        draw::BRUSH_OUTLINE => *brush_outline = instr.a1,
        _ => {
            log::warn!("unrecognized draw method {:#04X}; ignored", instr.method);
        }
    }
}

fn put_pixel(vram: &mut [u8], x: u8, y: u8, color: u8) {
    let (x, y) = (x as usize, y as usize);
    if x < VRAM_WIDTH && y < VRAM_HEIGHT {
        vram[y * VRAM_WIDTH + x] = color;
    }
}

fn draw_rectangle(vram: &mut [u8], x: u8, y: u8, w: u8, h: u8, body: u8, outline: u8) {
    let (x, y, w, h) = (x as i32, y as i32, w as i32, h as i32);
    for row in 0..h {
        for col in 0..w {
            let on_perimeter = row == 0 || row == h - 1 || col == 0 || col == w - 1;
            let color = if on_perimeter { outline } else { body };
            put_pixel_i32(vram, x + col, y + row, color);
        }
    }
}

fn put_pixel_i32(vram: &mut [u8], x: i32, y: i32, color: u8) {
    if x >= 0 && y >= 0 {
        put_pixel(vram, x as u8, y as u8, color);
    }
}

/// Bresenham's line algorithm between two points, inclusive of both endpoints.
fn draw_line(vram: &mut [u8], x1: u8, y1: u8, x2: u8, y2: u8, color: u8) {
    let (mut x0, mut y0) = (x1 as i32, y1 as i32);
    let (x1, y1) = (x2 as i32, y2 as i32);

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        put_pixel_i32(vram, x0, y0, color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_vram() -> Vec<u8> {
        vec![0u8; VRAM_WIDTH * VRAM_HEIGHT]
    }

    #[test]
    fn dot_sets_single_pixel() {
        let mut vram = blank_vram();
        apply(
            DrawInstruction { method: crate::config::draw::DOT, a1: 3, a2: 4, a3: 0, a4: 0 },
            &mut vram,
            &mut 0xFF,
            &mut 0x00,
        );
        assert_eq!(vram[4 * VRAM_WIDTH + 3], 0xFF);
    }

    #[test]
    fn rectangle_outlines_and_fills() {
        let mut vram = blank_vram();
        draw_rectangle(&mut vram, 0, 0, 4, 3, 0x11, 0x22);
        // corners and edges are outline
        assert_eq!(vram[0], 0x22);
        assert_eq!(vram[VRAM_WIDTH], 0x22); // (0, 1) left edge
        // interior pixel is body
        assert_eq!(vram[1 * VRAM_WIDTH + 1], 0x11);
    }

    #[test]
    fn line_covers_diagonal_endpoints() {
        let mut vram = blank_vram();
        draw_line(&mut vram, 0, 0, 3, 3, 0x7F);
        for i in 0..=3usize {
            assert_eq!(vram[i * VRAM_WIDTH + i], 0x7F);
        }
    }
}
