//! Built-in block face, used whenever no outline font is available.

use image::{Rgba, RgbaImage};

/// Glyph rows are 5 cells wide and 7 cells tall; `#` marks a lit cell.
const GLYPH_ROWS: usize = 7;
const GLYPH_COLS: usize = 5;

/// Fraction of the requested pixel size covered by the glyph height, roughly
/// the cap height of a display face.
const CAP_HEIGHT_RATIO: f32 = 0.72;

const DIGITS: [[&str; GLYPH_ROWS]; 10] = [
    // 0
    [
        ".###.",
        "#...#",
        "#..##",
        "#.#.#",
        "##..#",
        "#...#",
        ".###.",
    ],
    // 1
    [
        "..#..",
        ".##..",
        "..#..",
        "..#..",
        "..#..",
        "..#..",
        ".###.",
    ],
    // 2
    [
        ".###.",
        "#...#",
        "....#",
        "...#.",
        "..#..",
        ".#...",
        "#####",
    ],
    // 3
    [
        "#####",
        "...#.",
        "..#..",
        "...#.",
        "....#",
        "#...#",
        ".###.",
    ],
    // 4
    [
        "...#.",
        "..##.",
        ".#.#.",
        "#..#.",
        "#####",
        "...#.",
        "...#.",
    ],
    // 5
    [
        "#####",
        "#....",
        "####.",
        "....#",
        "....#",
        "#...#",
        ".###.",
    ],
    // 6
    [
        "..##.",
        ".#...",
        "#....",
        "####.",
        "#...#",
        "#...#",
        ".###.",
    ],
    // 7
    [
        "#####",
        "....#",
        "...#.",
        "..#..",
        ".#...",
        ".#...",
        ".#...",
    ],
    // 8
    [
        ".###.",
        "#...#",
        "#...#",
        ".###.",
        "#...#",
        "#...#",
        ".###.",
    ],
    // 9
    [
        ".###.",
        "#...#",
        "#...#",
        ".####",
        "....#",
        "...#.",
        ".##..",
    ],
];

const COLON: [&str; GLYPH_ROWS] = [
    ".....",
    "..#..",
    "..#..",
    ".....",
    "..#..",
    "..#..",
    ".....",
];

/// Blocky 5x7 face covering the digits and the colon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockFace;

impl BlockFace {
    pub fn new() -> Self {
        Self
    }

    /// Paint `ch` in white, centered on `center`, into `canvas`.
    ///
    /// Characters without a glyph paint nothing.
    pub fn paint(&self, ch: char, px_size: f32, center: (f32, f32), canvas: &mut RgbaImage) {
        let Some(rows) = glyph(ch) else {
            return;
        };

        let height = px_size * CAP_HEIGHT_RATIO;
        let cell = height / GLYPH_ROWS as f32;
        let left = center.0 - cell * GLYPH_COLS as f32 / 2.0;
        let top = center.1 - height / 2.0;

        for (row, pattern) in rows.iter().enumerate() {
            for (col, mark) in pattern.bytes().enumerate() {
                if mark != b'#' {
                    continue;
                }
                let x0 = left + col as f32 * cell;
                let y0 = top + row as f32 * cell;
                fill_rect(canvas, x0, y0, x0 + cell, y0 + cell);
            }
        }
    }
}

fn glyph(ch: char) -> Option<&'static [&'static str; GLYPH_ROWS]> {
    match ch {
        '0'..='9' => ch.to_digit(10).map(|d| &DIGITS[d as usize]),
        ':' => Some(&COLON),
        _ => None,
    }
}

/// Fill the pixel span covering `[x0, x1) x [y0, y1)` with opaque white,
/// clipped to the canvas.
fn fill_rect(canvas: &mut RgbaImage, x0: f32, y0: f32, x1: f32, y1: f32) {
    let (w, h) = canvas.dimensions();
    let clip = |v: f32, max: u32| v.clamp(0.0, max as f32) as u32;

    let (x0, x1) = (clip(x0.floor(), w), clip(x1.ceil(), w));
    let (y0, y1) = (clip(y0.floor(), h), clip(y1.ceil(), h));

    for y in y0..y1 {
        for x in x0..x1 {
            canvas.put_pixel(x, y, Rgba([255, 255, 255, 255]));
        }
    }
}
