//! Hysteresis tracking: weak candidates survive only when 8-connected to a
//! strong edge.
use crate::edges::nms::EdgeClass;
use crate::image::GrayImageU8;

/// Mask value written for edge pixels.
pub const EDGE: u8 = 255;

pub fn track_edges(classes: &[EdgeClass], w: usize, h: usize) -> GrayImageU8 {
    let mut mask = GrayImageU8::new(w, h);
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for (i, class) in classes.iter().enumerate() {
        if *class == EdgeClass::Strong {
            let (x, y) = (i % w, i / w);
            mask.set(x, y, EDGE);
            stack.push((x, y));
        }
    }

    while let Some((x, y)) = stack.pop() {
        for ny in y.saturating_sub(1)..=(y + 1).min(h - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(w - 1) {
                if classes[ny * w + nx] == EdgeClass::Weak && mask.get(nx, ny) == 0 {
                    mask.set(nx, ny, EDGE);
                    stack.push((nx, ny));
                }
            }
        }
    }

    mask
}
