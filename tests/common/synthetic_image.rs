use control_maps::ColorImage;

/// Black canvas with a filled `side`×`side` square whose top-left corner is
/// at (`origin`, `origin`).
pub fn square_on_black(size: usize, origin: usize, side: usize, color: [u8; 3]) -> ColorImage {
    assert!(origin + side <= size, "square must fit inside the canvas");
    let span = origin..origin + side;
    ColorImage::from_fn(size, size, |x, y| {
        if span.contains(&x) && span.contains(&y) {
            color
        } else {
            [0, 0, 0]
        }
    })
}

/// Generates a simple high-contrast RGB checkerboard image.
pub fn checkerboard_rgb(width: usize, height: usize, cell: usize) -> ColorImage {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    ColorImage::from_fn(width, height, |x, y| {
        let sum = x / cell + y / cell;
        let val = if sum & 1 == 0 { 32u8 } else { 220u8 };
        [val, val, val]
    })
}

/// Left half `left`, right half `right`.
pub fn vertical_split(width: usize, height: usize, left: [u8; 3], right: [u8; 3]) -> ColorImage {
    ColorImage::from_fn(width, height, |x, _| if x < width / 2 { left } else { right })
}

pub fn uniform(width: usize, height: usize, color: [u8; 3]) -> ColorImage {
    ColorImage::from_fn(width, height, |_, _| color)
}
