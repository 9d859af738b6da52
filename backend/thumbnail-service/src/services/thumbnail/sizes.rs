//! Fixed thumbnail size classes and output encoding

/// JPEG quality (0-100) for every thumbnail
pub const JPEG_QUALITY: u8 = 85;

/// Content type written with every thumbnail
pub const JPEG_CONTENT_TYPE: &str = "image/jpeg";

/// A named bounding box a thumbnail must fit inside
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeClass {
    pub label: &'static str,
    pub max_width: u32,
    pub max_height: u32,
}

/// Size classes in the order they are generated
pub const SIZE_CLASSES: [SizeClass; 3] = [
    SizeClass {
        label: "small",
        max_width: 150,
        max_height: 150,
    },
    SizeClass {
        label: "medium",
        max_width: 300,
        max_height: 300,
    },
    SizeClass {
        label: "large",
        max_width: 600,
        max_height: 600,
    },
];

impl SizeClass {
    /// Shrink-to-fit dimensions for an image of `width` x `height`
    ///
    /// Images already inside the box keep their size. Otherwise the constrained
    /// side becomes the bound and the other side is whichever of floor/ceil of
    /// the proportional length keeps the aspect ratio closest, never below 1.
    pub fn fit_within(&self, width: u32, height: u32) -> (u32, u32) {
        if width <= self.max_width && height <= self.max_height {
            return (width, height);
        }

        let box_w = self.max_width as f64;
        let box_h = self.max_height as f64;
        let aspect = width as f64 / height as f64;

        if box_w / box_h >= aspect {
            let new_w = round_aspect(box_h * aspect, |n| (aspect - n / box_h).abs());
            (new_w, self.max_height)
        } else {
            let new_h = round_aspect(box_w / aspect, |n| {
                if n == 0.0 {
                    0.0
                } else {
                    (aspect - box_w / n).abs()
                }
            });
            (self.max_width, new_h)
        }
    }
}

/// Pick floor or ceil of `value`, whichever has the smaller aspect error.
/// Ties go to floor.
fn round_aspect<F>(value: f64, error: F) -> u32
where
    F: Fn(f64) -> f64,
{
    let floor = value.floor();
    let ceil = value.ceil();
    let best = if error(ceil) < error(floor) { ceil } else { floor };
    best.max(1.0) as u32
}
