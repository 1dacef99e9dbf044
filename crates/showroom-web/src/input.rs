// Pure input normalization shared by the DOM handlers.

pub const WHEEL_LINE_PX: f32 = 16.0; // WheelEvent.DOM_DELTA_LINE
pub const WHEEL_PAGE_PX: f32 = 800.0; // WheelEvent.DOM_DELTA_PAGE, roughly one viewport
pub const PINCH_TO_WHEEL: f32 = 2.0; // wheel px per CSS px of finger spread

/// Fraction of the page scrolled, 0 at the top and 1 at the bottom.
#[inline]
pub fn scroll_fraction(scroll_top: f64, scroll_height: f64, viewport_height: f64) -> f32 {
    let range = scroll_height - viewport_height;
    if !(range.is_finite() && range > 0.0 && scroll_top.is_finite()) {
        return 0.0;
    }
    (scroll_top / range).clamp(0.0, 1.0) as f32
}

/// Wheel delta in pixels for a `WheelEvent.deltaMode`.
#[inline]
pub fn wheel_delta_px(delta_y: f64, delta_mode: u32) -> f32 {
    let scale = match delta_mode {
        1 => WHEEL_LINE_PX,
        2 => WHEEL_PAGE_PX,
        _ => 1.0,
    };
    delta_y as f32 * scale
}

/// Pointer movement as fractions of the drawing height.
#[inline]
pub fn drag_fraction(dx_px: f32, dy_px: f32, height_px: f32) -> Option<(f32, f32)> {
    (height_px > 0.0 && dx_px.is_finite() && dy_px.is_finite())
        .then(|| (dx_px / height_px, dy_px / height_px))
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct TrackedPointer {
    id: i32,
    x: f32,
    y: f32,
}

/// Tracks up to two active pointers and turns their motion into drag or pinch.
#[derive(Default, Debug)]
pub struct PointerTracker {
    active: Vec<TrackedPointer>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gesture {
    /// Pixel movement of a single pointer.
    Drag { dx: f32, dy: f32 },
    /// Wheel-equivalent pixels; positive when the fingers move together.
    Pinch { wheel: f32 },
}

impl PointerTracker {
    pub fn down(&mut self, id: i32, x: f32, y: f32) {
        self.active.retain(|p| p.id != id);
        if self.active.len() < 2 {
            self.active.push(TrackedPointer { id, x, y });
        }
    }

    pub fn up(&mut self, id: i32) {
        self.active.retain(|p| p.id != id);
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    pub fn active(&self) -> usize {
        self.active.len()
    }

    fn spread(&self) -> Option<f32> {
        match self.active.as_slice() {
            [a, b] => Some(((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()),
            _ => None,
        }
    }

    pub fn moved(&mut self, id: i32, x: f32, y: f32) -> Option<Gesture> {
        let before = self.spread();
        let p = self.active.iter_mut().find(|p| p.id == id)?;
        let (dx, dy) = (x - p.x, y - p.y);
        p.x = x;
        p.y = y;
        match (before, self.spread()) {
            (Some(a), Some(b)) => Some(Gesture::Pinch {
                wheel: (a - b) * PINCH_TO_WHEEL,
            }),
            _ => Some(Gesture::Drag { dx, dy }),
        }
    }
}
