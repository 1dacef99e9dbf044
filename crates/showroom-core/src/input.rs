use smallvec::SmallVec;

/// Normalized input signals pushed by the host.
///
/// `Drag` deltas are fractions of the viewport height, `Wheel` is in pixels
/// (positive zooms out).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Scroll(f32),
    Drag { dx: f32, dy: f32 },
    Wheel(f32),
    Reset,
}

/// Events collected between two ticks.
///
/// Back-to-back scrolls keep only the latest value; back-to-back drags and
/// wheels are summed. Events carrying non-finite values are dropped on push.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: SmallVec<[InputEvent; 8]>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        let finite = match event {
            InputEvent::Scroll(v) | InputEvent::Wheel(v) => v.is_finite(),
            InputEvent::Drag { dx, dy } => dx.is_finite() && dy.is_finite(),
            InputEvent::Reset => true,
        };
        if !finite {
            log::debug!("[input] dropping non-finite {event:?}");
            return;
        }
        match (self.events.last_mut(), event) {
            (Some(InputEvent::Scroll(prev)), InputEvent::Scroll(v)) => *prev = v,
            (Some(InputEvent::Wheel(prev)), InputEvent::Wheel(v)) => *prev += v,
            (Some(InputEvent::Drag { dx: px, dy: py }), InputEvent::Drag { dx, dy }) => {
                *px += dx;
                *py += dy;
            }
            _ => self.events.push(event),
        }
    }

    /// Drop queued drags, wheels and resets, keeping scroll updates.
    pub fn discard_orientation(&mut self) {
        let dropped = self.events.len();
        self.events.retain(|e| matches!(e, InputEvent::Scroll(_)));
        let dropped = dropped - self.events.len();
        if dropped > 0 {
            log::debug!("[input] discarded {dropped} orientation events");
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }
}
