//! Input queued between frames.
//!
//! Window events only record what happened; the frame loop drains the queue
//! once per frame and applies it to the camera before encoding.

use std::collections::{HashMap, HashSet};

use sheen_math::{CameraController, CameraState, MovementIntent};
use winit::event::MouseScrollDelta;
use winit::keyboard::KeyCode;

/// Pixels of trackpad scroll that count as one wheel line.
const PIXELS_PER_LINE: f32 = 20.0;

/// Convert a wheel event to a zoom delta. Scrolling up zooms in.
pub fn scroll_delta(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -y,
        MouseScrollDelta::PixelDelta(pos) => -(pos.y as f32) / PIXELS_PER_LINE,
    }
}

/// Input accumulated since the last frame.
#[derive(Debug, Default)]
pub struct InputQueue {
    keys_pressed: HashSet<KeyCode>,
    look_delta: (f32, f32),
    scroll: f32,
    /// Finger distances of the first and latest pinch sample this frame
    pinch: Option<(f32, f32)>,

    dragging: bool,
    last_pointer: Option<(f64, f64)>,

    /// Active touch points by id
    touches: HashMap<u64, (f64, f64)>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: KeyCode) {
        self.keys_pressed.insert(key);
    }

    pub fn key_up(&mut self, key: KeyCode) {
        self.keys_pressed.remove(&key);
    }

    pub fn is_moving(&self) -> bool {
        !self.movement_intent().is_idle()
    }

    /// Start or stop a pointer drag.
    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
        if !dragging {
            self.last_pointer = None;
        }
    }

    /// Record a pointer position; deltas only accumulate while dragging.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        if !self.dragging {
            return;
        }
        if let Some((last_x, last_y)) = self.last_pointer {
            self.look_delta.0 += (x - last_x) as f32;
            self.look_delta.1 += (y - last_y) as f32;
        }
        self.last_pointer = Some((x, y));
    }

    pub fn scrolled(&mut self, delta: f32) {
        self.scroll += delta;
    }

    /// Track a touch point. One finger looks, two fingers pinch.
    pub fn touch_moved(&mut self, id: u64, x: f64, y: f64) {
        let previous = self.touches.insert(id, (x, y));

        match self.touches.len() {
            1 => {
                if let Some((px, py)) = previous {
                    self.look_delta.0 += (x - px) as f32;
                    self.look_delta.1 += (y - py) as f32;
                }
            }
            2 => {
                let distance = self.touch_distance();
                if let Some(distance) = distance {
                    self.pinch = match self.pinch {
                        Some((first, _)) => Some((first, distance)),
                        None => Some((distance, distance)),
                    };
                }
            }
            _ => {}
        }
    }

    pub fn touch_ended(&mut self, id: u64) {
        self.touches.remove(&id);
        // Lifting any finger ends the pinch
        self.pinch = None;
    }

    fn touch_distance(&self) -> Option<f32> {
        let mut points = self.touches.values();
        let (ax, ay) = points.next()?;
        let (bx, by) = points.next()?;
        Some(((ax - bx).powi(2) + (ay - by).powi(2)).sqrt() as f32)
    }

    /// Movement intent from the held keys.
    pub fn movement_intent(&self) -> MovementIntent {
        let axis = |positive: KeyCode, negative: KeyCode| {
            let mut value = 0.0;
            if self.keys_pressed.contains(&positive) {
                value += 1.0;
            }
            if self.keys_pressed.contains(&negative) {
                value -= 1.0;
            }
            value
        };

        MovementIntent::new(
            axis(KeyCode::KeyW, KeyCode::KeyS),
            axis(KeyCode::KeyD, KeyCode::KeyA),
            axis(KeyCode::Space, KeyCode::ShiftLeft),
        )
    }

    /// Apply everything queued since the last frame and clear the deltas.
    pub fn apply(&mut self, controller: &CameraController, camera: &mut CameraState, viewport: (u32, u32)) {
        controller.integrate_movement(camera, self.movement_intent());

        let (dx, dy) = std::mem::take(&mut self.look_delta);
        if dx != 0.0 || dy != 0.0 {
            controller.look(camera, dx, dy, viewport.0, viewport.1);
        }

        let scroll = std::mem::take(&mut self.scroll);
        if scroll != 0.0 {
            controller.scroll_zoom(camera, scroll);
        }

        if let Some((first, last)) = self.pinch {
            controller.pinch_zoom(camera, first, last);
            self.pinch = Some((last, last));
        }
    }
}
