/// Touch point in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
}

/// Touch events the widget understands, already stripped of toolkit types.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchInput {
    Pressed { finger: u64, position: TouchPoint },
    Moved { finger: u64, position: TouchPoint },
    Lifted { finger: u64 },
    Lost { finger: u64 },
}

/// Detects a swipe: a drag whose horizontal or vertical displacement exceeds
/// the threshold.
///
/// Only the finger that started the gesture is tracked, and the gesture is
/// cleared as soon as it fires so the same drag cannot fire twice.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: f32,
    origin:    Option<(u64, TouchPoint)>,
}

impl SwipeTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            origin: None,
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.origin.is_some()
    }

    /// Feeds one touch event; returns `true` when a swipe completes.
    pub fn handle(&mut self, input: TouchInput) -> bool {
        match input {
            TouchInput::Pressed { finger, position } => {
                if self.origin.is_none() {
                    self.origin = Some((finger, position));
                }
                false
            }
            TouchInput::Moved { finger, position } => {
                let Some((tracked, start)) = self.origin else {
                    return false;
                };

                if tracked != finger {
                    return false;
                }

                let diff_x = start.x - position.x;
                let diff_y = start.y - position.y;

                if diff_x.abs() > self.threshold || diff_y.abs() > self.threshold {
                    self.origin = None;
                    true
                } else {
                    false
                }
            }
            TouchInput::Lifted { finger } | TouchInput::Lost { finger } => {
                if matches!(self.origin, Some((tracked, _)) if tracked == finger) {
                    self.origin = None;
                }
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f32, y: f32) -> TouchPoint {
        TouchPoint { x, y }
    }

    fn drag(tracker: &mut SwipeTracker, points: &[TouchPoint]) -> usize {
        let mut fired = 0;
        let mut iter = points.iter();

        if let Some(first) = iter.next() {
            tracker.handle(TouchInput::Pressed {
                finger:   1,
                position: *first,
            });
        }

        for point in iter {
            if tracker.handle(TouchInput::Moved {
                finger:   1,
                position: *point,
            }) {
                fired += 1;
            }
        }

        tracker.handle(TouchInput::Lifted { finger: 1 });
        fired
    }

    #[test]
    fn sixty_pixel_swipe_fires_once() {
        let mut tracker = SwipeTracker::new(50.0);
        let fired = drag(
            &mut tracker,
            &[at(100.0, 100.0), at(130.0, 100.0), at(160.0, 100.0), at(200.0, 100.0)],
        );
        assert_eq!(fired, 1);
    }

    #[test]
    fn thirty_pixel_swipe_is_ignored() {
        let mut tracker = SwipeTracker::new(50.0);
        let fired = drag(&mut tracker, &[at(100.0, 100.0), at(115.0, 100.0), at(130.0, 100.0)]);
        assert_eq!(fired, 0);
    }

    #[test]
    fn vertical_swipes_count_too() {
        let mut tracker = SwipeTracker::new(50.0);
        let fired = drag(&mut tracker, &[at(10.0, 200.0), at(10.0, 140.0)]);
        assert_eq!(fired, 1);
    }

    #[test]
    fn exact_threshold_does_not_fire() {
        let mut tracker = SwipeTracker::new(50.0);
        let fired = drag(&mut tracker, &[at(0.0, 0.0), at(50.0, 0.0)]);
        assert_eq!(fired, 0);
    }

    #[test]
    fn origin_at_zero_is_tracked() {
        let mut tracker = SwipeTracker::new(50.0);
        let fired = drag(&mut tracker, &[at(0.0, 0.0), at(0.0, 60.0)]);
        assert_eq!(fired, 1);
    }

    #[test]
    fn other_fingers_are_ignored() {
        let mut tracker = SwipeTracker::new(50.0);
        tracker.handle(TouchInput::Pressed {
            finger:   1,
            position: at(0.0, 0.0),
        });

        assert!(!tracker.handle(TouchInput::Moved {
            finger:   2,
            position: at(100.0, 0.0),
        }));
        assert!(tracker.is_tracking());

        tracker.handle(TouchInput::Lost { finger: 1 });
        assert!(!tracker.is_tracking());
    }
}
