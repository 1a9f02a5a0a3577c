use std::time::Duration;

use super::geometry::HandAngles;

const TIME_CONSTANT: Duration = Duration::from_millis(90);
const SETTLE_DEGREES: f32 = 0.05;

/// Hand angles as drawn, easing toward the angles of the current time.
///
/// With motion allowed every hand approaches its target along the shortest
/// arc; with reduced motion the hands snap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandSweep {
    shown: Option<HandAngles>,
}

impl HandSweep {
    pub fn shown(&self) -> Option<HandAngles> {
        self.shown
    }

    pub fn snap(&mut self, target: HandAngles) -> HandAngles {
        self.shown = Some(target);
        target
    }

    pub fn advance(&mut self, target: HandAngles, elapsed: Duration, animate: bool) -> HandAngles {
        let next = match self.shown {
            Some(current) if animate => {
                let factor = 1.0 - (-elapsed.as_secs_f32() / TIME_CONSTANT.as_secs_f32()).exp();

                HandAngles {
                    hour:   approach(current.hour, target.hour, factor),
                    minute: approach(current.minute, target.minute, factor),
                    second: approach(current.second, target.second, factor),
                }
            }
            _ => target,
        };

        self.shown = Some(next);
        next
    }
}

/// Signed difference `to - from` folded into `[-180, 180)`.
fn shortest_arc(from: f32, to: f32) -> f32 {
    (to - from + 180.0).rem_euclid(360.0) - 180.0
}

fn approach(current: f32, target: f32, factor: f32) -> f32 {
    let remaining = shortest_arc(current, target) * (1.0 - factor);

    if remaining.abs() < SETTLE_DEGREES {
        target
    } else {
        target - remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn angles(hour: f32, minute: f32, second: f32) -> HandAngles {
        HandAngles {
            hour,
            minute,
            second,
        }
    }

    #[test]
    fn first_frame_snaps() {
        let mut sweep = HandSweep::default();
        let target = angles(10.0, 20.0, 30.0);
        assert_eq!(sweep.advance(target, Duration::from_millis(16), true), target);
    }

    #[test]
    fn reduced_motion_snaps() {
        let mut sweep = HandSweep::default();
        sweep.snap(angles(0.0, 0.0, 0.0));

        let target = angles(0.0, 0.0, 6.0);
        assert_eq!(sweep.advance(target, Duration::from_millis(16), false), target);
    }

    #[test]
    fn animated_hands_move_part_of_the_way() {
        let mut sweep = HandSweep::default();
        sweep.snap(angles(0.0, 0.0, 0.0));

        let shown = sweep.advance(angles(0.0, 0.0, 6.0), Duration::from_millis(16), true);
        assert!(shown.second > 0.0 && shown.second < 6.0, "got {}", shown.second);
    }

    #[test]
    fn animated_hands_settle_eventually() {
        let mut sweep = HandSweep::default();
        sweep.snap(angles(0.0, 0.0, 0.0));

        let target = angles(0.0, 0.0, 6.0);
        let mut shown = target;
        for _ in 0..120 {
            shown = sweep.advance(target, Duration::from_millis(16), true);
        }
        assert_eq!(shown, target);
    }

    #[test]
    fn wrapping_takes_the_short_way() {
        let mut sweep = HandSweep::default();
        sweep.snap(angles(0.0, 0.0, 264.0));

        let shown = sweep.advance(angles(0.0, 0.0, -90.0), Duration::from_millis(16), true);
        let moved = shortest_arc(264.0, shown.second);
        assert!(moved > 0.0 && moved < 6.0, "moved {moved}");
    }
}
