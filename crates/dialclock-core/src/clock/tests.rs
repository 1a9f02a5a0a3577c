use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use dialclock_proto::config::{ClockMode, TimeFormat};
use icu::locid::locale;

use super::*;
use crate::test_utils::FixedTime;

const TRANSITION: Duration = Duration::from_millis(300);

fn assert_close(actual: f32, expected: f32) {
    assert!((actual - expected).abs() < 1e-3, "expected {expected}, got {actual}");
}

fn widget_with(source: Arc<FixedTime>, settings: ClockSettings, at: Instant) -> ClockWidget {
    ClockWidget::initialize(InstanceId(1), Surface::new(400.0, 300.0), settings, source, at)
}

fn settings() -> ClockSettings {
    ClockSettings {
        locale: locale!("en-US"),
        ..ClockSettings::default()
    }
}

fn widget(at: Instant) -> (ClockWidget, Arc<FixedTime>) {
    let source = Arc::new(FixedTime::at(13, 5, 9));
    (widget_with(Arc::clone(&source), settings(), at), source)
}

fn ticket_of(effect: Effect) -> TransitionTicket {
    match effect {
        Effect::CompleteTransition { ticket, delay, .. } => {
            assert_eq!(delay, TRANSITION);
            ticket
        }
        Effect::None => panic!("expected a scheduled completion"),
    }
}

#[test]
fn initializes_in_digital_mode() {
    let start = Instant::now();
    let (widget, _) = widget(start);

    assert_eq!(widget.state().mode(), ClockMode::Digital);
    assert_eq!(widget.state().time_format(), TimeFormat::Hour12);
    assert!(!widget.state().is_transitioning());
    assert_close(widget.state().radius(), 120.0);
    assert!(widget.wants_frames());
    assert!(widget.state().check_invariants().is_ok());

    let reading = widget.digital_reading().expect("digital face rendered");
    assert_eq!(reading.time, "1:05:09 PM");
    assert_eq!(reading.date, "Monday, October 19, 2026");
}

#[test]
fn date_uses_the_configured_locale() {
    let start = Instant::now();
    let source = Arc::new(FixedTime::at(13, 5, 9));
    let settings = ClockSettings {
        locale: locale!("fr-FR"),
        ..settings()
    };
    let widget = widget_with(source, settings, start);

    let reading = widget.digital_reading().expect("digital face rendered");
    assert_eq!(reading.date, "lundi 19 octobre 2026");
}

#[test]
fn toggle_swaps_faces_across_frames() {
    let start = Instant::now();
    let (mut widget, _) = widget(start);

    let ticket = ticket_of(widget.toggle_mode());

    assert_eq!(widget.state().mode(), ClockMode::Analog);
    assert!(widget.state().is_transitioning());
    assert!(!widget.state().face(ClockMode::Digital).displayed);
    assert!(widget.state().face(ClockMode::Analog).displayed);
    assert!(!widget.state().face(ClockMode::Analog).is_visible());
    assert!(widget.state().check_invariants().is_ok());

    assert!(widget.update_loop(start + Duration::from_millis(16)));
    assert!(widget.state().face(ClockMode::Analog).is_visible());

    assert!(widget.complete_transition(ticket, start + TRANSITION));
    assert!(!widget.state().is_transitioning());
    assert_eq!(widget.state().visible_faces(), 1);
    assert_eq!(widget.state().focus().focused(), Some(Control::Dial));
    assert!(widget.state().check_invariants().is_ok());
}

#[test]
fn toggle_during_transition_is_dropped() {
    let start = Instant::now();
    let (mut widget, _) = widget(start);

    let _ticket = ticket_of(widget.toggle_mode());
    let second = widget.toggle_mode();

    assert!(matches!(second, Effect::None));
    assert_eq!(widget.state().mode(), ClockMode::Analog);
}

#[test]
fn every_completed_toggle_leaves_exactly_one_face() {
    let start = Instant::now();
    let (mut widget, _) = widget(start);
    let mut at = start;

    for round in 0..6 {
        let ticket = ticket_of(widget.toggle_mode());
        at += Duration::from_millis(16);
        widget.update_loop(at);
        at += TRANSITION;
        assert!(widget.complete_transition(ticket, at));

        assert_eq!(widget.state().visible_faces(), 1, "round {round}");
        assert!(widget.state().face(widget.state().mode()).is_visible());
    }

    assert_eq!(widget.state().mode(), ClockMode::Digital);
}

#[test]
fn completion_without_frame_still_reveals_incoming_face() {
    let start = Instant::now();
    let (mut widget, _) = widget(start);

    let ticket = ticket_of(widget.toggle_mode());
    assert!(widget.complete_transition(ticket, start + TRANSITION));

    assert!(widget.state().face(ClockMode::Analog).is_visible());
    assert!(widget.state().check_invariants().is_ok());
}

#[test]
fn stale_ticket_is_ignored() {
    let start = Instant::now();
    let (mut widget, _) = widget(start);

    let ticket = ticket_of(widget.toggle_mode());
    let stale = TransitionTicket {
        instance: InstanceId(99),
        ..ticket
    };

    assert!(!widget.complete_transition(stale, start + TRANSITION));
    assert!(widget.state().is_transitioning());
}

#[test]
fn update_loop_reads_time_once_and_renders_active_face() {
    let start = Instant::now();
    let (mut widget, source) = widget(start);
    let reads_before = source.reads();

    source.set(3, 30, 0);
    assert!(widget.update_loop(start + Duration::from_millis(16)));

    assert_eq!(source.reads(), reads_before + 1);
    let reading = widget.digital_reading().expect("digital reading");
    assert_eq!(reading.time, "3:30:00 AM");
    assert_eq!(widget.hands(), None);
}

#[test]
fn analog_face_follows_the_time() {
    let start = Instant::now();
    let source = Arc::new(FixedTime::at(3, 30, 0));
    let settings = ClockSettings {
        initial_mode: ClockMode::Analog,
        ..settings()
    };
    let mut widget = widget_with(Arc::clone(&source), settings, start);
    widget.handle_reduced_motion(true);

    widget.update_loop(start + Duration::from_millis(16));

    let hands = widget.hands().expect("hands rendered");
    assert_eq!(hands, HandAngles::at(3, 30, 0));
    assert!(widget.digital_reading().is_none());
}

#[test]
fn format_change_renders_immediately() {
    let start = Instant::now();
    let (mut widget, _) = widget(start);

    widget.update(Message::ToggleTimeFormat, start);

    assert_eq!(widget.state().time_format(), TimeFormat::Hour24);
    assert_eq!(widget.digital_reading().map(|r| r.time.as_str()), Some("13:05:09"));
    assert!(widget.feedback_active(start + Duration::from_millis(100)));
    assert!(!widget.feedback_active(start + Duration::from_millis(200)));
}

#[test]
fn resize_is_idempotent() {
    let start = Instant::now();
    let (mut widget, _) = widget(start);

    assert!(widget.handle_resize(Surface::new(500.0, 500.0)));
    let layout = *widget.layout();
    assert_close(widget.state().radius(), 200.0);

    assert!(!widget.handle_resize(Surface::new(500.0, 500.0)));
    assert_eq!(*widget.layout(), layout);
}

#[test]
fn swipe_toggles_once_per_gesture() {
    let start = Instant::now();
    let (mut widget, _) = widget(start);
    let point = |x| TouchPoint { x, y: 10.0 };

    widget.update(
        Message::Touch(TouchInput::Pressed {
            finger:   0,
            position: point(0.0),
        }),
        start,
    );

    let first = widget.update(
        Message::Touch(TouchInput::Moved {
            finger:   0,
            position: point(60.0),
        }),
        start,
    );
    let ticket = ticket_of(first);
    widget.complete_transition(ticket, start + TRANSITION);

    let again = widget.update(
        Message::Touch(TouchInput::Moved {
            finger:   0,
            position: point(120.0),
        }),
        start + TRANSITION,
    );

    assert!(matches!(again, Effect::None));
    assert_eq!(widget.state().mode(), ClockMode::Analog);
}

#[test]
fn short_swipe_does_nothing() {
    let start = Instant::now();
    let (mut widget, _) = widget(start);

    widget.update(
        Message::Touch(TouchInput::Pressed {
            finger:   0,
            position: TouchPoint { x: 0.0, y: 0.0 },
        }),
        start,
    );
    let effect = widget.update(
        Message::Touch(TouchInput::Moved {
            finger:   0,
            position: TouchPoint { x: 30.0, y: 0.0 },
        }),
        start,
    );

    assert!(matches!(effect, Effect::None));
    assert_eq!(widget.state().mode(), ClockMode::Digital);
}

#[test]
fn keyboard_drives_mode_and_focus() {
    let start = Instant::now();
    let (mut widget, _) = widget(start);

    let effect = widget.update(Message::Key(KeyInput::Character('M')), start);
    let ticket = ticket_of(effect);
    widget.complete_transition(ticket, start + TRANSITION);
    assert_eq!(widget.state().mode(), ClockMode::Analog);

    widget.update(Message::Key(KeyInput::Tab { shift: false }), start);
    assert_eq!(widget.state().focus().focused(), Some(Control::ModeToggle));

    let effect = widget.update(Message::Key(KeyInput::Activate), start);
    assert!(matches!(effect, Effect::CompleteTransition { .. }));
    assert_eq!(widget.state().mode(), ClockMode::Digital);
}

#[test]
fn destroy_stops_the_loop() {
    let start = Instant::now();
    let (mut widget, source) = widget(start);

    widget.update_loop(start + Duration::from_millis(16));
    widget.destroy();
    let reads = source.reads();

    assert!(!widget.update_loop(start + Duration::from_millis(32)));
    assert!(!widget.wants_frames());
    assert_eq!(source.reads(), reads);
    assert!(widget.digital_reading().is_none());
    assert!(render(&widget, start).is_none());
}

#[tokio::test(start_paused = true)]
async fn destroy_cancels_pending_completion() {
    let start = Instant::now();
    let (mut widget, _) = widget(start);

    let completion = widget
        .toggle_mode()
        .into_completion()
        .expect("completion scheduled");
    widget.destroy();

    assert_eq!(completion.await, None);
}

#[tokio::test(start_paused = true)]
async fn completion_fires_after_the_window() {
    let start = Instant::now();
    let (mut widget, _) = widget(start);

    let completion = widget
        .toggle_mode()
        .into_completion()
        .expect("completion scheduled");
    let ticket = completion.await.expect("not cancelled");

    assert!(widget.complete_transition(ticket, start + TRANSITION));
}

#[test]
fn render_reflects_state() {
    let start = Instant::now();
    let (mut widget, _) = widget(start);
    widget.update_loop(start);

    let presentation = render(&widget, start + Duration::from_secs(1)).expect("rendered");
    assert_eq!(presentation.data_mode(), "digital");
    assert_eq!(presentation.label, "Interactive clock");
    assert!(presentation.analog.is_none());
    assert_eq!(presentation.mode_toggle.label, "Switch to analog clock");
    assert!(!presentation.mode_toggle.checked);

    let digital = presentation.digital.expect("digital face");
    assert_eq!(digital.role, Role::Timer);
    assert_eq!(digital.time, "1:05:09 PM");
    assert_eq!(digital.opacity, 1.0);
    assert_eq!(digital.format_toggle.label, "Switch to 24-hour format");

    widget.toggle_mode();
    let presentation = render(&widget, start + Duration::from_secs(1)).expect("rendered");
    assert!(presentation.transitioning);
    assert!(presentation.digital.is_none());
    let analog = presentation.analog.expect("analog face");
    assert_eq!(analog.opacity, 0.0);
    assert_close(analog.layout.radius, 120.0);
}
