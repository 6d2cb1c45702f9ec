//! ControlLoop → CycleService: input edge detection and activation order.

use super::mock_hw::{LogSink, MockInputs, MockOutputs};

use microwave::app::driver::ControlLoop;
use microwave::app::events::AppEvent;
use microwave::app::publish::StatusBoard;
use microwave::app::service::CycleService;
use microwave::config::CycleConfig;
use microwave::error::InputError;
use microwave::fsm::CycleState;

struct Rig {
    control: ControlLoop,
    service: CycleService<MockOutputs>,
    inputs: MockInputs,
    sink: LogSink,
}

impl Rig {
    fn new() -> Self {
        let config = CycleConfig::default();
        let mut service = CycleService::new(&config, MockOutputs::new());
        let mut sink = LogSink::new();
        service.start(&mut sink);
        Self {
            control: ControlLoop::new(&config),
            service,
            inputs: MockInputs::new(),
            sink,
        }
    }

    fn activate(&mut self) {
        self.control
            .activate(&mut self.inputs, &mut self.service, &mut self.sink);
    }

    /// Press and release the button over two activations.
    fn press(&mut self) {
        self.inputs.pressed = true;
        self.activate();
        self.inputs.pressed = false;
        self.activate();
    }

    fn run_timer_ms(&mut self, ms: u32) -> usize {
        (0..ms / 10)
            .filter(|_| {
                self.control
                    .on_timer_tick(&mut self.inputs, &mut self.service, &mut self.sink)
            })
            .count()
    }
}

#[test]
fn boot_sample_seeds_door_and_duration() {
    let mut rig = Rig::new();
    rig.inputs.knob = 0;
    rig.activate();

    assert!(rig.service.session().door_closed);
    assert_eq!(rig.service.session().selected_secs, 120);
    assert!(rig.sink.events.contains(&AppEvent::Started(CycleState::Idle)));
    assert!(rig.sink.events.contains(&AppEvent::DurationSelected(120)));
    assert!(rig.sink.events.contains(&AppEvent::DoorChanged(true)));
}

#[test]
fn knob_within_segment_is_not_reforwarded() {
    let mut rig = Rig::new();
    rig.inputs.knob = 1023;
    rig.activate();
    rig.sink.events.clear();

    rig.inputs.knob = 900;
    rig.activate();
    assert!(rig.sink.events.is_empty());

    rig.inputs.knob = 100;
    rig.activate();
    assert_eq!(rig.sink.events, vec![AppEvent::DurationSelected(120)]);
}

#[test]
fn full_cycle_through_the_panel() {
    let mut rig = Rig::new();
    rig.inputs.knob = 1023; // 20 s
    rig.activate();
    rig.press();
    assert_eq!(rig.service.state(), CycleState::Running);

    rig.run_timer_ms(21_000);

    assert_eq!(rig.service.state(), CycleState::Idle);
    let completed = rig
        .sink
        .transitions()
        .into_iter()
        .any(|t| t.entered == CycleState::Completed);
    assert!(completed);
    assert!(!rig.service.outputs().heating);
}

#[test]
fn door_opened_in_same_activation_pauses_before_tick() {
    let mut rig = Rig::new();
    rig.activate();
    rig.press();
    let ticks = rig.service.session().sub_ticks;
    let remaining = rig.service.session().remaining_secs;

    rig.inputs.door_closed = false;
    rig.activate();

    assert_eq!(rig.service.state(), CycleState::Paused);
    assert_eq!(rig.service.session().sub_ticks, ticks);
    assert_eq!(rig.service.session().remaining_secs, remaining);
    assert!(!rig.service.outputs().heating);
}

#[test]
fn closing_door_and_pressing_resumes() {
    let mut rig = Rig::new();
    rig.activate();
    rig.press();
    rig.inputs.door_closed = false;
    rig.activate();
    rig.inputs.door_closed = true;
    rig.activate();
    assert_eq!(rig.service.state(), CycleState::Paused);

    rig.press();
    assert_eq!(rig.service.state(), CycleState::Running);
    assert!(rig.service.outputs().heating);
}

#[test]
fn input_failure_is_reported_and_countdown_continues() {
    let mut rig = Rig::new();
    rig.activate();
    rig.press();
    let before = rig.service.session().sub_ticks;

    rig.inputs.fail_next(InputError::DoorReadFailed);
    rig.activate();

    assert!(
        rig.sink
            .events
            .contains(&AppEvent::InputDegraded(InputError::DoorReadFailed))
    );
    assert_eq!(rig.service.session().sub_ticks, before + 1);
    assert_eq!(rig.service.state(), CycleState::Running);
}

#[test]
fn door_opening_pauses_while_knob_keeps_failing() {
    let mut rig = Rig::new();
    rig.activate();
    rig.press();
    assert_eq!(rig.service.state(), CycleState::Running);

    rig.inputs.knob_broken = true;
    rig.inputs.door_closed = false;
    for _ in 0..20 {
        rig.activate();
        assert_eq!(rig.service.state(), CycleState::Paused);
        assert!(!rig.service.outputs().heating);
    }
    assert_eq!(rig.service.session().remaining_secs, 20);
    assert!(
        rig.sink
            .events
            .contains(&AppEvent::InputDegraded(InputError::SelectorReadFailed))
    );
}

#[test]
fn door_read_failure_holds_last_level_and_forwards_button() {
    let mut rig = Rig::new();
    rig.activate();

    // The door channel drops out for the activation the press lands in.
    rig.inputs.pressed = true;
    rig.inputs.fail_next(InputError::DoorReadFailed);
    rig.activate();

    assert_eq!(rig.service.state(), CycleState::Running);
    assert!(rig.service.session().door_closed);
    assert!(
        rig.sink
            .events
            .contains(&AppEvent::InputDegraded(InputError::DoorReadFailed))
    );
}

#[test]
fn knob_failure_keeps_last_selection() {
    let mut rig = Rig::new();
    rig.inputs.knob = 0;
    rig.activate();
    assert_eq!(rig.service.session().selected_secs, 120);

    rig.inputs.knob = 1023;
    rig.inputs.fail_next(InputError::SelectorReadFailed);
    rig.activate();
    assert_eq!(rig.service.session().selected_secs, 120);

    rig.activate();
    assert_eq!(rig.service.session().selected_secs, 20);
}

#[test]
fn one_activation_per_hundred_ms() {
    let mut rig = Rig::new();
    assert_eq!(rig.run_timer_ms(1_000), 10);
    assert_eq!(rig.inputs.samples, 10);
}

#[test]
fn board_carries_dirty_flag_to_reporter() {
    let board = StatusBoard::new();
    let mut rig = Rig::new();
    rig.activate();
    assert!(rig.service.publish(&board));

    let snap = board.take_update().unwrap();
    assert_eq!(snap.selected.total_secs(), 20);
    assert!(!board.is_dirty());

    // Idle with nothing changing: nothing new to publish.
    rig.activate();
    assert!(!rig.service.publish(&board));
    assert!(board.take_update().is_none());
}
