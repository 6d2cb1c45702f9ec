//! End-to-end cycle scenarios: CycleService → FSM → outputs.

use super::mock_hw::{LogSink, MockOutputs, OutputCall};

use microwave::app::service::CycleService;
use microwave::config::CycleConfig;
use microwave::fsm::CycleState;

fn make_service() -> CycleService<MockOutputs> {
    let mut svc = CycleService::new(&CycleConfig::default(), MockOutputs::new());
    let mut sink = LogSink::new();
    svc.start(&mut sink);
    svc
}

/// Idle, door closed, 40 s selected, start pressed.
fn running_40s() -> CycleService<MockOutputs> {
    let mut svc = make_service();
    svc.on_door_changed(true);
    svc.on_duration_selected(40);
    svc.on_start_stop_pressed();
    svc
}

fn tick_secs(svc: &mut CycleService<MockOutputs>, secs: u32) {
    for _ in 0..secs * 10 {
        svc.on_tick_elapsed();
    }
}

#[test]
fn start_with_door_closed_runs_and_heats() {
    let svc = running_40s();

    assert_eq!(svc.state(), CycleState::Running);
    assert_eq!(svc.session().requested_secs, 40);
    assert_eq!(svc.session().remaining_secs, 40);
    assert!(svc.outputs().heating);
    assert!(svc.outputs().interior_light);
}

#[test]
fn opening_door_pauses_and_cuts_heating() {
    let mut svc = running_40s();
    let t = svc.on_door_changed(false).unwrap();

    assert_eq!(t.entered, CycleState::Paused);
    assert_eq!(svc.state(), CycleState::Paused);
    assert!(!svc.outputs().heating);
    assert!(svc.outputs().interior_light);
    assert_eq!(svc.session().remaining_secs, 40);
}

#[test]
fn one_second_of_ticks_decrements_once() {
    let mut svc = running_40s();
    let indicator_before = svc.outputs().indicator;
    svc.outputs_mut().clear();

    tick_secs(&mut svc, 1);

    assert_eq!(svc.session().remaining_secs, 39);
    assert_eq!(svc.session().sub_ticks, 0);
    assert_eq!(svc.outputs().toggles(), 10);
    assert_eq!(svc.outputs().indicator, indicator_before);
}

#[test]
fn countdown_completes_on_the_boundary_after_zero() {
    let mut svc = running_40s();
    tick_secs(&mut svc, 40);
    assert_eq!(svc.session().remaining_secs, 0);
    assert_eq!(svc.state(), CycleState::Running);

    for _ in 0..9 {
        assert!(svc.on_tick_elapsed().is_none());
    }
    let t = svc.on_tick_elapsed().unwrap();

    assert_eq!(t.entered, CycleState::Completed);
    assert_eq!(t.label, "Succeeded");
    assert_eq!(svc.state(), CycleState::Idle);
    assert_eq!(svc.session().remaining_secs, 0);
    assert!(!svc.outputs().heating);
    assert!(!svc.outputs().interior_light);
    assert!(!svc.outputs().indicator);
    assert_eq!(svc.snapshot().state_label, "Succeeded");
}

#[test]
fn start_with_door_open_in_idle_is_noop() {
    let mut svc = make_service();
    svc.on_door_changed(false);
    svc.on_duration_selected(40);
    svc.outputs_mut().clear();

    assert!(svc.on_start_stop_pressed().is_none());
    assert_eq!(svc.state(), CycleState::Idle);
    assert!(svc.outputs().calls.is_empty());
}

#[test]
fn stop_while_running_cancels_and_resets() {
    let mut svc = running_40s();
    tick_secs(&mut svc, 7);
    assert_eq!(svc.session().remaining_secs, 33);

    let t = svc.on_start_stop_pressed().unwrap();

    assert_eq!(t.entered, CycleState::Aborted);
    assert!(t.folded());
    assert_eq!(svc.state(), CycleState::Idle);
    assert_eq!(svc.session().remaining_secs, 0);
    assert!(!svc.outputs().heating);
    assert_eq!(svc.snapshot().state_label, "Canceled");
}

#[test]
fn cancel_mid_second_gives_next_run_a_full_first_second() {
    let mut svc = running_40s();
    for _ in 0..7 {
        svc.on_tick_elapsed();
    }
    svc.on_start_stop_pressed();
    assert_eq!(svc.session().sub_ticks, 0);

    svc.on_start_stop_pressed();
    for _ in 0..9 {
        svc.on_tick_elapsed();
    }
    assert_eq!(svc.session().remaining_secs, 40);
    svc.on_tick_elapsed();
    assert_eq!(svc.session().remaining_secs, 39);
}

#[test]
fn new_run_after_cancel_reloads_selected_duration() {
    let mut svc = running_40s();
    tick_secs(&mut svc, 5);
    svc.on_start_stop_pressed();
    svc.on_duration_selected(100);

    svc.on_start_stop_pressed();
    assert_eq!(svc.session().requested_secs, 100);
    assert_eq!(svc.session().remaining_secs, 100);
}

#[test]
fn pause_in_final_second_then_resume_starts_over() {
    let mut svc = running_40s();
    tick_secs(&mut svc, 40);
    assert_eq!(svc.state(), CycleState::Running);
    assert_eq!(svc.session().remaining_secs, 0);

    svc.on_door_changed(false);
    assert_eq!(svc.state(), CycleState::Paused);
    svc.on_door_changed(true);
    svc.on_duration_selected(60);
    svc.on_start_stop_pressed();

    assert_eq!(svc.state(), CycleState::Running);
    assert_eq!(svc.session().requested_secs, 60);
    assert_eq!(svc.session().remaining_secs, 60);
    assert!(svc.outputs().heating);
}

#[test]
fn heating_never_commanded_on_with_door_open() {
    let mut svc = running_40s();
    svc.on_door_changed(false);
    svc.outputs_mut().clear();

    // Start with the door open cancels instead of resuming.
    svc.on_start_stop_pressed();
    tick_secs(&mut svc, 3);

    assert!(!svc.outputs().heating_was_on());
    assert_eq!(svc.state(), CycleState::Idle);
}

#[test]
fn percent_complete_tracks_countdown() {
    let mut svc = running_40s();
    assert_eq!(svc.snapshot().percent_complete, 0);
    tick_secs(&mut svc, 10);
    assert_eq!(svc.snapshot().percent_complete, 25);
    tick_secs(&mut svc, 30);
    assert_eq!(svc.snapshot().percent_complete, 100);
}

#[test]
fn status_line_reflects_paused_run() {
    let mut svc = running_40s();
    tick_secs(&mut svc, 20);
    svc.on_door_changed(false);

    assert_eq!(
        svc.snapshot().to_string(),
        "Status 00:20 [ 50%] | Door [Opened] | Selected [00:40] | Operation Paused"
    );
}

#[test]
fn first_output_calls_are_the_idle_reset() {
    let svc = make_service();
    assert_eq!(
        svc.outputs().calls,
        vec![
            OutputCall::Heating(false),
            OutputCall::InteriorLight(false),
            OutputCall::Indicator(false),
        ]
    );
}
