//! StationService: presence trigger, request priority and busy handling.

use crate::mock_hw::{MockPresence, RecordingSink, TestCtx, make_ctx};
use votecam::app::events::AppEvent;
use votecam::app::service::StationService;
use votecam::session::delete::DeleteOutcome;
use votecam::session::enroll::EnrollOutcome;
use votecam::session::profile::{ProfileAction, ProfileOutcome};
use votecam::session::vote::VoteOutcome;

const LOOP_MS: u32 = 20;

fn make_station() -> (StationService, TestCtx, MockPresence, RecordingSink) {
    let (ctx, _time) = make_ctx();
    let mut sink = RecordingSink::default();
    let mut station = StationService::new(&crate::mock_hw::test_config());
    station.start(&mut sink);
    (station, ctx, MockPresence::default(), sink)
}

/// Step the main loop until a machine finishes or `max_steps` elapse.
fn run_until_event(
    station: &mut StationService,
    ctx: &mut TestCtx,
    presence: &mut MockPresence,
    sink: &mut RecordingSink,
    max_steps: usize,
) -> Option<AppEvent> {
    for _ in 0..max_steps {
        if let Some(ev) = station.step(ctx, presence, sink) {
            return Some(ev);
        }
        ctx.sleep_ms(LOOP_MS);
    }
    None
}

#[test]
fn start_emits_started() {
    let (_station, _ctx, _presence, sink) = make_station();
    assert_eq!(sink.events, [AppEvent::Started]);
}

#[test]
fn idle_step_runs_nothing() {
    let (mut station, mut ctx, mut presence, mut sink) = make_station();
    assert_eq!(station.step(&mut ctx, &mut presence, &mut sink), None);
    assert!(ctx.serial.link().written.is_empty());
    assert_eq!(station.steps(), 1);
}

#[test]
fn sustained_presence_starts_one_vote() {
    let (mut station, mut ctx, mut presence, mut sink) = make_station();
    presence.present = true;
    ctx.serial.link_mut().line_at(1_600, "VOTE,5,A,B,C");
    ctx.bridge.respond("Vote logged");

    let ev = run_until_event(&mut station, &mut ctx, &mut presence, &mut sink, 200);
    assert_eq!(ev, Some(AppEvent::VoteFinished(VoteOutcome::Recorded)));
    assert!(ctx.now_ms() >= 1_500);
    assert!(!station.vote_armed());

    // Same presence interval: no second vote.
    let ev = run_until_event(&mut station, &mut ctx, &mut presence, &mut sink, 200);
    assert_eq!(ev, None);
    assert_eq!(ctx.bridge.calls(), 1);
    assert_eq!(
        ctx.serial.link().written.iter().filter(|l| *l == "VOTE").count(),
        1
    );
}

#[test]
fn brief_presence_does_not_vote() {
    let (mut station, mut ctx, mut presence, mut sink) = make_station();
    for i in 0..300 {
        presence.present = (i / 25) % 2 == 0;
        assert_eq!(station.step(&mut ctx, &mut presence, &mut sink), None);
        ctx.sleep_ms(LOOP_MS);
    }
    assert!(ctx.serial.link().written.is_empty());
}

#[test]
fn presence_ignored_while_viewer_active() {
    let (mut station, mut ctx, mut presence, mut sink) = make_station();
    presence.present = true;
    ctx.viewer.active_from = Some(0);

    let ev = run_until_event(&mut station, &mut ctx, &mut presence, &mut sink, 200);
    assert_eq!(ev, None);
    assert!(ctx.serial.link().written.is_empty());
}

#[test]
fn requests_run_in_priority_order() {
    let (mut station, mut ctx, mut presence, mut sink) = make_station();
    ctx.control.command_at(0, "DELETE_PROFILE 9|John|Doe");
    ctx.control.command_at(0, "DELETE_FINGER 9");
    ctx.control.command_at(0, "ENROL_PROFILE 1|Jane|Doe");
    ctx.control.command_at(0, "ENROL_FINGER");
    ctx.serial.link_mut().line_at(5, "ENROLLED ID: 5");
    ctx.serial.link_mut().line_at(1_000, "DELETED ID: 9");
    ctx.bridge.respond("Profile enrolled");
    ctx.bridge.respond("9,John,Doe");
    ctx.bridge.respond("Profile deleted");

    let mut finished = Vec::new();
    for _ in 0..4 {
        finished.push(station.step(&mut ctx, &mut presence, &mut sink));
    }

    assert_eq!(
        finished,
        [
            Some(AppEvent::FingerprintEnrollFinished(EnrollOutcome::Enrolled(5))),
            Some(AppEvent::ProfileFinished {
                action: ProfileAction::Enroll,
                outcome: ProfileOutcome::Succeeded
            }),
            Some(AppEvent::FingerprintDeleteFinished {
                id: "9".into(),
                outcome: DeleteOutcome::Deleted {
                    display_name: Some("John|Doe".into())
                }
            }),
            Some(AppEvent::ProfileFinished {
                action: ProfileAction::Delete,
                outcome: ProfileOutcome::Succeeded
            }),
        ]
    );
    assert!(!ctx.flags.any_armed());
    assert!(ctx.flags.delete_profile.is_idle());
}

#[test]
fn vote_runs_before_operator_requests() {
    let (mut station, mut ctx, mut presence, mut sink) = make_station();
    presence.present = true;
    ctx.serial.link_mut().line_at(1_600, "VOTE,5,A,B,C");
    ctx.bridge.respond("Vote logged");
    // Arrives on the step where the presence dwell completes.
    ctx.control.command_at(1_500, "ENROL_PROFILE 1|Jane|Doe");
    ctx.bridge.respond("Profile enrolled");

    let first = run_until_event(&mut station, &mut ctx, &mut presence, &mut sink, 200);
    assert_eq!(first, Some(AppEvent::VoteFinished(VoteOutcome::Recorded)));
    let second = station.step(&mut ctx, &mut presence, &mut sink);
    assert!(matches!(
        second,
        Some(AppEvent::ProfileFinished {
            action: ProfileAction::Enroll,
            ..
        })
    ));
}

#[test]
fn duplicate_request_is_rejected_as_busy() {
    let (mut station, mut ctx, mut presence, mut sink) = make_station();
    ctx.control.command_at(0, "ENROL_PROFILE 1|Jane|Doe");
    ctx.control.command_at(0, "ENROL_PROFILE 2|Max|Roe");
    ctx.bridge.respond("Profile enrolled");

    station.step(&mut ctx, &mut presence, &mut sink);

    assert!(ctx.control.was_sent("Busy: ENROL_PROFILE already pending"));
    assert!(ctx.control.was_sent("Profile Enrollment successful for ID: 1"));
    assert_eq!(ctx.bridge.calls(), 1);
    assert!(sink.events.contains(&AppEvent::CommandRejected("ENROL_PROFILE")));
}

#[test]
fn empty_delete_id_is_ignored() {
    let (mut station, mut ctx, mut presence, mut sink) = make_station();
    ctx.control.command_at(0, "DELETE_FINGER   ");

    assert_eq!(station.step(&mut ctx, &mut presence, &mut sink), None);
    assert!(ctx.flags.delete_fingerprint.is_idle());
    assert!(ctx.serial.link().written.is_empty());
}

#[test]
fn illumination_toggle_during_enroll_is_forwarded() {
    let (mut station, mut ctx, mut presence, mut sink) = make_station();
    ctx.control.command_at(0, "ENROL_FINGER");
    ctx.control.command_at(2_000, "LED_ON");
    ctx.serial.link_mut().line_at(5_000, "ENROLLED ID: 8");

    let ev = station.step(&mut ctx, &mut presence, &mut sink);

    assert_eq!(ev, Some(AppEvent::FingerprintEnrollFinished(EnrollOutcome::Enrolled(8))));
    assert_eq!(ctx.light.history, [true]);
    let led = sink
        .events
        .iter()
        .position(|e| *e == AppEvent::IlluminationChanged(true));
    let done = sink
        .events
        .iter()
        .position(|e| matches!(e, AppEvent::FingerprintEnrollFinished(_)));
    assert!(led.is_some() && led < done);
}
