//! Vote session against scripted fingerprint-unit output.

use crate::mock_hw::{SERVICE_URL, make_ctx};
use votecam::session::vote::{MSG_VOTE_TIMEOUT, VoteOutcome};

#[test]
fn recorded_vote_is_logged_once_and_confirmed() {
    let (mut ctx, _time) = make_ctx();
    ctx.serial.link_mut().line_at(1, "VOTE,17,CandA,CandB,CandC");
    ctx.bridge.respond("Vote logged");

    assert_eq!(ctx.run_vote(), VoteOutcome::Recorded);

    assert_eq!(ctx.bridge.calls(), 1);
    assert_eq!(
        ctx.bridge.url(0),
        format!("{SERVICE_URL}?action=vote&id=17&pres=CandA&gub=CandB&sen=CandC")
    );
    assert_eq!(ctx.serial.link().written, ["VOTE", "VOTED"]);
}

#[test]
fn duplicate_and_unregistered_replies() {
    for (response, outcome, reply) in [
        ("Previously voted", VoteOutcome::Duplicate, "DOUBLE VOTE"),
        ("Unregistered ID", VoteOutcome::Unregistered, "UNREGISTERED"),
        ("HTTP Error: timed out", VoteOutcome::NetworkFailure, "POOR NETWORK"),
        ("<html>quota</html>", VoteOutcome::NetworkFailure, "POOR NETWORK"),
    ] {
        let (mut ctx, _time) = make_ctx();
        ctx.serial.link_mut().line_at(1, "VOTE,3,A,B,C");
        ctx.bridge.respond(response);

        assert_eq!(ctx.run_vote(), outcome, "response {response:?}");
        assert_eq!(ctx.serial.link().written.last().map(String::as_str), Some(reply));
    }
}

#[test]
fn response_whitespace_is_ignored() {
    let (mut ctx, _time) = make_ctx();
    ctx.serial.link_mut().line_at(1, "VOTE,3,A,B,C");
    ctx.bridge.respond("Vote logged\r\n");
    assert_eq!(ctx.run_vote(), VoteOutcome::Recorded);
}

#[test]
fn incomplete_ballot_is_skipped() {
    let (mut ctx, _time) = make_ctx();
    ctx.serial.link_mut().line_at(1, "VOTE,17");
    ctx.serial.link_mut().line_at(1, "hello");
    ctx.serial.link_mut().line_at(400, "VOTE,18,A,B,C");
    ctx.bridge.respond("Vote logged");

    assert_eq!(ctx.run_vote(), VoteOutcome::Recorded);
    assert_eq!(ctx.bridge.calls(), 1);
    assert!(ctx.bridge.url(0).contains("&id=18&"));
}

#[test]
fn only_first_ballot_reaches_service() {
    let (mut ctx, _time) = make_ctx();
    ctx.serial
        .link_mut()
        .send_at(1, b"VOTE,1,A,B,C\r\nVOTE,2,A,B,C\r\n");
    ctx.bridge.respond("Vote logged");
    ctx.bridge.respond("Vote logged");

    assert_eq!(ctx.run_vote(), VoteOutcome::Recorded);
    assert_eq!(ctx.bridge.calls(), 1);
    assert!(ctx.bridge.url(0).contains("&id=1&"));
    // The second ballot was never consumed by the session.
    assert_eq!(ctx.serial.poll_line().as_deref(), Some("VOTE,2,A,B,C"));
}

#[test]
fn ballot_split_across_reads() {
    let (mut ctx, _time) = make_ctx();
    ctx.serial.link_mut().send_at(100, b"VOTE,9,Ca");
    ctx.serial.link_mut().send_at(900, b"ndA,B,C\n");
    ctx.bridge.respond("Vote logged");

    assert_eq!(ctx.run_vote(), VoteOutcome::Recorded);
    assert!(ctx.bridge.url(0).ends_with("&id=9&pres=CandA&gub=B&sen=C"));
}

#[test]
fn ballot_values_are_percent_encoded() {
    let (mut ctx, _time) = make_ctx();
    ctx.serial.link_mut().line_at(1, "VOTE,7,Jane Doe,A&B,C");
    ctx.bridge.respond("Vote logged");

    ctx.run_vote();
    assert!(ctx.bridge.url(0).ends_with("&pres=Jane%20Doe&gub=A%26B&sen=C"));
}

#[test]
fn voting_failed_aborts_without_service_call() {
    let (mut ctx, _time) = make_ctx();
    ctx.serial.link_mut().line_at(2_000, "VOTING FAILED");

    assert_eq!(ctx.run_vote(), VoteOutcome::ExternallyAborted);
    assert_eq!(ctx.bridge.calls(), 0);
    assert_eq!(ctx.serial.link().written, ["VOTE"]);
    assert!(ctx.control.sent.is_empty());
}

#[test]
fn viewer_interrupts_silently() {
    let (mut ctx, time) = make_ctx();
    ctx.viewer.active_from = Some(500);
    ctx.serial.link_mut().line_at(5_000, "VOTE,1,A,B,C");

    assert_eq!(ctx.run_vote(), VoteOutcome::Interrupted);
    assert_eq!(ctx.bridge.calls(), 0);
    assert!(ctx.control.sent.is_empty());
    assert!(time.now_ms() < 5_000);
}

#[test]
fn silence_times_out_and_notifies_operator() {
    let (mut ctx, time) = make_ctx();

    assert_eq!(ctx.run_vote(), VoteOutcome::TimedOut);
    assert!(time.now_ms() >= 120_000);
    assert_eq!(ctx.bridge.calls(), 0);
    assert_eq!(ctx.control.sent, [MSG_VOTE_TIMEOUT]);
}

#[test]
fn illumination_applies_during_wait() {
    let (mut ctx, _time) = make_ctx();
    ctx.control.command_at(1_000, "LED_ON");
    ctx.control.command_at(2_000, "LED_OFF");
    ctx.serial.link_mut().line_at(3_000, "VOTE,1,A,B,C");
    ctx.bridge.respond("Vote logged");

    assert_eq!(ctx.run_vote(), VoteOutcome::Recorded);
    assert_eq!(ctx.light.history, [true, false]);
}
