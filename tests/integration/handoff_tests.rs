//! Serial state handed from one session to the next.
//!
//! Sessions share one line reader.  Whatever an earlier session left
//! behind, whether half a line or whole late replies, must not be read
//! as an answer to the next trigger.

use crate::mock_hw::make_ctx;
use votecam::session::delete::DeleteOutcome;
use votecam::session::enroll::{EnrollOutcome, MSG_ENROLL_TIMEOUT};
use votecam::session::vote::VoteOutcome;

#[test]
fn partial_reply_from_timed_out_enroll_does_not_swallow_next_ballot() {
    let (mut ctx, time) = make_ctx();
    ctx.serial.link_mut().send_at(29_990, b"ENROLLED ID: ");

    assert_eq!(ctx.run_enroll_fingerprint(), EnrollOutcome::TimedOut);
    assert_eq!(ctx.serial.partial_len(), "ENROLLED ID: ".len());

    ctx.serial.link_mut().line_at(time.now_ms() + 100, "VOTE,3,A,B,C");
    ctx.bridge.respond("Vote logged");

    assert_eq!(ctx.run_vote(), VoteOutcome::Recorded);
    assert_eq!(ctx.bridge.calls(), 1);
    assert!(ctx.bridge.url(0).ends_with("&id=3&pres=A&gub=B&sen=C"));
}

#[test]
fn late_enroll_reply_is_not_taken_by_next_enroll() {
    let (mut ctx, time) = make_ctx();
    assert_eq!(ctx.run_enroll_fingerprint(), EnrollOutcome::TimedOut);

    // Unit answers the first request after the station gave up.
    let t = time.now_ms();
    ctx.serial.link_mut().line_at(t, "ENROLLED ID: 5");
    ctx.serial.link_mut().line_at(t + 2_000, "ENROLLED ID: 6");

    assert_eq!(ctx.run_enroll_fingerprint(), EnrollOutcome::Enrolled(6));
    assert_eq!(ctx.control.sent, [MSG_ENROLL_TIMEOUT, "ID: 6"]);
}

#[test]
fn late_ballot_is_not_logged_for_next_voter() {
    let (mut ctx, time) = make_ctx();
    assert_eq!(ctx.run_vote(), VoteOutcome::TimedOut);

    let t = time.now_ms();
    ctx.serial.link_mut().line_at(t, "VOTE,1,A,B,C");
    ctx.serial.link_mut().line_at(t + 300, "VOTE,2,X,Y,Z");
    ctx.bridge.respond("Vote logged");

    assert_eq!(ctx.run_vote(), VoteOutcome::Recorded);
    assert_eq!(ctx.bridge.calls(), 1);
    assert!(ctx.bridge.url(0).contains("&id=2&"));
    assert_eq!(ctx.serial.link().written, ["VOTE", "VOTE", "VOTED"]);
}

#[test]
fn delete_ignores_confirmation_left_from_earlier_request() {
    let (mut ctx, time) = make_ctx();
    assert_eq!(ctx.run_enroll_fingerprint(), EnrollOutcome::TimedOut);

    let t = time.now_ms();
    ctx.serial.link_mut().line_at(t, "DELETED ID: 9");

    assert_eq!(ctx.run_delete_fingerprint("9"), DeleteOutcome::TimedOut);
    assert_eq!(ctx.bridge.calls(), 0);
}
