//! Profile enrollment and deletion.

use crate::mock_hw::{SERVICE_URL, make_ctx};
use votecam::session::profile::{MSG_INVALID_PROFILE, ProfileAction, ProfileOutcome};

#[test]
fn enroll_profile_success() {
    let (mut ctx, _time) = make_ctx();
    ctx.bridge.respond("Profile enrolled");

    let outcome = ctx.run_profile(ProfileAction::Enroll, "1|Jane|Doe");

    assert_eq!(outcome, ProfileOutcome::Succeeded);
    assert_eq!(
        ctx.bridge.url(0),
        format!("{SERVICE_URL}?action=enroll&id=1&first=Jane&last=Doe")
    );
    assert_eq!(ctx.control.sent, ["Profile Enrollment successful for ID: 1"]);
    assert!(ctx.serial.link().written.is_empty());
}

#[test]
fn enroll_profile_failure_echoes_response() {
    let (mut ctx, _time) = make_ctx();
    ctx.bridge.respond("ID exists\n");

    let outcome = ctx.run_profile(ProfileAction::Enroll, "1|Jane|Doe");

    assert_eq!(outcome, ProfileOutcome::Failed);
    assert_eq!(
        ctx.control.sent,
        ["Profile Enrollment Failed!", "Service response: ID exists"]
    );
}

#[test]
fn delete_profile_success() {
    let (mut ctx, _time) = make_ctx();
    ctx.bridge.respond("Profile deleted");

    let outcome = ctx.run_profile(ProfileAction::Delete, "9|John|Doe");

    assert_eq!(outcome, ProfileOutcome::Succeeded);
    assert_eq!(
        ctx.bridge.url(0),
        format!("{SERVICE_URL}?action=delete&id=9&first=John&last=Doe")
    );
    assert_eq!(ctx.control.sent, ["Profile deleted: 9"]);
}

#[test]
fn delete_profile_bridge_error() {
    let (mut ctx, _time) = make_ctx();

    let outcome = ctx.run_profile(ProfileAction::Delete, "9|John|Doe");

    assert_eq!(outcome, ProfileOutcome::Failed);
    assert_eq!(
        ctx.control.sent,
        [
            "Profile Deletion Failed!",
            "Service response: HTTP Error: connection failed (-1)"
        ]
    );
}

#[test]
fn malformed_payload_makes_no_call() {
    for payload in ["bad", "1|Jane", ""] {
        let (mut ctx, _time) = make_ctx();

        let outcome = ctx.run_profile(ProfileAction::Enroll, payload);

        assert_eq!(outcome, ProfileOutcome::MalformedPayload, "{payload:?}");
        assert_eq!(ctx.bridge.calls(), 0);
        assert_eq!(ctx.control.sent, [MSG_INVALID_PROFILE]);
    }
}

#[test]
fn names_with_spaces_are_encoded() {
    let (mut ctx, _time) = make_ctx();
    ctx.bridge.respond("Profile enrolled");

    ctx.run_profile(ProfileAction::Enroll, "4|Mary Ann|O'Neil");

    assert!(ctx.bridge.url(0).ends_with("&id=4&first=Mary%20Ann&last=O%27Neil"));
}
