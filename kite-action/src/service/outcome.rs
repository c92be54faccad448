//! Outcome classification

use kite_core::domain::build::{Build, BuildState};
use tracing::warn;

use crate::error::ActionError;

/// Symbol shown next to a build state in progress lines
pub fn state_symbol(state: &BuildState) -> &'static str {
    match state {
        BuildState::Scheduled => "📅",
        BuildState::Running => "🏃",
        BuildState::Passed => "✅",
        _ => "❌",
    }
}

/// Decides whether the run succeeded
///
/// `scheduled`, `running` and `passed` are accepted; anything else is a
/// failure. `waited` is true when the build was polled to completion, in which
/// case an in-progress state means the API contradicted itself.
pub fn check_outcome(build: &Build, waited: bool) -> Result<(), ActionError> {
    if !build.state.is_accepted() {
        return Err(ActionError::BuildFailed(build.state.clone()));
    }

    if waited && build.state.is_in_progress() {
        warn!(
            "Build #{} reported finished_at={} but is still {}; treating as success",
            build.number,
            build.finished_at().unwrap_or("<none>"),
            build.state
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::build;

    #[test]
    fn test_symbols() {
        assert_eq!(state_symbol(&BuildState::Scheduled), "📅");
        assert_eq!(state_symbol(&BuildState::Running), "🏃");
        assert_eq!(state_symbol(&BuildState::Passed), "✅");
        assert_eq!(state_symbol(&BuildState::Failed), "❌");
        assert_eq!(state_symbol(&BuildState::from("mystery")), "❌");
    }

    #[test]
    fn test_accepted_outcomes() {
        assert!(check_outcome(&build("scheduled", None), false).is_ok());
        assert!(check_outcome(&build("running", None), false).is_ok());
        assert!(check_outcome(&build("passed", Some("2024-01-01T00:00:00Z")), true).is_ok());
    }

    #[test]
    fn test_in_progress_after_wait_is_still_accepted() {
        assert!(check_outcome(&build("running", Some("2024-01-01T00:00:00Z")), true).is_ok());
    }

    #[test]
    fn test_failed_outcomes() {
        for state in ["failed", "canceled", "blocked", "not_run", "started"] {
            let err = check_outcome(&build(state, Some("2024-01-01T00:00:00Z")), true).unwrap_err();
            match err {
                ActionError::BuildFailed(s) => assert_eq!(s.as_str(), state),
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }
}
