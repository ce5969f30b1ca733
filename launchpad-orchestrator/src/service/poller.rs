//! Deploy Build Poller
//!
//! Bounded, fixed-interval polling of a remote build until it reports an
//! outcome. A build moves `Submitted -> Polling -> {Succeeded, TimedOut}` and
//! never back.

use launchpad_core::domain::build::Build;
use std::time::Duration;
use tracing::{debug, info};

use crate::repository::BuildRepository;
use crate::service::error::DeployError;

/// Polling budget: worst-case wait is `interval * (max_attempts - 1)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

/// Poll `build_num` until it carries an outcome
///
/// The first check happens immediately. Returns the finished build, or
/// `DeployError::Timeout` after `max_attempts` checks.
pub async fn wait_for_outcome(
    builds: &dyn BuildRepository,
    reponame: &str,
    build_num: u64,
    policy: PollPolicy,
) -> Result<Build, DeployError> {
    for attempt in 1..=policy.max_attempts {
        let build = builds.get_build(reponame, build_num).await?;

        if let Some(outcome) = build.outcome {
            info!(
                "Build {} of {} finished with {:?} after {} check(s)",
                build_num, reponame, outcome, attempt
            );
            return Ok(build);
        }

        debug!(
            "Build {} of {} still running ({}/{})",
            build_num, reponame, attempt, policy.max_attempts
        );

        if attempt < policy.max_attempts {
            tokio::time::sleep(policy.interval).await;
        }
    }

    Err(DeployError::Timeout { build_num })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fake::{FakeBuilds, build};
    use launchpad_core::domain::build::Outcome;

    fn policy(max_attempts: u32) -> PollPolicy {
        PollPolicy {
            interval: Duration::from_secs(10),
            max_attempts,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_finishes_on_kth_attempt() {
        let builds = FakeBuilds::new().with_snapshots(
            42,
            vec![
                build(42, None, None, None),
                build(42, None, None, None),
                build(42, None, Some(Outcome::Success), None),
            ],
        );

        let started = tokio::time::Instant::now();
        let finished = wait_for_outcome(&builds, "saturn-api", 42, policy(60))
            .await
            .unwrap();

        assert_eq!(finished.outcome, Some(Outcome::Success));
        assert_eq!(builds.fetch_count(42), 3);
        assert_eq!(started.elapsed(), Duration::from_secs(20));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_outcome_still_stops_polling() {
        let builds = FakeBuilds::new().with_snapshots(
            9,
            vec![build(9, None, None, None), build(9, None, Some(Outcome::Failed), None)],
        );

        let finished = wait_for_outcome(&builds, "saturn-api", 9, policy(5)).await.unwrap();

        assert_eq!(finished.outcome, Some(Outcome::Failed));
        assert_eq!(builds.fetch_count(9), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_after_budget() {
        let builds = FakeBuilds::new().with_build(build(42, None, None, None));

        let started = tokio::time::Instant::now();
        let err = wait_for_outcome(&builds, "saturn-api", 42, policy(5))
            .await
            .unwrap_err();

        assert!(matches!(err, DeployError::Timeout { build_num: 42 }));
        assert_eq!(builds.fetch_count(42), 5);
        // No sleep after the final check
        assert_eq!(started.elapsed(), Duration::from_secs(40));
    }

    #[tokio::test(start_paused = true)]
    async fn test_outcome_on_last_attempt() {
        let builds = FakeBuilds::new().with_snapshots(
            1,
            vec![build(1, None, None, None), build(1, None, Some(Outcome::Success), None)],
        );

        let finished = wait_for_outcome(&builds, "saturn-ui", 1, policy(2)).await;

        assert!(finished.is_ok());
        assert_eq!(builds.fetch_count(1), 2);
    }

    #[tokio::test]
    async fn test_fetch_error_propagates() {
        let builds = FakeBuilds::new();

        let err = wait_for_outcome(&builds, "saturn-ui", 404, policy(3))
            .await
            .unwrap_err();

        assert!(matches!(err, DeployError::Client(_)));
    }
}
