//! The recurring schedule: tick, draw, cycle, log, repeat.
//!
//! Scheduling is deliberately dumb. One thread, one blocking sleep
//! between slots, one cycle at a time. A failed cycle is logged with a
//! variant-specific message and the loop carries on; nothing short of an
//! external signal stops the process.

use std::path::Path;
use std::thread;
use std::time::Duration;

use rand::Rng;
use tracing::{error, info};

use crate::cycle::{CycleError, CycleOptions, CycleReport, TEST_CAPTION, run_cycle};
use crate::publish::{Credentials, PublishError, Publisher};

/// Decides when the next slot runs.
///
/// An explicit seam so the loop does not hardwire `thread::sleep` and
/// callers can drive slots without waiting.
pub trait Ticker {
    /// Block until the next slot should run.
    fn wait(&mut self);
}

/// Production ticker: a plain fixed-interval sleep.
pub struct SleepTicker {
    interval: Duration,
}

impl SleepTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Ticker firing every `minutes` minutes.
    pub fn minutes(minutes: u64) -> Self {
        Self::new(Duration::from_secs(minutes * 60))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Ticker for SleepTicker {
    fn wait(&mut self) {
        thread::sleep(self.interval);
    }
}

/// Whether a rotation draw lands on the update slot.
fn draw_is_due(draw: u32) -> bool {
    draw == 1
}

/// Fresh 1-in-10 draw deciding whether this slot also rotates the
/// profile picture. Sampled anew every slot; nothing is remembered
/// between slots.
pub fn rotation_due(rng: &mut impl Rng) -> bool {
    draw_is_due(rng.gen_range(1..=10))
}

/// Run one schedule slot: rotation draw, one cycle, outcome logged.
///
/// Returns the cycle result for callers that want it; the forever loop
/// ignores it.
pub fn run_slot(
    publisher: &dyn Publisher,
    creds: &Credentials,
    opts: &CycleOptions<'_>,
    rng: &mut impl Rng,
) -> Result<CycleReport, CycleError> {
    let rotate = rotation_due(rng);
    match run_cycle(publisher, creds, opts, rotate, rng) {
        Ok(report) => {
            info!(
                post_id = %report.post_id,
                profile_updated = report.profile_updated(),
                "cycle complete"
            );
            Ok(report)
        }
        Err(err) => {
            log_cycle_failure(&err);
            Err(err)
        }
    }
}

fn log_cycle_failure(err: &CycleError) {
    match err {
        CycleError::Publish(PublishError::Auth { username, .. }) => {
            error!(username = %username, error = %err, "sign-in rejected; check credentials");
        }
        CycleError::Publish(PublishError::Transport(_)) => {
            error!(error = %err, "could not reach the server");
        }
        CycleError::Publish(_) => {
            error!(error = %err, "server refused the upload");
        }
        CycleError::Encode(_) | CycleError::Io(_) => {
            error!(error = %err, "failed to produce the artifact");
        }
    }
}

/// Everything the schedule needs besides the publisher and credentials.
pub struct ScheduleOptions<'a> {
    pub work_dir: &'a Path,
    pub caption: &'a str,
    pub interval_minutes: u64,
}

/// Run the bot: one startup test cycle, then one slot per tick, forever.
pub fn run_forever(
    publisher: &dyn Publisher,
    creds: &Credentials,
    opts: &ScheduleOptions<'_>,
    ticker: &mut dyn Ticker,
    rng: &mut impl Rng,
) -> ! {
    info!("posting a startup test to verify the account");
    let test_opts = CycleOptions {
        work_dir: opts.work_dir,
        caption: TEST_CAPTION,
        test: true,
    };
    match run_cycle(publisher, creds, &test_opts, false, rng) {
        Ok(report) => info!(post_id = %report.post_id, "test post succeeded"),
        Err(err) => log_cycle_failure(&err),
    }

    info!(
        interval_minutes = opts.interval_minutes,
        "schedule started; first scheduled post after one interval"
    );
    let slot_opts = CycleOptions {
        work_dir: opts.work_dir,
        caption: opts.caption,
        test: false,
    };
    loop {
        ticker.wait();
        let _ = run_slot(publisher, creds, &slot_opts, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::publish::tests::{MockPublisher, RecordedCall};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    // ===== rotation draw =====

    #[test]
    fn only_the_first_draw_value_is_due() {
        for draw in 1..=10 {
            assert_eq!(draw_is_due(draw), draw == 1);
        }
    }

    #[test]
    fn rotation_fires_about_one_slot_in_ten() {
        let mut rng = StdRng::seed_from_u64(17);
        let due = (0..2000).filter(|_| rotation_due(&mut rng)).count();
        assert!((100..=320).contains(&due), "unexpected rotation count {due}");
    }

    #[test]
    fn rotation_draws_are_deterministic_for_a_seed() {
        let mut a = StdRng::seed_from_u64(5);
        let mut b = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            assert_eq!(rotation_due(&mut a), rotation_due(&mut b));
        }
    }

    // ===== ticker =====

    #[test]
    fn minutes_constructor_converts_to_seconds() {
        assert_eq!(SleepTicker::minutes(5).interval(), Duration::from_secs(300));
        assert_eq!(SleepTicker::minutes(0).interval(), Duration::ZERO);
    }

    #[test]
    fn sleep_ticker_returns_after_its_interval() {
        let mut ticker = SleepTicker::new(Duration::from_millis(1));
        ticker.wait();
    }

    // ===== slots =====

    #[test]
    fn slot_runs_a_full_cycle() {
        let tmp = tempfile::TempDir::new().unwrap();
        let publisher = MockPublisher::new();
        let creds = Credentials {
            username: "painter".into(),
            password: "secret".into(),
        };
        let opts = CycleOptions {
            work_dir: tmp.path(),
            caption: "caption",
            test: false,
        };

        let report = run_slot(&publisher, &creds, &opts, &mut StdRng::seed_from_u64(8)).unwrap();
        assert!(report.artifact.starts_with("art_"));

        let calls = publisher.get_calls();
        assert!(matches!(calls[0], RecordedCall::Authenticate { .. }));
        assert!(matches!(calls[1], RecordedCall::UploadPhoto { .. }));
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn failed_slot_reports_the_error_and_leaves_no_files() {
        let tmp = tempfile::TempDir::new().unwrap();
        let publisher = MockPublisher::failing_auth();
        let opts = CycleOptions {
            work_dir: tmp.path(),
            caption: "caption",
            test: false,
        };

        let result = run_slot(
            &publisher,
            &Credentials::default(),
            &opts,
            &mut StdRng::seed_from_u64(9),
        );

        assert!(matches!(
            result,
            Err(CycleError::Publish(PublishError::Auth { .. }))
        ));
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }
}
