#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use ebx_exporter::config::Profile;
use ebx_exporter::obs::metrics::ExporterMetrics;
use ebx_exporter::sim::{BusinessSample, RandomSource, Simulator, TelemetrySource};

struct FixedSource {
    sessions: u64,
    delay: Duration,
}

impl TelemetrySource for FixedSource {
    fn active_sessions(&mut self) -> u64 {
        self.sessions
    }

    fn request_delay(&mut self) -> Duration {
        self.delay
    }

    fn business_sample(&mut self) -> BusinessSample {
        BusinessSample {
            transaction_type: "transfer",
            status: "success",
            balances: vec![("EUR", 250_000.0), ("USD", 1_000_000.0), ("GBP", 120_000.5)],
            endpoint: "/api/transfer",
            endpoint_duration: 0.3,
            login_status: "failed",
            transfer_amount: Some(75.0),
            api_error: Some("timeout"),
            database_connections: 42,
        }
    }
}

fn fixed(
    profile: Profile,
    sessions: u64,
    delay_ms: u64,
) -> (Arc<ExporterMetrics>, Simulator<FixedSource>) {
    let metrics = Arc::new(ExporterMetrics::new("ebanking", profile).unwrap());
    let source = FixedSource { sessions, delay: Duration::from_millis(delay_ms) };
    let sim = Simulator::new(Arc::clone(&metrics), source, Duration::from_secs(1));
    (metrics, sim)
}

#[tokio::test(start_paused = true)]
async fn one_tick_lands_in_half_second_bucket() {
    let (metrics, mut sim) = fixed(Profile::Basic, 120, 250);
    sim.tick().await;

    assert_eq!(metrics.transactions(), 1);
    assert_eq!(metrics.active_sessions(), 120.0);

    let hist = metrics.request_duration();
    assert_eq!(hist.count, 1);
    assert_eq!(hist.bucket(0.1), Some(0));
    assert_eq!(hist.bucket(0.2), Some(0));
    assert_eq!(hist.bucket(0.5), Some(1));
    assert!(hist.sum >= 0.25 && hist.sum < 0.5);

    let text = metrics.render();
    assert!(text.contains("ebanking_transactions_processed_total 1\n"));
    assert!(text.contains("ebanking_active_sessions 120\n"));
    assert!(text.contains("ebanking_request_duration_seconds_bucket{le=\"0.2\"} 0\n"));
    assert!(text.contains("ebanking_request_duration_seconds_bucket{le=\"0.5\"} 1\n"));
    assert!(text.contains("ebanking_request_duration_seconds_bucket{le=\"+Inf\"} 1\n"));
}

#[tokio::test(start_paused = true)]
async fn counter_equals_completed_ticks() {
    let (metrics, mut sim) = fixed(Profile::Basic, 60, 100);
    for n in 1..=25u64 {
        sim.tick().await;
        assert_eq!(metrics.transactions(), n);
        assert_eq!(metrics.request_duration().count, n);
    }
    assert_eq!(sim.ticks(), 25);
}

#[tokio::test(start_paused = true)]
async fn random_ticks_keep_histogram_invariants() {
    let metrics = Arc::new(ExporterMetrics::new("ebanking", Profile::Basic).unwrap());
    let source = RandomSource::new(StdRng::seed_from_u64(11), 50..200, 100..500);
    let mut sim = Simulator::new(Arc::clone(&metrics), source, Duration::from_secs(1));

    for _ in 0..40 {
        sim.tick().await;
        let sessions = metrics.active_sessions();
        assert!((50.0..=199.0).contains(&sessions), "sessions {sessions}");
    }

    let hist = metrics.request_duration();
    assert_eq!(hist.count, 40);
    let counts: Vec<u64> = hist.buckets.iter().map(|(_, c)| *c).collect();
    assert!(counts.windows(2).all(|w| w[0] <= w[1]));
    // every delay is under 0.5s
    assert_eq!(hist.bucket(0.5), Some(40));
}

#[tokio::test(start_paused = true)]
async fn spawned_loop_pauses_between_ticks() {
    let (metrics, sim) = fixed(Profile::Basic, 120, 250);
    let handle = sim.spawn();

    // ticks finish at 0.25s, 1.5s, 2.75s; the fourth starts at 3.75s
    tokio::time::sleep(Duration::from_millis(3000)).await;
    assert_eq!(metrics.transactions(), 3);
    assert_eq!(metrics.request_duration().count, 3);

    handle.abort();
}

#[tokio::test(start_paused = true)]
async fn extended_tick_records_business_sample() {
    let (metrics, mut sim) = fixed(Profile::Extended, 80, 150);
    sim.tick().await;

    let b = metrics.business().expect("extended profile");
    assert_eq!(
        b.transactions_by_type.get(&[("transaction_type", "transfer"), ("status", "success")]),
        Some(1)
    );
    assert_eq!(b.account_balance.get(&[("currency", "GBP")]), Some(120_000.5));
    assert_eq!(b.login_attempts.get(&[("status", "failed")]), Some(1));
    assert_eq!(b.api_errors.get(&[("error_type", "timeout")]), Some(1));
    assert_eq!(b.database_connections.get(), 42.0);
    assert_eq!(b.transfer_amount.snapshot().bucket(100.0), Some(1));
    assert_eq!(b.transfer_amount.snapshot().bucket(50.0), Some(0));
    let ep = b.endpoint_duration.snapshot(&[("endpoint", "/api/transfer")]).unwrap();
    assert_eq!(ep.bucket(0.5), Some(1));

    let text = metrics.render();
    assert!(text.contains(
        "ebanking_transactions_by_type_total{status=\"success\",transaction_type=\"transfer\"} 1\n"
    ));
    assert!(text.contains("ebanking_database_connections 42\n"));
}

#[tokio::test(start_paused = true)]
async fn basic_profile_ignores_business_sample() {
    let (metrics, mut sim) = fixed(Profile::Basic, 80, 150);
    sim.tick().await;
    assert!(metrics.business().is_none());
    assert!(!metrics.render().contains("login_attempts"));
}

#[test]
fn random_source_stays_in_range() {
    let mut source = RandomSource::new(StdRng::seed_from_u64(3), 50..200, 100..500);
    for _ in 0..5000 {
        let s = source.active_sessions();
        assert!((50..=199).contains(&s));
        let d = source.request_delay();
        assert!(d >= Duration::from_millis(100) && d < Duration::from_millis(500));
    }
}

#[test]
fn random_business_sample_is_plausible() {
    let mut source = RandomSource::new(StdRng::seed_from_u64(5), 50..200, 100..500);
    let mut errors = 0;
    for _ in 0..2000 {
        let s = source.business_sample();
        assert_eq!(s.balances.len(), 3);
        assert!(s.balances.iter().all(|(_, b)| (100_000.0..5_000_000.0).contains(b)));
        assert!((0.05..2.0).contains(&s.endpoint_duration));
        assert!((10..=50).contains(&s.database_connections));
        assert_eq!(s.transfer_amount.is_some(), s.transaction_type == "transfer");
        if s.api_error.is_some() {
            errors += 1;
        }
    }
    // ~5% of 2000
    assert!(errors > 20 && errors < 250, "errors {errors}");
}
