#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::thread;

use ebx_core::metrics::{Counter, CounterVec, Gauge, GaugeVec, Histogram, HistogramVec};

const LATENCY_BUCKETS: [f64; 6] = [0.1, 0.2, 0.5, 1.0, 2.0, 5.0];

#[test]
fn counter_counts_every_increment() {
    let c = Counter::new();
    for _ in 0..17 {
        c.inc();
    }
    c.add(3);
    assert_eq!(c.get(), 20);
}

#[test]
fn gauge_overwrites_and_starts_at_zero() {
    let g = Gauge::new();
    assert_eq!(g.get(), 0.0);
    g.set(120.0);
    g.set(51.0);
    assert_eq!(g.get(), 51.0);
}

#[test]
fn histogram_buckets_are_cumulative() {
    let h = Histogram::new(&LATENCY_BUCKETS).unwrap();
    for v in [0.05, 0.15, 0.25, 0.45, 1.5, 7.0] {
        h.observe(v);
    }
    let snap = h.snapshot();
    assert_eq!(snap.count, 6);
    assert_eq!(snap.bucket(0.1), Some(1));
    assert_eq!(snap.bucket(0.2), Some(2));
    assert_eq!(snap.bucket(0.5), Some(4));
    assert_eq!(snap.bucket(1.0), Some(4));
    assert_eq!(snap.bucket(2.0), Some(5));
    assert_eq!(snap.bucket(5.0), Some(5));
    assert!((snap.sum - 9.4).abs() < 1e-9);

    let counts: Vec<u64> = snap.buckets.iter().map(|(_, c)| *c).collect();
    assert!(counts.windows(2).all(|w| w[0] <= w[1]));
    assert!(counts.iter().all(|c| *c <= snap.count));
}

#[test]
fn histogram_bound_is_inclusive() {
    let h = Histogram::new(&LATENCY_BUCKETS).unwrap();
    h.observe(0.2);
    let snap = h.snapshot();
    assert_eq!(snap.bucket(0.1), Some(0));
    assert_eq!(snap.bucket(0.2), Some(1));
}

#[test]
fn histogram_drops_nan() {
    let h = Histogram::new(&LATENCY_BUCKETS).unwrap();
    h.observe(f64::NAN);
    assert_eq!(h.snapshot().count, 0);
}

#[test]
fn histogram_rejects_bad_bounds() {
    for bad in [&[][..], &[0.5, 0.1][..], &[0.1, 0.1][..], &[0.1, f64::INFINITY][..]] {
        let err = Histogram::new(bad).expect_err("must fail");
        assert_eq!(err.code().as_str(), "INVALID_METRIC");
    }
    assert!(HistogramVec::new(&[1.0, 0.5]).is_err());
}

#[test]
fn concurrent_observations_keep_inf_equal_to_count() {
    let h = Arc::new(Histogram::new(&LATENCY_BUCKETS).unwrap());
    let writers: Vec<_> = (0..4)
        .map(|i| {
            let h = Arc::clone(&h);
            thread::spawn(move || {
                for n in 0..1000 {
                    h.observe(((i * 1000 + n) % 600) as f64 / 100.0);
                }
            })
        })
        .collect();

    for _ in 0..200 {
        let snap = h.snapshot();
        let last = snap.buckets.last().map(|(_, c)| *c).unwrap();
        assert!(last <= snap.count);
    }
    for w in writers {
        w.join().unwrap();
    }
    assert_eq!(h.snapshot().count, 4000);
}

#[test]
fn vec_series_are_keyed_by_sorted_labels() {
    let c = CounterVec::default();
    c.inc(&[("transaction_type", "transfer"), ("status", "success")]);
    c.inc(&[("status", "success"), ("transaction_type", "transfer")]);
    c.inc(&[("status", "failed"), ("transaction_type", "payment")]);
    assert_eq!(c.get(&[("status", "success"), ("transaction_type", "transfer")]), Some(2));
    assert_eq!(c.get(&[("status", "pending"), ("transaction_type", "transfer")]), None);
    assert_eq!(c.get(&[("transaction_type", "payment"), ("status", "failed")]), Some(1));

    let g = GaugeVec::default();
    g.set(&[("currency", "EUR")], 1000.5);
    g.set(&[("currency", "EUR")], 2000.0);
    assert_eq!(g.get(&[("currency", "EUR")]), Some(2000.0));

    let h = HistogramVec::new(&LATENCY_BUCKETS).unwrap();
    h.observe(&[("endpoint", "/api/login")], 0.3);
    let snap = h.snapshot(&[("endpoint", "/api/login")]).unwrap();
    assert_eq!(snap.count, 1);
    assert_eq!(snap.bucket(0.5), Some(1));
}
