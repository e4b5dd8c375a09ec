//! End-to-end simulation properties.
//!
//! These tests drive whole simulations through the orchestrator and check
//! the capacity, uniqueness, admission, cancellation, and accounting
//! guarantees of the booking core.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use boxoffice_core::testing::{fixtures, StalledLatency};
use boxoffice_core::{ScreeningTally, UniformLatency};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_oversubscribed_screening_fills_exactly_to_capacity() {
    let orchestrator = fixtures::instant_orchestrator(vec![("Inception", 150)], 100);
    let report = orchestrator.run_simulation(210).await.unwrap();

    let inception = report.screenings["Inception"];
    assert_eq!(inception.booked, 150);
    assert_eq!(inception.rejected, 60);
    assert_eq!(inception.canceled, 0);

    // Every seat 1..=150 was handed out exactly once.
    let snapshot = orchestrator
        .service("Inception")
        .unwrap()
        .ledger_snapshot()
        .await;
    let seats: BTreeSet<u32> = snapshot.iter().filter_map(|r| r.seat).collect();
    assert_eq!(seats, (1..=150).collect::<BTreeSet<u32>>());
    assert_eq!(
        snapshot.iter().filter(|r| r.is_booked()).count(),
        150,
        "no seat appears in two successful records"
    );
}

#[tokio::test]
async fn test_undersubscribed_screening_rejects_nobody() {
    let orchestrator = fixtures::instant_orchestrator(vec![("Dunkirk", 50)], 16);
    let report = orchestrator.run_simulation(10).await.unwrap();

    let dunkirk = report.screenings["Dunkirk"];
    assert_eq!(dunkirk.booked, 10);
    assert_eq!(dunkirk.rejected, 0);
    assert_eq!(
        orchestrator
            .service("Dunkirk")
            .unwrap()
            .seats_remaining()
            .await,
        40
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_tenet_scenario_accounts_for_every_patron() {
    let orchestrator = fixtures::instant_orchestrator(vec![("Tenet", 20)], 100);
    let report = orchestrator.run_simulation(100).await.unwrap();

    let tenet = report.screenings["Tenet"];
    assert_eq!(tenet.booked, 20);
    assert_eq!(tenet.attempts(), 100);

    let summary = orchestrator.summarize().await;
    assert_eq!(summary["Tenet"].booked + summary["Tenet"].rejected, 100);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_multiple_screenings_share_one_gate() {
    let orchestrator = fixtures::instant_orchestrator(
        vec![
            ("Oppenheimer", 200),
            ("Inception", 150),
            ("Interstellar", 180),
        ],
        8,
    );
    let report = orchestrator.run_simulation(210).await.unwrap();

    assert_eq!(report.screenings["Oppenheimer"].booked, 200);
    assert_eq!(report.screenings["Inception"].booked, 150);
    assert_eq!(report.screenings["Interstellar"].booked, 180);
    assert_eq!(report.total_attempts(), 630);
    assert!(orchestrator.gate().stats().peak_in_flight <= 8);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_gate_bound_holds_under_real_latency() {
    let latency = Arc::new(UniformLatency::new(1, 5));
    let orchestrator = fixtures::orchestrator_with_latency(vec![("Tenet", 30)], 10, latency);
    let report = orchestrator.run_simulation(80).await.unwrap();

    let stats = orchestrator.gate().stats();
    assert!(
        stats.peak_in_flight <= 10,
        "peak {} exceeded the gate capacity",
        stats.peak_in_flight
    );
    assert_eq!(stats.in_flight, 0, "every slot was released");
    assert_eq!(report.total_attempts(), 80);
}

#[tokio::test]
async fn test_summarize_is_idempotent() {
    let orchestrator = fixtures::instant_orchestrator(vec![("Inception", 5)], 4);
    orchestrator.run_simulation(8).await.unwrap();

    let first = orchestrator.summarize().await;
    let second = orchestrator.summarize().await;
    assert_eq!(first, second);
    assert_eq!(first["Inception"].booked, 5);
    assert_eq!(first["Inception"].rejected, 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_request_stop_cancels_stalled_attempts() {
    let latency = Arc::new(StalledLatency::new());
    let orchestrator = Arc::new(fixtures::orchestrator_with_latency(
        vec![("Tenet", 20)],
        100,
        Arc::clone(&latency) as Arc<dyn boxoffice_core::LatencySimulator>,
    ));

    let runner = {
        let orchestrator = Arc::clone(&orchestrator);
        tokio::spawn(async move { orchestrator.run_simulation(50).await })
    };

    // Wait until every attempt is parked inside the simulated delay.
    while latency.waiting() < 50 {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    orchestrator.request_stop();
    let report = runner.await.unwrap().unwrap();

    let tenet = report.screenings["Tenet"];
    assert_eq!(tenet.canceled, 50);
    assert_eq!(tenet.booked, 0);
    assert_eq!(tenet.rejected, 0);

    // Canceled attempts never reach the ledger.
    assert!(orchestrator
        .service("Tenet")
        .unwrap()
        .ledger_snapshot()
        .await
        .is_empty());
    let summary = orchestrator.summarize().await;
    assert_eq!(
        summary["Tenet"],
        ScreeningTally {
            booked: 0,
            rejected: 0
        }
    );
}

#[tokio::test]
async fn test_request_stop_is_idempotent() {
    let orchestrator = fixtures::instant_orchestrator(vec![("Inception", 2)], 4);
    orchestrator.request_stop();
    orchestrator.request_stop();

    // Every attempt scheduled after the stop unwinds as canceled.
    let report = orchestrator.run_simulation(4).await.unwrap();
    assert_eq!(report.screenings["Inception"].canceled, 4);
    assert_eq!(report.screenings["Inception"].booked, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_stop_mid_run_keeps_committed_bookings() {
    let latency = Arc::new(StalledLatency::new());
    let orchestrator = Arc::new(fixtures::orchestrator_with_latency(
        vec![("Tenet", 20)],
        4,
        Arc::clone(&latency) as Arc<dyn boxoffice_core::LatencySimulator>,
    ));

    let runner = {
        let orchestrator = Arc::clone(&orchestrator);
        tokio::spawn(async move { orchestrator.run_simulation(10).await })
    };

    // Let the first admitted wave through the delay, then stop.
    while latency.waiting() < 4 {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    latency.release_all();
    tokio::time::sleep(Duration::from_millis(50)).await;
    orchestrator.request_stop();

    let report = runner.await.unwrap().unwrap();
    let tenet = report.screenings["Tenet"];

    // Whatever committed stays committed; the rest unwound as canceled,
    // and nobody went missing.
    assert_eq!(tenet.attempts(), 10);
    assert!(tenet.booked >= 1, "the released wave committed");
    assert!(tenet.booked <= 4, "only the admitted wave could commit");
    assert_eq!(tenet.rejected, 0);
    assert_eq!(tenet.booked + tenet.canceled, 10);

    let summary = orchestrator.summarize().await;
    assert_eq!(summary["Tenet"].booked, tenet.booked);
}
