mod setup;

use std::{sync::Arc, time::Duration};

use setup::{LegScript, ScriptedProvider, geometry, place};
use waypoint_client::ClientConfig;
use waypoint_core::{Coordinate, Place};
use waypoint_router::{
    ComposeError, LegFailureKind, LegProvider, OrchestratorParams, SegmentOrchestrator,
    WaypointRole,
};

// A power of two fraction keeps midpoints exact.
const S: f64 = 1.0 / 4096.0;

const ORIGIN: Coordinate = Coordinate::new(0.0, 0.0);

fn stop_a() -> Place {
    place("a", 2.0 * S, 0.0)
}

fn stop_b() -> Place {
    place("b", 4.0 * S, 0.0)
}

fn destination() -> Place {
    place("d", 6.0 * S, 0.0)
}

fn leg_oa(delay_ms: u64) -> LegScript {
    LegScript::route(&[(0.0, 0.0), (S, 0.0), (2.0 * S, 0.0)], delay_ms)
}

fn leg_ab(delay_ms: u64) -> LegScript {
    LegScript::route(&[(2.0 * S, 0.0), (3.0 * S, 0.0), (4.0 * S, 0.0)], delay_ms)
}

fn leg_bd(delay_ms: u64) -> LegScript {
    LegScript::route(&[(4.0 * S, 0.0), (5.0 * S, 0.0), (6.0 * S, 0.0)], delay_ms)
}

fn full_route() -> waypoint_core::RouteGeometry {
    geometry(&[
        (0.0, 0.0),
        (S, 0.0),
        (2.0 * S, 0.0),
        (3.0 * S, 0.0),
        (4.0 * S, 0.0),
        (5.0 * S, 0.0),
        (6.0 * S, 0.0),
    ])
}

fn provider(oa: LegScript, ab: LegScript, bd: LegScript) -> Arc<ScriptedProvider> {
    Arc::new(
        ScriptedProvider::new()
            .script(ORIGIN, stop_a().coordinate(), oa)
            .script(stop_a().coordinate(), stop_b().coordinate(), ab)
            .script(stop_b().coordinate(), destination().coordinate(), bd),
    )
}

#[tokio::test]
async fn test_legs_are_merged_in_itinerary_order() {
    // The last leg answers first, the first leg answers last.
    let provider = provider(leg_oa(80), leg_ab(40), leg_bd(5));
    let orchestrator = SegmentOrchestrator::new(Arc::clone(&provider));

    let route = orchestrator
        .compose_route(ORIGIN, &[stop_a(), stop_b()], &destination())
        .await
        .unwrap();

    assert_eq!(
        *provider.completions.lock(),
        vec![
            (stop_b().coordinate(), destination().coordinate()),
            (stop_a().coordinate(), stop_b().coordinate()),
            (ORIGIN, stop_a().coordinate()),
        ]
    );
    assert_eq!(route.geometry, full_route());
    assert!(route.failed_legs.is_empty());
}

#[tokio::test]
async fn test_one_fetch_per_leg() {
    let provider = provider(leg_oa(0), leg_ab(0), leg_bd(0));
    let orchestrator = SegmentOrchestrator::new(Arc::clone(&provider));

    orchestrator
        .compose_route(ORIGIN, &[stop_a(), stop_b()], &destination())
        .await
        .unwrap();

    let mut calls = provider.calls.lock().clone();
    calls.sort_by(|a, b| a.0.lat.total_cmp(&b.0.lat));

    assert_eq!(
        calls,
        vec![
            (ORIGIN, stop_a().coordinate()),
            (stop_a().coordinate(), stop_b().coordinate()),
            (stop_b().coordinate(), destination().coordinate()),
        ]
    );
}

#[tokio::test]
async fn test_failed_leg_degrades_route() {
    let provider = provider(LegScript::fail(10), leg_ab(0), leg_bd(5));
    let orchestrator = SegmentOrchestrator::new(Arc::clone(&provider));

    let route = orchestrator
        .compose_route(ORIGIN, &[stop_a(), stop_b()], &destination())
        .await
        .unwrap();

    assert_eq!(
        route.geometry,
        geometry(&[
            (2.0 * S, 0.0),
            (3.0 * S, 0.0),
            (4.0 * S, 0.0),
            (5.0 * S, 0.0),
            (6.0 * S, 0.0),
        ])
    );
    assert_eq!(route.failed_legs.len(), 1);
    assert_eq!(route.failed_legs[0].index, 0);
    assert_eq!(route.failed_legs[0].kind, LegFailureKind::Network);
    assert_eq!(route.waypoints.len(), 4);
}

#[tokio::test]
async fn test_all_legs_failing_is_unavailable() {
    let provider = provider(LegScript::fail(5), LegScript::fail(0), LegScript::fail(10));
    let orchestrator = SegmentOrchestrator::new(Arc::clone(&provider));

    let result = orchestrator
        .compose_route(ORIGIN, &[stop_a(), stop_b()], &destination())
        .await;

    match result {
        Err(ComposeError::RouteUnavailable { failures }) => {
            let indices: Vec<usize> = failures.iter().map(|failure| failure.index).collect();
            assert_eq!(indices, vec![0, 1, 2]);
        }
        other => panic!("expected RouteUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn test_slow_leg_times_out() {
    let provider = provider(leg_oa(0), leg_ab(2_000), leg_bd(0));
    let orchestrator = SegmentOrchestrator::with_params(
        Arc::clone(&provider),
        OrchestratorParams {
            leg_timeout: Duration::from_millis(50),
        },
    );

    let route = orchestrator
        .compose_route(ORIGIN, &[stop_a(), stop_b()], &destination())
        .await
        .unwrap();

    assert_eq!(route.failed_legs.len(), 1);
    assert_eq!(route.failed_legs[0].index, 1);
    assert_eq!(route.failed_legs[0].kind, LegFailureKind::Timeout);

    // The gap left by the missing leg is bridged by its midpoint.
    assert_eq!(route.geometry, full_route());
}

#[tokio::test]
async fn test_direct_route_matches_single_fetch() {
    let direct = LegScript::route(&[(0.0, 0.0), (0.0, 0.0), (0.01, 0.0), (0.02, 0.01)], 0);
    let provider = Arc::new(
        ScriptedProvider::new().script(ORIGIN, destination().coordinate(), direct),
    );
    let orchestrator = SegmentOrchestrator::new(Arc::clone(&provider));

    let route = orchestrator
        .compose_route(ORIGIN, &[], &destination())
        .await
        .unwrap();
    assert_eq!(provider.call_count(), 1);

    let fetched = provider
        .fetch_leg(ORIGIN, destination().coordinate())
        .await
        .unwrap();

    assert_eq!(route.geometry, fetched);
    assert_eq!(route.waypoints.len(), 2);
    assert_eq!(route.waypoints[0].role, WaypointRole::Start);
    assert_eq!(route.waypoints[1].role, WaypointRole::Destination);
}

#[tokio::test]
async fn test_direct_route_failure_is_unavailable() {
    let provider = Arc::new(
        ScriptedProvider::new().script(ORIGIN, destination().coordinate(), LegScript::fail(0)),
    );
    let orchestrator = SegmentOrchestrator::new(provider);

    let result = orchestrator.compose_route(ORIGIN, &[], &destination()).await;

    match result {
        Err(ComposeError::RouteUnavailable { failures }) => assert_eq!(failures.len(), 1),
        other => panic!("expected RouteUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_leg_geometries_are_unavailable() {
    let provider = provider(
        LegScript::route(&[], 0),
        LegScript::route(&[], 0),
        LegScript::route(&[], 0),
    );
    let orchestrator = SegmentOrchestrator::new(provider);

    let result = orchestrator
        .compose_route(ORIGIN, &[stop_a(), stop_b()], &destination())
        .await;

    match result {
        Err(ComposeError::RouteUnavailable { failures }) => {
            let reasons: Vec<(usize, LegFailureKind)> = failures
                .iter()
                .map(|failure| (failure.index, failure.kind))
                .collect();
            assert_eq!(
                reasons,
                vec![
                    (0, LegFailureKind::Empty),
                    (1, LegFailureKind::Empty),
                    (2, LegFailureKind::Empty),
                ]
            );
        }
        other => panic!("expected RouteUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_leg_is_reported() {
    let provider = provider(leg_oa(0), LegScript::route(&[], 0), leg_bd(0));
    let orchestrator = SegmentOrchestrator::new(provider);

    let route = orchestrator
        .compose_route(ORIGIN, &[stop_a(), stop_b()], &destination())
        .await
        .unwrap();

    assert_eq!(route.failed_legs.len(), 1);
    assert_eq!(route.failed_legs[0].index, 1);
    assert_eq!(route.failed_legs[0].kind, LegFailureKind::Empty);
    assert_eq!(route.geometry, full_route());
}

#[tokio::test]
async fn test_direct_empty_route_is_reported() {
    let provider = Arc::new(
        ScriptedProvider::new().script(
            ORIGIN,
            destination().coordinate(),
            LegScript::route(&[], 0),
        ),
    );
    let orchestrator = SegmentOrchestrator::new(provider);

    let result = orchestrator.compose_route(ORIGIN, &[], &destination()).await;

    match result {
        Err(ComposeError::RouteUnavailable { failures }) => {
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].kind, LegFailureKind::Empty);
        }
        other => panic!("expected RouteUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn test_configured_leg_timeout_is_applied() {
    let mut config = ClientConfig::new("token");
    config.leg_timeout = Duration::from_millis(50);

    let provider = provider(leg_oa(0), leg_ab(2_000), leg_bd(0));
    let orchestrator = SegmentOrchestrator::from_config(Arc::clone(&provider), &config);
    assert_eq!(orchestrator.params().leg_timeout, Duration::from_millis(50));

    let route = orchestrator
        .compose_route(ORIGIN, &[stop_a(), stop_b()], &destination())
        .await
        .unwrap();

    assert_eq!(route.failed_legs.len(), 1);
    assert_eq!(route.failed_legs[0].index, 1);
    assert_eq!(route.failed_legs[0].kind, LegFailureKind::Timeout);
}
