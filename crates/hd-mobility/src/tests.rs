//! Unit tests for hd-mobility.

use hd_behavior::{MoveOutcome, NavigationService};
use hd_core::{AgentId, EntityId, Point3, RequestId};

use crate::{MoveGoal, NavBounds, NavConfig, NavigationEngine};

fn engine() -> NavigationEngine {
    let mut e = NavigationEngine::new(NavConfig::default());
    e.place(AgentId(0), Point3::ORIGIN);
    e
}

fn nowhere(_: EntityId) -> Option<Point3> {
    None
}

// ── Point goals ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod point_goals {
    use super::*;

    #[test]
    fn walks_then_succeeds() {
        let mut e = engine();
        let id = e.request_move(AgentId(0), MoveGoal::Point(Point3::new(100.0, 0.0, 0.0)), 50.0).unwrap();

        assert!(e.advance(1.0, nowhere).is_empty());
        assert!((e.position(AgentId(0)).unwrap().x - 50.0).abs() < 1e-4);

        let done = e.advance(1.0, nowhere);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].request, id);
        assert_eq!(done[0].outcome, MoveOutcome::Succeeded);
        assert!(e.active_request(AgentId(0)).is_none());
    }

    #[test]
    fn acceptance_radius_counts_as_arrival() {
        let mut e = engine();
        e.request_move(AgentId(0), MoveGoal::Point(Point3::new(5.0, 0.0, 0.0)), 0.0).unwrap();
        let done = e.advance(0.1, nowhere);
        assert_eq!(done[0].outcome, MoveOutcome::Succeeded);
        assert_eq!(e.position(AgentId(0)), Some(Point3::ORIGIN));
    }

    #[test]
    fn heading_follows_movement() {
        let mut e = engine();
        e.request_move(AgentId(0), MoveGoal::Point(Point3::new(0.0, 500.0, 0.0)), 10.0).unwrap();
        e.advance(0.1, nowhere);
        let yaw = e.heading(AgentId(0)).unwrap();
        assert!((yaw - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn out_of_bounds_fails() {
        let config = NavConfig {
            bounds: Some(NavBounds { min: Point3::new(-10.0, -10.0, 0.0), max: Point3::new(10.0, 10.0, 0.0) }),
            ..NavConfig::default()
        };
        let mut e = NavigationEngine::new(config);
        e.place(AgentId(0), Point3::ORIGIN);
        let id = e.request_move(AgentId(0), MoveGoal::Point(Point3::new(50.0, 0.0, 0.0)), 10.0).unwrap();

        let done = e.advance(0.1, nowhere);
        assert_eq!(done.len(), 1);
        assert_eq!((done[0].request, done[0].outcome), (id, MoveOutcome::Failed));
        assert_eq!(e.position(AgentId(0)), Some(Point3::ORIGIN));
    }
}

// ── Supersession & stop ───────────────────────────────────────────────────────

#[cfg(test)]
mod supersession {
    use super::*;

    #[test]
    fn new_request_aborts_previous() {
        let mut e = engine();
        let first = e.request_move(AgentId(0), MoveGoal::Point(Point3::new(900.0, 0.0, 0.0)), 1.0).unwrap();
        let second = e.request_move(AgentId(0), MoveGoal::Point(Point3::new(0.0, 900.0, 0.0)), 1.0).unwrap();
        assert!(second > first);

        let done = e.advance(0.1, nowhere);
        assert_eq!(done.len(), 1);
        assert_eq!((done[0].request, done[0].outcome), (first, MoveOutcome::Aborted));
        assert_eq!(e.active_request(AgentId(0)).map(|r| r.id), Some(second));
    }

    #[test]
    fn stop_aborts_and_halts() {
        let mut e = engine();
        let id = e.move_to_point(AgentId(0), Point3::new(900.0, 0.0, 0.0), 100.0).unwrap();
        e.advance(1.0, nowhere);
        e.stop(AgentId(0));
        let before = e.position(AgentId(0));

        let done = e.advance(1.0, nowhere);
        assert_eq!((done[0].request, done[0].outcome), (id, MoveOutcome::Aborted));
        assert_eq!(e.position(AgentId(0)), before);
    }

    #[test]
    fn stop_when_idle_is_silent() {
        let mut e = engine();
        e.stop(AgentId(0));
        assert!(e.advance(0.1, nowhere).is_empty());
    }

    #[test]
    fn removal_drops_pending() {
        let mut e = engine();
        e.move_to_point(AgentId(0), Point3::new(900.0, 0.0, 0.0), 1.0);
        e.stop(AgentId(0));
        e.remove(AgentId(0));
        assert!(e.advance(0.1, nowhere).is_empty());
        assert!(e.position(AgentId(0)).is_none());
    }
}

// ── Entity goals ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod entity_goals {
    use super::*;

    #[test]
    fn follows_and_holds_at_follow_distance() {
        let mut e = engine();
        e.move_to_entity(AgentId(0), EntityId(9), 100.0).unwrap();
        let target = |_: EntityId| Some(Point3::new(200.0, 0.0, 0.0));

        for _ in 0..5 {
            assert!(e.advance(1.0, target).is_empty());
        }
        let pos = e.position(AgentId(0)).unwrap();
        assert!((pos.x - 150.0).abs() < 1e-3);
        assert!(e.active_request(AgentId(0)).is_some());
    }

    #[test]
    fn vanished_target_fails() {
        let mut e = engine();
        let id = e.move_to_entity(AgentId(0), EntityId(9), 100.0).unwrap();
        let done = e.advance(0.1, nowhere);
        assert_eq!((done[0].request, done[0].outcome), (id, MoveOutcome::Failed));
    }
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod errors {
    use super::*;

    #[test]
    fn unplaced_agent_rejected() {
        let mut e = engine();
        assert!(e.request_move(AgentId(3), MoveGoal::Entity(EntityId(1)), 1.0).is_err());
        assert_eq!(e.move_to_point(AgentId(3), Point3::ORIGIN, 1.0), None);
    }

    #[test]
    fn negative_speed_rejected() {
        let mut e = engine();
        assert!(e.request_move(AgentId(0), MoveGoal::Point(Point3::ORIGIN), -1.0).is_err());
        assert_eq!(e.store.moving_count(), 0);
    }

    #[test]
    fn ids_are_generations() {
        let mut e = engine();
        let a = e.move_to_point(AgentId(0), Point3::ORIGIN, 1.0).unwrap();
        let b = e.move_to_point(AgentId(0), Point3::ORIGIN, 1.0).unwrap();
        assert_eq!(b, RequestId(a.0 + 1));
    }
}
