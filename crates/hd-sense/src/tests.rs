//! Unit tests for hd-sense.

use hd_behavior::{PerceptionQuery, SenseKind, StimulusKind};
use hd_core::{AgentId, EntityId, Point3, Tick};

use crate::{
    Observer, ProximityEvent, ProximityTracker, ProximityVolume, SensoryStore, SightConfig,
    SightSense, SpatialIndex,
};

fn at(x: f32) -> Point3 {
    Point3::new(x, 0.0, 0.0)
}

// ── Config ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SightConfig::default().validate().is_ok());
        assert!(ProximityVolume::default().validate().is_ok());
    }

    #[test]
    fn lose_radius_below_sight_rejected() {
        let c = SightConfig { sight_radius: 900.0, lose_sight_radius: 550.0, ..SightConfig::default() };
        assert!(c.validate().is_err());
    }

    #[test]
    fn negative_sizes_rejected() {
        let v = ProximityVolume { half_extents: Point3::new(30.0, -1.0, 20.0), ..ProximityVolume::default() };
        assert!(v.validate().is_err());
        let v = ProximityVolume { body_radius: f32::NAN, ..ProximityVolume::default() };
        assert!(matches!(v.validate(), Err(crate::SenseError::Body { .. })));
    }
}

// ── SpatialIndex ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod index {
    use super::*;

    #[test]
    fn within_radius_sorted() {
        let idx = SpatialIndex::build([
            (EntityId(3), at(10.0)),
            (EntityId(1), at(-20.0)),
            (EntityId(2), at(500.0)),
        ]);
        assert_eq!(idx.len(), 3);
        let ids: Vec<_> = idx.within(Point3::ORIGIN, 20.0).into_iter().map(|(e, _)| e).collect();
        assert_eq!(ids, vec![EntityId(1), EntityId(3)]);
    }

    #[test]
    fn empty_index() {
        let idx = SpatialIndex::build(std::iter::empty());
        assert!(idx.is_empty());
        assert!(idx.within(Point3::ORIGIN, 1e6).is_empty());
    }
}

// ── Sight ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod sight {
    use super::*;

    const E: EntityId = EntityId(7);

    fn step(s: &mut SightSense, x: Option<f32>, tick: u64) -> Vec<StimulusKind> {
        let candidates: Vec<_> = x.into_iter().map(|x| (E, at(x))).collect();
        s.update(Point3::ORIGIN, &candidates, &SightConfig::default(), Tick(tick), 50)
            .into_iter()
            .map(|(_, st)| st.kind)
            .collect()
    }

    #[test]
    fn hysteresis_between_radii() {
        let mut s = SightSense::new();
        // Between sight and lose radius: not yet seen.
        assert!(step(&mut s, Some(520.0), 0).is_empty());
        assert_eq!(step(&mut s, Some(480.0), 1), vec![StimulusKind::Detected]);
        // Drifting back out to 540 keeps it sensed.
        assert!(step(&mut s, Some(540.0), 2).is_empty());
        assert!(s.is_sensed(E));
        assert_eq!(step(&mut s, None, 3), vec![StimulusKind::Lost]);
        assert!(s.currently_perceived().is_empty());
    }

    #[test]
    fn lost_entities_forgotten_after_max_age() {
        let mut s = SightSense::new();
        step(&mut s, Some(100.0), 0);
        assert_eq!(step(&mut s, None, 10), vec![StimulusKind::Lost]);
        step(&mut s, None, 59);
        assert_eq!(s.known_count(), 1);
        assert!(step(&mut s, None, 60).is_empty());
        assert_eq!(s.known_count(), 0);
    }

    #[test]
    fn zero_max_age_remembers_forever() {
        let mut s = SightSense::new();
        let config = SightConfig::default();
        s.update(Point3::ORIGIN, &[(E, at(1.0))], &config, Tick(0), 0);
        s.update(Point3::ORIGIN, &[], &config, Tick(1), 0);
        s.update(Point3::ORIGIN, &[], &config, Tick(1_000_000), 0);
        assert_eq!(s.known_count(), 1);
    }
}

// ── Proximity ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod proximity {
    use super::*;

    #[test]
    fn box_sits_in_front() {
        let v = ProximityVolume::default();
        // Facing +x: box spans x 40..100, z 20..60.
        assert!(v.contains(Point3::ORIGIN, 0.0, Point3::new(70.0, 0.0, 40.0)));
        assert!(v.contains(Point3::ORIGIN, 0.0, Point3::new(100.0, 30.0, 60.0)));
        assert!(!v.contains(Point3::ORIGIN, 0.0, Point3::new(-70.0, 0.0, 40.0)));
        // Facing -x the same point behind is now in front.
        assert!(v.contains(Point3::ORIGIN, std::f32::consts::PI, Point3::new(-70.0, 0.0, 40.0)));
    }

    #[test]
    fn bodies_at_the_same_height_overlap() {
        let v = ProximityVolume::default();
        // box top/bottom is 20..60 above the origin, the body spans -88..88
        assert!(v.contains(Point3::ORIGIN, 0.0, at(50.0)));
        // box front face at 100 plus body radius 34
        assert!(v.contains(Point3::ORIGIN, 0.0, at(134.0)));
        assert!(!v.contains(Point3::ORIGIN, 0.0, at(135.0)));

        let points = ProximityVolume { body_radius: 0.0, body_half_height: 0.0, ..ProximityVolume::default() };
        assert!(!points.contains(Point3::ORIGIN, 0.0, at(70.0)));
        assert!(points.contains(Point3::ORIGIN, 0.0, Point3::new(70.0, 0.0, 40.0)));
    }

    #[test]
    fn reach_encloses_box() {
        let v = ProximityVolume::default();
        let corner = Point3::new(100.0 + 34.0, 30.0 + 34.0, 60.0 + 88.0);
        assert!(Point3::ORIGIN.distance(corner) <= v.reach());
    }

    #[test]
    fn enter_and_exit_events() {
        let v = ProximityVolume::default();
        let mut t = ProximityTracker::new();
        let inside = [(EntityId(1), Point3::new(70.0, 0.0, 40.0))];

        assert_eq!(t.update(Point3::ORIGIN, 0.0, &v, &inside), vec![ProximityEvent::Enter(EntityId(1))]);
        assert!(t.update(Point3::ORIGIN, 0.0, &v, &inside).is_empty());
        assert!(t.is_overlapping(EntityId(1)));
        assert_eq!(t.update(Point3::ORIGIN, 0.0, &v, &[]), vec![ProximityEvent::Exit(EntityId(1))]);
    }
}

// ── SensoryStore ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod store {
    use super::*;

    fn store() -> SensoryStore {
        let mut s = SensoryStore::new(SightConfig::default(), ProximityVolume::default(), 100).unwrap();
        s.register(AgentId(0));
        s.register(AgentId(1));
        s
    }

    fn observer(agent: AgentId) -> Option<Observer> {
        match agent.0 {
            0 => Some(Observer { entity: EntityId(0), position: Point3::ORIGIN, heading: 0.0 }),
            1 => Some(Observer { entity: EntityId(1), position: at(2000.0), heading: 0.0 }),
            _ => None,
        }
    }

    #[test]
    fn invalid_config_rejected() {
        let bad = SightConfig { lose_sight_radius: 10.0, ..SightConfig::default() };
        assert!(SensoryStore::new(bad, ProximityVolume::default(), 100).is_err());
    }

    #[test]
    fn senses_excluding_self() {
        let mut s = store();
        let idx = SpatialIndex::build([
            (EntityId(0), Point3::ORIGIN),
            (EntityId(1), at(2000.0)),
            (EntityId(9), at(300.0)),
        ]);
        let stimuli = s.sense_all(&idx, Tick(1), observer);
        assert_eq!(stimuli.len(), 1);
        assert_eq!((stimuli[0].0, stimuli[0].1), (AgentId(0), EntityId(9)));
        assert_eq!(s.currently_perceived(AgentId(0), SenseKind::Sight), vec![EntityId(9)]);
        assert!(s.currently_perceived(AgentId(1), SenseKind::Sight).is_empty());
    }

    #[test]
    fn removed_agent_senses_nothing() {
        let mut s = store();
        s.remove(AgentId(0));
        let idx = SpatialIndex::build([(EntityId(9), at(10.0))]);
        assert!(s.sense_all(&idx, Tick(1), observer).is_empty());
        assert!(s.currently_perceived(AgentId(0), SenseKind::Sight).is_empty());
    }

    #[test]
    fn proximity_events_per_agent() {
        let mut s = store();
        let idx = SpatialIndex::build([(EntityId(0), Point3::ORIGIN), (EntityId(9), Point3::new(70.0, 0.0, 40.0))]);
        let events = s.proximity_all(&idx, observer);
        assert_eq!(events, vec![(AgentId(0), ProximityEvent::Enter(EntityId(9)))]);
    }
}
