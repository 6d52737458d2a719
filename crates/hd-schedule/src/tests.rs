//! Unit tests for hd-schedule.

use hd_behavior::{TimerKind, TimerService};
use hd_core::{AgentId, Tick};

use crate::TimerQueue;

fn queue() -> TimerQueue<TimerKind> {
    TimerQueue::new(100).unwrap()
}

// ── TimerQueue ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod timer_queue {
    use super::*;

    #[test]
    fn zero_tick_duration_rejected() {
        assert!(TimerQueue::<()>::new(0).is_err());
    }

    #[test]
    fn live_index_tracks_every_handle() {
        let mut q = queue();
        let handles: Vec<_> = (0..200u32)
            .map(|i| q.schedule((i % 7) as f32 * 0.1, AgentId(i % 5), TimerKind::RoamResume))
            .collect();
        assert_eq!(q.len(), 200);
        assert_eq!(q.cancel_owner(AgentId(3)), 40);
        assert!(handles.iter().enumerate().all(|(i, &h)| q.due_tick(h).is_some() == (i % 5 != 3)));

        q.advance_to(Tick(10));
        assert_eq!(q.drain_due().len(), 160);
        assert!(q.is_empty());
    }

    #[test]
    fn two_seconds_is_twenty_ticks() {
        let mut q = queue();
        q.advance_to(Tick(7));
        let h = q.schedule(2.0, AgentId(0), TimerKind::PostChase);
        assert_eq!(q.due_tick(h), Some(Tick(27)));

        q.advance_to(Tick(26));
        assert!(q.drain_due().is_empty());
        q.advance_to(Tick(27));
        let fired = q.drain_due();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].handle, h);
        assert_eq!(fired[0].tick, Tick(27));
        assert_eq!(fired[0].payload, TimerKind::PostChase);
    }

    #[test]
    fn zero_delay_fires_next_tick() {
        let mut q = queue();
        q.advance_to(Tick(3));
        q.schedule(0.0, AgentId(0), TimerKind::RoamResume);
        assert!(q.drain_due().is_empty());
        q.advance_to(Tick(4));
        assert_eq!(q.drain_due().len(), 1);
    }

    #[test]
    fn fractional_delay_rounds_up() {
        let mut q = queue();
        let h = q.schedule(0.25, AgentId(0), TimerKind::RoamResume);
        assert_eq!(q.due_tick(h), Some(Tick(3)));
    }

    #[test]
    fn non_finite_delay_treated_as_zero() {
        let mut q = queue();
        let h = q.schedule(f32::INFINITY, AgentId(0), TimerKind::Destroy);
        assert_eq!(q.due_tick(h), Some(Tick(1)));
    }

    #[test]
    fn canceled_timer_never_fires() {
        let mut q = queue();
        let h = q.schedule(1.0, AgentId(0), TimerKind::RoamResume);
        assert!(q.cancel(h));
        assert!(!q.cancel(h));
        assert!(q.is_empty());
        q.advance_to(Tick(100));
        assert!(q.drain_due().is_empty());
    }

    #[test]
    fn cancel_owner_only_touches_owner() {
        let mut q = queue();
        q.schedule(1.0, AgentId(0), TimerKind::RoamResume);
        q.schedule(2.0, AgentId(0), TimerKind::DeathAnimation);
        let other = q.schedule(1.0, AgentId(1), TimerKind::RoamResume);

        assert_eq!(q.cancel_owner(AgentId(0)), 2);
        assert_eq!(q.len(), 1);
        q.advance_to(Tick(50));
        let fired = q.drain_due();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].handle, other);
    }

    #[test]
    fn fires_in_due_then_schedule_order() {
        let mut q = queue();
        let late = q.schedule(0.5, AgentId(0), TimerKind::Destroy);
        let a = q.schedule(0.1, AgentId(2), TimerKind::RoamResume);
        let b = q.schedule(0.1, AgentId(1), TimerKind::PostChase);
        assert_eq!(q.due_tick(a), Some(Tick(1)));

        q.advance_to(Tick(10));
        let order: Vec<_> = q.drain_due().into_iter().map(|f| f.handle).collect();
        assert_eq!(order, vec![a, b, late]);
    }

    #[test]
    fn handles_are_unique() {
        let mut q = queue();
        let a = q.schedule(1.0, AgentId(0), TimerKind::RoamResume);
        q.cancel(a);
        let b = q.schedule(1.0, AgentId(0), TimerKind::RoamResume);
        assert_ne!(a, b);
    }

    #[test]
    fn clock_never_rewinds() {
        let mut q = queue();
        q.advance_to(Tick(10));
        q.advance_to(Tick(4));
        assert_eq!(q.now(), Tick(10));
    }
}

// ── TimerService ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod service {
    use super::*;

    #[test]
    fn service_round_trip() {
        let mut q = queue();
        let svc: &mut dyn TimerService = &mut q;
        let h = svc.schedule(AgentId(4), 0.3, TimerKind::DeathAnimation).unwrap();
        svc.cancel(h);
        assert!(q.due_tick(h).is_none());
    }
}
