//! Per-agent movement state.

use hd_core::{EntityId, Point3, RequestId};

/// Where a request is headed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MoveGoal {
    Point(Point3),
    Entity(EntityId),
}

/// The single live request of a moving agent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ActiveRequest {
    pub id:    RequestId,
    pub goal:  MoveGoal,
    /// Units per second.
    pub speed: f32,
}

/// Movement state for a single agent.
///
/// An agent is either **stationary** (`request == None`) or **moving** toward
/// the goal of its active request.  `heading` is the yaw of the last
/// horizontal movement or facing adjustment and orients the agent's
/// proximity volume.
#[derive(Clone, Debug, PartialEq)]
pub struct MovementState {
    pub position: Point3,
    pub heading:  f32,
    pub request:  Option<ActiveRequest>,
}

impl MovementState {
    #[inline]
    pub fn stationary(position: Point3) -> Self {
        Self { position, heading: 0.0, request: None }
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.request.is_some()
    }

    /// Turn to face `target` horizontally; unchanged when directly above/below.
    #[inline]
    pub fn face(&mut self, target: Point3) {
        if let Some(yaw) = self.position.heading_to(target) {
            self.heading = yaw;
        }
    }
}
