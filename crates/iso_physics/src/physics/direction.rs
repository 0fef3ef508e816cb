//! Direction flags and frame-phase bookkeeping for physics bodies
//!
//! Collision enables, contact state and blocked state all share the same
//! six-direction flag set; `none`/`any` are derived predicates rather than
//! stored booleans, so they can never fall out of sync with the
//! directional bits.

use bitflags::bitflags;

bitflags! {
    /// Per-direction flag set
    ///
    /// Used three ways by a body: which directions to check collision in,
    /// which faces are currently touching another body, and which
    /// directions movement is blocked in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DirectionFlags: u8 {
        /// The +Z face (top of the body)
        const UP = 1 << 0;
        /// The -Z face (bottom of the body)
        const DOWN = 1 << 1;
        /// The -X face
        const BACK_X = 1 << 2;
        /// The +X face
        const FRONT_X = 1 << 3;
        /// The -Y face
        const BACK_Y = 1 << 4;
        /// The +Y face
        const FRONT_Y = 1 << 5;
        /// All four horizontal faces
        const HORIZONTAL = Self::BACK_X.bits()
            | Self::FRONT_X.bits()
            | Self::BACK_Y.bits()
            | Self::FRONT_Y.bits();
    }
}

impl DirectionFlags {
    /// True when no directional flag is set
    #[must_use]
    pub fn none(self) -> bool {
        self.is_empty()
    }

    /// True when at least one directional flag is set
    #[must_use]
    pub fn any(self) -> bool {
        !self.is_empty()
    }

    /// True when any of the four horizontal flags is set
    #[must_use]
    pub fn horizontal(self) -> bool {
        self.intersects(Self::HORIZONTAL)
    }
}

/// Dominant axis and direction of a body's motion, inferred once per frame
///
/// `ForwardX`/`ForwardY` are motion towards +X/+Y, `BackwardX`/`BackwardY`
/// towards -X/-Y, and `Up`/`Down` along the Z axis. A body that has not
/// moved yet reports [`Facing::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    /// No motion observed yet
    #[default]
    None,
    /// Moving towards +Z
    Up,
    /// Moving towards -Z
    Down,
    /// Moving towards +X
    ForwardX,
    /// Moving towards -X
    BackwardX,
    /// Moving towards +Y
    ForwardY,
    /// Moving towards -Y
    BackwardY,
}

/// Per-frame update progress marker
///
/// Guards against applying a frame's motion twice: the post-update step is
/// a no-op while the body is already in the [`UpdatePhase::Post`] state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdatePhase {
    /// No update has run this frame
    #[default]
    Idle,
    /// The pre-update step has run
    Pre,
    /// The post-update step has run; further post-updates are ignored
    Post,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_any_are_derived() {
        let mut flags = DirectionFlags::empty();
        assert!(flags.none());
        assert!(!flags.any());

        flags.insert(DirectionFlags::DOWN);
        assert!(!flags.none());
        assert!(flags.any());
    }

    #[test]
    fn test_horizontal_excludes_vertical() {
        assert!(!DirectionFlags::UP.horizontal());
        assert!(!DirectionFlags::DOWN.horizontal());
        assert!(DirectionFlags::BACK_X.horizontal());
        assert!(DirectionFlags::FRONT_Y.horizontal());
        assert!((DirectionFlags::DOWN | DirectionFlags::FRONT_X).horizontal());
    }

    #[test]
    fn test_default_phase_is_idle() {
        assert_eq!(UpdatePhase::default(), UpdatePhase::Idle);
        assert_eq!(Facing::default(), Facing::None);
    }
}
