// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Resumable call-frame representations for the subdivision driver.
//!
//! Each frame records one simulated recursive call: where in the plane it
//! operates, how deep it is, and how far its body has progressed. The live
//! frames always form the active call path, innermost call on top of the
//! stack, so at most one frame per recursion level exists at any time.

use strum_macros::EnumCount as EnumCountMacro;

use crate::geometry::{Point, Triangle};

/// Progress tag of a simulated call: which child the call dispatches next.
///
/// Analogous to a program counter for a suspended call. There is no terminal
/// value: a call that has dispatched its last child is retired from the stack
/// rather than parked in a "done" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumCountMacro)]
pub enum ResumeState {
    /// The call has just been entered; the next step handles the base case
    /// or dispatches the bottom-left child.
    Entry,

    /// The bottom-left child has returned; the next step dispatches the
    /// bottom-right child.
    AfterBottomLeft,

    /// The bottom-right child has returned; the next step retires this call,
    /// dispatching the top child in its place.
    AfterBottomRight,
}

/// One simulated recursive call, generic over how much geometry is stored.
///
/// [`FullFrame`] keeps the resolved triangle; [`CompactFrame`] keeps only the
/// origin and re-derives its size from the depth. The driver is written
/// against this seam so both representations share one transition structure.
pub(crate) trait CallFrame: Sized {
    /// Frame for the outermost call.
    fn root(triangle: Triangle, depth: u32) -> Self;

    fn resume_state(&self) -> ResumeState;

    fn set_resume_state(&mut self, state: ResumeState);

    /// Remaining recursion depth of this call; 1 is the base case.
    fn depth(&self) -> u32;

    /// The triangle this call operates on, fully resolved.
    ///
    /// `root` and `root_depth` describe the outermost call; representations
    /// that do not store their own size derive it from these.
    fn resolve(&self, root: &Triangle, root_depth: u32) -> Triangle;

    /// Frame for a child call one level deeper, anchored at `origin`.
    fn child(&self, origin: Point) -> Self;
}

/// Frame that stores the fully resolved geometry of its call.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FullFrame {
    triangle: Triangle,
    depth: u32,
    resume_state: ResumeState,
}

impl CallFrame for FullFrame {
    fn root(triangle: Triangle, depth: u32) -> Self {
        Self {
            triangle,
            depth,
            resume_state: ResumeState::Entry,
        }
    }

    fn resume_state(&self) -> ResumeState {
        self.resume_state
    }

    fn set_resume_state(&mut self, state: ResumeState) {
        self.resume_state = state;
    }

    fn depth(&self) -> u32 {
        self.depth
    }

    fn resolve(&self, _root: &Triangle, _root_depth: u32) -> Triangle {
        self.triangle
    }

    fn child(&self, origin: Point) -> Self {
        Self {
            triangle: Triangle::new(origin, self.triangle.base / 2.0, self.triangle.height / 2.0),
            depth: self.depth - 1,
            resume_state: ResumeState::Entry,
        }
    }
}

/// Frame that stores only its origin and depth.
///
/// A call `levels` below the root operates on a triangle scaled down by
/// `2^levels`, so base and height per frame duplicate what the depth already
/// encodes. This representation recomputes them on demand instead:
/// `root_base / 2^(root_depth - depth)`, and likewise for the height.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CompactFrame {
    origin: Point,
    depth: u32,
    resume_state: ResumeState,
}

impl CallFrame for CompactFrame {
    fn root(triangle: Triangle, depth: u32) -> Self {
        Self {
            origin: triangle.origin,
            depth,
            resume_state: ResumeState::Entry,
        }
    }

    fn resume_state(&self) -> ResumeState {
        self.resume_state
    }

    fn set_resume_state(&mut self, state: ResumeState) {
        self.resume_state = state;
    }

    fn depth(&self) -> u32 {
        self.depth
    }

    fn resolve(&self, root: &Triangle, root_depth: u32) -> Triangle {
        let scale = f64::powi(2.0, (root_depth - self.depth) as i32);
        Triangle::new(self.origin, root.base / scale, root.height / scale)
    }

    fn child(&self, origin: Point) -> Self {
        Self {
            origin,
            depth: self.depth - 1,
            resume_state: ResumeState::Entry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_frames_start_at_entry() {
        let triangle = Triangle::new(Point::new(0.0, 0.0), 16.0, 8.0);
        assert_eq!(FullFrame::root(triangle, 3).resume_state(), ResumeState::Entry);
        assert_eq!(
            CompactFrame::root(triangle, 3).resume_state(),
            ResumeState::Entry
        );
    }

    #[test]
    fn test_child_descends_one_level() {
        let triangle = Triangle::new(Point::new(0.0, 0.0), 16.0, 8.0);
        let frame = FullFrame::root(triangle, 5);
        let child = frame.child(Point::new(8.0, 0.0));
        assert_eq!(child.depth(), 4);
        assert_eq!(child.resume_state(), ResumeState::Entry);
    }

    #[test]
    fn test_full_frame_resolves_to_stored_triangle() {
        let root = Triangle::new(Point::new(2.0, 4.0), 16.0, 8.0);
        let frame = FullFrame::root(root, 4);
        let child = frame.child(Point::new(10.0, 4.0));
        let resolved = child.resolve(&root, 4);
        assert_eq!(resolved.origin, Point::new(10.0, 4.0));
        assert_eq!(resolved.base, 8.0);
        assert_eq!(resolved.height, 4.0);
    }

    #[test]
    fn test_compact_frame_derives_size_from_depth() {
        let root = Triangle::new(Point::new(2.0, 4.0), 16.0, 8.0);
        let frame = CompactFrame::root(root, 4);
        // Two levels below the root the triangle is quarter scale.
        let grandchild = frame.child(Point::new(10.0, 4.0)).child(Point::new(10.0, 4.0));
        let resolved = grandchild.resolve(&root, 4);
        assert_eq!(resolved.base, 4.0);
        assert_eq!(resolved.height, 2.0);
    }

    #[test]
    fn test_representations_resolve_identically() {
        let root = Triangle::new(Point::new(1.0, 1.0), 64.0, 32.0);
        let full = FullFrame::root(root, 6).child(Point::new(1.0, 1.0));
        let compact = CompactFrame::root(root, 6).child(Point::new(1.0, 1.0));
        assert_eq!(full.resolve(&root, 6), compact.resolve(&root, 6));
    }
}
