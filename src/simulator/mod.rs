// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Iterative simulation of the recursive triangle subdivision.
//!
//! The recursive procedure has the shape "at depth 1 perform the leaf action,
//! otherwise recurse into three half-scale children". This module runs it as
//! a state machine over an explicit [`DynamicStack`] of frames instead of the
//! native call stack, so the only depth bound is available memory.
//!
//! Each loop iteration inspects (never removes) the top frame and acts on its
//! [`ResumeState`]:
//!
//! - `Entry` at depth 1: fire the leaf action, retire the frame.
//! - `Entry` deeper: suspend the call at `AfterBottomLeft`, push the
//!   bottom-left child.
//! - `AfterBottomLeft`: suspend at `AfterBottomRight`, push the bottom-right
//!   child at `(x + base/2, y)`.
//! - `AfterBottomRight`: retire the frame and push the top child at
//!   `(x + base/4, y - height/2)` in its place. The call has nothing left to
//!   do after its last dispatch, so it does not outlive it.
//!
//! The loop ends exactly when the stack empties: every leaf has fired and
//! every suspended call has been retired.

mod frame;

use strum::EnumCount;
use thiserror::Error;
use tracing::{debug, trace};

use crate::geometry::{Point, Triangle};
use crate::stack::DynamicStack;
use frame::{CallFrame, CompactFrame, FullFrame};

pub use frame::ResumeState;

/// Number of child calls each simulated call dispatches.
///
/// Every resume state dispatches exactly one child, so the branching factor
/// equals the number of resume states.
pub const BRANCHING: usize = ResumeState::COUNT;

/// Error cases of a simulation run.
#[derive(Debug, Error, PartialEq)]
pub enum SimulationError<E: std::error::Error> {
    /// The requested depth has no base case to reach. Raised before any
    /// frame stack exists; retrying with a corrected depth is safe.
    #[error("subdivision depth must be at least 1 (got {0})")]
    InvalidDepth(u32),

    /// The leaf action reported an error. It passes through unchanged and
    /// the run stops at once; no further leaf fires.
    #[error(transparent)]
    LeafAction(E),
}

/// Counters collected over one successful run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStatistics {
    /// Leaf-action invocations, one per base case reached: `3^(depth - 1)`.
    pub leaves: u64,

    /// Frames pushed onto the internal stack, one per simulated call:
    /// `(3^depth - 1) / 2`, or 0 when the root itself is the base case.
    pub frames_pushed: u64,

    /// Largest number of frames live at once. Equals the subdivision depth
    /// whenever frames are pushed at all.
    pub max_stack_height: usize,
}

/// Iterative driver for the recursive subdivision.
///
/// Captures the root triangle and the subdivision depth; [`Simulator::run`]
/// and [`Simulator::run_compact`] then execute the identical transition
/// structure with different frame representations, invoking the caller's
/// leaf action once per base-case triangle, in the same order.
///
/// # Example
///
/// ```
/// use sierpinski::{Point, Simulator, Triangle};
///
/// let root = Triangle::new(Point::new(0.0, 512.0), 512.0, 512.0);
/// let simulator = Simulator::new(root, 3);
///
/// let mut full = Vec::new();
/// let mut compact = Vec::new();
/// simulator
///     .run(|t| {
///         full.push(t);
///         Ok::<_, std::convert::Infallible>(())
///     })
///     .unwrap();
/// simulator
///     .run_compact(|t| {
///         compact.push(t);
///         Ok::<_, std::convert::Infallible>(())
///     })
///     .unwrap();
///
/// assert_eq!(full.len(), 9);
/// assert_eq!(full, compact);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Simulator {
    root: Triangle,
    depth: u32,
}

impl Simulator {
    /// Capture the outermost call's triangle and recursion depth.
    pub fn new(root: Triangle, depth: u32) -> Self {
        Self { root, depth }
    }

    /// Run the subdivision with frames that store their full geometry.
    ///
    /// `leaf_action` is invoked once per base-case triangle, innermost-first
    /// in bottom-left, bottom-right, top order. An error from it aborts the
    /// run immediately; the internal stack is discarded and no partial
    /// progress is reported.
    pub fn run<A, E>(&self, leaf_action: A) -> Result<RunStatistics, SimulationError<E>>
    where
        A: FnMut(Triangle) -> Result<(), E>,
        E: std::error::Error,
    {
        self.drive::<FullFrame, _, _>(leaf_action)
    }

    /// Run the subdivision with frames that store only origin and depth.
    ///
    /// Base and height are re-derived from the depth on demand, trading a
    /// little repeated arithmetic for a smaller per-frame footprint. Leaf
    /// order and geometry are identical to [`Simulator::run`].
    pub fn run_compact<A, E>(&self, leaf_action: A) -> Result<RunStatistics, SimulationError<E>>
    where
        A: FnMut(Triangle) -> Result<(), E>,
        E: std::error::Error,
    {
        self.drive::<CompactFrame, _, _>(leaf_action)
    }

    fn drive<F, A, E>(&self, mut leaf_action: A) -> Result<RunStatistics, SimulationError<E>>
    where
        F: CallFrame,
        A: FnMut(Triangle) -> Result<(), E>,
        E: std::error::Error,
    {
        if self.depth == 0 {
            return Err(SimulationError::InvalidDepth(self.depth));
        }

        debug!(depth = self.depth, "starting subdivision run");
        let mut stats = RunStatistics::default();

        if self.depth == 1 {
            // The root is itself the base case: no call is ever suspended,
            // so no frame stack exists.
            leaf_action(self.root).map_err(SimulationError::LeafAction)?;
            stats.leaves = 1;
            debug!(?stats, "subdivision run complete");
            return Ok(stats);
        }

        let mut stack: DynamicStack<F> = DynamicStack::new();
        stack.push(F::root(self.root, self.depth));
        stats.frames_pushed = 1;
        stats.max_stack_height = stack.len();

        // An empty stack is the normal completion signal: every leaf has
        // fired and every suspended call has been retired.
        while let Ok(frame) = stack.top_mut() {
            match frame.resume_state() {
                ResumeState::Entry if frame.depth() == 1 => {
                    let triangle = frame.resolve(&self.root, self.depth);
                    trace!(x = triangle.origin.x, y = triangle.origin.y, "leaf reached");
                    leaf_action(triangle).map_err(SimulationError::LeafAction)?;
                    stats.leaves += 1;
                    stack.pop().expect("loop guard keeps the stack non-empty");
                }
                ResumeState::Entry => {
                    let triangle = frame.resolve(&self.root, self.depth);
                    frame.set_resume_state(ResumeState::AfterBottomLeft);
                    let child = frame.child(triangle.origin);
                    stack.push(child);
                    stats.frames_pushed += 1;
                }
                ResumeState::AfterBottomLeft => {
                    let triangle = frame.resolve(&self.root, self.depth);
                    frame.set_resume_state(ResumeState::AfterBottomRight);
                    let origin =
                        Point::new(triangle.origin.x + triangle.base / 2.0, triangle.origin.y);
                    let child = frame.child(origin);
                    stack.push(child);
                    stats.frames_pushed += 1;
                }
                ResumeState::AfterBottomRight => {
                    let triangle = frame.resolve(&self.root, self.depth);
                    let origin = Point::new(
                        triangle.origin.x + triangle.base / 4.0,
                        triangle.origin.y - triangle.height / 2.0,
                    );
                    let child = frame.child(origin);
                    stack.pop().expect("loop guard keeps the stack non-empty");
                    stack.push(child);
                    stats.frames_pushed += 1;
                }
            }

            stats.max_stack_height = stats.max_stack_height.max(stack.len());
        }

        debug!(?stats, "subdivision run complete");
        Ok(stats)
    }
}
