// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Iterative Sierpinski triangle subdivision.
//!
//! The Sierpinski subdivision is naturally recursive: split an apex-up
//! triangle into three half-scale children and recurse until the requested
//! depth, emitting one triangle per base case. This crate runs that procedure
//! without native recursion, so the reachable depth is bounded by available
//! memory rather than by the call stack.
//!
//! # Architecture
//!
//! Two components, leaf-first:
//!
//! ## DynamicStack (container)
//!
//! A contiguous LIFO container with hysteresis-based capacity management:
//! - Grows by doubling only when the backing storage is exactly full
//! - Shrinks halfway toward the live length only when under half full
//! - Never drops below its minimum capacity
//!
//! The asymmetric thresholds keep an alternating push/pop sequence near a
//! boundary from reallocating on every operation.
//!
//! ## Simulator (driver)
//!
//! A state-machine loop over a stack of resumable call frames. Each frame
//! records one simulated recursive call: its geometry, its depth and a
//! [`simulator::ResumeState`] tag marking how far the call has progressed.
//! The loop inspects the top frame, dispatches the next child or fires the
//! caller-supplied leaf action, and retires frames as their calls return.
//! Only the active call path is ever materialized, so a run at depth `D`
//! holds at most `D` frames while visiting `3^(D-1)` leaves.
//!
//! Frames come in two representations with the identical transition
//! structure: a full frame storing its resolved triangle, and a compact frame
//! storing only origin and depth, re-deriving its size from the root
//! parameters on demand.
//!
//! # Example
//!
//! ```
//! use sierpinski::{Point, Simulator, Triangle};
//!
//! let root = Triangle::new(Point::new(40.0, 560.0), 720.0, 540.0);
//! let simulator = Simulator::new(root, 4);
//!
//! let mut triangles = Vec::new();
//! let stats = simulator
//!     .run(|triangle| {
//!         triangles.push(triangle);
//!         Ok::<_, std::convert::Infallible>(())
//!     })
//!     .unwrap();
//!
//! assert_eq!(stats.leaves, 27);
//! assert_eq!(stats.max_stack_height, 4);
//! assert_eq!(triangles.len(), 27);
//! ```

pub mod geometry;
pub mod simulator;
pub mod stack;

// Re-export commonly used types
pub use geometry::{Point, Triangle};
pub use simulator::{RunStatistics, SimulationError, Simulator};
pub use stack::{DynamicStack, EmptyStackError};
