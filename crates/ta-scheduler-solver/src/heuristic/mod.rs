//! Heuristic components for solving
//!
//! This module contains:
//! - Moves: operations that change slot assignments
//! - Selectors: components that sample moves from the current timetable

pub mod r#move;
pub mod selector;

pub use r#move::{AssignmentMove, ChangeMove, Move, SwapMove};
pub use selector::{ChangeMoveSelector, MoveSelector, SwapMoveSelector, UnionMoveSelector};
