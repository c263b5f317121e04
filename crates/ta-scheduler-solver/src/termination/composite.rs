//! Composite OR termination.
//!
//! Uses macro-generated tuple implementations for zero type erasure.

use ta_scheduler_scoring::ScoreDirector;

use super::{Termination, TerminationReason};
use crate::scope::SolverScope;

/// Terminates when ANY child terminates, reporting the first child's reason
/// in tuple order.
///
/// # Examples
///
/// ```
/// use ta_scheduler_solver::termination::{
///     OrTermination, StepCountTermination, TimeTermination,
/// };
///
/// // Terminate after 30 seconds OR 1000 steps
/// let termination = OrTermination::new((
///     TimeTermination::seconds(30),
///     StepCountTermination::new(1000),
/// ));
/// # let _ = termination;
/// ```
#[derive(Debug)]
pub struct OrTermination<T>(pub T);

impl<T> OrTermination<T> {
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

macro_rules! impl_or_termination {
    ($($idx:tt: $T:ident),+) => {
        impl<D, $($T),+> Termination<D> for OrTermination<($($T,)+)>
        where
            D: ScoreDirector,
            $($T: Termination<D>,)+
        {
            fn check(&self, solver_scope: &SolverScope<D>) -> Option<TerminationReason> {
                None $(.or_else(|| (self.0).$idx.check(solver_scope)))+
            }
        }
    };
}

impl_or_termination!(0: T0);
impl_or_termination!(0: T0, 1: T1);
impl_or_termination!(0: T0, 1: T1, 2: T2);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3);
