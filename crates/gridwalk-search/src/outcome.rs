use gridwalk_core::Pos;

use crate::reconstruct::Path;

/// How a search ended.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchOutcome {
    /// The end was reached; the route runs start to end inclusive.
    Found(Path),
    /// The frontier ran dry before reaching the end.
    NotFound,
    /// The step callback (or the driver of a [`Search`](crate::Search))
    /// asked to stop.
    Aborted,
}

impl SearchOutcome {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The route, if one was found.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Found(path) => Some(path),
            _ => None,
        }
    }
}

/// Returned by the step callback.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum StepControl {
    #[default]
    Continue,
    Abort,
}

/// What a single call to [`Search::step`](crate::Search::step) did.
///
/// Every variant other than `Finished` leaves the grid in a state worth
/// showing, and [`run_search`](crate::run_search) invokes its callback once
/// after each of them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// A cell was taken off the frontier and its neighbors relaxed.
    Expanded(Pos),
    /// A cell on the found route was painted `Path`.
    Traced(Pos),
    /// The route is fully painted and the end cell restored.
    Arrived,
    /// The search is over. Further calls keep returning the same outcome.
    Finished(SearchOutcome),
}
