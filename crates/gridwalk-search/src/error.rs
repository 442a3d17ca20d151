use gridwalk_core::Pos;
use thiserror::Error;

/// Why a pair of endpoints cannot be searched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EndpointFault {
    #[error("no start cell")]
    MissingStart,
    #[error("no end cell")]
    MissingEnd,
    #[error("start and end are both {0}")]
    SameCell(Pos),
}

/// Errors raised before a search touches the grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("invalid endpoints: {0}")]
    InvalidEndpoints(EndpointFault),
}

impl SearchError {
    /// Check a start/end pair, returning both positions when usable.
    pub fn check_endpoints(start: Option<Pos>, end: Option<Pos>) -> Result<(Pos, Pos), Self> {
        let start = start.ok_or(Self::InvalidEndpoints(EndpointFault::MissingStart))?;
        let end = end.ok_or(Self::InvalidEndpoints(EndpointFault::MissingEnd))?;
        if start == end {
            return Err(Self::InvalidEndpoints(EndpointFault::SameCell(start)));
        }
        Ok((start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_start_is_reported_first() {
        assert_eq!(
            SearchError::check_endpoints(None, None),
            Err(SearchError::InvalidEndpoints(EndpointFault::MissingStart))
        );
        assert_eq!(
            SearchError::check_endpoints(Some(Pos::ZERO), None),
            Err(SearchError::InvalidEndpoints(EndpointFault::MissingEnd))
        );
    }

    #[test]
    fn same_cell_message() {
        let err = SearchError::check_endpoints(Some(Pos::new(1, 2)), Some(Pos::new(1, 2)))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid endpoints: start and end are both (1, 2)"
        );
    }

    #[test]
    fn distinct_endpoints_pass() {
        assert_eq!(
            SearchError::check_endpoints(Some(Pos::ZERO), Some(Pos::new(0, 1))),
            Ok((Pos::ZERO, Pos::new(0, 1)))
        );
    }
}
