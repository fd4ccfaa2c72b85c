use thiserror::Error;

/// Errors arising from grid construction, search, and path reconstruction.
///
/// Locations are carried in their `Debug` form so that this type does not
/// depend on any particular graph.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("no path found: the goal was never reached")]
    NoPathFound,
    #[error("graph reported no usable cost for the edge {from} -> {to}")]
    InvalidGraphContract { from: String, to: String },
    #[error("{location} is outside the graph or blocked")]
    OutOfBounds { location: String },
    #[error("search deadline exceeded after expanding {expanded} locations")]
    DeadlineExceeded { expanded: usize },
    #[error("weight {weight} at {location} must be positive and finite")]
    InvalidWeight { location: String, weight: f64 },
}

impl Error {
    pub(crate) fn out_of_bounds(location: impl std::fmt::Debug) -> Error {
        Error::OutOfBounds {
            location: format!("{location:?}"),
        }
    }

    pub(crate) fn invalid_contract(from: impl std::fmt::Debug, to: impl std::fmt::Debug) -> Error {
        Error::InvalidGraphContract {
            from: format!("{from:?}"),
            to: format!("{to:?}"),
        }
    }
}
