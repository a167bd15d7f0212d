//! Navigation: turning intents into back stack operations.
//!
//! The host owns one [`Navigator`]. Every change to its [`BackStack`] goes
//! through [`resolve`], which computes a [`StackOp`] from the intent and the
//! current stack, and is then applied by the navigator. An intent that fails
//! to resolve leaves the stack untouched.
//!
//! Everything here is synchronous. A multi-threaded host wraps the navigator
//! in a single `Mutex` so each operation stays one atomic unit.

use serde::Serialize;
use tracing::{debug, trace};

use crate::route::{Result, Route, TripId, TripMode};

/// A requested navigation, before it is checked against the stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Navigate to any well-formed route.
    GoTo(Route),

    /// Open a trip's detail screen. The raw id is validated on resolve.
    TripDetail(i64),

    /// Open the add/edit screen in create mode.
    AddTrip,

    /// Open the add/edit screen in edit mode for a trip.
    EditTrip(i64),

    /// Collapse the stack back to the trips list.
    ReturnToTrips,
}

/// A change to the back stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum StackOp {
    /// Append a route.
    Push { route: Route },

    /// Drop entries above the top-most `target`.
    ///
    /// With `inclusive` the target itself goes too. When the target is not on
    /// the stack and `inclusive` is false, it is pushed instead.
    PopTo { target: Route, inclusive: bool },
}

/// The outcome of resolving an intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub op: StackOp,

    /// Create or edit, when the destination is the add/edit screen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<TripMode>,
}

/// Ordered navigation history. The last entry is the visible screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BackStack {
    routes: Vec<Route>,
}

impl BackStack {
    /// The currently visible route, if anything has been shown yet.
    pub fn top(&self) -> Option<&Route> {
        self.routes.last()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Entries from bottom to top.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Token summary, bottom to top.
    pub fn tokens(&self) -> Vec<String> {
        self.routes().iter().map(Route::to_string).collect()
    }

    /// Performs a stack operation.
    fn apply(&mut self, op: &StackOp) {
        match op {
            StackOp::Push { route } => self.routes.push(*route),
            StackOp::PopTo { target, inclusive } => {
                match self.routes.iter().rposition(|r| r == target) {
                    Some(index) => {
                        let keep = if *inclusive { index } else { index + 1 };
                        self.routes.truncate(keep);
                    }
                    None if !*inclusive => self.routes.push(*target),
                    None => {}
                }
            }
        }
    }
}

#[cfg(test)]
impl FromIterator<Route> for BackStack {
    fn from_iter<I: IntoIterator<Item = Route>>(iter: I) -> Self {
        Self {
            routes: iter.into_iter().collect(),
        }
    }
}

/// Computes the stack operation and mode for an intent.
///
/// Pure: the stack is only read. Fails with `InvalidIdentifier` when a trip id
/// is zero or negative.
pub fn resolve(intent: &Intent, stack: &BackStack) -> Result<Resolution> {
    trace!(?intent, top = ?stack.top(), depth = stack.len(), "resolving");
    let route = match intent {
        Intent::GoTo(route) => *route,
        Intent::TripDetail(raw) => Route::TripDetail {
            trip_id: TripId::new(*raw)?,
        },
        Intent::AddTrip => Route::AddOrEditTrip { trip_id: None },
        Intent::EditTrip(raw) => Route::AddOrEditTrip {
            trip_id: Some(TripId::new(*raw)?),
        },
        Intent::ReturnToTrips => {
            return Ok(Resolution {
                op: StackOp::PopTo {
                    target: Route::Trips,
                    inclusive: false,
                },
                mode: None,
            });
        }
    };

    Ok(Resolution {
        mode: route.trip_mode(),
        op: StackOp::Push { route },
    })
}

/// Owns the back stack and applies resolved intents to it.
#[derive(Debug, Default)]
pub struct Navigator {
    stack: BackStack,
}

impl Navigator {
    /// A navigator with an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// A navigator showing `start`.
    pub fn starting_at(start: Route) -> Self {
        let mut navigator = Self::new();
        navigator.go_to(start);
        navigator
    }

    pub fn stack(&self) -> &BackStack {
        &self.stack
    }

    /// Resolves an intent and applies the resulting operation.
    pub fn dispatch(&mut self, intent: &Intent) -> Result<Resolution> {
        let resolution = resolve(intent, &self.stack)?;
        self.stack.apply(&resolution.op);
        debug!(
            ?intent,
            op = ?resolution.op,
            depth = self.stack.len(),
            "navigated"
        );
        Ok(resolution)
    }

    /// Pushes any route. Never fails.
    pub fn go_to(&mut self, route: Route) -> StackOp {
        let op = StackOp::Push { route };
        self.stack.apply(&op);
        debug!(%route, depth = self.stack.len(), "navigated");
        op
    }

    pub fn go_to_trip_detail(&mut self, trip_id: i64) -> Result<Resolution> {
        self.dispatch(&Intent::TripDetail(trip_id))
    }

    pub fn go_to_add_trip(&mut self) -> Resolution {
        let route = Route::AddOrEditTrip { trip_id: None };
        Resolution {
            mode: route.trip_mode(),
            op: self.go_to(route),
        }
    }

    pub fn go_to_edit_trip(&mut self, trip_id: i64) -> Result<Resolution> {
        self.dispatch(&Intent::EditTrip(trip_id))
    }

    /// Collapses the stack so exactly one `Trips` entry is on top.
    pub fn return_to_trips(&mut self) -> StackOp {
        let op = StackOp::PopTo {
            target: Route::Trips,
            inclusive: false,
        };
        self.stack.apply(&op);
        debug!(depth = self.stack.len(), "returned to trips");
        op
    }
}
