//! Routes: the closed set of destinations a Voyago host can show.
//!
//! A [`Route`] is the in-memory identity of a screen. Its flat token form
//! (`trips`, `trip_detail/42`, `add_trip?tripId=7`, ...) lives in [`codec`].

mod codec;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use codec::{decode, decode_deep_link, deep_link, encode};

/// Errors produced while decoding tokens or resolving navigation intents.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// The token matches no known pattern, or a required id is missing or unparseable.
    #[error("malformed route '{token}': {reason}")]
    MalformedRoute { token: String, reason: String },

    /// A trip identifier was zero or negative.
    #[error("invalid trip identifier: {0} (must be positive)")]
    InvalidIdentifier(i64),
}

impl RouteError {
    pub(crate) fn malformed(token: &str, reason: impl Into<String>) -> Self {
        Self::MalformedRoute {
            token: token.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = core::result::Result<T, RouteError>;

/// A trip identifier. Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct TripId(i64);

impl TripId {
    /// Validates a raw identifier.
    pub fn new(raw: i64) -> Result<Self> {
        if raw <= 0 {
            return Err(RouteError::InvalidIdentifier(raw));
        }
        Ok(Self(raw))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for TripId {
    type Error = RouteError;

    fn try_from(raw: i64) -> Result<Self> {
        Self::new(raw)
    }
}

impl From<TripId> for i64 {
    fn from(id: TripId) -> Self {
        id.0
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A navigable destination plus its parameters.
///
/// Adding a screen means adding a variant here and teaching the codec its token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Route {
    /// List of all trips. The home destination.
    Trips,

    /// One trip, by id.
    #[serde(rename_all = "camelCase")]
    TripDetail { trip_id: TripId },

    /// Add a new trip (`trip_id` absent) or edit an existing one.
    #[serde(rename_all = "camelCase")]
    AddOrEditTrip {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trip_id: Option<TripId>,
    },

    /// Map of all trips.
    Map,

    /// Profile and statistics.
    Profile,
}

/// Whether the add/edit screen creates a new trip or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "tripId", rename_all = "camelCase")]
pub enum TripMode {
    Create,
    Edit(TripId),
}

impl Route {
    /// The create/edit mode, for the add/edit destination only.
    pub fn trip_mode(&self) -> Option<TripMode> {
        match self {
            Self::AddOrEditTrip { trip_id: None } => Some(TripMode::Create),
            Self::AddOrEditTrip { trip_id: Some(id) } => Some(TripMode::Edit(*id)),
            _ => None,
        }
    }

    /// Human-readable screen title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Trips => "Trips",
            Self::TripDetail { .. } => "Trip detail",
            Self::AddOrEditTrip { trip_id: None } => "New trip",
            Self::AddOrEditTrip { trip_id: Some(_) } => "Edit trip",
            Self::Map => "Map",
            Self::Profile => "Profile",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(self))
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(token: &str) -> Result<Self> {
        decode(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trip_id_rejects_zero_and_negative() {
        assert_eq!(TripId::new(0), Err(RouteError::InvalidIdentifier(0)));
        assert_eq!(TripId::new(-3), Err(RouteError::InvalidIdentifier(-3)));
        assert_eq!(TripId::new(1).unwrap().get(), 1);
    }

    #[test]
    fn trip_mode_follows_id_presence() {
        let id = TripId::new(9).unwrap();
        assert_eq!(
            Route::AddOrEditTrip { trip_id: None }.trip_mode(),
            Some(TripMode::Create)
        );
        assert_eq!(
            Route::AddOrEditTrip { trip_id: Some(id) }.trip_mode(),
            Some(TripMode::Edit(id))
        );
        assert_eq!(Route::TripDetail { trip_id: id }.trip_mode(), None);
        assert_eq!(Route::Trips.trip_mode(), None);
    }

    #[test]
    fn serializes_as_tagged_json() {
        let route = Route::TripDetail {
            trip_id: TripId::new(5).unwrap(),
        };
        let json = serde_json::to_string(&route).unwrap();
        assert_eq!(json, r#"{"kind":"tripDetail","tripId":5}"#);

        let create = serde_json::to_string(&Route::AddOrEditTrip { trip_id: None }).unwrap();
        assert_eq!(create, r#"{"kind":"addOrEditTrip"}"#);
    }

    #[test]
    fn deserialize_revalidates_trip_id() {
        let err = serde_json::from_str::<Route>(r#"{"kind":"tripDetail","tripId":0}"#);
        assert!(err.is_err());

        let ok: Route = serde_json::from_str(r#"{"kind":"addOrEditTrip","tripId":12}"#).unwrap();
        assert_eq!(
            ok,
            Route::AddOrEditTrip {
                trip_id: Some(TripId::new(12).unwrap())
            }
        );
    }

    #[test]
    fn display_and_from_str_use_the_codec() {
        let route: Route = "trip_detail/8".parse().unwrap();
        assert_eq!(route.to_string(), "trip_detail/8");
    }
}
