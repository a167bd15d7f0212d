//! Token codec: routes to flat strings and back.
//!
//! ```text
//! trips
//! trip_detail/<tripId>
//! add_trip
//! add_trip?tripId=<tripId>
//! map
//! profile
//! ```
//!
//! Ids are plain decimal: no sign, no leading zeros. Anything else is malformed,
//! so every route has exactly one token.

use super::{Result, Route, RouteError, TripId};

const TRIPS: &str = "trips";
const TRIP_DETAIL: &str = "trip_detail";
const ADD_TRIP: &str = "add_trip";
const MAP: &str = "map";
const PROFILE: &str = "profile";

/// Query parameter carrying the trip id on `add_trip`.
const ARG_TRIP_ID: &str = "tripId";

/// Scheme prefix for deep links.
pub const DEEP_LINK_SCHEME: &str = "voyago://";

/// Encodes a route as its token.
pub fn encode(route: &Route) -> String {
    match route {
        Route::Trips => TRIPS.to_string(),
        Route::TripDetail { trip_id } => format!("{TRIP_DETAIL}/{trip_id}"),
        Route::AddOrEditTrip { trip_id: None } => ADD_TRIP.to_string(),
        Route::AddOrEditTrip { trip_id: Some(id) } => format!("{ADD_TRIP}?{ARG_TRIP_ID}={id}"),
        Route::Map => MAP.to_string(),
        Route::Profile => PROFILE.to_string(),
    }
}

/// Decodes a token back into a route.
pub fn decode(token: &str) -> Result<Route> {
    let (path, query) = match token.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (token, None),
    };

    if let Some(query) = query
        && path != ADD_TRIP
    {
        return Err(RouteError::malformed(
            token,
            format!("'{path}' takes no query parameters (got '{query}')"),
        ));
    }

    match path.split_once('/') {
        Some((TRIP_DETAIL, raw)) => {
            let trip_id = parse_trip_id(token, raw)?;
            Ok(Route::TripDetail { trip_id })
        }
        None if path == TRIP_DETAIL => {
            Err(RouteError::malformed(token, "missing required tripId"))
        }
        Some(_) => Err(RouteError::malformed(token, "unknown route")),
        None => match path {
            TRIPS => Ok(Route::Trips),
            MAP => Ok(Route::Map),
            PROFILE => Ok(Route::Profile),
            ADD_TRIP => {
                let trip_id = query.map(|q| parse_add_trip_query(token, q)).transpose()?;
                Ok(Route::AddOrEditTrip { trip_id })
            }
            _ => Err(RouteError::malformed(token, "unknown route")),
        },
    }
}

/// Encodes a route as a `voyago://` deep link.
pub fn deep_link(route: &Route) -> String {
    format!("{DEEP_LINK_SCHEME}{}", encode(route))
}

/// Decodes a `voyago://` deep link.
pub fn decode_deep_link(uri: &str) -> Result<Route> {
    let token = uri
        .strip_prefix(DEEP_LINK_SCHEME)
        .ok_or_else(|| RouteError::malformed(uri, format!("expected {DEEP_LINK_SCHEME} scheme")))?;
    decode(token)
}

/// `tripId=<id>` and nothing else.
fn parse_add_trip_query(token: &str, query: &str) -> Result<TripId> {
    match query.split_once('=') {
        Some((ARG_TRIP_ID, raw)) => parse_trip_id(token, raw),
        _ => Err(RouteError::malformed(
            token,
            format!("expected '{ARG_TRIP_ID}=<id>' query (got '{query}')"),
        )),
    }
}

fn parse_trip_id(token: &str, raw: &str) -> Result<TripId> {
    if raw.is_empty() {
        return Err(RouteError::malformed(token, "missing required tripId"));
    }
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RouteError::malformed(
            token,
            format!("tripId '{raw}' is not a non-negative decimal number"),
        ));
    }
    if raw.len() > 1 && raw.starts_with('0') {
        return Err(RouteError::malformed(
            token,
            format!("tripId '{raw}' has leading zeros"),
        ));
    }
    let value: i64 = raw
        .parse()
        .map_err(|e| RouteError::malformed(token, format!("tripId '{raw}': {e}")))?;
    TripId::new(value).map_err(|_| RouteError::malformed(token, "tripId must be positive"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: i64) -> TripId {
        TripId::new(raw).unwrap()
    }

    fn all_shapes() -> Vec<Route> {
        vec![
            Route::Trips,
            Route::TripDetail { trip_id: id(1) },
            Route::TripDetail { trip_id: id(i64::MAX) },
            Route::AddOrEditTrip { trip_id: None },
            Route::AddOrEditTrip { trip_id: Some(id(123)) },
            Route::Map,
            Route::Profile,
        ]
    }

    fn assert_malformed(token: &str) {
        let err = decode(token).unwrap_err();
        assert!(
            matches!(err, RouteError::MalformedRoute { .. }),
            "expected MalformedRoute for '{token}', got {err:?}"
        );
    }

    #[test]
    fn tokens_match_the_table() {
        assert_eq!(encode(&Route::Trips), "trips");
        assert_eq!(encode(&Route::TripDetail { trip_id: id(42) }), "trip_detail/42");
        assert_eq!(encode(&Route::AddOrEditTrip { trip_id: None }), "add_trip");
        assert_eq!(
            encode(&Route::AddOrEditTrip { trip_id: Some(id(7)) }),
            "add_trip?tripId=7"
        );
        assert_eq!(encode(&Route::Map), "map");
        assert_eq!(encode(&Route::Profile), "profile");
    }

    #[test]
    fn every_shape_survives_the_codec() {
        for route in all_shapes() {
            assert_eq!(decode(&encode(&route)).unwrap(), route);
        }
    }

    #[test]
    fn non_numeric_id_is_malformed() {
        assert_malformed("trip_detail/abc");
        assert_malformed("add_trip?tripId=x1");
    }

    #[test]
    fn negative_and_signed_ids_are_malformed() {
        assert_malformed("trip_detail/-5");
        assert_malformed("trip_detail/+5");
        assert_malformed("add_trip?tripId=-1");
    }

    #[test]
    fn zero_and_leading_zero_ids_are_malformed() {
        assert_malformed("trip_detail/0");
        assert_malformed("trip_detail/007");
    }

    #[test]
    fn overflowing_id_is_malformed() {
        assert_malformed("trip_detail/9223372036854775808");
    }

    #[test]
    fn missing_required_id_is_malformed() {
        assert_malformed("trip_detail");
        assert_malformed("trip_detail/");
        assert_malformed("add_trip?tripId=");
    }

    #[test]
    fn unknown_routes_and_queries_are_malformed() {
        assert_malformed("");
        assert_malformed("settings");
        assert_malformed("Trips");
        assert_malformed("trips/1");
        assert_malformed("trip_detail/1/edit");
        assert_malformed("map?zoom=3");
        assert_malformed("add_trip?id=3");
        assert_malformed("add_trip?tripId=3&x=1");
    }

    #[test]
    fn deep_links_carry_the_scheme() {
        let route = Route::TripDetail { trip_id: id(123) };
        assert_eq!(deep_link(&route), "voyago://trip_detail/123");
        assert_eq!(decode_deep_link("voyago://trip_detail/123").unwrap(), route);
        assert_eq!(decode_deep_link("voyago://trips").unwrap(), Route::Trips);
    }

    #[test]
    fn deep_link_without_scheme_is_malformed() {
        let err = decode_deep_link("trips").unwrap_err();
        assert!(matches!(err, RouteError::MalformedRoute { .. }));
        let err = decode_deep_link("https://trips").unwrap_err();
        assert!(matches!(err, RouteError::MalformedRoute { .. }));
    }
}
