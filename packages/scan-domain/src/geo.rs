use serde::{Deserialize, Serialize};
use serde_json::Value;

const EARTH_RADIUS_KM: f64 = 6_371.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
	pub lat: f64,
	pub lng: f64,
}
impl GeoPoint {
	/// Returns `None` unless both coordinates are finite and within range.
	pub fn new(lat: f64, lng: f64) -> Option<Self> {
		if !lat.is_finite() || !lng.is_finite() {
			return None;
		}
		if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
			return None;
		}

		Some(Self { lat, lng })
	}
}

/// Reads a location stored as `{lat, lng}`, `{latitude, longitude}`, or `[lat, lng]`.
///
/// Numeric strings are accepted. Any other shape yields `None`.
pub fn parse_location(value: &Value) -> Option<GeoPoint> {
	let (lat, lng) = match value {
		Value::Array(items) if items.len() >= 2 => (&items[0], &items[1]),
		Value::Object(map) => {
			let lat = map.get("lat").or_else(|| map.get("latitude"))?;
			let lng = map
				.get("lng")
				.or_else(|| map.get("lon"))
				.or_else(|| map.get("longitude"))?;

			(lat, lng)
		},
		_ => return None,
	};

	GeoPoint::new(coordinate(lat)?, coordinate(lng)?)
}

fn coordinate(value: &Value) -> Option<f64> {
	match value {
		Value::Number(number) => number.as_f64(),
		Value::String(text) => text.trim().parse().ok(),
		_ => None,
	}
}

/// Great-circle distance in kilometers.
pub fn haversine_km(from: &GeoPoint, to: &GeoPoint) -> f64 {
	let d_lat = (to.lat - from.lat).to_radians();
	let d_lng = (to.lng - from.lng).to_radians();
	let a = (d_lat / 2.0).sin().powi(2)
		+ from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
	let c = 2.0 * a.sqrt().atan2((1.0 - a).max(0.0).sqrt());

	(EARTH_RADIUS_KM * c).max(0.0)
}

/// Distance between two optional points; undefined when either side is missing.
pub fn distance_km(from: Option<&GeoPoint>, to: Option<&GeoPoint>) -> Option<f64> {
	let distance = haversine_km(from?, to?);

	distance.is_finite().then_some(distance)
}
