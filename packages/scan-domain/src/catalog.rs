use serde::Serialize;
use uuid::Uuid;

use crate::geo::GeoPoint;

/// Read-only product record as returned by the catalog store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
	pub id: Uuid,
	pub name: String,
	pub category: String,
	pub description: String,
	pub price: f64,
	pub image: Option<String>,
	pub unit: Option<String>,
	pub shop: Option<ShopRef>,
}
impl CatalogEntry {
	pub fn shop_location(&self) -> Option<&GeoPoint> {
		self.shop.as_ref().and_then(|shop| shop.location.as_ref())
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShopRef {
	pub id: Uuid,
	pub name: String,
	pub location: Option<GeoPoint>,
}

/// Catalog text field a matcher pass searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
	Name,
	Category,
	Description,
}
impl TextField {
	/// Pass order: strongest signal first.
	pub const PASSES: [Self; 3] = [Self::Name, Self::Category, Self::Description];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Name => "name",
			Self::Category => "category",
			Self::Description => "description",
		}
	}
}
