use serde_json::Value;
use uuid::Uuid;

use scan_domain::{
	catalog::{CatalogEntry, ShopRef},
	geo,
};

/// Product joined with its owning shop.
#[derive(Debug, sqlx::FromRow)]
pub struct ProductRow {
	pub product_id: Uuid,
	pub name: String,
	pub category: Option<String>,
	pub description: Option<String>,
	pub price: f64,
	pub image: Option<String>,
	pub unit: Option<String>,
	pub shop_id: Option<Uuid>,
	pub shop_name: Option<String>,
	pub shop_location: Option<Value>,
}
impl ProductRow {
	pub fn into_entry(self) -> CatalogEntry {
		let shop = self.shop_id.map(|id| {
			let location = self.shop_location.as_ref().and_then(geo::parse_location);

			if location.is_none() && self.shop_location.is_some() {
				tracing::debug!(shop_id = %id, "Shop location is not a usable coordinate pair.");
			}

			ShopRef { id, name: self.shop_name.unwrap_or_default(), location }
		});

		CatalogEntry {
			id: self.product_id,
			name: self.name,
			category: self.category.unwrap_or_default(),
			description: self.description.unwrap_or_default(),
			price: self.price,
			image: self.image,
			unit: self.unit,
			shop,
		}
	}
}
