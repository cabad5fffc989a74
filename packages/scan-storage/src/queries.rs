use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{Error, Result, db::Db, models::ProductRow};
use scan_domain::catalog::{CatalogEntry, TextField};

/// Products whose `field` contains any of `terms` (case-insensitive), skipping `excluded_ids`.
///
/// Rows are ordered by product id before the limit applies.
pub async fn find_products_containing(
	db: &Db,
	field: TextField,
	terms: &[String],
	excluded_ids: &[Uuid],
	limit: u32,
) -> Result<Vec<CatalogEntry>> {
	find_products_containing_exec(&db.pool, field, terms, excluded_ids, limit).await
}

pub async fn find_products_containing_exec<'e, E>(
	executor: E,
	field: TextField,
	terms: &[String],
	excluded_ids: &[Uuid],
	limit: u32,
) -> Result<Vec<CatalogEntry>>
where
	E: Executor<'e, Database = Postgres>,
{
	if terms.is_empty() || limit == 0 {
		return Ok(Vec::new());
	}

	let patterns = terms.iter().map(|term| contains_pattern(term)).collect::<Vec<_>>();
	let limit = i64::from(limit);

	if patterns.iter().any(|pattern| pattern == "%%") {
		return Err(Error::InvalidArgument("Search terms must be non-empty.".to_string()));
	}

	let sql = format!(
		"\
SELECT
	p.product_id,
	p.name,
	p.category,
	p.description,
	p.price,
	p.image,
	p.unit,
	s.shop_id AS shop_id,
	s.name AS shop_name,
	s.location AS shop_location
FROM products p
LEFT JOIN shops s ON s.shop_id = p.shop_id
WHERE p.{column} ILIKE ANY($1)
	AND NOT (p.product_id = ANY($2))
ORDER BY p.product_id
LIMIT $3",
		column = column_name(field),
	);
	let rows: Vec<ProductRow> = sqlx::query_as(sql.as_str())
		.bind(patterns)
		.bind(excluded_ids)
		.bind(limit)
		.fetch_all(executor)
		.await?;

	Ok(rows.into_iter().map(ProductRow::into_entry).collect())
}

fn column_name(field: TextField) -> &'static str {
	match field {
		TextField::Name => "name",
		TextField::Category => "category",
		TextField::Description => "description",
	}
}

/// Wraps `term` for `ILIKE` so wildcard characters match literally.
pub fn contains_pattern(term: &str) -> String {
	let mut out = String::with_capacity(term.len() + 2);

	out.push('%');

	for ch in term.chars() {
		if matches!(ch, '%' | '_' | '\\') {
			out.push('\\');
		}

		out.push(ch);
	}

	out.push('%');

	out
}
