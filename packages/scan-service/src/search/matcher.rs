use std::collections::HashSet;

use uuid::Uuid;

use crate::{CatalogQuery, CatalogStore, Result};
use scan_domain::catalog::{CatalogEntry, TextField};

/// Ids collected so far, in collection order.
#[derive(Debug, Default)]
pub(crate) struct VisitedIds {
	order: Vec<Uuid>,
	seen: HashSet<Uuid>,
}
impl VisitedIds {
	pub(crate) fn contains(&self, id: &Uuid) -> bool {
		self.seen.contains(id)
	}

	pub(crate) fn insert(&mut self, id: Uuid) -> bool {
		if !self.seen.insert(id) {
			return false;
		}

		self.order.push(id);

		true
	}

	pub(crate) fn as_slice(&self) -> &[Uuid] {
		&self.order
	}

	pub(crate) fn len(&self) -> usize {
		self.order.len()
	}
}

/// Runs the name, category, and description passes in order until `max_results` ids are held.
///
/// Each pass only sees the ids collected before it, so passes cannot run concurrently.
pub(crate) async fn collect_candidates(
	catalog: &dyn CatalogStore,
	terms: &[String],
	max_results: u32,
) -> Result<Vec<CatalogEntry>> {
	let mut visited = VisitedIds::default();
	let mut out = Vec::new();

	if terms.is_empty() {
		tracing::debug!("No usable search terms; skipping catalog passes.");

		return Ok(out);
	}

	for field in TextField::PASSES {
		let remaining = (max_results as usize).saturating_sub(visited.len());

		if remaining == 0 {
			break;
		}

		let found = run_pass(catalog, field, terms, &visited, remaining as u32).await?;

		tracing::debug!(field = field.as_str(), remaining, hits = found.len(), "Catalog pass done.");

		for entry in found {
			if visited.insert(entry.id) {
				out.push(entry);
			}
		}
	}

	Ok(out)
}

/// One pass: `(terms, excluded ids, remaining cap) -> new entries`.
///
/// Entries the store returns despite the exclusion list, or twice, are dropped.
pub(crate) async fn run_pass(
	catalog: &dyn CatalogStore,
	field: TextField,
	terms: &[String],
	visited: &VisitedIds,
	remaining: u32,
) -> Result<Vec<CatalogEntry>> {
	let query = CatalogQuery { field, terms, excluded_ids: visited.as_slice(), limit: remaining };
	let entries = catalog.find_containing(query).await?;
	let mut seen = HashSet::new();
	let mut out = Vec::with_capacity(entries.len());

	for entry in entries {
		if visited.contains(&entry.id) || !seen.insert(entry.id) {
			continue;
		}

		out.push(entry);

		if out.len() >= remaining as usize {
			break;
		}
	}

	Ok(out)
}
