use unicode_normalization::UnicodeNormalization;

/// Canonical form used for every case-insensitive comparison: NFC, lowercased, trimmed.
pub fn normalize(text: &str) -> String {
	text.trim().nfc().collect::<String>().to_lowercase()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn folds_case_and_composition() {
		assert_eq!(normalize("  Pommes "), "pommes");
		assert_eq!(normalize("E\u{301}picerie"), "épicerie");
	}
}
