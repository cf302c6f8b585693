use std::collections::HashMap;

/// Maps raw detector vocabulary to canonical food names.
///
/// Normalization is total: lowercase, trim, underscore folding, then a static
/// synonym lookup. An unknown label passes through unchanged so fusion and
/// aggregation still see a usable key.
#[derive(Debug, Clone)]
pub struct Normalizer {
    synonyms: HashMap<String, String>,
}

impl Normalizer {
    pub fn new(synonyms: HashMap<String, String>) -> Self {
        Self { synonyms }
    }

    /// Normalizer with the built-in synonym table covering the detector
    /// vocabularies (western fast-food model + Indian food model)
    pub fn with_defaults() -> Self {
        let entries: &[(&str, &str)] = &[
            ("fries", "french fries"),
            ("chips", "french fries"),
            ("burger", "hamburger"),
            ("cheeseburger", "hamburger"),
            ("idlis", "idli"),
            ("dosas", "dosa"),
            ("chapathi", "chapati"),
            ("roti", "chapati"),
            ("curd", "yogurt"),
            ("dahi", "yogurt"),
            ("coke", "cola"),
            ("soft drink", "cola"),
            ("noodle", "noodles"),
            ("chutneys", "chutney"),
        ];

        let synonyms = entries
            .iter()
            .map(|(raw, canonical)| (raw.to_string(), canonical.to_string()))
            .collect();

        Self::new(synonyms)
    }

    /// Canonicalize one raw label. Never fails; a miss returns the cleaned
    /// input unchanged.
    pub fn normalize(&self, raw: &str) -> String {
        let cleaned = raw.trim().to_lowercase().replace('_', " ");
        // Detector labels sometimes carry doubled whitespace after folding
        let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

        match self.synonyms.get(&cleaned) {
            Some(canonical) => canonical.clone(),
            None => cleaned,
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Split a comma-separated free-text field (conditions, food description)
/// into lowercase trimmed tokens, dropping empties
pub fn parse_comma_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_synonym() {
        let normalizer = Normalizer::with_defaults();

        assert_eq!(normalizer.normalize("fries"), "french fries");
        assert_eq!(normalizer.normalize("Burger"), "hamburger");
        assert_eq!(normalizer.normalize("idlis"), "idli");
    }

    #[test]
    fn test_normalize_passthrough_on_miss() {
        let normalizer = Normalizer::with_defaults();

        assert_eq!(normalizer.normalize("quinoa salad"), "quinoa salad");
    }

    #[test]
    fn test_normalize_cleans_detector_labels() {
        let normalizer = Normalizer::with_defaults();

        assert_eq!(normalizer.normalize("  French_Fries "), "french fries");
        assert_eq!(normalizer.normalize("soft_drink"), "cola");
    }

    #[test]
    fn test_normalize_empty_input() {
        let normalizer = Normalizer::with_defaults();

        assert_eq!(normalizer.normalize("   "), "");
    }

    #[test]
    fn test_parse_comma_list() {
        let tokens = parse_comma_list(" Diabetic, high_bp ,,  ");
        assert_eq!(tokens, vec!["diabetic", "high_bp"]);

        assert!(parse_comma_list("").is_empty());
    }
}
