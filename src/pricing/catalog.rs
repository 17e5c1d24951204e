use crate::error::CostError;
use crate::pricing::calculator::ensure_non_negative;
use crate::pricing::models::ModelPrice;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::{debug, info};

/// Immutable, ordered set of model prices.
///
/// Iteration follows insertion order, lookups go through a name index.
#[derive(Debug, Clone)]
pub struct PriceCatalog {
    entries: Vec<ModelPrice>,
    index: HashMap<String, usize>,
}

impl PriceCatalog {
    /// Build a catalog, rejecting duplicate names and invalid rates
    pub fn from_entries(entries: Vec<ModelPrice>) -> Result<Self, CostError> {
        let mut index = HashMap::with_capacity(entries.len());

        for (position, entry) in entries.iter().enumerate() {
            if entry.model_name.trim().is_empty() {
                return Err(CostError::InvalidCatalog(
                    "model name cannot be empty".to_string(),
                ));
            }
            validate_rate(entry)?;

            if index.insert(entry.model_name.clone(), position).is_some() {
                return Err(CostError::InvalidCatalog(format!(
                    "duplicate model name: {}",
                    entry.model_name
                )));
            }
        }

        debug!("Built price catalog with {} models", entries.len());
        Ok(Self { entries, index })
    }

    /// The reference price list (USD per 1000 tokens)
    pub fn builtin() -> Self {
        let entries = vec![
            ModelPrice::new("Mistral AI", "mistral", 0.0027, 0.024),
            ModelPrice::new("OpenAPI GPT4", "openai", 0.03, 0.06),
            ModelPrice::new("OpenAPI GPT3.5-turbo", "openai", 0.0005, 0.0015),
            ModelPrice::new("Claude3 Haiku", "anthropic", 0.25 / 1000.0, 1.25 / 1000.0),
            ModelPrice::new("Claude3 Sonnet", "anthropic", 3.0 / 1000.0, 15.0 / 1000.0),
            ModelPrice::new("Claude3 Opus", "anthropic", 15.0 / 1000.0, 75.0 / 1000.0),
        ];

        let index = entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.model_name.clone(), position))
            .collect();

        Self { entries, index }
    }

    /// Process-wide builtin catalog, initialised on first use
    pub fn reference() -> &'static PriceCatalog {
        static REFERENCE: OnceLock<PriceCatalog> = OnceLock::new();
        REFERENCE.get_or_init(PriceCatalog::builtin)
    }

    /// Merge `overrides` into `base`.
    ///
    /// Entries whose name already exists, in `base` or earlier in
    /// `overrides`, replace that entry in place; new names are appended in
    /// the order given.
    pub fn merged(base: &PriceCatalog, overrides: Vec<ModelPrice>) -> Result<Self, CostError> {
        let mut entries = base.entries.clone();
        let mut positions = base.index.clone();
        let mut replaced = 0;

        for price in overrides {
            match positions.get(&price.model_name) {
                Some(&position) => {
                    entries[position] = price;
                    replaced += 1;
                }
                None => {
                    positions.insert(price.model_name.clone(), entries.len());
                    entries.push(price);
                }
            }
        }

        let catalog = Self::from_entries(entries)?;
        info!(
            "Price catalog ready: {} models ({} overridden)",
            catalog.len(),
            replaced
        );
        Ok(catalog)
    }

    pub fn get(&self, model: &str) -> Option<&ModelPrice> {
        self.index.get(model).map(|&position| &self.entries[position])
    }

    pub fn contains(&self, model: &str) -> bool {
        self.index.contains_key(model)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelPrice> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.model_name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn validate_rate(entry: &ModelPrice) -> Result<(), CostError> {
    ensure_non_negative("input_rate", entry.rate.input_rate)
        .and_then(|_| ensure_non_negative("output_rate", entry.rate.output_rate))
        .map_err(|e| CostError::InvalidCatalog(format!("{}: {}", entry.model_name, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_order_and_rates() {
        let catalog = PriceCatalog::builtin();
        let names: Vec<&str> = catalog.names().collect();
        assert_eq!(
            names,
            vec![
                "Mistral AI",
                "OpenAPI GPT4",
                "OpenAPI GPT3.5-turbo",
                "Claude3 Haiku",
                "Claude3 Sonnet",
                "Claude3 Opus",
            ]
        );

        let opus = catalog.get("Claude3 Opus").unwrap();
        assert_eq!(opus.rate.input_rate, 0.015);
        assert_eq!(opus.rate.output_rate, 0.075);
        assert_eq!(opus.provider, "anthropic");
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let rebuilt = PriceCatalog::from_entries(PriceCatalog::builtin().iter().cloned().collect());
        assert!(rebuilt.is_ok());
    }

    #[test]
    fn test_reference_is_shared() {
        let a = PriceCatalog::reference() as *const PriceCatalog;
        let b = PriceCatalog::reference() as *const PriceCatalog;
        assert_eq!(a, b);
        assert_eq!(PriceCatalog::reference().len(), 6);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = PriceCatalog::from_entries(vec![
            ModelPrice::new("a", "x", 0.1, 0.2),
            ModelPrice::new("a", "y", 0.3, 0.4),
        ]);
        assert!(matches!(result, Err(CostError::InvalidCatalog(ref msg)) if msg.contains("duplicate")));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let result = PriceCatalog::from_entries(vec![ModelPrice::new("a", "x", -0.1, 0.2)]);
        assert!(matches!(result, Err(CostError::InvalidCatalog(ref msg)) if msg.starts_with("a:")));
    }

    #[test]
    fn test_merge_overrides_in_place_and_appends() {
        let base = PriceCatalog::builtin();
        let merged = PriceCatalog::merged(
            &base,
            vec![
                ModelPrice::new("OpenAPI GPT4", "openai", 0.01, 0.03),
                ModelPrice::new("Local Llama", "self-hosted", 0.0, 0.0),
            ],
        )
        .unwrap();

        assert_eq!(merged.len(), 7);
        assert_eq!(merged.names().nth(1), Some("OpenAPI GPT4"));
        assert_eq!(merged.get("OpenAPI GPT4").unwrap().rate.input_rate, 0.01);
        assert_eq!(merged.names().last(), Some("Local Llama"));
        assert!(merged.contains("Claude3 Haiku"));
    }

    #[test]
    fn test_merge_later_override_replaces_new_entry() {
        let base = PriceCatalog::builtin();
        let merged = PriceCatalog::merged(
            &base,
            vec![
                ModelPrice::new("Local Llama", "self-hosted", 0.001, 0.002),
                ModelPrice::new("Local Llama", "self-hosted", 0.0, 0.0),
            ],
        )
        .unwrap();

        assert_eq!(merged.len(), 7);
        let llama = merged.get("Local Llama").unwrap();
        assert_eq!(llama.rate.input_rate, 0.0);
        assert_eq!(llama.rate.output_rate, 0.0);
        assert_eq!(merged.names().last(), Some("Local Llama"));
    }
}
