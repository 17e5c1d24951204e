use crate::error::CostError;
use crate::pricing::models::ModelPrice;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Catalog file structure, shared by the TOML and JSON formats
#[derive(Debug, Default, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub models: Vec<CatalogEntry>,
}

/// Individual model pricing entry, prices per 1000 tokens
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CatalogEntry {
    pub name: String,
    #[serde(default)]
    pub provider: Option<String>,
    pub input_rate: f64,
    pub output_rate: f64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CatalogEntry {
    pub fn into_model_price(self) -> ModelPrice {
        let provider = match self.provider {
            Some(provider) => provider,
            None => infer_provider(&self.name),
        };

        let mut price = ModelPrice::new(&self.name, &provider, self.input_rate, self.output_rate);
        if let Some(currency) = self.currency {
            price.currency = currency;
        }
        price.notes = self.notes;
        price
    }
}

/// Parse a TOML catalog (`[[models]]` tables)
pub fn parse_catalog_toml(content: &str) -> Result<Vec<ModelPrice>, CostError> {
    let file: CatalogFile = toml::from_str(content)
        .map_err(|e| CostError::InvalidCatalog(format!("Failed to parse catalog TOML: {}", e)))?;
    Ok(convert(file))
}

/// Parse a JSON catalog (`{"models": [...]}`)
pub fn parse_catalog_json(content: &str) -> Result<Vec<ModelPrice>, CostError> {
    let file: CatalogFile = serde_json::from_str(content)
        .map_err(|e| CostError::InvalidCatalog(format!("Failed to parse catalog JSON: {}", e)))?;
    Ok(convert(file))
}

/// Load catalog entries from disk, picking the format from the file extension
pub fn load_catalog_file(path: &Path) -> Result<Vec<ModelPrice>, CostError> {
    info!("Loading price catalog from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| {
        CostError::InvalidCatalog(format!("Failed to read {}: {}", path.display(), e))
    })?;
    debug!("Read {} bytes of catalog data", content.len());

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => parse_catalog_json(&content),
        Some("toml") => parse_catalog_toml(&content),
        other => Err(CostError::InvalidCatalog(format!(
            "Unsupported catalog format: {}",
            other.unwrap_or("<none>")
        ))),
    }
}

fn convert(file: CatalogFile) -> Vec<ModelPrice> {
    let prices: Vec<ModelPrice> = file
        .models
        .into_iter()
        .map(CatalogEntry::into_model_price)
        .collect();
    info!("Parsed {} model prices", prices.len());
    prices
}

/// Infer provider from model name
fn infer_provider(model_name: &str) -> String {
    let name = model_name.to_ascii_lowercase();
    if name.starts_with("claude") {
        "anthropic".to_string()
    } else if name.starts_with("gpt") || name.starts_with("openapi") || name.starts_with("o1") {
        "openai".to_string()
    } else if name.starts_with("mistral") {
        "mistral".to_string()
    } else if name.starts_with("gemini") {
        "gemini".to_string()
    } else {
        "unknown".to_string()
    }
}
