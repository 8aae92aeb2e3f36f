use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::products::{ClosingHour, Coordinates};
use crate::ConfigError;

/// Which hand-written listing mapping to run against a site's pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterKind {
    Ace,
    Cvs,
    Safeway,
}

impl std::fmt::Display for AdapterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdapterKind::Ace => write!(f, "ace"),
            AdapterKind::Cvs => write!(f, "cvs"),
            AdapterKind::Safeway => write!(f, "safeway"),
        }
    }
}

/// What a task does when a listing's price text cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceParsePolicy {
    /// Drop the listing, record a diagnostic, keep going.
    #[default]
    Skip,
    /// Treat the failure as a layout change: stop every task of the site.
    HaltSite,
}

/// Fixed metadata copied onto every record scraped for a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreInfo {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub coordinates: Coordinates,
    pub closing_hour: ClosingHour,
}

/// One retailer: its task table, store metadata and fetch limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Short slug used in logs and for `--site` filtering, e.g. `"cvs"`.
    pub name: String,
    pub adapter: AdapterKind,
    /// Origin used to resolve relative product and image links.
    pub base_url: String,
    /// Listing URL with `{category}`, `{subcategory}`, `{page}` (1-based),
    /// `{page_index}` (0-based) and `{page_size}` placeholders.
    pub url_template: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    pub max_pages: u32,
    /// Budget for fetching and rendering a single page.
    pub timeout_secs: u64,
    #[serde(default)]
    pub inter_page_delay_ms: u64,
    /// End a task early once a page loads with zero listings.
    #[serde(default)]
    pub stop_on_empty_page: bool,
    #[serde(default)]
    pub price_parse_policy: PriceParsePolicy,
    pub store: StoreInfo,
    /// Category slug to subcategory slugs.
    pub categories: BTreeMap<String, Vec<String>>,
}

fn default_page_size() -> u32 {
    48
}

impl SiteConfig {
    /// One task per (category, subcategory) pair, in category order.
    #[must_use]
    pub fn tasks(&self) -> Vec<TaskSpec> {
        self.categories
            .iter()
            .flat_map(|(category, subcategories)| {
                subcategories.iter().map(move |subcategory| TaskSpec {
                    site: self.name.clone(),
                    category: category.clone(),
                    subcategory: subcategory.clone(),
                })
            })
            .collect()
    }

    /// Deterministic listing URL for one page of a task.
    #[must_use]
    pub fn page_url(&self, task: &TaskSpec, page_index: u32) -> String {
        self.url_template
            .replace("{category}", &task.category)
            .replace("{subcategory}", &task.subcategory)
            .replace("{page_index}", &page_index.to_string())
            .replace("{page}", &(page_index + 1).to_string())
            .replace("{page_size}", &self.page_size.to_string())
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    #[must_use]
    pub fn inter_page_delay(&self) -> Duration {
        Duration::from_millis(self.inter_page_delay_ms)
    }
}

/// Identity of one task: every page of a (site, category, subcategory).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskSpec {
    pub site: String,
    pub category: String,
    pub subcategory: String,
}

impl std::fmt::Display for TaskSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.site, self.category, self.subcategory)
    }
}

#[derive(Debug, Deserialize)]
pub struct SitesFile {
    pub sites: Vec<SiteConfig>,
}

impl SitesFile {
    /// Returns the named sites, or every site when `names` is empty.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if a name is not configured.
    pub fn select(&self, names: &[String]) -> Result<Vec<SiteConfig>, ConfigError> {
        if names.is_empty() {
            return Ok(self.sites.clone());
        }
        names
            .iter()
            .map(|name| {
                self.sites
                    .iter()
                    .find(|s| s.name.eq_ignore_ascii_case(name))
                    .cloned()
                    .ok_or_else(|| ConfigError::Validation(format!("unknown site: '{name}'")))
            })
            .collect()
    }
}

/// Load and validate the site table from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_sites(path: &Path) -> Result<SitesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SitesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let sites_file: SitesFile = serde_yaml::from_str(&content)?;

    validate_sites(&sites_file)?;

    Ok(sites_file)
}

fn validate_sites(sites_file: &SitesFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for site in &sites_file.sites {
        if site.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site name must be non-empty".to_string(),
            ));
        }

        if !seen_names.insert(site.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate site name: '{}'",
                site.name
            )));
        }

        if !site.url_template.contains("{category}") || !site.url_template.contains("{subcategory}")
        {
            return Err(ConfigError::Validation(format!(
                "site '{}' url_template must contain {{category}} and {{subcategory}}",
                site.name
            )));
        }

        if site.max_pages == 0 {
            return Err(ConfigError::Validation(format!(
                "site '{}' has max_pages 0; must be at least 1",
                site.name
            )));
        }

        if site.timeout_secs == 0 {
            return Err(ConfigError::Validation(format!(
                "site '{}' has timeout_secs 0; must be at least 1",
                site.name
            )));
        }

        if !site.store.coordinates.is_valid() {
            return Err(ConfigError::Validation(format!(
                "site '{}' has out-of-range coordinates ({}, {}); expected latitude then longitude",
                site.name, site.store.coordinates.latitude, site.store.coordinates.longitude
            )));
        }

        if site.categories.is_empty() {
            return Err(ConfigError::Validation(format!(
                "site '{}' has no categories",
                site.name
            )));
        }

        for (category, subcategories) in &site.categories {
            if subcategories.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "site '{}' category '{category}' has no subcategories",
                    site.name
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "sites_test.rs"]
mod tests;
