//! Wire types for catalog JSON supplied by a catalog provider.

use serde::{Deserialize, Serialize};

/// Raw city entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CityResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localized_name: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

/// Raw menu entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItemResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localized_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// A full catalog document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogResponse {
    #[serde(default)]
    pub cities: Vec<CityResponse>,
    #[serde(default)]
    pub menu: Vec<MenuItemResponse>,
}
