//! Catalog domain — selectable cities and menu items.
//!
//! A [`Catalog`] is read-only once constructed. Every lookup by id in the crate
//! goes through [`Catalog::menu_item`] and [`Catalog::city`].

pub mod builtin;
mod convert;
pub mod wire;

use crate::error::FlowError;
use crate::shared::{CityId, MenuItemId, Won};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub use builtin::BUILTIN_CATALOG;

// ─── MenuTag ─────────────────────────────────────────────────────────────────

/// Badge shown on a menu card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MenuTag {
    Best,
    Hot,
    New,
}

impl MenuTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuTag::Best => "Best",
            MenuTag::Hot => "Hot",
            MenuTag::New => "New",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "Best" => Some(MenuTag::Best),
            "Hot" => Some(MenuTag::Hot),
            "New" => Some(MenuTag::New),
            _ => None,
        }
    }

    /// Localized badge text.
    pub fn label(&self) -> &'static str {
        match self {
            MenuTag::Best => "베스트",
            MenuTag::Hot => "인기",
            MenuTag::New => "신메뉴",
        }
    }
}

impl fmt::Display for MenuTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── Entries ─────────────────────────────────────────────────────────────────

/// A menu item as offered by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuCatalogEntry {
    pub id: MenuItemId,
    pub name: String,
    pub localized_name: String,
    pub description: String,
    pub unit_price: Won,
    pub image_ref: String,
    pub tag: Option<MenuTag>,
}

/// A city the service delivers to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityCatalogEntry {
    pub id: CityId,
    pub name: String,
    pub localized_name: String,
    pub is_featured: bool,
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

/// Static reference data for one process lifetime.
///
/// Load JSON catalogs with [`Catalog::from_json`], which validates them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    cities: Vec<CityCatalogEntry>,
    menu: Vec<MenuCatalogEntry>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids, blank names and empty lists.
    pub fn new(
        cities: Vec<CityCatalogEntry>,
        menu: Vec<MenuCatalogEntry>,
    ) -> Result<Self, CatalogValidationError> {
        let mut errors = Vec::new();

        if cities.is_empty() {
            errors.push(CatalogValidationError::NoCities);
        }
        if menu.is_empty() {
            errors.push(CatalogValidationError::NoMenuItems);
        }

        let mut seen_cities = HashSet::new();
        for city in &cities {
            if !seen_cities.insert(&city.id) {
                errors.push(CatalogValidationError::DuplicateCity(city.id.clone()));
            }
            if is_blank(&city.name) || is_blank(&city.localized_name) {
                errors.push(CatalogValidationError::MissingCityName(city.id.to_string()));
            }
        }

        let mut seen_items = HashSet::new();
        for entry in &menu {
            if !seen_items.insert(&entry.id) {
                errors.push(CatalogValidationError::DuplicateMenuItem(entry.id.clone()));
            }
            if is_blank(&entry.name) || is_blank(&entry.localized_name) {
                errors.push(CatalogValidationError::MissingMenuItemName(entry.id.to_string()));
            }
        }

        if !errors.is_empty() {
            return Err(CatalogValidationError::Multiple(errors));
        }

        Ok(Self { cities, menu })
    }

    /// The launch catalog compiled into the crate.
    pub fn builtin() -> Self {
        BUILTIN_CATALOG.clone()
    }

    /// Parse and validate a catalog document.
    pub fn from_json(json: &str) -> Result<Self, FlowError> {
        let response: wire::CatalogResponse = serde_json::from_str(json)?;
        Ok(Catalog::try_from(response)?)
    }

    pub fn cities(&self) -> &[CityCatalogEntry] {
        &self.cities
    }

    /// Menu entries in display order.
    pub fn menu(&self) -> &[MenuCatalogEntry] {
        &self.menu
    }

    pub fn city(&self, id: &CityId) -> Option<&CityCatalogEntry> {
        self.cities.iter().find(|c| &c.id == id)
    }

    pub fn menu_item(&self, id: &MenuItemId) -> Option<&MenuCatalogEntry> {
        self.menu.iter().find(|m| &m.id == id)
    }

    pub fn unit_price(&self, id: &MenuItemId) -> Option<Won> {
        self.menu_item(id).map(|m| m.unit_price)
    }

    pub fn featured_cities(&self) -> impl Iterator<Item = &CityCatalogEntry> {
        self.cities.iter().filter(|c| c.is_featured)
    }

    pub fn other_cities(&self) -> impl Iterator<Item = &CityCatalogEntry> {
        self.cities.iter().filter(|c| !c.is_featured)
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogValidationError {
    Multiple(Vec<CatalogValidationError>),
    NoCities,
    NoMenuItems,
    DuplicateCity(CityId),
    DuplicateMenuItem(MenuItemId),
    MissingCityName(String),
    MissingMenuItemName(String),
    UnknownTag { item: String, tag: String },
    UnknownDefaultCity(CityId),
}

impl fmt::Display for CatalogValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogValidationError::Multiple(errors) => {
                writeln!(f, "Catalog validation errors:")?;
                for err in errors {
                    writeln!(f, "  - {}", err)?;
                }
                Ok(())
            }
            CatalogValidationError::NoCities => write!(f, "Catalog has no cities"),
            CatalogValidationError::NoMenuItems => write!(f, "Catalog has no menu items"),
            CatalogValidationError::DuplicateCity(id) => write!(f, "Duplicate city id: {}", id),
            CatalogValidationError::DuplicateMenuItem(id) => {
                write!(f, "Duplicate menu item id: {}", id)
            }
            CatalogValidationError::MissingCityName(id) => {
                write!(f, "Missing name for city: {}", id)
            }
            CatalogValidationError::MissingMenuItemName(id) => {
                write!(f, "Missing name for menu item: {}", id)
            }
            CatalogValidationError::UnknownTag { item, tag } => {
                write!(f, "Unknown tag {:?} on menu item: {}", tag, item)
            }
            CatalogValidationError::UnknownDefaultCity(id) => {
                write!(f, "Default city is not in the catalog: {}", id)
            }
        }
    }
}

impl std::error::Error for CatalogValidationError {}
