//! Conversion: CatalogResponse → Catalog (TryFrom + validation).

use super::wire;
use super::{Catalog, CatalogValidationError, CityCatalogEntry, MenuCatalogEntry, MenuTag};
use crate::shared::{CityId, MenuItemId, Won};

impl TryFrom<wire::CityResponse> for CityCatalogEntry {
    type Error = CatalogValidationError;

    fn try_from(source: wire::CityResponse) -> Result<Self, Self::Error> {
        let name = source
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| CatalogValidationError::MissingCityName(source.id.clone()))?;
        let localized_name = source.localized_name.unwrap_or_else(|| name.clone());

        Ok(CityCatalogEntry {
            id: CityId::from(source.id),
            name,
            localized_name,
            is_featured: source.featured,
        })
    }
}

impl TryFrom<wire::MenuItemResponse> for MenuCatalogEntry {
    type Error = CatalogValidationError;

    fn try_from(source: wire::MenuItemResponse) -> Result<Self, Self::Error> {
        let mut errors: Vec<CatalogValidationError> = Vec::new();

        let name = source
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| {
                errors.push(CatalogValidationError::MissingMenuItemName(source.id.clone()));
                String::new()
            });

        let tag = match source.tag.as_deref() {
            None => None,
            Some(raw) => MenuTag::from_name(raw).or_else(|| {
                errors.push(CatalogValidationError::UnknownTag {
                    item: source.id.clone(),
                    tag: raw.to_string(),
                });
                None
            }),
        };

        if errors.len() == 1 {
            return Err(errors.remove(0));
        }
        if !errors.is_empty() {
            return Err(CatalogValidationError::Multiple(errors));
        }

        Ok(MenuCatalogEntry {
            localized_name: source.localized_name.unwrap_or_else(|| name.clone()),
            name,
            id: MenuItemId::from(source.id),
            description: source.description.unwrap_or_default(),
            unit_price: Won::new(source.price),
            image_ref: source.image.unwrap_or_default(),
            tag,
        })
    }
}

impl TryFrom<wire::CatalogResponse> for Catalog {
    type Error = CatalogValidationError;

    fn try_from(source: wire::CatalogResponse) -> Result<Self, Self::Error> {
        let mut errors: Vec<CatalogValidationError> = Vec::new();

        let mut cities = Vec::with_capacity(source.cities.len());
        for c in source.cities {
            match c.try_into() {
                Ok(city) => cities.push(city),
                Err(err) => errors.push(err),
            }
        }

        let mut menu = Vec::with_capacity(source.menu.len());
        for m in source.menu {
            match m.try_into() {
                Ok(entry) => menu.push(entry),
                Err(err) => errors.push(err),
            }
        }

        if !errors.is_empty() {
            return Err(CatalogValidationError::Multiple(errors));
        }

        Catalog::new(cities, menu)
    }
}
