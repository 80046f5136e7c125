//! The launch catalog: fried-chicken menu and the cities we take orders for.

use super::{Catalog, CityCatalogEntry, MenuCatalogEntry, MenuTag};
use crate::shared::{CityId, MenuItemId, Won};

fn city(id: &str, name: &str, localized_name: &str, is_featured: bool) -> CityCatalogEntry {
    CityCatalogEntry {
        id: CityId::from(id),
        name: name.to_string(),
        localized_name: localized_name.to_string(),
        is_featured,
    }
}

fn menu_item(
    id: &str,
    name: &str,
    localized_name: &str,
    description: &str,
    price: u64,
    image_ref: &str,
    tag: Option<MenuTag>,
) -> MenuCatalogEntry {
    MenuCatalogEntry {
        id: MenuItemId::from(id),
        name: name.to_string(),
        localized_name: localized_name.to_string(),
        description: description.to_string(),
        unit_price: Won::new(price),
        image_ref: image_ref.to_string(),
        tag,
    }
}

lazy_static::lazy_static! {
    /// Built-in catalog. Ids are unique by construction.
    pub static ref BUILTIN_CATALOG: Catalog = Catalog {
        cities: vec![
            city("seoul", "Seoul", "서울", true),
            city("busan", "Busan", "부산", true),
            city("incheon", "Incheon", "인천", false),
            city("daegu", "Daegu", "대구", false),
            city("daejeon", "Daejeon", "대전", false),
            city("gwangju", "Gwangju", "광주", false),
            city("suwon", "Suwon", "수원", false),
            city("jeju", "Jeju", "제주", true),
        ],
        menu: vec![
            menu_item(
                "bbq-ppum",
                "BBQ Cheese Powder",
                "BBQ 뿜치킨",
                "바삭한 치킨 위에 진한 치즈 파우더를 듬뿍! BBQ만의 시그니처 치즈 치킨.",
                22000,
                "/menu-3.jpg",
                Some(MenuTag::New),
            ),
            menu_item(
                "bbq-olive",
                "BBQ Golden Olive",
                "BBQ 황금올리브",
                "100% 올리브유로 튀겨낸 담백하고 바삭한 프리미엄 후라이드. BBQ 대표 메뉴!",
                20000,
                "/menu-4.jpg",
                Some(MenuTag::Best),
            ),
            menu_item(
                "bhc-ppuring",
                "BHC Ppurinkle",
                "BHC 뿌링클",
                "달콤한 치즈 시즈닝을 뿌린 BHC 인기 메뉴. 특제 뿌링 소스와 함께!",
                21000,
                "/menu-1.png",
                None,
            ),
            menu_item(
                "bhc-makcho",
                "BHC Mak Choking",
                "BHC 막초킹",
                "마늘 간장 소스에 파채와 청양고추를 더한 매콤달콤한 갈릭 치킨.",
                21000,
                "/menu-5.png",
                Some(MenuTag::Hot),
            ),
            menu_item(
                "kyochon-red",
                "Kyochon Red Combo",
                "교촌 레드콤보",
                "교촌만의 비법 레드 양념 소스! 달콤하고 매콤한 국민 양념 치킨. 무와 함께 제공.",
                22000,
                "/menu-2.jpg",
                None,
            ),
        ],
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::DEFAULT_CITY_ID;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let rebuilt = Catalog::new(
            BUILTIN_CATALOG.cities().to_vec(),
            BUILTIN_CATALOG.menu().to_vec(),
        );
        assert!(rebuilt.is_ok());
    }

    #[test]
    fn test_builtin_contains_default_city() {
        assert!(BUILTIN_CATALOG.city(&CityId::from(DEFAULT_CITY_ID)).is_some());
    }

    #[test]
    fn test_builtin_featured_cities() {
        let featured: Vec<_> = BUILTIN_CATALOG
            .featured_cities()
            .map(|c| c.localized_name.as_str())
            .collect();
        assert_eq!(featured, ["서울", "부산", "제주"]);
    }
}
