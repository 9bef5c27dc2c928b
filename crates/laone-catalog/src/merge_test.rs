use laone_core::CategoryBucket;

use super::*;
use crate::types::{Folder, Miniature, SalePrice, StockImage};

// -----------------------------------------------------------------------
// fixtures
// -----------------------------------------------------------------------

fn assortment(code: &str, prices: &[i64]) -> RawAssortmentEntry {
    RawAssortmentEntry {
        external_code: code.to_owned(),
        sale_prices: prices.iter().map(|&value| SalePrice { value }).collect(),
    }
}

fn stock(code: &str, name: &str, path_name: &str, leaf: &str) -> RawStockEntry {
    RawStockEntry {
        external_code: code.to_owned(),
        name: name.to_owned(),
        image: None,
        folder: Folder {
            path_name: path_name.to_owned(),
            name: leaf.to_owned(),
        },
    }
}

fn with_image(mut row: RawStockEntry, href: &str) -> RawStockEntry {
    row.image = Some(StockImage {
        miniature: Miniature {
            download_href: href.to_owned(),
        },
    });
    row
}

fn flat<'a>(catalog: &'a Catalog, key: &str) -> &'a [Product] {
    match catalog.get(key) {
        Some(CategoryBucket::Flat(products)) => products,
        other => panic!("expected flat bucket under {key}, got {other:?}"),
    }
}

// -----------------------------------------------------------------------
// merge
// -----------------------------------------------------------------------

#[test]
fn prices_pass_through_unchanged() {
    let a = vec![assortment("A1", &[1000, 900, 800, 700])];
    let s = vec![stock("A1", "Пинцет", "Инструменты", "Инструменты")];

    let catalog = merge(&a, &s, &CategoryRules::default()).unwrap();
    let products = flat(&catalog, "Инструменты");
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].retail_price, 1000);
    assert_eq!(products[0].price_from_5k, 900);
    assert_eq!(products[0].price_from_15k, 800);
    assert_eq!(products[0].price_from_100k, 700);
}

#[test]
fn image_is_none_when_absent_and_exact_when_present() {
    let a = vec![
        assortment("A1", &[1, 2, 3, 4]),
        assortment("A2", &[1, 2, 3, 4]),
    ];
    let href = "https://api.example.com/download/abc?miniature=true";
    let s = vec![
        stock("A1", "No picture", "Root/Brows", "Brows"),
        with_image(stock("A2", "Picture", "Root/Brows", "Brows"), href),
    ];

    let catalog = merge(&a, &s, &CategoryRules::default()).unwrap();
    let products = flat(&catalog, "Brows");
    assert_eq!(products[0].image, None);
    assert_eq!(products[1].image.as_deref(), Some(href));
}

#[test]
fn split_category_becomes_synthetic_top_level_keys() {
    let a = vec![assortment("L1", &[1, 2, 3, 4]), assortment("L2", &[1, 2, 3, 4])];
    let s = vec![
        stock("L1", "Barbara 0.07", "Root/Ресницы/Barbara", "Barbara"),
        stock("L2", "Enigma 0.10", "Root/Ресницы/Enigma", "Enigma"),
    ];

    let catalog = merge(&a, &s, &CategoryRules::default()).unwrap();
    assert!(catalog.get("Ресницы").is_none());
    assert_eq!(flat(&catalog, "Ресницы_Barbara")[0].name, "Barbara 0.07");
    assert_eq!(flat(&catalog, "Ресницы_Enigma")[0].name, "Enigma 0.10");
}

#[test]
fn split_category_with_empty_subcategory_uses_trailing_underscore() {
    let a = vec![assortment("L1", &[1, 2, 3, 4])];
    let s = vec![stock("L1", "Loose lash", "Root/Ресницы", "")];

    let catalog = merge(&a, &s, &CategoryRules::default()).unwrap();
    assert_eq!(flat(&catalog, "Ресницы_").len(), 1);
}

#[test]
fn grouped_category_nests_products_by_subcategory() {
    let a = vec![assortment("C1", &[1, 2, 3, 4]), assortment("C2", &[1, 2, 3, 4])];
    let s = vec![
        stock(
            "C1",
            "Аппликаторы 100шт",
            "Root/Расходные материалы/Аппликаторы для губ",
            "Аппликаторы для губ",
        ),
        stock(
            "C2",
            "Нефритовый камень",
            "Root/Расходные материалы/Камни для клея",
            "Камни для клея",
        ),
    ];

    let catalog = merge(&a, &s, &CategoryRules::default()).unwrap();
    let Some(CategoryBucket::Grouped(groups)) = catalog.get("Расходные материалы") else {
        panic!("expected grouped bucket");
    };
    assert_eq!(
        groups.get("Аппликаторы для губ").unwrap()[0].name,
        "Аппликаторы 100шт"
    );
    assert_eq!(groups.get("Камни для клея").unwrap()[0].name, "Нефритовый камень");
}

#[test]
fn bucket_order_follows_stock_order() {
    let a = vec![
        assortment("3", &[1, 2, 3, 4]),
        assortment("1", &[1, 2, 3, 4]),
        assortment("2", &[1, 2, 3, 4]),
    ];
    let s = vec![
        stock("2", "second", "Root/Brows", "Brows"),
        stock("1", "first", "Root/Tools", "Tools"),
        stock("3", "third", "Root/Brows", "Brows"),
    ];

    let catalog = merge(&a, &s, &CategoryRules::default()).unwrap();
    let keys: Vec<&str> = catalog.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["Brows", "Tools"]);
    let names: Vec<&str> = flat(&catalog, "Brows")
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, vec!["second", "third"]);
}

#[test]
fn first_assortment_match_wins() {
    let a = vec![
        assortment("DUP", &[100, 90, 80, 70]),
        assortment("DUP", &[1, 1, 1, 1]),
    ];
    let s = vec![stock("DUP", "dup", "Root/Brows", "Brows")];

    let catalog = merge(&a, &s, &CategoryRules::default()).unwrap();
    assert_eq!(flat(&catalog, "Brows")[0].retail_price, 100);
}

#[test]
fn product_count_equals_matched_stock_rows() {
    let a: Vec<_> = (0..6)
        .map(|i| assortment(&i.to_string(), &[1, 2, 3, 4]))
        .collect();
    let s = vec![
        stock("0", "a", "Root/Brows", "Brows"),
        stock("1", "b", "Root/Ресницы/Barbara", "Barbara"),
        stock("2", "c", "Root/Расходные материалы/Клей", "Клей"),
        stock("3", "d", "Инструменты", "Инструменты"),
        stock("4", "e", "Root/Расходные материалы/Клей", "Клей"),
        stock("5", "f", "Root/Ресницы/Enigma", "Enigma"),
    ];

    let catalog = merge(&a, &s, &CategoryRules::default()).unwrap();
    assert_eq!(catalog.product_count(), s.len());
}

#[test]
fn rerunning_merge_yields_equal_catalogs() {
    let a = vec![assortment("A", &[1, 2, 3, 4]), assortment("B", &[5, 6, 7, 8])];
    let s = vec![
        stock("B", "b", "Root/Расходные материалы/Клей", "Клей"),
        stock("A", "a", "Root/Brows", "Brows"),
    ];
    let rules = CategoryRules::default();

    assert_eq!(merge(&a, &s, &rules).unwrap(), merge(&a, &s, &rules).unwrap());
}

#[test]
fn custom_rules_are_honoured() {
    let a = vec![assortment("X", &[1, 2, 3, 4]), assortment("Y", &[1, 2, 3, 4])];
    let s = vec![
        stock("X", "x", "Root/Lashes/Long", "Long"),
        stock("Y", "y", "Root/Supplies/Glue", "Glue"),
    ];
    let rules = CategoryRules::new("Lashes", "Supplies");

    let catalog = merge(&a, &s, &rules).unwrap();
    assert_eq!(flat(&catalog, "Lashes_Long").len(), 1);
    assert!(matches!(
        catalog.get("Supplies"),
        Some(CategoryBucket::Grouped(_))
    ));
}

#[test]
fn empty_stocks_produce_empty_catalog() {
    let a = vec![assortment("A", &[1, 2, 3, 4])];
    let catalog = merge(&a, &[], &CategoryRules::default()).unwrap();
    assert!(catalog.is_empty());
}

// -----------------------------------------------------------------------
// errors
// -----------------------------------------------------------------------

#[test]
fn missing_assortment_match_names_the_external_code() {
    let a = vec![assortment("A", &[1, 2, 3, 4])];
    let s = vec![
        stock("A", "ok", "Root/Brows", "Brows"),
        stock("GHOST-42", "ghost", "Root/Brows", "Brows"),
    ];

    let err = merge(&a, &s, &CategoryRules::default()).unwrap_err();
    assert!(
        matches!(err, CatalogError::MissingAssortment { ref external_code } if external_code == "GHOST-42"),
        "unexpected error: {err:?}"
    );
    assert!(err.to_string().contains("GHOST-42"));
}

#[test]
fn fewer_than_four_price_tiers_is_rejected() {
    let a = vec![assortment("SHORT", &[1000, 900, 800])];
    let s = vec![stock("SHORT", "short", "Root/Brows", "Brows")];

    let err = merge(&a, &s, &CategoryRules::default()).unwrap_err();
    assert!(
        matches!(err, CatalogError::MalformedPriceTiers { ref external_code, found: 3 } if external_code == "SHORT"),
        "unexpected error: {err:?}"
    );
}

#[test]
fn extra_price_tiers_are_ignored() {
    let a = vec![assortment("LONG", &[5, 4, 3, 2, 1])];
    let s = vec![stock("LONG", "long", "Root/Brows", "Brows")];

    let catalog = merge(&a, &s, &CategoryRules::default()).unwrap();
    assert_eq!(flat(&catalog, "Brows")[0].price_tiers(), [5, 4, 3, 2]);
}

#[test]
fn empty_folder_path_is_rejected() {
    let a = vec![assortment("A", &[1, 2, 3, 4])];
    let s = vec![stock("A", "a", "", "Brows")];

    let err = merge(&a, &s, &CategoryRules::default()).unwrap_err();
    assert!(
        matches!(err, CatalogError::MalformedFolder { ref external_code, .. } if external_code == "A"),
        "unexpected error: {err:?}"
    );
}

#[test]
fn split_key_colliding_with_grouped_category_is_rejected() {
    let rules = CategoryRules::new("Kit", "Kit_Box");
    let a = vec![assortment("A", &[1, 2, 3, 4]), assortment("B", &[1, 2, 3, 4])];
    let s = vec![
        stock("A", "a", "Root/Kit_Box/Small", "Small"),
        stock("B", "b", "Root/Kit/Box", "Box"),
    ];

    let err = merge(&a, &s, &rules).unwrap_err();
    assert!(
        matches!(err, CatalogError::ShapeConflict { ref external_code, .. } if external_code == "B"),
        "unexpected error: {err:?}"
    );
}
