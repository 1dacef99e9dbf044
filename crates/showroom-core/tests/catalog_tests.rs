// Host-side tests for catalog loading and validation.

use showroom_core::{CatalogError, CatalogStore, Measure};

fn record_json(id: &str, slug: &str, brand: &str, torque: &str) -> String {
    format!(
        r#"{{"id":"{id}","slug":"{slug}","name":"Test {id}","brand":"{brand}","category":"Naked",
            "cc":890,"horsepower":117,"torque":"{torque}","topSpeed":"230 km/h","weight":"193 kg",
            "price":899000,"year":2024,"features":["a","b"]}}"#
    )
}

#[test]
fn builtin_catalog_loads_with_unique_slugs() {
    let catalog = CatalogStore::builtin().expect("builtin catalog");
    assert_eq!(catalog.len(), 6);
    for r in catalog.records() {
        assert_eq!(catalog.by_slug(&r.slug).map(|x| &x.id), Some(&r.id));
        assert_eq!(catalog.get(&r.id).map(|x| &x.slug), Some(&r.slug));
    }
}

#[test]
fn lookup_by_slug_and_id() {
    let catalog = CatalogStore::builtin().unwrap();
    let r1 = catalog.find("yamaha-yzf-r1").unwrap();
    assert_eq!(r1.brand, "Yamaha");
    assert_eq!(r1.asset_path(), Some("/models/yamaha-r1.glb"));
    assert_eq!(catalog.get("4").unwrap().slug, "kawasaki-ninja-zx-10r");
    assert!(matches!(
        catalog.find("vespa"),
        Err(CatalogError::RecordNotFound(s)) if s == "vespa"
    ));
}

#[test]
fn measure_keeps_value_unit_and_text() {
    let m = Measure::parse("112.4 Nm").unwrap();
    assert!((m.value - 112.4).abs() < 1e-4);
    assert_eq!(m.unit, "Nm");
    assert_eq!(m.to_string(), "112.4 Nm");

    let heavy = Measure::parse(" 1,250 kg ").unwrap();
    assert_eq!(heavy.value, 1250.0);
    assert_eq!(heavy.unit, "kg");
    assert_eq!(heavy.text(), "1,250 kg");

    assert!(Measure::parse("fast").is_none());
    assert!(Measure::parse("").is_none());
}

#[test]
fn numeric_ids_are_accepted() {
    let json = r#"[{"id":7,"slug":"x-7","name":"X","brand":"Honda","cc":500,"horsepower":47,
        "torque":"43 Nm","topSpeed":"180 km/h","weight":"190 kg","price":600000,"year":2023}]"#;
    let catalog = CatalogStore::from_json(json).unwrap();
    assert_eq!(catalog.get("7").unwrap().slug, "x-7");
    assert!(catalog.get("7").unwrap().model.is_none());
}

#[test]
fn duplicate_slug_is_rejected() {
    let json = format!(
        "[{},{}]",
        record_json("1", "same", "Honda", "10 Nm"),
        record_json("2", "same", "Honda", "10 Nm")
    );
    match CatalogStore::from_json(&json) {
        Err(CatalogError::Duplicate { field, value }) => {
            assert_eq!(field, "slug");
            assert_eq!(value, "same");
        }
        other => panic!("expected duplicate slug, got {other:?}"),
    }
}

#[test]
fn duplicate_id_is_rejected() {
    let json = format!(
        "[{},{}]",
        record_json("1", "a", "Honda", "10 Nm"),
        record_json("1", "b", "Honda", "10 Nm")
    );
    assert!(matches!(
        CatalogStore::from_json(&json),
        Err(CatalogError::Duplicate { field: "id", .. })
    ));
}

#[test]
fn malformed_records_are_rejected() {
    for json in [
        record_json("1", "Not Safe", "Honda", "10 Nm"),
        record_json("1", "ok", "  ", "10 Nm"),
        record_json("1", "ok", "Honda", "lots"),
        record_json("", "ok", "Honda", "10 Nm"),
    ] {
        let result = CatalogStore::from_json(&format!("[{json}]"));
        assert!(
            matches!(result, Err(CatalogError::Malformed { .. })),
            "accepted {json}"
        );
    }
    assert!(matches!(
        CatalogStore::from_json("{not json"),
        Err(CatalogError::Parse(_))
    ));
}

#[test]
fn display_helpers() {
    let catalog = CatalogStore::builtin().unwrap();
    let r1 = catalog.find("yamaha-yzf-r1").unwrap();
    assert_eq!(r1.price_label(), "₹1049K");

    let value = serde_json::to_value(r1).unwrap();
    assert_eq!(value["topSpeed"], "299 km/h");
    assert_eq!(value["torque"], "112.4 Nm");
    assert_eq!(value["slug"], "yamaha-yzf-r1");
}

#[test]
fn empty_model_path_counts_as_none() {
    let json = r#"[{"id":"1","slug":"a","name":"A","brand":"BMW","cc":1,"horsepower":1,
        "torque":"1 Nm","topSpeed":"1 km/h","weight":"1 kg","price":1,"year":2020,"model":"  "}]"#;
    let catalog = CatalogStore::from_json(json).unwrap();
    assert_eq!(catalog.get("1").unwrap().asset_path(), None);
}
