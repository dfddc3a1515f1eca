use parcel_blocks::{Block, MaterialCatalog, MaterialId};
use proptest::prelude::*;

#[test]
fn air_is_always_id_zero() {
    let catalog = MaterialCatalog::new();
    assert_eq!(catalog.get_id("air"), Some(MaterialId(0)));
    assert_eq!(Block::from(MaterialId(0)), Block::AIR);
}

#[test]
fn from_toml_assigns_ids_in_listed_order() {
    let catalog = MaterialCatalog::from_toml_str(
        r#"materials = ["quartz_block", "stone_slab", "smooth_stone"]"#,
    )
    .unwrap();
    assert_eq!(catalog.get_id("quartz_block"), Some(MaterialId(1)));
    assert_eq!(catalog.get_id("stone_slab"), Some(MaterialId(2)));
    assert_eq!(catalog.get_id("smooth_stone"), Some(MaterialId(3)));
    assert_eq!(catalog.get_id("gravel"), None);
}

#[test]
fn listed_air_is_ignored_and_duplicates_rejected() {
    let catalog = MaterialCatalog::from_toml_str(r#"materials = ["air", "stone"]"#).unwrap();
    assert_eq!(catalog.get_id("air"), Some(MaterialId(0)));
    assert_eq!(catalog.get_id("stone"), Some(MaterialId(1)));

    let err = MaterialCatalog::from_toml_str(r#"materials = ["stone", "stone"]"#);
    assert!(err.is_err());
}

proptest! {
    // intern is idempotent and get round-trips the key.
    #[test]
    fn intern_round_trips(keys in proptest::collection::vec("[a-z_]{1,12}", 1..16)) {
        let mut catalog = MaterialCatalog::new();
        for key in &keys {
            let id = catalog.intern(key);
            prop_assert_eq!(catalog.intern(key), id);
            prop_assert_eq!(catalog.get_id(key), Some(id));
            prop_assert_eq!(catalog.get(id).map(|m| m.key.as_str()), Some(key.as_str()));
        }
    }
}
