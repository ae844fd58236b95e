use codec::{decode_map, encode_map, CodecError, RawMap, TileType};

fn tile_type(name: &str) -> TileType {
    TileType {
        name: name.to_owned(),
        color_base: "#5a5".to_owned(),
        color_variant: 1,
        conquerable: true,
        navigable: name != "mountain",
        expansion_time: 4,
        expansion_cost: 12,
    }
}

fn map(width: u16, height: u16, tiles: Vec<u16>, names: &[&str]) -> RawMap {
    RawMap::new(
        width,
        height,
        tiles,
        names.iter().map(|name| tile_type(name)).collect(),
    )
    .unwrap()
}

fn assert_roundtrip(original: &RawMap) -> Vec<u8> {
    let bytes = encode_map(original).unwrap();
    let decoded = decode_map(&bytes).unwrap();
    assert_eq!(&decoded, original);
    bytes
}

#[test]
fn single_uniform_cell() {
    let original = map(1, 1, vec![0], &["grass"]);
    let bytes = assert_roundtrip(&original);
    // Version 0 occupies the top nibble of the first byte.
    assert_eq!(bytes[0] >> 4, 0);
}

#[test]
fn two_by_two_checker() {
    let original = map(2, 2, vec![0, 1, 1, 0], &["grass", "water"]);
    assert_roundtrip(&original);
}

#[test]
fn uniform_map_with_unused_palette_entry() {
    let original = map(3, 3, vec![0; 9], &["grass", "water"]);
    let decoded = decode_map(&encode_map(&original).unwrap()).unwrap();
    // The unused entry survives in order.
    assert_eq!(decoded.types[1].name, "water");
    assert_eq!(decoded, original);
}

#[test]
fn striped_row() {
    let original = map(8, 1, vec![0, 0, 0, 0, 1, 1, 1, 1], &["grass", "water"]);
    assert_roundtrip(&original);
}

#[test]
fn large_uniform_zone() {
    let original = map(64, 64, vec![0; 64 * 64], &["grass"]);
    let bytes = assert_roundtrip(&original);
    // One zone collapses to a single border chain; the stream is tiny
    // compared to the 4096-cell grid.
    assert!(bytes.len() < 128, "stream was {} bytes", bytes.len());
}

#[test]
fn unknown_tile_id_fails() {
    let original = map(2, 1, vec![0, 2], &["grass", "water"]);
    let err = encode_map(&original).unwrap_err();
    assert!(matches!(err, CodecError::UnknownTileType { index: 2, .. }));
}

#[test]
fn version_gate() {
    let original = map(2, 2, vec![0; 4], &["grass"]);
    let mut bytes = encode_map(&original).unwrap();
    // Any nonzero version nibble must be rejected.
    for version in 1..=15u8 {
        bytes[0] = (bytes[0] & 0x0F) | (version << 4);
        let err = decode_map(&bytes).unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnsupportedVersion { found } if found == version
        ));
    }
}

#[test]
fn reencode_is_idempotent() {
    let maps = [
        map(1, 1, vec![0], &["grass"]),
        map(2, 2, vec![0, 1, 1, 0], &["grass", "water"]),
        map(8, 1, vec![0, 0, 0, 0, 1, 1, 1, 1], &["grass", "water"]),
        map(
            4,
            4,
            vec![0, 0, 1, 1, 0, 2, 2, 1, 0, 2, 2, 1, 3, 3, 3, 3],
            &["grass", "water", "rock", "sand"],
        ),
    ];
    for original in &maps {
        let first = encode_map(original).unwrap();
        let reencoded = encode_map(&decode_map(&first).unwrap()).unwrap();
        assert_eq!(first, reencoded);
    }
}

#[test]
fn irregular_zones_roundtrip() {
    #[rustfmt::skip]
    let tiles = vec![
        0, 0, 1, 1, 1, 2,
        0, 1, 1, 2, 2, 2,
        0, 1, 2, 2, 3, 3,
        1, 1, 2, 3, 3, 3,
    ];
    let original = map(6, 4, tiles, &["grass", "water", "rock", "sand"]);
    assert_roundtrip(&original);
}

#[test]
fn map_spanning_multiple_chunks_roundtrip() {
    // 70x35 crosses chunk boundaries in both axes.
    let tiles: Vec<u16> = (0..70u32 * 35)
        .map(|cell| {
            let x = cell % 70;
            let y = cell / 70;
            u16::from(x / 20 == 1 || y / 12 == 2)
        })
        .collect();
    let original = map(70, 35, tiles, &["land", "sea"]);
    assert_roundtrip(&original);
}

#[test]
fn empty_map_roundtrip() {
    let original = map(0, 0, Vec::new(), &["grass"]);
    assert_roundtrip(&original);
}

#[test]
fn empty_palette_and_grid_roundtrip() {
    let original = RawMap::new(0, 0, Vec::new(), Vec::new()).unwrap();
    assert_roundtrip(&original);
}

#[test]
fn full_palette_properties_survive() {
    let mut water = tile_type("water");
    water.color_base = "#06c".to_owned();
    water.color_variant = 15;
    water.conquerable = false;
    water.navigable = true;
    water.expansion_time = 255;
    water.expansion_cost = 0;

    let original = RawMap::new(2, 1, vec![0, 1], vec![tile_type("grass"), water]).unwrap();
    let decoded = decode_map(&encode_map(&original).unwrap()).unwrap();
    assert_eq!(decoded.types, original.types);
}

#[test]
fn multibyte_names_roundtrip() {
    let mut snow = tile_type("snow");
    snow.name = "glaciär".to_owned();
    let original = RawMap::new(1, 2, vec![0, 0], vec![snow]).unwrap();
    assert_roundtrip(&original);
}
