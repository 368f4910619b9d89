use sheetgate_primitives::{
    column_index_to_letters, column_letters_to_index, AddressError, CellAddress, CellRange,
};

#[test]
fn test_column_index_to_letters() {
    assert_eq!(column_index_to_letters(0), "A");
    assert_eq!(column_index_to_letters(25), "Z");
    assert_eq!(column_index_to_letters(26), "AA");
    assert_eq!(column_index_to_letters(51), "AZ");
    assert_eq!(column_index_to_letters(701), "ZZ");
    assert_eq!(column_index_to_letters(702), "AAA");
}

#[test]
fn test_column_letters_to_index() {
    assert_eq!(column_letters_to_index("A").unwrap(), 0);
    assert_eq!(column_letters_to_index("z").unwrap(), 25);
    assert_eq!(column_letters_to_index("AA").unwrap(), 26);
    assert_eq!(column_letters_to_index("ZZ").unwrap(), 701);
    assert!(column_letters_to_index("").is_err());
    assert!(column_letters_to_index("A1").is_err());
}

#[test]
fn test_letters_round_trip() {
    for index in [0u32, 1, 25, 26, 27, 700, 701, 702, 16_383] {
        let letters = column_index_to_letters(index);
        assert_eq!(column_letters_to_index(&letters).unwrap(), index);
    }
}

#[test]
fn test_from_a1_basic() {
    assert_eq!(CellAddress::from_a1("A1").unwrap(), CellAddress::new(0, 0));
    assert_eq!(CellAddress::from_a1("B2").unwrap(), CellAddress::new(1, 1));
    assert_eq!(
        CellAddress::from_a1("AA10").unwrap(),
        CellAddress::new(9, 26)
    );
}

#[test]
fn test_from_a1_absolute_markers() {
    assert_eq!(
        CellAddress::from_a1("$C$3").unwrap(),
        CellAddress::new(2, 2)
    );
}

#[test]
fn test_from_a1_rejects_garbage() {
    assert!(CellAddress::from_a1("").is_err());
    assert!(CellAddress::from_a1("123").is_err());
    assert!(CellAddress::from_a1("A0").is_err());
    assert!(CellAddress::from_a1("A1B").is_err());
    assert_eq!(
        CellAddress::from_a1("1A"),
        Err(AddressError::InvalidColumn("1A".to_string()))
    );
}

#[test]
fn test_to_a1_round_trip() {
    for a1 in ["A1", "Z99", "AA100", "XFD1048576"] {
        assert_eq!(CellAddress::from_a1(a1).unwrap().to_a1(), a1);
    }
}

#[test]
fn test_range_from_a1() {
    let range = CellRange::from_a1("A1:B10").unwrap();
    assert_eq!(range.start, CellAddress::new(0, 0));
    assert_eq!(range.end, CellAddress::new(9, 1));
    assert_eq!(range.rows(), 10);
    assert_eq!(range.cols(), 2);
    assert_eq!(range.to_a1(), "A1:B10");
}

#[test]
fn test_range_single_cell() {
    let range = CellRange::from_a1("D4").unwrap();
    assert_eq!(range.start, range.end);
    assert_eq!(range.to_a1(), "D4");
}

#[test]
fn test_range_normalized() {
    let range = CellRange::from_a1("B10:A1").unwrap().normalized();
    assert_eq!(range.start, CellAddress::new(0, 0));
    assert_eq!(range.end, CellAddress::new(9, 1));
}
