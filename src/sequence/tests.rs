use super::*;
use pretty_assertions::assert_eq;

#[test]
fn code_point_order() {
    let mut seqs = vec![
        CodePointSequence::from_code_points(&[0x1F1FA, 0x1F1F8]).unwrap(),
        CodePointSequence::new("a").unwrap(),
        CodePointSequence::from_code_points(&[0xFFFF]).unwrap(),
        CodePointSequence::new("ab").unwrap(),
    ];
    seqs.sort();
    assert_eq!(
        seqs.iter().map(|s| format!("{s:?}")).collect::<Vec<_>>(),
        &["[0061]", "[0061 0062]", "[FFFF]", "[1F1FA 1F1F8]"],
    );
}

#[test]
fn rejects_invalid_code_points() {
    assert_eq!(
        CodePointSequence::from_code_points(&[0x31, 0xD800]),
        Err(DataError::InvalidCodePoint(0xD800)),
    );
    assert_eq!(
        CodePointSequence::from_code_points(&[0x110000]),
        Err(DataError::InvalidCodePoint(0x110000)),
    );
    assert_eq!(
        CodePointSequence::from_code_points(&[]),
        Err(DataError::EmptySequence),
    );
    assert_eq!(CodePointSequence::new(""), None);
}

#[test]
fn lengths_and_prefixes() {
    let keycap = CodePointSequence::new("4\u{FE0F}\u{20E3}").unwrap();
    let four = CodePointSequence::from('4');
    assert_eq!(keycap.len(), 3);
    assert_eq!(keycap.utf8_len(), 7);
    assert!(!keycap.is_single());
    assert!(four.is_single());
    assert_eq!(keycap.first(), '4');
    assert!(four.is_strict_prefix_of(&keycap));
    assert!(!keycap.is_strict_prefix_of(&four));
    assert!(!four.is_strict_prefix_of(&four));
}
