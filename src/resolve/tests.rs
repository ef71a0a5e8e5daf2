use super::*;
use crate::test_data;

use pretty_assertions::assert_eq;

fn top_level(name: &str) -> PropertyReference {
    PropertyReference::new(name, 0..name.len() + 4)
}

#[test]
fn string_property_compiles() {
    let table = test_data::table();
    let resolver = PropertyEscapeResolver::new(&table);

    let ResolvedEscape::StringProperty { name, fragment } =
        resolver.resolve(&top_level("RGI_Emoji_ZWJ_Sequence")).unwrap()
    else {
        panic!("not a string property");
    };
    assert_eq!(name, "RGI_Emoji_ZWJ_Sequence");
    assert_eq!(fragment.alternatives().len(), 3);

    // The four-person family is longer than the three-person family it
    // starts with, and so must be tried first.
    let family = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}\u{200D}\u{1F466}";
    assert_eq!(fragment.match_prefix(family), Some(family.len()));
}

#[test]
fn string_property_rejected_in_bad_contexts() {
    let table = test_data::table();
    let resolver = PropertyEscapeResolver::new(&table);

    for name in ["RGI_Emoji", "Basic_Emoji", "Emoji_Keycap_Sequence"] {
        let negated = top_level(name).negated(true);
        assert!(matches!(
            resolver.resolve(&negated),
            Err(PropertyError::NegationNotSupported { .. })
        ));

        let in_negated_class =
            top_level(name).in_context(EnclosingContext::CharacterClass { negated: true });
        assert!(matches!(
            resolver.resolve(&in_negated_class),
            Err(PropertyError::NegationNotSupported { .. })
        ));

        let in_class =
            top_level(name).in_context(EnclosingContext::CharacterClass { negated: false });
        assert_eq!(
            resolver.resolve(&in_class).unwrap_err(),
            PropertyError::NotAllowedInCharacterClass {
                name: name.to_string(),
                span: in_class.span.clone(),
            },
        );
    }
}

#[test]
fn code_point_properties_are_delegated() {
    let table = test_data::table();
    let resolver = PropertyEscapeResolver::new(&table);

    // Code point properties stay usable in every context.
    let reference = top_level("Regional_Indicator")
        .negated(true)
        .in_context(EnclosingContext::CharacterClass { negated: true });
    let ResolvedEscape::CodePointProperty { name, predicate } =
        resolver.resolve(&reference).unwrap()
    else {
        panic!("not a code point property");
    };
    assert_eq!(name, "Regional_Indicator");
    assert!(predicate('\u{1F1FA}'));
    assert!(!predicate('U'));
}

#[test]
fn unknown_names() {
    let table = test_data::table();
    let resolver = PropertyEscapeResolver::new(&table);

    for name in ["NotARealProperty", "Emoji_ZWJ_Sequence", "rgi_emoji"] {
        let reference = top_level(name);
        assert!(matches!(
            resolver.resolve(&reference),
            Ok(ResolvedEscape::Unknown { .. })
        ));
        assert_eq!(
            resolver.resolve_or_reject(&reference).unwrap_err(),
            PropertyError::UnknownProperty {
                name: name.to_string(),
                span: reference.span.clone(),
            },
        );
    }
}

#[test]
fn unknown_names_behave_the_same_without_string_properties() {
    let full = test_data::table();
    let empty = crate::TableBuilder::new(crate::UnicodeVersion::PINNED)
        .build()
        .unwrap();

    let reference = top_level("NotARealProperty").negated(true);
    let with = PropertyEscapeResolver::new(&full).resolve_or_reject(&reference);
    let without = PropertyEscapeResolver::new(&empty).resolve_or_reject(&reference);
    assert_eq!(with.unwrap_err(), without.unwrap_err());
}

#[test]
fn each_resolution_gets_its_own_fragment() {
    let table = test_data::table();
    let resolver = PropertyEscapeResolver::new(&table).with_options(CompileOptions {
        merge_single_code_points: false,
    });
    let reference = top_level("Basic_Emoji");

    let fragments: Vec<_> = (0..2)
        .map(|_| match resolver.resolve(&reference) {
            Ok(ResolvedEscape::StringProperty { fragment, .. }) => fragment,
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(fragments[0], fragments[1]);
    // Without merging, each of the eight single code points is its own leaf.
    assert_eq!(fragments[0].alternatives().len(), 10);
    assert!(matches!(
        fragments[0].alternatives().last(),
        Some(MatcherFragment::Sequence(_))
    ));
}

#[test]
fn resolvers_share_a_table_across_threads() {
    let table = test_data::table();
    let references: Vec<_> = crate::StringProperty::ALL
        .iter()
        .map(|property| top_level(property.name()))
        .collect();

    std::thread::scope(|scope| {
        for reference in &references {
            let table = &table;
            scope.spawn(move || {
                let resolver = PropertyEscapeResolver::new(table);
                assert!(matches!(
                    resolver.resolve(reference),
                    Ok(ResolvedEscape::StringProperty { .. })
                ));
            });
        }
    });
}
