use crate::document::Document;
use crate::errors::SchemaError;
use crate::record::Record;
use crate::schema::{Diagnostic, KindOutput, SchemaRegistry};
use crate::symbol::{Literal, Repr};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::collections::HashSet;

fn run(kind: &str, values: Vec<Record>) -> Result<KindOutput, SchemaError> {
    SchemaRegistry::builtin().process(kind, &Document::new(values))
}

fn idents(out: &KindOutput) -> Vec<&str> {
    out.symbols.iter().map(|s| s.ident.as_str()).collect()
}

fn mode(name: &str, ch: char, origin: &str, conflict: bool) -> Record {
    Record::new().with("name", name).with("char", ch).with("origin", origin).with("conflict", conflict)
}

fn numeric(name: &str, code: &str, origin: &str) -> Record {
    Record::new().with("name", name).with("numeric", code).with("origin", origin)
}

#[test]
fn chantypes_single_record() {
    let out = run("chantypes", vec![Record::new().with("name", "Secret").with("prefixchar", '@')]).unwrap();

    assert_eq!(out.symbols.len(), 1);
    let sym = &out.symbols[0];
    assert_eq!(sym.ident, "Secret");
    assert_eq!(sym.ty, "ChanType");
    assert_eq!(sym.value, Literal::Char('@'));
    assert_eq!(sym.doc, "Secret -- \n - origin: \"n/a\"");
}

#[test]
fn chantypes_sorted_by_raw_name() {
    let values = vec![
        Record::new().with("name", "standard").with("prefixchar", "#"),
        Record::new().with("name", "local").with("prefixchar", "&").with("origin", "RFC 1459"),
        Record::new().with("name", "modeless").with("prefixchar", "+"),
    ];
    let out = run("chantypes", values).unwrap();

    assert_eq!(idents(&out), vec!["Local", "Modeless", "Standard"]);
    assert_eq!(out.symbols[0].doc, "Local -- \n - origin: \"RFC 1459\"");
}

#[test]
fn chanmodes_rfc_first_and_conflict_suffixed() {
    let values = vec![
        mode("b", 'b', "ircv3/extension", true).with("comment", "extension ban"),
        mode("b", 'b', "RFC 1459", false).with("comment", "ban").with("parameter", "mask"),
    ];
    let out = run("chanmodes", values).unwrap();

    assert_eq!(idents(&out), vec!["B", "BIrcv3Extension"]);
    assert_eq!(out.disambiguated, 1);
    assert_eq!(
        out.symbols[0].doc,
        "B (b) -- ban\n\n - conflict: false\n - origin: \"RFC 1459\"\n - parameter: \"mask\""
    );
    assert_eq!(
        out.symbols[1].doc,
        "BIrcv3Extension (b) -- extension ban\n\n - conflict: true\n - origin: \"ircv3/extension\""
    );
}

#[test]
fn chanmodes_rfc_conflict_keeps_plain_name() {
    let values = vec![mode("invite", 'I', "RFC 2811", true), mode("invite", 'I', "unreal", true)];
    let out = run("chanmodes", values).unwrap();

    assert_eq!(idents(&out), vec!["Invite", "InviteUnreal"]);
}

#[test]
fn chanmodes_missing_origin_documents_unknown() {
    let out = run("chanmodes", vec![Record::new().with("name", "moderated").with("char", "m")]).unwrap();
    assert_eq!(out.symbols[0].doc, "Moderated (moderated) -- \n\n - conflict: false\n - origin: \"unknown\"");
}

#[test]
fn numerics_shared_names_get_origin_suffix() {
    let values = vec![
        numeric("RPL_WELCOME", "001", "RFC 2812"),
        numeric("ERR_X", "440", "hybrid"),
        numeric("ERR_X", "441", "ircu 2.10"),
    ];
    let out = run("numerics", values).unwrap();

    assert_eq!(idents(&out), vec!["ERR_X_hybrid", "ERR_X_ircu_2_10", "RPL_WELCOME"]);
    assert_eq!(out.symbols[2].value, Literal::Int(1));
    assert_eq!(out.disambiguated, 2);
}

#[test]
fn numerics_rfc_record_keeps_verbatim_name() {
    let values = vec![numeric("RPL_ISUPPORT", "005", "Bahamut"), numeric("RPL_ISUPPORT", "005", "RFC 2812")];
    let out = run("numerics", values).unwrap();

    assert_eq!(idents(&out), vec!["RPL_ISUPPORT", "RPL_ISUPPORT_Bahamut"]);
}

#[test]
fn numerics_optional_doc_lines() {
    let values = vec![numeric("RPL_TRACELINK", "200", "RFC 1459")
        .with("comment", "trace link")
        .with("conflict", false)
        .with("obsolete", true)
        .with("information", "sent by servers")
        .with("seealso", "RPL_TRACEEND")
        .with("format", "<client> Link <version>")];
    let out = run("numerics", values).unwrap();

    assert_eq!(
        out.symbols[0].doc,
        [
            "RPL_TRACELINK (RPL_TRACELINK) -- trace link",
            "",
            " - conflict: false",
            " - origin: \"RFC 1459\"",
            " - obsolete: true",
            " - more info: sent by servers",
            " - see also: RPL_TRACEEND",
            " - format: \"<client> Link <version>\"",
        ]
        .join("\n")
    );
}

#[test]
fn numerics_integer_and_malformed_codes() {
    let values = vec![
        Record::new().with("name", "RPL_A").with("numeric", 5i64),
        Record::new().with("name", "RPL_B").with("numeric", "five"),
    ];
    let out = run("numerics", values).unwrap();

    assert_eq!(out.symbols[0].value, Literal::Int(5));
    assert_eq!(out.symbols[1].value, Literal::Int(-1));
    assert_eq!(out.diagnostics, vec![Diagnostic::FallbackValue { ident: "RPL_B".into() }]);
}

#[test]
fn chanmembers_two_symbols_per_record() {
    let values = vec![
        Record::new().with("name", "voice").with("prefixchar", "+").with("mode", "v").with("origin", "RFC 1459"),
        Record::new().with("name", "op").with("prefixchar", "@").with("mode", "o").with("obsolete", false),
    ];
    let out = run("chanmembers", values).unwrap();

    assert_eq!(idents(&out), vec!["Op", "OpMode", "Voice", "VoiceMode"]);
    assert_eq!(out.symbols[0].value, Literal::Char('@'));
    assert_eq!(out.symbols[1].value, Literal::Char('o'));
    assert_eq!(out.symbols[1].ty, "ChanPermMode");
    assert_eq!(out.symbols[0].doc, "Op -- \n - obsolete: false\n - origin: \"n/a\"");
    assert_eq!(out.symbols[3].doc, "VoiceMode -- mode mapping to prefix \"Voice\".");
}

#[test]
fn chanmembers_unnamed_prefix_drops_its_mode_too() {
    let values = vec![
        Record::new().with("name", "+").with("prefixchar", "~").with("mode", "q"),
        Record::new().with("name", "op").with("prefixchar", "@").with("mode", "o"),
        Record::new().with("name", "self").with("prefixchar", "!").with("mode", "s"),
    ];
    let out = run("chanmembers", values).unwrap();

    assert_eq!(idents(&out), vec!["Op", "OpMode"]);
    assert_eq!(
        out.diagnostics,
        vec![
            Diagnostic::EmptyIdentifier { value: Literal::Char('~') },
            Diagnostic::InvalidIdentifier { ident: "Self".into(), value: Literal::Char('!') },
        ]
    );
}

#[test]
fn chanmembers_missing_name_fails_kind() {
    let values = vec![
        Record::new().with("name", "op").with("prefixchar", "@"),
        Record::new().with("prefixchar", "%").with("mode", "h"),
    ];
    let err = run("chanmembers", values).unwrap_err();

    assert!(matches!(err, SchemaError::MissingRequiredField { field: "name", index: 1, .. }), "{err}");
}

#[test]
fn chantypes_missing_name_fails_kind() {
    let err = run("chantypes", vec![Record::new().with("prefixchar", "#")]).unwrap_err();
    assert!(matches!(err, SchemaError::MissingRequiredField { index: 0, .. }));
}

#[test]
fn unknown_kind_is_rejected() {
    let err = run("isupport", vec![Record::new().with("name", "CASEMAPPING")]).unwrap_err();
    assert!(matches!(err, SchemaError::UnrecognizedKind(ref k) if k == "isupport"));
}

#[test]
fn empty_values_produce_no_symbols() {
    let out = run("chanmodes", Vec::new()).unwrap();
    assert!(out.is_empty());
    assert_eq!(out.types.len(), 1);
}

#[test]
fn duplicate_rfc_names_keep_first() {
    let values = vec![numeric("RPL_X", "300", "RFC 1459"), numeric("RPL_X", "301", "RFC 2812")];
    let out = run("numerics", values).unwrap();

    assert_eq!(idents(&out), vec!["RPL_X"]);
    assert_eq!(out.symbols[0].value, Literal::Int(300));
    assert_eq!(
        out.diagnostics,
        vec![Diagnostic::DuplicateIdentifier { ident: "RPL_X".into(), value: Literal::Int(301) }]
    );
}

#[test]
fn nameless_chanmode_is_dropped() {
    let out = run("chanmodes", vec![Record::new().with("char", "z"), mode("key", 'k', "RFC 1459", false)]).unwrap();

    assert_eq!(idents(&out), vec!["Key"]);
    assert_eq!(out.diagnostics, vec![Diagnostic::EmptyIdentifier { value: Literal::Char('z') }]);
}

#[test]
fn unwritable_identifiers_are_dropped() {
    let out = run("chanmodes", vec![mode("self", 's', "RFC 1459", false), mode("key", 'k', "RFC 1459", false)]).unwrap();
    assert_eq!(idents(&out), vec!["Key"]);
    assert_eq!(
        out.diagnostics,
        vec![Diagnostic::InvalidIdentifier { ident: "Self".into(), value: Literal::Char('s') }]
    );

    let values = vec![numeric("1ST", "1", "RFC 1459"), numeric("RPL BAD", "2", "RFC 1459"), numeric("RPL_OK", "3", "")];
    let out = run("numerics", values).unwrap();
    assert_eq!(idents(&out), vec!["RPL_OK"]);
    assert_eq!(out.diagnostics.len(), 2);
    assert!(out.diagnostics.iter().all(Diagnostic::drops_symbol));
}

#[test]
fn declared_types_are_documented_from_format() {
    let mut doc = Document::new(vec![Record::new().with("name", "op").with("prefixchar", "@").with("mode", "o")]);
    doc.format = Record::new().with("prefixchar", "prefix character").with("mode", "mode character");

    let out = SchemaRegistry::builtin().process("chanmembers", &doc).unwrap();
    let types: Vec<_> = out.types.iter().map(|t| (t.name, t.repr, t.doc.as_deref())).collect();
    assert_eq!(
        types,
        vec![
            ("ChanPermPrefix", Repr::Char, Some("ChanPermPrefix is the prefix character.")),
            ("ChanPermMode", Repr::Char, Some("ChanPermMode is the mode character.")),
        ]
    );
}

#[test]
fn builtin_registry_kinds() {
    let kinds: Vec<_> = SchemaRegistry::builtin().kinds().collect();
    assert_eq!(kinds, vec!["chanmembers", "chanmodes", "chantypes", "numerics"]);
}

fn arb_record() -> impl Strategy<Value = Record> {
    (
        prop::sample::select(vec!["b", "k", "ERR_X", "RPL_Y", "voice"]),
        prop::sample::select(vec!["RFC 1459", "RFC 2812", "hybrid", "ircv3/extension", "unreal", ""]),
        any::<bool>(),
        "[a-z0-9]{1,3}",
    )
        .prop_map(|(name, origin, conflict, value)| {
            Record::new()
                .with("name", name)
                .with("origin", origin)
                .with("conflict", conflict)
                .with("char", value.as_str())
                .with("prefixchar", value.as_str())
                .with("mode", value.as_str())
                .with("numeric", value)
        })
}

proptest! {
    #[test]
    fn passes_are_deterministic_and_unique(
        kind in prop::sample::select(vec!["chanmembers", "chanmodes", "chantypes", "numerics"]),
        values in prop::collection::vec(arb_record(), 0..12),
    ) {
        let first = run(kind, values.clone()).unwrap();
        let second = run(kind, values).unwrap();
        prop_assert_eq!(&first, &second);

        let mut seen = HashSet::new();
        for symbol in &first.symbols {
            prop_assert!(seen.insert(symbol.ident.clone()), "duplicate identifier {}", symbol.ident);
        }
    }

    #[test]
    fn rfc_record_always_first_for_shared_name(rotate in 0usize..3) {
        let mut values = vec![
            mode("b", 'b', "hybrid", true),
            mode("b", 'b', "RFC 1459", false),
            mode("b", 'b', "unreal", false),
        ];
        values.rotate_left(rotate);

        let out = run("chanmodes", values).unwrap();
        prop_assert_eq!(out.symbols[0].ident.as_str(), "B");
        prop_assert!(out.symbols[0].doc.contains("RFC 1459"));
    }
}
