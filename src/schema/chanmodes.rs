//! Channel mode letters.
//!
//! The same letter often means different things on different servers. Such
//! records are flagged `conflict` upstream; unless they come from an RFC they
//! get the sanitized origin folded into their identifier (`b` from
//! `ircv3/extension` becomes `BIrcv3Extension`).

use crate::errors::SchemaError;
use crate::normalize::{origin_suffixed, to_identifier};
use crate::record::Record;
use crate::resolve::{RecordFlags, sort_by_precedence};
use crate::schema::{Pass, SchemaDef};
use crate::symbol::{DocBuilder, Literal, Symbol};

pub(crate) const SCHEMA: SchemaDef = schema! {
    kind: "chanmodes",
    types: [ChanMode: Char => "char"],
    process: process,
};

fn process(pass: &mut Pass<'_>, records: &[Record]) -> Result<(), SchemaError> {
    let mut records: Vec<&Record> = records.iter().collect();
    sort_by_precedence(&mut records);

    for record in records {
        let raw = record.get_str("name");
        let flags = RecordFlags::of(record);
        let suffixed = flags.needs_suffix();

        // Suffix first, then normalize the whole thing.
        let ident = if suffixed {
            to_identifier(&origin_suffixed(raw, record.get_str("origin")))
        } else {
            to_identifier(raw)
        };

        let parameter = record.get_str("parameter");
        let doc = DocBuilder::new(format!("{ident} ({raw}) -- {}", record.get_str("comment")))
            .blank()
            .line(format!(" - conflict: {}", flags.contains(RecordFlags::CONFLICT)))
            .line(format!(" - origin: {:?}", record.get_str_or("origin", "unknown")))
            .line_if(!parameter.is_empty(), || format!(" - parameter: {parameter:?}"))
            .build();

        let symbol = Symbol::new(ident, "ChanMode", Literal::Char(record.get_char("char")), doc);
        if suffixed {
            pass.push_disambiguated(symbol);
        } else {
            pass.push(symbol);
        }
    }

    Ok(())
}
