//! Numeric replies (`RPL_WELCOME`, `ERR_NOSUCHNICK`, ...).
//!
//! Unlike the other kinds, numeric names are already identifiers and are used
//! verbatim. A name shared by several records gets the sanitized origin
//! appended for every non-RFC record, whether or not upstream flagged the
//! conflict.

use crate::errors::SchemaError;
use crate::normalize::origin_suffixed;
use crate::record::Record;
use crate::resolve::{RecordFlags, name_counts, sort_by_precedence};
use crate::schema::{Pass, SchemaDef};
use crate::symbol::{DocBuilder, Literal, Symbol};

pub(crate) const SCHEMA: SchemaDef = schema! {
    kind: "numerics",
    types: [Numeric: Int => "char"],
    process: process,
};

fn process(pass: &mut Pass<'_>, records: &[Record]) -> Result<(), SchemaError> {
    let mut records: Vec<&Record> = records.iter().collect();
    sort_by_precedence(&mut records);

    let counts = name_counts(&records);

    for record in records {
        let raw = record.get_str("name");
        let shared = counts.get(raw).is_some_and(|&n| n > 1);
        let flags = RecordFlags::of(record);
        let suffixed = shared && !flags.contains(RecordFlags::AUTHORITATIVE);

        let ident = if suffixed { origin_suffixed(raw, record.get_str("origin")) } else { raw.to_string() };

        let information = record.get_str("information");
        let seealso = record.get_str("seealso");
        let format = record.get_str("format");

        let doc = DocBuilder::new(format!("{ident} ({raw}) -- {}", record.get_str("comment")))
            .blank()
            .line(format!(" - conflict: {}", flags.contains(RecordFlags::CONFLICT)))
            .line(format!(" - origin: {:?}", record.get_str_or("origin", "unknown")))
            .line_if(flags.contains(RecordFlags::OBSOLETE), || " - obsolete: true".to_string())
            .line_if(!information.is_empty(), || format!(" - more info: {information}"))
            .line_if(!seealso.is_empty(), || format!(" - see also: {seealso}"))
            .line_if(!format.is_empty(), || format!(" - format: {format:?}"))
            .build();

        let symbol = Symbol::new(ident, "Numeric", Literal::Int(record.get_int("numeric")), doc);
        if suffixed {
            pass.push_disambiguated(symbol);
        } else {
            pass.push(symbol);
        }
    }

    Ok(())
}
