//! Channel membership prefixes (`@`, `+`, ...) and the modes that grant them.

use crate::errors::SchemaError;
use crate::normalize::{is_emittable, to_identifier};
use crate::record::Record;
use crate::resolve::sort_by_name;
use crate::schema::{Pass, SchemaDef};
use crate::symbol::{DocBuilder, Literal, Symbol};

pub(crate) const SCHEMA: SchemaDef = schema! {
    kind: "chanmembers",
    types: [ChanPermPrefix: Char => "prefixchar", ChanPermMode: Char => "mode"],
    process: process,
};

/// Two symbols per record: `<Name>` (the prefix) and `<Name>Mode`.
///
/// A record whose name cannot become an identifier yields neither; its prefix
/// symbol is left for the identifier checks to report.
fn process(pass: &mut Pass<'_>, records: &[Record]) -> Result<(), SchemaError> {
    pass.require(records, "name")?;

    let mut records: Vec<&Record> = records.iter().collect();
    sort_by_name(&mut records);

    for record in records {
        let name = to_identifier(record.get_str("name"));

        let doc = DocBuilder::new(format!("{name} -- {}", record.get_str("comment")))
            .line(format!(" - obsolete: {}", record.get_bool("obsolete")))
            .line(format!(" - origin: {:?}", record.get_str_or("origin", "n/a")))
            .build();
        let prefix = Literal::Char(record.get_char("prefixchar"));
        pass.push(Symbol::new(name.as_str(), "ChanPermPrefix", prefix, doc));
        if !is_emittable(&name) {
            continue;
        }

        let mode_doc = format!("{name}Mode -- mode mapping to prefix {name:?}.");
        let mode = Literal::Char(record.get_char("mode"));
        pass.push(Symbol::new(format!("{name}Mode"), "ChanPermMode", mode, mode_doc));
    }

    Ok(())
}
