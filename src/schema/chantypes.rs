//! Channel type prefixes (`#`, `&`, ...).

use crate::errors::SchemaError;
use crate::normalize::to_identifier;
use crate::record::Record;
use crate::resolve::sort_by_name;
use crate::schema::{Pass, SchemaDef};
use crate::symbol::{DocBuilder, Literal, Symbol};

pub(crate) const SCHEMA: SchemaDef = schema! {
    kind: "chantypes",
    types: [ChanType: Char => "prefixchar"],
    process: process,
};

fn process(pass: &mut Pass<'_>, records: &[Record]) -> Result<(), SchemaError> {
    pass.require(records, "name")?;

    let mut records: Vec<&Record> = records.iter().collect();
    sort_by_name(&mut records);

    for record in records {
        let name = to_identifier(record.get_str("name"));
        let doc = DocBuilder::new(format!("{name} -- {}", record.get_str("comment")))
            .line(format!(" - origin: {:?}", record.get_str_or("origin", "n/a")))
            .build();

        pass.push(Symbol::new(name, "ChanType", Literal::Char(record.get_char("prefixchar")), doc));
    }

    Ok(())
}
