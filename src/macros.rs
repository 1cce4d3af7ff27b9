#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Declare a [`SchemaDef`](crate::schema::SchemaDef).
///
/// ```ignore
/// schema! {
///     kind: "chantypes",
///     types: [ChanType: Char => "prefixchar"],
///     process: process,
/// }
/// ```
///
/// Each `types` entry is `Name: Repr => "format field"`; the format field is
/// looked up in the definition file's `format` block to document the type.
#[macro_export]
macro_rules! schema {
    (
        kind: $kind:expr,
        types: [ $($ty:ident : $repr:ident => $field:expr),* $(,)? ],
        process: $process:path
        $(,)?
    ) => {
        $crate::schema::SchemaDef {
            kind: $kind,
            types: &[ $($crate::symbol::TypeDecl {
                name: stringify!($ty),
                repr: $crate::symbol::Repr::$repr,
                format_field: $field,
            }),* ],
            process: $process,
        }
    };
}
