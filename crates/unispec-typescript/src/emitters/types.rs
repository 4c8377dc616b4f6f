use unispec_core::model::Api;
use unispec_core::text;
use unispec_core::text::NestedText;

use super::file_header;

/// Emit `types.ts`: one exported opaque alias per derived schema name.
/// The concrete shapes live in the source document; the aliases give the
/// client surface stable names to refer to them by.
pub fn emit_types(api: &Api) -> NestedText {
    let aliases: Vec<NestedText> = api
        .names
        .iter()
        .map(|(schema_id, name)| {
            text![
                "\n/** `",
                schema_id.as_str(),
                "` */\nexport type ",
                name.pascal_case.as_str(),
                " = unknown;\n",
            ]
        })
        .collect();
    text![file_header(api), aliases]
}
