pub mod client;
pub mod scaffold;
pub mod types;

use unispec_core::model::Api;
use unispec_core::text;
use unispec_core::text::NestedText;

/// Banner line at the top of every generated source file.
pub(crate) fn file_header(api: &Api) -> NestedText {
    text![
        "// Generated from ",
        api.location.as_str(),
        ". Edits will be overwritten.\n",
    ]
}
