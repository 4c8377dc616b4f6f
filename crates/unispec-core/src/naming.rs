//! Name normalization and display-name derivation.

use heck::{ToLowerCamelCase, ToPascalCase, ToShoutySnakeCase, ToSnakeCase};
use indexmap::IndexMap;

use crate::model::NormalizedName;

/// Compute every casing variant of a raw name.
pub fn normalize_name(raw: &str) -> NormalizedName {
    let cleaned = sanitize_identifier(raw);
    NormalizedName {
        original: raw.to_string(),
        pascal_case: cleaned.to_pascal_case(),
        camel_case: cleaned.to_lower_camel_case(),
        snake_case: cleaned.to_snake_case(),
        screaming_snake: cleaned.to_shouty_snake_case(),
    }
}

/// Replace everything heck cannot anchor a word boundary on with spaces
/// and keep the first word from starting with a digit.
fn sanitize_identifier(raw: &str) -> String {
    let mut cleaned: String = raw
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { ' ' })
        .collect();
    if cleaned
        .trim_start()
        .starts_with(|ch: char| ch.is_ascii_digit())
    {
        cleaned.insert_str(0, "x ");
    }
    cleaned
}

/// Fallback operation name for operations without an explicit id.
/// `GET /pets/{petId}` becomes `get pet by petId`.
pub fn route_to_name(method: &str, route: &str) -> String {
    let verb = match method.to_ascii_lowercase().as_str() {
        "post" => "create".to_string(),
        "put" => "replace".to_string(),
        "patch" => "update".to_string(),
        "head" => "check".to_string(),
        "options" => "inspect".to_string(),
        other => other.to_string(),
    };
    let mut words = vec![verb];
    for segment in route.split('/').filter(|segment| !segment.is_empty()) {
        if let Some(name) = segment
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
        {
            // The parameter selects one element out of the preceding
            // collection segment.
            if let Some(previous) = words.last_mut() {
                if previous.ends_with('s') && !previous.ends_with("ss") {
                    previous.pop();
                }
            }
            words.push("by".to_string());
            words.push(name.to_string());
        } else {
            words.push(segment.to_string());
        }
    }
    words.join(" ")
}

/// Derive a unique display name for every schema identifier.
///
/// Names start from the last informative pointer segment and widen with
/// preceding segments until the set is collision free; ids that exhaust
/// their segments get a numeric suffix. Candidates that do not start with
/// a letter are prefixed with the configured root name part.
pub fn derive_schema_names<'i>(
    ids: impl IntoIterator<Item = &'i str>,
    root_name_part: &str,
) -> IndexMap<String, NormalizedName> {
    let ids: Vec<&str> = ids.into_iter().collect();
    let segment_lists: Vec<Vec<String>> = ids.iter().map(|id| pointer_segments(id)).collect();
    let mut take = vec![1usize; ids.len()];

    loop {
        let mut groups: IndexMap<String, Vec<usize>> = IndexMap::new();
        for (index, segments) in segment_lists.iter().enumerate() {
            let key = group_key(&candidate(segments, take[index], root_name_part));
            groups.entry(key).or_default().push(index);
        }
        let mut widened = false;
        for members in groups.values() {
            if members.len() < 2 {
                continue;
            }
            for &index in members {
                if take[index] < segment_lists[index].len() {
                    take[index] += 1;
                    widened = true;
                }
            }
        }
        if !widened {
            break;
        }
    }

    // Whatever still collides gets an occurrence suffix.
    let mut occurrences: IndexMap<String, usize> = IndexMap::new();
    let mut names = IndexMap::with_capacity(ids.len());
    for (index, id) in ids.iter().enumerate() {
        let mut chosen = candidate(&segment_lists[index], take[index], root_name_part);
        let seen = occurrences
            .entry(group_key(&chosen))
            .and_modify(|count| *count += 1)
            .or_insert(1);
        if *seen > 1 {
            chosen = format!("{chosen} {seen}");
        }
        names.insert((*id).to_string(), normalize_name(&chosen));
    }
    names
}

fn candidate(segments: &[String], take: usize, root_name_part: &str) -> String {
    let tail = &segments[segments.len().saturating_sub(take)..];
    let joined = tail.join(" ");
    let starts_with_letter = joined
        .trim_start_matches(|ch: char| !ch.is_ascii_alphanumeric())
        .starts_with(|ch: char| ch.is_ascii_alphabetic());
    if starts_with_letter {
        joined
    } else {
        format!("{root_name_part} {joined}")
    }
}

/// Collisions count after normalization: `new-pet` and `newPet` are the
/// same name once cased.
fn group_key(raw: &str) -> String {
    sanitize_identifier(raw).to_pascal_case()
}

/// The informative segments of an identifier's JSON pointer, unescaped.
fn pointer_segments(id: &str) -> Vec<String> {
    let pointer = id.split_once('#').map_or("", |(_, pointer)| pointer);
    pointer
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .filter(|segment| keep_segment(segment))
        .collect()
}

const STRUCTURAL_SEGMENTS: &[&str] = &[
    "components",
    "schemas",
    "paths",
    "webhooks",
    "responses",
    "content",
    "schema",
    "requestBody",
    "requestBodies",
    "parameters",
    "headers",
    "definitions",
];

/// Structural keywords and media types add nothing to a display name.
fn keep_segment(segment: &str) -> bool {
    if STRUCTURAL_SEGMENTS.contains(&segment) {
        return false;
    }
    !(segment.contains('/') && !segment.starts_with('/'))
}
