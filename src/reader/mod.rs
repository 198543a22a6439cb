// Accessors for single POI-based objects (points of interest, events, routes)
//
// All functions read an already decoded JSON object and return None or an
// empty Vec when the requested field is absent.

mod geometry;

pub use geometry::{Geometry, GeometryContent, ImageContent};

use serde_json::Value;
use std::collections::BTreeMap;

pub const DEFAULT_LANG: &str = "en_GB";

pub const LABEL_TERM_PRIMARY: &str = "primary";
pub const LABEL_TERM_NOTE: &str = "note";
pub const LINK_TERM_ICON: &str = "icon";
pub const LINK_TERM_RELATED: &str = "related";
pub const LINK_TERM_PARENT: &str = "parent";
pub const LINK_TERM_CHILD: &str = "child";
pub const POINT_TERM_CENTER: &str = "center";
pub const POINT_TERM_ENTRANCE: &str = "entrance";
pub const TIME_TERM_OPEN: &str = "open";

const TYPE_PRICE: &str = "X-citysdk/price";
const TYPE_WAITING_TIME: &str = "X-citysdk/waiting-time";
const TYPE_OCCUPATION: &str = "X-citysdk/occupation";

/// Which side of a relationship to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipField {
    Base,
    Id,
}

impl RelationshipField {
    fn key(&self) -> &'static str {
        match self {
            RelationshipField::Base => "base",
            RelationshipField::Id => "id",
        }
    }
}

/// Languages present in the `label` or `description` field: language code → full locale
pub fn available_languages(poi: &Value, field: &str) -> Option<BTreeMap<String, String>> {
    if field != "label" && field != "description" {
        return None;
    }

    let languages = entries(poi, field)
        .iter()
        .filter_map(|entry| str_field(entry, "lang"))
        .map(|lang| (language_code(lang).to_string(), lang.to_string()))
        .collect();

    Some(languages)
}

/// Label with `term` in `lang`, falling back to the last label with that term
pub fn label(poi: &Value, term: &str, lang: &str) -> Option<String> {
    let labels = entries(poi, "label")
        .iter()
        .filter(|entry| str_field(entry, "term") == Some(term));
    localized_value(poi, labels, lang)
}

/// Free-text description in `lang`, falling back to the last description
pub fn description(poi: &Value, lang: &str) -> Option<String> {
    let descriptions = entries(poi, "description")
        .iter()
        .filter(|entry| entry.get("type").is_none());
    localized_value(poi, descriptions, lang)
}

pub fn price(poi: &Value, lang: &str) -> Option<String> {
    typed_description(poi, TYPE_PRICE, Some(lang))
}

/// Waiting time in seconds, as published
pub fn waiting_time(poi: &Value) -> Option<String> {
    typed_description(poi, TYPE_WAITING_TIME, None)
}

/// Occupation from 0 to 100, as published
pub fn occupation(poi: &Value) -> Option<String> {
    typed_description(poi, TYPE_OCCUPATION, None)
}

pub fn thumbnails(poi: &Value) -> Vec<ImageContent> {
    entries(poi, "link")
        .iter()
        .filter(|link| str_field(link, "term") == Some(LINK_TERM_ICON))
        .filter_map(|link| match (str_field(link, "href"), str_field(link, "value")) {
            (Some(href), _) => Some(ImageContent::uri(href)),
            (None, Some(value)) => Some(ImageContent::inline(value)),
            (None, None) => None,
        })
        .collect()
}

/// Related links whose media type is an image
pub fn images(poi: &Value) -> Vec<ImageContent> {
    entries(poi, "link")
        .iter()
        .filter(|link| str_field(link, "term") == Some(LINK_TERM_RELATED))
        .filter(|link| str_field(link, "type").is_some_and(|t| t.starts_with("image/")))
        .filter_map(|link| str_field(link, "href").map(ImageContent::uri))
        .collect()
}

/// Contacts in vCard format
pub fn contacts(poi: &Value) -> Option<String> {
    poi.pointer("/location/address/value")?
        .as_str()
        .map(str::to_string)
}

/// Calendar with `term` in iCalendar format
pub fn calendar(poi: &Value, term: &str) -> Option<String> {
    entries(poi, "time")
        .iter()
        .find(|time| {
            str_field(time, "type") == Some("text/calendar") && str_field(time, "term") == Some(term)
        })
        .and_then(|time| str_field(time, "value"))
        .map(str::to_string)
}

pub fn link(poi: &Value, term: &str) -> Option<String> {
    entries(poi, "link")
        .iter()
        .find(|link| str_field(link, "term") == Some(term))
        .and_then(|link| str_field(link, "href"))
        .map(str::to_string)
}

pub fn relationship(poi: &Value, term: &str, field: RelationshipField) -> Option<String> {
    location_entries(poi, "relationship")
        .iter()
        .find(|relationship| str_field(relationship, "term") == Some(term))
        .and_then(|relationship| str_field(relationship, field.key()))
        .map(str::to_string)
}

/// Points, then lines, then polygons of the location with `term`
pub fn locations(poi: &Value, term: &str) -> Vec<Geometry> {
    let mut geometries = location_points(poi, term);
    geometries.extend(location_lines(poi, term));
    geometries.extend(location_polygons(poi, term));
    geometries
}

pub fn location_points(poi: &Value, term: &str) -> Vec<Geometry> {
    pos_lists(poi, "point", "/Point/posList", term)
        .filter_map(|pos_list| GeometryContent::parse(pos_list).or_else(|| skip(pos_list)))
        .map(Geometry::Point)
        .collect()
}

pub fn location_lines(poi: &Value, term: &str) -> Vec<Geometry> {
    pos_lists(poi, "line", "/LineString/posList", term)
        .filter_map(|pos_list| match GeometryContent::parse_list(pos_list).as_deref() {
            Some([first, second, ..]) => Some(Geometry::Line {
                first: *first,
                second: *second,
            }),
            _ => skip(pos_list),
        })
        .collect()
}

pub fn location_polygons(poi: &Value, term: &str) -> Vec<Geometry> {
    pos_lists(poi, "polygon", "/SimplePolygon/posList", term)
        .filter_map(|pos_list| GeometryContent::parse_list(pos_list).or_else(|| skip(pos_list)))
        .map(Geometry::Polygon)
        .collect()
}

fn pos_lists<'a>(
    poi: &'a Value,
    kind: &str,
    pointer: &'a str,
    term: &'a str,
) -> impl Iterator<Item = &'a str> + 'a {
    location_entries(poi, kind)
        .iter()
        .filter(move |entry| str_field(entry, "term") == Some(term))
        .filter_map(move |entry| entry.pointer(pointer)?.as_str())
}

fn skip<T>(pos_list: &str) -> Option<T> {
    tracing::warn!(pos_list, "Skipping malformed position list");
    None
}

fn localized_value<'a>(
    poi: &Value,
    candidates: impl Iterator<Item = &'a Value>,
    lang: &str,
) -> Option<String> {
    let default_lang = poi_lang(poi);
    let mut fallback = None;

    for candidate in candidates {
        let Some(value) = str_field(candidate, "value") else {
            continue;
        };
        let candidate_lang = str_field(candidate, "lang").unwrap_or(default_lang);
        if is_same_lang(lang, candidate_lang) {
            return Some(value.to_string());
        }
        fallback = Some(value.to_string());
    }

    fallback
}

fn typed_description(poi: &Value, media_type: &str, lang: Option<&str>) -> Option<String> {
    let mut typed = entries(poi, "description")
        .iter()
        .filter(|entry| str_field(entry, "type") == Some(media_type));

    match lang {
        Some(lang) => localized_value(poi, typed, lang),
        None => typed.find_map(|entry| str_field(entry, "value")).map(str::to_string),
    }
}

fn entries<'a>(poi: &'a Value, field: &str) -> &'a [Value] {
    poi.get(field)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn location_entries<'a>(poi: &'a Value, field: &str) -> &'a [Value] {
    poi.get("location")
        .map(|location| entries(location, field))
        .unwrap_or(&[])
}

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key)?.as_str()
}

fn poi_lang(poi: &Value) -> &str {
    str_field(poi, "lang").unwrap_or(DEFAULT_LANG)
}

fn language_code(lang: &str) -> &str {
    lang.split(|c: char| c == '_' || c == '-').next().unwrap_or(lang)
}

fn is_same_lang(a: &str, b: &str) -> bool {
    language_code(a) == language_code(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event() -> Value {
        json!({
            "lang": "pt_PT",
            "label": [
                {"term": "primary", "value": "Sigur Ros"},
                {"term": "primary", "value": "Sigur Ros live", "lang": "en_GB"},
                {"term": "note", "value": "Esgotado"}
            ],
            "description": [
                {"value": "Sigur Ros ao vivo no Campo Pequeno"},
                {"value": "Sigur Ros live at Campo Pequeno", "lang": "en-GB"},
                {"value": "25 EUR", "type": "X-citysdk/price", "lang": "pt_PT"},
                {"value": "600", "type": "X-citysdk/waiting-time"}
            ],
            "link": [
                {"term": "icon", "href": "http://img.example/thumb.jpg"},
                {"term": "icon", "value": "aGVsbG8="},
                {"term": "related", "type": "image/jpeg", "href": "http://img.example/big.jpg"},
                {"term": "related", "type": "text/html", "href": "http://example.org"},
                {"term": "parent", "href": "http://api.example/poi/1"}
            ],
            "time": [
                {"term": "open", "type": "text/calendar", "value": "BEGIN:VCALENDAR"}
            ],
            "location": {
                "address": {"value": "BEGIN:VCARD"},
                "point": [
                    {"term": "center", "Point": {"posList": "38.7 -9.1"}},
                    {"term": "entrance", "Point": {"posList": "38.8 -9.2"}}
                ],
                "line": [
                    {"term": "center", "LineString": {"posList": "38.7 -9.1, 38.8 -9.2"}}
                ],
                "polygon": [
                    {"term": "center", "SimplePolygon": {"posList": "1 1,1 2,2 2,2 1"}},
                    {"term": "center", "SimplePolygon": {"posList": "1 1,broken"}}
                ],
                "relationship": [
                    {"term": "within", "base": "http://api.example/poi/", "id": "9"}
                ]
            }
        })
    }

    #[test]
    fn test_label_prefers_language_then_falls_back() {
        let poi = event();
        assert_eq!(label(&poi, "primary", "pt_PT").as_deref(), Some("Sigur Ros"));
        assert_eq!(label(&poi, "primary", "en_GB").as_deref(), Some("Sigur Ros live"));
        assert_eq!(label(&poi, "primary", "fr_FR").as_deref(), Some("Sigur Ros live"));
        assert_eq!(label(&poi, "note", "en_GB").as_deref(), Some("Esgotado"));
        assert!(label(&poi, "missing", "en_GB").is_none());
    }

    #[test]
    fn test_description_ignores_typed_entries() {
        let poi = event();
        assert_eq!(description(&poi, "en_GB").as_deref(), Some("Sigur Ros live at Campo Pequeno"));
        assert_eq!(description(&poi, "pt").as_deref(), Some("Sigur Ros ao vivo no Campo Pequeno"));
    }

    #[test]
    fn test_typed_values() {
        let poi = event();
        assert_eq!(price(&poi, "pt_PT").as_deref(), Some("25 EUR"));
        assert_eq!(waiting_time(&poi).as_deref(), Some("600"));
        assert!(occupation(&poi).is_none());
    }

    #[test]
    fn test_available_languages() {
        let poi = event();
        let langs = available_languages(&poi, "description").unwrap();
        assert_eq!(langs.get("en").map(String::as_str), Some("en-GB"));
        assert!(available_languages(&poi, "link").is_none());
    }

    #[test]
    fn test_images_and_links() {
        let poi = event();
        assert_eq!(
            thumbnails(&poi),
            vec![
                ImageContent::uri("http://img.example/thumb.jpg"),
                ImageContent::inline("aGVsbG8=")
            ]
        );
        assert_eq!(images(&poi), vec![ImageContent::uri("http://img.example/big.jpg")]);
        assert_eq!(link(&poi, LINK_TERM_PARENT).as_deref(), Some("http://api.example/poi/1"));
        assert!(link(&poi, LINK_TERM_CHILD).is_none());
    }

    #[test]
    fn test_contacts_calendar_relationship() {
        let poi = event();
        assert_eq!(contacts(&poi).as_deref(), Some("BEGIN:VCARD"));
        assert_eq!(calendar(&poi, TIME_TERM_OPEN).as_deref(), Some("BEGIN:VCALENDAR"));
        assert_eq!(
            relationship(&poi, "within", RelationshipField::Base).as_deref(),
            Some("http://api.example/poi/")
        );
        assert_eq!(relationship(&poi, "within", RelationshipField::Id).as_deref(), Some("9"));
    }

    #[test]
    fn test_locations() {
        let poi = event();
        let center = locations(&poi, POINT_TERM_CENTER);
        // one point, one line, one valid polygon; the broken polygon is skipped
        assert_eq!(center.len(), 3);
        assert_eq!(center[0], Geometry::Point(GeometryContent::new(38.7, -9.1)));
        assert_eq!(
            center[1],
            Geometry::Line {
                first: GeometryContent::new(38.7, -9.1),
                second: GeometryContent::new(38.8, -9.2)
            }
        );
        assert_eq!(center[2].size(), 4);

        assert_eq!(locations(&poi, POINT_TERM_ENTRANCE).len(), 1);
    }

    #[test]
    fn test_missing_fields() {
        let empty = json!({});
        assert!(label(&empty, "primary", "en_GB").is_none());
        assert!(thumbnails(&empty).is_empty());
        assert!(locations(&empty, "center").is_empty());
        assert!(contacts(&empty).is_none());
    }
}
