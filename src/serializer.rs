//! Writes [`Value`]s as MKM request documents.
//!
//! The document is always a single `<request>` element. Below it, mapping
//! keys become element tags, a sequence repeats the tag it is stored under
//! (wrapping each mapping item in its own element), and a scalar becomes
//! character data:
//!
//! ```
//! use reqwest_mkm::{mapping, serializer};
//!
//! let body = mapping! {
//!     "action" => "add",
//!     "article" => vec![mapping! { "idArticle" => 1, "amount" => 1 }],
//! };
//! let xml = serializer::serialize_mapping(&body).unwrap();
//! assert_eq!(
//!     xml,
//!     "<?xml version=\"1.0\" encoding=\"utf-8\"?><request>\
//!      <action>add</action>\
//!      <article><idArticle>1</idArticle><amount>1</amount></article>\
//!      </request>"
//! );
//! ```
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::{Mapping, SerializationError, SerializationResult, Value};

/// Tag of the document element.
pub const ROOT_TAG: &str = "request";

/// Serializes `value` into a request document.
///
/// # Errors
///
/// Fails with [`SerializationError::NotAMapping`] unless `value` is a
/// [`Value::Mapping`]; nothing is written in that case.
pub fn serialize(value: &Value) -> SerializationResult<String> {
    match value {
        Value::Mapping(mapping) => serialize_mapping(mapping),
        other => Err(SerializationError::NotAMapping(other.kind())),
    }
}

/// Serializes `mapping` as the children of the document element.
pub fn serialize_mapping(mapping: &Mapping) -> SerializationResult<String> {
    let mut writer = Writer::new(Vec::new());
    write_event(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)),
    )?;
    write_event(&mut writer, Event::Start(BytesStart::new(ROOT_TAG)))?;
    write_mapping(&mut writer, mapping)?;
    write_event(&mut writer, Event::End(BytesEnd::new(ROOT_TAG)))?;
    String::from_utf8(writer.into_inner()).map_err(|_| SerializationError::Utf8)
}

fn write_mapping(writer: &mut Writer<Vec<u8>>, mapping: &Mapping) -> SerializationResult<()> {
    for (tag, value) in mapping.iter() {
        write_value(writer, tag, value)?;
    }
    Ok(())
}

// `tag` is the name of the element the value is stored under.
fn write_value(writer: &mut Writer<Vec<u8>>, tag: &str, value: &Value) -> SerializationResult<()> {
    match value {
        // a mapping contributes its children only
        Value::Mapping(mapping) => write_mapping(writer, mapping),
        Value::Sequence(items) => {
            for item in items {
                match item {
                    Value::Mapping(mapping) => {
                        write_event(writer, Event::Start(BytesStart::new(tag)))?;
                        write_mapping(writer, mapping)?;
                        write_event(writer, Event::End(BytesEnd::new(tag)))?;
                    }
                    other => write_value(writer, tag, other)?,
                }
            }
            Ok(())
        }
        Value::Scalar(text) => {
            write_event(writer, Event::Start(BytesStart::new(tag)))?;
            write_event(writer, Event::Text(BytesText::new(text)))?;
            write_event(writer, Event::End(BytesEnd::new(tag)))
        }
    }
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> SerializationResult<()> {
    writer
        .write_event(event)
        .map_err(|e| SerializationError::Xml(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping;

    const DECL: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>";

    fn document(inner: &str) -> String {
        format!("{}<request>{}</request>", DECL, inner)
    }

    #[test]
    fn scalars_become_leaves() {
        let body = mapping! {
            "idProduct" => 100_569,
            "comments" => "mint",
            "isFoil" => false,
            "price" => 1.25,
        };
        assert_eq!(
            serialize_mapping(&body).unwrap(),
            document(
                "<idProduct>100569</idProduct>\
                 <comments>mint</comments>\
                 <isFoil>false</isFoil>\
                 <price>1.25</price>"
            )
        );
    }

    #[test]
    fn sequence_of_mappings_wraps_each_item() {
        let body = mapping! {
            "article" => vec![
                mapping! { "idArticle" => 1, "amount" => 1 },
                mapping! { "idArticle" => 2, "count" => 3 },
            ],
        };
        assert_eq!(
            serialize(&body.into()).unwrap(),
            document(
                "<article><idArticle>1</idArticle><amount>1</amount></article>\
                 <article><idArticle>2</idArticle><count>3</count></article>"
            )
        );
    }

    #[test]
    fn sequence_of_scalars_is_not_wrapped() {
        let body = mapping! {
            "action" => "add",
            "complaint" => vec!["late", "damaged"],
        };
        assert_eq!(
            serialize(&body.into()).unwrap(),
            document(
                "<action>add</action>\
                 <complaint>late</complaint>\
                 <complaint>damaged</complaint>"
            )
        );
    }

    #[test]
    fn sequence_count_matches_items() {
        let items: Vec<Mapping> = (0..5).map(|i| mapping! { "idProduct" => i }).collect();
        let xml = serialize_mapping(&mapping! { "product" => items }).unwrap();
        assert_eq!(xml.matches("<product>").count(), 5);
        assert_eq!(xml.matches("</product>").count(), 5);
        assert_eq!(xml.matches("<idProduct>").count(), 5);
    }

    #[test]
    fn nested_mapping_is_flattened_into_parent() {
        let body = mapping! {
            "outer" => mapping! { "inner" => 1 },
            "after" => 2,
        };
        assert_eq!(
            serialize_mapping(&body).unwrap(),
            document("<inner>1</inner><after>2</after>")
        );
    }

    #[test]
    fn empty_mappings() {
        assert_eq!(serialize_mapping(&Mapping::new()).unwrap(), document(""));

        let body = mapping! { "wantslist" => vec![Mapping::new()] };
        assert_eq!(
            serialize_mapping(&body).unwrap(),
            document("<wantslist></wantslist>")
        );
    }

    #[test]
    fn empty_mapping_under_a_key_writes_nothing() {
        let body = mapping! { "a" => Mapping::new(), "b" => 1 };
        assert_eq!(serialize_mapping(&body).unwrap(), document("<b>1</b>"));
    }

    #[test]
    fn sequence_inside_a_sequence_item() {
        let body = mapping! {
            "article" => vec![mapping! {
                "idArticle" => 7,
                "product" => vec![
                    mapping! { "idProduct" => 1 },
                    mapping! { "idProduct" => 2 },
                ],
            }],
        };
        assert_eq!(
            serialize_mapping(&body).unwrap(),
            document(
                "<article><idArticle>7</idArticle>\
                 <product><idProduct>1</idProduct></product>\
                 <product><idProduct>2</idProduct></product></article>"
            )
        );
    }

    #[test]
    fn nested_sequences_repeat_the_tag() {
        let body = mapping! {
            "flag" => vec![Value::from(vec!["a", "b"]), Value::from("c")],
        };
        assert_eq!(
            serialize_mapping(&body).unwrap(),
            document("<flag>a</flag><flag>b</flag><flag>c</flag>")
        );
    }

    #[test]
    fn character_data_is_escaped() {
        let body = mapping! { "comment" => "Fish & Chips <3" };
        assert_eq!(
            serialize_mapping(&body).unwrap(),
            document("<comment>Fish &amp; Chips &lt;3</comment>")
        );
    }

    #[test]
    fn non_mapping_root_is_rejected() {
        assert_eq!(
            serialize(&Value::from("add")),
            Err(SerializationError::NotAMapping("scalar"))
        );
        assert_eq!(
            serialize(&Value::from(vec![mapping! { "a" => 1 }])),
            Err(SerializationError::NotAMapping("sequence"))
        );
    }
}
