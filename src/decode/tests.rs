//! Tests for decoder module

use super::*;
use serde_json::json;

// ============================================================================
// Format Tests
// ============================================================================

#[test]
fn test_format_default() {
    assert_eq!(Format::default(), Format::Json);
}

#[test]
fn test_format_mime_types() {
    assert_eq!(Format::Json.mime_type(), "application/json");
    assert_eq!(Format::Xml.mime_type(), "application/xml");
}

#[test]
fn test_format_from_mime() {
    assert_eq!(
        Format::from_mime("application/json; charset=utf-8"),
        Some(Format::Json)
    );
    assert_eq!(Format::from_mime("Application/XML"), Some(Format::Xml));
    assert_eq!(Format::from_mime("text/xml"), Some(Format::Xml));
    assert_eq!(Format::from_mime("text/html"), None);
}

#[test]
fn test_format_serde() {
    let format: Format = serde_yaml::from_str("xml").unwrap();
    assert_eq!(format, Format::Xml);
}

// ============================================================================
// JSON Decoder Tests
// ============================================================================

#[test]
fn test_json_decoder() {
    let body = r#"{"project": [{"id": "p-1"}, {"id": "p-2"}], "totalPages": 3}"#;
    let value = JsonDecoder::new().decode(body).unwrap();

    assert_eq!(value["project"][1]["id"], "p-2");
    assert_eq!(value["totalPages"], 3);
}

#[test]
fn test_json_decoder_invalid() {
    let err = Format::Json.decode("<projects/>").unwrap_err();
    assert!(err.is_decode_error());
}

// ============================================================================
// XML Decoder Tests
// ============================================================================

#[test]
fn test_xml_decoder_strips_namespaces() {
    let body = r#"<?xml version="1.0" encoding="UTF-8"?>
        <gtr:projects xmlns:gtr="http://gtr.rcuk.ac.uk/api">
            <gtr:project url="http://gtr.example/project/p-1">
                <gtr:id>p-1</gtr:id>
                <gtr:title>Soil &amp; Water</gtr:title>
            </gtr:project>
        </gtr:projects>"#;

    let value = XmlDecoder::new().decode(body).unwrap();
    assert_eq!(
        value,
        json!({
            "project": {
                "url": "http://gtr.example/project/p-1",
                "id": "p-1",
                "title": "Soil & Water"
            }
        })
    );
}

#[test]
fn test_xml_decoder_repeated_elements_become_arrays() {
    let body = r#"<gtr:people xmlns:gtr="http://gtr.rcuk.ac.uk/api">
            <gtr:person><gtr:id>a</gtr:id></gtr:person>
            <gtr:person><gtr:id>b</gtr:id></gtr:person>
            <gtr:person><gtr:id>c</gtr:id></gtr:person>
        </gtr:people>"#;

    let value = Format::Xml.decode(body).unwrap();
    let people = value["person"].as_array().unwrap();
    assert_eq!(people.len(), 3);
    assert_eq!(people[2]["id"], "c");
}

#[test]
fn test_xml_decoder_keeps_text_as_strings() {
    let body = r#"<fund><valuePounds>1250000</valuePounds><start>2010-10-01</start></fund>"#;
    let value = Format::Xml.decode(body).unwrap();

    assert_eq!(value["valuePounds"], "1250000");
    assert_eq!(value["start"], "2010-10-01");
}

#[test]
fn test_xml_decoder_text_beside_attributes() {
    let body = r#"<org><name lang="en">Aston University</name><empty/></org>"#;
    let value = Format::Xml.decode(body).unwrap();

    assert_eq!(value["name"]["lang"], "en");
    assert_eq!(value["name"]["$value"], "Aston University");
    assert_eq!(value_text(&value["name"]).as_deref(), Some("Aston University"));
    assert!(value["empty"].is_null());
}

#[test]
fn test_xml_decoder_cdata() {
    let body = r#"<project><abstractText><![CDATA[Uses <b>markup</b>]]></abstractText></project>"#;
    let value = Format::Xml.decode(body).unwrap();
    assert_eq!(value["abstractText"], "Uses <b>markup</b>");
}

#[test]
fn test_xml_decoder_invalid() {
    assert!(Format::Xml.decode("not xml").is_err());
    assert!(Format::Xml.decode("<a><b></a>").is_err());
    assert!(Format::Xml.decode("<a><b>").is_err());
}

#[test]
fn test_xml_and_json_views_match() {
    let xml = r#"<gtr:organisations xmlns:gtr="http://gtr.rcuk.ac.uk/api">
            <gtr:organisation url="u1"><gtr:id>o-1</gtr:id><gtr:name>One</gtr:name></gtr:organisation>
            <gtr:organisation url="u2"><gtr:id>o-2</gtr:id><gtr:name>Two</gtr:name></gtr:organisation>
        </gtr:organisations>"#;
    let json = r#"{"organisation": [
            {"url": "u1", "id": "o-1", "name": "One"},
            {"url": "u2", "id": "o-2", "name": "Two"}
        ]}"#;

    pretty_assertions::assert_eq!(
        Format::Xml.decode(xml).unwrap(),
        Format::Json.decode(json).unwrap()
    );
}

// ============================================================================
// Helper Tests
// ============================================================================

#[test]
fn test_extract_path() {
    let value = json!({"fund": {"funder": {"name": "EPSRC"}, "valuePounds": 10}});

    assert_eq!(
        extract_path(&value, "fund.funder.name"),
        Some(&json!("EPSRC"))
    );
    assert_eq!(extract_path(&value, "fund.valuePounds"), Some(&json!(10)));
    assert_eq!(extract_path(&value, "fund.missing"), None);
    assert_eq!(extract_path(&value, "fund.valuePounds.deeper"), None);
}

#[test]
fn test_as_list() {
    let many = json!([1, 2]);
    let one = json!({"id": 1});

    assert_eq!(as_list(Some(&many)).len(), 2);
    assert_eq!(as_list(Some(&one)), vec![&one]);
    assert!(as_list(Some(&json!(null))).is_empty());
    assert!(as_list(None).is_empty());
}

#[test]
fn test_value_text() {
    assert_eq!(value_text(&json!("x")).as_deref(), Some("x"));
    assert_eq!(value_text(&json!(42)).as_deref(), Some("42"));
    assert_eq!(value_text(&json!(true)).as_deref(), Some("true"));
    assert_eq!(value_text(&json!([1])), None);
    assert_eq!(value_text(&json!({"id": 1})), None);
}
