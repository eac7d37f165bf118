use folio_core::{
    parse_document, render_document, render_front_matter, split_front_matter, Document,
    DocumentError,
};

const ARTICLE: &str = "---
title: \"Normalization vs Denormalization: When to Use Each\"
slug: normalization-vs-denormalization
date: 2025-09-14
summary: Trade-offs between normalized schemas and read-optimized copies.
tags:
  - Databases
  - SQL
  - databases
draft: true
author: Jane Doe
series:
  name: relational-theory
  part: 2
---
# Normalization

```sql
SELECT * FROM orders o JOIN customers c ON c.id = o.customer_id;
```
\r
Trailing spaces stay.   \n";

#[test]
fn parses_known_fields_and_preserves_extra_fields_in_order() {
    let document = parse_document(ARTICLE).expect("document should parse");

    assert_eq!(
        document.title,
        "Normalization vs Denormalization: When to Use Each"
    );
    assert_eq!(document.slug, "normalization-vs-denormalization");
    assert_eq!(document.date.to_string(), "2025-09-14");
    assert!(document.draft);
    assert_eq!(
        document.tags.iter().cloned().collect::<Vec<_>>(),
        vec!["databases".to_string(), "sql".to_string()]
    );

    let extra_keys = document
        .extra
        .iter()
        .filter_map(|(key, _)| key.as_str())
        .collect::<Vec<_>>();
    assert_eq!(extra_keys, vec!["author", "series"]);
    assert_eq!(
        document.extra.get("author").and_then(|value| value.as_str()),
        Some("Jane Doe")
    );
}

#[test]
fn body_is_preserved_byte_for_byte() {
    let document = parse_document(ARTICLE).expect("document should parse");
    let expected_body = split_front_matter(ARTICLE).expect("front matter should split").body;

    assert_eq!(document.body, expected_body);
    assert!(document.body.starts_with("# Normalization\n\n```sql\n"));
    assert!(document.body.ends_with("\r\nTrailing spaces stay.   \n"));
}

#[test]
fn render_then_parse_reproduces_equivalent_fields() {
    let original = parse_document(ARTICLE).expect("document should parse");
    let rendered = render_document(&original).expect("document should render");
    let reparsed = parse_document(&rendered).expect("document should parse");

    assert_eq!(reparsed, original);
}

#[test]
fn round_trip_is_independent_of_field_order() {
    let reordered = "---\ndraft: false\nsummary: Short.\ndate: 2025-09-13\nslug: acid-vs-base\ntitle: ACID vs BASE\n---\nbody";
    let original = parse_document(reordered).expect("document should parse");
    let front_matter = render_front_matter(&original).expect("front matter should render");

    assert!(front_matter.starts_with("---\ntitle: "));
    assert!(front_matter.ends_with("---\n"));

    let reparsed =
        parse_document(&format!("{front_matter}body")).expect("document should parse");
    assert_eq!(reparsed, original);
}

#[test]
fn tags_must_be_a_sequence_of_strings() {
    let scalar = "---\ntitle: T\nslug: s\ndate: 2025-09-14\nsummary: S\ntags: sql\n---\n";
    assert!(matches!(
        parse_document(scalar),
        Err(DocumentError::InvalidTags(_))
    ));

    let nested = "---\ntitle: T\nslug: s\ndate: 2025-09-14\nsummary: S\ntags: [[sql]]\n---\n";
    assert!(matches!(
        parse_document(nested),
        Err(DocumentError::InvalidTags(_))
    ));

    let empty = "---\ntitle: T\nslug: s\ndate: 2025-09-14\nsummary: S\ntags: []\n---\n";
    assert!(parse_document(empty).expect("document should parse").tags.is_empty());
}

#[test]
fn draft_must_be_boolean() {
    let source = "---\ntitle: T\nslug: s\ndate: 2025-09-14\nsummary: S\ndraft: maybe\n---\n";
    let err = parse_document(source).expect_err("document should be rejected");
    assert!(matches!(
        err,
        DocumentError::InvalidField { ref field, .. } if field == "draft"
    ));
}

#[test]
fn required_fields_are_checked_in_order() {
    let cases = [
        ("slug: s\ndate: 2025-09-14\nsummary: S\n", "title"),
        ("title: T\ndate: 2025-09-14\nsummary: S\n", "slug"),
        ("title: T\nslug: s\nsummary: S\n", "date"),
        ("title: T\nslug: s\ndate: 2025-09-14\n", "summary"),
        ("title: '   '\nslug: s\ndate: 2025-09-14\nsummary: S\n", "title"),
    ];

    for (metadata, field) in cases {
        let err = parse_document(&format!("---\n{metadata}---\n"))
            .expect_err("document should be rejected");
        assert_eq!(err, DocumentError::MissingField(field), "metadata: {metadata}");
    }
}

#[test]
fn non_string_title_is_invalid_field() {
    let source = "---\ntitle: 1984\nslug: s\ndate: 2025-09-14\nsummary: S\n---\n";
    let err = parse_document(source).expect_err("document should be rejected");
    assert!(matches!(
        err,
        DocumentError::InvalidField { ref field, .. } if field == "title"
    ));
}

#[test]
fn document_serializes_to_renderer_json() {
    let document = parse_document(ARTICLE).expect("document should parse");
    let json = serde_json::to_value(&document).expect("document should serialize");

    assert_eq!(json["slug"], "normalization-vs-denormalization");
    assert_eq!(json["date"], "2025-09-14");
    assert_eq!(json["tags"], serde_json::json!(["databases", "sql"]));
    assert_eq!(json["draft"], true);
    assert_eq!(json["extra"]["series"]["part"], 2);

    let decoded: Document = serde_json::from_value(json).expect("document should deserialize");
    assert_eq!(decoded, document);
}

#[test]
fn deserialize_rejects_invalid_slug() {
    let value = serde_json::json!({
        "slug": "Not Safe",
        "title": "T",
        "date": "2025-09-14",
        "summary": "S",
        "body": ""
    });

    let err = serde_json::from_value::<Document>(value).expect_err("document should be rejected");
    assert!(
        err.to_string().contains("slug is not URL-safe"),
        "unexpected error: {err}"
    );
}
