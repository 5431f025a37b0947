// src/content.rs
//! Rich-text normalization: from wire sections to render-ready blocks.
//!
//! `normalize` is a pure, total function — no I/O, deterministic, and it
//! never drops content: sections with empty bodies and blocks with empty
//! span lists pass through intact. Span order is preserved exactly as
//! received; reordering would change which characters end up formatted.

use crate::api::responses::{RawDocument, RawSection, RawSpan};
use crate::constants::WORDS_PER_MINUTE;
use crate::error::AppError;
use crate::model::{BlockKind, PostDetail, Section, Span, TextBlock};
use crate::types::Uid;

/// Normalizes raw rich-text sections into renderable sections.
pub fn normalize(sections: &[RawSection]) -> Vec<Section> {
    sections
        .iter()
        .map(|section| Section {
            heading: section.heading.clone(),
            blocks: section
                .body
                .iter()
                .map(|block| TextBlock {
                    text: block.text.clone(),
                    kind: BlockKind::from_api(&block.kind),
                    spans: block.spans.iter().map(map_span).collect(),
                })
                .collect(),
        })
        .collect()
}

/// Maps one wire span into the typed span vocabulary.
///
/// A span becomes a `Reference` only when the wire carries a non-null
/// `data` payload; everything else is a plain `Annotation` with no data
/// field at all.
fn map_span(raw: &RawSpan) -> Span {
    match &raw.data {
        Some(data) => Span::Reference {
            start: raw.start,
            end: raw.end,
            kind: raw.kind.clone(),
            data: data.clone(),
        },
        None => Span::Annotation {
            start: raw.start,
            end: raw.end,
            kind: raw.kind.clone(),
        },
    }
}

/// Estimates reading time in minutes at [`WORDS_PER_MINUTE`].
///
/// The count is per section: each section's word count is rounded up to
/// whole minutes independently, then the minutes are summed. This is NOT
/// the same as one ceiling over the global word count — a 250-word and a
/// 50-word section cost 2 + 1 = 3 minutes, where a global count would say
/// 2 — and the per-section form is the contract the renderer displays.
pub fn estimate_reading_time(sections: &[Section]) -> u32 {
    sections
        .iter()
        .map(|section| {
            let words: usize = section
                .blocks
                .iter()
                .map(|block| block.text.split_whitespace().count())
                .sum();
            ((words + WORDS_PER_MINUTE - 1) / WORDS_PER_MINUTE) as u32
        })
        .sum()
}

/// Assembles a full post detail from a raw document.
///
/// Requiredness is enforced here, with errors naming the missing field:
/// a detail document without a uid, title, author, banner URL or content
/// is malformed, never silently defaulted. The publication date is the
/// one legitimately nullable field.
pub fn assemble_post_detail(document: RawDocument) -> Result<PostDetail, AppError> {
    let missing = |field: &str| {
        AppError::MalformedResponse(format!(
            "document '{}' is missing required field '{}'",
            document.id, field
        ))
    };

    let uid_str = document.uid.as_deref().ok_or_else(|| missing("uid"))?;
    let uid = Uid::parse(uid_str)?;
    let title = document.data.title.clone().ok_or_else(|| missing("data.title"))?;
    let author = document.data.author.clone().ok_or_else(|| missing("data.author"))?;
    let banner_url = document
        .data
        .banner
        .as_ref()
        .and_then(|banner| banner.url.clone())
        .ok_or_else(|| missing("data.banner.url"))?;
    let content = document
        .data
        .content
        .as_ref()
        .ok_or_else(|| missing("data.content"))?;

    Ok(PostDetail {
        uid,
        first_publication_date: document.first_publication_date,
        title,
        banner_url,
        author,
        sections: normalize(content),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::responses::RawTextBlock;
    use pretty_assertions::assert_eq;

    fn raw_block(text: &str, spans: Vec<RawSpan>) -> RawTextBlock {
        RawTextBlock {
            kind: "paragraph".to_string(),
            text: text.to_string(),
            spans,
        }
    }

    fn raw_section(heading: &str, body: Vec<RawTextBlock>) -> RawSection {
        RawSection {
            heading: heading.to_string(),
            body,
        }
    }

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn span_without_data_round_trips_as_annotation() {
        let sections = vec![raw_section(
            "Intro",
            vec![raw_block(
                "bold text",
                vec![RawSpan {
                    start: 0,
                    end: 4,
                    kind: "strong".to_string(),
                    data: None,
                }],
            )],
        )];

        let normalized = normalize(&sections);
        assert_eq!(normalized.len(), 1);
        let span = &normalized[0].blocks[0].spans[0];
        assert_eq!((span.start(), span.end(), span.kind()), (0, 4, "strong"));
        assert!(span.data().is_none());
    }

    #[test]
    fn span_with_data_keeps_its_payload() {
        let mut data = serde_json::Map::new();
        data.insert("url".to_string(), serde_json::json!("https://example.com"));
        let sections = vec![raw_section(
            "Links",
            vec![raw_block(
                "see here",
                vec![RawSpan {
                    start: 4,
                    end: 8,
                    kind: "hyperlink".to_string(),
                    data: Some(data),
                }],
            )],
        )];

        let normalized = normalize(&sections);
        let span = &normalized[0].blocks[0].spans[0];
        assert_eq!(span.kind(), "hyperlink");
        assert_eq!(
            span.data().unwrap()["url"],
            serde_json::json!("https://example.com")
        );
    }

    #[test]
    fn empty_span_list_stays_an_empty_list() {
        let sections = vec![raw_section("Plain", vec![raw_block("no formatting", vec![])])];
        let normalized = normalize(&sections);
        assert_eq!(normalized[0].blocks[0].spans, Vec::<Span>::new());
    }

    #[test]
    fn span_order_is_preserved_verbatim() {
        // Out-of-order on purpose: the normalizer must not sort.
        let spans = vec![
            RawSpan { start: 10, end: 14, kind: "em".to_string(), data: None },
            RawSpan { start: 0, end: 4, kind: "strong".to_string(), data: None },
        ];
        let sections = vec![raw_section("S", vec![raw_block("some spanned text", spans)])];
        let normalized = normalize(&sections);
        let starts: Vec<usize> = normalized[0].blocks[0].spans.iter().map(|s| s.start()).collect();
        assert_eq!(starts, vec![10, 0]);
    }

    #[test]
    fn empty_sections_and_blocks_are_not_dropped() {
        let sections = vec![
            raw_section("Empty body", vec![]),
            raw_section("", vec![raw_block("", vec![])]),
        ];
        let normalized = normalize(&sections);
        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized[0].blocks.len(), 0);
        assert_eq!(normalized[1].blocks.len(), 1);
    }

    #[test]
    fn unknown_block_kinds_pass_through() {
        let mut block = raw_block("quoted", vec![]);
        block.kind = "quote".to_string();
        let normalized = normalize(&[raw_section("Q", vec![block])]);
        assert_eq!(normalized[0].blocks[0].kind.as_api_str(), "quote");
    }

    #[test]
    fn reading_time_sums_per_section_ceilings() {
        // Two sections of exactly 200 words: 1 minute each, 2 total.
        let sections = normalize(&[
            raw_section("A", vec![raw_block(&words(200), vec![])]),
            raw_section("B", vec![raw_block(&words(200), vec![])]),
        ]);
        assert_eq!(estimate_reading_time(&sections), 2);
    }

    #[test]
    fn reading_time_differs_from_global_count() {
        // 250 + 50 words: ceil(250/200) + ceil(50/200) = 2 + 1 = 3.
        // A single global ceiling over 300 words would say 2.
        let sections = normalize(&[
            raw_section("A", vec![raw_block(&words(250), vec![])]),
            raw_section("B", vec![raw_block(&words(50), vec![])]),
        ]);
        assert_eq!(estimate_reading_time(&sections), 3);
    }

    #[test]
    fn reading_time_counts_words_across_blocks_in_a_section() {
        let sections = normalize(&[raw_section(
            "A",
            vec![raw_block(&words(150), vec![]), raw_block(&words(100), vec![])],
        )]);
        // 250 words in one section: 2 minutes.
        assert_eq!(estimate_reading_time(&sections), 2);
    }

    #[test]
    fn reading_time_of_empty_content_is_zero() {
        let sections = normalize(&[raw_section("Empty", vec![])]);
        assert_eq!(estimate_reading_time(&sections), 0);
    }

    #[test]
    fn assemble_requires_banner_and_content() {
        let document: RawDocument = serde_json::from_str(
            r#"{
                "id": "X1",
                "uid": "a-post",
                "type": "post",
                "first_publication_date": "2021-03-25",
                "data": {"title": "T", "author": "A"}
            }"#,
        )
        .unwrap();

        match assemble_post_detail(document) {
            Err(AppError::MalformedResponse(msg)) => {
                assert!(msg.contains("data.banner.url"), "got: {}", msg)
            }
            other => panic!("expected MalformedResponse, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn assemble_builds_a_full_detail() {
        let document: RawDocument = serde_json::from_str(
            r#"{
                "id": "X1",
                "uid": "a-post",
                "type": "post",
                "first_publication_date": "2021-03-25T19:25:28+0000",
                "data": {
                    "title": "Creating a CRA project from scratch",
                    "author": "Joseph Oliveira",
                    "banner": {"url": "https://images.example/banner.png"},
                    "content": [
                        {
                            "heading": "Getting started",
                            "body": [
                                {"type": "paragraph", "text": "First steps.", "spans": []}
                            ]
                        }
                    ]
                }
            }"#,
        )
        .unwrap();

        let detail = assemble_post_detail(document).unwrap();
        assert_eq!(detail.uid.as_str(), "a-post");
        assert_eq!(detail.banner_url, "https://images.example/banner.png");
        assert_eq!(detail.sections.len(), 1);
        assert_eq!(detail.sections[0].heading, "Getting started");
        assert_eq!(detail.sections[0].blocks[0].kind, BlockKind::Paragraph);
    }
}
