//! End-to-end over the wire boundary: store records in, Markdown out,
//! and parser output ready for block-append submission.

use blockdown_convert::{parse, render};
use blockdown_core::{Block, BlockKind, Result};
use serde_json::json;

#[tokio::test]
async fn store_records_render_with_unknown_types_skipped() {
    let records = vec![
        json!({
            "id": "b1",
            "type": "heading_1",
            "has_children": false,
            "heading_1": { "rich_text": [
                { "type": "text", "text": { "content": "Title", "link": null } }
            ]}
        }),
        // Not in the supported set: silently omitted, no line, no error
        json!({ "id": "b2", "type": "synced_block", "synced_block": {} }),
        json!({
            "id": "b3",
            "type": "paragraph",
            "has_children": false,
            "paragraph": { "rich_text": [
                { "type": "text", "text": { "content": "Body", "link": null },
                  "annotations": { "italic": true } }
            ]}
        }),
    ];

    let blocks: Vec<Block> = records.iter().filter_map(Block::from_record).collect();
    assert_eq!(blocks.len(), 2);

    let markdown = render(&blocks, None).await.unwrap();
    assert_eq!(markdown, "# Title\n*Body*");
}

#[tokio::test]
async fn nested_records_render_through_fetcher() {
    let parent = Block::from_record(&json!({
        "id": "toggle-1",
        "type": "toggle",
        "has_children": true,
        "toggle": { "rich_text": [
            { "type": "text", "text": { "content": "Details", "link": null } }
        ]}
    }))
    .unwrap();

    let fetch = |id: &str| -> futures::future::BoxFuture<'static, Result<Vec<Block>>> {
        assert_eq!(id, "toggle-1");
        Box::pin(async {
            Ok(vec![
                Block::from_record(&json!({
                    "id": "child-1",
                    "type": "paragraph",
                    "has_children": false,
                    "paragraph": { "rich_text": [
                        { "type": "text", "text": { "content": "hidden", "link": null } }
                    ]}
                }))
                .unwrap(),
            ])
        })
    };

    let markdown = render(&[parent], Some(&fetch)).await.unwrap();
    assert_eq!(markdown, "- Details\n  hidden");
}

#[test]
fn parsed_blocks_are_submittable_payloads() {
    let blocks = parse("## Plan\n- [ ] write\n```sh\nmake\n```");
    let payloads: Vec<_> = blocks.iter().map(Block::to_create_payload).collect();

    assert_eq!(payloads.len(), 3);
    for payload in &payloads {
        assert_eq!(payload["object"], "block");
    }
    assert_eq!(payloads[0]["type"], "heading_2");
    assert_eq!(payloads[1]["to_do"]["checked"], false);
    assert_eq!(payloads[2]["code"]["language"], "sh");
    assert_eq!(
        payloads[2]["code"]["rich_text"][0]["text"]["content"],
        "make"
    );

    // Payloads decode back into the same kinds the parser emitted
    for (block, payload) in blocks.iter().zip(&payloads) {
        let decoded = Block::from_record(payload).expect("payload decodes");
        assert_eq!(decoded.kind, block.kind);
    }
}

#[test]
fn table_records_round_the_table_children() {
    // A table block itself emits nothing; its row children carry content.
    let records = vec![
        json!({ "id": "t", "type": "table", "has_children": true, "table": {} }),
        json!({
            "id": "r1",
            "type": "table_row",
            "table_row": { "cells": [
                [{ "type": "text", "text": { "content": "A", "link": null } }],
                [{ "type": "text", "text": { "content": "B", "link": null } }]
            ]}
        }),
    ];

    let blocks: Vec<Block> = records.iter().filter_map(Block::from_record).collect();
    assert!(matches!(blocks[0].kind, BlockKind::Table));
    if let BlockKind::TableRow { cells } = &blocks[1].kind {
        assert_eq!(cells.len(), 2);
    } else {
        panic!("Expected TableRow kind");
    }
}
