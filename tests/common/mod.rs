//! Shared helpers for the HTTP integration tests

#![allow(dead_code)]

use std::path::Path;

use axum::body::Body;
use axum::http::{header, Request};
use lopdf::{content::Content, content::Operation, Dictionary, Document, Object, Stream};
use tempfile::TempDir;

use pdfshelf_server::config::{Config, PreviewConfig, ServerConfig, StorageConfig};
use pdfshelf_server::state::AppState;

/// A state over a fresh storage directory
pub fn setup(previews_enabled: bool) -> (TempDir, AppState) {
    let dir = tempfile::tempdir().unwrap();
    let state = state_for(dir.path(), previews_enabled);
    (dir, state)
}

pub fn state_for(dir: &Path, previews_enabled: bool) -> AppState {
    let config = Config {
        server: ServerConfig::default(),
        storage: StorageConfig {
            dir: dir.to_path_buf(),
        },
        preview: PreviewConfig {
            scale: 0.5,
            enabled: previews_enabled,
        },
    };
    AppState::new(config).unwrap()
}

/// A PDF with one page per entry in `widths`, height 200
pub fn build_pdf(widths: &[i64]) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for (i, width) in widths.iter().enumerate() {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Td", vec![Object::Integer(20), Object::Integer(100)]),
                Operation::new(
                    "Tj",
                    vec![Object::String(
                        format!("Page {}", i + 1).into_bytes(),
                        lopdf::StringFormat::Literal,
                    )],
                ),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));
        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(*width),
                    Object::Integer(200),
                ]),
            ),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Count", Object::Integer(widths.len() as i64)),
            ("Kids", Object::Array(kids)),
        ])),
    );
    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// MediaBox widths of each page, in order
pub fn page_widths(path: &Path) -> Vec<i64> {
    let doc = Document::load(path).unwrap();
    doc.get_pages()
        .values()
        .map(|&id| {
            let page = doc.get_dictionary(id).unwrap();
            let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
            media_box[2].as_i64().unwrap() - media_box[0].as_i64().unwrap()
        })
        .collect()
}

/// `/Rotate` of each page, in order (0 when absent)
pub fn page_rotations(path: &Path) -> Vec<i64> {
    let doc = Document::load(path).unwrap();
    doc.get_pages()
        .values()
        .map(|&id| {
            doc.get_dictionary(id)
                .unwrap()
                .get(b"Rotate")
                .and_then(|r| r.as_i64())
                .unwrap_or(0)
        })
        .collect()
}

/// A multipart POST with a single file field
pub fn multipart_upload(uri: &str, field: &str, filename: &str, bytes: &[u8]) -> Request<Body> {
    let boundary = "pdfshelf-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/pdf\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}
