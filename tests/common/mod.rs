//! Fixture PDFs built with lopdf.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// A text line placed on a fixture page: text, font size, baseline y.
pub type FixtureLine<'a> = (&'a str, f32, f32);

/// Page height of every fixture page (A4).
pub const PAGE_HEIGHT: f32 = 842.0;

/// Build a PDF whose pages hold the given lines, one BT/ET block per line.
pub fn build_pdf(pages: &[Vec<FixtureLine<'_>>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for (text, size, y) in lines {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), (*size).into()]));
            operations.push(Operation::new("Td", vec![72.into(), (*y).into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*text)]));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// A three-page report with numbered sections.
pub fn report_pdf() -> Vec<u8> {
    build_pdf(&[
        vec![
            ("Quarterly Report", 24.0, 760.0),
            ("Table of Contents", 14.0, 700.0),
            ("Prepared by the finance team.", 10.0, 660.0),
        ],
        vec![
            ("1. Introduction", 18.0, 760.0),
            ("This report covers the third quarter.", 10.0, 730.0),
        ],
        vec![
            ("1.1 Scope", 14.0, 760.0),
            ("Only audited figures are included.", 10.0, 730.0),
        ],
    ])
}
