//! Minimal PDFs for tests.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream};

/// Build a one-page PDF whose page shows each of `lines` in Helvetica.
pub(crate) fn text_pdf(lines: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let page_tree_id = doc.new_object_id();

    let font_id = doc.add_object(Dictionary::from_iter([
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
    ]));

    let resources_id = doc.add_object(Dictionary::from_iter([(
        "Font",
        Object::Dictionary(Dictionary::from_iter([("F1", Object::Reference(font_id))])),
    )]));

    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 10.into()]),
        Operation::new("TL", vec![14.into()]),
        Operation::new("Td", vec![50.into(), 750.into()]),
    ];
    for line in lines {
        operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
        operations.push(Operation::new("T*", vec![]));
    }
    operations.push(Operation::new("ET", vec![]));

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));

    let page_id = doc.add_object(Dictionary::from_iter([
        ("Type", Object::Name(b"Page".to_vec())),
        ("Parent", Object::Reference(page_tree_id)),
        ("Contents", Object::Reference(content_id)),
        ("Resources", Object::Reference(resources_id)),
        (
            "MediaBox",
            Object::Array(vec![0.into(), 0.into(), 612.into(), 792.into()]),
        ),
    ]));

    let page_tree = Dictionary::from_iter([
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(vec![Object::Reference(page_id)])),
        ("Count", Object::Integer(1)),
    ]);
    doc.objects.insert(page_tree_id, Object::Dictionary(page_tree));

    let catalog_id = doc.add_object(Dictionary::from_iter([
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(page_tree_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut output = Vec::new();
    doc.save_to(&mut output).unwrap();
    output
}

/// Build a one-page PDF showing a single line of text.
pub(crate) fn single_page_pdf(text: &str) -> Vec<u8> {
    text_pdf(&[text])
}

/// Build a one-page e-Faktur for "PT CONTOH MAKMUR" dated 5 Januari 2024 with
/// the given reference line.
pub(crate) fn faktur_pdf(reference: &str) -> Vec<u8> {
    let reference = format!("Referensi: {}", reference);
    text_pdf(&[
        "Faktur Pajak",
        "Kode dan Nomor Seri Faktur Pajak: 04002400123456789",
        "#0012345678901000000000",
        "Pembeli Barang Kena Pajak / Penerima Jasa Kena Pajak:",
        "Nama : PT CONTOH MAKMUR",
        "Alamat : Jl. Sudirman 1, Jakarta",
        "JAKARTA SELATAN, 5 Januari 2024",
        &reference,
    ])
}
