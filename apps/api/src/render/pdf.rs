//! PDF writer built on `lopdf`. Draws each placed line with a standard-14 base
//! font, so no font program is embedded.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use tracing::info;

use crate::errors::AppError;
use crate::layout::font_metrics::MM_PER_PT;
use crate::layout::paginate::PageLayout;
use crate::layout::PaginatedDocument;
use crate::render::DocumentRenderer;

const FONT_RESOURCE: &str = "F1";

pub struct PdfRenderer;

impl DocumentRenderer for PdfRenderer {
    fn content_type(&self) -> &'static str {
        "application/pdf"
    }

    fn render(&self, document: &PaginatedDocument) -> Result<Vec<u8>, AppError> {
        let config = &document.config;
        let page_width_pt = config.page_width_mm / MM_PER_PT;
        let page_height_pt = config.page_height_mm / MM_PER_PT;

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => config.font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                FONT_RESOURCE => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(document.pages.len());
        for page in &document.pages {
            let content = page_content(page, config.font_size_pt, config.page_height_mm);
            let encoded = content
                .encode()
                .map_err(|e| AppError::Export(format!("Failed to encode page content: {e}")))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
            let page_id: ObjectId = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let page_count = kids.len() as i64;
        let media_box: Vec<Object> = vec![
            Object::Integer(0),
            Object::Integer(0),
            page_width_pt.into(),
            page_height_pt.into(),
        ];
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => media_box,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| AppError::Export(format!("Failed to write PDF: {e}")))?;

        info!(
            "Rendered PDF: {} pages, {} bytes",
            document.pages.len(),
            bytes.len()
        );
        Ok(bytes)
    }
}

/// One text object per line. Layout `y` is measured from the top; PDF user
/// space grows upwards from the bottom edge.
fn page_content(page: &PageLayout, font_size_pt: f32, page_height_mm: f32) -> Content {
    let mut operations = Vec::with_capacity(page.lines.len() * 5);
    for line in &page.lines {
        let x_pt = line.x_mm / MM_PER_PT;
        let y_pt = (page_height_mm - line.y_mm) / MM_PER_PT;
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![FONT_RESOURCE.into(), font_size_pt.into()],
        ));
        operations.push(Operation::new("Td", vec![x_pt.into(), y_pt.into()]));
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(encode_win_ansi(&line.text))],
        ));
        operations.push(Operation::new("ET", vec![]));
    }
    Content { operations }
}

/// Encodes text for a WinAnsiEncoding base font. Unmappable characters become `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7E}' | '\u{A0}'..='\u{FF}' => c as u8,
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            _ => b'?',
        })
        .collect()
}
