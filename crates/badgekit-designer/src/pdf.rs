//! PDF document encoder built on lopdf.
//!
//! Rasters are embedded as DeviceRGB image XObjects, once per distinct
//! PNG; repeated copies of a design share one XObject. Positions arrive in
//! millimeters from the page's top-left corner and are converted to PDF
//! points with the y axis flipped.

use std::collections::HashMap;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

use badgekit_core::{mm_to_pt, ExportError};

use crate::export::DocumentEncoder;

const FONT_NAME: &str = "F1";
const DOCUMENT_TITLE: &str = "BadgeKit Export";

#[derive(Debug)]
struct PdfPage {
    width_pt: f64,
    height_pt: f64,
    operations: Vec<Operation>,
    images: Vec<(String, ObjectId)>,
}

/// Builds a PDF in memory
pub struct PdfEncoder {
    doc: Document,
    font_id: ObjectId,
    pages: Vec<PdfPage>,
    embedded: HashMap<Vec<u8>, (String, ObjectId)>,
}

impl PdfEncoder {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        Self {
            doc,
            font_id,
            pages: Vec::new(),
            embedded: HashMap::new(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_mut(&mut self, index: usize) -> Result<&mut PdfPage, ExportError> {
        self.pages
            .get_mut(index)
            .ok_or(ExportError::NoPage { index })
    }

    /// XObject name and id for `png`, embedding it on first use
    fn embedded_image(&mut self, png: &[u8]) -> Result<(String, ObjectId), ExportError> {
        if let Some(found) = self.embedded.get(png) {
            return Ok(found.clone());
        }
        let id = self.embed_png(png)?;
        let name = format!("Im{}", self.embedded.len());
        tracing::debug!("Embedded raster {} as {:?}", name, id);
        self.embedded.insert(png.to_vec(), (name.clone(), id));
        Ok((name, id))
    }

    fn embed_png(&mut self, png: &[u8]) -> Result<ObjectId, ExportError> {
        let image = image::load_from_memory(png)
            .map_err(|e| ExportError::Image {
                reason: e.to_string(),
            })?
            .to_rgb8();
        let (width, height) = image.dimensions();
        let stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width as i64,
                "Height" => height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
            },
            image.into_raw(),
        );
        Ok(self.doc.add_object(stream))
    }
}

impl Default for PdfEncoder {
    fn default() -> Self {
        Self::new()
    }
}

fn real(value: f64) -> Object {
    (value as f32).into()
}

impl DocumentEncoder for PdfEncoder {
    fn add_page(&mut self, width_mm: f64, height_mm: f64) -> usize {
        self.pages.push(PdfPage {
            width_pt: mm_to_pt(width_mm),
            height_pt: mm_to_pt(height_mm),
            operations: Vec::new(),
            images: Vec::new(),
        });
        self.pages.len() - 1
    }

    fn draw_image(
        &mut self,
        page: usize,
        png: &[u8],
        x_mm: f64,
        y_mm: f64,
        width_mm: f64,
        height_mm: f64,
    ) -> Result<(), ExportError> {
        self.page_mut(page)?;
        let (name, image_id) = self.embedded_image(png)?;

        let page = self.page_mut(page)?;
        let width = mm_to_pt(width_mm);
        let height = mm_to_pt(height_mm);
        let x = mm_to_pt(x_mm);
        let y = page.height_pt - mm_to_pt(y_mm) - height;

        page.operations.push(Operation::new("q", vec![]));
        page.operations.push(Operation::new(
            "cm",
            vec![
                real(width),
                real(0.0),
                real(0.0),
                real(height),
                real(x),
                real(y),
            ],
        ));
        page.operations
            .push(Operation::new("Do", vec![Object::Name(name.clone().into_bytes())]));
        page.operations.push(Operation::new("Q", vec![]));
        if !page.images.iter().any(|(existing, _)| *existing == name) {
            page.images.push((name, image_id));
        }
        Ok(())
    }

    fn draw_text(
        &mut self,
        page: usize,
        text: &str,
        x_mm: f64,
        y_mm: f64,
        size_pt: f64,
        gray: u8,
    ) -> Result<(), ExportError> {
        let page = self.page_mut(page)?;
        let x = mm_to_pt(x_mm);
        let y = page.height_pt - mm_to_pt(y_mm);

        page.operations.push(Operation::new("BT", vec![]));
        page.operations
            .push(Operation::new("Tf", vec![FONT_NAME.into(), real(size_pt)]));
        page.operations
            .push(Operation::new("g", vec![real(gray as f64 / 255.0)]));
        page.operations
            .push(Operation::new("Td", vec![real(x), real(y)]));
        page.operations.push(Operation::new(
            "Tj",
            vec![Object::String(text.as_bytes().to_vec(), StringFormat::Literal)],
        ));
        page.operations.push(Operation::new("ET", vec![]));
        Ok(())
    }

    fn finish(&mut self) -> Result<Vec<u8>, ExportError> {
        // Leave a fresh encoder behind so the value stays usable.
        let PdfEncoder {
            mut doc,
            font_id,
            pages,
            ..
        } = std::mem::take(self);
        let pages_id = doc.new_object_id();
        let mut kids: Vec<Object> = Vec::with_capacity(pages.len());

        for page in pages {
            let content = Content {
                operations: page.operations,
            };
            let encoded = content.encode().map_err(|e| ExportError::Encode {
                reason: e.to_string(),
            })?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

            let mut xobjects = lopdf::Dictionary::new();
            for (name, id) in page.images {
                xobjects.set(name, id);
            }
            let resources_id = doc.add_object(dictionary! {
                "Font" => dictionary! {
                    FONT_NAME => font_id,
                },
                "XObject" => xobjects,
            });

            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![
                    0.into(),
                    0.into(),
                    real(page.width_pt),
                    real(page.height_pt),
                ],
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.set_object(
            pages_id,
            dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            },
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(DOCUMENT_TITLE),
            "Creator" => Object::string_literal("BadgeKit"),
            "CreationDate" => Object::string_literal(
                chrono::Utc::now().format("D:%Y%m%d%H%M%SZ").to_string()
            ),
        });
        doc.trailer.set("Info", info_id);

        doc.compress();
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).map_err(|e| ExportError::Encode {
            reason: e.to_string(),
        })?;
        Ok(bytes)
    }
}
