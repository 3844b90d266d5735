use badgekit_core::{Error, Resolution};
use badgekit_designer::{
    DesignQueue, DesignerOptions, DesignerState, ExportOptions, ExportPipeline, PageLayout,
    PdfEncoder, QueueItem, SourceImage, TemplateCatalog,
};
use image::{Rgba, RgbaImage};
use lopdf::Document;

fn session() -> DesignerState {
    let mut state = DesignerState::new(DesignerOptions {
        resolution: Resolution::from_dpi(50.0),
        ..Default::default()
    })
    .unwrap();
    let photo = RgbaImage::from_pixel(40, 40, Rgba([30, 90, 200, 255]));
    state.load_image(SourceImage::from_rgba(&photo).unwrap()).unwrap();
    state
}

#[test]
fn test_nine_circles_fill_two_pages() {
    let mut state = session();
    for _ in 0..9 {
        state.add_to_queue().unwrap();
    }

    let document = state.export_pdf().unwrap();
    assert_eq!(document.file_name, "badgekit-9-images.pdf");
    assert_eq!(document.page_count, 2);
    assert_eq!(document.placements.len(), 9);
    assert_eq!(document.placements[8].page_index, 1);

    let pdf = Document::load_mem(&document.bytes).unwrap();
    assert_eq!(pdf.get_pages().len(), 2);
}

#[test]
fn test_export_writes_loadable_file() {
    let mut state = session();
    state.select_template("heart").unwrap();
    state.add_to_queue().unwrap();
    state.select_template("circle45").unwrap();
    state.add_to_queue().unwrap();

    let document = state.export_pdf().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(&document.file_name);
    std::fs::write(&path, &document.bytes).unwrap();

    let pdf = Document::load(&path).unwrap();
    assert_eq!(pdf.get_pages().len(), 1);
    assert!(document.bytes.starts_with(b"%PDF-1.5"));
}

#[test]
fn test_custom_prefix_and_page() {
    let mut state = DesignerState::new(DesignerOptions {
        resolution: Resolution::from_dpi(50.0),
        export: ExportOptions {
            layout: PageLayout::new(80.0, 80.0, 5.0, 0.0),
            file_prefix: "party".to_string(),
            annotate: false,
        },
        ..Default::default()
    })
    .unwrap();
    let photo = RgbaImage::from_pixel(16, 16, Rgba([0, 0, 0, 255]));
    state.load_image(SourceImage::from_rgba(&photo).unwrap()).unwrap();
    state.add_to_queue().unwrap();
    state.add_to_queue().unwrap();

    // One 66 mm badge per 70 mm interior.
    let document = state.export_pdf().unwrap();
    assert_eq!(document.file_name, "party-2-images.pdf");
    assert_eq!(document.page_count, 2);
}

#[test]
fn test_oversized_item_fails_export() {
    let template = *TemplateCatalog::lookup("circle60").unwrap();
    let mut queue = DesignQueue::new();
    queue.push(QueueItem::new(Vec::new(), template));

    let pipeline = ExportPipeline::new(ExportOptions {
        layout: PageLayout::new(50.0, 50.0, 5.0, 2.0),
        ..Default::default()
    });
    let err = pipeline.export(&queue, &mut PdfEncoder::new()).unwrap_err();
    assert!(err.is_layout_error());
}

#[test]
fn test_corrupt_raster_fails_export() {
    let template = *TemplateCatalog::lookup("circle45").unwrap();
    let mut queue = DesignQueue::new();
    queue.push(QueueItem::new(b"not a png".to_vec(), template));

    let err = ExportPipeline::default()
        .export(&queue, &mut PdfEncoder::new())
        .unwrap_err();
    assert!(matches!(err, Error::Export(_)));
}
