use badgekit_core::{DesignerError, Error, Resolution};
use badgekit_designer::{
    DesignerOptions, DesignerState, QueueCommand, RenderStyle, SourceImage,
};
use image::{Rgba, RgbaImage};

fn options() -> DesignerOptions {
    DesignerOptions {
        resolution: Resolution::from_dpi(72.0),
        ..Default::default()
    }
}

fn photo() -> SourceImage {
    SourceImage::from_rgba(&RgbaImage::from_pixel(80, 120, Rgba([220, 40, 40, 255]))).unwrap()
}

fn loaded() -> DesignerState {
    let mut state = DesignerState::new(options()).unwrap();
    state.load_image(photo()).unwrap();
    state
}

#[test]
fn test_new_session_defaults() {
    let state = DesignerState::new(options()).unwrap();
    assert_eq!(state.template().key, "circle60");
    assert!(!state.has_image());
    assert!(state.queue().is_empty());
    assert!(state.show_mask());
}

#[test]
fn test_load_fits_image() {
    let state = loaded();
    let (w, h) = state.geometry().size();
    let placement = state.placement().unwrap();
    assert!(placement.covers(w, h));
    assert_eq!(state.viewport().zoom(), 1.0);
}

#[test]
fn test_reset_and_center() {
    let mut state = loaded();
    state.pan_by(12.0, -7.0).unwrap();
    state.set_zoom(2.0).unwrap();

    state.center_image().unwrap();
    assert_eq!(state.viewport().pan_x(), 0.0);
    assert_eq!(state.viewport().pan_y(), 0.0);
    assert_eq!(state.viewport().zoom(), 2.0);

    state.pan_by(5.0, 5.0).unwrap();
    state.reset_view().unwrap();
    assert_eq!(state.viewport().pan_x(), 0.0);
    assert_eq!(state.viewport().pan_y(), 0.0);
    assert_eq!(state.viewport().zoom(), 1.0);
}

#[test]
fn test_zoom_is_clamped_by_session() {
    let mut state = loaded();
    state.set_zoom(12.0).unwrap();
    assert_eq!(state.viewport().zoom(), 3.0);
}

#[test]
fn test_select_template_resizes_canvas_and_resets_view() {
    let mut state = loaded();
    state.set_zoom(2.0).unwrap();
    state.pan_by(4.0, 4.0).unwrap();

    state.select_template("heart").unwrap();
    let res = Resolution::from_dpi(72.0);
    assert_eq!(
        state.geometry().size(),
        (res.mm_to_px_rounded(61.0), res.mm_to_px_rounded(56.0))
    );
    assert_eq!(state.viewport().zoom(), 1.0);
    assert_eq!(state.viewport().pan_x(), 0.0);
    assert_eq!(state.preview().unwrap().dimensions(), state.geometry().size());
}

#[test]
fn test_select_template_without_image() {
    let mut state = DesignerState::new(options()).unwrap();
    state.select_template("circle45").unwrap();
    assert_eq!(state.template().key, "circle45");
    assert!(state.preview().is_none());
}

#[test]
fn test_drag_pans_by_display_ratio() {
    let mut state = loaded();
    let canvas_width = state.geometry().width() as f64;
    state.start_drag(0.0, 0.0).unwrap();
    // Canvas shown at half size: one display pixel is two canvas pixels.
    state.drag_to(10.0, 5.0, canvas_width / 2.0).unwrap();
    state.end_drag();
    state.drag_to(50.0, 50.0, canvas_width / 2.0).unwrap();
    assert_eq!(state.viewport().pan_x(), 20.0);
    assert_eq!(state.viewport().pan_y(), 10.0);
}

#[test]
fn test_actions_without_image_change_nothing() {
    let mut state = DesignerState::new(options()).unwrap();
    for result in [
        state.set_zoom(2.0),
        state.pan_by(1.0, 1.0),
        state.center_image(),
        state.reset_view(),
        state.start_drag(0.0, 0.0),
    ] {
        assert!(result.unwrap_err().is_precondition());
    }
    assert!(state.add_to_queue().unwrap_err().is_precondition());
    assert_eq!(state.viewport().zoom(), 1.0);
    assert_eq!(state.viewport().pan_x(), 0.0);
    assert!(state.queue().is_empty());
}

#[test]
fn test_add_to_queue_uses_bleed_size() {
    let mut state = loaded();
    state.select_template("heart").unwrap();
    let id = state.add_to_queue().unwrap();
    let item = state.queue().get(id).unwrap();
    assert_eq!((item.width_mm(), item.height_mm()), (61.0, 56.0));

    let raster = image::load_from_memory(item.raster()).unwrap();
    assert_eq!(
        (raster.width(), raster.height()),
        state.geometry().size()
    );
}

#[test]
fn test_add_to_queue_keeps_the_editor_preview() {
    let mut state = loaded();
    state.set_zoom(1.6).unwrap();
    state.set_pan(-12.0, 8.0).unwrap();
    let before = state.preview().cloned().unwrap();

    let id = state.add_to_queue().unwrap();

    assert_eq!(state.queue().len(), 1);
    assert_eq!(state.queue().items()[0].id(), id);
    assert_eq!(state.preview(), Some(&before));
    // The queued raster is the masked print render, not the editor view.
    let raster = image::load_from_memory(state.queue().items()[0].raster())
        .unwrap()
        .to_rgba8();
    assert_ne!(raster, before);
}

#[test]
fn test_render_failure_is_reported_and_preview_restored() {
    let mut state = DesignerState::new(DesignerOptions {
        style: RenderStyle {
            // Shrinks the mask shape to nothing, so export rendering fails.
            mask_epsilon_px: -10_000.0,
            ..Default::default()
        },
        ..options()
    })
    .unwrap();
    state.load_image(photo()).unwrap();
    let before = state.preview().cloned().unwrap();

    let err = state.add_to_queue().unwrap_err();
    assert!(matches!(
        err,
        Error::Designer(DesignerError::QueueAdd { .. })
    ));
    assert!(state.queue().is_empty());
    assert_eq!(state.preview(), Some(&before));
}

#[test]
fn test_queue_commands_dispatch() {
    let mut state = loaded();
    let first = state.add_to_queue().unwrap();
    let second = state.add_to_queue().unwrap();
    state.remove_from_queue(first).unwrap();
    assert_eq!(state.queue().items()[0].id(), second);
    assert_eq!(state.dispatch(QueueCommand::Clear).unwrap(), 1);
    assert!(state.queue().is_empty());
}

#[test]
fn test_export_with_empty_queue_adds_current_design() {
    let mut state = loaded();
    let document = state.export_pdf().unwrap();
    assert_eq!(state.queue().len(), 1);
    assert_eq!(document.page_count, 1);
    assert_eq!(document.file_name, "badgekit-1-images.pdf");
}

#[test]
fn test_export_without_anything_is_refused() {
    let mut state = DesignerState::new(options()).unwrap();
    let err = state.export_pdf().unwrap_err();
    assert!(matches!(err, Error::Designer(DesignerError::NothingToExport)));
}

#[test]
fn test_export_uses_existing_queue_only() {
    let mut state = loaded();
    state.add_to_queue().unwrap();
    state.add_to_queue().unwrap();
    let document = state.export_pdf().unwrap();
    assert_eq!(state.queue().len(), 2);
    assert_eq!(document.placements.len(), 2);
}
