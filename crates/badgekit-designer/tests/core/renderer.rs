use badgekit_core::Resolution;
use badgekit_designer::{
    BoundaryPath, CanvasGeometry, MaskRenderer, RenderStyle, SourceImage, TemplateCatalog, Viewport,
};
use image::{Rgba, RgbaImage};

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

fn black_source(width: u32, height: u32) -> SourceImage {
    SourceImage::from_rgba(&RgbaImage::from_pixel(width, height, BLACK)).unwrap()
}

fn distance_to_edge(segments: &[(f32, f32, f32, f32)], x: f32, y: f32) -> f32 {
    segments
        .iter()
        .map(|&(ax, ay, bx, by)| {
            let (abx, aby) = (bx - ax, by - ay);
            let len_sq = abx * abx + aby * aby;
            let t = if len_sq > 0.0 {
                (((x - ax) * abx + (y - ay) * aby) / len_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let (px, py) = (ax + abx * t - x, ay + aby * t - y);
            (px * px + py * py).sqrt()
        })
        .fold(f32::INFINITY, f32::min)
}

fn segments(boundary: &BoundaryPath) -> Vec<(f32, f32, f32, f32)> {
    boundary
        .polyline()
        .into_iter()
        .map(|(a, b)| (a.x, a.y, b.x, b.y))
        .collect()
}

/// Every pixel whose center lies outside the bleed shape, clear of the
/// anti-aliased rim, must be pure white.
fn assert_masked_outside_bleed(key: &str, pan: (f64, f64), zoom: f64) {
    let template = TemplateCatalog::lookup(key).unwrap();
    let geometry = CanvasGeometry::new(template, Resolution::from_dpi(100.0)).unwrap();
    let mut viewport = Viewport::new(geometry.width(), geometry.height());
    let source = black_source(64, 48);
    viewport.set_image_size(64, 48);
    viewport.set_zoom(zoom);
    viewport.set_pan(pan.0, pan.1);

    let raster = MaskRenderer::default()
        .render_export_image(&geometry, &viewport, Some(&source))
        .unwrap()
        .unwrap();
    assert_eq!(raster.dimensions(), geometry.size());

    let bleed = geometry.bleed_boundary();
    let edge = segments(bleed);
    let mut checked = 0;
    for (x, y, pixel) in raster.enumerate_pixels() {
        let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
        if bleed.contains(px, py) || distance_to_edge(&edge, px, py) <= 2.5 {
            continue;
        }
        checked += 1;
        assert_eq!(
            pixel.0,
            [255, 255, 255, 255],
            "{} pixel ({}, {}) outside the bleed is not white",
            key,
            x,
            y
        );
    }
    assert!(checked > 0, "{}: no pixels outside the bleed", key);
}

#[test]
fn test_export_mask_circle60() {
    assert_masked_outside_bleed("circle60", (0.0, 0.0), 1.0);
}

#[test]
fn test_export_mask_circle45_zoomed_and_panned() {
    assert_masked_outside_bleed("circle45", (30.0, -25.0), 2.5);
}

#[test]
fn test_export_mask_heart() {
    assert_masked_outside_bleed("heart", (0.0, 0.0), 1.0);
}

#[test]
fn test_export_mask_heart_panned() {
    assert_masked_outside_bleed("heart", (-40.0, 15.0), 1.8);
}

#[test]
fn test_export_keeps_image_inside_bleed() {
    let template = TemplateCatalog::lookup("heart").unwrap();
    let geometry = CanvasGeometry::new(template, Resolution::from_dpi(100.0)).unwrap();
    let mut viewport = Viewport::new(geometry.width(), geometry.height());
    let source = black_source(64, 48);
    viewport.set_image_size(64, 48);

    let raster = MaskRenderer::default()
        .render_export_image(&geometry, &viewport, Some(&source))
        .unwrap()
        .unwrap();

    let visible = geometry.visible_boundary();
    let edge = segments(visible);
    for (x, y, pixel) in raster.enumerate_pixels() {
        let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
        if visible.contains(px, py) && distance_to_edge(&edge, px, py) > 1.0 {
            assert!(pixel.0[0] < 8, "pixel ({}, {}) inside the badge lost the image", x, y);
        }
    }
}

#[test]
fn test_preview_overlay_respects_toggle() {
    let template = TemplateCatalog::lookup("circle60").unwrap();
    let geometry = CanvasGeometry::new(template, Resolution::from_dpi(100.0)).unwrap();
    let mut viewport = Viewport::new(geometry.width(), geometry.height());
    let source = black_source(10, 10);
    viewport.set_image_size(10, 10);

    let masked = MaskRenderer::default()
        .render_preview(&geometry, &viewport, Some(&source))
        .unwrap()
        .unwrap();
    let plain = MaskRenderer::new(RenderStyle {
        show_mask: false,
        ..Default::default()
    })
    .render_preview(&geometry, &viewport, Some(&source))
    .unwrap()
    .unwrap();

    // A corner pixel sits outside the visible circle.
    let veiled = masked.get_pixel(6, 6).0;
    assert!(veiled[0] > 170 && veiled[0] < 190, "{:?}", veiled);
    assert!(plain.get_pixel(6, 6).0[0] < 8);

    // The center is untouched either way.
    let (cx, cy) = (geometry.width() / 2, geometry.height() / 2);
    assert!(masked.get_pixel(cx, cy).0[0] < 8);
}

#[test]
fn test_preview_outlines_drawn() {
    let template = TemplateCatalog::lookup("circle60").unwrap();
    let geometry = CanvasGeometry::new(template, Resolution::from_dpi(100.0)).unwrap();
    let mut viewport = Viewport::new(geometry.width(), geometry.height());
    let source = black_source(10, 10);
    viewport.set_image_size(10, 10);

    let preview = MaskRenderer::default()
        .render_preview(&geometry, &viewport, Some(&source))
        .unwrap()
        .unwrap();

    // Canvas edge in red.
    let edge = preview.get_pixel(geometry.width() / 2, 0).0;
    assert!(edge[0] > 200 && edge[1] < 100 && edge[2] < 100, "{:?}", edge);

    // Some pixels carry the green outline color.
    let green = preview
        .pixels()
        .filter(|p| p.0[1] > 150 && p.0[0] < 60 && p.0[2] > 90 && p.0[2] < 160)
        .count();
    assert!(green > 0);
}

fn is_green(pixel: &Rgba<u8>) -> bool {
    pixel.0[1] as i32 - pixel.0[0] as i32 > 60
}

/// Pixels the outline passes through, in path order, one per pixel step.
fn walk_outline(boundary: &BoundaryPath, raster: &RgbaImage) -> Vec<Rgba<u8>> {
    let (width, height) = raster.dimensions();
    let mut samples = Vec::new();
    for (ax, ay, bx, by) in segments(boundary) {
        let steps = ((bx - ax).hypot(by - ay).ceil() as usize).max(1);
        for i in 0..steps {
            let t = i as f32 / steps as f32;
            let x = (ax + (bx - ax) * t).floor().clamp(0.0, (width - 1) as f32) as u32;
            let y = (ay + (by - ay) * t).floor().clamp(0.0, (height - 1) as f32) as u32;
            samples.push(*raster.get_pixel(x, y));
        }
    }
    samples
}

#[test]
fn test_visible_outline_is_dashed() {
    let template = TemplateCatalog::lookup("circle60").unwrap();
    let geometry = CanvasGeometry::new(template, Resolution::from_dpi(100.0)).unwrap();
    let mut viewport = Viewport::new(geometry.width(), geometry.height());
    let source = black_source(10, 10);
    viewport.set_image_size(10, 10);

    let preview = MaskRenderer::default()
        .render_preview(&geometry, &viewport, Some(&source))
        .unwrap()
        .unwrap();

    let samples = walk_outline(geometry.visible_boundary(), &preview);
    let green: Vec<bool> = samples.iter().map(is_green).collect();
    let dashes = green
        .iter()
        .enumerate()
        .filter(|&(i, &on)| on && (i == 0 || !green[i - 1]))
        .count();
    let gaps = green.iter().filter(|&&on| !on).count();

    // A 742px circumference with a 10/8 dash pattern holds about 41 dashes.
    assert!(dashes >= 20, "only {} dashes along the outline", dashes);
    assert!(
        gaps * 5 >= samples.len(),
        "{} of {} outline pixels are off the dashes",
        gaps,
        samples.len()
    );
}

#[test]
fn test_export_strokes_cut_guide_on_bleed() {
    let template = TemplateCatalog::lookup("circle60").unwrap();
    let geometry = CanvasGeometry::new(template, Resolution::from_dpi(100.0)).unwrap();
    let mut viewport = Viewport::new(geometry.width(), geometry.height());
    let source = black_source(64, 48);
    viewport.set_image_size(64, 48);
    // Keep the photo well inside the badge so the bleed edge sits on white.
    viewport.set_zoom(0.1);

    let raster = MaskRenderer::default()
        .render_export_image(&geometry, &viewport, Some(&source))
        .unwrap()
        .unwrap();

    let bleed = geometry.bleed_boundary();
    let edge = segments(bleed);
    let mut near_edge = 0;
    let mut guide = 0;
    for (x, y, pixel) in raster.enumerate_pixels() {
        if distance_to_edge(&edge, x as f32 + 0.5, y as f32 + 0.5) > 1.0 {
            continue;
        }
        near_edge += 1;
        let [r, g, b, _] = pixel.0;
        let neutral = r.abs_diff(g) <= 2 && g.abs_diff(b) <= 2;
        assert!(neutral, "bleed edge pixel ({}, {}) is tinted: {:?}", x, y, pixel);
        if r < 250 {
            assert!(r > 150, "bleed edge pixel ({}, {}) is too dark: {:?}", x, y, pixel);
            guide += 1;
        }
    }

    assert!(near_edge > 0);
    assert!(
        guide * 4 >= near_edge,
        "{} of {} bleed edge pixels carry the cut guide",
        guide,
        near_edge
    );
}
