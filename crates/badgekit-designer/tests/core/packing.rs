use badgekit_core::LayoutError;
use badgekit_designer::{ItemSize, PageLayout, PagePosition, ShelfPacker};
use proptest::prelude::*;

fn a4() -> ShelfPacker {
    ShelfPacker::new(PageLayout::a4())
}

fn at(page_index: usize, x_mm: f64, y_mm: f64) -> PagePosition {
    PagePosition {
        page_index,
        x_mm,
        y_mm,
    }
}

#[test]
fn test_four_circle60_on_one_page() {
    let items = vec![ItemSize::new(66.0, 66.0); 4];
    let positions = a4().pack(&items).unwrap();
    assert_eq!(
        positions,
        vec![
            at(0, 10.0, 10.0),
            at(0, 78.0, 10.0),
            at(0, 10.0, 78.0),
            at(0, 78.0, 78.0),
        ]
    );
}

#[test]
fn test_third_wide_item_starts_new_row() {
    // 10 + 100 + 2 + 100 + 2 + 100 > 200: the third item cannot share
    // the first row.
    let items = vec![ItemSize::new(100.0, 40.0); 3];
    let positions = a4().pack(&items).unwrap();
    assert_eq!(positions[2].x_mm, 10.0);
    assert!(positions[2].y_mm > positions[0].y_mm);
    assert!(positions.iter().all(|p| p.page_index == 0));
}

#[test]
fn test_mixed_heights_use_tallest_in_row() {
    let items = [
        ItemSize::new(61.0, 56.0),
        ItemSize::new(66.0, 66.0),
        ItemSize::new(51.0, 51.0),
        ItemSize::new(51.0, 51.0),
    ];
    let positions = a4().pack(&items).unwrap();
    assert_eq!(positions[0], at(0, 10.0, 10.0));
    assert_eq!(positions[1], at(0, 73.0, 10.0));
    assert_eq!(positions[2], at(0, 141.0, 10.0));
    // 194 + 51 > 200: wraps below the 66 mm tall item.
    assert_eq!(positions[3], at(0, 10.0, 78.0));
}

#[test]
fn test_page_wrap_resets_cursor() {
    // Two 66 mm badges per row, four rows per page (214 + 66 = 280 <= 287).
    let items = vec![ItemSize::new(66.0, 66.0); 9];
    let positions = a4().pack(&items).unwrap();
    assert_eq!(positions[7], at(0, 78.0, 214.0));
    assert_eq!(positions[8], at(1, 10.0, 10.0));
}

#[test]
fn test_empty_input() {
    assert!(a4().pack(&[]).unwrap().is_empty());
}

#[test]
fn test_oversized_item_rejected() {
    let err = a4()
        .pack(&[ItemSize::new(66.0, 278.0)])
        .unwrap_err();
    match err {
        LayoutError::ItemTooLarge {
            index,
            max_width,
            max_height,
            ..
        } => {
            assert_eq!(index, 0);
            assert_eq!(max_width, 190.0);
            assert_eq!(max_height, 277.0);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_custom_page() {
    let packer = ShelfPacker::new(PageLayout::new(100.0, 100.0, 5.0, 0.0));
    let items = vec![ItemSize::new(45.0, 45.0); 5];
    let positions = packer.pack(&items).unwrap();
    assert_eq!(
        positions,
        vec![
            at(0, 5.0, 5.0),
            at(0, 50.0, 5.0),
            at(0, 5.0, 50.0),
            at(0, 50.0, 50.0),
            at(1, 5.0, 5.0),
        ]
    );
}

proptest! {
    #[test]
    fn prop_packing_is_deterministic(sizes in prop::collection::vec((10.0f64..190.0, 10.0f64..277.0), 0..40)) {
        let items: Vec<ItemSize> = sizes.iter().map(|&(w, h)| ItemSize::new(w, h)).collect();
        let first = a4().pack(&items).unwrap();
        let second = a4().pack(&items).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_items_stay_inside_margins(sizes in prop::collection::vec((10.0f64..190.0, 10.0f64..277.0), 1..40)) {
        let items: Vec<ItemSize> = sizes.iter().map(|&(w, h)| ItemSize::new(w, h)).collect();
        let positions = a4().pack(&items).unwrap();
        prop_assert_eq!(positions.len(), items.len());
        let mut last_page = 0;
        for (item, pos) in items.iter().zip(&positions) {
            prop_assert!(pos.x_mm >= 10.0 && pos.y_mm >= 10.0);
            prop_assert!(pos.x_mm + item.width_mm <= 200.0 + 1e-9);
            prop_assert!(pos.y_mm + item.height_mm <= 287.0 + 1e-9);
            prop_assert!(pos.page_index >= last_page);
            last_page = pos.page_index;
        }
    }
}
