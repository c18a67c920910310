//! Integration tests for the placement arithmetic.

use cdraw_core::layout::{above, beside, overlay};
use cdraw_core::{Align, CompositeError, MAX_DIMENSION, Offset, Size};

#[test]
fn test_beside_center_matches_reference_scenario() {
    // 10x20 next to 5x30: the short child is pushed down by 5.
    let placement = beside(Size::new(10, 20), Size::new(5, 30), Align::Center).unwrap();
    assert_eq!(placement.size, Size::new(15, 30));
    assert_eq!(placement.first, Offset::new(0, 5));
    assert_eq!(placement.second, Offset::new(10, 0));
}

#[test]
fn test_beside_top_pins_both_children_to_y_zero() {
    let placement = beside(Size::new(4, 2), Size::new(3, 9), Align::Top).unwrap();
    assert_eq!(placement.first.y, 0);
    assert_eq!(placement.second.y, 0);
}

#[test]
fn test_beside_bottom_makes_bottom_edges_flush() {
    let left = Size::new(4, 2);
    let right = Size::new(3, 9);
    let placement = beside(left, right, Align::Bottom).unwrap();
    assert_eq!(placement.first.y + left.height, placement.size.height);
    assert_eq!(placement.second.y + right.height, placement.size.height);
}

#[test]
fn test_beside_middle_is_center() {
    let left = Size::new(4, 3);
    let right = Size::new(3, 10);
    assert_eq!(
        beside(left, right, Align::Middle).unwrap(),
        beside(left, right, Align::Center).unwrap()
    );
}

#[test]
fn test_beside_ignores_horizontal_alignments() {
    let left = Size::new(4, 3);
    let right = Size::new(3, 10);
    let centered = beside(left, right, Align::Center).unwrap();
    assert_eq!(beside(left, right, Align::Left).unwrap(), centered);
    assert_eq!(beside(left, right, Align::Right).unwrap(), centered);
}

#[test]
fn test_center_rounds_down_on_odd_slack() {
    // 3px child in a 10px column: 7px of slack, 3 above.
    let placement = beside(Size::new(1, 3), Size::new(1, 10), Align::Center).unwrap();
    assert_eq!(placement.first.y, 3);
}

#[test]
fn test_above_left_right_center() {
    let top = Size::new(6, 2);
    let bottom = Size::new(10, 4);

    let left = above(top, bottom, Align::Left).unwrap();
    assert_eq!(left.size, Size::new(10, 6));
    assert_eq!(left.first, Offset::new(0, 0));
    assert_eq!(left.second, Offset::new(0, 2));

    let right = above(top, bottom, Align::Right).unwrap();
    assert_eq!(right.first, Offset::new(4, 0));
    assert_eq!(right.second, Offset::new(0, 2));

    let center = above(top, bottom, Align::Center).unwrap();
    assert_eq!(center.first, Offset::new(2, 0));
    assert_eq!(center.second, Offset::new(0, 2));
}

#[test]
fn test_above_ignores_vertical_alignments() {
    let top = Size::new(6, 2);
    let bottom = Size::new(11, 4);
    let centered = above(top, bottom, Align::Middle).unwrap();
    assert_eq!(above(top, bottom, Align::Top).unwrap(), centered);
    assert_eq!(above(top, bottom, Align::Bottom).unwrap(), centered);
}

#[test]
fn test_overlay_matches_reference_scenario() {
    let placement = overlay(Size::new(100, 50), Size::new(50, 100)).unwrap();
    assert_eq!(placement.size, Size::new(100, 100));
    assert_eq!(placement.first, Offset::new(0, 25));
    assert_eq!(placement.second, Offset::new(25, 0));
}

#[test]
fn test_zero_area_children() {
    let placement = beside(Size::ZERO, Size::new(0, 7), Align::Bottom).unwrap();
    assert_eq!(placement.size, Size::new(0, 7));
    assert_eq!(placement.first, Offset::new(0, 7));

    let placement = overlay(Size::ZERO, Size::ZERO).unwrap();
    assert_eq!(placement.size, Size::ZERO);
}

#[test]
fn test_beside_overflow_is_reported() {
    let half = Size::new(MAX_DIMENSION / 2 + 1, 1);
    assert!(matches!(
        beside(half, half, Align::Center),
        Err(CompositeError::DimensionOverflow { .. })
    ));
}

#[test]
fn test_above_overflow_is_reported() {
    let tall = Size::new(1, MAX_DIMENSION);
    assert!(matches!(
        above(tall, Size::new(1, 1), Align::Center),
        Err(CompositeError::DimensionOverflow { .. })
    ));
}
