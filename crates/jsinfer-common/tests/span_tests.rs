use super::*;

#[test]
fn test_span_bounds() {
    let span = TextSpan::from_bounds(4, 10);
    assert_eq!(span.start, 4);
    assert_eq!(span.length, 6);
    assert_eq!(span.end(), 10);
    assert!(!span.is_empty());
}

#[test]
fn test_span_contains_range() {
    let span = TextSpan::new(10, 5);
    assert!(span.contains_range(10, 15));
    assert!(span.contains_range(11, 12));
    assert!(!span.contains_range(9, 12));
    assert!(!span.contains_range(12, 16));
}

#[test]
fn test_change_range_delta() {
    // "1" replaced by "'abc'"
    let grow = TextChangeRange::new(TextSpan::new(8, 1), 5);
    assert_eq!(grow.delta(), 4);
    assert_eq!(grow.new_span(), TextSpan::new(8, 5));

    let shrink = TextChangeRange::new(TextSpan::new(0, 6), 2);
    assert_eq!(shrink.delta(), -4);
}

#[test]
fn test_unchanged_range() {
    assert!(TextChangeRange::default().is_unchanged());
    assert!(!TextChangeRange::new(TextSpan::new(3, 0), 1).is_unchanged());
}
