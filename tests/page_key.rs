use scan_order::page_key::{PageKey, PatternKind, Side, extract_key, match_key};

fn kind(name: &str) -> Option<PatternKind> {
    match_key(name).map(|m| m.pattern)
}

#[test]
fn page_suffix_pattern() {
    let m = match_key("scan_page001_1L.jpg").unwrap();
    assert_eq!(m.key, PageKey::new(1, Side::Left));
    assert_eq!(m.pattern, PatternKind::PageSuffix);
    assert_eq!(extract_key("scan_page012_2R.png"), Some(PageKey::new(12, Side::Right)));
}

#[test]
fn underscored_pattern() {
    assert_eq!(extract_key("book_14_R.tif"), Some(PageKey::new(14, Side::Right)));
    assert_eq!(kind("book_14_R.tif"), Some(PatternKind::Underscored));
}

#[test]
fn compact_pattern_takes_whole_digit_run() {
    assert_eq!(extract_key("p12L.jpg"), Some(PageKey::new(12, Side::Left)));
    assert_eq!(extract_key("scan2020_p7R.jpg"), Some(PageKey::new(7, Side::Right)));
    assert_eq!(kind("keyed_1L.jpg"), Some(PatternKind::Compact));
}

#[test]
fn side_word_pattern() {
    assert_eq!(extract_key("page03_left.jpg"), Some(PageKey::new(3, Side::Left)));
    assert_eq!(extract_key("page03-scan-right.jpg"), Some(PageKey::new(3, Side::Right)));
    assert_eq!(kind("page03_left.jpg"), Some(PatternKind::SideWord));
}

#[test]
fn side_word_is_case_sensitive() {
    assert_eq!(extract_key("page03_LEFT.jpg"), None);
}

#[test]
fn earlier_pattern_wins() {
    // Matches both the page-suffix and the compact pattern.
    let m = match_key("doc_page5_2R.jpg").unwrap();
    assert_eq!(m.pattern, PatternKind::PageSuffix);
    assert_eq!(m.key, PageKey::new(5, Side::Right));
}

#[test]
fn leading_zeros_are_decimal() {
    assert_eq!(extract_key("p010L.jpg"), Some(PageKey::new(10, Side::Left)));
    assert_eq!(extract_key("p0089R.jpg"), Some(PageKey::new(89, Side::Right)));
}

#[test]
fn no_match_is_none() {
    assert_eq!(extract_key("random.jpg"), None);
    assert_eq!(extract_key("IMG_0001.jpg"), None);
    assert_eq!(extract_key("doc_L1.jpg"), None);
}

#[test]
fn overflowing_page_number_is_none() {
    assert_eq!(extract_key("p99999999999999L.jpg"), None);
}

#[test]
fn keys_order_left_before_right() {
    let mut keys = vec![
        PageKey::new(2, Side::Left),
        PageKey::new(1, Side::Right),
        PageKey::new(1, Side::Left),
    ];
    keys.sort();
    assert_eq!(
        keys,
        vec![
            PageKey::new(1, Side::Left),
            PageKey::new(1, Side::Right),
            PageKey::new(2, Side::Left),
        ]
    );
}
