use std::collections::HashSet;

use super::*;

#[test]
fn lookup_is_case_insensitive() {
    let palette = CategoryPalette::STANDARD;
    assert_eq!(palette.color_for_raw(Some("b")), palette.color_for_raw(Some("B")));
    assert_eq!(palette.color_for_raw(Some("B")), "#3cb44b");
}

#[test]
fn absent_and_non_letters_use_default_gray() {
    let palette = CategoryPalette::default();
    assert_eq!(palette.color_for(None), DEFAULT_COLOR);
    assert_eq!(palette.color_for_raw(None), DEFAULT_COLOR);
    assert_eq!(palette.color_for_raw(Some("1")), DEFAULT_COLOR);
    assert_eq!(palette.color_for_raw(Some("AB")), DEFAULT_COLOR);
}

#[test]
fn every_letter_has_a_distinct_color() {
    let palette = CategoryPalette::STANDARD;
    let colors: HashSet<&str> = ('A'..='Z')
        .filter_map(Category::from_char)
        .map(|c| palette.color_for(Some(c)))
        .collect();
    assert_eq!(colors.len(), 26);
    assert!(!colors.contains(palette.default_color()));
}

#[test]
fn first_and_last_letters_map_to_table_ends() {
    let palette = CategoryPalette::STANDARD;
    assert_eq!(palette.color_for(Category::from_char('a')), "#e6194b");
    assert_eq!(palette.color_for(Category::from_char('Z')), "#955251");
    assert_eq!(palette.color_for(Category::from_char('D')), "#4363d8");
}
