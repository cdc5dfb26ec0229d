//! Character class membership tests.

use super::ast::ClassItem;

/// Test whether `ch` is a member of the class made of `items`.
pub fn class_matches(items: &[ClassItem], ch: char) -> bool {
    items.iter().any(|item| item_matches(item, ch))
}

/// Test whether `ch` falls within a single `ClassItem`.
pub fn item_matches(item: &ClassItem, ch: char) -> bool {
    match item {
        ClassItem::Single(c) => *c == ch,
        ClassItem::Range(lo, hi) => *lo <= ch && ch <= *hi,
    }
}

/// Split the body of a `[...]` class into items.
///
/// `x-y` is an inclusive range; a `-` with nothing on one side is literal.
pub fn parse_class_body(body: &str) -> Vec<ClassItem> {
    let chars: Vec<char> = body.chars().collect();
    let mut items = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if i + 2 < chars.len() && chars[i + 1] == '-' {
            items.push(ClassItem::Range(chars[i], chars[i + 2]));
            i += 3;
        } else {
            items.push(ClassItem::Single(chars[i]));
            i += 1;
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_matches_inclusive_bounds() {
        let items = [ClassItem::Range('a', 'f')];
        assert!(class_matches(&items, 'a'));
        assert!(class_matches(&items, 'c'));
        assert!(class_matches(&items, 'f'));
        assert!(!class_matches(&items, 'g'));
        assert!(!class_matches(&items, 'A'));
    }

    #[test]
    fn singles_and_ranges_mix() {
        let items = parse_class_body("a-z0-9_");
        assert_eq!(
            items,
            vec![
                ClassItem::Range('a', 'z'),
                ClassItem::Range('0', '9'),
                ClassItem::Single('_'),
            ]
        );
        assert!(class_matches(&items, '5'));
        assert!(class_matches(&items, '_'));
        assert!(!class_matches(&items, '-'));
    }

    #[test]
    fn dash_at_either_end_is_literal() {
        assert_eq!(
            parse_class_body("-a"),
            vec![ClassItem::Single('-'), ClassItem::Single('a')]
        );
        assert_eq!(
            parse_class_body("a-"),
            vec![ClassItem::Single('a'), ClassItem::Single('-')]
        );
    }

    #[test]
    fn empty_class_matches_nothing() {
        assert!(!class_matches(&[], 'a'));
    }
}
