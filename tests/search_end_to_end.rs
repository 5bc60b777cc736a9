use monomatch::{find_in, find_in_with, ImageView, Match, MatchConfig, Matcher, MonoMask};

/// Builds a byte source from ASCII art: `#` is on, anything else is off.
fn art(rows: &[&str]) -> (Vec<u8>, usize, usize) {
    let width = rows[0].len();
    let data = rows
        .iter()
        .flat_map(|row| row.bytes().map(|b| u8::from(b == b'#')))
        .collect();
    (data, width, rows.len())
}

fn blank(width: usize, height: usize) -> Vec<u8> {
    vec![0u8; width * height]
}

fn fill(data: &mut [u8], width: usize, x0: usize, y0: usize, w: usize, h: usize) {
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            data[y * width + x] = 1;
        }
    }
}

fn search(hay: &[u8], hay_w: usize, hay_h: usize, needle: &[u8], w: usize, h: usize) -> Option<Match> {
    let hay = ImageView::from_slice(hay, hay_w, hay_h).unwrap();
    let needle = ImageView::from_slice(needle, w, h).unwrap();
    find_in(Some(hay), Some(needle))
}

const SEQUENTIAL: MatchConfig = MatchConfig {
    parallel: false,
    cancel_on_match: false,
};

#[test]
fn finds_block_in_top_half() {
    let mut hay = blank(8, 8);
    fill(&mut hay, 8, 5, 3, 2, 2);
    let needle = [1u8; 4];

    assert_eq!(search(&hay, 8, 8, &needle, 2, 2), Some(Match { x: 6, y: 4 }));
}

#[test]
fn blank_haystack_has_no_match() {
    let hay = blank(8, 8);
    let needle = [1u8; 4];

    assert_eq!(search(&hay, 8, 8, &needle, 2, 2), None);
}

#[test]
fn finds_block_in_bottom_half() {
    let mut hay = blank(8, 8);
    fill(&mut hay, 8, 2, 6, 2, 2);
    let needle = [1u8; 4];

    assert_eq!(search(&hay, 8, 8, &needle, 2, 2), Some(Match { x: 3, y: 7 }));
}

#[test]
fn midpoint_row_is_scanned() {
    let mut hay = blank(8, 8);
    fill(&mut hay, 8, 3, 4, 2, 2);
    let needle = [1u8; 4];

    assert_eq!(search(&hay, 8, 8, &needle, 2, 2), Some(Match { x: 4, y: 5 }));
}

#[test]
fn placement_at_column_zero_is_not_a_match() {
    let mut hay = blank(8, 8);
    fill(&mut hay, 8, 0, 3, 2, 2);
    let needle = [1u8; 4];

    assert_eq!(search(&hay, 8, 8, &needle, 2, 2), None);
}

#[test]
fn earlier_occurrence_at_column_zero_hides_later_one() {
    let (hay, w, h) = art(&[
        "........",
        "##...##.",
        "##...##.",
        "........",
    ]);
    let needle = [1u8; 4];

    assert_eq!(search(&hay, w, h, &needle, 2, 2), None);
}

#[test]
fn matches_asymmetric_pattern() {
    let (hay, w, h) = art(&[
        "..........",
        "..#.#.....",
        "...##.....",
        "..........",
        "......#.#.",
        "..........",
    ]);
    let (needle, nw, nh) = art(&["#.#", ".##", "###"]);

    // Rows 0 and 1 of the needle sit at (2, 1); the center uses the full
    // needle height even though row 2 is never compared.
    assert_eq!(search(&hay, w, h, &needle, nw, nh), Some(Match { x: 3, y: 2 }));
}

#[test]
fn rows_past_the_second_are_not_compared() {
    let (hay, w, h) = art(&[
        "........",
        ".##.....",
        ".#......",
        "........",
        "........",
        "........",
    ]);
    let (needle, nw, nh) = art(&["##", "#.", "##", "##"]);

    assert_eq!(search(&hay, w, h, &needle, nw, nh), Some(Match { x: 2, y: 3 }));
}

#[test]
fn absent_sources_yield_no_match() {
    let hay = blank(8, 8);
    let needle = [1u8; 4];
    let hay = ImageView::from_slice(&hay, 8, 8).unwrap();
    let needle = ImageView::from_slice(&needle, 2, 2).unwrap();

    assert_eq!(find_in(None, Some(needle)), None);
    assert_eq!(find_in(Some(hay), None), None);
    assert_eq!(find_in(None, None), None);
}

#[test]
fn oversized_needles_are_rejected() {
    let mut hay = blank(8, 2);
    fill(&mut hay, 8, 3, 0, 2, 2);

    // Needle as tall as the haystack.
    assert_eq!(search(&hay, 8, 2, &[1u8; 4], 2, 2), None);
    // Needle wider than the haystack.
    assert_eq!(search(&hay, 8, 2, &[1u8; 18], 9, 2), None);
}

#[test]
fn single_row_needle_is_rejected() {
    let mut hay = blank(8, 8);
    fill(&mut hay, 8, 3, 3, 2, 2);

    assert_eq!(search(&hay, 8, 8, &[1u8; 2], 2, 1), None);
}

#[test]
fn sequential_mode_prefers_top_half() {
    let mut hay = blank(12, 12);
    fill(&mut hay, 12, 2, 1, 2, 2);
    fill(&mut hay, 12, 7, 9, 2, 2);
    let needle = [1u8; 4];
    let hay_view = ImageView::from_slice(&hay, 12, 12).unwrap();
    let needle_view = ImageView::from_slice(&needle, 2, 2).unwrap();

    let found = find_in_with(Some(hay_view), Some(needle_view), SEQUENTIAL);
    assert_eq!(found, Some(Match { x: 3, y: 2 }));

    // The parallel search may report either placement.
    let found = find_in(Some(hay_view), Some(needle_view)).unwrap();
    assert!(found == Match { x: 3, y: 2 } || found == Match { x: 8, y: 10 });
}

#[test]
fn matcher_is_reusable_across_haystacks() {
    let needle = MonoMask::from_bools(&[true; 4], 2, 2).unwrap();
    let matcher = Matcher::new(needle).with_config(SEQUENTIAL);
    assert_eq!(matcher.config(), SEQUENTIAL);
    assert_eq!(matcher.needle().width(), 2);

    for (x0, y0) in [(1, 0), (4, 2), (6, 6)] {
        let mut hay = blank(8, 8);
        fill(&mut hay, 8, x0, y0, 2, 2);
        let view = ImageView::from_slice(&hay, 8, 8).unwrap();
        assert_eq!(
            matcher.find_in(Some(view)),
            Some(Match { x: x0 + 1, y: y0 + 1 })
        );
    }
    assert_eq!(matcher.find_in(None), None);
}
