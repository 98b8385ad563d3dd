use super::*;
use dom::MemoryDocument;

fn engine(total_pages: u32, window_size: u32) -> PaginationEngine {
    PaginationEngine::new(PaginationConfig::new(total_pages, "path/", window_size))
}

fn listing_page(path: &str) -> MemoryDocument {
    let mut doc = MemoryDocument::new(path);
    let body = doc.body();
    doc.append_element(body, "ul", &[("class", "pagination")])
        .expect("container");
    doc
}

fn summary(links: &[PageLinkDescriptor]) -> Vec<(String, String, bool)> {
    links
        .iter()
        .map(|link| (link.label.clone(), link.href.clone(), link.is_active))
        .collect()
}

fn entry(label: &str, href: &str, active: bool) -> (String, String, bool) {
    (label.to_string(), href.to_string(), active)
}

#[test]
fn reads_trailing_page_number_from_path() {
    assert_eq!(current_page_number("/testpath/7/", 11), PageNumber(7));
    assert_eq!(current_page_number("/testpath/7", 11), PageNumber(7));
}

#[test]
fn out_of_range_page_number_falls_back_to_first() {
    assert_eq!(current_page_number("/testpath/145/", 10), PageNumber(1));
    assert_eq!(
        parse_page_number("/testpath/145/", 10),
        Err(SiteUiError::InvalidPageNumber {
            raw: "145".into(),
            total_pages: 10
        })
    );
}

#[test]
fn root_and_non_numeric_paths_are_first_page() {
    assert_eq!(current_page_number("/", 5), PageNumber(1));
    assert_eq!(current_page_number("", 5), PageNumber(1));
    assert_eq!(current_page_number("/about/", 5), PageNumber(1));
    assert_eq!(current_page_number("/page/0/", 5), PageNumber(1));
}

#[test]
fn window_is_aligned_by_floor_division() {
    let at_boundary = compute_window(PageNumber(3), 11, 3);
    assert_eq!(at_boundary.start_page, PageNumber(1));
    assert_eq!(at_boundary.end_page, PageNumber(3));

    let next_window = compute_window(PageNumber(4), 11, 3);
    assert_eq!(next_window.start_page, PageNumber(4));
    assert_eq!(next_window.end_page, PageNumber(6));

    let last = compute_window(PageNumber(11), 11, 2);
    assert_eq!(last.start_page, PageNumber(11));
    assert_eq!(last.end_page, PageNumber(11));
}

#[test]
fn window_bounds_hold_for_every_page() {
    for total_pages in 1..=25 {
        for window_size in 1..=12 {
            for current in 1..=total_pages {
                let window = compute_window(PageNumber(current), total_pages, window_size);
                assert!(window.start_page.0 <= current);
                assert!(current <= window.end_page.0);
                assert!(window.end_page.0 <= total_pages);
                assert!(window.end_page.0 - window.start_page.0 < window_size);
            }
        }
    }
}

#[test]
fn first_page_link_always_points_at_root() {
    let engine = engine(11, 3);
    assert_eq!(engine.build_page_link(PageNumber(1), true).href, "/");
    assert_eq!(engine.build_page_link(PageNumber(1), false).href, "/");
    assert_eq!(engine.build_page_link(PageNumber(8), false).href, "path/8");

    let jump = engine.build_group_jump_link(PageNumber(1), GroupJump::Previous);
    assert_eq!(jump.href, "/");
    assert_eq!(jump.label, "<<");
    assert!(jump.is_group_jump);
}

#[test]
fn first_page_listing_has_next_jump_only() {
    let links = engine(11, 3).descriptors("/");
    assert_eq!(
        summary(&links),
        vec![
            entry("1", "/", true),
            entry("2", "path/2", false),
            entry("3", "path/3", false),
            entry(">>", "path/4", false),
        ]
    );
}

#[test]
fn middle_page_listing_has_both_jumps() {
    let links = engine(11, 3).descriptors("/testPath/5/");
    assert_eq!(
        summary(&links),
        vec![
            entry("<<", "/", false),
            entry("4", "path/4", false),
            entry("5", "path/5", true),
            entry("6", "path/6", false),
            entry(">>", "path/7", false),
        ]
    );
}

#[test]
fn last_page_listing_has_previous_jump_only() {
    let links = engine(11, 2).descriptors("/testPath/11/");
    assert_eq!(
        summary(&links),
        vec![entry("<<", "path/9", false), entry("11", "path/11", true)]
    );
}

#[test]
fn single_page_site_has_one_active_link() {
    let links = engine(1, 10).descriptors("/");
    assert_eq!(summary(&links), vec![entry("1", "/", true)]);
}

#[test]
fn next_jump_moves_a_full_window_from_partial_last_window() {
    let links = engine(5, 10).descriptors("/page/4/");
    let next = links.last().expect("next jump");
    assert!(next.is_group_jump);
    assert_eq!(next.target, PageNumber(11));
    assert_eq!(next.href, "path/11");

    let links = engine(11, 3).descriptors("/page/10/");
    assert_eq!(
        summary(&links),
        vec![
            entry("<<", "path/7", false),
            entry("10", "path/10", true),
            entry("11", "path/11", false),
            entry(">>", "path/13", false),
        ]
    );
    assert_eq!(links[3].target, PageNumber(13));
}

#[test]
fn huge_window_sizes_do_not_overflow() {
    let links = engine(3, 1_000_000_000).descriptors("/page/2/");
    assert_eq!(
        summary(&links),
        vec![
            entry("1", "/", false),
            entry("2", "path/2", true),
            entry("3", "path/3", false),
            entry(">>", "path/1000000001", false),
        ]
    );
    assert!(links.capacity() <= 8);

    let links = engine(3, u32::MAX).descriptors("/page/2/");
    assert_eq!(links.len(), 4);
    assert_eq!(links[3].target, PageNumber(u32::MAX));

    let window = compute_window(PageNumber(u32::MAX), u32::MAX, u32::MAX);
    assert_eq!(window.start_page, PageNumber(1));
    assert_eq!(window.end_page, PageNumber(u32::MAX));
    assert!(!window.has_next_group());
}

#[test]
fn render_writes_list_items_into_container() {
    let mut doc = listing_page("/");
    let rendered = engine(11, 3).render(&mut doc).expect("render");

    assert_eq!(rendered, 4);
    assert_eq!(
        doc.inner_html(doc.body()),
        concat!(
            "<ul class=\"pagination\">",
            "<li><a href=\"/\" class=\"page active\">1</a></li>",
            "<li><a href=\"path/2\" class=\"page\">2</a></li>",
            "<li><a href=\"path/3\" class=\"page\">3</a></li>",
            "<li><a href=\"path/4\" class=\"change-pages-set\" data-action=\"rerender-pagination\">&gt;&gt;</a></li>",
            "</ul>"
        )
    );
}

#[test]
fn render_twice_is_idempotent() {
    let mut doc = listing_page("/page/5/");
    let engine = engine(11, 3);

    engine.render(&mut doc).expect("first render");
    let first = doc.inner_html(doc.body());
    engine.render(&mut doc).expect("second render");

    assert_eq!(doc.inner_html(doc.body()), first);
}

#[test]
fn activating_group_jump_rerenders_for_new_location() {
    let mut doc = listing_page("/");
    let engine = engine(11, 3);
    engine.render(&mut doc).expect("render");

    engine.activate(&mut doc, "path/4").expect("activate");

    let active: Vec<String> = doc
        .query_all(None, ".page.active")
        .into_iter()
        .map(|node| doc.text_content(node))
        .collect();
    assert_eq!(active, vec!["4".to_string()]);
    assert_eq!(doc.query_all(None, ".change-pages-set").len(), 2);
}

#[test]
fn render_without_container_reports_missing_mount_point() {
    let mut doc = MemoryDocument::new("/");
    let err = engine(3, 10).render(&mut doc).expect_err("no container");
    assert_eq!(err, SiteUiError::missing(".pagination"));
}

#[test]
fn descriptors_serialize_for_tooling() {
    let links = engine(2, 10).descriptors("/");
    let json = serde_json::to_value(&links).expect("json");
    assert_eq!(json[0]["href"], "/");
    assert_eq!(json[0]["target"], 1);
    assert_eq!(json[1]["is_group_jump"], false);
    assert_eq!(json[2]["is_group_jump"], true);
}
