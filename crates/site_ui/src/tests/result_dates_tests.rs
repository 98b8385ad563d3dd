use super::*;
use dom::MemoryDocument;

const ORIGIN: &str = "https://blog.example.com";

fn results_page(urls: &[Option<&str>]) -> (MemoryDocument, Vec<NodeId>) {
    let mut doc = MemoryDocument::default();
    let body = doc.body();
    let mut results = Vec::new();
    for url in urls.iter().copied() {
        let result = doc
            .append_element(body, "div", &[("class", "gs-webResult gs-result")])
            .expect("result");
        let outer = doc.append_element(result, "div", &[]).expect("outer");
        let inner = doc.append_element(outer, "div", &[]).expect("inner");
        match url {
            Some(url) => doc
                .append_element(
                    inner,
                    "div",
                    &[("class", "gs-per-result-labels"), ("url", url)],
                )
                .expect("labels"),
            None => doc
                .append_element(inner, "div", &[("class", "gs-per-result-labels")])
                .expect("labels"),
        };
        results.push(result);
    }
    (doc, results)
}

fn badges(doc: &MemoryDocument) -> Vec<String> {
    doc.query_all(None, ".google-result-meta")
        .into_iter()
        .map(|node| doc.text_content(node))
        .collect()
}

#[test]
fn extracts_single_digit_month_and_day() {
    let date = extract_result_date("https://blog.example.com/2013/2/1/first-post/", ORIGIN)
        .expect("date");
    assert_eq!(format_badge(date), "Feb 1, 2013");
}

#[test]
fn extracts_full_width_date() {
    let date = extract_result_date("https://blog.example.com/2016/11/25/other/", ORIGIN)
        .expect("date");
    assert_eq!(format_badge(date), "Nov 25, 2016");
}

#[test]
fn origin_with_trailing_slash_reads_same_offset() {
    let date = extract_result_date(
        "https://blog.example.com/2016/11/25",
        "https://blog.example.com/",
    )
    .expect("date");
    assert_eq!(format_badge(date), "Nov 25, 2016");
}

#[test]
fn rejects_urls_without_a_date() {
    for url in [
        "https://blog.example.com/about/",
        "https://blog.example.com/2016/13/01/",
        "https://blog.example.com/2016/2/30/",
        "https://blog",
    ] {
        let err = extract_result_date(url, ORIGIN).expect_err(url);
        assert_eq!(err.code(), shared::error::ErrorCode::MalformedDateSource);
    }
}

#[test]
fn badges_are_prepended_to_each_result() {
    let (mut doc, results) = results_page(&[
        Some("https://blog.example.com/2013/2/1/a/"),
        Some("https://blog.example.com/2016/11/25/b/"),
    ]);

    let report = annotate_results(&mut doc, &ResultSelectors::default(), ORIGIN).expect("annotate");

    assert_eq!(report.annotated, 2);
    assert_eq!(badges(&doc), vec!["Feb 1, 2013", "Nov 25, 2016"]);
    for result in results {
        let first = doc.children(result)[0];
        assert!(doc.has_class(first, "google-result-meta"));
    }
}

#[test]
fn results_without_url_are_skipped_silently() {
    let (mut doc, _) = results_page(&[None, Some("https://blog.example.com/2016/11/25/b/")]);

    let report = annotate_results(&mut doc, &ResultSelectors::default(), ORIGIN).expect("annotate");

    assert_eq!(
        report,
        AnnotationReport {
            annotated: 1,
            already_annotated: 0,
            skipped: 1
        }
    );
    assert_eq!(badges(&doc), vec!["Nov 25, 2016"]);
}

#[test]
fn repeated_annotation_does_not_duplicate_badges() {
    let (mut doc, _) = results_page(&[Some("https://blog.example.com/2013/2/1/a/")]);
    let selectors = ResultSelectors::default();

    annotate_results(&mut doc, &selectors, ORIGIN).expect("first");
    let report = annotate_results(&mut doc, &selectors, ORIGIN).expect("second");

    assert_eq!(report.annotated, 0);
    assert_eq!(report.already_annotated, 1);
    assert_eq!(badges(&doc).len(), 1);
}

#[test]
fn page_without_results_is_a_no_op() {
    let mut doc = MemoryDocument::default();
    let report = annotate_results(&mut doc, &ResultSelectors::default(), ORIGIN).expect("annotate");
    assert_eq!(report, AnnotationReport::default());
}
