use std::collections::HashMap;

use booksapp::application::catalog::BooksSource;
use booksapp::application::pages::{PageConfig, PageService, RenderMode};
use booksapp::domain::books::BookRecord;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};

#[test]
fn renders_emit_expected_metrics() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    recorder
        .install()
        .expect("debug metrics recorder should install in this test process");

    let pages = PageService::new(PageConfig {
        heading: "My books".to_string(),
        title: "My books".to_string(),
        books: BooksSource::Stdin,
    });
    let books = vec![
        BookRecord::new(1, "Dune", "Herbert", "Desert planet saga"),
        BookRecord::new(2, "Emma", "Austen", "Matchmaking"),
    ];

    pages.render(&books, RenderMode::Page).expect("render page");
    pages
        .render(&books[..1], RenderMode::Fragment)
        .expect("render fragment");

    let counters: HashMap<String, u64> = snapshotter
        .snapshot()
        .into_vec()
        .into_iter()
        .filter_map(|(composite_key, _, _, value)| match value {
            DebugValue::Counter(count) => {
                let key = composite_key.key();
                let mode = key
                    .labels()
                    .find(|label| label.key() == "mode")
                    .map(|label| format!("{{mode={}}}", label.value()))
                    .unwrap_or_default();
                Some((format!("{}{mode}", key.name()), count))
            }
            _ => None,
        })
        .collect();

    assert_eq!(counters.get("booksapp_render_total{mode=page}"), Some(&1));
    assert_eq!(counters.get("booksapp_render_total{mode=fragment}"), Some(&1));
    assert_eq!(counters.get("booksapp_rendered_rows_total"), Some(&3));
}
