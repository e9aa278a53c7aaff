use booksapp::domain::books::BookRecord;
use booksapp::presentation::views::{
    BooksTablePartial, DEFAULT_HEADING, HEADER_LABELS, IndexTemplate, books_table,
    render_template,
};
use insta::assert_snapshot;

fn fixture_books() -> Vec<BookRecord> {
    serde_json::from_str(include_str!("fixtures/books.json")).expect("fixture catalog")
}

fn render_partial(books: &[BookRecord]) -> String {
    render_template(BooksTablePartial {
        view: books_table(DEFAULT_HEADING, books),
    })
    .expect("render partial")
}

#[test]
fn snapshot_single_book() {
    let books = vec![BookRecord::new(1, "Dune", "Herbert", "Desert planet saga")];
    assert_snapshot!("single_book", render_partial(&books));
}

#[test]
fn snapshot_empty_catalog() {
    assert_snapshot!("empty_catalog", render_partial(&[]));
}

#[test]
fn one_row_per_record_in_input_order() {
    let books = fixture_books();
    let html = render_partial(&books);

    assert_eq!(html.matches("<tr>").count(), books.len() + 1);
    assert_eq!(html.matches("<th>").count(), HEADER_LABELS.len());
    assert_eq!(html.matches("<td>").count(), books.len() * 3);

    let positions: Vec<usize> = books
        .iter()
        .map(|book| {
            html.find(&format!("<td>{}</td>", book.title))
                .expect("title rendered")
        })
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn cells_follow_column_order() {
    let books = fixture_books();
    let html = render_partial(&books);

    for book in &books {
        let row = format!(
            "<td>{}</td>\n      <td>{}</td>\n      <td>{}</td>",
            book.title, book.author, book.description
        );
        assert!(html.contains(&row), "missing row for {}", book.id);
    }
}

#[test]
fn row_keys_are_not_rendered() {
    let books = fixture_books();
    let html = render_partial(&books);
    assert!(!html.contains("isbn-9780553283686"));
}

#[test]
fn index_embeds_the_table() {
    let books = fixture_books();
    let html = render_template(IndexTemplate {
        title: "Library",
        view: books_table("Shelf", &books),
    })
    .expect("render index");

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Library</title>"));
    assert!(html.contains("<h1>Shelf</h1>"));
    assert!(html.contains("<td>Le Guin</td>"));
    assert!(html.trim_end().ends_with("</html>"));
}

#[test]
fn rendering_is_idempotent() {
    let books = fixture_books();
    assert_eq!(render_partial(&books), render_partial(&books));
}
