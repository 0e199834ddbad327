use book_layout::*;

fn manuscript(words_per_chapter: usize, chapters: usize) -> Manuscript {
    let content = vec!["word"; words_per_chapter].join(" ");
    Manuscript::new(
        "Counting",
        (0..chapters)
            .map(|i| Chapter::new(format!("Chapter {}", i), content.clone()))
            .collect(),
    )
}

#[test]
fn test_statistics_for_generated_book() {
    let mut editor = BookEditor::new(manuscript(600, 3), LayoutConfiguration::default());
    editor.set_back_cover(true);
    editor.add_image(4, "https://img.example/a.png").unwrap();
    editor.add_image(5, "https://img.example/b.png").unwrap();

    let stats = editor.statistics();
    assert_eq!(stats.pages, 8);
    assert_eq!(stats.spreads, 5);
    assert_eq!(stats.chapters, 3);
    assert_eq!(stats.blank_pages, 2);
    assert_eq!(stats.images, 2);
    assert_eq!(stats.total_words, 1800);
    assert_eq!(stats.words_per_page, 300);
    assert_eq!(stats.estimated_text_pages, 6);
}

#[test]
fn test_statistics_follow_layout() {
    let mut editor = BookEditor::new(manuscript(100, 1), LayoutConfiguration::default());
    let single = editor.statistics().words_per_page;
    editor.set_columns(3);
    let triple = editor.statistics().words_per_page;
    assert!(triple < single);
}

#[test]
fn test_statistics_for_empty_manuscript() {
    let editor = BookEditor::new(Manuscript::new("Empty", vec![]), LayoutConfiguration::default());
    let stats = editor.statistics();
    assert_eq!(stats.chapters, 0);
    assert_eq!(stats.total_words, 0);
    assert_eq!(stats.estimated_text_pages, 0);
    // Title and its spacer
    assert_eq!(stats.pages, 2);
    assert_eq!(stats.spreads, 2);
}

#[test]
fn test_words_per_page_estimate() {
    assert_eq!(estimate_words_per_page(1, 12.0, 1.5), 300);
    assert_eq!(estimate_words_per_page(1, 24.0, 1.5), 75);
    assert!(estimate_words_per_page(4, 96.0, 3.0) >= 1);
}
