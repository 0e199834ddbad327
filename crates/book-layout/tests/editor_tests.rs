use book_layout::*;

fn manuscript() -> Manuscript {
    Manuscript {
        title: "Tide Tables".to_string(),
        author: Some("M. Harbour".to_string()),
        chapters: vec![
            Chapter::new("Low Water", "The boats sat on mud."),
            Chapter::new("High Water", "The harbour filled."),
            Chapter::new("Slack", "Nothing moved."),
        ],
        synopsis: Some("A year of tides.".to_string()),
        description: None,
    }
}

fn editor() -> BookEditor {
    BookEditor::new(manuscript(), LayoutConfiguration::default())
}

fn chapter_page(editor: &BookEditor, chapter_index: usize) -> usize {
    editor
        .pages()
        .iter()
        .position(|p| p.role == PageRole::ChapterBody { chapter_index })
        .unwrap()
}

#[test]
fn test_new_editor_is_clean() {
    let editor = editor();
    // title, blank, toc, blank, three chapters
    assert_eq!(editor.pages().len(), 7);
    assert!(!editor.is_dirty());
    assert!(!editor.can_undo());
    assert!(!editor.can_redo());
    assert_eq!(editor.revision(), 0);
}

#[test]
fn test_config_setter_is_undoable() {
    let mut editor = editor();
    editor.set_columns(3);
    assert_eq!(editor.config().columns, 3);
    assert!(editor.is_dirty());
    assert!(editor.can_undo());

    assert!(editor.undo());
    assert_eq!(editor.config().columns, 1);
    assert!(!editor.is_dirty());

    assert!(editor.redo());
    assert_eq!(editor.config().columns, 3);
}

#[test]
fn test_setting_same_value_records_nothing() {
    let mut editor = editor();
    editor.set_columns(1);
    assert!(!editor.can_undo());
    assert_eq!(editor.revision(), 0);
}

#[test]
fn test_undo_redo_at_boundaries_are_noops() {
    let mut editor = editor();
    assert!(!editor.undo());
    assert!(!editor.redo());
    assert_eq!(editor.revision(), 0);
}

#[test]
fn test_redo_invalidated_by_new_edit() {
    let mut editor = editor();
    editor.set_columns(2);
    editor.set_columns(3);
    editor.undo();
    editor.set_rtl(true);
    assert!(!editor.can_redo());
    assert_eq!(editor.config().columns, 2);
    assert!(editor.config().is_rtl);
}

#[test]
fn test_commit_marks_clean() {
    let mut editor = editor();
    editor.set_split_type(SplitType::Vertical);
    editor.set_split_ratio(25.0);
    assert!(editor.is_dirty());
    editor.commit();
    assert!(!editor.is_dirty());
    assert_eq!(editor.config().split_ratio, vec![25.0, 75.0]);

    editor.undo();
    assert!(editor.is_dirty());
}

#[test]
fn test_background_kind_switch_through_editor() {
    let mut editor = editor();
    editor.set_background(Background::solid("#fafafa"));
    editor.set_background_kind(BackgroundKind::Pattern);
    let bg = &editor.config().background;
    assert_eq!(bg.active, BackgroundKind::Pattern);
    assert_eq!(bg.solid.as_deref(), Some("#fafafa"));
    assert!(bg.pattern.is_some());
}

#[test]
fn test_history_limit_applies_to_editor() {
    let mut editor = editor().with_history_limit(3);
    for gap in 1..=10 {
        editor.set_column_gap(gap as f32);
    }
    assert_eq!(editor.history().len(), 3);
    assert!(editor.undo());
    assert!(editor.undo());
    assert!(!editor.undo());
    assert_eq!(editor.config().column_gap_mm, 8.0);
}

#[test]
fn test_apply_template_and_reset() {
    let mut editor = editor();
    editor.apply_template("manga-rtl").unwrap();
    assert!(editor.config().is_rtl);
    assert_eq!(editor.config().split_type, SplitType::Quadrant);
    assert!(editor.navigator().is_rtl());

    editor.reset_configuration();
    assert_eq!(*editor.config(), LayoutConfiguration::default());

    editor.undo();
    assert!(editor.config().is_rtl);
}

#[test]
fn test_unknown_template_changes_nothing() {
    let mut editor = editor();
    assert!(matches!(
        editor.apply_template("gothic"),
        Err(LayoutError::UnknownTemplate(_))
    ));
    assert!(!editor.can_undo());
}

#[test]
fn test_toggle_back_cover_regenerates_pages() {
    let mut editor = editor();
    editor.toggle_back_cover();
    assert_eq!(editor.pages().len(), 8);
    assert_eq!(editor.pages()[7].role, PageRole::BackCoverSummary);
    assert_eq!(editor.navigator().spread_count(), 5);

    editor.toggle_table_of_contents();
    assert_eq!(editor.pages().len(), 6);
    assert!(editor.pages().iter().all(|p| p.role != PageRole::TableOfContents));

    editor.undo();
    assert_eq!(editor.pages().len(), 8);
}

#[test]
fn test_regeneration_keeps_chapter_images() {
    let mut editor = editor();
    let index = chapter_page(&editor, 2);
    let id = editor.add_image(index, "https://img.example/slack.png").unwrap();

    editor.set_table_of_contents(false);
    let moved = chapter_page(&editor, 2);
    assert_ne!(moved, index);
    assert!(editor.page(moved).unwrap().image(id).is_some());
}

#[test]
fn test_set_manuscript_regenerates() {
    let mut editor = editor();
    let mut m = manuscript();
    m.chapters.push(Chapter::new("Spring Tide", "Everything flooded."));
    editor.set_manuscript(m);
    assert_eq!(editor.pages().len(), 8);
    assert_eq!(editor.manuscript().chapters.len(), 4);
    assert!(editor.can_undo());
}

#[test]
fn test_insert_and_delete_blank_pages() {
    let mut editor = editor();
    let id = editor.insert_blank_page(4).unwrap();
    assert_eq!(editor.pages()[4].id, id);
    assert_eq!(editor.pages()[4].role, PageRole::Blank);
    assert_eq!(editor.pages().len(), 8);

    editor.delete_page(4).unwrap();
    assert_eq!(editor.pages().len(), 7);

    assert!(matches!(
        editor.delete_page(0),
        Err(LayoutError::PageNotDeletable(0))
    ));
    assert!(matches!(
        editor.insert_blank_page(99),
        Err(LayoutError::PageOutOfRange { index: 99, .. })
    ));

    editor.undo();
    assert_eq!(editor.pages().len(), 8);
}

#[test]
fn test_drag_records_single_history_entry() {
    let mut editor = editor();
    let page = chapter_page(&editor, 0);
    let id = editor.add_image(page, "https://img.example/mud.png").unwrap();
    let entries = editor.history().len();

    let container = ContainerSize::new(200.0, 200.0);
    editor
        .begin_drag(page, id, PointerPos::new(0.0, 0.0), container)
        .unwrap();
    for step in 1..=10 {
        editor.pointer_moved(PointerPos::new(step as f32 * 4.0, 0.0));
    }
    // Intermediate moves are visible but not yet recorded
    assert_eq!(editor.history().len(), entries);
    assert_eq!(editor.page(page).unwrap().image(id).unwrap().geometry.x, 50.0);

    let released = editor.pointer_released(PointerPos::new(40.0, 0.0)).unwrap();
    assert_eq!(released.x, 50.0);
    assert_eq!(editor.history().len(), entries + 1);

    editor.undo();
    assert_eq!(editor.page(page).unwrap().image(id).unwrap().geometry.x, 30.0);
}

#[test]
fn test_resize_is_clamped_on_release() {
    let mut editor = editor();
    let page = chapter_page(&editor, 1);
    let id = editor.add_image(page, "a").unwrap();
    editor
        .begin_resize(page, id, PointerPos::new(0.0, 0.0), ContainerSize::new(100.0, 100.0))
        .unwrap();
    let geometry = editor.pointer_released(PointerPos::new(500.0, -500.0)).unwrap();
    assert_eq!(geometry.width, 70.0);
    assert_eq!(geometry.height, 10.0);
    assert!(geometry.is_contained());
}

#[test]
fn test_undo_during_drag_finishes_drag_first() {
    let mut editor = editor();
    let page = chapter_page(&editor, 0);
    let id = editor.add_image(page, "a").unwrap();
    editor
        .begin_drag(page, id, PointerPos::new(0.0, 0.0), ContainerSize::new(100.0, 100.0))
        .unwrap();
    editor.pointer_moved(PointerPos::new(10.0, 0.0));

    assert!(editor.undo());
    assert!(!editor.canvas().is_manipulating());
    assert_eq!(editor.page(page).unwrap().image(id).unwrap().geometry.x, 30.0);
    assert!(editor.redo());
    assert_eq!(editor.page(page).unwrap().image(id).unwrap().geometry.x, 40.0);
}

#[test]
fn test_pointer_events_without_session_are_ignored() {
    let mut editor = editor();
    assert!(editor.pointer_moved(PointerPos::new(1.0, 1.0)).is_none());
    assert!(editor.pointer_released(PointerPos::new(1.0, 1.0)).is_none());
    assert!(!editor.can_undo());
}

#[test]
fn test_delete_image_clears_selection() {
    let mut editor = editor();
    let page = chapter_page(&editor, 0);
    let a = editor.add_image(page, "a").unwrap();
    let b = editor.add_image(page, "b").unwrap();
    editor.select_image(page, a).unwrap();

    editor.delete_image(page, a).unwrap();
    assert!(editor.selection().is_none());
    assert_eq!(editor.page(page).unwrap().images.len(), 1);
    assert!(editor.page(page).unwrap().image(b).is_some());
}

#[test]
fn test_undo_drops_selection_of_removed_image() {
    let mut editor = editor();
    let page = chapter_page(&editor, 0);
    let id = editor.add_image(page, "a").unwrap();
    editor.select_image(page, id).unwrap();
    editor.undo();
    assert!(editor.selection().is_none());
}

#[test]
fn test_image_editing_extras() {
    let mut editor = editor();
    let page = chapter_page(&editor, 0);
    let a = editor.add_image(page, "a").unwrap();
    let b = editor.add_image(page, "b").unwrap();

    editor.rotate_image(page, a, 90.0).unwrap();
    editor.set_image_source(page, a, "https://img.example/new.png").unwrap();
    editor.bring_to_front(page, a).unwrap();

    let images = &editor.page(page).unwrap().images;
    assert_eq!(images[0].id, b);
    assert_eq!(images[1].id, a);
    assert_eq!(images[1].rotation_deg, 90.0);
    assert_eq!(images[1].source, "https://img.example/new.png");
}

#[test]
fn test_nudge_selection() {
    let mut editor = editor();
    let page = chapter_page(&editor, 0);
    assert!(editor.nudge_selection(1, 0).is_none());

    let id = editor.add_image(page, "a").unwrap();
    editor.select_image(page, id).unwrap();
    let geometry = editor.nudge_selection(3, -2).unwrap();
    assert_eq!((geometry.x, geometry.y), (33.0, 28.0));
}

#[test]
fn test_set_image_geometry_normalizes() {
    let mut editor = editor();
    let page = chapter_page(&editor, 0);
    let id = editor.add_image(page, "a").unwrap();
    let geometry = editor
        .set_image_geometry(page, id, Geometry {
            x: 95.0,
            y: -5.0,
            width: 2.0,
            height: 50.0,
        })
        .unwrap();
    assert_eq!(geometry, Geometry::new(90.0, 0.0, 10.0, 50.0));
}

#[test]
fn test_spread_navigation_through_editor() {
    let mut editor = editor();
    assert!(matches!(editor.current_spread(), SpreadView::Cover { title: "Tide Tables", .. }));

    editor.next_spread();
    match editor.current_spread() {
        SpreadView::Pages { left, right } => {
            assert_eq!(left.unwrap().page.role, PageRole::Title);
            assert_eq!(right.unwrap().page_number, 2);
        }
        other => panic!("Expected pages, got {:?}", other),
    }

    // Seven pages: the last spread has an empty partner
    editor.go_to_spread(100);
    match editor.current_spread() {
        SpreadView::Pages { left, right } => {
            assert_eq!(left.unwrap().index, 6);
            assert!(right.is_none());
        }
        other => panic!("Expected pages, got {:?}", other),
    }
}

#[test]
fn test_rtl_spread_view_mirrors() {
    let mut editor = editor();
    editor.set_rtl(true);
    editor.next_spread();
    match editor.current_spread() {
        SpreadView::Pages { left, right } => {
            assert_eq!(left.unwrap().index, 1);
            assert_eq!(right.unwrap().index, 0);
        }
        other => panic!("Expected pages, got {:?}", other),
    }
}

#[test]
fn test_page_view_resolves_bands_and_numbers() {
    let mut editor = editor();
    editor.set_header(HeaderFooter::with_text("{title}", "", "{page}"));
    editor.set_page_numbers(PageNumbering {
        show: true,
        position: PageNumberPosition::BottomOutside,
        start: 1,
    });

    let view = editor.page_view(2).unwrap();
    assert_eq!(view.page_number, 3);
    let header = view.header.unwrap();
    assert_eq!(header.center, "Tide Tables");
    assert_eq!(header.right, "3");
    let label = view.page_number_label.unwrap();
    assert_eq!(label.text, "3");
    assert_eq!(label.alignment, Alignment::Right);
    assert!(editor.page_view(50).is_none());
}

#[test]
fn test_resume_from_snapshot_is_clean() {
    let mut editor = editor();
    editor.set_columns(2);
    let snapshot = editor.snapshot().clone();

    let resumed = BookEditor::from_snapshot(manuscript(), snapshot.clone());
    assert!(!resumed.is_dirty());
    assert_eq!(*resumed.snapshot(), snapshot);
}

#[test]
fn test_snapshot_json_round_trip() {
    let mut editor = editor();
    let page = chapter_page(&editor, 0);
    editor.add_image(page, "https://img.example/a.png").unwrap();
    let json = editor.snapshot().to_json().unwrap();
    let restored = Snapshot::from_json(&json).unwrap();
    assert_eq!(restored, *editor.snapshot());
}

#[test]
fn test_oversized_saved_placement_is_clamped_and_draggable() {
    let mut editor = editor();
    let page = chapter_page(&editor, 0);
    let id = editor.add_image(page, "https://img.example/wide.png").unwrap();
    let mut snapshot = editor.snapshot().clone();
    snapshot.pages[page].images[0].geometry = Geometry {
        x: 10.0,
        y: 5.0,
        width: 150.0,
        height: 20.0,
    };

    let restored = Snapshot::from_json(&snapshot.to_json().unwrap()).unwrap();
    assert!(restored.pages[page].images[0].geometry.is_contained());

    let mut resumed = BookEditor::from_snapshot(manuscript(), snapshot);
    let geometry = resumed.page(page).unwrap().image(id).unwrap().geometry;
    assert!(geometry.is_contained());
    assert_eq!(geometry.width, 100.0);
    assert_eq!(geometry.x, 0.0);

    resumed
        .begin_drag(page, id, PointerPos::new(0.0, 0.0), ContainerSize::new(100.0, 100.0))
        .unwrap();
    let moved = resumed.pointer_moved(PointerPos::new(5.0, 0.0)).unwrap();
    assert_eq!(moved.x, 0.0);
    assert!(moved.is_contained());
    resumed.nudge_image(page, id, 3.0, 0.0).unwrap();
}

#[test]
fn test_translating_unnormalized_geometry_stays_on_page() {
    let wide = Geometry {
        x: 10.0,
        y: 0.0,
        width: 150.0,
        height: 20.0,
    };
    let moved = wide.translated(5.0, 0.0);
    assert_eq!(moved.x, 0.0);
}

#[test]
fn test_template_keeps_structure_and_cover() {
    let mut editor = editor();
    editor.set_back_cover(true);
    editor.set_config(editor.config().with_cover(CoverDesign {
        description: Some("Gulls over the harbour wall".to_string()),
        ..CoverDesign::default()
    }));
    let back = editor.pages().len() - 1;
    assert_eq!(editor.pages()[back].role, PageRole::BackCoverSummary);
    let id = editor.add_image(back, "https://img.example/back.png").unwrap();
    let page_count = editor.pages().len();

    editor.apply_template("classic").unwrap();

    assert_eq!(editor.config().margins.top_mm, 25.0);
    assert!(editor.config().flags.include_back_cover);
    assert_eq!(
        editor.config().cover.description.as_deref(),
        Some("Gulls over the harbour wall")
    );
    assert_eq!(editor.pages().len(), page_count);
    assert_eq!(editor.pages()[back].role, PageRole::BackCoverSummary);
    assert!(editor.pages()[back].image(id).is_some());
}

#[test]
fn test_resume_against_shorter_manuscript_regenerates() {
    let mut editor = editor();
    let page = chapter_page(&editor, 0);
    let id = editor.add_image(page, "https://img.example/mud.png").unwrap();
    editor.add_image(chapter_page(&editor, 2), "https://img.example/slack.png").unwrap();
    let snapshot = editor.snapshot().clone();

    let mut shorter = manuscript();
    shorter.chapters.truncate(2);
    let resumed = BookEditor::from_snapshot(shorter, snapshot);

    let chapters: Vec<usize> = resumed
        .pages()
        .iter()
        .filter_map(|p| match p.role {
            PageRole::ChapterBody { chapter_index } => Some(chapter_index),
            _ => None,
        })
        .collect();
    assert_eq!(chapters, vec![0, 1]);
    let page = chapter_page(&resumed, 0);
    assert!(resumed.page(page).unwrap().image(id).is_some());
    assert_eq!(resumed.statistics().images, 1);
}
