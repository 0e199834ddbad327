use book_layout::History;
use proptest::prelude::*;

#[test]
fn test_new_history_is_clean() {
    let history = History::new(0);
    assert_eq!(*history.current(), 0);
    assert!(!history.can_undo());
    assert!(!history.can_redo());
    assert!(!history.is_dirty());
    assert_eq!(history.limit(), 50);
}

#[test]
fn test_undo_redo_at_boundaries_are_noops() {
    let mut history = History::new("a");
    assert!(!history.undo());
    assert!(!history.redo());
    assert_eq!(*history.current(), "a");
}

#[test]
fn test_push_undo_redo() {
    let mut history = History::new(1);
    history.push(2);
    history.push(3);

    assert!(history.undo());
    assert_eq!(*history.current(), 2);
    assert!(history.undo());
    assert_eq!(*history.current(), 1);
    assert!(!history.undo());

    assert!(history.redo());
    assert_eq!(*history.current(), 2);
    assert!(history.can_redo());
}

#[test]
fn test_push_after_undo_discards_redo_tail() {
    let mut history = History::new(1);
    history.push(2);
    history.push(3);
    history.undo();
    history.undo();
    history.push(4);

    assert!(!history.can_redo());
    assert_eq!(history.entries().copied().collect::<Vec<_>>(), vec![1, 4]);
}

#[test]
fn test_history_is_bounded() {
    let mut history = History::with_limit(0, 50);
    for i in 1..=60 {
        history.push(i);
    }
    assert_eq!(history.len(), 50);
    // 61 snapshots pushed in total, the oldest 11 are gone
    assert_eq!(history.entries().next().copied(), Some(11));
    assert_eq!(*history.current(), 60);
    assert_eq!(history.cursor(), 49);
}

#[test]
fn test_dirty_clean_round_trip() {
    let mut history = History::new("saved");
    history.push("edited");
    assert!(history.is_dirty());

    history.commit();
    assert!(!history.is_dirty());
    assert_eq!(*history.saved(), "edited");

    // Undo moves away from the committed snapshot
    history.undo();
    assert!(history.is_dirty());
    history.redo();
    assert!(!history.is_dirty());
}

#[test]
fn test_undo_back_to_saved_value_is_clean() {
    let mut history = History::new(10);
    history.push(11);
    assert!(history.is_dirty());
    history.undo();
    assert!(!history.is_dirty());
}

#[test]
fn test_commit_does_not_add_entry() {
    let mut history = History::new(1);
    history.push(2);
    history.commit();
    assert_eq!(history.len(), 2);
}

proptest! {
    #[test]
    fn prop_length_never_exceeds_limit(limit in 1usize..20, pushes in 0usize..80) {
        let mut history = History::with_limit(0usize, limit);
        for i in 1..=pushes {
            history.push(i);
            prop_assert!(history.len() <= limit);
            prop_assert!(history.cursor() < history.len());
        }
        prop_assert_eq!(history.len(), (pushes + 1).min(limit));
        prop_assert_eq!(*history.current(), pushes);
    }

    #[test]
    fn prop_undo_then_redo_is_identity(values in prop::collection::vec(any::<i32>(), 1..30), steps in 0usize..40) {
        let mut history = History::new(0i32);
        for v in &values {
            history.push(*v);
        }
        let before = *history.current();
        let mut undone = 0;
        for _ in 0..steps {
            if history.undo() {
                undone += 1;
            }
        }
        for _ in 0..undone {
            prop_assert!(history.redo());
        }
        prop_assert_eq!(*history.current(), before);
        prop_assert!(!history.can_redo());
    }

    #[test]
    fn prop_push_after_undo_invalidates_redo(values in prop::collection::vec(any::<u8>(), 2..20), next in any::<u8>()) {
        let mut history = History::new(0u8);
        for v in &values {
            history.push(*v);
        }
        history.undo();
        history.push(next);
        prop_assert!(!history.can_redo());
        prop_assert_eq!(*history.current(), next);
    }
}
