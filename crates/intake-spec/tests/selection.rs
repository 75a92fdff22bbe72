use std::collections::BTreeSet;

use intake_spec::{
    ConcernBoard, ConcernError, FormState, HealthConcern, MAX_SELECTED, ReferenceCatalog,
    ToggleOutcome, YesNo, assemble,
};

fn scenario_catalog() -> ReferenceCatalog {
    let concerns = [
        (1, "Sleep"),
        (2, "Stress"),
        (3, "Energy"),
        (4, "Skin"),
        (5, "Weight"),
        (6, "Immunity"),
    ]
    .into_iter()
    .map(|(id, name)| HealthConcern {
        id,
        name: name.to_string(),
    })
    .collect();
    ReferenceCatalog::from_parts(concerns, vec![], vec![])
}

fn assert_membership_matches(board: &ConcernBoard) {
    let selected: BTreeSet<u32> = board.selected().iter().copied().collect();
    let prioritized: BTreeSet<u32> = board.prioritized().iter().map(|entry| entry.id).collect();
    assert_eq!(selected, prioritized);
}

fn names(board: &ConcernBoard) -> Vec<&str> {
    board
        .prioritized()
        .iter()
        .map(|entry| entry.name.as_str())
        .collect()
}

#[test]
fn toggles_append_in_insertion_order() {
    let catalog = scenario_catalog();
    let mut board = ConcernBoard::default();

    for id in [1, 2, 3] {
        assert_eq!(board.toggle(id, &catalog), Ok(ToggleOutcome::Added));
        assert_membership_matches(&board);
    }

    assert_eq!(board.selected(), &[1, 2, 3]);
    assert_eq!(names(&board), ["Sleep", "Stress", "Energy"]);
}

#[test]
fn toggle_is_idempotent_over_two_calls() {
    let catalog = scenario_catalog();
    let mut board = ConcernBoard::default();
    board.toggle(1, &catalog).unwrap();
    board.toggle(4, &catalog).unwrap();
    let before = board.clone();

    assert_eq!(board.toggle(2, &catalog), Ok(ToggleOutcome::Added));
    assert_eq!(board.toggle(2, &catalog), Ok(ToggleOutcome::Removed));
    assert_eq!(board, before);
}

#[test]
fn unknown_id_is_rejected_without_mutation() {
    let catalog = scenario_catalog();
    let mut board = ConcernBoard::default();
    board.toggle(1, &catalog).unwrap();
    let before = board.clone();

    assert_eq!(
        board.toggle(99, &catalog),
        Err(ConcernError::UnknownConcern(99))
    );
    assert_eq!(board, before);
}

#[test]
fn capacity_holds_for_any_toggle_sequence() {
    let catalog = scenario_catalog();
    let mut board = ConcernBoard::default();

    // Worst case: try every id twice in a scrambled order.
    for id in [1, 4, 2, 6, 3, 5, 1, 6, 2, 4, 5, 3] {
        let _ = board.toggle(id, &catalog).unwrap();
        assert!(board.selected().len() <= MAX_SELECTED);
        assert_membership_matches(&board);
    }
}

#[test]
fn sixth_selection_is_a_silent_noop() {
    let catalog = scenario_catalog();
    let mut board = ConcernBoard::default();
    for id in 1..=5 {
        assert_eq!(board.toggle(id, &catalog), Ok(ToggleOutcome::Added));
    }
    assert!(board.is_at_capacity());
    let before = board.clone();

    assert_eq!(board.toggle(6, &catalog), Ok(ToggleOutcome::AtCapacity));
    assert_eq!(board, before);
}

#[test]
fn deselection_preserves_remaining_priority_order() {
    let catalog = scenario_catalog();
    let mut board = ConcernBoard::default();
    for id in [1, 2, 3] {
        board.toggle(id, &catalog).unwrap();
    }
    board.reorder(&[3, 1, 2]).unwrap();

    board.toggle(1, &catalog).unwrap();
    assert_eq!(names(&board), ["Energy", "Stress"]);
    assert_eq!(board.selected(), &[2, 3]);
}

#[test]
fn reselection_lands_at_the_lowest_priority() {
    let catalog = scenario_catalog();
    let mut board = ConcernBoard::default();
    for id in [1, 2, 3] {
        board.toggle(id, &catalog).unwrap();
    }
    board.reorder(&[3, 1, 2]).unwrap();

    board.toggle(1, &catalog).unwrap();
    board.toggle(1, &catalog).unwrap();
    assert_eq!(names(&board), ["Energy", "Stress", "Sleep"]);
}

#[test]
fn reorder_applies_a_full_permutation() {
    let catalog = scenario_catalog();
    let mut board = ConcernBoard::default();
    for id in [1, 2, 3] {
        board.toggle(id, &catalog).unwrap();
    }

    board.reorder(&[3, 1, 2]).unwrap();
    assert_eq!(names(&board), ["Energy", "Sleep", "Stress"]);
    assert_membership_matches(&board);
}

#[test]
fn reorder_rejects_non_permutations_without_partial_application() {
    let catalog = scenario_catalog();
    let mut board = ConcernBoard::default();
    for id in [1, 2, 3] {
        board.toggle(id, &catalog).unwrap();
    }
    let before = board.clone();

    for bad_order in [
        vec![3, 1],          // too short
        vec![3, 1, 2, 4],    // too long
        vec![3, 1, 4],       // foreign id
        vec![3, 3, 1],       // duplicate
    ] {
        assert_eq!(board.reorder(&bad_order), Err(ConcernError::InvalidReorder));
        assert_eq!(board, before);
    }
}

#[test]
fn ranked_assembly_follows_priority_order() {
    let catalog = scenario_catalog();
    let mut form = FormState::default();
    for id in [1, 2, 3] {
        form.concerns.toggle(id, &catalog).unwrap();
    }
    form.concerns.reorder(&[3, 1, 2]).unwrap();
    form.diets.toggle("None");
    form.sun_exposure = Some(YesNo::Yes);
    form.smoking = Some(YesNo::No);
    form.alcohol = Some(intake_spec::AlcoholBand::ZeroToOne);

    let payload = assemble(&form, &catalog).unwrap();
    let ranked: Vec<(u32, &str, usize)> = payload
        .health_concerns
        .iter()
        .map(|concern| (concern.id, concern.name.as_str(), concern.priority))
        .collect();
    assert_eq!(
        ranked,
        [(3, "Energy", 1), (1, "Sleep", 2), (2, "Stress", 3)]
    );
}

#[test]
fn gesture_commits_the_pending_order_once() {
    let catalog = scenario_catalog();
    let mut board = ConcernBoard::default();
    for id in [1, 2, 3] {
        board.toggle(id, &catalog).unwrap();
    }

    let mut gesture = board.begin_reorder().unwrap();
    assert_eq!(gesture.order(), &[1, 2, 3]);
    assert!(gesture.move_item(2, 0));
    board.commit(gesture).unwrap();
    assert_eq!(names(&board), ["Energy", "Sleep", "Stress"]);

    // The slot is free again once the commit lands.
    let gesture = board.begin_reorder().unwrap();
    board.abandon(gesture);
}

#[test]
fn overlapping_gestures_are_rejected() {
    let catalog = scenario_catalog();
    let mut board = ConcernBoard::default();
    board.toggle(1, &catalog).unwrap();

    let first = board.begin_reorder().unwrap();
    assert_eq!(
        board.begin_reorder().map(|_| ()),
        Err(ConcernError::GestureInProgress)
    );
    board.abandon(first);
    assert!(board.begin_reorder().is_ok());
}

#[test]
fn stale_gesture_fails_atomically_and_releases_the_slot() {
    let catalog = scenario_catalog();
    let mut board = ConcernBoard::default();
    for id in [1, 2, 3] {
        board.toggle(id, &catalog).unwrap();
    }

    let mut gesture = board.begin_reorder().unwrap();
    gesture.move_item(0, 2);
    // Membership changes underneath the drag.
    board.toggle(2, &catalog).unwrap();
    let selected_before = board.selected().to_vec();
    let names_before = names(&board)
        .iter()
        .map(|name| name.to_string())
        .collect::<Vec<_>>();

    assert_eq!(board.commit(gesture), Err(ConcernError::InvalidReorder));
    assert_eq!(board.selected(), selected_before.as_slice());
    assert_eq!(names(&board), names_before.as_slice());
    assert!(board.begin_reorder().is_ok());
}

#[test]
fn out_of_range_moves_are_ignored() {
    let catalog = scenario_catalog();
    let mut board = ConcernBoard::default();
    for id in [1, 2] {
        board.toggle(id, &catalog).unwrap();
    }

    let mut gesture = board.begin_reorder().unwrap();
    assert!(!gesture.move_item(5, 0));
    assert!(!gesture.move_item(0, 5));
    assert_eq!(gesture.order(), &[1, 2]);
    board.commit(gesture).unwrap();
}
