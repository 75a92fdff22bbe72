use intake_spec::{
    AlcoholBand, AllergyList, ApplyOutcome, DietSelection, FormState, FormStore, FormUpdate,
    ReferenceCatalog, Step, ToggleOutcome, YesNo, counters, next_step, step_complete,
};

#[test]
fn none_clears_every_other_diet() {
    let mut diets = DietSelection::default();
    diets.toggle("Vegan");
    diets.toggle("Ketogenic");
    diets.toggle("None");
    assert_eq!(diets.names(), &["None"]);
}

#[test]
fn any_diet_clears_none() {
    let mut diets = DietSelection::default();
    diets.toggle("None");
    diets.toggle("Vegan");
    assert_eq!(diets.names(), &["Vegan"]);
}

#[test]
fn reselecting_a_diet_removes_it() {
    let mut diets = DietSelection::default();
    diets.toggle("Vegan");
    diets.toggle("Paleo");
    diets.toggle("Vegan");
    assert_eq!(diets.names(), &["Paleo"]);
}

#[test]
fn reselecting_none_keeps_it() {
    let mut diets = DietSelection::default();
    diets.toggle("None");
    diets.toggle("None");
    assert_eq!(diets.names(), &["None"]);
}

#[test]
fn allergy_add_trims_and_deduplicates() {
    let mut allergies = AllergyList::default();
    assert!(allergies.add("  Milk "));
    assert!(!allergies.add("Milk"));
    assert!(!allergies.add("   "));
    // Case-sensitive: a different casing is a different entry.
    assert!(allergies.add("milk"));
    assert_eq!(allergies.names(), &["Milk", "milk"]);
}

#[test]
fn allergy_remove_matches_exact_strings() {
    let mut allergies = AllergyList::default();
    allergies.add("Milk");
    allergies.add("Eggs");
    assert!(!allergies.remove("milk"));
    assert!(allergies.remove("Milk"));
    assert_eq!(allergies.names(), &["Eggs"]);
}

#[test]
fn trailing_delimiter_commits_the_token() {
    let mut allergies = AllergyList::default();
    let intake = allergies.push_text("Milk,");
    assert_eq!(intake.committed, ["Milk"]);
    assert!(intake.pending.is_empty());
    assert_eq!(allergies.names(), &["Milk"]);
}

#[test]
fn unterminated_text_stays_pending() {
    let mut allergies = AllergyList::default();
    let intake = allergies.push_text("Mil");
    assert!(intake.committed.is_empty());
    assert_eq!(intake.pending, "Mil");
    assert!(allergies.is_empty());
}

#[test]
fn pasted_text_commits_each_token_in_order() {
    let mut allergies = AllergyList::default();
    let intake = allergies.push_text("Milk, Eggs Soy,");
    assert_eq!(intake.committed, ["Milk", "Eggs", "Soy"]);
    assert!(intake.pending.is_empty());
    assert_eq!(allergies.names(), &["Milk", "Eggs", "Soy"]);
}

#[test]
fn pasted_text_keeps_the_last_unterminated_token_pending() {
    let mut allergies = AllergyList::default();
    let intake = allergies.push_text("Milk,Egg");
    assert_eq!(intake.committed, ["Milk"]);
    assert_eq!(intake.pending, "Egg");
    assert_eq!(allergies.names(), &["Milk"]);
}

#[test]
fn duplicate_tokens_are_not_recommitted() {
    let mut allergies = AllergyList::default();
    allergies.add("Milk");
    let intake = allergies.push_text("Milk, Eggs,");
    assert_eq!(intake.committed, ["Eggs"]);
    assert_eq!(allergies.names(), &["Milk", "Eggs"]);
}

#[test]
fn store_routes_updates_to_the_right_fields() {
    let catalog = ReferenceCatalog::bundled().unwrap();
    let mut store = FormStore::new(&catalog);

    let outcome = store
        .apply(FormUpdate::ToggleConcern { id: 1 })
        .unwrap();
    assert_eq!(outcome, ApplyOutcome::Toggle(ToggleOutcome::Added));

    store.apply(FormUpdate::ToggleDiet { name: "Vegan".into() }).unwrap();
    store
        .apply(FormUpdate::SetSunExposure { answer: YesNo::Yes })
        .unwrap();
    store.apply(FormUpdate::SetSmoking { answer: YesNo::No }).unwrap();
    store
        .apply(FormUpdate::SetAlcohol { band: AlcoholBand::FivePlus })
        .unwrap();

    let state = store.state();
    assert_eq!(state.concerns.selected(), &[1]);
    assert_eq!(state.diets.names(), &["Vegan"]);
    assert_eq!(state.sun_exposure, Some(YesNo::Yes));
    assert_eq!(state.smoking, Some(YesNo::No));
    assert_eq!(state.alcohol, Some(AlcoholBand::FivePlus));
}

#[test]
fn store_reports_pending_text_from_allergy_input() {
    let catalog = ReferenceCatalog::bundled().unwrap();
    let mut store = FormStore::new(&catalog);

    let outcome = store
        .apply(FormUpdate::AllergyText {
            text: "Milk, Egg".into(),
        })
        .unwrap();
    let ApplyOutcome::Text(intake) = outcome else {
        panic!("allergy text should report an intake");
    };
    assert_eq!(intake.committed, ["Milk"]);
    assert_eq!(intake.pending, "Egg");

    store
        .apply(FormUpdate::AddAllergy { name: intake.pending })
        .unwrap();
    store
        .apply(FormUpdate::RemoveAllergy { name: "Milk".into() })
        .unwrap();
    assert_eq!(store.state().allergies.names(), &["Egg"]);
}

#[test]
fn store_propagates_engine_errors() {
    let catalog = ReferenceCatalog::bundled().unwrap();
    let mut store = FormStore::new(&catalog);
    assert!(store.apply(FormUpdate::ToggleConcern { id: 999 }).is_err());
    assert!(
        store
            .apply(FormUpdate::ReorderConcerns { order: vec![1] })
            .is_err()
    );
}

#[test]
fn next_step_walks_the_gated_screens_in_order() {
    let catalog = ReferenceCatalog::bundled().unwrap();
    let mut form = FormState::default();
    assert_eq!(next_step(&form), Some(Step::HealthConcerns));

    form.concerns.toggle(1, &catalog).unwrap();
    assert_eq!(next_step(&form), Some(Step::DietSelection));

    form.diets.toggle("None");
    assert_eq!(next_step(&form), Some(Step::Questionnaire));

    form.sun_exposure = Some(YesNo::No);
    form.smoking = Some(YesNo::No);
    assert_eq!(next_step(&form), Some(Step::Questionnaire));

    form.alcohol = Some(AlcoholBand::ZeroToOne);
    assert_eq!(next_step(&form), None);
}

#[test]
fn allergies_never_gate_progress() {
    let form = FormState::default();
    assert!(step_complete(&form, Step::Allergies));
    assert!(step_complete(&form, Step::Welcome));
    assert!(!step_complete(&form, Step::Summary));
}

#[test]
fn counters_track_answered_screens() {
    let catalog = ReferenceCatalog::bundled().unwrap();
    let mut form = FormState::default();
    // Allergies is optional and counts as answered from the start.
    assert_eq!(counters(&form).answered, 1);
    assert_eq!(counters(&form).total, 4);

    form.concerns.toggle(1, &catalog).unwrap();
    form.diets.toggle("Vegan");
    assert_eq!(counters(&form).answered, 3);

    form.sun_exposure = Some(YesNo::Yes);
    form.smoking = Some(YesNo::No);
    form.alcohol = Some(AlcoholBand::TwoToFive);
    assert_eq!(counters(&form).answered, 4);
}

#[test]
fn catalog_normalizes_the_diet_list() {
    let catalog = ReferenceCatalog::bundled().unwrap();
    let diets = catalog.diets();
    assert_eq!(diets[0].name, "None");
    assert_eq!(diets[0].id, 0);
    assert!(diets.iter().any(|diet| diet.name == "Vegetarian"));
    assert!(diets.iter().all(|diet| diet.name != "Vegaterian"));
}

#[test]
fn catalog_lookups_resolve_by_id_and_name() {
    let catalog = ReferenceCatalog::bundled().unwrap();
    assert_eq!(catalog.concern(1).map(|c| c.name.as_str()), Some("Sleep"));
    assert!(catalog.concern(999).is_none());
    assert_eq!(
        catalog.allergy_by_name("Milk").map(|a| a.id),
        Some(1)
    );
    assert!(catalog.allergy_by_name("milk").is_none());
    assert!(catalog.diet_by_name("None").is_some());
}
