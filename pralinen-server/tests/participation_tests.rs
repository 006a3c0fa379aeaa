//! Integration tests for participation toggling and enrollment

mod helpers;

use helpers::*;
use pralinen_common::{generate_signature, Error};
use pralinen_server::services::{self, ParticipationOutcome};
use rand::rngs::mock::StepRng;

#[tokio::test]
async fn test_enable_twice_yields_one_row_with_same_signature() {
    let (_dir, pool) = setup_test_db().await;
    let person = create_person(&pool, "Max", "Schmidt").await;
    let mut rng = seeded_rng(1);

    for year in [2021, 2024, 2050] {
        let first = services::set_participation(&pool, &mut rng, person.id, year, true)
            .await
            .unwrap();
        let second = services::set_participation(&pool, &mut rng, person.id, year, true)
            .await
            .unwrap();

        assert!(matches!(first, ParticipationOutcome::Created(_)));
        assert!(matches!(second, ParticipationOutcome::Updated(_)));

        let (a, b) = (first.person_year().unwrap(), second.person_year().unwrap());
        assert_eq!(a.id, b.id);
        assert_eq!(a.signature, b.signature);
        assert!(b.is_participating);
    }

    assert_eq!(count_rows(&pool, "person_years").await, 3);
}

#[tokio::test]
async fn test_disable_keeps_record_and_signature() {
    let (_dir, pool) = setup_test_db().await;
    let person = create_person(&pool, "Lisa", "Weber").await;
    let mut rng = seeded_rng(2);

    let enabled = services::set_participation(&pool, &mut rng, person.id, 2024, true)
        .await
        .unwrap();
    let disabled = services::set_participation(&pool, &mut rng, person.id, 2024, false)
        .await
        .unwrap();

    let (before, after) = (enabled.person_year().unwrap(), disabled.person_year().unwrap());
    assert_eq!(before.id, after.id);
    assert_eq!(before.signature, after.signature);
    assert!(!after.is_participating);
    assert!(after.updated_at >= before.updated_at);

    // re-enabling reuses the same record
    let again = services::set_participation(&pool, &mut rng, person.id, 2024, true)
        .await
        .unwrap();
    assert_eq!(again.person_year().unwrap().id, before.id);
    assert!(again.person_year().unwrap().is_participating);
}

#[tokio::test]
async fn test_disable_without_record_is_noop() {
    let (_dir, pool) = setup_test_db().await;
    let person = create_person(&pool, "Tom", "Fischer").await;

    let outcome = services::set_participation(&pool, &mut seeded_rng(3), person.id, 2024, false)
        .await
        .unwrap();

    assert!(matches!(outcome, ParticipationOutcome::Unchanged { .. }));
    assert_eq!(count_rows(&pool, "person_years").await, 0);

    let json = serde_json::to_value(&outcome).unwrap();
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn test_year_range_checked_first() {
    let (_dir, pool) = setup_test_db().await;

    // unknown person, but the range violation wins
    for year in [2020, 2051, 0] {
        let result = services::set_participation(&pool, &mut seeded_rng(4), 999, year, true).await;
        assert!(matches!(result, Err(Error::InvalidRange { .. })));
    }
}

#[tokio::test]
async fn test_unknown_person_not_found() {
    let (_dir, pool) = setup_test_db().await;

    let result = services::set_participation(&pool, &mut seeded_rng(5), 999, 2024, true).await;
    assert!(matches!(result, Err(Error::NotFound(_))));
    assert_eq!(count_rows(&pool, "person_years").await, 0);
}

#[tokio::test]
async fn test_signature_collision_is_retried() {
    let (_dir, pool) = setup_test_db().await;
    let holder = create_person(&pool, "Sarah", "Wagner").await;
    let person = create_person(&pool, "Felix", "Becker").await;

    // occupy the first signature the seeded source will produce
    let taken = generate_signature(&mut seeded_rng(42));
    insert_person_year_raw(&pool, holder.id, 2024, taken.as_str()).await;

    let outcome = services::set_participation(&pool, &mut seeded_rng(42), person.id, 2024, true)
        .await
        .unwrap();

    let person_year = outcome.person_year().unwrap();
    assert_ne!(person_year.signature, taken.as_str());
    assert_eq!(person_year.person_id, person.id);
    assert_eq!(count_rows(&pool, "person_years").await, 2);
}

#[tokio::test]
async fn test_same_signature_allowed_in_other_year() {
    let (_dir, pool) = setup_test_db().await;
    let holder = create_person(&pool, "Emma", "Schulz").await;
    let person = create_person(&pool, "Lukas", "Hoffmann").await;

    let first = generate_signature(&mut seeded_rng(9));
    insert_person_year_raw(&pool, holder.id, 2023, first.as_str()).await;

    let outcome = services::set_participation(&pool, &mut seeded_rng(9), person.id, 2024, true)
        .await
        .unwrap();
    assert_eq!(outcome.person_year().unwrap().signature, first.as_str());
}

#[tokio::test]
async fn test_persistent_collision_reports_conflict() {
    let (_dir, pool) = setup_test_db().await;
    let holder = create_person(&pool, "Mia", "Koch").await;
    let person = create_person(&pool, "Noah", "Richter").await;

    // an all-zero source always draws "aaaaaa"
    let mut stuck = StepRng::new(0, 0);
    let stuck_signature = generate_signature(&mut StepRng::new(0, 0));
    insert_person_year_raw(&pool, holder.id, 2024, stuck_signature.as_str()).await;

    let result = services::set_participation(&pool, &mut stuck, person.id, 2024, true).await;
    assert!(matches!(result, Err(Error::ConflictUnique(_))));
    assert_eq!(count_rows(&pool, "person_years").await, 1);
}

#[tokio::test]
async fn test_concurrent_enable_creates_single_row() {
    let (_dir, pool) = setup_test_db().await;
    let person = create_person(&pool, "Sophie", "Bauer").await;

    let mut rng_a = seeded_rng(100);
    let mut rng_b = seeded_rng(200);
    let (a, b) = tokio::join!(
        services::set_participation(&pool, &mut rng_a, person.id, 2025, true),
        services::set_participation(&pool, &mut rng_b, person.id, 2025, true),
    );

    let (a, b) = (a.unwrap(), b.unwrap());
    let created = [&a, &b]
        .iter()
        .filter(|o| matches!(o, ParticipationOutcome::Created(_)))
        .count();
    let updated = [&a, &b]
        .iter()
        .filter(|o| matches!(o, ParticipationOutcome::Updated(_)))
        .count();
    assert_eq!((created, updated), (1, 1));
    assert_eq!(a.person_year().unwrap().id, b.person_year().unwrap().id);
    assert_eq!(
        a.person_year().unwrap().signature,
        b.person_year().unwrap().signature
    );
    assert_eq!(count_rows(&pool, "person_years").await, 1);
}

#[tokio::test]
async fn test_enrollment_creates_person_and_person_year() {
    let (_dir, pool) = setup_test_db().await;

    let enrolled = services::enroll_person(&pool, &mut seeded_rng(6), 2024, " Anna ", "Müller")
        .await
        .unwrap();

    assert!(enrolled.has_person_year);
    assert_eq!(enrolled.person.first_name, "Anna");
    let person_year = enrolled.person_year.unwrap();
    assert_eq!(person_year.person_id, enrolled.person.id);
    assert_eq!(person_year.year, 2024);
    assert!(person_year.is_participating);
    assert_eq!(person_year.signature.len(), 6);
}

#[tokio::test]
async fn test_enrollment_validation_leaves_no_rows() {
    let (_dir, pool) = setup_test_db().await;

    let result = services::enroll_person(&pool, &mut seeded_rng(7), 2019, "Ben", "Neumann").await;
    assert!(matches!(result, Err(Error::InvalidRange { year: 2019 })));

    let result = services::enroll_person(&pool, &mut seeded_rng(7), 2024, "", "Neumann").await;
    assert!(matches!(result, Err(Error::InvalidField { field: "firstName", .. })));

    assert_eq!(count_rows(&pool, "persons").await, 0);
}

#[tokio::test]
async fn test_failed_enrollment_rolls_back_person() {
    let (_dir, pool) = setup_test_db().await;
    let holder = create_person(&pool, "Lena", "Schwarz").await;

    let stuck_signature = generate_signature(&mut StepRng::new(0, 0));
    insert_person_year_raw(&pool, holder.id, 2024, stuck_signature.as_str()).await;

    let result =
        services::enroll_person(&pool, &mut StepRng::new(0, 0), 2024, "Leon", "Klein").await;
    assert!(matches!(result, Err(Error::ConflictUnique(_))));

    // only the holder remains
    assert_eq!(count_rows(&pool, "persons").await, 1);
    assert_eq!(count_rows(&pool, "person_years").await, 1);
}

#[tokio::test]
async fn test_persons_for_year_left_join() {
    let (_dir, pool) = setup_test_db().await;
    let enrolled = enroll(&pool, 2024, "Hannah", "Wolf").await;
    let outsider = create_person(&pool, "Ben", "Neumann").await;

    let rows = services::persons::persons_for_year(&pool, 2024).await.unwrap();
    assert_eq!(rows.len(), 2);

    let with = rows.iter().find(|r| r.person.id == enrolled.person_id).unwrap();
    assert!(with.has_person_year);
    assert_eq!(with.person_year.as_ref().unwrap().id, enrolled.id);

    let without = rows.iter().find(|r| r.person.id == outsider.id).unwrap();
    assert!(!without.has_person_year);
    assert!(without.person_year.is_none());

    // other years see nobody enrolled
    let rows = services::persons::persons_for_year(&pool, 2025).await.unwrap();
    assert!(rows.iter().all(|r| r.person_year.is_none()));
}
