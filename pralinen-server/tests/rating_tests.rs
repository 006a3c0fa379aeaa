//! Integration tests for the anonymous rating flow: session resolution,
//! rating upserts and respondent feedback

mod helpers;

use helpers::*;
use pralinen_common::Error;
use pralinen_server::services::{self, FeedbackUpdate, Progress, RatingAction};

#[tokio::test]
async fn test_rating_walkthrough() {
    let (_dir, pool) = setup_test_db().await;
    let anna = enroll(&pool, 2024, "Anna", "Müller").await;

    let session = services::resolve_session(&pool, &anna.signature).await.unwrap();
    assert_eq!(session.person.first_name, "Anna");
    assert_eq!(session.person_year.id, anna.id);
    assert!(session.pralines.is_empty());
    assert!(session.ratings.is_empty());
    assert_eq!(session.progress, Progress::new(0, 0));

    let nougat = create_praline(&pool, 2024, "Nougat").await;
    create_praline(&pool, 2023, "Marzipan").await;

    let session = services::resolve_session(&pool, &anna.signature).await.unwrap();
    assert_eq!(session.pralines.len(), 1);
    assert_eq!(
        session.progress,
        Progress {
            total: 1,
            rated: 0,
            percentage: 0
        }
    );

    let upsert = services::submit_rating(&pool, &anna.signature, nougat.id, 4, Some("Sehr lecker"))
        .await
        .unwrap();
    assert_eq!(upsert.action, RatingAction::Created);
    assert_eq!(upsert.rating.rating, 4);
    assert_eq!(upsert.rating.comment.as_deref(), Some("Sehr lecker"));
    assert_eq!(upsert.rating.person_year_id, anna.id);

    let session = services::resolve_session(&pool, &anna.signature).await.unwrap();
    assert_eq!(
        session.progress,
        Progress {
            total: 1,
            rated: 1,
            percentage: 100
        }
    );
    assert_eq!(session.ratings[&nougat.id].rating, 4);
}

#[tokio::test]
async fn test_second_submission_updates() {
    let (_dir, pool) = setup_test_db().await;
    let respondent = enroll(&pool, 2024, "Paul", "Zimmermann").await;
    let praline = create_praline(&pool, 2024, "Trüffel").await;

    let first = services::submit_rating(&pool, &respondent.signature, praline.id, 2, Some("zu süß"))
        .await
        .unwrap();
    let second = services::submit_rating(&pool, &respondent.signature, praline.id, 5, None)
        .await
        .unwrap();

    assert_eq!(first.action, RatingAction::Created);
    assert_eq!(second.action, RatingAction::Updated);
    assert_eq!(second.rating.id, first.rating.id);
    assert_eq!(second.rating.rating, 5);
    assert_eq!(second.rating.comment, None);
    assert_eq!(second.rating.created_at, first.rating.created_at);
    assert_eq!(count_rows(&pool, "ratings").await, 1);
}

#[tokio::test]
async fn test_concurrent_submissions_converge() {
    let (_dir, pool) = setup_test_db().await;
    let respondent = enroll(&pool, 2024, "Clara", "Krüger").await;
    let praline = create_praline(&pool, 2024, "Krokant").await;

    let (a, b) = tokio::join!(
        services::submit_rating(&pool, &respondent.signature, praline.id, 3, None),
        services::submit_rating(&pool, &respondent.signature, praline.id, 5, None),
    );

    let (a, b) = (a.unwrap(), b.unwrap());
    assert_eq!(a.rating.id, b.rating.id);
    let mut actions = vec![a.action, b.action];
    actions.sort_by_key(|action| *action == RatingAction::Updated);
    assert_eq!(actions, vec![RatingAction::Created, RatingAction::Updated]);
    assert_eq!(count_rows(&pool, "ratings").await, 1);
}

#[tokio::test]
async fn test_praline_from_other_year_rejected() {
    let (_dir, pool) = setup_test_db().await;
    let respondent = enroll(&pool, 2024, "Jonas", "Hartmann").await;
    let other_year = create_praline(&pool, 2023, "Praliné").await;

    let result = services::submit_rating(&pool, &respondent.signature, other_year.id, 4, None).await;
    assert!(matches!(
        result,
        Err(Error::PralineYearMismatch { year: 2024, .. })
    ));

    // unknown praline ids are treated the same way
    let result = services::submit_rating(&pool, &respondent.signature, 9999, 4, None).await;
    assert!(matches!(result, Err(Error::PralineYearMismatch { .. })));

    assert_eq!(count_rows(&pool, "ratings").await, 0);
}

#[tokio::test]
async fn test_invalid_inputs_rejected() {
    let (_dir, pool) = setup_test_db().await;
    let respondent = enroll(&pool, 2024, "Marie", "Lange").await;
    let praline = create_praline(&pool, 2024, "Nougat").await;

    for bad in ["", "abc", "abcdefg", "abcde12"] {
        assert!(matches!(
            services::resolve_session(&pool, bad).await,
            Err(Error::InvalidSignature)
        ));
        assert!(matches!(
            services::submit_rating(&pool, bad, praline.id, 3, None).await,
            Err(Error::InvalidSignature)
        ));
    }

    for stars in [0, 6, -1] {
        assert!(matches!(
            services::submit_rating(&pool, &respondent.signature, praline.id, stars, None).await,
            Err(Error::InvalidRating { .. })
        ));
    }

    let long_comment = "x".repeat(501);
    assert!(matches!(
        services::submit_rating(&pool, &respondent.signature, praline.id, 3, Some(&long_comment))
            .await,
        Err(Error::InvalidField { field: "comment", .. })
    ));

    assert_eq!(count_rows(&pool, "ratings").await, 0);
}

#[tokio::test]
async fn test_unknown_signature_not_found() {
    let (_dir, pool) = setup_test_db().await;

    assert!(matches!(
        services::resolve_session(&pool, "zzzzzz").await,
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        services::submit_rating(&pool, "zzzzzz", 1, 3, None).await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn test_resolve_session_is_read_only() {
    let (_dir, pool) = setup_test_db().await;
    let respondent = enroll(&pool, 2024, "Elias", "Schmitz").await;

    services::resolve_session(&pool, &respondent.signature).await.unwrap();
    let _ = services::resolve_session(&pool, "nosuch").await;

    assert_eq!(count_rows(&pool, "person_years").await, 1);
    assert_eq!(count_rows(&pool, "ratings").await, 0);
}

#[tokio::test]
async fn test_signature_in_two_years_resolves_latest() {
    let (_dir, pool) = setup_test_db().await;
    let older = create_person(&pool, "Ida", "Braun").await;
    let newer = create_person(&pool, "Karl", "Zimmer").await;
    insert_person_year_raw(&pool, older.id, 2023, "abc123").await;
    let newer_id = insert_person_year_raw(&pool, newer.id, 2024, "abc123").await;

    let session = services::resolve_session(&pool, "abc123").await.unwrap();
    assert_eq!(session.person_year.id, newer_id);
    assert_eq!(session.person.id, newer.id);
}

#[tokio::test]
async fn test_disabled_respondent_keeps_session() {
    let (_dir, pool) = setup_test_db().await;
    let respondent = enroll(&pool, 2024, "Frieda", "Vogel").await;
    let praline = create_praline(&pool, 2024, "Nougat").await;
    services::submit_rating(&pool, &respondent.signature, praline.id, 4, None)
        .await
        .unwrap();

    services::set_participation(&pool, &mut seeded_rng(1), respondent.person_id, 2024, false)
        .await
        .unwrap();

    let session = services::resolve_session(&pool, &respondent.signature).await.unwrap();
    assert!(!session.person_year.is_participating);
    assert_eq!(session.progress.rated, 1);
}

#[tokio::test]
async fn test_feedback_overwrites_all_fields() {
    let (_dir, pool) = setup_test_db().await;
    let respondent = enroll(&pool, 2024, "Greta", "Schulze").await;
    let praline = create_praline(&pool, 2024, "Nougat").await;

    let updated = services::update_feedback(
        &pool,
        &respondent.signature,
        &FeedbackUpdate {
            favorite_chocolate_id: Some(praline.id),
            general_feedback: Some("Tolle Auswahl".to_string()),
            allergies: Some("Haselnuss".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.favorite_chocolate_id, Some(praline.id));
    assert_eq!(updated.general_feedback.as_deref(), Some("Tolle Auswahl"));
    assert_eq!(updated.allergies.as_deref(), Some("Haselnuss"));

    // fields left out are cleared
    let updated = services::update_feedback(
        &pool,
        &respondent.signature,
        &FeedbackUpdate {
            allergies: Some("  ".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.favorite_chocolate_id, None);
    assert_eq!(updated.general_feedback, None);
    assert_eq!(updated.allergies, None);
    assert_eq!(updated.signature, respondent.signature);
}

#[tokio::test]
async fn test_favorite_from_other_year_rejected() {
    let (_dir, pool) = setup_test_db().await;
    let respondent = enroll(&pool, 2024, "Oskar", "Lehmann").await;
    let other_year = create_praline(&pool, 2025, "Marzipan").await;

    let result = services::update_feedback(
        &pool,
        &respondent.signature,
        &FeedbackUpdate {
            favorite_chocolate_id: Some(other_year.id),
            general_feedback: Some("bleibt nicht".to_string()),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(result, Err(Error::FavoriteYearMismatch { .. })));

    let session = services::resolve_session(&pool, &respondent.signature).await.unwrap();
    assert_eq!(session.person_year.general_feedback, None);
}
