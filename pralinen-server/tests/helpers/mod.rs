//! Shared test helpers: a fresh database per test and seed shortcuts

#![allow(dead_code)]

use chrono::Utc;
use pralinen_common::db::{Person, PersonYear, Praline};
use pralinen_server::services;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Fresh database in a temp dir; keep the `TempDir` alive for the test
pub async fn setup_test_db() -> (TempDir, SqlitePool) {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    let pool = pralinen_common::db::init_database(&dir.path().join("pralinen.db"))
        .await
        .expect("Should initialize database");
    (dir, pool)
}

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub async fn create_person(pool: &SqlitePool, first: &str, last: &str) -> Person {
    services::persons::create_person(pool, first, last)
        .await
        .expect("Should create person")
}

pub async fn create_praline(pool: &SqlitePool, year: i64, name: &str) -> Praline {
    services::pralines::create_praline(pool, year, name, None, false, None)
        .await
        .expect("Should create praline")
}

/// Enroll a new person and return their PersonYear
pub async fn enroll(pool: &SqlitePool, year: i64, first: &str, last: &str) -> PersonYear {
    let mut rng = StdRng::from_entropy();
    services::enroll_person(pool, &mut rng, year, first, last)
        .await
        .expect("Should enroll person")
        .person_year
        .expect("Enrollment always has a person year")
}

/// Insert a PersonYear directly, bypassing the generator
pub async fn insert_person_year_raw(
    pool: &SqlitePool,
    person_id: i64,
    year: i32,
    signature: &str,
) -> i64 {
    let now = Utc::now();
    sqlx::query_scalar(
        "INSERT INTO person_years (person_id, year, signature, is_participating, created_at, updated_at) VALUES (?, ?, ?, 1, ?, ?) RETURNING id",
    )
    .bind(person_id)
    .bind(year)
    .bind(signature)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
    .expect("Should insert person year")
}

pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .expect("Should count rows")
}
