//! Demo-data seeding: fake teachers, classes and enrolled students.

use anyhow::Context;
use chrono::NaiveDate;
use fake::Fake;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use rand::Rng;
use sqlx::PgPool;
use uuid::Uuid;

const GENDERS: &[&str] = &["male", "female", "other"];

pub struct SeedConfig {
    pub classes: usize,
    pub teachers: usize,
    pub students_per_class: usize,
}

fn random_dob(rng: &mut impl Rng, min_year: i32, max_year: i32) -> NaiveDate {
    let year = rng.gen_range(min_year..=max_year);
    let month = rng.gen_range(1..=12);
    let day = rng.gen_range(1..=28);
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Seeds teachers, classes (each assigned a teacher round-robin) and
/// students spread evenly across the classes.
pub async fn seed(pool: &PgPool, config: SeedConfig) -> anyhow::Result<()> {
    let mut rng = rand::thread_rng();

    let mut teacher_ids = Vec::with_capacity(config.teachers);
    for _ in 0..config.teachers {
        let name: String = Name().fake();
        let contact: String = PhoneNumber().fake();
        let gender = GENDERS[rng.gen_range(0..GENDERS.len())];
        let salary: f64 = rng.gen_range(30_000.0..80_000.0);
        let dob = random_dob(&mut rng, 1960, 1995);

        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO teachers (name, gender, dob, contact_details, salary)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(&name)
        .bind(gender)
        .bind(dob)
        .bind(&contact)
        .bind(salary)
        .fetch_one(pool)
        .await
        .context("Failed to seed teacher")?;

        teacher_ids.push(id);
    }
    println!("Seeded {} teachers", teacher_ids.len());

    let mut class_ids = Vec::with_capacity(config.classes);
    for i in 0..config.classes {
        let name = format!("{}{}", i / 3 + 1, ['A', 'B', 'C'][i % 3]);
        let teacher_id = teacher_ids.get(i % teacher_ids.len().max(1)).copied();
        let student_fees: f64 = rng.gen_range(500.0..2_000.0);

        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO classes (name, year, teacher_id, student_fees)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(&name)
        .bind(2024_i32)
        .bind(teacher_id)
        .bind(student_fees)
        .fetch_one(pool)
        .await
        .context("Failed to seed class")?;

        class_ids.push(id);
    }
    println!("Seeded {} classes", class_ids.len());

    let mut student_count = 0usize;
    for &class_id in &class_ids {
        for _ in 0..config.students_per_class {
            let name: String = Name().fake();
            let contact: String = PhoneNumber().fake();
            let gender = GENDERS[rng.gen_range(0..GENDERS.len())];
            let fees_paid: f64 = rng.gen_range(0.0..2_000.0);
            let dob = random_dob(&mut rng, 2008, 2018);

            sqlx::query(
                "INSERT INTO students (name, gender, dob, contact_details, fees_paid, class_id)
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(&name)
            .bind(gender)
            .bind(dob)
            .bind(&contact)
            .bind(fees_paid)
            .bind(class_id)
            .execute(pool)
            .await
            .context("Failed to seed student")?;

            student_count += 1;
        }
    }
    println!("Seeded {} students", student_count);

    Ok(())
}
