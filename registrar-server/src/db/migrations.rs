//! Database migrations for registry tables
//!
//! Idempotent: every statement is CREATE .. IF NOT EXISTS, safe to run at
//! every startup.
//!
//! The unique indexes on aadhar_number are the real duplicate guard; the
//! handler layer never does check-then-insert. Deleting a professor
//! nullifies proctor_id on their students; deleting a student cascades to
//! the library membership.

use sqlx::PgPool;

/// Run all registry migrations
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running registry migrations...");

    // Create professors table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS professors (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name TEXT NOT NULL,
            seniority INT NOT NULL,
            aadhar_number TEXT NOT NULL UNIQUE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create students table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS students (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name TEXT NOT NULL,
            date_of_birth DATE NOT NULL,
            aadhar_number TEXT NOT NULL UNIQUE,
            proctor_id UUID REFERENCES professors(id) ON DELETE SET NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create library memberships table (one per student)
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS library_memberships (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            student_id UUID NOT NULL UNIQUE REFERENCES students(id) ON DELETE CASCADE,
            issue_date DATE NOT NULL,
            expiry_date DATE NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    create_indexes(pool).await?;

    tracing::info!("Registry migrations complete");
    Ok(())
}

async fn create_indexes(pool: &PgPool) -> Result<(), sqlx::Error> {
    // Proctorship listing filters on proctor_id
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_students_proctor ON students(proctor_id)")
        .execute(pool)
        .await?;

    // Membership lookups key on student_id (already unique, index for clarity)
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_library_memberships_student ON library_memberships(student_id)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
