use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Room, RoomDraft, RoomRow, dias_semana_json};

const SELECT_ROOM: &str = "SELECT id, unidade, curso, periodo, disciplina, docente, sala_aula, \
     turno, dias_semana, status, created_at, updated_at FROM rooms";

fn validate(draft: &RoomDraft) -> Result<(), AppError> {
    let missing = draft.missing_fields();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation {
            missing: missing.iter().map(|f| f.to_string()).collect(),
        })
    }
}

/// All rooms, newest first. Reads normalize `dias_semana` and `status`.
pub async fn fetch_rooms(db: &SqlitePool) -> Result<Vec<Room>, AppError> {
    let sql = format!("{SELECT_ROOM} ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, RoomRow>(&sql)
        .fetch_all(db)
        .await
        .map_err(AppError::Fetch)?;

    Ok(rows.into_iter().map(RoomRow::into_room).collect())
}

pub async fn find_room_by_id(db: &SqlitePool, id: &str) -> Result<Option<Room>, AppError> {
    let sql = format!("{SELECT_ROOM} WHERE id = ?");
    let row = sqlx::query_as::<_, RoomRow>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::Fetch)?;

    Ok(row.map(RoomRow::into_room))
}

/// Validates, assigns an id and stamps both timestamps, then persists.
pub async fn insert_room(db: &SqlitePool, draft: RoomDraft) -> Result<Room, AppError> {
    validate(&draft)?;

    let id = Uuid::new_v4().to_string();
    let now = Utc::now();
    let dias = dias_semana_json(&draft.dias_semana);

    sqlx::query(
        "INSERT INTO rooms \
         (id, unidade, curso, periodo, disciplina, docente, sala_aula, \
          turno, dias_semana, status, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&draft.unidade)
    .bind(&draft.curso)
    .bind(&draft.periodo)
    .bind(&draft.disciplina)
    .bind(&draft.docente)
    .bind(&draft.sala_aula)
    .bind(draft.turno.as_str())
    .bind(&dias)
    .bind(draft.status)
    .bind(now)
    .bind(now)
    .execute(db)
    .await
    .map_err(AppError::Write)?;

    Ok(Room {
        id,
        unidade: draft.unidade,
        curso: draft.curso,
        periodo: draft.periodo,
        disciplina: draft.disciplina,
        docente: draft.docente,
        sala_aula: draft.sala_aula,
        turno: draft.turno,
        dias_semana: draft.dias_semana,
        status: draft.status,
        created_at: now,
        updated_at: now,
    })
}

/// Full-record replace. `created_at` is preserved, `updated_at` re-stamped.
pub async fn update_room(db: &SqlitePool, id: &str, draft: RoomDraft) -> Result<Room, AppError> {
    validate(&draft)?;

    let now = Utc::now();
    let dias = dias_semana_json(&draft.dias_semana);

    let result = sqlx::query(
        "UPDATE rooms SET unidade = ?, curso = ?, periodo = ?, disciplina = ?, \
         docente = ?, sala_aula = ?, turno = ?, dias_semana = ?, status = ?, \
         updated_at = ? WHERE id = ?",
    )
    .bind(&draft.unidade)
    .bind(&draft.curso)
    .bind(&draft.periodo)
    .bind(&draft.disciplina)
    .bind(&draft.docente)
    .bind(&draft.sala_aula)
    .bind(draft.turno.as_str())
    .bind(&dias)
    .bind(draft.status)
    .bind(now)
    .bind(id)
    .execute(db)
    .await
    .map_err(AppError::Write)?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    find_room_by_id(db, id).await?.ok_or(AppError::NotFound)
}

/// Status toggle: touches only `status` and `updated_at`, no draft validation.
/// Returns the stamped `updated_at` so the caller can build the feed patch.
pub async fn update_room_status(
    db: &SqlitePool,
    id: &str,
    status: bool,
) -> Result<DateTime<Utc>, AppError> {
    let now = Utc::now();

    let result = sqlx::query("UPDATE rooms SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status)
        .bind(now)
        .bind(id)
        .execute(db)
        .await
        .map_err(AppError::Write)?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(now)
}

/// Deleting an id that no longer exists is a success (idempotent).
pub async fn delete_room(db: &SqlitePool, id: &str) -> Result<(), AppError> {
    sqlx::query("DELETE FROM rooms WHERE id = ?")
        .bind(id)
        .execute(db)
        .await
        .map_err(AppError::Write)?;

    Ok(())
}
