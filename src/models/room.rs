use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Daily time band a room schedule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turno {
    Matutino,
    Vespertino,
    Noturno,
}

impl Turno {
    pub const ALL: [Turno; 3] = [Turno::Matutino, Turno::Vespertino, Turno::Noturno];

    pub fn as_str(self) -> &'static str {
        match self {
            Turno::Matutino => "Matutino",
            Turno::Vespertino => "Vespertino",
            Turno::Noturno => "Noturno",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Matutino" => Some(Turno::Matutino),
            "Vespertino" => Some(Turno::Vespertino),
            "Noturno" => Some(Turno::Noturno),
            _ => None,
        }
    }
}

/// Localized weekday names. `Domingo` exists for the time-context mapping;
/// schedules themselves normally carry Segunda..Sábado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weekday {
    Domingo,
    Segunda,
    #[serde(rename = "Terça")]
    Terca,
    Quarta,
    Quinta,
    Sexta,
    #[serde(rename = "Sábado")]
    Sabado,
}

impl Weekday {
    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Domingo => "Domingo",
            Weekday::Segunda => "Segunda",
            Weekday::Terca => "Terça",
            Weekday::Quarta => "Quarta",
            Weekday::Quinta => "Quinta",
            Weekday::Sexta => "Sexta",
            Weekday::Sabado => "Sábado",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub unidade: String,
    pub curso: String,
    pub periodo: String,
    pub disciplina: String,
    pub docente: String,
    pub sala_aula: String,
    pub turno: Turno,
    pub dias_semana: Vec<Weekday>,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update request body. `id` and timestamps are store-assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDraft {
    pub unidade: String,
    pub curso: String,
    pub periodo: String,
    pub disciplina: String,
    pub docente: String,
    pub sala_aula: String,
    pub turno: Turno,
    #[serde(default)]
    pub dias_semana: Vec<Weekday>,
    #[serde(default)]
    pub status: bool,
}

impl RoomDraft {
    /// Field names that are required but empty. `dias_semana` must be
    /// non-empty on create/update even though reads normalize it to `[]`.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.unidade.trim().is_empty() {
            missing.push("unidade");
        }
        if self.curso.trim().is_empty() {
            missing.push("curso");
        }
        if self.periodo.trim().is_empty() {
            missing.push("periodo");
        }
        if self.disciplina.trim().is_empty() {
            missing.push("disciplina");
        }
        if self.docente.trim().is_empty() {
            missing.push("docente");
        }
        if self.sala_aula.trim().is_empty() {
            missing.push("sala_aula");
        }
        if self.dias_semana.is_empty() {
            missing.push("dias_semana");
        }
        missing
    }
}

/// Partial room mutation carried by change-feed `Update` events.
/// Absent fields leave the old record untouched on merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomPatch {
    pub id: String,
    pub unidade: Option<String>,
    pub curso: Option<String>,
    pub periodo: Option<String>,
    pub disciplina: Option<String>,
    pub docente: Option<String>,
    pub sala_aula: Option<String>,
    pub turno: Option<Turno>,
    pub dias_semana: Option<Vec<Weekday>>,
    pub status: Option<bool>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl RoomPatch {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            unidade: None,
            curso: None,
            periodo: None,
            disciplina: None,
            docente: None,
            sala_aula: None,
            turno: None,
            dias_semana: None,
            status: None,
            updated_at: None,
        }
    }

    /// Full patch for a full-record replace (edit form echo).
    pub fn from_room(room: &Room) -> Self {
        Self {
            id: room.id.clone(),
            unidade: Some(room.unidade.clone()),
            curso: Some(room.curso.clone()),
            periodo: Some(room.periodo.clone()),
            disciplina: Some(room.disciplina.clone()),
            docente: Some(room.docente.clone()),
            sala_aula: Some(room.sala_aula.clone()),
            turno: Some(room.turno),
            dias_semana: Some(room.dias_semana.clone()),
            status: Some(room.status),
            updated_at: Some(room.updated_at),
        }
    }

    /// Patch for the status-toggle write, which touches nothing else.
    pub fn status_only(id: impl Into<String>, status: bool, updated_at: DateTime<Utc>) -> Self {
        Self {
            status: Some(status),
            updated_at: Some(updated_at),
            ..Self::new(id)
        }
    }

    /// Shallow merge into an existing record: present fields win,
    /// absent fields are preserved. `id` and `created_at` never change.
    pub fn apply(&self, room: &mut Room) {
        if let Some(v) = &self.unidade {
            room.unidade = v.clone();
        }
        if let Some(v) = &self.curso {
            room.curso = v.clone();
        }
        if let Some(v) = &self.periodo {
            room.periodo = v.clone();
        }
        if let Some(v) = &self.disciplina {
            room.disciplina = v.clone();
        }
        if let Some(v) = &self.docente {
            room.docente = v.clone();
        }
        if let Some(v) = &self.sala_aula {
            room.sala_aula = v.clone();
        }
        if let Some(v) = self.turno {
            room.turno = v;
        }
        if let Some(v) = &self.dias_semana {
            room.dias_semana = v.clone();
        }
        if let Some(v) = self.status {
            room.status = v;
        }
        if let Some(v) = self.updated_at {
            room.updated_at = v;
        }
    }
}

/// Raw persisted row. `dias_semana` is a JSON text column and `status` an
/// integer; [`RoomRow::into_room`] normalizes both.
#[derive(Debug, FromRow)]
pub struct RoomRow {
    pub id: String,
    pub unidade: String,
    pub curso: String,
    pub periodo: String,
    pub disciplina: String,
    pub docente: String,
    pub sala_aula: String,
    pub turno: String,
    pub dias_semana: String,
    pub status: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RoomRow {
    /// Missing or malformed `dias_semana` becomes an empty list, any nonzero
    /// `status` becomes `true`.
    pub fn into_room(self) -> Room {
        Room {
            id: self.id,
            unidade: self.unidade,
            curso: self.curso,
            periodo: self.periodo,
            disciplina: self.disciplina,
            docente: self.docente,
            sala_aula: self.sala_aula,
            turno: Turno::from_name(&self.turno).unwrap_or(Turno::Noturno),
            dias_semana: serde_json::from_str(&self.dias_semana).unwrap_or_default(),
            status: self.status != 0,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// JSON encoding for the `dias_semana` column.
pub fn dias_semana_json(dias: &[Weekday]) -> String {
    serde_json::to_string(dias).unwrap_or_else(|_| "[]".to_string())
}
