use serde::{Deserialize, Serialize};

use crate::models::Room;

/// Four independent optional predicates, combined with AND. Empty string
/// means "unset" and always matches, mirroring the filter form state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub turno: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub sala_aula: String,
    #[serde(default)]
    pub dia_semana: String,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.turno.is_empty()
            && self.status.is_empty()
            && self.sala_aula.is_empty()
            && self.dia_semana.is_empty()
    }

    pub fn matches(&self, room: &Room) -> bool {
        let match_turno = self.turno.is_empty() || room.turno.as_str() == self.turno;
        // Status is compared by its string form ("true"/"false").
        let match_status = self.status.is_empty() || room.status.to_string() == self.status;
        let match_sala = self.sala_aula.is_empty()
            || room
                .sala_aula
                .to_lowercase()
                .contains(&self.sala_aula.to_lowercase());
        let match_dia = self.dia_semana.is_empty()
            || room.dias_semana.iter().any(|d| d.as_str() == self.dia_semana);

        match_turno && match_status && match_sala && match_dia
    }
}

/// The visible subset of `rooms`, in the input order. An empty result is a
/// valid outcome, not an error.
pub fn visible(rooms: &[Room], criteria: &FilterCriteria) -> Vec<Room> {
    rooms
        .iter()
        .filter(|room| criteria.matches(room))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Turno, Weekday};
    use chrono::Utc;

    fn room(id: &str, sala: &str, turno: Turno, dias: Vec<Weekday>, status: bool) -> Room {
        Room {
            id: id.to_string(),
            unidade: "Campus Central".to_string(),
            curso: "SI".to_string(),
            periodo: "3".to_string(),
            disciplina: "BD".to_string(),
            docente: "Prof. Silva".to_string(),
            sala_aula: sala.to_string(),
            turno,
            dias_semana: dias,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sample_rooms() -> Vec<Room> {
        vec![
            room("1", "Lab 204", Turno::Noturno, vec![Weekday::Segunda, Weekday::Quarta], true),
            room("2", "Sala 101", Turno::Matutino, vec![Weekday::Terca], false),
            room("3", "Lab 301", Turno::Noturno, vec![Weekday::Sexta], true),
        ]
    }

    #[test]
    fn empty_criteria_returns_all_in_order() {
        let rooms = sample_rooms();
        let result = visible(&rooms, &FilterCriteria::default());
        assert_eq!(result, rooms);
    }

    #[test]
    fn result_is_subset_and_all_predicates_hold() {
        let rooms = sample_rooms();
        let criteria = FilterCriteria {
            turno: "Noturno".to_string(),
            sala_aula: "lab".to_string(),
            ..Default::default()
        };
        let result = visible(&rooms, &criteria);
        assert_eq!(result.len(), 2);
        for r in &result {
            assert!(rooms.contains(r));
            assert!(criteria.matches(r));
        }
        // A room failing one predicate is excluded even if others hold.
        assert!(!result.iter().any(|r| r.id == "2"));
    }

    #[test]
    fn status_predicate_compares_string_forms() {
        let rooms = vec![room("1", "Lab", Turno::Noturno, vec![Weekday::Segunda], true)];

        let open = FilterCriteria {
            status: "true".to_string(),
            ..Default::default()
        };
        assert_eq!(visible(&rooms, &open).len(), 1);

        let closed = FilterCriteria {
            status: "false".to_string(),
            ..Default::default()
        };
        assert!(visible(&rooms, &closed).is_empty());
    }

    #[test]
    fn weekday_predicate_checks_membership() {
        let rooms = vec![room(
            "1",
            "Lab",
            Turno::Noturno,
            vec![Weekday::Segunda, Weekday::Quarta],
            true,
        )];

        let quarta = FilterCriteria {
            dia_semana: "Quarta".to_string(),
            ..Default::default()
        };
        assert_eq!(visible(&rooms, &quarta).len(), 1);

        let sexta = FilterCriteria {
            dia_semana: "Sexta".to_string(),
            ..Default::default()
        };
        assert!(visible(&rooms, &sexta).is_empty());
    }

    #[test]
    fn name_predicate_is_case_insensitive_substring() {
        let rooms = sample_rooms();
        let criteria = FilterCriteria {
            sala_aula: "LAB 2".to_string(),
            ..Default::default()
        };
        let result = visible(&rooms, &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "1");
    }

    #[test]
    fn empty_result_is_valid() {
        let rooms = sample_rooms();
        let criteria = FilterCriteria {
            turno: "Vespertino".to_string(),
            ..Default::default()
        };
        assert!(visible(&rooms, &criteria).is_empty());
    }

    #[test]
    fn is_empty_reflects_all_predicates() {
        assert!(FilterCriteria::default().is_empty());
        let criteria = FilterCriteria {
            dia_semana: "Quarta".to_string(),
            ..Default::default()
        };
        assert!(!criteria.is_empty());
    }
}
