use chrono::{DateTime, Datelike, Local, Timelike};
use serde::Serialize;

use crate::models::{Turno, Weekday};

/// Cosmetic ambient mode derived from wall-clock hour. No business meaning,
/// it only selects a presentation color/icon theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Ambient {
    Clear,
    Cloudy,
    Night,
}

/// Shift for an hour of day: [6,12) Matutino, [12,18) Vespertino,
/// Noturno otherwise.
pub fn turno_for_hour(hour: u32) -> Turno {
    match hour {
        6..=11 => Turno::Matutino,
        12..=17 => Turno::Vespertino,
        _ => Turno::Noturno,
    }
}

/// Ambient mode for an hour of day. Afternoon alternates clear/cloudy on
/// even/odd hours.
pub fn ambient_for_hour(hour: u32) -> Ambient {
    match hour {
        6..=11 => Ambient::Clear,
        12..=17 => {
            if hour % 2 == 0 {
                Ambient::Clear
            } else {
                Ambient::Cloudy
            }
        }
        _ => Ambient::Night,
    }
}

/// Localized weekday name from the platform weekday (0=Sunday convention).
pub fn weekday_name(weekday: chrono::Weekday) -> Weekday {
    match weekday {
        chrono::Weekday::Sun => Weekday::Domingo,
        chrono::Weekday::Mon => Weekday::Segunda,
        chrono::Weekday::Tue => Weekday::Terca,
        chrono::Weekday::Wed => Weekday::Quarta,
        chrono::Weekday::Thu => Weekday::Quinta,
        chrono::Weekday::Fri => Weekday::Sexta,
        chrono::Weekday::Sat => Weekday::Sabado,
    }
}

const NEUTRAL_COLOR: &str = "bg-gray-500";

const TURNO_COLORS: &[(Ambient, Turno, &str)] = &[
    (Ambient::Clear, Turno::Matutino, "bg-yellow-400"),
    (Ambient::Clear, Turno::Vespertino, "bg-orange-500"),
    (Ambient::Clear, Turno::Noturno, "bg-indigo-700"),
    (Ambient::Cloudy, Turno::Matutino, "bg-blue-300"),
    (Ambient::Cloudy, Turno::Vespertino, "bg-gray-400"),
    (Ambient::Cloudy, Turno::Noturno, "bg-gray-700"),
    (Ambient::Night, Turno::Matutino, "bg-indigo-400"),
    (Ambient::Night, Turno::Vespertino, "bg-indigo-600"),
    (Ambient::Night, Turno::Noturno, "bg-indigo-900"),
];

/// Presentation color for an (ambient, turno) pair. Combinations missing
/// from the table fall back to a neutral gray.
pub fn turno_color(ambient: Ambient, turno: Turno) -> &'static str {
    TURNO_COLORS
        .iter()
        .find(|(a, t, _)| *a == ambient && *t == turno)
        .map(|(_, _, color)| *color)
        .unwrap_or(NEUTRAL_COLOR)
}

/// Default filter context plus ambient mode, resolved from one instant.
/// Recomputed on demand, not tied to a clock tick.
#[derive(Debug, Clone, Serialize)]
pub struct TimeContext {
    pub turno: Turno,
    pub dia_semana: Weekday,
    pub ambient: Ambient,
}

impl TimeContext {
    pub fn now() -> Self {
        Self::at(Local::now())
    }

    pub fn at(instant: DateTime<Local>) -> Self {
        let hour = instant.hour();
        Self {
            turno: turno_for_hour(hour),
            dia_semana: weekday_name(instant.weekday()),
            ambient: ambient_for_hour(hour),
        }
    }
}
