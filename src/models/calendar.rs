use chrono::Weekday;

/// Spanish month names, January first
pub const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Spanish weekday names, Monday first
pub const WEEKDAYS: [&str; 7] = [
    "lunes",
    "martes",
    "miércoles",
    "jueves",
    "viernes",
    "sábado",
    "domingo",
];

const CHRONO_WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Resolves a month name (any case) to its calendar number, 1 through 12
pub fn month_number(name: &str) -> Option<u32> {
    let name = name.to_lowercase();
    MONTHS
        .iter()
        .position(|m| *m == name)
        .map(|idx| idx as u32 + 1)
}

/// Resolves a weekday name (any case) to a chrono weekday
pub fn weekday(name: &str) -> Option<Weekday> {
    let name = name.to_lowercase();
    let idx = WEEKDAYS.iter().position(|d| *d == name)?;
    CHRONO_WEEKDAYS.get(idx).copied()
}
