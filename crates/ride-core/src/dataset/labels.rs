//! Categorical relabeling, applied once while normalizing.
//!
//! Reports read the relabeled values and never rewrite them, so a cached
//! table shared between report runs always shows the same labels.

use super::columns::Category;

/// Display label for a missing or placeholder categorical value.
pub const NOT_INFORMED: &str = "Não informado";

const PLACEHOLDERS: [&str; 8] = ["", "0", "NA", "N/A", "NULL", "(null)", "NaN", NOT_INFORMED];

fn is_placeholder(value: &str) -> bool {
    PLACEHOLDERS.iter().any(|p| p.eq_ignore_ascii_case(value))
}

/// Canonical label for a categorical cell.
pub fn relabel(category: Category, cell: &str) -> String {
    let value = cell.split_whitespace().collect::<Vec<_>>().join(" ");
    if is_placeholder(&value) {
        return NOT_INFORMED.to_string();
    }

    match category {
        Category::DayOfWeek => value.to_lowercase(),
        Category::Brand => brand_of(&value),
        _ => value,
    }
}

/// Manufacturer part of a `MAKE/MODEL` label, upper-cased.
///
/// `"HONDA/CG 160 FAN"` becomes `"HONDA"`; `"I/FIAT TORO"` (imported
/// vehicles carry an `I/` prefix) becomes `"FIAT"`.
fn brand_of(value: &str) -> String {
    let mut parts = value.split('/').map(str::trim).filter(|p| !p.is_empty());
    let first = parts.next().unwrap_or_default();

    let make = if first.eq_ignore_ascii_case("I") {
        parts
            .next()
            .and_then(|rest| rest.split_whitespace().next())
            .unwrap_or(first)
    } else {
        first
    };

    if is_placeholder(make) {
        NOT_INFORMED.to_string()
    } else {
        make.to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_become_not_informed() {
        for cell in ["", "  ", "0", "NA", "n/a", "(null)", "NaN"] {
            assert_eq!(relabel(Category::VehicleType, cell), NOT_INFORMED, "{cell:?}");
        }
    }

    #[test]
    fn relabeling_is_idempotent() {
        assert_eq!(relabel(Category::Sex, "Não Informado"), NOT_INFORMED);
        assert_eq!(relabel(Category::Brand, NOT_INFORMED), NOT_INFORMED);
        assert_eq!(relabel(Category::DayOfWeek, NOT_INFORMED), NOT_INFORMED);
    }

    #[test]
    fn whitespace_is_collapsed() {
        assert_eq!(
            relabel(Category::Municipality, "  SANTO  ANTONIO DO DESCOBERTO "),
            "SANTO ANTONIO DO DESCOBERTO"
        );
    }

    #[test]
    fn day_of_week_is_lowercased() {
        assert_eq!(relabel(Category::DayOfWeek, "Segunda-feira"), "segunda-feira");
    }

    #[test]
    fn brand_keeps_manufacturer_prefix() {
        assert_eq!(relabel(Category::Brand, "Honda/CG 160 FAN"), "HONDA");
        assert_eq!(relabel(Category::Brand, "I/FIAT TORO"), "FIAT");
        assert_eq!(relabel(Category::Brand, "VOLVO"), "VOLVO");
        assert_eq!(relabel(Category::Brand, "/"), NOT_INFORMED);
    }

    #[test]
    fn other_values_pass_through() {
        assert_eq!(relabel(Category::Sex, "Masculino"), "Masculino");
    }
}
