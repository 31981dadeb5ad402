//! Identifier transformation rules.
//!
//! Every emitter derives type, method and field names through these two
//! functions; using them consistently is what keeps the model, controller
//! and resolver artifacts addressing the same identifier by the same name.

/// Convert a lower-case, underscore-delimited name to a capitalized
/// camel-case identifier (e.g. "display_name" -> "DisplayName").
///
/// The first character is always upper-cased; a character following an
/// underscore is upper-cased and the underscore dropped; everything else
/// passes through unchanged. Trailing and consecutive underscores
/// contribute no characters.
pub fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

/// Pluralize a generated type name.
///
/// The metadata model carries no pluralization hints, so the generator uses
/// the same bare suffix everywhere ("Car" -> "Cars"); method names like
/// `GetAllCars` and plural composite fields depend on this staying uniform.
pub fn pluralize(s: &str) -> String {
    format!("{}s", s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("display_name"), "DisplayName");
        assert_eq!(to_pascal_case("id"), "Id");
        assert_eq!(to_pascal_case("car"), "Car");
        assert_eq!(to_pascal_case("foo_bar_baz"), "FooBarBaz");
    }

    #[test]
    fn test_to_pascal_case_edge_cases() {
        assert_eq!(to_pascal_case(""), "");
        assert_eq!(to_pascal_case("a_"), "A");
        assert_eq!(to_pascal_case("a__b"), "AB");
        assert_eq!(to_pascal_case("_a"), "A");
    }

    #[test]
    fn test_to_pascal_case_is_pure() {
        // same input always yields the same output, and an already
        // transformed name passes through unchanged
        assert_eq!(
            to_pascal_case("display_name"),
            to_pascal_case("display_name")
        );
        assert_eq!(to_pascal_case("DisplayName"), "DisplayName");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("Car"), "Cars");
        assert_eq!(pluralize("Wheel"), "Wheels");
    }
}
