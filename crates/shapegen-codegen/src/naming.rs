//! Naming convention utilities for Python output.
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `GetCityInput` | [`to_snake_case`] | `get_city_input` |
//! | `weather` | [`capitalize`] | `Weather` |

use heck::ToSnakeCase;

/// Convert a Smithy identifier to snake_case.
///
/// # Examples
///
/// ```
/// use shapegen_codegen::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("GetCityInput"), "get_city_input");
/// assert_eq!(to_snake_case("cityId"), "city_id");
/// assert_eq!(to_snake_case("already_snake"), "already_snake");
/// ```
pub fn to_snake_case(s: &str) -> String {
    s.to_snake_case()
}

/// Capitalize the first letter of a string.
///
/// # Examples
///
/// ```
/// use shapegen_codegen::naming::capitalize;
///
/// assert_eq!(capitalize("weather"), "Weather");
/// assert_eq!(capitalize("City"), "City");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// `<module>.<suffix>`
pub(crate) fn module_namespace(module: &str, suffix: &str) -> String {
    format!("{module}.{suffix}")
}

/// `./<module>/<suffix>.py`, with each dotted package segment as a directory.
pub(crate) fn module_file(module: &str, suffix: &str) -> String {
    format!("./{}/{suffix}.py", module.replace('.', "/"))
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn to_snake_case___converts_pascal_case() {
        assert_eq!(to_snake_case("GetCityInput"), "get_city_input");
        assert_eq!(to_snake_case("City"), "city");
    }

    #[test]
    fn to_snake_case___converts_camel_case() {
        assert_eq!(to_snake_case("cityId"), "city_id");
        assert_eq!(to_snake_case("resourceType"), "resource_type");
    }

    #[test]
    fn to_snake_case___splits_acronyms() {
        assert_eq!(to_snake_case("HTTPRequest"), "http_request");
    }

    #[test]
    fn capitalize___capitalizes_first_letter() {
        assert_eq!(capitalize("status"), "Status");
        assert_eq!(capitalize("a"), "A");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn capitalize___preserves_rest_of_string() {
        assert_eq!(capitalize("cityCoordinates"), "CityCoordinates");
        assert_eq!(capitalize("ALLCAPS"), "ALLCAPS");
    }

    #[test]
    fn module_file___uses_module_name_as_directory() {
        assert_eq!(module_file("weather", "models"), "./weather/models.py");
        assert_eq!(module_file("weather", "errors"), "./weather/errors.py");
    }

    #[test]
    fn module_file___dotted_module___nests_directories() {
        assert_eq!(
            module_file("weather.sub", "models"),
            "./weather/sub/models.py"
        );
        assert_eq!(module_namespace("weather.sub", "models"), "weather.sub.models");
    }

    #[test]
    fn module_namespace___joins_with_dot() {
        assert_eq!(module_namespace("weather", "client"), "weather.client");
    }
}
