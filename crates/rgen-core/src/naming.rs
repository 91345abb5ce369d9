use heck::{ToPascalCase, ToSnakeCase};
use inflector::string::pluralize::to_plural;

/// `getGizmos` → `get_gizmos`, `date-time` → `date_time`.
pub fn snake(name: &str) -> String {
    name.to_snake_case()
}

/// `basketry example` → `BasketryExample`.
pub fn pascal(name: &str) -> String {
    name.to_pascal_case()
}

/// Human readable form: `user-profiles` → `User profiles`.
pub fn sentence(name: &str) -> String {
    let words = snake(name).replace('_', " ");
    let mut chars = words.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// English plural of an identifier, inflecting its last word.
///
/// Examples:
/// - `gizmo` → `gizmos`
/// - `status` → `statuses`
/// - `person` → `people`
pub fn plural(word: &str) -> String {
    to_plural(word)
}
