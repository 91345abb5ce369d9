use rgen_core::config::RailsConfig;
use rgen_core::ir::Primitive;

/// Wire → typed cast expression for a primitive, honoring configured overrides.
///
/// Returns `expr` unchanged for kinds that need no cast.
pub fn inbound_cast(config: &RailsConfig, type_name: &str, expr: &str) -> String {
    if let Some(function) = config.type_override(type_name) {
        return format!("{function}({expr})");
    }

    match Primitive::from_name(type_name) {
        Some(Primitive::Boolean) => format!("ActiveModel::Type::Boolean.new.cast({expr})"),
        Some(Primitive::Date) => format!("Date.parse({expr})"),
        Some(Primitive::DateTime) => format!("DateTime.parse({expr})"),
        Some(Primitive::Number | Primitive::Float | Primitive::Double) => {
            format!("Float({expr})")
        }
        Some(Primitive::Integer | Primitive::Long) => format!("Integer({expr}, 10)"),
        _ => expr.to_string(),
    }
}

/// Typed → wire cast expression for a primitive.
pub fn outbound_cast(type_name: &str, expr: &str) -> String {
    match Primitive::from_name(type_name) {
        Some(Primitive::Date) => format!("{expr}&.to_s"),
        Some(Primitive::DateTime) => format!("{expr}&.utc&.iso8601"),
        _ => expr.to_string(),
    }
}
