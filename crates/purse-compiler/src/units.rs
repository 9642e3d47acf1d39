//! Unit inference for numeric declaration values.

use purse_types::StyleValue;

/// Kebab-case properties whose numeric values are rendered without a unit.
pub const UNITLESS_NUMBER_PROPS: &[&str] = &[
    "animation-iteration-count",
    "border-image-outset",
    "border-image-slice",
    "border-image-width",
    "box-flex",
    "box-flex-group",
    "box-ordinal-group",
    "column-count",
    "columns",
    "flex",
    "flex-grow",
    "flex-positive",
    "flex-shrink",
    "flex-negative",
    "flex-order",
    "grid-row",
    "grid-row-end",
    "grid-row-span",
    "grid-row-start",
    "grid-column",
    "grid-column-end",
    "grid-column-span",
    "grid-column-start",
    "font-weight",
    "line-clamp",
    "line-height",
    "opacity",
    "order",
    "orphans",
    "tabSize",
    "widows",
    "z-index",
    "zoom",
    // SVG
    "fill-opacity",
    "flood-opacity",
    "stop-opacity",
    "stroke-dasharray",
    "stroke-dashoffset",
    "stroke-miterlimit",
    "stroke-opacity",
    "stroke-width",
];

pub fn is_unitless(kebab_property: &str) -> bool {
    UNITLESS_NUMBER_PROPS.iter().any(|p| *p == kebab_property)
}

/// Shortest round-trip form of `n`, written the way browsers print numbers.
///
/// Magnitudes of at least `1e21` or below `1e-6` use exponent form with an
/// explicit sign (`1e+21`, `1.5e-7`); everything else is plain decimal.
pub fn format_number(n: f64) -> String {
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if n == 0.0 {
        // Also folds -0.
        return "0".to_owned();
    }
    let magnitude = n.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        return exponent_form(n);
    }
    n.to_string()
}

fn exponent_form(n: f64) -> String {
    let text = format!("{n:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => text,
    }
}

/// Render a value for `kebab_property`, or `None` for [`StyleValue::Null`].
pub fn render_value(kebab_property: &str, value: &StyleValue) -> Option<String> {
    match value {
        StyleValue::Str(s) => Some(s.clone()),
        StyleValue::Number(n) if is_unitless(kebab_property) => Some(format_number(*n)),
        StyleValue::Number(n) => Some(format!("{}px", format_number(*n))),
        StyleValue::Null => None,
    }
}
