// ── Identifier normalization ──
//
// The only place loosely typed identifiers are accepted. Every `id` field
// at any depth is coerced into a JSON unsigned integer; every other scalar
// passes through as-is.

use serde_json::{Number, Value};

/// Largest float that still represents every integer below it exactly.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Return `value` with every `id` field coerced to the canonical form.
///
/// Walks arrays and objects at any depth. Scalars under fields other than
/// `id` are never changed. An `id` that cannot be coerced is left as it
/// was, so typed decoding reports it.
pub fn normalize_ids(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_ids).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, field)| {
                    if key == "id" {
                        (key, coerce_id(field))
                    } else {
                        (key, normalize_ids(field))
                    }
                })
                .collect(),
        ),
        other => other,
    }
}

/// Coerce a single identifier value, returning it unchanged on failure.
pub fn coerce_id(value: Value) -> Value {
    match canonical_id(&value) {
        Some(id) => Value::Number(Number::from(id)),
        None => value,
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
fn canonical_id(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            let f = n.as_f64()?;
            (f.fract() == 0.0 && (0.0..=MAX_EXACT_FLOAT).contains(&f)).then_some(f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn string_ids_become_numbers() {
        let raw = json!([{ "id": "10", "firstName": "Alice" }]);
        assert_eq!(
            normalize_ids(raw),
            json!([{ "id": 10, "firstName": "Alice" }])
        );
    }

    #[test]
    fn canonical_ids_are_untouched() {
        let raw = json!({ "id": 7, "speciality": "Cardiology" });
        assert_eq!(normalize_ids(raw.clone()), raw);
    }

    #[test]
    fn integral_floats_and_padded_strings_coerce() {
        let raw = json!([{ "id": 4.0 }, { "id": " 5 " }]);
        assert_eq!(normalize_ids(raw), json!([{ "id": 4 }, { "id": 5 }]));
    }

    #[test]
    fn non_id_fields_are_left_alone() {
        let raw = json!({ "id": "1", "practitionerId": "10", "tags": ["7"] });
        assert_eq!(
            normalize_ids(raw),
            json!({ "id": 1, "practitionerId": "10", "tags": ["7"] })
        );
    }

    #[test]
    fn ids_inside_nested_objects_coerce() {
        let raw = json!({
            "id": "1",
            "practitioner": { "id": "10", "firstName": "Alice" },
            "history": [{ "id": "2" }]
        });
        assert_eq!(
            normalize_ids(raw),
            json!({
                "id": 1,
                "practitioner": { "id": 10, "firstName": "Alice" },
                "history": [{ "id": 2 }]
            })
        );
    }

    #[test]
    fn nested_arrays_are_walked() {
        let raw = json!([[{ "id": "1" }], [{ "id": "2" }]]);
        assert_eq!(normalize_ids(raw), json!([[{ "id": 1 }], [{ "id": 2 }]]));
    }

    #[test]
    fn uncoercible_ids_pass_through() {
        let raw = json!([
            { "id": "abc" },
            { "id": -3 },
            { "id": 1.5 },
            { "id": null }
        ]);
        assert_eq!(normalize_ids(raw.clone()), raw);
    }

    #[test]
    fn scalars_pass_through() {
        assert_eq!(normalize_ids(json!("id")), json!("id"));
        assert_eq!(normalize_ids(Value::Null), Value::Null);
    }
}
