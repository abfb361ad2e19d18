//! Purpose: Field-level coercion of loosely-typed snapshot values.
//! Exports: scalar/vector/object accessors used by every entity decoder.
//! Role: Best-effort repair of wrong-shape fields into typed values or an
//! explicit absent marker, without aborting the surrounding decode.
//! Invariants: A failed field never aborts sibling fields; failures are
//! recorded as notes on the snapshot.
//! Invariants: A bare boolean in place of a vector or nested object is a
//! client placeholder and coerces to absent without a note.

use crate::core::diag::Diagnostic;
use crate::core::state::Vec3;
use serde_json::Value;

pub(crate) type JsonMap = serde_json::Map<String, Value>;

fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn note_shape(notes: &mut Vec<Diagnostic>, path: &str, expected: &str, found: &Value) {
    notes.push(Diagnostic::new(
        path,
        format!("expected {expected}, got {}", shape_name(found)),
    ));
}

pub(crate) fn string(
    doc: &JsonMap,
    key: &str,
    path: &str,
    notes: &mut Vec<Diagnostic>,
) -> Option<String> {
    match doc.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => {
            note_shape(notes, path, "string", other);
            None
        }
    }
}

/// Integer fields tolerate the numeric-string form some client builds emit.
pub(crate) fn integer(
    doc: &JsonMap,
    key: &str,
    path: &str,
    notes: &mut Vec<Diagnostic>,
) -> Option<i64> {
    match doc.get(key)? {
        Value::Null => None,
        Value::Number(n) => match n.as_i64() {
            Some(v) => Some(v),
            None => {
                notes.push(Diagnostic::new(
                    path,
                    format!("number {n} does not fit an integer field"),
                ));
                None
            }
        },
        Value::String(s) => match s.trim().parse::<i64>() {
            Ok(v) => Some(v),
            Err(_) => {
                notes.push(Diagnostic::new(
                    path,
                    format!("cannot parse '{s}' as an integer"),
                ));
                None
            }
        },
        other => {
            note_shape(notes, path, "integer", other);
            None
        }
    }
}

/// Float fields likewise accept `"3.5"` as the float 3.5.
pub(crate) fn float(
    doc: &JsonMap,
    key: &str,
    path: &str,
    notes: &mut Vec<Diagnostic>,
) -> Option<f64> {
    match doc.get(key)? {
        Value::Null => None,
        Value::Number(n) => n.as_f64(),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(v) => Some(v),
            Err(_) => {
                notes.push(Diagnostic::new(
                    path,
                    format!("cannot parse '{s}' as a number"),
                ));
                None
            }
        },
        other => {
            note_shape(notes, path, "number", other);
            None
        }
    }
}

pub(crate) fn boolean(
    doc: &JsonMap,
    key: &str,
    path: &str,
    notes: &mut Vec<Diagnostic>,
) -> Option<bool> {
    match doc.get(key)? {
        Value::Null => None,
        Value::Bool(b) => Some(*b),
        other => {
            note_shape(notes, path, "boolean", other);
            None
        }
    }
}

pub(crate) fn vec3(
    doc: &JsonMap,
    key: &str,
    path: &str,
    notes: &mut Vec<Diagnostic>,
) -> Option<Vec3> {
    let value = doc.get(key)?;
    vec3_value(value, path, notes)
}

pub(crate) fn vec3_value(
    value: &Value,
    path: &str,
    notes: &mut Vec<Diagnostic>,
) -> Option<Vec3> {
    match value {
        Value::Null => None,
        // Placeholder the client sends when a coordinate existed but is not
        // currently meaningful.
        Value::Bool(_) => None,
        Value::Array(items) => {
            let mut coords = [0.0f64; 3];
            if items.len() < 3 {
                notes.push(Diagnostic::new(
                    path,
                    format!("coordinate array has {} components, need 3", items.len()),
                ));
                return None;
            }
            for (slot, item) in coords.iter_mut().zip(items.iter()) {
                match item.as_f64() {
                    Some(v) => *slot = v,
                    None => {
                        note_shape(notes, path, "numeric coordinate", item);
                        return None;
                    }
                }
            }
            Some(Vec3(coords[0], coords[1], coords[2]))
        }
        Value::String(s) => parse_coords(s, path, notes),
        other => {
            note_shape(notes, path, "coordinate triple", other);
            None
        }
    }
}

// An unparseable coordinate string indicates a wire-format change and must
// be surfaced, unlike the boolean placeholder above.
fn parse_coords(s: &str, path: &str, notes: &mut Vec<Diagnostic>) -> Option<Vec3> {
    let mut coords = [0.0f64; 3];
    let mut count = 0usize;
    for part in s.split(',') {
        if count == 3 {
            count += 1;
            break;
        }
        match part.trim().parse::<f64>() {
            Ok(v) => {
                coords[count] = v;
                count += 1;
            }
            Err(_) => {
                notes.push(Diagnostic::new(
                    path,
                    format!("cannot parse '{s}' as comma-separated coordinates"),
                ));
                return None;
            }
        }
    }
    if count != 3 {
        notes.push(Diagnostic::new(
            path,
            format!("coordinate string '{s}' does not have exactly 3 components"),
        ));
        return None;
    }
    Some(Vec3(coords[0], coords[1], coords[2]))
}

pub(crate) fn object<'a>(
    doc: &'a JsonMap,
    key: &str,
    path: &str,
    notes: &mut Vec<Diagnostic>,
) -> Option<&'a JsonMap> {
    let value = doc.get(key)?;
    object_value(value, path, notes)
}

pub(crate) fn object_value<'a>(
    value: &'a Value,
    path: &str,
    notes: &mut Vec<Diagnostic>,
) -> Option<&'a JsonMap> {
    match value {
        Value::Null => None,
        // Placeholder for "component subscribed but nothing to report".
        Value::Bool(_) => None,
        Value::Object(map) => Some(map),
        other => {
            note_shape(notes, path, "object", other);
            None
        }
    }
}
