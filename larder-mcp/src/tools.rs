//! Tool catalog and dispatch

use serde_json::{json, Value as JsonValue};
use thiserror::Error;
use tracing::{debug, warn};
use larder_core::{ErrorReport, Number, NumberError};
use larder_units::{
    convert, parse_quantity, parse_unit, reduce, restock, simplify, Quantity, QuantityError, Unit,
    CATALOG,
};
use larder_pantry::{merge, PantryEntry, ReductionOutcome};
use crate::protocol::McpError;

/// Why a tool call failed
#[derive(Debug, Error)]
enum ToolError {
    /// Arguments missing or of the wrong JSON shape; a protocol error
    #[error("{0}")]
    BadRequest(String),

    /// The engine rejected the input; reported inside the tool result
    #[error("{0}")]
    Failed(ErrorReport),
}

impl From<QuantityError> for ToolError {
    fn from(err: QuantityError) -> Self {
        ToolError::Failed(err.into())
    }
}

impl From<NumberError> for ToolError {
    fn from(err: NumberError) -> Self {
        ToolError::Failed(err.into())
    }
}

fn missing(name: &str) -> ToolError {
    ToolError::BadRequest(format!("Missing '{}' argument", name))
}

pub fn list() -> JsonValue {
    let quantity_schema = json!({
        "oneOf": [
            {
                "type": "string",
                "description": "Amount and unit, e.g. \"2 tbsp\", \"1/2 cup\", \"500g\". A bare number counts items."
            },
            {
                "type": "object",
                "properties": {
                    "value": {
                        "type": ["string", "number"],
                        "description": "Non-negative amount; strings keep exact decimals"
                    },
                    "unit": {
                        "type": "string",
                        "description": "Unit symbol or name: g, kg, oz, lb, ml, l, tsp, tbsp, cup, unit"
                    }
                },
                "required": ["value", "unit"]
            }
        ]
    });

    let entry_schema = json!({
        "type": "object",
        "description": "Pantry entry as stored",
        "properties": {
            "name": { "type": "string" },
            "type": { "type": "string", "description": "Ingredient type, e.g. Vegetable" },
            "quantity": { "type": ["string", "number"] },
            "unit": { "type": "string", "description": "Storage unit: g, kg, ml, l, oz, lb or unit" },
            "location": { "type": "string" },
            "shop": { "type": "string" }
        },
        "required": ["name", "type", "quantity", "unit", "location"]
    });

    json!({
        "tools": [
            {
                "name": "reduce_quantity",
                "description": "Subtract an amount used from a stored quantity. The used amount may be in any compatible unit (e.g. 2 tbsp from 500 g). The result never goes below zero and comes back in a storage unit, simplified when small (0.5 kg becomes 500 g).",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "current": quantity_schema.clone(),
                        "used": quantity_schema.clone()
                    },
                    "required": ["current", "used"]
                }
            },
            {
                "name": "restock_quantity",
                "description": "Add an amount to a stored quantity, converting it into the stored unit.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "current": quantity_schema.clone(),
                        "added": quantity_schema.clone()
                    },
                    "required": ["current", "added"]
                }
            },
            {
                "name": "convert_unit",
                "description": "Rescale a value from one unit to another, e.g. when switching an entry from kg to g. Mass and volume convert through an approximate 1 g per ml density. Counted items and pinches cannot be converted.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "value": {
                            "type": ["string", "number"],
                            "description": "Amount in the source unit"
                        },
                        "from": { "type": "string", "description": "Source unit" },
                        "to": { "type": "string", "description": "Target unit" }
                    },
                    "required": ["value", "from", "to"]
                }
            },
            {
                "name": "simplify_quantity",
                "description": "Express a small quantity in a smaller unit of the same kind and system (0.25 kg becomes 250 g), rounded to 2 decimal places.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "quantity": quantity_schema.clone()
                    },
                    "required": ["quantity"]
                }
            },
            {
                "name": "list_units",
                "description": "List accepted units. 'storage' units may be persisted on an entry; 'input' units may also be used when recording what was used.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "kind": {
                            "type": "string",
                            "enum": ["storage", "input", "all"],
                            "description": "Which list to return (default: all)"
                        }
                    }
                }
            },
            {
                "name": "use_pantry_item",
                "description": "Record that an amount of a pantry entry was used. Returns the updated entry, or status 'depleted' when nothing is left and the entry should be deleted.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "entry": entry_schema.clone(),
                        "used": quantity_schema.clone()
                    },
                    "required": ["entry", "used"]
                }
            },
            {
                "name": "merge_pantry_items",
                "description": "Fold a newly added entry into an existing one with the same name and type. The added amount is converted into the existing unit. Returns merged: null when the entries do not match.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "existing": entry_schema.clone(),
                        "incoming": entry_schema
                    },
                    "required": ["existing", "incoming"]
                }
            }
        ]
    })
}

pub fn call(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let params = params.as_ref()
        .ok_or_else(|| McpError::invalid_params("Missing params"))?;

    let name = params.get("name")
        .and_then(|n| n.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

    let empty = json!({});
    let args = params.get("arguments").unwrap_or(&empty);

    debug!(tool = name, "tool call");

    let outcome = match name {
        "reduce_quantity" => tool_reduce(args),
        "restock_quantity" => tool_restock(args),
        "convert_unit" => tool_convert(args),
        "simplify_quantity" => tool_simplify(args),
        "list_units" => tool_list_units(args),
        "use_pantry_item" => tool_use_pantry_item(args),
        "merge_pantry_items" => tool_merge(args),
        _ => return Err(McpError::invalid_params(format!("Unknown tool: {}", name))),
    };

    match outcome {
        Ok(result) => Ok(result),
        Err(ToolError::BadRequest(message)) => Err(McpError::invalid_params(message)),
        Err(ToolError::Failed(report)) => {
            warn!(tool = name, code = %report.code, "tool rejected input");
            Ok(error_result(&report))
        }
    }
}

// ========== Result shapes ==========

fn quantity_result(q: &Quantity) -> JsonValue {
    json!({
        "content": [{ "type": "text", "text": q.to_string() }],
        "quantity": q,
        "isError": false
    })
}

fn error_result(report: &ErrorReport) -> JsonValue {
    json!({
        "content": [{ "type": "text", "text": report.to_string() }],
        "error": report,
        "isError": true
    })
}

// ========== Tools ==========

fn tool_reduce(args: &JsonValue) -> Result<JsonValue, ToolError> {
    let current = quantity_arg(args, "current")?;
    let used = quantity_arg(args, "used")?;
    let remaining = reduce(&current, &used)?;
    Ok(quantity_result(&remaining))
}

fn tool_restock(args: &JsonValue) -> Result<JsonValue, ToolError> {
    let current = quantity_arg(args, "current")?;
    let added = quantity_arg(args, "added")?;
    let total = restock(&current, &added)?;
    Ok(quantity_result(&total))
}

fn tool_convert(args: &JsonValue) -> Result<JsonValue, ToolError> {
    let value = number_arg(args.get("value").ok_or_else(|| missing("value"))?)?;
    let from = unit_arg(args, "from")?;
    let to = unit_arg(args, "to")?;
    let converted = convert(&value, from, to)?;
    Ok(quantity_result(&converted))
}

fn tool_simplify(args: &JsonValue) -> Result<JsonValue, ToolError> {
    let q = quantity_arg(args, "quantity")?;
    Ok(quantity_result(&simplify(&q.value, q.unit)))
}

fn tool_list_units(args: &JsonValue) -> Result<JsonValue, ToolError> {
    let kind = args.get("kind").and_then(|k| k.as_str()).unwrap_or("all");

    let (storage, input) = match kind {
        "storage" => (Some(CATALOG.storage_units()), None),
        "input" => (None, Some(CATALOG.input_units())),
        "all" => (Some(CATALOG.storage_units()), Some(CATALOG.input_units())),
        other => {
            return Err(ToolError::BadRequest(format!(
                "Unknown kind '{}', expected storage, input or all",
                other
            )))
        }
    };

    let mut lines = Vec::new();
    if let Some(ref units) = storage {
        let labels: Vec<&str> = units.iter().map(|o| o.label).collect();
        lines.push(format!("Storage units: {}", labels.join(", ")));
    }
    if let Some(ref units) = input {
        let labels: Vec<&str> = units.iter().map(|o| o.label).collect();
        lines.push(format!("Input units: {}", labels.join(", ")));
    }

    let mut result = json!({
        "content": [{ "type": "text", "text": lines.join("\n") }],
        "isError": false
    });
    if let Some(units) = storage {
        result["storage"] = json!(units);
    }
    if let Some(units) = input {
        result["input"] = json!(units);
    }
    Ok(result)
}

fn tool_use_pantry_item(args: &JsonValue) -> Result<JsonValue, ToolError> {
    let entry = entry_arg(args, "entry")?;
    let used = quantity_arg(args, "used")?;

    let result = match entry.apply_reduction(&used)? {
        ReductionOutcome::Remaining(updated) => json!({
            "content": [{
                "type": "text",
                "text": format!("{}: {} left", updated.name, updated.stock())
            }],
            "status": "remaining",
            "entry": updated,
            "isError": false
        }),
        ReductionOutcome::Depleted => json!({
            "content": [{ "type": "text", "text": format!("{}: used up", entry.name) }],
            "status": "depleted",
            "isError": false
        }),
    };
    Ok(result)
}

fn tool_merge(args: &JsonValue) -> Result<JsonValue, ToolError> {
    let existing = entry_arg(args, "existing")?;
    let incoming = entry_arg(args, "incoming")?;

    let result = match merge(&existing, &incoming)? {
        Some(merged) => json!({
            "content": [{
                "type": "text",
                "text": format!("{}: {} in {}", merged.name, merged.stock(), merged.location)
            }],
            "merged": merged,
            "isError": false
        }),
        None => json!({
            "content": [{ "type": "text", "text": "Entries do not match; nothing merged" }],
            "merged": null,
            "isError": false
        }),
    };
    Ok(result)
}

// ========== Argument helpers ==========

/// A quantity given as "2 tbsp" or as `{"value": .., "unit": ..}`
fn quantity_arg(args: &JsonValue, name: &str) -> Result<Quantity, ToolError> {
    match args.get(name) {
        None | Some(JsonValue::Null) => Err(missing(name)),
        Some(JsonValue::String(s)) => Ok(parse_quantity(s)?),
        Some(obj @ JsonValue::Object(_)) => {
            let value = number_arg(obj.get("value").ok_or_else(|| missing(&format!("{}.value", name)))?)?;
            let unit = unit_arg(obj, "unit")
                .map_err(|e| match e {
                    ToolError::BadRequest(_) => missing(&format!("{}.unit", name)),
                    other => other,
                })?;
            Ok(Quantity::try_new(value, unit)?)
        }
        Some(_) => Err(ToolError::BadRequest(format!(
            "'{}' must be a string like \"2 tbsp\" or an object with value and unit",
            name
        ))),
    }
}

fn number_arg(value: &JsonValue) -> Result<Number, ToolError> {
    match value {
        JsonValue::String(s) => Ok(Number::from_str(s)?),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Number::from_i64(i))
            } else if let Some(f) = n.as_f64() {
                Ok(Number::from_f64(f)?)
            } else {
                Err(ToolError::BadRequest(format!("Unrepresentable number: {}", n)))
            }
        }
        other => Err(ToolError::BadRequest(format!("Expected a number, got {}", other))),
    }
}

fn unit_arg(args: &JsonValue, name: &str) -> Result<Unit, ToolError> {
    let symbol = args.get(name)
        .and_then(|u| u.as_str())
        .ok_or_else(|| missing(name))?;
    Ok(parse_unit(symbol)?)
}

fn entry_arg(args: &JsonValue, name: &str) -> Result<PantryEntry, ToolError> {
    let mut raw = args.get(name).cloned().ok_or_else(|| missing(name))?;

    // Stored documents carry quantity as a string; accept plain JSON numbers too
    if let Some(n @ JsonValue::Number(_)) = raw.get("quantity").cloned() {
        raw["quantity"] = JsonValue::String(number_arg(&n)?.to_string());
    }

    serde_json::from_value(raw)
        .map_err(|e| ToolError::BadRequest(format!("Invalid '{}': {}", name, e)))
}
