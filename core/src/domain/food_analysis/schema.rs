use serde_json::json;

pub const DETECTED_ITEMS_SCHEMA_NAME: &str = "detected_items";

/// Strict JSON schema the provider must follow when listing detected items
pub fn get_detected_items_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "additionalProperties": false,
        "required": ["items"],
        "properties": {
            "items": {
                "type": "array",
                "items": {
                    "type": "object",
                    "additionalProperties": false,
                    "required": ["name", "confidence"],
                    "properties": {
                        "name": { "type": "string" },
                        "confidence": {
                            "type": "number",
                            "minimum": 0,
                            "maximum": 1
                        }
                    }
                }
            }
        }
    })
}
