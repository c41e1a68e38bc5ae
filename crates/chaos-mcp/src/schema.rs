//! Declarative argument schemas
//!
//! Every catalog entry describes its arguments as data; one shared
//! validator applies type checks, inclusive bounds, closed enums,
//! identifier/datetime formats, array caps, and declared defaults.
//! The same structure renders the JSON Schema advertised by
//! `tools/list`, so validation and discoverability cannot drift apart.

use serde_json::{json, Map, Value};
use uuid::Uuid;

/// Primitive type and constraints of one argument field
#[derive(Debug, Clone)]
pub enum FieldType {
    /// Free-form string
    Text,
    /// String that must parse as a UUID
    Id,
    /// ISO 8601 datetime string
    DateTime,
    /// Integer with inclusive bounds
    Integer { min: Option<i64>, max: Option<i64> },
    /// Float with inclusive bounds
    Number { min: Option<f64>, max: Option<f64> },
    Boolean,
    /// Array of strings, capped locally
    StringArray { max_items: Option<usize> },
    /// Closed set of allowed values
    Enum(&'static [&'static str]),
}

/// Declaration of one argument field
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub field_type: FieldType,
    pub required: bool,
    pub default: Option<Value>,
    pub description: &'static str,
}

impl FieldSpec {
    fn new(field_type: FieldType, description: &'static str) -> Self {
        Self { field_type, required: false, default: None, description }
    }

    pub fn text(description: &'static str) -> Self {
        Self::new(FieldType::Text, description)
    }

    pub fn id(description: &'static str) -> Self {
        Self::new(FieldType::Id, description)
    }

    pub fn datetime(description: &'static str) -> Self {
        Self::new(FieldType::DateTime, description)
    }

    pub fn integer(min: Option<i64>, max: Option<i64>, description: &'static str) -> Self {
        Self::new(FieldType::Integer { min, max }, description)
    }

    pub fn number(min: Option<f64>, max: Option<f64>, description: &'static str) -> Self {
        Self::new(FieldType::Number { min, max }, description)
    }

    pub fn boolean(description: &'static str) -> Self {
        Self::new(FieldType::Boolean, description)
    }

    pub fn string_array(max_items: usize, description: &'static str) -> Self {
        Self::new(FieldType::StringArray { max_items: Some(max_items) }, description)
    }

    pub fn one_of(values: &'static [&'static str], description: &'static str) -> Self {
        Self::new(FieldType::Enum(values), description)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// Ordered field table of one tool
#[derive(Debug, Clone, Default)]
pub struct ToolSchema {
    fields: Vec<(&'static str, FieldSpec)>,
}

impl ToolSchema {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn field(mut self, name: &'static str, spec: FieldSpec) -> Self {
        self.fields.push((name, spec));
        self
    }

    /// Validate a caller-supplied argument bag
    ///
    /// Returns the bag that will be forwarded: declared defaults filled
    /// in, unknown fields stripped. Any violation rejects the call
    /// before network activity.
    pub fn validate(&self, args: &Map<String, Value>) -> Result<Map<String, Value>, String> {
        let mut forwarded = Map::new();
        for (name, spec) in &self.fields {
            match args.get(*name) {
                Some(value) => {
                    check_value(name, &spec.field_type, value)?;
                    forwarded.insert((*name).to_string(), value.clone());
                }
                None if spec.required => {
                    return Err(format!("missing required field: {}", name));
                }
                None => {
                    if let Some(default) = &spec.default {
                        forwarded.insert((*name).to_string(), default.clone());
                    }
                }
            }
        }
        Ok(forwarded)
    }

    /// Render the JSON Schema object advertised by `tools/list`
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for (name, spec) in &self.fields {
            let mut property = type_schema(&spec.field_type);
            if let Value::Object(obj) = &mut property {
                obj.insert("description".to_string(), json!(spec.description));
                if let Some(default) = &spec.default {
                    obj.insert("default".to_string(), default.clone());
                }
            }
            properties.insert((*name).to_string(), property);
            if spec.required {
                required.push(*name);
            }
        }

        let mut schema = json!({
            "type": "object",
            "properties": properties,
        });
        if !required.is_empty() {
            schema["required"] = json!(required);
        }
        schema
    }
}

fn check_value(name: &str, field_type: &FieldType, value: &Value) -> Result<(), String> {
    match field_type {
        FieldType::Text => {
            value.as_str().ok_or_else(|| format!("{} must be a string", name))?;
        }
        FieldType::Id => {
            let raw = value.as_str().ok_or_else(|| format!("{} must be a string", name))?;
            Uuid::parse_str(raw).map_err(|_| format!("{} must be a valid UUID", name))?;
        }
        FieldType::DateTime => {
            let raw = value.as_str().ok_or_else(|| format!("{} must be a string", name))?;
            chrono::DateTime::parse_from_rfc3339(raw)
                .map_err(|_| format!("{} must be an ISO 8601 datetime", name))?;
        }
        FieldType::Integer { min, max } => {
            let n = value.as_i64().ok_or_else(|| format!("{} must be an integer", name))?;
            if let Some(min) = min {
                if n < *min {
                    return Err(format!("{} must be at least {}", name, min));
                }
            }
            if let Some(max) = max {
                if n > *max {
                    return Err(format!("{} must be at most {}", name, max));
                }
            }
        }
        FieldType::Number { min, max } => {
            let n = value.as_f64().ok_or_else(|| format!("{} must be a number", name))?;
            if let Some(min) = min {
                if n < *min {
                    return Err(format!("{} must be at least {}", name, min));
                }
            }
            if let Some(max) = max {
                if n > *max {
                    return Err(format!("{} must be at most {}", name, max));
                }
            }
        }
        FieldType::Boolean => {
            value.as_bool().ok_or_else(|| format!("{} must be a boolean", name))?;
        }
        FieldType::StringArray { max_items } => {
            let items =
                value.as_array().ok_or_else(|| format!("{} must be an array of strings", name))?;
            if items.iter().any(|item| !item.is_string()) {
                return Err(format!("{} must be an array of strings", name));
            }
            if let Some(max) = max_items {
                if items.len() > *max {
                    return Err(format!("{} must have at most {} items", name, max));
                }
            }
        }
        FieldType::Enum(values) => {
            let raw = value.as_str().ok_or_else(|| format!("{} must be a string", name))?;
            if !values.contains(&raw) {
                return Err(format!("{} must be one of: {}", name, values.join(", ")));
            }
        }
    }
    Ok(())
}

fn type_schema(field_type: &FieldType) -> Value {
    match field_type {
        FieldType::Text => json!({"type": "string"}),
        FieldType::Id => json!({"type": "string", "format": "uuid"}),
        FieldType::DateTime => json!({"type": "string", "format": "date-time"}),
        FieldType::Integer { min, max } => {
            let mut schema = json!({"type": "integer"});
            if let Some(min) = min {
                schema["minimum"] = json!(min);
            }
            if let Some(max) = max {
                schema["maximum"] = json!(max);
            }
            schema
        }
        FieldType::Number { min, max } => {
            let mut schema = json!({"type": "number"});
            if let Some(min) = min {
                schema["minimum"] = json!(min);
            }
            if let Some(max) = max {
                schema["maximum"] = json!(max);
            }
            schema
        }
        FieldType::Boolean => json!({"type": "boolean"}),
        FieldType::StringArray { max_items } => {
            let mut schema = json!({"type": "array", "items": {"type": "string"}});
            if let Some(max) = max_items {
                schema["maxItems"] = json!(max);
            }
            schema
        }
        FieldType::Enum(values) => json!({"type": "string", "enum": values}),
    }
}
