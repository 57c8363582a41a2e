//! ForceAtlas2-based layout options passed through to vis-network

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Tuning for vis-network's `forceAtlas2Based` solver.
///
/// Known fields get friendly names; anything in `extra` is copied verbatim
/// into the solver block, so every option vis-network understands can be set
/// without this crate knowing about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    pub gravity: f64,
    pub central_gravity: f64,
    pub spring_length: f64,
    pub spring_strength: f64,
    pub damping: f64,
    pub overlap: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            gravity: -50.0,
            central_gravity: 0.01,
            spring_length: 100.0,
            spring_strength: 0.08,
            damping: 0.4,
            overlap: 0.0,
            extra: Map::new(),
        }
    }
}

impl LayoutOptions {
    /// Set one option from a `key=value` pair given on the command line.
    ///
    /// Known keys must be numeric. Unknown keys are parsed as JSON when
    /// possible (`42`, `true`, `{"a":1}`), otherwise kept as a string.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        let number = || {
            value
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("layout option `{key}` expects a number, got `{value}`"))
        };

        match key {
            "gravity" => self.gravity = number()?,
            "central_gravity" => self.central_gravity = number()?,
            "spring_length" => self.spring_length = number()?,
            "spring_strength" => self.spring_strength = number()?,
            "damping" => self.damping = number()?,
            "overlap" => self.overlap = number()?,
            _ => {
                let parsed = serde_json::from_str(value)
                    .unwrap_or_else(|_| Value::String(value.to_string()));
                self.extra.insert(key.to_string(), parsed);
            }
        }
        Ok(())
    }

    /// The solver block in vis-network's own option names.
    pub fn solver(&self) -> Value {
        let mut block = Map::new();
        block.insert("gravitationalConstant".into(), json!(self.gravity));
        block.insert("centralGravity".into(), json!(self.central_gravity));
        block.insert("springLength".into(), json!(self.spring_length));
        block.insert("springConstant".into(), json!(self.spring_strength));
        block.insert("damping".into(), json!(self.damping));
        block.insert("avoidOverlap".into(), json!(self.overlap));
        for (key, value) in &self.extra {
            block.insert(key.clone(), value.clone());
        }
        Value::Object(block)
    }

    /// Complete options object handed to `new vis.Network(...)`.
    pub fn vis_options(&self) -> Value {
        json!({
            "physics": {
                "enabled": true,
                "solver": "forceAtlas2Based",
                "forceAtlas2Based": self.solver(),
            },
            "edges": {
                "arrows": { "to": { "enabled": true } },
                "smooth": { "type": "continuous" },
            },
            "nodes": {
                "shape": "dot",
                "scaling": { "min": 10, "max": 30 },
            },
            "interaction": {
                "hover": true,
                "navigationButtons": false,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_map_to_vis_names() {
        let solver = LayoutOptions::default().solver();
        assert_eq!(solver["gravitationalConstant"], json!(-50.0));
        assert_eq!(solver["centralGravity"], json!(0.01));
        assert_eq!(solver["springLength"], json!(100.0));
        assert_eq!(solver["springConstant"], json!(0.08));
        assert_eq!(solver["damping"], json!(0.4));
        assert_eq!(solver["avoidOverlap"], json!(0.0));
    }

    #[test]
    fn test_set_known_and_passthrough_keys() {
        let mut layout = LayoutOptions::default();
        layout.set("spring_length", "250").unwrap();
        layout.set("theta", "0.5").unwrap();
        layout.set("label", "plain text").unwrap();

        let solver = layout.solver();
        assert_eq!(solver["springLength"], json!(250.0));
        assert_eq!(solver["theta"], json!(0.5));
        assert_eq!(solver["label"], json!("plain text"));
    }

    #[test]
    fn test_known_key_rejects_non_number() {
        let mut layout = LayoutOptions::default();
        assert!(layout.set("damping", "lots").is_err());
        assert_eq!(layout.damping, 0.4);
    }

    #[test]
    fn test_extra_overrides_friendly_names() {
        let mut layout = LayoutOptions::default();
        layout.set("springConstant", "0.2").unwrap();
        assert_eq!(layout.solver()["springConstant"], json!(0.2));
    }

    #[test]
    fn test_deserialize_with_unknown_keys() {
        let layout: LayoutOptions =
            serde_json::from_value(json!({ "gravity": -80.0, "maxVelocity": 50 })).unwrap();
        assert_eq!(layout.gravity, -80.0);
        assert_eq!(layout.spring_length, 100.0);
        assert_eq!(layout.extra["maxVelocity"], json!(50));
    }
}
