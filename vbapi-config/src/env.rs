// Environment variable loading

use serde_json::Value;
use std::collections::HashMap;
use std::env;

/// Environment variable loader
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    /// Create a new environment loader
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    /// Load the process environment
    pub fn load(&self) -> HashMap<String, Value> {
        self.load_from(env::vars())
    }

    /// Load from an explicit list of variables.
    ///
    /// With a prefix, only `PREFIX_*` variables are kept and the prefix is
    /// stripped. Keys are lower-cased. Numbers and booleans become JSON
    /// scalars; anything else stays a string.
    pub fn load_from<I, K, V>(&self, vars: I) -> HashMap<String, Value>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut config = HashMap::new();

        for (key, value) in vars {
            let key = key.as_ref();
            let name = match self.prefix {
                Some(ref prefix) => match strip_prefix(key, prefix) {
                    Some(name) => name,
                    None => continue,
                },
                None => key,
            };
            if name.is_empty() {
                continue;
            }
            config.insert(name.to_lowercase(), parse_scalar(value.into()));
        }

        config
    }

}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(None)
    }
}

fn strip_prefix<'a>(key: &'a str, prefix: &str) -> Option<&'a str> {
    key.strip_prefix(prefix)?.strip_prefix('_')
}

fn parse_scalar(raw: String) -> Value {
    match serde_json::from_str::<Value>(&raw) {
        Ok(value @ (Value::Number(_) | Value::Bool(_))) => value,
        _ => Value::String(raw),
    }
}
