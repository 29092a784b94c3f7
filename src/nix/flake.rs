use serde_json::Value;

/// One top-level flake output (`packages`, `devShells`, ...) and the
/// attribute paths beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlakeOutputGroup {
    pub name: String,
    /// Leaf attribute paths relative to the group, e.g. `x86_64-linux.default`.
    pub attrs: Vec<String>,
}

/// The outputs of a flake as reported by `nix flake show --json`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlakeOutputs {
    pub groups: Vec<FlakeOutputGroup>,
}

impl FlakeOutputs {
    /// Decodes the output of `nix flake show --json`.
    ///
    /// A leaf is any object carrying a `type` key; everything above a leaf is
    /// an attribute set whose keys are joined with `.`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let root: Value = serde_json::from_str(json)?;
        let groups = match root {
            Value::Object(map) => map
                .into_iter()
                .map(|(name, value)| {
                    let mut attrs = Vec::new();
                    collect_leaves(&value, String::new(), &mut attrs);
                    FlakeOutputGroup { name, attrs }
                })
                .collect(),
            _ => Vec::new(),
        };
        Ok(Self { groups })
    }

    /// Total number of leaf outputs across all groups.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.attrs.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn collect_leaves(value: &Value, prefix: String, out: &mut Vec<String>) {
    let Value::Object(map) = value else {
        return;
    };
    if map.contains_key("type") {
        if !prefix.is_empty() {
            out.push(prefix);
        }
        return;
    }
    for (key, child) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        collect_leaves(child, path, out);
    }
}
