use toml::{Value, map::Map};

/// Merges imported configs in order, then the main config on top.
pub(super) fn merge_toml_configs(imports: Vec<Value>, main: Value) -> Value {
    let base = imports
        .into_iter()
        .fold(Value::Table(Map::new()), merge_two_toml_configs);

    merge_two_toml_configs(base, main)
}

/// Deep merges two tables; `overlay` wins for every key present in both.
/// Non-table values are replaced wholesale, so arrays such as
/// `catalog.videos` are never concatenated.
pub(super) fn merge_two_toml_configs(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(mut merged_table)) => {
            for (key, base_value) in base_table {
                let merged_value = match merged_table.remove(&key) {
                    None => base_value,
                    Some(overlay_value) => merge_two_toml_configs(base_value, overlay_value),
                };
                merged_table.insert(key, merged_value);
            }

            Value::Table(merged_table)
        }
        (_, overlay) => overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(clippy::unwrap_used)]
    fn parse(s: &str) -> Value {
        toml::from_str(s).unwrap()
    }

    #[test]
    fn overlay_wins_and_base_keys_survive() {
        let base = parse("[player]\nautoplay = false\nprovider_app_id = \"a\"");
        let overlay = parse("[player]\nautoplay = true");

        let merged = merge_two_toml_configs(base, overlay);

        assert_eq!(merged["player"]["autoplay"].as_bool(), Some(true));
        assert_eq!(merged["player"]["provider_app_id"].as_str(), Some("a"));
    }

    #[test]
    fn arrays_are_replaced_not_appended() {
        let base = parse("[catalog]\ncategories = [\"a\", \"b\"]");
        let overlay = parse("[catalog]\ncategories = [\"c\"]");

        let merged = merge_toml_configs(vec![base], overlay);

        assert_eq!(
            merged["catalog"]["categories"].as_array().map(Vec::len),
            Some(1)
        );
    }
}
