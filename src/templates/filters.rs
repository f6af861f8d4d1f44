//! Custom MiniJinja filters for Verilog generation

use minijinja::value::Value;
use minijinja::Environment;

/// Register all custom filters with the environment
pub fn register_filters(env: &mut Environment<'_>) {
    env.add_filter("join_ports", join_ports);
    env.add_filter("escape_string", escape_string);
}

/// Join a list of port names as a Verilog port list: `A, B, C`
fn join_ports(value: Value) -> Result<String, minijinja::Error> {
    let names: Vec<String> = value.try_iter()?.map(|v| v.to_string()).collect();
    Ok(names.join(", "))
}

/// Escape text for a Verilog string literal
pub(crate) fn escape_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_join_ports() {
        let mut env = Environment::new();
        register_filters(&mut env);
        let out = env
            .render_str("{{ names | join_ports }}", context! { names => vec!["A", "B", "C"] })
            .unwrap();
        assert_eq!(out, "A, B, C");
    }

    #[test]
    fn test_escape_string() {
        assert_eq!(escape_string(r#"say "hi" \ bye"#), r#"say \"hi\" \\ bye"#);
        assert_eq!(escape_string("A & B"), "A & B");
    }
}
