//! Expression translation into Verilog operators
//!
//! Verilog's precedence (`!` over `^` over `&&` over `||`) is the same as the
//! parser's, so the token stream is translated one token at a time and the
//! grouping carries over unchanged.

use crate::expr::normalize;

/// Translate an expression into a Verilog right-hand side.
///
/// `&`, `|` and `~` become the logical `&&`, `||` and `!`; `^` stays bitwise
/// XOR (inputs are one bit wide); constants become sized literals.
pub fn translate_expression(expression: &str) -> String {
    normalize(expression)
        .split_whitespace()
        .map(|token| match token {
            "&" => "&&",
            "|" => "||",
            "~" => "!",
            "^" => "^",
            "1" => "1'b1",
            "0" => "1'b0",
            other => other,
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Output port name that does not clash with an input
pub(crate) fn output_port(preferred: &str, inputs: &[String]) -> String {
    let mut name = preferred.to_string();
    while inputs.iter().any(|input| input == &name) {
        name.push_str("_OUT");
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_operators() {
        assert_eq!(translate_expression("A & B"), "A && B");
        assert_eq!(translate_expression("A | ~B"), "A || ! B");
        assert_eq!(translate_expression("A ^ B"), "A ^ B");
        assert_eq!(
            translate_expression("(a and b) or not c"),
            "( A && B ) || ! C"
        );
    }

    #[test]
    fn test_translate_constants() {
        assert_eq!(translate_expression("A | 0"), "A || 1'b0");
        assert_eq!(translate_expression("true & A"), "1'b1 && A");
    }

    #[test]
    fn test_output_port_avoids_inputs() {
        let inputs = vec!["A".to_string(), "Y".to_string()];
        assert_eq!(output_port("Y", &inputs), "Y_OUT");
        assert_eq!(output_port("F", &inputs), "F");
    }
}
