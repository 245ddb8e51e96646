//! Parsing of engine `option` declarations.

/// The type and constraints of an engine option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// A boolean switch.
    Check { default: Option<bool> },
    /// An integer in a range.
    Spin {
        default: Option<i64>,
        min: Option<i64>,
        max: Option<i64>,
    },
    /// One value out of a fixed set.
    Combo {
        default: Option<String>,
        vars: Vec<String>,
    },
    /// A stateless action.
    Button,
    /// Free text.
    Text { default: Option<String> },
}

/// An option declared by the engine during the `uci` handshake.
///
/// Declarations have the shape
/// `option name <name> type <t> [default <v>] [min <a>] [max <b>] [var <c>]*`
/// where the name may contain spaces. Malformed numeric values are
/// ignored, leaving the field unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOption {
    pub name: String,
    pub value: OptionValue,
}

impl EngineOption {
    /// Parses an `option` line. Returns `None` when the line is not an
    /// option declaration or its type is unknown.
    pub fn parse(line: &str) -> Option<EngineOption> {
        let rest = line.trim().strip_prefix("option")?;
        let tokens: Vec<&str> = rest.split_whitespace().collect();

        // The name runs from after "name" up to the "type" keyword.
        let name_start = tokens.iter().position(|t| *t == "name")? + 1;
        let type_pos = tokens.iter().position(|t| *t == "type")?;
        if name_start > type_pos {
            return None;
        }
        let name = tokens[name_start..type_pos].join(" ");
        let kind = *tokens.get(type_pos + 1)?;

        let mut default: Option<String> = None;
        let mut min: Option<i64> = None;
        let mut max: Option<i64> = None;
        let mut vars: Vec<String> = Vec::new();

        let mut i = type_pos + 2;
        while i < tokens.len() {
            match tokens[i] {
                "default" => {
                    // The default value may span tokens (string options,
                    // combo names with spaces); it runs to the next
                    // keyword.
                    let end = Self::next_keyword(&tokens, i + 1);
                    default = Some(tokens[i + 1..end].join(" "));
                    i = end;
                }
                "min" => {
                    min = tokens.get(i + 1).and_then(|t| t.parse().ok());
                    i += 2;
                }
                "max" => {
                    max = tokens.get(i + 1).and_then(|t| t.parse().ok());
                    i += 2;
                }
                "var" => {
                    let end = Self::next_keyword(&tokens, i + 1);
                    vars.push(tokens[i + 1..end].join(" "));
                    i = end;
                }
                _ => i += 1,
            }
        }

        let value = match kind {
            "check" => OptionValue::Check {
                default: default.as_deref().and_then(|d| match d {
                    "true" => Some(true),
                    "false" => Some(false),
                    _ => None,
                }),
            },
            "spin" => OptionValue::Spin {
                default: default.as_deref().and_then(|d| d.parse().ok()),
                min,
                max,
            },
            "combo" => OptionValue::Combo { default, vars },
            "button" => OptionValue::Button,
            "string" => OptionValue::Text {
                // Engines write "<empty>" for an empty default.
                default: default.filter(|d| d != "<empty>"),
            },
            _ => return None,
        };

        Some(EngineOption { name, value })
    }

    fn next_keyword(tokens: &[&str], from: usize) -> usize {
        tokens[from..]
            .iter()
            .position(|t| matches!(*t, "default" | "min" | "max" | "var"))
            .map(|p| from + p)
            .unwrap_or(tokens.len())
    }
}
