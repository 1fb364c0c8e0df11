use serde::{Deserialize, Serialize};

/// Comparison carried by a filter value in the query string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    #[default]
    Equals,
    Contains,
    LesserThan,
    GreaterThan,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Equals,
        Operator::Contains,
        Operator::LesserThan,
        Operator::GreaterThan,
    ];

    /// The marker written in front of the value: `~`, `<`, `>` or nothing.
    pub fn prefix(self) -> &'static str {
        match self {
            Operator::Equals => "",
            Operator::Contains => "~",
            Operator::LesserThan => "<",
            Operator::GreaterThan => ">",
        }
    }

    /// Splits a raw query value into its operator and the bare value.
    pub(crate) fn split(raw: &str) -> (Operator, &str) {
        for op in [Operator::Contains, Operator::LesserThan, Operator::GreaterThan] {
            if let Some(rest) = raw.strip_prefix(op.prefix()) {
                return (op, rest);
            }
        }
        (Operator::Equals, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_recognises_every_prefix() {
        assert_eq!(Operator::split("~acme"), (Operator::Contains, "acme"));
        assert_eq!(Operator::split("<10"), (Operator::LesserThan, "10"));
        assert_eq!(Operator::split(">10"), (Operator::GreaterThan, "10"));
        assert_eq!(Operator::split("acme"), (Operator::Equals, "acme"));
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&Operator::LesserThan).unwrap();
        assert_eq!(json, "\"lesser_than\"");
        let op: Operator = serde_json::from_str("\"greater_than\"").unwrap();
        assert_eq!(op, Operator::GreaterThan);
    }
}
