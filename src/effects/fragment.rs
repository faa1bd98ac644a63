//! The unit of effect output.
//!
//! A fragment splits an effect into the statements that must run before
//! the rule returns (`prelude`) and the table fields it contributes to the
//! return value (`expression`). The assembler splices both structurally;
//! nothing is ever searched for or replaced in generated text.

/// Generated code of one effect.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeFragment {
    /// Statements run before the rule's contribution, in order.
    pub prelude: Vec<String>,
    /// Return-table fields (`mult = 4`); empty for pure side effects.
    pub expression: String,
    /// Colour of the feedback message (`G.C.BLUE`).
    pub colour: Option<String>,
    /// Feedback message as a Lua expression.
    pub message: Option<String>,
}

impl CodeFragment {
    /// A fragment that only contributes return fields.
    pub fn value(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            ..Self::default()
        }
    }

    /// A fragment that only runs statements.
    pub fn statements<I, S>(prelude: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prelude: prelude.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Set the return fields (builder pattern).
    #[must_use]
    pub fn with_expression(mut self, expression: impl Into<String>) -> Self {
        self.expression = expression.into();
        self
    }

    /// Set the message (builder pattern).
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the message colour (builder pattern).
    #[must_use]
    pub fn with_colour(mut self, colour: impl Into<String>) -> Self {
        self.colour = Some(colour.into());
        self
    }

    /// Fields of the return table, in a fixed order.
    #[must_use]
    pub fn return_fields(&self) -> Vec<String> {
        let mut fields = Vec::with_capacity(3);
        if !self.expression.is_empty() {
            fields.push(self.expression.clone());
        }
        if let Some(message) = &self.message {
            fields.push(format!("message = {message}"));
        }
        if let Some(colour) = &self.colour {
            fields.push(format!("colour = {colour}"));
        }
        fields
    }

    /// True when the fragment contributes nothing to the return value.
    #[must_use]
    pub fn contributes(&self) -> bool {
        !self.expression.is_empty() || self.message.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_fragment() {
        let fragment = CodeFragment::value("mult = 4");
        assert!(fragment.prelude.is_empty());
        assert_eq!(fragment.return_fields(), vec!["mult = 4"]);
        assert!(fragment.contributes());
    }

    #[test]
    fn test_fields_order() {
        let fragment = CodeFragment::value("repetitions = 1")
            .with_colour("G.C.RED")
            .with_message("localize(\"k_again_ex\")");
        assert_eq!(
            fragment.return_fields(),
            vec![
                "repetitions = 1",
                "message = localize(\"k_again_ex\")",
                "colour = G.C.RED"
            ]
        );
    }

    #[test]
    fn test_statement_fragment() {
        let fragment = CodeFragment::statements(["ease_dollars(5)"]);
        assert!(!fragment.contributes());
        assert!(fragment.return_fields().is_empty());
    }
}
