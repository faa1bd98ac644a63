//! Condition trees.
//!
//! A rule's conditions form a tree of groups. Each group joins its
//! children with `and` or `or`; any node may be negated. An empty tree
//! always holds.

use serde::{Deserialize, Serialize};

use crate::core::{CodegenErrorKind, CodegenFallback, GenContext};
use crate::params::{normalize, ParamMap, ParamValue};

use super::registry::ConditionKind;

/// One condition with its raw parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConditionInstance {
    /// Condition kind id.
    pub kind: String,
    #[serde(default)]
    pub params: ParamMap,
    /// Invert the condition.
    #[serde(default)]
    pub negate: bool,
}

impl ConditionInstance {
    /// Create a condition without parameters.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            params: ParamMap::default(),
            negate: false,
        }
    }

    /// Set a parameter (builder pattern).
    #[must_use]
    pub fn with_param(mut self, id: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(id.into(), value.into());
        self
    }

    /// Invert the condition (builder pattern).
    #[must_use]
    pub fn negated(mut self) -> Self {
        self.negate = !self.negate;
        self
    }
}

/// How a group joins its children.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicOp {
    #[default]
    And,
    Or,
}

impl LogicOp {
    const fn lua(self) -> &'static str {
        match self {
            LogicOp::And => " and ",
            LogicOp::Or => " or ",
        }
    }
}

/// A node of a condition tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionNode {
    Group(ConditionGroup),
    Condition(ConditionInstance),
}

impl From<ConditionInstance> for ConditionNode {
    fn from(condition: ConditionInstance) -> Self {
        ConditionNode::Condition(condition)
    }
}

impl From<ConditionGroup> for ConditionNode {
    fn from(group: ConditionGroup) -> Self {
        ConditionNode::Group(group)
    }
}

/// Children joined by one operator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionGroup {
    #[serde(default)]
    pub operator: LogicOp,
    #[serde(default)]
    pub negate: bool,
    pub children: Vec<ConditionNode>,
}

impl ConditionGroup {
    /// Conjunction of the given nodes.
    pub fn all<I, N>(children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<ConditionNode>,
    {
        Self {
            operator: LogicOp::And,
            negate: false,
            children: children.into_iter().map(Into::into).collect(),
        }
    }

    /// Disjunction of the given nodes.
    pub fn any<I, N>(children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<ConditionNode>,
    {
        Self {
            operator: LogicOp::Or,
            ..Self::all(children)
        }
    }

    /// Invert the group (builder pattern).
    #[must_use]
    pub fn negated(mut self) -> Self {
        self.negate = !self.negate;
        self
    }

    /// True when the group holds no condition at any depth.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.iter().all(|child| match child {
            ConditionNode::Group(group) => group.is_empty(),
            ConditionNode::Condition(_) => false,
        })
    }

    /// Every condition in the tree, depth first.
    pub fn conditions(&self) -> Vec<&ConditionInstance> {
        let mut out = Vec::new();
        collect(self, &mut out);
        out
    }
}

fn collect<'a>(group: &'a ConditionGroup, out: &mut Vec<&'a ConditionInstance>) {
    for child in &group.children {
        match child {
            ConditionNode::Group(inner) => collect(inner, out),
            ConditionNode::Condition(condition) => out.push(condition),
        }
    }
}

/// Compile one condition to a boolean expression.
///
/// Unknown kinds are errors; unusable parameter values fall back to their
/// defaults and are recorded in `fallbacks`.
pub fn compile_condition(
    condition: &ConditionInstance,
    ctx: &GenContext<'_>,
    fallbacks: &mut Vec<CodegenFallback>,
) -> Result<String, CodegenErrorKind> {
    let kind = ConditionKind::from_id(&condition.kind)
        .ok_or_else(|| CodegenErrorKind::UnknownCondition(condition.kind.clone()))?;
    let (params, replaced) = normalize(kind.schema(), &condition.params);
    ctx.record(kind.id(), replaced, fallbacks);
    let expr = (kind.generator())(&params, ctx)?;
    Ok(if condition.negate { negate(&expr) } else { expr })
}

/// Compile a condition tree to one boolean expression.
///
/// Empty groups read as `true` and drop out of their parent.
pub fn compile_tree(
    group: &ConditionGroup,
    ctx: &GenContext<'_>,
    fallbacks: &mut Vec<CodegenFallback>,
) -> Result<String, CodegenErrorKind> {
    let mut parts = Vec::with_capacity(group.children.len());
    for child in &group.children {
        match child {
            ConditionNode::Group(inner) if inner.is_empty() => {}
            ConditionNode::Group(inner) => parts.push(compile_tree(inner, ctx, fallbacks)?),
            ConditionNode::Condition(condition) => {
                parts.push(compile_condition(condition, ctx, fallbacks)?);
            }
        }
    }

    let expr = match parts.len() {
        0 => "true".to_string(),
        1 => parts.remove(0),
        _ => parts
            .iter()
            .map(|part| parenthesize(part))
            .collect::<Vec<_>>()
            .join(group.operator.lua()),
    };
    Ok(if group.negate { negate(&expr) } else { expr })
}

fn negate(expr: &str) -> String {
    format!("not ({expr})")
}

/// Wrap compound expressions so operator precedence survives joining.
fn parenthesize(expr: &str) -> String {
    let compound = expr.contains(" and ") || expr.contains(" or ") || expr.starts_with("not ");
    if compound && !is_wrapped(expr) {
        format!("({expr})")
    } else {
        expr.to_string()
    }
}

/// True when the first `(` of `expr` closes at its last character.
fn is_wrapped(expr: &str) -> bool {
    if !expr.starts_with('(') {
        return false;
    }
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut chars = expr.char_indices();
    while let Some((i, ch)) = chars.next() {
        if let Some(q) = quote {
            if ch == '\\' {
                chars.next();
            } else if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' => quote = Some(ch),
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return i == expr.len() - 1;
                }
            }
            _ => {}
        }
    }
    false
}
