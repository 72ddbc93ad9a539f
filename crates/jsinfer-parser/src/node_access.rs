//! NodeArena access methods and node kind classification.

use crate::base::NodeIndex;
use crate::node::*;
use jsinfer_scanner::{SyntaxKind, token_is_assignment_operator};
use smallvec::SmallVec;

/// Kinds that denote expressions.
pub fn is_expression_kind(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Identifier
            | SyntaxKind::NumericLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::ObjectLiteralExpression
            | SyntaxKind::ParenthesizedExpression
            | SyntaxKind::DeleteExpression
            | SyntaxKind::TypeOfExpression
            | SyntaxKind::VoidExpression
            | SyntaxKind::PrefixUnaryExpression
            | SyntaxKind::PostfixUnaryExpression
            | SyntaxKind::BinaryExpression
            | SyntaxKind::ConditionalExpression
    )
}

/// Declarations that can carry a value symbol.
pub fn is_declaration_kind(kind: SyntaxKind) -> bool {
    is_variable_like_kind(kind) || kind == SyntaxKind::FunctionDeclaration
}

/// Declarations whose initial type comes from an initializer.
pub fn is_variable_like_kind(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::VariableDeclaration
            | SyntaxKind::BindingElement
            | SyntaxKind::Parameter
            | SyntaxKind::PropertyAssignment
    )
}

pub fn is_function_like_kind(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::FunctionDeclaration
}

impl NodeArena {
    /// Children of `index` in source order.
    pub fn children(&self, index: NodeIndex) -> SmallVec<[NodeIndex; 4]> {
        let mut out = SmallVec::new();
        self.for_each_child(index, |child| out.push(child));
        out
    }

    /// Visit the present children of `index` in source order.
    pub fn for_each_child(&self, index: NodeIndex, mut f: impl FnMut(NodeIndex)) {
        let Some(node) = self.get(index) else {
            return;
        };
        let mut visit = |child: NodeIndex| {
            if child.is_some() {
                f(child);
            }
        };
        match &node.data {
            NodeData::Token | NodeData::Identifier(_) | NodeData::Literal(_) => {}
            NodeData::ComputedProperty(data) => visit(data.expression),
            NodeData::BindingPattern(data) => data.elements.iter().copied().for_each(visit),
            NodeData::BindingElement(data) => {
                visit(data.property_name);
                visit(data.name);
                visit(data.initializer);
            }
            NodeData::VariableDeclaration(data) => {
                visit(data.name);
                visit(data.initializer);
            }
            NodeData::VariableDeclarationList(data) => {
                data.declarations.iter().copied().for_each(visit)
            }
            NodeData::VariableStatement(data) => visit(data.declaration_list),
            NodeData::ObjectLiteral(data) => data.properties.iter().copied().for_each(visit),
            NodeData::PropertyAssignment(data) => {
                visit(data.name);
                visit(data.initializer);
            }
            NodeData::Expression(data) => visit(data.expression),
            NodeData::Unary(data) => visit(data.operand),
            NodeData::Binary(data) => {
                visit(data.left);
                visit(data.right);
            }
            NodeData::Conditional(data) => {
                visit(data.condition);
                visit(data.when_true);
                visit(data.when_false);
            }
            NodeData::Block(data) => data.statements.iter().copied().for_each(visit),
            NodeData::If(data) => {
                visit(data.expression);
                visit(data.then_statement);
                visit(data.else_statement);
            }
            NodeData::Function(data) => {
                visit(data.name);
                data.parameters.iter().copied().for_each(&mut visit);
                visit(data.body);
            }
            NodeData::SourceFile(data) => data.statements.iter().copied().for_each(visit),
        }
    }

    /// Text of an identifier or literal node.
    pub fn text_of(&self, index: NodeIndex) -> Option<&str> {
        match &self.get(index)?.data {
            NodeData::Identifier(data) => Some(&data.text),
            NodeData::Literal(data) => Some(&data.text),
            _ => None,
        }
    }

    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        match &self.get(index)?.data {
            NodeData::Identifier(data) => Some(&data.text),
            _ => None,
        }
    }

    /// The `name` of a declaration node.
    pub fn declaration_name(&self, index: NodeIndex) -> NodeIndex {
        let Some(node) = self.get(index) else {
            return NodeIndex::NONE;
        };
        match &node.data {
            NodeData::BindingElement(data) => data.name,
            NodeData::VariableDeclaration(data) => data.name,
            NodeData::PropertyAssignment(data) => data.name,
            NodeData::Function(data) => data.name,
            _ => NodeIndex::NONE,
        }
    }

    /// The initializer (default value) of a variable-like declaration.
    pub fn initializer(&self, index: NodeIndex) -> NodeIndex {
        let Some(node) = self.get(index) else {
            return NodeIndex::NONE;
        };
        match &node.data {
            NodeData::BindingElement(data) => data.initializer,
            NodeData::VariableDeclaration(data) => data.initializer,
            NodeData::PropertyAssignment(data) => data.initializer,
            _ => NodeIndex::NONE,
        }
    }

    pub fn get_binary(&self, index: NodeIndex) -> Option<&BinaryExprData> {
        match &self.get(index)?.data {
            NodeData::Binary(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_unary(&self, index: NodeIndex) -> Option<&UnaryExprData> {
        match &self.get(index)?.data {
            NodeData::Unary(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_expression(&self, index: NodeIndex) -> Option<&ExpressionData> {
        match &self.get(index)?.data {
            NodeData::Expression(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_conditional(&self, index: NodeIndex) -> Option<&ConditionalExprData> {
        match &self.get(index)?.data {
            NodeData::Conditional(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_binding_pattern(&self, index: NodeIndex) -> Option<&BindingPatternData> {
        match &self.get(index)?.data {
            NodeData::BindingPattern(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_binding_element(&self, index: NodeIndex) -> Option<&BindingElementData> {
        match &self.get(index)?.data {
            NodeData::BindingElement(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_computed_property(&self, index: NodeIndex) -> Option<&ComputedPropertyData> {
        match &self.get(index)?.data {
            NodeData::ComputedProperty(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_variable_declaration_list(
        &self,
        index: NodeIndex,
    ) -> Option<&VariableDeclarationListData> {
        match &self.get(index)?.data {
            NodeData::VariableDeclarationList(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_function(&self, index: NodeIndex) -> Option<&FunctionData> {
        match &self.get(index)?.data {
            NodeData::Function(data) => Some(data),
            _ => None,
        }
    }

    /// Whether `index` is the left operand of an assignment expression,
    /// returning that assignment.
    pub fn assignment_target_of(&self, index: NodeIndex) -> Option<NodeIndex> {
        let parent = self.parent(index);
        let binary = self.get_binary(parent)?;
        (binary.left == index && token_is_assignment_operator(binary.operator)).then_some(parent)
    }

    /// Walk out of any parenthesized expressions wrapping `index`.
    pub fn skip_outer_parentheses(&self, mut index: NodeIndex) -> NodeIndex {
        loop {
            let parent = self.parent(index);
            if self.kind(parent) != Some(SyntaxKind::ParenthesizedExpression) {
                return index;
            }
            index = parent;
        }
    }

    /// Whether the identifier at `index` is the name of an object literal
    /// property (and so not a reference).
    pub fn is_property_name(&self, index: NodeIndex) -> bool {
        let parent = self.parent(index);
        match self.get(parent).map(|node| &node.data) {
            Some(NodeData::PropertyAssignment(data)) => data.name == index,
            Some(NodeData::BindingElement(data)) => data.property_name == index,
            _ => false,
        }
    }

    /// Whether the identifier at `index` is the name of its parent declaration.
    pub fn is_declaration_name(&self, index: NodeIndex) -> bool {
        let parent = self.parent(index);
        self.declaration_name(parent) == index
    }

    /// Nearest ancestor (or self) of the given kind.
    pub fn find_ancestor(&self, mut index: NodeIndex, kind: SyntaxKind) -> NodeIndex {
        while let Some(node) = self.get(index) {
            if node.kind == kind {
                return index;
            }
            index = node.parent;
        }
        NodeIndex::NONE
    }
}

#[cfg(test)]
#[path = "../tests/node_access_tests.rs"]
mod node_access_tests;
