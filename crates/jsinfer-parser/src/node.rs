//! Node representation.
//!
//! Every node stores its kind, its positions and a shape-specific payload.
//! `pos` is the full start (including leading trivia), `start` is where the
//! first token of the node begins.

use crate::base::{NodeIndex, NodeList};
use jsinfer_common::NodeId;
use jsinfer_scanner::SyntaxKind;
use rustc_hash::FxHashMap;

#[derive(Clone, Debug)]
pub struct Node {
    pub kind: SyntaxKind,
    pub pos: u32,
    pub start: u32,
    pub end: u32,
    pub parent: NodeIndex,
    pub id: NodeId,
    pub data: NodeData,
}

impl Node {
    #[inline]
    pub fn width(&self) -> u32 {
        self.end - self.start
    }
}

/// Identifier text. An empty text marks an identifier the parser created to
/// recover from a missing token.
#[derive(Clone, Debug)]
pub struct IdentifierData {
    pub text: String,
}

/// Numeric and string literals. `text` is the cooked value for strings and
/// the source spelling for numbers.
#[derive(Clone, Debug)]
pub struct LiteralData {
    pub text: String,
}

#[derive(Clone, Debug)]
pub struct ComputedPropertyData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct BindingPatternData {
    pub elements: NodeList,
}

/// `property_name: name = initializer` inside an object binding pattern, or
/// `name = initializer` inside an array binding pattern.
#[derive(Clone, Debug)]
pub struct BindingElementData {
    pub property_name: NodeIndex,
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

/// Shared by parameters and variable declarations.
#[derive(Clone, Debug)]
pub struct VariableDeclarationData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct VariableDeclarationListData {
    /// `VarKeyword`, `LetKeyword` or `ConstKeyword`.
    pub keyword: SyntaxKind,
    pub declarations: NodeList,
}

#[derive(Clone, Debug)]
pub struct VariableStatementData {
    pub declaration_list: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ObjectLiteralData {
    pub properties: NodeList,
}

#[derive(Clone, Debug)]
pub struct PropertyAssignmentData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

/// Parenthesized, `delete`, `typeof` and `void` expressions, expression
/// statements and `return` statements.
#[derive(Clone, Debug)]
pub struct ExpressionData {
    pub expression: NodeIndex,
}

/// Prefix and postfix unary expressions.
#[derive(Clone, Debug)]
pub struct UnaryExprData {
    pub operator: SyntaxKind,
    pub operand: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct BinaryExprData {
    pub left: NodeIndex,
    pub operator: SyntaxKind,
    pub right: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ConditionalExprData {
    pub condition: NodeIndex,
    pub when_true: NodeIndex,
    pub when_false: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct BlockData {
    pub statements: NodeList,
}

#[derive(Clone, Debug)]
pub struct IfData {
    pub expression: NodeIndex,
    pub then_statement: NodeIndex,
    pub else_statement: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct FunctionData {
    pub name: NodeIndex,
    pub parameters: NodeList,
    pub body: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct SourceFileData {
    pub statements: NodeList,
}

#[derive(Clone, Debug)]
pub enum NodeData {
    /// Keyword literals, empty statements and other nodes with no children.
    Token,
    Identifier(IdentifierData),
    Literal(LiteralData),
    ComputedProperty(ComputedPropertyData),
    BindingPattern(BindingPatternData),
    BindingElement(BindingElementData),
    VariableDeclaration(VariableDeclarationData),
    VariableDeclarationList(VariableDeclarationListData),
    VariableStatement(VariableStatementData),
    ObjectLiteral(ObjectLiteralData),
    PropertyAssignment(PropertyAssignmentData),
    Expression(ExpressionData),
    Unary(UnaryExprData),
    Binary(BinaryExprData),
    Conditional(ConditionalExprData),
    Block(BlockData),
    If(IfData),
    Function(FunctionData),
    SourceFile(SourceFileData),
}

/// Arena holding every node of one parsed file.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    pub(crate) nodes: Vec<Node>,
    pub(crate) id_index: FxHashMap<NodeId, NodeIndex>,
}
