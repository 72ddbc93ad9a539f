//! Structural inference of expressions.
//!
//! The result may still contain deferred parts (symbols of referenced
//! declarations, additive types) that only the evaluator resolves.

use super::InferenceContext;
use crate::references::ReferenceTracker;
use jsinfer_binder::SourceFile;
use jsinfer_common::DeclarationRef;
use jsinfer_parser::NodeIndex;
use jsinfer_scanner::SyntaxKind;
use jsinfer_solver::TypeInfoId;
use tracing::trace;

impl<R: ReferenceTracker> InferenceContext<'_, R> {
    /// Infer the type of the expression at `node`, optionally contextually
    /// typed by `contextual`.
    ///
    /// # Panics
    ///
    /// Panics when `node` is not an expression, or carries an operator the
    /// inference rules do not cover.
    pub(crate) fn infer_expression(
        &mut self,
        file: &SourceFile,
        node: NodeIndex,
        contextual: Option<TypeInfoId>,
    ) -> Option<TypeInfoId> {
        let arena = file.arena();
        let kind = arena.kind(node)?;
        match kind {
            SyntaxKind::NumericLiteral => Some(TypeInfoId::NUMBER),
            SyntaxKind::StringLiteral => Some(TypeInfoId::STRING),
            SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => Some(TypeInfoId::BOOLEAN),
            SyntaxKind::NullKeyword => None,

            SyntaxKind::BinaryExpression => self.infer_binary(file, node, contextual),
            SyntaxKind::ConditionalExpression => {
                let conditional = arena.get_conditional(node)?;
                let (when_true, when_false) = (conditional.when_true, conditional.when_false);
                let when_true = self.infer_expression(file, when_true, contextual);
                let when_false = self.infer_expression(file, when_false, contextual);
                self.types.union(when_true, when_false)
            }
            SyntaxKind::DeleteExpression => Some(TypeInfoId::BOOLEAN),
            SyntaxKind::Identifier => self.infer_identifier(file, node),
            SyntaxKind::ParenthesizedExpression => {
                let inner = arena.get_expression(node)?.expression;
                self.infer_expression(file, inner, contextual)
            }
            SyntaxKind::PostfixUnaryExpression => Some(TypeInfoId::NUMBER),
            SyntaxKind::PrefixUnaryExpression => {
                let operator = arena.get_unary(node)?.operator;
                match operator {
                    SyntaxKind::PlusToken
                    | SyntaxKind::MinusToken
                    | SyntaxKind::TildeToken
                    | SyntaxKind::PlusPlusToken
                    | SyntaxKind::MinusMinusToken => Some(TypeInfoId::NUMBER),
                    SyntaxKind::ExclamationToken => Some(TypeInfoId::BOOLEAN),
                    _ => panic!("no inference rule for prefix operator {operator:?}"),
                }
            }
            SyntaxKind::TypeOfExpression => Some(TypeInfoId::STRING),
            // `void` produces undefined, which carries no information.
            SyntaxKind::VoidExpression => None,
            SyntaxKind::ObjectLiteralExpression => None,
            _ => panic!("no inference rule for {kind:?}"),
        }
    }

    fn infer_binary(
        &mut self,
        file: &SourceFile,
        node: NodeIndex,
        contextual: Option<TypeInfoId>,
    ) -> Option<TypeInfoId> {
        let binary = file.arena().get_binary(node)?;
        let (left, operator, right) = (binary.left, binary.operator, binary.right);
        match operator {
            SyntaxKind::AsteriskToken
            | SyntaxKind::AsteriskEqualsToken
            | SyntaxKind::SlashToken
            | SyntaxKind::SlashEqualsToken
            | SyntaxKind::PercentToken
            | SyntaxKind::PercentEqualsToken
            | SyntaxKind::MinusToken
            | SyntaxKind::MinusEqualsToken
            | SyntaxKind::LessThanLessThanToken
            | SyntaxKind::LessThanLessThanEqualsToken
            | SyntaxKind::GreaterThanGreaterThanToken
            | SyntaxKind::GreaterThanGreaterThanEqualsToken
            | SyntaxKind::GreaterThanGreaterThanGreaterThanToken
            | SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken
            | SyntaxKind::AmpersandToken
            | SyntaxKind::AmpersandEqualsToken
            | SyntaxKind::CaretToken
            | SyntaxKind::CaretEqualsToken
            | SyntaxKind::BarToken
            | SyntaxKind::BarEqualsToken => Some(TypeInfoId::NUMBER),

            SyntaxKind::InKeyword
            | SyntaxKind::InstanceOfKeyword
            | SyntaxKind::LessThanToken
            | SyntaxKind::GreaterThanToken
            | SyntaxKind::LessThanEqualsToken
            | SyntaxKind::GreaterThanEqualsToken
            | SyntaxKind::EqualsEqualsToken
            | SyntaxKind::ExclamationEqualsToken
            | SyntaxKind::EqualsEqualsEqualsToken
            | SyntaxKind::ExclamationEqualsEqualsToken => Some(TypeInfoId::BOOLEAN),

            // The result has the type of the right operand.
            SyntaxKind::AmpersandAmpersandToken
            | SyntaxKind::CommaToken
            | SyntaxKind::EqualsToken => self.infer_expression(file, right, None),

            SyntaxKind::BarBarToken => {
                if contextual.is_some() {
                    let left = self.infer_expression(file, left, contextual);
                    let right = self.infer_expression(file, right, contextual);
                    self.types.union(left, right)
                } else {
                    let left = self.infer_expression(file, left, None);
                    let right = self.infer_expression(file, right, left);
                    self.types.union(left, right)
                }
            }

            SyntaxKind::PlusToken | SyntaxKind::PlusEqualsToken => {
                let left = self.infer_expression(file, left, None);
                let right = self.infer_expression(file, right, None);
                self.infer_additive(left, right)
            }

            _ => panic!("no inference rule for binary operator {operator:?}"),
        }
    }

    /// `left + right` where either operand may be unknown.
    fn infer_additive(
        &mut self,
        left: Option<TypeInfoId>,
        right: Option<TypeInfoId>,
    ) -> Option<TypeInfoId> {
        // null and undefined take the type of the other operand.
        let left = left.or(right);
        let right = right.or(left);
        match (left, right) {
            (Some(TypeInfoId::NUMBER), Some(TypeInfoId::NUMBER)) => Some(TypeInfoId::NUMBER),
            (Some(TypeInfoId::STRING), _) | (_, Some(TypeInfoId::STRING)) => {
                Some(TypeInfoId::STRING)
            }
            (None, None) => Some(TypeInfoId::STRING_OR_NUMBER),
            (Some(TypeInfoId::STRING_OR_NUMBER), Some(TypeInfoId::STRING_OR_NUMBER)) => {
                Some(TypeInfoId::STRING_OR_NUMBER)
            }
            _ => self.types.plus(left, right),
        }
    }

    /// The lazy symbol of the declaration `node` refers to.
    fn infer_identifier(&mut self, file: &SourceFile, node: NodeIndex) -> Option<TypeInfoId> {
        let reference = file.arena().id(node);
        let declaration = self
            .references
            .declaration_of(file.file_name(), reference)?
            .clone();
        Some(self.symbol_for_declaration(declaration))
    }

    /// The Symbol cached for `declaration`, created on first use.
    pub(crate) fn symbol_for_declaration(&mut self, declaration: DeclarationRef) -> TypeInfoId {
        if let Some(&symbol) = self.declaration_types.get(&declaration.node) {
            return symbol;
        }
        let node = declaration.node;
        let symbol = self.types.create_symbol(declaration);
        self.declaration_types.insert(node, symbol);
        trace!(?node, ?symbol, "created symbol for declaration");
        symbol
    }
}
