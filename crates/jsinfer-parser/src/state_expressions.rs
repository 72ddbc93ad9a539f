//! Parser state - expression parsing methods

use crate::base::{NodeIndex, NodeList};
use crate::node::*;
use crate::state::ParserState;
use jsinfer_scanner::{SyntaxKind, binary_operator_precedence, token_is_assignment_operator};

impl ParserState {
    pub(crate) fn is_start_of_expression(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::Identifier
                | SyntaxKind::NumericLiteral
                | SyntaxKind::StringLiteral
                | SyntaxKind::TrueKeyword
                | SyntaxKind::FalseKeyword
                | SyntaxKind::NullKeyword
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBraceToken
                | SyntaxKind::PlusToken
                | SyntaxKind::MinusToken
                | SyntaxKind::TildeToken
                | SyntaxKind::ExclamationToken
                | SyntaxKind::PlusPlusToken
                | SyntaxKind::MinusMinusToken
                | SyntaxKind::TypeOfKeyword
                | SyntaxKind::VoidKeyword
                | SyntaxKind::DeleteKeyword
        )
    }

    /// Expression including the comma operator.
    pub(crate) fn parse_expression(&mut self) -> NodeIndex {
        let (pos, start) = (self.token_pos(), self.token_start());
        let mut left = self.parse_assignment_expression();
        while self.is_token(SyntaxKind::CommaToken) {
            self.next_token();
            let right = self.parse_assignment_expression();
            left = self.add(
                SyntaxKind::BinaryExpression,
                pos,
                start,
                NodeData::Binary(BinaryExprData {
                    left,
                    operator: SyntaxKind::CommaToken,
                    right,
                }),
            );
        }
        left
    }

    /// Assignments are right associative: `a = b += c` is `a = (b += c)`.
    pub(crate) fn parse_assignment_expression(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return self.create_missing_identifier("Expression expected.");
        }
        let (pos, start) = (self.token_pos(), self.token_start());
        let left = self.parse_conditional_expression();
        let result = if token_is_assignment_operator(self.token()) {
            let operator = self.token();
            self.next_token();
            let right = self.parse_assignment_expression();
            self.add(
                SyntaxKind::BinaryExpression,
                pos,
                start,
                NodeData::Binary(BinaryExprData {
                    left,
                    operator,
                    right,
                }),
            )
        } else {
            left
        };
        self.leave_recursion();
        result
    }

    fn parse_conditional_expression(&mut self) -> NodeIndex {
        let (pos, start) = (self.token_pos(), self.token_start());
        let condition = self.parse_binary_expression(0);
        if !self.parse_optional(SyntaxKind::QuestionToken) {
            return condition;
        }
        let when_true = self.parse_assignment_expression();
        self.parse_expected(SyntaxKind::ColonToken);
        let when_false = self.parse_assignment_expression();
        self.add(
            SyntaxKind::ConditionalExpression,
            pos,
            start,
            NodeData::Conditional(ConditionalExprData {
                condition,
                when_true,
                when_false,
            }),
        )
    }

    /// Precedence climbing over left-associative binary operators binding
    /// tighter than `min_precedence`.
    fn parse_binary_expression(&mut self, min_precedence: u8) -> NodeIndex {
        let (pos, start) = (self.token_pos(), self.token_start());
        let mut left = self.parse_unary_expression();
        loop {
            let operator = self.token();
            let precedence = binary_operator_precedence(operator);
            if precedence == 0 || precedence <= min_precedence {
                return left;
            }
            self.next_token();
            let right = self.parse_binary_expression(precedence);
            left = self.add(
                SyntaxKind::BinaryExpression,
                pos,
                start,
                NodeData::Binary(BinaryExprData {
                    left,
                    operator,
                    right,
                }),
            );
        }
    }

    fn parse_unary_expression(&mut self) -> NodeIndex {
        let (pos, start) = (self.token_pos(), self.token_start());
        let operator = self.token();
        let kind = match operator {
            SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken => SyntaxKind::PrefixUnaryExpression,
            SyntaxKind::TypeOfKeyword => SyntaxKind::TypeOfExpression,
            SyntaxKind::VoidKeyword => SyntaxKind::VoidExpression,
            SyntaxKind::DeleteKeyword => SyntaxKind::DeleteExpression,
            _ => return self.parse_postfix_expression(),
        };

        if !self.enter_recursion() {
            return self.create_missing_identifier("Expression expected.");
        }
        self.next_token();
        let operand = self.parse_unary_expression();
        self.leave_recursion();

        let data = if kind == SyntaxKind::PrefixUnaryExpression {
            NodeData::Unary(UnaryExprData { operator, operand })
        } else {
            NodeData::Expression(ExpressionData {
                expression: operand,
            })
        };
        self.add(kind, pos, start, data)
    }

    fn parse_postfix_expression(&mut self) -> NodeIndex {
        let (pos, start) = (self.token_pos(), self.token_start());
        let operand = self.parse_primary_expression();
        let operator = self.token();
        if matches!(operator, SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken)
            && !self.scanner.has_preceding_line_break()
        {
            self.next_token();
            return self.add(
                SyntaxKind::PostfixUnaryExpression,
                pos,
                start,
                NodeData::Unary(UnaryExprData { operator, operand }),
            );
        }
        operand
    }

    fn parse_primary_expression(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::Identifier => self.parse_identifier(),
            SyntaxKind::NumericLiteral | SyntaxKind::StringLiteral => self.parse_literal(),
            kind @ (SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword | SyntaxKind::NullKeyword) => {
                let (pos, start) = (self.token_pos(), self.token_start());
                self.next_token();
                self.add(kind, pos, start, NodeData::Token)
            }
            SyntaxKind::OpenParenToken => self.parse_parenthesized_expression(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(),
            _ => self.create_missing_identifier("Expression expected."),
        }
    }

    pub(crate) fn parse_literal(&mut self) -> NodeIndex {
        let (pos, start) = (self.token_pos(), self.token_start());
        let kind = self.token();
        let text = self.scanner.token_value().to_string();
        self.next_token();
        self.add(kind, pos, start, NodeData::Literal(LiteralData { text }))
    }

    fn parse_parenthesized_expression(&mut self) -> NodeIndex {
        let (pos, start) = (self.token_pos(), self.token_start());
        if !self.enter_recursion() {
            return self.create_missing_identifier("Expression expected.");
        }
        self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.parse_expression();
        self.parse_expected(SyntaxKind::CloseParenToken);
        self.leave_recursion();
        self.add(
            SyntaxKind::ParenthesizedExpression,
            pos,
            start,
            NodeData::Expression(ExpressionData { expression }),
        )
    }

    fn parse_object_literal(&mut self) -> NodeIndex {
        let (pos, start) = (self.token_pos(), self.token_start());
        if !self.enter_recursion() {
            return self.create_missing_identifier("Expression expected.");
        }
        self.parse_expected(SyntaxKind::OpenBraceToken);

        let mut properties = NodeList::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            properties.push(self.parse_property_assignment());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.leave_recursion();

        self.add(
            SyntaxKind::ObjectLiteralExpression,
            pos,
            start,
            NodeData::ObjectLiteral(ObjectLiteralData { properties }),
        )
    }

    fn parse_property_assignment(&mut self) -> NodeIndex {
        let (pos, start) = (self.token_pos(), self.token_start());
        let name = self.parse_property_name();
        let initializer = if self.parse_expected(SyntaxKind::ColonToken) {
            self.parse_assignment_expression()
        } else {
            NodeIndex::NONE
        };
        self.add(
            SyntaxKind::PropertyAssignment,
            pos,
            start,
            NodeData::PropertyAssignment(PropertyAssignmentData { name, initializer }),
        )
    }
}
