//! Parser state - statement and declaration parsing methods

use crate::base::{NodeIndex, NodeList};
use crate::node::*;
use crate::state::ParserState;
use jsinfer_scanner::{SyntaxKind, token_is_identifier_or_keyword};

impl ParserState {
    /// Parse a whole source file.
    pub fn parse_source_file(&mut self) -> NodeIndex {
        self.next_token();

        let mut statements = NodeList::new();
        while !self.is_token(SyntaxKind::EndOfFileToken) {
            let before = self.scanner.token_start();
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }
            // Stray tokens (e.g. an unmatched `}`) would otherwise stall the loop.
            if self.scanner.token_start() == before && !self.is_token(SyntaxKind::EndOfFileToken) {
                self.error_at_current_token("Declaration or statement expected.");
                self.next_token();
            }
        }

        // The file node spans the trailing trivia too.
        let end = self.scanner.token_end();
        self.previous_token_end = end;
        let root = self.arena.add_node(
            SyntaxKind::SourceFile,
            0,
            0,
            end,
            NodeData::SourceFile(SourceFileData { statements }),
        );
        self.arena.finish(root);
        root
    }

    pub(crate) fn parse_statement(&mut self) -> Option<NodeIndex> {
        if !self.enter_recursion() {
            self.next_token();
            return None;
        }
        let statement = match self.token() {
            SyntaxKind::OpenBraceToken => Some(self.parse_block()),
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword => {
                Some(self.parse_variable_statement())
            }
            SyntaxKind::FunctionKeyword => Some(self.parse_function_declaration()),
            SyntaxKind::IfKeyword => Some(self.parse_if_statement()),
            SyntaxKind::ReturnKeyword => Some(self.parse_return_statement()),
            SyntaxKind::SemicolonToken => {
                let (pos, start) = (self.token_pos(), self.token_start());
                self.next_token();
                Some(self.add(SyntaxKind::EmptyStatement, pos, start, NodeData::Token))
            }
            _ if self.is_start_of_expression() => Some(self.parse_expression_statement()),
            _ => None,
        };
        self.leave_recursion();
        statement
    }

    fn parse_block(&mut self) -> NodeIndex {
        let (pos, start) = (self.token_pos(), self.token_start());
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let mut statements = NodeList::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            match self.parse_statement() {
                Some(statement) => statements.push(statement),
                None => {
                    self.error_at_current_token("Declaration or statement expected.");
                    self.next_token();
                }
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.add(
            SyntaxKind::Block,
            pos,
            start,
            NodeData::Block(BlockData { statements }),
        )
    }

    fn parse_variable_statement(&mut self) -> NodeIndex {
        let (pos, start) = (self.token_pos(), self.token_start());
        let declaration_list = self.parse_variable_declaration_list();
        self.parse_semicolon();
        self.add(
            SyntaxKind::VariableStatement,
            pos,
            start,
            NodeData::VariableStatement(VariableStatementData { declaration_list }),
        )
    }

    fn parse_variable_declaration_list(&mut self) -> NodeIndex {
        let (pos, start) = (self.token_pos(), self.token_start());
        let keyword = self.token();
        self.next_token();

        let mut declarations = NodeList::new();
        loop {
            declarations.push(self.parse_variable_declaration());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }

        self.add(
            SyntaxKind::VariableDeclarationList,
            pos,
            start,
            NodeData::VariableDeclarationList(VariableDeclarationListData {
                keyword,
                declarations,
            }),
        )
    }

    fn parse_variable_declaration(&mut self) -> NodeIndex {
        let (pos, start) = (self.token_pos(), self.token_start());
        let name = self.parse_binding_name();
        let initializer = self.parse_initializer();
        self.add(
            SyntaxKind::VariableDeclaration,
            pos,
            start,
            NodeData::VariableDeclaration(VariableDeclarationData { name, initializer }),
        )
    }

    fn parse_initializer(&mut self) -> NodeIndex {
        if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_assignment_expression()
        } else {
            NodeIndex::NONE
        }
    }

    /// Identifier, object binding pattern or array binding pattern.
    fn parse_binding_name(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::Identifier => self.parse_identifier(),
            SyntaxKind::OpenBraceToken => self.parse_object_binding_pattern(),
            SyntaxKind::OpenBracketToken => self.parse_array_binding_pattern(),
            _ => self.create_missing_identifier("Identifier expected."),
        }
    }

    fn parse_object_binding_pattern(&mut self) -> NodeIndex {
        let (pos, start) = (self.token_pos(), self.token_start());
        if !self.enter_recursion() {
            return self.create_missing_identifier("Identifier expected.");
        }
        self.parse_expected(SyntaxKind::OpenBraceToken);

        let mut elements = NodeList::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            elements.push(self.parse_object_binding_element());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.leave_recursion();

        self.add(
            SyntaxKind::ObjectBindingPattern,
            pos,
            start,
            NodeData::BindingPattern(BindingPatternData { elements }),
        )
    }

    /// `a`, `a = 1`, `a: b`, `'a': [b] = c`, `[k]: b`
    fn parse_object_binding_element(&mut self) -> NodeIndex {
        let (pos, start) = (self.token_pos(), self.token_start());

        let shorthand = self.is_token(SyntaxKind::Identifier) && !self.next_token_is_colon();
        let (property_name, name) = if shorthand {
            (NodeIndex::NONE, self.parse_identifier())
        } else {
            let property_name = self.parse_property_name();
            self.parse_expected(SyntaxKind::ColonToken);
            (property_name, self.parse_binding_name())
        };
        let initializer = self.parse_initializer();

        self.add(
            SyntaxKind::BindingElement,
            pos,
            start,
            NodeData::BindingElement(BindingElementData {
                property_name,
                name,
                initializer,
            }),
        )
    }

    fn parse_array_binding_pattern(&mut self) -> NodeIndex {
        let (pos, start) = (self.token_pos(), self.token_start());
        if !self.enter_recursion() {
            return self.create_missing_identifier("Identifier expected.");
        }
        self.parse_expected(SyntaxKind::OpenBracketToken);

        let mut elements = NodeList::new();
        while !self.is_token(SyntaxKind::CloseBracketToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            // Holes (`[, a]`) carry no binding.
            if self.parse_optional(SyntaxKind::CommaToken) {
                continue;
            }
            let (element_pos, element_start) = (self.token_pos(), self.token_start());
            let name = self.parse_binding_name();
            let initializer = self.parse_initializer();
            elements.push(self.add(
                SyntaxKind::BindingElement,
                element_pos,
                element_start,
                NodeData::BindingElement(BindingElementData {
                    property_name: NodeIndex::NONE,
                    name,
                    initializer,
                }),
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.leave_recursion();

        self.add(
            SyntaxKind::ArrayBindingPattern,
            pos,
            start,
            NodeData::BindingPattern(BindingPatternData { elements }),
        )
    }

    fn parse_function_declaration(&mut self) -> NodeIndex {
        let (pos, start) = (self.token_pos(), self.token_start());
        self.parse_expected(SyntaxKind::FunctionKeyword);
        let name = if self.is_token(SyntaxKind::Identifier) {
            self.parse_identifier()
        } else {
            self.create_missing_identifier("Identifier expected.")
        };

        let mut parameters = NodeList::new();
        if self.parse_expected(SyntaxKind::OpenParenToken) {
            while !self.is_token(SyntaxKind::CloseParenToken)
                && !self.is_token(SyntaxKind::EndOfFileToken)
            {
                parameters.push(self.parse_parameter());
                if !self.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
            self.parse_expected(SyntaxKind::CloseParenToken);
        }

        let body = if self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_block()
        } else {
            self.error_at_current_token("'{' expected.");
            NodeIndex::NONE
        };

        self.add(
            SyntaxKind::FunctionDeclaration,
            pos,
            start,
            NodeData::Function(FunctionData {
                name,
                parameters,
                body,
            }),
        )
    }

    fn parse_parameter(&mut self) -> NodeIndex {
        let (pos, start) = (self.token_pos(), self.token_start());
        let name = self.parse_binding_name();
        let initializer = self.parse_initializer();
        self.add(
            SyntaxKind::Parameter,
            pos,
            start,
            NodeData::VariableDeclaration(VariableDeclarationData { name, initializer }),
        )
    }

    fn parse_if_statement(&mut self) -> NodeIndex {
        let (pos, start) = (self.token_pos(), self.token_start());
        self.parse_expected(SyntaxKind::IfKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.parse_expression();
        self.parse_expected(SyntaxKind::CloseParenToken);
        let then_statement = self.parse_embedded_statement();
        let else_statement = if self.parse_optional(SyntaxKind::ElseKeyword) {
            self.parse_embedded_statement()
        } else {
            NodeIndex::NONE
        };
        self.add(
            SyntaxKind::IfStatement,
            pos,
            start,
            NodeData::If(IfData {
                expression,
                then_statement,
                else_statement,
            }),
        )
    }

    fn parse_embedded_statement(&mut self) -> NodeIndex {
        match self.parse_statement() {
            Some(statement) => statement,
            None => self.create_missing_identifier("Statement expected."),
        }
    }

    fn parse_return_statement(&mut self) -> NodeIndex {
        let (pos, start) = (self.token_pos(), self.token_start());
        self.parse_expected(SyntaxKind::ReturnKeyword);
        let expression = if self.can_parse_semicolon() {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_semicolon();
        self.add(
            SyntaxKind::ReturnStatement,
            pos,
            start,
            NodeData::Expression(ExpressionData { expression }),
        )
    }

    fn parse_expression_statement(&mut self) -> NodeIndex {
        let (pos, start) = (self.token_pos(), self.token_start());
        let expression = self.parse_expression();
        self.parse_semicolon();
        self.add(
            SyntaxKind::ExpressionStatement,
            pos,
            start,
            NodeData::Expression(ExpressionData { expression }),
        )
    }

    pub(crate) fn parse_identifier(&mut self) -> NodeIndex {
        let (pos, start) = (self.token_pos(), self.token_start());
        let text = self.scanner.token_value().to_string();
        self.next_token();
        self.add(
            SyntaxKind::Identifier,
            pos,
            start,
            NodeData::Identifier(IdentifierData { text }),
        )
    }

    /// Property names of object literals and object binding patterns:
    /// identifiers (keywords included), string and numeric literals, and
    /// computed names.
    pub(crate) fn parse_property_name(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral => self.parse_literal(),
            SyntaxKind::OpenBracketToken => {
                let (pos, start) = (self.token_pos(), self.token_start());
                self.next_token();
                let expression = self.parse_assignment_expression();
                self.parse_expected(SyntaxKind::CloseBracketToken);
                self.add(
                    SyntaxKind::ComputedPropertyName,
                    pos,
                    start,
                    NodeData::ComputedProperty(ComputedPropertyData { expression }),
                )
            }
            kind if token_is_identifier_or_keyword(kind) => self.parse_identifier(),
            _ => self.create_missing_identifier("Property assignment expected."),
        }
    }

    fn next_token_is_colon(&mut self) -> bool {
        let snapshot = self.scanner.snapshot();
        let is_colon = self.scanner.scan() == SyntaxKind::ColonToken;
        self.scanner.restore(snapshot);
        is_colon
    }
}
