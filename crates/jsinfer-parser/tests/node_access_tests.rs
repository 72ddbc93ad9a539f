use super::*;
use crate::SyntaxTree;

fn find(tree: &SyntaxTree, kind: SyntaxKind, text: &str) -> NodeIndex {
    tree.arena()
        .indices()
        .find(|&index| tree.arena().kind(index) == Some(kind) && tree.node_text(index) == text)
        .unwrap_or_else(|| panic!("no {kind:?} `{text}`"))
}

#[test]
fn test_children_in_source_order() {
    let tree = SyntaxTree::parse("a.js", "c ? a : b;");
    let conditional = find(&tree, SyntaxKind::ConditionalExpression, "c ? a : b");
    let texts: Vec<_> = tree
        .arena()
        .children(conditional)
        .into_iter()
        .map(|child| tree.node_text(child))
        .collect();
    assert_eq!(texts, vec!["c", "a", "b"]);
}

#[test]
fn test_assignment_target() {
    let tree = SyntaxTree::parse("a.js", "(x) += 1; y = x;");
    let paren = find(&tree, SyntaxKind::ParenthesizedExpression, "(x)");
    let x = find(&tree, SyntaxKind::Identifier, "x");
    assert_eq!(tree.arena().skip_outer_parentheses(x), paren);
    let assignment = tree.arena().assignment_target_of(paren).expect("assignment");
    assert_eq!(tree.node_text(assignment), "(x) += 1");

    let y = find(&tree, SyntaxKind::Identifier, "y");
    assert!(tree.arena().assignment_target_of(y).is_some());
    // `x` on the right of `y = x` is not a target.
    let rhs = tree
        .arena()
        .indices()
        .filter(|&index| tree.node_text(index) == "x")
        .last()
        .expect("rhs");
    assert!(tree.arena().assignment_target_of(rhs).is_none());
}

#[test]
fn test_property_and_declaration_names() {
    let tree = SyntaxTree::parse("a.js", "var o = { p: v };");
    let p = find(&tree, SyntaxKind::Identifier, "p");
    let v = find(&tree, SyntaxKind::Identifier, "v");
    let o = find(&tree, SyntaxKind::Identifier, "o");
    assert!(tree.arena().is_property_name(p));
    assert!(!tree.arena().is_property_name(v));
    assert!(tree.arena().is_declaration_name(o));
    assert!(!tree.arena().is_declaration_name(v));
}

#[test]
fn test_kind_classification() {
    assert!(is_expression_kind(SyntaxKind::BinaryExpression));
    assert!(is_expression_kind(SyntaxKind::NullKeyword));
    assert!(!is_expression_kind(SyntaxKind::VariableDeclaration));
    assert!(is_variable_like_kind(SyntaxKind::Parameter));
    assert!(is_declaration_kind(SyntaxKind::FunctionDeclaration));
    assert!(!is_variable_like_kind(SyntaxKind::FunctionDeclaration));
    assert!(is_function_like_kind(SyntaxKind::FunctionDeclaration));
}

#[test]
fn test_find_ancestor() {
    let tree = SyntaxTree::parse("a.js", "function f() { var a = 1; }");
    let one = find(&tree, SyntaxKind::NumericLiteral, "1");
    let function = tree.arena().find_ancestor(one, SyntaxKind::FunctionDeclaration);
    assert_eq!(tree.arena().kind(function), Some(SyntaxKind::FunctionDeclaration));
    assert!(
        tree.arena()
            .find_ancestor(one, SyntaxKind::IfStatement)
            .is_none()
    );
}
