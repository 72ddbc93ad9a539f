use super::*;

fn scan_all(text: &str) -> Vec<(SyntaxKind, String)> {
    let mut scanner = ScannerState::new(Arc::from(text));
    let mut tokens = Vec::new();
    loop {
        let kind = scanner.scan();
        if kind == SyntaxKind::EndOfFileToken {
            break;
        }
        tokens.push((kind, scanner.token_text().to_string()));
    }
    tokens
}

fn kinds(text: &str) -> Vec<SyntaxKind> {
    scan_all(text).into_iter().map(|(kind, _)| kind).collect()
}

#[test]
fn test_scan_variable_statement() {
    assert_eq!(
        kinds("var a = 1;"),
        vec![
            SyntaxKind::VarKeyword,
            SyntaxKind::Identifier,
            SyntaxKind::EqualsToken,
            SyntaxKind::NumericLiteral,
            SyntaxKind::SemicolonToken,
        ]
    );
}

#[test]
fn test_longest_operator_match() {
    assert_eq!(
        kinds("a >>>= b !== c >> d"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken,
            SyntaxKind::Identifier,
            SyntaxKind::ExclamationEqualsEqualsToken,
            SyntaxKind::Identifier,
            SyntaxKind::GreaterThanGreaterThanToken,
            SyntaxKind::Identifier,
        ]
    );
    assert_eq!(
        kinds("x+++y"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::PlusPlusToken,
            SyntaxKind::PlusToken,
            SyntaxKind::Identifier,
        ]
    );
}

#[test]
fn test_comments_are_trivia() {
    let mut scanner = ScannerState::new(Arc::from("// lead\n/* block */ x"));
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.token_full_start(), 0);
    assert_eq!(scanner.token_start(), 20);
    assert!(scanner.has_preceding_line_break());
    assert!(scanner.diagnostics().is_empty());
}

#[test]
fn test_string_value_is_cooked() {
    let mut scanner = ScannerState::new(Arc::from(r#"'a\'b\n\x41B'"#));
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.token_value(), "a'b\nAB");
    assert_eq!(scanner.token_end() as usize, scanner.source_text().len());
}

#[test]
fn test_unterminated_string_reports_diagnostic() {
    let mut scanner = ScannerState::new(Arc::from("\"abc\nx"));
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.diagnostics().len(), 1);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
}

#[test]
fn test_numeric_literals() {
    let tokens = scan_all("0x1F 1.5e-3 .25 42");
    let texts: Vec<_> = tokens.iter().map(|(_, text)| text.as_str()).collect();
    assert_eq!(texts, vec!["0x1F", "1.5e-3", ".25", "42"]);
    assert!(tokens.iter().all(|(kind, _)| *kind == SyntaxKind::NumericLiteral));
}

#[test]
fn test_identifier_characters() {
    assert_eq!(
        scan_all("$a _b élan"),
        vec![
            (SyntaxKind::Identifier, "$a".to_string()),
            (SyntaxKind::Identifier, "_b".to_string()),
            (SyntaxKind::Identifier, "élan".to_string()),
        ]
    );
}

#[test]
fn test_invalid_character() {
    let mut scanner = ScannerState::new(Arc::from("@"));
    assert_eq!(scanner.scan(), SyntaxKind::Unknown);
    assert_eq!(scanner.diagnostics().len(), 1);
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
}

#[test]
fn test_snapshot_restore() {
    let mut scanner = ScannerState::new(Arc::from("a b"));
    scanner.scan();
    let snapshot = scanner.snapshot();
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.token_value(), "b");
    scanner.restore(snapshot);
    assert_eq!(scanner.token_value(), "a");
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.token_value(), "b");
}
