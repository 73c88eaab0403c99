use slox::{
    base::{source_file::SourceFile, CollectingHandler, Error, PrintHandler, VoidHandler},
    lexical::{
        self,
        token::{KeywordKind, Literal, TokenKind},
        token_stream::TokenStream,
    },
};

fn kinds(source: &str) -> Vec<TokenKind> {
    let (tokens, errors) = slox::scan(source);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    tokens.iter().map(|token| token.kind()).collect()
}

#[test]
fn scanning_empty_source() {
    let (tokens, errors) = slox::scan("");

    assert!(errors.is_empty());
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind(), TokenKind::Eof);
    assert_eq!(tokens[0].lexeme(), "");
    assert_eq!(tokens[0].line(), 1);
    assert_eq!(tokens[0].literal(), &Literal::None);
}

#[test]
fn scanning_single_character_symbols() {
    let cases = [
        ("(", TokenKind::LeftParenthesis),
        (")", TokenKind::RightParenthesis),
        ("{", TokenKind::LeftBrace),
        ("}", TokenKind::RightBrace),
        (",", TokenKind::Comma),
        (".", TokenKind::Dot),
        ("-", TokenKind::Minus),
        ("+", TokenKind::Plus),
        (";", TokenKind::Semicolon),
        ("*", TokenKind::Star),
        ("/", TokenKind::Slash),
    ];

    for (source, kind) in cases {
        let (tokens, errors) = slox::scan(source);
        assert!(errors.is_empty());
        assert_eq!(tokens.len(), 2, "source: {source}");
        assert_eq!(tokens[0].kind(), kind);
        assert_eq!(tokens[0].lexeme(), source);
        assert_eq!(tokens[0].literal(), &Literal::None);
        assert_eq!(tokens[1].kind(), TokenKind::Eof);
    }
}

#[test]
fn scanning_operators_greedily() {
    assert_eq!(kinds("!="), vec![TokenKind::BangEqual, TokenKind::Eof]);
    assert_eq!(kinds("!"), vec![TokenKind::Bang, TokenKind::Eof]);
    assert_eq!(kinds("=="), vec![TokenKind::EqualEqual, TokenKind::Eof]);
    assert_eq!(kinds("="), vec![TokenKind::Equal, TokenKind::Eof]);
    assert_eq!(kinds("<="), vec![TokenKind::LessEqual, TokenKind::Eof]);
    assert_eq!(kinds("<"), vec![TokenKind::Less, TokenKind::Eof]);
    assert_eq!(kinds(">="), vec![TokenKind::GreaterEqual, TokenKind::Eof]);
    assert_eq!(kinds(">"), vec![TokenKind::Greater, TokenKind::Eof]);

    assert_eq!(
        kinds("===!"),
        vec![TokenKind::EqualEqual, TokenKind::Equal, TokenKind::Bang, TokenKind::Eof]
    );
    assert_eq!(
        kinds("! ="),
        vec![TokenKind::Bang, TokenKind::Equal, TokenKind::Eof]
    );

    let (tokens, _) = slox::scan("a >= b");
    assert_eq!(tokens[1].lexeme(), ">=");
}

#[test]
fn scanning_comments() {
    let (tokens, errors) = slox::scan("// comment\n1");

    assert!(errors.is_empty());
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind(), TokenKind::Number);
    assert_eq!(tokens[0].lexeme(), "1");
    assert_eq!(tokens[0].line(), 2);
    assert_eq!(tokens[1].line(), 2);

    assert_eq!(kinds("// only a comment"), vec![TokenKind::Eof]);
    assert_eq!(
        kinds("4 / 2 // halves"),
        vec![TokenKind::Number, TokenKind::Slash, TokenKind::Number, TokenKind::Eof]
    );
}

#[test]
fn scanning_whitespace() {
    assert_eq!(
        kinds(" \t\r(\r\n)\t"),
        vec![
            TokenKind::LeftParenthesis,
            TokenKind::RightParenthesis,
            TokenKind::Eof
        ]
    );
}

#[test]
fn scanning_string_literals() {
    let (tokens, errors) = slox::scan("\"hello\"");

    assert!(errors.is_empty());
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind(), TokenKind::String);
    assert_eq!(tokens[0].lexeme(), "\"hello\"");
    assert_eq!(tokens[0].literal(), &Literal::String("hello".to_string()));

    let (tokens, _) = slox::scan("\"\"");
    assert_eq!(tokens[0].literal().as_string().map(String::as_str), Some(""));

    // no escape processing
    let (tokens, _) = slox::scan(r#""a\nb""#);
    assert_eq!(tokens[0].literal().as_string().map(String::as_str), Some(r"a\nb"));
}

#[test]
fn scanning_multi_line_strings() {
    let (tokens, errors) = slox::scan("\"one\ntwo\"\nx");

    assert!(errors.is_empty());
    assert_eq!(tokens[0].kind(), TokenKind::String);
    assert_eq!(tokens[0].line(), 1);
    assert_eq!(
        tokens[0].literal(),
        &Literal::String("one\ntwo".to_string())
    );
    assert_eq!(tokens[1].kind(), TokenKind::Identifier);
    assert_eq!(tokens[1].line(), 3);
    assert_eq!(tokens[2].line(), 3);
}

#[test]
fn scanning_unterminated_string() {
    let (tokens, errors) = slox::scan("\"abc");

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind(), TokenKind::Eof);

    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], lexical::Error::UnterminatedString(_)));
    assert_eq!(errors[0].message(), "Unterminated string.");
    assert_eq!(errors[0].line(), 1);
    assert_eq!(errors[0].span().str(), "\"abc");
}

#[test]
fn unterminated_string_is_reported_where_the_scan_stopped() {
    let (tokens, errors) = slox::scan("x = \"abc\n\ndef");

    assert_eq!(
        tokens.iter().map(|token| token.kind()).collect::<Vec<_>>(),
        vec![TokenKind::Identifier, TokenKind::Equal, TokenKind::Eof]
    );
    assert_eq!(tokens[2].line(), 3);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].line(), 3);
}

#[test]
fn scanning_numbers() {
    let (tokens, _) = slox::scan("123");
    assert_eq!(tokens[0].kind(), TokenKind::Number);
    assert_eq!(tokens[0].literal(), &Literal::Number(123.0));

    let (tokens, _) = slox::scan("123.45");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].lexeme(), "123.45");
    assert_eq!(tokens[0].literal(), &Literal::Number(123.45));

    let (tokens, errors) = slox::scan("123.");
    assert!(errors.is_empty());
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].kind(), TokenKind::Number);
    assert_eq!(tokens[0].lexeme(), "123");
    assert_eq!(tokens[0].literal(), &Literal::Number(123.0));
    assert_eq!(tokens[1].kind(), TokenKind::Dot);
    assert_eq!(tokens[2].kind(), TokenKind::Eof);
}

#[test]
fn number_lookahead_does_not_consume() {
    assert_eq!(
        kinds("1.foo"),
        vec![TokenKind::Number, TokenKind::Dot, TokenKind::Identifier, TokenKind::Eof]
    );
    assert_eq!(
        kinds("1..2"),
        vec![TokenKind::Number, TokenKind::Dot, TokenKind::Dot, TokenKind::Number, TokenKind::Eof]
    );
    assert_eq!(
        kinds("-7"),
        vec![TokenKind::Minus, TokenKind::Number, TokenKind::Eof]
    );

    let (tokens, _) = slox::scan("1.2.3");
    assert_eq!(tokens[0].literal(), &Literal::Number(1.2));
    assert_eq!(tokens[1].kind(), TokenKind::Dot);
    assert_eq!(tokens[2].literal(), &Literal::Number(3.0));
}

#[test]
fn scanning_non_ascii_digits() {
    // ARABIC-INDIC DIGIT THREE
    let (tokens, errors) = slox::scan("\u{0663}");

    assert!(errors.is_empty());
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind(), TokenKind::Number);
    assert_eq!(tokens[0].lexeme(), "\u{0663}");
    assert_eq!(tokens[0].literal(), &Literal::None);

    let (tokens, errors) = slox::scan("\u{0661}\u{0662}.\u{0663} x\u{0663}");
    assert!(errors.is_empty());
    assert_eq!(
        tokens.iter().map(|token| token.kind()).collect::<Vec<_>>(),
        vec![TokenKind::Number, TokenKind::Identifier, TokenKind::Eof]
    );
    assert_eq!(tokens[0].lexeme(), "\u{0661}\u{0662}.\u{0663}");
    assert_eq!(tokens[1].lexeme(), "x\u{0663}");
}

#[test]
fn scanning_keywords_and_identifiers() {
    let (tokens, _) = slox::scan("class");
    assert_eq!(tokens[0].kind(), TokenKind::Keyword(KeywordKind::Class));
    assert_eq!(tokens[0].literal(), &Literal::None);

    let (tokens, _) = slox::scan("classy");
    assert_eq!(tokens[0].kind(), TokenKind::Identifier);
    assert_eq!(tokens[0].lexeme(), "classy");
    assert_eq!(tokens[0].literal(), &Literal::None);

    assert_eq!(
        kinds("and class else false for fun if nil or print return super this true var while"),
        vec![
            TokenKind::Keyword(KeywordKind::And),
            TokenKind::Keyword(KeywordKind::Class),
            TokenKind::Keyword(KeywordKind::Else),
            TokenKind::Keyword(KeywordKind::False),
            TokenKind::Keyword(KeywordKind::For),
            TokenKind::Keyword(KeywordKind::Fun),
            TokenKind::Keyword(KeywordKind::If),
            TokenKind::Keyword(KeywordKind::Nil),
            TokenKind::Keyword(KeywordKind::Or),
            TokenKind::Keyword(KeywordKind::Print),
            TokenKind::Keyword(KeywordKind::Return),
            TokenKind::Keyword(KeywordKind::Super),
            TokenKind::Keyword(KeywordKind::This),
            TokenKind::Keyword(KeywordKind::True),
            TokenKind::Keyword(KeywordKind::Var),
            TokenKind::Keyword(KeywordKind::While),
            TokenKind::Eof,
        ]
    );

    let (tokens, _) = slox::scan("_tmp1 Nil forest café");
    let lexemes = tokens.iter().map(|token| token.lexeme()).collect::<Vec<_>>();
    assert_eq!(lexemes, vec!["_tmp1", "Nil", "forest", "café", ""]);
    assert!(tokens[..4]
        .iter()
        .all(|token| token.kind() == TokenKind::Identifier));
}

#[test]
fn scanning_unexpected_characters() {
    let (tokens, errors) = slox::scan("a @ b\n#");

    assert_eq!(
        tokens.iter().map(|token| token.kind()).collect::<Vec<_>>(),
        vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::Eof]
    );

    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].message(), "Unexpected character.");
    assert_eq!(errors[0].line(), 1);
    assert_eq!(errors[0].span().str(), "@");
    assert_eq!(errors[1].line(), 2);

    let lexical::Error::UnexpectedCharacter(err) = &errors[1] else {
        panic!("expected an unexpected character error");
    };
    assert_eq!(err.character(), '#');
}

#[test]
fn line_tracking() {
    let source = "var a = 1;\n// note\n\"x\ny\"\n\nprint a;\n";
    let (tokens, errors) = slox::scan(source);

    assert!(errors.is_empty());

    let lines = tokens
        .iter()
        .map(|token| (token.lexeme(), token.line()))
        .collect::<Vec<_>>();
    assert_eq!(
        lines,
        vec![
            ("var", 1),
            ("a", 1),
            ("=", 1),
            ("1", 1),
            (";", 1),
            ("\"x\ny\"", 3),
            ("print", 6),
            ("a", 6),
            (";", 6),
            ("", 7),
        ]
    );

    let newlines = source.matches('\n').count();
    assert_eq!(tokens.last().map(|token| token.line()), Some(newlines + 1));
}

#[test]
fn scanning_is_repeatable() {
    let source = "fun add(a, b) { return a + b; } // sum\nprint add(1.5, \"2\") @";
    let source_file = SourceFile::from_source("repeat.slox", source);

    let first = TokenStream::tokenize(&source_file, &VoidHandler);
    let second = TokenStream::tokenize(&source_file, &VoidHandler);
    assert_eq!(first, second);

    let (fresh_first, first_errors) = slox::scan(source);
    let (fresh_second, second_errors) = slox::scan(source);
    assert_eq!(fresh_first, fresh_second);
    assert_eq!(fresh_first, first);
    assert_eq!(first_errors.len(), 1);
    assert_eq!(second_errors.len(), 1);

    let (eof_first, _) = slox::scan("");
    let (eof_second, _) = slox::scan("");
    assert_eq!(eof_first[0], eof_second[0]);

    let (shifted, _) = slox::scan("\nprint 1;");
    let (unshifted, _) = slox::scan("print 1;");
    assert_ne!(shifted, unshifted);
}

#[test]
fn scanning_a_program() {
    let source = "var greeting = \"hi\";\nif (greeting != nil) print greeting;";
    let (tokens, errors) = slox::scan(source);

    assert!(errors.is_empty());
    assert_eq!(
        tokens.iter().map(ToString::to_string).collect::<Vec<_>>(),
        vec![
            "VAR var ",
            "IDENTIFIER greeting ",
            "EQUAL = ",
            "STRING \"hi\" hi",
            "SEMICOLON ; ",
            "IF if ",
            "LEFT_PARENTHESIS ( ",
            "IDENTIFIER greeting ",
            "BANG_EQUAL != ",
            "NIL nil ",
            "RIGHT_PARENTHESIS ) ",
            "PRINT print ",
            "IDENTIFIER greeting ",
            "SEMICOLON ; ",
            "EOF  ",
        ]
    );
}

#[test]
fn tokenize_with_handler() {
    let handler = CollectingHandler::new();
    let tokens = slox::tokenize(&handler, "ok.slox", "print 1 + 2;").expect("valid source");

    assert!(handler.is_empty());
    assert_eq!(tokens.len(), 6);
    assert_eq!(tokens[0].span().source_file().identifier(), "ok.slox");

    let handler = CollectingHandler::new();
    let result = slox::tokenize(&handler, "bad.slox", "print ~;\n\"open");

    assert_eq!(
        result,
        Err(Error::Other(
            "An error occurred while tokenizing the source code."
        ))
    );

    let received = handler.into_inner();
    assert_eq!(received.len(), 2);
    assert!(matches!(
        &received[0],
        Error::LexicalError(lexical::Error::UnexpectedCharacter(_))
    ));
    assert!(matches!(
        &received[1],
        Error::LexicalError(lexical::Error::UnterminatedString(_))
    ));
}

#[test]
fn print_handler_reports_failures() {
    let handler = PrintHandler::new();
    slox::tokenize(&handler, "bad.slox", "$").expect_err("invalid source");

    assert!(handler.has_printed());
}

#[test]
fn spans_locate_tokens() {
    let (tokens, _) = slox::scan("a\n  bé c");

    let location = tokens[2].span().start_location().expect("inside source");
    assert_eq!(location.line, 2);
    assert_eq!(location.column, 6);
    assert_eq!(tokens[3].span().start_location(), None);
}
