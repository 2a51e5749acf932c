use bibtex_scanner::{
    tokenize, tokenize_reader, Error, Location, Scanner, ScannerOptions, Token, TokenKind,
};
use std::io;

const DATABASE: &str = r#"@String{ acm = "ACM Press" }

@PREAMBLE{ "\newcommand{\noopsort}[1]{}" }

@comment{ This whole {braced} block is a comment }

@article{knuth1984,
  author  = {Donald E. Knuth},
  title   = {Literate Programming},
  journal = "The Computer Journal",
  volume  = 27,
  number  = {2},
  pages   = "97--111",
  year    = 1984,
  publisher = acm # " (reprint)",
}
"#;

fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|t| t.kind).collect()
}

fn field_value<'a>(tokens: &'a [Token], name: &str) -> &'a Token {
    let i = tokens.iter().position(|t| t.literal == name).unwrap();
    assert_eq!(tokens[i + 1].kind, TokenKind::Equal);
    &tokens[i + 2]
}

#[test]
fn test_string_entry() {
    let tokens = tokenize("@String{ acm = \"ACM Press\" }").unwrap();
    assert_eq!(
        kinds(&tokens),
        [
            TokenKind::AtSign,
            TokenKind::String,
            TokenKind::LBrace,
            TokenKind::BareIdent,
            TokenKind::Equal,
            TokenKind::Ident,
            TokenKind::RBrace,
        ]
    );
    assert_eq!(tokens[1].literal, "String");
    assert_eq!(tokens[5].literal, "ACM Press");
}

#[test]
fn test_preamble_entry() {
    let tokens = tokenize(r#"@PREAMBLE{ "\newcommand{\noopsort}[1]{}" }"#).unwrap();
    assert_eq!(tokens[1].kind, TokenKind::Preamble);
    assert_eq!(tokens[3].kind, TokenKind::Ident);
    assert_eq!(tokens[3].literal, r"\newcommand{\noopsort}[1]{}");
    assert_eq!(tokens[4].kind, TokenKind::RBrace);
}

#[test]
fn test_comment_keyword_any_case() {
    for input in ["@Comment{x}", "@COMMENT{x}", "@comment{x}"] {
        let tokens = tokenize(input).unwrap();
        assert_eq!(tokens[1].kind, TokenKind::Comment, "input: {input}");
    }
}

#[test]
fn test_full_database() {
    let tokens = tokenize(DATABASE).unwrap();

    let article = tokens
        .iter()
        .position(|t| t.literal == "article")
        .unwrap();
    assert_eq!(tokens[article - 1].kind, TokenKind::AtSign);
    assert_eq!(tokens[article + 1].kind, TokenKind::LBrace);
    assert_eq!(tokens[article + 2].literal, "knuth1984");
    assert_eq!(tokens[article + 2].kind, TokenKind::BareIdent);

    let field = |name: &str| field_value(&tokens, name);
    assert_eq!(field("author").literal, "Donald E. Knuth");
    assert_eq!(field("journal").literal, "The Computer Journal");
    assert_eq!(field("volume").kind, TokenKind::Ident);
    assert_eq!(field("volume").literal, "27");
    assert_eq!(field("number").literal, "2");
    assert_eq!(field("pages").literal, "97--111");
    assert_eq!(field("year").literal, "1984");
    assert_eq!(field("publisher").kind, TokenKind::BareIdent);
    assert_eq!(field("publisher").literal, "acm");

    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::RBrace));
}

#[test]
fn test_database_locations() {
    let tokens = tokenize(DATABASE).unwrap();
    let key = tokens.iter().find(|t| t.literal == "knuth1984").unwrap();
    assert_eq!(key.location, Location::new(7, 9));
    let author = tokens.iter().find(|t| t.literal == "author").unwrap();
    assert_eq!(author.location.to_string(), "8:2");
    let value = tokens.iter().find(|t| t.literal == "Donald E. Knuth").unwrap();
    assert_eq!(value.location, Location::new(8, 12));
}

#[test]
fn test_number_outside_field_is_bare() {
    let tokens = tokenize("@misc{1999, year = 1999}").unwrap();
    assert_eq!(tokens[3], Token::new(TokenKind::BareIdent, "1999", Location::new(1, 6)));
    assert_eq!(tokens[7].kind, TokenKind::Ident);
}

#[test]
fn test_unterminated_braced_value() {
    let mut scanner = Scanner::from_str("@misc{k, note = {{abc");
    let last = scanner.by_ref().last().unwrap();
    assert_eq!(last.kind, TokenKind::Illegal);
    assert_eq!(last.literal, "{abc");
    assert!((&mut scanner).scan().is_eof());

    let err = tokenize("@misc{k, note = {{abc").unwrap_err();
    assert_eq!(err, Error::unterminated_literal(1, 16, "{abc"));
}

#[test]
fn test_scan_continues_after_illegal() {
    let mut scanner = Scanner::from_str("@misc{a, b = c ; d}");
    let tokens: Vec<Token> = scanner.by_ref().collect();
    let illegal: Vec<&Token> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Illegal)
        .collect();
    assert_eq!(illegal.len(), 1);
    assert_eq!(illegal[0].literal, ";");
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::RBrace));
}

#[test]
fn test_options_round_trip_through_serde() {
    let options = ScannerOptions::new().with_unicode_idents(true);
    let json = serde_json::to_string(&options).unwrap();
    let back: ScannerOptions = serde_json::from_str(&json).unwrap();
    assert_eq!(options, back);

    let partial: ScannerOptions = serde_json::from_str(r#"{"numeric_idents": false}"#).unwrap();
    assert!(!partial.numeric_idents);
    assert!(partial.trim_trailing_whitespace);
}

#[test]
fn test_token_dump_as_json() {
    let tokens = tokenize("@misc{k}").unwrap();
    let json = serde_json::to_value(&tokens).unwrap();
    assert_eq!(json[0]["kind"], "ATSIGN");
    assert_eq!(json[1]["kind"], "BAREIDENT");
    assert_eq!(json[1]["literal"], "misc");
    assert_eq!(json[3]["location"]["column"], 6);
    assert!(json[3].get("unterminated").is_none());
}

struct BrokenPipe {
    sent: bool,
}

impl io::Read for BrokenPipe {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.sent {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
        }
        self.sent = true;
        let chunk = b"@misc{";
        buf[..chunk.len()].copy_from_slice(chunk);
        Ok(chunk.len())
    }
}

#[test]
fn test_reader_error_is_surfaced() {
    let err = tokenize_reader(BrokenPipe { sent: false }).unwrap_err();
    assert!(matches!(err, Error::Io(ref msg) if msg.contains("pipe closed")));

    let mut scanner = Scanner::new(BrokenPipe { sent: false });
    let kinds: Vec<TokenKind> = scanner.by_ref().map(|t| t.kind).collect();
    assert_eq!(kinds, [TokenKind::AtSign, TokenKind::BareIdent, TokenKind::LBrace]);
    assert!(scanner.error().is_some());
}
