/// Parser for selection and sort-order fragments
///
/// Converts a stream of tokens into an Abstract Syntax Tree (AST).
use super::ast::*;
use super::lexer::{Lexer, LexerError, Token};
use std::fmt;

/// Parser for provider query fragments
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    parameters: usize,
}

impl Parser {
    /// Create a new parser from fragment text
    pub fn new(input: &str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(input);
        let tokens = lexer.tokenize().map_err(ParseError::LexerError)?;
        Ok(Self {
            tokens,
            position: 0,
            parameters: 0,
        })
    }

    /// Number of `?` placeholders consumed so far
    pub fn parameter_count(&self) -> usize {
        self.parameters
    }

    /// Parse the whole input as a selection (WHERE condition)
    pub fn parse_selection(&mut self) -> Result<Expression, ParseError> {
        let expr = self.parse_expression()?;
        self.expect_token(Token::Eof)?;
        Ok(expr)
    }

    /// Parse the whole input as a sort order: terms, then an optional LIMIT
    pub fn parse_sort_order(&mut self) -> Result<SortOrder, ParseError> {
        let mut terms = Vec::new();

        loop {
            let key = match self.current_token().clone() {
                Token::Identifier(name) => {
                    self.advance();
                    OrderKey::Column(name)
                }
                Token::Integer(n) => {
                    if n < 1 {
                        return Err(ParseError::InvalidOrdinal(n));
                    }
                    self.advance();
                    OrderKey::Ordinal(n as usize)
                }
                token => {
                    return Err(ParseError::UnexpectedToken {
                        expected: "column name or ordinal".to_string(),
                        found: token,
                    });
                }
            };

            let direction = if self.current_token() == &Token::Desc {
                self.advance();
                OrderDirection::Desc
            } else {
                if self.current_token() == &Token::Asc {
                    self.advance();
                }
                OrderDirection::Asc
            };

            terms.push(OrderTerm { key, direction });

            if self.current_token() == &Token::Comma {
                self.advance();
            } else {
                break;
            }
        }

        let limit = self.parse_limit()?;
        self.expect_token(Token::Eof)?;

        Ok(SortOrder { terms, limit })
    }

    fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        self.parse_logical_or()
    }

    fn parse_logical_or(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_logical_and()?;

        while self.current_token() == &Token::Or {
            self.advance();
            let right = self.parse_logical_and()?;
            left = Expression::LogicalOp {
                left: Box::new(left),
                op: LogicalOperator::Or,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_logical_and(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_not()?;

        while self.current_token() == &Token::And {
            self.advance();
            let right = self.parse_not()?;
            left = Expression::LogicalOp {
                left: Box::new(left),
                op: LogicalOperator::And,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Expression, ParseError> {
        if self.current_token() == &Token::Not {
            self.advance();
            let expr = self.parse_not()?;
            return Ok(Expression::Not(Box::new(expr)));
        }

        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expression, ParseError> {
        let left = self.parse_primary()?;

        // IS [NOT] NULL
        if self.current_token() == &Token::Is {
            self.advance();
            let negated = self.consume(&Token::Not);
            self.expect_token(Token::Null)?;
            return Ok(Expression::IsNull {
                expr: Box::new(left),
                negated,
            });
        }

        let negated = self.consume(&Token::Not);

        // Handle LIKE
        if self.current_token() == &Token::Like {
            self.advance();
            let pattern = self.parse_primary()?;
            return Ok(Expression::Like {
                expr: Box::new(left),
                pattern: Box::new(pattern),
                negated,
            });
        }

        // Handle IN
        if self.current_token() == &Token::In {
            self.advance();
            self.expect_token(Token::LeftParen)?;

            let mut values = Vec::new();
            loop {
                values.push(self.parse_primary()?);

                if self.current_token() == &Token::Comma {
                    self.advance();
                } else {
                    break;
                }
            }

            self.expect_token(Token::RightParen)?;

            return Ok(Expression::In {
                expr: Box::new(left),
                values,
                negated,
            });
        }

        // Handle BETWEEN
        if self.current_token() == &Token::Between {
            self.advance();
            let min = self.parse_primary()?;
            self.expect_token(Token::And)?;
            let max = self.parse_primary()?;

            let between = Expression::Between {
                expr: Box::new(left),
                min: Box::new(min),
                max: Box::new(max),
            };
            return Ok(if negated {
                Expression::Not(Box::new(between))
            } else {
                between
            });
        }

        if negated {
            return Err(ParseError::UnexpectedToken {
                expected: "LIKE, IN or BETWEEN after NOT".to_string(),
                found: self.current_token().clone(),
            });
        }

        // Handle comparison operators
        let op = match self.current_token() {
            Token::Eq => BinaryOperator::Eq,
            Token::Ne => BinaryOperator::Ne,
            Token::Lt => BinaryOperator::Lt,
            Token::Le => BinaryOperator::Le,
            Token::Gt => BinaryOperator::Gt,
            Token::Ge => BinaryOperator::Ge,
            _ => return Ok(left),
        };

        self.advance();
        let right = self.parse_primary()?;

        Ok(Expression::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    fn parse_primary(&mut self) -> Result<Expression, ParseError> {
        match self.current_token().clone() {
            Token::Identifier(name) => {
                self.advance();
                Ok(Expression::Column(name))
            }
            Token::Placeholder => {
                self.advance();
                let index = self.parameters;
                self.parameters += 1;
                Ok(Expression::Parameter(index))
            }
            Token::Integer(i) => {
                self.advance();
                Ok(Expression::Literal(Literal::Integer(i)))
            }
            Token::Float(f) => {
                self.advance();
                Ok(Expression::Literal(Literal::Float(f)))
            }
            Token::String(s) => {
                self.advance();
                Ok(Expression::Literal(Literal::String(s)))
            }
            Token::Boolean(b) => {
                self.advance();
                Ok(Expression::Literal(Literal::Boolean(b)))
            }
            Token::Null => {
                self.advance();
                Ok(Expression::Literal(Literal::Null))
            }
            Token::LeftParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_token(Token::RightParen)?;
                Ok(expr)
            }
            token => Err(ParseError::UnexpectedToken {
                expected: "expression".to_string(),
                found: token,
            }),
        }
    }

    fn parse_limit(&mut self) -> Result<Option<LimitClause>, ParseError> {
        if self.current_token() != &Token::Limit {
            return Ok(None);
        }

        self.advance();

        let count = if let Token::Integer(n) = self.current_token() {
            if *n < 0 {
                return Err(ParseError::InvalidLimitValue(*n));
            }
            let count = *n as usize;
            self.advance();
            count
        } else {
            return Err(ParseError::UnexpectedToken {
                expected: "integer".to_string(),
                found: self.current_token().clone(),
            });
        };

        let offset = if self.current_token() == &Token::Offset {
            self.advance();
            if let Token::Integer(n) = self.current_token() {
                if *n < 0 {
                    return Err(ParseError::InvalidOffsetValue(*n));
                }
                let offset = *n as usize;
                self.advance();
                Some(offset)
            } else {
                return Err(ParseError::UnexpectedToken {
                    expected: "integer".to_string(),
                    found: self.current_token().clone(),
                });
            }
        } else {
            None
        };

        Ok(Some(LimitClause { count, offset }))
    }

    fn current_token(&self) -> &Token {
        &self.tokens[self.position]
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() - 1 {
            self.position += 1;
        }
    }

    fn consume(&mut self, token: &Token) -> bool {
        if self.current_token() == token {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_token(&mut self, expected: Token) -> Result<(), ParseError> {
        if self.current_token() == &expected {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken {
                expected: format!("{}", expected),
                found: self.current_token().clone(),
            })
        }
    }
}

/// Parser errors
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    LexerError(LexerError),
    UnexpectedToken { expected: String, found: Token },
    InvalidOrdinal(i64),
    InvalidLimitValue(i64),
    InvalidOffsetValue(i64),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::LexerError(e) => write!(f, "Lexer error: {}", e),
            ParseError::UnexpectedToken { expected, found } => {
                write!(f, "Expected {}, found {}", expected, found)
            }
            ParseError::InvalidOrdinal(n) => {
                write!(f, "Invalid ORDER BY ordinal: {} (must be at least 1)", n)
            }
            ParseError::InvalidLimitValue(n) => {
                write!(f, "Invalid LIMIT value: {} (must be non-negative)", n)
            }
            ParseError::InvalidOffsetValue(n) => {
                write!(f, "Invalid OFFSET value: {} (must be non-negative)", n)
            }
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(input: &str) -> (Expression, usize) {
        let mut parser = Parser::new(input).unwrap();
        let expr = parser.parse_selection().unwrap();
        (expr, parser.parameter_count())
    }

    fn sort_order(input: &str) -> SortOrder {
        Parser::new(input).unwrap().parse_sort_order().unwrap()
    }

    #[test]
    fn test_parameters_are_numbered() {
        let (expr, params) = selection("(media_type=? or media_type=?) and parent=?");
        assert_eq!(params, 3);
        assert_eq!(
            expr.to_string(),
            "(((media_type = ?1) OR (media_type = ?2)) AND (parent = ?3))"
        );
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let (expr, _) = selection("a = 1 OR b = 2 AND c = 3");
        match expr {
            Expression::LogicalOp { op, right, .. } => {
                assert_eq!(op, LogicalOperator::Or);
                assert!(matches!(
                    *right,
                    Expression::LogicalOp {
                        op: LogicalOperator::And,
                        ..
                    }
                ));
            }
            other => panic!("Expected OR at the root, got {}", other),
        }
    }

    #[test]
    fn test_negated_predicates() {
        let (expr, params) = selection("name NOT LIKE ? AND size IS NOT NULL");
        assert_eq!(params, 1);
        assert_eq!(expr.to_string(), "(name NOT LIKE ?1 AND size IS NOT NULL)");

        let (expr, _) = selection("id NOT IN (1, 2)");
        assert!(matches!(expr, Expression::In { negated: true, .. }));
    }

    #[test]
    fn test_sort_order_with_column() {
        let order = sort_order("name DESC ");
        assert_eq!(order.terms.len(), 1);
        assert_eq!(order.terms[0].key, OrderKey::Column("name".to_string()));
        assert_eq!(order.terms[0].direction, OrderDirection::Desc);
        assert_eq!(order.limit, None);
    }

    #[test]
    fn test_sort_order_with_ordinal_and_limit() {
        let order = sort_order("1 DESC LIMIT 5");
        assert_eq!(order.terms[0].key, OrderKey::Ordinal(1));
        assert_eq!(
            order.limit,
            Some(LimitClause {
                count: 5,
                offset: None
            })
        );

        let order = sort_order("name, _id ASC LIMIT 10 OFFSET 20");
        assert_eq!(order.terms.len(), 2);
        assert_eq!(order.limit.unwrap().offset, Some(20));
    }

    #[test]
    fn test_limit_requires_an_ordering_term() {
        let mut parser = Parser::new("LIMIT 5").unwrap();
        assert!(matches!(
            parser.parse_sort_order(),
            Err(ParseError::UnexpectedToken {
                found: Token::Limit,
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_sort_orders() {
        assert_eq!(
            Parser::new("0").unwrap().parse_sort_order(),
            Err(ParseError::InvalidOrdinal(0))
        );
        assert_eq!(
            Parser::new("name LIMIT -1").unwrap().parse_sort_order(),
            Err(ParseError::InvalidLimitValue(-1))
        );
        assert!(Parser::new("name LIMIT").unwrap().parse_sort_order().is_err());
    }

    #[test]
    fn test_trailing_garbage_is_rejected() {
        let mut parser = Parser::new("a = 1 b").unwrap();
        assert!(parser.parse_selection().is_err());
    }
}
