/*
 * ==========================================================================
 * CISP - Cascading Rules, Evaluated!
 * ==========================================================================
 *
 * File:     parser/selectors.rs
 * Purpose:  Selector and attribute parsing.
 *
 * Author:   Sam Wilcox
 * Github:   https://github.com/samwilcox/cisp
 *
 * License:
 * This file is part of the CISP language project.
 *
 * CISP is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use crate::ast::{Attribute, Identifier, Selector};
use crate::error::{CispError, CispResult};
use crate::lexer::TokenKind;
use crate::parser::parser::Parser;

impl Parser {
    /// Parses the attribute list following a rule name.
    ///
    /// ```text
    /// selector := ('[' IDENT ('=' literal)? ']')*
    /// ```
    ///
    /// A second identifier (`a b { }`, a descendant selector) is rejected.
    pub(crate) fn selector(&mut self, name: Identifier) -> CispResult<Selector> {
        let mut attributes = Vec::new();

        while self.check(TokenKind::LBracket)? {
            attributes.push(self.attribute()?);
        }

        if self.check(TokenKind::Identifier)? {
            let token = self.advance()?;
            return Err(CispError::unsupported(
                format!("compound selector `{} {}` is not supported", name.name, token.lexeme),
                token.span,
            ));
        }

        let span = match attributes.last() {
            Some(last) => name.span.to(last.span),
            None => name.span,
        };

        Ok(Selector {
            name,
            attributes,
            span,
        })
    }

    /// Parses one `[name]` or `[name=literal]`.
    fn attribute(&mut self) -> CispResult<Attribute> {
        let open = self.expect(TokenKind::LBracket, "to start an attribute")?;
        let name = self.expect(TokenKind::Identifier, "for the attribute name")?;

        let default = match self.match_kind(TokenKind::Equal)? {
            Some(_) => Some(self.literal()?),
            None => None,
        };

        let close = self.expect(TokenKind::RBracket, "to close the attribute")?;

        Ok(Attribute {
            name: Identifier::new(name.lexeme, name.span),
            default,
            span: open.span.to(close.span),
        })
    }
}
