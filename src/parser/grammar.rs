//! # Grammar
//!
//! The LL(1) grammar of the language as a static table: one entry per
//! non-terminal carrying its ordered alternatives (each with a precomputed
//! FIRST set) and its FOLLOW set. Code-generator actions are embedded
//! directly in the production paths, at the position where they must fire.
//!
//! FIRST and FOLLOW sets are bitsets over the terminal alphabet, so
//! membership checks during prediction are single mask tests.

use once_cell::sync::Lazy;

use crate::scanner::{Token, TokenKind};

/// The terminal alphabet of the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    If,
    Else,
    Void,
    Int,
    Repeat,
    Break,
    Until,
    Return,
    Semicolon,
    Colon,
    Comma,
    LBracket,
    RBracket,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Plus,
    Minus,
    Less,
    Star,
    Assign,
    Equal,
    Id,
    Num,
    End,
}

impl Term {
    /// The surface form used in parse-tree leaves and error messages.
    pub fn surface(&self) -> &'static str {
        match self {
            Term::If => "if",
            Term::Else => "else",
            Term::Void => "void",
            Term::Int => "int",
            Term::Repeat => "repeat",
            Term::Break => "break",
            Term::Until => "until",
            Term::Return => "return",
            Term::Semicolon => ";",
            Term::Colon => ":",
            Term::Comma => ",",
            Term::LBracket => "[",
            Term::RBracket => "]",
            Term::LParen => "(",
            Term::RParen => ")",
            Term::LBrace => "{",
            Term::RBrace => "}",
            Term::Plus => "+",
            Term::Minus => "-",
            Term::Less => "<",
            Term::Star => "*",
            Term::Assign => "=",
            Term::Equal => "==",
            Term::Id => "ID",
            Term::Num => "NUM",
            Term::End => "$",
        }
    }

    /// Map a scanner token onto the terminal alphabet.
    pub fn from_token(token: &Token) -> Option<Term> {
        match token.kind {
            TokenKind::Id => Some(Term::Id),
            TokenKind::Num => Some(Term::Num),
            TokenKind::End => Some(Term::End),
            TokenKind::Keyword => match token.lexeme.as_str() {
                "if" => Some(Term::If),
                "else" => Some(Term::Else),
                "void" => Some(Term::Void),
                "int" => Some(Term::Int),
                "repeat" => Some(Term::Repeat),
                "break" => Some(Term::Break),
                "until" => Some(Term::Until),
                "return" => Some(Term::Return),
                _ => None,
            },
            TokenKind::Symbol => match token.lexeme.as_str() {
                ";" => Some(Term::Semicolon),
                ":" => Some(Term::Colon),
                "," => Some(Term::Comma),
                "[" => Some(Term::LBracket),
                "]" => Some(Term::RBracket),
                "(" => Some(Term::LParen),
                ")" => Some(Term::RParen),
                "{" => Some(Term::LBrace),
                "}" => Some(Term::RBrace),
                "+" => Some(Term::Plus),
                "-" => Some(Term::Minus),
                "<" => Some(Term::Less),
                "*" => Some(Term::Star),
                "=" => Some(Term::Assign),
                "==" => Some(Term::Equal),
                _ => None,
            },
        }
    }
}

/// A set of terminals as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TermSet(u32);

impl TermSet {
    pub const EMPTY: TermSet = TermSet(0);

    pub fn of(terms: &[Term]) -> Self {
        let mut mask = 0;
        for term in terms {
            mask |= 1 << (*term as u32);
        }
        TermSet(mask)
    }

    pub fn contains(&self, term: Term) -> bool {
        self.0 & (1 << (term as u32)) != 0
    }
}

/// The non-terminals of the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonTerminal {
    Program,
    DeclarationList,
    Declaration,
    DeclarationInitial,
    DeclarationPrime,
    VarDeclarationPrime,
    FunDeclarationPrime,
    TypeSpecifier,
    Params,
    ParamList,
    Param,
    ParamPrime,
    CompoundStmt,
    StatementList,
    Statement,
    ExpressionStmt,
    SelectionStmt,
    ElseStmt,
    IterationStmt,
    ReturnStmt,
    ReturnStmtPrime,
    Expression,
    B,
    H,
    SimpleExpressionZegond,
    SimpleExpressionPrime,
    C,
    Relop,
    AdditiveExpression,
    AdditiveExpressionPrime,
    AdditiveExpressionZegond,
    D,
    Addop,
    Term,
    TermPrime,
    TermZegond,
    G,
    Factor,
    VarCallPrime,
    VarPrime,
    FactorPrime,
    FactorZegond,
    Args,
    ArgList,
    ArgListPrime,
}

pub const NON_TERMINAL_COUNT: usize = 45;

impl NonTerminal {
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            NonTerminal::Program => "program",
            NonTerminal::DeclarationList => "declaration-list",
            NonTerminal::Declaration => "declaration",
            NonTerminal::DeclarationInitial => "declaration-initial",
            NonTerminal::DeclarationPrime => "declaration-prime",
            NonTerminal::VarDeclarationPrime => "var-declaration-prime",
            NonTerminal::FunDeclarationPrime => "fun-declaration-prime",
            NonTerminal::TypeSpecifier => "type-specifier",
            NonTerminal::Params => "params",
            NonTerminal::ParamList => "param-list",
            NonTerminal::Param => "param",
            NonTerminal::ParamPrime => "param-prime",
            NonTerminal::CompoundStmt => "compound-stmt",
            NonTerminal::StatementList => "statement-list",
            NonTerminal::Statement => "statement",
            NonTerminal::ExpressionStmt => "expression-stmt",
            NonTerminal::SelectionStmt => "selection-stmt",
            NonTerminal::ElseStmt => "else-stmt",
            NonTerminal::IterationStmt => "iteration-stmt",
            NonTerminal::ReturnStmt => "return-stmt",
            NonTerminal::ReturnStmtPrime => "return-stmt-prime",
            NonTerminal::Expression => "expression",
            NonTerminal::B => "b",
            NonTerminal::H => "h",
            NonTerminal::SimpleExpressionZegond => "simple-expression-zegond",
            NonTerminal::SimpleExpressionPrime => "simple-expression-prime",
            NonTerminal::C => "c",
            NonTerminal::Relop => "relop",
            NonTerminal::AdditiveExpression => "additive-expression",
            NonTerminal::AdditiveExpressionPrime => "additive-expression-prime",
            NonTerminal::AdditiveExpressionZegond => "additive-expression-zegond",
            NonTerminal::D => "d",
            NonTerminal::Addop => "addop",
            NonTerminal::Term => "term",
            NonTerminal::TermPrime => "term-prime",
            NonTerminal::TermZegond => "term-zegond",
            NonTerminal::G => "g",
            NonTerminal::Factor => "factor",
            NonTerminal::VarCallPrime => "var-call-prime",
            NonTerminal::VarPrime => "var-prime",
            NonTerminal::FactorPrime => "factor-prime",
            NonTerminal::FactorZegond => "factor-zegond",
            NonTerminal::Args => "args",
            NonTerminal::ArgList => "arg-list",
            NonTerminal::ArgListPrime => "arg-list-prime",
        }
    }

    /// The capitalized form used as a parse-tree node label.
    pub fn display_name(&self) -> String {
        let name = self.name();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    }
}

/// A code-generator hook embedded in a production path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Push,
    Pid,
    Pnum,
    Declare,
    DecArr,
    DecFun,
    DecPvar,
    DecParr,
    StartScope,
    FinishScope,
    EndFunc,
    Assign,
    Opera,
    Parr,
    Save,
    FillJpf,
    FillJp,
    IfcAction,
    Loop,
    Until,
    ScopeBreak,
    Call,
    FunReturn,
    FunctionReturn,
    AddArgs,
    Pop,
    StartProgram,
    EndProgram,
}

/// One entry of a production path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    T(Term),
    N(NonTerminal),
    A(Action),
    Epsilon,
}

fn t(term: Term) -> Symbol {
    Symbol::T(term)
}

fn n(nt: NonTerminal) -> Symbol {
    Symbol::N(nt)
}

fn a(action: Action) -> Symbol {
    Symbol::A(action)
}

/// One grammar alternative: the path to expand plus its FIRST set. The
/// `epsilon` flag marks alternatives that can derive nothing, which makes
/// them selectable through FOLLOW.
#[derive(Debug, Clone)]
pub struct Production {
    pub path: Vec<Symbol>,
    pub first: TermSet,
    pub epsilon: bool,
}

fn alt(path: Vec<Symbol>, first: &[Term]) -> Production {
    Production {
        path,
        first: TermSet::of(first),
        epsilon: false,
    }
}

fn nullable_alt(path: Vec<Symbol>, first: &[Term]) -> Production {
    Production {
        path,
        first: TermSet::of(first),
        epsilon: true,
    }
}

fn epsilon_alt(actions: &[Action]) -> Production {
    let mut path = vec![Symbol::Epsilon];
    path.extend(actions.iter().map(|action| a(*action)));
    Production {
        path,
        first: TermSet::EMPTY,
        epsilon: true,
    }
}

struct Entry {
    alternatives: Vec<Production>,
    follow: TermSet,
}

pub struct Grammar {
    entries: Vec<Entry>,
}

pub static GRAMMAR: Lazy<Grammar> = Lazy::new(Grammar::build);

impl Grammar {
    pub fn alternatives(&self, nt: NonTerminal) -> &[Production] {
        &self.entries[nt.index()].alternatives
    }

    pub fn follow(&self, nt: NonTerminal) -> TermSet {
        self.entries[nt.index()].follow
    }

    /// Predict the alternative of `nt` for the given lookahead: the first
    /// alternative whose FIRST contains it, or a nullable alternative when
    /// the lookahead is in FOLLOW(nt).
    pub fn select(&self, nt: NonTerminal, lookahead: Option<Term>) -> Option<&Production> {
        let lookahead = lookahead?;
        let entry = &self.entries[nt.index()];

        entry.alternatives.iter().find(|production| {
            production.first.contains(lookahead)
                || (production.epsilon && entry.follow.contains(lookahead))
        })
    }

    fn define(&mut self, nt: NonTerminal, alternatives: Vec<Production>, follow: &[Term]) {
        debug_assert_eq!(self.entries.len(), nt.index());
        self.entries.push(Entry {
            alternatives,
            follow: TermSet::of(follow),
        });
    }

    fn build() -> Self {
        use Action as Ac;
        use NonTerminal as Nt;
        use Term::*;

        const STATEMENT_FOLLOW: [Term; 12] = [
            Until, Else, Break, Semicolon, Id, LParen, Num, If, Return, LBrace, Repeat, RBrace,
        ];
        const EXPRESSION_FOLLOW: [Term; 4] = [Comma, RParen, RBracket, Semicolon];
        const ADDITIVE_FOLLOW: [Term; 6] = [Less, Equal, Comma, RParen, RBracket, Semicolon];
        const TERM_FOLLOW: [Term; 8] = [
            Plus, Minus, Less, Equal, Comma, RParen, RBracket, Semicolon,
        ];
        const FACTOR_FOLLOW: [Term; 9] = [
            Star, Less, Equal, Plus, Minus, Comma, RParen, RBracket, Semicolon,
        ];

        let mut grammar = Grammar { entries: vec![] };

        grammar.define(
            Nt::Program,
            vec![alt(
                vec![
                    a(Ac::StartProgram),
                    n(Nt::DeclarationList),
                    a(Ac::EndProgram),
                    t(End),
                ],
                &[End, Int, Void],
            )],
            &[],
        );

        grammar.define(
            Nt::DeclarationList,
            vec![
                alt(
                    vec![n(Nt::Declaration), n(Nt::DeclarationList)],
                    &[Int, Void],
                ),
                epsilon_alt(&[]),
            ],
            &[
                Break, Semicolon, Id, LParen, Num, If, Return, LBrace, RBrace, Repeat, End,
            ],
        );

        grammar.define(
            Nt::Declaration,
            vec![alt(
                vec![n(Nt::DeclarationInitial), n(Nt::DeclarationPrime)],
                &[Int, Void],
            )],
            &[
                Int, Void, Break, Semicolon, Id, LParen, Num, If, Return, LBrace, RBrace, Repeat,
                End,
            ],
        );

        grammar.define(
            Nt::DeclarationInitial,
            vec![alt(
                vec![n(Nt::TypeSpecifier), a(Ac::Push), t(Id), a(Ac::Push)],
                &[Int, Void],
            )],
            &[LBracket, LParen, Semicolon, Comma, RParen],
        );

        grammar.define(
            Nt::DeclarationPrime,
            vec![
                alt(vec![n(Nt::FunDeclarationPrime)], &[LParen]),
                alt(vec![n(Nt::VarDeclarationPrime)], &[Semicolon, LBracket]),
            ],
            &[
                Int, Void, Break, Semicolon, Id, LParen, Num, If, Return, LBrace, RBrace, Repeat,
                End,
            ],
        );

        grammar.define(
            Nt::VarDeclarationPrime,
            vec![
                alt(vec![t(Semicolon), a(Ac::Declare)], &[Semicolon]),
                alt(
                    vec![
                        t(LBracket),
                        t(Num),
                        a(Ac::Pnum),
                        t(RBracket),
                        t(Semicolon),
                        a(Ac::DecArr),
                    ],
                    &[LBracket],
                ),
            ],
            &[
                Int, Void, Break, Semicolon, Id, LParen, Num, If, Return, LBrace, RBrace, Repeat,
                End,
            ],
        );

        grammar.define(
            Nt::FunDeclarationPrime,
            vec![alt(
                vec![
                    a(Ac::DecFun),
                    t(LParen),
                    n(Nt::Params),
                    t(RParen),
                    n(Nt::CompoundStmt),
                    a(Ac::EndFunc),
                ],
                &[LParen],
            )],
            &[
                Int, Void, Break, Semicolon, Id, LParen, Num, If, Return, LBrace, RBrace, Repeat,
                End,
            ],
        );

        grammar.define(
            Nt::TypeSpecifier,
            vec![alt(vec![t(Int)], &[Int]), alt(vec![t(Void)], &[Void])],
            &[Id],
        );

        grammar.define(
            Nt::Params,
            vec![
                alt(
                    vec![
                        t(Int),
                        a(Ac::Push),
                        t(Id),
                        a(Ac::Push),
                        a(Ac::DecPvar),
                        n(Nt::ParamPrime),
                        n(Nt::ParamList),
                    ],
                    &[Int],
                ),
                alt(vec![t(Void)], &[Void]),
            ],
            &[RParen],
        );

        grammar.define(
            Nt::ParamList,
            vec![
                alt(
                    vec![t(Comma), n(Nt::Param), n(Nt::ParamList)],
                    &[Comma],
                ),
                epsilon_alt(&[]),
            ],
            &[RParen],
        );

        grammar.define(
            Nt::Param,
            vec![alt(
                vec![n(Nt::DeclarationInitial), a(Ac::DecPvar), n(Nt::ParamPrime)],
                &[Int, Void],
            )],
            &[Comma, RParen],
        );

        grammar.define(
            Nt::ParamPrime,
            vec![
                alt(
                    vec![t(LBracket), t(RBracket), a(Ac::DecParr)],
                    &[LBracket],
                ),
                epsilon_alt(&[]),
            ],
            &[Comma, RParen],
        );

        grammar.define(
            Nt::CompoundStmt,
            vec![alt(
                vec![
                    t(LBrace),
                    a(Ac::StartScope),
                    n(Nt::DeclarationList),
                    n(Nt::StatementList),
                    t(RBrace),
                    a(Ac::FinishScope),
                ],
                &[LBrace],
            )],
            &[
                Until, Else, Break, Semicolon, Id, LParen, Num, If, Return, LBrace, RBrace, Repeat,
                Int, Void, End,
            ],
        );

        grammar.define(
            Nt::StatementList,
            vec![
                alt(
                    vec![n(Nt::Statement), n(Nt::StatementList)],
                    &[Break, Semicolon, Id, LParen, Num, If, Return, LBrace, Repeat],
                ),
                epsilon_alt(&[]),
            ],
            &[RBrace],
        );

        grammar.define(
            Nt::Statement,
            vec![
                alt(
                    vec![n(Nt::ExpressionStmt)],
                    &[Break, Semicolon, Id, LParen, Num],
                ),
                alt(vec![n(Nt::ReturnStmt)], &[Return]),
                alt(vec![n(Nt::CompoundStmt)], &[LBrace]),
                alt(vec![n(Nt::SelectionStmt)], &[If]),
                alt(vec![n(Nt::IterationStmt)], &[Repeat]),
            ],
            &STATEMENT_FOLLOW,
        );

        grammar.define(
            Nt::ExpressionStmt,
            vec![
                alt(
                    vec![n(Nt::Expression), t(Semicolon), a(Ac::Pop)],
                    &[Id, LParen, Num],
                ),
                alt(
                    vec![t(Break), a(Ac::ScopeBreak), t(Semicolon)],
                    &[Break],
                ),
                alt(vec![t(Semicolon)], &[Semicolon]),
            ],
            &STATEMENT_FOLLOW,
        );

        grammar.define(
            Nt::SelectionStmt,
            vec![alt(
                vec![
                    t(If),
                    t(LParen),
                    n(Nt::Expression),
                    t(RParen),
                    a(Ac::Save),
                    n(Nt::Statement),
                    n(Nt::ElseStmt),
                ],
                &[If],
            )],
            &STATEMENT_FOLLOW,
        );

        grammar.define(
            Nt::ElseStmt,
            vec![
                alt(
                    vec![t(Else), a(Ac::IfcAction), n(Nt::Statement), a(Ac::FillJp)],
                    &[Else],
                ),
                epsilon_alt(&[Ac::FillJpf]),
            ],
            &STATEMENT_FOLLOW,
        );

        grammar.define(
            Nt::IterationStmt,
            vec![alt(
                vec![
                    t(Repeat),
                    a(Ac::Loop),
                    n(Nt::Statement),
                    t(Until),
                    t(LParen),
                    n(Nt::Expression),
                    t(RParen),
                    a(Ac::Until),
                ],
                &[Repeat],
            )],
            &STATEMENT_FOLLOW,
        );

        grammar.define(
            Nt::ReturnStmt,
            vec![alt(
                vec![t(Return), n(Nt::ReturnStmtPrime)],
                &[Return],
            )],
            &STATEMENT_FOLLOW,
        );

        grammar.define(
            Nt::ReturnStmtPrime,
            vec![
                alt(vec![t(Semicolon), a(Ac::FunctionReturn)], &[Semicolon]),
                alt(
                    vec![n(Nt::Expression), a(Ac::FunReturn), t(Semicolon)],
                    &[Id, LParen, Num],
                ),
            ],
            &STATEMENT_FOLLOW,
        );

        grammar.define(
            Nt::Expression,
            vec![
                alt(vec![n(Nt::SimpleExpressionZegond)], &[LParen, Num]),
                alt(vec![t(Id), a(Ac::Pid), n(Nt::B)], &[Id]),
            ],
            &EXPRESSION_FOLLOW,
        );

        grammar.define(
            Nt::B,
            vec![
                alt(
                    vec![t(Assign), a(Ac::Push), n(Nt::Expression), a(Ac::Assign)],
                    &[Assign],
                ),
                alt(
                    vec![
                        t(LBracket),
                        n(Nt::Expression),
                        t(RBracket),
                        a(Ac::Parr),
                        n(Nt::H),
                    ],
                    &[LBracket],
                ),
                nullable_alt(
                    vec![n(Nt::SimpleExpressionPrime)],
                    &[LParen, Star, Plus, Minus, Less, Equal],
                ),
            ],
            &EXPRESSION_FOLLOW,
        );

        grammar.define(
            Nt::H,
            vec![
                alt(
                    vec![t(Assign), a(Ac::Push), n(Nt::Expression), a(Ac::Assign)],
                    &[Assign],
                ),
                nullable_alt(
                    vec![n(Nt::G), n(Nt::D), n(Nt::C)],
                    &[Star, Equal, Less, Plus, Minus],
                ),
            ],
            &EXPRESSION_FOLLOW,
        );

        grammar.define(
            Nt::SimpleExpressionZegond,
            vec![alt(
                vec![n(Nt::AdditiveExpressionZegond), n(Nt::C)],
                &[LParen, Num],
            )],
            &EXPRESSION_FOLLOW,
        );

        grammar.define(
            Nt::SimpleExpressionPrime,
            vec![nullable_alt(
                vec![n(Nt::AdditiveExpressionPrime), n(Nt::C)],
                &[LParen, Star, Plus, Minus, Less, Equal],
            )],
            &EXPRESSION_FOLLOW,
        );

        grammar.define(
            Nt::C,
            vec![
                alt(
                    vec![n(Nt::Relop), n(Nt::AdditiveExpression), a(Ac::Opera)],
                    &[Less, Equal],
                ),
                epsilon_alt(&[]),
            ],
            &EXPRESSION_FOLLOW,
        );

        grammar.define(
            Nt::Relop,
            vec![
                alt(vec![t(Less), a(Ac::Push)], &[Less]),
                alt(vec![t(Equal), a(Ac::Push)], &[Equal]),
            ],
            &[LParen, Id, Num],
        );

        grammar.define(
            Nt::AdditiveExpression,
            vec![alt(
                vec![n(Nt::Term), n(Nt::D)],
                &[LParen, Id, Num],
            )],
            &EXPRESSION_FOLLOW,
        );

        grammar.define(
            Nt::AdditiveExpressionPrime,
            vec![nullable_alt(
                vec![n(Nt::TermPrime), n(Nt::D)],
                &[LParen, Star, Plus, Minus],
            )],
            &ADDITIVE_FOLLOW,
        );

        grammar.define(
            Nt::AdditiveExpressionZegond,
            vec![alt(
                vec![n(Nt::TermZegond), n(Nt::D)],
                &[LParen, Num],
            )],
            &ADDITIVE_FOLLOW,
        );

        grammar.define(
            Nt::D,
            vec![
                alt(
                    vec![n(Nt::Addop), n(Nt::Term), a(Ac::Opera), n(Nt::D)],
                    &[Plus, Minus],
                ),
                epsilon_alt(&[]),
            ],
            &ADDITIVE_FOLLOW,
        );

        grammar.define(
            Nt::Addop,
            vec![
                alt(vec![t(Plus), a(Ac::Push)], &[Plus]),
                alt(vec![t(Minus), a(Ac::Push)], &[Minus]),
            ],
            &[LParen, Id, Num],
        );

        grammar.define(
            Nt::Term,
            vec![alt(
                vec![n(Nt::Factor), n(Nt::G)],
                &[LParen, Id, Num],
            )],
            &TERM_FOLLOW,
        );

        grammar.define(
            Nt::TermPrime,
            vec![nullable_alt(
                vec![n(Nt::FactorPrime), n(Nt::G)],
                &[LParen, Star],
            )],
            &TERM_FOLLOW,
        );

        grammar.define(
            Nt::TermZegond,
            vec![alt(
                vec![n(Nt::FactorZegond), n(Nt::G)],
                &[LParen, Num],
            )],
            &TERM_FOLLOW,
        );

        grammar.define(
            Nt::G,
            vec![
                alt(
                    vec![t(Star), a(Ac::Push), n(Nt::Factor), a(Ac::Opera), n(Nt::G)],
                    &[Star],
                ),
                epsilon_alt(&[]),
            ],
            &TERM_FOLLOW,
        );

        grammar.define(
            Nt::Factor,
            vec![
                alt(
                    vec![t(LParen), n(Nt::Expression), t(RParen)],
                    &[LParen],
                ),
                alt(vec![t(Id), a(Ac::Pid), n(Nt::VarCallPrime)], &[Id]),
                alt(vec![t(Num), a(Ac::Pnum)], &[Num]),
            ],
            &FACTOR_FOLLOW,
        );

        grammar.define(
            Nt::VarCallPrime,
            vec![
                alt(
                    vec![t(LParen), n(Nt::Args), t(RParen), a(Ac::Call)],
                    &[LParen],
                ),
                nullable_alt(vec![n(Nt::VarPrime)], &[LBracket]),
            ],
            &FACTOR_FOLLOW,
        );

        grammar.define(
            Nt::VarPrime,
            vec![
                alt(
                    vec![t(LBracket), n(Nt::Expression), t(RBracket), a(Ac::Parr)],
                    &[LBracket],
                ),
                epsilon_alt(&[]),
            ],
            &FACTOR_FOLLOW,
        );

        grammar.define(
            Nt::FactorPrime,
            vec![
                alt(
                    vec![t(LParen), n(Nt::Args), t(RParen), a(Ac::Call)],
                    &[LParen],
                ),
                epsilon_alt(&[]),
            ],
            &FACTOR_FOLLOW,
        );

        grammar.define(
            Nt::FactorZegond,
            vec![
                alt(
                    vec![t(LParen), n(Nt::Expression), t(RParen)],
                    &[LParen],
                ),
                alt(vec![t(Num), a(Ac::Pnum)], &[Num]),
            ],
            &FACTOR_FOLLOW,
        );

        grammar.define(
            Nt::Args,
            vec![
                alt(vec![n(Nt::ArgList)], &[Id, LParen, Num]),
                epsilon_alt(&[]),
            ],
            &[RParen],
        );

        grammar.define(
            Nt::ArgList,
            vec![alt(
                vec![n(Nt::Expression), a(Ac::AddArgs), n(Nt::ArgListPrime)],
                &[Id, LParen, Num],
            )],
            &[RParen],
        );

        grammar.define(
            Nt::ArgListPrime,
            vec![
                alt(
                    vec![
                        t(Comma),
                        n(Nt::Expression),
                        a(Ac::AddArgs),
                        n(Nt::ArgListPrime),
                    ],
                    &[Comma],
                ),
                epsilon_alt(&[]),
            ],
            &[RParen],
        );

        debug_assert_eq!(grammar.entries.len(), NON_TERMINAL_COUNT);

        grammar
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_NON_TERMINALS: [NonTerminal; NON_TERMINAL_COUNT] = [
        NonTerminal::Program,
        NonTerminal::DeclarationList,
        NonTerminal::Declaration,
        NonTerminal::DeclarationInitial,
        NonTerminal::DeclarationPrime,
        NonTerminal::VarDeclarationPrime,
        NonTerminal::FunDeclarationPrime,
        NonTerminal::TypeSpecifier,
        NonTerminal::Params,
        NonTerminal::ParamList,
        NonTerminal::Param,
        NonTerminal::ParamPrime,
        NonTerminal::CompoundStmt,
        NonTerminal::StatementList,
        NonTerminal::Statement,
        NonTerminal::ExpressionStmt,
        NonTerminal::SelectionStmt,
        NonTerminal::ElseStmt,
        NonTerminal::IterationStmt,
        NonTerminal::ReturnStmt,
        NonTerminal::ReturnStmtPrime,
        NonTerminal::Expression,
        NonTerminal::B,
        NonTerminal::H,
        NonTerminal::SimpleExpressionZegond,
        NonTerminal::SimpleExpressionPrime,
        NonTerminal::C,
        NonTerminal::Relop,
        NonTerminal::AdditiveExpression,
        NonTerminal::AdditiveExpressionPrime,
        NonTerminal::AdditiveExpressionZegond,
        NonTerminal::D,
        NonTerminal::Addop,
        NonTerminal::Term,
        NonTerminal::TermPrime,
        NonTerminal::TermZegond,
        NonTerminal::G,
        NonTerminal::Factor,
        NonTerminal::VarCallPrime,
        NonTerminal::VarPrime,
        NonTerminal::FactorPrime,
        NonTerminal::FactorZegond,
        NonTerminal::Args,
        NonTerminal::ArgList,
        NonTerminal::ArgListPrime,
    ];

    const ALL_TERMS: [Term; 26] = [
        Term::If,
        Term::Else,
        Term::Void,
        Term::Int,
        Term::Repeat,
        Term::Break,
        Term::Until,
        Term::Return,
        Term::Semicolon,
        Term::Colon,
        Term::Comma,
        Term::LBracket,
        Term::RBracket,
        Term::LParen,
        Term::RParen,
        Term::LBrace,
        Term::RBrace,
        Term::Plus,
        Term::Minus,
        Term::Less,
        Term::Star,
        Term::Assign,
        Term::Equal,
        Term::Id,
        Term::Num,
        Term::End,
    ];

    #[test]
    fn test_every_non_terminal_is_defined() {
        for nt in ALL_NON_TERMINALS {
            assert!(
                !GRAMMAR.alternatives(nt).is_empty(),
                "{} has no alternatives",
                nt.name()
            );
        }
    }

    #[test]
    fn test_alternative_first_sets_are_disjoint() {
        for nt in ALL_NON_TERMINALS {
            let alternatives = GRAMMAR.alternatives(nt);
            for term in ALL_TERMS {
                let matching = alternatives
                    .iter()
                    .filter(|production| production.first.contains(term))
                    .count();
                assert!(
                    matching <= 1,
                    "{} has competing alternatives on '{}'",
                    nt.name(),
                    term.surface()
                );
            }
        }
    }

    #[test]
    fn test_at_most_one_nullable_alternative() {
        for nt in ALL_NON_TERMINALS {
            let nullable = GRAMMAR
                .alternatives(nt)
                .iter()
                .filter(|production| production.epsilon)
                .count();
            assert!(nullable <= 1, "{} has {} nullable alternatives", nt.name(), nullable);
        }
    }

    #[test]
    fn test_dangling_else_binds_to_nearest_if() {
        let production = GRAMMAR
            .select(NonTerminal::ElseStmt, Some(Term::Else))
            .expect("else must select an alternative");
        assert_eq!(production.path[0], Symbol::T(Term::Else));
    }

    #[test]
    fn test_else_stmt_vanishes_on_follow() {
        let production = GRAMMAR
            .select(NonTerminal::ElseStmt, Some(Term::RBrace))
            .expect("else-stmt must be nullable before '}'");
        assert_eq!(production.path[0], Symbol::Epsilon);
    }

    #[test]
    fn test_select_by_first() {
        let production = GRAMMAR
            .select(NonTerminal::Statement, Some(Term::If))
            .expect("if must select the selection statement");
        assert_eq!(production.path, vec![n(NonTerminal::SelectionStmt)]);
    }

    #[test]
    fn test_select_rejects_unusable_lookahead() {
        assert!(GRAMMAR.select(NonTerminal::TypeSpecifier, Some(Term::Num)).is_none());
        assert!(GRAMMAR.select(NonTerminal::Program, None).is_none());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(NonTerminal::DeclarationList.display_name(), "Declaration-list");
        assert_eq!(NonTerminal::B.display_name(), "B");
        assert_eq!(NonTerminal::Program.display_name(), "Program");
    }

    #[test]
    fn test_term_from_token() {
        use crate::scanner::{Token, TokenKind};

        let cases = [
            (Token::new(TokenKind::Keyword, "repeat", 1), Term::Repeat),
            (Token::new(TokenKind::Symbol, "==", 1), Term::Equal),
            (Token::new(TokenKind::Symbol, "=", 1), Term::Assign),
            (Token::new(TokenKind::Id, "rate", 1), Term::Id),
            (Token::new(TokenKind::Num, "42", 1), Term::Num),
            (Token::end(1), Term::End),
        ];

        for (token, expected) in cases {
            assert_eq!(Term::from_token(&token), Some(expected));
        }
    }
}
