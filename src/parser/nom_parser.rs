use nom::{
    branch::alt,
    bytes::complete::{is_not, tag},
    character::complete::{alpha1, alphanumeric1, char, multispace0, newline, one_of, space0},
    combinator::{map, opt, recognize, value},
    multi::{many0, many1},
    number::complete::float,
    sequence::{delimited, pair, tuple},
    IResult,
};

use crate::{blackboard::Value, nodes::ConditionOp};

/// Parsed form of one `tree name = ...` statement.
#[derive(Debug, PartialEq)]
pub struct TreeRootDef<'src> {
    pub name: &'src str,
    pub root: TreeDef<'src>,
}

/// AST of a node: type name, parenthesized arguments, braced children.
/// Borrows the source string, so the source must outlive the AST.
#[derive(Debug, PartialEq)]
pub struct TreeDef<'src> {
    pub ty: &'src str,
    pub args: Vec<ArgDef<'src>>,
    pub children: Vec<TreeDef<'src>>,
}

impl<'src> TreeDef<'src> {
    #[allow(dead_code)]
    pub(crate) fn new(ty: &'src str) -> Self {
        Self {
            ty,
            args: vec![],
            children: vec![],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArgDef<'src> {
    Number(f32),
    /// The `random` keyword, e.g. `Fire (random)`.
    Random,
    Ident(&'src str),
    /// A blackboard predicate, e.g. `targetOffCentre <= 0.1`.
    Compare {
        key: &'src str,
        op: ConditionOp,
        value: Value,
    },
}

#[derive(Debug, PartialEq)]
pub struct TreeSource<'src> {
    pub tree_defs: Vec<TreeRootDef<'src>>,
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))(input)
}

fn newlines(i: &str) -> IResult<&str, ()> {
    delimited(space0, many1(one_of("\r\n")), space0)(i).map(|(rest, _)| (rest, ()))
}

fn open_paren(i: &str) -> IResult<&str, ()> {
    value((), delimited(space0, char('('), space0))(i)
}

fn close_paren(i: &str) -> IResult<&str, ()> {
    value((), delimited(space0, char(')'), space0))(i)
}

fn open_brace(i: &str) -> IResult<&str, ()> {
    value((), delimited(space0, char('{'), space0))(i)
}

fn close_brace(i: &str) -> IResult<&str, ()> {
    value((), delimited(space0, char('}'), space0))(i)
}

fn line_comment<T>(i: &str) -> IResult<&str, Option<T>> {
    let (i, _) = tuple((space0, char('#'), opt(is_not("\n\r"))))(i)?;

    Ok((i, None))
}

fn some<I, R>(f: impl Fn(I) -> IResult<I, R>) -> impl Fn(I) -> IResult<I, Option<R>> {
    move |i| {
        let (i, res) = f(i)?;
        Ok((i, Some(res)))
    }
}

fn compare_op(i: &str) -> IResult<&str, ConditionOp> {
    alt((
        value(ConditionOp::Le, tag("<=")),
        value(ConditionOp::Ge, tag(">=")),
        value(ConditionOp::Eq, tag("==")),
        value(ConditionOp::Ne, tag("!=")),
        value(ConditionOp::Lt, tag("<")),
        value(ConditionOp::Gt, tag(">")),
    ))(i)
}

fn literal(i: &str) -> IResult<&str, Value> {
    alt((
        value(Value::Bool(true), tag("true")),
        value(Value::Bool(false), tag("false")),
        map(float, Value::Number),
    ))(i)
}

fn compare_arg(i: &str) -> IResult<&str, ArgDef> {
    let (i, key) = delimited(space0, identifier, space0)(i)?;

    let (i, op) = compare_op(i)?;

    let (i, value) = delimited(space0, literal, space0)(i)?;

    Ok((i, ArgDef::Compare { key, op, value }))
}

fn arg(i: &str) -> IResult<&str, ArgDef> {
    alt((
        compare_arg,
        value(ArgDef::Random, tag("random")),
        map(float, ArgDef::Number),
        map(identifier, ArgDef::Ident),
    ))(i)
}

fn args(i: &str) -> IResult<&str, Vec<ArgDef>> {
    many0(delimited(
        multispace0,
        arg,
        many0(pair(multispace0, char(','))),
    ))(i)
}

fn tree_children(i: &str) -> IResult<&str, Vec<TreeDef>> {
    let (i, _) = many0(newlines)(i)?;

    let (i, v) = many0(delimited(
        space0,
        alt((line_comment, some(parse_tree_node))),
        many0(newlines),
    ))(i)?;

    let (i, _) = many0(newlines)(i)?;

    Ok((i, v.into_iter().flatten().collect()))
}

fn parse_tree_node(i: &str) -> IResult<&str, TreeDef> {
    let (i, ty) = delimited(space0, identifier, space0)(i)?;

    let (i, args) = opt(delimited(open_paren, args, close_paren))(i)?;

    let (i, children) = opt(delimited(open_brace, tree_children, close_brace))(i)?;

    let (i, _) = opt(line_comment::<TreeDef>)(i)?;

    Ok((
        i,
        TreeDef {
            ty,
            args: args.unwrap_or_default(),
            children: children.unwrap_or_default(),
        },
    ))
}

fn parse_tree(i: &str) -> IResult<&str, TreeRootDef> {
    let (i, _) = delimited(multispace0, tag("tree"), space0)(i)?;

    let (i, name) = delimited(space0, identifier, space0)(i)?;

    let (i, _) = delimited(space0, tag("="), space0)(i)?;

    let (i, root) = parse_tree_node(i)?;

    Ok((i, TreeRootDef { name, root }))
}

/// Parses a whole source file into a [`TreeSource`] AST. The AST borrows
/// the input, so the source string must outlive it.
pub fn parse_file(i: &str) -> IResult<&str, TreeSource> {
    let (i, stmts) = many0(alt((
        delimited(multispace0, line_comment, newline),
        some(parse_tree),
    )))(i)?;

    // Eat up trailing whitespace to indicate that the input was thoroughly
    // consumed
    let (i, _) = multispace0(i)?;

    Ok((
        i,
        TreeSource {
            tree_defs: stmts.into_iter().flatten().collect(),
        },
    ))
}
