//! Small constructors for the synthesized nodes. Everything created here uses
//! `DUMMY_SP` unless a span is passed in, and an empty syntax context.

use swc_core::{
    common::{Span, SyntaxContext, DUMMY_SP},
    ecma::ast::*,
};

pub fn ident(name: &str) -> Ident {
    Ident::new(name.into(), DUMMY_SP, SyntaxContext::empty())
}

pub fn ident_expr(name: &str, span: Span) -> Expr {
    Expr::Ident(Ident::new(name.into(), span, SyntaxContext::empty()))
}

/// `callee(args...)` where `callee` may be a dotted path such as `React.useState`.
pub fn call_expr(callee: &str, args: Vec<Box<Expr>>, span: Span) -> Expr {
    Expr::Call(CallExpr {
        span,
        ctxt: SyntaxContext::empty(),
        callee: Callee::Expr(Box::new(callee_path(callee))),
        args: args
            .into_iter()
            .map(|expr| ExprOrSpread { spread: None, expr })
            .collect(),
        type_args: None,
    })
}

fn callee_path(path: &str) -> Expr {
    let mut segments = path.split('.');
    let head = segments.next().unwrap_or_default();
    segments.fold(ident_expr(head, DUMMY_SP), |obj, segment| {
        Expr::Member(MemberExpr {
            span: DUMMY_SP,
            obj: Box::new(obj),
            prop: MemberProp::Ident(IdentName::new(segment.into(), DUMMY_SP)),
        })
    })
}

pub fn expr_stmt(expr: Expr) -> Stmt {
    Stmt::Expr(ExprStmt {
        span: DUMMY_SP,
        expr: Box::new(expr),
    })
}

pub fn var_stmt(kind: VarDeclKind, name: Pat, init: Option<Box<Expr>>) -> Stmt {
    Stmt::Decl(Decl::Var(Box::new(VarDecl {
        span: DUMMY_SP,
        ctxt: SyntaxContext::empty(),
        kind,
        declare: false,
        decls: vec![VarDeclarator {
            span: DUMMY_SP,
            name,
            init,
            definite: false,
        }],
    })))
}

pub fn binding(name: &str) -> Pat {
    Pat::Ident(BindingIdent {
        id: ident(name),
        type_ann: None,
    })
}

/// `[first, second]` as a binding pattern.
pub fn array_pair(first: &str, second: &str) -> Pat {
    Pat::Array(ArrayPat {
        span: DUMMY_SP,
        elems: vec![Some(binding(first)), Some(binding(second))],
        optional: false,
        type_ann: None,
    })
}

pub fn block(stmts: Vec<Stmt>) -> BlockStmt {
    BlockStmt {
        span: DUMMY_SP,
        ctxt: SyntaxContext::empty(),
        stmts,
    }
}

/// `() => { stmts }`
pub fn arrow_block(stmts: Vec<Stmt>) -> Expr {
    Expr::Arrow(ArrowExpr {
        span: DUMMY_SP,
        ctxt: SyntaxContext::empty(),
        params: vec![],
        body: Box::new(BlockStmtOrExpr::BlockStmt(block(stmts))),
        is_async: false,
        is_generator: false,
        type_params: None,
        return_type: None,
    })
}

/// `void 0`
pub fn undefined(span: Span) -> Expr {
    Expr::Unary(UnaryExpr {
        span,
        op: UnaryOp::Void,
        arg: Box::new(Expr::Lit(Lit::Num(Number {
            span,
            value: 0.0,
            raw: None,
        }))),
    })
}

pub fn param(name: &str) -> Param {
    Param {
        span: DUMMY_SP,
        decorators: vec![],
        pat: binding(name),
    }
}
