use swc_core::{
    common::{Span, SyntaxContext},
    ecma::{
        ast::*,
        visit::{noop_visit_mut_type, VisitMut, VisitMutWith},
    },
};

use crate::{error::TransformError, state::is_this_state};

/// Rewrites `this.member` to `member` and `this.state.field` to `field`.
///
/// Nested `function`s, classes and object accessors are skipped since `this`
/// is rebound there; arrow functions are entered. Writes to `this.member`
/// are rejected: the member becomes a `const` or an undeclared name.
#[derive(Debug, Default)]
pub struct ThisReferenceStripper {
    error: Option<TransformError>,
}

/// Strip self references in `node` in place.
pub fn strip_this<N>(node: &mut N) -> Result<(), TransformError>
where
    N: VisitMutWith<ThisReferenceStripper>,
{
    let mut stripper = ThisReferenceStripper::default();
    node.visit_mut_with(&mut stripper);
    match stripper.error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

enum Access {
    Bare(Ident),
    StateRead(Span),
    Other,
}

fn classify(expr: &Expr) -> Access {
    match expr {
        Expr::Member(member) => classify_member(member),
        _ => Access::Other,
    }
}

fn classify_member(member: &MemberExpr) -> Access {
    let MemberProp::Ident(prop) = &member.prop else {
        return Access::Other;
    };

    match &*member.obj {
        Expr::This(_) if &*prop.sym == "state" => Access::StateRead(member.span),
        Expr::This(_) => Access::Bare(Ident::new(
            prop.sym.clone(),
            member.span,
            SyntaxContext::empty(),
        )),
        obj if is_this_state(obj) => Access::Bare(Ident::new(
            prop.sym.clone(),
            member.span,
            SyntaxContext::empty(),
        )),
        _ => Access::Other,
    }
}

// `this.x = ..` or `this.x++`; state writes are rewritten to setters before
// stripping, so anything left here is a plain instance field
fn instance_field_write(member: &MemberExpr) -> Option<TransformError> {
    match (&*member.obj, &member.prop) {
        (Expr::This(_), MemberProp::Ident(prop)) => Some(TransformError::InstanceFieldWrite {
            span: member.span,
            name: prop.sym.to_string(),
        }),
        _ if is_this_state(&member.obj) => Some(TransformError::InstanceFieldWrite {
            span: member.span,
            name: "state".to_string(),
        }),
        _ => None,
    }
}

// `const { a, b } = this.state;` where every property is plain shorthand
fn is_state_destructuring(decl: &VarDeclarator) -> bool {
    let (Pat::Object(pat), Some(init)) = (&decl.name, &decl.init) else {
        return false;
    };

    is_this_state(init)
        && pat.props.iter().all(|prop| {
            matches!(prop, ObjectPatProp::Assign(AssignPatProp { value: None, .. }))
        })
}

impl VisitMut for ThisReferenceStripper {
    fn visit_mut_expr(&mut self, expr: &mut Expr) {
        match classify(expr) {
            Access::Bare(ident) => *expr = Expr::Ident(ident),
            Access::StateRead(span) => {
                self.error
                    .get_or_insert(TransformError::UnsupportedStateRead { span });
            }
            Access::Other => expr.visit_mut_children_with(self),
        }
    }

    fn visit_mut_simple_assign_target(&mut self, target: &mut SimpleAssignTarget) {
        if let SimpleAssignTarget::Member(member) = target {
            if let Some(err) = instance_field_write(member) {
                self.error.get_or_insert(err);
                return;
            }
        }
        target.visit_mut_children_with(self);
    }

    fn visit_mut_update_expr(&mut self, update: &mut UpdateExpr) {
        if let Expr::Member(member) = &*update.arg {
            if let Some(err) = instance_field_write(member) {
                self.error.get_or_insert(err);
                return;
            }
        }
        update.visit_mut_children_with(self);
    }

    fn visit_mut_stmts(&mut self, stmts: &mut Vec<Stmt>) {
        stmts.visit_mut_children_with(self);
        stmts.retain(|stmt| !matches!(stmt, Stmt::Decl(Decl::Var(var)) if var.decls.is_empty()));
    }

    fn visit_mut_var_decl(&mut self, var: &mut VarDecl) {
        // The destructured names are already bound by the state hooks
        var.decls.retain(|decl| !is_state_destructuring(decl));
        var.visit_mut_children_with(self);
    }

    fn visit_mut_function(&mut self, _: &mut Function) {}
    fn visit_mut_class(&mut self, _: &mut Class) {}
    fn visit_mut_getter_prop(&mut self, _: &mut GetterProp) {}
    fn visit_mut_setter_prop(&mut self, _: &mut SetterProp) {}

    noop_visit_mut_type!();
}
