use swc_core::{
    common::{Span, Spanned},
    ecma::{
        ast::*,
        visit::{noop_visit_type, Visit, VisitWith},
    },
};

use crate::{
    body::BodyItem,
    error::TransformError,
    factory,
    naming::{is_valid_identifier, setter_name},
};

/// A `(value, setter)` pair replacing one instance state field.
#[derive(Debug, Clone)]
pub struct StateBinding {
    pub getter: String,
    pub setter: String,
    pub init: Box<Expr>,
    pub span: Span,
}

impl StateBinding {
    pub fn new(getter: &str, init: Box<Expr>, span: Span) -> Result<Self, TransformError> {
        if !is_valid_identifier(getter) {
            return Err(TransformError::MalformedStateField { span });
        }
        let setter = setter_name(getter).ok_or(TransformError::MalformedStateField { span })?;

        Ok(Self {
            getter: getter.to_string(),
            setter,
            init,
            span,
        })
    }

    /// `const [getter, setter] = useState(init);`
    pub fn into_hook_declaration(self, state_hook: &str) -> Stmt {
        factory::var_stmt(
            VarDeclKind::Const,
            factory::array_pair(&self.getter, &self.setter),
            Some(Box::new(factory::call_expr(
                state_hook,
                vec![self.init],
                self.span,
            ))),
        )
    }

    /// `setter(init)`, used when the binding describes an update rather than
    /// a declaration.
    pub fn into_setter_call(self) -> Expr {
        factory::call_expr(&self.setter, vec![self.init], self.span)
    }
}

/// Whether `expr` is exactly `this.state`.
pub(crate) fn is_this_state(expr: &Expr) -> bool {
    matches!(
        unparen(expr),
        Expr::Member(MemberExpr {
            obj,
            prop: MemberProp::Ident(prop),
            ..
        }) if matches!(&**obj, Expr::This(_)) && &*prop.sym == "state"
    )
}

/// Field path below `this.state` for a member chain rooted at it:
/// `this.state` is `[]`, `this.state.a.b` is `["a", "b"]`.
pub(crate) fn state_path(member: &MemberExpr) -> Option<Vec<&str>> {
    let MemberProp::Ident(prop) = &member.prop else {
        return None;
    };

    match &*member.obj {
        Expr::This(_) => (&*prop.sym == "state").then(Vec::new),
        Expr::Member(inner) => {
            let mut path = state_path(inner)?;
            path.push(&*prop.sym);
            Some(path)
        }
        _ => None,
    }
}

pub(crate) fn unparen(mut expr: &Expr) -> &Expr {
    while let Expr::Paren(paren) = expr {
        expr = &paren.expr;
    }
    expr
}

/// Name of an identifier or string key. Computed, numeric and bigint keys
/// fail with `err`.
pub(crate) fn key_name(key: &PropName, err: TransformError) -> Result<String, TransformError> {
    match key {
        PropName::Ident(ident) => Ok(ident.sym.to_string()),
        PropName::Str(s) => Ok(s.value.to_string()),
        _ => Err(err),
    }
}

/// One binding per property of a state object literal, in literal order.
pub(crate) fn bindings_from_object(obj: &ObjectLit) -> Result<Vec<StateBinding>, TransformError> {
    obj.props
        .iter()
        .map(|prop| match prop {
            PropOrSpread::Spread(spread) => Err(TransformError::UnsupportedStateShape {
                span: spread.expr.span(),
                reason: "spread elements in a state object",
            }),
            PropOrSpread::Prop(prop) => match &**prop {
                Prop::KeyValue(kv) => {
                    let span = kv.key.span();
                    let name = key_name(&kv.key, TransformError::MalformedStateField { span })?;
                    StateBinding::new(&name, kv.value.clone(), span)
                }
                Prop::Shorthand(ident) => StateBinding::new(
                    &ident.sym,
                    Box::new(Expr::Ident(ident.clone())),
                    ident.span,
                ),
                other => Err(TransformError::UnsupportedStateShape {
                    span: other.span(),
                    reason: "methods or accessors in a state object",
                }),
            },
        })
        .collect()
}

fn object_literal<'a>(expr: &'a Expr, reason: &'static str) -> Result<&'a ObjectLit, TransformError> {
    match unparen(expr) {
        Expr::Object(obj) => Ok(obj),
        other => Err(TransformError::UnsupportedStateShape {
            span: other.span(),
            reason,
        }),
    }
}

/// Bindings described by an assignment to `this.state` or `this.state.field`,
/// or `None` when `assign` does not target state at all.
pub(crate) fn assigned_state(assign: &AssignExpr) -> Option<Result<Vec<StateBinding>, TransformError>> {
    let AssignTarget::Simple(SimpleAssignTarget::Member(member)) = &assign.left else {
        return None;
    };
    let path = state_path(member)?;

    if assign.op != AssignOp::Assign {
        return Some(Err(TransformError::UnsupportedStateShape {
            span: assign.span,
            reason: "compound assignment to state",
        }));
    }

    Some(match path.as_slice() {
        [] => object_literal(&assign.right, "`this.state` must be assigned an object literal")
            .and_then(bindings_from_object),
        [field] => StateBinding::new(field, assign.right.clone(), assign.span).map(|b| vec![b]),
        _ => Err(TransformError::UnsupportedStatePath { span: assign.span }),
    })
}

/// Hooks declared by a `state = { ... }` class field.
pub fn extract_from_class_prop(prop: &ClassProp) -> Result<Vec<StateBinding>, TransformError> {
    let reason = "the `state` field must be initialized with an object literal";
    match &prop.value {
        Some(value) => bindings_from_object(object_literal(value, reason)?),
        None => Err(TransformError::UnsupportedStateShape {
            span: prop.span,
            reason,
        }),
    }
}

enum ConstructorStmt<'a> {
    SuperCall,
    MethodBind,
    StateAssign(&'a AssignExpr),
    Other,
}

fn classify_constructor_stmt(stmt: &Stmt) -> ConstructorStmt<'_> {
    let Stmt::Expr(ExprStmt { expr, .. }) = stmt else {
        return ConstructorStmt::Other;
    };

    match unparen(expr) {
        Expr::Call(CallExpr {
            callee: Callee::Super(_),
            ..
        }) => ConstructorStmt::SuperCall,
        Expr::Assign(assign) if assigned_state(assign).is_some() => {
            ConstructorStmt::StateAssign(assign)
        }
        Expr::Assign(assign) if is_method_bind(assign) => ConstructorStmt::MethodBind,
        _ => ConstructorStmt::Other,
    }
}

// `this.handle = this.handle.bind(this)`
fn is_method_bind(assign: &AssignExpr) -> bool {
    let AssignTarget::Simple(SimpleAssignTarget::Member(target)) = &assign.left else {
        return false;
    };
    if !matches!(&*target.obj, Expr::This(_)) {
        return false;
    }

    match unparen(&assign.right) {
        Expr::Call(CallExpr {
            callee: Callee::Expr(callee),
            ..
        }) => matches!(
            &**callee,
            Expr::Member(MemberExpr {
                obj,
                prop: MemberProp::Ident(prop),
                ..
            }) if &*prop.sym == "bind"
                && matches!(&**obj, Expr::Member(MemberExpr { obj, .. }) if matches!(&**obj, Expr::This(_)))
        ),
        _ => false,
    }
}

// The constructor body is inlined into `function Name(props)`, so its
// parameter has to already be called `props`.
fn check_constructor_params(ctor: &Constructor) -> Result<(), TransformError> {
    match ctor.params.as_slice() {
        [] => Ok(()),
        [ParamOrTsParamProp::Param(Param {
            pat: Pat::Ident(binding),
            ..
        })] if &*binding.id.sym == "props" => Ok(()),
        [param, ..] => Err(TransformError::UnsupportedMember {
            span: param.span(),
            kind: "constructors whose only parameter is not `props`",
        }),
    }
}

/// Hooks declared by the constructor, in statement order.
///
/// `super(...)` calls and method bindings are dropped, other statements are
/// kept in place so the hooks land where the constructor declared them.
pub fn extract_from_constructor(ctor: &Constructor) -> Result<Vec<BodyItem>, TransformError> {
    check_constructor_params(ctor)?;
    let Some(body) = &ctor.body else {
        return Ok(vec![]);
    };

    let mut items = Vec::with_capacity(body.stmts.len());
    for stmt in &body.stmts {
        match classify_constructor_stmt(stmt) {
            ConstructorStmt::SuperCall => {}
            ConstructorStmt::MethodBind => {
                tracing::warn!("dropping method binding from constructor");
            }
            ConstructorStmt::StateAssign(assign) => {
                if let Some(bindings) = assigned_state(assign) {
                    items.extend(bindings?.into_iter().map(BodyItem::Hook));
                }
            }
            ConstructorStmt::Other => {
                if contains_state_assignment(stmt) {
                    return Err(TransformError::UnsupportedStateShape {
                        span: stmt.span(),
                        reason: "state must be declared at the top level of the constructor",
                    });
                }
                items.push(BodyItem::Stmt(stmt.clone()));
            }
        }
    }

    Ok(items)
}

#[derive(Default)]
struct StateAssignmentFinder {
    found: bool,
}

impl Visit for StateAssignmentFinder {
    fn visit_assign_expr(&mut self, assign: &AssignExpr) {
        if assigned_state(assign).is_some() {
            self.found = true;
            return;
        }
        assign.visit_children_with(self);
    }

    fn visit_function(&mut self, _: &Function) {}
    fn visit_class(&mut self, _: &Class) {}

    noop_visit_type!();
}

fn contains_state_assignment(stmt: &Stmt) -> bool {
    let mut finder = StateAssignmentFinder::default();
    stmt.visit_with(&mut finder);
    finder.found
}
