use swc_core::{
    common::Spanned,
    ecma::{
        ast::*,
        visit::{noop_visit_mut_type, VisitMut, VisitMutWith},
    },
};

use crate::{
    error::TransformError,
    factory,
    state::{assigned_state, bindings_from_object, state_path, unparen, StateBinding},
};

/// Turns `this.setState({ a, b })`, `this.state = { ... }` and
/// `this.state.a = v` into setter calls.
///
/// In statement position one statement is emitted per property. In expression
/// position (arrow bodies, JSX handlers) several calls become a sequence
/// expression.
#[derive(Debug, Default)]
pub struct StateMutationRewriter {
    error: Option<TransformError>,
}

pub fn rewrite_state_mutations<N>(node: &mut N) -> Result<(), TransformError>
where
    N: VisitMutWith<StateMutationRewriter>,
{
    let mut rewriter = StateMutationRewriter::default();
    node.visit_mut_with(&mut rewriter);
    match rewriter.error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn is_set_state_callee(callee: &Callee) -> bool {
    matches!(
        callee,
        Callee::Expr(expr) if matches!(
            &**expr,
            Expr::Member(MemberExpr {
                obj,
                prop: MemberProp::Ident(prop),
                ..
            }) if matches!(&**obj, Expr::This(_)) && &*prop.sym == "setState"
        )
    )
}

fn batched_update(call: &CallExpr) -> Result<Vec<StateBinding>, TransformError> {
    match call.args.as_slice() {
        [ExprOrSpread { spread: None, expr }] => match unparen(expr) {
            Expr::Object(obj) => bindings_from_object(obj),
            Expr::Arrow(_) | Expr::Fn(_) => Err(TransformError::UnsupportedStateShape {
                span: expr.span(),
                reason: "updater functions passed to `setState`",
            }),
            other => Err(TransformError::UnsupportedStateShape {
                span: other.span(),
                reason: "`setState` must be called with an object literal",
            }),
        },
        [_, _] => Err(TransformError::UnsupportedStateShape {
            span: call.span,
            reason: "completion callbacks passed to `setState`",
        }),
        _ => Err(TransformError::UnsupportedStateShape {
            span: call.span,
            reason: "`setState` must be called with a single object literal",
        }),
    }
}

/// Setter calls replacing `expr`, or `None` when `expr` does not mutate state.
fn setter_calls(expr: &Expr) -> Option<Result<Vec<Expr>, TransformError>> {
    let bindings = match unparen(expr) {
        Expr::Call(call) if is_set_state_callee(&call.callee) => batched_update(call),
        Expr::Assign(assign) => assigned_state(assign)?,
        Expr::Update(update) => {
            let Expr::Member(member) = unparen(&update.arg) else {
                return None;
            };
            state_path(member)?;
            Err(TransformError::UnsupportedStateShape {
                span: update.span,
                reason: "increment or decrement of state",
            })
        }
        _ => return None,
    };

    Some(bindings.map(|bindings| {
        bindings
            .into_iter()
            .map(StateBinding::into_setter_call)
            .collect()
    }))
}

impl StateMutationRewriter {
    fn fail(&mut self, err: TransformError) {
        self.error.get_or_insert(err);
    }
}

impl VisitMut for StateMutationRewriter {
    fn visit_mut_stmts(&mut self, stmts: &mut Vec<Stmt>) {
        let mut rewritten = Vec::with_capacity(stmts.len());

        for mut stmt in stmts.drain(..) {
            let calls = match &stmt {
                Stmt::Expr(ExprStmt { expr, .. }) => setter_calls(expr),
                _ => None,
            };

            match calls {
                Some(Ok(calls)) => {
                    for mut call in calls {
                        // Values may contain handlers that update state too
                        call.visit_mut_children_with(self);
                        rewritten.push(factory::expr_stmt(call));
                    }
                }
                Some(Err(err)) => {
                    self.fail(err);
                    rewritten.push(stmt);
                }
                None => {
                    stmt.visit_mut_with(self);
                    rewritten.push(stmt);
                }
            }
        }

        *stmts = rewritten;
    }

    fn visit_mut_expr(&mut self, expr: &mut Expr) {
        expr.visit_mut_children_with(self);

        let Some(calls) = setter_calls(expr) else {
            return;
        };
        match calls {
            Ok(mut calls) => {
                let span = expr.span();
                *expr = match calls.len() {
                    0 => factory::undefined(span),
                    1 => calls.remove(0),
                    _ => Expr::Paren(ParenExpr {
                        span,
                        expr: Box::new(Expr::Seq(SeqExpr {
                            span,
                            exprs: calls.into_iter().map(Box::new).collect(),
                        })),
                    }),
                };
            }
            Err(err) => self.fail(err),
        }
    }

    fn visit_mut_function(&mut self, _: &mut Function) {}
    fn visit_mut_class(&mut self, _: &mut Class) {}

    noop_visit_mut_type!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{normalize, parse_stmts, print_stmts};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn rewrite(src: &str) -> Result<String, TransformError> {
        let mut stmts = parse_stmts(src);
        rewrite_state_mutations(&mut stmts)?;
        Ok(print_stmts(stmts))
    }

    #[test]
    fn test_batched_update_in_property_order() {
        let actual = rewrite(r#"this.setState({ count: 1, name: "Jane" });"#).unwrap();
        assert_eq!(actual, normalize(r#"setCount(1); setName("Jane");"#));
    }

    #[test]
    fn test_batched_update_keeps_surrounding_statements() {
        let actual = rewrite("before(); this.setState({ a: 1, b: 2 }); after();").unwrap();
        assert_eq!(actual, normalize("before(); setA(1); setB(2); after();"));
    }

    #[test]
    fn test_direct_field_assignment() {
        let actual = rewrite("this.state.open = !visible;").unwrap();
        assert_eq!(actual, normalize("setOpen(!visible);"));
    }

    #[test]
    fn test_state_reassignment_outside_constructor() {
        let actual = rewrite("this.state = { count: 0, open: false };").unwrap();
        assert_eq!(actual, normalize("setCount(0); setOpen(false);"));
    }

    #[test]
    fn test_empty_batched_update_is_dropped() {
        let actual = rewrite("this.setState({}); done();").unwrap();
        assert_eq!(actual, normalize("done();"));
    }

    #[test]
    fn test_nested_blocks_are_rewritten() {
        let actual = rewrite("if (ready) { this.setState({ loading: false }); }").unwrap();
        assert_eq!(actual, normalize("if (ready) { setLoading(false); }"));
    }

    #[test]
    fn test_arrow_expression_body_single_property() {
        let actual = rewrite("const reset = () => this.setState({ count: 0 });").unwrap();
        assert_eq!(actual, normalize("const reset = () => setCount(0);"));
    }

    #[test]
    fn test_arrow_expression_body_multiple_properties() {
        let actual = rewrite("const reset = () => this.setState({ a: 0, b: 1 });").unwrap();
        assert_eq!(actual, normalize("const reset = () => (setA(0), setB(1));"));
    }

    #[test]
    fn test_handler_inside_update_value() {
        let actual = rewrite("this.setState({ onDone: () => this.setState({ done: true }) });")
            .unwrap();
        assert_eq!(actual, normalize("setOnDone(() => setDone(true));"));
    }

    #[test]
    fn test_state_reads_are_left_alone() {
        let src = "log(this.state.count); this.other = 1;";
        assert_eq!(rewrite(src).unwrap(), normalize(src));
    }

    #[test]
    fn test_nested_function_is_skipped() {
        let src = "timer(function () { this.setState({ tick: 1 }); });";
        assert_eq!(rewrite(src).unwrap(), normalize(src));
    }

    #[rstest]
    #[case("this.setState(nextState);")]
    #[case("this.setState({ ...defaults });")]
    #[case("this.setState((prev) => ({ count: prev.count + 1 }));")]
    #[case("this.setState({ a: 1 }, () => done());")]
    #[case("this.state = makeState();")]
    #[case("this.state.count += 1;")]
    #[case("this.state.count++;")]
    fn test_unsupported_shapes(#[case] src: &str) {
        let err = rewrite(src).unwrap_err();
        assert!(matches!(err, TransformError::UnsupportedStateShape { .. }));
    }

    #[test]
    fn test_deep_path_is_rejected() {
        let err = rewrite("this.state.user.name = 'x';").unwrap_err();
        assert!(matches!(err, TransformError::UnsupportedStatePath { .. }));
    }

    #[test]
    fn test_computed_key_is_malformed() {
        let err = rewrite("this.setState({ [key]: 1 });").unwrap_err();
        assert!(matches!(err, TransformError::MalformedStateField { .. }));
    }
}
