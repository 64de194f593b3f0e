use swc_core::ecma::ast::*;

use crate::{error::TransformError, factory, mutation::rewrite_state_mutations, strip_this::strip_this};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleKind {
    Mount,
    Update,
    Unmount,
}

impl LifecycleKind {
    pub fn from_method_name(name: &str) -> Option<Self> {
        match name {
            "componentDidMount" => Some(LifecycleKind::Mount),
            "componentDidUpdate" => Some(LifecycleKind::Update),
            "componentWillUnmount" => Some(LifecycleKind::Unmount),
            _ => None,
        }
    }
}

/// Wrap a lifecycle method body as `useEffect(() => { ... })`.
///
/// Every lifecycle method becomes its own effect with no dependency list, so
/// mount, update and unmount all run after each render.
pub fn map_lifecycle(
    kind: LifecycleKind,
    method: &ClassMethod,
    effect_hook: &str,
    strip_self: bool,
) -> Result<Stmt, TransformError> {
    if !method.function.params.is_empty() {
        tracing::warn!(?kind, "lifecycle parameters are not available inside an effect");
    }

    let mut stmts = method
        .function
        .body
        .as_ref()
        .map(|body| body.stmts.clone())
        .unwrap_or_default();

    rewrite_state_mutations(&mut stmts)?;
    if strip_self {
        strip_this(&mut stmts)?;
    }

    Ok(factory::expr_stmt(factory::call_expr(
        effect_hook,
        vec![Box::new(factory::arrow_block(stmts))],
        method.span,
    )))
}
