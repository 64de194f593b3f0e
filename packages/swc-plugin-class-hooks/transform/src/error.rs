use swc_core::common::Span;

/// Reasons a single class component could not be converted.
///
/// Every variant carries the span of the node that caused the failure so the
/// harness can report it against the original source.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    #[error("Malformed state field: state keys must be non-empty identifiers")]
    MalformedStateField { span: Span },

    #[error("Unsupported state-update shape: {reason}")]
    UnsupportedStateShape { span: Span, reason: &'static str },

    #[error("Unsupported state path: only `this.state` and `this.state.<field>` can be assigned")]
    UnsupportedStatePath { span: Span },

    #[error("Unsupported state read: `this.state` must be accessed as `this.state.<field>`")]
    UnsupportedStateRead { span: Span },

    #[error("State field \"{name}\" is declared more than once")]
    DuplicateStateField { span: Span, name: String },

    #[error("Instance field `this.{name}` is written to; only `this.state` survives as hooks")]
    InstanceFieldWrite { span: Span, name: String },

    #[error("Unsupported class member: {kind} cannot be converted to a function component")]
    UnsupportedMember { span: Span, kind: &'static str },

    #[error("The render method must contain a top-level return statement")]
    MissingRenderReturn { span: Span },

    #[error("Anonymous class components cannot be converted to a named function")]
    MissingComponentName { span: Span },
}

impl TransformError {
    pub fn span(&self) -> Span {
        match self {
            TransformError::MalformedStateField { span }
            | TransformError::UnsupportedStateShape { span, .. }
            | TransformError::UnsupportedStatePath { span }
            | TransformError::UnsupportedStateRead { span }
            | TransformError::DuplicateStateField { span, .. }
            | TransformError::InstanceFieldWrite { span, .. }
            | TransformError::UnsupportedMember { span, .. }
            | TransformError::MissingRenderReturn { span }
            | TransformError::MissingComponentName { span } => *span,
        }
    }
}
