mod body;
mod builder;
pub mod config;
mod detect;
pub mod error;
mod factory;
mod lifecycle;
mod mutation;
mod naming;
mod state;
mod strip_this;
#[cfg(test)]
mod test_utils;

use swc_core::{
    common::errors::HANDLER,
    ecma::{
        ast::*,
        visit::{noop_visit_mut_type, visit_mut_pass, VisitMut, VisitMutWith},
    },
};

pub use builder::build_function_component;
pub use config::{Config, DuplicateStatePolicy};
pub use detect::is_component_class;
pub use error::TransformError;
pub use naming::setter_name;

fn emit_error(error: &TransformError) {
    HANDLER.with(|handler| {
        handler
            .struct_span_err(error.span(), &error.to_string())
            .emit()
    });
}

/// Replaces component classes with function components.
///
/// Classes that fail to convert are left untouched. Their errors are reported
/// through the swc handler once the whole program has been visited, or can be
/// collected with [`ClassComponentTransform::take_errors`] when visiting a
/// module directly.
#[derive(Debug)]
pub struct ClassComponentTransform {
    config: Config,
    errors: Vec<TransformError>,
}

impl ClassComponentTransform {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            errors: Vec::new(),
        }
    }

    pub fn take_errors(&mut self) -> Vec<TransformError> {
        std::mem::take(&mut self.errors)
    }

    fn convert(&mut self, ident: &Ident, class: &Class) -> Option<FnDecl> {
        if !is_component_class(class.super_class.as_deref(), &self.config.base_components) {
            return None;
        }

        match build_function_component(ident, class, &self.config) {
            Ok(fn_decl) => {
                tracing::debug!(component = %ident.sym, "converted class component");
                Some(fn_decl)
            }
            Err(err) => {
                tracing::debug!(component = %ident.sym, error = %err, "class component left as is");
                self.errors.push(err);
                None
            }
        }
    }
}

impl VisitMut for ClassComponentTransform {
    fn visit_mut_program(&mut self, program: &mut Program) {
        program.visit_mut_children_with(self);

        for error in self.take_errors() {
            emit_error(&error);
        }
    }

    fn visit_mut_decl(&mut self, decl: &mut Decl) {
        // Nested components first
        decl.visit_mut_children_with(self);

        let Decl::Class(class_decl) = decl else {
            return;
        };
        if let Some(fn_decl) = self.convert(&class_decl.ident, &class_decl.class) {
            *decl = Decl::Fn(fn_decl);
        }
    }

    fn visit_mut_default_decl(&mut self, decl: &mut DefaultDecl) {
        decl.visit_mut_children_with(self);

        let DefaultDecl::Class(class_expr) = decl else {
            return;
        };
        let Some(ident) = &class_expr.ident else {
            if is_component_class(
                class_expr.class.super_class.as_deref(),
                &self.config.base_components,
            ) {
                self.errors.push(TransformError::MissingComponentName {
                    span: class_expr.class.span,
                });
            }
            return;
        };

        if let Some(fn_decl) = self.convert(ident, &class_expr.class) {
            *decl = DefaultDecl::Fn(FnExpr {
                ident: Some(fn_decl.ident),
                function: fn_decl.function,
            });
        }
    }

    noop_visit_mut_type!();
}

/// The transform as an swc pass.
pub fn class_to_hooks(config: Config) -> impl Pass {
    visit_mut_pass(ClassComponentTransform::new(config))
}
