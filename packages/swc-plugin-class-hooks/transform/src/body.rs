use std::collections::HashMap;

use swc_core::{
    common::{Span, Spanned},
    ecma::ast::*,
};

use crate::{
    config::{Config, DuplicateStatePolicy},
    error::TransformError,
    factory,
    lifecycle::{map_lifecycle, LifecycleKind},
    mutation::rewrite_state_mutations,
    state::{extract_from_class_prop, extract_from_constructor, key_name, StateBinding},
    strip_this::strip_this,
};

/// One entry of the function body before hooks are lowered to statements.
#[derive(Debug, Clone)]
pub enum BodyItem {
    Hook(StateBinding),
    Stmt(Stmt),
}

/// A class member tagged by the role it plays in a component.
enum ComponentMember<'a> {
    StateProperty(&'a ClassProp),
    OtherProperty(String, &'a ClassProp),
    Constructor(&'a Constructor),
    Render(&'a ClassMethod),
    Lifecycle(LifecycleKind, &'a ClassMethod),
    OtherMethod(String, &'a ClassMethod),
    Ignored,
}

fn unsupported(span: Span, kind: &'static str) -> TransformError {
    TransformError::UnsupportedMember { span, kind }
}

fn member_name(key: &PropName) -> Result<String, TransformError> {
    key_name(key, unsupported(key.span(), "members with computed keys"))
}

// Initializers run in the function body like render, so `this` is always
// stripped from them.
fn stripped_hook(mut binding: StateBinding) -> Result<BodyItem, TransformError> {
    strip_this(&mut *binding.init)?;
    Ok(BodyItem::Hook(binding))
}

fn classify_member(member: &ClassMember) -> Result<ComponentMember<'_>, TransformError> {
    Ok(match member {
        ClassMember::ClassProp(prop) if prop.is_static => {
            return Err(unsupported(prop.span, "static properties"))
        }
        ClassMember::ClassProp(prop) => match member_name(&prop.key)?.as_str() {
            "state" => ComponentMember::StateProperty(prop),
            name => ComponentMember::OtherProperty(name.to_string(), prop),
        },
        ClassMember::Constructor(ctor) => ComponentMember::Constructor(ctor),
        ClassMember::Method(method) if method.is_static => {
            return Err(unsupported(method.span, "static methods"))
        }
        ClassMember::Method(method) if method.kind != MethodKind::Method => {
            return Err(unsupported(method.span, "getters and setters"))
        }
        ClassMember::Method(method) => {
            let name = member_name(&method.key)?;
            if name == "render" {
                ComponentMember::Render(method)
            } else if let Some(kind) = LifecycleKind::from_method_name(&name) {
                ComponentMember::Lifecycle(kind, method)
            } else {
                ComponentMember::OtherMethod(name, method)
            }
        }
        ClassMember::PrivateMethod(method) => {
            return Err(unsupported(method.span, "private methods"))
        }
        ClassMember::PrivateProp(prop) => return Err(unsupported(prop.span, "private properties")),
        ClassMember::StaticBlock(block) => return Err(unsupported(block.span, "static blocks")),
        ClassMember::AutoAccessor(accessor) => {
            return Err(unsupported(accessor.span, "auto accessors"))
        }
        ClassMember::TsIndexSignature(_) | ClassMember::Empty(_) => ComponentMember::Ignored,
    })
}

/// Transforms class members into function body items, one member at a time
/// and in member order.
struct ClassBodyTransformer<'a> {
    config: &'a Config,
}

impl ClassBodyTransformer<'_> {
    fn transform_member(&self, member: ComponentMember<'_>) -> Result<Vec<BodyItem>, TransformError> {
        match member {
            ComponentMember::StateProperty(prop) => extract_from_class_prop(prop)?
                .into_iter()
                .map(stripped_hook)
                .collect(),
            ComponentMember::Constructor(ctor) => {
                let mut items = Vec::new();
                for item in extract_from_constructor(ctor)? {
                    match item {
                        BodyItem::Stmt(stmt) => items.extend(self.normalize_stmts(vec![stmt])?),
                        BodyItem::Hook(binding) => items.push(stripped_hook(binding)?),
                    }
                }
                Ok(items)
            }
            ComponentMember::Render(method) => self.transform_render(method),
            ComponentMember::Lifecycle(kind, method) => Ok(vec![BodyItem::Stmt(map_lifecycle(
                kind,
                method,
                &self.config.effect_hook,
                self.config.strip_this_in_methods,
            )?)]),
            ComponentMember::OtherProperty(name, prop) => self.transform_property(&name, prop),
            ComponentMember::OtherMethod(name, method) => self.transform_method(&name, method),
            ComponentMember::Ignored => Ok(vec![]),
        }
    }

    // Mutation rewriting plus optional `this` stripping for non-render code
    fn normalize_stmts(&self, mut stmts: Vec<Stmt>) -> Result<Vec<BodyItem>, TransformError> {
        rewrite_state_mutations(&mut stmts)?;
        if self.config.strip_this_in_methods {
            strip_this(&mut stmts)?;
        }
        Ok(stmts.into_iter().map(BodyItem::Stmt).collect())
    }

    fn transform_render(&self, method: &ClassMethod) -> Result<Vec<BodyItem>, TransformError> {
        let mut stmts = method
            .function
            .body
            .as_ref()
            .map(|body| body.stmts.clone())
            .unwrap_or_default();

        if !stmts.iter().any(|stmt| matches!(stmt, Stmt::Return(_))) {
            return Err(TransformError::MissingRenderReturn { span: method.span });
        }

        rewrite_state_mutations(&mut stmts)?;
        strip_this(&mut stmts)?;
        Ok(stmts.into_iter().map(BodyItem::Stmt).collect())
    }

    fn transform_property(&self, name: &str, prop: &ClassProp) -> Result<Vec<BodyItem>, TransformError> {
        let Some(value) = &prop.value else {
            return Ok(vec![BodyItem::Stmt(factory::var_stmt(
                VarDeclKind::Let,
                factory::binding(name),
                None,
            ))]);
        };

        let mut value = value.clone();
        rewrite_state_mutations(&mut *value)?;
        if self.config.strip_this_in_methods {
            strip_this(&mut *value)?;
        }

        Ok(vec![BodyItem::Stmt(factory::var_stmt(
            VarDeclKind::Const,
            factory::binding(name),
            Some(value),
        ))])
    }

    fn transform_method(&self, name: &str, method: &ClassMethod) -> Result<Vec<BodyItem>, TransformError> {
        let mut function = method.function.clone();
        if let Some(body) = &mut function.body {
            rewrite_state_mutations(&mut body.stmts)?;
            if self.config.strip_this_in_methods {
                strip_this(&mut body.stmts)?;
            }
        }

        Ok(vec![BodyItem::Stmt(Stmt::Decl(Decl::Fn(FnDecl {
            ident: factory::ident(name),
            declare: false,
            function,
        })))])
    }
}

/// Apply the duplicate-state policy to the collected hooks.
fn resolve_duplicates(
    items: Vec<BodyItem>,
    policy: DuplicateStatePolicy,
) -> Result<Vec<BodyItem>, TransformError> {
    let mut last_declaration = HashMap::new();
    for (index, item) in items.iter().enumerate() {
        let BodyItem::Hook(binding) = item else {
            continue;
        };
        if let Some(previous) = last_declaration.insert(binding.getter.as_str(), index) {
            match policy {
                DuplicateStatePolicy::Reject => {
                    return Err(TransformError::DuplicateStateField {
                        span: binding.span,
                        name: binding.getter.clone(),
                    })
                }
                DuplicateStatePolicy::LastWins => {
                    tracing::warn!(
                        field = %binding.getter,
                        overridden = previous,
                        "state field declared twice, keeping the later declaration"
                    );
                }
            }
        }
    }

    let keep: Vec<bool> = items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            BodyItem::Hook(binding) => last_declaration.get(binding.getter.as_str()) == Some(&index),
            BodyItem::Stmt(_) => true,
        })
        .collect();

    Ok(items
        .into_iter()
        .zip(keep)
        .filter_map(|(item, keep)| keep.then_some(item))
        .collect())
}

/// Transform every member of `class` and assemble the function body.
///
/// Hooks appear where their declaring member was, so constructor hooks are not
/// hoisted ahead of members declared before the constructor.
pub fn transform_class_body(class: &Class, config: &Config) -> Result<Vec<Stmt>, TransformError> {
    let transformer = ClassBodyTransformer { config };

    let mut items = Vec::new();
    for member in &class.body {
        items.extend(transformer.transform_member(classify_member(member)?)?);
    }

    Ok(resolve_duplicates(items, config.duplicate_state)?
        .into_iter()
        .map(|item| match item {
            BodyItem::Hook(binding) => binding.into_hook_declaration(&config.state_hook),
            BodyItem::Stmt(stmt) => stmt,
        })
        .collect())
}
