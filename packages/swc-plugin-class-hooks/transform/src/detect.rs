use swc_core::ecma::ast::*;

/// Decide whether a class with the given superclass is a component candidate.
///
/// Recognizes `extends Component` and `extends React.Component` (any
/// namespace). Aliased imports, computed members and wrapper calls are not
/// followed.
pub fn is_component_class(super_class: Option<&Expr>, base_components: &[String]) -> bool {
    let name = match super_class {
        Some(Expr::Ident(ident)) => &ident.sym,
        Some(Expr::Member(MemberExpr {
            prop: MemberProp::Ident(prop),
            ..
        })) => &prop.sym,
        _ => return false,
    };

    base_components.iter().any(|base| base.as_str() == &**name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::parse_module;
    use rstest::rstest;

    fn super_class_of(src: &str) -> Option<Box<Expr>> {
        let module = parse_module(src);
        module.body.into_iter().find_map(|item| match item {
            ModuleItem::Stmt(Stmt::Decl(Decl::Class(class_decl))) => {
                Some(class_decl.class.super_class)
            }
            _ => None,
        })?
    }

    fn defaults() -> Vec<String> {
        vec!["Component".to_string(), "PureComponent".to_string()]
    }

    #[test]
    fn test_no_superclass() {
        assert!(!is_component_class(None, &defaults()));
    }

    #[rstest]
    #[case("class A extends Component {}")]
    #[case("class A extends PureComponent {}")]
    #[case("class A extends React.Component {}")]
    #[case("class A extends React.PureComponent {}")]
    #[case("class A extends Preact.Component {}")]
    fn test_recognized_superclass(#[case] src: &str) {
        let super_class = super_class_of(src);
        assert!(is_component_class(super_class.as_deref(), &defaults()));
    }

    #[rstest]
    #[case("class A {}")]
    #[case("class A extends Base {}")]
    #[case("class A extends React.Base {}")]
    #[case("class A extends React['Component'] {}")]
    #[case("class A extends mixin(Component) {}")]
    fn test_unrecognized_superclass(#[case] src: &str) {
        let super_class = super_class_of(src);
        assert!(!is_component_class(super_class.as_deref(), &defaults()));
    }

    #[test]
    fn test_custom_base_components() {
        let super_class = super_class_of("class A extends Widget {}");
        let bases = vec!["Widget".to_string()];
        assert!(is_component_class(super_class.as_deref(), &bases));
        assert!(!is_component_class(super_class.as_deref(), &defaults()));
    }
}
