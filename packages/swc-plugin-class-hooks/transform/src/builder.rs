use swc_core::{common::SyntaxContext, ecma::ast::*};

use crate::{body::transform_class_body, config::Config, error::TransformError, factory};

/// Build `function Name(props) { ... }` from a component class.
pub fn build_function_component(
    ident: &Ident,
    class: &Class,
    config: &Config,
) -> Result<FnDecl, TransformError> {
    if ident.sym.is_empty() {
        return Err(TransformError::MissingComponentName { span: class.span });
    }

    let stmts = transform_class_body(class, config)?;

    Ok(FnDecl {
        ident: ident.clone(),
        declare: false,
        function: Box::new(Function {
            params: vec![factory::param("props")],
            decorators: vec![],
            span: class.span,
            ctxt: SyntaxContext::empty(),
            body: Some(factory::block(stmts)),
            is_generator: false,
            is_async: false,
            type_params: None,
            return_type: None,
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{normalize, parse_class, print_stmts};
    use pretty_assertions::assert_eq;

    fn build(src: &str) -> Result<String, TransformError> {
        let (ident, class) = parse_class(src);
        let fn_decl = build_function_component(&ident, &class, &Config::default())?;
        Ok(print_stmts(vec![Stmt::Decl(Decl::Fn(fn_decl))]))
    }

    #[test]
    fn test_constructor_state_and_render() {
        let actual = build(
            r#"class App extends Component {
                constructor(props) {
                    super(props);
                    this.state = { count: 0 };
                }
                render() {
                    return <p>{this.state.count}</p>;
                }
            }"#,
        )
        .unwrap();

        assert_eq!(
            actual,
            normalize(
                r#"function App(props) {
                    const [count, setCount] = useState(0);
                    return <p>{count}</p>;
                }"#
            )
        );
    }

    #[test]
    fn test_empty_class() {
        let actual = build("class Empty extends Component {}").unwrap();
        assert_eq!(actual, normalize("function Empty(props) {}"));
    }

    #[test]
    fn test_member_failure_propagates() {
        let err = build("class App extends Component { state = load(); }").unwrap_err();
        assert!(matches!(err, TransformError::UnsupportedStateShape { .. }));
    }
}
