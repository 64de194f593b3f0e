use swc_core::{
    common::{sync::Lrc, FileName, SourceMap, DUMMY_SP},
    ecma::{
        ast::*,
        codegen::{text_writer::JsWriter, Config, Emitter},
        parser::{lexer::Lexer, EsSyntax, Parser, StringInput, Syntax},
    },
};

thread_local! {
    static CM: Lrc<SourceMap> = Default::default();
}

pub fn parse_module(code: &str) -> Module {
    CM.with(|cm| {
        let fm = cm.new_source_file(
            Lrc::new(FileName::Custom("test.jsx".into())),
            code.to_string(),
        );
        let lexer = Lexer::new(
            Syntax::Es(EsSyntax {
                jsx: true,
                ..Default::default()
            }),
            Default::default(),
            StringInput::from(&*fm),
            None,
        );
        let mut parser = Parser::new_from(lexer);
        let module = parser.parse_module().expect("failed to parse module");
        assert!(parser.take_errors().is_empty());
        module
    })
}

pub fn parse_stmts(code: &str) -> Vec<Stmt> {
    parse_module(code)
        .body
        .into_iter()
        .map(|item| match item {
            ModuleItem::Stmt(stmt) => stmt,
            ModuleItem::ModuleDecl(_) => panic!("expected only statements"),
        })
        .collect()
}

/// The first class declaration in `code`, with its name.
pub fn parse_class(code: &str) -> (Ident, Class) {
    parse_stmts(code)
        .into_iter()
        .find_map(|stmt| match stmt {
            Stmt::Decl(Decl::Class(class_decl)) => Some((class_decl.ident, *class_decl.class)),
            _ => None,
        })
        .expect("expected a class declaration")
}

pub fn print_module(module: &Module) -> String {
    CM.with(|cm| {
        let mut buf = Vec::new();
        {
            let writer = JsWriter::new(cm.clone(), "\n", &mut buf, None);
            let mut emitter = Emitter {
                cfg: Config::default(),
                comments: None,
                cm: cm.clone(),
                wr: writer,
            };
            emitter
                .emit_module(module)
                .expect("failed to emit module");
        }
        String::from_utf8(buf).expect("module is not valid UTF-8")
    })
}

pub fn print_stmts(stmts: Vec<Stmt>) -> String {
    print_module(&Module {
        span: DUMMY_SP,
        body: stmts.into_iter().map(ModuleItem::Stmt).collect(),
        shebang: None,
    })
}

/// Parse and re-print `code` so expectations compare structure, not layout.
pub fn normalize(code: &str) -> String {
    print_module(&parse_module(code))
}

/// Print `stmts` as the body of a function, so top-level `return` is valid.
pub fn print_body(stmts: Vec<Stmt>) -> String {
    print_stmts(vec![Stmt::Decl(Decl::Fn(FnDecl {
        ident: crate::factory::ident("body"),
        declare: false,
        function: Box::new(Function {
            params: vec![],
            decorators: vec![],
            span: DUMMY_SP,
            ctxt: Default::default(),
            body: Some(crate::factory::block(stmts)),
            is_generator: false,
            is_async: false,
            type_params: None,
            return_type: None,
        }),
    }))])
}

/// Counterpart of [`print_body`] for expected output.
pub fn normalize_body(code: &str) -> String {
    normalize(&format!("function body() {{\n{code}\n}}"))
}
