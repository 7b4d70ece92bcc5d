//! Integration tests for the declaration parser

use tsdl_common::DeclKind;
use tsdl_parser::{Statement, VarKind, parse_source_file};

fn parse(source: &str) -> Vec<Statement> {
    parse_source_file("test.d.ts", source)
        .expect("parse failed")
        .statements
}

#[test]
fn test_interface_members_docs_and_heritage() {
    let source = r#"/** The window. */
interface Window extends EventTarget, WindowOrWorkerGlobalScope {
    /** Shows an alert. */
    alert(message?: any): void;
    readonly closed: boolean;
    addEventListener<K extends keyof WindowEventMap>(type: K, listener: (this: Window, ev: WindowEventMap[K]) => any): void;
    addEventListener(type: string, listener: EventListenerOrEventListenerObject): void;
    [index: number]: Window;
}
"#;
    let statements = parse(source);
    assert_eq!(statements.len(), 1);
    let Statement::Interface(decl) = &statements[0] else {
        panic!("expected interface, got {:?}", statements[0]);
    };
    assert_eq!(decl.docs.as_deref(), Some("/** The window. */"));
    assert_eq!(decl.name, "Window");
    assert_eq!(decl.extends, vec!["EventTarget", "WindowOrWorkerGlobalScope"]);

    let names: Vec<_> = decl
        .members
        .iter()
        .map(|m| m.name.as_deref().unwrap_or("?"))
        .collect();
    assert_eq!(
        names,
        vec!["alert", "closed", "addEventListener", "addEventListener", "__index"]
    );
    assert_eq!(
        decl.members[0].text,
        "/** Shows an alert. */\nalert(message?: any): void;"
    );
    assert_eq!(decl.members[1].text, "readonly closed: boolean;");
}

#[test]
fn test_class_with_modifiers() {
    let source = r#"declare abstract class Animal<T> extends Base implements Walker, Eater {
    constructor(name: string);
    static create(): Animal<any>;
    private secret;
}
"#;
    let statements = parse(source);
    let Statement::Class(decl) = &statements[0] else {
        panic!("expected class");
    };
    assert_eq!(decl.name.as_deref(), Some("Animal"));
    assert!(decl.is_abstract);
    assert_eq!(decl.type_params.as_deref(), Some("T"));
    assert_eq!(decl.extends, vec!["Base"]);
    assert_eq!(decl.implements, vec!["Walker", "Eater"]);
    let names: Vec<_> = decl.members.iter().filter_map(|m| m.name.as_deref()).collect();
    assert_eq!(names, vec!["constructor", "create", "secret"]);
}

#[test]
fn test_dotted_namespace_nests() {
    let source = r#"declare namespace WebAssembly.Foo {
    interface X { a: string; }
    function f(): void;
}
"#;
    let statements = parse(source);
    let Statement::Namespace(outer) = &statements[0] else {
        panic!("expected namespace");
    };
    assert_eq!(outer.name, "WebAssembly");
    let Statement::Namespace(inner) = &outer.body[0] else {
        panic!("expected nested namespace");
    };
    assert_eq!(inner.name, "Foo");
    assert_eq!(inner.body.len(), 2);
    assert_eq!(inner.body[0].decl_kind(), Some(DeclKind::Interface));
    assert_eq!(inner.body[1].name(), Some("f"));
}

#[test]
fn test_variables_aliases_and_functions() {
    let source = r#"declare var Window: {
    prototype: Window;
    new(): Window;
};
declare const a: number, b: string;
type Nullable<T> = T | null;
declare function setTimeout(handler: TimerHandler, timeout?: number, ...arguments: any[]): number;
"#;
    let statements = parse(source);
    assert_eq!(statements.len(), 4);

    let Statement::Variable(window) = &statements[0] else {
        panic!("expected variable");
    };
    assert_eq!(window.kind, VarKind::Var);
    assert_eq!(window.declarations[0].name, "Window");
    assert!(window.declarations[0].rest.starts_with(": {"));

    let Statement::Variable(pair) = &statements[1] else {
        panic!("expected variable");
    };
    assert_eq!(pair.kind, VarKind::Const);
    let names: Vec<_> = pair.declarations.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(pair.declarations[1].rest, ": string");

    let Statement::TypeAlias(alias) = &statements[2] else {
        panic!("expected type alias");
    };
    assert_eq!(alias.name, "Nullable");
    assert_eq!(alias.rest, "<T> = T | null");

    let Statement::Function(func) = &statements[3] else {
        panic!("expected function");
    };
    assert_eq!(func.name.as_deref(), Some("setTimeout"));
    assert!(func.signature.starts_with("(handler: TimerHandler"));
    assert!(func.signature.ends_with("): number"));
}

#[test]
fn test_untracked_statements_are_kept() {
    let source = r#"export {};
declare const enum E {
    A = 1,
    B = 2
}
declare module "foo" {
    export const x: number;
}
"#;
    let statements = parse(source);
    assert_eq!(statements.len(), 3);
    assert_eq!(statements[0], Statement::Opaque("export {};".to_string()));
    let Statement::Enum(decl) = &statements[1] else {
        panic!("expected enum");
    };
    assert!(decl.is_const);
    assert_eq!(decl.body, "{\n    A = 1,\n    B = 2\n}");
    assert_eq!(statements[2].name(), Some("\"foo\""));
    assert!(statements.iter().all(|s| s.decl_kind().is_none()));
}

#[test]
fn test_unterminated_block_is_an_error() {
    let err = parse_source_file("broken.d.ts", "interface A { a: string;").unwrap_err();
    assert_eq!(err.file_name, "broken.d.ts");
    assert_eq!(err.line, 1);
    assert_eq!(err.message, "unterminated block");
}

#[test]
fn test_unterminated_string_reports_position() {
    let err = parse_source_file("broken.d.ts", "interface A {\n    \"a: string;\n}\n").unwrap_err();
    assert_eq!((err.line, err.column), (2, 5));
    assert_eq!(err.message, "unterminated string literal");
    assert_eq!(err.to_string(), "broken.d.ts:2:5: unterminated string literal");
}

#[test]
fn test_multiline_union_alias_keeps_every_line() {
    let statements = parse("export type Init =\n    | { a: string }\n    | { b: number };\nexport interface A {}\n");
    assert_eq!(statements.len(), 2);
    let Statement::TypeAlias(alias) = &statements[0] else {
        panic!("expected type alias");
    };
    assert_eq!(alias.rest, "=\n    | { a: string }\n    | { b: number }");
    assert_eq!(statements[1].name(), Some("A"));
}

#[test]
fn test_conditional_alias_spans_lines() {
    let statements = parse("type Unwrap<T> = T extends Promise<infer U>\n    ? U\n    : T;\n");
    assert_eq!(statements.len(), 1);
    let Statement::TypeAlias(alias) = &statements[0] else {
        panic!("expected type alias");
    };
    assert!(alias.rest.ends_with(": T"));
}

#[test]
fn test_missing_semicolon_ends_at_next_declaration() {
    let statements = parse("export declare function f(): void\nexport declare var y: number;\n");
    assert_eq!(statements.len(), 2);
    let Statement::Function(func) = &statements[0] else {
        panic!("expected function");
    };
    assert_eq!(func.signature, "(): void");
    let Statement::Variable(var) = &statements[1] else {
        panic!("expected variable");
    };
    assert_eq!(var.declarations[0].name, "y");

    let statements = parse("declare var x: {\n    a: string;\n}\ninterface A {}\n");
    assert_eq!(statements.len(), 2);
    assert_eq!(statements[1].decl_kind(), Some(DeclKind::Interface));
}

#[test]
fn test_member_without_terminator_is_an_error() {
    let err = parse_source_file("broken.d.ts", "interface A { a: string \n b: number }").unwrap_err();
    assert_eq!(err.line, 1);
    assert_eq!(err.message, "expected ';' or ',' after member");

    let statements = parse("interface A {\n    kind:\n        | \"a\"\n        | \"b\";\n    last: number\n}\n");
    let Statement::Interface(decl) = &statements[0] else {
        panic!("expected interface");
    };
    assert_eq!(decl.members.len(), 2);
    assert_eq!(decl.members[0].text, "kind:\n    | \"a\"\n    | \"b\";");
}

#[test]
fn test_export_keyword_is_recorded() {
    let statements = parse("interface Hidden {}\nexport interface Shown {}\nexport declare namespace N.Inner {}\n");
    assert!(!statements[0].is_exported());
    assert!(statements[1].is_exported());
    let Statement::Namespace(outer) = &statements[2] else {
        panic!("expected namespace");
    };
    assert!(outer.is_exported);
    assert!(outer.body[0].is_exported());
}
