//! Integration tests for the declaration printer

use tsdl_parser::{Printer, parse_source_file, print_statement};

fn reprint(source: &str) -> String {
    let file = parse_source_file("test.d.ts", source).expect("parse failed");
    let mut printer = Printer::new();
    printer.print_statements(&file.statements);
    printer.finish()
}

#[test]
fn test_interface_is_exported_and_reindented() {
    let source = r#"interface Foo<T> extends Bar {
        /** B. */
        b(x: T): void;
        a: string;
}
"#;
    assert_eq!(
        reprint(source),
        "export interface Foo<T> extends Bar {\n    /** B. */\n    b(x: T): void;\n    a: string;\n}\n"
    );
}

#[test]
fn test_namespace_body_has_no_modifiers() {
    let source = r#"declare namespace CSS {
    function escape(ident: string): string;
    var highlights: HighlightRegistry;
    interface Foo {
        x: number;
    }
}
"#;
    assert_eq!(
        reprint(source),
        "export declare namespace CSS {\n    function escape(ident: string): string;\n    var highlights: HighlightRegistry;\n    interface Foo {\n        x: number;\n    }\n}\n"
    );
}

#[test]
fn test_aliases_variables_classes_and_enums() {
    let source = r#"/** Alias. */
type A<T> = T | null;
declare var v: number, w: string;
declare abstract class Animal<T> extends Base implements Walker {
    constructor(name: string);
}
declare const enum E {
    A = 1
}
"#;
    assert_eq!(
        reprint(source),
        concat!(
            "/** Alias. */\nexport type A<T> = T | null;\n",
            "export declare var v: number, w: string;\n",
            "export declare abstract class Animal<T> extends Base implements Walker {\n    constructor(name: string);\n}\n",
            "export declare const enum E {\n    A = 1\n}\n",
        )
    );
}

#[test]
fn test_printed_output_reparses_to_same_text() {
    let source = r#"declare namespace Intl {
    interface Collator {
        compare(x: string, y: string): number;
    }
    var Collator: {
        new(locales?: string): Collator;
    };
}
"#;
    let first = reprint(source);
    assert_eq!(reprint(&first), first);

    let file = parse_source_file("test.d.ts", &first).expect("parse failed");
    assert_eq!(print_statement(&file.statements[0]), first);
}

#[test]
fn test_multiline_union_alias_is_printed_whole() {
    assert_eq!(
        reprint("export type Init =\n    | { a: string }\n    | { b: number };\n"),
        "export type Init =\n    | { a: string }\n    | { b: number };\n"
    );
}
