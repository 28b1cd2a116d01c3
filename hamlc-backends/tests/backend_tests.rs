//! Generated source for each backend

use std::fs;
use std::process::Command;

use hamlc_backends::{find, BackendError, CWriter, CppWriter, PythonWriter, BACKENDS};
use hamlc_core::{compile, Options, Writer};

fn c_source(template: &str) -> String {
    let mut writer = CWriter::new("page", Vec::new());
    compile(template, &Options::default(), &mut writer).unwrap();
    String::from_utf8(writer.into_inner()).unwrap()
}

fn cpp_source(template: &str) -> String {
    let mut writer = CppWriter::function("page", Vec::new());
    compile(template, &Options::default(), &mut writer).unwrap();
    let (source, header) = writer.into_parts();
    assert!(header.is_none());
    String::from_utf8(source).unwrap()
}

fn python_source(template: &str) -> String {
    let mut writer = PythonWriter::new("page", Vec::new());
    compile(template, &Options::default(), &mut writer).unwrap();
    String::from_utf8(writer.into_inner()).unwrap()
}

#[test]
fn test_c_function() {
    let template = "? const char *title\n%h1= title\n%p= 42\n- for (int i = 0; i < 2; ++i)\n  %li item";

    assert_eq!(
        c_source(template),
        "#include <stdio.h>\n\
         \n\
         void page(FILE *out, const char *title) {\n\
         \tfputs(\"<h1>\", out);\n\
         \tfputs(title, out);\n\
         \tfputs(\"</h1>\\n<p>42</p>\\n\", out);\n\
         \tfor (int i = 0; i < 2; ++i) {\n\
         \t\tfputs(\"<li>item</li>\\n\", out);\n\
         \t}\n\
         }\n"
    );
}

#[test]
fn test_c_preprocessor_lines_are_raw() {
    assert_eq!(
        c_source("- #include <string.h>\n? const char *s\n= s"),
        "#include <stdio.h>\n\
         #include <string.h>\n\
         \n\
         void page(FILE *out, const char *s) {\n\
         \tfputs(s, out);\n\
         \tfputs(\"\\n\", out);\n\
         }\n"
    );
}

#[test]
fn test_cpp_function() {
    assert_eq!(
        cpp_source("%br"),
        "#include <iostream>\n\nvoid page(std::ostream &out) {\n\tout << \"<br />\\n\";\n}\n"
    );
}

#[test]
fn test_cpp_interpolation_order() {
    let source = cpp_source("Hello #{name}!");
    let statements: Vec<&str> = source
        .lines()
        .filter(|line| line.starts_with('\t'))
        .map(str::trim)
        .collect();

    assert_eq!(
        statements,
        vec![r#"out << "Hello ";"#, "out << (name);", r#"out << "!\n";"#]
    );
}

#[test]
fn test_constant_attributes_are_folded() {
    let source = cpp_source(r#"%a(href="/home" class=3)"#);

    assert!(
        source.contains(r#"out << "<a href=\"/home\" class=\"3\" />\n";"#),
        "{source}"
    );
    assert!(!source.contains("out << ("), "{source}");
}

#[test]
fn test_literal_folding() {
    let mut writer = CWriter::new("page", Vec::new());
    writer.start().unwrap();
    writer.declare(&[]).unwrap();
    writer.evaluate("42").unwrap();
    writer.evaluate("\"abc\"").unwrap();
    writer.evaluate("x+1").unwrap();
    writer.finish().unwrap();

    let source = String::from_utf8(writer.into_inner()).unwrap();
    assert!(
        source.contains("\tfputs(\"42abc\", out);\n\tfputs(x+1, out);\n"),
        "{source}"
    );
}

#[test]
fn test_cpp_class_layout() {
    let mut writer = CppWriter::class("greeting", "greeting.hpp", Vec::new(), Vec::new());
    compile(
        "- #include <string>\n? const std::string &name\n%p Hi #{name}",
        &Options::default(),
        &mut writer,
    )
    .unwrap();

    let (source, header) = writer.into_parts();
    let header = String::from_utf8(header.unwrap()).unwrap();
    let source = String::from_utf8(source).unwrap();

    assert_eq!(
        header,
        "#ifndef GREETING_HPP\n\
         #define GREETING_HPP\n\
         \n\
         #include <iostream>\n\
         #include <string>\n\
         \n\
         class greeting {\n\
         public:\n\
         \tstatic void render(std::ostream &out, const std::string &name);\n\
         };\n\
         \n\
         #endif\n"
    );
    assert_eq!(
        source,
        "#include \"greeting.hpp\"\n\
         \n\
         void greeting::render(std::ostream &out, const std::string &name) {\n\
         \tout << \"<p>Hi \";\n\
         \tout << (name);\n\
         \tout << \"</p>\\n\";\n\
         }\n"
    );
}

#[test]
fn test_debug_comments_in_c() {
    let mut writer = CWriter::new("page", Vec::new());
    let options = Options::default().with_debug(true);
    compile("%br", &options, &mut writer).unwrap();
    let source = String::from_utf8(writer.into_inner()).unwrap();

    assert!(source.contains("// no `?` declaration found"));
    assert!(source.contains("\t// >> entering template line 1\n"));
    assert!(source.contains("\t// << leaving template line 1\n"));
}

#[test]
fn test_python_blocks() {
    let template = "? items\n%ul\n  - for item in items:\n    %li= item\n  - if not items\n    -# nothing to list";

    insta::assert_snapshot!(python_source(template), @r###"
    def page(out, items):
        out.write("<ul>\n")
        for item in items:
            out.write("  <li>")
            out.write(str(item))
            out.write("</li>\n")
        if not items:
            pass
        out.write("</ul>\n")
    "###);
}

#[test]
fn test_python_empty_template() {
    assert_eq!(python_source(""), "def page(out):\n    pass\n");
}

#[test]
fn test_python_statements_before_declaration() {
    assert_eq!(
        python_source("- import html\n? s\n= html.escape(s)"),
        "import html\n\
         \n\
         def page(out, s):\n    \
         out.write(str(html.escape(s)))\n    \
         out.write(\"\\n\")\n"
    );
}

#[test]
fn test_python_output_runs() {
    let mut program = python_source("%p= 1+1");
    program.push_str("\nimport sys\npage(sys.stdout)\n");

    // Skip quietly where no interpreter is installed
    let Ok(output) = Command::new("python3").arg("-c").arg(&program).output() else {
        return;
    };

    assert!(output.status.success(), "{program}");
    assert_eq!(String::from_utf8_lossy(&output.stdout), "<p>2</p>\n");
}

#[test]
fn test_registry_lookup() {
    assert_eq!(find("cpp").unwrap().name, "C++ using a class");
    assert_eq!(find("cpp-class").unwrap().id(), "cpp");
    assert_eq!(find("py").unwrap().id(), "python");
    assert!(matches!(find("cobol"), Err(BackendError::Unknown(id)) if id == "cobol"));

    for backend in BACKENDS {
        for id in backend.ids {
            assert_eq!(find(id).unwrap().name, backend.name);
        }
    }
}

#[test]
fn test_open_creates_files() {
    let dir = tempfile::tempdir().unwrap();
    let backend = find("cpp").unwrap();

    let mut opened = backend.open("index", dir.path()).unwrap();
    assert_eq!(
        opened.paths,
        vec![dir.path().join("index.hpp"), dir.path().join("index.cpp")]
    );

    compile("%p hello", &Options::default(), &mut *opened.writer).unwrap();
    drop(opened);

    let header = fs::read_to_string(dir.path().join("index.hpp")).unwrap();
    let source = fs::read_to_string(dir.path().join("index.cpp")).unwrap();
    assert!(header.contains("class index {"));
    assert!(source.contains("void index::render(std::ostream &out) {"));
    assert!(source.contains(r#"out << "<p>hello</p>\n";"#));
}

#[test]
fn test_open_in_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");

    let err = find("c").unwrap().open("page", &missing).err().unwrap();
    assert!(matches!(err, BackendError::Create { .. }));
}
