use super::recorder::{Event, Recorder};
use crate::ast::{Document, Node, NodeKind, Tag};
use crate::error::HamlError;
use crate::options::Options;
use crate::{compile, parse, Attributes};

fn record(source: &str, options: &Options) -> Recorder {
    let mut recorder = Recorder::default();
    compile(source, options, &mut recorder).unwrap();
    recorder
}

fn transcript(source: &str) -> String {
    record(source, &Options::default()).transcript()
}

fn string(text: &str) -> String {
    text.to_string()
}

#[test]
fn test_evaluated_tag_content() {
    assert_eq!(transcript("%p= 1+1"), "<p>{1+1}</p>\n");
}

#[test]
fn test_interpolation_order() {
    let recorder = record("Hello #{name}!", &Options::default());

    assert_eq!(
        recorder.events,
        vec![
            Event::Start,
            Event::Declare(vec![]),
            Event::Write(string("Hello ")),
            Event::Evaluate(string("name")),
            Event::Write(string("!")),
            Event::Write(string("\n")),
            Event::Finish,
        ]
    );
}

#[test]
fn test_repeated_attributes_render_space_joined() {
    let expected = "<a {\"href\"}=\"{\"#\"} {\"#\"}\" />\n";
    assert_eq!(transcript(r##"%a(href="#" href="#")"##), expected);
    assert_eq!(transcript(r##"%a{"href" => "#", "href" => "#"}"##), expected);
}

#[test]
fn test_nested_tags_are_indented() {
    let source = "%html\n  %body\n    %p hi\n    %br";

    insta::assert_snapshot!(transcript(source), @r###"
    <html>
      <body>
        <p>hi</p>
        <br />
      </body>
    </html>
    "###);

    let flat = Options {
        indent: false,
        ..Options::default()
    };
    assert_eq!(
        record(source, &flat).transcript(),
        "<html>\n<body>\n<p>hi</p>\n<br />\n</body>\n</html>\n"
    );
}

#[test]
fn test_doctype_renders_one_line() {
    assert_eq!(transcript("!!! 5"), "<!DOCTYPE html>\n");
}

#[test]
fn test_comments() {
    assert_eq!(transcript("/ note"), "<!-- note -->\n");
    assert_eq!(
        transcript("%div\n  /\n    %p hidden"),
        "<div>\n  <!--\n    <p>hidden</p>\n  -->\n</div>\n"
    );
}

#[test]
fn test_execution_blocks() {
    let recorder = record(
        "- for (i = 0; i < n; i++)\n  %li= i\n- done()",
        &Options::default(),
    );

    assert_eq!(
        recorder.statements(),
        vec![
            Event::Start,
            Event::Declare(vec![]),
            Event::BlockExec(string("for (i = 0; i < n; i++)")),
            Event::CloseBlock,
            Event::Execute(string("done()")),
            Event::Finish,
        ]
    );
    // block bodies stay at the depth of the block statement
    assert_eq!(recorder.transcript(), "<li>{i}</li>\n");
}

#[test]
fn test_manual_declaration_replaces_implicit_one() {
    let recorder = record("- #include <string>\n? std::string name\n%p= name", &Options::default());

    assert_eq!(
        recorder.statements(),
        vec![
            Event::Start,
            Event::Execute(string("#include <string>")),
            Event::Declare(vec![string("std::string name")]),
            Event::Finish,
        ]
    );
}

#[test]
fn test_implicit_declaration_is_silent_without_debug() {
    let recorder = record("%br", &Options::default());

    assert_eq!(
        recorder.statements(),
        vec![Event::Start, Event::Declare(vec![]), Event::Finish]
    );
}

#[test]
fn test_escaped_evaluation_renders_value() {
    assert_eq!(transcript("%div\n  \\= name"), "<div>\n  {name}\n</div>\n");
}

#[test]
fn test_debug_comments() {
    let options = Options::default().with_debug(true);
    let recorder = record("%br\n-# todo", &options);

    assert_eq!(
        recorder.statements(),
        vec![
            Event::Start,
            Event::Comment(string("no `?` declaration found, declaring without parameters")),
            Event::Declare(vec![]),
            Event::Comment(string(">> entering template line 1")),
            Event::Comment(string("<< leaving template line 1")),
            Event::Comment(string(">> entering template line 2")),
            Event::Comment(string("todo")),
            Event::Comment(string("<< leaving template line 2")),
            Event::Finish,
        ]
    );
}

#[test]
fn test_silent_comments_hide_their_block() {
    let recorder = record("-# disabled\n  %p gone\n%p kept", &Options::default());

    assert_eq!(recorder.transcript(), "<p>kept</p>\n");
    assert!(!recorder
        .events
        .iter()
        .any(|event| matches!(event, Event::Comment(_))));
}

#[test]
fn test_document_renders_again_without_reparsing() {
    let options = Options::default();
    let document = parse("%ul\n  %li= item", &options).unwrap();

    let mut first = Recorder::default();
    let mut second = Recorder::default();
    document.render(&mut first, &options).unwrap();
    document.render(&mut second, &options).unwrap();

    assert_eq!(first.events, second.events);
}

#[test]
fn test_nested_doctype_fails_at_render() {
    let doctype = Node {
        line: 2,
        kind: NodeKind::Doctype(string("<!DOCTYPE html>")),
        children: vec![],
    };
    let document = Document {
        manual_declaration: false,
        children: vec![Node {
            line: 1,
            kind: NodeKind::Tag(Tag {
                name: string("div"),
                attributes: Attributes::new(),
                content: None,
            }),
            children: vec![doctype],
        }],
    };

    let err = document
        .render(&mut Recorder::default(), &Options::default())
        .unwrap_err();
    assert!(matches!(err, HamlError::DoctypeNotTopLevel { line: 2 }));
}
