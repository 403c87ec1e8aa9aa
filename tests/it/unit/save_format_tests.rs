//! Save Format Tests
//!
//! Reading and writing save file text without touching the filesystem.

use crate::helpers::TestGraphBuilder;
use progression_graph::error::{GraphError, SyntaxIssue};
use progression_graph::persistence::{SaveCommand, parse, read_into, serialize};
use progression_graph::store::Store;
use progression_graph::types::{GraphPos, LinkEnds, LinkId, PointId, ProgressState};

#[test]
fn test_serialized_layout() {
    let (mut store, ids) = TestGraphBuilder::new()
        .with_ranked_point(1.5, -2.0, 2, ProgressState::Doing)
        .with_point(0.0, 0.0)
        .with_link(0, 1)
        .build();
    store.attach_text(ids[0], "launch day").unwrap();
    // Pending links are never written.
    store.create_link(ids[1], None, None).unwrap();

    insta::assert_snapshot!(serialize(&store).unwrap(), @r"
    # progression graph

    # POINTS
    P 0 0 0 0 1
    P 1.5 -2 2 1 0

    # LINKS
    L 0 1 0

    # IMAGES

    # POINT IMAGES

    # TEXT
    At 0 launch day
    ");
}

#[test]
fn test_reader_tolerates_spacing_and_comments() {
    let text = "\
# a hand edited file
   P  1.5   -2 2 1 7   # moved
P 0 0 0 0 3

L 7 3 4
At 3 two  spaced   words
";
    let mut store = Store::new();
    read_into(&mut store, text).unwrap();

    let point = store.point(PointId(7)).unwrap();
    assert_eq!(point.pos, GraphPos::new(1.5, -2.0));
    assert_eq!(point.rank, 2);
    assert_eq!(point.state, ProgressState::Doing);
    assert_eq!(
        store.link(LinkId(4)).unwrap().ends,
        LinkEnds::Complete {
            p1: PointId(7),
            p2: PointId(3)
        }
    );
    assert_eq!(store.point(PointId(3)).unwrap().text.as_deref(), Some("two spaced words"));
}

#[test]
fn test_syntax_error_reports_line() {
    let err = parse("P 0 0 0 0 0\nP 1 1 0 0\n").unwrap_err();
    match err {
        GraphError::Syntax { line, raw, issue } => {
            assert_eq!(line, 2);
            assert_eq!(raw, "P 1 1 0 0");
            assert!(matches!(issue, SyntaxIssue::ArgumentCount { command: "P", found: 4, .. }));
        }
        other => panic!("unexpected error: {other}"),
    }

    assert!(matches!(
        parse("Q 1 2").unwrap_err(),
        GraphError::Syntax { issue: SyntaxIssue::UnknownCommand(_), .. }
    ));
    assert!(matches!(
        parse("P 0 0 0 5 0").unwrap_err(),
        GraphError::Syntax { issue: SyntaxIssue::InvalidState(5), .. }
    ));
    assert!(matches!(
        parse("P inf 0 0 0 0").unwrap_err(),
        GraphError::Syntax { issue: SyntaxIssue::InvalidNumber(_), .. }
    ));
}

#[test]
fn test_dangling_reference_reports_line() {
    let err = parse("P 0 0 0 0 0\nL 0 9 0\n")
        .and_then(|commands| {
            let mut store = Store::new();
            progression_graph::persistence::apply(&mut store, &commands)
        })
        .unwrap_err();

    assert!(matches!(err, GraphError::AtLine { line: 2, .. }));
    assert!(matches!(err.root(), GraphError::PointNotFound(PointId(9))));
}

#[test]
fn test_parse_is_side_effect_free() {
    let commands = parse("P 0 0 0 0 0\nAi 0 2\n").unwrap();
    assert_eq!(commands.len(), 2);
    assert_eq!(commands[1].line, 2);
    assert!(matches!(
        commands[1].command,
        SaveCommand::AttachImage { point: PointId(0), .. }
    ));
}

#[test]
fn test_syntax_error_keeps_existing_graph() {
    let (mut store, _) = TestGraphBuilder::new().with_point(0.0, 0.0).build();
    assert!(read_into(&mut store, "P 0 0 0 0 0\nnonsense\n").is_err());
    assert_eq!(store.point_count(), 1);
}

#[test]
fn test_unencodable_text_is_refused() {
    let (mut store, ids) = TestGraphBuilder::new().with_point(0.0, 0.0).build();
    store.attach_text(ids[0], "issue #12").unwrap();
    assert!(matches!(
        serialize(&store).unwrap_err(),
        GraphError::Unencodable { what: "text", .. }
    ));
}

#[test]
fn test_round_trip_through_text() {
    let (mut store, ids) = TestGraphBuilder::new()
        .with_ranked_point(0.1, 0.2, 4, ProgressState::Completed)
        .with_ranked_point(-3.75, 12.0, 1, ProgressState::Todo)
        .with_point(1e-7, -0.3)
        .with_link(0, 1)
        .with_link(2, 0)
        .build();
    store.attach_text(ids[1], "write docs").unwrap();

    let text = serialize(&store).unwrap();
    let mut restored = Store::new();
    read_into(&mut restored, &text).unwrap();

    let original: Vec<_> = store.points().cloned().collect();
    let reread: Vec<_> = restored.points().cloned().collect();
    assert_eq!(original, reread);
    let links = |s: &Store| s.links().cloned().collect::<Vec<_>>();
    assert_eq!(links(&store), links(&restored));
}
